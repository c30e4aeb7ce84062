use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("No home directory")]
    NoHomeDir,

    #[error("Node {0} not found!")]
    NodeNotFound(String),

    #[error("{attribute} not found in host {host}!")]
    AttributeNotFound { attribute: String, host: String },

    #[error("{key} not found in {context}")]
    KeyNotFound { key: String, context: String },

    #[error("Index {index} out of range for {key}")]
    IndexOutOfRange { key: String, index: i64 },

    #[error("Malformed expression '{expression}': {reason}")]
    MalformedExpression { expression: String, reason: String },

    #[error("Expression '{0}' does not resolve to a scalar value")]
    NonScalar(String),

    #[error("No execute matches references {0:?}")]
    NoMatchingExecute(Vec<String>),

    #[error("Unable to lookup task {0} class.")]
    UnknownTask(String),

    #[error("Invalid notification trigger: {0}")]
    UnknownTrigger(String),
}

impl Error {
    /// Whether the error means a path expression named something that does not exist.
    pub fn is_reference_error(&self) -> bool {
        matches!(
            self,
            Error::NodeNotFound(_)
                | Error::AttributeNotFound { .. }
                | Error::KeyNotFound { .. }
                | Error::IndexOutOfRange { .. }
                | Error::NonScalar(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
