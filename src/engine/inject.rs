//! Host data injection into command strings and parameter blocks.
//!
//! Orchestrate and execute steps often need data that only exists once
//! hosts are provisioned. A definition writes
//!
//! ```text
//! command: /usr/bin/foo --ip { host01.ip_address[0] } --args ..
//! ```
//!
//! and the injector replaces `{ host01.ip_address[0] }` with the first
//! address of the `host01` resource. The first path segment names a host;
//! the rest walk its attributes. `key[n]` indexes a sequence, and a
//! negative `n` counts from its end.
//!
//! Brace expressions that look like JSONPath or jq queries (`{.items}`,
//! `{$.a}`, `{@.b}`, `{range ...}`, `{|...}`, `{key: ...}`) belong to the
//! tools being invoked and are left untouched.

use std::sync::LazyLock;

use regex::Regex;

use crate::scenario::Host;
use crate::value::{Mapping, Value};
use crate::{wlog_debug, wlog_trace, Error, Result};

static EXPRESSION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{(.*?)\}").unwrap());

static FOREIGN_QUERY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^range|^[|.$@]|[\w|']+:").unwrap());

/// Whether a trimmed brace expression belongs to another query language.
pub fn is_foreign_query(expression: &str) -> bool {
    FOREIGN_QUERY_RE.is_match(expression)
}

/// Split `key[n]` into its key and index. Plain segments yield `None`.
fn parse_indexed<'s>(segment: &'s str, expression: &str) -> Result<Option<(&'s str, i64)>> {
    let Some((key, rest)) = segment.split_once('[') else {
        return Ok(None);
    };
    let raw = rest.split(']').next().unwrap_or(rest).trim();
    let pos = raw.parse::<i64>().map_err(|e| Error::MalformedExpression {
        expression: expression.to_string(),
        reason: format!("index '{}' of {}: {}", raw, key, e),
    })?;
    Ok(Some((key, pos)))
}

/// Substitutes host attribute values into strings and nested structures.
#[derive(Debug, Clone, Copy)]
pub struct DataInjector<'a> {
    hosts: &'a [Host],
}

impl<'a> DataInjector<'a> {
    pub fn new(hosts: &'a [Host]) -> Self {
        Self { hosts }
    }

    /// Find the host a path expression starts from.
    pub fn host_exists(&self, node: &str) -> Result<&'a Host> {
        self.hosts
            .iter()
            .find(|h| h.name == node)
            .ok_or_else(|| Error::NodeNotFound(node.to_string()))
    }

    /// Replace every host expression in `text`.
    ///
    /// Fails on the first expression that cannot be resolved; no partially
    /// substituted text is ever returned.
    pub fn inject(&self, text: &str) -> Result<String> {
        let mut rendered = String::with_capacity(text.len());
        let mut last = 0;

        for found in EXPRESSION_RE.find_iter(text) {
            let raw = found.as_str();
            let expression = raw[1..raw.len() - 1].trim();

            rendered.push_str(&text[last..found.start()]);
            if is_foreign_query(expression) {
                wlog_debug!("JSONPath format was identified in the command {}.", expression);
                rendered.push_str(raw);
            } else {
                rendered.push_str(&self.evaluate(expression)?);
            }
            last = found.end();
        }

        if last == 0 {
            return Ok(text.to_string());
        }
        rendered.push_str(&text[last..]);
        Ok(rendered)
    }

    /// Resolve a single `host.path[n].to.value` expression to text.
    pub fn evaluate(&self, expression: &str) -> Result<String> {
        let mut segments = expression.split('.');
        let node = segments.next().unwrap_or_default();
        let host = self.host_exists(node)?;

        let mut value: Option<Value> = None;
        for segment in segments {
            wlog_trace!("evaluate {}: segment {:?}", expression, segment);
            let next = match (parse_indexed(segment, expression)?, &value) {
                (Some((key, pos)), None) => host
                    .attribute(key)
                    .ok_or_else(|| Error::AttributeNotFound {
                        attribute: key.to_string(),
                        host: host.name.clone(),
                    })?
                    .index(key, pos)?
                    .clone(),
                (Some((key, pos)), Some(current)) => current.lookup(key)?.index(key, pos)?.clone(),
                (None, None) => host
                    .attribute(segment)
                    .ok_or_else(|| Error::AttributeNotFound {
                        attribute: segment.to_string(),
                        host: host.name.clone(),
                    })?
                    .into_owned(),
                (None, Some(current)) => current.lookup(segment)?.clone(),
            };

            // A string has nothing left to traverse.
            let done = next.is_string();
            value = Some(next);
            if done {
                break;
            }
        }

        value
            .as_ref()
            .and_then(Value::render_scalar)
            .ok_or_else(|| Error::NonScalar(expression.to_string()))
    }

    /// Inject into every string of a value tree, keeping its shape.
    pub fn inject_value(&self, value: &Value) -> Result<Value> {
        Ok(match value {
            Value::String(s) => Value::String(self.inject(s)?),
            Value::Sequence(items) => Value::Sequence(self.inject_sequence(items)?),
            Value::Mapping(map) => Value::Mapping(self.inject_mapping(map)?),
            other => other.clone(),
        })
    }

    /// Inject into keys and values of a mapping, keeping key order.
    pub fn inject_mapping(&self, mapping: &Mapping) -> Result<Mapping> {
        let mut injected = Mapping::with_capacity(mapping.len());
        for (key, value) in mapping {
            injected.insert(self.inject(key)?, self.inject_value(value)?);
        }
        Ok(injected)
    }

    /// Inject into every item of a sequence.
    pub fn inject_sequence(&self, items: &[Value]) -> Result<Vec<Value>> {
        items.iter().map(|item| self.inject_value(item)).collect()
    }
}
