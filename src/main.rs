use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use weft::config::Config;
use weft::engine::{
    filter_notifications_on_trigger, filter_notifications_to_skip, DataInjector, NotifyTrigger,
};
use weft::pipeline::PipelineFactory;
use weft::{wlog, wlog_error, Error, FilterOptions, Result, Scenario};

/// Weft - bind scenario references, inject host data, and evaluate triggers
#[derive(Parser, Debug)]
#[command(name = "weft")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    WEFT_DEBUG=1    Enable debug logging (alternative to --debug)")]
pub struct Cli {
    /// Enable debug logging (writes to ~/.weft/weft.log)
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Config file to use instead of ~/.weft/weft.toml
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Build the pipeline for a task or notification trigger and print it as JSON
    Pipeline {
        /// Task name (validate, provision, ...) or trigger (on_start, ...)
        task: String,

        /// Scenario snapshot (JSON)
        #[arg(long, short = 's')]
        scenario: PathBuf,

        /// Only include resources carrying one of these labels
        #[arg(long = "label", short = 'l', conflicts_with = "skip_labels")]
        labels: Vec<String>,

        /// Exclude resources carrying one of these labels
        #[arg(long = "skip-label")]
        skip_labels: Vec<String>,

        /// Notifications to leave out
        #[arg(long = "skip-notify")]
        skip_notify: Vec<String>,
    },

    /// Inject host data into a string and print the result
    Inject {
        /// Text containing { host.attr[idx] } expressions
        text: String,

        /// Scenario snapshot (JSON)
        #[arg(long, short = 's')]
        scenario: PathBuf,
    },

    /// Print the notifications eligible to fire for a trigger
    Notify {
        /// on_start, on_complete or on_demand
        trigger: String,

        /// Scenario snapshot (JSON)
        #[arg(long, short = 's')]
        scenario: PathBuf,

        /// Notifications to leave out
        #[arg(long = "skip-notify")]
        skip_notify: Vec<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    weft::log::init(cli.debug);

    if let Err(e) = run(cli) {
        wlog_error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Command::Pipeline {
            task,
            scenario,
            labels,
            skip_labels,
            skip_notify,
        } => {
            let options = FilterOptions {
                labels,
                skip_labels,
                skip_notify,
            };
            run_pipeline(&task, &scenario, &options, &config)
        }
        Command::Inject { text, scenario } => run_inject(&text, &scenario),
        Command::Notify {
            trigger,
            scenario,
            skip_notify,
        } => run_notify(&trigger, &scenario, skip_notify),
    }
}

fn run_pipeline(task: &str, path: &Path, options: &FilterOptions, config: &Config) -> Result<()> {
    wlog!("Pipeline command: task={}, scenario={}", task, path.display());
    let scenario = Scenario::load(path)?;

    let builder = PipelineFactory::get_pipeline(task);
    if !builder.is_task_valid() {
        return Err(Error::UnknownTask(task.to_string()));
    }
    let pipeline = builder.build(&scenario, options, config)?;
    println!("{}", serde_json::to_string_pretty(&pipeline)?);
    Ok(())
}

fn run_inject(text: &str, path: &Path) -> Result<()> {
    wlog!("Inject command: scenario={}", path.display());
    let scenario = Scenario::load(path)?;
    println!("{}", DataInjector::new(&scenario.hosts).inject(text)?);
    Ok(())
}

fn run_notify(trigger: &str, path: &Path, skip_notify: Vec<String>) -> Result<()> {
    wlog!("Notify command: trigger={}, scenario={}", trigger, path.display());
    let trigger: NotifyTrigger = trigger.parse()?;
    let scenario = Scenario::load(path)?;
    let options = FilterOptions {
        skip_notify,
        ..FilterOptions::default()
    };

    let notifications = filter_notifications_to_skip(scenario.notifications, &options);
    let notifications = filter_notifications_on_trigger(
        trigger,
        notifications,
        &scenario.state.passed_tasks,
        &scenario.state.failed_tasks,
    );
    for notification in &notifications {
        println!("{}", notification.name);
    }
    Ok(())
}
