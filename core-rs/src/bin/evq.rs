//! EVQ - Event-Queue Harness CLI
//!
//! Drives a mounted event-queue filesystem through one of the canonical
//! scenarios, then holds the process open until interrupted.

use clap::{Parser, Subcommand};
use evq_core::{
    EvqError, FileSystemDriver, HarnessConfig, HarnessDriver, Scenario, DEFAULT_MESSAGE_COUNT,
    DEFAULT_QUEUE_COUNT,
};
use std::path::PathBuf;
use std::sync::{mpsc, Arc};

#[derive(Parser)]
#[command(name = "evq")]
#[command(version = "0.2.1")]
#[command(about = "Filesystem-backed event-queue harness", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create event queue directories only
    Queues {
        /// Mount path of the backing store
        mount: PathBuf,
        /// Number of queues to create
        #[arg(long, default_value_t = DEFAULT_QUEUE_COUNT)]
        queues: usize,
    },
    /// Create queues and populate each with numbered message files
    Messages {
        /// Mount path of the backing store
        mount: PathBuf,
        /// Number of queues to create
        #[arg(long, default_value_t = DEFAULT_QUEUE_COUNT)]
        queues: usize,
        /// Number of message files per queue
        #[arg(long, default_value_t = DEFAULT_MESSAGE_COUNT)]
        files: usize,
    },
    /// Create queues and fan one message out via identity-sharing links
    Fanout {
        /// Mount path of the backing store
        mount: PathBuf,
        /// Number of queues to create
        #[arg(long, default_value_t = DEFAULT_QUEUE_COUNT)]
        queues: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let (scenario, mount, queue_count, message_count) = match &cli.command {
        Commands::Queues { mount, queues } => {
            (Scenario::CreateQueues, mount.clone(), *queues, 0)
        }
        Commands::Messages { mount, queues, files } => {
            (Scenario::WriteMessages, mount.clone(), *queues, *files)
        }
        Commands::Fanout { mount, queues } => {
            (Scenario::LinkFanout, mount.clone(), *queues, 0)
        }
    };

    if !mount.exists() {
        let err = EvqError::Usage(format!("mount path does not exist: {}", mount.display()));
        eprintln!("Usage: evq <COMMAND> MOUNTPOINT");
        eprintln!("{}", err);
        std::process::exit(1);
    }

    // The signal handler fires the interrupt channel once; the driver's
    // terminal wait blocks on the receiving end and nothing else
    let (tx, rx) = mpsc::channel();
    ctrlc::set_handler(move || {
        let _ = tx.send(());
    })?;

    let driver = Arc::new(FileSystemDriver::new(mount.clone()));
    let config = HarnessConfig {
        root: mount,
        queue_count,
        message_count,
    };
    let mut harness = HarnessDriver::new(driver, config, rx);

    if let Err(e) = harness.run(scenario) {
        eprintln!("[Harness] Fatal: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(if verbose { "debug" } else { "info" })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
