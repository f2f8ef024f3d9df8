use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use widget_core::app::config::{DEFAULT_MAX_SOURCE_FAILURES, DEFAULT_POLL_INTERVAL_MS};
use widget_core::app::{ConsumerBuilder, ConsumerConfig, StorageStrategy};
use widget_core::impls::{FsObjectStore, FsTableStore};
use widget_core::observability::{LogFormat, init_tracing};

#[derive(Parser, Debug)]
#[command(name = "widget-consumer")]
#[command(about = "Drain widget requests from an inbox into document or table storage", long_about = None)]
struct Args {
    /// Storage strategy: document or table (legacy names bucket3 and dynamodb)
    #[arg(short, long)]
    storage: StorageStrategy,

    /// Directory polled for request files (must exist)
    #[arg(long, default_value = "data/requests")]
    inbox_dir: PathBuf,

    /// Root of the document store
    #[arg(long, default_value = "data/web")]
    documents_dir: PathBuf,

    /// Directory of the widget table
    #[arg(long, default_value = "data/widgets")]
    table_dir: PathBuf,

    /// Pause between polls of an empty inbox, in milliseconds
    #[arg(long, default_value_t = DEFAULT_POLL_INTERVAL_MS)]
    poll_interval_ms: u64,

    /// Consecutive inbox failures before exiting (0 = never)
    #[arg(long, default_value_t = DEFAULT_MAX_SOURCE_FAILURES)]
    max_source_failures: u32,

    /// Log output format (human or json)
    #[arg(long, default_value = "human")]
    log_format: LogFormat,
}

impl Args {
    fn config(&self) -> ConsumerConfig {
        let mut config = ConsumerConfig::new(self.storage);
        config.poll_interval_ms = self.poll_interval_ms;
        config.max_source_failures = self.max_source_failures;
        config
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = args.config();
    let mut builder =
        ConsumerBuilder::new(config.clone()).inbox(Arc::new(FsObjectStore::new(&args.inbox_dir)));

    // only the selected backend is opened
    builder = match config.storage {
        StorageStrategy::Document => {
            let documents = FsObjectStore::create(&args.documents_dir).await?;
            builder.document_store(Arc::new(documents))
        }
        StorageStrategy::Table => {
            let table = FsTableStore::open(&args.table_dir).await?;
            builder.table_store(Arc::new(table))
        }
    };

    let mut consumer = builder.build()?;
    tracing::info!(
        inbox = %args.inbox_dir.display(),
        storage = %config.storage,
        "widget consumer ready"
    );
    consumer.run().await?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(e) = init_tracing(args.log_format) {
        eprintln!("failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "widget consumer stopped");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_accepts_legacy_names() {
        let args = Args::try_parse_from(["widget-consumer", "-s", "dynamodb"]).unwrap();
        assert_eq!(args.storage, StorageStrategy::Table);
        let args = Args::try_parse_from(["widget-consumer", "--storage", "bucket3"]).unwrap();
        assert_eq!(args.config(), ConsumerConfig::new(StorageStrategy::Document));
    }

    #[test]
    fn unknown_storage_is_rejected() {
        assert!(Args::try_parse_from(["widget-consumer", "-s", "s3"]).is_err());
        assert!(Args::try_parse_from(["widget-consumer"]).is_err());
    }
}
