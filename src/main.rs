use std::error::Error;
use std::path::PathBuf;

use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> Result<(), Box<dyn Error>> {
    // Load environment variables from .env file, if one exists.
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info,corpus_prep=info"))
        .unwrap();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    // First argument: file or directory holding *.jsonl tree dumps.
    let input = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    let cfg = corpus_prep::config::load_from_env_or_default()?;
    let summary = corpus_prep::extract_corpus(&input, &cfg)?;

    tracing::info!(
        out_dir = %cfg.output_directory.display(),
        samples = summary.trees_processed,
        "Corpus ready"
    );

    Ok(())
}
