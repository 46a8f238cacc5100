use std::path::PathBuf;
use std::time::Duration;

use careernav::translate::{run, HttpTranslator, RunConfig};
use clap::{Parser, ValueEnum};

const REMOTE_URL: &str = "https://libretranslate.com";
const LOCAL_URL: &str = "http://localhost:5000";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Hosted translation API; needs TRANSLATE_API_KEY.
    Remote,
    /// Translation server running on this machine.
    Local,
}

/// Translate the English FAQ dataset into the other supported languages,
/// one JSONL file per language.
#[derive(Debug, Parser)]
#[command(name = "translate-dataset")]
struct Cli {
    /// English source dataset (one {"user","assistant"} object per line)
    #[arg(long, default_value = "data/faq/en.jsonl")]
    input: PathBuf,

    /// Directory for the per-language output files
    #[arg(long, default_value = "data/faq")]
    out_dir: PathBuf,

    /// Target language codes
    #[arg(long = "lang", num_args = 1..)]
    langs: Vec<String>,

    #[arg(long, value_enum, default_value_t = Mode::Remote)]
    mode: Mode,

    /// Pause between input lines in milliseconds; defaults to 1000 for
    /// remote mode and 0 for local
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Override the translation server URL
    #[arg(long)]
    api_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "translate_dataset=info,careernav=info".to_string());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let languages = if cli.langs.is_empty() {
        careernav::faq::SUPPORTED_LANGUAGES
            .iter()
            .filter(|&&l| l != "en")
            .map(|l| l.to_string())
            .collect()
    } else {
        cli.langs.clone()
    };

    let delay_ms = cli.delay_ms.unwrap_or(match cli.mode {
        Mode::Remote => 1000,
        Mode::Local => 0,
    });

    let cfg = RunConfig {
        input: cli.input,
        out_dir: cli.out_dir,
        languages,
        delay: Duration::from_millis(delay_ms),
    };

    let http = reqwest::Client::new();
    let summary = match cli.mode {
        Mode::Remote => {
            let url = cli.api_url.as_deref().unwrap_or(REMOTE_URL);
            let translator = HttpTranslator::remote(http, url)?;
            run(&translator, &cfg).await?
        }
        Mode::Local => {
            let url = cli.api_url.as_deref().unwrap_or(LOCAL_URL);
            let translator = HttpTranslator::local(http, url);
            run(&translator, &cfg).await?
        }
    };

    println!(
        "Done: {} lines read, {} translated, {} skipped",
        summary.lines_read, summary.lines_written, summary.lines_skipped
    );
    Ok(())
}
