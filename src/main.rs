// src/main.rs
use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Logger, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use notion2sections::{CommandLineInput, DocumentAssembler, NotionHttpClient, RunConfig};
use std::fs;
use std::path::PathBuf;

const LOG_FILE_NAME: &str = "notion2sections.log";
const FILE_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} [{l}] {t} - {m}{n}";

/// Routes this crate's records to a log file at debug level and to stderr
/// at warn (debug with `--verbose`). Dependencies such as reqwest and hyper
/// only log warnings.
///
/// stdout is left to the document JSON.
fn setup_logging(verbose: bool) -> anyhow::Result<PathBuf> {
    let log_file_path = std::env::temp_dir().join(LOG_FILE_NAME);
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let (console_level, console_pattern) = if verbose {
        (LevelFilter::Debug, FILE_PATTERN)
    } else {
        (LevelFilter::Warn, "{l}: {m}{n}")
    };

    let stderr_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(console_pattern)))
        .build();
    let file_appender = FileAppender::builder()
        .append(false)
        .encoder(Box::new(PatternEncoder::new(FILE_PATTERN)))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(console_level)))
                .build("stderr", Box::new(stderr_appender)),
        )
        .appender(Appender::builder().build("file", Box::new(file_appender)))
        .logger(
            Logger::builder()
                .appender("stderr")
                .appender("file")
                .additive(false)
                .build(env!("CARGO_CRATE_NAME"), LevelFilter::Debug),
        )
        .build(
            Root::builder()
                .appender("stderr")
                .appender("file")
                .build(LevelFilter::Warn),
        )?;

    log4rs::init_config(config)?;
    Ok(log_file_path)
}

/// Fetches the page, assembles it and writes the document JSON.
async fn run(config: &RunConfig) -> anyhow::Result<()> {
    let client = NotionHttpClient::new(config.client.base_url.clone())?;
    let assembler = DocumentAssembler::new(client, config.client.clone());

    let (document, report) = assembler
        .assemble_with_report(&config.page_id)
        .await
        .with_context(|| format!("Failed to assemble page {}", config.page_id))?;

    let json = document.to_json(config.pretty)?;
    match &config.output_file {
        Some(path) => {
            fs::write(path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "✓ {} sections, {} children written to {}",
                report.sections,
                report.children,
                path.display()
            );
        }
        None => println!("{}", json),
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLineInput::parse();

    let log_file = setup_logging(cli.verbose)?;
    log::debug!("Logging to {}", log_file.display());

    let config = RunConfig::resolve(cli)?;

    run(&config).await
}
