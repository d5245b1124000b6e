use anyhow::Context;
use clap::Parser;
use ocr_desktop::config::{Args, Config};
use ocr_desktop::engine::OcrEngine;
use ocr_desktop::session::{Command, Session, HELP};
use ocr_desktop::{engines, ocr, OcrError};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    let args = Args::parse();

    // Initialize tracing; stdout is reserved for extracted text
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from(args);

    tracing::info!("Starting ocr-desktop v{}", env!("CARGO_PKG_VERSION"));

    // Still single-threaded here; the runtime comes after
    engines::export_tessdata_dir(&config);

    let result = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")
        .and_then(|rt| {
            let result = rt.block_on(run(&config));
            // A stdin read still pending after `quit` must not keep the process alive
            rt.shutdown_background();
            result
        });

    if let Err(err) = result {
        report(err);
        std::process::exit(1);
    }
}

async fn run(config: &Config) -> anyhow::Result<()> {
    match &config.path {
        Some(path) => run_once(config, path).await,
        None => run_interactive(config).await,
    }
}

/// Decode first so a bad path never waits on engine start-up
async fn run_once(config: &Config, path: &Path) -> anyhow::Result<()> {
    let image = ocr::load_image(path)?;

    let engine = start_engine(config).await?;
    let text = ocr::extract_text_async(image, engine).await?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

/// Engine start is deferred to the first run so `open` works without it
async fn run_interactive(config: &Config) -> anyhow::Result<()> {
    let mut engine: Option<Arc<dyn OcrEngine>> = None;
    let mut session = Session::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("ocr-desktop {}", env!("CARGO_PKG_VERSION"));
    println!("{}", HELP);

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match Command::parse(&line) {
            Command::Open(path) => match session.open(&path) {
                Ok(selection) => println!(
                    "Opened {} ({}x{})",
                    selection.path.display(),
                    selection.width,
                    selection.height
                ),
                Err(err) => report(err.into()),
            },
            Command::Run => {
                if session.selection().is_none() {
                    report(OcrError::NoImageSelected.into());
                    continue;
                }
                let ready = match &engine {
                    Some(ready) => ready.clone(),
                    None => match start_engine(config).await {
                        Ok(started) => engine.insert(started).clone(),
                        Err(err) => {
                            report(err.into());
                            continue;
                        }
                    },
                };

                println!("Running OCR...");
                match session.run(ready).await {
                    Ok(text) if text.trim().is_empty() => println!("(no text found)"),
                    Ok(text) => println!("{}", text.trim_end()),
                    Err(err) => report(err.into()),
                }
            }
            Command::Status => match session.selection() {
                Some(selection) => println!(
                    "Selected {} ({}x{})",
                    selection.path.display(),
                    selection.width,
                    selection.height
                ),
                None => println!("No image selected"),
            },
            Command::Help => println!("{}", HELP),
            Command::Quit => break,
            Command::Empty => {}
            Command::Usage(usage) => println!("Usage: {}", usage),
            Command::Unknown(input) => println!("Unknown command: {} (try 'help')", input),
        }
    }

    Ok(())
}

/// Create and check the engine on the blocking pool
///
/// Both may spawn `tesseract` or download tessdata.
async fn start_engine(config: &Config) -> Result<Arc<dyn OcrEngine>, OcrError> {
    let config = config.clone();
    tokio::task::spawn_blocking(move || -> Result<Arc<dyn OcrEngine>, OcrError> {
        let engine = engines::create_engine(&config)?;
        engine.check()?;
        tracing::info!("OCR engine ready: {}", engine.name());
        Ok(engine)
    })
    .await
    .map_err(|e| OcrError::Internal(format!("Engine start-up task failed: {}", e)))?
}

fn report(err: anyhow::Error) {
    match err.downcast_ref::<OcrError>() {
        Some(ocr_err) => eprintln!("error[{}]: {}", ocr_err.code(), ocr_err),
        None => eprintln!("error: {:#}", err),
    }
}
