//! lamco-hand-pointer - Hand Gesture Pointer Control
//!
//! Entry point for the command-line binary. Replays a recorded stream of
//! hand landmarks through the gesture engine and logs the pointer effects
//! it would produce.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::{Layer, SubscriberExt};
use tracing_subscriber::registry::Registry;
use tracing_subscriber::util::SubscriberInitExt;

use lamco_hand_pointer::config::{Config, LoggingConfig};
use lamco_hand_pointer::engine::{Disposition, FrameController};
use lamco_hand_pointer::pointer::{LogBackend, PointerBackend};
use lamco_hand_pointer::replay::{FrameSource, JsonLinesSource};
use lamco_hand_pointer::utils::format_user_error;

/// Command-line arguments for lamco-hand-pointer
#[derive(Parser, Debug)]
#[command(name = "lamco-hand-pointer")]
#[command(version, about = "Hand gesture pointer control", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, env = "LAMCO_HAND_POINTER_CONFIG", default_value = "config.toml")]
    config: PathBuf,

    /// Recorded landmark frames to replay (JSON lines)
    #[arg(short, long, env = "LAMCO_HAND_POINTER_FRAMES")]
    frames: Option<PathBuf>,

    /// Replay rate in frames per second
    #[arg(long, default_value = "30", value_parser = clap::value_parser!(u32).range(1..=1000))]
    fps: u32,

    /// Verbose logging (can be specified multiple times)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log format (json|pretty|compact)
    #[arg(long, default_value = "pretty")]
    log_format: String,

    /// Write logs to file (in addition to stdout)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_default_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::default_config().to_toml_string()?);
        return Ok(());
    }

    let (config, using_defaults) = match load_config(&args.config) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("{}", format_user_error(&e));
            return Err(e);
        }
    };

    init_logging(&args, &config.logging)?;

    info!("════════════════════════════════════════════════════════");
    info!("  lamco-hand-pointer v{}", env!("CARGO_PKG_VERSION"));
    info!("  Built: {}", env!("BUILD_DATE"));
    info!("  Commit: {}", env!("GIT_HASH"));
    info!("  Profile: {}", if cfg!(debug_assertions) { "debug" } else { "release" });
    info!("════════════════════════════════════════════════════════");

    if using_defaults {
        warn!(
            "Config file {} not found, using defaults",
            args.config.display()
        );
    } else {
        info!("Configuration loaded from {}", args.config.display());
    }
    debug!("Config: {:?}", config);

    let mut engine = match config
        .to_engine_config()
        .context("Invalid gesture configuration")
        .and_then(|engine_config| {
            FrameController::new(engine_config).context("Failed to start gesture engine")
        }) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("{}", format_user_error(&e));
            return Err(e);
        }
    };
    let mut backend = LogBackend::new(engine.config().screen());

    let Some(frames_path) = args.frames.as_deref() else {
        info!("No frame recording given (--frames), nothing to replay");
        return Ok(());
    };

    let mut source = match JsonLinesSource::open(frames_path)
        .with_context(|| format!("Failed to open frame recording: {}", frames_path.display()))
    {
        Ok(source) => source,
        Err(e) => {
            eprintln!("{}", format_user_error(&e));
            return Err(e);
        }
    };

    info!(
        "Replaying {} at {} fps (Ctrl-C to stop)",
        frames_path.display(),
        args.fps
    );
    run_replay(&mut engine, &mut source, &mut backend, args.fps).await?;

    if source.skipped() > 0 {
        warn!("{} malformed frame lines were skipped", source.skipped());
    }
    info!(
        "Replay finished: {}",
        serde_json::to_string(&engine.stats()).context("Failed to serialize stats")?
    );
    Ok(())
}

/// Load the config file; a missing file falls back to the defaults
fn load_config(path: &Path) -> Result<(Config, bool)> {
    if !path.exists() {
        return Ok((Config::default_config(), true));
    }
    Ok((Config::load(path)?, false))
}

async fn run_replay<S, B>(
    engine: &mut FrameController,
    source: &mut S,
    backend: &mut B,
    fps: u32,
) -> Result<()>
where
    S: FrameSource,
    B: PointerBackend,
{
    let mut interval = tokio::time::interval(Duration::from_secs_f64(1.0 / fps as f64));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Interrupted, stopping replay");
                break;
            }
            _ = interval.tick() => {
                let Some(frame) = source
                    .next_frame()
                    .context("Failed to read frame recording")?
                else {
                    info!("End of frame recording");
                    break;
                };

                let report = engine.process_frame(&frame.hands, Instant::now(), backend);
                for outcome in &report.hands {
                    if let Disposition::Dispatched(effect) = outcome.disposition {
                        debug!("{} hand {} -> {}", outcome.hand, outcome.gesture, effect);
                    }
                }
            }
        }
    }

    Ok(())
}

/// Boxed fmt layer on the bare registry
type FormatLayer = Box<dyn Layer<Registry> + Send + Sync>;

fn format_layer<W>(format: &str, writer: W, ansi: bool) -> FormatLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi);
    match format {
        "json" => layer.json().boxed(),
        "compact" => layer.compact().boxed(),
        _ => layer.pretty().boxed(),
    }
}

fn init_logging(args: &Args, logging: &LoggingConfig) -> Result<()> {
    use std::fs::File;

    let log_level = match args.verbose {
        0 => logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "lamco_hand_pointer={level},warn",
            level = log_level
        ))
    });

    let log_file_path = args.log_file.as_ref().or(logging.log_file.as_ref());
    let format = args.log_format.as_str();

    // If log file is specified, write to both stdout and file
    let mut layers = vec![format_layer(format, std::io::stdout, true)];
    if let Some(log_file_path) = log_file_path {
        let file = File::create(log_file_path)
            .with_context(|| format!("Failed to create log file: {}", log_file_path.display()))?;
        layers.push(format_layer(format, file, false));
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter)
        .init();

    if let Some(log_file_path) = log_file_path {
        info!("Logging to file: {}", log_file_path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_layer_builds_every_format() {
        for format in ["pretty", "compact", "json", "unknown"] {
            let layers = vec![
                format_layer(format, std::io::sink, true),
                format_layer(format, std::io::sink, false),
            ];
            let subscriber = tracing_subscriber::registry().with(layers);
            tracing::subscriber::with_default(subscriber, || info!(format, "formatted"));
        }
    }
}
