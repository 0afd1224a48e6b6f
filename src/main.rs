//! Touchless gesture control: replays hand landmarks into pointer and keyboard actions.

use anyhow::{bail, Context, Result};
use casual_touch::{
    actions::{ActionSink, LoggingSink},
    app::{AppConfig, GestureApp},
    cli::{Args, SinkKind},
    config::{Config, EXAMPLE_CONFIG},
    cursor_control::X11Sink,
    landmarks::Handedness,
    source::CsvReplaySource,
};
use clap::Parser;
use log::info;

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    if args.print_config {
        print!("{EXAMPLE_CONFIG}");
        return Ok(());
    }

    // Initialize logger
    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    info!("Casual Touch - hand gesture control");

    // Load configuration if provided
    let mut config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path.display());
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("Failed to load config file: {}. Using defaults.", e);
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    if args.left_hand {
        config.hand.handedness = Handedness::Left;
    }
    config.validate().context("Invalid configuration")?;

    let sink_kind = match args.sink {
        Some(kind) => kind,
        None => SinkKind::from_config(&config.output.sink)
            .with_context(|| format!("Unknown sink '{}'", config.output.sink))?,
    };

    let Some(replay) = args.replay else {
        bail!("No landmark source given; pass --replay <CSV>");
    };
    let source = CsvReplaySource::from_path(&replay)
        .with_context(|| format!("Failed to load recording {}", replay.display()))?;

    let app_config = AppConfig {
        gesture: config.gesture_config()?,
        fallback_screen: config.screen_size(),
        realtime: args.realtime,
    };

    match sink_kind {
        SinkKind::X11 => run(app_config, source, X11Sink::new()?),
        SinkKind::Log => run(app_config, source, LoggingSink::new()),
    }
}

fn run<K: ActionSink>(config: AppConfig, source: CsvReplaySource, sink: K) -> Result<()> {
    let mut app = GestureApp::new(config, source, sink)?;
    app.run()?;

    Ok(())
}
