//! Moodgarden - headless garden loop with a control server

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use moodgarden::core::logging;
use moodgarden::core::time::FrameTimer;
use moodgarden::garden::{
    handle_command, resolve_theme, Garden, GardenConfig, GardenTheme, GeminiThemeProvider,
};
use moodgarden::generation::{today, SimpleRng};
use moodgarden_debug::DebugServer;

/// How often frame statistics are logged
const STATS_INTERVAL: Duration = Duration::from_secs(10);

fn main() {
    logging::init();
    log::info!("Moodgarden starting...");

    let args: Vec<String> = std::env::args().collect();
    let config_path = parse_config_arg(&args);
    let pinned_day = parse_day_arg(&args);

    let config = match config_path {
        Some(ref path) => {
            log::info!("Loading config from: {}", path.display());
            match GardenConfig::load(path) {
                Ok(config) => config,
                Err(e) => {
                    log::error!("Failed to load config {}: {}", path.display(), e);
                    std::process::exit(1);
                }
            }
        }
        None => GardenConfig::default(),
    };
    let port = parse_port_arg(&args).unwrap_or(config.control_port);

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            log::error!("Failed to create tokio runtime: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(run(config, port, pinned_day)) {
        log::error!("{}", e);
        std::process::exit(1);
    }
    log::info!("Moodgarden stopped");
}

async fn run(config: GardenConfig, port: u16, pinned_day: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let provider = match GeminiThemeProvider::new(&config.theme_provider) {
        Ok(provider) => Some(Arc::new(provider)),
        Err(e) => {
            log::warn!("Theme provider unavailable, moods will use the fallback theme: {}", e);
            None
        }
    };

    let (_server, mut commands) = DebugServer::start(port).await?;
    let (theme_tx, mut theme_rx) = mpsc::channel::<GardenTheme>(4);

    let frame_period = Duration::from_secs_f64(1.0 / config.frame_rate as f64);
    let growth_period = config.growth.tick_interval();
    let day = pinned_day.clone().unwrap_or_else(today);
    let mut garden = Garden::new(config, day, SimpleRng::from_entropy());
    log::info!(
        "Garden of {} ({}): {} flowers",
        garden.day(),
        garden.settings().garden_style,
        garden.store().len()
    );

    let mut timer = FrameTimer::new();
    let mut frames = tokio::time::interval(frame_period);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut growth = tokio::time::interval(growth_period);
    growth.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut last_stats = tokio::time::Instant::now();
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = frames.tick() => {
                timer.tick();
                if pinned_day.is_none() {
                    garden.roll_day(&today());
                }
                let frame = garden.frame(timer.elapsed_secs());
                let parts = frame.part_instances();
                if last_stats.elapsed() >= STATS_INTERVAL {
                    last_stats = tokio::time::Instant::now();
                    log::info!(
                        "{:.1} fps, {} flowers, {} parts, {} growing",
                        timer.fps(),
                        frame.flowers.len(),
                        parts.len(),
                        garden.stats().growing
                    );
                }
            }
            _ = growth.tick() => {
                garden.tick_growth();
            }
            Some(envelope) = commands.recv() => {
                let outcome = handle_command(&mut garden, envelope.command.clone(), &timer.stats());
                if let Some(mood) = outcome.mood {
                    let tx = theme_tx.clone();
                    let provider = provider.clone();
                    tokio::spawn(async move {
                        let theme = match provider {
                            Some(provider) => resolve_theme(provider.as_ref(), &mood).await,
                            None => GardenTheme::fallback(),
                        };
                        if tx.send(theme).await.is_err() {
                            log::debug!("Garden loop stopped before mood \"{}\" resolved", mood);
                        }
                    });
                }
                envelope.respond(outcome.response);
            }
            Some(theme) = theme_rx.recv() => {
                garden.complete_mood(theme);
            }
            _ = &mut shutdown => {
                log::info!("Shutting down");
                break;
            }
        }
    }
    Ok(())
}

/// Parse --config argument from command line (path to a garden config file)
fn parse_config_arg(args: &[String]) -> Option<PathBuf> {
    for i in 0..args.len() {
        if args[i] == "--config" || args[i] == "-c" {
            if let Some(path) = args.get(i + 1) {
                return Some(PathBuf::from(path));
            }
        }
    }
    None
}

/// Parse --port argument from command line (control server port)
fn parse_port_arg(args: &[String]) -> Option<u16> {
    for i in 0..args.len() {
        if args[i] == "--port" || args[i] == "-p" {
            if let Some(port) = args.get(i + 1) {
                return port.parse().ok();
            }
        }
    }
    None
}

/// Parse --day argument (YYYY-MM-DD). A pinned day never rolls over.
fn parse_day_arg(args: &[String]) -> Option<String> {
    for i in 0..args.len() {
        if args[i] == "--day" || args[i] == "-d" {
            if let Some(day) = args.get(i + 1) {
                match chrono::NaiveDate::parse_from_str(day, "%Y-%m-%d") {
                    Ok(_) => return Some(day.clone()),
                    Err(e) => log::warn!("Ignoring --day {}: {}", day, e),
                }
            }
        }
    }
    None
}
