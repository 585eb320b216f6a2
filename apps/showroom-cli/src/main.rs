use anyhow::Context;
use clap::{Parser, Subcommand};
use showroom_common::{ShowroomConfig, Viewport};
use showroom_input::PointerEvent;
use showroom_kernel::Session;
use showroom_render::{DebugTextRenderer, Renderer};
use showroom_scene::placeholder_model;
use showroom_tools::SessionInspector;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const VIEWPORT_WIDTH: f32 = 800.0;
const VIEWPORT_HEIGHT: f32 = 600.0;

#[derive(Parser)]
#[command(name = "showroom-cli", about = "Headless tools for the showroom")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON config file; defaults are used when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate versions
    Info,
    /// Run a scripted drag and print velocity and state per frame
    Simulate {
        /// Frames to run after the release
        #[arg(short, long, default_value = "10")]
        frames: u64,
        /// Seed for the auto-rotation speeds
        #[arg(short, long, default_value = "42")]
        seed: u64,
        /// Horizontal drag distance in pixels
        #[arg(short, long, default_value = "50", allow_negative_numbers = true)]
        delta: f32,
        /// Run without a model in the scene
        #[arg(long)]
        no_model: bool,
    },
    /// Load, validate and print the configuration as JSON
    Config {
        /// Config file to check; overrides --config
        #[arg(short, long)]
        path: Option<PathBuf>,
    },
    /// Run idle frames and print the text render
    Render {
        #[arg(short, long, default_value = "1")]
        frames: u64,
        #[arg(short, long, default_value = "42")]
        seed: u64,
    },
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ShowroomConfig> {
    match path {
        Some(path) => ShowroomConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => {
            tracing::debug!("no config file given, using defaults");
            Ok(ShowroomConfig::default())
        }
    }
}

fn new_session(config: ShowroomConfig, seed: u64, with_model: bool) -> anyhow::Result<Session> {
    let viewport = Viewport::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT)?;
    let model = placeholder_model(&config.model);
    let mut session = Session::with_seed(config, viewport, seed)?;
    if with_model {
        session.attach_model(model);
    }
    tracing::info!(seed, with_model, "headless session ready");
    Ok(session)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("showroom-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", showroom_common::crate_info());
            println!("scene: {}", showroom_scene::crate_info());
            println!("input: {}", showroom_input::crate_info());
            println!("kernel: {}", showroom_kernel::crate_info());
            println!("render: {}", showroom_render::crate_info());
            println!("tools: {}", showroom_tools::crate_info());
        }
        Commands::Simulate {
            frames,
            seed,
            delta,
            no_model,
        } => {
            let config = load_config(cli.config.as_deref())?;
            let mut session = new_session(config, seed, !no_model)?;

            let (cx, cy) = (VIEWPORT_WIDTH / 2.0, VIEWPORT_HEIGHT / 2.0);
            println!(
                "Simulate: seed={seed} delta={delta}px model={}",
                if no_model { "none" } else { "placeholder" }
            );
            session.handle_pointer(PointerEvent::Down { x: cx, y: cy })?;
            session.handle_pointer(PointerEvent::Move { x: cx + delta, y: cy })?;
            session.handle_pointer(PointerEvent::Up { x: cx + delta, y: cy })?;
            println!("{}", SessionInspector::summary(&session));

            for _ in 0..frames {
                session.tick();
                println!(
                    "frame {:>4} state={:<8} velocity={:.4}",
                    session.frame(),
                    session.interaction_state().as_str(),
                    session.velocity()
                );
            }

            let report = session.finish();
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Config { path } => {
            let path = path.or(cli.config);
            let config = load_config(path.as_deref())?;
            println!("{}", config.to_json_pretty()?);
        }
        Commands::Render { frames, seed } => {
            let config = load_config(cli.config.as_deref())?;
            let mut session = new_session(config, seed, true)?;
            for _ in 0..frames {
                session.tick();
            }
            print!("{}", DebugTextRenderer::new().render(&session));
            if let Some(model) = SessionInspector::inspect_model(&session) {
                println!("{model}");
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_without_path() {
        let config = load_config(None).unwrap();
        assert_eq!(config.model.size, ShowroomConfig::default().model.size);
    }

    #[test]
    fn headless_session_respects_model_flag() {
        let with = new_session(ShowroomConfig::default(), 7, true).unwrap();
        assert!(with.scene().model().is_some());
        let without = new_session(ShowroomConfig::default(), 7, false).unwrap();
        assert!(without.scene().model().is_none());
    }
}
