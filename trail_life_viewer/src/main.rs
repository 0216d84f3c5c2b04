// main.rs - Trail Life: multi-state Game of Life on a 128x64 toroidal panel

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;
use tracing_subscriber::EnvFilter;
use trail_life::{GameOfLife, LifeConfig, RulePreset};

mod frame;
mod headless;
mod pacer;
mod ui;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file path
    #[arg(short, long, default_value = "trail_life.toml")]
    config: PathBuf,

    /// Run without a window
    #[arg(long)]
    headless: bool,

    /// Stop after this many cycles (headless only)
    #[arg(long)]
    frames: Option<u64>,

    /// Override the RNG seed from the config file
    #[arg(long)]
    seed: Option<u64>,

    /// Override the rule table from the config file
    #[arg(long, value_enum)]
    rules: Option<Rules>,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum Rules {
    Trails,
    Classic,
}

impl From<Rules> for RulePreset {
    fn from(rules: Rules) -> Self {
        match rules {
            Rules::Trails => RulePreset::Trails,
            Rules::Classic => RulePreset::Classic,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = LifeConfig::load(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(rules) = args.rules {
        config.rules = rules.into();
    }

    let life: GameOfLife = GameOfLife::new(&config).context("invalid automaton configuration")?;

    if args.headless {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("failed to start tokio runtime")?;
        runtime.block_on(headless::run(life, config.max_fps, args.frames))?;
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([960.0, 640.0]),
        ..Default::default()
    };

    let max_fps = config.max_fps;
    eframe::run_native(
        "Trail Life",
        options,
        Box::new(move |_cc| Box::new(ui::TrailLifeApp::new(life, max_fps))),
    )
    .map_err(|e| anyhow::anyhow!("display initialization failed: {e}"))
}
