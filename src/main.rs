use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use handheld_snake::game::GameConfig;
use handheld_snake::modes::{DemoMode, PlayMode};
use handheld_snake::runner::DEFAULT_SEED;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::filter::EnvFilter;

#[derive(Parser)]
#[command(name = "handheld-snake")]
#[command(version, about = "Portable Snake for handheld-sized screens")]
struct Cli {
    /// Game mode
    #[arg(long, default_value = "play")]
    mode: Mode,

    /// JSON configuration file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width in tiles
    #[arg(long)]
    width: Option<i32>,

    /// Grid height in tiles
    #[arg(long)]
    height: Option<i32>,

    /// Milliseconds between snake moves
    #[arg(long)]
    tick_ms: Option<u32>,

    /// Frames per second
    #[arg(long)]
    frame_rate: Option<u32>,

    /// Seed for the platform random source
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u32,

    /// Frames to simulate in demo mode
    #[arg(long, default_value = "10000")]
    frames: u64,

    /// Write logs here (play mode owns the terminal, so logs are dropped otherwise)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play snake with keyboard controls
    Play,
    /// Let the autopilot play headlessly and print a summary
    Demo,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_ms = tick_ms;
        }
        if let Some(frame_rate) = self.frame_rate {
            config.frame_rate = frame_rate;
        }

        config.validate()?;
        Ok(config)
    }
}

fn init_logging(cli: &Cli) -> Result<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env());

    match (&cli.log_file, &cli.mode) {
        (Some(path), _) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            builder.with_writer(Mutex::new(file)).with_ansi(false).init();
        }
        (None, Mode::Demo) => builder.with_writer(std::io::stderr).init(),
        // Anything written to the terminal would tear the game screen
        (None, Mode::Play) => {}
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = cli.game_config()?;

    // Dispatch to appropriate mode
    match cli.mode {
        Mode::Play => {
            let mut play_mode = PlayMode::new(config, cli.seed);
            play_mode.run()?;
            println!("{}", play_mode.metrics().summary());
        }
        Mode::Demo => {
            let mut demo_mode = DemoMode::new(config, cli.seed, cli.frames);
            demo_mode.run()?;
            println!("{}", demo_mode.metrics().summary());
        }
    }

    Ok(())
}
