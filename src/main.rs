use anyhow::Context;
use clap::Parser;
use eyetrainer::{
    color::{Color, RgbaColor},
    config::{default_config_path, TrainerConfig},
    motion::MotionPattern,
};
use std::{
    fs::File,
    path::{Path, PathBuf},
};

/// Follow a moving dot with your eyes.
#[derive(Parser)]
#[command(author, version, about = "A terminal eye movement trainer")]
struct Cli {
    /// The path to the configuration file.
    #[clap(short, long, env = "EYETRAINER_CONFIG")]
    config: Option<PathBuf>,

    /// The path the dot follows.
    #[clap(short, long)]
    pattern: Option<MotionPattern>,

    /// Seconds per pattern cycle (1-10).
    #[clap(long)]
    period: Option<u64>,

    /// Session length in minutes (1-10).
    #[clap(short, long)]
    duration: Option<u32>,

    /// The dot's color, as #rrggbb.
    #[clap(long)]
    dot_color: Option<Color>,

    /// The dot's size in pixels (10-50).
    #[clap(long)]
    dot_size: Option<u16>,

    /// The background color, as rgba(r, g, b, a).
    #[clap(long)]
    background: Option<RgbaColor>,

    /// Write logs to this file. The level is taken from RUST_LOG.
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// Print the default configuration file path and exit.
    #[clap(long)]
    print_config_path: bool,
}

impl Cli {
    fn load_config(&self) -> anyhow::Result<TrainerConfig> {
        let mut config = match &self.config {
            Some(path) => TrainerConfig::load(path)
                .with_context(|| format!("failed to load configuration from {}", path.display()))?,
            None => TrainerConfig::load_default().context("failed to load configuration")?,
        };
        if let Some(pattern) = self.pattern {
            config.pattern = pattern;
        }
        if let Some(period) = self.period {
            config.period_secs = period;
        }
        if let Some(duration) = self.duration {
            config.duration_minutes = duration;
        }
        if let Some(color) = self.dot_color {
            config.dot.color = color;
        }
        if let Some(size) = self.dot_size {
            config.dot.size = size;
        }
        if let Some(background) = self.background {
            config.dot.background = background;
        }
        config.validate()?;
        Ok(config)
    }
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if cli.print_config_path {
        match default_config_path() {
            Some(path) => println!("{}", path.display()),
            None => println!("no configuration directory available"),
        }
        return Ok(());
    }
    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }
    let config = cli.load_config()?;
    log::info!("starting with {config:?}");
    eyetrainer::app::run(&config)
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
