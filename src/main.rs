use std::{io::Write, path::PathBuf, process::ExitCode, time::Duration};

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use log::{error, info};

use pixlife::{
    config::{RunConfig, WindowConfig, DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH},
    gfx::viewport::{ZoomConfig, ZoomMode},
    simulation::{BoundaryPolicy, NeighborRange, Rules, Threshold, ThresholdChannel},
    source::load_grid,
    LifeApp, Session,
};

/// Game of Life seeded from an image: bright pixels start alive
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Seed image (any format the image crate decodes)
    image: PathBuf,

    /// Neighbour counts that keep a live cell alive, MIN or MIN-MAX
    #[arg(long, default_value = "2-3")]
    survive: NeighborRange,

    /// Neighbour counts that bring a dead cell to life, MIN or MIN-MAX
    #[arg(long, default_value = "3")]
    birth: NeighborRange,

    /// How neighbours past the grid edge are treated
    #[arg(long, value_enum, default_value_t = Boundary::Clamped)]
    boundary: Boundary,

    /// Pixel value compared against --threshold
    #[arg(long, value_enum, default_value_t = Channel::LeadingByte)]
    channel: Channel,

    /// A pixel is alive when its channel value is above this
    #[arg(long, default_value_t = Threshold::HIGH_BIT.level)]
    threshold: u8,

    /// ms between generations
    #[arg(long, default_value_t = 20)]
    delay_ms: u64,

    /// What one scroll notch does
    #[arg(long, value_enum, default_value_t = Zoom::Factor)]
    zoom: Zoom,

    /// Scale multiplier per notch with --zoom factor
    #[arg(long, default_value_t = ZoomConfig::DEFAULT_FACTOR)]
    zoom_factor: f32,

    /// Largest zoom, in multiples of the image size
    #[arg(long, default_value_t = ZoomConfig::DEFAULT_MAX_SCALE)]
    max_zoom: f32,

    /// Start running instead of paused
    #[arg(long)]
    run: bool,

    /// Window width in pixels
    #[arg(long, default_value_t = DEFAULT_WINDOW_WIDTH)]
    width: u32,

    /// Window height in pixels
    #[arg(long, default_value_t = DEFAULT_WINDOW_HEIGHT)]
    height: u32,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Boundary {
    Clamped,
    Toroidal,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Channel {
    LeadingByte,
    Luminance,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Zoom {
    Factor,
    Step,
}

impl Args {
    fn run_config(&self) -> anyhow::Result<RunConfig> {
        if self.zoom_factor <= 1.0 || !self.zoom_factor.is_finite() {
            bail!("--zoom-factor must be greater than 1, got {}", self.zoom_factor);
        }
        if self.max_zoom < 1.0 || !self.max_zoom.is_finite() {
            bail!("--max-zoom must be at least 1, got {}", self.max_zoom);
        }
        if self.width == 0 || self.height == 0 {
            bail!("window size must be non-zero, got {}x{}", self.width, self.height);
        }

        Ok(RunConfig {
            rules: Rules::new(self.survive, self.birth),
            policy: match self.boundary {
                Boundary::Clamped => BoundaryPolicy::Clamped,
                Boundary::Toroidal => BoundaryPolicy::Toroidal,
            },
            threshold: Threshold::new(
                match self.channel {
                    Channel::LeadingByte => ThresholdChannel::LeadingByte,
                    Channel::Luminance => ThresholdChannel::Luminance,
                },
                self.threshold,
            ),
            frame_delay: Duration::from_millis(self.delay_ms),
            zoom: ZoomConfig {
                mode: match self.zoom {
                    Zoom::Factor => ZoomMode::Factor(self.zoom_factor),
                    Zoom::Step => ZoomMode::Step,
                },
                max_scale: self.max_zoom,
            },
            window: WindowConfig {
                width: self.width,
                height: self.height,
                ..WindowConfig::default()
            },
            start_running: self.run,
            ..RunConfig::default()
        })
    }
}

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{}({}):\t[{}] {}",
                record.file().unwrap_or("?"),
                record.line().unwrap_or(0),
                record.level(),
                record.args()
            )
        })
        .init();
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = args.run_config()?;
    info!("Rules {}, {:?} boundary", config.rules, config.policy);

    let grid = load_grid(&args.image, config.threshold)?;
    let session = Session::from_config(grid, &config);

    let app = LifeApp::new(config, session)?;
    app.run().context("Viewer failed")
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_run_config() {
        let args = Args::parse_from(["pixlife", "seed.png"]);
        assert_eq!(args.run_config().unwrap(), RunConfig::default());
    }

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "pixlife",
            "seed.png",
            "--survive",
            "1-5",
            "--birth",
            "3-4",
            "--boundary",
            "toroidal",
            "--channel",
            "luminance",
            "--threshold",
            "64",
            "--zoom",
            "step",
            "--run",
        ]);
        let config = args.run_config().unwrap();
        assert_eq!(config.rules.to_string(), "B3-4/S1-5");
        assert_eq!(config.policy, BoundaryPolicy::Toroidal);
        assert_eq!(config.threshold, Threshold::new(ThresholdChannel::Luminance, 64));
        assert_eq!(config.zoom.mode, ZoomMode::Step);
        assert!(config.start_running);
    }

    #[test]
    fn test_invalid_rule_range_is_a_usage_error() {
        assert!(Args::try_parse_from(["pixlife", "seed.png", "--survive", "5-2"]).is_err());
        assert!(Args::try_parse_from(["pixlife", "seed.png", "--birth", "9"]).is_err());
    }

    #[test]
    fn test_zoom_factor_must_grow() {
        let args = Args::parse_from(["pixlife", "seed.png", "--zoom-factor", "0.5"]);
        assert!(args.run_config().is_err());
    }
}
