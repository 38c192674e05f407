use crate::color::{Color, RgbaColor};
use crate::motion::MotionPattern;
use crate::scheduler::FRAME_RATE_RANGE;
use crate::session::{SessionOptions, DURATION_RANGE, PERIOD_RANGE};
use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    ops::RangeInclusive,
    path::{Path, PathBuf},
};

/// Allowed dot sizes, in pixels.
pub const DOT_SIZE_RANGE: RangeInclusive<u16> = 10..=50;

/// The configuration file's name inside the config directory.
const CONFIG_FILE_NAME: &str = "config.yaml";

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct TrainerConfig {
    /// The path the dot follows.
    pub pattern: MotionPattern,

    /// Seconds it takes to complete one cycle of the pattern.
    pub period_secs: u64,

    /// How long a session lasts, in minutes.
    pub duration_minutes: u32,

    /// How many times per second the dot is redrawn.
    pub frame_rate: u32,

    /// How the dot looks.
    pub dot: DotStyle,
}

impl TrainerConfig {
    /// Load the configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(ConfigLoadError::NotFound),
            Err(e) => return Err(e.into()),
        };
        let config = serde_yaml::from_str::<Self>(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the configuration from the default location, falling back to defaults if there's
    /// no file there.
    pub fn load_default() -> Result<Self, ConfigLoadError> {
        let Some(path) = default_config_path() else {
            return Ok(Self::default());
        };
        match Self::load(&path) {
            Ok(config) => {
                log::info!("loaded configuration from {}", path.display());
                Ok(config)
            }
            Err(ConfigLoadError::NotFound) => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    /// Make sure every value is within its supported range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("period_secs", self.period_secs, PERIOD_RANGE.0..=PERIOD_RANGE.1)?;
        check_range("duration_minutes", self.duration_minutes, DURATION_RANGE.0..=DURATION_RANGE.1)?;
        check_range("frame_rate", self.frame_rate, FRAME_RATE_RANGE.0..=FRAME_RATE_RANGE.1)?;
        check_range("dot.size", self.dot.size, DOT_SIZE_RANGE)?;
        Ok(())
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            pattern: self.pattern,
            period_secs: self.period_secs,
            duration_minutes: self.duration_minutes,
            frame_rate: self.frame_rate,
        }
    }
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self { pattern: MotionPattern::Circular, period_secs: 5, duration_minutes: 5, frame_rate: 60, dot: Default::default() }
    }
}

/// The dot's look. This is passed through to the presentation untouched.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DotStyle {
    /// The dot's color.
    pub color: Color,

    /// The dot's diameter, in pixels.
    pub size: u16,

    /// The color behind the dot.
    pub background: RgbaColor,
}

impl Default for DotStyle {
    fn default() -> Self {
        Self { color: Color::new(0x21, 0x96, 0xf3), size: 20, background: RgbaColor::new(255, 255, 255, 0.1) }
    }
}

/// The path of the configuration file in the user's config directory.
pub fn default_config_path() -> Option<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", "eyetrainer")?;
    Some(dirs.config_dir().join(CONFIG_FILE_NAME))
}

fn check_range<T>(field: &'static str, value: T, range: RangeInclusive<T>) -> Result<(), ConfigError>
where
    T: PartialOrd + std::fmt::Display,
{
    if range.contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value: value.to_string(),
            min: range.start().to_string(),
            max: range.end().to_string(),
        })
    }
}

/// An invalid configuration value.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange { field: &'static str, value: String, min: String, max: String },
}

/// An error when loading the configuration file.
#[derive(thiserror::Error, Debug)]
pub enum ConfigLoadError {
    #[error("io: {0}")]
    Io(#[from] io::Error),

    #[error("config file not found")]
    NotFound,

    #[error("invalid configuration: {0}")]
    Invalid(#[from] serde_yaml::Error),

    #[error(transparent)]
    OutOfRange(#[from] ConfigError),
}
