use std::fmt;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_LENGTH: Profile = Profile::new(150, 200, 250);
pub const DEFAULT_OVERLAP: Profile = Profile::new(0, 10, 30);
pub const DEFAULT_LENGTH_INCREMENT: usize = 10;
pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(10);

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("The minimum {profile} must be greater than zero")]
    ZeroMinimum { profile: &'static str },

    #[error("The minimum {profile} ({min}) exceeds the maximum ({max})")]
    InvertedBand {
        profile: &'static str,
        min: usize,
        max: usize,
    },

    #[error("The ideal {profile} ({ideal}) must lie between {min} and {max}")]
    IdealOutOfBand {
        profile: &'static str,
        min: usize,
        ideal: usize,
        max: usize,
    },

    #[error(
        "The maximum overlap ({overlap_max}) must be smaller than the minimum fragment length ({length_min})"
    )]
    OverlapTooLarge {
        overlap_max: usize,
        length_min: usize,
    },

    #[error("The fragment length increment must be greater than zero")]
    ZeroIncrement,
}

/// An allowed `{min, ideal, max}` band, used for both fragment lengths and overlaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Profile {
    pub min: usize,
    pub ideal: usize,
    pub max: usize,
}

impl Profile {
    pub const fn new(min: usize, ideal: usize, max: usize) -> Self {
        Self { min, ideal, max }
    }

    fn validate(&self, profile: &'static str) -> Result<(), ConfigError> {
        if self.min > self.max {
            return Err(ConfigError::InvertedBand {
                profile,
                min: self.min,
                max: self.max,
            });
        }
        if self.ideal < self.min || self.ideal > self.max {
            return Err(ConfigError::IdealOutOfBand {
                profile,
                min: self.min,
                ideal: self.ideal,
                max: self.max,
            });
        }
        Ok(())
    }

    /// Values of the band ordered closest-to-ideal first: `ideal..=max`, then
    /// `ideal-1` down to `min`.
    pub fn closest_first(&self) -> impl Iterator<Item = usize> + use<> {
        (self.ideal..=self.max).chain((self.min..self.ideal).rev())
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.min, self.ideal, self.max)
    }
}

/// Checks a length and overlap band pair before any search starts.
pub fn validate_profiles(length: &Profile, overlap: &Profile) -> Result<(), ConfigError> {
    if length.min == 0 {
        return Err(ConfigError::ZeroMinimum {
            profile: "fragment length",
        });
    }
    length.validate("fragment length")?;
    overlap.validate("overlap")?;
    if overlap.max >= length.min {
        return Err(ConfigError::OverlapTooLarge {
            overlap_max: overlap.max,
            length_min: length.min,
        });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentationConfig {
    pub length: Profile,
    pub overlap: Profile,
    /// Amount `length.max` grows by each time a subsection's search is exhausted.
    pub length_increment: usize,
    /// Wall-clock budget for a single subsection search.
    pub time_limit: Duration,
}

impl FragmentationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_profiles(&self.length, &self.overlap)?;
        if self.length_increment == 0 {
            return Err(ConfigError::ZeroIncrement);
        }
        Ok(())
    }
}

impl Default for FragmentationConfig {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            overlap: DEFAULT_OVERLAP,
            length_increment: DEFAULT_LENGTH_INCREMENT,
            time_limit: DEFAULT_TIME_LIMIT,
        }
    }
}

#[derive(Default)]
pub struct FragmentationConfigBuilder {
    length: Option<Profile>,
    overlap: Option<Profile>,
    length_increment: Option<usize>,
    time_limit: Option<Duration>,
}

impl FragmentationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn length(mut self, length: Profile) -> Self {
        self.length = Some(length);
        self
    }
    pub fn overlap(mut self, overlap: Profile) -> Self {
        self.overlap = Some(overlap);
        self
    }
    pub fn length_increment(mut self, increment: usize) -> Self {
        self.length_increment = Some(increment);
        self
    }
    pub fn time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn build(self) -> Result<FragmentationConfig, ConfigError> {
        let config = FragmentationConfig {
            length: self.length.ok_or(ConfigError::MissingParameter("length"))?,
            overlap: self
                .overlap
                .ok_or(ConfigError::MissingParameter("overlap"))?,
            length_increment: self
                .length_increment
                .ok_or(ConfigError::MissingParameter("length_increment"))?,
            time_limit: self
                .time_limit
                .ok_or(ConfigError::MissingParameter("time_limit"))?,
        };
        config.validate()?;
        Ok(config)
    }
}
