use super::error::PaeError;
use phf::{Map, phf_map};
use std::fmt;
use std::str::FromStr;

/// Residue-distance and confidence cutoffs used to decide whether two residues are linked.
///
/// Pairs no further apart than `distance_cutoff` must have a relative PAE below
/// `close_threshold`; pairs further apart must fall below `far_threshold`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaeThresholds {
    pub distance_cutoff: usize,
    pub close_threshold: f64,
    pub far_threshold: f64,
}

impl PaeThresholds {
    #[inline]
    pub fn links(&self, distance: usize, relative_pae: f64) -> bool {
        if distance <= self.distance_cutoff {
            relative_pae < self.close_threshold
        } else {
            relative_pae < self.far_threshold
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThresholdPreset {
    /// Moderate thresholds balancing sensitivity and specificity.
    Cautious,
    /// Only groups residues with very high confidence; tends to produce smaller domains.
    Definite,
}

static PRESET_NAMES: Map<&'static str, ThresholdPreset> = phf_map! {
    "cautious" => ThresholdPreset::Cautious,
    "definite" => ThresholdPreset::Definite,
};

impl ThresholdPreset {
    pub const fn thresholds(self) -> PaeThresholds {
        match self {
            ThresholdPreset::Cautious => PaeThresholds {
                distance_cutoff: 10,
                close_threshold: 4.0,
                far_threshold: 11.0,
            },
            ThresholdPreset::Definite => PaeThresholds {
                distance_cutoff: 0,
                close_threshold: 2.0,
                far_threshold: 2.0,
            },
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ThresholdPreset::Cautious => "cautious",
            ThresholdPreset::Definite => "definite",
        }
    }
}

impl FromStr for ThresholdPreset {
    type Err = PaeError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PRESET_NAMES
            .get(s.trim().to_lowercase().as_str())
            .copied()
            .ok_or_else(|| PaeError::UnknownPreset(s.to_string()))
    }
}

impl fmt::Display for ThresholdPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Custom thresholds as supplied by a caller, any of which may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PartialThresholds {
    pub distance_cutoff: Option<usize>,
    pub close_threshold: Option<f64>,
    pub far_threshold: Option<f64>,
}

impl PartialThresholds {
    pub fn complete(self) -> Result<PaeThresholds, PaeError> {
        Ok(PaeThresholds {
            distance_cutoff: self
                .distance_cutoff
                .ok_or(PaeError::MissingThreshold("distance_cutoff"))?,
            close_threshold: self
                .close_threshold
                .ok_or(PaeError::MissingThreshold("close_threshold"))?,
            far_threshold: self
                .far_threshold
                .ok_or(PaeError::MissingThreshold("far_threshold"))?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThresholdProfile {
    Preset(ThresholdPreset),
    Custom(PaeThresholds),
}

impl Default for ThresholdProfile {
    fn default() -> Self {
        ThresholdProfile::Preset(ThresholdPreset::Definite)
    }
}

impl ThresholdProfile {
    /// Resolves a method name (`cautious`, `definite` or `custom`) into a profile.
    ///
    /// `custom` requires every value in `custom`; the presets ignore it.
    pub fn from_method(method: &str, custom: Option<PartialThresholds>) -> Result<Self, PaeError> {
        if method.trim().eq_ignore_ascii_case("custom") {
            let partial = custom.unwrap_or_default();
            return Ok(ThresholdProfile::Custom(partial.complete()?));
        }
        Ok(ThresholdProfile::Preset(method.parse()?))
    }

    pub fn thresholds(&self) -> PaeThresholds {
        match self {
            ThresholdProfile::Preset(preset) => preset.thresholds(),
            ThresholdProfile::Custom(thresholds) => *thresholds,
        }
    }
}

impl fmt::Display for ThresholdProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThresholdProfile::Preset(preset) => write!(f, "{}", preset),
            ThresholdProfile::Custom(t) => write!(
                f,
                "custom (distance cutoff {}, close {}, far {})",
                t.distance_cutoff, t.close_threshold, t.far_threshold
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_names_parse_case_insensitively() {
        assert_eq!(
            "Cautious".parse::<ThresholdPreset>().unwrap(),
            ThresholdPreset::Cautious
        );
        assert_eq!(
            " definite ".parse::<ThresholdPreset>().unwrap(),
            ThresholdPreset::Definite
        );
    }

    #[test]
    fn unknown_preset_name_is_rejected() {
        let result = ThresholdProfile::from_method("strict", None);
        assert_eq!(result, Err(PaeError::UnknownPreset("strict".to_string())));
    }

    #[test]
    fn presets_map_to_expected_values() {
        let cautious = ThresholdPreset::Cautious.thresholds();
        assert_eq!(cautious.distance_cutoff, 10);
        assert_eq!(cautious.close_threshold, 4.0);
        assert_eq!(cautious.far_threshold, 11.0);

        let definite = ThresholdPreset::Definite.thresholds();
        assert_eq!(definite.distance_cutoff, 0);
        assert_eq!(definite.close_threshold, 2.0);
        assert_eq!(definite.far_threshold, 2.0);
    }

    #[test]
    fn custom_method_requires_all_values() {
        let partial = PartialThresholds {
            distance_cutoff: Some(8),
            close_threshold: Some(3.0),
            far_threshold: None,
        };
        assert_eq!(
            ThresholdProfile::from_method("custom", Some(partial)),
            Err(PaeError::MissingThreshold("far_threshold"))
        );
        assert_eq!(
            ThresholdProfile::from_method("custom", None),
            Err(PaeError::MissingThreshold("distance_cutoff"))
        );
    }

    #[test]
    fn custom_method_uses_supplied_values() {
        let partial = PartialThresholds {
            distance_cutoff: Some(8),
            close_threshold: Some(3.0),
            far_threshold: Some(9.0),
        };
        let profile = ThresholdProfile::from_method("custom", Some(partial)).unwrap();
        assert_eq!(
            profile.thresholds(),
            PaeThresholds {
                distance_cutoff: 8,
                close_threshold: 3.0,
                far_threshold: 9.0
            }
        );
    }

    #[test]
    fn links_switches_threshold_at_distance_cutoff() {
        let t = ThresholdPreset::Cautious.thresholds();
        assert!(t.links(10, 3.9));
        assert!(!t.links(10, 4.0));
        assert!(t.links(11, 10.9));
        assert!(!t.links(11, 11.0));
    }

    #[test]
    fn default_profile_is_definite() {
        assert_eq!(
            ThresholdProfile::default(),
            ThresholdProfile::Preset(ThresholdPreset::Definite)
        );
    }
}
