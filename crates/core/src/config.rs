//! Shape and pacing parameters for a dot-matrix mount.
//!
//! Defaults reproduce the tuned look: a wide 0.3-0.65 noise multiplier on
//! the background for visible waves, a near-constant 0.99-1.0 multiplier on
//! the subject so it stays legible.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::color::Srgb;
use crate::error::EngineError;
use crate::params::{param_f64, param_opt_u64, param_section, param_string};
use crate::reveal::{RevealScheduler, DEFAULT_REVEAL_BAND};

const DEFAULT_DOT_SPACING: f64 = 8.0;
const DEFAULT_REVEAL_DURATION_MS: f64 = 2000.0;
const DEFAULT_SUBJECT_SIZE_FRACTION: f64 = 0.5;

/// How noise modulates dot size within one region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseStyle {
    /// Spatial frequency: noise is sampled at `cell * scale`.
    pub scale: f64,
    /// Noise time added per frame.
    pub speed: f64,
    /// Smallest multiplier, reached at noise -1.
    pub min: f64,
    /// Multiplier span; noise +1 yields `min + range`.
    pub range: f64,
}

impl Default for NoiseStyle {
    fn default() -> Self {
        Self {
            scale: 0.05,
            speed: 0.008,
            min: 0.3,
            range: 0.35,
        }
    }
}

impl NoiseStyle {
    /// Maps raw noise in [-1, 1] onto `[min, min + range]`.
    pub fn multiplier(&self, raw: f64) -> f64 {
        self.min + (raw + 1.0) / 2.0 * self.range
    }

    fn from_json(params: &Value, defaults: Self) -> Self {
        Self {
            scale: param_f64(params, "scale", defaults.scale),
            speed: param_f64(params, "speed", defaults.speed),
            min: param_f64(params, "min", defaults.min),
            range: param_f64(params, "range", defaults.range),
        }
    }

    fn validate(&self, region: &str) -> Result<(), EngineError> {
        if !(self.scale.is_finite() && self.min.is_finite()) {
            return Err(invalid(format!("{region}.noise scale and min must be finite")));
        }
        if !(self.speed >= 0.0 && self.speed.is_finite()) {
            return Err(invalid(format!("{region}.noise.speed must be >= 0")));
        }
        if !(self.range >= 0.0 && self.range.is_finite()) {
            return Err(invalid(format!("{region}.noise.range must be >= 0")));
        }
        Ok(())
    }
}

/// Dot sizing for the background region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionStyle {
    /// Dot diameter in pixels at full brightness and multiplier 1.
    pub max_dot_size: f64,
    pub noise: NoiseStyle,
}

impl Default for RegionStyle {
    fn default() -> Self {
        Self {
            max_dot_size: 8.0,
            noise: NoiseStyle::default(),
        }
    }
}

impl RegionStyle {
    fn from_json(params: &Value, defaults: Self) -> Self {
        Self {
            max_dot_size: param_f64(params, "max_dot_size", defaults.max_dot_size),
            noise: NoiseStyle::from_json(param_section(params, "noise"), defaults.noise),
        }
    }

    fn validate(&self, region: &str) -> Result<(), EngineError> {
        if !(self.max_dot_size > 0.0 && self.max_dot_size.is_finite()) {
            return Err(invalid(format!("{region}.max_dot_size must be positive")));
        }
        self.noise.validate(region)
    }
}

/// Placement and dot sizing for the subject image in dual-image mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubjectStyle {
    /// Subject width as a fraction of grid width, in (0, 1].
    pub size_fraction: f64,
    pub max_dot_size: f64,
    pub noise: NoiseStyle,
}

impl Default for SubjectStyle {
    fn default() -> Self {
        Self {
            size_fraction: DEFAULT_SUBJECT_SIZE_FRACTION,
            max_dot_size: 6.0,
            noise: NoiseStyle {
                scale: 0.08,
                speed: 0.003,
                min: 0.99,
                range: 0.01,
            },
        }
    }
}

impl SubjectStyle {
    /// Sizing part of the style, shaped like the background's.
    pub fn region(&self) -> RegionStyle {
        RegionStyle {
            max_dot_size: self.max_dot_size,
            noise: self.noise,
        }
    }

    fn from_json(params: &Value, defaults: Self) -> Self {
        let region = RegionStyle::from_json(params, defaults.region());
        Self {
            size_fraction: param_f64(params, "size_fraction", defaults.size_fraction),
            max_dot_size: region.max_dot_size,
            noise: region.noise,
        }
    }

    fn validate(&self) -> Result<(), EngineError> {
        if !(self.size_fraction > 0.0 && self.size_fraction <= 1.0) {
            return Err(invalid("subject.size_fraction must be in (0, 1]"));
        }
        self.region().validate("subject")
    }
}

/// Full configuration of one dot-matrix mount. Fixed for the mount's lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DotMatrixConfig {
    /// Cell size in pixels.
    pub dot_spacing: f64,
    pub reveal_duration_ms: f64,
    /// Width of the ease-in band behind the reveal front.
    pub reveal_band: f64,
    /// Noise permutation seed; hosts pick one when absent.
    pub seed: Option<u64>,
    pub background_color: Srgb,
    pub dot_color: Srgb,
    pub background: RegionStyle,
    /// Only consulted when a subject image is loaded.
    pub subject: SubjectStyle,
}

impl Default for DotMatrixConfig {
    fn default() -> Self {
        Self {
            dot_spacing: DEFAULT_DOT_SPACING,
            reveal_duration_ms: DEFAULT_REVEAL_DURATION_MS,
            reveal_band: DEFAULT_REVEAL_BAND,
            seed: None,
            background_color: Srgb::BLACK,
            dot_color: Srgb::WHITE,
            background: RegionStyle::default(),
            subject: SubjectStyle::default(),
        }
    }
}

impl DotMatrixConfig {
    /// Layers a partial JSON object over the defaults, then validates.
    ///
    /// Missing or wrong-typed numeric keys keep their default; a color string
    /// that does not parse is an error.
    pub fn from_json(params: &Value) -> Result<Self, EngineError> {
        let d = Self::default();
        let config = Self {
            dot_spacing: param_f64(params, "dot_spacing", d.dot_spacing),
            reveal_duration_ms: param_f64(params, "reveal_duration_ms", d.reveal_duration_ms),
            reveal_band: param_f64(params, "reveal_band", d.reveal_band),
            seed: param_opt_u64(params, "seed", d.seed),
            background_color: color_param(params, "background_color", d.background_color)?,
            dot_color: color_param(params, "dot_color", d.dot_color)?,
            background: RegionStyle::from_json(param_section(params, "background"), d.background),
            subject: SubjectStyle::from_json(param_section(params, "subject"), d.subject),
        };
        config.validate()?;
        Ok(config)
    }

    /// Rejects values that would make the grid or the animation meaningless.
    pub fn validate(&self) -> Result<(), EngineError> {
        if !(self.dot_spacing > 0.0 && self.dot_spacing.is_finite()) {
            return Err(invalid("dot_spacing must be positive"));
        }
        if !(self.reveal_duration_ms >= 0.0 && self.reveal_duration_ms.is_finite()) {
            return Err(invalid("reveal_duration_ms must be >= 0"));
        }
        if !(self.reveal_band >= 0.0 && self.reveal_band.is_finite()) {
            return Err(invalid("reveal_band must be >= 0"));
        }
        self.background.validate("background")?;
        self.subject.validate()
    }

    /// Reveal and noise pacing derived from this config.
    pub fn scheduler(&self) -> RevealScheduler {
        RevealScheduler::new(
            self.reveal_duration_ms,
            self.reveal_band,
            [self.background.noise.speed, self.subject.noise.speed],
        )
    }
}

fn color_param(params: &Value, name: &str, default: Srgb) -> Result<Srgb, EngineError> {
    let hex = param_string(params, name, &default.to_hex());
    Srgb::from_hex(&hex)
}

fn invalid(msg: impl Into<String>) -> EngineError {
    EngineError::InvalidConfig(msg.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_are_valid() {
        assert!(DotMatrixConfig::default().validate().is_ok());
    }

    #[test]
    fn default_multiplier_ranges_match_tuned_constants() {
        let c = DotMatrixConfig::default();
        assert!((c.background.noise.multiplier(-1.0) - 0.3).abs() < 1e-12);
        assert!((c.background.noise.multiplier(1.0) - 0.65).abs() < 1e-12);
        assert!((c.subject.noise.multiplier(-1.0) - 0.99).abs() < 1e-12);
        assert!((c.subject.noise.multiplier(1.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn empty_json_yields_defaults() {
        let c = DotMatrixConfig::from_json(&json!({})).unwrap();
        assert_eq!(c, DotMatrixConfig::default());
    }

    #[test]
    fn from_json_overrides_nested_values() {
        let c = DotMatrixConfig::from_json(&json!({
            "dot_spacing": 12,
            "seed": 99,
            "dot_color": "#00ffff",
            "background": {"max_dot_size": 10.0, "noise": {"range": 0.0}},
            "subject": {"size_fraction": 0.3, "noise": {"min": 1.0}}
        }))
        .unwrap();
        assert_eq!(c.dot_spacing, 12.0);
        assert_eq!(c.seed, Some(99));
        assert_eq!(c.dot_color.to_hex(), "#00ffff");
        assert_eq!(c.background.max_dot_size, 10.0);
        assert_eq!(c.background.noise.range, 0.0);
        assert_eq!(c.background.noise.min, 0.3);
        assert_eq!(c.subject.size_fraction, 0.3);
        assert_eq!(c.subject.noise.min, 1.0);
        assert_eq!(c.subject.max_dot_size, 6.0);
    }

    #[test]
    fn wrong_typed_values_fall_back_to_defaults() {
        let c = DotMatrixConfig::from_json(&json!({
            "dot_spacing": "wide",
            "background": 5
        }))
        .unwrap();
        assert_eq!(c.dot_spacing, DEFAULT_DOT_SPACING);
        assert_eq!(c.background, RegionStyle::default());
    }

    #[test]
    fn bad_color_is_rejected() {
        let err = DotMatrixConfig::from_json(&json!({"background_color": "navy"})).unwrap_err();
        assert!(matches!(err, EngineError::InvalidColor(_)));
    }

    #[test]
    fn non_positive_spacing_is_rejected() {
        for spacing in [0.0, -4.0] {
            let err = DotMatrixConfig::from_json(&json!({"dot_spacing": spacing})).unwrap_err();
            assert!(matches!(err, EngineError::InvalidConfig(_)));
        }
    }

    #[test]
    fn subject_fraction_must_be_in_unit_interval() {
        for fraction in [0.0, 1.5] {
            let result = DotMatrixConfig::from_json(&json!({
                "subject": {"size_fraction": fraction}
            }));
            assert!(result.is_err(), "fraction {fraction} accepted");
        }
        assert!(DotMatrixConfig::from_json(&json!({"subject": {"size_fraction": 1.0}})).is_ok());
    }

    #[test]
    fn negative_noise_range_is_rejected() {
        let result = DotMatrixConfig::from_json(&json!({
            "background": {"noise": {"range": -0.1}}
        }));
        assert!(result.is_err());
    }

    #[test]
    fn serde_round_trip_preserves_config() {
        let mut c = DotMatrixConfig::default();
        c.seed = Some(5);
        c.background_color = Srgb::from_hex("#101010").unwrap();
        let json = serde_json::to_string_pretty(&c).unwrap();
        let back: DotMatrixConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.seed, Some(5));
        assert_eq!(back.background_color.to_hex(), "#101010");
        assert_eq!(back.subject, c.subject);
    }

    #[test]
    fn scheduler_uses_region_speeds() {
        let c = DotMatrixConfig::default();
        let s = c.scheduler();
        assert_eq!(s.duration_ms(), DEFAULT_REVEAL_DURATION_MS);
    }
}
