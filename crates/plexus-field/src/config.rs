//! Field configuration (parsed from TOML)

use crate::lines::DEFAULT_MAX_DISTANCE;
use crate::math::OpacityCurve;
use crate::motion::{ArrivalReset, MotionPolicy};
use plexus_core::{Color, PlexusError, Result};
use std::path::Path;

pub const DEFAULT_DOTS_NUMBER: usize = 100;
pub const DEFAULT_DOTS_COLOR: u32 = 0x8b9bb4;
pub const DEFAULT_DOT_SIZE: u32 = 32;
pub const DEFAULT_TRANSITION_SPEED: f32 = 0.02;
const MAX_DOTS_NUMBER: usize = 10_000;
/// Largest sprite edge accepted (4096² RGBA is 64 MiB)
const MAX_DOT_SIZE: u32 = 4096;

/// Which motion policy drives the points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionKind {
    Chase,
    Drift,
}

/// How a chasing point picks its next target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetKind {
    Factor,
    Random,
}

/// Configuration for one point field panel
#[derive(Debug, Clone, PartialEq)]
pub struct FieldConfig {
    pub dots_number: usize,
    pub dots_color: Color,
    /// Sprite edge length in pixels
    pub dot_size: u32,
    /// Rendered point size in world units (attenuated by depth)
    pub point_size: f32,
    /// Initial positions and new targets are drawn in `[-spread, spread)`
    pub spread: f32,
    /// Screen-space link distance in pixels
    pub max_distance: f32,
    pub opacity: OpacityCurve,
    pub motion: MotionKind,
    pub transition_speed: f32,
    pub arrival_reset: ResetKind,
    pub boundary: f32,
    pub line_interval: u32,
    pub seed: Option<u64>,
    pub premultiply_alpha: bool,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            dots_number: DEFAULT_DOTS_NUMBER,
            dots_color: Color::from_hex(DEFAULT_DOTS_COLOR),
            dot_size: DEFAULT_DOT_SIZE,
            point_size: 0.2,
            spread: 5.0,
            max_distance: DEFAULT_MAX_DISTANCE,
            opacity: OpacityCurve::Linear,
            motion: MotionKind::Chase,
            transition_speed: DEFAULT_TRANSITION_SPEED,
            arrival_reset: ResetKind::Factor,
            boundary: 5.0,
            line_interval: 1,
            seed: None,
            premultiply_alpha: true,
        }
    }
}

impl FieldConfig {
    /// Parse a FieldConfig from a TOML table. Missing keys keep their defaults.
    pub fn from_toml(table: &toml::value::Table) -> Result<Self> {
        let mut config = Self::default();

        if let Some(v) = table.get("dots_number") {
            let n = toml_int(v, "dots_number")?;
            if n < 0 {
                return Err(out_of_range("dots_number", 1.0, MAX_DOTS_NUMBER as f64, n as f64));
            }
            config.dots_number = n as usize;
        }
        if let Some(v) = table.get("dots_color") {
            let s = v
                .as_str()
                .ok_or_else(|| PlexusError::InvalidConfig("dots_color must be a string".into()))?;
            config.dots_color = Color::parse(s)?;
        }
        if let Some(v) = table.get("dot_size") {
            let n = toml_int(v, "dot_size")?;
            if !(0..=MAX_DOT_SIZE as i64).contains(&n) {
                return Err(out_of_range("dot_size", 0.0, MAX_DOT_SIZE as f64, n as f64));
            }
            config.dot_size = n as u32;
        }
        if let Some(v) = table.get("point_size") {
            config.point_size = toml_f32(v, config.point_size);
        }
        if let Some(v) = table.get("spread") {
            config.spread = toml_f32(v, config.spread);
        }
        if let Some(v) = table.get("max_distance") {
            config.max_distance = toml_f32(v, config.max_distance);
        }
        if let Some(v) = table.get("opacity") {
            let s = v.as_str().unwrap_or_default();
            config.opacity = OpacityCurve::parse(s).ok_or_else(|| {
                PlexusError::InvalidConfig(format!(
                    "opacity '{s}' is not one of linear, threshold"
                ))
            })?;
        }
        if let Some(v) = table.get("motion") {
            config.motion = match v.as_str().unwrap_or_default() {
                "chase" => MotionKind::Chase,
                "drift" => MotionKind::Drift,
                other => {
                    return Err(PlexusError::InvalidConfig(format!(
                        "motion '{other}' is not one of chase, drift"
                    )))
                }
            };
        }
        if let Some(v) = table.get("transition_speed") {
            config.transition_speed = toml_f32(v, config.transition_speed);
        }
        if let Some(v) = table.get("arrival_reset") {
            config.arrival_reset = match v.as_str().unwrap_or_default() {
                "factor" => ResetKind::Factor,
                "random" => ResetKind::Random,
                other => {
                    return Err(PlexusError::InvalidConfig(format!(
                        "arrival_reset '{other}' is not one of factor, random"
                    )))
                }
            };
        }
        if let Some(v) = table.get("boundary") {
            config.boundary = toml_f32(v, config.boundary);
        }
        if let Some(v) = table.get("line_interval") {
            let n = toml_int(v, "line_interval")?;
            config.line_interval = n.clamp(0, u32::MAX as i64) as u32;
        }
        if let Some(v) = table.get("seed") {
            config.seed = Some(toml_int(v, "seed")? as u64);
        }
        if let Some(v) = table.get("premultiply_alpha") {
            config.premultiply_alpha = v.as_bool().ok_or_else(|| {
                PlexusError::InvalidConfig("premultiply_alpha must be true or false".into())
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse from TOML source text
    pub fn parse(source: &str) -> Result<Self> {
        let table: toml::value::Table = toml::from_str(source)?;
        Self::from_toml(&table)
    }

    /// Load from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::parse(&source)
    }

    pub fn validate(&self) -> Result<()> {
        if self.dots_number == 0 || self.dots_number > MAX_DOTS_NUMBER {
            return Err(out_of_range(
                "dots_number",
                1.0,
                MAX_DOTS_NUMBER as f64,
                self.dots_number as f64,
            ));
        }
        if self.dot_size > MAX_DOT_SIZE {
            return Err(out_of_range(
                "dot_size",
                0.0,
                MAX_DOT_SIZE as f64,
                self.dot_size as f64,
            ));
        }
        if !(self.transition_speed > 0.0 && self.transition_speed <= 1.0) {
            return Err(out_of_range("transition_speed", 0.0, 1.0, self.transition_speed as f64));
        }
        if self.line_interval == 0 {
            return Err(PlexusError::InvalidConfig(
                "line_interval must be at least 1".into(),
            ));
        }
        for (field, value) in [
            ("spread", self.spread),
            ("boundary", self.boundary),
            ("max_distance", self.max_distance),
            ("point_size", self.point_size),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(PlexusError::InvalidConfig(format!(
                    "{field} must be a positive number, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Motion policy described by this config
    pub fn motion_policy(&self) -> MotionPolicy {
        match self.motion {
            MotionKind::Chase => {
                let reset = match self.arrival_reset {
                    ResetKind::Factor => ArrivalReset::Factor,
                    ResetKind::Random => ArrivalReset::Random {
                        spread: self.spread,
                    },
                };
                MotionPolicy::chase(self.transition_speed, reset)
            }
            MotionKind::Drift => MotionPolicy::drift(self.boundary, self.placement_spread()),
        }
    }

    /// Range for initial positions and targets. Drifting points are kept
    /// inside the walls so every target stays reachable.
    pub fn placement_spread(&self) -> f32 {
        match self.motion {
            MotionKind::Chase => self.spread,
            MotionKind::Drift => self.spread.min(self.boundary),
        }
    }

    /// Serialize to a TOML document (every key written explicitly)
    pub fn to_toml_string(&self) -> Result<String> {
        use toml::Value;

        let mut table = toml::value::Table::new();
        table.insert("dots_number".into(), Value::Integer(self.dots_number as i64));
        table.insert("dots_color".into(), Value::String(self.dots_color.to_hex_string()));
        table.insert("dot_size".into(), Value::Integer(self.dot_size as i64));
        table.insert("point_size".into(), Value::Float(self.point_size as f64));
        table.insert("spread".into(), Value::Float(self.spread as f64));
        table.insert("max_distance".into(), Value::Float(self.max_distance as f64));
        table.insert("opacity".into(), Value::String(self.opacity.as_str().into()));
        let motion = match self.motion {
            MotionKind::Chase => "chase",
            MotionKind::Drift => "drift",
        };
        table.insert("motion".into(), Value::String(motion.into()));
        table.insert(
            "transition_speed".into(),
            Value::Float(self.transition_speed as f64),
        );
        let reset = match self.arrival_reset {
            ResetKind::Factor => "factor",
            ResetKind::Random => "random",
        };
        table.insert("arrival_reset".into(), Value::String(reset.into()));
        table.insert("boundary".into(), Value::Float(self.boundary as f64));
        table.insert("line_interval".into(), Value::Integer(self.line_interval as i64));
        if let Some(seed) = self.seed {
            table.insert("seed".into(), Value::Integer(seed as i64));
        }
        table.insert(
            "premultiply_alpha".into(),
            Value::Boolean(self.premultiply_alpha),
        );

        Ok(toml::to_string(&table)?)
    }
}

fn out_of_range(field: &str, min: f64, max: f64, value: f64) -> PlexusError {
    PlexusError::ValueOutOfRange {
        field: field.to_string(),
        min,
        max,
        value,
    }
}

// ── TOML helpers (handle integer/float coercion) ──

fn toml_f32(v: &toml::Value, default: f32) -> f32 {
    v.as_float()
        .map(|f| f as f32)
        .or_else(|| v.as_integer().map(|i| i as f32))
        .unwrap_or(default)
}

fn toml_int(v: &toml::Value, field: &str) -> Result<i64> {
    v.as_integer()
        .ok_or_else(|| PlexusError::InvalidConfig(format!("{field} must be an integer")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = FieldConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.dots_number, 100);
        assert_eq!(config.motion, MotionKind::Chase);
    }

    #[test]
    fn parse_from_toml() {
        let toml_str = r##"
dots_number = 200
dots_color = "#ff8844"
motion = "drift"
opacity = "threshold"
boundary = 4
line_interval = 3
seed = 42
"##;
        let config = FieldConfig::parse(toml_str).unwrap();
        assert_eq!(config.dots_number, 200);
        assert_eq!(config.dots_color.to_rgba8(), [0xff, 0x88, 0x44, 0xff]);
        assert_eq!(config.motion, MotionKind::Drift);
        assert_eq!(config.opacity, OpacityCurve::Threshold);
        assert!((config.boundary - 4.0).abs() < 0.01);
        assert_eq!(config.line_interval, 3);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(FieldConfig::parse("dots_number = 0").is_err());
        assert!(FieldConfig::parse("dots_number = -3").is_err());
        assert!(FieldConfig::parse("transition_speed = 1.5").is_err());
        assert!(FieldConfig::parse("transition_speed = 0").is_err());
        assert!(FieldConfig::parse("line_interval = 0").is_err());
        assert!(FieldConfig::parse("boundary = -1.0").is_err());
        assert!(FieldConfig::parse("motion = \"orbit\"").is_err());
        assert!(FieldConfig::parse("opacity = \"cubic\"").is_err());
        assert!(FieldConfig::parse("dots_color = \"#zzz\"").is_err());
        assert!(FieldConfig::parse("dots_number = \"many\"").is_err());
        assert!(FieldConfig::parse("premultiply_alpha = \"yes\"").is_err());
        assert!(FieldConfig::parse("premultiply_alpha = 1").is_err());
    }

    #[test]
    fn dot_size_is_bounded() {
        assert_eq!(FieldConfig::parse("dot_size = 4096").unwrap().dot_size, 4096);
        assert!(FieldConfig::parse("dot_size = 4097").is_err());
        assert!(FieldConfig::parse("dot_size = 200000").is_err());
        // would wrap to 8 if truncated to u32
        assert!(FieldConfig::parse("dot_size = 4294967304").is_err());

        let config = FieldConfig {
            dot_size: 5000,
            ..FieldConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn drift_placement_stays_inside_boundary() {
        let config = FieldConfig {
            motion: MotionKind::Drift,
            spread: 8.0,
            boundary: 2.0,
            ..FieldConfig::default()
        };
        assert_eq!(config.placement_spread(), 2.0);
        let chase = FieldConfig {
            spread: 8.0,
            boundary: 2.0,
            ..FieldConfig::default()
        };
        assert_eq!(chase.placement_spread(), 8.0);
    }

    #[test]
    fn out_of_range_reports_field() {
        let err = FieldConfig::parse("transition_speed = 2").unwrap_err();
        match err {
            PlexusError::ValueOutOfRange { field, .. } => assert_eq!(field, "transition_speed"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn toml_string_round_trips() {
        let config = FieldConfig {
            dots_number: 150,
            motion: MotionKind::Drift,
            arrival_reset: ResetKind::Random,
            seed: Some(9),
            ..FieldConfig::default()
        };
        let text = config.to_toml_string().unwrap();
        let parsed = FieldConfig::parse(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn motion_policy_mapping() {
        let chase = FieldConfig::default().motion_policy();
        assert!(matches!(
            chase,
            MotionPolicy::Chase {
                reset: ArrivalReset::Factor,
                ..
            }
        ));

        let config = FieldConfig {
            motion: MotionKind::Drift,
            boundary: 3.0,
            ..FieldConfig::default()
        };
        match config.motion_policy() {
            MotionPolicy::Drift {
                boundary, spread, ..
            } => {
                assert_eq!(boundary, 3.0);
                assert_eq!(spread, 3.0);
            }
            other => panic!("expected drift, got {other:?}"),
        }
    }

    #[test]
    fn load_from_file() {
        let dir = std::env::temp_dir().join("plexus-config-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("plexus.toml");
        std::fs::write(&path, "dots_number = 12\n").unwrap();
        let config = FieldConfig::load(&path).unwrap();
        assert_eq!(config.dots_number, 12);
        assert!(FieldConfig::load(dir.join("missing.toml")).is_err());
    }
}
