use crate::constants::*;
use crate::theme::ThemeMode;
use std::str::FromStr;

/// Named rotation tuning selected by the `speed` query parameter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SpeedPreset {
    Slow,
    #[default]
    Normal,
    Fast,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown speed preset {0:?} (expected slow, normal or fast)")]
pub struct ParseSpeedError(pub String);

impl FromStr for SpeedPreset {
    type Err = ParseSpeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "slow" => Ok(SpeedPreset::Slow),
            "normal" => Ok(SpeedPreset::Normal),
            "fast" => Ok(SpeedPreset::Fast),
            other => Err(ParseSpeedError(other.to_string())),
        }
    }
}

/// Rotation tuning tuple.
///
/// - `angular_speed`: autorotation speed on each axis, radians per second
/// - `phase_duration`: seconds spent on each diagonal before advancing
/// - `drag_sensitivity`: radians of rotation per CSS pixel of pointer travel
/// - `momentum_damping`: per-frame velocity multiplier while coasting
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpeedProfile {
    pub angular_speed: f32,
    pub phase_duration: f32,
    pub drag_sensitivity: f32,
    pub momentum_damping: f32,
}

impl SpeedPreset {
    pub fn profile(self) -> SpeedProfile {
        match self {
            SpeedPreset::Slow => SpeedProfile {
                angular_speed: 0.18,
                phase_duration: 7.0,
                drag_sensitivity: 0.004,
                momentum_damping: 0.96,
            },
            SpeedPreset::Normal => SpeedProfile {
                angular_speed: 0.30,
                phase_duration: 5.0,
                drag_sensitivity: 0.005,
                momentum_damping: 0.95,
            },
            SpeedPreset::Fast => SpeedProfile {
                angular_speed: 0.50,
                phase_duration: 3.5,
                drag_sensitivity: 0.006,
                momentum_damping: 0.93,
            },
        }
    }
}

impl Default for SpeedProfile {
    fn default() -> Self {
        SpeedPreset::Normal.profile()
    }
}

/// Recognised query parameters, already validated.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryOverrides {
    pub theme: Option<ThemeMode>,
    pub speed: Option<SpeedPreset>,
}

/// Decoded value of the first `key` parameter in a location search string
/// (`?theme=dark&speed=fast`). Percent escapes and `+` are decoded and
/// surrounding whitespace is trimmed.
pub fn query_value(search: &str, key: &str) -> Option<String> {
    let search = search.strip_prefix('?').unwrap_or(search);
    url::form_urlencoded::parse(search.as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.trim().to_string())
}

impl QueryOverrides {
    /// Parse a location search string. Unknown keys are ignored and invalid
    /// values are dropped with a warning.
    pub fn parse(search: &str) -> Self {
        let mut out = Self::default();
        if let Some(value) = query_value(search, "theme") {
            match value.parse() {
                Ok(mode) => out.theme = Some(mode),
                Err(e) => log::warn!("[config] ignoring theme override: {}", e),
            }
        }
        if let Some(value) = query_value(search, "speed") {
            match value.parse() {
                Ok(preset) => out.speed = Some(preset),
                Err(e) => log::warn!("[config] ignoring speed override: {}", e),
            }
        }
        out
    }
}

/// Complete widget configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct GlobeConfig {
    pub radius: f32,
    pub density: f32,
    pub width_front: f32,
    pub width_back: f32,
    pub opacity_front: f32,
    pub opacity_back: f32,
    pub depth_exponent: f32,
    /// Relaxation iterations; 0 keeps the plain spiral.
    pub relax_iterations: usize,
    pub speed: SpeedProfile,
    pub theme_override: Option<ThemeMode>,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            radius: SPHERE_RADIUS,
            density: DENSITY,
            width_front: WIDTH_FRONT,
            width_back: WIDTH_BACK,
            opacity_front: OPACITY_FRONT,
            opacity_back: OPACITY_BACK,
            depth_exponent: DEPTH_OPACITY_EXPONENT,
            relax_iterations: RELAX_ITERATIONS,
            speed: SpeedProfile::default(),
            theme_override: None,
        }
    }
}

impl GlobeConfig {
    pub fn with_overrides(overrides: &QueryOverrides) -> Self {
        let mut cfg = Self::default();
        if let Some(preset) = overrides.speed {
            cfg.speed = preset.profile();
        }
        cfg.theme_override = overrides.theme;
        cfg
    }

    pub fn from_query(search: &str) -> Self {
        Self::with_overrides(&QueryOverrides::parse(search))
    }

    /// Width used for the angular footprint of a badge during layout.
    pub fn mid_width(&self) -> f32 {
        (self.width_front + self.width_back) * 0.5
    }
}
