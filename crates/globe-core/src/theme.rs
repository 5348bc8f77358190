//! Display mode resolution and the palette derived from it.
//!
//! Resolution is a pure function over a [`ThemeSignals`] snapshot so it can be
//! called as often as textures are regenerated. The browser adapter is
//! responsible for collecting the snapshot from the document.

use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

/// Light or dark page appearance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ThemeMode {
    Dark,
    #[default]
    Light,
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Dark => "dark",
            ThemeMode::Light => "light",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme mode {0:?} (expected \"dark\" or \"light\")")]
pub struct ParseThemeModeError(pub String);

impl FromStr for ThemeMode {
    type Err = ParseThemeModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dark" => Ok(ThemeMode::Dark),
            "light" => Ok(ThemeMode::Light),
            other => Err(ParseThemeModeError(other.to_string())),
        }
    }
}

/// Everything the resolver looks at, in the order it looks at it.
///
/// - `query`: raw value of the `theme` query parameter
/// - `page_markers`: raw values of page-level markers, highest priority first
///   (root `data-theme`, then root class, then body class)
/// - `prefers_dark`: OS color-scheme preference, `None` when unavailable
#[derive(Clone, Debug, Default)]
pub struct ThemeSignals {
    pub query: Option<String>,
    pub page_markers: SmallVec<[String; 4]>,
    pub prefers_dark: Option<bool>,
}

impl ThemeSignals {
    pub fn push_marker(&mut self, value: impl Into<String>) {
        self.page_markers.push(value.into());
    }
}

/// Resolve the display mode: query override, then page markers, then OS
/// preference, then `light`. Values that are neither `dark` nor `light` are
/// skipped.
pub fn resolve_mode(signals: &ThemeSignals) -> ThemeMode {
    if let Some(mode) = signals.query.as_deref().and_then(|q| q.parse().ok()) {
        return mode;
    }
    if let Some(mode) = signals
        .page_markers
        .iter()
        .find_map(|m| m.parse::<ThemeMode>().ok())
    {
        return mode;
    }
    match signals.prefers_dark {
        Some(true) => ThemeMode::Dark,
        _ => ThemeMode::Light,
    }
}

/// 8-bit RGB color with an alpha expressed in hundredths.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub alpha_pct: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r,
            g,
            b,
            alpha_pct: 100,
        }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, alpha_pct: u8) -> Self {
        Self { r, g, b, alpha_pct }
    }

    /// Hex digits without the leading `#`, as the icon CDN expects.
    pub fn to_hex(self) -> String {
        format!("{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// CSS color string usable as a Canvas2D fill or stroke style.
    pub fn to_css(self) -> String {
        if self.alpha_pct >= 100 {
            format!("#{}", self.to_hex())
        } else {
            format!(
                "rgba({},{},{},{})",
                self.r,
                self.g,
                self.b,
                self.alpha_pct as f32 / 100.0
            )
        }
    }
}

/// Colors used when painting a badge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Palette {
    pub label: Color,
    pub label_stroke: Color,
    pub icon_tint: Color,
}

/// Neutral fill behind the placeholder glyph when an icon cannot be loaded.
pub const PLACEHOLDER_FILL: Color = Color::rgba(138, 143, 152, 55);

/// Palette for a mode. Not cached; always consistent with the mode passed in.
pub fn palette(mode: ThemeMode) -> Palette {
    match mode {
        ThemeMode::Dark => Palette {
            label: Color::rgb(0xff, 0xff, 0xff),
            label_stroke: Color::rgba(0, 0, 0, 50),
            icon_tint: Color::rgb(0xff, 0xff, 0xff),
        },
        ThemeMode::Light => Palette {
            label: Color::rgb(0x1a, 0x1a, 0x1a),
            label_stroke: Color::rgba(255, 255, 255, 60),
            icon_tint: Color::rgb(0x1a, 0x1a, 0x1a),
        },
    }
}

/// Remembers the last applied mode so repeated signals only report real changes.
#[derive(Clone, Copy, Debug)]
pub struct ModeTracker {
    current: ThemeMode,
}

impl ModeTracker {
    pub fn new(initial: ThemeMode) -> Self {
        Self { current: initial }
    }

    pub fn current(&self) -> ThemeMode {
        self.current
    }

    /// Record `mode`; returns it when it differs from the previous one.
    pub fn observe(&mut self, mode: ThemeMode) -> Option<ThemeMode> {
        if mode == self.current {
            return None;
        }
        log::info!("[theme] {} -> {}", self.current, mode);
        self.current = mode;
        Some(mode)
    }
}
