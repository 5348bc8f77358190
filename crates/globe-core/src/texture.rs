//! Badge texture generation: layout planning and the painter seam.
//!
//! Planning is pure: it only needs text measurements, which come from a
//! [`TextMeasure`] implementation. Painting is delegated to a [`BadgePainter`]
//! so the browser can draw with Canvas2D while tests use a recording painter.

use crate::catalog::BadgeSpec;
use crate::constants::*;
use crate::theme::{palette, Palette, ThemeMode};

/// Text measurements at a given font size, in canvas pixels.
///
/// `ascent`/`descent` are `None` when the platform cannot report actual
/// bounding boxes; the planner then falls back to font-size proportions.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextMetrics {
    pub width: f32,
    pub ascent: Option<f32>,
    pub descent: Option<f32>,
}

pub trait TextMeasure {
    fn measure(&mut self, text: &str, font_px: u32) -> TextMetrics;
}

/// CSS font shorthand for badge labels.
pub fn label_font(font_px: u32) -> String {
    format!("{} {}px {}", LABEL_FONT_WEIGHT, font_px, LABEL_FONT_FAMILY)
}

/// Largest font size whose rendered `text` fits in `max_width`, searching down
/// from `min(MAX_FONT_PX, target_px)` and never going below `MIN_FONT_PX`.
pub fn fit_font_px(measure: &mut impl TextMeasure, text: &str, max_width: f32, target_px: u32) -> u32 {
    let start = MAX_FONT_PX.min(target_px).max(MIN_FONT_PX);
    (MIN_FONT_PX..=start)
        .rev()
        .find(|&px| measure.measure(text, px).width <= max_width)
        .unwrap_or(MIN_FONT_PX)
}

/// Glyph shown in the placeholder: first alphanumeric character of the label,
/// uppercased, or `?` when there is none.
pub fn placeholder_glyph(label: &str) -> char {
    label
        .chars()
        .find(|c| c.is_alphanumeric())
        .and_then(|c| c.to_uppercase().next())
        .unwrap_or('?')
}

/// Axis-aligned rectangle in canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// Pixel layout of one badge canvas, top to bottom:
/// padding, icon square, gap, label band, padding.
#[derive(Clone, Debug, PartialEq)]
pub struct BadgePlan {
    pub canvas_w: u32,
    pub canvas_h: u32,
    pub font_px: u32,
    pub top_pad: f32,
    pub icon_box: f32,
    pub label_gap: f32,
    pub label_band: f32,
    pub bottom_pad: f32,
    pub baseline_y: f32,
    pub stroke_width: f32,
}

impl BadgePlan {
    /// Plan a badge for `label` at `desired_width` CSS pixels and the given
    /// device pixel ratio (capped at `MAX_PIXEL_RATIO`).
    pub fn new(measure: &mut impl TextMeasure, label: &str, desired_width: f32, pixel_ratio: f64) -> Self {
        let dpr = pixel_ratio.clamp(1.0, MAX_PIXEL_RATIO) as f32;
        let desired_width = desired_width.max(ICON_PAD * 4.0);
        let canvas_w = (desired_width * dpr).round().max(1.0);
        let max_text_w = (canvas_w * LABEL_WIDTH_BUDGET).round();
        let target_px = (TARGET_FONT_PX * dpr).round() as u32;

        let font_px = fit_font_px(measure, label, max_text_w, target_px);
        let m = measure.measure(label, font_px);
        let px = font_px as f32;
        let ascent = m.ascent.unwrap_or(px * 0.8).max(1.0);
        let descent = m.descent.unwrap_or(px * 0.25).max(1.0);

        let top_pad = (ICON_PAD * dpr).round();
        let bottom_pad = top_pad;
        let label_gap = (LABEL_MARGIN * dpr).round();
        let icon_box = ((desired_width - ICON_PAD * 2.0) * dpr).round();
        let label_band = (ascent + descent + px * 0.35).round();
        let canvas_h = top_pad + icon_box + label_gap + label_band + bottom_pad;
        let baseline_y = top_pad + icon_box + label_gap + (ascent + px * 0.18).round();

        Self {
            canvas_w: canvas_w as u32,
            canvas_h: canvas_h.max(1.0) as u32,
            font_px,
            top_pad,
            icon_box,
            label_gap,
            label_band,
            bottom_pad,
            baseline_y,
            stroke_width: (px / 15.0).round().max(2.0),
        }
    }

    pub fn aspect(&self) -> f32 {
        self.canvas_w as f32 / self.canvas_h.max(1) as f32
    }

    pub fn center_x(&self) -> f32 {
        (self.canvas_w as f32 * 0.5).round()
    }

    /// Where an icon of `icon_w × icon_h` is drawn: scaled to fit the icon
    /// square without distortion, centered.
    pub fn icon_rect(&self, icon_w: f32, icon_h: f32) -> Rect {
        if icon_w <= 0.0 || icon_h <= 0.0 {
            return self.placeholder_rect();
        }
        let scale = (self.icon_box / icon_w).min(self.icon_box / icon_h);
        let w = (icon_w * scale).round();
        let h = (icon_h * scale).round();
        Rect {
            x: ((self.canvas_w as f32 - w) * 0.5).round(),
            y: (self.top_pad + (self.icon_box - h) * 0.5).round(),
            w,
            h,
        }
    }

    /// Rounded-rectangle area used for the placeholder glyph.
    pub fn placeholder_rect(&self) -> Rect {
        let side = (self.icon_box * (1.0 - 2.0 * PLACEHOLDER_INSET)).round();
        Rect {
            x: ((self.canvas_w as f32 - side) * 0.5).round(),
            y: (self.top_pad + (self.icon_box - side) * 0.5).round(),
            w: side,
            h: side,
        }
    }

    pub fn placeholder_corner(&self) -> f32 {
        (self.placeholder_rect().w * PLACEHOLDER_CORNER).round()
    }

    pub fn placeholder_font_px(&self) -> u32 {
        (self.placeholder_rect().w * PLACEHOLDER_GLYPH_SCALE).round().max(1.0) as u32
    }
}

/// Icon area content: a fetched bitmap or the synthesized placeholder glyph.
#[derive(Debug)]
pub enum IconArt<'a, I> {
    Bitmap(&'a I),
    Placeholder(char),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IconError {
    #[error("icon request for {url} failed: {reason}")]
    Load { url: String, reason: String },
    #[error("icon {url} could not be drawn: {reason}")]
    Draw { url: String, reason: String },
    #[error("icon request for {url} timed out after {after_ms} ms")]
    Timeout { url: String, after_ms: u32 },
}

pub trait BadgePainter: TextMeasure {
    type Icon;
    type Output;

    fn paint(
        &mut self,
        plan: &BadgePlan,
        art: IconArt<'_, Self::Icon>,
        label: &str,
        palette: &Palette,
    ) -> Self::Output;
}

/// Texture plus the width/height ratio needed to size its billboard.
#[derive(Clone, Debug)]
pub struct GeneratedTexture<T> {
    pub texture: T,
    pub aspect: f32,
}

impl<T> GeneratedTexture<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> GeneratedTexture<U> {
        GeneratedTexture {
            texture: f(self.texture),
            aspect: self.aspect,
        }
    }
}

/// URL of the tinted icon for `id` on the icon CDN.
pub fn icon_url(id: &str, mode: ThemeMode) -> String {
    format!("{}/{}/{}", ICON_CDN_BASE, id, palette(mode).icon_tint.to_hex())
}

/// Paint the badge for `spec` in `mode`. The icon has already been fetched by
/// the caller; a failed fetch degrades to the placeholder glyph and is only
/// logged. Always produces a texture with a finite, positive aspect ratio.
pub fn generate<P: BadgePainter>(
    painter: &mut P,
    spec: &BadgeSpec,
    mode: ThemeMode,
    desired_width: f32,
    pixel_ratio: f64,
    icon: Result<P::Icon, IconError>,
) -> GeneratedTexture<P::Output> {
    let pal = palette(mode);
    let plan = BadgePlan::new(painter, spec.label, desired_width, pixel_ratio);
    let texture = match &icon {
        Ok(bitmap) => painter.paint(&plan, IconArt::Bitmap(bitmap), spec.label, &pal),
        Err(e) => {
            log::warn!("[icon] {}: {}; using placeholder", spec.id, e);
            let glyph = placeholder_glyph(spec.label);
            painter.paint(&plan, IconArt::Placeholder(glyph), spec.label, &pal)
        }
    };
    GeneratedTexture {
        texture,
        aspect: plan.aspect(),
    }
}
