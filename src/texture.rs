use fnv::FnvHashMap;
use globe_core::theme::PLACEHOLDER_FILL;
use globe_core::{label_font, BadgePainter, BadgePlan, IconArt, Palette, TextMeasure, TextMetrics};
use wasm_bindgen::JsCast;
use web_sys as web;

const TEXT_CACHE_MAX_ENTRIES: usize = 4096;

/// Straight-alpha RGBA pixels read back from the badge canvas.
pub struct BadgeBitmap {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl BadgeBitmap {
    /// Fully transparent bitmap, used when even the placeholder cannot be read back.
    pub fn blank(width: u32, height: u32) -> Self {
        let (width, height) = (width.max(1), height.max(1));
        Self {
            width,
            height,
            rgba: vec![0; (width * height * 4) as usize],
        }
    }
}

/// Paints badges on one offscreen Canvas2D surface, resized per badge.
pub struct CanvasPainter {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    text_cache: FnvHashMap<(String, u32), TextMetrics>,
}

impl CanvasPainter {
    pub fn new(document: &web::Document) -> anyhow::Result<Self> {
        let canvas = document
            .create_element("canvas")
            .map_err(|e| anyhow::anyhow!("{:?}", e))?
            .dyn_into::<web::HtmlCanvasElement>()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("{:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        Ok(Self {
            canvas,
            ctx,
            text_cache: FnvHashMap::default(),
        })
    }

    fn rounded_rect(&self, x: f64, y: f64, w: f64, h: f64, r: f64) -> anyhow::Result<()> {
        let ctx = &self.ctx;
        ctx.begin_path();
        ctx.move_to(x + r, y);
        ctx.arc_to(x + w, y, x + w, y + h, r)
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        ctx.arc_to(x + w, y + h, x, y + h, r)
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        ctx.arc_to(x, y + h, x, y, r)
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        ctx.arc_to(x, y, x + w, y, r)
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        ctx.close_path();
        Ok(())
    }

    fn draw_icon(&self, plan: &BadgePlan, img: &web::HtmlImageElement) -> anyhow::Result<()> {
        let (w, h) = (img.natural_width(), img.natural_height());
        // SVGs without intrinsic size report 0x0; treat them as square.
        let r = if w == 0 || h == 0 {
            plan.icon_rect(1.0, 1.0)
        } else {
            plan.icon_rect(w as f32, h as f32)
        };
        self.ctx
            .draw_image_with_html_image_element_and_dw_and_dh(img, r.x as f64, r.y as f64, r.w as f64, r.h as f64)
            .map_err(|e| anyhow::anyhow!("{:?}", e))
    }

    fn draw_placeholder(&self, plan: &BadgePlan, glyph: char, palette: &Palette) -> anyhow::Result<()> {
        let r = plan.placeholder_rect();
        self.rounded_rect(
            r.x as f64,
            r.y as f64,
            r.w as f64,
            r.h as f64,
            plan.placeholder_corner() as f64,
        )?;
        self.ctx.set_fill_style_str(&PLACEHOLDER_FILL.to_css());
        self.ctx.fill();

        self.ctx.set_font(&label_font(plan.placeholder_font_px()));
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        self.ctx.set_fill_style_str(&palette.label.to_css());
        let mut buf = [0u8; 4];
        self.ctx
            .fill_text(
                glyph.encode_utf8(&mut buf),
                (r.x + r.w * 0.5) as f64,
                (r.y + r.h * 0.5) as f64,
            )
            .map_err(|e| anyhow::anyhow!("{:?}", e))
    }

    fn draw_label(&self, plan: &BadgePlan, label: &str, palette: &Palette) -> anyhow::Result<()> {
        let ctx = &self.ctx;
        ctx.set_font(&label_font(plan.font_px));
        ctx.set_text_align("center");
        ctx.set_text_baseline("alphabetic");
        ctx.set_line_join("round");
        ctx.set_line_width(plan.stroke_width as f64);
        let (x, y) = (plan.center_x() as f64, plan.baseline_y as f64);
        ctx.set_stroke_style_str(&palette.label_stroke.to_css());
        ctx.stroke_text(label, x, y)
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        ctx.set_fill_style_str(&palette.label.to_css());
        ctx.fill_text(label, x, y)
            .map_err(|e| anyhow::anyhow!("{:?}", e))
    }
}

impl TextMeasure for CanvasPainter {
    fn measure(&mut self, text: &str, font_px: u32) -> TextMetrics {
        let key = (text.to_string(), font_px);
        if let Some(&m) = self.text_cache.get(&key) {
            return m;
        }
        self.ctx.set_font(&label_font(font_px));
        let m = match self.ctx.measure_text(text) {
            Ok(tm) => {
                let positive = |v: f64| (v.is_finite() && v > 0.0).then_some(v as f32);
                TextMetrics {
                    width: tm.width() as f32,
                    ascent: positive(tm.actual_bounding_box_ascent()),
                    descent: positive(tm.actual_bounding_box_descent()),
                }
            }
            // Rough average advance for a bold sans-serif.
            Err(_) => TextMetrics {
                width: text.chars().count() as f32 * font_px as f32 * 0.6,
                ascent: None,
                descent: None,
            },
        };
        if self.text_cache.len() >= TEXT_CACHE_MAX_ENTRIES {
            self.text_cache.clear();
        }
        self.text_cache.insert(key, m);
        m
    }
}

impl BadgePainter for CanvasPainter {
    type Icon = web::HtmlImageElement;
    type Output = anyhow::Result<BadgeBitmap>;

    fn paint(
        &mut self,
        plan: &BadgePlan,
        art: IconArt<'_, Self::Icon>,
        label: &str,
        palette: &Palette,
    ) -> Self::Output {
        // Resizing also resets the context state.
        self.canvas.set_width(plan.canvas_w);
        self.canvas.set_height(plan.canvas_h);
        let (w, h) = (plan.canvas_w as f64, plan.canvas_h as f64);
        self.ctx.clear_rect(0.0, 0.0, w, h);
        self.ctx.set_image_smoothing_enabled(true);

        match art {
            IconArt::Bitmap(img) => self.draw_icon(plan, img)?,
            IconArt::Placeholder(glyph) => self.draw_placeholder(plan, glyph, palette)?,
        }
        self.draw_label(plan, label, palette)?;

        let data = self
            .ctx
            .get_image_data(0.0, 0.0, w, h)
            .map_err(|e| anyhow::anyhow!("canvas readback failed: {:?}", e))?;
        Ok(BadgeBitmap {
            width: data.width(),
            height: data.height(),
            rgba: data.data().0,
        })
    }
}
