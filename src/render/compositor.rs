use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use vello_cpu::kurbo::Shape;
use vello_cpu::peniko::color::PremulRgba8;

use crate::{
    assets::{decode::PreparedImage, fonts::FontBook},
    foundation::{
        core::{Affine, Canvas, PanelId, Rect, RenderMode, Rgba8, Vec2},
        error::{PanelGridError, PanelGridResult},
    },
    interaction::state::{CaptionMap, TransformMap},
    layout::solver::PanelRect,
    render::{cover::image_affine, frame::FrameRGBA},
    text::{
        caption::DefaultCaptionStyle,
        engine::{CaptionLayout, CaptionOptions, layout_caption},
        measure::TextMeasure,
    },
};

/// Compositor look and caption defaults that are not part of the scene data.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompositorSettings {
    /// Output background when there is no border.
    pub background: Rgba8,
    /// Fill behind every panel's image.
    pub panel_background: Rgba8,
    /// Color of the "add image" plus marker.
    pub marker_color: Rgba8,
    /// Caption shown for empty captions in interactive renders.
    pub placeholder_text: String,
    /// Alpha multiplier for placeholder captions.
    pub placeholder_opacity: f64,
    /// Caption inset from panel edges, in pixels.
    pub caption_padding: f64,
    /// Drop shadow offset, in pixels.
    pub shadow_offset: Vec2,
    /// Drop shadow color; fully transparent disables the shadow.
    pub shadow_color: Rgba8,
    /// Surface height at which explicit caption sizes are used as-is.
    pub reference_height: Option<f64>,
}

impl Default for CompositorSettings {
    fn default() -> Self {
        Self {
            background: Rgba8::rgb(0x11, 0x11, 0x11),
            panel_background: Rgba8::rgb(0x2a, 0x2a, 0x2a),
            marker_color: Rgba8::rgba(255, 255, 255, 160),
            placeholder_text: "Add Caption".to_string(),
            placeholder_opacity: 0.5,
            caption_padding: 10.0,
            shadow_offset: Vec2::new(2.0, 2.0),
            shadow_color: Rgba8::rgba(0, 0, 0, 128),
            reference_height: None,
        }
    }
}

impl CompositorSettings {
    /// Multiplier for explicit caption sizes on a surface of `canvas` size.
    pub fn font_scale(&self, canvas: Canvas) -> f64 {
        match self.reference_height {
            Some(r) if r.is_finite() && r > 0.0 && canvas.height > 0 => {
                f64::from(canvas.height) / r
            }
            _ => 1.0,
        }
    }
}

/// Border stroked around every panel; the gaps between panels show its color.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Border {
    /// Stroke width in pixels; `0` disables the border.
    pub thickness: f64,
    /// Stroke and gap color.
    pub color: Rgba8,
}

impl Default for Border {
    fn default() -> Self {
        Self {
            thickness: 0.0,
            color: Rgba8::BLACK,
        }
    }
}

impl Border {
    /// Whether the border is drawn at all.
    pub fn is_visible(&self) -> bool {
        self.thickness.is_finite() && self.thickness > 0.0
    }
}

/// Everything one render reads. All maps are caller-owned.
#[derive(Clone, Copy, Debug)]
pub struct CollageInput<'a> {
    /// Output size.
    pub canvas: Canvas,
    /// Resolved panel rectangles.
    pub panels: &'a [PanelRect],
    /// Decoded bitmaps by image index. Missing entries render as empty panels.
    pub images: &'a BTreeMap<usize, PreparedImage>,
    /// Image index bound to each panel.
    pub panel_images: &'a BTreeMap<PanelId, usize>,
    /// Per-panel image transforms.
    pub transforms: &'a TransformMap,
    /// Per-panel captions.
    pub captions: &'a CaptionMap,
    /// Shared caption defaults.
    pub default_caption: &'a DefaultCaptionStyle,
    /// Panel border.
    pub border: Border,
}

impl<'a> CollageInput<'a> {
    /// The bitmap bound to `panel`, with its image index, if it is bound and decoded.
    pub fn image_for(&self, panel: &PanelRect) -> Option<(usize, &'a PreparedImage)> {
        let index = *self.panel_images.get(&panel.id)?;
        self.images
            .get(&index)
            .filter(|img| !img.is_empty())
            .map(|img| (index, img))
    }
}

#[derive(Clone)]
struct ImagePaint {
    source: Arc<Vec<u8>>,
    paint: vello_cpu::Image,
    w: u32,
    h: u32,
}

/// CPU compositor built on `vello_cpu`.
///
/// Keeps its render context, converted image paints and glyph fonts between renders; none of
/// that affects output.
pub struct Compositor {
    settings: CompositorSettings,
    fonts: FontBook,
    ctx: Option<vello_cpu::RenderContext>,
    image_cache: HashMap<usize, ImagePaint>,
    glyph_fonts: HashMap<(u64, u32), vello_cpu::peniko::FontData>,
}

impl std::fmt::Debug for Compositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compositor")
            .field("settings", &self.settings)
            .field("fonts", &self.fonts)
            .field("cached_images", &self.image_cache.len())
            .finish_non_exhaustive()
    }
}

impl Compositor {
    /// Compositor without caption fonts. Captions are laid out but not drawn until fonts are
    /// registered.
    pub fn new(settings: CompositorSettings) -> Self {
        Self::with_fonts(settings, FontBook::new())
    }

    /// Compositor drawing captions with `fonts`.
    pub fn with_fonts(settings: CompositorSettings, fonts: FontBook) -> Self {
        Self {
            settings,
            fonts,
            ctx: None,
            image_cache: HashMap::new(),
            glyph_fonts: HashMap::new(),
        }
    }

    /// Current settings.
    pub fn settings(&self) -> &CompositorSettings {
        &self.settings
    }

    /// Replace the settings.
    pub fn set_settings(&mut self, settings: CompositorSettings) {
        self.settings = settings;
    }

    /// Registered caption fonts.
    pub fn fonts_mut(&mut self) -> &mut FontBook {
        &mut self.fonts
    }

    /// Lay out every panel's caption, measuring with the registered fonts.
    pub fn layout_captions(
        &mut self,
        input: &CollageInput<'_>,
        mode: RenderMode,
    ) -> Vec<Option<CaptionLayout>> {
        let opts = caption_options(&self.settings, input.canvas);
        let mut measure = self.fonts.measure();
        layout_all(input, mode, &opts, &mut measure)
    }

    /// Render the collage measuring captions with the registered fonts.
    #[tracing::instrument(
        skip(self, input),
        fields(
            width = input.canvas.width,
            height = input.canvas.height,
            panels = input.panels.len()
        )
    )]
    pub fn render(
        &mut self,
        input: &CollageInput<'_>,
        mode: RenderMode,
    ) -> PanelGridResult<FrameRGBA> {
        let captions = self.layout_captions(input, mode);
        self.render_laid_out(input, &captions)
    }

    /// Render the collage measuring captions with a caller-supplied oracle.
    pub fn render_with_measure(
        &mut self,
        input: &CollageInput<'_>,
        mode: RenderMode,
        measure: &mut dyn TextMeasure,
    ) -> PanelGridResult<FrameRGBA> {
        let opts = caption_options(&self.settings, input.canvas);
        let captions = layout_all(input, mode, &opts, measure);
        self.render_laid_out(input, &captions)
    }

    fn render_laid_out(
        &mut self,
        input: &CollageInput<'_>,
        captions: &[Option<CaptionLayout>],
    ) -> PanelGridResult<FrameRGBA> {
        let (width, height) = surface_dims(input.canvas)?;
        self.with_ctx_mut(width, height, |this, ctx| {
            this.draw(ctx, input, captions);
            ctx.flush();
            let mut pixmap = vello_cpu::Pixmap::new(width, height);
            ctx.render_to_pixmap(&mut pixmap);
            Ok(FrameRGBA {
                width: input.canvas.width,
                height: input.canvas.height,
                data: pixmap.data_as_u8_slice().to_vec(),
                premultiplied: true,
            })
        })
    }

    fn with_ctx_mut<R>(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut Self, &mut vello_cpu::RenderContext) -> PanelGridResult<R>,
    ) -> PanelGridResult<R> {
        let mut ctx = match self.ctx.take() {
            None => vello_cpu::RenderContext::new(width, height),
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            Some(_) => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(self, &mut ctx)?;
        self.ctx = Some(ctx);
        Ok(out)
    }

    fn draw(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        input: &CollageInput<'_>,
        captions: &[Option<CaptionLayout>],
    ) {
        self.image_cache
            .retain(|index, _| input.images.contains_key(index));

        let background = if input.border.is_visible() {
            input.border.color
        } else {
            self.settings.background
        };
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(color_to_cpu(background));
        ctx.fill_rect(&rect_to_cpu(input.canvas.rect()));

        let draw_text = !self.fonts.is_empty();
        if !draw_text && captions.iter().any(Option::is_some) {
            tracing::warn!("no caption fonts registered; skipping caption glyphs");
        }

        for (i, panel) in input.panels.iter().enumerate() {
            let rect = panel.rect();
            if rect.area() <= 0.0 {
                continue;
            }

            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(color_to_cpu(self.settings.panel_background));
            ctx.fill_rect(&rect_to_cpu(rect));

            let paint = input
                .image_for(panel)
                .and_then(|(index, img)| self.image_paint_for(index, img));
            match paint {
                Some(p) => {
                    let transform = input
                        .transforms
                        .get(&panel.id)
                        .copied()
                        .unwrap_or_default();
                    let tr = image_affine(f64::from(p.w), f64::from(p.h), rect, &transform);
                    ctx.push_clip_layer(&rect_to_cpu(rect).to_path(0.1));
                    ctx.set_transform(affine_to_cpu(tr));
                    ctx.set_paint(p.paint);
                    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                        0.0,
                        0.0,
                        f64::from(p.w),
                        f64::from(p.h),
                    ));
                    ctx.pop_layer();
                }
                None => self.draw_marker(ctx, rect),
            }

            if input.border.is_visible() {
                ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
                ctx.set_stroke(vello_cpu::kurbo::Stroke::new(input.border.thickness));
                ctx.set_paint(color_to_cpu(input.border.color));
                ctx.stroke_rect(&rect_to_cpu(rect));
            }

            if draw_text && let Some(Some(layout)) = captions.get(i) {
                self.draw_caption(ctx, layout);
            }
        }
    }

    fn image_paint_for(&mut self, index: usize, img: &PreparedImage) -> Option<ImagePaint> {
        if let Some(p) = self.image_cache.get(&index)
            && Arc::ptr_eq(&p.source, &img.rgba8_premul)
        {
            return Some(p.clone());
        }
        match pixmap_from_premul_bytes(&img.rgba8_premul, img.width, img.height) {
            Ok(pixmap) => {
                let out = ImagePaint {
                    source: Arc::clone(&img.rgba8_premul),
                    paint: vello_cpu::Image {
                        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
                        sampler: vello_cpu::peniko::ImageSampler::default(),
                    },
                    w: img.width,
                    h: img.height,
                };
                self.image_cache.insert(index, out.clone());
                Some(out)
            }
            Err(err) => {
                tracing::warn!(index, %err, "image unusable; drawing placeholder");
                self.image_cache.remove(&index);
                None
            }
        }
    }

    fn draw_marker(&self, ctx: &mut vello_cpu::RenderContext, rect: Rect) {
        let c = rect.center();
        let arm = rect.width().min(rect.height()) * 0.12;
        let bar = (arm * 0.25).max(1.0);
        let horizontal = Rect::new(c.x - arm, c.y - bar * 0.5, c.x + arm, c.y + bar * 0.5);
        let vertical = Rect::new(c.x - bar * 0.5, c.y - arm, c.x + bar * 0.5, c.y + arm);

        // One path so the overlap is covered once under nonzero fill.
        let mut plus = rect_to_cpu(horizontal).to_path(0.1);
        plus.extend(rect_to_cpu(vertical).path_elements(0.1));
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(color_to_cpu(self.settings.marker_color));
        ctx.fill_path(&plus);
    }

    fn draw_caption(&mut self, ctx: &mut vello_cpu::RenderContext, layout: &CaptionLayout) {
        let query = layout.font_query();
        let rotation = layout.placement.transform();
        let style = &layout.style;
        let shadow = if layout.placeholder {
            self.settings
                .shadow_color
                .with_alpha_mul(self.settings.placeholder_opacity)
        } else {
            self.settings.shadow_color
        };
        let shadow_offset = self.settings.shadow_offset;

        for (i, line) in layout.lines.iter().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let Some(shaped) = self.fonts.shape_line(line, &query) else {
                continue;
            };
            let width = f64::from(shaped.width());
            let ascent = shaped
                .lines()
                .next()
                .map(|l| f64::from(l.metrics().baseline))
                .unwrap_or(0.0);
            let origin = Vec2::new(
                layout.placement.center_x - width * 0.5,
                layout.placement.baseline(i) - ascent,
            );
            let line_tr = rotation * Affine::translate(origin);

            if shadow.a > 0 {
                let tr = Affine::translate(shadow_offset) * line_tr;
                self.draw_glyphs(ctx, &shaped, tr, shadow, None);
            }
            if style.stroke_width > 0.0 && style.stroke_color.a > 0 {
                // Fill covers the inner half of the stroke.
                let stroke = Some(style.stroke_width * 2.0);
                self.draw_glyphs(ctx, &shaped, line_tr, style.stroke_color, stroke);
            }
            self.draw_glyphs(ctx, &shaped, line_tr, style.color, None);
        }
    }

    fn draw_glyphs(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        shaped: &parley::Layout<()>,
        transform: Affine,
        color: Rgba8,
        stroke_width: Option<f64>,
    ) {
        ctx.set_transform(affine_to_cpu(transform));
        ctx.set_paint(color_to_cpu(color));
        if let Some(w) = stroke_width {
            ctx.set_stroke(
                vello_cpu::kurbo::Stroke::new(w).with_join(vello_cpu::kurbo::Join::Round),
            );
        }
        for line in shaped.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let run_font = run.run().font();
                let font = self
                    .glyph_fonts
                    .entry((run_font.data.id(), run_font.index))
                    .or_insert_with(|| {
                        vello_cpu::peniko::FontData::new(
                            vello_cpu::peniko::Blob::from(run_font.data.data().to_vec()),
                            run_font.index,
                        )
                    })
                    .clone();
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                let builder = ctx.glyph_run(&font).font_size(run.run().font_size());
                if stroke_width.is_some() {
                    builder.stroke_glyphs(glyphs);
                } else {
                    builder.fill_glyphs(glyphs);
                }
            }
        }
    }
}

fn caption_options(settings: &CompositorSettings, canvas: Canvas) -> CaptionOptions<'_> {
    CaptionOptions {
        padding: settings.caption_padding.max(0.0),
        placeholder_text: &settings.placeholder_text,
        placeholder_opacity: settings.placeholder_opacity.clamp(0.0, 1.0),
        font_scale: settings.font_scale(canvas),
    }
}

fn layout_all(
    input: &CollageInput<'_>,
    mode: RenderMode,
    opts: &CaptionOptions<'_>,
    measure: &mut dyn TextMeasure,
) -> Vec<Option<CaptionLayout>> {
    input
        .panels
        .iter()
        .map(|panel| {
            layout_caption(
                panel,
                input.captions.get(&panel.id),
                input.default_caption,
                input.image_for(panel).is_some(),
                mode,
                opts,
                measure,
            )
        })
        .collect()
}

fn surface_dims(canvas: Canvas) -> PanelGridResult<(u16, u16)> {
    if canvas.width == 0 || canvas.height == 0 {
        return Err(PanelGridError::render("surface must be non-empty"));
    }
    let w: u16 = canvas
        .width
        .try_into()
        .map_err(|_| PanelGridError::render("surface width exceeds u16"))?;
    let h: u16 = canvas
        .height
        .try_into()
        .map_err(|_| PanelGridError::render("surface height exceeds u16"))?;
    Ok((w, h))
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> PanelGridResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| PanelGridError::render("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| PanelGridError::render("pixmap height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(PanelGridError::render("pixmap byte len mismatch"));
    }
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]]))
        .collect();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, true))
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
