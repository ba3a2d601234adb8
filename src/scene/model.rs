use std::{
    collections::BTreeMap,
    fs::File,
    io::BufReader,
    path::Path,
};

use crate::{
    assets::decode::{PreparedImage, load_image},
    foundation::{
        core::{Canvas, PanelId, Rgba8},
        error::{PanelGridError, PanelGridResult},
    },
    interaction::state::{CaptionMap, TransformMap},
    layout::{registry::TemplateRegistry, solver::PanelRect, template::TemplateDescriptor},
    render::compositor::{Border, CollageInput},
    text::caption::DefaultCaptionStyle,
};

/// Output aspect ratio tag.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AspectRatio {
    /// `1:1`
    #[default]
    Square,
    /// `4:5`
    Portrait,
    /// `9:16`
    Story,
    /// `16:9`
    Widescreen,
    /// `3:4`
    Classic,
    /// `4:3`
    ClassicLandscape,
    /// Any other `w:h` or decimal ratio.
    Custom(f64),
}

impl AspectRatio {
    /// Width over height.
    pub fn ratio(self) -> f64 {
        match self {
            Self::Square => 1.0,
            Self::Portrait => 4.0 / 5.0,
            Self::Story => 9.0 / 16.0,
            Self::Widescreen => 16.0 / 9.0,
            Self::Classic => 3.0 / 4.0,
            Self::ClassicLandscape => 4.0 / 3.0,
            Self::Custom(r) => r,
        }
    }

    /// Parse a tag such as `4:5`, `16x9` or `1.5`.
    pub fn parse(tag: &str) -> PanelGridResult<Self> {
        let tag = tag.trim();
        let known = match tag {
            "1:1" => Some(Self::Square),
            "4:5" => Some(Self::Portrait),
            "9:16" => Some(Self::Story),
            "16:9" => Some(Self::Widescreen),
            "3:4" => Some(Self::Classic),
            "4:3" => Some(Self::ClassicLandscape),
            _ => None,
        };
        if let Some(known) = known {
            return Ok(known);
        }

        let invalid = || PanelGridError::validation(format!("invalid aspect ratio '{tag}'"));
        let ratio = match tag.split_once([':', 'x']) {
            Some((w, h)) => {
                let w: f64 = w.trim().parse().map_err(|_| invalid())?;
                let h: f64 = h.trim().parse().map_err(|_| invalid())?;
                w / h
            }
            None => tag.parse().map_err(|_| invalid())?,
        };
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(invalid());
        }
        Ok(Self::Custom(ratio))
    }
}

impl TryFrom<String> for AspectRatio {
    type Error = PanelGridError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<AspectRatio> for String {
    fn from(value: AspectRatio) -> Self {
        match value {
            AspectRatio::Square => "1:1".to_string(),
            AspectRatio::Portrait => "4:5".to_string(),
            AspectRatio::Story => "9:16".to_string(),
            AspectRatio::Widescreen => "16:9".to_string(),
            AspectRatio::Classic => "3:4".to_string(),
            AspectRatio::ClassicLandscape => "4:3".to_string(),
            AspectRatio::Custom(r) => r.to_string(),
        }
    }
}

fn default_base_width() -> u32 {
    1080
}

fn default_template_id() -> String {
    "grid-2x2".to_string()
}

/// JSON-facing collage description: everything a render needs except decoded bitmaps.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    /// Registry template id; ignored when `template` is set.
    #[serde(default = "default_template_id")]
    pub template_id: String,
    /// Inline template descriptor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<TemplateDescriptor>,
    /// Aspect ratio tag.
    #[serde(default)]
    pub aspect_ratio: AspectRatio,
    /// Numeric width/height ratio; overrides the tag when positive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio_value: Option<f64>,
    /// Output width in pixels; height follows from the aspect ratio.
    #[serde(default = "default_base_width")]
    pub base_width: u32,
    /// Number of panels requested.
    pub panel_count: usize,
    /// Image paths, addressed by index.
    #[serde(default)]
    pub images: Vec<String>,
    /// Image index bound to each panel.
    #[serde(default)]
    pub panel_images: BTreeMap<PanelId, usize>,
    /// Per-panel transforms.
    #[serde(default)]
    pub transforms: TransformMap,
    /// Per-panel captions.
    #[serde(default)]
    pub captions: CaptionMap,
    /// Shared caption defaults.
    #[serde(default)]
    pub default_caption: DefaultCaptionStyle,
    /// Border width; also the gap between panels.
    #[serde(default)]
    pub border_thickness: f64,
    /// Border and gap color.
    #[serde(default = "default_border_color")]
    pub border_color: Rgba8,
}

fn default_border_color() -> Rgba8 {
    Rgba8::WHITE
}

impl Scene {
    /// Parse a scene from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> PanelGridResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| PanelGridError::serde(format!("parse scene JSON: {e}")))
    }

    /// Parse a scene from JSON text.
    pub fn from_json_str(s: &str) -> PanelGridResult<Self> {
        serde_json::from_str(s).map_err(|e| PanelGridError::serde(format!("parse scene JSON: {e}")))
    }

    /// Parse a scene from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> PanelGridResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            PanelGridError::validation(format!("open scene JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check values that cannot be repaired by fallbacks.
    pub fn validate(&self) -> PanelGridResult<()> {
        if self.base_width == 0 {
            return Err(PanelGridError::validation("baseWidth must be > 0"));
        }
        if let Some(r) = self.aspect_ratio_value
            && !(r.is_finite() && r > 0.0)
        {
            return Err(PanelGridError::validation(
                "aspectRatioValue must be finite and > 0",
            ));
        }
        if !self.border_thickness.is_finite() || self.border_thickness < 0.0 {
            return Err(PanelGridError::validation(
                "borderThickness must be finite and >= 0",
            ));
        }
        for (panel, &index) in &self.panel_images {
            if index >= self.images.len() {
                return Err(PanelGridError::validation(format!(
                    "panel '{panel}' references image {index}, but only {} images are listed",
                    self.images.len()
                )));
            }
        }
        Ok(())
    }

    /// Width over height in effect.
    pub fn ratio(&self) -> f64 {
        self.aspect_ratio_value
            .filter(|r| r.is_finite() && *r > 0.0)
            .unwrap_or_else(|| self.aspect_ratio.ratio())
    }

    /// Output surface size.
    pub fn canvas(&self) -> Canvas {
        let height = (f64::from(self.base_width) / self.ratio()).round().max(1.0);
        Canvas {
            width: self.base_width.max(1),
            height: height.min(f64::from(u32::MAX)) as u32,
        }
    }

    /// Gap between panels (equal to the border thickness).
    pub fn gap(&self) -> f64 {
        if self.border_thickness.is_finite() {
            self.border_thickness.max(0.0)
        } else {
            0.0
        }
    }

    /// Border settings for the compositor.
    pub fn border(&self) -> Border {
        Border {
            thickness: self.gap(),
            color: self.border_color,
        }
    }

    /// Resolve panel rectangles for the current canvas.
    #[tracing::instrument(
        skip(self, registry),
        fields(template = %self.template_id, panels = self.panel_count)
    )]
    pub fn resolve_panels(&self, registry: &TemplateRegistry) -> Vec<PanelRect> {
        let canvas = self.canvas();
        let (w, h) = (f64::from(canvas.width), f64::from(canvas.height));
        match &self.template {
            Some(desc) => crate::layout::solver::resolve_descriptor(
                desc,
                w,
                h,
                self.panel_count,
                self.gap(),
            ),
            None => registry.resolve(&self.template_id, w, h, self.panel_count, self.gap()),
        }
    }

    /// Decode the listed images relative to `base_dir`. Failures are logged and left out, so
    /// those panels render as empty.
    pub fn load_images(&self, base_dir: &Path) -> BTreeMap<usize, PreparedImage> {
        let mut out = BTreeMap::new();
        for (index, rel) in self.images.iter().enumerate() {
            let path = base_dir.join(rel);
            match load_image(&path) {
                Ok(img) => {
                    out.insert(index, img);
                }
                Err(err) => {
                    tracing::warn!(index, path = %path.display(), %err, "image failed to load");
                }
            }
        }
        out
    }

    /// Borrow this scene as compositor input.
    pub fn collage_input<'a>(
        &'a self,
        panels: &'a [PanelRect],
        images: &'a BTreeMap<usize, PreparedImage>,
    ) -> CollageInput<'a> {
        CollageInput {
            canvas: self.canvas(),
            panels,
            images,
            panel_images: &self.panel_images,
            transforms: &self.transforms,
            captions: &self.captions,
            default_caption: &self.default_caption,
            border: self.border(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
