use crate::foundation::{
    core::{Affine, Point, Rect, Vec2},
    math::lerp,
};

/// Default bottom anchor as a share of panel height (`pos_y == 0`).
pub const DEFAULT_BOTTOM: f64 = 0.95;
/// Extended bottom anchor as a share of panel height (`pos_y == -100`).
pub const EXTENDED_BOTTOM: f64 = 1.10;

/// Where a caption block sits inside its panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CaptionPlacement {
    /// Horizontal center of every line.
    pub center_x: f64,
    /// Bottom edge of the block.
    pub anchor_y: f64,
    /// Baseline of the first line.
    pub first_baseline: f64,
    /// Distance between baselines.
    pub line_height: f64,
    /// Total block height.
    pub block_height: f64,
    /// Rotation in degrees about [`CaptionPlacement::pivot`].
    pub rotation_deg: f64,
}

impl CaptionPlacement {
    /// Baseline of line `i`.
    pub fn baseline(&self, i: usize) -> f64 {
        self.first_baseline + i as f64 * self.line_height
    }

    /// Center of the caption block.
    pub fn pivot(&self) -> Point {
        Point::new(self.center_x, self.anchor_y - self.block_height * 0.5)
    }

    /// Rotation about the block center; identity when unrotated.
    pub fn transform(&self) -> Affine {
        if self.rotation_deg == 0.0 {
            return Affine::IDENTITY;
        }
        let pivot = self.pivot().to_vec2();
        Affine::translate(pivot)
            * Affine::rotate(self.rotation_deg.to_radians())
            * Affine::translate(-pivot)
    }
}

/// Bottom edge of the caption block for `pos_y` in `[-100, 100]`.
///
/// Non-positive values move from the default bottom anchor down to the extended one; positive
/// values move up until the block top meets the panel's top edge.
pub fn vertical_anchor(rect: Rect, pos_y: f64, block_height: f64) -> f64 {
    let h = rect.height();
    let default_bottom = rect.y0 + h * DEFAULT_BOTTOM;
    let pos_y = pos_y.clamp(-100.0, 100.0);
    if pos_y <= 0.0 {
        lerp(default_bottom, rect.y0 + h * EXTENDED_BOTTOM, -pos_y / 100.0)
    } else {
        let top = rect.y0 + block_height;
        lerp(default_bottom, top, pos_y / 100.0)
    }
}

/// Horizontal center of the caption for `pos_x` in `[-100, 100]`.
pub fn horizontal_center(rect: Rect, pos_x: f64, padding: f64) -> f64 {
    let reach = (rect.width() * 0.5 - padding).max(0.0);
    rect.center().x + pos_x.clamp(-100.0, 100.0) / 100.0 * reach
}

/// Place a block of `line_count` lines at `font_size` inside `rect`.
pub fn place_caption(
    rect: Rect,
    pos: Vec2,
    rotation_deg: f64,
    line_count: usize,
    font_size: f64,
    padding: f64,
) -> CaptionPlacement {
    let line_height = crate::text::fit::line_height(font_size);
    let block_height = line_count as f64 * line_height;
    let anchor_y = vertical_anchor(rect, pos.y, block_height);
    CaptionPlacement {
        center_x: horizontal_center(rect, pos.x, padding),
        anchor_y,
        first_baseline: anchor_y - block_height + line_height * 0.5,
        line_height,
        block_height,
        rotation_deg,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/anchor.rs"]
mod tests;
