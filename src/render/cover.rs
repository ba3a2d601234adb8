use crate::{
    foundation::core::{Affine, Rect, Vec2},
    interaction::state::PanelTransform,
};

/// Scale at which an `image_w` x `image_h` image just covers `rect`.
pub fn cover_scale(image_w: f64, image_h: f64, rect: Rect) -> f64 {
    if image_w <= 0.0 || image_h <= 0.0 {
        return 1.0;
    }
    (rect.width() / image_w).max(rect.height() / image_h)
}

/// Image-space to surface-space mapping for a panel.
///
/// The image is centered on the panel (plus the panel translation), scaled to cover it, then
/// scaled again by the panel's user scale.
pub fn image_affine(image_w: f64, image_h: f64, rect: Rect, transform: &PanelTransform) -> Affine {
    let scale = cover_scale(image_w, image_h, rect) * transform.effective_scale();
    let center = rect.center().to_vec2() + Vec2::new(transform.translate_x, transform.translate_y);
    Affine::translate(center)
        * Affine::scale(scale)
        * Affine::translate(Vec2::new(-image_w * 0.5, -image_h * 0.5))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cover.rs"]
mod tests;
