use std::collections::BTreeSet;

use crate::{
    foundation::core::{PanelId, Point, Rect},
    layout::template::{GridArea, GridTemplate, TemplateDescriptor},
};

/// Resolved panel rectangle in output pixel space.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PanelRect {
    /// Panel identifier.
    pub id: PanelId,
    /// Panel index in resolution order.
    pub index: usize,
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width, never negative.
    pub width: f64,
    /// Height, never negative.
    pub height: f64,
}

impl PanelRect {
    /// The rectangle as a `kurbo::Rect`.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Rectangle center.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Half-open containment test: left/top edges inside, right/bottom edges outside.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.x + self.width && p.y >= self.y && p.y < self.y + self.height
    }

    /// Pixel area.
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// Find the panel containing `p`. Panels never overlap, so the first hit is the only hit.
pub fn hit_test(panels: &[PanelRect], p: Point) -> Option<&PanelRect> {
    panels.iter().find(|r| r.contains(p))
}

#[derive(Clone, Copy, Debug)]
struct Track {
    start: f64,
    size: f64,
}

/// Lay out one axis. Outer padding equals one gap.
fn solve_axis(weights: &[f64], extent: f64, gap: f64) -> Vec<Track> {
    let n = weights.len();
    let total = weights.iter().sum::<f64>();
    let total = if total > 0.0 { total } else { 1.0 };
    let available = extent - 2.0 * gap;
    let unit = ((available - gap * n.saturating_sub(1) as f64) / total).max(0.0);

    let mut tracks = Vec::with_capacity(n);
    let mut pos = gap;
    for &w in weights {
        let size = w * unit;
        tracks.push(Track { start: pos, size });
        pos += size + gap;
    }
    tracks
}

/// Origin and extent of tracks `start..end`, internal gaps included.
fn span(tracks: &[Track], start: usize, end: usize) -> Option<(f64, f64)> {
    if start >= end {
        return None;
    }
    let first = tracks.get(start)?;
    let last = tracks.get(end - 1)?;
    Some((first.start, last.start + last.size - first.start))
}

/// Resolve a parsed template into panel rectangles.
///
/// Rectangles are recomputed from scratch on every call; identical inputs always produce identical
/// output. A zero panel count yields an empty list.
#[tracing::instrument(skip(template))]
pub fn resolve_panels(
    template: &GridTemplate,
    width: f64,
    height: f64,
    panel_count: usize,
    gap: f64,
) -> Vec<PanelRect> {
    if panel_count == 0 || !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0)
    {
        return Vec::new();
    }
    let gap = if gap.is_finite() { gap.max(0.0) } else { 0.0 };

    let (Some(map), Some(order)) = (&template.area_map, template.ordered_area_names()) else {
        return resolve_plain(template, width, height, panel_count, gap);
    };
    if order.is_empty() {
        return resolve_plain(template, width, height, panel_count, gap);
    }

    let areas: Option<Vec<(&String, GridArea)>> = order
        .iter()
        .map(|name| map.get(name).map(|a| (name, *a)))
        .collect();
    let unique = order.iter().collect::<BTreeSet<_>>().len() == order.len();
    match areas {
        Some(areas) if unique => {
            if let Some(out) = resolve_areas(template, &areas, width, height, panel_count, gap) {
                return out;
            }
            tracing::warn!("area span exceeds template tracks; using uniform grid division");
        }
        Some(_) => tracing::warn!("area order repeats an area; using uniform grid division"),
        None => tracing::warn!("area order names an undeclared area; using uniform grid division"),
    }

    let uniform = GridTemplate::uniform(template.column_sizes.len(), template.row_sizes.len());
    resolve_plain(&uniform, width, height, panel_count, gap)
}

fn resolve_areas(
    template: &GridTemplate,
    areas: &[(&String, GridArea)],
    width: f64,
    height: f64,
    panel_count: usize,
    gap: f64,
) -> Option<Vec<PanelRect>> {
    let cols = solve_axis(&template.column_sizes, width, gap);
    let rows = solve_axis(&template.row_sizes, height, gap);

    areas
        .iter()
        .take(panel_count)
        .enumerate()
        .map(|(index, (name, area))| {
            let (x, w) = span(&cols, area.col_start, area.col_end)?;
            let (y, h) = span(&rows, area.row_start, area.row_end)?;
            Some(PanelRect {
                id: PanelId((*name).clone()),
                index,
                x,
                y,
                width: w,
                height: h,
            })
        })
        .collect()
}

fn resolve_plain(
    template: &GridTemplate,
    width: f64,
    height: f64,
    panel_count: usize,
    gap: f64,
) -> Vec<PanelRect> {
    let col_count = template.column_sizes.len().max(1);
    let mut row_sizes = template.row_sizes.clone();
    let needed_rows = panel_count.div_ceil(col_count);
    if row_sizes.len() < needed_rows {
        // Implicit rows, as in CSS grid auto-placement.
        row_sizes.resize(needed_rows, 1.0);
    }

    let cols = if template.column_sizes.is_empty() {
        solve_axis(&[1.0], width, gap)
    } else {
        solve_axis(&template.column_sizes, width, gap)
    };
    let rows = solve_axis(&row_sizes, height, gap);

    (0..panel_count)
        .map(|index| {
            let c = cols[index % col_count];
            let r = rows[index / col_count];
            PanelRect {
                id: PanelId::for_index(index),
                index,
                x: c.start,
                y: r.start,
                width: c.size,
                height: r.size,
            }
        })
        .collect()
}

/// Parse `desc` and resolve it, falling back to the square-root heuristic grid when the
/// descriptor is malformed. Never fails.
pub fn resolve_descriptor(
    desc: &TemplateDescriptor,
    width: f64,
    height: f64,
    panel_count: usize,
    gap: f64,
) -> Vec<PanelRect> {
    let template = match GridTemplate::parse(desc) {
        Ok(t) => t,
        Err(err) => {
            tracing::warn!(%err, "malformed grid template; using square-root grid");
            GridTemplate::sqrt_heuristic(panel_count)
        }
    };
    resolve_panels(&template, width, height, panel_count, gap)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/solver.rs"]
mod tests;
