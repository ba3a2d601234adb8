use std::collections::BTreeMap;

use crate::foundation::error::{PanelGridError, PanelGridResult};

/// Upper bound on tracks per axis after `repeat` expansion.
pub const MAX_TRACKS: usize = 1024;

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Authoring form of a grid template, using CSS-grid-like track strings.
///
/// ```text
/// columns: "1fr 2fr"            rows: "repeat(2, 1fr)"
/// areas:   ["main main", "left right"]
/// ```
#[serde(rename_all = "camelCase")]
pub struct TemplateDescriptor {
    /// Column track list (`"1fr 1fr"`, `"repeat(3)"`, `"2 1"`).
    pub columns: String,
    /// Row track list.
    pub rows: String,
    /// Optional area-assignment matrix, one string per row, names separated by whitespace.
    /// A `.` marks an unassigned cell.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub areas: Option<Vec<String>>,
    /// Optional explicit panel order over area names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_order: Option<Vec<String>>,
}

impl TemplateDescriptor {
    /// Descriptor for a plain grid with the given track strings.
    pub fn plain(columns: impl Into<String>, rows: impl Into<String>) -> Self {
        Self {
            columns: columns.into(),
            rows: rows.into(),
            areas: None,
            area_order: None,
        }
    }

    /// Descriptor with a named-area matrix.
    pub fn with_areas(
        columns: impl Into<String>,
        rows: impl Into<String>,
        areas: &[&str],
    ) -> Self {
        Self {
            columns: columns.into(),
            rows: rows.into(),
            areas: Some(areas.iter().map(|s| s.to_string()).collect()),
            area_order: None,
        }
    }
}

/// Cell span of a named area. Ends are exclusive track indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GridArea {
    /// First row index covered.
    pub row_start: usize,
    /// One past the last row index covered.
    pub row_end: usize,
    /// First column index covered.
    pub col_start: usize,
    /// One past the last column index covered.
    pub col_end: usize,
}

/// Parsed grid template: positive track weights plus an optional named-area lookup table.
#[derive(Clone, Debug, PartialEq)]
pub struct GridTemplate {
    /// Column weights, all `> 0`.
    pub column_sizes: Vec<f64>,
    /// Row weights, all `> 0`.
    pub row_sizes: Vec<f64>,
    /// Area name to cell span.
    pub area_map: Option<BTreeMap<String, GridArea>>,
    /// Panel order over area names.
    pub area_order: Option<Vec<String>>,
}

impl GridTemplate {
    /// Plain template from raw weights; non-positive or non-finite weights become 1.
    pub fn from_weights(columns: Vec<f64>, rows: Vec<f64>) -> Self {
        Self {
            column_sizes: columns.into_iter().map(coerce_weight).collect(),
            row_sizes: rows.into_iter().map(coerce_weight).collect(),
            area_map: None,
            area_order: None,
        }
    }

    /// Equal-weight plain grid.
    pub fn uniform(columns: usize, rows: usize) -> Self {
        Self::from_weights(vec![1.0; columns.max(1)], vec![1.0; rows.max(1)])
    }

    /// Square-root heuristic grid for `panel_count` panels: `ceil(sqrt(n))` columns.
    pub fn sqrt_heuristic(panel_count: usize) -> Self {
        let n = panel_count.max(1);
        let cols = (n as f64).sqrt().ceil() as usize;
        let rows = n.div_ceil(cols);
        Self::uniform(cols, rows)
    }

    /// Parse an authoring descriptor.
    pub fn parse(desc: &TemplateDescriptor) -> PanelGridResult<Self> {
        let mut column_sizes = parse_track_list(&desc.columns)?;
        let mut row_sizes = parse_track_list(&desc.rows)?;

        let Some(area_rows) = &desc.areas else {
            return Ok(Self {
                column_sizes,
                row_sizes,
                area_map: None,
                area_order: None,
            });
        };

        let (map, order, matrix_rows, matrix_cols) = parse_area_matrix(area_rows)?;
        if let Some(explicit) = &desc.area_order {
            check_area_order(explicit)?;
        }
        // Areas reaching past the declared tracks get implicit weight-1 tracks.
        if column_sizes.len() < matrix_cols {
            column_sizes.resize(matrix_cols, 1.0);
        }
        if row_sizes.len() < matrix_rows {
            row_sizes.resize(matrix_rows, 1.0);
        }

        Ok(Self {
            column_sizes,
            row_sizes,
            area_map: Some(map),
            area_order: Some(desc.area_order.clone().unwrap_or(order)),
        })
    }

    /// Whether this template places panels by named areas.
    pub fn has_areas(&self) -> bool {
        self.area_map.as_ref().is_some_and(|m| !m.is_empty())
    }

    /// Panel order over named areas: `area_order` when set, otherwise row-major by each area's
    /// top-left cell. `None` for plain grids.
    pub fn ordered_area_names(&self) -> Option<Vec<String>> {
        let map = self.area_map.as_ref()?;
        if let Some(order) = &self.area_order {
            return Some(order.clone());
        }
        let mut names: Vec<(&String, &GridArea)> = map.iter().collect();
        names.sort_by(|(na, a), (nb, b)| {
            (a.row_start, a.col_start, na).cmp(&(b.row_start, b.col_start, nb))
        });
        Some(names.into_iter().map(|(name, _)| name.clone()).collect())
    }

    /// Number of panels the template declares (areas, or cells for plain grids).
    pub fn declared_panels(&self) -> usize {
        match (&self.area_map, &self.area_order) {
            (Some(_), Some(order)) => order.len(),
            (Some(map), None) => map.len(),
            _ => self.column_sizes.len() * self.row_sizes.len(),
        }
    }
}

fn coerce_weight(w: f64) -> f64 {
    if w.is_finite() && w > 0.0 { w } else { 1.0 }
}

/// Parse a whitespace-separated track list into positive weights.
///
/// Accepted tokens: `Nfr`, bare numbers `N`, `auto` (weight 1), and
/// `repeat(count)` / `repeat(count, <track list>)`. Non-positive numbers are coerced to 1;
/// anything else is a template error.
pub fn parse_track_list(src: &str) -> PanelGridResult<Vec<f64>> {
    let mut out = Vec::new();
    for token in split_tokens(src)? {
        parse_track_token(token, &mut out)?;
    }
    if out.is_empty() {
        return Err(PanelGridError::template(format!(
            "track list '{src}' declares no tracks"
        )));
    }
    if out.len() > MAX_TRACKS {
        return Err(PanelGridError::template(format!(
            "track list '{src}' exceeds {MAX_TRACKS} tracks"
        )));
    }
    Ok(out)
}

fn parse_track_token(token: &str, out: &mut Vec<f64>) -> PanelGridResult<()> {
    if let Some(rest) = token.strip_prefix("repeat(") {
        let inner = rest
            .strip_suffix(')')
            .ok_or_else(|| PanelGridError::template(format!("unterminated '{token}'")))?;
        let (count_src, body) = match inner.split_once(',') {
            Some((c, b)) => (c.trim(), Some(b.trim())),
            None => (inner.trim(), None),
        };
        let count: usize = count_src.parse().map_err(|_| {
            PanelGridError::template(format!("invalid repeat count in '{token}'"))
        })?;
        if count == 0 {
            return Err(PanelGridError::template(format!(
                "repeat count must be > 0 in '{token}'"
            )));
        }
        let pattern = match body {
            Some(b) => parse_track_list(b)?,
            None => vec![1.0],
        };
        let total = count
            .checked_mul(pattern.len())
            .and_then(|n| n.checked_add(out.len()))
            .filter(|&n| n <= MAX_TRACKS)
            .ok_or_else(|| {
                PanelGridError::template(format!("'{token}' exceeds {MAX_TRACKS} tracks"))
            })?;
        out.reserve(total - out.len());
        for _ in 0..count {
            out.extend_from_slice(&pattern);
        }
        return Ok(());
    }

    if token.eq_ignore_ascii_case("auto") {
        out.push(1.0);
        return Ok(());
    }

    let number = token.strip_suffix("fr").unwrap_or(token);
    let w: f64 = number
        .parse()
        .map_err(|_| PanelGridError::template(format!("unparsable track size '{token}'")))?;
    if !(w.is_finite() && w > 0.0) {
        tracing::debug!(token, "non-positive track weight coerced to 1");
    }
    out.push(coerce_weight(w));
    Ok(())
}

/// Split on whitespace outside parentheses.
fn split_tokens(src: &str) -> PanelGridResult<Vec<&str>> {
    let mut tokens = Vec::new();
    let mut depth = 0usize;
    let mut start: Option<usize> = None;
    for (i, ch) in src.char_indices() {
        match ch {
            '(' => {
                depth += 1;
                start.get_or_insert(i);
            }
            ')' => {
                depth = depth.checked_sub(1).ok_or_else(|| {
                    PanelGridError::template(format!("unbalanced ')' in '{src}'"))
                })?;
            }
            c if c.is_whitespace() && depth == 0 => {
                if let Some(s) = start.take() {
                    tokens.push(&src[s..i]);
                }
            }
            _ => {
                start.get_or_insert(i);
            }
        }
    }
    if depth != 0 {
        return Err(PanelGridError::template(format!(
            "unbalanced '(' in '{src}'"
        )));
    }
    if let Some(s) = start {
        tokens.push(&src[s..]);
    }
    Ok(tokens)
}

type AreaScan = (BTreeMap<String, GridArea>, Vec<String>, usize, usize);

fn check_area_order(order: &[String]) -> PanelGridResult<()> {
    let mut seen = std::collections::BTreeSet::new();
    for name in order {
        if !seen.insert(name.as_str()) {
            return Err(PanelGridError::template(format!(
                "area '{name}' appears twice in area order"
            )));
        }
    }
    Ok(())
}

/// One pass over the matrix collecting min/max row and column per name, then a check that
/// every area fills its bounding box.
fn parse_area_matrix(rows: &[String]) -> PanelGridResult<AreaScan> {
    let mut map = BTreeMap::<String, GridArea>::new();
    let mut order = Vec::<String>::new();
    let mut width: Option<usize> = None;
    let matrix: Vec<Vec<&str>> = rows.iter().map(|r| r.split_whitespace().collect()).collect();

    for (r, names) in matrix.iter().enumerate() {
        match width {
            None => width = Some(names.len()),
            Some(w) if w != names.len() => {
                return Err(PanelGridError::template(format!(
                    "area row {r} has {} cells, expected {w}",
                    names.len()
                )));
            }
            Some(_) => {}
        }
        for (c, &name) in names.iter().enumerate() {
            if name == "." {
                continue;
            }
            match map.get_mut(name) {
                Some(area) => {
                    area.row_start = area.row_start.min(r);
                    area.row_end = area.row_end.max(r + 1);
                    area.col_start = area.col_start.min(c);
                    area.col_end = area.col_end.max(c + 1);
                }
                None => {
                    map.insert(
                        name.to_string(),
                        GridArea {
                            row_start: r,
                            row_end: r + 1,
                            col_start: c,
                            col_end: c + 1,
                        },
                    );
                    order.push(name.to_string());
                }
            }
        }
    }

    let cols = width.unwrap_or(0);
    if rows.is_empty() || cols == 0 {
        return Err(PanelGridError::template("area matrix is empty"));
    }
    if rows.len() > MAX_TRACKS || cols > MAX_TRACKS {
        return Err(PanelGridError::template(format!(
            "area matrix exceeds {MAX_TRACKS} tracks"
        )));
    }

    for (name, area) in &map {
        let filled = (area.row_start..area.row_end)
            .all(|r| {
                (area.col_start..area.col_end)
                    .all(|c| matrix.get(r).and_then(|row| row.get(c)) == Some(&name.as_str()))
            });
        if !filled {
            return Err(PanelGridError::template(format!(
                "area '{name}' is not a rectangle"
            )));
        }
    }
    Ok((map, order, rows.len(), cols))
}

#[cfg(test)]
#[path = "../../tests/unit/layout/template.rs"]
mod tests;
