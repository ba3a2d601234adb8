use std::collections::BTreeMap;

use crate::layout::{
    solver::{PanelRect, resolve_descriptor, resolve_panels},
    template::{GridTemplate, TemplateDescriptor},
};

/// Named grid templates addressable by template id.
#[derive(Clone, Debug, Default)]
pub struct TemplateRegistry {
    templates: BTreeMap<String, TemplateDescriptor>,
}

impl TemplateRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the built-in collage templates.
    pub fn builtin() -> Self {
        let mut reg = Self::new();
        reg.insert("single", TemplateDescriptor::plain("1fr", "1fr"));
        reg.insert("two-columns", TemplateDescriptor::plain("repeat(2)", "1fr"));
        reg.insert("two-rows", TemplateDescriptor::plain("1fr", "repeat(2)"));
        reg.insert("grid-2x2", TemplateDescriptor::plain("repeat(2)", "repeat(2)"));
        reg.insert("grid-3x3", TemplateDescriptor::plain("repeat(3)", "repeat(3)"));
        reg.insert("strip-3", TemplateDescriptor::plain("1fr", "repeat(3)"));
        reg.insert("strip-4", TemplateDescriptor::plain("1fr", "repeat(4)"));
        reg.insert(
            "feature-top",
            TemplateDescriptor::with_areas("1fr 1fr", "2fr 1fr", &["main main", "left right"]),
        );
        reg.insert(
            "feature-left",
            TemplateDescriptor::with_areas("2fr 1fr", "1fr 1fr", &["main top", "main bottom"]),
        );
        reg.insert(
            "feature-right",
            TemplateDescriptor::with_areas("1fr 2fr", "1fr 1fr", &["top main", "bottom main"]),
        );
        reg.insert(
            "mosaic-5",
            TemplateDescriptor::with_areas(
                "repeat(3)",
                "repeat(2)",
                &["hero hero a", "b c d"],
            ),
        );
        reg
    }

    /// Register or replace a template.
    pub fn insert(&mut self, id: impl Into<String>, desc: TemplateDescriptor) {
        self.templates.insert(id.into(), desc);
    }

    /// Look up a template descriptor.
    pub fn get(&self, id: &str) -> Option<&TemplateDescriptor> {
        self.templates.get(id)
    }

    /// Registered ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    /// Resolve template `id`; unknown ids use the square-root heuristic grid.
    pub fn resolve(
        &self,
        id: &str,
        width: f64,
        height: f64,
        panel_count: usize,
        gap: f64,
    ) -> Vec<PanelRect> {
        match self.get(id) {
            Some(desc) => resolve_descriptor(desc, width, height, panel_count, gap),
            None => {
                tracing::warn!(template = id, "unknown template id; using square-root grid");
                resolve_panels(
                    &GridTemplate::sqrt_heuristic(panel_count),
                    width,
                    height,
                    panel_count,
                    gap,
                )
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/registry.rs"]
mod tests;
