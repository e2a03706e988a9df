//! Visual template registry. Each template only decides its page capacity
//! and how experience entries become blocks; pagination itself is shared.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::layout::paginator::ItemsPerPage;
use crate::layout::LayoutError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExperienceLayout {
    /// One block per experience entry.
    #[default]
    PerEntry,
    /// The whole experience section as a single block.
    Grouped,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDefinition {
    pub id: String,
    pub name: String,
    pub items_per_page: ItemsPerPage,
    pub experience_layout: ExperienceLayout,
}

/// (id, display name, items per page, experience layout)
const BUILTIN_TEMPLATES: &[(&str, &str, i64, ExperienceLayout)] = &[
    ("modern", "Modern", 6, ExperienceLayout::PerEntry),
    ("classic", "Classic", 5, ExperienceLayout::Grouped),
    ("creative", "Creative", 5, ExperienceLayout::PerEntry),
    ("professional", "Professional", 6, ExperienceLayout::PerEntry),
    ("minimal", "Minimal", 6, ExperienceLayout::PerEntry),
];

#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: Vec<TemplateDefinition>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-loaded with the five shipped templates.
    pub fn with_builtin() -> Result<Self, LayoutError> {
        let mut registry = Self::new();
        for (id, name, items_per_page, layout) in BUILTIN_TEMPLATES {
            registry.register(id, name, *items_per_page, *layout)?;
        }
        Ok(registry)
    }

    pub fn register(
        &mut self,
        id: &str,
        name: &str,
        items_per_page: i64,
        experience_layout: ExperienceLayout,
    ) -> Result<&TemplateDefinition, LayoutError> {
        let items_per_page = ItemsPerPage::new(items_per_page)?;
        if self.get(id).is_some() {
            return Err(LayoutError::DuplicateTemplate(id.to_string()));
        }

        debug!(template = id, items_per_page = items_per_page.get(), "template registered");
        self.templates.push(TemplateDefinition {
            id: id.to_string(),
            name: name.to_string(),
            items_per_page,
            experience_layout,
        });
        let index = self.templates.len() - 1;
        Ok(&self.templates[index])
    }

    pub fn get(&self, id: &str) -> Option<&TemplateDefinition> {
        self.templates.iter().find(|t| t.id == id)
    }

    pub fn require(&self, id: &str) -> Result<&TemplateDefinition, LayoutError> {
        self.get(id)
            .ok_or_else(|| LayoutError::UnknownTemplate(id.to_string()))
    }

    pub fn list(&self) -> &[TemplateDefinition] {
        &self.templates
    }
}
