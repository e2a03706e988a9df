// Template layout: content blocks, the shared paginator and the template
// registry that feeds it page capacities.

pub mod blocks;
pub mod handlers;
pub mod paginator;
pub mod templates;

use thiserror::Error;

pub use blocks::{ContentBlock, ContentBlockSource, TemplateContent};
pub use paginator::{paginate, ItemsPerPage, PageSet, Paginator};
pub use templates::{ExperienceLayout, TemplateDefinition, TemplateRegistry};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("items per page must be a positive integer, got {0}")]
    InvalidItemsPerPage(i64),

    #[error("template '{0}' is already registered")]
    DuplicateTemplate(String),

    #[error("unknown template '{0}'")]
    UnknownTemplate(String),
}
