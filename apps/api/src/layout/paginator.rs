//! Template Paginator: splits an ordered list of content blocks into
//! fixed-capacity pages.
//!
//! # Guarantees
//! - Block order is preserved and every block lands on exactly one page.
//! - A page is never empty; zero blocks yields zero pages.
//! - Capacity is validated up front; `paginate` itself cannot fail.

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::layout::blocks::{ContentBlock, ContentBlockSource, TemplateContent};
use crate::layout::templates::ExperienceLayout;
use crate::layout::LayoutError;
use crate::models::ResumeRecord;

/// A validated, strictly positive page capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "usize")]
pub struct ItemsPerPage(NonZeroUsize);

impl ItemsPerPage {
    /// Rejects zero and negative values.
    pub fn new(value: i64) -> Result<Self, LayoutError> {
        usize::try_from(value)
            .ok()
            .and_then(NonZeroUsize::new)
            .map(Self)
            .ok_or(LayoutError::InvalidItemsPerPage(value))
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl TryFrom<i64> for ItemsPerPage {
    type Error = LayoutError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ItemsPerPage> for usize {
    fn from(value: ItemsPerPage) -> Self {
        value.get()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// 1-based.
    pub number: usize,
    pub blocks: Vec<ContentBlock>,
    /// "Page X of Y".
    pub footer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSet {
    pub page_count: usize,
    pub items_per_page: usize,
    pub pages: Vec<Page>,
}

impl PageSet {
    pub fn block_count(&self) -> usize {
        self.pages.iter().map(|p| p.blocks.len()).sum()
    }

    pub fn page_sizes(&self) -> Vec<usize> {
        self.pages.iter().map(|p| p.blocks.len()).collect()
    }
}

/// Splits `items` into consecutive chunks of at most `capacity` items.
///
/// Keeps a running page buffer and counter. When the counter reaches the
/// capacity the buffer is flushed as a page before the next item is added.
/// A non-empty buffer left at the end becomes the final page.
pub fn partition<T>(items: impl IntoIterator<Item = T>, capacity: ItemsPerPage) -> Vec<Vec<T>> {
    let capacity = capacity.get();
    let mut pages = Vec::new();
    let mut current = Vec::new();
    let mut count = 0usize;

    for item in items {
        if count == capacity {
            pages.push(std::mem::take(&mut current));
            count = 0;
        }
        current.push(item);
        count += 1;
    }

    if !current.is_empty() {
        pages.push(current);
    }
    pages
}

/// The single paginator shared by every template.
#[derive(Debug, Clone, Copy)]
pub struct Paginator {
    items_per_page: ItemsPerPage,
}

impl Paginator {
    pub fn new(items_per_page: ItemsPerPage) -> Self {
        Self { items_per_page }
    }

    pub fn paginate(&self, source: &dyn ContentBlockSource) -> PageSet {
        let chunks = partition(source.content_blocks(), self.items_per_page);
        let page_count = chunks.len();
        let pages = chunks
            .into_iter()
            .enumerate()
            .map(|(i, blocks)| {
                let kinds: Vec<&str> = blocks.iter().map(ContentBlock::kind).collect();
                trace!(page = i + 1, ?kinds, "page filled");
                Page {
                    number: i + 1,
                    blocks,
                    footer: format!("Page {} of {}", i + 1, page_count),
                }
            })
            .collect();

        PageSet {
            page_count,
            items_per_page: self.items_per_page.get(),
            pages,
        }
    }
}

/// Paginates a record with per-entry experience blocks at the given capacity.
pub fn paginate(record: &ResumeRecord, items_per_page: i64) -> Result<PageSet, LayoutError> {
    let capacity = ItemsPerPage::new(items_per_page)?;
    let content = TemplateContent::with_layout(record, ExperienceLayout::PerEntry);
    Ok(Paginator::new(capacity).paginate(&content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Certification, ExperienceEntry};

    fn summary_blocks(n: usize) -> Vec<ContentBlock> {
        (0..n).map(|i| ContentBlock::Summary(i.to_string())).collect()
    }

    fn cap(n: i64) -> ItemsPerPage {
        ItemsPerPage::new(n).unwrap()
    }

    #[test]
    fn test_thirteen_blocks_at_five_per_page() {
        let set = Paginator::new(cap(5)).paginate(&summary_blocks(13));
        assert_eq!(set.page_count, 3);
        assert_eq!(set.page_sizes(), vec![5, 5, 3]);

        let flattened: Vec<ContentBlock> =
            set.pages.iter().flat_map(|p| p.blocks.clone()).collect();
        assert_eq!(flattened, summary_blocks(13));
    }

    #[test]
    fn test_zero_blocks_gives_zero_pages() {
        let set = Paginator::new(cap(5)).paginate(&Vec::new());
        assert_eq!(set.page_count, 0);
        assert!(set.pages.is_empty());
    }

    #[test]
    fn test_exact_multiple_has_no_trailing_empty_page() {
        let set = Paginator::new(cap(6)).paginate(&summary_blocks(12));
        assert_eq!(set.page_sizes(), vec![6, 6]);
    }

    #[test]
    fn test_capacity_one_puts_each_block_on_its_own_page() {
        assert_eq!(partition(0..3, cap(1)), vec![vec![0], vec![1], vec![2]]);
    }

    #[test]
    fn test_zero_or_negative_capacity_is_rejected() {
        assert_eq!(
            ItemsPerPage::new(0).unwrap_err(),
            LayoutError::InvalidItemsPerPage(0)
        );
        assert_eq!(
            ItemsPerPage::new(-3).unwrap_err(),
            LayoutError::InvalidItemsPerPage(-3)
        );
        assert!(matches!(
            paginate(&ResumeRecord::default(), 0),
            Err(LayoutError::InvalidItemsPerPage(0))
        ));
    }

    #[test]
    fn test_footer_labels_and_numbers() {
        let set = Paginator::new(cap(2)).paginate(&summary_blocks(5));
        let footers: Vec<&str> = set.pages.iter().map(|p| p.footer.as_str()).collect();
        assert_eq!(footers, vec!["Page 1 of 3", "Page 2 of 3", "Page 3 of 3"]);
        assert_eq!(set.pages[2].number, 3);
    }

    #[test]
    fn test_paginate_record_conserves_blocks() {
        let record = ResumeRecord {
            experience: vec![ExperienceEntry::default(); 7],
            certifications: vec![Certification::default(); 2],
            ..Default::default()
        };
        // header + summary + 7 experience + skills + 2 certifications
        let set = paginate(&record, 5).unwrap();
        assert_eq!(set.block_count(), 12);
        assert_eq!(set.page_sizes(), vec![5, 5, 2]);
        assert_eq!(set.pages[0].blocks[0].kind(), "header");
        assert_eq!(set.pages[2].blocks[1].kind(), "certification");
    }

    #[test]
    fn test_huge_capacity_puts_everything_on_one_page() {
        let set = paginate(&ResumeRecord::default(), i64::MAX).unwrap();
        assert_eq!(set.page_count, 1);
        // header + summary + skills
        assert_eq!(set.page_sizes(), vec![3]);
        assert_eq!(partition(0..4, cap(i64::MAX)), vec![vec![0, 1, 2, 3]]);
    }

    #[test]
    fn test_present_role_prints_blank_end_date() {
        let record = ResumeRecord {
            experience: vec![ExperienceEntry {
                end_date: "2021".to_string(),
                is_present: true,
                ..Default::default()
            }],
            ..Default::default()
        };
        let set = paginate(&record, 5).unwrap();
        match &set.pages[0].blocks[2] {
            ContentBlock::Experience(entry) => {
                assert_eq!(entry.end_date, "");
                assert!(entry.is_present);
            }
            other => panic!("expected experience block, got {}", other.kind()),
        }
        // the stored record keeps its value
        assert_eq!(record.experience[0].end_date, "2021");
    }

    #[test]
    fn test_items_per_page_deserialization_validates() {
        assert!(serde_json::from_str::<ItemsPerPage>("0").is_err());
        assert_eq!(serde_json::from_str::<ItemsPerPage>("6").unwrap().get(), 6);
    }
}
