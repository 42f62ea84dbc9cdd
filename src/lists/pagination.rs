//! Pagination state and the windowed page-number display.
//!
//! Page numbers are zero-based everywhere in the engine; labels shown to the
//! user are one-based.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Page sizes offered to the user
pub const DEFAULT_PAGE_SIZES: [usize; 3] = [10, 25, 50];

/// Up to this many pages every page number is shown
const FULL_WINDOW_MAX_PAGES: usize = 7;

/// Pages shown in the leading or trailing run of a windowed navigator
const EDGE_RUN: usize = 5;

/// Pagination configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PaginationConfig {
    /// Available page sizes for user selection
    pub available_page_sizes: Vec<usize>,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            available_page_sizes: DEFAULT_PAGE_SIZES.to_vec(),
        }
    }
}

impl PaginationConfig {
    pub fn new(available_page_sizes: Vec<usize>) -> Self {
        Self { available_page_sizes }
    }

    /// Smallest available size, used as the initial page size
    pub fn default_page_size(&self) -> usize {
        self.available_page_sizes
            .iter()
            .copied()
            .filter(|size| *size > 0)
            .min()
            .unwrap_or(DEFAULT_PAGE_SIZES[0])
    }

    pub fn allows(&self, size: usize) -> bool {
        size > 0 && self.available_page_sizes.contains(&size)
    }
}

/// Page size and current page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationState {
    pub page_size: usize,
    pub page_number: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZES[0])
    }
}

impl PaginationState {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            page_number: 0,
        }
    }

    pub fn from_config(config: &PaginationConfig) -> Self {
        Self::new(config.default_page_size())
    }

    /// Page size used for arithmetic; a deserialized zero counts as one
    fn size(&self) -> usize {
        self.page_size.max(1)
    }

    /// Number of pages needed for `total_items`; zero when there are none
    pub fn total_pages(&self, total_items: usize) -> usize {
        total_items.div_ceil(self.size())
    }

    /// Highest page index that still starts inside `total_items`
    pub fn max_page(&self, total_items: usize) -> usize {
        self.total_pages(total_items).saturating_sub(1)
    }

    /// Whether `page_number * page_size < max(total_items, 1)` holds
    pub fn is_valid_for(&self, total_items: usize) -> bool {
        self.page_number <= self.max_page(total_items)
    }

    /// Move the current page down so it starts inside the result set.
    ///
    /// Returns whether the page number changed.
    pub fn clamp(&mut self, total_items: usize) -> bool {
        if self.is_valid_for(total_items) {
            return false;
        }
        self.page_number = self.max_page(total_items);
        true
    }

    /// Range of item indices for the current page
    pub fn current_page_range(&self, total_items: usize) -> Range<usize> {
        self.page_range(self.page_number, total_items)
    }

    /// Range of item indices for a specific page
    pub fn page_range(&self, page: usize, total_items: usize) -> Range<usize> {
        let start = page.saturating_mul(self.size()).min(total_items);
        let end = start.saturating_add(self.size()).min(total_items);
        start..end
    }
}

/// One element of the rendered page navigator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", content = "page", rename_all = "camelCase")]
pub enum PageLabel {
    /// Clickable zero-based page index
    Page(usize),
    /// Ellipsis between two non-adjacent groups
    Gap,
}

/// Groups of page indices to show, with a gap implied between groups
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PageWindow {
    pub groups: Vec<Vec<usize>>,
    pub current: usize,
}

impl PageWindow {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Flatten the groups into labels with explicit gaps
    pub fn labels(&self) -> Vec<PageLabel> {
        let mut labels = Vec::new();
        for (index, group) in self.groups.iter().enumerate() {
            if index > 0 {
                labels.push(PageLabel::Gap);
            }
            labels.extend(group.iter().map(|page| PageLabel::Page(*page)));
        }
        labels
    }
}

impl fmt::Display for PageWindow {
    /// Renders as `1 2 [3] 4 5 … 10`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .labels()
            .into_iter()
            .map(|label| match label {
                PageLabel::Page(page) if page == self.current => format!("[{}]", page + 1),
                PageLabel::Page(page) => (page + 1).to_string(),
                PageLabel::Gap => "…".to_string(),
            })
            .collect();
        f.write_str(&rendered.join(" "))
    }
}

/// Compute the abbreviated page navigator for `total_pages` pages.
///
/// The thresholds reproduce the historical navigator exactly, including the
/// uneven shapes they give near the boundaries.
pub fn window(total_pages: usize, page_number: usize) -> PageWindow {
    let groups = if total_pages == 0 {
        Vec::new()
    } else if total_pages <= FULL_WINDOW_MAX_PAGES {
        vec![(0..total_pages).collect()]
    } else if page_number <= 3 {
        vec![(0..EDGE_RUN).collect(), vec![total_pages - 1]]
    } else if total_pages.saturating_sub(page_number) <= 4 {
        vec![vec![0], (total_pages - EDGE_RUN..total_pages).collect()]
    } else {
        vec![
            vec![0],
            vec![page_number - 1, page_number, page_number + 1],
            vec![total_pages - 1],
        ]
    };

    PageWindow {
        groups,
        current: page_number,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_small_total_is_single_group() {
        assert_eq!(window(5, 2).groups, vec![vec![0, 1, 2, 3, 4]]);
        assert_eq!(window(7, 6).groups, vec![vec![0, 1, 2, 3, 4, 5, 6]]);
        assert_eq!(window(1, 0).groups, vec![vec![0]]);
    }

    #[test]
    fn test_window_near_start() {
        assert_eq!(window(10, 1).groups, vec![vec![0, 1, 2, 3, 4], vec![9]]);
        assert_eq!(window(10, 3).groups, vec![vec![0, 1, 2, 3, 4], vec![9]]);
    }

    #[test]
    fn test_window_near_end() {
        assert_eq!(window(10, 8).groups, vec![vec![0], vec![5, 6, 7, 8, 9]]);
        assert_eq!(window(10, 6).groups, vec![vec![0], vec![5, 6, 7, 8, 9]]);
    }

    #[test]
    fn test_window_middle() {
        assert_eq!(window(10, 5).groups, vec![vec![0], vec![4, 5, 6], vec![9]]);
    }

    #[test]
    fn test_window_boundary_shapes() {
        // historical behavior at nine pages, kept as-is
        assert_eq!(window(9, 3).groups, vec![vec![0, 1, 2, 3, 4], vec![8]]);
        assert_eq!(window(9, 4).groups, vec![vec![0], vec![3, 4, 5], vec![8]]);
        assert_eq!(window(9, 5).groups, vec![vec![0], vec![4, 5, 6, 7, 8]]);
        assert_eq!(window(8, 4).groups, vec![vec![0], vec![3, 4, 5, 6, 7]]);
    }

    #[test]
    fn test_window_zero_pages() {
        let w = window(0, 0);
        assert!(w.is_empty());
        assert!(w.labels().is_empty());
        assert_eq!(w.to_string(), "");
    }

    #[test]
    fn test_labels_and_display() {
        let w = window(10, 5);
        assert_eq!(
            w.labels(),
            vec![
                PageLabel::Page(0),
                PageLabel::Gap,
                PageLabel::Page(4),
                PageLabel::Page(5),
                PageLabel::Page(6),
                PageLabel::Gap,
                PageLabel::Page(9),
            ]
        );
        assert_eq!(w.to_string(), "1 … 5 [6] 7 … 10");
    }

    #[test]
    fn test_total_pages_and_ranges() {
        let state = PaginationState::new(10);
        assert_eq!(state.total_pages(0), 0);
        assert_eq!(state.total_pages(1), 1);
        assert_eq!(state.total_pages(20), 2);
        assert_eq!(state.total_pages(23), 3);
        assert_eq!(state.page_range(2, 23), 20..23);
        assert_eq!(state.page_range(5, 23), 23..23);
    }

    #[test]
    fn test_clamp() {
        let mut state = PaginationState::new(10);
        state.page_number = 2;
        assert!(!state.clamp(23));
        assert!(state.clamp(15));
        assert_eq!(state.page_number, 1);

        // exact multiple: the last full page, not one past it
        state.page_number = 3;
        assert!(state.clamp(20));
        assert_eq!(state.page_number, 1);

        state.page_number = 4;
        assert!(state.clamp(0));
        assert_eq!(state.page_number, 0);
        assert!(state.is_valid_for(0));
    }

    #[test]
    fn test_huge_page_number_clamps_without_overflow() {
        let mut state = PaginationState::new(10);
        for page in [usize::MAX, usize::MAX / 2, 1844674407370955162] {
            state.page_number = page;
            assert!(!state.is_valid_for(23));
            assert!(state.clamp(23));
            assert_eq!(state.page_number, 2);
            assert_eq!(state.current_page_range(23), 20..23);
        }
        assert_eq!(state.page_range(usize::MAX, 23), 23..23);
    }

    #[test]
    fn test_zero_page_size_from_serde_is_treated_as_one() {
        let mut state: PaginationState =
            serde_json::from_str(r#"{"pageSize": 0, "pageNumber": 3}"#).unwrap();
        assert_eq!(state.total_pages(5), 5);
        assert_eq!(state.max_page(5), 4);
        assert!(!state.clamp(5));
        assert_eq!(state.current_page_range(5), 3..4);
        assert!(state.clamp(2));
        assert_eq!(state.page_number, 1);
    }

    #[test]
    fn test_config_default_size_is_smallest() {
        let config = PaginationConfig::new(vec![50, 25, 100]);
        assert_eq!(config.default_page_size(), 25);
        assert!(config.allows(50));
        assert!(!config.allows(10));
        assert_eq!(PaginationState::from_config(&config).page_size, 25);
        assert_eq!(PaginationConfig::default().default_page_size(), 10);
    }
}
