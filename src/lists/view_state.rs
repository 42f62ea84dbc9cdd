//! View state and the controller that keeps it consistent.
//!
//! [`ViewState`] is a plain value holding everything the user can change.
//! [`recompute`] derives the ordered result set, page count and navigator
//! from it without side effects. [`ViewStateController`] owns a catalog
//! snapshot plus one `ViewState` and reruns the pipeline on every event.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use tracing::{debug, trace, warn};

use super::filter::{admit, BoundSide, FilterAttribute, FilterCriteria, FilterToggle};
use super::pagination::{window, PageWindow, PaginationConfig, PaginationState};
use super::sort::{sort_indices, SortAttribute, SortConfig};
use crate::catalog::Course;

/// Everything the user can change about the list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ViewState {
    pub criteria: FilterCriteria,
    pub sort: SortConfig,
    pub pagination: PaginationState,
}

impl ViewState {
    pub fn new(pagination: &PaginationConfig, sort: SortConfig) -> Self {
        Self {
            criteria: FilterCriteria::default(),
            sort,
            pagination: PaginationState::from_config(pagination),
        }
    }
}

/// User input events consumed by the view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ViewEvent {
    /// A bound field lost focus with this raw text
    SetBound {
        attribute: FilterAttribute,
        side: BoundSide,
        input: String,
    },
    /// A checkbox was toggled
    Toggle { toggle: FilterToggle },
    /// A column header was clicked
    SetSort { attribute: SortAttribute },
    /// A page size was picked
    SetPageSize { size: usize },
    /// A page label was clicked
    SetPageNumber { page: usize },
    /// Filters were cleared
    ResetFilters,
}

/// Everything derived from a view state and a catalog snapshot
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DerivedView {
    /// The state after the page-bounds clamp
    pub state: ViewState,
    /// Indices into the catalog of admitted courses, in display order
    pub ordered: Vec<usize>,
    pub total_pages: usize,
    pub window: PageWindow,
}

impl DerivedView {
    pub fn total_results(&self) -> usize {
        self.ordered.len()
    }

    /// Catalog indices for the current page
    pub fn visible_range(&self) -> Range<usize> {
        self.state.pagination.current_page_range(self.ordered.len())
    }

    /// Courses on the current page, in display order
    pub fn visible<'a>(&'a self, courses: &'a [Course]) -> impl Iterator<Item = &'a Course> + 'a {
        self.ordered[self.visible_range()]
            .iter()
            .map(move |index| &courses[*index])
    }

    /// One-based first and last result number shown, `None` when empty
    pub fn result_range(&self) -> Option<(usize, usize)> {
        let range = self.visible_range();
        if range.is_empty() {
            None
        } else {
            Some((range.start + 1, range.end))
        }
    }

    /// Move to another page without refiltering
    fn reslice(&mut self, page: usize) {
        self.state.pagination.page_number = page;
        self.state.pagination.clamp(self.ordered.len());
        self.window = window(self.total_pages, self.state.pagination.page_number);
    }
}

/// Filter and order the catalog, returning indices into `courses`
pub fn filter_and_sort(courses: &[Course], criteria: &FilterCriteria, sort: &SortConfig) -> Vec<usize> {
    let mut ordered: Vec<usize> = courses
        .iter()
        .enumerate()
        .filter(|(_, course)| admit(course, criteria))
        .map(|(index, _)| index)
        .collect();

    sort_indices(&mut ordered, courses, sort);
    ordered
}

/// Derive the visible view from a state and a catalog snapshot
pub fn recompute(state: &ViewState, courses: &[Course]) -> DerivedView {
    let ordered = filter_and_sort(courses, &state.criteria, &state.sort);

    let mut state = state.clone();
    if state.pagination.clamp(ordered.len()) {
        trace!(
            "Clamped page to {} for {} results",
            state.pagination.page_number,
            ordered.len()
        );
    }

    let total_pages = state.pagination.total_pages(ordered.len());
    let window = window(total_pages, state.pagination.page_number);

    DerivedView {
        state,
        ordered,
        total_pages,
        window,
    }
}

/// Owner of a catalog snapshot and the state of one list view
#[derive(Debug)]
pub struct ViewStateController {
    courses: Vec<Course>,
    config: PaginationConfig,
    derived: DerivedView,
}

impl ViewStateController {
    /// Create a controller with default filters, default sort and the
    /// smallest page size
    pub fn new(courses: Vec<Course>) -> Self {
        Self::with_config(courses, PaginationConfig::default(), SortConfig::default())
    }

    pub fn with_config(courses: Vec<Course>, config: PaginationConfig, sort: SortConfig) -> Self {
        let state = ViewState::new(&config, sort);
        let derived = recompute(&state, &courses);
        debug!(
            "Mounted view over {} courses ({} pages)",
            courses.len(),
            derived.total_pages
        );
        Self {
            courses,
            config,
            derived,
        }
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn state(&self) -> &ViewState {
        &self.derived.state
    }

    pub fn derived(&self) -> &DerivedView {
        &self.derived
    }

    pub fn pagination_config(&self) -> &PaginationConfig {
        &self.config
    }

    /// Courses on the current page
    pub fn visible(&self) -> Vec<&Course> {
        self.derived.visible(&self.courses).collect()
    }

    pub fn total_results(&self) -> usize {
        self.derived.total_results()
    }

    pub fn total_pages(&self) -> usize {
        self.derived.total_pages
    }

    pub fn current_page(&self) -> usize {
        self.derived.state.pagination.page_number
    }

    pub fn page_size(&self) -> usize {
        self.derived.state.pagination.page_size
    }

    pub fn window(&self) -> &PageWindow {
        &self.derived.window
    }

    pub fn result_range(&self) -> Option<(usize, usize)> {
        self.derived.result_range()
    }

    /// Apply one user-input event
    pub fn apply(&mut self, event: ViewEvent) {
        match event {
            ViewEvent::SetBound {
                attribute,
                side,
                input,
            } => self.set_bound(attribute, side, &input),
            ViewEvent::Toggle { toggle } => self.toggle(toggle),
            ViewEvent::SetSort { attribute } => self.set_sort(attribute),
            ViewEvent::SetPageSize { size } => {
                self.set_page_size(size);
            }
            ViewEvent::SetPageNumber { page } => self.set_page_number(page),
            ViewEvent::ResetFilters => self.reset_filters(),
        }
    }

    /// Set a min or max bound from raw input; unparsable input clears it
    pub fn set_bound(&mut self, attribute: FilterAttribute, side: BoundSide, input: &str) {
        let mut state = self.derived.state.clone();
        if state.criteria.set_bound(attribute, side, input) {
            debug!(
                "Filter {} {:?} set to {:?}",
                attribute,
                side,
                state.criteria.bounds(attribute)
            );
            self.refresh(state);
        }
    }

    pub fn toggle(&mut self, toggle: FilterToggle) {
        let mut state = self.derived.state.clone();
        state.criteria.toggle(toggle);
        debug!("Toggled {:?}", toggle);
        self.refresh(state);
    }

    /// Restore the default filter criteria
    pub fn reset_filters(&mut self) {
        if self.derived.state.criteria == FilterCriteria::default() {
            return;
        }
        let mut state = self.derived.state.clone();
        state.criteria = FilterCriteria::default();
        debug!("Filters reset");
        self.refresh(state);
    }

    /// Sort by `attribute`, flipping the direction if it is already the key
    pub fn set_sort(&mut self, attribute: SortAttribute) {
        let mut state = self.derived.state.clone();
        state.sort.select(attribute);
        debug!("Sorting by {} {}", state.sort.attribute, state.sort.direction);
        self.refresh(state);
    }

    /// Change the page size. Sizes outside the configured set are ignored.
    ///
    /// Returns whether the size was accepted.
    pub fn set_page_size(&mut self, size: usize) -> bool {
        if !self.config.allows(size) {
            warn!(
                "Ignoring page size {} (allowed: {:?})",
                size, self.config.available_page_sizes
            );
            return false;
        }
        let mut state = self.derived.state.clone();
        state.pagination.page_size = size;
        debug!("Page size set to {}", size);
        self.refresh(state);
        true
    }

    /// Jump to a page; out-of-range pages land on the last page
    pub fn set_page_number(&mut self, page: usize) {
        self.derived.reslice(page);
        trace!("Showing page {}", self.current_page());
    }

    /// Returns whether the page changed
    pub fn next_page(&mut self) -> bool {
        let current = self.current_page();
        if current + 1 < self.total_pages() {
            self.set_page_number(current + 1);
            true
        } else {
            false
        }
    }

    /// Returns whether the page changed
    pub fn previous_page(&mut self) -> bool {
        let current = self.current_page();
        if current > 0 {
            self.set_page_number(current - 1);
            true
        } else {
            false
        }
    }

    pub fn first_page(&mut self) {
        self.set_page_number(0);
    }

    pub fn last_page(&mut self) {
        self.set_page_number(self.total_pages().saturating_sub(1));
    }

    fn refresh(&mut self, state: ViewState) {
        self.derived = recompute(&state, &self.courses);
        debug!(
            "Recomputed view: {} of {} courses, page {}/{}",
            self.derived.total_results(),
            self.courses.len(),
            self.current_page() + 1,
            self.derived.total_pages.max(1)
        );
    }
}
