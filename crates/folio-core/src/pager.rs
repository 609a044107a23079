//! Tag filtering and "load more" pagination over a [`Catalog`].
//!
//! [`GalleryPager`] is the single owner of [`FilterState`]. Every operation
//! keeps two invariants:
//! - the visible items are always a prefix of the matching items, in catalog
//!   order, of length `revealed_count`;
//! - `revealed_count` never exceeds the number of matching items and only
//!   grows until the filter changes, which resets it to the first page.

use std::fmt;
use std::num::NonZeroUsize;

use tracing::{debug, trace};

use crate::catalog::{Catalog, CatalogItem, ItemId};

/// Items revealed per "load more" activation when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(6) {
    Some(size) => size,
    None => unreachable!(),
};

/// Active tag filter: every item, or items carrying one tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum TagFilter {
    #[default]
    All,
    Tag(String),
}

impl TagFilter {
    /// Control value that selects [`TagFilter::All`].
    pub const ALL_LABEL: &'static str = "all";

    /// Interpret a filter control's value.
    ///
    /// The value is trimmed and lowercased; `"all"` and blank values select
    /// every item.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let label = raw.trim().to_lowercase();
        if label.is_empty() || label == Self::ALL_LABEL {
            Self::All
        } else {
            Self::Tag(label)
        }
    }

    /// The control value this filter corresponds to.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::All => Self::ALL_LABEL,
            Self::Tag(tag) => tag,
        }
    }

    #[must_use]
    pub fn matches(&self, item: &CatalogItem) -> bool {
        match self {
            Self::All => true,
            Self::Tag(tag) => item.has_tag(tag),
        }
    }
}

impl From<&str> for TagFilter {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl fmt::Display for TagFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    active: TagFilter,
    revealed: usize,
}

impl FilterState {
    #[must_use]
    pub fn active(&self) -> &TagFilter {
        &self.active
    }

    #[must_use]
    pub const fn revealed_count(&self) -> usize {
        self.revealed
    }
}

/// Hint text shown next to the "load more" control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadHint {
    /// More matching items are still hidden.
    Remaining(usize),
    /// Every matching item is revealed.
    End,
    /// The filter matches nothing.
    Empty,
}

impl fmt::Display for LoadHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remaining(1) => f.write_str("1 more project available"),
            Self::Remaining(n) => write!(f, "{n} more projects available"),
            Self::End => f.write_str("You've reached the end."),
            Self::Empty => Ok(()),
        }
    }
}

/// Derived UI affordances after a filter or reveal operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagerAffordances {
    pub load_more_visible: bool,
    pub hint: LoadHint,
    pub empty_visible: bool,
}

#[derive(Debug, Clone)]
pub struct GalleryPager {
    catalog: Catalog,
    page_size: NonZeroUsize,
    state: FilterState,
}

impl GalleryPager {
    /// Create a pager showing the first page of the whole catalog.
    #[must_use]
    pub fn new(catalog: Catalog, page_size: NonZeroUsize) -> Self {
        let mut pager = Self {
            catalog,
            page_size,
            state: FilterState::default(),
        };
        pager.set_filter(TagFilter::All);
        pager
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    #[must_use]
    pub fn state(&self) -> &FilterState {
        &self.state
    }

    #[must_use]
    pub fn active_filter(&self) -> &TagFilter {
        &self.state.active
    }

    #[must_use]
    pub const fn revealed_count(&self) -> usize {
        self.state.revealed
    }

    /// Switch the active filter and reveal its first page.
    ///
    /// Returns the number of items revealed.
    pub fn set_filter(&mut self, filter: TagFilter) -> usize {
        debug!(filter = %filter, "gallery filter changed");
        self.state.active = filter;
        self.state.revealed = 0;
        self.reveal_next_page()
    }

    /// Catalog items matching the active filter, in catalog order.
    pub fn matching_items(&self) -> impl Iterator<Item = &CatalogItem> + '_ {
        let filter = &self.state.active;
        self.catalog
            .items()
            .iter()
            .filter(move |item| filter.matches(item))
    }

    #[must_use]
    pub fn matching_count(&self) -> usize {
        self.matching_items().count()
    }

    /// Reveal up to one more page of matching items.
    ///
    /// Returns the number of newly revealed items; zero once every matching
    /// item is visible.
    pub fn reveal_next_page(&mut self) -> usize {
        let matching = self.matching_count();
        let before = self.state.revealed;
        let after = before.saturating_add(self.page_size.get()).min(matching);
        if after == before {
            trace!(revealed = before, matching, "reveal at cap; nothing to do");
            return 0;
        }
        self.state.revealed = after;
        debug!(revealed = after, matching, "revealed next gallery page");
        after - before
    }

    /// The visible prefix of [`Self::matching_items`].
    pub fn visible_slice(&self) -> impl Iterator<Item = &CatalogItem> + '_ {
        self.matching_items().take(self.state.revealed)
    }

    /// Per-item visibility in catalog order.
    #[must_use]
    pub fn visibility(&self) -> Vec<bool> {
        let mut visible = vec![false; self.catalog.len()];
        for item in self.visible_slice() {
            visible[item.id().index()] = true;
        }
        visible
    }

    #[must_use]
    pub fn is_visible(&self, id: ItemId) -> bool {
        self.visible_slice().any(|item| item.id() == id)
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.matching_count() - self.state.revealed
    }

    #[must_use]
    pub fn affordances(&self) -> PagerAffordances {
        let matching = self.matching_count();
        let remaining = matching - self.state.revealed;
        let hint = if remaining > 0 {
            LoadHint::Remaining(remaining)
        } else if matching > 0 {
            LoadHint::End
        } else {
            LoadHint::Empty
        };
        PagerAffordances {
            load_more_visible: remaining > 0,
            hint,
            empty_visible: matching == 0,
        }
    }
}
