//! Property-based invariant tests for the gallery filter, pager and viewer.
//!
//! 1. Matching items are exactly the tagged items, in catalog order
//! 2. The "all" filter matches the whole catalog in order
//! 3. After a filter change, revealed == min(page_size, matching)
//! 4. Repeated reveals never exceed the matching count
//! 5. The visible slice is always a prefix of the matching items
//! 6. Empty state is shown iff nothing matches
//! 7. Load-more is shown iff items remain, with an exact hint
//! 8. Lightbox open overwrites and close is idempotent
//! 9. Projections are idempotent on a surface

use std::num::NonZeroUsize;

use folio_core::{
    Catalog, CatalogItem, GalleryFrame, GalleryPager, GallerySurface, ItemRecord, Lightbox,
    LoadHint, TagFilter, ViewerState,
};
use proptest::prelude::*;

// ── Helpers ──────────────────────────────────────────────────────────

const TAG_POOL: [&str; 5] = ["web", "rust", "design", "cli", "audio"];

fn record_strategy() -> impl Strategy<Value = ItemRecord> {
    (proptest::sample::subsequence(TAG_POOL.to_vec(), 0..=3), any::<bool>()).prop_map(
        |(tags, upper)| {
            let raw = tags.join(" ");
            let raw = if upper { raw.to_uppercase() } else { raw };
            ItemRecord::new(raw, "img.png", "")
        },
    )
}

fn catalog_strategy() -> impl Strategy<Value = Catalog> {
    prop::collection::vec(record_strategy(), 0..40).prop_map(Catalog::from_records)
}

fn filter_strategy() -> impl Strategy<Value = TagFilter> {
    prop_oneof![
        Just(TagFilter::All),
        proptest::sample::select(TAG_POOL.to_vec()).prop_map(TagFilter::parse),
    ]
}

fn page_size_strategy() -> impl Strategy<Value = NonZeroUsize> {
    (1usize..10).prop_map(|n| NonZeroUsize::new(n).expect("range excludes zero"))
}

fn ids<'a>(items: impl Iterator<Item = &'a CatalogItem>) -> Vec<usize> {
    items.map(|item| item.id().index()).collect()
}

#[derive(Default)]
struct CountingSurface {
    hidden: Vec<bool>,
    active: String,
    load_more: (bool, String),
    empty: bool,
}

impl GallerySurface for CountingSurface {
    fn set_item_hidden(&mut self, index: usize, hidden: bool) {
        if self.hidden.len() <= index {
            self.hidden.resize(index + 1, false);
        }
        self.hidden[index] = hidden;
    }

    fn set_active_filter(&mut self, label: &str) {
        self.active = label.to_owned();
    }

    fn set_load_more(&mut self, visible: bool, hint: &str) {
        self.load_more = (visible, hint.to_owned());
    }

    fn set_empty_state(&mut self, visible: bool) {
        self.empty = visible;
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 1–2. Matching items
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn matching_items_are_tagged_items_in_order(
        catalog in catalog_strategy(),
        filter in filter_strategy(),
        page_size in page_size_strategy(),
    ) {
        let expected: Vec<usize> = catalog
            .items()
            .iter()
            .filter(|item| match &filter {
                TagFilter::All => true,
                TagFilter::Tag(tag) => item.tags().contains(tag),
            })
            .map(|item| item.id().index())
            .collect();
        let mut pager = GalleryPager::new(catalog, page_size);
        pager.set_filter(filter);
        prop_assert_eq!(ids(pager.matching_items()), expected);
    }

    #[test]
    fn all_filter_matches_entire_catalog(catalog in catalog_strategy()) {
        let len = catalog.len();
        let pager = GalleryPager::new(catalog, NonZeroUsize::MIN);
        prop_assert_eq!(ids(pager.matching_items()), (0..len).collect::<Vec<_>>());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3–5. Reveal bookkeeping
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn filter_change_reveals_first_page(
        catalog in catalog_strategy(),
        filter in filter_strategy(),
        page_size in page_size_strategy(),
        extra_reveals in 0usize..5,
    ) {
        let mut pager = GalleryPager::new(catalog, page_size);
        for _ in 0..extra_reveals {
            pager.reveal_next_page();
        }
        pager.set_filter(filter);
        let matching = pager.matching_count();
        prop_assert_eq!(pager.revealed_count(), page_size.get().min(matching));
    }

    #[test]
    fn reveals_are_capped_and_monotonic(
        catalog in catalog_strategy(),
        filter in filter_strategy(),
        page_size in page_size_strategy(),
        reveals in 0usize..20,
    ) {
        let mut pager = GalleryPager::new(catalog, page_size);
        pager.set_filter(filter);
        let matching = pager.matching_count();
        let mut previous = pager.revealed_count();
        for _ in 0..reveals {
            let delta = pager.reveal_next_page();
            prop_assert!(delta <= page_size.get());
            prop_assert_eq!(pager.revealed_count(), previous + delta);
            prop_assert!(pager.revealed_count() <= matching);
            previous = pager.revealed_count();
        }
    }

    #[test]
    fn visible_slice_is_prefix_of_matching(
        catalog in catalog_strategy(),
        filter in filter_strategy(),
        page_size in page_size_strategy(),
        reveals in 0usize..6,
    ) {
        let mut pager = GalleryPager::new(catalog, page_size);
        pager.set_filter(filter);
        for _ in 0..reveals {
            pager.reveal_next_page();
        }
        let matching = ids(pager.matching_items());
        let visible = ids(pager.visible_slice());
        prop_assert_eq!(visible.len(), pager.revealed_count());
        prop_assert_eq!(&matching[..visible.len()], &visible[..]);

        let flags = pager.visibility();
        for (index, flag) in flags.iter().enumerate() {
            prop_assert_eq!(*flag, visible.contains(&index));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6–7. Affordances
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn affordances_follow_counts(
        catalog in catalog_strategy(),
        filter in filter_strategy(),
        page_size in page_size_strategy(),
        reveals in 0usize..6,
    ) {
        let mut pager = GalleryPager::new(catalog, page_size);
        pager.set_filter(filter);
        for _ in 0..reveals {
            pager.reveal_next_page();
        }
        let matching = pager.matching_count();
        let remaining = matching - pager.revealed_count();
        let affordances = pager.affordances();

        prop_assert_eq!(affordances.empty_visible, matching == 0);
        prop_assert_eq!(affordances.load_more_visible, remaining > 0);
        let hint = affordances.hint.to_string();
        match affordances.hint {
            LoadHint::Remaining(n) => {
                prop_assert_eq!(n, remaining);
                let noun = if n == 1 { "project" } else { "projects" };
                prop_assert_eq!(hint, format!("{n} more {noun} available"));
            }
            LoadHint::End => {
                prop_assert!(matching > 0);
                prop_assert_eq!(hint, "You've reached the end.");
            }
            LoadHint::Empty => {
                prop_assert_eq!(matching, 0);
                prop_assert!(hint.is_empty());
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 8. Lightbox
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn lightbox_last_open_wins(opens in prop::collection::vec(("[a-z]{1,8}", ".{0,8}"), 1..6)) {
        let mut lightbox = Lightbox::default();
        for (src, alt) in &opens {
            lightbox.open(src.clone(), alt.clone());
        }
        let (src, alt) = opens.last().expect("at least one open");
        prop_assert_eq!(
            lightbox.state(),
            &ViewerState::Open { image_src: src.clone(), image_alt: alt.clone() }
        );
        prop_assert!(lightbox.close());
        prop_assert!(!lightbox.close());
        prop_assert_eq!(lightbox.state(), &ViewerState::Closed);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 9. Projection idempotence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn gallery_projection_is_idempotent(
        catalog in catalog_strategy(),
        filter in filter_strategy(),
        page_size in page_size_strategy(),
    ) {
        let mut pager = GalleryPager::new(catalog, page_size);
        pager.set_filter(filter.clone());
        let frame = GalleryFrame::from_pager(&pager);
        let mut surface = CountingSurface::default();
        frame.apply(&mut surface);
        let first = (surface.hidden.clone(), surface.load_more.clone(), surface.empty);
        frame.apply(&mut surface);
        prop_assert_eq!(first, (surface.hidden.clone(), surface.load_more.clone(), surface.empty));
        prop_assert_eq!(surface.active.as_str(), filter.label());
        prop_assert_eq!(
            surface.hidden.iter().filter(|hidden| !**hidden).count(),
            pager.revealed_count()
        );
    }
}
