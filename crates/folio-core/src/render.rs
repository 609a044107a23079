//! Pure projections of gallery and lightbox state onto a page surface.
//!
//! A frame is computed from controller state alone and applying it twice
//! leaves the surface unchanged. Surfaces never report state back.

use crate::lightbox::Lightbox;
use crate::pager::GalleryPager;

/// Page-side collaborator for the gallery grid and its controls.
///
/// Implementations whose optional elements are missing (no load-more button,
/// no empty-state block) skip the corresponding update.
pub trait GallerySurface {
    fn set_item_hidden(&mut self, index: usize, hidden: bool);

    /// Mark the filter control whose value equals `label` active and every
    /// other control inactive.
    fn set_active_filter(&mut self, label: &str);

    fn set_load_more(&mut self, visible: bool, hint: &str);

    fn set_empty_state(&mut self, visible: bool);
}

/// Page-side collaborator for the modal viewer.
pub trait LightboxSurface {
    fn show_image(&mut self, src: &str, alt: &str);

    /// Hide the modal and clear its image source.
    fn hide(&mut self);

    fn set_scroll_locked(&mut self, locked: bool);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryFrame {
    /// Hidden flag per catalog item, in catalog order.
    pub item_hidden: Vec<bool>,
    pub active_filter: String,
    pub load_more_visible: bool,
    pub hint: String,
    pub empty_visible: bool,
}

impl GalleryFrame {
    #[must_use]
    pub fn from_pager(pager: &GalleryPager) -> Self {
        let affordances = pager.affordances();
        Self {
            item_hidden: pager.visibility().into_iter().map(|v| !v).collect(),
            active_filter: pager.active_filter().label().to_owned(),
            load_more_visible: affordances.load_more_visible,
            hint: affordances.hint.to_string(),
            empty_visible: affordances.empty_visible,
        }
    }

    pub fn apply<S: GallerySurface + ?Sized>(&self, surface: &mut S) {
        for (index, &hidden) in self.item_hidden.iter().enumerate() {
            surface.set_item_hidden(index, hidden);
        }
        surface.set_active_filter(&self.active_filter);
        surface.set_load_more(self.load_more_visible, &self.hint);
        surface.set_empty_state(self.empty_visible);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightboxFrame {
    /// `(src, displayed alt)` while open.
    pub image: Option<(String, String)>,
    pub scroll_locked: bool,
}

impl LightboxFrame {
    /// Project the viewer, substituting `fallback_alt` for an empty alt text.
    #[must_use]
    pub fn from_lightbox(lightbox: &Lightbox, fallback_alt: &str) -> Self {
        let image = lightbox.state().image().map(|(src, alt)| {
            let alt = if alt.is_empty() { fallback_alt } else { alt };
            (src.to_owned(), alt.to_owned())
        });
        Self {
            image,
            scroll_locked: lightbox.scroll_locked(),
        }
    }

    pub fn apply<S: LightboxSurface + ?Sized>(&self, surface: &mut S) {
        match &self.image {
            Some((src, alt)) => surface.show_image(src, alt),
            None => surface.hide(),
        }
        surface.set_scroll_locked(self.scroll_locked);
    }
}


#[cfg(test)]
mod tests {
    use super::testing::MemorySurface;
    use super::*;
    use crate::catalog::{Catalog, ItemRecord};
    use crate::pager::{DEFAULT_PAGE_SIZE, TagFilter};
    use pretty_assertions::assert_eq;

    fn pager() -> GalleryPager {
        let catalog = Catalog::from_records([
            ItemRecord::new("web", "0.png", "zero"),
            ItemRecord::new("cli", "1.png", "one"),
            ItemRecord::new("web cli", "2.png", "two"),
        ]);
        GalleryPager::new(catalog, DEFAULT_PAGE_SIZE)
    }

    #[test]
    fn gallery_frame_reflects_filter() {
        let mut pager = pager();
        pager.set_filter(TagFilter::parse("cli"));
        let frame = GalleryFrame::from_pager(&pager);
        assert_eq!(
            frame,
            GalleryFrame {
                item_hidden: vec![true, false, false],
                active_filter: "cli".to_owned(),
                load_more_visible: false,
                hint: "You've reached the end.".to_owned(),
                empty_visible: false,
            }
        );
    }

    #[test]
    fn applying_twice_is_idempotent() {
        let mut pager = pager();
        pager.set_filter(TagFilter::parse("web"));
        let frame = GalleryFrame::from_pager(&pager);
        let mut surface = MemorySurface::default();
        frame.apply(&mut surface);
        let once = surface.clone();
        frame.apply(&mut surface);
        assert_eq!(surface, once);
        assert_eq!(surface.hidden, vec![false, true, false]);
        assert_eq!(surface.active_filter.as_deref(), Some("web"));
    }

    #[test]
    fn lightbox_frame_uses_fallback_alt() {
        let mut lightbox = Lightbox::default();
        lightbox.open("a.png", "");
        let frame = LightboxFrame::from_lightbox(&lightbox, "Zoomed");
        assert_eq!(frame.image, Some(("a.png".to_owned(), "Zoomed".to_owned())));
        assert!(frame.scroll_locked);
    }

    #[test]
    fn closed_lightbox_hides_and_unlocks() {
        let mut surface = MemorySurface::default();
        let mut lightbox = Lightbox::default();
        lightbox.open("a.png", "A");
        LightboxFrame::from_lightbox(&lightbox, "x").apply(&mut surface);
        assert!(surface.lightbox_open);
        assert!(surface.scroll_locked);

        lightbox.close();
        LightboxFrame::from_lightbox(&lightbox, "x").apply(&mut surface);
        assert!(!surface.lightbox_open);
        assert_eq!(surface.lightbox_image, None);
        assert!(!surface.scroll_locked);
    }
}
