//! Gallery controller: single owner of filter, pager and viewer state.
//!
//! The web layer registers its DOM subscriptions once at mount time and
//! translates each browser event into a [`GalleryEvent`]. [`Gallery::dispatch`]
//! applies the event synchronously and reports which projections need to be
//! re-applied.

use std::num::NonZeroUsize;

use crate::catalog::Catalog;
use crate::config::{DEFAULT_FALLBACK_ALT, FolioConfig};
use crate::error::Result;
use crate::lightbox::{DEFAULT_CANCEL_KEY, Lightbox};
use crate::pager::{GalleryPager, TagFilter};
use crate::render::{GalleryFrame, GallerySurface, LightboxFrame, LightboxSurface};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryEvent {
    /// A filter control was activated; carries its raw value.
    FilterSelected(String),
    LoadMore,
    /// A zoomable image inside the grid was activated.
    ImageActivated { src: String, alt: String },
    /// A backdrop or close button inside the lightbox was activated.
    CloseActivated,
    /// A key was pressed anywhere on the page (`KeyboardEvent.key`).
    KeyPressed(String),
}

/// Which projections changed after a dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Redraw {
    pub gallery: bool,
    pub lightbox: bool,
}

impl Redraw {
    const GALLERY: Self = Self {
        gallery: true,
        lightbox: false,
    };
    const LIGHTBOX: Self = Self {
        gallery: false,
        lightbox: true,
    };
    const NONE: Self = Self {
        gallery: false,
        lightbox: false,
    };

    #[must_use]
    pub const fn any(self) -> bool {
        self.gallery || self.lightbox
    }
}

#[derive(Debug, Clone)]
pub struct Gallery {
    pager: GalleryPager,
    lightbox: Lightbox,
    fallback_alt: String,
}

impl Gallery {
    pub fn new(catalog: Catalog, config: &FolioConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            pager: GalleryPager::new(catalog, config.page_size()?),
            lightbox: Lightbox::new(config.cancel_key.clone()),
            fallback_alt: config.fallback_alt.clone(),
        })
    }

    /// Default configuration with an explicit page size.
    #[must_use]
    pub fn with_page_size(catalog: Catalog, page_size: NonZeroUsize) -> Self {
        Self {
            pager: GalleryPager::new(catalog, page_size),
            lightbox: Lightbox::new(DEFAULT_CANCEL_KEY),
            fallback_alt: DEFAULT_FALLBACK_ALT.to_owned(),
        }
    }

    #[must_use]
    pub fn pager(&self) -> &GalleryPager {
        &self.pager
    }

    #[must_use]
    pub fn lightbox(&self) -> &Lightbox {
        &self.lightbox
    }

    pub fn dispatch(&mut self, event: GalleryEvent) -> Redraw {
        match event {
            GalleryEvent::FilterSelected(raw) => {
                self.pager.set_filter(TagFilter::parse(&raw));
                Redraw::GALLERY
            }
            GalleryEvent::LoadMore => {
                if self.pager.reveal_next_page() > 0 {
                    Redraw::GALLERY
                } else {
                    Redraw::NONE
                }
            }
            GalleryEvent::ImageActivated { src, alt } => {
                self.lightbox.open(src, alt);
                Redraw::LIGHTBOX
            }
            GalleryEvent::CloseActivated => {
                if self.lightbox.close() {
                    Redraw::LIGHTBOX
                } else {
                    Redraw::NONE
                }
            }
            GalleryEvent::KeyPressed(key) => {
                if self.lightbox.handle_key(&key) {
                    Redraw::LIGHTBOX
                } else {
                    Redraw::NONE
                }
            }
        }
    }

    #[must_use]
    pub fn frame(&self) -> GalleryFrame {
        GalleryFrame::from_pager(&self.pager)
    }

    #[must_use]
    pub fn lightbox_frame(&self) -> LightboxFrame {
        LightboxFrame::from_lightbox(&self.lightbox, &self.fallback_alt)
    }

    /// Apply whichever projections `redraw` marks as changed.
    pub fn render<G, L>(&self, redraw: Redraw, gallery: &mut G, lightbox: &mut L)
    where
        G: GallerySurface + ?Sized,
        L: LightboxSurface + ?Sized,
    {
        if redraw.gallery {
            self.frame().apply(gallery);
        }
        if redraw.lightbox {
            self.lightbox_frame().apply(lightbox);
        }
    }

    /// Apply both projections unconditionally (initial paint).
    pub fn render_all<G, L>(&self, gallery: &mut G, lightbox: &mut L)
    where
        G: GallerySurface + ?Sized,
        L: LightboxSurface + ?Sized,
    {
        self.render(
            Redraw {
                gallery: true,
                lightbox: true,
            },
            gallery,
            lightbox,
        );
    }
}
