#![forbid(unsafe_code)]

//! DOM-independent core of the Folio portfolio site.
//!
//! # Role in Folio
//! `folio-core` owns every piece of page state: the project catalog, the
//! tag filter and "load more" pager, the lightbox viewer, the contact form
//! helper and the math behind the cosmetic page effects. It never touches a
//! browser API, so all of it is tested natively.
//!
//! # How it fits in the system
//! `folio-web` reads the pre-rendered markup into a [`Catalog`], forwards
//! DOM events to a [`Gallery`] as [`GalleryEvent`]s and applies the
//! resulting [`GalleryFrame`] / [`LightboxFrame`] projections to surfaces
//! that implement [`GallerySurface`] / [`LightboxSurface`].

pub mod catalog;
pub mod config;
pub mod contact;
pub mod controller;
pub mod effects;
pub mod error;
pub mod lightbox;
pub mod pager;
pub mod render;
pub mod tags;

pub use catalog::{Catalog, CatalogItem, ItemId, ItemRecord};
pub use config::{ClassNames, FolioConfig, Selectors};
pub use controller::{Gallery, GalleryEvent, Redraw};
pub use error::{FolioError, Result};
pub use lightbox::{Lightbox, ViewerState};
pub use pager::{
    DEFAULT_PAGE_SIZE, FilterState, GalleryPager, LoadHint, PagerAffordances, TagFilter,
};
pub use render::{GalleryFrame, GallerySurface, LightboxFrame, LightboxSurface};
pub use tags::parse_tags;
