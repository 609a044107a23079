//! The fixed, ordered set of gallery items.
//!
//! A [`Catalog`] is built once from the pre-rendered project cards and is
//! never mutated afterwards. Item order is the pagination order.

use std::collections::BTreeSet;

use crate::tags::parse_tags;

/// Position of an item in its catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(usize);

impl ItemId {
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Raw card data as read from markup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemRecord {
    /// Whitespace-separated `data-tags` attribute value.
    pub tags: String,
    pub image_src: String,
    pub image_alt: String,
}

impl ItemRecord {
    #[must_use]
    pub fn new(
        tags: impl Into<String>,
        image_src: impl Into<String>,
        image_alt: impl Into<String>,
    ) -> Self {
        Self {
            tags: tags.into(),
            image_src: image_src.into(),
            image_alt: image_alt.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogItem {
    id: ItemId,
    tags: BTreeSet<String>,
    image_src: String,
    image_alt: String,
}

impl CatalogItem {
    #[must_use]
    pub const fn id(&self) -> ItemId {
        self.id
    }

    #[must_use]
    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    #[must_use]
    pub fn image_src(&self) -> &str {
        &self.image_src
    }

    #[must_use]
    pub fn image_alt(&self) -> &str {
        &self.image_alt
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    /// Build a catalog from card records, assigning ids by position.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = ItemRecord>,
    {
        let items = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| CatalogItem {
                id: ItemId(index),
                tags: parse_tags(&record.tags),
                image_src: record.image_src,
                image_alt: record.image_alt,
            })
            .collect();
        Self { items }
    }

    #[must_use]
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&CatalogItem> {
        self.items.get(id.0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Union of every item's tags, sorted.
    #[must_use]
    pub fn known_tags(&self) -> BTreeSet<&str> {
        self.items
            .iter()
            .flat_map(|item| item.tags.iter().map(String::as_str))
            .collect()
    }
}
