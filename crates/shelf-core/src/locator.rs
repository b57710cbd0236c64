//! Resource locators and the routing table that classifies them.
//!
//! A locator names either the whole collection or one item:
//!
//! ```text
//! content://com.example.android.inventory/inventory       -> Route::Collection
//! content://com.example.android.inventory/inventory/42    -> Route::Item(42)
//! ```
//!
//! The `content://` prefix is optional when parsing. Anything else (another
//! authority, another collection, extra segments, a non-numeric id) fails to
//! classify with [`ShelfError::UnsupportedLocator`].

use crate::error::{Result, ShelfError};
use crate::types::ItemId;
use std::fmt;
use std::str::FromStr;

const SCHEME: &str = "content://";

/// A parsed resource locator: an authority plus path segments
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locator {
    authority: String,
    segments: Vec<String>,
}

impl Locator {
    pub fn new<I, S>(authority: impl Into<String>, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            authority: authority.into(),
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse `[content://]authority/segment/...`
    ///
    /// Empty segments are dropped, so a trailing slash is harmless.
    pub fn parse(raw: &str) -> Result<Self> {
        let rest = raw.strip_prefix(SCHEME).unwrap_or(raw);
        let mut parts = rest.split('/');
        let authority = parts.next().unwrap_or_default();
        if authority.is_empty() {
            return Err(ShelfError::unsupported(raw));
        }

        Ok(Self {
            authority: authority.to_string(),
            segments: parts
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        })
    }

    pub fn authority(&self) -> &str {
        &self.authority
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Locator with `id` appended as a trailing segment
    pub fn with_appended_id(&self, id: ItemId) -> Self {
        let mut child = self.clone();
        child.segments.push(id.to_string());
        child
    }

    /// True if `other` lies strictly beneath this locator
    pub fn is_ancestor_of(&self, other: &Locator) -> bool {
        self.authority == other.authority
            && other.segments.len() > self.segments.len()
            && other.segments.starts_with(&self.segments)
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", SCHEME, self.authority)?;
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

impl FromStr for Locator {
    type Err = ShelfError;

    fn from_str(s: &str) -> Result<Self> {
        Locator::parse(s)
    }
}

/// Operation class a locator resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// The whole collection
    Collection,
    /// One item, by its embedded id
    Item(ItemId),
}

/// Cardinality tag returned by [`Router::resource_type`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceType {
    /// Multi-row resource
    Collection { mime: String },
    /// Single-row resource
    Item { mime: String },
}

impl ResourceType {
    pub fn mime(&self) -> &str {
        match self {
            ResourceType::Collection { mime } | ResourceType::Item { mime } => mime,
        }
    }

    pub fn is_collection(&self) -> bool {
        matches!(self, ResourceType::Collection { .. })
    }
}

/// Immutable routing table for one authority/collection pair
///
/// Build it once at startup and hand it to the gateway.
#[derive(Debug, Clone)]
pub struct Router {
    authority: String,
    collection: String,
}

impl Router {
    pub fn new(authority: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            authority: authority.into(),
            collection: collection.into(),
        }
    }

    pub fn authority(&self) -> &str {
        &self.authority
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Classify a locator, extracting the item id when present
    pub fn classify(&self, locator: &Locator) -> Result<Route> {
        if locator.authority() != self.authority {
            return Err(ShelfError::unsupported(locator));
        }

        match locator.segments() {
            [collection] if *collection == self.collection => Ok(Route::Collection),
            [collection, id] if *collection == self.collection => parse_id(id)
                .map(Route::Item)
                .ok_or_else(|| ShelfError::unsupported(locator)),
            _ => Err(ShelfError::unsupported(locator)),
        }
    }

    /// Parse and classify in one step
    pub fn classify_str(&self, raw: &str) -> Result<(Locator, Route)> {
        let locator = Locator::parse(raw)?;
        let route = self.classify(&locator)?;
        Ok((locator, route))
    }

    pub fn collection_locator(&self) -> Locator {
        Locator::new(self.authority.clone(), [self.collection.clone()])
    }

    pub fn item_locator(&self, id: ItemId) -> Locator {
        self.collection_locator().with_appended_id(id)
    }

    /// Cardinality and MIME-style type for a locator
    pub fn resource_type(&self, locator: &Locator) -> Result<ResourceType> {
        let suffix = format!("{}/{}", self.authority, self.collection);
        Ok(match self.classify(locator)? {
            Route::Collection => ResourceType::Collection {
                mime: format!("vnd.android.cursor.dir/{}", suffix),
            },
            Route::Item(_) => ResourceType::Item {
                mime: format!("vnd.android.cursor.item/{}", suffix),
            },
        })
    }
}

/// Ids are non-negative decimal integers; signs and other characters are rejected.
fn parse_id(segment: &str) -> Option<ItemId> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn router() -> Router {
        Router::new("com.example.android.inventory", "inventory")
    }

    #[test]
    fn test_classify_collection() {
        let (_, route) = router()
            .classify_str("content://com.example.android.inventory/inventory")
            .unwrap();
        assert_eq!(route, Route::Collection);
    }

    #[test]
    fn test_classify_item() {
        let (_, route) = router()
            .classify_str("content://com.example.android.inventory/inventory/42")
            .unwrap();
        assert_eq!(route, Route::Item(42));
    }

    #[test]
    fn test_scheme_is_optional() {
        let (_, route) = router()
            .classify_str("com.example.android.inventory/inventory/7/")
            .unwrap();
        assert_eq!(route, Route::Item(7));
    }

    #[test]
    fn test_non_numeric_id_is_unsupported() {
        let err = router()
            .classify_str("content://com.example.android.inventory/inventory/abc")
            .unwrap_err();
        assert!(matches!(err, ShelfError::UnsupportedLocator(_)));
    }

    #[test]
    fn test_unknown_shapes_are_unsupported() {
        let r = router();
        for raw in [
            "",
            "content://",
            "content://other.authority/inventory",
            "content://com.example.android.inventory",
            "content://com.example.android.inventory/stock",
            "content://com.example.android.inventory/inventory/1/2",
            "content://com.example.android.inventory/inventory/-1",
            "content://com.example.android.inventory/inventory/+1",
            "content://com.example.android.inventory/inventory/99999999999999999999",
        ] {
            assert!(
                matches!(r.classify_str(raw), Err(ShelfError::UnsupportedLocator(_))),
                "expected {:?} to be unsupported",
                raw
            );
        }
    }

    #[test]
    fn test_item_locator_display() {
        let locator = router().item_locator(5);
        assert_eq!(
            locator.to_string(),
            "content://com.example.android.inventory/inventory/5"
        );
        assert_eq!(router().classify(&locator).unwrap(), Route::Item(5));
    }

    #[test]
    fn test_ancestry() {
        let r = router();
        assert!(r.collection_locator().is_ancestor_of(&r.item_locator(1)));
        assert!(!r.item_locator(1).is_ancestor_of(&r.collection_locator()));
        assert!(!r.collection_locator().is_ancestor_of(&r.collection_locator()));
    }

    #[test]
    fn test_resource_types() {
        let r = router();
        let dir = r.resource_type(&r.collection_locator()).unwrap();
        let item = r.resource_type(&r.item_locator(3)).unwrap();

        assert!(dir.is_collection());
        assert_eq!(
            dir.mime(),
            "vnd.android.cursor.dir/com.example.android.inventory/inventory"
        );
        assert!(!item.is_collection());
        assert_eq!(
            item.mime(),
            "vnd.android.cursor.item/com.example.android.inventory/inventory"
        );
    }
}
