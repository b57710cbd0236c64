use shelf_core::Locator;

/// Which published locators a subscription wants to hear about
///
/// A change published on a locator also concerns everything beneath it (a
/// collection-wide delete touches every item), so both `Node` and `Subtree`
/// match changes published on an ancestor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocatorFilter {
    /// Match every change
    All,

    /// Match this locator and changes on its ancestors
    Node(Locator),

    /// Match this locator, its ancestors and its descendants
    Subtree(Locator),

    /// Combine multiple filters with OR logic
    Or(Box<LocatorFilter>, Box<LocatorFilter>),
}

impl LocatorFilter {
    pub fn node(locator: Locator) -> Self {
        LocatorFilter::Node(locator)
    }

    pub fn subtree(locator: Locator) -> Self {
        LocatorFilter::Subtree(locator)
    }

    /// `Subtree` when `descendants` is set, `Node` otherwise
    pub fn watch(locator: Locator, descendants: bool) -> Self {
        if descendants {
            LocatorFilter::Subtree(locator)
        } else {
            LocatorFilter::Node(locator)
        }
    }

    /// Combine with another filter using OR logic
    pub fn or(self, other: LocatorFilter) -> Self {
        LocatorFilter::Or(Box::new(self), Box::new(other))
    }

    /// Check if a change published on `changed` matches this filter
    pub fn matches(&self, changed: &Locator) -> bool {
        match self {
            LocatorFilter::All => true,
            LocatorFilter::Node(watched) => {
                watched == changed || changed.is_ancestor_of(watched)
            }
            LocatorFilter::Subtree(watched) => {
                watched == changed
                    || changed.is_ancestor_of(watched)
                    || watched.is_ancestor_of(changed)
            }
            LocatorFilter::Or(f1, f2) => f1.matches(changed) || f2.matches(changed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_core::Router;

    fn router() -> Router {
        Router::new("com.example.android.inventory", "inventory")
    }

    #[test]
    fn test_node_filter() {
        let r = router();
        let filter = LocatorFilter::node(r.item_locator(1));

        assert!(filter.matches(&r.item_locator(1)));
        assert!(filter.matches(&r.collection_locator()));
        assert!(!filter.matches(&r.item_locator(2)));
    }

    #[test]
    fn test_node_filter_on_collection_ignores_items() {
        let r = router();
        let filter = LocatorFilter::node(r.collection_locator());

        assert!(filter.matches(&r.collection_locator()));
        assert!(!filter.matches(&r.item_locator(1)));
    }

    #[test]
    fn test_subtree_filter() {
        let r = router();
        let filter = LocatorFilter::subtree(r.collection_locator());

        assert!(filter.matches(&r.collection_locator()));
        assert!(filter.matches(&r.item_locator(1)));
        assert!(!filter.matches(&Router::new("other", "inventory").item_locator(1)));
    }

    #[test]
    fn test_or_filter() {
        let r = router();
        let filter =
            LocatorFilter::node(r.item_locator(1)).or(LocatorFilter::node(r.item_locator(2)));

        assert!(filter.matches(&r.item_locator(1)));
        assert!(filter.matches(&r.item_locator(2)));
        assert!(!filter.matches(&r.item_locator(3)));
    }
}
