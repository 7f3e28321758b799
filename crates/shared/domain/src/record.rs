//! Shape shared by the module collections.

use uuid::Uuid;

/// An entity held in a module collection.
///
/// Every collection supports the same lifecycle: filtered listing, partial
/// update, a status toggle and removal by id.
pub trait Record: Clone + Send + Sync + 'static {
    /// Free-text search plus exact enum filters.
    type Filter: Send + Sync;
    /// Partial update; absent fields are left untouched.
    type Patch: Send;

    fn id(&self) -> Uuid;

    fn matches(&self, filter: &Self::Filter) -> bool;

    fn apply(&mut self, patch: Self::Patch);

    fn toggle_status(&mut self);
}

/// Case-insensitive substring test used by the search filters.
pub(crate) fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Normalized search term; `None` when there is nothing to search for.
pub(crate) fn search_term(search: &Option<String>) -> Option<String> {
    search
        .as_deref()
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_lowercase)
}

/// Treat blank optional text as absent.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
