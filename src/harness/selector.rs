//! User backend filter.

/// Separator between a backend family and the database it wraps (`multi_chert`, `remoteprog_flint`).
pub const FAMILY_SEPARATOR: char = '_';

/// Decide whether `backend_name` should be exercised under `filter`.
///
/// - An empty filter selects every backend.
/// - A backend whose name equals the filter is selected.
/// - A compound backend `<family>_<database>` is selected when the filter names its family (`remoteprog` selects
///   `remoteprog_chert`) or its database (`chert` selects `multi_chert`).
///
/// Matching is on whole `_`-separated parts only, so `chert` never selects `chertx`.
///
/// The database rule extends plain prefix matching: under a prefix-only rule `chert` would select `chert` alone and
/// never `multi_chert` or `remotetcp_chert`.
pub fn selected(backend_name: &str, filter: &str) -> bool {
    if filter.is_empty() {
        return true;
    }
    if backend_name == filter {
        return true;
    }
    let family_member = backend_name
        .strip_prefix(filter)
        .is_some_and(|rest| rest.starts_with(FAMILY_SEPARATOR));
    let wraps_filter = backend_name
        .strip_suffix(filter)
        .is_some_and(|rest| rest.ends_with(FAMILY_SEPARATOR));
    family_member || wraps_filter
}
