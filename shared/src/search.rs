use crate::listing::City;

/// Trim and lowercase a search box entry.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Exact, case-insensitive title match. The first city wins on duplicates.
/// Blank queries never match.
pub fn find_city<'a>(cities: &'a [City], query: &str) -> Option<&'a City> {
    let needle = normalize_query(query);
    if needle.is_empty() {
        return None;
    }
    cities
        .iter()
        .find(|city| city.title.trim().to_lowercase() == needle)
}
