//! Identifier helpers shared by the registry and the transport layer.

/// Delimiter used when shipping photo-id lists to the backend.
pub const ID_LIST_DELIMITER: char = ',';

/// Join photo ids into the delimited form the asset endpoints expect.
pub fn join_ids<S: AsRef<str>>(ids: &[S]) -> String {
    ids.iter()
        .map(|id| id.as_ref())
        .collect::<Vec<_>>()
        .join(&ID_LIST_DELIMITER.to_string())
}

/// Split a delimited id list, dropping empty segments.
pub fn split_ids(joined: &str) -> Vec<String> {
    joined
        .split(ID_LIST_DELIMITER)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

/// Drop duplicate ids, keeping the first occurrence's position.
pub fn dedupe_preserving_order(ids: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}
