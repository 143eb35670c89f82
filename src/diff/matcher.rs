//! Identity matching between two snapshots of the same collection.

use std::collections::BTreeMap;

/// An entity that is matched across snapshots by a stable name.
pub trait Named {
    fn name(&self) -> &str;
}

/// Where a name from the key union was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matched<'a, T> {
    /// The name exists in both collections.
    Both(&'a T, &'a T),
    /// The name exists only in the first collection.
    OnlyBefore(&'a T),
    /// The name exists only in the second collection.
    OnlyAfter(&'a T),
}

/// Matches two collections by entity name.
///
/// Returns one entry per name in the union of both key sets, in
/// lexicographic order, so downstream output is reproducible across runs.
/// Duplicate names within one collection resolve to the last occurrence.
pub fn match_by_name<'a, T: Named>(
    before: &'a [T],
    after: &'a [T],
) -> Vec<(&'a str, Matched<'a, T>)> {
    let mut merged: BTreeMap<&str, Matched<'a, T>> = BTreeMap::new();
    for entity in before {
        merged.insert(entity.name(), Matched::OnlyBefore(entity));
    }
    for entity in after {
        let matched = match merged.get(entity.name()) {
            Some(Matched::OnlyBefore(b)) | Some(Matched::Both(b, _)) => {
                Matched::Both(*b, entity)
            }
            Some(Matched::OnlyAfter(_)) | None => Matched::OnlyAfter(entity),
        };
        merged.insert(entity.name(), matched);
    }
    merged.into_iter().collect()
}
