//! Comparison of the declared requirements against the last installed snapshot

use std::collections::BTreeSet;

use crate::requirement::RequirementSet;

/// Whether the declared set differs from the snapshot in any name or specifier
pub fn changed(current: &RequirementSet, last: &RequirementSet) -> bool {
    current != last
}

/// Package names present in the snapshot but no longer declared
///
/// Callers must not rely on the iteration order.
pub fn removed(current: &RequirementSet, last: &RequirementSet) -> BTreeSet<String> {
    last.names()
        .filter(|name| !current.contains(name))
        .map(str::to_string)
        .collect()
}

/// Package names declared but not present in the snapshot
pub fn added(current: &RequirementSet, last: &RequirementSet) -> BTreeSet<String> {
    removed(last, current)
}
