//! Coarse collapse applied before re-evaluating a batch of stored
//! findings for one action: at most one `IpPermissions.*` result and
//! one `Tag.*` result survive per resource, regardless of how many
//! distinct rules/keys originally triggered them. This is deliberately
//! imprecise (an explicit Open Question resolution: keep the
//! original's behaviour rather than tracking every rule individually)
//! since re-describing the resource inside the firing loop recovers
//! the current true state anyway.

use common::CheckResult;
use std::collections::HashSet;

pub fn collapse(results: Vec<CheckResult>) -> Vec<CheckResult> {
    let mut seen_ip_permissions: HashSet<String> = HashSet::new();
    let mut seen_tag: HashSet<String> = HashSet::new();
    let mut out = Vec::with_capacity(results.len());

    for result in results {
        if result.is_ip_permissions_check() {
            if !seen_ip_permissions.insert(result.resource_id.clone()) {
                continue;
            }
        } else if result.is_tag_check() {
            if !seen_tag.insert(result.resource_id.clone()) {
                continue;
            }
        }
        out.push(result);
    }

    out
}
