//! Reconciles a freshly evaluated result set against what's already on
//! record for a resource. Grounded in the original `mergeWithCurrent`:
//! stored findings silently age out when a re-evaluation no longer
//! reproduces them (the rule that produced them was removed), fixed
//! findings are dropped, and only non-compliant results ever persist.

use common::CheckResult;

/// Merges `stored` (the current on-disk result set for a resource)
/// with `new` (the results of evaluating one API call against the
/// resource's current state), producing the result set that should
/// now be persisted.
///
/// - `IpPermissions.*` results have no durable identity beyond "this
///   rule currently exists". A stored one is dropped only when `new`
///   actually contains a fresh IP-permission scan (at least one
///   `IpPermissions.*` entry) that doesn't reproduce it — a `new` set
///   with no IP entries at all means this pass never re-described the
///   security group's rules, so an untouched stored rule must be kept
///   rather than dropped as if it had been removed.
/// - Every other stored result not touched by `new` is carried over
///   unchanged (it wasn't re-evaluated this pass).
/// - A stored result whose matching new evaluation is now compliant
///   is dropped (the underlying issue was fixed).
/// - Compliant new results are never persisted; only non-compliant
///   ones are, and only once per distinct check/value.
pub fn merge_with_current(stored: &[CheckResult], new: &[CheckResult]) -> Vec<CheckResult> {
    let mut merged = Vec::with_capacity(stored.len());
    let new_has_ip_permissions = new.iter().any(CheckResult::is_ip_permissions_check);

    for old in stored {
        if old.is_ip_permissions_check() {
            let still_present = new.iter().any(|n| n.is_same_check(old) && n.value == old.value);
            if new_has_ip_permissions && !still_present {
                continue; // the rule was scanned for and is no longer there
            }
            merged.push(old.clone());
            continue;
        }
        match new.iter().find(|n| n.is_same_check(old)) {
            Some(n) if n.is_compliant => continue,
            Some(_) => continue, // replaced by the matching entry from `new`
            None => merged.push(old.clone()),
        }
    }

    for n in new {
        if n.is_compliant {
            continue;
        }
        if merged.iter().any(|m| m.is_same_check_result(n)) {
            continue;
        }
        merged.push(n.clone());
    }

    merged
}
