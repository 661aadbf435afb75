//! Events the pipeline must not react to. Order matters: the original
//! checked self-events first (cheapest and most common to filter),
//! then unhandled sources, then failed API calls, then unknown
//! accounts.

use crate::event::AuditEvent;
use common::Account;
use regex::Regex;

pub fn should_ignore(event: &AuditEvent, accounts: &[Account], global_session_default: Option<&str>) -> bool {
    if is_self_event(event, accounts, global_session_default) {
        return true;
    }
    if event.event_source != "ec2.amazonaws.com" {
        return true;
    }
    if event.error_code.is_some() {
        return true;
    }
    if !accounts.iter().any(|a| a.account_id == event.user_identity.account_id) {
        return true;
    }
    false
}

/// True when the event was produced by this pipeline's own assumed
/// role — acting on our own writes would loop forever.
fn is_self_event(event: &AuditEvent, accounts: &[Account], global_session_default: Option<&str>) -> bool {
    let Some(account) = accounts
        .iter()
        .find(|a| a.account_id == event.user_identity.account_id)
    else {
        return false;
    };
    let session = account.resolve_session_name(global_session_default);
    let Ok(session_re) = Regex::new(session) else {
        return false;
    };
    event.user_identity.arn.contains(&account.role_arn) && session_re.is_match(&event.user_identity.arn)
}
