//! Evaluates an action's `start_after`/`stop_after` time conditions
//! against how long a finding has been outstanding. The two are
//! independent gates: `start_after` delays firing, `stop_after` retires
//! the finding outright once it's stale enough that acting on it is no
//! longer useful.

use chrono::{DateTime, Utc};
use common::CheckResult;
use policy::Action;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeGate {
    /// Every `start_after` has elapsed and no `stop_after` has: fire.
    Ready,
    /// At least one `start_after` has not yet elapsed: wait.
    NotYet,
    /// At least one `stop_after` has elapsed: the finding is retired,
    /// not fired.
    Expired,
}

pub fn evaluate_time_conditions(action: &Action, result: &CheckResult, now: DateTime<Utc>) -> TimeGate {
    let age = now.signed_duration_since(result.creation_date);

    let mut ready = true;
    for cond in &action.condition {
        let Some(duration) = cond.value_duration else {
            continue;
        };
        match cond.kind.as_str() {
            "stop_after" if age >= duration => return TimeGate::Expired,
            "start_after" if age < duration => ready = false,
            _ => {}
        }
    }

    if ready {
        TimeGate::Ready
    } else {
        TimeGate::NotYet
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use common::EventUser;
    use policy::TimeCondition;

    fn result(age: Duration) -> CheckResult {
        CheckResult {
            is_compliant: false,
            policy_name: "default".into(),
            api_call_name: "CreateTags".into(),
            check_name: "Tag.Owner".into(),
            state_owner: String::new(),
            actions: vec![],
            event_user: EventUser::default(),
            event_type: "CreateTags".into(),
            value: String::new(),
            resource_id: "sg-1".into(),
            creation_date: Utc::now() - age,
        }
    }

    fn action_with(kind: &str, duration: Duration) -> Action {
        Action {
            name: "notify".into(),
            condition: vec![TimeCondition {
                name: "c".into(),
                kind: kind.into(),
                value: String::new(),
                value_duration: Some(duration),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn start_after_not_yet_elapsed_waits() {
        let action = action_with("start_after", Duration::hours(1));
        let gate = evaluate_time_conditions(&action, &result(Duration::minutes(10)), Utc::now());
        assert_eq!(gate, TimeGate::NotYet);
    }

    #[test]
    fn start_after_elapsed_is_ready() {
        let action = action_with("start_after", Duration::hours(1));
        let gate = evaluate_time_conditions(&action, &result(Duration::hours(2)), Utc::now());
        assert_eq!(gate, TimeGate::Ready);
    }

    #[test]
    fn stop_after_elapsed_expires_regardless_of_start_after() {
        let action = action_with("stop_after", Duration::hours(1));
        let gate = evaluate_time_conditions(&action, &result(Duration::hours(2)), Utc::now());
        assert_eq!(gate, TimeGate::Expired);
    }
}
