use crate::condition::conditions_satisfied;
use chrono::Utc;
use common::{CheckResult, EventUser};
use policy::{ApiCall, CompliancePolicy};
use resource::Resource;
use tracing::warn;

/// Evaluates every `compliant` check of one `api_call` block against
/// one described resource, returning zero or more results — zero when
/// every check's `condition` gate is unmet, one per scalar property,
/// or one per `IpPermissions` rule when the check targets that
/// multi-valued property.
pub fn evaluate_api_call(
    policy: &CompliancePolicy,
    api_call: &ApiCall,
    resource: &Resource,
    event_user: &EventUser,
    event_type: &str,
) -> Vec<CheckResult> {
    let mut results = Vec::new();

    for check in &api_call.compliant {
        if !conditions_satisfied(&check.condition, resource) {
            continue;
        }

        let values = resource.property(&check.name);

        if values.is_empty() {
            // Open question, resolved: a non-mandatory check whose
            // property is simply absent from the resource emits
            // nothing — only a *mandatory* missing property is itself
            // a finding.
            if check.mandatory {
                results.push(CheckResult {
                    is_compliant: false,
                    policy_name: policy.name.clone(),
                    api_call_name: api_call.name.clone(),
                    check_name: check.name.clone(),
                    state_owner: check.state_owner.clone(),
                    actions: check.actions.clone(),
                    event_user: event_user.clone(),
                    event_type: event_type.to_string(),
                    value: String::new(),
                    resource_id: resource.id.clone(),
                    creation_date: Utc::now(),
                });
            }
            continue;
        }

        let regex = match regex::Regex::new(&check.schema) {
            Ok(re) => Some(re),
            Err(e) => {
                // The original treats an unparsable schema as always
                // compliant rather than blocking evaluation of the
                // resource's other checks; preserved here.
                warn!(check = %check.name, schema = %check.schema, error = %e, "invalid schema regex, treating as compliant");
                None
            }
        };

        for value in values {
            let is_compliant = match &regex {
                Some(re) => re.is_match(&value) != check.negate,
                None => true,
            };
            results.push(CheckResult {
                is_compliant,
                policy_name: policy.name.clone(),
                api_call_name: api_call.name.clone(),
                check_name: check.name.clone(),
                state_owner: check.state_owner.clone(),
                actions: check.actions.clone(),
                event_user: event_user.clone(),
                event_type: event_type.to_string(),
                value,
                resource_id: resource.id.clone(),
                creation_date: Utc::now(),
            });
        }
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use policy::CompliantCheck;

    fn user() -> EventUser {
        EventUser {
            account_id: "123456789012".into(),
            username: "alice".into(),
            email_address: None,
            region: "us-east-1".into(),
        }
    }

    #[test]
    fn emits_noncompliant_for_mandatory_missing_property() {
        let mut policy = CompliancePolicy::default();
        policy.name = "default".into();
        let mut api_call = ApiCall::default();
        api_call.name = "CreateTags".into();
        api_call.compliant.push(CompliantCheck {
            name: "Tag.Owner".into(),
            policy_name: "default".into(),
            mandatory: true,
            schema: ".*".into(),
            ..Default::default()
        });
        let resource = Resource::default();
        let results = evaluate_api_call(&policy, &api_call, &resource, &user(), "CreateTags");
        assert_eq!(results.len(), 1);
        assert!(!results[0].is_compliant);
    }

    #[test]
    fn skips_optional_missing_property() {
        let mut policy = CompliancePolicy::default();
        policy.name = "default".into();
        let mut api_call = ApiCall::default();
        api_call.name = "CreateTags".into();
        api_call.compliant.push(CompliantCheck {
            name: "Tag.Owner".into(),
            mandatory: false,
            schema: ".*".into(),
            ..Default::default()
        });
        let resource = Resource::default();
        let results = evaluate_api_call(&policy, &api_call, &resource, &user(), "CreateTags");
        assert!(results.is_empty());
    }

    #[test]
    fn negate_inverts_match() {
        let mut policy = CompliancePolicy::default();
        policy.name = "default".into();
        let mut api_call = ApiCall::default();
        api_call.name = "AuthorizeSecurityGroupIngress".into();
        api_call.compliant.push(CompliantCheck {
            name: "GroupName".into(),
            schema: "^public-.*".into(),
            negate: true,
            ..Default::default()
        });
        let mut resource = Resource::default();
        resource
            .scalars
            .insert("GroupName".into(), "public-web".into());
        let results = evaluate_api_call(
            &policy,
            &api_call,
            &resource,
            &user(),
            "AuthorizeSecurityGroupIngress",
        );
        assert_eq!(results.len(), 1);
        assert!(!results[0].is_compliant);
    }
}
