use common::EventUser;
use fixtures::security_group;
use policy::{Condition, CompliancePolicy, CompliantCheck, ApiCall};

fn user() -> EventUser {
    EventUser {
        account_id: "123456789012".into(),
        username: "alice".into(),
        email_address: None,
        region: "us-east-1".into(),
    }
}

fn gated_api_call() -> (CompliancePolicy, ApiCall) {
    let mut policy = CompliancePolicy::default();
    policy.name = "default".into();

    let mut api_call = ApiCall::default();
    api_call.name = "CreateTags".into();
    api_call.compliant.push(CompliantCheck {
        name: "Tag.Owner".into(),
        mandatory: true,
        schema: ".*".into(),
        condition: vec![Condition {
            name: "gate".into(),
            kind: "tag_pair_not_exists".into(),
            value: "K:'OtherTag',V:'OtherValue'".into(),
            condition: vec![],
        }],
        ..Default::default()
    });
    (policy, api_call)
}

#[test]
fn tag_pair_not_exists_gate_runs_the_check_when_the_pair_is_absent() {
    let (policy, api_call) = gated_api_call();
    let resource = security_group("sg-1", "vpc-default");

    let results = evaluator::evaluate_api_call(&policy, &api_call, &resource, &user(), "CreateTags");
    assert_eq!(results.len(), 1);
    assert!(!results[0].is_compliant);
}

#[test]
fn tag_pair_not_exists_gate_skips_the_check_when_the_pair_is_present() {
    let (policy, api_call) = gated_api_call();
    let mut resource = security_group("sg-1", "vpc-default");
    resource.tags.push(("OtherTag".to_string(), "OtherValue".to_string()));

    let results = evaluator::evaluate_api_call(&policy, &api_call, &resource, &user(), "CreateTags");
    assert!(results.is_empty());
}
