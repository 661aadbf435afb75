use fixtures::SAMPLE_POLICY_DOCUMENT;

#[test]
fn sample_policy_document_parses_and_validates() {
    let config = policy::parse_config(SAMPLE_POLICY_DOCUMENT).expect("sample document is valid");
    assert_eq!(config.account.len(), 1);
    assert_eq!(config.security_group_policy.len(), 1);

    let policy = &config.security_group_policy[0];
    assert_eq!(policy.action.len(), 1);
    assert_eq!(policy.action_trigger.len(), 1);
    assert_eq!(policy.action_trigger[0].action, vec!["notify-security".to_string()]);
}

#[test]
fn rejects_a_trigger_pointing_at_an_undefined_action() {
    let bad = SAMPLE_POLICY_DOCUMENT.replace(
        "action = [\"notify-security\"]",
        "action = [\"does-not-exist\"]",
    );
    assert!(policy::parse_config(&bad).is_err());
}
