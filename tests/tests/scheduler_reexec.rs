use adapters::memory::{InMemoryResourceDescriber, LoggingNotifier, StaticDirectory};
use fixtures::security_group;
use scheduler::reexec::{fire_trigger, TriggerContext};
use std::collections::HashMap;

fn config() -> policy::Config {
    policy::parse_config(fixtures::SAMPLE_POLICY_DOCUMENT).expect("sample document is valid")
}

#[tokio::test]
async fn periodic_reexec_skips_a_finding_already_remediated() {
    let config = config();
    let policy = &config.security_group_policy[0];
    let account = config.find_account("prod").unwrap().clone();

    // Resource is compliant now, but the store still has a stale finding.
    let mut describer = InMemoryResourceDescriber::new();
    let mut resource = security_group("sg-fixed", "vpc-default");
    resource.ip_permissions.push(resource::IpPermission {
        protocol: "tcp".into(),
        from_port: 22,
        to_port: 22,
        ip_ranges: vec!["10.0.0.0/8".into()],
        user_id_group_pairs: Vec::new(),
    });
    describer.insert(resource);

    let store_dir = tempfile::tempdir().unwrap();
    let store = store::ResultStore::new(store_dir.path(), None);
    store
        .store_resource_check_results(
            "sg-fixed",
            vec![common::CheckResult {
                is_compliant: false,
                policy_name: policy.name.clone(),
                api_call_name: "AuthorizeSecurityGroupIngress".into(),
                check_name: "IpPermissions.IpRanges".into(),
                state_owner: String::new(),
                actions: vec!["notify-security".into()],
                event_user: common::EventUser::default(),
                event_type: "AuthorizeSecurityGroupIngress".into(),
                value: "P:tcp;FP:22;TP:22;IP:0.0.0.0/0".into(),
                resource_id: "sg-fixed".into(),
                creation_date: chrono::Utc::now(),
            }],
        )
        .await
        .unwrap();

    let directory = StaticDirectory::new(HashMap::new());
    let notifier = LoggingNotifier::new();
    let templates = actions::TemplateEngine::new(HashMap::new());

    let ctx = TriggerContext {
        config: &config,
        policy,
        account: &account,
        describer: &describer,
        store: &store,
        directory: &directory,
        notifier: &notifier,
        templates: &templates,
    };

    fire_trigger(&ctx, &["notify-security".to_string()]).await.unwrap();

    assert!(notifier.sent.lock().unwrap().is_empty());
    assert!(store.get_resource_check_results("sg-fixed").await.unwrap().is_empty());
}

#[tokio::test]
async fn periodic_reexec_fires_for_a_finding_that_is_still_open() {
    let config = config();
    let policy = &config.security_group_policy[0];
    let account = config.find_account("prod").unwrap().clone();

    let mut describer = InMemoryResourceDescriber::new();
    let mut resource = security_group("sg-stillopen", "vpc-default");
    resource.ip_permissions.push(fixtures::open_ingress_rule());
    describer.insert(resource);

    let store_dir = tempfile::tempdir().unwrap();
    let store = store::ResultStore::new(store_dir.path(), None);
    store
        .store_resource_check_results(
            "sg-stillopen",
            vec![common::CheckResult {
                is_compliant: false,
                policy_name: policy.name.clone(),
                api_call_name: "AuthorizeSecurityGroupIngress".into(),
                check_name: "IpPermissions.IpRanges".into(),
                state_owner: String::new(),
                actions: vec!["notify-security".into()],
                event_user: common::EventUser::default(),
                event_type: "AuthorizeSecurityGroupIngress".into(),
                value: "P:tcp;FP:22;TP:22;IP:0.0.0.0/0".into(),
                resource_id: "sg-stillopen".into(),
                creation_date: chrono::Utc::now(),
            }],
        )
        .await
        .unwrap();

    let directory = StaticDirectory::new(HashMap::new());
    let notifier = LoggingNotifier::new();
    let templates = actions::TemplateEngine::new(HashMap::new());

    let ctx = TriggerContext {
        config: &config,
        policy,
        account: &account,
        describer: &describer,
        store: &store,
        directory: &directory,
        notifier: &notifier,
        templates: &templates,
    };

    fire_trigger(&ctx, &["notify-security".to_string()]).await.unwrap();

    assert_eq!(notifier.sent.lock().unwrap().len(), 1);
    assert_eq!(store.get_resource_check_results("sg-stillopen").await.unwrap().len(), 1);
}
