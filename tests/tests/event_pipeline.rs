use adapters::memory::{InMemoryResourceDescriber, LoggingNotifier, StaticDirectory};
use common::EventUser;
use dispatcher::pipeline::Pipeline;
use dispatcher::AuditEvent;
use fixtures::{open_ingress_rule, security_group};
use std::collections::HashMap;

fn config() -> policy::Config {
    policy::parse_config(fixtures::SAMPLE_POLICY_DOCUMENT).expect("sample document is valid")
}

fn open_ingress_event() -> AuditEvent {
    let body = serde_json::json!({
        "eventName": "AuthorizeSecurityGroupIngress",
        "eventSource": "ec2.amazonaws.com",
        "awsRegion": "us-east-1",
        "userIdentity": {
            "type": "IAMUser",
            "arn": "arn:aws:iam::123456789012:user/alice",
            "accountId": "123456789012",
            "userName": "alice",
        },
        "requestParameters": { "groupId": "sg-open" },
        "responseElements": {},
    })
    .to_string();
    AuditEvent::from_body(&body).unwrap()
}

#[tokio::test]
async fn open_world_ingress_event_stores_a_finding_and_fires_the_action() {
    let config = config();
    let account = config.find_account("prod").unwrap().clone();

    let mut described = security_group("sg-open", "vpc-default");
    described.ip_permissions.push(open_ingress_rule());
    let mut describer = InMemoryResourceDescriber::new();
    describer.insert(described);

    let store_dir = tempfile::tempdir().unwrap();
    let store = store::ResultStore::new(store_dir.path(), None);
    let directory = StaticDirectory::new(HashMap::new());
    let notifier = LoggingNotifier::new();
    let templates = actions::TemplateEngine::new(HashMap::new());

    let pipeline = Pipeline {
        config: &config,
        describer: &describer,
        store: &store,
        directory: &directory,
        notifier: &notifier,
        templates: &templates,
    };

    pipeline.handle_event(&open_ingress_event(), &account).await.unwrap();

    let stored = store.get_resource_check_results("sg-open").await.unwrap();
    assert_eq!(stored.len(), 1);
    assert!(!stored[0].is_compliant);
    assert_eq!(stored[0].check_name, "IpPermissions.IpRanges");

    let sent = notifier.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, vec!["security@example.com".to_string()]);
}

#[tokio::test]
async fn closing_the_rule_afterwards_clears_the_stored_finding() {
    let config = config();
    let account = config.find_account("prod").unwrap().clone();

    let mut describer = InMemoryResourceDescriber::new();
    let mut open = security_group("sg-open", "vpc-default");
    open.ip_permissions.push(open_ingress_rule());
    describer.insert(open);

    let store_dir = tempfile::tempdir().unwrap();
    let store = store::ResultStore::new(store_dir.path(), None);
    let directory = StaticDirectory::new(HashMap::new());
    let notifier = LoggingNotifier::new();
    let templates = actions::TemplateEngine::new(HashMap::new());

    let pipeline = Pipeline {
        config: &config,
        describer: &describer,
        store: &store,
        directory: &directory,
        notifier: &notifier,
        templates: &templates,
    };

    pipeline.handle_event(&open_ingress_event(), &account).await.unwrap();
    assert_eq!(store.get_resource_check_results("sg-open").await.unwrap().len(), 1);

    let mut describer = InMemoryResourceDescriber::new();
    let mut closed = security_group("sg-open", "vpc-default");
    closed.ip_permissions.push(resource::IpPermission {
        protocol: "tcp".into(),
        from_port: 22,
        to_port: 22,
        ip_ranges: vec!["10.0.0.0/8".into()],
        user_id_group_pairs: Vec::new(),
    });

    let pipeline = Pipeline {
        config: &config,
        describer: &describer,
        store: &store,
        directory: &directory,
        notifier: &notifier,
        templates: &templates,
    };
    pipeline.handle_event(&open_ingress_event(), &account).await.unwrap();

    assert!(store.get_resource_check_results("sg-open").await.unwrap().is_empty());
}

#[tokio::test]
async fn unrelated_event_is_a_no_op() {
    let config = config();
    let account = config.find_account("prod").unwrap().clone();
    let describer = InMemoryResourceDescriber::new();
    let store_dir = tempfile::tempdir().unwrap();
    let store = store::ResultStore::new(store_dir.path(), None);
    let directory = StaticDirectory::new(HashMap::new());
    let notifier = LoggingNotifier::new();
    let templates = actions::TemplateEngine::new(HashMap::new());

    let pipeline = Pipeline {
        config: &config,
        describer: &describer,
        store: &store,
        directory: &directory,
        notifier: &notifier,
        templates: &templates,
    };

    let body = serde_json::json!({
        "eventName": "GetBucketAcl",
        "eventSource": "s3.amazonaws.com",
        "awsRegion": "us-east-1",
        "userIdentity": {
            "type": "IAMUser",
            "arn": "arn:aws:iam::123456789012:user/alice",
            "accountId": "123456789012",
            "userName": "alice",
        },
    })
    .to_string();
    let event = AuditEvent::from_body(&body).unwrap();
    pipeline.handle_event(&event, &account).await.unwrap();

    assert!(notifier.sent.lock().unwrap().is_empty());
    let _ = EventUser::default();
}
