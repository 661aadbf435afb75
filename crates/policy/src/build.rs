use crate::model::*;
use crate::parse::Block;
use common::Account;

pub fn build_config(root: &Block) -> Config {
    let mut cfg = Config {
        region: root.attr_str("region"),
        access_key: root.attr_str("access_key"),
        secret_key: root.attr_str("secret_key"),
        arebot_user_session_name: root
            .attrs
            .get("arebot_user_session_name")
            .and_then(|v| v.as_str())
            .map(str::to_string),
        ..Default::default()
    };

    cfg.security_group_policy = root
        .children_of("security_group_policy")
        .map(build_policy)
        .collect();
    cfg.ec2_policy = root.children_of("ec2_policy").map(build_policy).collect();
    cfg.s3_policy = root.children_of("s3_policy").map(build_policy).collect();
    cfg.account = root.children_of("account").map(build_account).collect();

    cfg
}

fn build_account(b: &Block) -> Account {
    Account {
        name: b.label.clone().unwrap_or_default(),
        account_id: b.attr_str("account_id"),
        region: b.attr_str("region"),
        role_arn: b.attr_str("arebot_role_arn"),
        all_events_queue: b.attr_str("all_events_queue"),
        role_session_name: b
            .attrs
            .get("role_session_name")
            .and_then(|v| v.as_str())
            .map(str::to_string),
    }
}

fn build_policy(b: &Block) -> CompliancePolicy {
    let vpc = b.attr_str("vpc");
    CompliancePolicy {
        name: b.label.clone().unwrap_or_default(),
        account: b.attr_str("account"),
        vpc: if vpc.is_empty() { ".*".to_string() } else { vpc },
        api_call: b.children_of("api_call").map(build_api_call).collect(),
        action: b.children_of("action").map(build_action).collect(),
        action_trigger: b
            .children_of("action_trigger")
            .map(build_action_trigger)
            .collect(),
    }
}

fn build_api_call(b: &Block) -> ApiCall {
    ApiCall {
        name: b.label.clone().unwrap_or_default(),
        tag: b.children_of("tag").map(build_tag).collect(),
        compliant: b.children_of("compliant").map(build_compliant).collect(),
    }
}

fn build_tag(b: &Block) -> TagResource {
    TagResource {
        name: b.label.clone().unwrap_or_default(),
        key: b.attr_str("key"),
        value: b.attr_str("value"),
    }
}

fn build_compliant(b: &Block) -> CompliantCheck {
    CompliantCheck {
        name: b.label.clone().unwrap_or_default(),
        policy_name: b.attr_str("policy_name"),
        state_owner: b.attr_str("state_owner"),
        schema: b.attr_str("schema"),
        negate: b.attr_bool("negate"),
        mandatory: b.attr_bool("mandatory"),
        description: b.attr_str("description"),
        condition: b.children_of("condition").map(build_condition).collect(),
        actions: b.attr_str_list("actions"),
    }
}

fn build_condition(b: &Block) -> Condition {
    Condition {
        name: b.label.clone().unwrap_or_default(),
        kind: b.attr_str("type"),
        value: b.attr_str("value"),
        condition: b.children_of("condition").map(build_condition).collect(),
    }
}

fn build_action(b: &Block) -> Action {
    let email = b
        .children_of("email")
        .next()
        .map(build_email)
        .unwrap_or_default();
    Action {
        name: b.label.clone().unwrap_or_default(),
        email,
        condition: b
            .children_of("condition")
            .map(build_time_condition)
            .collect(),
        operation: b.children_of("operation").map(|_| ResourceOperation {}).collect(),
    }
}

fn build_email(b: &Block) -> EmailNotification {
    EmailNotification {
        receiver: b.attr_str_list("receiver"),
        template: b.attr_str("template"),
    }
}

fn build_time_condition(b: &Block) -> TimeCondition {
    TimeCondition {
        name: b.label.clone().unwrap_or_default(),
        kind: b.attr_str("type"),
        value: b.attr_str("value"),
        value_duration: None,
    }
}

fn build_action_trigger(b: &Block) -> ActionTrigger {
    ActionTrigger {
        name: b.label.clone().unwrap_or_default(),
        schedule: b.attr_str("schedule"),
        action: b.attr_str_list("action"),
    }
}
