//! Post-parse integration: fills in fields the grammar leaves implicit.
//! Mirrors the original `integrateConfigSettings`/`integrateCompliancePolicies`
//! pass, which ran strictly before validation.

use crate::model::Config;
use common::time::parse_duration;

pub fn integrate_config_settings(cfg: &mut Config) {
    for policy in cfg
        .security_group_policy
        .iter_mut()
        .chain(cfg.ec2_policy.iter_mut())
        .chain(cfg.s3_policy.iter_mut())
    {
        integrate_compliance_policy(policy);
    }
}

fn integrate_compliance_policy(policy: &mut crate::model::CompliancePolicy) {
    let policy_name = policy.name.clone();
    for api_call in &mut policy.api_call {
        for check in &mut api_call.compliant {
            if check.policy_name.is_empty() {
                check.policy_name = policy_name.clone();
            }
        }
    }
    for action in &mut policy.action {
        for cond in &mut action.condition {
            cond.value_duration = parse_duration(&cond.value);
        }
    }
}
