//! Event-name -> resource-kind/resource-id dispatch table. Grounded in
//! the original `handleSecurityGroupEvent`/`handleEC2Event`/
//! `handleVolumeEvent`/`handleSnapshotEvent` switch.

use resource::ResourceKind;
use serde_json::Value;

pub enum EventOutcome {
    Resource {
        kind: ResourceKind,
        resource_id: String,
    },
    /// Recognised but not yet mapped to a resource kind — acked, not
    /// retried, and logged at warn rather than silently dropped.
    UnsupportedApiCall,
    /// Not one of the API calls this pipeline reacts to.
    Unhandled,
}

const SECURITY_GROUP_EVENTS: &[&str] = &[
    "AuthorizeSecurityGroupEgress",
    "AuthorizeSecurityGroupIngress",
    "CreateSecurityGroup",
    "DeleteSecurityGroup",
    "RevokeSecurityGroupEgress",
    "RevokeSecurityGroupIngress",
];

const EC2_EVENTS: &[&str] = &["RunInstances", "StopInstances", "StartInstances", "TerminateInstances"];

const VOLUME_EVENTS: &[&str] = &["CreateVolume", "DeleteVolume", "AttachVolume", "DetachVolume"];

const SNAPSHOT_EVENTS: &[&str] = &["CreateSnapshot", "DeleteSnapshot", "CopySnapshot"];

const TAG_EVENTS: &[&str] = &["CreateTags", "DeleteTags"];

const UNSUPPORTED_EVENTS: &[&str] = &["PutBucketTagging"];

pub fn classify(event_name: &str, request_parameters: &Value, response_elements: &Value) -> EventOutcome {
    if SECURITY_GROUP_EVENTS.contains(&event_name) {
        if let Some(id) = extract_security_group_id(request_parameters, response_elements) {
            return EventOutcome::Resource {
                kind: ResourceKind::SecurityGroup,
                resource_id: id,
            };
        }
        return EventOutcome::Unhandled;
    }
    if EC2_EVENTS.contains(&event_name) {
        if let Some(id) = extract_first_instance_id(request_parameters, response_elements) {
            return EventOutcome::Resource {
                kind: ResourceKind::Ec2Instance,
                resource_id: id,
            };
        }
        return EventOutcome::Unhandled;
    }
    if VOLUME_EVENTS.contains(&event_name) {
        if let Some(id) = extract_str(request_parameters, "volumeId")
            .or_else(|| extract_str(response_elements, "volumeId"))
        {
            return EventOutcome::Resource {
                kind: ResourceKind::Volume,
                resource_id: id,
            };
        }
        return EventOutcome::Unhandled;
    }
    if SNAPSHOT_EVENTS.contains(&event_name) {
        if let Some(id) = extract_str(request_parameters, "snapshotId")
            .or_else(|| extract_str(response_elements, "snapshotId"))
        {
            return EventOutcome::Resource {
                kind: ResourceKind::Snapshot,
                resource_id: id,
            };
        }
        return EventOutcome::Unhandled;
    }
    if TAG_EVENTS.contains(&event_name) {
        // Tag events target whatever resource id is in the request,
        // regardless of kind; the caller treats the kind generically.
        if let Some(ids) = request_parameters.get("resourcesSet") {
            if let Some(first) = ids.get("items").and_then(|v| v.as_array()).and_then(|a| a.first()) {
                if let Some(id) = first.get("resourceId").and_then(Value::as_str) {
                    let kind = if id.starts_with("sg-") {
                        ResourceKind::SecurityGroup
                    } else if id.starts_with("vol-") {
                        ResourceKind::Volume
                    } else if id.starts_with("snap-") {
                        ResourceKind::Snapshot
                    } else {
                        ResourceKind::Ec2Instance
                    };
                    return EventOutcome::Resource {
                        kind,
                        resource_id: id.to_string(),
                    };
                }
            }
        }
        return EventOutcome::Unhandled;
    }
    if UNSUPPORTED_EVENTS.contains(&event_name) {
        return EventOutcome::UnsupportedApiCall;
    }
    EventOutcome::Unhandled
}

fn extract_str(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

fn extract_security_group_id(request_parameters: &Value, response_elements: &Value) -> Option<String> {
    extract_str(request_parameters, "groupId")
        .or_else(|| extract_str(response_elements, "groupId"))
}

fn extract_first_instance_id(request_parameters: &Value, response_elements: &Value) -> Option<String> {
    for source in [request_parameters, response_elements] {
        if let Some(items) = source
            .get("instancesSet")
            .and_then(|v| v.get("items"))
            .and_then(Value::as_array)
        {
            if let Some(id) = items.first().and_then(|i| i.get("instanceId")).and_then(Value::as_str) {
                return Some(id.to_string());
            }
        }
    }
    None
}
