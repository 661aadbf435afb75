use policy::Condition;
use resource::Resource;

/// Evaluates a `compliant { condition { ... } }` gate against a
/// resource. An empty condition list always gates open — a check with
/// no conditions applies unconditionally.
pub fn conditions_satisfied(conditions: &[Condition], resource: &Resource) -> bool {
    conditions.iter().all(|c| condition_satisfied(c, resource))
}

fn condition_satisfied(cond: &Condition, resource: &Resource) -> bool {
    if !cond.condition.is_empty() {
        return match cond.kind.as_str() {
            "OR" => cond.condition.iter().any(|c| condition_satisfied(c, resource)),
            // AND is also the fallback for an unrecognized logical type,
            // matching the conservative original behaviour.
            _ => cond.condition.iter().all(|c| condition_satisfied(c, resource)),
        };
    }

    match cond.kind.as_str() {
        "tag_key_exists" => !resource.property(&format!("Tag.{}", cond.value)).is_empty(),
        "tag_key_not_exists" => resource.property(&format!("Tag.{}", cond.value)).is_empty(),
        "tag_value_exists" => !resource.property(&format!("Tag:Value.{}", cond.value)).is_empty(),
        "tag_value_not_exists" => resource.property(&format!("Tag:Value.{}", cond.value)).is_empty(),
        "tag_pair_exists" => match tag_pair_property(&cond.value) {
            Some(p) => !resource.property(&p).is_empty(),
            None => false,
        },
        "tag_pair_not_exists" => match tag_pair_property(&cond.value) {
            Some(p) => resource.property(&p).is_empty(),
            None => true,
        },
        other => {
            tracing::warn!(condition_type = other, "unknown condition type, treating as unsatisfied");
            false
        }
    }
}

/// Parses a `tag_pair_*` condition value of the form `K:'<key>',V:'<value>'`
/// into the `Tag:Pair.<key>---<value>` property path it tests against.
fn tag_pair_property(value: &str) -> Option<String> {
    let re = regex::Regex::new(r"K:'([^']*)',V:'([^']*)'").unwrap();
    let caps = re.captures(value)?;
    Some(format!("Tag:Pair.{}---{}", &caps[1], &caps[2]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource_with_tag(key: &str, value: &str) -> Resource {
        let mut r = Resource::default();
        r.tags.push((key.to_string(), value.to_string()));
        r
    }

    #[test]
    fn tag_key_exists_matches() {
        let r = resource_with_tag("Owner", "team-a");
        let cond = Condition {
            name: "c".into(),
            kind: "tag_key_exists".into(),
            value: "Owner".into(),
            condition: vec![],
        };
        assert!(conditions_satisfied(std::slice::from_ref(&cond), &r));
    }

    #[test]
    fn or_combines_children() {
        let r = resource_with_tag("Owner", "team-a");
        let parent = Condition {
            name: "root".into(),
            kind: "OR".into(),
            value: String::new(),
            condition: vec![
                Condition {
                    name: "a".into(),
                    kind: "tag_key_exists".into(),
                    value: "Missing".into(),
                    condition: vec![],
                },
                Condition {
                    name: "b".into(),
                    kind: "tag_key_exists".into(),
                    value: "Owner".into(),
                    condition: vec![],
                },
            ],
        };
        assert!(conditions_satisfied(std::slice::from_ref(&parent), &r));
    }

    #[test]
    fn tag_pair_not_exists_passes_when_pair_absent() {
        let r = resource_with_tag("Tag", "SomeValue");
        let cond = Condition {
            name: "c".into(),
            kind: "tag_pair_not_exists".into(),
            value: "K:'OtherTag',V:'OtherValue'".into(),
            condition: vec![],
        };
        assert!(conditions_satisfied(std::slice::from_ref(&cond), &r));
    }

    #[test]
    fn tag_pair_exists_requires_both_key_and_value() {
        let r = resource_with_tag("Environment", "prod");
        let matching = Condition {
            name: "c".into(),
            kind: "tag_pair_exists".into(),
            value: "K:'Environment',V:'prod'".into(),
            condition: vec![],
        };
        assert!(conditions_satisfied(std::slice::from_ref(&matching), &r));

        let wrong_value = Condition {
            value: "K:'Environment',V:'staging'".into(),
            ..matching
        };
        assert!(!conditions_satisfied(std::slice::from_ref(&wrong_value), &r));
    }

    #[test]
    fn nested_and_of_or_gates_combine() {
        let r = resource_with_tag("Owner", "team-a");
        let root = Condition {
            name: "root".into(),
            kind: "AND".into(),
            value: String::new(),
            condition: vec![
                Condition {
                    name: "left".into(),
                    kind: "OR".into(),
                    value: String::new(),
                    condition: vec![Condition {
                        name: "left-a".into(),
                        kind: "tag_key_exists".into(),
                        value: "Owner".into(),
                        condition: vec![],
                    }],
                },
                Condition {
                    name: "right".into(),
                    kind: "tag_pair_not_exists".into(),
                    value: "K:'OtherTag',V:'OtherValue'".into(),
                    condition: vec![],
                },
            ],
        };
        assert!(conditions_satisfied(std::slice::from_ref(&root), &r));
    }
}
