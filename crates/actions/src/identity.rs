//! ARN parsing for the `UIDName`/`UIDEmail` template helpers, carried
//! verbatim from the original `ParseUserIdentity` regex.

use regex::Regex;
use std::sync::OnceLock;

static ARN_RE: OnceLock<Regex> = OnceLock::new();

fn arn_regex() -> &'static Regex {
    ARN_RE.get_or_init(|| {
        Regex::new(r"^arn:aws:(sts|iam)::([0-9]{12}):(role|assumed-role|user)/(.+)$")
            .expect("static ARN regex is valid")
    })
}

/// Extracts the trailing principal name from an IAM/STS ARN, stripping
/// an assumed-role session suffix (`role/session-name` -> `role`).
pub fn principal_name(arn: &str) -> Option<String> {
    let caps = arn_regex().captures(arn)?;
    let kind = &caps[3];
    let name = &caps[4];
    if kind == "assumed-role" {
        Some(name.split('/').next().unwrap_or(name).to_string())
    } else {
        Some(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_assumed_role_name() {
        let arn = "arn:aws:sts::123456789012:assumed-role/arebot-deploy/session-42";
        assert_eq!(principal_name(arn), Some("arebot-deploy".to_string()));
    }

    #[test]
    fn extracts_iam_user_name() {
        let arn = "arn:aws:iam::123456789012:user/alice";
        assert_eq!(principal_name(arn), Some("alice".to_string()));
    }

    #[test]
    fn rejects_non_arn_input() {
        assert_eq!(principal_name("not-an-arn"), None);
    }
}
