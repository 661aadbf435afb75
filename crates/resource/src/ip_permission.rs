use serde::{Deserialize, Serialize};

/// One ingress/egress rule of a security group.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IpPermission {
    pub protocol: String,
    pub from_port: i32,
    pub to_port: i32,
    pub ip_ranges: Vec<String>,
    pub user_id_group_pairs: Vec<(String, String)>,
}

impl IpPermission {
    /// Encodes this rule as `P:<proto>;FP:<from>;TP:<to>;IP:<cidr>`
    /// (one line per CIDR) or `...;UG:<userId>/<groupId>` for
    /// cross-account group references, matching the original's
    /// structured-line encoding so schema regexes can match a whole
    /// rule in one pattern.
    pub fn property_line(&self, field: &str) -> String {
        let prefix = format!("P:{};FP:{};TP:{}", self.protocol, self.from_port, self.to_port);
        match field {
            "IpRanges" => {
                let cidrs = self.ip_ranges.join(",");
                format!("{prefix};IP:{cidrs}")
            }
            "UserIdGroupPairs.GroupId" | "UserIdGroupPairs.UserId" => {
                let pairs = self
                    .user_id_group_pairs
                    .iter()
                    .map(|(user_id, group_id)| format!("UG:{user_id}/{group_id}"))
                    .collect::<Vec<_>>()
                    .join(",");
                format!("{prefix};{pairs}")
            }
            "FromPort" => self.from_port.to_string(),
            "ToPort" => self.to_port.to_string(),
            _ => prefix,
        }
    }
}
