use serde::{Deserialize, Serialize};

/// An atomic practiced behavior assigned to staff of one role.
///
/// Never deleted once referenced by history; retirement clears `active`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProMove {
    pub id: i64,
    pub statement: String,
    pub competency_id: i64,
    pub domain_id: i64,
    pub domain_name: String,
    pub role_id: i64,
    pub active: bool,
}
