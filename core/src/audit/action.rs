use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActionKind {
    Claimed,
    TeamsAlertSent,
    Other(String),
}

impl ActionKind {
    pub fn as_str(&self) -> &str {
        match self {
            ActionKind::Claimed => "CLAIMED",
            ActionKind::TeamsAlertSent => "TEAMS_ALERT_SENT",
            ActionKind::Other(s) => s,
        }
    }
}

impl From<String> for ActionKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "CLAIMED" => ActionKind::Claimed,
            "TEAMS_ALERT_SENT" => ActionKind::TeamsAlertSent,
            _ => ActionKind::Other(value),
        }
    }
}

impl From<ActionKind> for String {
    fn from(value: ActionKind) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One audit-trail entry. `seq` is assigned by [`super::log::ActionLog`] and is
/// not part of the action table's columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    #[serde(default)]
    pub seq: u64,
    pub timestamp: String,
    pub incident_id: String,
    pub action: ActionKind,
    #[serde(default)]
    pub actor: String,
    #[serde(default)]
    pub details: String,
}
