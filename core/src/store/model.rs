use super::timestamps::{lenient_table_datetime, table_datetime};
use serde::{Deserialize, Serialize};
use std::fmt;
use time::PrimitiveDateTime;

/// Incident severity. Values outside Sev1..Sev3 are kept verbatim and rank last.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Severity {
    Sev1,
    Sev2,
    Sev3,
    Other(String),
}

impl Severity {
    pub const UNRECOGNIZED_RANK: u8 = 9;

    pub fn rank(&self) -> u8 {
        match self {
            Severity::Sev1 => 0,
            Severity::Sev2 => 1,
            Severity::Sev3 => 2,
            Severity::Other(_) => Self::UNRECOGNIZED_RANK,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Severity::Sev1 => "Sev1",
            Severity::Sev2 => "Sev2",
            Severity::Sev3 => "Sev3",
            Severity::Other(s) => s,
        }
    }
}

impl From<String> for Severity {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Sev1" => Severity::Sev1,
            "Sev2" => Severity::Sev2,
            "Sev3" => Severity::Sev3,
            _ => Severity::Other(value),
        }
    }
}

impl From<&str> for Severity {
    fn from(value: &str) -> Self {
        Severity::from(value.to_string())
    }
}

impl From<Severity> for String {
    fn from(value: Severity) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IncidentStatus {
    Open,
    Investigating,
    Blocked,
    Resolved,
    Other(String),
}

impl IncidentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            IncidentStatus::Open => "Open",
            IncidentStatus::Investigating => "Investigating",
            IncidentStatus::Blocked => "Blocked",
            IncidentStatus::Resolved => "Resolved",
            IncidentStatus::Other(s) => s,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, IncidentStatus::Resolved)
    }
}

impl From<String> for IncidentStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Open" => IncidentStatus::Open,
            "Investigating" => IncidentStatus::Investigating,
            "Blocked" => IncidentStatus::Blocked,
            "Resolved" => IncidentStatus::Resolved,
            _ => IncidentStatus::Other(value),
        }
    }
}

impl From<&str> for IncidentStatus {
    fn from(value: &str) -> Self {
        IncidentStatus::from(value.to_string())
    }
}

impl From<IncidentStatus> for String {
    fn from(value: IncidentStatus) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for IncidentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Row of the incidents table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    pub incident_id: String,
    pub severity: Severity,
    pub status: IncidentStatus,
    pub incident_type: String,
    pub title: String,
    pub asset_type: String,
    pub asset_name: String,
    #[serde(default)]
    pub owner_team: Option<String>,
    #[serde(default)]
    pub contact_channel: Option<String>,
    #[serde(with = "table_datetime")]
    pub created_at: PrimitiveDateTime,
    #[serde(with = "table_datetime")]
    pub updated_at: PrimitiveDateTime,
    #[serde(default)]
    pub blocked_reason: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Incident {
    /// Owner team with surrounding whitespace removed; blank when absent.
    pub fn owner_team_trimmed(&self) -> &str {
        trimmed(&self.owner_team)
    }

    pub fn contact_channel_trimmed(&self) -> &str {
        trimmed(&self.contact_channel)
    }

    pub fn blocked_reason_trimmed(&self) -> &str {
        trimmed(&self.blocked_reason)
    }

    pub fn has_owner_gap(&self) -> bool {
        self.owner_team_trimmed().is_empty()
    }

    pub fn is_unresolved(&self) -> bool {
        !self.status.is_resolved()
    }
}

pub(crate) fn trimmed(value: &Option<String>) -> &str {
    value.as_deref().map(str::trim).unwrap_or("")
}

/// Row of the ownership registry, keyed by (asset_type, asset_name).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEntry {
    pub asset_type: String,
    pub asset_name: String,
    pub owner_team: String,
    #[serde(default)]
    pub contact_channel: String,
    #[serde(default)]
    pub manager_email: String,
    #[serde(default)]
    pub runbook_link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FrictionStatus {
    Completed,
    Waiting,
    Other(String),
}

impl FrictionStatus {
    pub fn as_str(&self) -> &str {
        match self {
            FrictionStatus::Completed => "Completed",
            FrictionStatus::Waiting => "Waiting",
            FrictionStatus::Other(s) => s,
        }
    }
}

impl From<String> for FrictionStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Completed" => FrictionStatus::Completed,
            "Waiting" => FrictionStatus::Waiting,
            _ => FrictionStatus::Other(value),
        }
    }
}

impl From<FrictionStatus> for String {
    fn from(value: FrictionStatus) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for FrictionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Row of the friction table: one cross-team request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrictionItem {
    pub request_id: String,
    pub request_type: String,
    pub from_team: String,
    pub to_team: String,
    #[serde(with = "table_datetime")]
    pub submitted_datetime: PrimitiveDateTime,
    #[serde(default, with = "lenient_table_datetime")]
    pub completed_datetime: Option<PrimitiveDateTime>,
    /// Blank when the request has no agreed SLA; such items never breach.
    #[serde(default)]
    pub sla_hours: Option<f64>,
    pub status: FrictionStatus,
}
