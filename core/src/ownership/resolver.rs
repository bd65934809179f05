use super::registry::Registry;
use crate::store::model::Incident;
use serde::Serialize;

/// Outcome of owner resolution. A blank `owner_team` means the incident needs
/// manual routing; it is a valid state, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnerResolution {
    pub owner_team: String,
    pub contact_channel: String,
    pub resolved_via_registry: bool,
}

impl OwnerResolution {
    pub fn unresolved() -> Self {
        Self {
            owner_team: String::new(),
            contact_channel: String::new(),
            resolved_via_registry: false,
        }
    }

    pub fn is_resolved(&self) -> bool {
        !self.owner_team.is_empty()
    }

    pub fn has_channel(&self) -> bool {
        !self.contact_channel.is_empty()
    }
}

/// Direct owner first, then the registry row for the incident's asset.
pub fn resolve_owner(incident: &Incident, registry: &Registry) -> OwnerResolution {
    let direct = incident.owner_team_trimmed();
    if !direct.is_empty() {
        return OwnerResolution {
            owner_team: direct.to_string(),
            contact_channel: incident.contact_channel_trimmed().to_string(),
            resolved_via_registry: false,
        };
    }

    match registry.lookup(&incident.asset_type, &incident.asset_name) {
        Some(entry) => OwnerResolution {
            owner_team: entry.owner_team.trim().to_string(),
            contact_channel: entry.contact_channel.trim().to_string(),
            resolved_via_registry: true,
        },
        None => {
            log::debug!(
                "no owner for {} ({} {})",
                incident.incident_id,
                incident.asset_type,
                incident.asset_name
            );
            OwnerResolution::unresolved()
        }
    }
}
