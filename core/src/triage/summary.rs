use crate::error::{CoreError, CoreResult};
use crate::store::model::{Incident, IncidentStatus, Severity};
use serde::Serialize;

/// Headline counters for the incident console.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct QueueSummary {
    pub unresolved: usize,
    pub sev1_unresolved: usize,
    pub blocked: usize,
    pub missing_owner: usize,
}

pub fn summarize(incidents: &[Incident]) -> QueueSummary {
    let mut s = QueueSummary::default();
    for i in incidents.iter().filter(|i| i.is_unresolved()) {
        s.unresolved += 1;
        if i.severity == Severity::Sev1 {
            s.sev1_unresolved += 1;
        }
        if i.status == IncidentStatus::Blocked {
            s.blocked += 1;
        }
        if i.has_owner_gap() {
            s.missing_owner += 1;
        }
    }
    s
}

/// Unresolved incidents in creation order, for picking one to act on.
pub fn unresolved_picklist(incidents: &[Incident]) -> Vec<&Incident> {
    let mut out: Vec<&Incident> = incidents.iter().filter(|i| i.is_unresolved()).collect();
    out.sort_by_key(|i| i.created_at);
    out
}

/// Select an incident to act on. Only members of the unresolved picklist
/// qualify.
pub fn pick_unresolved<'a>(incidents: &'a [Incident], incident_id: &str) -> CoreResult<&'a Incident> {
    let picklist = unresolved_picklist(incidents);
    if picklist.is_empty() {
        return Err(CoreError::NoUnresolvedIncidents);
    }
    if let Some(incident) = picklist.into_iter().find(|i| i.incident_id == incident_id) {
        return Ok(incident);
    }
    if incidents.iter().any(|i| i.incident_id == incident_id) {
        return Err(CoreError::IncidentResolved(incident_id.to_string()));
    }
    Err(CoreError::UnknownIncident(incident_id.to_string()))
}
