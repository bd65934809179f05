use super::alert::compose_alert_message;
use crate::audit::action::{ActionKind, ActionRecord};
use crate::audit::clock::Clock;
use crate::audit::log::ActionLog;
use crate::error::{CoreError, CoreResult};
use crate::ownership::registry::Registry;
use crate::ownership::resolver::{resolve_owner, OwnerResolution};
use crate::store::model::Incident;
use serde::Serialize;
use std::fmt;

pub const OWNER_MISSING_MESSAGE: &str = "Owner missing — cannot route alert. Add ownership first.";

/// Reasons offered when claiming an incident.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimReason {
    NeedOwnerConfirmation,
    BlockedUnknownOwner,
    CriticalTriage,
    WaitingOnApproval,
}

impl ClaimReason {
    pub const ALL: [ClaimReason; 4] = [
        ClaimReason::NeedOwnerConfirmation,
        ClaimReason::BlockedUnknownOwner,
        ClaimReason::CriticalTriage,
        ClaimReason::WaitingOnApproval,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ClaimReason::NeedOwnerConfirmation => "Need owner confirmation / next steps",
            ClaimReason::BlockedUnknownOwner => "Blocked due to unknown owner",
            ClaimReason::CriticalTriage => "Critical incident – immediate triage needed",
            ClaimReason::WaitingOnApproval => "Waiting on approval / access",
        }
    }
}

impl fmt::Display for ClaimReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone)]
pub enum AlertRoute {
    Routable(OwnerResolution),
    Rejected { reason: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct AlertDispatch {
    pub owner: OwnerResolution,
    pub message: String,
    pub record: ActionRecord,
}

/// Operator actions against the session's audit trail.
pub struct ActionDesk<'a> {
    pub registry: &'a Registry,
    pub log: &'a mut ActionLog,
    pub clock: &'a dyn Clock,
}

impl<'a> ActionDesk<'a> {
    pub fn claim(&mut self, incident: &Incident, actor: &str, reason: &str) -> ActionRecord {
        let details = format!("Claimed for triage. Reason: {}", reason);
        self.log
            .record(
                self.clock.now_local(),
                &incident.incident_id,
                ActionKind::Claimed,
                actor,
                &details,
            )
            .clone()
    }

    /// Decide whether an alert for `incident` has somewhere to go.
    pub fn route_alert(&self, incident: &Incident) -> AlertRoute {
        let owner = resolve_owner(incident, self.registry);
        if !owner.is_resolved() {
            return AlertRoute::Rejected {
                reason: OWNER_MISSING_MESSAGE.to_string(),
            };
        }
        if !owner.has_channel() {
            return AlertRoute::Rejected {
                reason: format!(
                    "Owner {} has no contact channel — cannot route alert.",
                    owner.owner_team
                ),
            };
        }
        AlertRoute::Routable(owner)
    }

    /// Compose the alert and record it. Nothing is written when the route is
    /// rejected.
    pub fn send_alert(&mut self, incident: &Incident, actor: &str) -> CoreResult<AlertDispatch> {
        let owner = match self.route_alert(incident) {
            AlertRoute::Routable(owner) => owner,
            AlertRoute::Rejected { reason } => {
                log::warn!("alert for {} rejected: {}", incident.incident_id, reason);
                return Err(CoreError::AlertRejected(reason));
            }
        };

        let message = compose_alert_message(incident, &owner.contact_channel, actor);
        let details = format!("Posted to {}", owner.contact_channel);
        let record = self
            .log
            .record(
                self.clock.now_local(),
                &incident.incident_id,
                ActionKind::TeamsAlertSent,
                actor,
                &details,
            )
            .clone();
        log::info!(
            "alert for {} routed to {} ({})",
            incident.incident_id,
            owner.owner_team,
            owner.contact_channel
        );
        Ok(AlertDispatch {
            owner,
            message,
            record,
        })
    }
}
