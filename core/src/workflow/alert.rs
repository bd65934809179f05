use crate::store::model::Incident;

/// Compose the outbound alert text. The message is only produced here;
/// posting it to a channel belongs to an external notifier.
pub fn compose_alert_message(incident: &Incident, contact_channel: &str, actor: &str) -> String {
    [
        format!("TEAMS ALERT → {}", contact_channel),
        format!("INCIDENT: {} ({})", incident.incident_id, incident.severity),
        format!("Title: {}", incident.title),
        format!("Asset: {} {}", incident.asset_type, incident.asset_name),
        format!(
            "Status: {} | Blocked: {}",
            incident.status,
            incident.blocked_reason.as_deref().unwrap_or("")
        ),
        format!("Requested by: {}", actor),
        "Ask: Please confirm owner + next steps to unblock.".to_string(),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn message_layout_is_fixed() {
        let incident = Incident {
            incident_id: "INC-100".into(),
            severity: "Sev1".into(),
            status: "Blocked".into(),
            incident_type: "Outage".into(),
            title: "Orders DB unreachable".into(),
            asset_type: "Database".into(),
            asset_name: "orders-db".into(),
            owner_team: None,
            contact_channel: None,
            created_at: datetime!(2025-03-01 08:00:00),
            updated_at: datetime!(2025-03-01 08:00:00),
            blocked_reason: Some("No owner on call".into()),
            description: None,
        };
        let msg = compose_alert_message(&incident, "#dataplat-oncall", "Demo User");
        assert_eq!(
            msg,
            "TEAMS ALERT → #dataplat-oncall\n\
             INCIDENT: INC-100 (Sev1)\n\
             Title: Orders DB unreachable\n\
             Asset: Database orders-db\n\
             Status: Blocked | Blocked: No owner on call\n\
             Requested by: Demo User\n\
             Ask: Please confirm owner + next steps to unblock."
        );
    }
}
