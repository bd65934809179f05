use super::summary::QueueSummary;
use crate::audit::action::ActionRecord;
use crate::ownership::resolver::OwnerResolution;
use crate::store::model::{trimmed, Incident};
use crate::store::timestamps::format_table_datetime;

pub fn render_summary_markdown(s: &QueueSummary) -> String {
    [
        "| Unresolved incidents | Sev1 unresolved | Blocked | Missing owner |".to_string(),
        "|---|---|---|---|".to_string(),
        format!(
            "| {} | {} | {} | {} |",
            s.unresolved, s.sev1_unresolved, s.blocked, s.missing_owner
        ),
        "".to_string(),
    ]
    .join("\n")
}

pub fn render_queue_markdown(view: &[&Incident]) -> String {
    let mut out = Vec::new();
    out.push("# Unresolved queue".to_string());
    out.push("".to_string());
    if view.is_empty() {
        out.push("_No incidents match the current filters._".to_string());
        out.push("".to_string());
        return out.join("\n");
    }
    out.push(
        "| ID | Severity | Status | Type | Title | Asset | Owner team | Channel | Created | Updated | Blocked reason |"
            .to_string(),
    );
    out.push("|---|---|---|---|---|---|---|---|---|---|---|".to_string());
    for i in view {
        out.push(format!(
            "| {} | {} | {} | {} | {} | {} {} | {} | {} | {} | {} | {} |",
            i.incident_id,
            i.severity,
            i.status,
            i.incident_type,
            i.title,
            i.asset_type,
            i.asset_name,
            i.owner_team_trimmed(),
            i.contact_channel_trimmed(),
            format_table_datetime(&i.created_at),
            format_table_datetime(&i.updated_at),
            i.blocked_reason_trimmed(),
        ));
    }
    out.push("".to_string());
    out.join("\n")
}

/// Detail view of one incident with its owner routing and recorded actions.
pub fn render_incident_card(
    incident: &Incident,
    owner: &OwnerResolution,
    history: &[&ActionRecord],
) -> String {
    let mut out = Vec::new();
    out.push(format!("# {}", incident.title));
    out.push("".to_string());
    out.push(format!("`{}` `{}`", incident.severity, incident.status));
    out.push("".to_string());
    out.push(format!("- **Incident ID:** {}", incident.incident_id));
    out.push(format!("- **Type:** {}", incident.incident_type));
    out.push(format!(
        "- **Asset:** {} — `{}`",
        incident.asset_type, incident.asset_name
    ));
    if !incident.blocked_reason_trimmed().is_empty() {
        out.push(format!("- **Blocked reason:** {}", incident.blocked_reason_trimmed()));
    }
    out.push(format!(
        "- **Created:** {}",
        format_table_datetime(&incident.created_at)
    ));
    out.push(format!(
        "- **Last updated:** {}",
        format_table_datetime(&incident.updated_at)
    ));
    let description = trimmed(&incident.description);
    if !description.is_empty() {
        out.push("".to_string());
        out.push(format!("> {}", description));
    }

    out.push("".to_string());
    out.push("## Ownership".to_string());
    out.push("".to_string());
    if owner.is_resolved() {
        out.push(format!("- **Owner team:** {}", owner.owner_team));
        if owner.has_channel() {
            out.push(format!("- **Channel:** {}", owner.contact_channel));
        } else {
            out.push("- **Channel:** (missing channel)".to_string());
        }
        if owner.resolved_via_registry {
            out.push("- Owner resolved via registry.".to_string());
        }
    } else {
        out.push("Owner unknown. Add this asset to the registry or route manually.".to_string());
    }

    if !history.is_empty() {
        out.push("".to_string());
        out.push("## Actions".to_string());
        out.push("".to_string());
        for r in history {
            out.push(format!(
                "- {} {} by {}: {}",
                r.timestamp, r.action, r.actor, r.details
            ));
        }
    }
    out.push("".to_string());
    out.join("\n")
}
