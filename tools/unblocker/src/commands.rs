use crate::cli::{Cli, Command, QueueArgs};
use anyhow::{anyhow, Result};
use serde_json::json;
use unblocker_core::audit::action::ActionRecord;
use unblocker_core::audit::clock::SystemClock;
use unblocker_core::audit::log::ActionLog;
use unblocker_core::config::AppConfig;
use unblocker_core::error::CoreError;
use unblocker_core::friction::metrics::compute_friction_metrics;
use unblocker_core::friction::render::render_friction_markdown;
use unblocker_core::ownership::directory::{
    asset_types, owner_card, render_directory_markdown, render_owner_card, search,
};
use unblocker_core::ownership::resolver::resolve_owner;
use unblocker_core::store::dataset::Dataset;
use unblocker_core::store::model::{Incident, IncidentStatus, Severity};
use unblocker_core::triage::query::{
    distinct_severities, distinct_statuses, distinct_types, query, IncidentQuery,
};
use unblocker_core::triage::render::{
    render_incident_card, render_queue_markdown, render_summary_markdown,
};
use unblocker_core::triage::summary::{pick_unresolved, summarize, unresolved_picklist};
use unblocker_core::workflow::actions::{ActionDesk, ClaimReason};

pub fn execute(args: &Cli, cfg: &AppConfig, dataset: &mut Dataset) -> Result<String> {
    match &args.command {
        Command::Queue(q) => queue(args.json, dataset, q),
        Command::Show { incident_id } => show(args.json, dataset, incident_id),
        Command::Claim {
            incident_id,
            actor,
            reason,
        } => {
            let actor = actor.clone().unwrap_or_else(|| cfg.audit.default_actor.clone());
            let reason = reason
                .clone()
                .unwrap_or_else(|| ClaimReason::NeedOwnerConfirmation.label().to_string());
            let incident = pick_unresolved(&dataset.incidents, incident_id)?.clone();
            let mut desk = ActionDesk {
                registry: &dataset.registry,
                log: &mut dataset.actions,
                clock: &SystemClock,
            };
            let record = desk.claim(&incident, &actor, &reason);
            let tail = dataset.actions.latest(cfg.audit.tail);
            if args.json {
                return to_json(&json!({ "record": record, "audit_trail": tail }));
            }
            Ok(format!(
                "Claim recorded (demo).\n\n{}",
                render_audit_tail(tail)?
            ))
        }
        Command::Alert { incident_id, actor } => {
            let actor = actor.clone().unwrap_or_else(|| cfg.audit.default_actor.clone());
            let incident = pick_unresolved(&dataset.incidents, incident_id)?.clone();
            let mut desk = ActionDesk {
                registry: &dataset.registry,
                log: &mut dataset.actions,
                clock: &SystemClock,
            };
            let sent = desk.send_alert(&incident, &actor)?;
            let tail = dataset.actions.latest(cfg.audit.tail);
            if args.json {
                return to_json(&json!({ "alert": sent, "audit_trail": tail }));
            }
            Ok(format!(
                "Teams alert generated (demo).\n\n```\n{}\n```\n\n{}",
                sent.message,
                render_audit_tail(tail)?
            ))
        }
        Command::Directory {
            asset_type,
            search: needle,
            asset,
        } => {
            let types = asset_types(&dataset.registry);
            let Some(asset_type) = asset_type.clone().or_else(|| types.first().cloned()) else {
                return Ok("_The ownership registry is empty._".to_string());
            };
            let listing = search(&dataset.registry, &asset_type, needle);
            let card = asset.as_deref().and_then(|name| owner_card(&listing, name));
            if args.json {
                return to_json(&json!({
                    "asset_types": types,
                    "asset_type": asset_type,
                    "assets": listing,
                    "owner_card": card,
                }));
            }
            let mut out = render_directory_markdown(&asset_type, &listing);
            match (asset, card) {
                (Some(_), Some(card)) => out.push_str(&format!("\n{}", render_owner_card(&card))),
                (Some(name), None) => {
                    out.push_str(&format!("\n_No {} asset named {} in this listing._\n", asset_type, name))
                }
                _ => {}
            }
            Ok(out)
        }
        Command::Friction => {
            let Some(now) = dataset.friction_now else {
                return Ok("_The friction table is empty._".to_string());
            };
            let metrics = compute_friction_metrics(&dataset.friction, now);
            if args.json {
                return to_json(&metrics);
            }
            Ok(render_friction_markdown(&metrics))
        }
    }
}

fn queue(as_json: bool, dataset: &Dataset, args: &QueueArgs) -> Result<String> {
    let q = build_query(&dataset.incidents, args);
    let summary = summarize(&dataset.incidents);
    let view = query(&dataset.incidents, &q);
    if as_json {
        let actionable: Vec<&str> = unresolved_picklist(&dataset.incidents)
            .iter()
            .map(|i| i.incident_id.as_str())
            .collect();
        let reasons: Vec<&str> = ClaimReason::ALL.iter().map(|r| r.label()).collect();
        return to_json(&json!({
            "summary": summary,
            "filters": q,
            "options": {
                "statuses": distinct_statuses(&dataset.incidents),
                "severities": distinct_severities(&dataset.incidents),
                "incident_types": distinct_types(&dataset.incidents),
                "actionable_incidents": actionable,
                "claim_reasons": reasons,
            },
            "incidents": view,
        }));
    }
    Ok(format!(
        "{}\n{}",
        render_summary_markdown(&summary),
        render_queue_markdown(&view)
    ))
}

fn show(as_json: bool, dataset: &Dataset, incident_id: &str) -> Result<String> {
    let incident = find_incident(dataset, incident_id)?;
    let owner = resolve_owner(incident, &dataset.registry);
    let history: Vec<&ActionRecord> = dataset.actions.for_incident(incident_id).collect();
    if as_json {
        return to_json(&json!({ "incident": incident, "owner": owner, "actions": history }));
    }
    Ok(render_incident_card(incident, &owner, &history))
}

/// Start from the console defaults and replace whichever dimensions were given.
fn build_query(incidents: &[Incident], args: &QueueArgs) -> IncidentQuery {
    let mut q = IncidentQuery::console_default(incidents);
    if args.all_statuses {
        q.statuses.clear();
    } else if !args.statuses.is_empty() {
        q.statuses = args.statuses.iter().map(|s| IncidentStatus::from(s.as_str())).collect();
    }
    if !args.severities.is_empty() {
        q.severities = args.severities.iter().map(|s| Severity::from(s.as_str())).collect();
    }
    if !args.types.is_empty() {
        q.incident_types = args.types.clone();
    }
    q.owner_gap_only = args.missing_owner;
    q.search_text = args.search.clone();
    q
}

fn find_incident<'a>(dataset: &'a Dataset, incident_id: &str) -> Result<&'a Incident> {
    dataset
        .incident(incident_id)
        .ok_or_else(|| anyhow!(CoreError::UnknownIncident(incident_id.to_string())))
}

fn render_audit_tail(records: &[ActionRecord]) -> Result<String> {
    let mut out = Vec::new();
    out.push("# Audit trail (latest)".to_string());
    out.push("".to_string());
    out.push("| Timestamp | Incident | Action | Actor | Details |".to_string());
    out.push("|---|---|---|---|---|".to_string());
    for r in records {
        out.push(format!(
            "| {} | {} | {} | {} | {} |",
            r.timestamp, r.incident_id, r.action, r.actor, r.details
        ));
    }
    out.push("".to_string());
    out.push("```csv".to_string());
    out.push(ActionLog::to_csv(records)?.trim_end().to_string());
    out.push("```".to_string());
    Ok(out.join("\n"))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
