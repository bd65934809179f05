use time::macros::datetime;
use time::{Duration, PrimitiveDateTime};
use unblocker_core::audit::action::ActionKind;
use unblocker_core::audit::clock::FixedClock;
use unblocker_core::friction::metrics::compute_friction_metrics;
use unblocker_core::ownership::resolver::resolve_owner;
use unblocker_core::store::dataset::Dataset;
use unblocker_core::store::model::{FrictionItem, FrictionStatus, Incident, RegistryEntry};
use unblocker_core::triage::query::{query, IncidentQuery};
use unblocker_core::workflow::actions::{ActionDesk, ClaimReason};

fn incident(id: &str, severity: &str, owner: Option<&str>, asset: &str, created: PrimitiveDateTime) -> Incident {
    Incident {
        incident_id: id.to_string(),
        severity: severity.into(),
        status: "Open".into(),
        incident_type: "Outage".to_string(),
        title: format!("{} title", id),
        asset_type: "Database".to_string(),
        asset_name: asset.to_string(),
        owner_team: owner.map(|o| o.to_string()),
        contact_channel: owner.map(|o| format!("#{}", o.to_lowercase())),
        created_at: created,
        updated_at: created,
        blocked_reason: None,
        description: None,
    }
}

fn dataset() -> Dataset {
    Dataset::from_tables(
        vec![
            incident("INC-200", "Sev2", Some("Payments"), "ledger-db", datetime!(2025-03-01 06:00:00)),
            incident("INC-100", "Sev1", None, "orders-db", datetime!(2025-03-01 09:00:00)),
            incident("INC-300", "Sev3", None, "scratch-db", datetime!(2025-03-01 07:00:00)),
        ],
        vec![RegistryEntry {
            asset_type: "Database".to_string(),
            asset_name: "orders-db".to_string(),
            owner_team: "DataPlatform".to_string(),
            contact_channel: "#dataplat-oncall".to_string(),
            manager_email: "lead@example.com".to_string(),
            runbook_link: "https://runbooks.example.com/orders-db".to_string(),
        }],
        vec![FrictionItem {
            request_id: "R1".to_string(),
            request_type: "Access".to_string(),
            from_team: "Ops".to_string(),
            to_team: "IAM".to_string(),
            submitted_datetime: datetime!(2025-03-01 00:00:00),
            completed_datetime: None,
            sla_hours: Some(24.0),
            status: FrictionStatus::Waiting,
        }],
        Vec::new(),
    )
}

#[test]
fn registry_fallback_resolves_orders_db() {
    let ds = dataset();
    let owner = resolve_owner(ds.incident("INC-100").unwrap(), &ds.registry);
    assert_eq!(owner.owner_team, "DataPlatform");
    assert_eq!(owner.contact_channel, "#dataplat-oncall");
    assert!(owner.resolved_via_registry);

    let direct = resolve_owner(ds.incident("INC-200").unwrap(), &ds.registry);
    assert_eq!(direct.owner_team, "Payments");
    assert!(!direct.resolved_via_registry);

    let unknown = resolve_owner(ds.incident("INC-300").unwrap(), &ds.registry);
    assert!(!unknown.is_resolved());
    assert!(unknown.contact_channel.is_empty());
}

#[test]
fn later_sev1_heads_the_queue() {
    let ds = dataset();
    let view = query(&ds.incidents, &IncidentQuery::default());
    let ids: Vec<&str> = view.iter().map(|i| i.incident_id.as_str()).collect();
    assert_eq!(ids, vec!["INC-100", "INC-200", "INC-300"]);
}

#[test]
fn claim_then_alert_then_rejected_alert() {
    let mut ds = dataset();
    let clock = FixedClock("2025-03-01 10:00:00".to_string());
    let inc_100 = ds.incident("INC-100").unwrap().clone();
    let inc_300 = ds.incident("INC-300").unwrap().clone();

    let mut desk = ActionDesk {
        registry: &ds.registry,
        log: &mut ds.actions,
        clock: &clock,
    };
    desk.claim(&inc_100, "Demo User", ClaimReason::BlockedUnknownOwner.label());
    let sent = desk.send_alert(&inc_100, "Demo User").unwrap();
    assert!(sent.message.contains("INCIDENT: INC-100 (Sev1)"));
    assert!(desk.send_alert(&inc_300, "Demo User").is_err());

    let kinds: Vec<ActionKind> = ds.actions.records().iter().map(|r| r.action.clone()).collect();
    assert_eq!(kinds, vec![ActionKind::Claimed, ActionKind::TeamsAlertSent]);
    assert_eq!(ds.actions.latest(1)[0].details, "Posted to #dataplat-oncall");
}

#[test]
fn in_flight_friction_item_breaches_after_thirty_hours() {
    let ds = dataset();
    let now = datetime!(2025-03-01 00:00:00) + Duration::hours(30);
    let m = compute_friction_metrics(&ds.friction, now);
    assert_eq!(m.items[0].age_hours, 30.0);
    assert!(m.items[0].sla_breached);
    assert_eq!(m.top_stuck.len(), 1);

    // the loaded dataset pins its own reference at latest submission + 12h
    let pinned = compute_friction_metrics(&ds.friction, ds.friction_now.unwrap());
    assert_eq!(pinned.items[0].age_hours, 12.0);
    assert!(!pinned.items[0].sla_breached);
}
