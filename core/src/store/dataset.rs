use super::loader::{
    read_action_table, read_required_table, TableSources, FRICTION_TABLE, INCIDENTS_TABLE,
    REGISTRY_TABLE,
};
use super::model::{FrictionItem, Incident, RegistryEntry};
use crate::audit::action::ActionRecord;
use crate::audit::log::ActionLog;
use crate::error::CoreResult;
use crate::friction::metrics::now_reference;
use crate::ownership::registry::Registry;
use std::collections::HashSet;
use time::PrimitiveDateTime;

/// Everything loaded for one session. Incidents, registry and friction rows
/// are read-only; the action log only grows.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub incidents: Vec<Incident>,
    pub registry: Registry,
    pub friction: Vec<FrictionItem>,
    pub actions: ActionLog,
    /// Reference "now" for friction ages, fixed at load.
    pub friction_now: Option<PrimitiveDateTime>,
}

impl Dataset {
    pub fn load(sources: &TableSources) -> CoreResult<Self> {
        let incidents: Vec<Incident> = read_required_table(INCIDENTS_TABLE, &sources.incidents)?;
        let registry: Vec<RegistryEntry> = read_required_table(REGISTRY_TABLE, &sources.registry)?;
        let friction: Vec<FrictionItem> = read_required_table(FRICTION_TABLE, &sources.friction)?;
        let actions = read_action_table(&sources.actions);
        let dataset = Self::from_tables(incidents, registry, friction, actions);
        log::info!(
            "dataset loaded: {} incidents, {} registry entries, {} friction items, {} actions",
            dataset.incidents.len(),
            dataset.registry.len(),
            dataset.friction.len(),
            dataset.actions.len()
        );
        Ok(dataset)
    }

    pub fn from_tables(
        incidents: Vec<Incident>,
        registry: Vec<RegistryEntry>,
        friction: Vec<FrictionItem>,
        actions: Vec<ActionRecord>,
    ) -> Self {
        check_incidents(&incidents);
        check_friction(&friction);
        let friction_now = now_reference(&friction);
        Self {
            incidents,
            registry: Registry::from_entries(registry),
            friction,
            actions: ActionLog::from_records(actions),
            friction_now,
        }
    }

    /// First incident with the given id.
    pub fn incident(&self, incident_id: &str) -> Option<&Incident> {
        self.incidents.iter().find(|i| i.incident_id == incident_id)
    }
}

// Data-quality problems are reported but do not fail the load.
fn check_incidents(incidents: &[Incident]) {
    let mut seen = HashSet::new();
    for i in incidents {
        if !seen.insert(i.incident_id.as_str()) {
            log::warn!("duplicate incident id {}; lookups use the first row", i.incident_id);
        }
        if i.created_at > i.updated_at {
            log::warn!(
                "incident {} updated_at precedes created_at",
                i.incident_id
            );
        }
    }
}

fn check_friction(items: &[FrictionItem]) {
    for item in items.iter().filter(|i| i.sla_hours.is_none()) {
        log::warn!(
            "request {} has no SLA; it will never count as breached",
            item.request_id
        );
    }
}
