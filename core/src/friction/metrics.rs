use crate::store::model::{FrictionItem, FrictionStatus};
use crate::store::timestamps::{hours_between, table_datetime};
use serde::Serialize;
use std::collections::HashMap;
use time::{Duration, PrimitiveDateTime};

/// Offset added to the latest submission to stand in for "now".
pub const NOW_OFFSET_HOURS: i64 = 12;
pub const TOP_STUCK_LIMIT: usize = 10;

/// Dataset-derived reference time: latest submission plus twelve hours.
/// `None` for an empty dataset.
pub fn now_reference(items: &[FrictionItem]) -> Option<PrimitiveDateTime> {
    items
        .iter()
        .map(|i| i.submitted_datetime)
        .max()
        .map(|latest| latest + Duration::hours(NOW_OFFSET_HOURS))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgedFrictionItem {
    #[serde(flatten)]
    pub item: FrictionItem,
    pub age_hours: f64,
    pub sla_breached: bool,
}

pub fn age_item(item: &FrictionItem, now_reference: PrimitiveDateTime) -> AgedFrictionItem {
    let end = item.completed_datetime.unwrap_or(now_reference);
    let age_hours = hours_between(item.submitted_datetime, end);
    AgedFrictionItem {
        item: item.clone(),
        age_hours,
        sla_breached: item.sla_hours.is_some_and(|sla| age_hours > sla),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupDelay {
    pub key: String,
    pub avg_age_hours: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrictionMetrics {
    #[serde(with = "table_datetime")]
    pub now_reference: PrimitiveDateTime,
    pub items: Vec<AgedFrictionItem>,
    /// Mean age of completed items; `None` when nothing has completed.
    pub avg_cycle_time_hours: Option<f64>,
    /// Share of all items over SLA, as a rounded percentage.
    pub pct_over_sla: Option<u32>,
    pub currently_waiting: usize,
    pub by_request_type: Vec<GroupDelay>,
    pub by_receiving_team: Vec<GroupDelay>,
    pub top_stuck: Vec<AgedFrictionItem>,
}

pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 {
        None
    } else {
        Some(sum / n as f64)
    }
}

pub fn compute_friction_metrics(
    items: &[FrictionItem],
    now_reference: PrimitiveDateTime,
) -> FrictionMetrics {
    let aged: Vec<AgedFrictionItem> = items.iter().map(|i| age_item(i, now_reference)).collect();

    let avg_cycle_time_hours = mean(
        aged.iter()
            .filter(|a| a.item.status == FrictionStatus::Completed)
            .map(|a| a.age_hours),
    );
    let pct_over_sla = mean(aged.iter().map(|a| if a.sla_breached { 1.0 } else { 0.0 }))
        .map(|share| (share * 100.0).round_ties_even() as u32);
    let currently_waiting = aged
        .iter()
        .filter(|a| a.item.status == FrictionStatus::Waiting)
        .count();

    let by_request_type = group_mean(&aged, |a| &a.item.request_type);
    let by_receiving_team = group_mean(&aged, |a| &a.item.to_team);

    let mut top_stuck: Vec<AgedFrictionItem> = aged
        .iter()
        .filter(|a| a.item.status == FrictionStatus::Waiting && a.sla_breached)
        .cloned()
        .collect();
    // stable: equal ages keep dataset order
    top_stuck.sort_by(|a, b| b.age_hours.total_cmp(&a.age_hours));
    top_stuck.truncate(TOP_STUCK_LIMIT);

    FrictionMetrics {
        now_reference,
        items: aged,
        avg_cycle_time_hours,
        pct_over_sla,
        currently_waiting,
        by_request_type,
        by_receiving_team,
        top_stuck,
    }
}

/// Mean age per key, highest first. Groups tie-break on key.
fn group_mean<F>(aged: &[AgedFrictionItem], key: F) -> Vec<GroupDelay>
where
    F: Fn(&AgedFrictionItem) -> &String,
{
    let mut sums: HashMap<&str, (f64, usize)> = HashMap::new();
    for a in aged {
        let slot = sums.entry(key(a).as_str()).or_insert((0.0, 0));
        slot.0 += a.age_hours;
        slot.1 += 1;
    }
    let mut out: Vec<GroupDelay> = sums
        .into_iter()
        .map(|(k, (sum, count))| GroupDelay {
            key: k.to_string(),
            avg_age_hours: sum / count as f64,
            count,
        })
        .collect();
    out.sort_by(|a, b| {
        b.avg_age_hours
            .total_cmp(&a.avg_age_hours)
            .then_with(|| a.key.cmp(&b.key))
    });
    out
}
