use super::metrics::{FrictionMetrics, GroupDelay};
use crate::store::timestamps::format_table_datetime;

/// Shown wherever an aggregate has no data behind it.
pub const PLACEHOLDER: &str = "—";

pub fn fmt_hours(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.1}", v),
        _ => PLACEHOLDER.to_string(),
    }
}

pub fn fmt_percent(value: Option<u32>) -> String {
    match value {
        Some(v) => format!("{}%", v),
        None => PLACEHOLDER.to_string(),
    }
}

pub fn render_friction_markdown(m: &FrictionMetrics) -> String {
    let mut out = Vec::new();
    out.push("# Friction insights".to_string());
    out.push("".to_string());
    out.push(format!(
        "_Ages measured against {} (latest submission + 12h)._",
        format_table_datetime(&m.now_reference)
    ));
    out.push("".to_string());
    out.push("| Avg cycle time (hrs) | % over SLA | Currently waiting |".to_string());
    out.push("|---|---|---|".to_string());
    out.push(format!(
        "| {} | {} | {} |",
        fmt_hours(m.avg_cycle_time_hours),
        fmt_percent(m.pct_over_sla),
        m.currently_waiting
    ));
    out.push("".to_string());

    push_groups(&mut out, "Avg delay by request type", "Request type", &m.by_request_type);
    push_groups(&mut out, "Avg delay by receiving team", "Team", &m.by_receiving_team);

    out.push("## Top waiting items (SLA-breached)".to_string());
    out.push("".to_string());
    if m.top_stuck.is_empty() {
        out.push("_Nothing waiting past SLA._".to_string());
    } else {
        out.push("| Request | Type | From | To | Submitted | SLA (hrs) | Age (hrs) |".to_string());
        out.push("|---|---|---|---|---|---|---|".to_string());
        for a in &m.top_stuck {
            out.push(format!(
                "| {} | {} | {} | {} | {} | {} | {:.1} |",
                a.item.request_id,
                a.item.request_type,
                a.item.from_team,
                a.item.to_team,
                format_table_datetime(&a.item.submitted_datetime),
                fmt_hours(a.item.sla_hours),
                a.age_hours
            ));
        }
    }
    out.push("".to_string());
    out.join("\n")
}

fn push_groups(out: &mut Vec<String>, title: &str, key_label: &str, groups: &[GroupDelay]) {
    out.push(format!("## {}", title));
    out.push("".to_string());
    out.push(format!("| {} | Avg age (hrs) | Items |", key_label));
    out.push("|---|---|---|".to_string());
    for g in groups {
        out.push(format!("| {} | {:.1} | {} |", g.key, g.avg_age_hours, g.count));
    }
    out.push("".to_string());
}
