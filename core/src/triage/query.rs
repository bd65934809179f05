use crate::store::model::{Incident, IncidentStatus, Severity};
use serde::{Deserialize, Serialize};

/// Filter set for the incident queue.
///
/// Each dimension matches any of its values; dimensions are combined with
/// AND. An empty dimension does not restrict.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncidentQuery {
    pub statuses: Vec<IncidentStatus>,
    pub severities: Vec<Severity>,
    pub incident_types: Vec<String>,
    pub owner_gap_only: bool,
    pub search_text: String,
}

impl IncidentQuery {
    /// Console defaults: the three active statuses plus every severity and
    /// type present in the data.
    pub fn console_default(incidents: &[Incident]) -> Self {
        Self {
            statuses: vec![
                IncidentStatus::Open,
                IncidentStatus::Investigating,
                IncidentStatus::Blocked,
            ],
            severities: distinct_severities(incidents),
            incident_types: distinct_types(incidents),
            owner_gap_only: false,
            search_text: String::new(),
        }
    }

    pub fn matches(&self, incident: &Incident) -> bool {
        if !self.statuses.is_empty() && !self.statuses.contains(&incident.status) {
            return false;
        }
        if !self.severities.is_empty() && !self.severities.contains(&incident.severity) {
            return false;
        }
        if !self.incident_types.is_empty()
            && !self.incident_types.iter().any(|t| *t == incident.incident_type)
        {
            return false;
        }
        if self.owner_gap_only && !incident.has_owner_gap() {
            return false;
        }
        if !self.search_text.is_empty() {
            let needle = self.search_text.to_lowercase();
            let hit = [
                &incident.incident_id,
                &incident.title,
                &incident.asset_name,
            ]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }
        true
    }
}

/// Filter then order by severity rank and creation time. Ties keep input order.
pub fn query<'a>(incidents: &'a [Incident], q: &IncidentQuery) -> Vec<&'a Incident> {
    let mut view: Vec<&Incident> = incidents.iter().filter(|i| q.matches(i)).collect();
    view.sort_by_key(|i| (i.severity.rank(), i.created_at));
    view
}

pub fn distinct_statuses(incidents: &[Incident]) -> Vec<IncidentStatus> {
    let mut out: Vec<IncidentStatus> = incidents.iter().map(|i| i.status.clone()).collect();
    out.sort_by(|a, b| a.as_str().cmp(b.as_str()));
    out.dedup();
    out
}

pub fn distinct_severities(incidents: &[Incident]) -> Vec<Severity> {
    let mut out: Vec<Severity> = incidents.iter().map(|i| i.severity.clone()).collect();
    out.sort_by(|a, b| a.as_str().cmp(b.as_str()));
    out.dedup();
    out
}

pub fn distinct_types(incidents: &[Incident]) -> Vec<String> {
    let mut out: Vec<String> = incidents.iter().map(|i| i.incident_type.clone()).collect();
    out.sort();
    out.dedup();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;
    use time::PrimitiveDateTime;

    fn inc(
        id: &str,
        severity: &str,
        status: &str,
        kind: &str,
        created_at: PrimitiveDateTime,
    ) -> Incident {
        Incident {
            incident_id: id.into(),
            severity: severity.into(),
            status: status.into(),
            incident_type: kind.into(),
            title: format!("{} title", id),
            asset_type: "Service".into(),
            asset_name: format!("{}-svc", id.to_lowercase()),
            owner_team: Some("Ops".into()),
            contact_channel: Some("#ops".into()),
            created_at,
            updated_at: created_at,
            blocked_reason: None,
            description: None,
        }
    }

    fn ids(view: &[&Incident]) -> Vec<String> {
        view.iter().map(|i| i.incident_id.clone()).collect()
    }

    #[test]
    fn sev1_precedes_earlier_sev2() {
        let incidents = vec![
            inc("A", "Sev2", "Open", "Outage", datetime!(2025-03-01 08:00:00)),
            inc("B", "Sev1", "Open", "Outage", datetime!(2025-03-02 08:00:00)),
        ];
        let view = query(&incidents, &IncidentQuery::default());
        assert_eq!(ids(&view), vec!["B", "A"]);
    }

    #[test]
    fn unfiltered_returns_all_ordered_by_rank_then_created() {
        let incidents = vec![
            inc("X", "P0", "Open", "Outage", datetime!(2025-03-01 00:00:00)),
            inc("C", "Sev3", "Resolved", "Access", datetime!(2025-03-01 02:00:00)),
            inc("A", "Sev1", "Open", "Outage", datetime!(2025-03-01 05:00:00)),
            inc("B", "Sev1", "Blocked", "Outage", datetime!(2025-03-01 01:00:00)),
            inc("D", "Sev2", "Open", "Access", datetime!(2025-03-01 03:00:00)),
        ];
        let view = query(&incidents, &IncidentQuery::default());
        assert_eq!(ids(&view), vec!["B", "A", "D", "C", "X"]);
    }

    #[test]
    fn ties_keep_input_order() {
        let t = datetime!(2025-03-01 00:00:00);
        let incidents = vec![
            inc("first", "Sev2", "Open", "Outage", t),
            inc("second", "Sev2", "Open", "Outage", t),
            inc("third", "Sev2", "Open", "Outage", t),
        ];
        let view = query(&incidents, &IncidentQuery::default());
        assert_eq!(ids(&view), vec!["first", "second", "third"]);
    }

    #[test]
    fn dimensions_or_within_and_across() {
        let t = datetime!(2025-03-01 00:00:00);
        let incidents = vec![
            inc("A", "Sev1", "Open", "Outage", t),
            inc("B", "Sev2", "Blocked", "Access", t),
            inc("C", "Sev1", "Resolved", "Outage", t),
            inc("D", "Sev3", "Investigating", "Outage", t),
        ];
        let q = IncidentQuery {
            statuses: vec!["Open".into(), "Investigating".into()],
            severities: vec![Severity::Sev1, Severity::Sev3],
            incident_types: vec!["Outage".into()],
            ..IncidentQuery::default()
        };
        assert_eq!(ids(&query(&incidents, &q)), vec!["A", "D"]);
    }

    #[test]
    fn owner_gap_only_keeps_blank_owners() {
        let t = datetime!(2025-03-01 00:00:00);
        let mut blank = inc("A", "Sev1", "Open", "Outage", t);
        blank.owner_team = Some("  ".into());
        let mut missing = inc("B", "Sev2", "Open", "Outage", t);
        missing.owner_team = None;
        let owned = inc("C", "Sev1", "Open", "Outage", t);
        let incidents = vec![blank, missing, owned];
        let q = IncidentQuery {
            owner_gap_only: true,
            ..IncidentQuery::default()
        };
        assert_eq!(ids(&query(&incidents, &q)), vec!["A", "B"]);
    }

    #[test]
    fn search_matches_id_title_or_asset_case_insensitively() {
        let t = datetime!(2025-03-01 00:00:00);
        let mut by_title = inc("INC-1", "Sev2", "Open", "Outage", t);
        by_title.title = "Checkout latency spike".into();
        let mut by_asset = inc("INC-2", "Sev2", "Open", "Outage", t);
        by_asset.asset_name = "CHECKOUT-api".into();
        let by_id = inc("CHK-3", "Sev2", "Open", "Outage", t);
        let none = inc("INC-4", "Sev2", "Open", "Outage", t);
        let incidents = vec![by_title, by_asset, by_id, none];

        let q = IncidentQuery {
            search_text: "checkout".into(),
            ..IncidentQuery::default()
        };
        assert_eq!(ids(&query(&incidents, &q)), vec!["INC-1", "INC-2"]);

        let q = IncidentQuery {
            search_text: "chk".into(),
            ..IncidentQuery::default()
        };
        assert_eq!(ids(&query(&incidents, &q)), vec!["CHK-3"]);
    }

    #[test]
    fn query_is_idempotent() {
        let incidents = vec![
            inc("A", "Sev3", "Open", "Outage", datetime!(2025-03-01 04:00:00)),
            inc("B", "Sev1", "Blocked", "Access", datetime!(2025-03-01 03:00:00)),
            inc("C", "Sev2", "Open", "Outage", datetime!(2025-03-01 02:00:00)),
        ];
        let q = IncidentQuery::console_default(&incidents);
        assert_eq!(query(&incidents, &q), query(&incidents, &q));
    }

    #[test]
    fn console_default_excludes_resolved() {
        let t = datetime!(2025-03-01 00:00:00);
        let incidents = vec![
            inc("A", "Sev1", "Resolved", "Outage", t),
            inc("B", "Sev2", "Blocked", "Access", t),
        ];
        let q = IncidentQuery::console_default(&incidents);
        assert_eq!(q.severities, vec![Severity::Sev1, Severity::Sev2]);
        assert_eq!(q.incident_types, vec!["Access", "Outage"]);
        assert_eq!(ids(&query(&incidents, &q)), vec!["B"]);
    }
}
