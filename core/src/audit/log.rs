use super::action::{ActionKind, ActionRecord};
use crate::error::CoreResult;
use serde::Serialize;

/// Session-scoped, append-only audit trail of operator actions.
///
/// Records are never updated or removed. Each append receives the next
/// sequence number, so insertion order is explicit even after rows from the
/// action table are loaded ahead of session actions.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ActionLog {
    records: Vec<ActionRecord>,
    next_seq: u64,
}

impl ActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the log with previously recorded rows, renumbering them in order.
    pub fn from_records(records: Vec<ActionRecord>) -> Self {
        let mut log = Self::new();
        for record in records {
            log.push(record);
        }
        log
    }

    pub fn record(
        &mut self,
        timestamp: impl Into<String>,
        incident_id: &str,
        action: ActionKind,
        actor: &str,
        details: &str,
    ) -> &ActionRecord {
        self.push(ActionRecord {
            seq: 0,
            timestamp: timestamp.into(),
            incident_id: incident_id.to_string(),
            action,
            actor: actor.to_string(),
            details: details.to_string(),
        })
    }

    fn push(&mut self, mut record: ActionRecord) -> &ActionRecord {
        self.next_seq += 1;
        record.seq = self.next_seq;
        log::debug!(
            "action #{} {} on {} by '{}'",
            record.seq,
            record.action,
            record.incident_id,
            record.actor
        );
        self.records.push(record);
        &self.records[self.records.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ActionRecord] {
        &self.records
    }

    /// Last `n` records in insertion order.
    pub fn latest(&self, n: usize) -> &[ActionRecord] {
        let start = self.records.len().saturating_sub(n);
        &self.records[start..]
    }

    pub fn for_incident<'a>(
        &'a self,
        incident_id: &'a str,
    ) -> impl Iterator<Item = &'a ActionRecord> + 'a {
        self.records
            .iter()
            .filter(move |r| r.incident_id == incident_id)
    }

    /// Render records in the action table's column layout.
    pub fn to_csv(records: &[ActionRecord]) -> CoreResult<String> {
        let mut wtr = csv::WriterBuilder::new().from_writer(vec![]);
        wtr.write_record(["timestamp", "incident_id", "action", "actor", "details"])?;
        for r in records {
            wtr.write_record([
                r.timestamp.as_str(),
                r.incident_id.as_str(),
                r.action.as_str(),
                r.actor.as_str(),
                r.details.as_str(),
            ])?;
        }
        let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
        Ok(String::from_utf8_lossy(&bytes).replace("\r\n", "\n"))
    }
}
