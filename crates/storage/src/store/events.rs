#![forbid(unsafe_code)]

use super::*;

/// One append-only change record. `seq` is contiguous from 1; consumers
/// keep the last sequence they rendered and pull everything newer.
#[derive(Clone, Debug, PartialEq)]
pub struct StoreEvent {
    pub seq: i64,
    pub ts_ms: i64,
    pub kind: &'static str,
    pub entity_id: String,
    pub payload: serde_json::Value,
}

impl MemoryStore {
    pub(crate) fn emit(
        &mut self,
        kind: &'static str,
        entity_id: String,
        payload: serde_json::Value,
    ) -> i64 {
        let seq = self.events.len() as i64 + 1;
        self.events.push(StoreEvent {
            seq,
            ts_ms: now_ms(),
            kind,
            entity_id,
            payload,
        });
        seq
    }

    pub fn last_seq(&self) -> i64 {
        self.events.len() as i64
    }

    /// Every event strictly after `after_seq`, oldest first.
    pub fn events_since(&self, after_seq: i64) -> &[StoreEvent] {
        let start = after_seq.clamp(0, self.events.len() as i64) as usize;
        &self.events[start..]
    }
}
