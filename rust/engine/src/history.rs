use serde::{Deserialize, Serialize};

use crate::action::ActionRecord;
use crate::cards::Card;
use crate::errors::EngineError;
use crate::showdown::HandResults;
use crate::state::{HandState, Phase};

use chrono::{SecondsFormat, Utc};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Complete audit record of one finished hand, serialized as one JSON line.
///
/// Together with the revealed seed (present for showdown hands) this is
/// enough for any observer to replay the shuffle and verify the deal.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandRecord {
    pub hand_id: String,
    pub table_id: String,
    pub hand_no: u64,
    /// Shuffle seed, present only when the hand reached showdown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub actions: Vec<ActionRecord>,
    pub board: Vec<Card>,
    pub results: HandResults,
    /// Timestamp when the record was written (RFC3339).
    #[serde(default)]
    pub ts: Option<String>,
}

impl HandRecord {
    pub fn from_completed(state: &HandState, log: &[ActionRecord]) -> Result<Self, EngineError> {
        if state.phase != Phase::Complete {
            return Err(EngineError::HandNotComplete);
        }
        let results = state.results.clone().ok_or(EngineError::HandNotComplete)?;
        Ok(Self {
            hand_id: state.id.clone(),
            table_id: state.table_id.clone(),
            hand_no: state.hand_no,
            seed: state.revealed_seed,
            actions: log.to_vec(),
            board: state.board.clone(),
            results,
            ts: None,
        })
    }
}

/// Appends completed hands to a JSONL file.
pub struct HistoryWriter {
    writer: BufWriter<File>,
}

impl HistoryWriter {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(f),
        })
    }

    pub fn write(&mut self, record: &HandRecord) -> std::io::Result<()> {
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}
