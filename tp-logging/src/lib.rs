//! tp-logging: append-only NDJSON event logs for game post-mortems.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use thiserror::Error;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Milliseconds since the Unix epoch.
pub fn now_ms() -> u64 {
    let d = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    d.as_millis() as u64
}

/// One recorded delivery.
#[derive(Debug, Clone, Serialize)]
pub struct RollEventV1 {
    pub event: &'static str,
    pub ts_ms: u64,
    pub game_id: u64,
    pub roll_index: u32,
    pub pins: u8,
}

/// A completed, scored game.
#[derive(Debug, Clone, Serialize)]
pub struct GameScoredEventV1 {
    pub event: &'static str,
    pub ts_ms: u64,
    pub game_id: u64,
    pub rolls: Vec<u8>,
    pub total_score: u16,
}

#[derive(Debug, Error)]
pub enum NdjsonError {
    #[error("ndjson io: {0}")]
    Io(#[from] io::Error),
    #[error("ndjson encode: {0}")]
    Json(#[from] serde_json::Error),
}

/// Append-only NDJSON writer.
///
/// Contract: each call writes exactly one JSON object followed by a newline.
pub struct NdjsonWriter {
    w: BufWriter<File>,
    lines_since_flush: u64,
    flush_every_lines: u64,
}

impl NdjsonWriter {
    /// Open a file for append. Creates it if it doesn't exist.
    pub fn open_append(path: impl AsRef<Path>) -> Result<Self, NdjsonError> {
        Self::open_append_with_flush(path, 0)
    }

    /// `flush_every_lines=0` disables periodic flushing.
    pub fn open_append_with_flush(
        path: impl AsRef<Path>,
        flush_every_lines: u64,
    ) -> Result<Self, NdjsonError> {
        let f = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            w: BufWriter::new(f),
            lines_since_flush: 0,
            flush_every_lines,
        })
    }

    pub fn write_event<T: Serialize>(&mut self, event: &T) -> Result<(), NdjsonError> {
        let mut buf = serde_json::to_vec(event)?;
        buf.push(b'\n');
        self.w.write_all(&buf)?;
        self.lines_since_flush += 1;
        if self.flush_every_lines > 0 && self.lines_since_flush >= self.flush_every_lines {
            self.flush()?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), NdjsonError> {
        self.w.flush()?;
        self.lines_since_flush = 0;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use serde_json::Value;

    fn read_ndjson_lenient(path: &Path) -> Vec<Value> {
        let s = fs::read_to_string(path).expect("read");
        let mut out = Vec::new();
        for line in s.lines() {
            if line.trim().is_empty() {
                continue;
            }
            if let Ok(v) = serde_json::from_str::<Value>(line) {
                out.push(v);
            }
        }
        out
    }

    #[test]
    fn version_is_set() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn writes_one_valid_json_object_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.ndjson");
        let mut w = NdjsonWriter::open_append(&path).unwrap();

        w.write_event(&RollEventV1 {
            event: "roll",
            ts_ms: now_ms(),
            game_id: 1,
            roll_index: 0,
            pins: 10,
        })
        .unwrap();
        w.write_event(&GameScoredEventV1 {
            event: "game_scored",
            ts_ms: now_ms(),
            game_id: 1,
            rolls: vec![10; 12],
            total_score: 300,
        })
        .unwrap();
        w.flush().unwrap();

        let vals = read_ndjson_lenient(&path);
        assert_eq!(vals.len(), 2);
        assert_eq!(vals[0]["event"], "roll");
        assert_eq!(vals[0]["pins"], 10);
        assert_eq!(vals[1]["event"], "game_scored");
        assert_eq!(vals[1]["total_score"], 300);
    }

    #[test]
    fn lenient_reader_tolerates_trailing_partial_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.ndjson");

        {
            let mut w = NdjsonWriter::open_append(&path).unwrap();
            w.write_event(&RollEventV1 {
                event: "roll",
                ts_ms: 1,
                game_id: 7,
                roll_index: 3,
                pins: 4,
            })
            .unwrap();
            w.flush().unwrap();
        }

        // Simulate crash: append a partial JSON line (no newline, invalid JSON).
        let mut f = OpenOptions::new().append(true).open(&path).unwrap();
        f.write_all(br#"{"event":"roll","pins":"#).unwrap();
        f.flush().unwrap();

        let vals = read_ndjson_lenient(&path);
        assert_eq!(vals.len(), 1);
        assert_eq!(vals[0]["game_id"], 7);
    }

    #[test]
    fn periodic_flush_after_n_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.ndjson");
        let mut w = NdjsonWriter::open_append_with_flush(&path, 2).unwrap();

        for i in 0..4u32 {
            w.write_event(&RollEventV1 {
                event: "roll",
                ts_ms: 1,
                game_id: 0,
                roll_index: i,
                pins: 0,
            })
            .unwrap();
        }

        // Two flushes have happened without an explicit flush() call.
        let vals = read_ndjson_lenient(&path);
        assert_eq!(vals.len(), 4);
    }
}
