//! JSON-lines pose-frame replay.
//!
//! A recording is one JSON object per line; `pose` holds the landmark map
//! for a detected frame or `null` when the model saw nobody. This is the
//! camera-free counterpart of a live pose source and drives both the binary
//! and the integration tests.

use crate::app::{PoseSample, PoseSource};
use crate::landmarks::PoseFrame;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// One recorded capture
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordedFrame {
    /// Detected landmarks, or `None` when no pose was found in the frame
    pub pose: Option<PoseFrame>,
}

/// Pose source that replays a JSONL recording
pub struct ReplaySource<R: BufRead> {
    reader: R,
    line: usize,
}

impl ReplaySource<BufReader<File>> {
    /// Open a recording file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> ReplaySource<R> {
    /// Wrap any buffered reader producing JSONL frames
    pub fn new(reader: R) -> Self {
        Self { reader, line: 0 }
    }
}

impl<R: BufRead + Send> PoseSource for ReplaySource<R> {
    fn next_sample(&mut self) -> Result<Option<PoseSample>> {
        let mut buf = String::new();
        loop {
            buf.clear();
            if self.reader.read_line(&mut buf)? == 0 {
                return Ok(None);
            }
            self.line += 1;

            let trimmed = buf.trim();
            if trimmed.is_empty() {
                continue;
            }

            let frame: RecordedFrame = serde_json::from_str(trimmed)
                .map_err(|e| Error::FrameDecode(format!("line {}: {}", self.line, e)))?;

            return Ok(Some(match frame.pose {
                Some(pose) => PoseSample::Detected(pose),
                None => PoseSample::NotDetected,
            }));
        }
    }
}
