//! Recorded Frame Sources
//!
//! The landmark detector runs outside this crate. A [`FrameSource`] hands the
//! engine one frame of [`HandObservation`]s at a time; [`JsonLinesSource`]
//! reads a recorded session with one JSON object per line:
//!
//! ```text
//! {"hands":[{"handedness":"Right","landmarks":[[0.51,0.62], ... 21 points],"width":1280,"height":720}]}
//! {"hands":[]}
//! ```
//!
//! Coordinates are normalized to [0, 1] of the frame, as the detector
//! reports them. Blank lines are ignored; malformed lines are logged and
//! skipped so one bad record does not end a replay.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::{debug, warn};

use crate::gesture::landmark::HandObservation;

/// One captured frame
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FrameRecord {
    /// Hands detected in the frame, zero to two
    #[serde(default)]
    pub hands: Vec<HandObservation>,
}

/// Supplier of frames for the engine
pub trait FrameSource {
    /// Next frame, or `None` at the end of the input
    fn next_frame(&mut self) -> io::Result<Option<FrameRecord>>;
}

/// Frames read from a JSON-lines recording
#[derive(Debug)]
pub struct JsonLinesSource<R> {
    reader: R,
    line: String,
    line_number: usize,
    skipped: usize,
}

impl JsonLinesSource<BufReader<File>> {
    /// Open a recording file
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = File::open(path.as_ref())?;
        debug!("Opened frame recording {}", path.as_ref().display());
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> JsonLinesSource<R> {
    /// Read frames from any buffered reader
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            line_number: 0,
            skipped: 0,
        }
    }

    /// Lines that could not be parsed so far
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Lines read so far, including blank and skipped ones
    pub fn lines_read(&self) -> usize {
        self.line_number
    }
}

impl<R: BufRead> FrameSource for JsonLinesSource<R> {
    fn next_frame(&mut self) -> io::Result<Option<FrameRecord>> {
        loop {
            self.line.clear();
            if self.reader.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            let text = self.line.trim();
            if text.is_empty() {
                continue;
            }

            match serde_json::from_str::<FrameRecord>(text) {
                Ok(record) => return Ok(Some(record)),
                Err(e) => {
                    warn!("Skipping malformed frame on line {}: {}", self.line_number, e);
                    self.skipped += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::landmark::{Handedness, Landmark};
    use std::io::{Cursor, Write};

    fn frame_line(hand: &str) -> String {
        let landmarks = vec![[0.5, 0.5]; 21];
        serde_json::json!({
            "hands": [{
                "handedness": hand,
                "landmarks": landmarks,
                "width": 1280,
                "height": 720,
            }]
        })
        .to_string()
    }

    #[test]
    fn test_reads_frames_in_order() {
        let input = format!("{}\n{{\"hands\":[]}}\n{}\n", frame_line("Right"), frame_line("Left"));
        let mut source = JsonLinesSource::new(Cursor::new(input));

        let first = source.next_frame().unwrap().unwrap();
        assert_eq!(first.hands.len(), 1);
        assert_eq!(first.hands[0].handedness, Handedness::Right);
        assert_eq!(first.hands[0].landmarks[0], Landmark::new(0.5, 0.5));
        assert_eq!(first.hands[0].width, 1280);

        let second = source.next_frame().unwrap().unwrap();
        assert!(second.hands.is_empty());

        let third = source.next_frame().unwrap().unwrap();
        assert_eq!(third.hands[0].handedness, Handedness::Left);

        assert!(source.next_frame().unwrap().is_none());
        assert_eq!(source.lines_read(), 3);
    }

    #[test]
    fn test_skips_malformed_and_blank_lines() {
        let input = format!(
            "not json\n\n{{\"hands\":[{{\"handedness\":\"Middle\"}}]}}\n{}\n",
            frame_line("right")
        );
        let mut source = JsonLinesSource::new(Cursor::new(input));

        let frame = source.next_frame().unwrap().unwrap();
        assert_eq!(frame.hands[0].handedness, Handedness::Right);
        assert_eq!(source.skipped(), 2);
        assert!(source.next_frame().unwrap().is_none());
    }

    #[test]
    fn test_open_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{}", frame_line("Right")).unwrap();

        let mut source = JsonLinesSource::open(file.path()).unwrap();
        assert!(source.next_frame().unwrap().is_some());
        assert!(source.next_frame().unwrap().is_none());
    }

    #[test]
    fn test_open_missing_file() {
        assert!(JsonLinesSource::open("/nonexistent/frames.jsonl").is_err());
    }
}
