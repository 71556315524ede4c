use std::path::{Path, PathBuf};

use crate::shared::frame::Frame;
use crate::shared::video_metadata::VideoMetadata;
use crate::video::domain::video_writer::VideoWriter;

/// An open video file. The writer is finalized by [`Recording::finish`],
/// or on drop if the session ends some other way.
pub struct Recording {
    writer: Box<dyn VideoWriter>,
    path: PathBuf,
    frames_written: usize,
    closed: bool,
}

/// What a finished recording produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingSummary {
    pub path: PathBuf,
    pub frames: usize,
}

impl Recording {
    pub fn start(
        mut writer: Box<dyn VideoWriter>,
        path: PathBuf,
        metadata: &VideoMetadata,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        writer.open(&path, metadata)?;
        Ok(Self {
            writer,
            path,
            frames_written: 0,
            closed: false,
        })
    }

    pub fn write(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        self.writer.write(frame)?;
        self.frames_written += 1;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn finish(mut self) -> Result<RecordingSummary, Box<dyn std::error::Error>> {
        self.closed = true;
        self.writer.close()?;
        Ok(RecordingSummary {
            path: self.path.clone(),
            frames: self.frames_written,
        })
    }
}

impl Drop for Recording {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        if let Err(e) = self.writer.close() {
            log::warn!("Failed to finalize {}: {e}", self.path.display());
        }
    }
}
