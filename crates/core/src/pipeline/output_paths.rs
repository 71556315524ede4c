use std::path::PathBuf;

use chrono::{DateTime, TimeZone};

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Names recordings and screenshots inside one output directory.
///
/// Names have one-second resolution, so a second capture in the same second
/// replaces the first.
#[derive(Debug, Clone)]
pub struct OutputPaths {
    dir: PathBuf,
}

impl OutputPaths {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Creates the directory (and parents) if it does not exist.
    pub fn ensure_dir(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.dir)
    }

    pub fn recording<Tz: TimeZone>(&self, at: &DateTime<Tz>) -> PathBuf
    where
        Tz::Offset: std::fmt::Display,
    {
        self.stamped("recording", at, "avi")
    }

    pub fn screenshot<Tz: TimeZone>(&self, at: &DateTime<Tz>) -> PathBuf
    where
        Tz::Offset: std::fmt::Display,
    {
        self.stamped("screenshot", at, "jpg")
    }

    fn stamped<Tz: TimeZone>(&self, prefix: &str, at: &DateTime<Tz>, ext: &str) -> PathBuf
    where
        Tz::Offset: std::fmt::Display,
    {
        self.dir
            .join(format!("{prefix}_{}.{ext}", at.format(TIMESTAMP_FORMAT)))
    }
}
