use std::fmt;

/// What the live view is looking for. Faces are always detected; the
/// mode selects what is searched for inside them and what gets drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetectionMode {
    #[default]
    Face,
    Eyes,
    Smile,
}

impl DetectionMode {
    /// Cycles face → eyes → smile → face.
    pub fn next(self) -> Self {
        match self {
            DetectionMode::Face => DetectionMode::Eyes,
            DetectionMode::Eyes => DetectionMode::Smile,
            DetectionMode::Smile => DetectionMode::Face,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DetectionMode::Face => "face",
            DetectionMode::Eyes => "eyes",
            DetectionMode::Smile => "smile",
        }
    }
}

impl fmt::Display for DetectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
