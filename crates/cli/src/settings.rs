use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use facecam_core::pipeline::command::{Command, KeyBindings, KeyBindingsError};
use facecam_core::shared::constants::{
    DEFAULT_JPEG_QUALITY, DEFAULT_MIN_NEIGHBORS, DEFAULT_OUTPUT_DIR, DEFAULT_RECORDING_FPS,
    DEFAULT_SCALE_PERCENT, MIN_NEIGHBORS_MAX, SCALE_PERCENT_MAX,
};

/// Persisted defaults for every command-line option.
///
/// Missing fields fall back to their defaults, so older files keep working.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub camera: i32,
    pub output_dir: PathBuf,
    pub models_dir: Option<PathBuf>,
    pub download_models: bool,
    pub recording_fps: f64,
    pub min_neighbors: i32,
    pub scale_percent: i32,
    pub jpeg_quality: u8,
    pub keys: KeySettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeySettings {
    pub quit: char,
    pub cycle_mode: char,
    pub toggle_recording: char,
    pub screenshot: char,
    pub toggle_landmarks: char,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            camera: 0,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            models_dir: None,
            download_models: false,
            recording_fps: DEFAULT_RECORDING_FPS,
            min_neighbors: DEFAULT_MIN_NEIGHBORS,
            scale_percent: DEFAULT_SCALE_PERCENT,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            keys: KeySettings::default(),
        }
    }
}

impl Default for KeySettings {
    fn default() -> Self {
        let d = KeyBindings::default();
        Self {
            quit: d.key_for(Command::Quit),
            cycle_mode: d.key_for(Command::CycleMode),
            toggle_recording: d.key_for(Command::ToggleRecording),
            screenshot: d.key_for(Command::Screenshot),
            toggle_landmarks: d.key_for(Command::ToggleLandmarks),
        }
    }
}

impl KeySettings {
    pub fn to_bindings(&self) -> Result<KeyBindings, KeyBindingsError> {
        KeyBindings::new(
            self.quit,
            self.cycle_mode,
            self.toggle_recording,
            self.screenshot,
            self.toggle_landmarks,
        )
    }
}

impl Settings {
    /// `<config dir>/facecam/settings.json`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("facecam").join("settings.json"))
    }

    /// Reads settings from `path`. A missing file yields the defaults; an
    /// unreadable or malformed one is an error.
    pub fn load_from(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let json = fs::read_to_string(path)?;
        serde_json::from_str(&json)
            .map_err(|e| format!("Invalid settings file {}: {e}", path.display()).into())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        if !(0..=MIN_NEIGHBORS_MAX).contains(&self.min_neighbors) {
            return Err(format!(
                "Min neighbors must be between 0 and {MIN_NEIGHBORS_MAX}, got {}",
                self.min_neighbors
            )
            .into());
        }
        if !(0..=SCALE_PERCENT_MAX).contains(&self.scale_percent) {
            return Err(format!(
                "Scale percent must be between 0 and {SCALE_PERCENT_MAX}, got {}",
                self.scale_percent
            )
            .into());
        }
        if !(self.recording_fps.is_finite() && self.recording_fps > 0.0) {
            return Err(format!(
                "Recording fps must be positive, got {}",
                self.recording_fps
            )
            .into());
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(format!(
                "JPEG quality must be between 1 and 100, got {}",
                self.jpeg_quality
            )
            .into());
        }
        if self.camera < 0 {
            return Err(format!("Camera index must be non-negative, got {}", self.camera).into());
        }
        self.keys.to_bindings()?;
        Ok(())
    }
}
