use std::fmt;

use thiserror::Error;

/// An action triggered by a key press in the preview window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Quit,
    CycleMode,
    ToggleRecording,
    Screenshot,
    ToggleLandmarks,
}

impl Command {
    pub const ALL: [Command; 5] = [
        Command::Quit,
        Command::CycleMode,
        Command::ToggleRecording,
        Command::Screenshot,
        Command::ToggleLandmarks,
    ];
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Command::Quit => "quit",
            Command::CycleMode => "cycle mode",
            Command::ToggleRecording => "toggle recording",
            Command::Screenshot => "screenshot",
            Command::ToggleLandmarks => "toggle landmarks",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum KeyBindingsError {
    #[error("key '{key}' is bound to both {first} and {second}")]
    Duplicate {
        key: char,
        first: Command,
        second: Command,
    },
}

/// One key per command; keys are case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    quit: char,
    cycle_mode: char,
    toggle_recording: char,
    screenshot: char,
    toggle_landmarks: char,
}

impl KeyBindings {
    pub fn new(
        quit: char,
        cycle_mode: char,
        toggle_recording: char,
        screenshot: char,
        toggle_landmarks: char,
    ) -> Result<Self, KeyBindingsError> {
        let bindings = Self {
            quit,
            cycle_mode,
            toggle_recording,
            screenshot,
            toggle_landmarks,
        };
        let mut seen: Vec<(char, Command)> = Vec::with_capacity(Command::ALL.len());
        for command in Command::ALL {
            let key = bindings.key_for(command);
            if let Some(&(_, first)) = seen.iter().find(|(k, _)| *k == key) {
                return Err(KeyBindingsError::Duplicate {
                    key,
                    first,
                    second: command,
                });
            }
            seen.push((key, command));
        }
        Ok(bindings)
    }

    pub fn key_for(&self, command: Command) -> char {
        match command {
            Command::Quit => self.quit,
            Command::CycleMode => self.cycle_mode,
            Command::ToggleRecording => self.toggle_recording,
            Command::Screenshot => self.screenshot,
            Command::ToggleLandmarks => self.toggle_landmarks,
        }
    }

    /// Unbound keys map to `None` and are ignored by the loop.
    pub fn command_for(&self, key: char) -> Option<Command> {
        Command::ALL
            .into_iter()
            .find(|&command| self.key_for(command) == key)
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            quit: 'q',
            cycle_mode: 'm',
            toggle_recording: 'r',
            screenshot: 's',
            toggle_landmarks: 'l',
        }
    }
}
