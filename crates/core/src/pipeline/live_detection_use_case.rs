use std::ops::ControlFlow;
use std::time::Instant;

use chrono::{DateTime, Local};

use crate::annotation::domain::frame_annotator::FrameAnnotator;
use crate::annotation::domain::overlay_builder::{build_overlay, Hud};
use crate::detection::domain::detection_params::DetectionParams;
use crate::detection::domain::frame_analyzer::FrameAnalyzer;
use crate::display::domain::preview_window::PreviewWindow;
use crate::pipeline::command::{Command, KeyBindings};
use crate::pipeline::output_paths::OutputPaths;
use crate::pipeline::recording::Recording;
use crate::pipeline::session_logger::SessionLogger;
use crate::pipeline::session_state::SessionState;
use crate::shared::constants::DEFAULT_RECORDING_FPS;
use crate::shared::frame::Frame;
use crate::shared::video_metadata::VideoMetadata;
use crate::video::domain::frame_source::FrameSource;
use crate::video::domain::image_writer::ImageWriter;
use crate::video::domain::video_writer::VideoWriter;

/// Builds a fresh, unopened writer for each recording.
pub type WriterFactory = Box<dyn Fn() -> Box<dyn VideoWriter>>;

/// Wall clock used for output file names.
pub type Clock = Box<dyn Fn() -> DateTime<Local>>;

/// Why the session stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Quit,
    /// The camera stopped delivering frames.
    StreamEnded,
}

#[derive(Debug, Clone)]
pub struct LiveSessionConfig {
    pub bindings: KeyBindings,
    pub output: OutputPaths,
    pub recording_fps: f64,
}

impl LiveSessionConfig {
    pub fn new(output: OutputPaths) -> Self {
        Self {
            bindings: KeyBindings::default(),
            output,
            recording_fps: DEFAULT_RECORDING_FPS,
        }
    }
}

/// The interactive capture, detect, draw, show loop.
///
/// One iteration handles one frame and at most one key press. Whatever
/// ends the loop, [`execute`](Self::execute) finalizes any recording and
/// releases the camera and window before returning.
pub struct LiveDetectionUseCase {
    source: Box<dyn FrameSource>,
    analyzer: FrameAnalyzer,
    annotator: Box<dyn FrameAnnotator>,
    window: Box<dyn PreviewWindow>,
    image_writer: Box<dyn ImageWriter>,
    writer_factory: WriterFactory,
    config: LiveSessionConfig,
    logger: Box<dyn SessionLogger>,
    clock: Clock,
}

impl LiveDetectionUseCase {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        source: Box<dyn FrameSource>,
        analyzer: FrameAnalyzer,
        annotator: Box<dyn FrameAnnotator>,
        window: Box<dyn PreviewWindow>,
        image_writer: Box<dyn ImageWriter>,
        writer_factory: WriterFactory,
        config: LiveSessionConfig,
        logger: Box<dyn SessionLogger>,
    ) -> Self {
        Self {
            source,
            analyzer,
            annotator,
            window,
            image_writer,
            writer_factory,
            config,
            logger,
            clock: Box::new(Local::now),
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Runs until quit, end of stream or the first hard error.
    pub fn execute(
        &mut self,
        state: &mut SessionState,
    ) -> Result<SessionEnd, Box<dyn std::error::Error>> {
        let result = loop {
            match self.step(state) {
                Ok(ControlFlow::Continue(())) => {}
                Ok(ControlFlow::Break(end)) => break Ok(end),
                Err(e) => break Err(e),
            }
        };
        self.shutdown(state);
        result
    }

    /// One loop iteration.
    pub fn step(
        &mut self,
        state: &mut SessionState,
    ) -> Result<ControlFlow<SessionEnd>, Box<dyn std::error::Error>> {
        let t = Instant::now();
        let mut frame = match self.source.read() {
            Ok(Some(frame)) => frame,
            Ok(None) => {
                log::warn!("Failed to grab frame");
                return Ok(ControlFlow::Break(SessionEnd::StreamEnded));
            }
            Err(e) => {
                log::warn!("Failed to grab frame: {e}");
                return Ok(ControlFlow::Break(SessionEnd::StreamEnded));
            }
        };
        self.logger.timing("capture", elapsed_ms(t));
        self.logger.frame(frame.index());

        let t = Instant::now();
        let params = DetectionParams::from_sliders(self.window.slider_positions()?);
        let analysis = self
            .analyzer
            .analyze(&frame, state.mode, &params, state.show_landmarks)?;
        self.logger.timing("detect", elapsed_ms(t));
        self.logger.metric("faces", analysis.faces.len() as f64);

        let t = Instant::now();
        let hud = Hud {
            fps: state.fps.tick(),
            mode: state.mode,
            recording: state.is_recording(),
            frame_width: frame.width(),
        };
        self.annotator
            .render(&mut frame, &build_overlay(&analysis, &hud))?;
        self.logger.timing("render", elapsed_ms(t));

        if let Some(recording) = state.recording.as_mut() {
            let t = Instant::now();
            if let Err(e) = recording.write(&frame) {
                log::warn!(
                    "Failed to write frame to {}: {e}",
                    recording.path().display()
                );
            }
            self.logger.timing("encode", elapsed_ms(t));
        }

        self.window.show(&frame)?;

        let command = self
            .window
            .poll_key()?
            .and_then(|key| self.config.bindings.command_for(key));
        Ok(match command {
            Some(command) => self.dispatch(command, state, &frame),
            None => ControlFlow::Continue(()),
        })
    }

    fn dispatch(
        &mut self,
        command: Command,
        state: &mut SessionState,
        frame: &Frame,
    ) -> ControlFlow<SessionEnd> {
        match command {
            Command::Quit => return ControlFlow::Break(SessionEnd::Quit),
            Command::CycleMode => {
                state.mode = state.mode.next();
                self.logger.info(&format!("Mode: {}", state.mode));
            }
            Command::ToggleRecording => match state.recording.take() {
                Some(recording) => self.stop_recording(recording),
                None => state.recording = self.start_recording(frame),
            },
            Command::Screenshot => self.screenshot(frame),
            Command::ToggleLandmarks => {
                state.show_landmarks = !state.show_landmarks;
                let onoff = if state.show_landmarks { "on" } else { "off" };
                self.logger.info(&format!("Landmarks {onoff}"));
            }
        }
        ControlFlow::Continue(())
    }

    fn start_recording(&mut self, frame: &Frame) -> Option<Recording> {
        let path = self.config.output.recording(&(self.clock)());
        let metadata = VideoMetadata::for_frame(frame, self.config.recording_fps);
        match Recording::start((self.writer_factory)(), path.clone(), &metadata) {
            Ok(recording) => {
                self.logger
                    .info(&format!("Recording started: {}", path.display()));
                Some(recording)
            }
            Err(e) => {
                log::warn!("Failed to start recording {}: {e}", path.display());
                None
            }
        }
    }

    fn stop_recording(&mut self, recording: Recording) {
        let path = recording.path().to_path_buf();
        match recording.finish() {
            Ok(summary) => {
                self.logger.info(&format!(
                    "Recording stopped: {} ({} frames)",
                    summary.path.display(),
                    summary.frames
                ));
                self.logger.saved("recording", &summary.path);
            }
            Err(e) => log::warn!("Failed to finalize {}: {e}", path.display()),
        }
    }

    fn screenshot(&mut self, frame: &Frame) {
        let path = self.config.output.screenshot(&(self.clock)());
        match self.image_writer.write(&path, frame) {
            Ok(()) => self.logger.saved("screenshot", &path),
            Err(e) => log::warn!("Failed to save screenshot {}: {e}", path.display()),
        }
    }

    fn shutdown(&mut self, state: &mut SessionState) {
        if let Some(recording) = state.recording.take() {
            self.stop_recording(recording);
        }
        self.source.close();
        self.window.close();
        self.logger.summary();
    }
}

fn elapsed_ms(since: Instant) -> f64 {
    since.elapsed().as_secs_f64() * 1000.0
}
