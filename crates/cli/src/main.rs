mod settings;

use std::path::PathBuf;
use std::process;

use clap::Parser;

use facecam_core::annotation::infrastructure::opencv_annotator::OpencvAnnotator;
use facecam_core::detection::domain::detection_params::SliderPositions;
use facecam_core::detection::domain::frame_analyzer::FrameAnalyzer;
use facecam_core::detection::infrastructure::cascade_detector::CascadeDetector;
use facecam_core::detection::infrastructure::facemark_predictor::FacemarkPredictor;
use facecam_core::detection::infrastructure::opencv_gray_converter::OpencvGrayConverter;
use facecam_core::display::infrastructure::highgui_window::HighguiWindow;
use facecam_core::pipeline::live_detection_use_case::{
    LiveDetectionUseCase, LiveSessionConfig, SessionEnd, WriterFactory,
};
use facecam_core::pipeline::output_paths::OutputPaths;
use facecam_core::pipeline::session_logger::StdoutSessionLogger;
use facecam_core::pipeline::session_state::SessionState;
use facecam_core::shared::constants::{
    EYE_CASCADE_NAME, EYE_CASCADE_URL, FACE_CASCADE_NAME, FACE_CASCADE_URL,
    LANDMARK_MODEL_NAME, LANDMARK_MODEL_URL, OPENCV_DATA_DIRS, SMILE_CASCADE_NAME,
    SMILE_CASCADE_URL,
};
use facecam_core::shared::model_resolver::{self, ModelSpec};
use facecam_core::video::domain::video_writer::VideoWriter;
use facecam_core::video::infrastructure::camera_source::CameraSource;
use facecam_core::video::infrastructure::ffmpeg_writer::FfmpegWriter;
use facecam_core::video::infrastructure::image_file_writer::ImageFileWriter;

use settings::Settings;

const FACE_CASCADE: ModelSpec = ModelSpec {
    name: FACE_CASCADE_NAME,
    url: FACE_CASCADE_URL,
};
const EYE_CASCADE: ModelSpec = ModelSpec {
    name: EYE_CASCADE_NAME,
    url: EYE_CASCADE_URL,
};
const SMILE_CASCADE: ModelSpec = ModelSpec {
    name: SMILE_CASCADE_NAME,
    url: SMILE_CASCADE_URL,
};
const LANDMARK_MODEL: ModelSpec = ModelSpec {
    name: LANDMARK_MODEL_NAME,
    url: LANDMARK_MODEL_URL,
};

/// Live webcam face, eye and smile detection.
///
/// Keys (defaults): q quit, m cycle mode, r start/stop recording,
/// s screenshot, l toggle landmarks.
#[derive(Parser)]
#[command(name = "facecam")]
struct Cli {
    /// Camera device index.
    #[arg(long)]
    camera: Option<i32>,

    /// Directory for recordings and screenshots.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Directory searched first for cascade and landmark model files.
    #[arg(long)]
    models_dir: Option<PathBuf>,

    /// Download missing model files into the user cache.
    #[arg(long)]
    download_models: bool,

    /// Frame rate written into recordings.
    #[arg(long)]
    recording_fps: Option<f64>,

    /// Initial "Min Neighbors" slider position (0-20).
    #[arg(long)]
    min_neighbors: Option<i32>,

    /// Initial "Scale Factor (%)" slider position (0-200).
    #[arg(long)]
    scale_percent: Option<i32>,

    /// Screenshot JPEG quality (1-100).
    #[arg(long)]
    jpeg_quality: Option<u8>,

    /// Settings file (default: <config dir>/facecam/settings.json).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the effective settings back to the settings file.
    #[arg(long)]
    save_settings: bool,
}

impl Cli {
    /// Flags given on the command line win over the settings file.
    fn apply(&self, settings: &mut Settings) {
        if let Some(camera) = self.camera {
            settings.camera = camera;
        }
        if let Some(ref dir) = self.output_dir {
            settings.output_dir = dir.clone();
        }
        if let Some(ref dir) = self.models_dir {
            settings.models_dir = Some(dir.clone());
        }
        if self.download_models {
            settings.download_models = true;
        }
        if let Some(fps) = self.recording_fps {
            settings.recording_fps = fps;
        }
        if let Some(n) = self.min_neighbors {
            settings.min_neighbors = n;
        }
        if let Some(p) = self.scale_percent {
            settings.scale_percent = p;
        }
        if let Some(q) = self.jpeg_quality {
            settings.jpeg_quality = q;
        }
    }
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let settings_path = cli.config.clone().or_else(Settings::default_path);
    let mut settings = match settings_path {
        Some(ref path) => Settings::load_from(path)?,
        None => Settings::default(),
    };
    cli.apply(&mut settings);
    settings.validate()?;
    let bindings = settings.keys.to_bindings()?;

    if cli.save_settings {
        let path = settings_path
            .as_ref()
            .ok_or("No config directory available; pass --config")?;
        settings.save_to(path)?;
        log::info!("Settings saved to {}", path.display());
    }

    let output = OutputPaths::new(&settings.output_dir);
    output.ensure_dir().map_err(|e| {
        format!(
            "Cannot create output directory {}: {e}",
            settings.output_dir.display()
        )
    })?;

    let analyzer = build_analyzer(&settings)?;
    let source = CameraSource::open(settings.camera)?;
    let window = HighguiWindow::open(SliderPositions {
        min_neighbors: settings.min_neighbors,
        scale_percent: settings.scale_percent,
    })?;

    let writer_factory: WriterFactory =
        Box::new(|| Box::new(FfmpegWriter::new()) as Box<dyn VideoWriter>);
    let config = LiveSessionConfig {
        bindings,
        output,
        recording_fps: settings.recording_fps,
    };

    let mut use_case = LiveDetectionUseCase::new(
        Box::new(source),
        analyzer,
        Box::new(OpencvAnnotator::new()),
        Box::new(window),
        Box::new(ImageFileWriter::new(settings.jpeg_quality)),
        writer_factory,
        config,
        Box::new(StdoutSessionLogger::new()),
    );

    log::info!("Output directory: {}", settings.output_dir.display());
    let mut state = SessionState::new();
    match use_case.execute(&mut state)? {
        SessionEnd::Quit => log::info!("Quit"),
        SessionEnd::StreamEnded => log::info!("Camera stream ended"),
    }
    Ok(())
}

fn build_analyzer(settings: &Settings) -> Result<FrameAnalyzer, Box<dyn std::error::Error>> {
    let search_dirs: Vec<PathBuf> = settings
        .models_dir
        .iter()
        .cloned()
        .chain(OPENCV_DATA_DIRS.iter().map(PathBuf::from))
        .collect();

    let resolve = |spec: ModelSpec| -> Result<PathBuf, Box<dyn std::error::Error>> {
        log::info!("Resolving model: {}", spec.name);
        let path = model_resolver::resolve(
            spec,
            &search_dirs,
            settings.download_models,
            Some(Box::new(move |done, total| download_progress(spec.name, done, total))),
        )?;
        log::debug!("Using {}", path.display());
        Ok(path)
    };

    let face = CascadeDetector::new(&resolve(FACE_CASCADE)?)?;
    let eyes = CascadeDetector::new(&resolve(EYE_CASCADE)?)?;
    let smile = CascadeDetector::new(&resolve(SMILE_CASCADE)?)?;
    let landmarks = FacemarkPredictor::new(&resolve(LANDMARK_MODEL)?)?;

    Ok(FrameAnalyzer::new(
        Box::new(OpencvGrayConverter::new()),
        Box::new(face),
        Box::new(eyes),
        Box::new(smile),
        Box::new(landmarks),
    ))
}

fn download_progress(name: &str, downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading {name}... {pct}%");
        if downloaded >= total {
            eprintln!();
        }
    } else {
        eprint!("\rDownloading {name}... {downloaded} bytes");
    }
}
