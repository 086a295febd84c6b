use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use frame_censor_core::annotations::infrastructure::json_annotation_loader::JsonAnnotationLoader;
use frame_censor_core::pipeline::censor_sequence_use_case::{CensorSequenceUseCase, ProgressFn};
use frame_censor_core::pipeline::pipeline_logger::StdoutPipelineLogger;
use frame_censor_core::pipeline::playback_session::PlaybackSession;
use frame_censor_core::shared::censure::{BlurIntensity, CensorSettings, CensureMode};
use frame_censor_core::shared::constants::{
    BLUR_INTENSITY_MAX, DEFAULT_BLUR_INTENSITY, DEFAULT_FPS,
};
use frame_censor_core::timeline::timeline_info::TimelineInfo;
use frame_censor_core::video::infrastructure::image_file_writer::ImageFileWriter;
use frame_censor_core::video::infrastructure::image_sequence_reader::ImageSequenceReader;

/// Censor annotated regions in a frame sequence or a single image.
#[derive(Parser)]
#[command(name = "frame-censor")]
struct Cli {
    /// Directory of frame images (sorted by name) or a single image.
    frames: PathBuf,

    /// Directory the censored frames are written to.
    output_dir: PathBuf,

    /// Annotation table JSON: frame index -> object id -> region.
    #[arg(long)]
    annotations: PathBuf,

    /// Timeline JSON with framesCounts, framesDurations and timeScale.
    #[arg(long)]
    timeline: PathBuf,

    /// Censure mode: gauss, pixelate-css or pixelate-canvas-filter.
    #[arg(long, default_value = "gauss")]
    mode: String,

    /// Blur intensity (0-100).
    #[arg(long, default_value_t = DEFAULT_BLUR_INTENSITY as u32)]
    intensity: u32,

    /// Frame rate used to timestamp a directory of frames.
    #[arg(long, default_value_t = DEFAULT_FPS)]
    fps: f64,
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
    let settings = validate(&cli)?;

    let timeline = TimelineInfo::load(&cli.timeline)?;
    let annotations = JsonAnnotationLoader::load(&cli.annotations)?;
    log::info!(
        "Censoring with mode {} at intensity {}",
        settings.mode,
        settings.intensity.value()
    );

    let session = PlaybackSession::new(
        timeline,
        Box::new(annotations),
        settings,
        Box::new(StdoutPipelineLogger::default()),
    );

    let progress: ProgressFn = Box::new(|current, total| {
        eprint!("\rCensoring frame {current}/{total}");
        true
    });

    let mut use_case = CensorSequenceUseCase::new(
        Box::new(ImageSequenceReader::new(cli.fps)),
        Box::new(ImageFileWriter::new()),
        session,
        Some(progress),
        None,
    );
    let summary = use_case.execute(&cli.frames, &cli.output_dir)?;
    eprintln!();

    log::info!(
        "Wrote {} frame(s) to {} ({} region(s) drawn, {} skipped)",
        summary.frames_written,
        cli.output_dir.display(),
        summary.regions_drawn,
        summary.regions_skipped
    );
    Ok(())
}

fn validate(cli: &Cli) -> Result<CensorSettings, Box<dyn std::error::Error>> {
    require_exists(&cli.frames, "Input")?;
    require_exists(&cli.annotations, "Annotations file")?;
    require_exists(&cli.timeline, "Timeline file")?;

    if cli.intensity > BLUR_INTENSITY_MAX as u32 {
        return Err(format!(
            "Intensity must be between 0 and {BLUR_INTENSITY_MAX}, got {}",
            cli.intensity
        )
        .into());
    }
    if !(cli.fps.is_finite() && cli.fps > 0.0) {
        return Err(format!("Frame rate must be positive, got {}", cli.fps).into());
    }
    let mode: CensureMode = cli.mode.parse()?;

    Ok(CensorSettings {
        mode,
        intensity: BlurIntensity::new(cli.intensity as u8),
    })
}

fn require_exists(path: &Path, what: &str) -> Result<(), Box<dyn std::error::Error>> {
    if path.exists() {
        Ok(())
    } else {
        Err(format!("{what} not found: {}", path.display()).into())
    }
}
