//! Main app runner

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use colored::Colorize;

use crate::application::{PipelineCallbacks, PipelineOutcome, RecordPipelineUseCase};
use crate::domain::recording::RecordingSession;
use crate::infrastructure::{CpalRecorder, FfmpegTranscoder, HoundWriter};

use super::args::RecordOptions;
use super::presenter::Presenter;
use super::prompt::resolve_duration;
use super::signals::ShutdownSignal;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;

/// Run one recording session end to end
pub async fn run(options: RecordOptions) -> ExitCode {
    let presenter = Presenter::new();

    // Signal handlers go in before any blocking work, the interactive
    // prompt's stdin read included
    let shutdown = ShutdownSignal::new();
    if let Err(e) = shutdown.setup().await {
        presenter.error(&format!("Failed to setup signal handler: {}", e));
        return ExitCode::from(EXIT_ERROR);
    }

    // A signal at the prompt resolves to the default duration; the
    // checkpoint below then short-circuits before any file I/O.
    let duration = resolve_duration(options.duration, &presenter, &shutdown).await;

    if shutdown.is_shutdown() {
        presenter.info("Recording stopped early due to termination signal.");
        return ExitCode::from(EXIT_SUCCESS);
    }

    if let Err(e) = tokio::fs::create_dir_all(&options.output_dir).await {
        presenter.error(&format!(
            "Failed to create output directory {}: {}",
            options.output_dir.display(),
            e
        ));
        return ExitCode::from(EXIT_ERROR);
    }

    let session = RecordingSession::new(duration, &options.output_dir);

    presenter.info(&format!("Starting recording for {}...", duration));

    let pipeline = RecordPipelineUseCase::new(
        CpalRecorder::new(),
        HoundWriter::new(),
        FfmpegTranscoder::new(),
        shutdown.flag(),
    );

    let bar = presenter.recording_bar(duration.as_secs());
    let bar_progress = bar.clone();
    let callbacks = PipelineCallbacks {
        on_progress: Some(Arc::new(move |elapsed, _total| {
            bar_progress.set_position(elapsed);
        })),
        on_capture_start: None,
        on_wav_saved: Some(Box::new(|path: &Path| {
            eprintln!(
                "{} Saved temporary WAV file: {}",
                "✓".green(),
                path.display()
            );
        })),
        on_wav_removed: Some(Box::new(|path: &Path| {
            eprintln!(
                "{} Temporary WAV file deleted: {}",
                "✓".green(),
                path.display()
            );
        })),
        on_cleanup_warning: Some(Box::new(|message: &str| {
            eprintln!("{} {}", "⚠".yellow(), message);
        })),
    };

    let result = pipeline.execute(&session, callbacks).await;
    bar.finish_and_clear();

    match result {
        Ok(PipelineOutcome::Transcoded { mp3 }) => {
            presenter.success(&format!(
                "Audio file converted and saved as: {}",
                mp3.display()
            ));
            ExitCode::from(EXIT_SUCCESS)
        }
        Ok(PipelineOutcome::WavRetained { wav, reason }) => {
            // Degraded success: the WAV becomes the final artifact
            presenter.warn(&reason.to_string());
            presenter.info(&format!("Keeping WAV file: {}", wav.display()));
            ExitCode::from(EXIT_SUCCESS)
        }
        Ok(PipelineOutcome::Interrupted) => {
            presenter.info("Recording stopped early due to termination signal.");
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}
