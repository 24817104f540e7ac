//! Cross-platform audio recorder using cpal
//!
//! Captures at a fixed 44.1kHz sample rate, up to stereo. Channel count is
//! clamped to what the default input device actually supports, so mono-only
//! devices are opened mono.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Instant;

use async_trait::async_trait;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, SampleRate, StreamConfig};
use tokio::time::{interval, Duration as TokioDuration};

use crate::application::ports::{
    AudioRecorder, CaptureOutcome, CapturedAudio, ProgressCallback, RecordingError,
};
use crate::domain::recording::{Duration, CHANNEL_CAP, SAMPLE_RATE};

/// Audio recorder using cpal
///
/// The stream is built and driven inside a blocking task to avoid Send/Sync
/// issues with cpal::Stream, which is not thread-safe.
pub struct CpalRecorder;

impl CpalRecorder {
    pub fn new() -> Self {
        Self
    }

    /// Get the default input device
    fn get_input_device() -> Result<cpal::Device, RecordingError> {
        let host = cpal::default_host();
        host.default_input_device()
            .ok_or(RecordingError::NoAudioDevice)
    }

    /// Pick an input configuration: 44.1kHz, min(2, device max) channels.
    fn get_input_config(
        device: &cpal::Device,
    ) -> Result<(StreamConfig, SampleFormat), RecordingError> {
        let supported_configs = device
            .supported_input_configs()
            .map_err(|e| RecordingError::DeviceQueryFailed(e.to_string()))?;

        // Among configs covering 44.1kHz with a usable sample format, keep
        // the one with the most channels (prefer f32 over i16 at equal
        // channel count). The channel cap is applied after selection.
        let mut best_config: Option<cpal::SupportedStreamConfigRange> = None;

        for config in supported_configs {
            if config.sample_format() != SampleFormat::F32
                && config.sample_format() != SampleFormat::I16
            {
                continue;
            }
            if config.min_sample_rate().0 > SAMPLE_RATE || config.max_sample_rate().0 < SAMPLE_RATE
            {
                continue;
            }

            let is_better = match &best_config {
                None => true,
                Some(current) => {
                    config.channels() > current.channels()
                        || (config.channels() == current.channels()
                            && config.sample_format() == SampleFormat::F32
                            && current.sample_format() != SampleFormat::F32)
                }
            };
            if is_better {
                best_config = Some(config);
            }
        }

        let config_range = best_config.ok_or_else(|| {
            RecordingError::DeviceQueryFailed(format!(
                "No input config supporting {} Hz found",
                SAMPLE_RATE
            ))
        })?;

        let channels = Self::clamp_channels(config_range.channels());
        let sample_format = config_range.sample_format();
        let config = StreamConfig {
            channels,
            sample_rate: SampleRate(SAMPLE_RATE),
            buffer_size: cpal::BufferSize::Default,
        };

        Ok((config, sample_format))
    }

    /// Clamp a device's maximum input channel count to the stereo cap.
    fn clamp_channels(device_max: u16) -> u16 {
        device_max.min(CHANNEL_CAP).max(1)
    }

    /// Take the first error the device callback thread reported, if any.
    /// A reported stream error is fatal: the device has stopped delivering
    /// data and waiting for the buffer to fill would never end.
    fn take_stream_error(slot: &StdMutex<Option<String>>) -> Option<RecordingError> {
        slot.lock()
            .ok()
            .and_then(|mut s| s.take())
            .map(|msg| RecordingError::CaptureFailed(format!("Audio stream error: {}", msg)))
    }
}

impl Default for CpalRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AudioRecorder for CpalRecorder {
    async fn record(
        &self,
        duration: Duration,
        shutdown: Arc<AtomicBool>,
        on_progress: Option<ProgressCallback>,
    ) -> Result<CaptureOutcome, RecordingError> {
        let total_secs = duration.as_secs();
        let target_frames = duration.frame_count(SAMPLE_RATE);
        let is_recording = Arc::new(AtomicBool::new(true));

        let is_recording_task = Arc::clone(&is_recording);
        let shutdown_task = Arc::clone(&shutdown);

        // The whole capture runs on a blocking thread: cpal::Stream must be
        // created and dropped on the same thread, and the wait loop blocks.
        let record_handle = tokio::task::spawn_blocking(move || {
            let device = CpalRecorder::get_input_device()?;
            let (config, sample_format) = CpalRecorder::get_input_config(&device)?;
            let channels = config.channels;
            let target_samples = (target_frames as usize) * channels as usize;

            let buffer: Arc<StdMutex<Vec<f32>>> =
                Arc::new(StdMutex::new(Vec::with_capacity(target_samples)));
            let buffer_full = Arc::new(AtomicBool::new(false));
            let stream_error: Arc<StdMutex<Option<String>>> = Arc::new(StdMutex::new(None));

            let buffer_cb = Arc::clone(&buffer);
            let buffer_full_cb = Arc::clone(&buffer_full);
            let error_cb = Arc::clone(&stream_error);

            let stream = match sample_format {
                SampleFormat::F32 => device
                    .build_input_stream(
                        &config,
                        move |data: &[f32], _: &cpal::InputCallbackInfo| {
                            if let Ok(mut buf) = buffer_cb.lock() {
                                let remaining = target_samples.saturating_sub(buf.len());
                                let take = remaining.min(data.len());
                                buf.extend_from_slice(&data[..take]);
                                if buf.len() >= target_samples {
                                    buffer_full_cb.store(true, Ordering::SeqCst);
                                }
                            }
                        },
                        move |err| {
                            if let Ok(mut slot) = error_cb.lock() {
                                slot.get_or_insert_with(|| err.to_string());
                            }
                        },
                        None,
                    )
                    .map_err(|e| RecordingError::StartFailed(e.to_string()))?,

                SampleFormat::I16 => device
                    .build_input_stream(
                        &config,
                        move |data: &[i16], _: &cpal::InputCallbackInfo| {
                            if let Ok(mut buf) = buffer_cb.lock() {
                                let remaining = target_samples.saturating_sub(buf.len());
                                let take = remaining.min(data.len());
                                buf.extend(data[..take].iter().map(|&s| s as f32 / 32768.0));
                                if buf.len() >= target_samples {
                                    buffer_full_cb.store(true, Ordering::SeqCst);
                                }
                            }
                        },
                        move |err| {
                            if let Ok(mut slot) = error_cb.lock() {
                                slot.get_or_insert_with(|| err.to_string());
                            }
                        },
                        None,
                    )
                    .map_err(|e| RecordingError::StartFailed(e.to_string()))?,

                _ => {
                    return Err(RecordingError::DeviceQueryFailed(
                        "Unsupported sample format".into(),
                    ))
                }
            };

            stream
                .play()
                .map_err(|e| RecordingError::StartFailed(e.to_string()))?;

            // Wait until the buffer fills, a termination signal arrives, or
            // the stream reports an error
            while !buffer_full.load(Ordering::SeqCst) {
                if let Some(err) = CpalRecorder::take_stream_error(&stream_error) {
                    drop(stream);
                    is_recording_task.store(false, Ordering::SeqCst);
                    return Err(err);
                }
                if shutdown_task.load(Ordering::SeqCst) {
                    drop(stream);
                    is_recording_task.store(false, Ordering::SeqCst);
                    return Ok(CaptureOutcome::Interrupted);
                }
                std::thread::sleep(std::time::Duration::from_millis(50));
            }

            drop(stream);
            is_recording_task.store(false, Ordering::SeqCst);

            let samples = {
                let mut buf = buffer
                    .lock()
                    .map_err(|_| RecordingError::CaptureFailed("Buffer lock poisoned".into()))?;
                std::mem::take(&mut *buf)
            };

            if samples.is_empty() {
                return Err(RecordingError::CaptureFailed(
                    "No audio data captured".into(),
                ));
            }

            Ok(CaptureOutcome::Completed(CapturedAudio {
                samples,
                channels,
                sample_rate: SAMPLE_RATE,
            }))
        });

        // Progress reporting while the blocking capture runs
        if let Some(progress) = on_progress {
            let start = Instant::now();
            let is_recording = Arc::clone(&is_recording);

            tokio::spawn(async move {
                let mut ticker = interval(TokioDuration::from_millis(250));
                while is_recording.load(Ordering::SeqCst) {
                    ticker.tick().await;
                    let elapsed = start.elapsed().as_secs().min(total_secs);
                    progress(elapsed, total_secs);
                    if elapsed >= total_secs {
                        break;
                    }
                }
            });
        }

        let outcome = record_handle
            .await
            .map_err(|e| RecordingError::CaptureFailed(format!("Task join error: {}", e)))?;
        is_recording.store(false, Ordering::SeqCst);
        outcome
    }
}
