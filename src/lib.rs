//! # bvcu-rs
//!
//! A Rust library for text-to-speech synthesis from BVCU voice file bundles.
//!
//! ## Features
//!
//! - **Voice resource resolution**: Discover, classify and merge BVCU voice
//!   files (`.bnx`, `.bvcu`, `.dca`, `.ldi`, …) from a directory into an
//!   immutable resource bundle
//! - **Language-aware voice selection**: Pick the best matching voice from a
//!   synthesis backend's catalog, preferring exact language matches over
//!   regional variants
//! - **Pluggable backends**: Any engine implementing [`SpeechSynthesizer`]
//!   can consume the resolved resources; an espeak-ng backend is included
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! bvcu-rs = "0.1"
//! ```
//!
//! ```ignore
//! use std::path::Path;
//! use bvcu_rs::engines::{bvcu::BvcuEngine, espeak::EspeakSynthesizer};
//!
//! let mut engine = BvcuEngine::new(EspeakSynthesizer::new());
//! engine.load_voice(Path::new("voices"))?;
//!
//! engine.save_to_file("Bonjour, comment allez-vous?", Path::new("output.wav"))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod engines;

use std::path::Path;

use serde::Serialize;

/// The result of a synthesis (text-to-speech) operation.
///
/// Contains raw f32 audio samples and the sample rate of the output audio.
#[derive(Debug)]
pub struct SynthesisResult {
    /// Raw audio samples as f32 values
    pub samples: Vec<f32>,
    /// Sample rate of the audio (22050 for espeak-ng)
    pub sample_rate: u32,
}

impl SynthesisResult {
    /// Write the audio to a 32-bit float WAV file.
    pub fn write_wav(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: self.sample_rate,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        let mut writer = hound::WavWriter::create(path, spec)?;
        for &sample in &self.samples {
            writer.write_sample(sample)?;
        }
        writer.finalize()?;
        Ok(())
    }

    /// Duration of the audio in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// A voice advertised by a synthesis backend.
///
/// The identifier is backend-specific; espeak-ng uses voice file paths such
/// as `roa/fr` or `gmw/en`, where the final segment is the language code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoiceDescriptor {
    /// Backend identifier used to activate the voice
    pub id: String,
    /// Human-readable display name
    pub name: String,
}

impl VoiceDescriptor {
    /// Create a descriptor from an identifier and display name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Common interface for external speech synthesis backends.
///
/// This trait defines the operations the resource-resolution engine needs
/// from an audio-producing collaborator: listing available voices,
/// activating one, and turning text into audio. The backend keeps the
/// active-voice state; callers issue at most one [`set_voice`] per loaded
/// voice directory.
///
/// [`set_voice`]: SpeechSynthesizer::set_voice
pub trait SpeechSynthesizer {
    /// List the voices this backend can synthesize with.
    fn voices(&mut self) -> Result<Vec<VoiceDescriptor>, Box<dyn std::error::Error>>;

    /// Activate the voice with the given identifier for subsequent synthesis.
    fn set_voice(&mut self, voice_id: &str);

    /// Speak the given text through the default audio output.
    fn speak(&mut self, text: &str) -> Result<(), Box<dyn std::error::Error>>;

    /// Synthesize speech from the given text.
    fn synthesize(&mut self, text: &str) -> Result<SynthesisResult, Box<dyn std::error::Error>>;

    /// Synthesize speech from the given text and write to a WAV file.
    ///
    /// Default implementation calls `synthesize()` then `SynthesisResult::write_wav()`.
    fn synthesize_to_file(
        &mut self,
        text: &str,
        wav_path: &Path,
    ) -> Result<(), Box<dyn std::error::Error>> {
        self.synthesize(text)?.write_wav(wav_path)
    }
}
