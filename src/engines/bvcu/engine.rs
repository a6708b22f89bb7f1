use std::path::Path;

use derive_builder::Builder;

use crate::{SpeechSynthesizer, VoiceDescriptor};

use super::resources::{BvcuError, VoiceResources};
use super::selector::select_voice;

/// Parameters for loading a voice directory.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into), default)]
pub struct BvcuLoadParams {
    /// File-name stem shared by the language-dependent candidates
    /// (e.g. `frf` for `frf.bnx`, `frf_hd.bvcu`).
    pub stem: String,
    /// Language code used for backend voice selection (e.g. `"fr"`, `"fr-be"`).
    pub language: String,
}

impl Default for BvcuLoadParams {
    fn default() -> Self {
        Self {
            stem: "frf".to_string(),
            language: "fr".to_string(),
        }
    }
}

/// BVCU text-to-speech engine.
///
/// Resolves a directory of BVCU voice files into an immutable resource
/// bundle and drives an external [`SpeechSynthesizer`] backend, selecting
/// the backend voice that best matches the requested language.
///
/// # Quick Start
///
/// ```rust,no_run
/// use bvcu_rs::engines::{bvcu::BvcuEngine, espeak::EspeakSynthesizer};
/// use std::path::Path;
///
/// let mut engine = BvcuEngine::new(EspeakSynthesizer::new());
/// engine.load_voice(Path::new("voices"))?;
/// engine.speak("Bonjour, comment allez-vous?")?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct BvcuEngine<S: SpeechSynthesizer> {
    backend: S,
    resources: Option<VoiceResources>,
    selected_voice: Option<VoiceDescriptor>,
}

impl<S: SpeechSynthesizer> BvcuEngine<S> {
    /// Create a new engine over the given synthesis backend.
    pub fn new(backend: S) -> Self {
        Self {
            backend,
            resources: None,
            selected_voice: None,
        }
    }

    /// Load a voice directory using default parameters (`frf` / `fr`).
    pub fn load_voice(&mut self, dir: &Path) -> Result<(), BvcuError> {
        self.load_voice_with_params(dir, BvcuLoadParams::default())
    }

    /// Load a voice directory with custom parameters.
    ///
    /// Resolution happens first and the bundle is stored before the backend
    /// is consulted, so the resources stay inspectable even when the
    /// backend's voice catalog cannot be queried
    /// ([`BvcuError::SynthesisUnavailable`]).
    ///
    /// A missing voice-data payload and an unmatched language are both
    /// normal degraded states, not errors: synthesis proceeds with the
    /// backend's default voice.
    pub fn load_voice_with_params(
        &mut self,
        dir: &Path,
        params: BvcuLoadParams,
    ) -> Result<(), BvcuError> {
        let resources = VoiceResources::load(dir, &params.stem)?;
        if resources.voice_data().is_none() {
            log::info!(
                "No voice data candidate in {}; relying on the backend voice",
                dir.display()
            );
        }
        self.resources = Some(resources);
        self.selected_voice = None;

        let voices = self
            .backend
            .voices()
            .map_err(|err| BvcuError::SynthesisUnavailable(err.to_string()))?;

        match select_voice(&voices, &params.language) {
            Some(voice) => {
                log::info!(
                    "Selected voice {} ({}) for language {:?}",
                    voice.id,
                    voice.name,
                    params.language
                );
                self.backend.set_voice(&voice.id);
                self.selected_voice = Some(voice.clone());
            }
            None => {
                log::info!(
                    "No voice matches language {:?}; keeping the backend default",
                    params.language
                );
            }
        }

        Ok(())
    }

    /// Drop the loaded resources and forget the selected voice.
    pub fn unload_voice(&mut self) {
        self.resources = None;
        self.selected_voice = None;
    }

    /// Speak the given text through the backend's audio output.
    pub fn speak(&mut self, text: &str) -> Result<(), BvcuError> {
        self.backend
            .speak(text)
            .map_err(|err| BvcuError::Synthesis(err.to_string()))
    }

    /// Synthesize the given text and write it to a WAV file.
    pub fn save_to_file(&mut self, text: &str, wav_path: &Path) -> Result<(), BvcuError> {
        self.backend
            .synthesize_to_file(text, wav_path)
            .map_err(|err| BvcuError::Synthesis(err.to_string()))
    }

    /// The resolved resource bundle, if a directory has been loaded.
    pub fn resources(&self) -> Option<&VoiceResources> {
        self.resources.as_ref()
    }

    /// The backend voice selected for the requested language, if any.
    pub fn selected_voice(&self) -> Option<&VoiceDescriptor> {
        self.selected_voice.as_ref()
    }

    /// The underlying synthesis backend.
    pub fn backend(&self) -> &S {
        &self.backend
    }
}
