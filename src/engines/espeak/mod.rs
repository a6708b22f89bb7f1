//! espeak-ng subprocess backend.
//!
//! Drives the `espeak-ng` binary as an external synthesis engine: the voice
//! catalog comes from `espeak-ng --voices`, playback runs the binary
//! directly, and WAV capture uses `--stdout`.
//!
//! # System Requirements
//!
//! **espeak-ng** must be installed on your system:
//! - **Linux**: `sudo apt-get install espeak-ng`
//! - **macOS**: `brew install espeak-ng`
//! - **Windows**: Download installer from <https://espeak-ng.org/download>

use std::borrow::Cow;
use std::io::{Cursor, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::{SpeechSynthesizer, SynthesisResult, VoiceDescriptor};

#[derive(thiserror::Error, Debug)]
pub enum EspeakError {
    #[error(
        "espeak-ng not found. Install: Linux: `sudo apt-get install espeak-ng`, \
         macOS: `brew install espeak-ng`, Windows: https://espeak-ng.org/download"
    )]
    NotFound,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("espeak-ng failed: {0}")]
    Failed(String),
    #[error("invalid WAV stream from espeak-ng: {0}")]
    Wav(#[from] hound::Error),
}

/// Speech synthesizer backed by the espeak-ng binary.
///
/// Voice identifiers are espeak-ng voice file paths (`roa/fr`, `gmw/en`).
/// The active voice is process-wide state owned by this backend; it is
/// applied to every subsequent invocation.
pub struct EspeakSynthesizer {
    bin_path: Option<PathBuf>,
    data_path: Option<PathBuf>,
    voice: Option<String>,
}

impl Default for EspeakSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

impl EspeakSynthesizer {
    /// Create a backend that uses `espeak-ng` from PATH.
    pub fn new() -> Self {
        Self {
            bin_path: None,
            data_path: None,
            voice: None,
        }
    }

    /// Create a backend with explicit espeak-ng binary and data paths.
    ///
    /// Use this when bundling espeak-ng with your application. Either path
    /// can be `None` to fall back to the system default.
    pub fn with_paths(bin_path: Option<PathBuf>, data_path: Option<PathBuf>) -> Self {
        Self {
            bin_path,
            data_path,
            voice: None,
        }
    }

    /// The voice identifier applied to invocations, if one has been set.
    pub fn active_voice(&self) -> Option<&str> {
        self.voice.as_deref()
    }

    fn command(&self) -> Command {
        let mut cmd = match &self.bin_path {
            Some(bin) => Command::new(bin),
            None => Command::new("espeak-ng"),
        };
        if let Some(data) = &self.data_path {
            cmd.arg("--path").arg(data);
        }
        if let Some(voice) = &self.voice {
            cmd.args(["-v", voice]);
        }
        cmd
    }

    /// Run espeak-ng with the given arguments, piping `input` to stdin.
    fn run(&self, args: &[&str], input: Option<&str>) -> Result<Vec<u8>, EspeakError> {
        let mut child = self
            .command()
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    EspeakError::NotFound
                } else {
                    EspeakError::Io(e)
                }
            })?;

        if let Some(input) = input {
            if let Some(mut stdin) = child.stdin.take() {
                // espeak-ng treats stdin as line-oriented input. Without a
                // final line terminator, the last token can be
                // under-processed. Enforce a canonical, newline-terminated
                // payload as part of this I/O contract.
                let payload = canonicalize_stdin_payload(input);
                stdin.write_all(payload.as_bytes()).map_err(EspeakError::Io)?;
            }
        }

        let output = child.wait_with_output().map_err(EspeakError::Io)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(EspeakError::Failed(format!(
                "exit code {:?}: {stderr}",
                output.status.code()
            )));
        }

        Ok(output.stdout)
    }
}

impl SpeechSynthesizer for EspeakSynthesizer {
    fn voices(&mut self) -> Result<Vec<VoiceDescriptor>, Box<dyn std::error::Error>> {
        let stdout = self.run(&["--voices"], None)?;
        let table = String::from_utf8_lossy(&stdout);
        let voices = parse_voice_table(&table);
        log::debug!("espeak-ng advertises {} voices", voices.len());
        Ok(voices)
    }

    fn set_voice(&mut self, voice_id: &str) {
        self.voice = Some(voice_id.to_string());
    }

    fn speak(&mut self, text: &str) -> Result<(), Box<dyn std::error::Error>> {
        self.run(&["--stdin"], Some(text))?;
        Ok(())
    }

    fn synthesize(&mut self, text: &str) -> Result<SynthesisResult, Box<dyn std::error::Error>> {
        let wav = self.run(&["--stdin", "--stdout"], Some(text))?;
        Ok(decode_wav_stream(&wav)?)
    }
}

/// Parse the table emitted by `espeak-ng --voices` into voice descriptors.
///
/// Rows look like:
///
/// ```text
/// Pty Language       Age/Gender VoiceName          File                 Other Languages
///  5  fr              --/M      French_(France)    roa/fr
///  5  fr-be           --/M      French_(Belgium)   roa/fr-be
/// ```
///
/// The `File` column is the identifier; `VoiceName` the display name.
fn parse_voice_table(output: &str) -> Vec<VoiceDescriptor> {
    output
        .lines()
        .skip(1)
        .filter_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 5 {
                return None;
            }
            Some(VoiceDescriptor::new(fields[4], fields[3]))
        })
        .collect()
}

/// Decode the WAV stream espeak-ng writes to stdout.
///
/// When writing to a pipe espeak-ng cannot seek back to patch the RIFF
/// sizes, so the header may claim more data than the stream carries; samples
/// are read until the stream ends rather than trusting the declared length.
fn decode_wav_stream(bytes: &[u8]) -> Result<SynthesisResult, EspeakError> {
    let mut reader = hound::WavReader::new(Cursor::new(bytes))?;
    let spec = reader.spec();

    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Int => {
            let max = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map_while(Result::ok)
                .map(|v| v as f32 / max)
                .collect()
        }
        hound::SampleFormat::Float => reader.samples::<f32>().map_while(Result::ok).collect(),
    };

    Ok(SynthesisResult {
        samples,
        sample_rate: spec.sample_rate,
    })
}

fn canonicalize_stdin_payload(input: &str) -> Cow<'_, str> {
    if input.ends_with('\n') {
        Cow::Borrowed(input)
    } else {
        Cow::Owned(format!("{input}\n"))
    }
}
