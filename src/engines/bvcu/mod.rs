//! BVCU voice-bundle resolution engine.
//!
//! This module resolves a directory of BVCU (Binary Voice Compression Unit)
//! voice files into an immutable resource bundle and drives an external
//! synthesis backend with it. Archive internals are proprietary and are
//! never parsed — payloads move through the bundle as raw bytes.
//!
//! # Voice Directory Layout
//!
//! ```text
//! voices/
//! ├── frf.bnx                      # voice data
//! ├── frf_hd.bnx                   # voice data, high-definition variant
//! ├── frf.bvcu                     # voice data, single-file archive
//! ├── frf_hd.bvcu                  # voice data, high-definition archive
//! ├── claire_22k_lf.bvcu           # voice data, alternate named archive
//! ├── frf.dca                      # pronunciation dictionary
//! ├── frf_accent_restoration.dca   # pronunciation dictionary
//! ├── frf.ldi                      # linguistic data
//! ├── frf.oso                      # opaque configuration
//! ├── frf.trz                      # opaque configuration
//! ├── frf_iv.trz.gra               # opaque configuration
//! ├── frf_oov.trz.gra              # opaque configuration
//! └── user.userdico                # user pronunciation dictionary (text)
//! ```
//!
//! Only these exact names are considered (`frf` is the configurable stem);
//! anything else in the directory is ignored. Every file is optional — an
//! empty directory resolves to an empty bundle and synthesis falls back to
//! the backend's default voice.
//!
//! # Resolution Rules
//!
//! - **Voice data**: all existing candidates are read and the largest
//!   payload wins; equal sizes resolve to the earliest declared name.
//! - **Dictionaries**: concatenated in declared order, no separator.
//! - **Linguistic data**: single candidate, passed through as-is.
//! - **User dictionary**: decoded as UTF-8 text, stored under the
//!   configuration key `user_dictionary`.
//! - **Opaque configuration**: raw bytes stored under the file name.
//!
//! # Examples
//!
//! ## Resolving a directory without a backend
//!
//! ```rust,no_run
//! use bvcu_rs::engines::bvcu::VoiceResources;
//! use std::path::Path;
//!
//! let resources = VoiceResources::load(Path::new("voices"), "frf")?;
//! for entry in resources.inventory() {
//!     println!("{} ({:?}, {} bytes)", entry.name, entry.role, entry.len);
//! }
//! # Ok::<(), bvcu_rs::engines::bvcu::BvcuError>(())
//! ```
//!
//! ## Driving a synthesis backend
//!
//! ```rust,no_run
//! use bvcu_rs::engines::{bvcu::{BvcuEngine, BvcuLoadParamsBuilder}, espeak::EspeakSynthesizer};
//! use std::path::Path;
//!
//! let mut engine = BvcuEngine::new(EspeakSynthesizer::new());
//! let params = BvcuLoadParamsBuilder::default().language("fr-be").build()?;
//! engine.load_voice_with_params(Path::new("voices"), params)?;
//! engine.save_to_file("Bonjour", Path::new("out.wav"))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod catalog;
pub mod engine;
pub mod resources;
pub mod selector;

pub use catalog::{classify, Role, CANDIDATES, USER_DICTIONARY_KEY};
pub use engine::{BvcuEngine, BvcuLoadParams, BvcuLoadParamsBuilder};
pub use resources::{BvcuError, ConfigEntry, FileEntry, VoiceResources};
pub use selector::select_voice;
