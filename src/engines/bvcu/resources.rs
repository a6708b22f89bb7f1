use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::catalog::{Role, CANDIDATES, USER_DICTIONARY_KEY};

#[derive(thiserror::Error, Debug)]
pub enum BvcuError {
    #[error("voice directory {path:?} is unavailable: {source}")]
    DirectoryUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("speech backend unavailable: {0}")]
    SynthesisUnavailable(String),
    #[error("synthesis failed: {0}")]
    Synthesis(String),
}

/// One recognized file found during the inventory scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    /// File name within the voice directory
    pub name: String,
    /// Semantic role assigned by the candidate table
    pub role: Role,
    /// Size on disk in bytes
    pub len: u64,
}

/// A value in the resolved configuration mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigEntry {
    /// Decoded text payload (the user dictionary)
    Text(String),
    /// Raw bytes, never interpreted
    Bytes(Vec<u8>),
}

impl ConfigEntry {
    /// The decoded text, if this entry holds one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ConfigEntry::Text(text) => Some(text),
            ConfigEntry::Bytes(_) => None,
        }
    }
}

/// The resolved, immutable view of a voice directory.
///
/// Built once by [`VoiceResources::load`]; every recognized file that could
/// be read appears exactly once, either in a scalar field or in the
/// configuration mapping. Unrecognized files are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceResources {
    inventory: Vec<FileEntry>,
    voice_data: Option<Vec<u8>>,
    dictionary: Option<Vec<u8>>,
    linguistic: Option<Vec<u8>>,
    configuration: BTreeMap<String, ConfigEntry>,
}

impl VoiceResources {
    /// Scan `dir` for the fixed candidate set and resolve the bundle.
    ///
    /// A directory that does not exist yields an empty bundle; a path that
    /// exists but cannot be scanned as a directory fails with
    /// [`BvcuError::DirectoryUnavailable`]. A read failure on an individual
    /// candidate is logged and the candidate treated as absent.
    pub fn load(dir: &Path, stem: &str) -> Result<Self, BvcuError> {
        let inventory = scan_inventory(dir, stem)?;

        let mut resources = Self {
            inventory,
            voice_data: None,
            dictionary: None,
            linguistic: None,
            configuration: BTreeMap::new(),
        };
        resources.resolve(dir);

        log::info!(
            "Resolved {} voice files from {}: voice data {} bytes, dictionary {} bytes",
            resources.inventory.len(),
            dir.display(),
            resources.voice_data.as_ref().map_or(0, Vec::len),
            resources.dictionary.as_ref().map_or(0, Vec::len),
        );

        Ok(resources)
    }

    fn resolve(&mut self, dir: &Path) {
        // The size-wins rule is a heuristic: a longer payload is assumed to
        // be the higher-fidelity ("HD") variant, since archive internals are
        // never parsed. Strictly-greater comparison keeps the earliest
        // declared candidate on a tie.
        let mut best_voice: Option<(&str, Vec<u8>)> = None;

        for entry in &self.inventory {
            let path = dir.join(&entry.name);
            let bytes = match std::fs::read(&path) {
                Ok(bytes) => bytes,
                Err(err) => {
                    log::warn!("Skipping {}: {err}", entry.name);
                    continue;
                }
            };

            match entry.role {
                Role::VoiceData => {
                    let longer = best_voice
                        .as_ref()
                        .is_none_or(|(_, best)| bytes.len() > best.len());
                    if longer {
                        best_voice = Some((&entry.name, bytes));
                    }
                }
                Role::Dictionary => {
                    self.dictionary
                        .get_or_insert_with(Vec::new)
                        .extend_from_slice(&bytes);
                }
                Role::Linguistic => {
                    self.linguistic = Some(bytes);
                }
                Role::UserDictionary => match String::from_utf8(bytes) {
                    Ok(text) => {
                        self.configuration
                            .insert(USER_DICTIONARY_KEY.to_string(), ConfigEntry::Text(text));
                    }
                    Err(err) => log::warn!("Skipping {}: not valid UTF-8 ({err})", entry.name),
                },
                Role::OpaqueConfig => {
                    self.configuration
                        .insert(entry.name.clone(), ConfigEntry::Bytes(bytes));
                }
                Role::Unrecognized => {}
            }
        }

        if let Some((name, bytes)) = best_voice {
            log::debug!("Voice data candidate {name} selected ({} bytes)", bytes.len());
            self.voice_data = Some(bytes);
        }
    }

    /// The selected primary voice payload, if any candidate existed.
    pub fn voice_data(&self) -> Option<&[u8]> {
        self.voice_data.as_deref()
    }

    /// All dictionary payloads concatenated in candidate order, if any existed.
    pub fn dictionary(&self) -> Option<&[u8]> {
        self.dictionary.as_deref()
    }

    /// The linguistic data payload, if present.
    pub fn linguistic(&self) -> Option<&[u8]> {
        self.linguistic.as_deref()
    }

    /// Opaque configuration blobs keyed by file name, plus the decoded user
    /// dictionary under [`USER_DICTIONARY_KEY`].
    pub fn configuration(&self) -> &BTreeMap<String, ConfigEntry> {
        &self.configuration
    }

    /// The decoded user dictionary, if `user.userdico` was present.
    pub fn user_dictionary(&self) -> Option<&str> {
        self.configuration
            .get(USER_DICTIONARY_KEY)
            .and_then(ConfigEntry::as_text)
    }

    /// Every recognized file found by the inventory scan, in candidate order.
    pub fn inventory(&self) -> &[FileEntry] {
        &self.inventory
    }

    /// True when no recognized file was found at all.
    pub fn is_empty(&self) -> bool {
        self.inventory.is_empty()
    }
}

/// Test each candidate name for existence and record name, role and size.
///
/// Exact-name lookups only; the directory is never enumerated.
fn scan_inventory(dir: &Path, stem: &str) -> Result<Vec<FileEntry>, BvcuError> {
    match std::fs::metadata(dir) {
        Ok(meta) if !meta.is_dir() => {
            return Err(BvcuError::DirectoryUnavailable {
                path: dir.to_path_buf(),
                source: std::io::Error::other("not a directory"),
            });
        }
        Err(err) if err.kind() != std::io::ErrorKind::NotFound => {
            return Err(BvcuError::DirectoryUnavailable {
                path: dir.to_path_buf(),
                source: err,
            });
        }
        // Missing directory: an empty inventory, not a failure.
        _ => {}
    }

    let mut inventory = Vec::new();
    for candidate in CANDIDATES {
        let name = candidate.file_name(stem);
        if let Ok(meta) = std::fs::metadata(dir.join(&name)) {
            if meta.is_file() {
                inventory.push(FileEntry {
                    name,
                    role: candidate.role(),
                    len: meta.len(),
                });
            }
        }
    }
    Ok(inventory)
}

#[cfg(test)]
mod tests {
    use super::{BvcuError, ConfigEntry, VoiceResources};
    use crate::engines::bvcu::catalog::Role;
    use std::fs;
    use std::path::Path;

    fn load(dir: &Path) -> VoiceResources {
        VoiceResources::load(dir, "frf").expect("load should succeed")
    }

    #[test]
    fn empty_directory_yields_fully_absent_bundle() {
        let dir = tempfile::tempdir().expect("tempdir");
        let resources = load(dir.path());

        assert!(resources.is_empty());
        assert!(resources.inventory().is_empty());
        assert!(resources.voice_data().is_none());
        assert!(resources.dictionary().is_none());
        assert!(resources.linguistic().is_none());
        assert!(resources.configuration().is_empty());
    }

    #[test]
    fn missing_directory_is_not_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let resources = load(&dir.path().join("no-such-subdir"));
        assert!(resources.is_empty());
    }

    #[test]
    fn file_path_fails_as_directory_unavailable() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = dir.path().join("frf.bnx");
        fs::write(&file, b"payload").expect("write");

        let err = VoiceResources::load(&file, "frf").expect_err("must fail");
        assert!(matches!(err, BvcuError::DirectoryUnavailable { .. }));
    }

    #[test]
    fn hd_variant_wins_by_size() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("frf.bnx"), vec![0u8; 22]).expect("write");
        fs::write(dir.path().join("frf_hd.bnx"), vec![1u8; 26]).expect("write");

        let resources = load(dir.path());
        assert_eq!(resources.voice_data().map(<[u8]>::len), Some(26));
    }

    #[test]
    fn size_outranks_file_family() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("frf.bvcu"), vec![0u8; 10]).expect("write");
        fs::write(dir.path().join("frf.bnx"), vec![1u8; 27]).expect("write");

        let resources = load(dir.path());
        assert_eq!(resources.voice_data().map(<[u8]>::len), Some(27));
    }

    #[test]
    fn size_tie_resolves_to_earliest_declared_candidate() {
        let dir = tempfile::tempdir().expect("tempdir");
        // frf.bnx is declared before frf_hd.bnx; equal sizes keep it.
        fs::write(dir.path().join("frf.bnx"), b"standard").expect("write");
        fs::write(dir.path().join("frf_hd.bnx"), b"hd-bytes").expect("write");

        let resources = load(dir.path());
        assert_eq!(resources.voice_data(), Some(b"standard".as_slice()));
    }

    #[test]
    fn alternate_archive_competes_on_size() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("frf.bvcu"), vec![0u8; 8]).expect("write");
        fs::write(dir.path().join("claire_22k_lf.bvcu"), vec![1u8; 40]).expect("write");

        let resources = load(dir.path());
        assert_eq!(resources.voice_data().map(<[u8]>::len), Some(40));
    }

    #[test]
    fn dictionaries_concatenate_in_declared_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("frf.dca"), b"Dict1").expect("write");
        fs::write(dir.path().join("frf_accent_restoration.dca"), b"Dict2").expect("write");

        let resources = load(dir.path());
        assert_eq!(resources.dictionary(), Some(b"Dict1Dict2".as_slice()));
    }

    #[test]
    fn empty_dictionary_file_is_present_with_zero_length() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("frf.dca"), b"").expect("write");

        let resources = load(dir.path());
        assert_eq!(resources.dictionary(), Some(b"".as_slice()));
    }

    #[test]
    fn user_dictionary_decodes_as_text_under_fixed_key() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("user.userdico"), "test=test").expect("write");

        let resources = load(dir.path());
        assert_eq!(resources.user_dictionary(), Some("test=test"));
        assert!(resources.voice_data().is_none());
        assert!(resources.dictionary().is_none());
        assert!(resources.linguistic().is_none());
        assert_eq!(resources.configuration().len(), 1);
    }

    #[test]
    fn non_utf8_user_dictionary_is_skipped() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("user.userdico"), [0xff, 0xfe, 0x00]).expect("write");

        let resources = load(dir.path());
        assert!(resources.user_dictionary().is_none());
        // Still counted by the inventory: the file exists and is recognized.
        assert_eq!(resources.inventory().len(), 1);
    }

    #[test]
    fn full_bundle_accounts_for_every_recognized_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("frf.bnx"), b"BVCU voice data sample").expect("write");
        fs::write(dir.path().join("frf.dca"), b"BVCU dictionary").expect("write");
        fs::write(dir.path().join("frf.ldi"), b"BVCU linguistic").expect("write");
        fs::write(dir.path().join("frf.oso"), b"BVCU orthographic").expect("write");
        fs::write(dir.path().join("frf.trz"), b"BVCU transcription").expect("write");
        fs::write(dir.path().join("user.userdico"), "test=test").expect("write");

        let resources = load(dir.path());
        assert_eq!(resources.inventory().len(), 6);
        assert_eq!(resources.voice_data(), Some(b"BVCU voice data sample".as_slice()));
        assert_eq!(resources.dictionary(), Some(b"BVCU dictionary".as_slice()));
        assert_eq!(resources.linguistic(), Some(b"BVCU linguistic".as_slice()));
        assert_eq!(
            resources.configuration().get("frf.oso"),
            Some(&ConfigEntry::Bytes(b"BVCU orthographic".to_vec()))
        );
        assert_eq!(
            resources.configuration().get("frf.trz"),
            Some(&ConfigEntry::Bytes(b"BVCU transcription".to_vec()))
        );
        assert_eq!(resources.user_dictionary(), Some("test=test"));
    }

    #[test]
    fn unrecognized_files_are_ignored() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("README.txt"), b"not a voice file").expect("write");
        fs::write(dir.path().join("frf.wav"), b"not recognized either").expect("write");

        let resources = load(dir.path());
        assert!(resources.is_empty());
    }

    #[test]
    fn stem_is_a_configuration_value() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("enu.bnx"), b"american voice").expect("write");
        fs::write(dir.path().join("frf.bnx"), b"french voice ignored here").expect("write");

        let resources = VoiceResources::load(dir.path(), "enu").expect("load");
        assert_eq!(resources.inventory().len(), 1);
        assert_eq!(resources.inventory()[0].name, "enu.bnx");
        assert_eq!(resources.inventory()[0].role, Role::VoiceData);
        assert_eq!(resources.voice_data(), Some(b"american voice".as_slice()));
    }

    #[test]
    fn inventory_records_sizes() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("frf.ldi"), vec![7u8; 42]).expect("write");

        let resources = load(dir.path());
        assert_eq!(resources.inventory()[0].len, 42);
        assert_eq!(resources.inventory()[0].role, Role::Linguistic);
    }

    #[test]
    fn repeated_loads_are_idempotent() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("frf.bvcu"), vec![3u8; 512]).expect("write");
        fs::write(dir.path().join("frf_hd.bvcu"), vec![4u8; 1024]).expect("write");
        fs::write(dir.path().join("frf.dca"), b"Dict1").expect("write");
        fs::write(dir.path().join("frf_accent_restoration.dca"), b"Dict2").expect("write");
        fs::write(dir.path().join("user.userdico"), "bonjour=bonjour").expect("write");

        let first = load(dir.path());
        for _ in 0..200 {
            let next = load(dir.path());
            assert_eq!(next, first);
        }
        assert_eq!(first.inventory().len(), 5);
        assert_eq!(first.voice_data().map(<[u8]>::len), Some(1024));
    }
}
