use serde::Serialize;

/// Configuration key under which the decoded user dictionary is stored.
pub const USER_DICTIONARY_KEY: &str = "user_dictionary";

/// Semantic role of a recognized voice file.
///
/// Every candidate name maps to exactly one role; names outside the
/// candidate table are `Unrecognized` and excluded from the bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Role {
    /// Primary synthesis payload (`.bnx` / `.bvcu` archives)
    VoiceData,
    /// Pronunciation dictionary (`.dca`)
    Dictionary,
    /// Linguistic rule data (`.ldi`)
    Linguistic,
    /// User-supplied pronunciation overrides (`user.userdico`)
    UserDictionary,
    /// Opaque configuration blob (`.oso`, `.trz`, `.trz.gra`)
    OpaqueConfig,
    /// Not part of the candidate set; ignored
    Unrecognized,
}

/// How a candidate file name is derived from the configured stem.
#[derive(Debug, Clone, Copy)]
enum NameRule {
    /// `<stem>` followed by a fixed suffix, e.g. `frf_hd.bnx`
    Suffixed(&'static str),
    /// A stem-independent literal name, e.g. `user.userdico`
    Literal(&'static str),
}

/// One row of the candidate table.
#[derive(Debug, Clone, Copy)]
pub struct Candidate {
    rule: NameRule,
    role: Role,
}

impl Candidate {
    const fn suffixed(suffix: &'static str, role: Role) -> Self {
        Self {
            rule: NameRule::Suffixed(suffix),
            role,
        }
    }

    const fn literal(name: &'static str, role: Role) -> Self {
        Self {
            rule: NameRule::Literal(name),
            role,
        }
    }

    /// Resolve the on-disk file name for the given stem.
    pub fn file_name(&self, stem: &str) -> String {
        match self.rule {
            NameRule::Suffixed(suffix) => format!("{stem}{suffix}"),
            NameRule::Literal(name) => name.to_string(),
        }
    }

    /// Semantic role assigned to this candidate.
    pub fn role(&self) -> Role {
        self.role
    }
}

/// The fixed candidate table consulted by both the inventory scan and the
/// role classifier.
///
/// Declaration order is load-bearing: voice-data size ties resolve to the
/// earliest row, and dictionary payloads concatenate in row order.
pub const CANDIDATES: &[Candidate] = &[
    Candidate::suffixed(".bnx", Role::VoiceData),
    Candidate::suffixed(".dca", Role::Dictionary),
    Candidate::suffixed(".ldi", Role::Linguistic),
    Candidate::suffixed(".oso", Role::OpaqueConfig),
    Candidate::suffixed(".trz", Role::OpaqueConfig),
    Candidate::suffixed("_accent_restoration.dca", Role::Dictionary),
    Candidate::suffixed("_hd.bnx", Role::VoiceData),
    Candidate::suffixed("_iv.trz.gra", Role::OpaqueConfig),
    Candidate::suffixed("_oov.trz.gra", Role::OpaqueConfig),
    Candidate::literal("user.userdico", Role::UserDictionary),
    Candidate::suffixed(".bvcu", Role::VoiceData),
    Candidate::suffixed("_hd.bvcu", Role::VoiceData),
    Candidate::literal("claire_22k_lf.bvcu", Role::VoiceData),
];

/// Map a file name to its semantic role for the given stem.
///
/// Total and deterministic: names outside the candidate table map to
/// [`Role::Unrecognized`].
pub fn classify(name: &str, stem: &str) -> Role {
    CANDIDATES
        .iter()
        .find(|candidate| candidate.file_name(stem) == name)
        .map(|candidate| candidate.role())
        .unwrap_or(Role::Unrecognized)
}
