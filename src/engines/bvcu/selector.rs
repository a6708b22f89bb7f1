use crate::VoiceDescriptor;

/// Final path-like segment of a voice identifier.
///
/// espeak-ng identifiers are voice file paths (`roa/fr`, `gmw/en-gb`); the
/// last segment carries the language code. Identifiers without a separator
/// are treated as a single segment.
fn language_segment(id: &str) -> &str {
    id.rsplit('/').next().unwrap_or(id)
}

/// Select the voice best matching the requested language code.
///
/// Preference order:
/// 1. exact match: the identifier's language segment equals the requested
///    code (case-insensitive) — requesting `fr` picks `roa/fr` over
///    `roa/fr-be`;
/// 2. regional fallback: the language segment contains the requested code,
///    then its primary subtag — requesting `fr-be` may fall back to any
///    identifier containing `fr`;
/// 3. `None`: the backend's default voice stays active; not an error.
///
/// Within each tier the first catalog-order match wins, so selection is
/// deterministic for a fixed catalog.
pub fn select_voice<'a>(
    voices: &'a [VoiceDescriptor],
    language: &str,
) -> Option<&'a VoiceDescriptor> {
    if language.is_empty() {
        return None;
    }
    let requested = language.to_ascii_lowercase();

    // Exact match must outrank any regional variant, however early the
    // variant appears in the catalog.
    if let Some(voice) = voices
        .iter()
        .find(|v| language_segment(&v.id).to_ascii_lowercase() == requested)
    {
        return Some(voice);
    }

    if let Some(voice) = voices
        .iter()
        .find(|v| language_segment(&v.id).to_ascii_lowercase().contains(&requested))
    {
        return Some(voice);
    }

    let primary = requested.split(['-', '_']).next().unwrap_or(&requested);
    voices
        .iter()
        .find(|v| language_segment(&v.id).to_ascii_lowercase().contains(primary))
}
