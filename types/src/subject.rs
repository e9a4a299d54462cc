//! Deterministic subject fallback for records the service returns without one.

use crate::{LABEL_PRODUCTIVE, LABEL_UNPRODUCTIVE};

/// Fixed subject for productive classifications.
pub const SUBJECT_PRODUCTIVE: &str = "Retorno AutoU Invest — seu atendimento";
/// Fixed subject for unproductive classifications.
pub const SUBJECT_UNPRODUCTIVE: &str = "Agradecimento — AutoU Invest";
/// Generic subject when nothing better can be derived.
pub const SUBJECT_GENERIC: &str = "Retorno — AutoU Invest";

/// How many characters of the original content survive into a derived subject.
const PREVIEW_CHARS: usize = 60;

/// Derive a display subject when the service omits `assunto`.
///
/// Pure function of `(classification label, original content)`:
/// - the two known labels map to fixed phrases;
/// - anything else gets a `Re:` preview of the original content with
///   whitespace collapsed and truncated to 60 characters;
/// - an empty original content falls back to a generic phrase.
#[must_use]
pub fn fallback_subject(classification: &str, original_content: &str) -> String {
    match classification {
        LABEL_PRODUCTIVE => SUBJECT_PRODUCTIVE.to_string(),
        LABEL_UNPRODUCTIVE => SUBJECT_UNPRODUCTIVE.to_string(),
        _ => {
            let preview: String = collapse_whitespace(original_content)
                .chars()
                .take(PREVIEW_CHARS)
                .collect();
            if preview.is_empty() {
                SUBJECT_GENERIC.to_string()
            } else {
                format!("Re: {preview}")
            }
        }
    }
}

/// Replace every run of whitespace with a single space, trimming the ends.
fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
