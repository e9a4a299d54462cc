//! Export helpers for a displayed outcome.
//!
//! The clipboard itself and the mail client are presentation concerns; this
//! module only produces the strings they consume.

use triagem_types::ClassificationOutcome;

/// Build a `mailto:` URL pre-filled with the outcome's subject and body.
#[must_use]
pub fn mailto_url(outcome: &ClassificationOutcome) -> String {
    format!(
        "mailto:?subject={}&body={}",
        percent_encode(&outcome.subject),
        percent_encode(&outcome.body)
    )
}

/// Percent-encode a component for a `mailto:` URL.
///
/// Form serialization uses `+` for spaces, which mail clients do not decode;
/// rewrite those to `%20`.
fn percent_encode(component: &str) -> String {
    url::form_urlencoded::byte_serialize(component.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
