//! Wire schema for the classification service.
//!
//! Field names are the service's own (Portuguese); mapping into the display
//! models happens at this boundary so nothing upstream sees raw wire shapes.

use serde::{Deserialize, Deserializer};

use triagem_types::{Classification, ClassificationOutcome, HistoryEntry, fallback_subject};

/// A classified email as returned by `POST /emails/ai`.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailRecord {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    #[serde(default)]
    pub conteudo: String,
    pub classificacao: String,
    #[serde(default)]
    pub resposta: String,
    #[serde(default)]
    pub created_at: String,
    pub assunto: Option<String>,
}

impl EmailRecord {
    /// Normalize into the display model.
    ///
    /// `original_content` is what the user submitted (their text, or the file
    /// name); the subject fallback keys off the wire `conteudo` the service
    /// echoed back, matching the frontend's behavior.
    #[must_use]
    pub fn into_outcome(self, original_content: String) -> ClassificationOutcome {
        let subject = match self.assunto {
            Some(assunto) if !assunto.trim().is_empty() => assunto,
            _ => fallback_subject(&self.classificacao, &self.conteudo),
        };
        ClassificationOutcome {
            id: self.id,
            subject,
            body: self.resposta,
            classification: Classification::from_wire(&self.classificacao),
            original_content,
            created_at: self.created_at,
        }
    }
}

/// One page of `GET /emails`.
#[derive(Debug, Deserialize)]
pub(crate) struct HistoryPage {
    #[serde(default)]
    pub(crate) items: Vec<HistoryItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HistoryItem {
    #[serde(deserialize_with = "id_as_string")]
    id: String,
    assunto: Option<String>,
    classificacao: String,
    #[serde(default)]
    resposta: String,
    #[serde(default)]
    created_at: String,
}

impl HistoryItem {
    pub(crate) fn into_entry(self) -> HistoryEntry {
        let subject = match self.assunto {
            Some(assunto) if !assunto.trim().is_empty() => assunto,
            _ => fallback_subject(&self.classificacao, ""),
        };
        HistoryEntry {
            id: self.id,
            subject,
            classification: Classification::from_wire(&self.classificacao),
            reply: self.resposta,
            created_at: self.created_at,
        }
    }
}

/// Error body the service attaches to non-2xx responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub(crate) detail: Option<String>,
}

/// The service is inconsistent about id types (integer vs string); accept both.
fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(i64),
        Text(String),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Number(n) => n.to_string(),
        RawId::Text(s) => s,
    })
}
