//! HTTP client for the Triagem classification service.
//!
//! # Architecture
//!
//! Two operations cover the whole remote contract:
//!
//! - [`classify`] - `POST /emails/ai`, multipart with either `conteudo` (text)
//!   or `file` (bytes), returning the classified record
//! - [`fetch_emails`] - `GET /emails?page={p}&page_size={n}`, returning a page
//!   of past results
//!
//! Both go through a shared hardened [`reqwest::Client`] with bounded
//! timeouts. Non-2xx responses are mapped through the service's
//! `{ "detail": ... }` error body when present, and synthesized from the
//! status code otherwise.
//!
//! # Error Handling
//!
//! Every failure is a [`ClientError`]; the `Display` impl is the user-facing
//! message the controllers surface verbatim. Nothing here retries on its own -
//! callers that want retries use [`retry::RetryPolicy`].

pub mod retry;
mod schema;

pub use schema::EmailRecord;

use std::sync::OnceLock;
use std::time::Duration;

use thiserror::Error;

use triagem_types::{HistoryEntry, InputDraft, InputMode};

const CONNECT_TIMEOUT_SECS: u64 = 30;
const REQUEST_TIMEOUT_SECS: u64 = 30;

const MAX_ERROR_BODY_BYTES: usize = 32 * 1024;

/// Base URL of the classification service.
///
/// Stored without a trailing slash so endpoint paths can be appended directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiBase(String);

impl ApiBase {
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self(base)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn classify_url(&self) -> String {
        format!("{}/emails/ai", self.0)
    }

    fn emails_url(&self, page: u32, page_size: u32) -> String {
        format!("{}/emails?page={page}&page_size={page_size}", self.0)
    }
}

/// Errors from the remote classification service.
///
/// The `Display` output is the exact message shown to the user, so the
/// `Service` variant carries the service's `detail` verbatim and `Status`
/// synthesizes the original frontend's `Erro {status}` phrasing.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network unreachable or the response body could not be read.
    #[error("Falha de conexão com o serviço")]
    Transport(#[source] reqwest::Error),
    /// Non-2xx with a structured `detail` message.
    #[error("{detail}")]
    Service { status: u16, detail: String },
    /// Non-2xx without a parseable body.
    #[error("Erro {0}")]
    Status(u16),
    /// The request exceeded its bounded duration.
    #[error("Tempo esgotado ao contatar o serviço")]
    Timeout,
    /// 2xx with a body that did not match the documented schema.
    #[error("Resposta inválida do serviço")]
    InvalidResponse(#[source] reqwest::Error),
}

impl ClientError {
    fn from_send(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(err)
        }
    }

    /// HTTP status associated with the error, when there is one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Service { status, .. } | Self::Status(status) => Some(*status),
            _ => None,
        }
    }
}

pub fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap_or_else(|e| {
                tracing::error!("Failed to build configured HTTP client: {e}");
                reqwest::Client::new()
            })
    })
}

/// Submit a draft for classification.
///
/// Builds a multipart body carrying exactly the active branch of the draft:
/// the raw text as the `conteudo` field, or the file's bytes as the `file`
/// field. Performs one round trip; no retries.
pub async fn classify(base: &ApiBase, draft: &InputDraft) -> Result<EmailRecord, ClientError> {
    let mut form = reqwest::multipart::Form::new();
    match draft.mode() {
        InputMode::Text => {
            form = form.text("conteudo", draft.text().to_string());
        }
        InputMode::File => {
            if let Some(file) = draft.file() {
                let part = reqwest::multipart::Part::bytes(file.bytes.clone())
                    .file_name(file.name.clone());
                form = form.part("file", part);
            }
        }
    }

    let response = http_client()
        .post(base.classify_url())
        .multipart(form)
        .send()
        .await
        .map_err(ClientError::from_send)?;

    if !response.status().is_success() {
        return Err(error_from_response(response).await);
    }

    response
        .json::<EmailRecord>()
        .await
        .map_err(ClientError::InvalidResponse)
}

/// Fetch one page of past classifications.
///
/// The returned list is a wholesale snapshot; entries whose `assunto` is
/// missing get a deterministic fallback subject.
pub async fn fetch_emails(
    base: &ApiBase,
    page: u32,
    page_size: u32,
) -> Result<Vec<HistoryEntry>, ClientError> {
    let response = http_client()
        .get(base.emails_url(page, page_size))
        .send()
        .await
        .map_err(ClientError::from_send)?;

    if !response.status().is_success() {
        return Err(error_from_response(response).await);
    }

    let body = response
        .json::<schema::HistoryPage>()
        .await
        .map_err(ClientError::InvalidResponse)?;

    Ok(body
        .items
        .into_iter()
        .map(schema::HistoryItem::into_entry)
        .collect())
}

/// Map a non-2xx response into a [`ClientError`].
///
/// Tries the service's `{ "detail": ... }` body first; anything unparseable
/// (including an empty body) degrades to the bare status code. The body read
/// is capped so a misbehaving server cannot balloon memory.
async fn error_from_response(response: reqwest::Response) -> ClientError {
    let status = response.status().as_u16();
    let Ok(body) = response.bytes().await else {
        return ClientError::Status(status);
    };
    let body = &body[..body.len().min(MAX_ERROR_BODY_BYTES)];

    match serde_json::from_slice::<schema::ErrorBody>(body) {
        Ok(schema::ErrorBody {
            detail: Some(detail),
        }) if !detail.trim().is_empty() => ClientError::Service { status, detail },
        _ => {
            tracing::warn!(status, "Service returned an error without a detail body");
            ClientError::Status(status)
        }
    }
}
