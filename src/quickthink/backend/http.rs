use super::{Backend, Endpoint};
use crate::error::{QuickThinkError, Result};
use crate::model::{Deck, DeckDraft, FileUpload, Flashcard, FlashcardDraft};
use reqwest::blocking::{multipart, Client, RequestBuilder, Response};
use reqwest::Url;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};
use uuid::Uuid;

pub const IDEMPOTENCY_HEADER: &str = "Idempotency-Key";

/// Talks to the deck service over HTTP. One request per call, never retried.
pub struct HttpBackend {
    client: Client,
    base: Url,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base = Url::parse(base_url)
            .map_err(|e| QuickThinkError::Config(format!("Invalid API URL {}: {}", base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(QuickThinkError::Config(format!(
                "Invalid API URL {}: not a base URL",
                base_url
            )));
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Absolute URL for an endpoint. Ids are percent-encoded as path segments.
    pub fn url_for(&self, endpoint: &Endpoint) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| QuickThinkError::Config("API URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(endpoint.segments());
        Ok(url)
    }

    fn send(
        &self,
        endpoint: Endpoint,
        body: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> Result<Response> {
        let url = self.url_for(&endpoint)?;
        let mut request = self.client.request(endpoint.method(), url);
        if endpoint.is_mutating() {
            request = request.header(IDEMPOTENCY_HEADER, Uuid::new_v4().to_string());
        }

        debug!(%endpoint, "sending request");
        let response = body(request).send()?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let detail = error_detail(response.text().unwrap_or_default());
        warn!(%endpoint, status = status.as_u16(), %detail, "request rejected");
        Err(QuickThinkError::Status {
            status: status.as_u16(),
            detail,
        })
    }
}

/// Pull a readable message out of an error body. The service answers with
/// `{"detail": "..."}`; anything else is passed through as-is.
pub(crate) fn error_detail(body: String) -> String {
    match serde_json::from_str::<Value>(&body) {
        Ok(Value::Object(map)) => match map.get("detail") {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => body,
        },
        _ if body.trim().is_empty() => "no details".to_string(),
        _ => body,
    }
}

impl Backend for HttpBackend {
    fn list_decks(&self) -> Result<Vec<Deck>> {
        Ok(self.send(Endpoint::ListDecks, |r| r)?.json()?)
    }

    fn create_deck(&mut self, draft: &DeckDraft) -> Result<()> {
        self.send(Endpoint::CreateDeck, |r| r.json(draft))?;
        Ok(())
    }

    fn update_deck(&mut self, id: &str, draft: &DeckDraft) -> Result<()> {
        self.send(Endpoint::UpdateDeck(id), |r| r.json(draft))?;
        Ok(())
    }

    fn delete_deck(&mut self, id: &str) -> Result<()> {
        self.send(Endpoint::DeleteDeck(id), |r| r)?;
        Ok(())
    }

    fn list_flashcards(&self, deck_id: &str) -> Result<Vec<Flashcard>> {
        let response = self.send(Endpoint::ListFlashcards(deck_id), |r| r)?;
        Ok(response.json()?)
    }

    fn create_flashcards(&mut self, deck_id: &str, cards: &[FlashcardDraft]) -> Result<()> {
        self.send(Endpoint::CreateFlashcards(deck_id), |r| r.json(cards))?;
        Ok(())
    }

    fn generate_flashcards(&mut self, deck_id: &str, upload: &FileUpload) -> Result<()> {
        let part = multipart::Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str(&upload.mime_type)?;
        let form = multipart::Form::new().part("file", part);

        self.send(Endpoint::GenerateFlashcards(deck_id), |r| r.multipart(form))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend(base: &str) -> HttpBackend {
        HttpBackend::new(base, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn builds_urls_from_plain_base() {
        let b = backend("http://localhost:8000");
        let url = b.url_for(&Endpoint::DeleteDeck("d1")).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/decks/d1");
    }

    #[test]
    fn keeps_base_path_prefix() {
        let b = backend("https://example.test/quickthink/");
        let url = b.url_for(&Endpoint::ListFlashcards("d1")).unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.test/quickthink/api/decks/d1/flashcards"
        );
    }

    #[test]
    fn encodes_ids_as_single_segment() {
        let b = backend("http://localhost:8000");
        let url = b.url_for(&Endpoint::DeleteDeck("a/b c")).unwrap();
        assert_eq!(url.path(), "/api/decks/a%2Fb%20c");
    }

    #[test]
    fn rejects_invalid_base() {
        let timeout = Duration::from_secs(1);
        assert!(HttpBackend::new("not a url", timeout).is_err());
        assert!(HttpBackend::new("mailto:someone", timeout).is_err());
    }

    #[test]
    fn extracts_detail_field() {
        assert_eq!(
            error_detail(r#"{"detail":"Deck not found or not owned by user."}"#.into()),
            "Deck not found or not owned by user."
        );
        assert_eq!(error_detail("Bad Gateway".into()), "Bad Gateway");
        assert_eq!(error_detail("".into()), "no details");
        assert_eq!(
            error_detail(r#"{"detail":[{"loc":["body"]}]}"#.into()),
            r#"[{"loc":["body"]}]"#
        );
    }
}
