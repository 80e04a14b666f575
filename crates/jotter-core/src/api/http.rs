use std::fmt;

use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;

use super::{DocumentApi, DocumentList};
use crate::config::ResolvedClientConfig;
use crate::error::{Error, Result};
use crate::models::{Note, NoteData, NoteId};
use crate::util::{is_http_url, normalize_text_option, parse_api_error};

#[derive(Serialize)]
struct DocumentBody<'a> {
    data: &'a NoteData,
}

/// reqwest-backed [`DocumentApi`] authenticated with a user access token.
#[derive(Clone)]
pub struct HttpDocumentClient {
    base_url: String,
    api_key: String,
    access_token: String,
    client: Client,
}

impl fmt::Debug for HttpDocumentClient {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("HttpDocumentClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("access_token", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl HttpDocumentClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Result<Self> {
        let base_url = normalize_text_option(Some(base_url.into())).ok_or_else(|| {
            Error::InvalidConfiguration("document API URL must not be empty".to_string())
        })?;
        if !is_http_url(&base_url) {
            return Err(Error::InvalidConfiguration(
                "document API URL must include http:// or https://".to_string(),
            ));
        }
        let access_token = access_token.into().trim().to_string();
        if access_token.is_empty() {
            return Err(Error::NotAuthenticated);
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into().trim().to_string(),
            access_token,
            client: Client::builder().build()?,
        })
    }

    pub fn from_config(config: &ResolvedClientConfig, access_token: &str) -> Result<Self> {
        Self::new(&config.api_base_url, &config.api_key, access_token)
    }

    fn collection_url(&self, collection: &str) -> String {
        format!(
            "{}/v1/collections/{}/documents",
            self.base_url,
            urlencoding::encode(collection)
        )
    }

    fn document_url(&self, id: &NoteId) -> String {
        format!(
            "{}/v1/documents/{}",
            self.base_url,
            urlencoding::encode(id.as_str())
        )
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .bearer_auth(&self.access_token)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = self.authorized(request).send().await?;
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(Error::Api(parse_api_error(status, &body)))
    }
}

impl DocumentApi for HttpDocumentClient {
    async fn read_documents(&self, collection: &str) -> Result<DocumentList> {
        tracing::debug!("GET documents in collection '{}'", collection);
        let response = self
            .send(self.client.get(self.collection_url(collection)))
            .await?;
        Ok(response.json::<DocumentList>().await?)
    }

    async fn create_document(&self, collection: &str, data: &NoteData) -> Result<Note> {
        tracing::debug!("POST document to collection '{}'", collection);
        let response = self
            .send(
                self.client
                    .post(self.collection_url(collection))
                    .json(&DocumentBody { data }),
            )
            .await?;
        Ok(response.json::<Note>().await?)
    }

    async fn update_document(&self, id: &NoteId, updates: &NoteData) -> Result<()> {
        tracing::debug!("PATCH document {}", id);
        self.send(
            self.client
                .patch(self.document_url(id))
                .json(&DocumentBody { data: updates }),
        )
        .await?;
        Ok(())
    }

    async fn delete_document(&self, id: &NoteId) -> Result<()> {
        tracing::debug!("DELETE document {}", id);
        self.send(self.client.delete(self.document_url(id))).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> HttpDocumentClient {
        HttpDocumentClient::new("https://api.example.com/", "anon", "token").unwrap()
    }

    #[test]
    fn builds_collection_and_document_urls() {
        let client = client();
        assert_eq!(
            client.collection_url("notes"),
            "https://api.example.com/v1/collections/notes/documents"
        );
        assert_eq!(
            client.document_url(&NoteId::from("a/b c")),
            "https://api.example.com/v1/documents/a%2Fb%20c"
        );
    }

    #[test]
    fn rejects_invalid_base_url_and_missing_token() {
        assert!(HttpDocumentClient::new("api.example.com", "anon", "token").is_err());
        assert!(matches!(
            HttpDocumentClient::new("https://api.example.com", "anon", "  "),
            Err(Error::NotAuthenticated)
        ));
    }

    #[test]
    fn debug_redacts_credentials() {
        let client =
            HttpDocumentClient::new("https://api.example.com", "secret-key", "secret-token")
                .unwrap();
        let rendered = format!("{client:?}");
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn document_body_wraps_data() {
        let data = NoteData::new().with_content("hi");
        let body = serde_json::to_value(DocumentBody { data: &data }).unwrap();
        assert_eq!(body, serde_json::json!({"data": {"content": "hi"}}));
    }

    #[test]
    fn document_list_without_documents_is_empty() {
        let list: DocumentList = serde_json::from_str("{}").unwrap();
        assert!(list.into_notes().is_empty());
        let list: DocumentList = serde_json::from_str(r#"{"documents":null}"#).unwrap();
        assert!(list.into_notes().is_empty());
    }
}
