//! Firestore REST store
//!
//! Talks to `firestore.googleapis.com/v1` with a service account:
//! - `documents:listCollectionIds` to enumerate top-level collections
//! - `documents:runQuery` with a limit to sample documents
//! - `GET` on a document path to check existence (404 means absent)
//! - `PATCH` without an update mask to create or fully replace a document

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};
use serde::Deserialize;
use serde_json::{Map, Value as JsonValue, json};
use tracing::debug;

use super::{Document, DocumentReader, DocumentWriter};
use crate::codec::Fields;
use crate::error::{ApiErrorInfo, ConfigError, Result, StoreError};

pub mod auth;
pub mod wire;

pub use auth::{ServiceAccount, TokenSource};

const DEFAULT_BASE_URL: &str = "https://firestore.googleapis.com/v1";
const COLLECTION_PAGE_SIZE: u32 = 300;

/// Sentinel database id meaning the project's primary database.
pub const DEFAULT_DATABASE_ID: &str = "(default)";

/// Firestore store backed by the REST API.
pub struct FirestoreStore {
    http: reqwest::Client,
    tokens: TokenSource,
    project_id: String,
    database_id: String,
    base_url: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListCollectionIdsResponse {
    #[serde(default)]
    collection_ids: Vec<String>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Deserialize)]
struct RunQueryItem {
    #[serde(default)]
    document: Option<WireDocument>,
}

#[derive(Deserialize)]
struct WireDocument {
    name: String,
    #[serde(default)]
    fields: Map<String, JsonValue>,
}

impl FirestoreStore {
    /// Create a store for `project_id` / `database_id` and obtain a first token.
    pub async fn connect(
        account: ServiceAccount,
        project_id: impl Into<String>,
        database_id: impl Into<String>,
    ) -> Result<Self> {
        let http = reqwest::Client::new();
        let store = Self {
            tokens: TokenSource::new(account, http.clone()),
            http,
            project_id: project_id.into(),
            database_id: database_id.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        };
        store.tokens.token().await?;
        debug!(
            "Connected to Firestore project {} database {}",
            store.project_id, store.database_id
        );
        Ok(store)
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn database_id(&self) -> &str {
        &self.database_id
    }

    /// URL under `projects/{p}/databases/{d}/`, with each segment escaped.
    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| ConfigError::InvalidValue {
            field: "base_url".to_string(),
            value: format!("{} ({e})", self.base_url),
        })?;
        url.path_segments_mut()
            .map_err(|_| ConfigError::InvalidValue {
                field: "base_url".to_string(),
                value: self.base_url.clone(),
            })?
            .pop_if_empty()
            .extend(["projects", self.project_id.as_str(), "databases", self.database_id.as_str()])
            .extend(segments);
        Ok(url)
    }

    async fn request(&self, method: Method, url: Url) -> Result<RequestBuilder> {
        let token = self.tokens.token().await?;
        Ok(self.http.request(method, url).bearer_auth(token))
    }

    /// Send and turn non-success statuses into structured API errors.
    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(StoreError::Api(ApiErrorInfo::from_response(status.as_u16(), &body)).into())
    }
}

fn document_id(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

#[async_trait]
impl DocumentReader for FirestoreStore {
    async fn list_collections(&self) -> Result<Vec<String>> {
        let url = self.url(&["documents:listCollectionIds"])?;
        let mut collections = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut body = json!({ "pageSize": COLLECTION_PAGE_SIZE });
            if let Some(token) = &page_token {
                body["pageToken"] = json!(token);
            }
            let request = self.request(Method::POST, url.clone()).await?.json(&body);
            let page: ListCollectionIdsResponse = self.send(request).await?.json().await?;
            collections.extend(page.collection_ids);

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        debug!("Listed {} collections", collections.len());
        Ok(collections)
    }

    async fn query(&self, collection: &str, limit: usize) -> Result<Vec<Document>> {
        let url = self.url(&["documents:runQuery"])?;
        let limit = i32::try_from(limit).unwrap_or(i32::MAX);
        let body = json!({
            "structuredQuery": {
                "from": [{ "collectionId": collection }],
                "limit": limit,
            }
        });

        let request = self.request(Method::POST, url).await?.json(&body);
        let items: Vec<RunQueryItem> = self.send(request).await?.json().await?;

        let docs = items
            .into_iter()
            .filter_map(|item| item.document)
            .map(|doc| {
                let fields = wire::decode_fields(&doc.fields)?;
                Ok(Document::new(document_id(&doc.name), fields))
            })
            .collect::<Result<Vec<_>>>()?;

        debug!("Query on {} returned {} documents", collection, docs.len());
        Ok(docs)
    }

    async fn exists(&self, collection: &str, id: &str) -> Result<bool> {
        let url = self.url(&["documents", collection, id])?;
        let response = self.request(Method::GET, url).await?.send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(false),
            status if status.is_success() => Ok(true),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(StoreError::Api(ApiErrorInfo::from_response(status.as_u16(), &body)).into())
            }
        }
    }
}

#[async_trait]
impl DocumentWriter for FirestoreStore {
    async fn set(&self, collection: &str, id: &str, fields: &Fields) -> Result<()> {
        let url = self.url(&["documents", collection, id])?;
        let body = json!({ "fields": wire::encode_fields(fields) });
        let request = self.request(Method::PATCH, url).await?.json(&body);
        self.send(request).await?;
        debug!("Wrote document {}/{}", collection, id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_store(database_id: &str) -> FirestoreStore {
        let account = ServiceAccount {
            project_id: "staging".into(),
            client_email: "svc@staging.iam.gserviceaccount.com".into(),
            private_key: String::new(),
            token_uri: "https://oauth2.googleapis.com/token".into(),
        };
        let http = reqwest::Client::new();
        FirestoreStore {
            tokens: TokenSource::new(account, http.clone()),
            http,
            project_id: "staging".into(),
            database_id: database_id.into(),
            base_url: DEFAULT_BASE_URL.into(),
        }
    }

    #[test]
    fn test_url_for_default_database() {
        let store = offline_store(DEFAULT_DATABASE_ID);
        let url = store.url(&["documents:runQuery"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://firestore.googleapis.com/v1/projects/staging/databases/(default)/documents:runQuery"
        );
    }

    #[test]
    fn test_url_escapes_document_ids() {
        let store = offline_store("analytics");
        let url = store.url(&["documents", "users", "a b#c"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://firestore.googleapis.com/v1/projects/staging/databases/analytics/documents/users/a%20b%23c"
        );
    }

    #[test]
    fn test_document_id_from_name() {
        assert_eq!(
            document_id("projects/p/databases/(default)/documents/users/alice"),
            "alice"
        );
    }

    #[test]
    fn test_run_query_response_skips_entries_without_documents() {
        let raw = r#"[
            {"readTime": "2024-01-01T00:00:00Z"},
            {"document": {"name": "projects/p/databases/(default)/documents/c/x",
                          "fields": {"n": {"integerValue": "1"}}},
             "readTime": "2024-01-01T00:00:00Z"}
        ]"#;
        let items: Vec<RunQueryItem> = serde_json::from_str(raw).unwrap();
        let docs: Vec<WireDocument> = items.into_iter().filter_map(|i| i.document).collect();
        assert_eq!(docs.len(), 1);
        assert_eq!(document_id(&docs[0].name), "x");
        assert!(wire::decode_fields(&docs[0].fields).is_ok());
    }
}
