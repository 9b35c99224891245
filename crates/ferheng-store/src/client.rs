use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use ferheng_types::{Entry, EntryId, EntrySchema, FieldValues, payload};
use reqwest::{Response, StatusCode, Url};
use serde_json::Value;

use crate::{EntryStore, StoreError};

/// REST client for the `/words/` collection
#[derive(Clone)]
pub struct RemoteEntryClient {
    base_url: Url,
    client: reqwest::Client,
    schema: Arc<EntrySchema>,
}

impl RemoteEntryClient {
    pub fn new(
        base_url: &str,
        schema: Arc<EntrySchema>,
        timeout: Duration,
    ) -> Result<Self, StoreError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| StoreError::Network(format!("Invalid store URL {base_url:?}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(StoreError::Network(format!(
                "Invalid store URL {:?}: not a base",
                base_url.as_str()
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            base_url,
            client,
            schema,
        })
    }

    fn collection_url(&self) -> Url {
        self.words_url("")
    }

    /// The id goes in as one path segment, percent-encoded
    fn entry_url(&self, id: &EntryId) -> Url {
        self.words_url(id.as_str())
    }

    fn words_url(&self, segment: &str) -> Url {
        let mut url = self.base_url.clone();
        // `new` rejects cannot-be-a-base URLs
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("words").push(segment);
        }
        url
    }

    fn decode(&self, body: &Value) -> Result<Entry, StoreError> {
        Entry::from_json(body, &self.schema).map_err(|e| StoreError::Decode(e.to_string()))
    }
}

#[async_trait]
impl EntryStore for RemoteEntryClient {
    async fn list(&self) -> Result<Vec<Entry>, StoreError> {
        let response = self.client.get(self.collection_url()).send().await?;
        let body: Value = check(response).await?.json().await?;

        let Value::Array(items) = body else {
            return Err(StoreError::Decode("Expected a list of words".to_string()));
        };

        let entries = items
            .iter()
            .map(|item| self.decode(item))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!("Listed {} words", entries.len());
        Ok(entries)
    }

    async fn create(&self, fields: &FieldValues) -> Result<Entry, StoreError> {
        let response = self
            .client
            .post(self.collection_url())
            .json(&payload(fields, &self.schema))
            .send()
            .await?;

        let body: Value = check(response).await?.json().await?;
        let entry = self.decode(&body)?;

        tracing::debug!("Created word {:?}", entry.id);
        Ok(entry)
    }

    async fn update(&self, id: &EntryId, fields: &FieldValues) -> Result<(), StoreError> {
        let response = self
            .client
            .put(self.entry_url(id))
            .json(&payload(fields, &self.schema))
            .send()
            .await?;

        check(response).await?;
        tracing::debug!("Updated word {}", id);
        Ok(())
    }

    async fn delete(&self, id: &EntryId) -> Result<(), StoreError> {
        let response = self.client.delete(self.entry_url(id)).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!("Word {} was already gone", id);
            return Ok(());
        }

        check(response).await?;
        tracing::debug!("Deleted word {}", id);
        Ok(())
    }
}

/// Turn a non-2xx response into `StoreError::Rejected`, keeping the store's detail
async fn check(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let detail = response
        .json::<Value>()
        .await
        .ok()
        .as_ref()
        .and_then(detail_of);

    tracing::warn!("Store rejected request: HTTP {} ({:?})", status, detail);

    Err(StoreError::Rejected {
        status: status.as_u16(),
        detail,
    })
}

fn detail_of(body: &Value) -> Option<String> {
    match body.get("detail")? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        // e.g. a list of field validation errors
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_detail_of_shapes() {
        assert_eq!(
            detail_of(&json!({"detail": "Word already exists"})).as_deref(),
            Some("Word already exists")
        );
        assert_eq!(
            detail_of(&json!({"detail": [{"loc": ["body", "word"]}]})).as_deref(),
            Some(r#"[{"loc":["body","word"]}]"#)
        );
        assert_eq!(detail_of(&json!({"detail": null})), None);
        assert_eq!(detail_of(&json!({"error": "x"})), None);
    }

    #[test]
    fn test_urls_ignore_trailing_slash() {
        let schema = Arc::new(
            EntrySchema::new(vec![ferheng_types::FieldSpec::new("word", "Word").required()])
                .unwrap(),
        );
        let client =
            RemoteEntryClient::new("http://localhost:8000/", schema, Duration::from_secs(1))
                .unwrap();

        assert_eq!(
            client.collection_url().as_str(),
            "http://localhost:8000/words/"
        );
        assert_eq!(
            client.entry_url(&EntryId::from(3)).as_str(),
            "http://localhost:8000/words/3"
        );
    }

    #[test]
    fn test_entry_url_escapes_reserved_characters() {
        let schema = Arc::new(
            EntrySchema::new(vec![ferheng_types::FieldSpec::new("word", "Word").required()])
                .unwrap(),
        );
        let client =
            RemoteEntryClient::new("http://localhost:8000/api", schema, Duration::from_secs(1))
                .unwrap();

        assert_eq!(
            client.entry_url(&EntryId::new("ab#12")).as_str(),
            "http://localhost:8000/api/words/ab%2312"
        );
        assert_eq!(
            client.entry_url(&EntryId::new("a/b?c")).as_str(),
            "http://localhost:8000/api/words/a%2Fb%3Fc"
        );
        assert_eq!(
            client.collection_url().as_str(),
            "http://localhost:8000/api/words/"
        );
    }

    #[test]
    fn test_invalid_base_url_is_refused() {
        let schema = Arc::new(
            EntrySchema::new(vec![ferheng_types::FieldSpec::new("word", "Word").required()])
                .unwrap(),
        );
        assert!(RemoteEntryClient::new("not a url", schema.clone(), Duration::from_secs(1)).is_err());
        assert!(RemoteEntryClient::new("mailto:x@y", schema, Duration::from_secs(1)).is_err());
    }

    #[test]
    fn test_rejected_message_falls_back() {
        let err = StoreError::Rejected {
            status: 500,
            detail: None,
        };
        assert_eq!(err.to_string(), "Failed: Unknown error");
        assert_eq!(err.detail(), None);
    }
}
