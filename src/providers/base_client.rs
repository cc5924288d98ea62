use crate::core::error::ChatError;
use reqwest::{Client, Response};
use serde::Serialize;
use std::time::Duration;

/// Thin JSON-over-HTTP client shared by the providers.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    query_params: Vec<(String, String)>,
}

impl HttpClient {
    pub fn new(
        base_url: String,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ChatError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            query_params: Vec::new(),
        })
    }

    pub fn add_query_param(&mut self, key: &str, value: String) {
        self.query_params.push((key.to_string(), value));
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// POSTs `payload` as JSON. Non-2xx statuses are turned into
    /// [`ChatError::Api`] carrying the response body.
    pub async fn post<T: Serialize + ?Sized>(
        &self,
        path: &str,
        payload: &T,
    ) -> Result<Response, ChatError> {
        let url = self.url(path);
        tracing::debug!("POST {}", url);

        let mut request = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .query(&self.query_params);

        if let Some(api_key) = &self.api_key {
            request = request.header("Authorization", format!("Bearer {}", api_key));
        }

        let response = request.json(payload).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::Api(format!("{}: {}", status, body.trim())));
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_without_double_slashes() {
        let client = HttpClient::new(
            "https://example.com/v1/".to_string(),
            None,
            Duration::from_secs(5),
        )
        .unwrap();

        assert_eq!(
            client.url("/chat/completions"),
            "https://example.com/v1/chat/completions"
        );
        assert_eq!(client.url("models"), "https://example.com/v1/models");
    }

    #[test]
    fn query_params_accumulate_in_order() {
        let mut client =
            HttpClient::new("http://localhost".to_string(), None, Duration::from_secs(5)).unwrap();
        client.add_query_param("key", "abc".to_string());
        client.add_query_param("alt", "json".to_string());

        assert_eq!(
            client.query_params,
            vec![
                ("key".to_string(), "abc".to_string()),
                ("alt".to_string(), "json".to_string())
            ]
        );
        assert!(client.api_key.is_none());
    }
}
