//! Blocking Solr client

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::client::{IndexQueryError, IndexQueryResult, QueryParams, SearchIndex, SearchResponse};

/// Solr core reachable over HTTP
pub struct SolrClient {
    client: Client,
    base_url: String,
}

#[derive(Deserialize)]
struct SelectResponse {
    response: SearchResponse,
}

impl SolrClient {
    /// Client for the core at `base_url`, e.g. `http://localhost:8983/solr/development`
    pub fn new(base_url: &str, timeout: Duration) -> IndexQueryResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| IndexQueryError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `/select` URL for a query
    pub fn select_url(&self, q: &str, params: &QueryParams) -> String {
        format!(
            "{}/select?q={}&rows={}&wt=json",
            self.base_url,
            utf8_percent_encode(q, NON_ALPHANUMERIC),
            params.rows
        )
    }
}

impl SearchIndex for SolrClient {
    fn query(&self, q: &str, params: &QueryParams) -> IndexQueryResult<SearchResponse> {
        let url = self.select_url(q, params);
        debug!(url = %url, "Solr select");

        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| IndexQueryError::Transport(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().unwrap_or_default();
            return Err(IndexQueryError::Status { status, body });
        }

        let result: SelectResponse = resp
            .json()
            .map_err(|e| IndexQueryError::Decode(e.to_string()))?;
        Ok(result.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_url() {
        let client = SolrClient::new("http://localhost:8983/solr/test/", Duration::from_secs(5)).unwrap();
        let url = client.select_url(r"id:test\:1 OR id:b", &QueryParams { rows: 25 });
        assert_eq!(
            url,
            "http://localhost:8983/solr/test/select?q=id%3Atest%5C%3A1%20OR%20id%3Ab&rows=25&wt=json"
        );
    }
}
