// src/job_search/fetcher.rs
use reqwest::Client;
use tracing::{error, info};

use super::types::JobsResponse;
use super::{JobPosting, JobSource};
use crate::core::config_manager::SearchCriteria;
use crate::error::{DigestError, Result};

const COUNTRY: &str = "kr";
const LATEST_FIRST: &str = "job.latest_order";

/// Client for the Wanted job search endpoint.
pub struct WantedClient {
    client: Client,
    endpoint: String,
}

impl WantedClient {
    pub fn new(endpoint: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("wanted-digest/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DigestError::Fetch(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }

    /// Query parameters for one search, in the order they are sent.
    pub fn build_query(criteria: &SearchCriteria) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("country", COUNTRY.to_string()),
            ("sort", LATEST_FIRST.to_string()),
            ("limit", criteria.result_limit.to_string()),
            ("query", criteria.keyword.clone()),
        ];

        for location in &criteria.locations {
            query.push(("locations", location.clone()));
        }

        if let Some(years) = criteria.min_experience_years {
            query.push(("years", years.to_string()));
        }

        query
    }

    async fn request(&self, criteria: &SearchCriteria) -> Result<Vec<JobPosting>> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&Self::build_query(criteria))
            .send()
            .await
            .map_err(|e| DigestError::Fetch(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(DigestError::Fetch(format!(
                "HTTP {} error: {}",
                status, error_text
            )));
        }

        let body: JobsResponse = response
            .json()
            .await
            .map_err(|e| DigestError::Fetch(format!("failed to parse response: {}", e)))?;

        Ok(body.into_postings())
    }
}

impl JobSource for WantedClient {
    async fn fetch(&self, criteria: &SearchCriteria) -> Result<Vec<JobPosting>> {
        info!("Searching job postings for '{}'", criteria.keyword);

        match self.request(criteria).await {
            Ok(postings) => {
                info!(count = postings.len(), "Fetched job postings");
                Ok(postings)
            }
            Err(e) => {
                error!("Job search request failed: {}", e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn endpoint(server: &MockServer) -> String {
        format!("{}/api/v4/jobs", server.uri())
    }

    #[test]
    fn test_build_query_fixed_parameters() {
        let query = WantedClient::build_query(&SearchCriteria::new("backend"));

        assert_eq!(
            query,
            vec![
                ("country", "kr".to_string()),
                ("sort", "job.latest_order".to_string()),
                ("limit", "10".to_string()),
                ("query", "backend".to_string()),
            ]
        );
    }

    #[test]
    fn test_build_query_with_filters() {
        let criteria = SearchCriteria::new("backend")
            .with_locations(vec!["서울".to_string(), "부산".to_string()])
            .with_min_experience_years(3);

        let query = WantedClient::build_query(&criteria);
        let locations: Vec<_> = query
            .iter()
            .filter(|(k, _)| *k == "locations")
            .map(|(_, v)| v.as_str())
            .collect();

        assert_eq!(locations, vec!["서울", "부산"]);
        assert_eq!(query.last(), Some(&("years", "3".to_string())));
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v4/jobs"))
            .and(query_param("query", "backend"))
            .and(query_param("country", "kr"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [
                    {"id": 1, "position": "Backend", "company": {"name": "Acme"},
                     "address": {"short_location": "서울"}},
                    {"id": 2, "position": "Platform"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = WantedClient::new(&endpoint(&server)).unwrap();
        let postings = client.fetch(&SearchCriteria::new("backend")).await.unwrap();

        assert_eq!(postings.len(), 2);
        assert_eq!(postings[0].id.as_deref(), Some("1"));
        assert_eq!(postings[1].position.as_deref(), Some("Platform"));
    }

    #[tokio::test]
    async fn test_fetch_keeps_postings_next_to_malformed_ones() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [
                    {"id": 1, "position": "Backend", "company": {"name": "Acme"}},
                    {"id": 2, "position": "Data", "company": {"name": 12345}}
                ]
            })))
            .mount(&server)
            .await;

        let client = WantedClient::new(&endpoint(&server)).unwrap();
        let postings = client.fetch(&SearchCriteria::new("backend")).await.unwrap();

        assert_eq!(postings.len(), 2);
        assert_eq!(postings[0].company_name.as_deref(), Some("Acme"));
        assert_eq!(postings[1].company_name, None);
        assert_eq!(postings[1].position.as_deref(), Some("Data"));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_fetch_server_error_is_fetch_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(1)
            .mount(&server)
            .await;

        let client = WantedClient::new(&endpoint(&server)).unwrap();
        let result = client.fetch(&SearchCriteria::new("backend")).await;

        match result {
            Err(DigestError::Fetch(msg)) => assert!(msg.contains("500")),
            other => panic!("expected fetch error, got {:?}", other),
        }
        assert!(logs_contain("Job search request failed"));
        assert!(logs_contain("HTTP 500"));
    }

    #[tokio::test]
    async fn test_fetch_without_data_key_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let client = WantedClient::new(&endpoint(&server)).unwrap();
        let postings = client.fetch(&SearchCriteria::new("backend")).await.unwrap();

        assert!(postings.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_invalid_body_is_fetch_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&server)
            .await;

        let client = WantedClient::new(&endpoint(&server)).unwrap();
        let result = client.fetch(&SearchCriteria::new("backend")).await;

        assert!(matches!(result, Err(DigestError::Fetch(_))));
    }

    #[tokio::test]
    async fn test_fetch_unreachable_host_is_fetch_error() {
        let client = WantedClient::new("http://127.0.0.1:1/api/v4/jobs").unwrap();
        let result = client.fetch(&SearchCriteria::new("backend")).await;

        assert!(matches!(result, Err(DigestError::Fetch(_))));
    }

    #[tokio::test]
    async fn test_fetch_sends_repeated_locations_in_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": []})))
            .mount(&server)
            .await;

        let criteria = SearchCriteria::new("backend")
            .with_locations(vec!["서울".to_string(), "부산".to_string()]);
        let client = WantedClient::new(&endpoint(&server)).unwrap();
        client.fetch(&criteria).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);

        let locations: Vec<String> = requests[0]
            .url
            .query_pairs()
            .filter(|(k, _)| k == "locations")
            .map(|(_, v)| v.into_owned())
            .collect();
        assert_eq!(locations, vec!["서울", "부산"]);
    }
}
