//! Client for the publication metadata service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{StatusCode, Url, header::ACCEPT};
use tracing::debug;

use publink_core::publication::{
    Publication, PublicationError, PublicationSource, parse_publication,
};
use publink_shared::types::PublicationId;

/// Fetches publications over HTTP as `GET {base_url}/{id}`.
#[derive(Debug, Clone)]
pub struct PublicationApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl PublicationApiClient {
    /// Create a client for `base_url` with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns `Unavailable` if the base URL is invalid or the HTTP client
    /// cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, PublicationError> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| PublicationError::unavailable(format!("invalid base url: {e}")))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PublicationError::unavailable(e.to_string()))?;

        Ok(Self { http, base_url })
    }

    /// URL of one publication.
    fn publication_url(&self, id: &PublicationId) -> Result<Url, PublicationError> {
        self.base_url
            .join(id.as_str())
            .map_err(|e| PublicationError::unavailable(e.to_string()))
    }
}

/// Classifies a non-success status from the metadata service.
pub(crate) fn classify_status(
    status: StatusCode,
    id: &PublicationId,
) -> Result<(), PublicationError> {
    if status.is_success() {
        Ok(())
    } else if status == StatusCode::NOT_FOUND {
        Err(PublicationError::NotFound(id.clone()))
    } else {
        Err(PublicationError::unavailable(format!(
            "publication service responded {status}"
        )))
    }
}

fn transport_error(err: &reqwest::Error) -> PublicationError {
    if err.is_timeout() {
        PublicationError::Timeout
    } else {
        PublicationError::unavailable(err.to_string())
    }
}

#[async_trait]
impl PublicationSource for PublicationApiClient {
    async fn get_publication(
        &self,
        id: &PublicationId,
        auth_token: Option<&str>,
    ) -> Result<Publication, PublicationError> {
        let url = self.publication_url(id)?;
        debug!(url = %url, authenticated = auth_token.is_some(), "Fetching publication");

        let mut request = self.http.get(url).header(ACCEPT, "application/json");
        if let Some(token) = auth_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| transport_error(&e))?;
        classify_status(response.status(), id)?;

        let body = response.bytes().await.map_err(|e| transport_error(&e))?;
        parse_publication(&body)
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        extract::Path,
        http::{HeaderMap, StatusCode as AxumStatus},
        response::IntoResponse,
        routing::get,
    };
    use rstest::rstest;
    use tokio::net::TcpListener;

    use super::*;

    const DOCUMENT: &str = r#"{
        "identifier": "p1",
        "status": "PUBLISHED",
        "resourceOwner": { "owner": "owner@example.org" },
        "associatedArtifacts": []
    }"#;

    async fn publication(Path(id): Path<String>, headers: HeaderMap) -> impl IntoResponse {
        match id.as_str() {
            "p1" => (AxumStatus::OK, DOCUMENT.to_string()),
            "private" => match headers.get("authorization").and_then(|v| v.to_str().ok()) {
                Some("Bearer secret-token") => (AxumStatus::OK, DOCUMENT.to_string()),
                _ => (AxumStatus::NOT_FOUND, String::new()),
            },
            "broken" => (AxumStatus::OK, "{ not json".to_string()),
            "failing" => (AxumStatus::INTERNAL_SERVER_ERROR, String::new()),
            "slow" => {
                tokio::time::sleep(Duration::from_secs(2)).await;
                (AxumStatus::OK, DOCUMENT.to_string())
            }
            _ => (AxumStatus::NOT_FOUND, String::new()),
        }
    }

    /// Serves a fake metadata service on an ephemeral port.
    async fn spawn_upstream() -> String {
        let app = Router::new().route("/publication/{id}", get(publication));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/publication")
    }

    fn id(raw: &str) -> PublicationId {
        PublicationId::parse(raw).unwrap()
    }

    #[rstest]
    #[case(StatusCode::OK, None)]
    #[case(StatusCode::NOT_FOUND, Some("not_found"))]
    #[case(StatusCode::UNAUTHORIZED, Some("unavailable"))]
    #[case(StatusCode::BAD_GATEWAY, Some("unavailable"))]
    fn test_classify_status(#[case] status: StatusCode, #[case] expected: Option<&str>) {
        let result = classify_status(status, &id("p1"));
        let kind = result.err().map(|e| match e {
            PublicationError::NotFound(_) => "not_found",
            PublicationError::Unavailable(_) => "unavailable",
            PublicationError::Malformed(_) => "malformed",
            PublicationError::Timeout => "timeout",
        });
        assert_eq!(kind, expected);
    }

    #[test]
    fn test_publication_url_keeps_base_path() {
        let client =
            PublicationApiClient::new("https://api.example.org/publication", Duration::from_secs(1))
                .unwrap();
        assert_eq!(
            client.publication_url(&id("p1")).unwrap().as_str(),
            "https://api.example.org/publication/p1"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(PublicationApiClient::new("not a url", Duration::from_secs(1)).is_err());
    }

    #[tokio::test]
    async fn test_fetches_and_parses_publication() {
        let client = PublicationApiClient::new(&spawn_upstream().await, Duration::from_secs(1))
            .unwrap();

        let publication = client.get_publication(&id("p1"), None).await.unwrap();

        assert_eq!(publication.identifier, id("p1"));
        assert!(publication.status.is_published());
    }

    #[tokio::test]
    async fn test_forwards_bearer_token() {
        let client = PublicationApiClient::new(&spawn_upstream().await, Duration::from_secs(1))
            .unwrap();

        assert!(matches!(
            client.get_publication(&id("private"), None).await,
            Err(PublicationError::NotFound(_))
        ));
        assert!(
            client
                .get_publication(&id("private"), Some("secret-token"))
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_upstream_failures_are_distinguishable() {
        let client = PublicationApiClient::new(&spawn_upstream().await, Duration::from_millis(300))
            .unwrap();

        assert!(matches!(
            client.get_publication(&id("missing"), None).await,
            Err(PublicationError::NotFound(_))
        ));
        assert!(matches!(
            client.get_publication(&id("broken"), None).await,
            Err(PublicationError::Malformed(_))
        ));
        assert!(matches!(
            client.get_publication(&id("failing"), None).await,
            Err(PublicationError::Unavailable(_))
        ));
        assert!(matches!(
            client.get_publication(&id("slow"), None).await,
            Err(PublicationError::Timeout)
        ));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_unavailable() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client =
            PublicationApiClient::new(&format!("http://{addr}/publication"), Duration::from_secs(1))
                .unwrap();

        assert!(matches!(
            client.get_publication(&id("p1"), None).await,
            Err(PublicationError::Unavailable(_))
        ));
    }
}
