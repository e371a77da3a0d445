//! Thin HTTP layer over reqwest.
//!
//! Plain GETs: no headers, no auth, no query parameters.

use std::time::Duration;

use reqwest::Url;
use tracing::debug;

use super::error::FetchError;
use crate::state::data::Course;

/// Shared HTTP client. Cloning is cheap (the connection pool is shared).
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    /// Build a fetcher. `None` keeps the transport's default timeout.
    ///
    /// Fails only if the TLS backend cannot be initialized.
    pub fn new(timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build()?;
        Ok(Fetcher { client })
    }

    /// GET `url` and return the raw body.
    ///
    /// The status code is not inspected: a 404 page is still "a response".
    /// Only transport failures are errors here.
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let response = self.client.get(parsed).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        debug!("🌐 GET {} -> {} ({} bytes)", url, status, body.len());

        Ok(body.to_vec())
    }

    /// GET the catalog endpoint and decode it as a list of courses.
    pub async fn fetch_courses(&self, url: &str) -> Result<Vec<Course>, FetchError> {
        let body = self.fetch_bytes(url).await?;
        if body.is_empty() {
            return Err(FetchError::EmptyBody);
        }

        let courses: Vec<Course> = serde_json::from_slice(&body)?;
        Ok(courses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_with_and_without_timeout() {
        assert!(Fetcher::new(None).is_ok());
        assert!(Fetcher::new(Some(Duration::from_millis(250))).is_ok());
    }

    #[tokio::test]
    async fn fetch_courses_preserves_order() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/courses")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[{"name":"B","image":"https://x/b.png"},{"name":"A","image":"https://x/a.png"}]"#,
            )
            .create_async()
            .await;

        let fetcher = Fetcher::new(None).unwrap();
        let courses = fetcher
            .fetch_courses(&format!("{}/courses", server.url()))
            .await
            .unwrap();

        assert_eq!(
            courses,
            vec![
                Course::new("B", "https://x/b.png"),
                Course::new("A", "https://x/a.png"),
            ]
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn server_error_with_empty_body_is_empty_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/courses")
            .with_status(500)
            .create_async()
            .await;

        let result = Fetcher::new(None)
            .unwrap()
            .fetch_courses(&format!("{}/courses", server.url()))
            .await;

        assert_eq!(result, Err(FetchError::EmptyBody));
    }

    #[tokio::test]
    async fn wrong_shape_is_decode_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/courses")
            .with_status(200)
            .with_body(r#"{"courses":[]}"#)
            .create_async()
            .await;

        let result = Fetcher::new(None)
            .unwrap()
            .fetch_courses(&format!("{}/courses", server.url()))
            .await;

        assert!(matches!(result, Err(FetchError::Decode(_))));
    }

    #[tokio::test]
    async fn fetch_bytes_ignores_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/missing.png")
            .with_status(404)
            .with_body("not found")
            .create_async()
            .await;

        let body = Fetcher::new(None)
            .unwrap()
            .fetch_bytes(&format!("{}/missing.png", server.url()))
            .await
            .unwrap();

        assert_eq!(body, b"not found");
    }

    #[tokio::test]
    async fn unparsable_url_fails_fast() {
        let result = Fetcher::new(None).unwrap().fetch_bytes("not a url").await;
        assert!(matches!(result, Err(FetchError::InvalidUrl { .. })));
    }

    #[tokio::test]
    async fn refused_connection_is_transport_error() {
        let result = Fetcher::new(Some(Duration::from_secs(5)))
            .unwrap()
            .fetch_bytes("http://127.0.0.1:1/courses")
            .await;
        assert!(matches!(result, Err(FetchError::Transport(_))));
    }
}
