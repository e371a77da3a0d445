use std::future::Future;

use tracing::{info, warn};

use super::data::Course;
use crate::net::{FetchError, Fetcher};

/// The observable course collection behind the list screen.
///
/// Holds whatever the most recent successful fetch returned, or nothing
/// if no fetch has succeeded yet. It is only ever mutated from the iced
/// `update` loop; fetches run elsewhere and report back as messages.
#[derive(Debug, Clone)]
pub struct CourseList {
    endpoint: String,
    courses: Vec<Course>,
}

impl CourseList {
    /// Create an empty collection bound to the catalog endpoint
    pub fn new(endpoint: impl Into<String>) -> Self {
        CourseList {
            endpoint: endpoint.into(),
            courses: Vec::new(),
        }
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Issue one GET against the endpoint.
    ///
    /// The returned future owns everything it needs, so it can be handed
    /// to `Task::perform`. Calling this twice gives two independent
    /// requests; nothing is de-duplicated.
    pub fn fetch(
        &self,
        fetcher: &Fetcher,
    ) -> impl Future<Output = Result<Vec<Course>, FetchError>> + Send + 'static {
        let fetcher = fetcher.clone();
        let endpoint = self.endpoint.clone();
        async move { fetcher.fetch_courses(&endpoint).await }
    }

    /// Apply a completed fetch.
    ///
    /// Success replaces the collection wholesale and returns `true`.
    /// Failure is logged and leaves the collection exactly as it was.
    /// Results land in arrival order, so the last one to arrive wins.
    pub fn apply(&mut self, result: Result<Vec<Course>, FetchError>) -> bool {
        match result {
            Ok(courses) => {
                info!("📚 Loaded {} courses from {}", courses.len(), self.endpoint);
                self.courses = courses;
                true
            }
            Err(e) => {
                warn!("⚠️  Course fetch from {} failed: {}", self.endpoint, e);
                false
            }
        }
    }
}
