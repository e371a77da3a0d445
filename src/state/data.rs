/// Shared data structures for the application state
/// 
/// These structs represent the data model that flows between
/// the network layer and the UI layer.

use serde::Deserialize;

/// A single catalog entry as served by the courses endpoint
///
/// Courses have no identity of their own: two courses with the same
/// name and image URL are the same course. Rows are keyed on this.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Course {
    /// Display name (e.g., "Swift Basics")
    pub name: String,
    /// Thumbnail URL, fetched lazily per row
    pub image: String,
}

#[cfg(test)]
impl Course {
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        Course {
            name: name.into(),
            image: image.into(),
        }
    }
}
