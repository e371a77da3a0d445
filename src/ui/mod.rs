/// User interface module
///
/// - `remote_image.rs` - lazily fetched, fixed-frame thumbnails
/// - `list.rs` - the "Courses" screen: rows, viewport, fetch scheduling

pub mod list;
pub mod remote_image;
