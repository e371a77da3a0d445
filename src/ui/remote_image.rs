/// Lazily loaded thumbnail for a single row
///
/// A RemoteImage starts empty, fetches its URL at most once, and shows
/// a fixed-size placeholder until (and unless) the bytes decode into a
/// real image. There is no retry: a failed fetch stays a placeholder.
///
/// State machine: Empty → Loading → Loaded | Failed

use iced::task;
use iced::widget::image::Handle;
use iced::widget::{container, Image, Space};
use iced::{Background, Color, ContentFit, Element, Length};
use image::imageops::FilterType;
use tokio::task as blocking;
use tracing::{debug, warn};

use crate::net::{FetchError, Fetcher};

/// Neutral background shared by the placeholder and loaded thumbnails
const FRAME_BACKGROUND: Color = Color {
    r: 0.55,
    g: 0.55,
    b: 0.55,
    a: 1.0,
};

/// Decoded thumbnails are rendered at this multiple of the frame size
const PIXEL_DENSITY: f32 = 2.0;

/// Identifies one mounted RemoteImage across async completions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageId(pub u64);

/// Fixed layout size of a thumbnail
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub width: f32,
    pub height: f32,
}

impl Frame {
    pub fn new(width: f32, height: f32) -> Self {
        Frame { width, height }
    }

    /// Pixel dimensions a decoded thumbnail is cropped to
    pub fn pixel_size(&self) -> (u32, u32) {
        let w = (self.width * PIXEL_DENSITY).round().max(1.0) as u32;
        let h = (self.height * PIXEL_DENSITY).round().max(1.0) as u32;
        (w, h)
    }
}

/// RGBA pixels ready to hand to iced
#[derive(Debug, Clone)]
pub struct Thumbnail {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// What a finished image fetch produced
#[derive(Debug, Clone)]
pub struct ImagePayload {
    /// Raw response body, whatever the status code was
    pub bytes: Vec<u8>,
    /// Present only if the bytes decoded as an image
    pub thumbnail: Option<Thumbnail>,
}

/// How a RemoteImage should be drawn right now
#[derive(Debug, Clone, Copy)]
pub enum Presentation<'a> {
    Placeholder,
    Image(&'a Handle),
}

#[derive(Debug, Clone)]
enum ImageState {
    Empty,
    Loading,
    /// `None` when the body did not decode as an image
    Loaded(Option<Handle>),
    Failed,
}

pub struct RemoteImage {
    id: ImageId,
    url: String,
    state: ImageState,
    /// Aborts the in-flight fetch when this image is dropped
    task: Option<task::Handle>,
}

impl RemoteImage {
    pub fn new(id: ImageId, url: impl Into<String>) -> Self {
        RemoteImage {
            id,
            url: url.into(),
            state: ImageState::Empty,
            task: None,
        }
    }

    pub fn id(&self) -> ImageId {
        self.id
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Move Empty → Loading.
    ///
    /// Returns `true` only the first time; the caller starts exactly one
    /// fetch per `true`. Redraws never call back into this.
    pub fn begin_fetch(&mut self) -> bool {
        if matches!(self.state, ImageState::Empty) {
            self.state = ImageState::Loading;
            true
        } else {
            false
        }
    }

    /// Tie the running fetch to this image's lifetime
    pub fn bind_task(&mut self, handle: task::Handle) {
        self.task = Some(handle.abort_on_drop());
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ImageState::Loading)
    }

    /// Apply a completed fetch. Ignored unless a fetch is outstanding.
    pub fn resolve(&mut self, result: Result<ImagePayload, FetchError>) {
        if !self.is_loading() {
            debug!("Ignoring late image result for {}", self.url);
            return;
        }
        self.task = None;

        self.state = match result {
            Ok(payload) => {
                let handle = payload
                    .thumbnail
                    .map(|t| Handle::from_rgba(t.width, t.height, t.pixels));
                if handle.is_none() {
                    debug!("🖼️  {} returned {} bytes that are not an image", self.url, payload.bytes.len());
                }
                ImageState::Loaded(handle)
            }
            Err(e) => {
                debug!("🖼️  Image fetch for {} failed: {}", self.url, e);
                ImageState::Failed
            }
        };
    }

    pub fn presentation(&self) -> Presentation<'_> {
        match &self.state {
            ImageState::Loaded(Some(handle)) => Presentation::Image(handle),
            _ => Presentation::Placeholder,
        }
    }

    /// Render into a fixed frame over the neutral background.
    /// Loaded images fill the frame and are cropped.
    pub fn view<'a, Message: 'a>(&'a self, frame: Frame) -> Element<'a, Message> {
        let width = Length::Fixed(frame.width);
        let height = Length::Fixed(frame.height);

        let content: Element<'a, Message> = match self.presentation() {
            Presentation::Image(handle) => Image::<Handle>::new(handle.clone())
                .width(width)
                .height(height)
                .content_fit(ContentFit::Cover)
                .into(),
            Presentation::Placeholder => Space::new(width, height).into(),
        };

        container(content)
            .width(width)
            .height(height)
            .style(|_theme| container::Style {
                background: Some(Background::Color(FRAME_BACKGROUND)),
                ..container::Style::default()
            })
            .into()
    }
}

impl std::fmt::Debug for RemoteImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteImage")
            .field("id", &self.id)
            .field("url", &self.url)
            .field("state", &self.state)
            .field("in_flight", &self.task.is_some())
            .finish()
    }
}

/// Fetch `url` and decode it into a thumbnail for `frame`.
///
/// Any response counts as loaded; only transport failures are errors.
/// Decoding runs on the blocking pool so the UI thread never sees it.
pub async fn load(fetcher: Fetcher, url: String, frame: Frame) -> Result<ImagePayload, FetchError> {
    let bytes = fetcher.fetch_bytes(&url).await?;

    let decoded = blocking::spawn_blocking(move || {
        let thumbnail = decode_thumbnail(&bytes, frame);
        ImagePayload { bytes, thumbnail }
    })
    .await;

    // A panicked decode still counts as a response, just not an image
    Ok(decoded.unwrap_or_else(|e| {
        warn!("⚠️  Thumbnail decode task failed for {}: {}", url, e);
        ImagePayload {
            bytes: Vec::new(),
            thumbnail: None,
        }
    }))
}

/// Decode image bytes and crop-to-fill them into the frame's pixel size
pub fn decode_thumbnail(bytes: &[u8], frame: Frame) -> Option<Thumbnail> {
    let img = image::load_from_memory(bytes).ok()?;

    let (width, height) = frame.pixel_size();
    let filled = img.resize_to_fill(width, height, FilterType::Lanczos3).to_rgba8();

    Some(Thumbnail {
        width: filled.width(),
        height: filled.height(),
        pixels: filled.into_raw(),
    })
}
