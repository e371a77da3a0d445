/// The "Courses" screen
///
/// Pairs each course with its RemoteImage, tracks which rows are on
/// screen, and decides which thumbnails are due for their one fetch.

use std::ops::Range;

use iced::font::Weight;
use iced::task;
use iced::widget::{column, container, row, scrollable, text, Column};
use iced::{Alignment, Element, Font, Length};
use tracing::debug;

use super::remote_image::{Frame, ImageId, ImagePayload, RemoteImage};
use crate::net::FetchError;
use crate::state::catalog::CourseList;
use crate::state::data::Course;
use crate::Message;

/// Vertical padding above and below each thumbnail
pub const ROW_PADDING: f32 = 8.0;

/// Padding around the whole screen
pub const SCREEN_PADDING: f32 = 20.0;
pub const TITLE_SIZE: f32 = 34.0;
/// Relative line height of the title (iced's text default)
pub const TITLE_LINE_HEIGHT: f32 = 1.3;
/// Gap between the title and the list
pub const TITLE_SPACING: f32 = 12.0;

/// Window height taken up by everything above and below the list
pub const CHROME_HEIGHT: f32 =
    2.0 * SCREEN_PADDING + TITLE_SIZE * TITLE_LINE_HEIGHT + TITLE_SPACING;

const BOLD: Font = Font {
    weight: Weight::Bold,
    ..Font::DEFAULT
};

/// Visible part of the list, in layout units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub offset_y: f32,
    pub height: f32,
}

/// One mounted row
#[derive(Debug)]
struct Row {
    course: Course,
    image: RemoteImage,
}

#[derive(Debug)]
pub struct CoursesScreen {
    model: CourseList,
    rows: Vec<Row>,
    frame: Frame,
    viewport: Viewport,
    next_id: u64,
}

impl CoursesScreen {
    /// `window_height` sizes the list viewport until the first scroll
    /// event reports the real one.
    pub fn new(model: CourseList, frame: Frame, window_height: f32) -> Self {
        CoursesScreen {
            model,
            rows: Vec::new(),
            frame,
            viewport: Viewport {
                offset_y: 0.0,
                height: list_height(window_height),
            },
            next_id: 0,
        }
    }

    pub fn model(&self) -> &CourseList {
        &self.model
    }

    pub fn row_height(&self) -> f32 {
        self.frame.height + 2.0 * ROW_PADDING
    }

    /// Apply a finished course fetch and remount rows on success
    pub fn apply_courses(&mut self, result: Result<Vec<Course>, FetchError>) -> bool {
        if !self.model.apply(result) {
            return false;
        }
        self.remount();
        true
    }

    /// Rebuild rows for the current collection.
    ///
    /// A row whose course equals an unclaimed previous row keeps that
    /// row's image. Every other previous row is dropped here, which also
    /// aborts its in-flight fetch.
    fn remount(&mut self) {
        let mut previous: Vec<Option<Row>> =
            std::mem::take(&mut self.rows).into_iter().map(Some).collect();
        let courses = self.model.courses().to_vec();

        let mut rows = Vec::with_capacity(courses.len());
        for course in courses {
            let reused = previous
                .iter_mut()
                .find(|slot| slot.as_ref().is_some_and(|r| r.course == course))
                .and_then(Option::take);

            let row = match reused {
                Some(row) => row,
                None => {
                    let id = ImageId(self.next_id);
                    self.next_id += 1;
                    let image = RemoteImage::new(id, course.image.clone());
                    Row { course, image }
                }
            };
            rows.push(row);
        }

        let unmounted = previous.iter().filter(|slot| slot.is_some()).count();
        if unmounted > 0 {
            debug!("Unmounted {} rows", unmounted);
        }
        self.rows = rows;
    }

    pub fn set_viewport(&mut self, offset_y: f32, height: f32) {
        self.viewport = Viewport { offset_y, height };
    }

    /// The list gets whatever the title and padding leave over
    pub fn set_window_height(&mut self, window_height: f32) {
        self.viewport.height = list_height(window_height);
    }

    pub fn visible(&self) -> Range<usize> {
        visible_rows(self.viewport, self.row_height(), self.rows.len())
    }

    /// Rows that just became visible and have never fetched.
    ///
    /// Each returned image has moved to Loading; the caller must start
    /// exactly one fetch per entry.
    pub fn pending_fetches(&mut self) -> Vec<(ImageId, String)> {
        let range = self.visible();
        self.rows[range]
            .iter_mut()
            .filter_map(|row| {
                row.image
                    .begin_fetch()
                    .then(|| (row.image.id(), row.image.url().to_string()))
            })
            .collect()
    }

    /// Hand a running fetch's abort handle to the row that owns it
    pub fn bind_task(&mut self, id: ImageId, handle: task::Handle) {
        if let Some(row) = self.rows.iter_mut().find(|r| r.image.id() == id) {
            row.image.bind_task(handle);
        }
    }

    /// Deliver a finished image fetch.
    ///
    /// Returns `false` when the row has been unmounted in the meantime,
    /// in which case the result is discarded.
    pub fn image_loaded(&mut self, id: ImageId, result: Result<ImagePayload, FetchError>) -> bool {
        match self.rows.iter_mut().find(|r| r.image.id() == id) {
            Some(row) => {
                row.image.resolve(result);
                true
            }
            None => {
                debug!("Dropping image result for unmounted row #{}", id.0);
                false
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let title = text("Courses")
            .size(TITLE_SIZE)
            .line_height(TITLE_LINE_HEIGHT)
            .font(BOLD);

        let rows = Column::with_children(self.rows.iter().map(|r| self.row_view(r)));
        let list = scrollable(rows)
            .on_scroll(Message::Scrolled)
            .width(Length::Fill)
            .height(Length::Fill);

        column![title, list]
            .spacing(TITLE_SPACING)
            .padding(SCREEN_PADDING)
            .into()
    }

    fn row_view<'a>(&'a self, r: &'a Row) -> Element<'a, Message> {
        let content = row![r.image.view(self.frame), text(&r.course.name).font(BOLD)]
            .spacing(12)
            .align_y(Alignment::Center);

        container(content)
            .padding([ROW_PADDING, 0.0])
            .width(Length::Fill)
            .height(Length::Fixed(self.row_height()))
            .into()
    }
}

/// Height of the scrollable list inside a window of `window_height`
pub fn list_height(window_height: f32) -> f32 {
    (window_height - CHROME_HEIGHT).max(0.0)
}

/// Indices of fixed-height rows that intersect the viewport
pub fn visible_rows(viewport: Viewport, row_height: f32, count: usize) -> Range<usize> {
    if count == 0 || row_height <= 0.0 || viewport.height <= 0.0 {
        return 0..0;
    }

    let top = viewport.offset_y.max(0.0);
    let first = (top / row_height).floor() as usize;
    let last = ((top + viewport.height) / row_height).ceil() as usize;

    first.min(count)..last.min(count)
}
