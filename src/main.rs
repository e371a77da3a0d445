use iced::widget::scrollable;
use iced::{window, Element, Size, Subscription, Task, Theme};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod net;
mod state;
mod ui;

use config::AppConfig;
use net::{FetchError, Fetcher};
use state::catalog::CourseList;
use state::data::Course;
use ui::list::CoursesScreen;
use ui::remote_image::{self, Frame, ImageId, ImagePayload};

/// Main application state
struct CourseListApp {
    /// The course list and its rows
    screen: CoursesScreen,
    /// Shared HTTP client for the list and every thumbnail
    fetcher: Fetcher,
    /// Fixed thumbnail frame
    frame: Frame,
}

/// Application messages (events)
///
/// Every async completion comes back through here, so all state the
/// view reads is only mutated inside `update`.
#[derive(Debug, Clone)]
pub enum Message {
    /// The catalog request finished
    CoursesFetched(Result<Vec<Course>, FetchError>),
    /// The list was scrolled
    Scrolled(scrollable::Viewport),
    /// The window changed size
    WindowResized(Size),
    /// A thumbnail request finished
    ThumbnailFetched(ImageId, Result<ImagePayload, FetchError>),
}

impl CourseListApp {
    /// Create the application and kick off the one catalog fetch
    fn new(config: AppConfig) -> (Self, Task<Message>) {
        // If this fails, we panic because the app cannot fetch anything without it
        let fetcher = Fetcher::new(config.request_timeout())
            .expect("Failed to initialize HTTP client. Check TLS support.");
        let frame = config.thumbnail_frame();
        let model = CourseList::new(config.endpoint.clone());
        let screen = CoursesScreen::new(model, frame, config.window_height);

        info!("🎓 Course list starting, endpoint {}", screen.model().endpoint());

        let fetch = Task::perform(screen.model().fetch(&fetcher), Message::CoursesFetched);

        (
            CourseListApp {
                screen,
                fetcher,
                frame,
            },
            fetch,
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::CoursesFetched(result) => {
                if self.screen.apply_courses(result) {
                    return self.start_visible_fetches();
                }
                Task::none()
            }
            Message::Scrolled(viewport) => {
                self.screen
                    .set_viewport(viewport.absolute_offset().y, viewport.bounds().height);
                self.start_visible_fetches()
            }
            Message::WindowResized(size) => {
                self.screen.set_window_height(size.height);
                self.start_visible_fetches()
            }
            Message::ThumbnailFetched(id, result) => {
                self.screen.image_loaded(id, result);
                Task::none()
            }
        }
    }

    /// Start one fetch per newly visible thumbnail.
    /// Each fetch is abortable and owned by its row.
    fn start_visible_fetches(&mut self) -> Task<Message> {
        let mut tasks = Vec::new();

        for (id, url) in self.screen.pending_fetches() {
            let (task, handle) = Task::perform(
                remote_image::load(self.fetcher.clone(), url, self.frame),
                move |result| Message::ThumbnailFetched(id, result),
            )
            .abortable();

            self.screen.bind_task(id, handle);
            tasks.push(task);
        }

        Task::batch(tasks)
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        self.screen.view()
    }

    fn subscription(&self) -> Subscription<Message> {
        window::resize_events().map(|(_id, size)| Message::WindowResized(size))
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("course_list=info")),
        )
        .init();

    let config = AppConfig::load();
    let window_size = Size::new(config.window_width, config.window_height);

    iced::application("Courses", CourseListApp::update, CourseListApp::view)
        .subscription(CourseListApp::subscription)
        .theme(CourseListApp::theme)
        .window_size(window_size)
        .centered()
        .run_with(move || CourseListApp::new(config))
}
