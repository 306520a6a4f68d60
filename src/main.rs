use iced::widget::scrollable::{AbsoluteOffset, Viewport};
use iced::widget::{button, column, image, row, scrollable, stack, text, text_input};
use iced::{Alignment, Element, Length, Task, Theme};
use std::ops::Range;

mod api;
mod config;
mod state;
mod ui;

use api::{ApiClient, ApiError, SearchPage};
use config::Config;
use state::session::{FirstPage, PageOutcome, SearchSession};
use ui::gallery::Gallery;
use ui::lightbox::Lightbox;
use ui::notify::{ToastKind, Toasts, TOAST_TTL};

/// Main application state
struct PixGrid {
    /// HTTP client for the search API
    client: ApiClient,
    /// Current contents of the search input
    query_input: String,
    /// The active search session (the incremental-load state machine)
    session: SearchSession,
    /// Result cards for the active session
    gallery: Gallery,
    /// Full-size image overlay
    lightbox: Lightbox,
    /// Visible notifications
    toasts: Toasts,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// The search input changed
    QueryChanged(String),
    /// The search form was submitted
    SearchSubmitted,
    /// First page of a session came back; carries the session id
    FirstPageLoaded(u64, Result<SearchPage, ApiError>),
    /// A scroll-triggered follow-up page came back
    NextPageLoaded(u64, Result<SearchPage, ApiError>),
    /// The gallery scrollable moved
    GalleryScrolled(Viewport),
    /// A card's thumbnail finished downloading
    ThumbnailLoaded(u64, usize, Result<image::Handle, ApiError>),
    /// A card was clicked
    LightboxOpened(usize),
    /// The full-size image for the lightbox finished downloading
    LightboxImageLoaded(u64, usize, Result<image::Handle, ApiError>),
    /// The lightbox backdrop was clicked
    LightboxClosed,
    /// A toast's display timer ran out
    ToastExpired(u64),
}

/// Id of the gallery scrollable, needed to reset its position on a new search
fn gallery_scroll_id() -> scrollable::Id {
    scrollable::Id::new("gallery")
}

impl PixGrid {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        // Without an API key the app cannot issue a single search, so
        // failing loudly at startup beats a dead search box
        let config = Config::load()
            .expect("Failed to load configuration. Set PIXABAY_API_KEY or create config.json.");
        let client = ApiClient::new(config.api_key, config.per_page)
            .expect("Failed to build the HTTP client.");

        println!("🔎 pixgrid ready ({} results per page)", client.per_page());

        (
            PixGrid {
                client,
                query_input: String::new(),
                session: SearchSession::new(),
                gallery: Gallery::new(),
                lightbox: Lightbox::default(),
                toasts: Toasts::new(),
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::QueryChanged(value) => {
                self.query_input = value;
                Task::none()
            }

            Message::SearchSubmitted => self.start_search(),

            Message::FirstPageLoaded(id, result) => {
                // A result from a replaced session must not touch anything
                if !self.session.is_current(id) {
                    return Task::none();
                }

                match result {
                    Ok(page) => self.apply_first_page(page),
                    Err(error) => {
                        self.session.fail_load();
                        self.report_fetch_error(error)
                    }
                }
            }

            Message::NextPageLoaded(id, result) => {
                if !self.session.is_current(id) {
                    return Task::none();
                }

                match result {
                    Ok(page) => self.apply_next_page(page),
                    Err(error) => {
                        self.session.fail_load();
                        self.report_fetch_error(error)
                    }
                }
            }

            Message::GalleryScrolled(viewport) => {
                let viewport_bottom = viewport.absolute_offset().y + viewport.bounds().height;
                let content_height = viewport.content_bounds().height;

                match self.session.request_next_page(viewport_bottom, content_height) {
                    Some(page) => self.fetch_page(page),
                    None => Task::none(),
                }
            }

            Message::ThumbnailLoaded(id, index, result) => {
                if self.session.is_current(id) {
                    match result {
                        Ok(handle) => self.gallery.set_thumbnail(index, handle),
                        // A missing thumbnail is cosmetic; log and move on
                        Err(error) => eprintln!("⚠️  Thumbnail download failed: {error}"),
                    }
                }
                Task::none()
            }

            Message::LightboxOpened(index) => self.open_lightbox(index),

            Message::LightboxImageLoaded(id, index, result) => {
                if !self.session.is_current(id) || !self.lightbox.is_waiting_for(index) {
                    return Task::none();
                }

                match result {
                    Ok(full) => {
                        self.lightbox = Lightbox::Open { index, full };
                        Task::none()
                    }
                    Err(error) => {
                        eprintln!("⚠️  Full-size download failed: {error}");
                        self.lightbox.close();
                        self.push_toast(
                            ToastKind::Failure,
                            "Could not load the full-size image.".to_string(),
                        )
                    }
                }
            }

            Message::LightboxClosed => {
                self.lightbox.close();
                Task::none()
            }

            Message::ToastExpired(id) => {
                self.toasts.dismiss(id);
                Task::none()
            }
        }
    }

    /// Submit handler: reset everything, then fetch page 1
    fn start_search(&mut self) -> Task<Message> {
        let id = match self.session.start(&self.query_input) {
            Ok(id) => id,
            Err(_) => {
                return self
                    .push_toast(ToastKind::Failure, "Please enter a search query.".to_string());
            }
        };

        // Reset must happen before the fetch is issued so a stale load
        // from the previous session can never append into a fresh gallery
        self.gallery.reset();
        self.lightbox.close();

        println!("🔍 Searching for \"{}\"", self.session.query());

        let client = self.client.clone();
        let query = self.session.query().to_string();

        Task::batch([
            scrollable::scroll_to(gallery_scroll_id(), AbsoluteOffset { x: 0.0, y: 0.0 }),
            Task::perform(
                async move { client.fetch_page(query, 1).await },
                move |result| Message::FirstPageLoaded(id, result),
            ),
        ])
    }

    /// Record the first page of the session
    fn apply_first_page(&mut self, page: SearchPage) -> Task<Message> {
        let items = page.hits.len();

        match self.session.apply_first_page(page.total_hits, items) {
            FirstPage::NoResults => self.push_toast(
                ToastKind::Failure,
                "Sorry, there are no images matching your search query. Please try again."
                    .to_string(),
            ),
            FirstPage::Loaded { armed } => {
                println!(
                    "✅ Found {} images for \"{}\" (loader {})",
                    page.total_hits,
                    self.session.query(),
                    if armed { "armed" } else { "not needed" },
                );

                let toast = self.push_toast(
                    ToastKind::Success,
                    format!("Hooray! We found {} images.", page.total_hits),
                );
                let appended = self.gallery.append(page.hits);

                Task::batch([toast, self.fetch_thumbnails(appended)])
            }
        }
    }

    /// Append a scroll-triggered page and settle the session counters
    fn apply_next_page(&mut self, page: SearchPage) -> Task<Message> {
        let items = page.hits.len();
        let appended = self.gallery.append(page.hits);

        if self.session.apply_next_page(items) == PageOutcome::Exhausted {
            println!(
                "🏁 Search exhausted: {} of {} images shown",
                self.session.shown_count(),
                self.session.total_available(),
            );
        }

        self.fetch_thumbnails(appended)
    }

    /// Kick off a fetch for the given page of the current session
    fn fetch_page(&self, page: u32) -> Task<Message> {
        let id = self.session.id();
        let client = self.client.clone();
        let query = self.session.query().to_string();

        println!("⏳ Loading page {page} for \"{query}\"");

        Task::perform(
            async move { client.fetch_page(query, page).await },
            move |result| Message::NextPageLoaded(id, result),
        )
    }

    /// Download thumbnails for freshly appended cards
    fn fetch_thumbnails(&self, range: Range<usize>) -> Task<Message> {
        let id = self.session.id();

        let tasks: Vec<Task<Message>> = range
            .filter_map(|index| {
                let url = self.gallery.card(index)?.record.thumbnail_url.clone();
                let client = self.client.clone();
                Some(Task::perform(
                    async move { client.fetch_image(url).await.map(image::Handle::from_bytes) },
                    move |result| Message::ThumbnailLoaded(id, index, result),
                ))
            })
            .collect();

        Task::batch(tasks)
    }

    /// Open the lightbox for a card and fetch its full-size image
    fn open_lightbox(&mut self, index: usize) -> Task<Message> {
        let Some(card) = self.gallery.card(index) else {
            return Task::none();
        };

        let id = self.session.id();
        let client = self.client.clone();
        let url = card.record.full_url.clone();

        self.lightbox = Lightbox::Loading { index };

        Task::perform(
            async move { client.fetch_image(url).await.map(image::Handle::from_bytes) },
            move |result| Message::LightboxImageLoaded(id, index, result),
        )
    }

    /// Show a toast and schedule its dismissal
    fn push_toast(&mut self, kind: ToastKind, message: String) -> Task<Message> {
        let id = self.toasts.push(kind, message);
        Task::perform(tokio::time::sleep(TOAST_TTL), move |_| {
            Message::ToastExpired(id)
        })
    }

    /// Surface a failed page fetch to the user
    fn report_fetch_error(&mut self, error: ApiError) -> Task<Message> {
        eprintln!("⚠️  Search request failed: {error}");
        self.push_toast(
            ToastKind::Failure,
            "Something went wrong while fetching images. Please try again.".to_string(),
        )
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let header = row![
            text_input("Search images...", &self.query_input)
                .on_input(Message::QueryChanged)
                .on_submit(Message::SearchSubmitted)
                .padding(10)
                .size(16),
            button("Search")
                .on_press(Message::SearchSubmitted)
                .padding(10),
        ]
        .spacing(10)
        .padding(16)
        .align_y(Alignment::Center);

        let mut results = column![]
            .spacing(16)
            .padding(16)
            .width(Length::Fill)
            .align_x(Alignment::Center);

        if self.gallery.is_empty() {
            if !self.session.is_loading() {
                results = results.push(
                    text("Type a query and hit Enter to search the gallery.")
                        .size(16)
                        .style(text::secondary),
                );
            }
        } else {
            results = results.push(self.gallery.view());
        }

        if self.session.is_loading() {
            results = results.push(text("Loading images...").size(15));
        }

        if self.session.is_exhausted() && !self.gallery.is_empty() {
            results = results.push(
                text("We're sorry, but you've reached the end of search results.")
                    .size(15)
                    .style(text::secondary),
            );
        }

        let body = scrollable(results)
            .id(gallery_scroll_id())
            .on_scroll(Message::GalleryScrolled)
            .width(Length::Fill)
            .height(Length::Fill);

        let base: Element<Message> = column![header, body].into();

        let mut layers = vec![base];

        if !self.toasts.is_empty() {
            layers.push(self.toasts.view());
        }

        if self.lightbox.is_open() {
            let caption = self
                .lightbox
                .index()
                .and_then(|index| self.gallery.card(index))
                .map(|card| card.record.tags.as_str())
                .unwrap_or_default();
            layers.push(self.lightbox.view(caption));
        }

        stack(layers)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    iced::application("pixgrid", PixGrid::update, PixGrid::view)
        .theme(PixGrid::theme)
        .centered()
        .run_with(PixGrid::new)
}
