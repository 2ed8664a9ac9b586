use iced::keyboard::{self, key::Named, Key, Modifiers};
use iced::widget::text_input;
use iced::{Element, Subscription, Task, Theme};
use rfd::FileDialog;

mod config;
mod error;
mod state;
mod ui;

use config::{AppConfig, AssetPaths, ThemeMode};
use state::contact::ContactField;
use state::gallery::{Fetched, GalleryController};
use state::lightbox::{KeyOutcome, LightboxControl, NavKey};
use state::route::Route;
use state::sort::SortKey;
use state::store::{DocumentSource, Store};
use ui::screen::Screen;
use ui::view::FocusTarget;

/// Main application state
struct Portfolio {
    /// Page state and interactions, rendering into a retained `Screen`
    gallery: GalleryController<Screen>,
    /// Where portraits and media files live
    assets: AssetPaths,
    theme: ThemeMode,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// Go to a page; starts a fetch
    Navigate(Route),
    /// Page fetch finished (navigation generation, result)
    Loaded(u64, Fetched),
    /// User clicked "Open data file…"
    OpenDataFile,
    SortSelected(SortKey),
    ToggleLike(u32),
    OpenLightbox(u32),
    /// A lightbox button was pressed
    Lightbox(LightboxControl),
    /// Pointer moved focus (hovering a card)
    Focus(FocusTarget),
    OpenContact,
    ContactInput(ContactField, String),
    SubmitContact,
    CloseContact,
    /// A navigation key was pressed anywhere in the window
    Key(NavKey),
}

impl Portfolio {
    /// Create the application and start loading the first page
    fn new(config: AppConfig) -> (Self, Task<Message>) {
        let store = Store::new(DocumentSource::File(config.data_file.clone()));
        let mut gallery = GalleryController::new(store, Screen::default());
        gallery.set_initial_sort(config.sort);
        let mut app = Portfolio {
            gallery,
            assets: config.assets,
            theme: config.theme,
        };

        let route = Route::parse(&config.start_route);
        let task = app.navigate(route);
        (app, task)
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Navigate(route) => return self.navigate(route),
            Message::Loaded(generation, fetched) => self.gallery.apply(generation, fetched),
            Message::OpenDataFile => {
                // Show the native file picker
                let file = FileDialog::new()
                    .set_title("Select portfolio data")
                    .add_filter("JSON", &["json"])
                    .pick_file();

                if let Some(path) = file {
                    self.gallery.set_store(Store::new(DocumentSource::File(path)));
                    return self.navigate(Route::Home);
                }
            }
            Message::SortSelected(key) => self.gallery.change_sort_order(key),
            Message::ToggleLike(media_id) => {
                // Failures are logged by the controller
                let _ = self.gallery.toggle_like(media_id);
            }
            Message::OpenLightbox(media_id) => {
                let _ = self.gallery.open_lightbox(media_id);
            }
            Message::Lightbox(control) => self.gallery.activate_lightbox_control(control),
            Message::Focus(target) => self.gallery.focus_on(target),
            Message::OpenContact => {
                let _ = self.gallery.open_contact();
                return self.focus_task();
            }
            Message::ContactInput(field, value) => self.gallery.edit_contact(field, value),
            Message::SubmitContact => {
                self.gallery.submit_contact();
            }
            Message::CloseContact => self.gallery.close_contact(),
            Message::Key(key) => match self.gallery.handle_key(key) {
                KeyOutcome::Navigate(route) => return self.navigate(route),
                KeyOutcome::Handled => return self.focus_task(),
                KeyOutcome::Ignored => {}
            },
        }

        Task::none()
    }

    /// Start loading `route`. The result comes back tagged with its generation.
    fn navigate(&mut self, route: Route) -> Task<Message> {
        tracing::info!(%route, "Navigating");
        let (generation, fetch) = self.gallery.navigate(route);
        Task::perform(fetch, move |fetched| Message::Loaded(generation, fetched))
    }

    /// Give keyboard focus to the text input the controller focused, if any
    fn focus_task(&self) -> Task<Message> {
        if !self.gallery.is_contact_open() {
            return Task::none();
        }
        match self.gallery.focus() {
            Some(FocusTarget::Contact(
                field @ (ContactField::FirstName
                | ContactField::LastName
                | ContactField::Email
                | ContactField::Message),
            )) => text_input::focus(ui::widgets::contact_input_id(field)),
            _ => Task::none(),
        }
    }

    /// Window title follows the page
    fn title(&self) -> String {
        match (self.gallery.route(), self.gallery.photographer()) {
            (Route::Photographer(_), Some(photographer)) => {
                format!("{} - Portfolio", photographer.name)
            }
            _ => "Portfolio".to_string(),
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        ui::widgets::page(self.gallery.view(), &self.assets)
    }

    fn subscription(&self) -> Subscription<Message> {
        keyboard::on_key_press(map_key)
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        match self.theme {
            ThemeMode::Dark => Theme::Dark,
            ThemeMode::Light => Theme::Light,
        }
    }
}

/// Translate the keys the gallery understands; everything else is left to the widgets
fn map_key(key: Key, modifiers: Modifiers) -> Option<Message> {
    let key = match key {
        Key::Named(Named::ArrowLeft) => NavKey::Left,
        Key::Named(Named::ArrowRight) => NavKey::Right,
        Key::Named(Named::Escape) => NavKey::Escape,
        Key::Named(Named::Tab) if modifiers.shift() => NavKey::ShiftTab,
        Key::Named(Named::Tab) => NavKey::Tab,
        Key::Named(Named::Enter) => NavKey::Enter,
        _ => return None,
    };
    Some(Message::Key(key))
}

fn init_logging(default_filter: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> iced::Result {
    let (config, settings_warning) = AppConfig::from_env();
    init_logging(&config.log_filter);

    if let Some(warning) = settings_warning {
        tracing::warn!(%warning, "Ignoring settings file");
    }
    tracing::info!(
        data = %config.data_file.display(),
        route = %config.start_route,
        sort = %config.sort,
        "Portfolio starting"
    );

    iced::application(Portfolio::title, Portfolio::update, Portfolio::view)
        .theme(Portfolio::theme)
        .subscription(Portfolio::subscription)
        .centered()
        .run_with(move || Portfolio::new(config))
}
