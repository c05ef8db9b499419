use iced::widget::{image as iced_image, row, stack};
use iced::{event, mouse, Element, Event, Subscription, Task, Theme};
use rfd::FileDialog;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod fetch;
mod notify;
mod state;
mod ui;

use config::Settings;
use error::Error;
use fetch::ImageSource;
use notify::{Notification, Notify, Toasts};
use state::data::Image;
use state::{Action, AppState, Dispatch, Select};
use ui::delete_modal::{self, DeleteModal};
use ui::drag::{DragState, DropTarget};
use ui::thumbnail::{self, Effect};

/// The store handed to UI handlers: state plus the toast queue
struct Store {
    state: AppState,
    toasts: Toasts,
}

impl Select for Store {
    fn state(&self) -> &AppState {
        &self.state
    }
}

impl Dispatch for Store {
    fn dispatch(&mut self, action: Action) {
        self.state.dispatch(action);
    }
}

impl Notify for Store {
    fn notify(&mut self, notification: Notification) {
        tracing::info!("🔔 {}", notification.title);
        self.toasts.push(notification, Instant::now());
    }
}

/// Main application state
struct DreamStudio {
    store: Store,
    settings: Settings,
    client: reqwest::Client,
    /// Thumbnail under the cursor
    hovered: Option<String>,
    drag: DragState,
    delete_modal: Option<DeleteModal>,
    /// Decoded images keyed by location
    handles: HashMap<String, iced_image::Handle>,
    /// Locations already loaded or in flight
    requested: HashSet<String>,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// A control asked for a store update
    Dispatch(Action),
    Thumbnail(String, thumbnail::Event),
    /// Reachability check for "Use Initial Image" finished
    InitialImageChecked(Box<Image>, Result<(), Arc<Error>>),
    DeleteModal(delete_modal::Event),
    Drop(DropTarget),
    /// Left button released anywhere nothing else handled it
    MouseReleased,
    /// User clicked the "Open Gallery…" button
    OpenGallery,
    GalleryLoaded(Result<Vec<Image>, Arc<Error>>),
    ImageLoaded(String, Result<Vec<u8>, Arc<Error>>),
    Invoke,
    Cancel,
    SaveSettings,
    DismissToast(u64),
    Tick(Instant),
    /// Input that maps to nothing (e.g. a non-numeric seed)
    None,
}

impl Message {
    /// Could handling this message put a new image location on screen?
    fn may_change_images(&self) -> bool {
        match self {
            Message::Dispatch(action) => action.changes_images(),
            Message::Thumbnail(_, event) => {
                matches!(event, thumbnail::Event::Pressed | thumbnail::Event::Menu(_))
            }
            Message::DeleteModal(_) | Message::Drop(_) | Message::GalleryLoaded(Ok(_)) => true,
            _ => false,
        }
    }
}

impl DreamStudio {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let settings = Settings::load_or_default();

        let mut state = AppState::default();
        state.options.show_advanced_options = settings.show_advanced_options;
        state.system.should_confirm_on_delete = settings.should_confirm_on_delete;
        state.gallery.set_minimum_width(settings.gallery_image_minimum_width);

        tracing::info!("🎨 Dream Studio initialized, server at {}", settings.server_url);

        let task = match settings.gallery_path() {
            Some(path) if path.exists() => {
                Task::perform(load_gallery(path), Message::GalleryLoaded)
            }
            _ => Task::none(),
        };

        (
            DreamStudio {
                store: Store {
                    state,
                    toasts: Toasts::default(),
                },
                settings,
                client: reqwest::Client::new(),
                hovered: None,
                drag: DragState::default(),
                delete_modal: None,
                handles: HashMap::new(),
                requested: HashSet::new(),
            },
            task,
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        let may_change_images = message.may_change_images();
        let task = self.handle(message);
        if may_change_images {
            Task::batch([task, self.load_missing_images()])
        } else {
            task
        }
    }

    fn handle(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Dispatch(action) => {
                self.remember_setting(&action);
                self.store.dispatch(action);
                Task::none()
            }
            Message::Thumbnail(uuid, event) => self.on_thumbnail(uuid, event),
            Message::InitialImageChecked(image, result) => {
                thumbnail::finish_use_initial_image(&mut self.store, &image, result);
                Task::none()
            }
            Message::DeleteModal(event) => {
                if let Some(modal) = self.delete_modal.take() {
                    if let delete_modal::Event::Confirm = event {
                        delete_modal::confirm(&mut self.store, modal);
                    }
                }
                Task::none()
            }
            Message::Drop(target) => {
                if let Some(payload) = self.drag.release() {
                    ui::drag::drop_on(&mut self.store, &payload, target);
                }
                Task::none()
            }
            Message::MouseReleased => {
                self.drag.release();
                Task::none()
            }
            Message::OpenGallery => {
                // Show the native file picker dialog
                let file = FileDialog::new()
                    .set_title("Select Gallery File")
                    .add_filter("Gallery", &["json"])
                    .pick_file();

                match file {
                    Some(path) => {
                        self.settings.gallery_file = Some(path.clone());
                        self.save_settings();
                        Task::perform(load_gallery(path), Message::GalleryLoaded)
                    }
                    None => Task::none(),
                }
            }
            Message::GalleryLoaded(Ok(images)) => {
                self.store.dispatch(Action::SetImages(images));
                Task::none()
            }
            Message::GalleryLoaded(Err(e)) => {
                tracing::error!("❌ Gallery not loaded: {e}");
                self.store.notify(
                    Notification::error("Gallery Not Loaded").with_description(e.to_string()),
                );
                Task::none()
            }
            Message::ImageLoaded(location, Ok(bytes)) => {
                self.handles
                    .insert(location, iced_image::Handle::from_bytes(bytes));
                Task::none()
            }
            Message::ImageLoaded(location, Err(e)) => {
                tracing::warn!("⚠️  Could not load {location}: {e}");
                Task::none()
            }
            Message::Invoke => {
                if ui::options_panel::can_invoke(&self.store.state) {
                    tracing::info!(
                        "🚀 Generation requested for \"{}\" (no generation backend attached)",
                        self.store.state.options.prompt
                    );
                    self.store.dispatch(Action::SetIsProcessing(true));
                }
                Task::none()
            }
            Message::Cancel => {
                self.store.dispatch(Action::SetIsProcessing(false));
                Task::none()
            }
            Message::SaveSettings => {
                self.settings.gallery_image_minimum_width =
                    self.store.state.gallery.gallery_image_minimum_width;
                self.save_settings();
                Task::none()
            }
            Message::DismissToast(id) => {
                self.store.toasts.dismiss(id);
                Task::none()
            }
            Message::Tick(now) => {
                self.store.toasts.prune(now);
                // The canvas view re-fits on every draw, so one frame is enough
                if self.store.state.canvas.do_resize_and_center {
                    self.store.dispatch(Action::CanvasResized);
                }
                Task::none()
            }
            Message::None => Task::none(),
        }
    }

    fn on_thumbnail(&mut self, uuid: String, event: thumbnail::Event) -> Task<Message> {
        let Some(image) = self.store.state.gallery.find(&uuid).cloned() else {
            return Task::none();
        };

        match event {
            thumbnail::Event::Pressed => {
                thumbnail::select(&mut self.store, &image);
                self.drag.press(&uuid);
            }
            thumbnail::Event::Moved => {
                self.drag.moved(&uuid);
            }
            thumbnail::Event::Hovered(true) => self.hovered = Some(uuid),
            thumbnail::Event::Hovered(false) => {
                if self.hovered.as_deref() == Some(uuid.as_str()) {
                    self.hovered = None;
                }
            }
            thumbnail::Event::Menu(action) => {
                let server_url = &self.settings.server_url;
                match thumbnail::run_menu(&mut self.store, &image, action, server_url) {
                    Effect::None => {}
                    Effect::CheckReachable { image, url } => {
                        return Task::perform(
                            fetch::check_reachable(self.client.clone(), url),
                            move |result| {
                                Message::InitialImageChecked(image.clone(), result.map_err(Arc::new))
                            },
                        );
                    }
                    Effect::ShowDeleteModal(modal) => self.delete_modal = Some(modal),
                }
            }
        }

        Task::none()
    }

    /// Persist the UI flags that live in the settings file
    fn remember_setting(&mut self, action: &Action) {
        match action {
            Action::SetShowAdvancedOptions(show) => {
                self.settings.show_advanced_options = *show;
                self.save_settings();
            }
            Action::SetShouldConfirmOnDelete(confirm) => {
                self.settings.should_confirm_on_delete = *confirm;
                self.save_settings();
            }
            _ => {}
        }
    }

    fn save_settings(&self) {
        if let Err(e) = self.settings.save_default() {
            tracing::warn!("⚠️  Could not save settings: {e}");
        }
    }

    /// Start loading every image location the views need but don't have yet
    fn load_missing_images(&mut self) -> Task<Message> {
        let state = &self.store.state;
        let mut wanted: Vec<String> = state
            .gallery
            .images
            .iter()
            .map(|image| image.thumbnail_url().to_string())
            .collect();
        wanted.extend(state.gallery.current_image().map(|image| image.url.clone()));
        wanted.extend(state.options.initial_image.as_ref().map(|i| i.url().to_string()));
        wanted.extend(state.canvas.initial_image.as_ref().map(|i| i.url.clone()));

        let mut tasks = Vec::new();
        for location in wanted {
            if !self.requested.insert(location.clone()) {
                continue;
            }
            match ImageSource::locate(&self.settings.server_url, &location) {
                Ok(ImageSource::Local(path)) => {
                    self.handles
                        .insert(location, iced_image::Handle::from_path(path));
                }
                Ok(ImageSource::Remote(url)) => {
                    tasks.push(Task::perform(
                        fetch::fetch_bytes(self.client.clone(), url),
                        move |result| Message::ImageLoaded(location.clone(), result.map_err(Arc::new)),
                    ));
                }
                Err(e) => tracing::warn!("⚠️  Skipping image {location}: {e}"),
            }
        }

        Task::batch(tasks)
    }

    fn subscription(&self) -> Subscription<Message> {
        let state = &self.store.state;
        let ticking = !self.store.toasts.is_empty() || state.canvas.do_resize_and_center;

        Subscription::batch([
            if ticking {
                iced::time::every(Duration::from_millis(250)).map(Message::Tick)
            } else {
                Subscription::none()
            },
            event::listen_with(|event, status, _window| match (event, status) {
                (
                    Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)),
                    event::Status::Ignored,
                ) => Some(Message::MouseReleased),
                _ => None,
            }),
        ])
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let state = &self.store.state;

        let mut content: Element<Message> = row![
            ui::options_panel::view(state),
            ui::workspace::view(state, &self.handles, self.drag.payload().is_some()),
            ui::gallery::view(state, self.hovered.as_deref(), &self.handles),
        ]
        .into();

        if state.options.is_lightbox_open {
            content = ui::modal(
                content,
                ui::workspace::lightbox(state, &self.handles),
                Message::Dispatch(Action::SetIsLightboxOpen(false)),
            );
        }

        if self.delete_modal.is_some() {
            content = ui::modal(
                content,
                delete_modal::view(state.system.should_confirm_on_delete),
                Message::DeleteModal(delete_modal::Event::Cancel),
            );
        }

        stack![content, ui::toast::view(&self.store.toasts)].into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("dream_studio=info")),
        )
        .init();

    iced::application("Dream Studio", DreamStudio::update, DreamStudio::view)
        .theme(DreamStudio::theme)
        .subscription(DreamStudio::subscription)
        .window_size((1440.0, 900.0))
        .centered()
        .run_with(DreamStudio::new)
}

/// Load a gallery file in the background
async fn load_gallery(path: PathBuf) -> Result<Vec<Image>, Arc<Error>> {
    fetch::load_gallery(path).await.map_err(Arc::new)
}
