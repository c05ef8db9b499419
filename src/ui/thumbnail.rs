/// Gallery thumbnail
///
/// Renders one image of the gallery grid with a hover delete button and a
/// right-click context menu, and translates the resulting events into store
/// actions and notifications.
use iced::widget::{
    button, column, container, image as iced_image, lazy, mouse_area, stack, text,
};
use iced::{Alignment, ContentFit, Element, Length, Theme};
use iced_aw::ContextMenu;
use reqwest::Url;
use std::sync::Arc;

use super::delete_modal::{self, DeleteModal};
use crate::error::Error;
use crate::fetch;
use crate::notify::{Notification, Notify};
use crate::state::data::{Image, ImageType, Tab};
use crate::state::gallery::DELETE_BUTTON_MIN_WIDTH;
use crate::state::{Action, Dispatch, Select};
use crate::Message;

/// Context-menu entries, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuAction {
    OpenInViewer,
    UsePrompt,
    UseSeed,
    UseAllParameters,
    UseInitialImage,
    SendToImageToImage,
    SendToCanvas,
    Delete,
}

impl MenuAction {
    pub const ALL: [MenuAction; 8] = [
        MenuAction::OpenInViewer,
        MenuAction::UsePrompt,
        MenuAction::UseSeed,
        MenuAction::UseAllParameters,
        MenuAction::UseInitialImage,
        MenuAction::SendToImageToImage,
        MenuAction::SendToCanvas,
        MenuAction::Delete,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MenuAction::OpenInViewer => "Open In Image Viewer",
            MenuAction::UsePrompt => "Use Prompt",
            MenuAction::UseSeed => "Use Seed",
            MenuAction::UseAllParameters => "Use All Parameters",
            MenuAction::UseInitialImage => "Use Initial Image",
            MenuAction::SendToImageToImage => "Send to Image To Image",
            MenuAction::SendToCanvas => "Send to Unified Canvas",
            MenuAction::Delete => "Delete Image",
        }
    }

    /// Whether the entry can be triggered for this image.
    /// Metadata-derived entries are disabled when their field is absent.
    pub fn is_enabled(&self, image: &Image, can_delete: bool) -> bool {
        match self {
            MenuAction::UsePrompt => image.prompt().is_some(),
            MenuAction::UseSeed => image.seed().is_some(),
            MenuAction::UseAllParameters => {
                image.image_type().is_some_and(ImageType::has_full_parameters)
            }
            MenuAction::UseInitialImage => image.image_type() == Some(&ImageType::ImageToImage),
            MenuAction::Delete => can_delete,
            MenuAction::OpenInViewer
            | MenuAction::SendToImageToImage
            | MenuAction::SendToCanvas => true,
        }
    }
}

/// Events a thumbnail emits
#[derive(Debug, Clone)]
pub enum Event {
    /// Left button pressed on the thumbnail body
    Pressed,
    /// Cursor moved over the thumbnail
    Moved,
    Hovered(bool),
    Menu(MenuAction),
}

/// Work a handler could not finish synchronously
#[derive(Debug, Clone, PartialEq)]
pub enum Followup {
    None,
    /// Fetch `path` once, then call `finish_use_initial_image`
    CheckInitialImage { image: Box<Image>, path: String },
    /// Hand the image to the delete confirmation modal
    RequestDelete(Box<Image>),
}

/// Selection click: make this the active image
pub fn select<C: Dispatch>(ctx: &mut C, image: &Image) {
    ctx.dispatch(Action::SetCurrentImage(image.uuid.clone()));
}

/// Run a context-menu action against the store
pub fn handle_menu<C>(ctx: &mut C, image: &Image, action: MenuAction) -> Followup
where
    C: Select + Dispatch + Notify,
{
    let can_delete = ctx.state().system.can_delete_image();
    if !action.is_enabled(image, can_delete) {
        tracing::debug!("{:?} is disabled for {}", action, image.uuid);
        return Followup::None;
    }

    match action {
        MenuAction::OpenInViewer => {
            ctx.dispatch(Action::SetCurrentImage(image.uuid.clone()));
            ctx.dispatch(Action::SetIsLightboxOpen(true));
        }
        MenuAction::UsePrompt => {
            if let Some(prompt) = image.prompt() {
                let (positive, negative) = crate::state::prompt::split_prompt(prompt);
                ctx.dispatch(Action::SetPrompt(positive));
                ctx.dispatch(Action::SetNegativePrompt(negative));
                ctx.notify(Notification::success("Prompt Set"));
            }
        }
        MenuAction::UseSeed => {
            if let Some(seed) = image.seed() {
                ctx.dispatch(Action::SetSeed(seed));
                ctx.notify(Notification::success("Seed Set"));
            }
        }
        MenuAction::UseAllParameters => {
            if let Some(metadata) = &image.metadata {
                ctx.dispatch(Action::SetAllParameters(Box::new(metadata.clone())));
                ctx.notify(Notification::success("Parameters Set"));
            }
        }
        MenuAction::UseInitialImage => match image.init_image_path() {
            Some(path) => {
                return Followup::CheckInitialImage {
                    image: Box::new(image.clone()),
                    path: path.to_string(),
                };
            }
            None => notify_initial_image_not_set(ctx),
        },
        MenuAction::SendToImageToImage => {
            if ctx.state().options.is_lightbox_open {
                ctx.dispatch(Action::SetIsLightboxOpen(false));
            }
            ctx.dispatch(Action::SetInitialImage(Box::new(image.clone())));
            if ctx.state().options.active_tab != Tab::ImageToImage {
                ctx.dispatch(Action::SetActiveTab(Tab::ImageToImage));
            }
            ctx.notify(Notification::success("Sent To Image To Image"));
        }
        MenuAction::SendToCanvas => {
            if ctx.state().options.is_lightbox_open {
                ctx.dispatch(Action::SetIsLightboxOpen(false));
            }
            ctx.dispatch(Action::SetCanvasInitialImage(Box::new(image.clone())));
            ctx.dispatch(Action::ResizeAndCenterCanvas);
            if ctx.state().options.active_tab != Tab::UnifiedCanvas {
                ctx.dispatch(Action::SetActiveTab(Tab::UnifiedCanvas));
            }
            ctx.notify(Notification::success("Sent To Unified Canvas"));
        }
        MenuAction::Delete => return Followup::RequestDelete(Box::new(image.clone())),
    }

    Followup::None
}

/// What the app still has to do after a menu action ran
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Fetch `url` once and report back to `finish_use_initial_image`
    CheckReachable { image: Box<Image>, url: Url },
    ShowDeleteModal(DeleteModal),
}

/// Run a menu action and settle its followup against the store. Init-image
/// paths that cannot be resolved against `server_url` fail right here.
pub fn run_menu<C>(ctx: &mut C, image: &Image, action: MenuAction, server_url: &str) -> Effect
where
    C: Select + Dispatch + Notify,
{
    match handle_menu(ctx, image, action) {
        Followup::None => Effect::None,
        Followup::CheckInitialImage { image, path } => {
            match fetch::resolve_url(server_url, &path) {
                Ok(url) => Effect::CheckReachable { image, url },
                Err(e) => {
                    finish_use_initial_image(ctx, &image, Err(Arc::new(e)));
                    Effect::None
                }
            }
        }
        Followup::RequestDelete(image) => {
            delete_modal::request(ctx, *image).map_or(Effect::None, Effect::ShowDeleteModal)
        }
    }
}

/// Second half of "Use Initial Image", once the reachability check is back
pub fn finish_use_initial_image<C>(ctx: &mut C, image: &Image, result: Result<(), Arc<Error>>)
where
    C: Dispatch + Notify,
{
    match (result, &image.metadata) {
        (Ok(()), Some(metadata)) => {
            ctx.dispatch(Action::SetActiveTab(Tab::ImageToImage));
            ctx.dispatch(Action::SetAllParameters(Box::new(metadata.clone())));
            ctx.notify(Notification::success("Initial Image Set"));
        }
        (Ok(()), None) => notify_initial_image_not_set(ctx),
        (Err(e), _) => {
            tracing::warn!("⚠️  Initial image for {} unreachable: {e}", image.uuid);
            notify_initial_image_not_set(ctx);
        }
    }
}

fn notify_initial_image_not_set<C: Notify>(ctx: &mut C) {
    ctx.notify(
        Notification::error("Initial Image Not Set")
            .with_description("Could not load initial image."),
    );
}

/// The hover delete button only fits on thumbnails at least 64 wide
pub fn delete_button_visible(is_hovered: bool, minimum_width: u16) -> bool {
    is_hovered && minimum_width >= DELETE_BUTTON_MIN_WIDTH
}

/// The props that decide whether a thumbnail re-renders.
/// Everything else about the image is ignored for that purpose.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ThumbnailProps {
    pub uuid: String,
    pub is_selected: bool,
}

/// Inputs of one thumbnail's view
pub struct ThumbnailView<'a> {
    pub image: &'a Image,
    pub is_selected: bool,
    pub is_hovered: bool,
    pub can_delete: bool,
    pub minimum_width: u16,
    pub handle: Option<&'a iced_image::Handle>,
}

/// Cache key of the rendered thumbnail: the props, plus local hover state
/// and the store values the view reads
#[derive(Debug, PartialEq, Eq, Hash)]
struct Dependency {
    props: ThumbnailProps,
    is_hovered: bool,
    can_delete: bool,
    minimum_width: u16,
    has_handle: bool,
}

impl Dependency {
    fn of(thumb: &ThumbnailView<'_>) -> Self {
        Dependency {
            props: ThumbnailProps {
                uuid: thumb.image.uuid.clone(),
                is_selected: thumb.is_selected,
            },
            is_hovered: thumb.is_hovered,
            can_delete: thumb.can_delete,
            minimum_width: thumb.minimum_width,
            has_handle: thumb.handle.is_some(),
        }
    }
}

pub fn view<'a>(thumb: ThumbnailView<'a>) -> Element<'a, Message> {
    let dependency = Dependency::of(&thumb);
    let image = thumb.image.clone();
    let handle = thumb.handle.cloned();

    lazy(dependency, move |dep| render(&image, handle.clone(), dep)).into()
}

fn render(
    image: &Image,
    handle: Option<iced_image::Handle>,
    dep: &Dependency,
) -> Element<'static, Message> {
    let uuid = image.uuid.clone();
    let size = Length::Fixed(f32::from(dep.minimum_width));

    let picture: Element<'static, Message> = match handle {
        Some(handle) => iced_image(handle)
            .width(size)
            .height(size)
            .content_fit(ContentFit::Contain)
            .into(),
        None => container(text("…").size(14))
            .width(size)
            .height(size)
            .center_x(size)
            .center_y(size)
            .into(),
    };

    let mut layers = stack![picture];

    if dep.props.is_selected {
        layers = layers.push(
            container(text("★").size(16))
                .width(size)
                .height(size)
                .align_x(Alignment::Center)
                .align_y(Alignment::Center),
        );
    }

    if delete_button_visible(dep.is_hovered, dep.minimum_width) {
        let delete = button(text("🗑").size(12))
            .style(button::danger)
            .padding(4)
            .on_press_maybe(
                dep.can_delete
                    .then(|| Message::Thumbnail(uuid.clone(), Event::Menu(MenuAction::Delete))),
            );
        layers = layers.push(
            container(delete)
                .width(size)
                .align_x(Alignment::End)
                .padding(2),
        );
    }

    let is_selected = dep.props.is_selected;
    let framed = container(layers).padding(2).style(move |theme: &Theme| {
        if is_selected {
            container::rounded_box(theme)
        } else {
            container::Style::default()
        }
    });

    let body = mouse_area(framed)
        .on_press(Message::Thumbnail(uuid.clone(), Event::Pressed))
        .on_move({
            let uuid = uuid.clone();
            move |_| Message::Thumbnail(uuid.clone(), Event::Moved)
        })
        .on_enter(Message::Thumbnail(uuid.clone(), Event::Hovered(true)))
        .on_exit(Message::Thumbnail(uuid.clone(), Event::Hovered(false)));

    let menu_image = image.clone();
    let can_delete = dep.can_delete;
    ContextMenu::new(body, move || context_menu(&menu_image, can_delete)).into()
}

fn context_menu(image: &Image, can_delete: bool) -> Element<'static, Message> {
    let header = match image.generated_at() {
        Some(time) => format!("Generated {}", time.format("%Y-%m-%d %H:%M")),
        None => image.uuid.clone(),
    };

    let mut menu = column![text(header).size(12)]
        .spacing(2)
        .padding(6)
        .width(Length::Fixed(220.0));

    for action in MenuAction::ALL {
        let enabled = action.is_enabled(image, can_delete);
        let style: fn(&Theme, button::Status) -> button::Style = if action == MenuAction::Delete {
            button::danger
        } else {
            button::text
        };
        menu = menu.push(
            button(text(action.label()).size(14))
                .width(Length::Fill)
                .style(style)
                .on_press_maybe(
                    enabled.then(|| Message::Thumbnail(image.uuid.clone(), Event::Menu(action))),
                ),
        );
    }

    container(menu).style(container::rounded_box).into()
}
