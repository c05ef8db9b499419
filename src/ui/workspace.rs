/// Center pane: tab bar, the active tab's work area and the lightbox
use iced::widget::{button, column, container, image as iced_image, mouse_area, row, text, Row};
use iced::{ContentFit, Element, Length, Theme};
use std::collections::HashMap;

use super::drag::DropTarget;
use crate::state::data::Tab;
use crate::state::{Action, AppState};
use crate::Message;

type Handles = HashMap<String, iced_image::Handle>;

pub fn view<'a>(
    state: &'a AppState,
    handles: &'a Handles,
    is_dragging: bool,
) -> Element<'a, Message> {
    let tabs = Tab::ALL.iter().fold(Row::new().spacing(4), |tabs, &tab| {
        type Style = fn(&Theme, button::Status) -> button::Style;
        let style: Style = if tab == state.options.active_tab {
            button::primary
        } else {
            button::secondary
        };
        tabs.push(
            button(text(tab.to_string()))
                .style(style)
                .on_press(Message::Dispatch(Action::SetActiveTab(tab))),
        )
    });

    let area = match state.options.active_tab {
        Tab::TextToImage => current_image(state, handles),
        Tab::ImageToImage => image_to_image(state, handles, is_dragging),
        Tab::UnifiedCanvas => unified_canvas(state, handles, is_dragging),
    };

    column![tabs, area]
        .spacing(12)
        .padding(12)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// Image (or placeholder) filling the available space
fn picture<'a>(handles: &'a Handles, location: &str, empty: &'a str) -> Element<'a, Message> {
    match handles.get(location) {
        Some(handle) => iced_image(handle.clone())
            .width(Length::Fill)
            .height(Length::Fill)
            .content_fit(ContentFit::Contain)
            .into(),
        None => container(text(empty))
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into(),
    }
}

fn current_image<'a>(state: &'a AppState, handles: &'a Handles) -> Element<'a, Message> {
    match state.gallery.current_image() {
        Some(image) => column![
            picture(handles, &image.url, "Loading…"),
            row![
                text(format!("{} × {}", image.width, image.height)).width(Length::Fill),
                button(text("Open Viewer"))
                    .on_press(Message::Dispatch(Action::SetIsLightboxOpen(true))),
            ]
            .spacing(8),
        ]
        .spacing(8)
        .into(),
        None => container(text("No image selected"))
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into(),
    }
}

fn drop_zone<'a>(
    content: Element<'a, Message>,
    target: DropTarget,
    is_dragging: bool,
) -> Element<'a, Message> {
    let framed = container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(8)
        .style(move |theme: &Theme| {
            if is_dragging {
                container::bordered_box(theme)
            } else {
                container::Style::default()
            }
        });

    mouse_area(framed)
        .on_release(Message::Drop(target))
        .into()
}

fn image_to_image<'a>(
    state: &'a AppState,
    handles: &'a Handles,
    is_dragging: bool,
) -> Element<'a, Message> {
    let content: Element<'a, Message> = match &state.options.initial_image {
        Some(initial) => {
            let location = initial.url();
            column![
                picture(handles, location, location),
                row![
                    text("Initial image").width(Length::Fill),
                    button(text("Clear"))
                        .style(button::secondary)
                        .on_press(Message::Dispatch(Action::ClearInitialImage)),
                ],
            ]
            .spacing(8)
            .into()
        }
        None => container(text("Drop an image here or send one from the gallery"))
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into(),
    };

    drop_zone(content, DropTarget::ImageToImage, is_dragging)
}

fn unified_canvas<'a>(
    state: &'a AppState,
    handles: &'a Handles,
    is_dragging: bool,
) -> Element<'a, Message> {
    let canvas = &state.canvas;
    let content: Element<'a, Message> = match &canvas.initial_image {
        Some(image) => {
            let status = if canvas.do_resize_and_center {
                "Fitting image to canvas…"
            } else {
                "Canvas ready"
            };
            column![picture(handles, &image.url, "Loading…"), text(status).size(12)]
                .spacing(8)
                .into()
        }
        None => container(text("Drop an image here to start the canvas"))
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into(),
    };

    drop_zone(content, DropTarget::UnifiedCanvas, is_dragging)
}

/// Large view of the current image
pub fn lightbox<'a>(state: &'a AppState, handles: &'a Handles) -> Element<'a, Message> {
    let close = Message::Dispatch(Action::SetIsLightboxOpen(false));
    let body = match state.gallery.current_image() {
        Some(image) => picture(handles, &image.url, "Loading…"),
        None => text("No image selected").into(),
    };

    container(
        column![
            row![
                iced::widget::Space::with_width(Length::Fill),
                button(text("Close")).on_press(close),
            ],
            body,
        ]
        .spacing(8),
    )
    .padding(24)
    .width(Length::Fill)
    .height(Length::Fill)
    .style(container::rounded_box)
    .into()
}
