/// Gallery grid
///
/// Thumbnails flow left to right with `iced_aw::Wrap`, each one
/// `gallery_image_minimum_width` wide.
use iced::widget::{button, column, container, image as iced_image, row, scrollable, slider, text};
use iced::{Alignment, Element, Length};
use iced_aw::Wrap;
use std::collections::HashMap;

use super::thumbnail::{self, ThumbnailView};
use crate::state::gallery::{MAX_THUMBNAIL_WIDTH, MIN_THUMBNAIL_WIDTH};
use crate::state::{Action, AppState};
use crate::Message;

pub fn view<'a>(
    state: &'a AppState,
    hovered: Option<&'a str>,
    handles: &'a HashMap<String, iced_image::Handle>,
) -> Element<'a, Message> {
    let gallery = &state.gallery;
    let can_delete = state.system.can_delete_image();
    let width = gallery.gallery_image_minimum_width;

    let header = row![
        text(format!("Gallery ({})", gallery.images.len())).size(18),
        iced::widget::Space::with_width(Length::Fill),
        button(text("Open Gallery…")).on_press(Message::OpenGallery),
    ]
    .spacing(8)
    .align_y(Alignment::Center);

    let size_slider = row![
        text("Size"),
        slider(MIN_THUMBNAIL_WIDTH..=MAX_THUMBNAIL_WIDTH, width, |w| {
            Message::Dispatch(Action::SetGalleryImageMinimumWidth(w))
        })
        .on_release(Message::SaveSettings),
        text(format!("{width}px")),
    ]
    .spacing(8)
    .align_y(Alignment::Center);

    let grid: Element<'a, Message> = if gallery.images.is_empty() {
        container(text("No images yet"))
            .width(Length::Fill)
            .padding(24)
            .center_x(Length::Fill)
            .into()
    } else {
        let thumbnails = gallery
            .images
            .iter()
            .map(|image| {
                thumbnail::view(ThumbnailView {
                    image,
                    is_selected: gallery.is_selected(&image.uuid),
                    is_hovered: hovered == Some(image.uuid.as_str()),
                    can_delete,
                    minimum_width: width,
                    handle: handles.get(image.thumbnail_url()),
                })
            })
            .collect();

        scrollable(Wrap::with_elements(thumbnails).spacing(4.0).line_spacing(4.0))
            .height(Length::Fill)
            .into()
    };

    column![header, size_slider, grid]
        .spacing(10)
        .padding(12)
        .width(Length::Fixed(320.0))
        .height(Length::Fill)
        .into()
}
