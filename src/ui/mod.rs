/// User interface components
///
/// - Options panel and its advanced sections (options_panel.rs, advanced.rs)
/// - Gallery grid and thumbnails (gallery.rs, thumbnail.rs)
/// - Delete confirmation (delete_modal.rs)
/// - Work area, tabs and lightbox (workspace.rs)
/// - Drag payload and drop handling (drag.rs)
/// - Notifications (toast.rs)
pub mod advanced;
pub mod delete_modal;
pub mod drag;
pub mod gallery;
pub mod options_panel;
pub mod thumbnail;
pub mod toast;
pub mod workspace;

use iced::widget::{center, container, mouse_area, opaque, stack};
use iced::{Color, Element};

use crate::Message;

/// Show `content` centered above `base`, dimming it. Clicking outside the
/// content emits `on_blur`.
pub fn modal<'a>(
    base: impl Into<Element<'a, Message>>,
    content: impl Into<Element<'a, Message>>,
    on_blur: Message,
) -> Element<'a, Message> {
    stack![
        base.into(),
        opaque(
            mouse_area(center(opaque(content)).style(|_theme| {
                container::Style {
                    background: Some(
                        Color {
                            a: 0.7,
                            ..Color::BLACK
                        }
                        .into(),
                    ),
                    ..container::Style::default()
                }
            }))
            .on_press(on_blur)
        )
    ]
    .into()
}
