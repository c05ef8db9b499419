/// Delete confirmation modal
///
/// The thumbnail never removes an image itself: it hands the record here.
/// Removal is dispatched only on explicit confirmation (or right away when
/// the user has switched confirmation off), and only while deleting is
/// allowed.
use iced::widget::{button, checkbox, column, container, row, text, Space};
use iced::{Element, Length};

use crate::state::data::Image;
use crate::state::{Action, Dispatch, Select};
use crate::Message;

#[derive(Debug, Clone)]
pub enum Event {
    Confirm,
    Cancel,
}

/// An open confirmation dialog
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteModal {
    pub image: Image,
}

/// Ask to delete an image. Returns the dialog to show, if one is needed.
pub fn request<C: Select + Dispatch>(ctx: &mut C, image: Image) -> Option<DeleteModal> {
    let can_delete = ctx.state().system.can_delete_image();
    let should_confirm = ctx.state().system.should_confirm_on_delete;
    if !can_delete {
        tracing::debug!("Delete of {} refused: server busy or disconnected", image.uuid);
        return None;
    }

    if should_confirm {
        Some(DeleteModal { image })
    } else {
        remove(ctx, &image);
        None
    }
}

/// The user confirmed the dialog
pub fn confirm<C: Select + Dispatch>(ctx: &mut C, modal: DeleteModal) {
    if ctx.state().system.can_delete_image() {
        remove(ctx, &modal.image);
    } else {
        tracing::warn!("⚠️  Delete of {} cancelled: no longer allowed", modal.image.uuid);
    }
}

fn remove<C: Dispatch>(ctx: &mut C, image: &Image) {
    tracing::info!("🗑  Deleting {}", image.uuid);
    ctx.dispatch(Action::RemoveImage(image.uuid.clone()));
}

pub fn view(should_confirm_on_delete: bool) -> Element<'static, Message> {
    let content = column![
        text("Delete image").size(20),
        text("Are you sure? You can't undo this action afterwards."),
        checkbox("Don't ask me again", !should_confirm_on_delete)
            .on_toggle(|skip| Message::Dispatch(Action::SetShouldConfirmOnDelete(!skip))),
        row![
            Space::with_width(Length::Fill),
            button(text("Cancel"))
                .style(button::secondary)
                .on_press(Message::DeleteModal(Event::Cancel)),
            button(text("Delete"))
                .style(button::danger)
                .on_press(Message::DeleteModal(Event::Confirm)),
        ]
        .spacing(8),
    ]
    .spacing(12);

    container(content)
        .width(Length::Fixed(380.0))
        .padding(20)
        .style(container::rounded_box)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;

    fn image(uuid: &str) -> Image {
        Image {
            uuid: uuid.to_string(),
            url: format!("outputs/{uuid}.png"),
            thumbnail: None,
            mtime: 0,
            width: 512,
            height: 512,
            category: Default::default(),
            metadata: None,
        }
    }

    fn state_with(uuids: &[&str]) -> AppState {
        let mut state = AppState::default();
        state.gallery.set_images(uuids.iter().map(|u| image(u)).collect());
        state
    }

    #[test]
    fn test_request_opens_modal_without_deleting() {
        let mut state = state_with(&["a", "b"]);
        let modal = request(&mut state, image("a"));

        assert_eq!(modal, Some(DeleteModal { image: image("a") }));
        assert_eq!(state.gallery.images.len(), 2);
    }

    #[test]
    fn test_confirm_removes_image() {
        let mut state = state_with(&["a", "b"]);
        let modal = request(&mut state, image("a")).unwrap();

        confirm(&mut state, modal);

        assert!(state.gallery.find("a").is_none());
        assert!(state.gallery.is_selected("b"));
    }

    #[test]
    fn test_no_confirmation_deletes_immediately() {
        let mut state = state_with(&["a", "b"]);
        state.system.should_confirm_on_delete = false;

        assert!(request(&mut state, image("b")).is_none());
        assert!(state.gallery.find("b").is_none());
    }

    #[test]
    fn test_busy_server_blocks_delete() {
        let mut state = state_with(&["a"]);
        state.system.is_processing = true;
        assert!(request(&mut state, image("a")).is_none());
        assert_eq!(state.gallery.images.len(), 1);

        // Permission lost while the dialog was open
        state.system.is_processing = false;
        let modal = request(&mut state, image("a")).unwrap();
        state.system.is_connected = false;
        confirm(&mut state, modal);
        assert_eq!(state.gallery.images.len(), 1);
    }
}
