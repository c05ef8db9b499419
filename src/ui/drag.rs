/// Drag-and-drop payload for gallery images
///
/// Mirrors a platform data-transfer object: string keys to string values.
/// Thumbnails put their uuid under `IMAGE_UUID_KEY`; drop targets read it
/// back and look the image up in the gallery.
use std::collections::BTreeMap;

use crate::state::{Action, Dispatch, Select};

pub const IMAGE_UUID_KEY: &str = "imageUuid";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragPayload {
    data: BTreeMap<String, String>,
}

impl DragPayload {
    /// Payload carrying a gallery image
    pub fn for_image(uuid: &str) -> Self {
        let mut payload = Self::default();
        payload.set_data(IMAGE_UUID_KEY, uuid);
        payload
    }

    pub fn set_data(&mut self, key: &str, value: &str) {
        self.data.insert(key.to_string(), value.to_string());
    }

    pub fn get_data(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }

    pub fn image_uuid(&self) -> Option<&str> {
        self.get_data(IMAGE_UUID_KEY)
    }
}

/// Where a dragged image can be dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    ImageToImage,
    UnifiedCanvas,
}

/// Drag tracking for the gallery: a press arms it, movement while the
/// button is still down starts the drag.
#[derive(Debug, Clone, Default)]
pub struct DragState {
    armed: Option<String>,
    payload: Option<DragPayload>,
}

impl DragState {
    pub fn press(&mut self, uuid: &str) {
        self.armed = Some(uuid.to_string());
    }

    /// Cursor moved over the pressed thumbnail. Returns true when this
    /// movement started the drag.
    pub fn moved(&mut self, uuid: &str) -> bool {
        if self.payload.is_some() || self.armed.as_deref() != Some(uuid) {
            return false;
        }
        self.payload = Some(DragPayload::for_image(uuid));
        tracing::debug!("✋ Drag started for {uuid}");
        true
    }

    pub fn payload(&self) -> Option<&DragPayload> {
        self.payload.as_ref()
    }

    /// Button released: end the drag and hand back the payload, if any
    pub fn release(&mut self) -> Option<DragPayload> {
        self.armed = None;
        self.payload.take()
    }
}

/// Apply a payload dropped on a target. Payloads without a known gallery
/// image are ignored.
pub fn drop_on<C>(ctx: &mut C, payload: &DragPayload, target: DropTarget) -> bool
where
    C: Select + Dispatch,
{
    let Some(image) = payload
        .image_uuid()
        .and_then(|uuid| ctx.state().gallery.find(uuid))
        .cloned()
    else {
        return false;
    };

    match target {
        DropTarget::ImageToImage => ctx.dispatch(Action::SetInitialImage(Box::new(image))),
        DropTarget::UnifiedCanvas => {
            ctx.dispatch(Action::SetCanvasInitialImage(Box::new(image)));
            ctx.dispatch(Action::ResizeAndCenterCanvas);
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::Image;
    use crate::state::options::InitialImage;
    use crate::state::AppState;

    fn state_with(uuid: &str) -> AppState {
        let mut state = AppState::default();
        state.gallery.set_images(vec![Image {
            uuid: uuid.to_string(),
            url: format!("outputs/{uuid}.png"),
            thumbnail: None,
            mtime: 0,
            width: 64,
            height: 64,
            category: Default::default(),
            metadata: None,
        }]);
        state
    }

    #[test]
    fn test_drop_on_image_to_image() {
        let mut state = state_with("a");
        assert!(drop_on(&mut state, &DragPayload::for_image("a"), DropTarget::ImageToImage));
        assert!(matches!(
            &state.options.initial_image,
            Some(InitialImage::Gallery(image)) if image.uuid == "a"
        ));
    }

    #[test]
    fn test_drop_on_canvas() {
        let mut state = state_with("a");
        assert!(drop_on(&mut state, &DragPayload::for_image("a"), DropTarget::UnifiedCanvas));
        assert_eq!(state.canvas.initial_image.as_ref().map(|i| i.uuid.as_str()), Some("a"));
        assert!(state.canvas.do_resize_and_center);
    }

    #[test]
    fn test_drop_of_unknown_payload_is_ignored() {
        let mut state = state_with("a");
        let before = state.clone();

        assert!(!drop_on(&mut state, &DragPayload::for_image("gone"), DropTarget::UnifiedCanvas));
        assert!(!drop_on(&mut state, &DragPayload::default(), DropTarget::ImageToImage));
        assert_eq!(state, before);
    }

    #[test]
    fn test_payload_uses_image_uuid_key() {
        let payload = DragPayload::for_image("abc");
        assert_eq!(payload.get_data("imageUuid"), Some("abc"));
        assert_eq!(payload.image_uuid(), Some("abc"));
        assert_eq!(payload.get_data("other"), None);
    }

    #[test]
    fn test_move_without_press_does_not_drag() {
        let mut drag = DragState::default();
        assert!(!drag.moved("a"));
        assert!(drag.release().is_none());
    }

    #[test]
    fn test_press_move_release() {
        let mut drag = DragState::default();
        drag.press("a");
        assert!(!drag.moved("b"));
        assert!(drag.moved("a"));
        assert!(!drag.moved("a"));
        assert_eq!(drag.payload().and_then(|p| p.image_uuid()), Some("a"));

        let payload = drag.release().unwrap();
        assert_eq!(payload.image_uuid(), Some("a"));
        assert!(drag.payload().is_none());
    }

    #[test]
    fn test_click_without_move_is_not_a_drag() {
        let mut drag = DragState::default();
        drag.press("a");
        assert!(drag.release().is_none());
        // A later move must not resurrect the old press
        assert!(!drag.moved("a"));
    }
}
