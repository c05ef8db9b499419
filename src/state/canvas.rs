/// Unified canvas slice
///
/// Only the parts the gallery touches: the image the canvas starts from and
/// the pending resize/recenter request the canvas view consumes.
use super::data::Image;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanvasState {
    pub initial_image: Option<Image>,
    /// Set when a new image arrives; cleared once the canvas has re-laid out
    pub do_resize_and_center: bool,
}

impl CanvasState {
    pub fn set_initial_image(&mut self, image: Image) {
        self.initial_image = Some(image);
    }

    pub fn request_resize_and_center(&mut self) {
        self.do_resize_and_center = true;
    }

    pub fn finish_resize_and_center(&mut self) {
        self.do_resize_and_center = false;
    }
}
