/// Gallery slice: the image collection and the active image
use super::data::Image;

/// Thumbnails narrower than this never show the hover delete button
pub const DELETE_BUTTON_MIN_WIDTH: u16 = 64;

pub const MIN_THUMBNAIL_WIDTH: u16 = 32;
pub const MAX_THUMBNAIL_WIDTH: u16 = 256;

#[derive(Debug, Clone, PartialEq)]
pub struct GalleryState {
    /// Newest first
    pub images: Vec<Image>,
    pub current_image_uuid: Option<String>,
    pub gallery_image_minimum_width: u16,
}

impl Default for GalleryState {
    fn default() -> Self {
        Self {
            images: Vec::new(),
            current_image_uuid: None,
            gallery_image_minimum_width: 64,
        }
    }
}

impl GalleryState {
    pub fn current_image(&self) -> Option<&Image> {
        let uuid = self.current_image_uuid.as_deref()?;
        self.find(uuid)
    }

    pub fn find(&self, uuid: &str) -> Option<&Image> {
        self.images.iter().find(|image| image.uuid == uuid)
    }

    pub fn is_selected(&self, uuid: &str) -> bool {
        self.current_image_uuid.as_deref() == Some(uuid)
    }

    pub fn set_current_image(&mut self, uuid: &str) {
        if self.find(uuid).is_some() {
            self.current_image_uuid = Some(uuid.to_string());
        }
    }

    /// Replace the whole collection. The selection survives if the image is
    /// still present, otherwise it moves to the newest image.
    pub fn set_images(&mut self, images: Vec<Image>) {
        self.images = images;
        let keep = self
            .current_image_uuid
            .as_deref()
            .is_some_and(|uuid| self.find(uuid).is_some());
        if !keep {
            self.current_image_uuid = self.images.first().map(|image| image.uuid.clone());
        }
    }

    /// Remove an image. If it was the active one, the selection moves to the
    /// image that took its place, else the previous one, else nothing.
    pub fn remove_image(&mut self, uuid: &str) {
        let Some(index) = self.images.iter().position(|image| image.uuid == uuid) else {
            return;
        };
        self.images.remove(index);

        if self.is_selected(uuid) {
            let neighbour = self
                .images
                .get(index)
                .or_else(|| index.checked_sub(1).and_then(|i| self.images.get(i)));
            self.current_image_uuid = neighbour.map(|image| image.uuid.clone());
        }
    }

    pub fn set_minimum_width(&mut self, width: u16) {
        self.gallery_image_minimum_width = width.clamp(MIN_THUMBNAIL_WIDTH, MAX_THUMBNAIL_WIDTH);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    fn gallery(uuids: &[&str]) -> GalleryState {
        let mut gallery = GalleryState::default();
        gallery.set_images(uuids.iter().map(|u| image(u)).collect());
        gallery
    }

    #[test]
    fn test_set_images_selects_newest() {
        let gallery = gallery(&["c", "b", "a"]);
        assert_eq!(gallery.current_image().map(|i| i.uuid.as_str()), Some("c"));
    }

    #[test]
    fn test_set_images_keeps_existing_selection() {
        let mut gallery = gallery(&["c", "b", "a"]);
        gallery.set_current_image("b");
        gallery.set_images(vec![image("d"), image("b")]);
        assert!(gallery.is_selected("b"));
    }

    #[test]
    fn test_unknown_uuid_is_not_selected() {
        let mut gallery = gallery(&["a"]);
        gallery.set_current_image("nope");
        assert!(gallery.is_selected("a"));
    }

    #[test]
    fn test_remove_selects_neighbour() {
        let mut gallery = gallery(&["c", "b", "a"]);
        gallery.set_current_image("b");

        gallery.remove_image("b");
        assert!(gallery.is_selected("a"));

        gallery.remove_image("a");
        assert!(gallery.is_selected("c"));

        gallery.remove_image("c");
        assert!(gallery.current_image_uuid.is_none());
        assert!(gallery.images.is_empty());
    }

    #[test]
    fn test_remove_other_keeps_selection() {
        let mut gallery = gallery(&["c", "b", "a"]);
        gallery.remove_image("a");
        assert!(gallery.is_selected("c"));
        assert_eq!(gallery.images.len(), 2);

        // Removing twice is harmless
        gallery.remove_image("a");
        assert_eq!(gallery.images.len(), 2);
    }

    #[test]
    fn test_minimum_width_is_clamped() {
        let mut gallery = GalleryState::default();
        gallery.set_minimum_width(8);
        assert_eq!(gallery.gallery_image_minimum_width, MIN_THUMBNAIL_WIDTH);
        gallery.set_minimum_width(1000);
        assert_eq!(gallery.gallery_image_minimum_width, MAX_THUMBNAIL_WIDTH);
    }
}
