/// System slice: connection and processing status
#[derive(Debug, Clone, PartialEq)]
pub struct SystemState {
    pub is_connected: bool,
    pub is_processing: bool,
    /// Ask before deleting an image
    pub should_confirm_on_delete: bool,
}

impl Default for SystemState {
    fn default() -> Self {
        Self {
            is_connected: true,
            is_processing: false,
            should_confirm_on_delete: true,
        }
    }
}

impl SystemState {
    /// Images may only be deleted while connected and idle
    pub fn can_delete_image(&self) -> bool {
        self.is_connected && !self.is_processing
    }
}
