/// State management module
///
/// This module holds the whole application state as one store made of
/// slices, and the actions that mutate it:
/// - Image records and metadata (data.rs)
/// - Prompt text helpers (prompt.rs)
/// - Generation options and UI flags (options.rs)
/// - Gallery collection and selection (gallery.rs)
/// - Unified canvas hand-off (canvas.rs)
/// - Connection / processing status (system.rs)
///
/// UI code never touches the slices directly: it reads through `Select`
/// and writes through `Dispatch`.
pub mod canvas;
pub mod data;
pub mod gallery;
pub mod options;
pub mod prompt;
pub mod system;

use canvas::CanvasState;
use data::{GenerationMetadata, Image, Tab};
use gallery::GalleryState;
use options::{AdvancedFeature, FacetoolType, InitialImage, OptionsState};
use system::SystemState;

/// Every state mutation the UI can request
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // ========== Options ==========
    SetPrompt(String),
    SetNegativePrompt(String),
    SetSeed(u32),
    SetShouldRandomizeSeed(bool),
    SetSteps(u32),
    SetCfgScale(f32),
    SetWidth(u32),
    SetHeight(u32),
    SetSampler(String),
    SetThreshold(f32),
    SetPerlin(f32),
    SetVariationAmount(f32),
    SetSeedWeights(String),
    SetFacetoolType(FacetoolType),
    SetFacetoolStrength(f32),
    SetCodeformerFidelity(f32),
    SetUpscalingLevel(u32),
    SetUpscalingStrength(f32),
    SetSeamless(bool),
    SetHiresFix(bool),
    SetImg2ImgStrength(f32),
    SetShouldFitToWidthHeight(bool),
    SetFeatureEnabled(AdvancedFeature, bool),
    ToggleSection(AdvancedFeature),
    SetShowAdvancedOptions(bool),
    SetAllParameters(Box<GenerationMetadata>),
    SetInitialImage(Box<Image>),
    ClearInitialImage,
    SetActiveTab(Tab),
    SetIsLightboxOpen(bool),

    // ========== Gallery ==========
    SetImages(Vec<Image>),
    SetCurrentImage(String),
    RemoveImage(String),
    SetGalleryImageMinimumWidth(u16),

    // ========== Canvas ==========
    SetCanvasInitialImage(Box<Image>),
    ResizeAndCenterCanvas,
    CanvasResized,

    // ========== System ==========
    SetIsConnected(bool),
    SetIsProcessing(bool),
    SetShouldConfirmOnDelete(bool),
}

/// Read access to the store
pub trait Select {
    fn state(&self) -> &AppState;
}

/// Write access to the store
pub trait Dispatch {
    fn dispatch(&mut self, action: Action);
}

/// The process-wide UI state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub options: OptionsState,
    pub gallery: GalleryState,
    pub canvas: CanvasState,
    pub system: SystemState,
}

impl AppState {
    /// Apply one action. Reducers are plain assignments, so repeating an
    /// identical action leaves the state unchanged.
    pub fn reduce(&mut self, action: Action) {
        let options = &mut self.options;
        match action {
            Action::SetPrompt(prompt) => options.prompt = prompt,
            Action::SetNegativePrompt(prompt) => options.negative_prompt = prompt,
            Action::SetSeed(seed) => {
                options.seed = seed;
                options.should_randomize_seed = false;
            }
            Action::SetShouldRandomizeSeed(value) => options.should_randomize_seed = value,
            Action::SetSteps(steps) => options.steps = steps,
            Action::SetCfgScale(scale) => options.cfg_scale = scale,
            Action::SetWidth(width) => options.width = width,
            Action::SetHeight(height) => options.height = height,
            Action::SetSampler(sampler) => options.sampler = sampler,
            Action::SetThreshold(value) => options.threshold = value,
            Action::SetPerlin(value) => options.perlin = value,
            Action::SetVariationAmount(value) => options.variation_amount = value,
            Action::SetSeedWeights(value) => options.seed_weights = value,
            Action::SetFacetoolType(kind) => options.facetool_type = kind,
            Action::SetFacetoolStrength(value) => options.facetool_strength = value,
            Action::SetCodeformerFidelity(value) => options.codeformer_fidelity = value,
            Action::SetUpscalingLevel(level) => options.upscaling_level = level,
            Action::SetUpscalingStrength(value) => options.upscaling_strength = value,
            Action::SetSeamless(value) => options.seamless = value,
            Action::SetHiresFix(value) => options.hires_fix = value,
            Action::SetImg2ImgStrength(value) => options.img2img_strength = value,
            Action::SetShouldFitToWidthHeight(value) => options.should_fit_to_width_height = value,
            Action::SetFeatureEnabled(feature, enabled) => {
                options.set_feature_enabled(feature, enabled)
            }
            Action::ToggleSection(feature) => options.toggle_section(feature),
            Action::SetShowAdvancedOptions(show) => options.show_advanced_options = show,
            Action::SetAllParameters(meta) => options.set_all_parameters(&meta),
            Action::SetInitialImage(image) => {
                options.initial_image = Some(InitialImage::Gallery(*image))
            }
            Action::ClearInitialImage => options.initial_image = None,
            Action::SetActiveTab(tab) => options.active_tab = tab,
            Action::SetIsLightboxOpen(open) => options.is_lightbox_open = open,

            Action::SetImages(images) => self.gallery.set_images(images),
            Action::SetCurrentImage(uuid) => self.gallery.set_current_image(&uuid),
            Action::RemoveImage(uuid) => self.gallery.remove_image(&uuid),
            Action::SetGalleryImageMinimumWidth(width) => self.gallery.set_minimum_width(width),

            Action::SetCanvasInitialImage(image) => self.canvas.set_initial_image(*image),
            Action::ResizeAndCenterCanvas => self.canvas.request_resize_and_center(),
            Action::CanvasResized => self.canvas.finish_resize_and_center(),

            Action::SetIsConnected(value) => self.system.is_connected = value,
            Action::SetIsProcessing(value) => self.system.is_processing = value,
            Action::SetShouldConfirmOnDelete(value) => self.system.should_confirm_on_delete = value,
        }
    }
}

impl Action {
    /// Does this action change which images are on screen (gallery,
    /// current image, initial images)?
    pub fn changes_images(&self) -> bool {
        matches!(
            self,
            Action::SetImages(_)
                | Action::SetCurrentImage(_)
                | Action::RemoveImage(_)
                | Action::SetInitialImage(_)
                | Action::SetAllParameters(_)
                | Action::SetCanvasInitialImage(_)
        )
    }
}

impl Select for AppState {
    fn state(&self) -> &AppState {
        self
    }
}

impl Dispatch for AppState {
    fn dispatch(&mut self, action: Action) {
        tracing::debug!(?action, "dispatch");
        self.reduce(action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_dispatch_is_idempotent() {
        let mut once = AppState::default();
        once.dispatch(Action::SetSeed(99));
        once.dispatch(Action::SetActiveTab(Tab::UnifiedCanvas));
        once.dispatch(Action::ResizeAndCenterCanvas);

        let mut twice = once.clone();
        twice.dispatch(Action::SetSeed(99));
        twice.dispatch(Action::SetActiveTab(Tab::UnifiedCanvas));
        twice.dispatch(Action::ResizeAndCenterCanvas);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_only_image_actions_change_images() {
        assert!(Action::RemoveImage("a".into()).changes_images());
        assert!(Action::SetCurrentImage("a".into()).changes_images());
        assert!(!Action::SetSeed(1).changes_images());
        assert!(!Action::SetGalleryImageMinimumWidth(80).changes_images());
        assert!(!Action::CanvasResized.changes_images());
    }

    #[test]
    fn test_set_seed_turns_randomize_off() {
        let mut state = AppState::default();
        assert!(state.options.should_randomize_seed);
        state.dispatch(Action::SetSeed(42));
        assert_eq!(state.options.seed, 42);
        assert!(!state.options.should_randomize_seed);
    }

    #[test]
    fn test_canvas_resize_roundtrip() {
        let mut state = AppState::default();
        state.dispatch(Action::ResizeAndCenterCanvas);
        assert!(state.canvas.do_resize_and_center);
        state.dispatch(Action::CanvasResized);
        assert!(!state.canvas.do_resize_and_center);
    }

    #[test]
    fn test_delete_permission_follows_system_flags() {
        let mut state = AppState::default();
        assert!(state.system.can_delete_image());

        state.dispatch(Action::SetIsProcessing(true));
        assert!(!state.system.can_delete_image());

        state.dispatch(Action::SetIsProcessing(false));
        state.dispatch(Action::SetIsConnected(false));
        assert!(!state.system.can_delete_image());
    }
}
