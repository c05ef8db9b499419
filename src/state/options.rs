/// Generation options slice
///
/// Holds every parameter the options panel edits, plus the UI flags that
/// gate it (advanced options, open accordion sections, active tab, lightbox).
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::data::{GenerationMetadata, Image, ImageType, Tab};
use super::prompt::{seed_weights_to_string, split_prompt};

/// Samplers the server understands
pub const SAMPLERS: [&str; 10] = [
    "ddim",
    "plms",
    "k_lms",
    "k_dpm_2",
    "k_dpm_2_a",
    "k_dpmpp_2",
    "k_dpmpp_2_a",
    "k_euler",
    "k_euler_a",
    "k_heun",
];

/// Identifier of an advanced-options accordion section
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AdvancedFeature {
    Seed,
    Variations,
    FaceRestore,
    Upscale,
    Other,
}

/// Face restoration model
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FacetoolType {
    #[default]
    Gfpgan,
    Codeformer,
}

impl FacetoolType {
    pub const ALL: [FacetoolType; 2] = [FacetoolType::Gfpgan, FacetoolType::Codeformer];
}

impl fmt::Display for FacetoolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FacetoolType::Gfpgan => "GFPGAN",
            FacetoolType::Codeformer => "CodeFormer",
        })
    }
}

/// Source image for image-to-image: either a gallery image or a server path
/// recovered from metadata
#[derive(Debug, Clone, PartialEq)]
pub enum InitialImage {
    Gallery(Image),
    Path(String),
}

impl InitialImage {
    pub fn url(&self) -> &str {
        match self {
            InitialImage::Gallery(image) => &image.url,
            InitialImage::Path(path) => path,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OptionsState {
    pub prompt: String,
    pub negative_prompt: String,
    pub steps: u32,
    pub cfg_scale: f32,
    pub width: u32,
    pub height: u32,
    pub sampler: String,

    // ========== Seed ==========
    pub seed: u32,
    pub should_randomize_seed: bool,
    pub threshold: f32,
    pub perlin: f32,

    // ========== Variations ==========
    pub should_generate_variations: bool,
    pub variation_amount: f32,
    /// `seed:weight,...` as typed by the user
    pub seed_weights: String,

    // ========== Face restoration ==========
    pub should_run_facetool: bool,
    pub facetool_type: FacetoolType,
    pub facetool_strength: f32,
    pub codeformer_fidelity: f32,

    // ========== Upscaling ==========
    pub should_run_esrgan: bool,
    pub upscaling_level: u32,
    pub upscaling_strength: f32,

    // ========== Other ==========
    pub seamless: bool,
    pub hires_fix: bool,

    // ========== Image to image ==========
    pub initial_image: Option<InitialImage>,
    pub img2img_strength: f32,
    pub should_fit_to_width_height: bool,

    // ========== UI ==========
    pub show_advanced_options: bool,
    pub open_sections: BTreeSet<AdvancedFeature>,
    pub active_tab: Tab,
    pub is_lightbox_open: bool,
}

impl Default for OptionsState {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            negative_prompt: String::new(),
            steps: 50,
            cfg_scale: 7.5,
            width: 512,
            height: 512,
            sampler: "k_lms".to_string(),
            seed: 0,
            should_randomize_seed: true,
            threshold: 0.0,
            perlin: 0.0,
            should_generate_variations: false,
            variation_amount: 0.1,
            seed_weights: String::new(),
            should_run_facetool: false,
            facetool_type: FacetoolType::Gfpgan,
            facetool_strength: 0.8,
            codeformer_fidelity: 0.75,
            should_run_esrgan: false,
            upscaling_level: 4,
            upscaling_strength: 0.75,
            seamless: false,
            hires_fix: false,
            initial_image: None,
            img2img_strength: 0.75,
            should_fit_to_width_height: true,
            show_advanced_options: false,
            open_sections: BTreeSet::new(),
            active_tab: Tab::TextToImage,
            is_lightbox_open: false,
        }
    }
}

impl OptionsState {
    /// Is the given switchable feature turned on?
    /// Seed and Other have no switch and report None.
    pub fn feature_enabled(&self, feature: AdvancedFeature) -> Option<bool> {
        match feature {
            AdvancedFeature::Variations => Some(self.should_generate_variations),
            AdvancedFeature::FaceRestore => Some(self.should_run_facetool),
            AdvancedFeature::Upscale => Some(self.should_run_esrgan),
            AdvancedFeature::Seed | AdvancedFeature::Other => None,
        }
    }

    pub fn set_feature_enabled(&mut self, feature: AdvancedFeature, enabled: bool) {
        match feature {
            AdvancedFeature::Variations => self.should_generate_variations = enabled,
            AdvancedFeature::FaceRestore => self.should_run_facetool = enabled,
            AdvancedFeature::Upscale => self.should_run_esrgan = enabled,
            AdvancedFeature::Seed | AdvancedFeature::Other => {}
        }
    }

    pub fn toggle_section(&mut self, feature: AdvancedFeature) {
        if !self.open_sections.remove(&feature) {
            self.open_sections.insert(feature);
        }
    }

    /// Apply a full parameter bundle from an image's metadata.
    /// Fields missing from the metadata keep their current value.
    pub fn set_all_parameters(&mut self, meta: &GenerationMetadata) {
        if meta.variations.is_empty() {
            self.should_generate_variations = false;
        } else {
            self.seed_weights = seed_weights_to_string(&meta.variations);
            self.should_generate_variations = true;
            self.variation_amount = 0.0;
        }

        if meta.kind == Some(ImageType::ImageToImage) {
            self.set_all_image_to_image_parameters(meta);
        }

        if let Some(prompt) = &meta.prompt {
            let (positive, negative) = split_prompt(prompt);
            self.prompt = positive;
            self.negative_prompt = negative;
        }

        if let Some(seed) = meta.seed {
            self.seed = seed;
            self.should_randomize_seed = false;
        }

        if let Some(threshold) = meta.threshold {
            self.threshold = threshold;
        }
        if let Some(perlin) = meta.perlin {
            self.perlin = perlin;
        }
        if let Some(seamless) = meta.seamless {
            self.seamless = seamless;
        }
        if let Some(hires_fix) = meta.hires_fix {
            self.hires_fix = hires_fix;
        }
        if let Some(steps) = meta.steps {
            self.steps = steps;
        }
        if let Some(cfg_scale) = meta.cfg_scale {
            self.cfg_scale = cfg_scale;
        }
        if let Some(sampler) = &meta.sampler {
            self.sampler = sampler.clone();
        }
        if let Some(width) = meta.width {
            self.width = width;
        }
        if let Some(height) = meta.height {
            self.height = height;
        }

        self.should_run_esrgan = false;
        self.should_run_facetool = false;
        for step in &meta.postprocessing {
            match step.kind.as_str() {
                "esrgan" => {
                    self.should_run_esrgan = true;
                    if let Some(scale) = step.scale {
                        self.upscaling_level = scale;
                    }
                    if let Some(strength) = step.strength {
                        self.upscaling_strength = strength;
                    }
                }
                "gfpgan" | "codeformer" => {
                    self.should_run_facetool = true;
                    self.facetool_type = if step.kind == "codeformer" {
                        FacetoolType::Codeformer
                    } else {
                        FacetoolType::Gfpgan
                    };
                    if let Some(strength) = step.strength {
                        self.facetool_strength = strength;
                    }
                    if let Some(fidelity) = step.fidelity {
                        self.codeformer_fidelity = fidelity;
                    }
                }
                _ => {}
            }
        }
    }

    /// Apply only the image-to-image part of a parameter bundle
    pub fn set_all_image_to_image_parameters(&mut self, meta: &GenerationMetadata) {
        if let Some(path) = &meta.init_image_path {
            self.initial_image = Some(InitialImage::Path(path.clone()));
        }
        if let Some(strength) = meta.strength {
            self.img2img_strength = strength;
        }
        if let Some(fit) = meta.fit {
            self.should_fit_to_width_height = fit;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::{PostprocessStep, Prompt, SeedWeight};

    fn txt2img() -> GenerationMetadata {
        GenerationMetadata {
            kind: Some(ImageType::TextToImage),
            prompt: Some(Prompt::Text("a red fox [cartoon]".into())),
            seed: Some(1234),
            sampler: Some("k_euler_a".into()),
            steps: Some(30),
            cfg_scale: Some(9.0),
            width: Some(768),
            height: Some(640),
            ..Default::default()
        }
    }

    #[test]
    fn test_set_all_parameters_maps_fields() {
        let mut options = OptionsState::default();
        options.set_all_parameters(&txt2img());

        assert_eq!(options.prompt, "a red fox");
        assert_eq!(options.negative_prompt, "cartoon");
        assert_eq!(options.seed, 1234);
        assert!(!options.should_randomize_seed);
        assert_eq!(options.sampler, "k_euler_a");
        assert_eq!(options.steps, 30);
        assert_eq!(options.cfg_scale, 9.0);
        assert_eq!((options.width, options.height), (768, 640));
        assert!(!options.should_generate_variations);
        assert!(options.initial_image.is_none());
    }

    #[test]
    fn test_missing_fields_keep_current_values() {
        let mut options = OptionsState::default();
        options.steps = 12;
        options.set_all_parameters(&GenerationMetadata {
            kind: Some(ImageType::TextToImage),
            ..Default::default()
        });

        assert_eq!(options.steps, 12);
        assert_eq!(options.seed, 0);
        assert!(options.should_randomize_seed);
    }

    #[test]
    fn test_variations_and_postprocessing() {
        let mut meta = txt2img();
        meta.variations = vec![SeedWeight { seed: 5, weight: 0.2 }];
        meta.postprocessing = vec![
            PostprocessStep {
                kind: "esrgan".into(),
                strength: Some(0.5),
                scale: Some(2),
                fidelity: None,
            },
            PostprocessStep {
                kind: "codeformer".into(),
                strength: Some(0.6),
                scale: None,
                fidelity: Some(0.3),
            },
        ];

        let mut options = OptionsState::default();
        options.set_all_parameters(&meta);

        assert!(options.should_generate_variations);
        assert_eq!(options.seed_weights, "5:0.2");
        assert_eq!(options.variation_amount, 0.0);
        assert!(options.should_run_esrgan);
        assert_eq!(options.upscaling_level, 2);
        assert!(options.should_run_facetool);
        assert_eq!(options.facetool_type, FacetoolType::Codeformer);
        assert_eq!(options.codeformer_fidelity, 0.3);
    }

    #[test]
    fn test_img2img_bundle_sets_initial_image() {
        let meta = GenerationMetadata {
            kind: Some(ImageType::ImageToImage),
            init_image_path: Some("outputs/init-images/src.png".into()),
            strength: Some(0.4),
            fit: Some(false),
            ..Default::default()
        };

        let mut options = OptionsState::default();
        options.set_all_parameters(&meta);

        assert_eq!(
            options.initial_image,
            Some(InitialImage::Path("outputs/init-images/src.png".into()))
        );
        assert_eq!(options.img2img_strength, 0.4);
        assert!(!options.should_fit_to_width_height);
    }

    #[test]
    fn test_toggle_section() {
        let mut options = OptionsState::default();
        options.toggle_section(AdvancedFeature::Seed);
        assert!(options.open_sections.contains(&AdvancedFeature::Seed));
        options.toggle_section(AdvancedFeature::Seed);
        assert!(options.open_sections.is_empty());
    }

    #[test]
    fn test_feature_switches() {
        let mut options = OptionsState::default();
        assert_eq!(options.feature_enabled(AdvancedFeature::Seed), None);

        options.set_feature_enabled(AdvancedFeature::Upscale, true);
        assert_eq!(options.feature_enabled(AdvancedFeature::Upscale), Some(true));

        options.set_feature_enabled(AdvancedFeature::Other, true);
        assert_eq!(options.feature_enabled(AdvancedFeature::Other), None);
    }
}
