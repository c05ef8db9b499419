/// Advanced option sections
///
/// Each accordion section is one row of `SECTIONS`: the feature it belongs
/// to, the header label and a function rendering its body. The options
/// panel iterates the table; adding a section means adding a row.
use iced::widget::{checkbox, column, pick_list, row, slider, text, text_input};
use iced::{Alignment, Element, Length};

use crate::state::options::{AdvancedFeature, FacetoolType, OptionsState};
use crate::state::prompt::parse_seed_weights;
use crate::state::Action;
use crate::Message;

pub struct AdvancedSection {
    pub feature: AdvancedFeature,
    pub header: &'static str,
    pub body: for<'a> fn(&'a OptionsState) -> Element<'a, Message>,
}

pub const SECTIONS: [AdvancedSection; 5] = [
    AdvancedSection {
        feature: AdvancedFeature::Seed,
        header: "Seed",
        body: seed_body,
    },
    AdvancedSection {
        feature: AdvancedFeature::Variations,
        header: "Variations",
        body: variations_body,
    },
    AdvancedSection {
        feature: AdvancedFeature::FaceRestore,
        header: "Face Restoration",
        body: face_restore_body,
    },
    AdvancedSection {
        feature: AdvancedFeature::Upscale,
        header: "Upscaling",
        body: upscale_body,
    },
    AdvancedSection {
        feature: AdvancedFeature::Other,
        header: "Other Options",
        body: other_body,
    },
];

/// Upscaling factors ESRGAN supports
const UPSCALE_LEVELS: [u32; 2] = [2, 4];

fn dispatch(action: Action) -> Message {
    Message::Dispatch(action)
}

/// A labelled slider row
fn labelled_slider<'a>(
    label: &'a str,
    range: std::ops::RangeInclusive<f32>,
    value: f32,
    step: f32,
    on_change: impl Fn(f32) -> Message + 'a,
) -> Element<'a, Message> {
    row![
        text(label).width(Length::FillPortion(2)),
        slider(range, value, on_change)
            .step(step)
            .width(Length::FillPortion(3)),
        text(format!("{value:.2}")).width(Length::Fixed(48.0)),
    ]
    .spacing(8)
    .align_y(Alignment::Center)
    .into()
}

fn seed_body(options: &OptionsState) -> Element<'_, Message> {
    let seed_input = text_input("Seed", &options.seed.to_string())
        .on_input(|value| match value.trim().parse::<u32>() {
            Ok(seed) => dispatch(Action::SetSeed(seed)),
            Err(_) => Message::None,
        })
        .width(Length::Fill);

    column![
        checkbox("Randomize Seed", options.should_randomize_seed)
            .on_toggle(|value| dispatch(Action::SetShouldRandomizeSeed(value))),
        row![text("Seed").width(Length::FillPortion(2)), seed_input]
            .spacing(8)
            .align_y(Alignment::Center),
        labelled_slider("Noise Threshold", 0.0..=10.0, options.threshold, 0.1, |v| {
            dispatch(Action::SetThreshold(v))
        }),
        labelled_slider("Perlin Noise", 0.0..=1.0, options.perlin, 0.01, |v| {
            dispatch(Action::SetPerlin(v))
        }),
    ]
    .spacing(8)
    .into()
}

fn variations_body(options: &OptionsState) -> Element<'_, Message> {
    let mut body = column![
        labelled_slider("Variation Amount", 0.0..=1.0, options.variation_amount, 0.01, |v| {
            dispatch(Action::SetVariationAmount(v))
        }),
        text_input("seed:weight,seed:weight", &options.seed_weights)
            .on_input(|value| dispatch(Action::SetSeedWeights(value))),
    ]
    .spacing(8);

    if parse_seed_weights(&options.seed_weights).is_none() {
        body = body.push(text("Seed weights must look like 1234:0.1,5678:0.2").size(12));
    }

    body.into()
}

fn face_restore_body(options: &OptionsState) -> Element<'_, Message> {
    let mut body = column![
        row![
            text("Type").width(Length::FillPortion(2)),
            pick_list(FacetoolType::ALL, Some(options.facetool_type), |kind| {
                dispatch(Action::SetFacetoolType(kind))
            })
            .width(Length::FillPortion(3)),
        ]
        .spacing(8)
        .align_y(Alignment::Center),
        labelled_slider("Strength", 0.0..=1.0, options.facetool_strength, 0.05, |v| {
            dispatch(Action::SetFacetoolStrength(v))
        }),
    ]
    .spacing(8);

    if options.facetool_type == FacetoolType::Codeformer {
        body = body.push(labelled_slider(
            "Fidelity",
            0.0..=1.0,
            options.codeformer_fidelity,
            0.05,
            |v| dispatch(Action::SetCodeformerFidelity(v)),
        ));
    }

    body.into()
}

fn upscale_body(options: &OptionsState) -> Element<'_, Message> {
    column![
        row![
            text("Scale").width(Length::FillPortion(2)),
            pick_list(UPSCALE_LEVELS, Some(options.upscaling_level), |level| {
                dispatch(Action::SetUpscalingLevel(level))
            })
            .width(Length::FillPortion(3)),
        ]
        .spacing(8)
        .align_y(Alignment::Center),
        labelled_slider("Strength", 0.0..=1.0, options.upscaling_strength, 0.05, |v| {
            dispatch(Action::SetUpscalingStrength(v))
        }),
    ]
    .spacing(8)
    .into()
}

fn other_body(options: &OptionsState) -> Element<'_, Message> {
    column![
        checkbox("Seamless Tiling", options.seamless)
            .on_toggle(|value| dispatch(Action::SetSeamless(value))),
        checkbox("High Resolution Optimization", options.hires_fix)
            .on_toggle(|value| dispatch(Action::SetHiresFix(value))),
    ]
    .spacing(8)
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_in_fixed_order() {
        let features: Vec<_> = SECTIONS.iter().map(|s| s.feature).collect();
        assert_eq!(
            features,
            vec![
                AdvancedFeature::Seed,
                AdvancedFeature::Variations,
                AdvancedFeature::FaceRestore,
                AdvancedFeature::Upscale,
                AdvancedFeature::Other,
            ]
        );
    }

    #[test]
    fn test_headers_are_unique() {
        let mut headers: Vec<_> = SECTIONS.iter().map(|s| s.header).collect();
        headers.sort_unstable();
        headers.dedup();
        assert_eq!(headers.len(), SECTIONS.len());
    }
}
