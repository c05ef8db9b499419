/// Options panel
///
/// Lays out, top to bottom: prompt input, process buttons, main options,
/// the advanced-options toggle and (only when the toggle is on) the
/// advanced accordion. `layout` decides what is shown; `view` renders it.
use iced::widget::{
    button, checkbox, column, container, pick_list, row, scrollable, slider, text, text_input,
    toggler, Column,
};
use iced::{Alignment, Element, Length};

use super::advanced::{AdvancedSection, SECTIONS};
use crate::state::data::Tab;
use crate::state::options::{OptionsState, SAMPLERS};
use crate::state::{Action, AppState};
use crate::Message;

/// One block of the panel, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelItem {
    PromptInput,
    ProcessButtons,
    MainOptions,
    AdvancedToggle,
    AdvancedAccordion,
}

/// Blocks to render for the current options
pub fn layout(options: &OptionsState) -> Vec<PanelItem> {
    let mut items = vec![
        PanelItem::PromptInput,
        PanelItem::ProcessButtons,
        PanelItem::MainOptions,
        PanelItem::AdvancedToggle,
    ];
    if options.show_advanced_options {
        items.push(PanelItem::AdvancedAccordion);
    }
    items
}

/// Accordion sections to render; empty when advanced options are hidden
pub fn visible_sections(options: &OptionsState) -> Vec<&'static AdvancedSection> {
    if options.show_advanced_options {
        SECTIONS.iter().collect()
    } else {
        Vec::new()
    }
}

/// Invoke needs a connected, idle server and a non-empty prompt
pub fn can_invoke(state: &AppState) -> bool {
    state.system.is_connected
        && !state.system.is_processing
        && !state.options.prompt.trim().is_empty()
}

/// Valid output dimensions: multiples of 64 from 256 to 2048
fn dimensions() -> Vec<u32> {
    (4..=32).map(|n| n * 64).collect()
}

fn dispatch(action: Action) -> Message {
    Message::Dispatch(action)
}

pub fn view(state: &AppState) -> Element<'_, Message> {
    let options = &state.options;

    let panel = layout(options)
        .into_iter()
        .fold(Column::new().spacing(16), |panel, item| {
            panel.push(match item {
                PanelItem::PromptInput => prompt_input(options),
                PanelItem::ProcessButtons => process_buttons(state),
                PanelItem::MainOptions => main_options(options),
                PanelItem::AdvancedToggle => advanced_toggle(options),
                PanelItem::AdvancedAccordion => accordion(options),
            })
        });

    scrollable(container(panel).padding(12))
        .width(Length::Fixed(360.0))
        .height(Length::Fill)
        .into()
}

fn prompt_input(options: &OptionsState) -> Element<'_, Message> {
    column![
        text_input("I'm dreaming of...", &options.prompt)
            .on_input(|value| dispatch(Action::SetPrompt(value)))
            .on_submit(Message::Invoke)
            .padding(8),
        text_input("Negative prompt", &options.negative_prompt)
            .on_input(|value| dispatch(Action::SetNegativePrompt(value)))
            .padding(8),
    ]
    .spacing(6)
    .into()
}

fn process_buttons(state: &AppState) -> Element<'_, Message> {
    let label = if state.system.is_processing {
        "Processing…"
    } else {
        "Invoke"
    };

    row![
        button(text(label))
            .on_press_maybe(can_invoke(state).then_some(Message::Invoke))
            .width(Length::Fill)
            .padding(10),
        button(text("Cancel"))
            .style(button::danger)
            .on_press_maybe(state.system.is_processing.then_some(Message::Cancel))
            .padding(10),
    ]
    .spacing(8)
    .into()
}

fn main_options(options: &OptionsState) -> Element<'_, Message> {
    let mut main = column![
        row![
            text(format!("Steps {}", options.steps)).width(Length::FillPortion(2)),
            slider(1..=150, options.steps, |v| dispatch(Action::SetSteps(v)))
                .width(Length::FillPortion(3)),
        ]
        .spacing(8)
        .align_y(Alignment::Center),
        row![
            text(format!("CFG Scale {:.1}", options.cfg_scale)).width(Length::FillPortion(2)),
            slider(1.0..=30.0, options.cfg_scale, |v| dispatch(Action::SetCfgScale(v)))
                .step(0.5)
                .width(Length::FillPortion(3)),
        ]
        .spacing(8)
        .align_y(Alignment::Center),
        row![
            text("Width").width(Length::FillPortion(1)),
            pick_list(dimensions(), Some(options.width), |v| dispatch(Action::SetWidth(v))),
            text("Height").width(Length::FillPortion(1)),
            pick_list(dimensions(), Some(options.height), |v| dispatch(Action::SetHeight(v))),
        ]
        .spacing(8)
        .align_y(Alignment::Center),
        row![
            text("Sampler").width(Length::FillPortion(2)),
            pick_list(SAMPLERS, Some(options.sampler.as_str()), |v| {
                dispatch(Action::SetSampler(v.to_string()))
            })
            .width(Length::FillPortion(3)),
        ]
        .spacing(8)
        .align_y(Alignment::Center),
    ]
    .spacing(8);

    if options.active_tab == Tab::ImageToImage {
        main = main
            .push(
                row![
                    text(format!("Image To Image Strength {:.2}", options.img2img_strength))
                        .width(Length::FillPortion(2)),
                    slider(0.0..=0.99, options.img2img_strength, |v| {
                        dispatch(Action::SetImg2ImgStrength(v))
                    })
                    .step(0.01)
                    .width(Length::FillPortion(3)),
                ]
                .spacing(8)
                .align_y(Alignment::Center),
            )
            .push(
                checkbox("Fit Initial Image To Output Size", options.should_fit_to_width_height)
                    .on_toggle(|v| dispatch(Action::SetShouldFitToWidthHeight(v))),
            );
    }

    main.into()
}

fn advanced_toggle(options: &OptionsState) -> Element<'_, Message> {
    toggler(options.show_advanced_options)
        .label("Show Advanced Options")
        .on_toggle(|show| dispatch(Action::SetShowAdvancedOptions(show)))
        .into()
}

fn accordion(options: &OptionsState) -> Element<'_, Message> {
    visible_sections(options)
        .into_iter()
        .fold(Column::new().spacing(4), |accordion, section| {
            accordion.push(accordion_item(options, section))
        })
        .into()
}

fn accordion_item<'a>(
    options: &'a OptionsState,
    section: &AdvancedSection,
) -> Element<'a, Message> {
    let is_open = options.open_sections.contains(&section.feature);
    let arrow = if is_open { "▾" } else { "▸" };

    let mut header = row![button(text(format!("{arrow} {}", section.header)))
        .style(button::text)
        .on_press(dispatch(Action::ToggleSection(section.feature)))
        .width(Length::Fill)]
    .align_y(Alignment::Center);

    if let Some(enabled) = options.feature_enabled(section.feature) {
        let feature = section.feature;
        header = header.push(
            toggler(enabled)
                .on_toggle(move |value| dispatch(Action::SetFeatureEnabled(feature, value))),
        );
    }

    let mut item = column![header].spacing(6);
    if is_open {
        item = item.push(container((section.body)(options)).padding([4, 12]));
    }

    container(item)
        .style(container::rounded_box)
        .padding(6)
        .width(Length::Fill)
        .into()
}
