/// Toast stack, bottom-right of the window
use iced::widget::{button, column, container, text, Column};
use iced::{Alignment, Color, Element, Length, Theme};

use crate::notify::{Severity, Toasts};
use crate::Message;

pub fn view(toasts: &Toasts) -> Element<'_, Message> {
    let stack = toasts.iter().fold(Column::new().spacing(8), |stack, toast| {
        let note = &toast.notification;
        let mut body = column![text(&note.title).size(16)].spacing(2);
        if let Some(description) = &note.description {
            body = body.push(text(description).size(13));
        }

        let severity = note.severity;
        let card = container(body)
            .padding(10)
            .width(Length::Fixed(280.0))
            .style(move |theme: &Theme| {
                let palette = theme.extended_palette();
                let background = match severity {
                    Severity::Success => palette.success.strong.color,
                    Severity::Error => palette.danger.strong.color,
                };
                container::Style::default()
                    .background(background)
                    .color(Color::WHITE)
                    .border(iced::border::rounded(6.0))
            });

        let item: Element<'_, Message> = if note.is_closable {
            button(card)
                .padding(0)
                .style(button::text)
                .on_press(Message::DismissToast(toast.id))
                .into()
        } else {
            card.into()
        };

        stack.push(item)
    });

    container(stack)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(16)
        .align_x(Alignment::End)
        .align_y(Alignment::End)
        .into()
}
