//! iced widgets for a `Screen`
//!
//! Pure functions from retained state to elements. Interaction only ever
//! produces a `Message`; nothing here touches the controller.

use iced::widget::{
    button, center, column, container, image, mouse_area, opaque, pick_list, row, scrollable,
    stack, text, text_input, Column,
};
use iced::{Alignment, Color, ContentFit, Element, Length};
use iced_aw::Wrap;

use super::screen::{ContactFrame, InfoBox, LightboxFrame, Screen};
use super::view::FocusTarget;
use crate::config::AssetPaths;
use crate::state::contact::ContactField;
use crate::state::data::{Media, Photographer};
use crate::state::lightbox::LightboxControl;
use crate::state::route::Route;
use crate::state::sort::SortKey;
use crate::Message;

const CARD_WIDTH: f32 = 300.0;
const THUMBNAIL_HEIGHT: f32 = 260.0;
const PORTRAIT_SIZE: f32 = 180.0;

/// Stable widget id for a contact form input
pub fn contact_input_id(field: ContactField) -> text_input::Id {
    text_input::Id::new(match field {
        ContactField::FirstName => "contact-first-name",
        ContactField::LastName => "contact-last-name",
        ContactField::Email => "contact-email",
        ContactField::Message => "contact-message",
        ContactField::Submit => "contact-submit",
        ContactField::Close => "contact-close",
    })
}

/// Whole window content for the current screen
pub fn page<'a>(screen: &'a Screen, assets: &'a AssetPaths) -> Element<'a, Message> {
    let body: Element<'a, Message> = if let Some(message) = &screen.error {
        error_page(message)
    } else if screen.loading {
        center(text("Loading…").size(20)).into()
    } else {
        match screen.route {
            Some(Route::Photographer(_)) => photographer_page(screen, assets),
            _ => home_page(screen, assets),
        }
    };

    if !screen.has_modal() {
        return body;
    }
    match (&screen.lightbox, &screen.contact) {
        (Some(frame), _) => modal(
            body,
            lightbox(frame, screen, assets),
            Message::Lightbox(LightboxControl::Close),
        ),
        (None, Some(frame)) => modal(body, contact_modal(frame, screen), Message::CloseContact),
        (None, None) => body,
    }
}

fn error_page<'a>(message: &'a str) -> Element<'a, Message> {
    center(
        column![
            text(message).size(20),
            button("Back to photographers")
                .on_press(Message::Navigate(Route::Home))
                .padding(10),
        ]
        .spacing(20)
        .align_x(Alignment::Center),
    )
    .into()
}

// ========== Home ==========

fn home_page<'a>(screen: &'a Screen, assets: &'a AssetPaths) -> Element<'a, Message> {
    let cards = screen
        .photographers
        .iter()
        .map(|photographer| photographer_card(photographer, screen, assets))
        .collect();

    let content = column![
        row![
            text("Our photographers").size(36).width(Length::Fill),
            button("Open data file…").on_press(Message::OpenDataFile).padding(10),
        ]
        .align_y(Alignment::Center),
        Wrap::with_elements(cards).spacing(40.0).line_spacing(40.0),
    ]
    .spacing(30)
    .padding(40);

    scrollable(content).height(Length::Fill).into()
}

fn photographer_card<'a>(
    photographer: &'a Photographer,
    screen: &Screen,
    assets: &AssetPaths,
) -> Element<'a, Message> {
    let target = FocusTarget::PhotographerCard(photographer.id);
    let card = column![
        portrait(photographer, assets),
        text(photographer.name.as_str()).size(24),
        text(photographer.location()).size(14),
        text(photographer.tagline.as_str()).size(12),
        text(format!("{}€ / day", photographer.price)).size(12),
    ]
    .spacing(6)
    .align_x(Alignment::Center)
    .width(Length::Fixed(CARD_WIDTH));

    let style = if screen.is_focused(target) {
        button::primary
    } else {
        button::text
    };

    mouse_area(
        button(card)
            .on_press(Message::Navigate(Route::Photographer(Some(photographer.id))))
            .style(style),
    )
    .on_enter(Message::Focus(target))
    .into()
}

fn portrait<'a>(photographer: &Photographer, assets: &AssetPaths) -> Element<'a, Message> {
    image(image::Handle::from_path(assets.portrait(&photographer.portrait)))
        .width(Length::Fixed(PORTRAIT_SIZE))
        .height(Length::Fixed(PORTRAIT_SIZE))
        .content_fit(ContentFit::Cover)
        .into()
}

// ========== Photographer page ==========

fn photographer_page<'a>(screen: &'a Screen, assets: &'a AssetPaths) -> Element<'a, Message> {
    let mut content: Column<'a, Message> = column![button("← Photographers")
        .on_press(Message::Navigate(Route::Home))
        .style(button::text)]
    .spacing(30)
    .padding(40);

    if let Some(photographer) = &screen.banner {
        content = content.push(banner(photographer, screen, assets));
    }

    content = content.push(
        row![
            text("Sort by"),
            pick_list(&SortKey::ALL[..], Some(screen.sort), Message::SortSelected),
        ]
        .spacing(12)
        .align_y(Alignment::Center),
    );

    let cards = screen
        .media
        .iter()
        .map(|media| media_card(media, screen, assets))
        .collect();
    content = content.push(Wrap::with_elements(cards).spacing(30.0).line_spacing(30.0));

    let mut page = column![scrollable(content).height(Length::Fill)];
    if let Some(info) = screen.info {
        page = page.push(info_box(info));
    }
    page.into()
}

fn banner<'a>(photographer: &'a Photographer, screen: &Screen, assets: &AssetPaths) -> Element<'a, Message> {
    let contact = mouse_area(
        button("Contact me")
            .on_press(Message::OpenContact)
            .padding(14)
            .style(focus_style(screen.is_focused(FocusTarget::ContactButton))),
    )
    .on_enter(Message::Focus(FocusTarget::ContactButton));

    container(
        row![
            column![
                text(photographer.name.as_str()).size(40),
                text(photographer.location()).size(18),
                text(photographer.tagline.as_str()).size(14),
            ]
            .spacing(8)
            .width(Length::Fill),
            contact,
            portrait(photographer, assets),
        ]
        .spacing(40)
        .align_y(Alignment::Center),
    )
    .padding(30)
    .style(container::rounded_box)
    .into()
}

fn media_card<'a>(media: &'a Media, screen: &Screen, assets: &AssetPaths) -> Element<'a, Message> {
    let focused = screen.is_focused(FocusTarget::MediaCard(media.id));
    let heart = if media.is_liked { "♥" } else { "♡" };

    let preview = mouse_area(
        button(thumbnail(media, assets, THUMBNAIL_HEIGHT))
            .on_press(Message::OpenLightbox(media.id))
            .padding(if focused { 4 } else { 0 })
            .style(focus_style(focused)),
    )
    .on_enter(Message::Focus(FocusTarget::MediaCard(media.id)));

    column![
        preview,
        row![
            text(media.title.as_str()).width(Length::Fill),
            button(text(format!("{} {}", media.likes, heart)))
                .on_press(Message::ToggleLike(media.id))
                .style(button::text),
        ]
        .align_y(Alignment::Center),
    ]
    .spacing(6)
    .width(Length::Fixed(CARD_WIDTH))
    .into()
}

/// Image preview, or a titled placeholder for videos
fn thumbnail<'a>(media: &'a Media, assets: &AssetPaths, height: f32) -> Element<'a, Message> {
    if media.is_video() {
        return container(
            column![
                text("▶").size(48),
                text(assets.video(media.asset()).display().to_string()).size(10),
            ]
            .align_x(Alignment::Center)
            .spacing(8),
        )
        .center_x(Length::Fill)
        .center_y(Length::Fixed(height))
        .style(container::rounded_box)
        .into();
    }

    image(image::Handle::from_path(assets.image(media.asset())))
        .width(Length::Fill)
        .height(Length::Fixed(height))
        .content_fit(ContentFit::Cover)
        .into()
}

fn info_box<'a>(info: InfoBox) -> Element<'a, Message> {
    container(
        row![
            text(format!("{} ♥", info.total_likes)).size(20),
            text(format!("{}€ / day", info.price)).size(20),
        ]
        .spacing(40),
    )
    .padding(16)
    .width(Length::Fill)
    .align_x(Alignment::End)
    .style(container::rounded_box)
    .into()
}

// ========== Modals ==========

fn lightbox<'a>(frame: &'a LightboxFrame, screen: &Screen, assets: &AssetPaths) -> Element<'a, Message> {
    let control = |label: &'static str, control: LightboxControl| {
        button(text(label).size(28))
            .on_press(Message::Lightbox(control))
            .padding(12)
            .style(focus_style(screen.is_focused(FocusTarget::Lightbox(control))))
    };

    container(
        column![
            row![
                text(format!("{} / {}", frame.position + 1, frame.len)).width(Length::Fill),
                control("✕", LightboxControl::Close),
            ]
            .align_y(Alignment::Center),
            row![
                control("‹", LightboxControl::Previous),
                container(thumbnail(&frame.media, assets, 600.0)).width(Length::Fixed(800.0)),
                control("›", LightboxControl::Next),
            ]
            .spacing(20)
            .align_y(Alignment::Center),
            text(frame.media.title.as_str()).size(20),
        ]
        .spacing(16),
    )
    .padding(24)
    .style(container::rounded_box)
    .into()
}

fn contact_modal<'a>(frame: &'a ContactFrame, screen: &Screen) -> Element<'a, Message> {
    let form = &frame.form;
    let mut fields = column![row![
        text(format!("Contact me\n{}", frame.photographer))
            .size(28)
            .width(Length::Fill),
        button("✕")
            .on_press(Message::CloseContact)
            .style(focus_style(screen.is_focused(FocusTarget::Contact(ContactField::Close)))),
    ]]
    .spacing(10)
    .width(Length::Fixed(520.0));

    for field in [
        ContactField::FirstName,
        ContactField::LastName,
        ContactField::Email,
        ContactField::Message,
    ] {
        fields = fields.push(text(field.label()));
        fields = fields.push(
            text_input(field.label(), form.value(field))
                .id(contact_input_id(field))
                .on_input(move |value| Message::ContactInput(field, value))
                .on_submit(Message::SubmitContact)
                .padding(10),
        );
        if let Some(error) = form.error(field) {
            fields = fields.push(
                text(error.message())
                    .size(12)
                    .color(Color::from_rgb(0.9, 0.3, 0.3)),
            );
        }
    }

    fields = fields.push(
        button("Send")
            .on_press(Message::SubmitContact)
            .padding(12)
            .style(focus_style(screen.is_focused(FocusTarget::Contact(ContactField::Submit)))),
    );

    container(fields)
        .padding(30)
        .style(container::rounded_box)
        .into()
}

/// Dimmed overlay; clicking outside the content sends `on_blur`
fn modal<'a>(
    base: impl Into<Element<'a, Message>>,
    content: impl Into<Element<'a, Message>>,
    on_blur: Message,
) -> Element<'a, Message> {
    stack![
        base.into(),
        opaque(
            mouse_area(center(opaque(content)).style(|_theme| container::Style {
                background: Some(
                    Color {
                        a: 0.85,
                        ..Color::BLACK
                    }
                    .into(),
                ),
                ..container::Style::default()
            }))
            .on_press(on_blur)
        )
    ]
    .into()
}

/// Focused controls are drawn with the primary style
fn focus_style(focused: bool) -> fn(&iced::Theme, button::Status) -> button::Style {
    if focused {
        button::primary
    } else {
        button::secondary
    }
}
