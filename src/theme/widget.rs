//! Helper functions for creating common widgets.

use std::borrow::Cow;

use bevy::{
    ecs::{relationship::RelatedSpawner, spawn::SpawnWith, system::IntoObserverSystem},
    prelude::*,
    ui::Val::*,
};

use crate::theme::{interaction::InteractionPalette, palette};

/// A root UI node that fills the window and stacks its content vertically.
pub fn ui_root(name: impl Into<Cow<'static, str>>) -> impl Bundle {
    (
        Name::new(name),
        Node {
            position_type: PositionType::Absolute,
            width: Percent(100.0),
            height: Percent(100.0),
            align_items: AlignItems::Center,
            justify_content: JustifyContent::SpaceBetween,
            flex_direction: FlexDirection::Column,
            padding: UiRect::all(Px(24.0)),
            ..default()
        },
        // Don't block picking events for other UI roots.
        Pickable::IGNORE,
    )
}

/// A simple header label. Bigger than [`label`].
pub fn header(text: impl Into<String>) -> impl Bundle {
    (
        Name::new("Header"),
        Text(text.into()),
        TextFont::from_font_size(30.0),
        TextColor(palette::HEADER_TEXT),
    )
}

/// A simple text label.
pub fn label(text: impl Into<String>) -> impl Bundle {
    (
        Name::new("Label"),
        Text(text.into()),
        TextFont::from_font_size(13.0),
        TextColor(palette::LABEL_TEXT),
    )
}

/// A rose-colored action button with text and an action defined as an
/// [`Observer`].
pub fn button<E, B, M, I>(text: impl Into<String>, action: I) -> impl Bundle
where
    E: EntityEvent,
    B: Bundle,
    I: IntoObserverSystem<E, B, M>,
{
    button_base(
        text,
        action,
        InteractionPalette {
            none: palette::BUTTON_BACKGROUND,
            hovered: palette::BUTTON_HOVERED_BACKGROUND,
            pressed: palette::BUTTON_PRESSED_BACKGROUND,
        },
        palette::BUTTON_TEXT,
    )
}

/// A muted gray variant of [`button`] for secondary actions.
pub fn button_muted<E, B, M, I>(text: impl Into<String>, action: I) -> impl Bundle
where
    E: EntityEvent,
    B: Bundle,
    I: IntoObserverSystem<E, B, M>,
{
    button_base(
        text,
        action,
        InteractionPalette {
            none: palette::MUTED_BUTTON_BACKGROUND,
            hovered: palette::MUTED_BUTTON_HOVERED_BACKGROUND,
            pressed: palette::MUTED_BUTTON_PRESSED_BACKGROUND,
        },
        palette::MUTED_BUTTON_TEXT,
    )
}

fn button_base<E, B, M, I>(
    text: impl Into<String>,
    action: I,
    interaction_palette: InteractionPalette,
    text_color: Color,
) -> impl Bundle
where
    E: EntityEvent,
    B: Bundle,
    I: IntoObserverSystem<E, B, M>,
{
    let text = text.into();
    let action = IntoObserverSystem::into_system(action);
    (
        Name::new("Button"),
        Node::default(),
        Children::spawn(SpawnWith(move |parent: &mut RelatedSpawner<ChildOf>| {
            parent
                .spawn((
                    Name::new("Button Inner"),
                    Button,
                    Node {
                        width: Px(132.0),
                        height: Px(48.0),
                        align_items: AlignItems::Center,
                        justify_content: JustifyContent::Center,
                        ..default()
                    },
                    BorderRadius::all(Px(10.0)),
                    BackgroundColor(interaction_palette.none),
                    interaction_palette,
                    children![(
                        Name::new("Button Text"),
                        Text(text),
                        TextFont::from_font_size(20.0),
                        TextColor(text_color),
                        // Don't bubble picking events from the text up to the button.
                        Pickable::IGNORE,
                    )],
                ))
                .observe(action);
        })),
    )
}
