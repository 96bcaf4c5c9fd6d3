//! The overlay UI: header, bloom controls, the delayed message, and a tip.

use bevy::{prelude::*, ui::Val::*};

use crate::{
    AppSystems,
    animation::{Transition, TransitionCurve, TransitionState},
    flower::bloom::{BloomCommand, MessageReveal},
    theme::{palette, widget},
};

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<HudAssets>()
        .add_systems(Startup, spawn_hud)
        .add_systems(
            Update,
            (update_message_card, apply_message_entrance)
                .chain()
                .in_set(AppSystems::Update)
                .after(super::bloom::schedule_message_reveal),
        );
}

const ENTRANCE_MILLIS: u64 = 650;

const MESSAGE_TITLE: &str = "I am sorry Shrutu";
const MESSAGE_BODY: &str = "A little bloom to say it from the heart.";

#[derive(Resource, Asset, Reflect, Clone)]
#[reflect(Resource)]
struct HudAssets {
    message_curve: Handle<TransitionCurve>,
}

impl FromWorld for HudAssets {
    fn from_world(world: &mut World) -> Self {
        let message_curve = world
            .resource_mut::<Assets<TransitionCurve>>()
            .add(TransitionCurve::from_millis(
                ENTRANCE_MILLIS,
                EaseFunction::BackOut,
            ));
        Self { message_curve }
    }
}

/// Marks the fixed UI region the message card appears in.
#[derive(Component, Reflect)]
#[reflect(Component)]
struct MessageSlot;

#[derive(Component, Reflect)]
#[reflect(Component)]
struct MessageCard;

/// Full-opacity color of a message text line, scaled by the entrance fade.
#[derive(Component, Reflect)]
#[reflect(Component)]
struct FadedText(Color);

fn spawn_hud(mut commands: Commands) {
    commands.spawn((
        widget::ui_root("HUD"),
        children![
            widget::header("Tap the flower to make it bloom"),
            (
                Name::new("Controls"),
                Node {
                    flex_direction: FlexDirection::Column,
                    align_items: AlignItems::Center,
                    row_gap: Px(16.0),
                    ..default()
                },
                Pickable::IGNORE,
                children![
                    (
                        Name::new("Buttons"),
                        Node {
                            column_gap: Px(12.0),
                            ..default()
                        },
                        Pickable::IGNORE,
                        children![
                            widget::button("Bloom", open_flower),
                            widget::button_muted("Reset", close_flower),
                        ],
                    ),
                    (
                        Name::new("Message Slot"),
                        MessageSlot,
                        Node {
                            min_height: Px(56.0),
                            align_items: AlignItems::Center,
                            justify_content: JustifyContent::Center,
                            ..default()
                        },
                        Pickable::IGNORE,
                    ),
                    widget::label("Tip: click the flower or press Enter/Space to toggle bloom."),
                ],
            ),
        ],
    ));
}

fn open_flower(_: On<Pointer<Click>>, mut bloom_commands: MessageWriter<BloomCommand>) {
    bloom_commands.write(BloomCommand::Bloom);
}

fn close_flower(_: On<Pointer<Click>>, mut bloom_commands: MessageWriter<BloomCommand>) {
    bloom_commands.write(BloomCommand::Reset);
}

fn update_message_card(
    reveal: Single<&MessageReveal, Changed<MessageReveal>>,
    slot: Single<Entity, With<MessageSlot>>,
    cards: Query<Entity, With<MessageCard>>,
    assets: Res<HudAssets>,
    mut commands: Commands,
) {
    if reveal.is_visible() {
        if cards.is_empty() {
            commands.entity(*slot).with_child(message_card(&assets));
        }
    } else {
        for card in &cards {
            commands.entity(card).despawn();
        }
    }
}

fn message_card(assets: &HudAssets) -> impl Bundle {
    (
        Name::new("Message Card"),
        MessageCard,
        Transition {
            curve: assets.message_curve.clone(),
            target: 1.0,
        },
        Node {
            flex_direction: FlexDirection::Column,
            align_items: AlignItems::Center,
            padding: UiRect::all(Px(16.0)),
            row_gap: Px(4.0),
            ..default()
        },
        BorderRadius::all(Px(12.0)),
        BackgroundColor(palette::MESSAGE_BACKGROUND.with_alpha(0.0)),
        Pickable::IGNORE,
        children![
            (
                Name::new("Message Title"),
                FadedText(palette::MESSAGE_TITLE_TEXT),
                Text::new(MESSAGE_TITLE),
                TextFont::from_font_size(18.0),
                TextColor(palette::MESSAGE_TITLE_TEXT.with_alpha(0.0)),
                Pickable::IGNORE,
            ),
            (
                Name::new("Message Body"),
                FadedText(palette::MESSAGE_BODY_TEXT),
                Text::new(MESSAGE_BODY),
                TextFont::from_font_size(13.0),
                TextColor(palette::MESSAGE_BODY_TEXT.with_alpha(0.0)),
                Pickable::IGNORE,
            ),
        ],
    )
}

fn apply_message_entrance(
    card: Single<
        (&TransitionState, &Children, &mut Node, &mut BackgroundColor),
        (With<MessageCard>, Changed<TransitionState>),
    >,
    mut texts: Query<(&FadedText, &mut TextColor)>,
) {
    let (state, children, mut node, mut background) = card.into_inner();
    let eased = state.eased();

    // Drop in from slightly above while fading.
    node.top = Px(-8.0 * (1.0 - eased));
    background.0 = palette::MESSAGE_BACKGROUND.with_alpha(eased);

    for child in children.iter() {
        if let Ok((faded, mut color)) = texts.get_mut(child) {
            color.0 = faded.0.with_alpha(eased);
        }
    }
}
