//! Bloom state and the delayed message reveal.

use std::time::Duration;

use bevy::{prelude::*, window::PrimaryWindow};

use crate::AppSystems;

pub(super) fn plugin(app: &mut App) {
    app.add_message::<BloomCommand>();

    app.add_systems(
        Update,
        (
            tick_message_reveal.in_set(AppSystems::TickTimers),
            (record_pointer_input, record_keyboard_input).in_set(AppSystems::RecordInput),
            (apply_bloom_commands, schedule_message_reveal)
                .chain()
                .in_set(AppSystems::Update),
        ),
    );
}

/// How long the flower must stay bloomed before the message appears.
pub const MESSAGE_DELAY: Duration = Duration::from_millis(600);

/// Side length of the clickable card behind the flower, in world units.
pub const CARD_SIZE: f32 = 256.0;

/// The flower's bloom state. Lives on the flower root entity; everything
/// visual derives from this one flag.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
#[reflect(Component)]
#[require(MessageReveal)]
pub struct Flower {
    pub bloomed: bool,
}

/// Requests a bloom state change. Written by pointer/keyboard input and the
/// HUD buttons, applied in order once per frame.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BloomCommand {
    /// Flip the bloom state.
    Toggle,
    /// Bloom, regardless of the current state.
    Bloom,
    /// Close, regardless of the current state.
    Reset,
}

/// Delayed visibility of the message card.
///
/// The countdown is armed when the flower blooms and dropped the moment it
/// closes, so visibility can lag the flower blooming but never outlives it
/// closing.
#[derive(Component, Debug, Default, Reflect)]
#[reflect(Component)]
pub struct MessageReveal {
    countdown: Option<Timer>,
    visible: bool,
}

impl MessageReveal {
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

pub(super) fn apply_bloom_commands(
    mut bloom_commands: MessageReader<BloomCommand>,
    mut flower: Single<&mut Flower>,
) {
    for &command in bloom_commands.read() {
        let bloomed = match command {
            BloomCommand::Toggle => !flower.bloomed,
            BloomCommand::Bloom => true,
            BloomCommand::Reset => false,
        };
        // A redundant force is not a transition; don't re-arm the reveal.
        flower.set_if_neq(Flower { bloomed });
    }
}

pub(super) fn schedule_message_reveal(
    mut flowers: Query<(&Flower, &mut MessageReveal), Changed<Flower>>,
) {
    for (flower, mut reveal) in &mut flowers {
        if flower.bloomed {
            reveal.countdown = Some(Timer::new(MESSAGE_DELAY, TimerMode::Once));
        } else {
            reveal.countdown = None;
            reveal.visible = false;
        }
    }
}

fn tick_message_reveal(time: Res<Time>, mut reveals: Query<&mut MessageReveal>) {
    for mut reveal in &mut reveals {
        let finished = reveal
            .bypass_change_detection()
            .countdown
            .as_mut()
            .is_some_and(|countdown| countdown.tick(time.delta()).is_finished());

        if finished {
            reveal.countdown = None;
            reveal.visible = true;
        }
    }
}

fn record_keyboard_input(
    input: Res<ButtonInput<KeyCode>>,
    mut bloom_commands: MessageWriter<BloomCommand>,
) {
    if input.just_pressed(KeyCode::Enter) || input.just_pressed(KeyCode::Space) {
        bloom_commands.write(BloomCommand::Toggle);
    }
}

fn record_pointer_input(
    input: Res<ButtonInput<MouseButton>>,
    window: Single<&Window, With<PrimaryWindow>>,
    camera: Single<(&Camera, &GlobalTransform), With<Camera2d>>,
    mut bloom_commands: MessageWriter<BloomCommand>,
) {
    if !input.just_pressed(MouseButton::Left) {
        return;
    }

    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let (camera, camera_transform) = *camera;
    let Ok(point) = camera.viewport_to_world_2d(camera_transform, cursor) else {
        return;
    };

    if Rect::from_center_size(Vec2::ZERO, Vec2::splat(CARD_SIZE)).contains(point) {
        bloom_commands.write(BloomCommand::Toggle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        let mut app = App::new();
        app.add_message::<BloomCommand>();
        app.init_resource::<Time>();
        app.add_systems(
            Update,
            (
                tick_message_reveal,
                apply_bloom_commands,
                schedule_message_reveal,
            )
                .chain(),
        );
        app.world_mut().spawn(Flower::default());
        app.update();
        app
    }

    fn send(app: &mut App, command: BloomCommand) {
        // Zero the delta so the command frame itself takes no time.
        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::ZERO);
        app.world_mut().write_message(command);
        app.update();
    }

    fn advance(app: &mut App, millis: u64) {
        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_millis(millis));
        app.update();
    }

    fn state(app: &mut App) -> (bool, bool) {
        let mut query = app.world_mut().query::<(&Flower, &MessageReveal)>();
        let (flower, reveal) = query.single(app.world()).unwrap();
        (flower.bloomed, reveal.visible)
    }

    #[test]
    fn starts_closed_and_silent() {
        let mut app = app();
        assert_eq!(state(&mut app), (false, false));
    }

    #[test]
    fn message_appears_after_the_delay() {
        let mut app = app();

        send(&mut app, BloomCommand::Bloom);
        assert_eq!(state(&mut app), (true, false));

        advance(&mut app, 599);
        assert_eq!(state(&mut app), (true, false));

        advance(&mut app, 1);
        assert_eq!(state(&mut app), (true, true));

        // Stays visible while bloomed.
        advance(&mut app, 2000);
        assert_eq!(state(&mut app), (true, true));
    }

    #[test]
    fn reset_before_the_delay_cancels_the_message() {
        let mut app = app();

        send(&mut app, BloomCommand::Bloom);
        advance(&mut app, 300);
        send(&mut app, BloomCommand::Reset);
        assert_eq!(state(&mut app), (false, false));

        // The cancelled countdown never fires.
        advance(&mut app, 2000);
        assert_eq!(state(&mut app), (false, false));
    }

    #[test]
    fn rapid_double_toggle_nets_out_closed() {
        let mut app = app();

        send(&mut app, BloomCommand::Toggle);
        advance(&mut app, 100);
        send(&mut app, BloomCommand::Toggle);
        assert_eq!(state(&mut app), (false, false));

        advance(&mut app, 2000);
        assert_eq!(state(&mut app), (false, false));
    }

    #[test]
    fn redundant_bloom_does_not_rearm_the_countdown() {
        let mut app = app();

        send(&mut app, BloomCommand::Bloom);
        advance(&mut app, 400);
        send(&mut app, BloomCommand::Bloom);

        // Were the countdown re-armed here, 200ms more would not be enough.
        advance(&mut app, 200);
        assert_eq!(state(&mut app), (true, true));
    }

    #[test]
    fn closing_hides_the_message_immediately() {
        let mut app = app();

        send(&mut app, BloomCommand::Bloom);
        advance(&mut app, 600);
        assert_eq!(state(&mut app), (true, true));

        send(&mut app, BloomCommand::Toggle);
        assert_eq!(state(&mut app), (false, false));
    }

    #[test]
    fn message_is_only_ever_visible_while_bloomed() {
        let mut app = app();
        let script = [
            (BloomCommand::Bloom, 700),
            (BloomCommand::Toggle, 50),
            (BloomCommand::Bloom, 599),
            (BloomCommand::Reset, 600),
            (BloomCommand::Toggle, 601),
            (BloomCommand::Toggle, 0),
            (BloomCommand::Bloom, 1200),
        ];

        for (command, millis) in script {
            send(&mut app, command);
            advance(&mut app, millis);
            let (bloomed, visible) = state(&mut app);
            assert!(!visible || bloomed);
        }
    }
}
