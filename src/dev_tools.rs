//! Development tools for the app. This plugin is only enabled in dev builds.

use bevy::{
    dev_tools::fps_overlay::FpsOverlayPlugin,
    input::common_conditions::{input_just_pressed, input_toggle_active},
    prelude::*,
};
use bevy_inspector_egui::{
    bevy_egui::EguiPlugin,
    quick::{FilterQueryInspectorPlugin, WorldInspectorPlugin},
};

use crate::flower::{Flower, Petal};

const INSPECTOR_TOGGLE_KEY: KeyCode = KeyCode::Backquote;
const UI_DEBUG_TOGGLE_KEY: KeyCode = KeyCode::F1;

pub(super) fn plugin(app: &mut App) {
    // World inspector
    app.add_plugins((
        EguiPlugin::default(),
        WorldInspectorPlugin::default().run_if(input_toggle_active(true, INSPECTOR_TOGGLE_KEY)),
        FilterQueryInspectorPlugin::<With<Petal>>::new()
            .run_if(input_toggle_active(true, INSPECTOR_TOGGLE_KEY)),
    ));

    // Frame pacing overlay, useful when judging the bloom stagger.
    app.add_plugins(FpsOverlayPlugin::default());

    // Log bloom state transitions.
    app.add_systems(Update, log_bloom_transitions);

    // Toggle the debug overlay for UI.
    app.add_systems(
        Update,
        toggle_debug_ui.run_if(input_just_pressed(UI_DEBUG_TOGGLE_KEY)),
    );
}

fn log_bloom_transitions(flower: Single<Ref<Flower>>) {
    if flower.is_changed() && !flower.is_added() {
        info!("bloomed: {}", flower.bloomed);
    }
}

fn toggle_debug_ui(mut options: ResMut<UiDebugOptions>) {
    options.toggle();
}
