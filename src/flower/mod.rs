//! The flower widget: bloom state, the flower scene itself, and its overlay
//! UI.

mod bloom;
mod hud;
mod petal;
mod scene;

pub use bloom::Flower;
pub use scene::Petal;

use bevy::prelude::*;

pub(super) fn plugin(app: &mut App) {
    app.add_plugins((bloom::plugin, scene::plugin, hud::plugin));
}
