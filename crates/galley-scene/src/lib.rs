//! Galley Scene - pickable 3D scene graph for the kitchen showroom
//!
//! This crate turns a parsed KSL layout into Bevy entities and owns the
//! click-to-inspect mechanism:
//! - Component tags attached to pickable fixtures (typed metadata)
//! - Ray/bounds click resolution with one level of parent fallback
//! - The selected-component resource driving the details panel
//! - The orthographic camera rig, lights, and world helpers

pub mod camera;
pub mod fixtures;
pub mod pick;
pub mod scene;
pub mod types;

pub use camera::{CameraRig, MainCamera};
pub use fixtures::KitchenLayout;
pub use pick::PickBounds;
pub use types::{ComponentTag, FixtureEntity, SceneSettings, SelectedComponent};

use bevy::prelude::*;

/// Top-level plugin wiring the scene crate into an app
pub struct GalleyScenePlugin;

impl Plugin for GalleyScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SelectedComponent>()
            .add_plugins(camera::CameraPlugin)
            .add_plugins(scene::EnvironmentPlugin)
            .add_plugins(fixtures::FixturesPlugin)
            .add_plugins(pick::PickPlugin);
    }
}
