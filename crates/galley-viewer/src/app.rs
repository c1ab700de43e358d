//! Bevy application assembly

use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use bevy_picking::DefaultPickingPlugins;

use galley_core::Kitchen;
use galley_scene::{CameraRig, GalleyScenePlugin, KitchenLayout, SceneSettings};

use crate::config::ViewerConfig;
use crate::ui::UiPlugin;

/// Run the Bevy application
pub fn run(config: ViewerConfig, kitchen: Kitchen) {
    App::new()
        .insert_resource(ClearColor(Color::srgb(0.13, 0.14, 0.16))) // Dark slate background
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: config.window.title.clone(),
                resolution: (config.window.width as u32, config.window.height as u32).into(),
                ..default()
            }),
            ..default()
        }))
        // DefaultPickingPlugins provides core picking (PointerInputPlugin,
        // PickingPlugin, InteractionPlugin) and must be added BEFORE
        // EguiPlugin so it can detect PickingPlugin
        .add_plugins(DefaultPickingPlugins)
        .add_plugins(EguiPlugin::default())
        .insert_resource(KitchenLayout(kitchen))
        .insert_resource(CameraRig {
            target: Vec3::from_array(config.camera.target),
            azimuth: config.camera.azimuth,
            elevation: config.camera.elevation,
            view_height: config.camera.view_height,
            ..Default::default()
        })
        .insert_resource(SceneSettings {
            show_grid: config.scene.show_grid,
            show_axes: config.scene.show_axes,
        })
        .add_plugins(GalleyScenePlugin)
        .add_plugins(UiPlugin)
        .run();
}
