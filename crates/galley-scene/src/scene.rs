//! Scene environment: lighting and world helpers
//!
//! The kitchen itself comes from the layout; this module adds what every
//! scene needs regardless of content — lights, plus an optional floor
//! grid and world axes for orientation while authoring layouts.

use bevy::prelude::*;
use bevy::render::alpha::AlphaMode;

use crate::types::SceneSettings;

pub struct EnvironmentPlugin;

impl Plugin for EnvironmentPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneSettings>()
            .add_systems(Startup, setup_environment)
            .add_systems(Update, update_helper_visibility);
    }
}

/// Marker for grid lines
#[derive(Component)]
pub struct GridLine;

/// Marker for the world axis helpers
#[derive(Component)]
pub struct WorldAxis;

fn setup_environment(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<SceneSettings>,
) {
    // Soft ambient so shadowed faces stay readable
    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.95, 0.95, 1.0),
        brightness: 180.0,
        ..default()
    });

    // Key light, angled like late-morning window light
    commands.spawn((
        DirectionalLight {
            illuminance: 6500.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 7.0, 3.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Warm fill from the room side, no shadows
    commands.spawn((
        PointLight {
            intensity: 150_000.0,
            shadows_enabled: false,
            color: Color::srgb(1.0, 0.93, 0.85),
            ..default()
        },
        Transform::from_xyz(-2.0, 2.6, 2.5),
    ));

    // Floor grid on the X-Z plane, just above the floor surface
    let grid_size = 8;
    let grid_spacing = 0.5;
    let grid_extent = grid_size as f32 * grid_spacing;
    let thickness = 0.01;

    let initial_visibility = if settings.show_grid {
        Visibility::Visible
    } else {
        Visibility::Hidden
    };

    let line_material = materials.add(StandardMaterial {
        base_color: Color::srgba(0.4, 0.4, 0.4, 0.5),
        unlit: true,
        alpha_mode: AlphaMode::Blend,
        ..default()
    });

    let line_mesh_x = meshes.add(Cuboid::new(grid_extent * 2.0, thickness, thickness));
    let line_mesh_z = meshes.add(Cuboid::new(thickness, thickness, grid_extent * 2.0));

    // Lines parallel to X (varying Z)
    for i in -grid_size..=grid_size {
        let z = i as f32 * grid_spacing;
        commands.spawn((
            Mesh3d(line_mesh_x.clone()),
            MeshMaterial3d(line_material.clone()),
            Transform::from_translation(Vec3::new(0.0, 0.005, z)),
            GridLine,
            initial_visibility,
        ));
    }

    // Lines parallel to Z (varying X)
    for i in -grid_size..=grid_size {
        let x = i as f32 * grid_spacing;
        commands.spawn((
            Mesh3d(line_mesh_z.clone()),
            MeshMaterial3d(line_material.clone()),
            Transform::from_translation(Vec3::new(x, 0.005, 0.0)),
            GridLine,
            initial_visibility,
        ));
    }

    let axis_visibility = if settings.show_axes {
        Visibility::Visible
    } else {
        Visibility::Hidden
    };

    let axis_length = 0.5;
    let axis_thickness = 0.006;
    let cone_height = axis_thickness * 5.0;
    let cone_radius = axis_thickness * 2.5;

    // X axis, red; cylinders are Y-aligned, so rotate -90 around Z
    let x_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.9, 0.2, 0.2),
        unlit: true,
        ..default()
    });
    commands.spawn((
        Mesh3d(meshes.add(Cylinder::new(axis_thickness, axis_length))),
        MeshMaterial3d(x_material.clone()),
        Transform::from_translation(Vec3::new(axis_length / 2.0, 0.01, 0.0))
            .with_rotation(Quat::from_rotation_z(-std::f32::consts::FRAC_PI_2)),
        WorldAxis,
        axis_visibility,
    ));
    commands.spawn((
        Mesh3d(meshes.add(Cone::new(cone_radius, cone_height))),
        MeshMaterial3d(x_material),
        Transform::from_translation(Vec3::new(axis_length + cone_height / 2.0, 0.01, 0.0))
            .with_rotation(Quat::from_rotation_z(-std::f32::consts::FRAC_PI_2)),
        WorldAxis,
        axis_visibility,
    ));

    // Y axis, green; already Y-aligned
    let y_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.2, 0.9, 0.2),
        unlit: true,
        ..default()
    });
    commands.spawn((
        Mesh3d(meshes.add(Cylinder::new(axis_thickness, axis_length))),
        MeshMaterial3d(y_material.clone()),
        Transform::from_translation(Vec3::new(0.0, axis_length / 2.0 + 0.01, 0.0)),
        WorldAxis,
        axis_visibility,
    ));
    commands.spawn((
        Mesh3d(meshes.add(Cone::new(cone_radius, cone_height))),
        MeshMaterial3d(y_material),
        Transform::from_translation(Vec3::new(0.0, axis_length + cone_height / 2.0 + 0.01, 0.0)),
        WorldAxis,
        axis_visibility,
    ));

    // Z axis, blue; rotate +90 around X
    let z_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.2, 0.2, 0.9),
        unlit: true,
        ..default()
    });
    commands.spawn((
        Mesh3d(meshes.add(Cylinder::new(axis_thickness, axis_length))),
        MeshMaterial3d(z_material.clone()),
        Transform::from_translation(Vec3::new(0.0, 0.01, axis_length / 2.0))
            .with_rotation(Quat::from_rotation_x(std::f32::consts::FRAC_PI_2)),
        WorldAxis,
        axis_visibility,
    ));
    commands.spawn((
        Mesh3d(meshes.add(Cone::new(cone_radius, cone_height))),
        MeshMaterial3d(z_material),
        Transform::from_translation(Vec3::new(0.0, 0.01, axis_length + cone_height / 2.0))
            .with_rotation(Quat::from_rotation_x(std::f32::consts::FRAC_PI_2)),
        WorldAxis,
        axis_visibility,
    ));
}

fn update_helper_visibility(
    settings: Res<SceneSettings>,
    mut grid_query: Query<&mut Visibility, (With<GridLine>, Without<WorldAxis>)>,
    mut axis_query: Query<&mut Visibility, With<WorldAxis>>,
) {
    if !settings.is_changed() {
        return;
    }

    let grid_visibility = if settings.show_grid {
        Visibility::Visible
    } else {
        Visibility::Hidden
    };
    for mut visibility in grid_query.iter_mut() {
        *visibility = grid_visibility;
    }

    let axis_visibility = if settings.show_axes {
        Visibility::Visible
    } else {
        Visibility::Hidden
    };
    for mut visibility in axis_query.iter_mut() {
        *visibility = axis_visibility;
    }
}
