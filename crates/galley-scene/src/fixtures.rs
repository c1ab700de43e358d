//! Fixture and decor spawning
//!
//! Turns a parsed KSL layout into entities once at startup. Fixtures
//! become pickable tagged entities; decor becomes plain geometry that is
//! hit-tested but never resolves a click.
//!
//! A single-part fixture is one mesh entity carrying its tag directly.
//! A multi-part fixture is a group: untagged part meshes as children,
//! plus an invisible tag-holder child sized to enclose the parts, with
//! the holder's tag copied onto the group root. This keeps tagging a
//! per-node property while letting a compound object act as one
//! pickable thing.

use bevy::prelude::*;
use tracing::info;

use galley_core::{parse_hex_color, Decor, Fixture, Kitchen, Part, Pose, Shape};

use crate::pick::PickBounds;
use crate::types::{ComponentTag, FixtureEntity};

/// Parsed layout handed to the scene at startup
#[derive(Resource, Debug, Clone)]
pub struct KitchenLayout(pub Kitchen);

pub struct FixturesPlugin;

impl Plugin for FixturesPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_layout);
    }
}

fn spawn_layout(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    layout: Res<KitchenLayout>,
) {
    for fixture in &layout.0.fixture {
        spawn_fixture(&mut commands, &mut meshes, &mut materials, fixture);
    }
    for decor in &layout.0.decor {
        spawn_decor(&mut commands, &mut meshes, &mut materials, decor);
    }
    info!(
        "Spawned {} fixtures and {} decor entries",
        layout.0.fixture.len(),
        layout.0.decor.len()
    );
}

/// Convert an optional pose into a transform (meters, XYZ Euler radians)
fn pose_transform(pose: Option<Pose>) -> Transform {
    match pose {
        Some(p) => Transform {
            translation: Vec3::new(p.x as f32, p.y as f32, p.z as f32),
            rotation: Quat::from_euler(
                EulerRot::XYZ,
                p.roll as f32,
                p.pitch as f32,
                p.yaw as f32,
            ),
            ..default()
        },
        None => Transform::IDENTITY,
    }
}

fn shape_mesh(shape: &Shape) -> Mesh {
    match *shape {
        Shape::Box { size } => {
            Mesh::from(Cuboid::new(size[0] as f32, size[1] as f32, size[2] as f32))
        }
        Shape::Cylinder { radius, length } => {
            Mesh::from(Cylinder::new(radius as f32, length as f32))
        }
        Shape::Sphere { radius } => Mesh::from(Sphere::new(radius as f32)),
        Shape::Cone { radius, length } => Mesh::from(Cone::new(radius as f32, length as f32)),
    }
}

fn part_material(part: &Part) -> StandardMaterial {
    let rgb = part
        .color
        .as_deref()
        .and_then(parse_hex_color)
        .unwrap_or([0.62, 0.62, 0.62]);
    StandardMaterial {
        base_color: Color::srgb(rgb[0], rgb[1], rgb[2]),
        perceptual_roughness: 0.8,
        metallic: 0.05,
        ..default()
    }
}

/// Box enclosing all parts in group-local space (center, half extents).
/// Part rotations are ignored; the holder only needs rough coverage.
fn enclosing_bounds(parts: &[(&Part, Shape)]) -> Option<(Vec3, Vec3)> {
    let mut min = Vec3::INFINITY;
    let mut max = Vec3::NEG_INFINITY;
    for (part, shape) in parts {
        let center = pose_transform(part.parse_pose()).translation;
        let half = PickBounds::for_shape(shape).half_extents;
        min = min.min(center - half);
        max = max.max(center + half);
    }
    if min.x > max.x {
        return None;
    }
    Some(((min + max) * 0.5, (max - min) * 0.5))
}

fn spawn_fixture(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    fixture: &Fixture,
) -> Entity {
    let tag = ComponentTag::from_fixture(fixture);
    let root_transform = pose_transform(fixture.parse_pose());

    let parts: Vec<(&Part, Shape)> = fixture
        .part
        .iter()
        .filter_map(|p| p.shape().map(|s| (p, s)))
        .collect();

    if parts.len() == 1 {
        let (part, shape) = &parts[0];
        // One mesh: fold the part pose into the root and tag it directly
        let transform = root_transform * pose_transform(part.parse_pose());
        return commands
            .spawn((
                Mesh3d(meshes.add(shape_mesh(shape))),
                MeshMaterial3d(materials.add(part_material(part))),
                transform,
                PickBounds::for_shape(shape),
                tag,
                FixtureEntity,
            ))
            .id();
    }

    let group = commands
        .spawn((root_transform, Visibility::default(), FixtureEntity))
        .id();

    for (part, shape) in &parts {
        let child = commands
            .spawn((
                Mesh3d(meshes.add(shape_mesh(shape))),
                MeshMaterial3d(materials.add(part_material(part))),
                pose_transform(part.parse_pose()),
                PickBounds::for_shape(shape),
            ))
            .id();
        commands.entity(group).add_child(child);
    }

    // Invisible tag holder covering the whole group. Hidden visibility
    // keeps it out of hit-testing; its tag is copied onto the group root
    // so part hits resolve through the parent.
    if let Some((center, half_extents)) = enclosing_bounds(&parts) {
        let holder = commands
            .spawn((
                Transform::from_translation(center),
                Visibility::Hidden,
                PickBounds { half_extents },
                tag.clone(),
            ))
            .id();
        commands.entity(group).add_child(holder);
    }
    commands.entity(group).insert(tag);

    group
}

fn spawn_decor(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    decor: &Decor,
) -> Entity {
    let root = commands
        .spawn((pose_transform(decor.parse_pose()), Visibility::default()))
        .id();

    for part in &decor.part {
        let Some(shape) = part.shape() else { continue };
        // Decor is hit-tested like everything else but carries no tag,
        // so it can never resolve a click
        let child = commands
            .spawn((
                Mesh3d(meshes.add(shape_mesh(&shape))),
                MeshMaterial3d(materials.add(part_material(part))),
                pose_transform(part.parse_pose()),
                PickBounds::for_shape(&shape),
            ))
            .id();
        commands.entity(root).add_child(child);
    }

    root
}
