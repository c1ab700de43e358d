//! Click picking: ray construction, bounds intersection, and resolution
//!
//! A click maps to at most one component tag. The cursor becomes a
//! normalized device coordinate, the coordinate becomes an orthographic
//! ray, the ray is tested against every visible entity's bounds, and the
//! nearest hit that carries a tag itself or on its immediate parent
//! wins. Untagged geometry never blocks a pick; it is filtered out of
//! the candidate list, not treated as an occluder.

use bevy::prelude::*;
use tracing::debug;

use galley_core::Shape;

use crate::camera::{CameraRig, MainCamera};
use crate::types::{ComponentTag, SelectedComponent};

pub struct PickPlugin;

impl Plugin for PickPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (handle_click, handle_dismiss));
    }
}

/// Axis-aligned bounding box in entity-local space, used for hit tests
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct PickBounds {
    pub half_extents: Vec3,
}

impl PickBounds {
    pub fn new(half_extents: Vec3) -> Self {
        Self { half_extents }
    }

    /// Bounds enclosing a layout shape
    pub fn for_shape(shape: &Shape) -> Self {
        let half_extents = match *shape {
            Shape::Box { size } => Vec3::new(
                size[0] as f32 / 2.0,
                size[1] as f32 / 2.0,
                size[2] as f32 / 2.0,
            ),
            Shape::Cylinder { radius, length } => {
                Vec3::new(radius as f32, length as f32 / 2.0, radius as f32)
            }
            Shape::Sphere { radius } => Vec3::splat(radius as f32),
            Shape::Cone { radius, length } => {
                Vec3::new(radius as f32, length as f32 / 2.0, radius as f32)
            }
        };
        Self { half_extents }
    }
}

/// Convert a cursor position (top-left origin, y down) into normalized
/// device coordinates: x in [-1, 1] left to right, y in [-1, 1] bottom
/// to top. Note the vertical flip.
pub fn cursor_to_ndc(cursor: Vec2, viewport: Vec2) -> Vec2 {
    Vec2::new(
        (cursor.x / viewport.x) * 2.0 - 1.0,
        1.0 - (cursor.y / viewport.y) * 2.0,
    )
}

/// Build the pick ray for a normalized device coordinate. For an
/// orthographic camera the origin shifts along the camera's right/up
/// axes by the frustum half extents and the direction is always the
/// camera's forward axis. Coordinates outside [-1, 1] produce a valid
/// ray that simply passes outside the frustum.
pub fn ortho_pick_ray(ndc: Vec2, half_extents: Vec2, camera: &GlobalTransform) -> Ray3d {
    let origin = camera.translation()
        + camera.right() * (ndc.x * half_extents.x)
        + camera.up() * (ndc.y * half_extents.y);
    Ray3d::new(origin, camera.forward())
}

/// Slab-test the ray against an entity's local-space bounds, reporting
/// the world-space distance from the ray origin to the entry point
pub fn ray_box_distance(
    ray: &Ray3d,
    bounds: &PickBounds,
    transform: &GlobalTransform,
) -> Option<f32> {
    let affine = transform.affine();
    let inverse = affine.inverse();
    let origin = inverse.transform_point3(ray.origin);
    let dir = inverse.transform_vector3(*ray.direction);

    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;
    for axis in 0..3 {
        let o = origin[axis];
        let d = dir[axis];
        let h = bounds.half_extents[axis];
        if d.abs() < 1e-8 {
            // Parallel to the slab: inside or no hit at all
            if o.abs() > h {
                return None;
            }
        } else {
            let mut t0 = (-h - o) / d;
            let mut t1 = (h - o) / d;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return None;
            }
        }
    }
    if t_max < 0.0 {
        return None;
    }

    // Distances are measured in world space so non-uniform scale cannot
    // distort the ordering
    let hit_local = origin + dir * t_min.max(0.0);
    let hit_world = affine.transform_point3(hit_local);
    Some(hit_world.distance(ray.origin))
}

/// One intersected entity with the tag context resolution needs
#[derive(Debug, Clone)]
pub struct PickCandidate {
    pub distance: f32,
    pub tag: Option<ComponentTag>,
    pub parent_tag: Option<ComponentTag>,
}

/// Query row for hit-testable entities
pub type PickTargets<'w, 's> = Query<
    'w,
    's,
    (
        &'static GlobalTransform,
        &'static PickBounds,
        &'static InheritedVisibility,
        Option<&'static ComponentTag>,
        Option<&'static ChildOf>,
    ),
>;

/// Intersect the ray against every visible hit-testable entity. Hidden
/// entities (including inherited hiddenness) never intersect. Only the
/// immediate parent is consulted for the fallback tag.
pub fn collect_candidates(
    ray: &Ray3d,
    targets: &PickTargets,
    tags: &Query<&ComponentTag>,
) -> Vec<PickCandidate> {
    let mut candidates = Vec::new();
    for (transform, bounds, visibility, tag, child_of) in targets.iter() {
        if !visibility.get() {
            continue;
        }
        let Some(distance) = ray_box_distance(ray, bounds, transform) else {
            continue;
        };
        let parent_tag = child_of.and_then(|c| tags.get(c.0).ok());
        candidates.push(PickCandidate {
            distance,
            tag: tag.cloned(),
            parent_tag: parent_tag.cloned(),
        });
    }
    candidates
}

/// Resolve the candidates to at most one tag: nearest candidate that
/// carries a tag itself or on its immediate parent; the candidate's own
/// tag is preferred over its parent's. A tagged grandparent does not
/// qualify — the fallback is exactly one level.
pub fn resolve_candidates(mut candidates: Vec<PickCandidate>) -> Option<ComponentTag> {
    candidates.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    candidates
        .into_iter()
        .find(|c| c.tag.is_some() || c.parent_tag.is_some())
        .and_then(|c| c.tag.or(c.parent_tag))
}

/// Resolve left clicks against the scene and update the selection.
/// A miss clears the selection; clicks over UI panels belong to the UI.
fn handle_click(
    mut selected: ResMut<SelectedComponent>,
    rig: Res<CameraRig>,
    camera_query: Query<&GlobalTransform, With<MainCamera>>,
    targets: PickTargets,
    tags: Query<&ComponentTag>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    mut contexts: bevy_egui::EguiContexts,
) {
    if !mouse_button.just_pressed(MouseButton::Left) {
        return;
    }
    if let Ok(ctx) = contexts.ctx_mut() {
        if ctx.wants_pointer_input() {
            return;
        }
    }

    let Ok(window) = windows.single() else { return };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let Ok(camera_transform) = camera_query.single() else {
        return;
    };

    let viewport = Vec2::new(window.width(), window.height());
    let aspect = if viewport.y > 0.0 {
        viewport.x / viewport.y
    } else {
        1.0
    };
    let ndc = cursor_to_ndc(cursor, viewport);
    let ray = ortho_pick_ray(ndc, rig.half_extents(aspect), camera_transform);

    let candidates = collect_candidates(&ray, &targets, &tags);
    match resolve_candidates(candidates) {
        Some(tag) => {
            debug!("Click resolved to component '{}'", tag.name);
            selected.0 = Some(tag);
        }
        None => {
            selected.0 = None;
        }
    }
}

/// Escape clears the current selection
fn handle_dismiss(mut selected: ResMut<SelectedComponent>, keyboard: Res<ButtonInput<KeyCode>>) {
    if keyboard.just_pressed(KeyCode::Escape) {
        selected.0 = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::SystemState;

    fn tag(name: &str) -> ComponentTag {
        ComponentTag {
            name: name.to_string(),
            details: String::new(),
            specs: String::new(),
        }
    }

    /// Camera at +10 on Z looking at the origin, as a GlobalTransform
    fn test_camera() -> GlobalTransform {
        GlobalTransform::from(
            Transform::from_xyz(0.0, 0.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
        )
    }

    /// Ray through the center of the viewport
    fn center_ray() -> Ray3d {
        ortho_pick_ray(Vec2::ZERO, Vec2::new(4.0, 3.0), &test_camera())
    }

    fn run_pick(world: &mut World, ray: &Ray3d) -> Option<ComponentTag> {
        let mut state: SystemState<(PickTargets, Query<&ComponentTag>)> = SystemState::new(world);
        let (targets, tags) = state.get(world);
        resolve_candidates(collect_candidates(ray, &targets, &tags))
    }

    #[test]
    fn cursor_to_ndc_flips_vertically() {
        let viewport = Vec2::new(800.0, 600.0);

        // Top-left of the screen is (-1, 1) in NDC
        assert_eq!(cursor_to_ndc(Vec2::ZERO, viewport), Vec2::new(-1.0, 1.0));
        // Bottom-right is (1, -1)
        assert_eq!(
            cursor_to_ndc(Vec2::new(800.0, 600.0), viewport),
            Vec2::new(1.0, -1.0)
        );
        // Center maps to the origin
        assert_eq!(cursor_to_ndc(Vec2::new(400.0, 300.0), viewport), Vec2::ZERO);
    }

    #[test]
    fn ortho_ray_offsets_origin_not_direction() {
        let camera = test_camera();
        let half = Vec2::new(4.0, 3.0);

        let center = ortho_pick_ray(Vec2::ZERO, half, &camera);
        assert!((center.origin - Vec3::new(0.0, 0.0, 10.0)).length() < 1e-5);

        let corner = ortho_pick_ray(Vec2::new(1.0, 1.0), half, &camera);
        assert!((corner.origin - Vec3::new(4.0, 3.0, 10.0)).length() < 1e-5);

        // Direction is the camera forward axis in both cases
        assert!((*center.direction - Vec3::NEG_Z).length() < 1e-5);
        assert!((*corner.direction - *center.direction).length() < 1e-6);
    }

    #[test]
    fn ray_box_hits_and_misses() {
        let ray = center_ray();
        let unit = PickBounds::new(Vec3::splat(0.5));

        // Box at the origin: entry face is half an extent in front of it
        let at_origin = GlobalTransform::from(Transform::IDENTITY);
        let d = ray_box_distance(&ray, &unit, &at_origin).unwrap();
        assert!((d - 9.5).abs() < 1e-4);

        // Box off to the side misses
        let offset = GlobalTransform::from(Transform::from_xyz(3.0, 0.0, 0.0));
        assert!(ray_box_distance(&ray, &unit, &offset).is_none());

        // Box behind the camera misses
        let behind = GlobalTransform::from(Transform::from_xyz(0.0, 0.0, 20.0));
        assert!(ray_box_distance(&ray, &unit, &behind).is_none());

        // Scaled box still reports world-space distance to its surface
        let scaled = GlobalTransform::from(
            Transform::from_xyz(0.0, 0.0, 0.0).with_scale(Vec3::new(1.0, 1.0, 4.0)),
        );
        let d = ray_box_distance(&ray, &unit, &scaled).unwrap();
        assert!((d - 8.0).abs() < 1e-4);
    }

    #[test]
    fn out_of_range_coordinates_miss_everything() {
        let camera = test_camera();
        let ray = ortho_pick_ray(Vec2::new(2.5, 0.0), Vec2::new(4.0, 3.0), &camera);
        let unit = PickBounds::new(Vec3::splat(0.5));

        // The scene box sits inside the frustum; a coordinate outside
        // [-1, 1] starts the ray beyond it and resolves to nothing
        let at_origin = GlobalTransform::from(Transform::IDENTITY);
        assert!(ray_box_distance(&ray, &unit, &at_origin).is_none());
        assert!(resolve_candidates(Vec::new()).is_none());
    }

    #[test]
    fn empty_scene_resolves_to_none() {
        let mut world = World::new();
        assert!(run_pick(&mut world, &center_ray()).is_none());
    }

    #[test]
    fn direct_hit_prefers_own_tag_over_parent() {
        let mut world = World::new();
        let parent = world
            .spawn((GlobalTransform::IDENTITY, tag("Counter")))
            .id();
        world.spawn((
            GlobalTransform::from(Transform::from_xyz(0.0, 0.0, 2.0)),
            PickBounds::new(Vec3::splat(0.5)),
            InheritedVisibility::VISIBLE,
            tag("Sink"),
            ChildOf(parent),
        ));

        let resolved = run_pick(&mut world, &center_ray()).unwrap();
        assert_eq!(resolved.name, "Sink");
    }

    #[test]
    fn untagged_child_falls_back_to_parent_tag() {
        let mut world = World::new();
        let group = world.spawn((GlobalTransform::IDENTITY, tag("Door"))).id();
        world.spawn((
            GlobalTransform::from(Transform::from_xyz(0.0, 0.0, 1.0)),
            PickBounds::new(Vec3::splat(0.5)),
            InheritedVisibility::VISIBLE,
            ChildOf(group),
        ));

        let resolved = run_pick(&mut world, &center_ray()).unwrap();
        assert_eq!(resolved.name, "Door");
    }

    #[test]
    fn grandparent_tag_does_not_resolve() {
        let mut world = World::new();
        let grandparent = world
            .spawn((GlobalTransform::IDENTITY, tag("Pantry")))
            .id();
        let parent = world
            .spawn((GlobalTransform::IDENTITY, ChildOf(grandparent)))
            .id();
        world.spawn((
            GlobalTransform::from(Transform::from_xyz(0.0, 0.0, 1.0)),
            PickBounds::new(Vec3::splat(0.5)),
            InheritedVisibility::VISIBLE,
            ChildOf(parent),
        ));

        // The fallback is exactly one level; a tagged grandparent is out
        // of reach and the click resolves to nothing
        assert!(run_pick(&mut world, &center_ray()).is_none());
    }

    #[test]
    fn invisible_entities_never_intersect() {
        let mut world = World::new();
        let group = world.spawn((GlobalTransform::IDENTITY, tag("Door"))).id();

        // Invisible tag holder sits nearer to the camera than the panel
        world.spawn((
            GlobalTransform::from(Transform::from_xyz(0.0, 0.0, 3.0)),
            PickBounds::new(Vec3::splat(1.0)),
            InheritedVisibility::HIDDEN,
            tag("Door"),
            ChildOf(group),
        ));
        // Visible untagged sibling panel
        world.spawn((
            GlobalTransform::from(Transform::from_xyz(0.0, 0.0, 0.0)),
            PickBounds::new(Vec3::splat(0.5)),
            InheritedVisibility::VISIBLE,
            ChildOf(group),
        ));

        // The sibling hit resolves through the group's tag, exactly as
        // if the holder had been struck
        let resolved = run_pick(&mut world, &center_ray()).unwrap();
        assert_eq!(resolved.name, "Door");

        // With the sibling gone, only the hidden holder remains and the
        // click resolves to nothing
        let mut world = World::new();
        let group = world.spawn((GlobalTransform::IDENTITY, tag("Door"))).id();
        world.spawn((
            GlobalTransform::from(Transform::from_xyz(0.0, 0.0, 3.0)),
            PickBounds::new(Vec3::splat(1.0)),
            InheritedVisibility::HIDDEN,
            tag("Door"),
            ChildOf(group),
        ));
        assert!(run_pick(&mut world, &center_ray()).is_none());
    }

    #[test]
    fn untagged_geometry_does_not_occlude() {
        let mut world = World::new();
        // Decorative pane in front of the kettle, no tag anywhere near it
        world.spawn((
            GlobalTransform::from(Transform::from_xyz(0.0, 0.0, 5.0)),
            PickBounds::new(Vec3::new(2.0, 2.0, 0.05)),
            InheritedVisibility::VISIBLE,
        ));
        world.spawn((
            GlobalTransform::IDENTITY,
            PickBounds::new(Vec3::splat(0.5)),
            InheritedVisibility::VISIBLE,
            tag("Kettle"),
        ));

        // The untagged pane is filtered out, not treated as an occluder
        let resolved = run_pick(&mut world, &center_ray()).unwrap();
        assert_eq!(resolved.name, "Kettle");

        // Decor alone on the ray resolves to nothing
        let mut world = World::new();
        world.spawn((
            GlobalTransform::from(Transform::from_xyz(0.0, 0.0, 5.0)),
            PickBounds::new(Vec3::new(2.0, 2.0, 0.05)),
            InheritedVisibility::VISIBLE,
        ));
        assert!(run_pick(&mut world, &center_ray()).is_none());
    }

    #[test]
    fn nearest_tagged_candidate_wins() {
        let kettle = ComponentTag {
            name: "Kettle".to_string(),
            details: "Electric kettle.".to_string(),
            specs: "Color: Blue".to_string(),
        };

        let mut world = World::new();
        world.spawn((
            GlobalTransform::from(Transform::from_xyz(0.0, 0.0, 4.0)),
            PickBounds::new(Vec3::splat(0.3)),
            InheritedVisibility::VISIBLE,
            kettle.clone(),
        ));
        world.spawn((
            GlobalTransform::from(Transform::from_xyz(0.0, 0.0, 1.0)),
            PickBounds::new(Vec3::splat(0.5)),
            InheritedVisibility::VISIBLE,
            tag("Counter"),
        ));
        world.spawn((
            GlobalTransform::from(Transform::from_xyz(0.0, 0.0, -2.0)),
            PickBounds::new(Vec3::splat(0.5)),
            InheritedVisibility::VISIBLE,
            tag("Wall cabinet"),
        ));

        // Three candidates on the ray; the kettle is nearest and wins
        // with its fields intact
        let resolved = run_pick(&mut world, &center_ray()).unwrap();
        assert_eq!(resolved, kettle);
        assert_eq!(resolved.specs_line(), "Specifications: Color: Blue");
    }

    #[test]
    fn selection_follows_resolution_and_stays_idempotent() {
        let mut selected = SelectedComponent::default();
        assert_eq!(selected, SelectedComponent(None));

        let kettle = ComponentTag {
            name: "Kettle".to_string(),
            details: "Electric kettle.".to_string(),
            specs: "Color: Blue".to_string(),
        };

        // A resolved pick shows the component
        selected.0 = Some(kettle.clone());
        let shown = selected.clone();

        // Repeating the identical pick leaves the state and the derived
        // display text unchanged
        selected.0 = Some(kettle.clone());
        assert_eq!(selected, shown);
        let tag = selected.0.as_ref().unwrap();
        assert_eq!(
            (tag.name.as_str(), tag.details.as_str(), tag.specs_line()),
            ("Kettle", "Electric kettle.", "Specifications: Color: Blue".to_string())
        );

        // A miss empties the state regardless of what was shown before
        selected.0 = None;
        assert_eq!(selected, SelectedComponent(None));
    }
}
