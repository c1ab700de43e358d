//! Orthographic camera rig
//!
//! The rig resource is the single source of truth for the camera: orbit
//! angles and focus for placement, plus the world-space height of the
//! symmetric view frustum. Rendering reads it through the `Projection`
//! written here; picking reads it directly, so both always agree.

use bevy::camera::ScalingMode;
use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::prelude::*;
use bevy::window::WindowResized;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraRig>()
            .add_systems(Startup, setup_camera)
            .add_systems(Update, (orbit_camera, apply_rig).chain());
    }
}

/// Marker component for the main camera
#[derive(Component)]
pub struct MainCamera;

/// Camera placement and frustum parameters
#[derive(Resource, Debug, Clone)]
pub struct CameraRig {
    /// Focus point the camera orbits and looks at
    pub target: Vec3,
    /// Angle around +Y, measured from +Z toward +X (radians)
    pub azimuth: f32,
    /// Angle above the ground plane (radians)
    pub elevation: f32,
    /// Distance of the camera point from the target; placement only,
    /// apparent size comes from `view_height`
    pub distance: f32,
    /// World-space height of the visible frustum (orthographic zoom)
    pub view_height: f32,
    pub sensitivity: f32,
    pub zoom_speed: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            target: Vec3::new(0.0, 1.0, 0.0),
            azimuth: std::f32::consts::FRAC_PI_4,
            elevation: 0.55,
            distance: 14.0,
            view_height: 4.5,
            sensitivity: 0.005,
            zoom_speed: 0.1,
        }
    }
}

impl CameraRig {
    /// Camera position for the current orbit angles
    pub fn eye(&self) -> Vec3 {
        let x = self.distance * self.elevation.cos() * self.azimuth.sin();
        let y = self.distance * self.elevation.sin();
        let z = self.distance * self.elevation.cos() * self.azimuth.cos();
        self.target + Vec3::new(x, y, z)
    }

    /// Half extents (width, height) of the frustum for a viewport aspect
    pub fn half_extents(&self, aspect: f32) -> Vec2 {
        let half_height = self.view_height * 0.5;
        Vec2::new(half_height * aspect, half_height)
    }

    /// Symmetric orthographic projection for a viewport of the given
    /// pixel size: the view height is fixed, the width follows the
    /// aspect ratio
    pub fn projection(&self, width: f32, height: f32) -> OrthographicProjection {
        let aspect = if height > 0.0 { width / height } else { 1.0 };
        let half = self.half_extents(aspect);
        OrthographicProjection {
            far: 100.0,
            scaling_mode: ScalingMode::Fixed {
                width: half.x * 2.0,
                height: half.y * 2.0,
            },
            ..OrthographicProjection::default_3d()
        }
    }
}

fn setup_camera(mut commands: Commands, rig: Res<CameraRig>, windows: Query<&Window>) {
    let (width, height) = match windows.single() {
        Ok(window) => (window.width(), window.height()),
        Err(_) => (1280.0, 720.0),
    };

    commands.spawn((
        Camera3d::default(),
        Projection::from(rig.projection(width, height)),
        Transform::from_translation(rig.eye()).looking_at(rig.target, Vec3::Y),
        MainCamera,
    ));
}

/// Orbit with right drag (left clicks belong to picking), zoom with the
/// scroll wheel. Zooming an orthographic camera scales the frustum
/// height, not the distance.
fn orbit_camera(
    mut rig: ResMut<CameraRig>,
    mut mouse_motion: MessageReader<MouseMotion>,
    mut mouse_wheel: MessageReader<MouseWheel>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut contexts: bevy_egui::EguiContexts,
) {
    let egui_wants_pointer = contexts
        .ctx_mut()
        .map(|ctx| ctx.wants_pointer_input())
        .unwrap_or(false);

    let mut total_motion = Vec2::ZERO;
    for motion in mouse_motion.read() {
        total_motion += motion.delta;
    }

    if mouse_button.pressed(MouseButton::Right) && !egui_wants_pointer && total_motion != Vec2::ZERO
    {
        rig.azimuth -= total_motion.x * rig.sensitivity;
        rig.elevation = (rig.elevation - total_motion.y * rig.sensitivity).clamp(0.05, 1.5);
    }

    if !egui_wants_pointer {
        for scroll in mouse_wheel.read() {
            let zoom_factor = 1.0 - scroll.y * rig.zoom_speed * 0.3;
            rig.view_height = (rig.view_height * zoom_factor).clamp(1.0, 14.0);
        }
    } else {
        // Drain the scroll events even if the UI consumed them
        for _ in mouse_wheel.read() {}
    }
}

/// Write the rig to the camera whenever the rig changes or the window is
/// resized. Resizing keeps the view height and recenters the frustum on
/// the new aspect ratio.
fn apply_rig(
    rig: Res<CameraRig>,
    mut resize_events: MessageReader<WindowResized>,
    windows: Query<&Window>,
    mut camera: Query<(&mut Transform, &mut Projection), With<MainCamera>>,
) {
    let resized = resize_events.read().last().is_some();
    if !rig.is_changed() && !resized {
        return;
    }

    let Ok(window) = windows.single() else { return };
    let Ok((mut transform, mut projection)) = camera.single_mut() else {
        return;
    };

    *transform = Transform::from_translation(rig.eye()).looking_at(rig.target, Vec3::Y);
    *projection = Projection::from(rig.projection(window.width(), window.height()));
}
