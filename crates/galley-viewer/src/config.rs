//! Configuration loading and validation

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ViewerConfig {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub scene: SceneConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window title
    #[serde(default = "default_title")]
    pub title: String,
    /// Initial window width in logical pixels
    #[serde(default = "default_width")]
    pub width: f32,
    /// Initial window height in logical pixels
    #[serde(default = "default_height")]
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            width: default_width(),
            height: default_height(),
        }
    }
}

fn default_title() -> String {
    "Galley Kitchen Viewer".to_string()
}

fn default_width() -> f32 {
    1280.0
}

fn default_height() -> f32 {
    720.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    /// World-space height of the visible area in meters
    #[serde(default = "default_view_height")]
    pub view_height: f32,
    /// Starting orbit angle around the vertical axis (radians)
    #[serde(default = "default_azimuth")]
    pub azimuth: f32,
    /// Starting angle above the floor plane (radians)
    #[serde(default = "default_elevation")]
    pub elevation: f32,
    /// Point the camera looks at
    #[serde(default = "default_target")]
    pub target: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            view_height: default_view_height(),
            azimuth: default_azimuth(),
            elevation: default_elevation(),
            target: default_target(),
        }
    }
}

fn default_view_height() -> f32 {
    4.5
}

fn default_azimuth() -> f32 {
    std::f32::consts::FRAC_PI_4
}

fn default_elevation() -> f32 {
    0.55
}

fn default_target() -> [f32; 3] {
    [0.0, 1.0, 0.0]
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SceneConfig {
    /// Path to the KSL layout file (the built-in showroom is used when
    /// unset)
    #[serde(default)]
    pub layout_path: Option<String>,
    /// Show the floor grid
    #[serde(default)]
    pub show_grid: bool,
    /// Show the world axes
    #[serde(default)]
    pub show_axes: bool,
}

/// Load configuration from file
pub fn load_config(path: &Path) -> Result<ViewerConfig> {
    if path.exists() {
        let content = std::fs::read_to_string(path)?;
        let config: ViewerConfig = toml::from_str(&content)?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    } else {
        info!(
            path = %path.display(),
            "Configuration file not found, using defaults"
        );
        Ok(ViewerConfig::default())
    }
}

/// Save default configuration to file
pub fn save_default_config(path: &Path) -> Result<()> {
    let config = ViewerConfig {
        window: WindowConfig::default(),
        camera: CameraConfig::default(),
        scene: SceneConfig {
            layout_path: Some("kitchen.ksl".to_string()),
            show_grid: false,
            show_axes: false,
        },
    };

    let content = toml::to_string_pretty(&config)?;
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: ViewerConfig = toml::from_str("").unwrap();
        assert_eq!(config.window.title, "Galley Kitchen Viewer");
        assert_eq!(config.window.width, 1280.0);
        assert_eq!(config.camera.view_height, 4.5);
        assert_eq!(config.camera.target, [0.0, 1.0, 0.0]);
        assert!(config.scene.layout_path.is_none());
        assert!(!config.scene.show_grid);
    }

    #[test]
    fn partial_config_overrides_selectively() {
        let toml_src = r#"
            [window]
            title = "Showroom"

            [camera]
            view_height = 6.0

            [scene]
            layout_path = "demo.ksl"
            show_grid = true
        "#;
        let config: ViewerConfig = toml::from_str(toml_src).unwrap();
        assert_eq!(config.window.title, "Showroom");
        // Unset fields keep their defaults
        assert_eq!(config.window.height, 720.0);
        assert_eq!(config.camera.view_height, 6.0);
        assert_eq!(config.camera.elevation, 0.55);
        assert_eq!(config.scene.layout_path.as_deref(), Some("demo.ksl"));
        assert!(config.scene.show_grid);
        assert!(!config.scene.show_axes);
    }

    #[test]
    fn default_config_round_trips() {
        let config = ViewerConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: ViewerConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.window.title, config.window.title);
        assert_eq!(parsed.camera.azimuth, config.camera.azimuth);
        assert_eq!(parsed.scene.show_axes, config.scene.show_axes);
    }
}
