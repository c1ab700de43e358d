//! Shared scene types and resources

use bevy::prelude::*;
use galley_core::Fixture;

/// Metadata carried by a pickable entity. An entity either has no tag
/// (plain decoration) or carries one of these; there is no separate
/// marker flag to keep in sync.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct ComponentTag {
    /// Display title
    pub name: String,
    /// Free-text description (may be empty)
    pub details: String,
    /// Free-text specification line (may be empty)
    pub specs: String,
}

impl ComponentTag {
    /// Build a tag from a layout fixture. The legacy `desc` element fills
    /// in for a missing `description`; absent fields become empty strings.
    pub fn from_fixture(fixture: &Fixture) -> Self {
        Self {
            name: fixture.name.clone(),
            details: fixture.display_details(),
            specs: fixture.display_specs(),
        }
    }

    /// Specification line as shown in the details panel
    pub fn specs_line(&self) -> String {
        format!("Specifications: {}", self.specs)
    }
}

/// Currently selected component. `None` hides the details panel.
#[derive(Resource, Default, Debug, Clone, PartialEq, Eq)]
pub struct SelectedComponent(pub Option<ComponentTag>);

/// Marker for fixture root entities; distinguishes the pickable
/// fixtures from the invisible tag holders when listing components
#[derive(Component)]
pub struct FixtureEntity;

/// Visibility settings for the world helpers
#[derive(Resource, Debug, Clone)]
pub struct SceneSettings {
    pub show_grid: bool,
    pub show_axes: bool,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            show_grid: false,
            show_axes: false,
        }
    }
}
