//! UI overlays using bevy_egui

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};

use galley_scene::{ComponentTag, FixtureEntity, KitchenLayout, SceneSettings, SelectedComponent};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        // UI runs in EguiPrimaryContextPass for proper input handling
        // (bevy_egui 0.38+)
        app.add_systems(EguiPrimaryContextPass, ui_system);
    }
}

fn ui_system(
    mut contexts: EguiContexts,
    layout: Res<KitchenLayout>,
    mut selected: ResMut<SelectedComponent>,
    mut settings: ResMut<SceneSettings>,
    fixtures: Query<&ComponentTag, With<FixtureEntity>>,
) {
    // Get the egui context - early return if not available
    let Ok(ctx) = contexts.ctx_mut() else { return };

    // Layout overview panel (left side)
    egui::SidePanel::left("layout_panel")
        .default_width(220.0)
        .show(ctx, |ui| {
            ui.heading(layout.0.name.as_deref().unwrap_or("Kitchen"));
            ui.separator();

            ui.label(format!("{} fixtures", layout.0.fixture.len()));
            ui.label(format!("{} decor pieces", layout.0.decor.len()));
            ui.separator();

            // Fixture list; clicking an entry selects it just like
            // clicking the geometry would
            let mut tags: Vec<&ComponentTag> = fixtures.iter().collect();
            tags.sort_by(|a, b| a.name.cmp(&b.name));
            egui::ScrollArea::vertical().show(ui, |ui| {
                for tag in tags {
                    let is_selected = selected.0.as_ref() == Some(tag);
                    if ui.selectable_label(is_selected, &tag.name).clicked() {
                        selected.0 = Some(tag.clone());
                    }
                }
            });
            ui.separator();

            egui::CollapsingHeader::new("Display")
                .default_open(false)
                .show(ui, |ui| {
                    ui.checkbox(&mut settings.show_grid, "Show Grid");
                    ui.checkbox(&mut settings.show_axes, "Show World Axes");
                });
        });

    // Info panel (bottom)
    egui::TopBottomPanel::bottom("info_panel")
        .max_height(60.0)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Galley - Kitchen Layout Viewer");
                ui.separator();
                ui.label("Click a fixture to inspect | Right-drag to orbit | Scroll to zoom");
            });
        });

    // Selected component details (right side, only while something is
    // selected)
    if let Some(tag) = selected.0.clone() {
        egui::SidePanel::right("details_panel")
            .default_width(280.0)
            .show(ctx, |ui| {
                ui.heading(&tag.name);
                ui.separator();

                ui.label(&tag.details);
                ui.label(tag.specs_line());

                ui.separator();
                if ui.button("Close").clicked() {
                    selected.0 = None;
                }
            });
    }
}
