//! Corner Pin - demo host
//!
//! Stand-in for the host compositor: a scene with adjustable dimensions and
//! scene-item placements, the filter ticking every frame, and the editor
//! window. Lets the whole engine be exercised without a real compositor.

use std::path::Path;

use corner_pin::{
    CornerPinFilter, EditorWindow, ItemPlacement, QuadSettings, SceneHost, SceneItemId,
};
use eframe::egui;
use glam::Vec2;

const SETTINGS_PATH: &str = "corner-pin-settings.json";

/// Demo scene: one source placed twice.
struct DemoScene {
    target: (u32, u32),
    scene: (u32, u32),
    items: Vec<(u64, ItemPlacement)>,
}

impl DemoScene {
    fn new() -> Self {
        Self {
            target: (1920, 1080),
            scene: (1920, 1080),
            items: vec![
                (
                    1,
                    ItemPlacement {
                        position: Vec2::new(0.0, 0.0),
                        scale: Vec2::new(0.75, 0.75),
                    },
                ),
                (
                    2,
                    ItemPlacement {
                        position: Vec2::new(1200.0, 700.0),
                        scale: Vec2::new(0.25, 0.25),
                    },
                ),
            ],
        }
    }
}

impl SceneHost for DemoScene {
    fn target_size(&self) -> (u32, u32) {
        self.target
    }

    fn scene_size(&self) -> (u32, u32) {
        self.scene
    }

    fn placements(&self) -> Vec<SceneItemId> {
        self.items.iter().map(|(id, _)| SceneItemId(*id)).collect()
    }

    fn placement(&self, item: SceneItemId) -> Option<ItemPlacement> {
        self.items
            .iter()
            .find(|(id, _)| *id == item.0)
            .map(|(_, p)| *p)
    }
}

struct DemoApp {
    scene: DemoScene,
    filter: CornerPinFilter,
    editor: Option<EditorWindow>,
}

impl DemoApp {
    fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let scene = DemoScene::new();
        let filter = match CornerPinFilter::load_settings(Path::new(SETTINGS_PATH)) {
            Ok(settings) => {
                log::info!("loaded settings from {SETTINGS_PATH}");
                CornerPinFilter::new(&settings)
            }
            Err(err) => {
                log::debug!("no saved settings ({err}), starting from identity");
                CornerPinFilter::identity(scene.target.0, scene.target.1)
            }
        };
        Self {
            scene,
            filter,
            editor: None,
        }
    }

    fn show_host_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("host_panel")
            .default_width(260.0)
            .show(ctx, |ui| {
                ui.heading("Host scene");

                ui.horizontal(|ui| {
                    ui.label("Target:");
                    ui.add(egui::DragValue::new(&mut self.scene.target.0).clamp_range(0..=8192));
                    ui.add(egui::DragValue::new(&mut self.scene.target.1).clamp_range(0..=8192));
                });
                ui.horizontal(|ui| {
                    ui.label("Scene:");
                    ui.add(egui::DragValue::new(&mut self.scene.scene.0).clamp_range(1..=8192));
                    ui.add(egui::DragValue::new(&mut self.scene.scene.1).clamp_range(1..=8192));
                });

                ui.separator();
                for (idx, (id, placement)) in self.scene.items.iter_mut().enumerate() {
                    ui.label(format!("Item #{} (id {id})", idx + 1));
                    ui.horizontal(|ui| {
                        ui.label("Pos:");
                        ui.add(egui::DragValue::new(&mut placement.position.x).speed(1.0));
                        ui.add(egui::DragValue::new(&mut placement.position.y).speed(1.0));
                    });
                    ui.horizontal(|ui| {
                        ui.label("Scale:");
                        ui.add(egui::DragValue::new(&mut placement.scale.x).speed(0.01));
                        ui.add(egui::DragValue::new(&mut placement.scale.y).speed(0.01));
                    });
                }

                ui.separator();
                if ui.button("Open editor").clicked() && self.editor.is_none() {
                    self.editor = Some(EditorWindow::new(&self.scene));
                }
                ui.horizontal(|ui| {
                    if ui.button("Save settings").clicked() {
                        if let Err(err) = self.filter.save_settings(Path::new(SETTINGS_PATH)) {
                            log::error!("{err}");
                        }
                    }
                    if ui.button("Load settings").clicked() {
                        match CornerPinFilter::load_settings(Path::new(SETTINGS_PATH)) {
                            Ok(settings) => self.filter.update(&settings),
                            Err(err) => log::error!("{err}"),
                        }
                    }
                    if ui.button("Defaults").clicked() {
                        self.filter.update(&QuadSettings::default());
                    }
                });

                ui.separator();
                ui.heading("Render pass");
                match self.filter.render_inputs() {
                    Some(uniforms) => {
                        for (name, uv) in [
                            ("uv1", uniforms.uv1),
                            ("uv2", uniforms.uv2),
                            ("uv3", uniforms.uv3),
                            ("uv4", uniforms.uv4),
                        ] {
                            ui.monospace(format!("{name}: ({:.4}, {:.4})", uv[0], uv[1]));
                        }
                        ui.monospace(format!(
                            "tex: {}x{}  outline: {}",
                            uniforms.tex_width, uniforms.tex_height, uniforms.outline
                        ));
                    }
                    None => {
                        ui.monospace("skipped (no target)");
                    }
                }
            });
    }
}

impl eframe::App for DemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Host tick: the render pass pulls fresh UVs from the model.
        self.filter.tick(&self.scene);

        self.show_host_panel(ctx);

        let Self {
            scene,
            filter,
            editor,
        } = self;

        let mut open = editor.is_some();
        if let Some(window) = editor.as_mut() {
            egui::Window::new("Corner Pin")
                .open(&mut open)
                .default_size([720.0, 520.0])
                .show(ctx, |ui| {
                    window.show(ui, scene, filter);
                });
        }
        if !open {
            // Closing the window tears the session down; an interrupted drag
            // keeps whatever was last committed.
            *editor = None;
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Corner Pin demo host");
            ui.label("Open the editor to drag the quad corners over the scene preview.");
        });
    }
}

fn main() -> eframe::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    log::info!("Starting Corner Pin v{}", env!("CARGO_PKG_VERSION"));

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Corner Pin"),
        vsync: true,
        ..Default::default()
    };

    eframe::run_native(
        "Corner Pin",
        native_options,
        Box::new(|cc| Box::new(DemoApp::new(cc))),
    )
}
