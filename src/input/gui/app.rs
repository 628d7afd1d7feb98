use std::path::PathBuf;

use egui::Context;
use egui_winit::State as EguiWinitState;
use tracing::{error, info, warn};
use winit::{
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::EventLoop,
    keyboard::PhysicalKey,
    window::Window,
};

use crate::controllers::interactive::{Explorer, RenderState, RenderTrigger};
use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::core::data::point::Point;
use crate::core::data::resolution::{Resolution, ResolutionScale};
use crate::core::fractals::fractal_kinds::FractalKind;
use crate::core::limits::ExplorerLimits;
use crate::input::gui::events::GuiEvent;
use crate::input::gui::ports::presenter::GuiPresenterPort;
use crate::input::gui::shortcuts::{shortcut_for, Shortcut};
use crate::input::gui::ui_state::GuiUiState;
use crate::presenters::file::ppm::PpmFilePresenter;

const SAVE_DIRECTORY: &str = "screenshots";

/// What the event loop should do after an input was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    Ignored,
    Redraw,
    Quit,
}

pub struct GuiApp<T: GuiPresenterPort> {
    width: u32,
    height: u32,
    pub scale_factor: f64,
    presenter: T,
    explorer: Explorer,
    ui_state: GuiUiState,
    cursor: Option<Point>,
    pub egui_ctx: Context,
    pub egui_state: EguiWinitState,
}

impl<T: GuiPresenterPort> GuiApp<T> {
    pub fn new(window: &'static Window, event_loop: &EventLoop<GuiEvent>, presenter: T) -> Self {
        let size = window.inner_size();
        let scale_factor = window.scale_factor();
        let egui_ctx = Context::default();

        let egui_state = EguiWinitState::new(
            egui_ctx.clone(),
            egui_ctx.viewport_id(),
            event_loop,
            Some(scale_factor as f32),
            None,
        );

        let explorer = Explorer::new(
            Resolution::new(size.width, size.height),
            ExplorerLimits::default(),
            presenter.share_adapter(),
        );

        let mut app = Self {
            width: size.width,
            height: size.height,
            scale_factor,
            presenter,
            explorer,
            ui_state: GuiUiState::default(),
            cursor: None,
            egui_ctx,
            egui_state,
        };

        let first = app.explorer.render().map(Some);
        app.after_trigger(first);
        app
    }

    pub fn render(&mut self, egui_output: egui::FullOutput) -> Result<(), pixels::Error> {
        self.presenter
            .render(egui_output, &self.egui_ctx, self.explorer.trajectory())
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;

        if width == 0 || height == 0 {
            return;
        }

        if let Err(err) = self.presenter.resize(width, height) {
            error!(error = %err, width, height, "could not resize framebuffer");
            return;
        }

        let trigger = self.explorer.resize(width, height);
        self.after_trigger(trigger);
    }

    pub fn handle_window_event(&mut self, window: &Window, event: &WindowEvent) -> (bool, bool) {
        let response = self.egui_state.on_window_event(window, event);
        (response.consumed, response.repaint)
    }

    /// Mouse and keyboard input that egui did not consume.
    pub fn handle_input(&mut self, event: &WindowEvent) -> InputOutcome {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Some(Point {
                    x: position.x as i32,
                    y: position.y as i32,
                });
                InputOutcome::Ignored
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                InputOutcome::Ignored
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button,
                ..
            } => self.handle_click(*button),
            WindowEvent::MouseWheel { delta, .. } => {
                let delta = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(position) => position.y as f32,
                };
                let trigger = self.explorer.scroll(delta);
                self.after_trigger(trigger);
                InputOutcome::Redraw
            }
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                let PhysicalKey::Code(code) = event.physical_key else {
                    return InputOutcome::Ignored;
                };

                match shortcut_for(code) {
                    Some(shortcut) => self.apply_shortcut(shortcut),
                    None => InputOutcome::Ignored,
                }
            }
            _ => InputOutcome::Ignored,
        }
    }

    pub fn update_ui(&mut self, window: &Window) -> egui::FullOutput {
        let raw_input = self.egui_state.take_egui_input(window);
        let ctx = self.egui_ctx.clone();

        ctx.run(raw_input, |ctx| {
            if self.ui_state.show_ui {
                self.info_panel(ctx);
                self.controls_panel(ctx);
                self.selector_panel(ctx);
                self.progress_panel(ctx);
            }
        })
    }

    /// True while a render is running; the loop keeps redrawing to animate progress.
    #[must_use]
    pub fn is_rendering(&self) -> bool {
        self.explorer.scheduler().is_rendering()
    }

    pub fn shutdown(&mut self) {
        self.explorer.wait();
    }

    fn handle_click(&mut self, button: MouseButton) -> InputOutcome {
        let Some(cursor) = self.cursor else {
            return InputOutcome::Ignored;
        };

        match button {
            MouseButton::Left => {
                let trigger = self.explorer.recentre(cursor).map(Some);
                self.after_trigger(trigger);
                InputOutcome::Redraw
            }
            MouseButton::Right => {
                self.explorer.trace(cursor);
                InputOutcome::Redraw
            }
            _ => InputOutcome::Ignored,
        }
    }

    fn apply_shortcut(&mut self, shortcut: Shortcut) -> InputOutcome {
        let trigger = match shortcut {
            Shortcut::SelectFractal(index) => self.explorer.select_fractal(index),
            Shortcut::FullRender => self.explorer.full_render().map(Some),
            Shortcut::Reset => self.explorer.reset(),
            Shortcut::ToggleUi => {
                self.ui_state.show_ui = !self.ui_state.show_ui;
                return InputOutcome::Redraw;
            }
            Shortcut::SaveFrame => {
                self.save_frame();
                return InputOutcome::Redraw;
            }
            Shortcut::Quit => return InputOutcome::Quit,
        };

        self.after_trigger(trigger);
        InputOutcome::Redraw
    }

    /// Refreshes the panel fields after a render start, or surfaces its failure.
    fn after_trigger(&mut self, trigger: RenderTrigger) {
        match trigger {
            Ok(Some(_)) => {
                self.ui_state.sync_from(&self.explorer.info());
                self.ui_state.status_message = None;
            }
            Ok(None) => {}
            Err(err) => {
                warn!(error = %err, "render not started");
                self.ui_state.status_message = Some(err.to_string());
            }
        }
    }

    fn save_frame(&mut self) {
        let Some(frame) = self.explorer.current_frame() else {
            self.ui_state.status_message = Some(String::from("Nothing to save yet"));
            return;
        };

        let path = PathBuf::from(SAVE_DIRECTORY)
            .join(format!("frame-{}.ppm", self.explorer.scheduler().generation()));

        match PpmFilePresenter::new().present(&frame, &path) {
            Ok(()) => {
                info!(path = %path.display(), "frame saved");
                self.ui_state.status_message = Some(format!("Saved {}", path.display()));
            }
            Err(err) => {
                error!(error = %err, path = %path.display(), "could not save frame");
                self.ui_state.status_message = Some(format!("Save failed: {}", err));
            }
        }
    }

    fn info_panel(&mut self, ctx: &Context) {
        let info = self.explorer.info();

        egui::Window::new("Info")
            .default_pos([10.0, 10.0])
            .resizable(false)
            .show(ctx, |ui| {
                ui.heading(info.fractal.display_name());
                ui.separator();
                ui.label(format!("Zoom: 10^{:.4}", info.zoom_power));
                ui.label(format!("Real: {:.15}", info.real));
                ui.label(format!("Imag: {:.15}", info.imag));
                ui.label(format!("Iterations: {}", info.iterations));
                ui.label(format!("Window: {}x{}", self.width, self.height));
                ui.separator();
                ui.label("Left click: recentre");
                ui.label("Right click: trace orbit");
                ui.label("Wheel: zoom | Tab: hide panels");
            });
    }

    fn controls_panel(&mut self, ctx: &Context) {
        let mut trigger: RenderTrigger = Ok(None);

        egui::Window::new("Controls")
            .default_pos([10.0, 260.0])
            .resizable(false)
            .show(ctx, |ui| {
                egui::Grid::new("view_fields").num_columns(2).show(ui, |ui| {
                    ui.label("Zoom power:");
                    ui.text_edit_singleline(&mut self.ui_state.zoom_power);
                    ui.end_row();
                    ui.label("Real:");
                    ui.text_edit_singleline(&mut self.ui_state.real);
                    ui.end_row();
                    ui.label("Imag:");
                    ui.text_edit_singleline(&mut self.ui_state.imag);
                    ui.end_row();
                });

                ui.horizontal(|ui| {
                    if ui.button("Go").clicked() {
                        trigger = match self.ui_state.parsed_view() {
                            Some((power, real, imag)) => self.explorer.set_view(power, real, imag),
                            None => {
                                self.ui_state.status_message =
                                    Some(String::from("Zoom, real and imag must be numbers"));
                                Ok(None)
                            }
                        };
                    }
                    if ui.button("Reset").clicked() {
                        trigger = self.explorer.reset();
                    }
                });

                ui.separator();
                ui.horizontal(|ui| {
                    ui.label("Max iterations:");
                    ui.text_edit_singleline(&mut self.ui_state.max_iterations);
                    if ui.button("Set").clicked() {
                        trigger = match self.ui_state.parsed_max_iterations() {
                            Some(requested) => self.explorer.set_max_iterations(requested),
                            None => Ok(None),
                        };
                    }
                });

                if ui.button("Full Render").clicked() {
                    trigger = self.explorer.full_render().map(Some);
                }

                if let Some(message) = self
                    .presenter
                    .last_error()
                    .or(self.ui_state.status_message.as_deref())
                {
                    ui.separator();
                    ui.colored_label(egui::Color32::LIGHT_RED, message);
                }
            });

        self.after_trigger(trigger);
    }

    fn selector_panel(&mut self, ctx: &Context) {
        let mut fractal_index = self.explorer.fractal().index();
        let mut resolution_index = self.explorer.resolution().index();

        egui::Window::new("Fractal")
            .default_pos([10.0, 470.0])
            .resizable(false)
            .show(ctx, |ui| {
                for (index, kind) in FractalKind::ALL.iter().enumerate() {
                    ui.radio_value(
                        &mut fractal_index,
                        index,
                        format!("{} [{}]", kind.display_name(), index + 1),
                    );
                }

                ui.separator();
                egui::ComboBox::from_id_source("resolution_scale")
                    .selected_text(self.explorer.resolution().display_name())
                    .show_ui(ui, |ui| {
                        for (index, scale) in ResolutionScale::ALL.iter().enumerate() {
                            ui.selectable_value(&mut resolution_index, index, scale.display_name());
                        }
                    });
            });

        let trigger = self.explorer.select_fractal(fractal_index);
        self.after_trigger(trigger);
        let trigger = self.explorer.select_resolution(resolution_index);
        self.after_trigger(trigger);
    }

    fn progress_panel(&mut self, ctx: &Context) {
        let info = self.explorer.info();
        let text = match info.state {
            RenderState::Rendering => format!("Rendering {:.0}%", info.progress * 100.0),
            RenderState::Completed => String::from("Done"),
            RenderState::Cancelled => String::from("Cancelled"),
            RenderState::Idle => String::from("Idle"),
        };

        egui::TopBottomPanel::bottom("progress").show(ctx, |ui| {
            ui.add(egui::ProgressBar::new(info.progress).text(text));
        });
    }
}
