use std::error::Error;
use std::marker::PhantomData;

use tracing::{error, info};
use winit::{
    dpi::LogicalSize,
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoopBuilder},
    window::{Window, WindowBuilder},
};

use crate::input::gui::{
    app::{GuiApp, InputOutcome},
    events::GuiEvent,
    ports::{presenter::GuiPresenterPort, presenter_factory::GuiPresenterFactoryPort},
};

const WINDOW_TITLE: &str = "Complex Fractal Explorer";
const INITIAL_SIZE: (f64, f64) = (1600.0, 900.0);
const MIN_SIZE: (f64, f64) = (600.0, 450.0);

pub struct RunGuiCommand<F, P>
where
    P: GuiPresenterPort,
    F: GuiPresenterFactoryPort<P>,
{
    presenter_factory: F,
    _phantom: PhantomData<fn() -> P>,
}

impl<F, P> RunGuiCommand<F, P>
where
    P: GuiPresenterPort,
    F: GuiPresenterFactoryPort<P>,
{
    pub fn new(presenter_factory: F) -> Self {
        Self {
            presenter_factory,
            _phantom: PhantomData,
        }
    }

    pub fn execute(&self) -> Result<(), Box<dyn Error>> {
        let event_loop = EventLoopBuilder::<GuiEvent>::with_user_event().build()?;
        let event_loop_proxy = event_loop.create_proxy();

        let window: &'static Window = Box::leak(Box::new(
            WindowBuilder::new()
                .with_title(WINDOW_TITLE)
                .with_inner_size(LogicalSize::new(INITIAL_SIZE.0, INITIAL_SIZE.1))
                .with_min_inner_size(LogicalSize::new(MIN_SIZE.0, MIN_SIZE.1))
                .build(&event_loop)?,
        ));

        let presenter: P = self.presenter_factory.build(window, event_loop_proxy)?;
        let mut app = GuiApp::new(window, &event_loop, presenter);
        let mut redraw_pending = true;

        info!(
            width = window.inner_size().width,
            height = window.inner_size().height,
            "window opened"
        );

        event_loop.run(|event, elwt| {
            elwt.set_control_flow(ControlFlow::Wait);

            match event {
                Event::UserEvent(GuiEvent::Wake) => {
                    redraw_pending = true;
                }
                Event::WindowEvent {
                    ref event,
                    window_id,
                } if window_id == window.id() => {
                    let (egui_consumed, egui_repaint) = app.handle_window_event(window, event);

                    if egui_repaint {
                        redraw_pending = true;
                    }

                    match event {
                        WindowEvent::CloseRequested => {
                            app.shutdown();
                            elwt.exit();
                        }
                        WindowEvent::RedrawRequested => {
                            redraw_pending = false;

                            let egui_output = app.update_ui(window);

                            app.egui_state
                                .handle_platform_output(window, egui_output.platform_output.clone());

                            if egui_output
                                .viewport_output
                                .values()
                                .any(|v| v.repaint_delay.is_zero())
                                || app.is_rendering()
                            {
                                redraw_pending = true;
                            }

                            if let Err(err) = app.render(egui_output) {
                                error!(error = %err, "presentation failed");
                                app.shutdown();
                                elwt.exit();
                            }
                        }
                        WindowEvent::Resized(size) => {
                            app.resize(size.width, size.height);
                            redraw_pending = true;
                        }
                        WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                            app.scale_factor = *scale_factor;
                            app.egui_ctx.set_pixels_per_point(*scale_factor as f32);
                            let size = window.inner_size();
                            app.resize(size.width, size.height);
                            redraw_pending = true;
                        }
                        WindowEvent::CursorMoved { .. } | WindowEvent::CursorLeft { .. } => {
                            app.handle_input(event);
                        }
                        _ if egui_consumed => {}
                        _ => match app.handle_input(event) {
                            InputOutcome::Ignored => {}
                            InputOutcome::Redraw => redraw_pending = true,
                            InputOutcome::Quit => {
                                app.shutdown();
                                elwt.exit();
                            }
                        },
                    }
                }
                Event::AboutToWait => {
                    if redraw_pending {
                        window.request_redraw();
                    }
                }
                _ => {}
            }
        })?;

        Ok(())
    }
}
