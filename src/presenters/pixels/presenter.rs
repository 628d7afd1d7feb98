use std::sync::Arc;

use egui::Context as EguiContext;
use egui_wgpu::Renderer as EguiRenderer;
use pixels::wgpu;
use pixels::{Pixels, SurfaceTexture};
use tracing::debug;
use winit::event_loop::EventLoopProxy;
use winit::window::Window;

use crate::controllers::interactive::{InteractiveControllerPresenterPort, RenderEvent};
use crate::core::data::colour::Colour;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::resolution::Resolution;
use crate::core::data::trajectory::TrajectoryOverlay;
use crate::input::gui::events::GuiEvent;
use crate::input::gui::ports::presenter::GuiPresenterPort;
use crate::presenters::pixels::adapter::PixelsAdapter;
use crate::presenters::raster::RgbaCanvas;

pub struct PixelsPresenter {
    pixels: Pixels<'static>,
    egui_renderer: EguiRenderer,
    adapter: Arc<PixelsAdapter>,
    width: u32,
    height: u32,
    frame: Option<Arc<PixelBuffer>>,
    last_presented_generation: u64,
    last_error_message: Option<String>,
}

impl PixelsPresenter {
    pub fn new(
        window: &'static Window,
        event_loop_proxy: EventLoopProxy<GuiEvent>,
    ) -> Result<Self, pixels::Error> {
        let size = window.inner_size();
        let surface_texture = SurfaceTexture::new(size.width, size.height, window);
        let pixels = Pixels::new(size.width, size.height, surface_texture)?;

        let egui_renderer = EguiRenderer::new(
            pixels.device(),
            pixels.render_texture_format(),
            None,
            1,
        );

        Ok(Self {
            pixels,
            egui_renderer,
            adapter: Arc::new(PixelsAdapter::new(event_loop_proxy)),
            width: size.width,
            height: size.height,
            frame: None,
            last_presented_generation: 0,
            last_error_message: None,
        })
    }

    fn drain_events(&mut self) {
        for event in self.adapter.take_events() {
            match event {
                RenderEvent::Frame(frame) => {
                    if frame.generation >= self.last_presented_generation {
                        debug!(
                            generation = frame.generation,
                            elapsed_ms = frame.render_duration.as_millis() as u64,
                            "frame received"
                        );
                        self.last_presented_generation = frame.generation;
                        self.frame = Some(frame.pixel_buffer);
                        self.last_error_message = None;
                    }
                }
                RenderEvent::Error(error) => {
                    if error.generation >= self.last_presented_generation {
                        self.last_error_message = Some(error.message);
                    }
                }
            }
        }
    }

    fn draw_scene(&mut self, trajectory: Option<&TrajectoryOverlay>) {
        let size = Resolution::new(self.width, self.height);
        let mut canvas = RgbaCanvas::new(self.pixels.frame_mut(), size);

        match &self.frame {
            Some(frame) => canvas.blit_scaled(frame),
            None => canvas.fill(Colour::default()),
        }

        if let Some(overlay) = trajectory {
            canvas.draw_trajectory(overlay);
        }
    }
}

impl GuiPresenterPort for PixelsPresenter {
    fn share_adapter(&self) -> Arc<dyn InteractiveControllerPresenterPort> {
        Arc::clone(&self.adapter) as Arc<dyn InteractiveControllerPresenterPort>
    }

    fn render(
        &mut self,
        egui_output: egui::FullOutput,
        egui_ctx: &EguiContext,
        trajectory: Option<&TrajectoryOverlay>,
    ) -> Result<(), pixels::Error> {
        if self.width == 0 || self.height == 0 {
            return Ok(());
        }

        self.drain_events();
        self.draw_scene(trajectory);

        self.pixels.render_with(|encoder, render_target, context| {
            context.scaling_renderer.render(encoder, render_target);

            let clipped_primitives =
                egui_ctx.tessellate(egui_output.shapes, egui_ctx.pixels_per_point());

            let screen_descriptor = egui_wgpu::ScreenDescriptor {
                size_in_pixels: [self.width, self.height],
                pixels_per_point: egui_ctx.pixels_per_point(),
            };

            let textures_delta = egui_output.textures_delta;

            for (id, delta) in &textures_delta.set {
                self.egui_renderer
                    .update_texture(&context.device, &context.queue, *id, delta);
            }

            self.egui_renderer.update_buffers(
                &context.device,
                &context.queue,
                encoder,
                &clipped_primitives,
                &screen_descriptor,
            );

            {
                let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: render_target,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            // keep the fractal underneath
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                });

                self.egui_renderer
                    .render(&mut render_pass, &clipped_primitives, &screen_descriptor);
            }

            for id in &textures_delta.free {
                self.egui_renderer.free_texture(id);
            }

            Ok(())
        })
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<(), pixels::TextureError> {
        self.pixels.resize_surface(width, height)?;
        self.pixels.resize_buffer(width, height)?;

        self.width = width;
        self.height = height;
        Ok(())
    }

    fn last_error(&self) -> Option<&str> {
        self.last_error_message.as_deref()
    }
}
