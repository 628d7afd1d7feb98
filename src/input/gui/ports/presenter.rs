use std::sync::Arc;

use egui::Context as EguiContext;

use crate::controllers::interactive::InteractiveControllerPresenterPort;
use crate::core::data::trajectory::TrajectoryOverlay;

pub trait GuiPresenterPort {
    /// Draws the latest frame, then the trajectory, then the egui output on top.
    fn render(
        &mut self,
        egui_output: egui::FullOutput,
        egui_ctx: &EguiContext,
        trajectory: Option<&TrajectoryOverlay>,
    ) -> Result<(), pixels::Error>;

    /// Port handed to the render scheduler; wakes the event loop on every event.
    fn share_adapter(&self) -> Arc<dyn InteractiveControllerPresenterPort>;

    fn resize(&mut self, width: u32, height: u32) -> Result<(), pixels::TextureError>;

    /// Message of the latest render error newer than the presented frame.
    fn last_error(&self) -> Option<&str>;
}
