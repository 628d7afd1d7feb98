use std::sync::{Mutex, PoisonError};

use winit::event_loop::EventLoopProxy;

use crate::controllers::interactive::{InteractiveControllerPresenterPort, RenderEvent};
use crate::input::gui::events::GuiEvent;

/// Mailbox between render threads and the UI thread.
///
/// Frames and errors go in separate slots so a late error cannot drop a
/// completed frame the UI has not picked up yet.
pub struct PixelsAdapter {
    frame_event: Mutex<Option<RenderEvent>>,
    error_event: Mutex<Option<RenderEvent>>,
    event_loop_proxy: EventLoopProxy<GuiEvent>,
}

impl InteractiveControllerPresenterPort for PixelsAdapter {
    fn present(&self, event: RenderEvent) {
        let slot = match event {
            RenderEvent::Frame(_) => &self.frame_event,
            RenderEvent::Error(_) => &self.error_event,
        };

        *slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(event);
        // the loop is gone during shutdown; nothing left to wake
        let _ = self.event_loop_proxy.send_event(GuiEvent::Wake);
    }
}

impl PixelsAdapter {
    pub fn new(event_loop_proxy: EventLoopProxy<GuiEvent>) -> Self {
        Self {
            frame_event: Mutex::new(None),
            error_event: Mutex::new(None),
            event_loop_proxy,
        }
    }

    /// Pending events, frame first.
    pub fn take_events(&self) -> impl Iterator<Item = RenderEvent> {
        let frame = self
            .frame_event
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        let error = self
            .error_event
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        frame.into_iter().chain(error)
    }
}
