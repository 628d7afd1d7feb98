/// Custom user events for the GUI event loop.
///
/// Background render threads use these to wake the UI thread.
#[derive(Debug, Clone)]
pub enum GuiEvent {
    /// A new frame or render error may be waiting in the presenter.
    ///
    /// Receiving this does not redraw by itself; the loop requests a redraw
    /// on the next `AboutToWait`.
    Wake,
}
