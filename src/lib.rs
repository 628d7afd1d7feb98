pub mod controllers;
pub mod core;
#[cfg(feature = "gui")]
pub mod input;
pub mod presenters;

pub use controllers::cli::{RenderCommand, RenderCommandError, RenderSettings};
pub use controllers::interactive::{Explorer, RenderScheduler};
pub use crate::core::data::resolution::ResolutionScale;
pub use crate::core::fractals::fractal_kinds::FractalKind;
pub use crate::core::limits::ExplorerLimits;
pub use presenters::file::ppm::PpmFilePresenter;

#[cfg(feature = "gui")]
pub use input::gui::RunGuiCommand;
#[cfg(feature = "gui")]
pub use presenters::pixels::factory::PixelsPresenterFactory;
