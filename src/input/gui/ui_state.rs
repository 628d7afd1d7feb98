use crate::controllers::interactive::ViewInfo;

/// Editable panel fields and other UI-only state.
///
/// Text fields hold whatever the user typed until they press a button; they
/// are refreshed from the explorer after every accepted change.
pub struct GuiUiState {
    pub show_ui: bool,
    pub zoom_power: String,
    pub real: String,
    pub imag: String,
    pub max_iterations: String,
    pub status_message: Option<String>,
}

impl Default for GuiUiState {
    fn default() -> Self {
        Self {
            show_ui: true,
            zoom_power: String::from("0"),
            real: String::from("0"),
            imag: String::from("0"),
            max_iterations: String::new(),
            status_message: None,
        }
    }
}

impl GuiUiState {
    pub fn sync_from(&mut self, info: &ViewInfo) {
        self.zoom_power = format!("{:.6}", info.zoom_power);
        self.real = format!("{:.15}", info.real);
        self.imag = format!("{:.15}", info.imag);
        self.max_iterations = info.max_iterations.to_string();
    }

    /// Zoom power, real and imaginary centre, if all three fields parse.
    #[must_use]
    pub fn parsed_view(&self) -> Option<(f64, f64, f64)> {
        Some((
            parse_number(&self.zoom_power)?,
            parse_number(&self.real)?,
            parse_number(&self.imag)?,
        ))
    }

    #[must_use]
    pub fn parsed_max_iterations(&self) -> Option<i64> {
        self.max_iterations.trim().parse().ok()
    }
}

fn parse_number(field: &str) -> Option<f64> {
    field.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::interactive::RenderState;
    use crate::core::data::resolution::ResolutionScale;
    use crate::core::fractals::fractal_kinds::FractalKind;

    fn info() -> ViewInfo {
        ViewInfo {
            zoom_power: 2.5,
            real: -0.75,
            imag: 0.1,
            iterations: 296,
            max_iterations: 5000,
            progress: 1.0,
            state: RenderState::Completed,
            fractal: FractalKind::Mandelbrot,
            resolution: ResolutionScale::Full,
        }
    }

    #[test]
    fn synced_fields_parse_back() {
        let mut ui = GuiUiState::default();
        ui.sync_from(&info());

        assert_eq!(ui.parsed_view(), Some((2.5, -0.75, 0.1)));
        assert_eq!(ui.parsed_max_iterations(), Some(5000));
    }

    #[test]
    fn whitespace_is_tolerated() {
        let ui = GuiUiState {
            zoom_power: String::from(" 3 "),
            real: String::from("0.25\n"),
            imag: String::from("\t-1"),
            max_iterations: String::from(" 42 "),
            ..GuiUiState::default()
        };

        assert_eq!(ui.parsed_view(), Some((3.0, 0.25, -1.0)));
        assert_eq!(ui.parsed_max_iterations(), Some(42));
    }

    #[test]
    fn garbage_and_non_finite_fields_are_rejected() {
        let garbage = GuiUiState {
            real: String::from("abc"),
            ..GuiUiState::default()
        };
        let infinite = GuiUiState {
            zoom_power: String::from("inf"),
            ..GuiUiState::default()
        };
        let nan = GuiUiState {
            imag: String::from("NaN"),
            ..GuiUiState::default()
        };

        assert_eq!(garbage.parsed_view(), None);
        assert_eq!(infinite.parsed_view(), None);
        assert_eq!(nan.parsed_view(), None);
    }

    #[test]
    fn negative_iterations_still_parse() {
        let ui = GuiUiState {
            max_iterations: String::from("-5"),
            ..GuiUiState::default()
        };

        // the explorer decides what to do with a non-positive cap
        assert_eq!(ui.parsed_max_iterations(), Some(-5));
    }
}
