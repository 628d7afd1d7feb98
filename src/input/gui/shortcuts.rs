use winit::keyboard::KeyCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    SelectFractal(usize),
    FullRender,
    Reset,
    ToggleUi,
    SaveFrame,
    Quit,
}

#[must_use]
pub fn shortcut_for(key: KeyCode) -> Option<Shortcut> {
    let shortcut = match key {
        KeyCode::Digit1 => Shortcut::SelectFractal(0),
        KeyCode::Digit2 => Shortcut::SelectFractal(1),
        KeyCode::Digit3 => Shortcut::SelectFractal(2),
        KeyCode::Digit4 => Shortcut::SelectFractal(3),
        KeyCode::KeyF => Shortcut::FullRender,
        KeyCode::KeyR => Shortcut::Reset,
        KeyCode::KeyS => Shortcut::SaveFrame,
        KeyCode::Tab => Shortcut::ToggleUi,
        KeyCode::Escape => Shortcut::Quit,
        _ => return None,
    };

    Some(shortcut)
}
