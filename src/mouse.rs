use crate::error::Result;
use crate::settings::ClickButton;
use enigo::{Enigo, MouseButton, MouseControllable};

/// Something that can press and release a mouse button.
pub trait MouseInjector {
    fn click(&mut self, button: ClickButton) -> Result<()>;
}

/// Injects real clicks through the platform input API.
pub struct EnigoInjector {
    enigo: Enigo,
}

impl EnigoInjector {
    pub fn new() -> Self {
        Self { enigo: Enigo::new() }
    }
}

impl Default for EnigoInjector {
    fn default() -> Self {
        Self::new()
    }
}

impl MouseInjector for EnigoInjector {
    fn click(&mut self, button: ClickButton) -> Result<()> {
        let button = match button {
            ClickButton::Left => MouseButton::Left,
            ClickButton::Right => MouseButton::Right,
            ClickButton::Middle => MouseButton::Middle,
        };
        self.enigo.mouse_click(button);
        Ok(())
    }
}
