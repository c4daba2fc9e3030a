//! Blocking confirmation prompt shown before destructive actions.

/// Prompt shown before deleting a car.
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this car?";

/// Asks the user to confirm an action; `false` aborts it.
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}

/// `window.confirm` in the browser.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserConfirm;

#[cfg(target_arch = "wasm32")]
impl Confirm for BrowserConfirm {
    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
}
