//! Global keyboard shortcuts

use egui::{Event, Key, KeyboardShortcut, Modifiers};

/// A key press handled by the editor before any widget sees it.
///
/// Consuming removes the key event, and the text it would type, from this
/// frame's input, so focused text fields and buttons do not react to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shortcut {
    shortcut: KeyboardShortcut,
    text: Option<&'static str>,
}

impl Shortcut {
    pub const fn new(modifiers: Modifiers, key: Key) -> Self {
        Self {
            shortcut: KeyboardShortcut::new(modifiers, key),
            text: None,
        }
    }

    /// Also swallow the text event the key produces
    pub const fn with_text(mut self, text: &'static str) -> Self {
        self.text = Some(text);
        self
    }

    /// Spacebar, the rotation lock toggle
    pub const fn rotation_lock() -> Self {
        Self::new(Modifiers::NONE, Key::Space).with_text(" ")
    }

    /// Returns whether the shortcut was pressed this frame
    pub fn consume(&self, ctx: &egui::Context) -> bool {
        ctx.input_mut(|input| {
            let pressed = input.consume_shortcut(&self.shortcut);
            if pressed {
                if let Some(text) = self.text {
                    input
                        .events
                        .retain(|event| !matches!(event, Event::Text(typed) if typed == text));
                }
            }
            pressed
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn key_press(key: Key, modifiers: Modifiers) -> egui::RawInput {
        egui::RawInput {
            modifiers,
            events: vec![
                Event::Key {
                    key,
                    physical_key: None,
                    pressed: true,
                    repeat: false,
                    modifiers,
                },
                Event::Text(" ".to_string()),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_space_is_consumed() {
        let ctx = egui::Context::default();
        let shortcut = Shortcut::rotation_lock();

        let mut pressed = false;
        let mut leftover = usize::MAX;
        let _ = ctx.run(key_press(Key::Space, Modifiers::NONE), |ctx| {
            pressed = shortcut.consume(ctx);
            leftover = ctx.input(|i| i.events.len());
        });
        assert!(pressed);
        assert_eq!(leftover, 0);
    }

    #[test]
    fn test_other_keys_are_ignored() {
        let ctx = egui::Context::default();
        let shortcut = Shortcut::rotation_lock();

        let mut pressed = true;
        let _ = ctx.run(key_press(Key::Enter, Modifiers::NONE), |ctx| {
            pressed = shortcut.consume(ctx);
        });
        assert!(!pressed);
    }
}
