//! Working copy of the selected cube, bound to the edit form
//!
//! The numeric inputs keep the raw text the user typed. Every change is
//! parsed right away, so the copy always holds what Apply will write back.

use crate::project::{format_hex_color, parse_hex_color, CubeState};

/// One of the three numeric fields of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Width,
    Height,
    Depth,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [Dimension::Width, Dimension::Height, Dimension::Depth];

    pub fn label(self) -> &'static str {
        match self {
            Dimension::Width => "Width",
            Dimension::Height => "Height",
            Dimension::Depth => "Depth",
        }
    }

    fn slot(self) -> usize {
        match self {
            Dimension::Width => 0,
            Dimension::Height => 1,
            Dimension::Depth => 2,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EditBuffer {
    state: CubeState,
    texts: [String; 3],
}

impl EditBuffer {
    /// Start editing a copy of `state`
    pub fn new(state: &CubeState) -> Self {
        Self {
            state: state.clone(),
            texts: state.dimensions().map(|value| value.to_string()),
        }
    }

    /// The state Apply writes back
    pub fn state(&self) -> &CubeState {
        &self.state
    }

    pub fn text(&self, dimension: Dimension) -> &str {
        &self.texts[dimension.slot()]
    }

    /// Store the typed text and its parsed value. Unparseable text stores NaN.
    pub fn set_text(&mut self, dimension: Dimension, text: String) {
        let value = parse_float(&text);
        match dimension {
            Dimension::Width => self.state.width = value,
            Dimension::Height => self.state.height = value,
            Dimension::Depth => self.state.depth = value,
        }
        self.texts[dimension.slot()] = text;
    }

    /// Current color for the picker; black when the stored string is not hex
    pub fn color_rgb(&self) -> [u8; 3] {
        parse_hex_color(&self.state.color).unwrap_or([0, 0, 0])
    }

    pub fn set_color(&mut self, rgb: [u8; 3]) {
        self.state.color = format_hex_color(rgb);
    }
}

/// Parse the longest decimal prefix of `text` after leading whitespace.
///
/// Accepts an optional sign, `Infinity`, digits with an optional fraction and
/// an optional exponent. Anything else yields NaN, so `"2.5cm"` is 2.5 and
/// `"abc"` is NaN.
pub fn parse_float(text: &str) -> f64 {
    let trimmed = text.trim_start();
    let bytes = trimmed.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    if trimmed[end..].starts_with("Infinity") {
        return if bytes.first() == Some(&b'-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return f64::NAN;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent_end = end + 1;
        if matches!(bytes.get(exponent_end), Some(b'+' | b'-')) {
            exponent_end += 1;
        }
        let exponent_digits = count_digits(&bytes[exponent_end..]);
        if exponent_digits > 0 {
            end = exponent_end + exponent_digits;
        }
    }

    trimmed[..end].parse().unwrap_or(f64::NAN)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_float_prefixes() {
        assert_eq!(parse_float("2"), 2.0);
        assert_eq!(parse_float("  1.5"), 1.5);
        assert_eq!(parse_float("2.5cm"), 2.5);
        assert_eq!(parse_float("-3"), -3.0);
        assert_eq!(parse_float("+.25"), 0.25);
        assert_eq!(parse_float("4."), 4.0);
        assert_eq!(parse_float("1e3"), 1000.0);
        assert_eq!(parse_float("1e"), 1.0);
        assert_eq!(parse_float("2E-1x"), 0.2);
        assert_eq!(parse_float("1.2.3"), 1.2);
        assert_eq!(parse_float("Infinity"), f64::INFINITY);
        assert_eq!(parse_float("-Infinityx"), f64::NEG_INFINITY);
    }

    #[test]
    fn test_parse_float_rejects() {
        for text in ["", "   ", "abc", ".", "-", "+.", "e5", "x1"] {
            assert!(parse_float(text).is_nan(), "{text:?} should be NaN");
        }
    }

    #[test]
    fn test_buffer_copies_state() {
        let state = CubeState::initial(2);
        let buffer = EditBuffer::new(&state);
        assert_eq!(buffer.state(), &state);
        assert_eq!(buffer.text(Dimension::Width), "1");
        assert_eq!(buffer.color_rgb(), [0, 0, 255]);
    }

    #[test]
    fn test_set_text_keeps_raw_text() {
        let mut buffer = EditBuffer::new(&CubeState::initial(0));
        buffer.set_text(Dimension::Height, "2.5 units".to_string());
        assert_eq!(buffer.text(Dimension::Height), "2.5 units");
        assert_eq!(buffer.state().height, 2.5);

        buffer.set_text(Dimension::Depth, "deep".to_string());
        assert!(buffer.state().depth.is_nan());
        assert_eq!(buffer.state().width, 1.0);
    }

    #[test]
    fn test_set_color_stores_lowercase_hex() {
        let mut buffer = EditBuffer::new(&CubeState::initial(0));
        buffer.set_color([0xAB, 0xCD, 0xEF]);
        assert_eq!(buffer.state().color, "#abcdef");
    }
}
