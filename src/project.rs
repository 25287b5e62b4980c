//! Cube project data model
//!
//! A project is a fixed set of cubes. The array index of a cube is its
//! identity: cubes are replaced in place, never added or removed.

use std::ops::Index;

use egui::{ecolor::HexColor, Color32};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{layout, palette, CUBE_COUNT};

/// Geometry and appearance of one cube
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CubeState {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    /// `#rrggbb` hex string
    pub color: String,
    pub position: [f64; 3],
}

impl CubeState {
    /// Initial state of the cube at `index` in the default layout
    pub fn initial(index: usize) -> Self {
        let column = (index % layout::COLUMNS) as f64;
        let row = (index / layout::COLUMNS) as f64;
        Self {
            width: 1.0,
            height: 1.0,
            depth: 1.0,
            color: palette::COLORS[index % palette::COLORS.len()].to_string(),
            position: [
                column * layout::SPACING + layout::COLUMN_OFFSET,
                layout::RESTING_HEIGHT,
                row * layout::SPACING + layout::ROW_OFFSET,
            ],
        }
    }

    /// Copy of this cube with a different position
    pub fn with_position(&self, position: [f64; 3]) -> Self {
        Self {
            position,
            ..self.clone()
        }
    }

    /// Copy of this cube with a different color
    pub fn with_color(&self, color: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            ..self.clone()
        }
    }

    /// Width, height and depth as a scale vector
    pub fn dimensions(&self) -> [f64; 3] {
        [self.width, self.height, self.depth]
    }
}

/// The fixed-size set of cubes making up a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubeSet([CubeState; CUBE_COUNT]);

impl CubeSet {
    /// The startup layout: palette colors on a 3x2 grid, unit dimensions
    pub fn initial() -> Self {
        Self(std::array::from_fn(CubeState::initial))
    }

    pub fn len(&self) -> usize {
        CUBE_COUNT
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn get(&self, index: usize) -> Option<&CubeState> {
        self.0.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CubeState> {
        self.0.iter()
    }

    /// New snapshot with the slot at `index` replaced by `state`.
    ///
    /// Every other slot is carried over untouched and in order. An index past
    /// the end yields an unchanged snapshot.
    pub fn replace(&self, index: usize, state: CubeState) -> Self {
        let mut next = self.clone();
        if let Some(slot) = next.0.get_mut(index) {
            *slot = state;
        }
        next
    }

    /// Serialize the whole set as a JSON array of cube objects
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl Default for CubeSet {
    fn default() -> Self {
        Self::initial()
    }
}

impl Index<usize> for CubeSet {
    type Output = CubeState;

    fn index(&self, index: usize) -> &CubeState {
        &self.0[index]
    }
}

/// Uniform pick from the palette; may equal the cube's current color
pub fn random_palette_color<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    palette::COLORS[rng.random_range(0..palette::COLORS.len())]
}

/// Parse a `#rrggbb` string into its channels
pub fn parse_hex_color(color: &str) -> Option<[u8; 3]> {
    // Only the six-digit form; egui also accepts #rgb, #rrggbbaa and a sign
    let digits = color.strip_prefix('#')?;
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let color = Color32::from_hex(color).ok()?;
    Some([color.r(), color.g(), color.b()])
}

/// Format channels as a lowercase `#rrggbb` string
pub fn format_hex_color(rgb: [u8; 3]) -> String {
    HexColor::Hex6(Color32::from_rgb(rgb[0], rgb[1], rgb[2])).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_initial_layout() {
        let cubes = CubeSet::initial();
        assert_eq!(cubes.len(), 6);

        for (i, cube) in cubes.iter().enumerate() {
            let expected = [
                (i % 3) as f64 * 2.0 - 2.0,
                0.5,
                (i / 3) as f64 * 2.0 - 1.0,
            ];
            assert_eq!(cube.position, expected);
            assert_eq!(cube.dimensions(), [1.0, 1.0, 1.0]);
            assert_eq!(cube.color, palette::COLORS[i]);
        }
    }

    #[test]
    fn test_replace_touches_one_slot() {
        let cubes = CubeSet::initial();
        let edited = cubes[2].with_position([9.0, 9.0, 9.0]);
        let next = cubes.replace(2, edited.clone());

        assert_eq!(next[2], edited);
        for i in (0..6).filter(|i| *i != 2) {
            assert_eq!(next[i], cubes[i]);
        }
        // The original snapshot is untouched
        assert_eq!(cubes, CubeSet::initial());
    }

    #[test]
    fn test_replace_out_of_range() {
        let cubes = CubeSet::initial();
        assert_eq!(cubes.replace(6, CubeState::initial(0)), cubes);
    }

    #[test]
    fn test_json_round_trip() {
        let cubes = CubeSet::initial().replace(
            4,
            CubeState {
                width: 2.5,
                height: 0.25,
                depth: 3.0,
                color: "#123abc".to_string(),
                position: [1.5, -0.5, 7.0],
            },
        );
        let json = cubes.to_json().unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let objects = value.as_array().unwrap();
        assert_eq!(objects.len(), 6);
        assert_eq!(objects[4]["color"], "#123abc");
        assert_eq!(objects[4]["position"], serde_json::json!([1.5, -0.5, 7.0]));

        let parsed: CubeSet = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, cubes);
    }

    #[test]
    fn test_nan_serializes_as_null() {
        let mut cube = CubeState::initial(0);
        cube.width = f64::NAN;
        let json = CubeSet::initial().replace(0, cube).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value[0]["width"].is_null());
    }

    #[test]
    fn test_random_color_from_palette() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            assert!(palette::COLORS.contains(&random_palette_color(&mut rng)));
        }
    }

    #[test]
    fn test_hex_colors() {
        assert_eq!(parse_hex_color("#ff8000"), Some([255, 128, 0]));
        assert_eq!(parse_hex_color("#FF8000"), Some([255, 128, 0]));
        assert_eq!(parse_hex_color("ff8000"), None);
        assert_eq!(parse_hex_color("#ff80"), None);
        assert_eq!(parse_hex_color("#gg0000"), None);
        assert_eq!(parse_hex_color("#f80"), None);
        assert_eq!(parse_hex_color("#ff8000ff"), None);
        assert_eq!(parse_hex_color("#+f8000"), None);
        assert_eq!(format_hex_color([255, 128, 0]), "#ff8000");
        assert_eq!(format_hex_color([0xAB, 0x0C, 0x01]), "#ab0c01");
    }
}
