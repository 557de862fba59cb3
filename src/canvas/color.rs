//! RGB color type and predefined color constants.

use serde::{Deserialize, Serialize};

/// Represents an RGB color with 8-bit components.
///
/// Terminals have no alpha channel; transparency is expressed by leaving a
/// cell blank instead.
///
/// # Examples
///
/// ```
/// use cellbrush::canvas::Color;
/// let red = Color { r: 255, g: 0, b: 0 };
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    /// Red component (0 = no red, 255 = full red)
    pub r: u8,
    /// Green component (0 = no green, 255 = full green)
    pub g: u8,
    /// Blue component (0 = no blue, 255 = full blue)
    pub b: u8,
}

impl Color {
    /// Creates a new color from RGB components.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Default for Color {
    fn default() -> Self {
        WHITE
    }
}

// ============================================================================
// Predefined Color Constants
// ============================================================================

/// Predefined red color
pub const RED: Color = Color::new(255, 0, 0);

/// Predefined green color
pub const GREEN: Color = Color::new(0, 255, 0);

/// Predefined blue color
pub const BLUE: Color = Color::new(0, 0, 255);

/// Predefined yellow color
pub const YELLOW: Color = Color::new(255, 255, 0);

/// Predefined orange color
pub const ORANGE: Color = Color::new(255, 128, 0);

/// Predefined pink/magenta color
pub const PINK: Color = Color::new(255, 0, 255);

/// Predefined white color
pub const WHITE: Color = Color::new(255, 255, 255);

/// Predefined black color
pub const BLACK: Color = Color::new(0, 0, 0);
