//! Color handling for scene styles
//!
//! Editor documents store stroke and background colors as free-form CSS
//! strings. This module provides the [`Color`] type which wraps the
//! `DynamicColor` type from the color crate so those strings are validated
//! before they reach generated code.

use std::{fmt, str::FromStr};

use color::DynamicColor;

/// Wrapper around the `DynamicColor` type from the color crate
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Create a new `Color` from a string
    /// This will parse CSS color strings such as "#ff0000", "rgb(255, 0, 0)", "red", etc.
    ///
    /// # Errors
    ///
    /// Returns a message naming the offending string if it is not a valid
    /// CSS color.
    ///
    /// # Examples
    ///
    /// ```
    /// use tessel_core::color::Color;
    ///
    /// let red = Color::new("#ff0000").unwrap();
    /// let blue = Color::new("blue").unwrap();
    /// assert!(Color::new("not-a-color").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Returns the alpha (transparency) component of this color.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }

    /// Returns true if the color is fully transparent and paints nothing.
    pub fn is_transparent(&self) -> bool {
        self.alpha() == 0.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_new() {
        assert!(Color::new("#ff0000").is_ok());
        assert!(Color::new("#bbb").is_ok());
        assert!(Color::new("not-a-color").is_err());
    }

    #[test]
    fn test_color_transparency() {
        assert!(!Color::new("red").unwrap().is_transparent());
        assert!(Color::new("rgba(255, 0, 0, 0)").unwrap().is_transparent());
        let alpha = Color::new("rgba(0, 0, 0, 0.5)").unwrap().alpha();
        assert!((alpha - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_color_error_names_input() {
        let err = Color::new("blurple").unwrap_err();
        assert!(err.contains("blurple"));
    }

    #[test]
    fn test_color_eq() {
        assert_eq!(Color::new("red").unwrap(), Color::new("red").unwrap());
        assert_ne!(Color::new("red").unwrap(), Color::new("blue").unwrap());
    }
}
