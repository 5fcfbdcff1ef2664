//! Line identity.

use std::fmt;

/// Error returned when parsing an invalid line color.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid line color: {reason}")]
pub struct InvalidLineColor {
    reason: &'static str,
}

/// The color (or name) identifying a metro line.
///
/// Colors are compared exactly after trimming surrounding whitespace, so
/// `" Red "` and `"Red"` name the same line. A blank color is never valid.
///
/// # Examples
///
/// ```
/// use metro_network::domain::LineColor;
///
/// let red = LineColor::parse("Red").unwrap();
/// assert_eq!(red.as_str(), "Red");
/// assert_eq!(LineColor::parse("  Red ").unwrap(), red);
///
/// assert!(LineColor::parse("").is_err());
/// assert!(LineColor::parse("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineColor(String);

impl LineColor {
    /// Parse a line color from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidLineColor> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(InvalidLineColor {
                reason: "must not be blank",
            });
        }

        Ok(LineColor(trimmed.to_string()))
    }

    /// Returns the color as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for LineColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LineColor({})", self.0)
    }
}

impl fmt::Display for LineColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
