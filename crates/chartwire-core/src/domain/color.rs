use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{validate, ValidationError};

/// Validated CSS color: `#RRGGBB`, `#RRGGBBAA` or a lower-cased CSS name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(String);

impl Color {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        Self::parse_field("color", input)
    }

    /// Parse a color, reporting failures against `field`.
    pub fn parse_field(field: &'static str, input: &str) -> Result<Self, ValidationError> {
        validate::color(field, input).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derive `#RRGGBBAA` from a hex color and an opacity percentage.
    ///
    /// Any alpha channel already present is replaced.
    pub fn with_opacity(&self, percent: f64) -> Result<Self, ValidationError> {
        let percent = validate::percentage("opacity", percent)?;
        let digits = self
            .0
            .strip_prefix('#')
            .ok_or_else(|| ValidationError::OpacityRequiresHex {
                value: self.0.clone(),
            })?;

        let rgb = digits.get(..6).ok_or_else(|| ValidationError::OpacityRequiresHex {
            value: self.0.clone(),
        })?;
        let alpha = (percent / 100.0 * 255.0).round() as u8;

        Ok(Self(format!("#{rgb}{alpha:02X}")))
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Color {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Color {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applies_opacity_to_hex_colors() {
        let base = Color::parse("#2196F3").expect("valid");
        assert_eq!(base.with_opacity(50.0).expect("opacity").as_str(), "#2196F380");
        assert_eq!(base.with_opacity(0.0).expect("opacity").as_str(), "#2196F300");

        let translucent = Color::parse("#aabbcc40").expect("valid");
        assert_eq!(translucent.with_opacity(100.0).expect("opacity").as_str(), "#aabbccFF");
    }

    #[test]
    fn opacity_rejects_named_colors_and_bad_percentages() {
        let named = Color::parse("red").expect("valid");
        assert!(matches!(
            named.with_opacity(50.0),
            Err(ValidationError::OpacityRequiresHex { .. })
        ));

        let hex = Color::parse("#000000").expect("valid");
        assert!(matches!(
            hex.with_opacity(120.0),
            Err(ValidationError::OutOfRange { field: "opacity", .. })
        ));
    }

    #[test]
    fn deserialization_validates() {
        let ok: Color = serde_json::from_str("\"Teal\"").expect("named color");
        assert_eq!(ok.as_str(), "teal");
        assert!(serde_json::from_str::<Color>("\"not-a-color\"").is_err());
    }
}
