use serde::Serialize;

use crate::registry::{LineStyle, MarkerPosition, MarkerShape};
use crate::{validate, ChartTime, Color, ValidationError};

/// Annotation drawn at one bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    time: ChartTime,
    position: MarkerPosition,
    shape: MarkerShape,
    color: Color,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<f64>,
}

impl Marker {
    pub fn new(
        time: ChartTime,
        position: MarkerPosition,
        shape: MarkerShape,
        color: impl AsRef<str>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            time,
            position,
            shape,
            color: Color::parse(color.as_ref())?,
            text: None,
            size: None,
        })
    }

    pub fn with_text(mut self, text: &str) -> Result<Self, ValidationError> {
        self.text = Some(validate::non_empty("text", text)?);
        Ok(self)
    }

    /// Size multiplier relative to the default marker.
    pub fn with_size(mut self, size: f64) -> Result<Self, ValidationError> {
        self.size = Some(validate::positive("size", size)?);
        Ok(self)
    }

    pub fn time(&self) -> ChartTime {
        self.time
    }

    pub fn position(&self) -> MarkerPosition {
        self.position
    }

    pub fn shape(&self) -> MarkerShape {
        self.shape
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

/// Horizontal line at a fixed price.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceLine {
    price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    line_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    line_style: Option<LineStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    axis_label_visible: Option<bool>,
}

impl PriceLine {
    pub fn new(price: f64) -> Result<Self, ValidationError> {
        Ok(Self {
            price: validate::finite("price", price)?,
            color: None,
            line_width: None,
            line_style: None,
            title: None,
            axis_label_visible: None,
        })
    }

    pub fn with_color(mut self, color: impl AsRef<str>) -> Result<Self, ValidationError> {
        self.color = Some(Color::parse(color.as_ref())?);
        Ok(self)
    }

    pub fn with_line_width(mut self, width: u32) -> Result<Self, ValidationError> {
        self.line_width = Some(validate::line_width("line_width", width)?);
        Ok(self)
    }

    pub fn with_line_style(mut self, style: LineStyle) -> Self {
        self.line_style = Some(style);
        self
    }

    /// Axis label text; may be empty.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_axis_label_visible(mut self, visible: bool) -> Self {
        self.axis_label_visible = Some(visible);
        self
    }

    pub fn price(&self) -> f64 {
        self.price
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn marker_serializes_registry_names() {
        let marker = Marker::new(
            ChartTime::parse("2024-03-01T14:30:00Z").expect("time"),
            MarkerPosition::BelowBar,
            MarkerShape::ArrowUp,
            "#26a69a",
        )
        .expect("marker")
        .with_size(2.0)
        .expect("size");
        assert_eq!(
            serde_json::to_value(marker).expect("serialize"),
            json!({
                "time": 1709303400,
                "position": "belowBar",
                "shape": "arrowUp",
                "color": "#26a69a",
                "size": 2.0
            })
        );
    }

    #[test]
    fn price_line_validates_inputs() {
        assert!(PriceLine::new(f64::NAN).is_err());
        let line = PriceLine::new(101.5)
            .expect("price")
            .with_line_style(LineStyle::Dashed)
            .with_title("");
        assert_eq!(
            serde_json::to_value(line).expect("serialize"),
            json!({"price": 101.5, "line_style": 2, "title": ""})
        );
        assert!(matches!(
            PriceLine::new(1.0).expect("price").with_line_width(20),
            Err(ValidationError::OutOfRange { .. })
        ));
    }
}
