use serde::Serialize;

use crate::registry::{LastPriceAnimationMode, LineStyle, LineType, PriceFormatKind, PriceLineSource};
use crate::{validate, Color, ValidationError};

/// How the price axis and labels format values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceFormat {
    #[serde(rename = "type")]
    kind: PriceFormatKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    precision: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_move: Option<f64>,
}

impl PriceFormat {
    pub fn new(kind: PriceFormatKind) -> Self {
        Self {
            kind,
            precision: None,
            min_move: None,
        }
    }

    pub fn price() -> Self {
        Self::new(PriceFormatKind::Price)
    }

    pub fn volume() -> Self {
        Self::new(PriceFormatKind::Volume)
    }

    pub fn percent() -> Self {
        Self::new(PriceFormatKind::Percent)
    }

    pub fn with_precision(mut self, decimals: u8) -> Result<Self, ValidationError> {
        self.precision = Some(validate::precision("precision", decimals)?);
        Ok(self)
    }

    /// Smallest price step, e.g. `0.01`.
    pub fn with_min_move(mut self, step: f64) -> Result<Self, ValidationError> {
        self.min_move = Some(validate::positive("min_move", step)?);
        Ok(self)
    }

    pub fn kind(&self) -> PriceFormatKind {
        self.kind
    }

    pub fn precision(&self) -> Option<u8> {
        self.precision
    }
}

/// Options shared by every series kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeriesOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    price_scale_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pane_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_value_visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    price_line_visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    price_line_source: Option<PriceLineSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    price_line_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    price_line_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    price_line_style: Option<LineStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    base_line_visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    base_line_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    price_format: Option<PriceFormat>,
}

impl SeriesOptions {
    /// Display title; series are not identified by it.
    pub fn with_title(mut self, title: &str) -> Result<Self, ValidationError> {
        self.title = Some(validate::non_empty("title", title)?);
        Ok(self)
    }

    /// `""` puts the series on an overlay scale.
    pub fn with_price_scale_id(mut self, id: impl Into<String>) -> Self {
        self.price_scale_id = Some(id.into());
        self
    }

    flag_setters! {
        with_visible => visible;
        with_last_value_visible => last_value_visible;
        with_price_line_visible => price_line_visible;
        with_base_line_visible => base_line_visible;
    }

    value_setters! {
        with_pane_id => pane_id: u32;
        with_price_line_source => price_line_source: PriceLineSource;
        with_price_line_style => price_line_style: LineStyle;
        with_price_format => price_format: PriceFormat;
    }

    line_width_setters! {
        with_price_line_width => price_line_width;
    }

    color_setters! {
        with_price_line_color => price_line_color;
        with_base_line_color => base_line_color;
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn visible(&self) -> Option<bool> {
        self.visible
    }

    pub fn price_scale_id(&self) -> Option<&str> {
        self.price_scale_id.as_deref()
    }

    pub fn pane_id(&self) -> Option<u32> {
        self.pane_id
    }

    pub fn price_format(&self) -> Option<PriceFormat> {
        self.price_format
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LineStyleOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    line_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    line_style: Option<LineStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    line_type: Option<LineType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    line_visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    point_markers_visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    point_markers_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    crosshair_marker_visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    crosshair_marker_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_price_animation: Option<LastPriceAnimationMode>,
}

impl LineStyleOptions {
    color_setters! {
        with_color => color;
    }

    line_width_setters! {
        with_line_width => line_width;
    }

    value_setters! {
        with_line_style => line_style: LineStyle;
        with_line_type => line_type: LineType;
        with_last_price_animation => last_price_animation: LastPriceAnimationMode;
    }

    flag_setters! {
        with_line_visible => line_visible;
        with_point_markers_visible => point_markers_visible;
        with_crosshair_marker_visible => crosshair_marker_visible;
    }

    pub fn with_point_markers_radius(mut self, radius: f64) -> Result<Self, ValidationError> {
        self.point_markers_radius = Some(validate::positive("point_markers_radius", radius)?);
        Ok(self)
    }

    pub fn with_crosshair_marker_radius(mut self, radius: f64) -> Result<Self, ValidationError> {
        self.crosshair_marker_radius =
            Some(validate::non_negative("crosshair_marker_radius", radius)?);
        Ok(self)
    }

    pub fn color(&self) -> Option<&Color> {
        self.color.as_ref()
    }

    pub fn line_width(&self) -> Option<u32> {
        self.line_width
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AreaStyleOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    line_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bottom_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    line_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    line_style: Option<LineStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    line_type: Option<LineType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    invert_filled_area: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    crosshair_marker_visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_price_animation: Option<LastPriceAnimationMode>,
}

impl AreaStyleOptions {
    color_setters! {
        with_line_color => line_color;
        with_top_color => top_color;
        with_bottom_color => bottom_color;
    }

    line_width_setters! {
        with_line_width => line_width;
    }

    value_setters! {
        with_line_style => line_style: LineStyle;
        with_line_type => line_type: LineType;
        with_last_price_animation => last_price_animation: LastPriceAnimationMode;
    }

    flag_setters! {
        with_invert_filled_area => invert_filled_area;
        with_crosshair_marker_visible => crosshair_marker_visible;
    }

    /// Fill from `color` at the line fading to fully transparent at the base.
    pub fn with_fade(self, color: &Color, opacity: f64) -> Result<Self, ValidationError> {
        let top = color.with_opacity(opacity)?;
        let bottom = color.with_opacity(0.0)?;
        self.with_line_color(color.as_str())?
            .with_top_color(top.as_str())?
            .with_bottom_color(bottom.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HistogramStyleOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    base: Option<f64>,
}

impl HistogramStyleOptions {
    color_setters! {
        with_color => color;
    }

    /// Value the columns grow from.
    pub fn with_base(mut self, base: f64) -> Result<Self, ValidationError> {
        self.base = Some(validate::finite("base", base)?);
        Ok(self)
    }

    pub fn color(&self) -> Option<&Color> {
        self.color.as_ref()
    }
}

/// Reference level of a baseline series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BaseValue {
    Price { price: f64 },
}

impl BaseValue {
    pub fn price(price: f64) -> Result<Self, ValidationError> {
        Ok(Self::Price {
            price: validate::finite("base_value", price)?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BaselineStyleOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    base_value: Option<BaseValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_line_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_fill_color1: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_fill_color2: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bottom_line_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bottom_fill_color1: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bottom_fill_color2: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    line_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    line_style: Option<LineStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_price_animation: Option<LastPriceAnimationMode>,
}

impl BaselineStyleOptions {
    value_setters! {
        with_base_value => base_value: BaseValue;
        with_line_style => line_style: LineStyle;
        with_last_price_animation => last_price_animation: LastPriceAnimationMode;
    }

    color_setters! {
        with_top_line_color => top_line_color;
        with_top_fill_color1 => top_fill_color1;
        with_top_fill_color2 => top_fill_color2;
        with_bottom_line_color => bottom_line_color;
        with_bottom_fill_color1 => bottom_fill_color1;
        with_bottom_fill_color2 => bottom_fill_color2;
    }

    line_width_setters! {
        with_line_width => line_width;
    }

    pub fn base_value(&self) -> Option<BaseValue> {
        self.base_value
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CandlestickStyleOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    up_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    down_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    wick_visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    border_visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    border_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    border_up_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    border_down_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    wick_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    wick_up_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    wick_down_color: Option<Color>,
}

impl CandlestickStyleOptions {
    color_setters! {
        with_up_color => up_color;
        with_down_color => down_color;
        with_border_color => border_color;
        with_border_up_color => border_up_color;
        with_border_down_color => border_down_color;
        with_wick_color => wick_color;
        with_wick_up_color => wick_up_color;
        with_wick_down_color => wick_down_color;
    }

    flag_setters! {
        with_wick_visible => wick_visible;
        with_border_visible => border_visible;
    }

    pub fn up_color(&self) -> Option<&Color> {
        self.up_color.as_ref()
    }

    pub fn down_color(&self) -> Option<&Color> {
        self.down_color.as_ref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BarStyleOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    up_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    down_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    open_visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thin_bars: Option<bool>,
}

impl BarStyleOptions {
    color_setters! {
        with_up_color => up_color;
        with_down_color => down_color;
    }

    flag_setters! {
        with_open_visible => open_visible;
        with_thin_bars => thin_bars;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BandStyleOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    upper_line_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    middle_line_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lower_line_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    line_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    line_style: Option<LineStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    upper_fill_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lower_fill_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    upper_fill: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lower_fill: Option<bool>,
}

impl BandStyleOptions {
    color_setters! {
        with_upper_line_color => upper_line_color;
        with_middle_line_color => middle_line_color;
        with_lower_line_color => lower_line_color;
        with_upper_fill_color => upper_fill_color;
        with_lower_fill_color => lower_fill_color;
    }

    line_width_setters! {
        with_line_width => line_width;
    }

    value_setters! {
        with_line_style => line_style: LineStyle;
    }

    flag_setters! {
        with_upper_fill => upper_fill;
        with_lower_fill => lower_fill;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RibbonStyleOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    upper_line_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lower_line_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    line_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    line_style: Option<LineStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fill_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fill_visible: Option<bool>,
}

impl RibbonStyleOptions {
    color_setters! {
        with_upper_line_color => upper_line_color;
        with_lower_line_color => lower_line_color;
        with_fill_color => fill_color;
    }

    line_width_setters! {
        with_line_width => line_width;
    }

    value_setters! {
        with_line_style => line_style: LineStyle;
    }

    flag_setters! {
        with_fill_visible => fill_visible;
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn price_format_renames_kind_to_type() {
        let format = PriceFormat::price()
            .with_precision(2)
            .expect("precision")
            .with_min_move(0.01)
            .expect("min move");
        assert_eq!(
            serde_json::to_value(format).expect("serialize"),
            json!({"type": "price", "precision": 2, "min_move": 0.01})
        );
        assert!(PriceFormat::volume().with_min_move(0.0).is_err());
        assert!(PriceFormat::percent().with_precision(16).is_err());
    }

    #[test]
    fn only_set_fields_are_emitted() {
        let style = LineStyleOptions::default()
            .with_color("#2196F3")
            .expect("color")
            .with_line_style(LineStyle::Dotted);
        assert_eq!(
            serde_json::to_value(style).expect("serialize"),
            json!({"color": "#2196F3", "line_style": 1})
        );
    }

    #[test]
    fn area_fade_derives_transparent_fills() {
        let base = Color::parse("#2196F3").expect("color");
        let style = AreaStyleOptions::default().with_fade(&base, 40.0).expect("fade");
        assert_eq!(
            serde_json::to_value(style).expect("serialize"),
            json!({
                "line_color": "#2196F3",
                "top_color": "#2196F366",
                "bottom_color": "#2196F300"
            })
        );
    }

    #[test]
    fn baseline_base_value_is_tagged() {
        let style = BaselineStyleOptions::default()
            .with_base_value(BaseValue::price(25.0).expect("finite"));
        assert_eq!(
            serde_json::to_value(style).expect("serialize"),
            json!({"base_value": {"type": "price", "price": 25.0}})
        );
    }

    #[test]
    fn style_setters_name_the_failing_field() {
        let err = CandlestickStyleOptions::default()
            .with_wick_down_color("blurple")
            .expect_err("must fail");
        assert!(matches!(
            err,
            ValidationError::InvalidColor { field: "wick_down_color", .. }
        ));
        assert!(matches!(
            RibbonStyleOptions::default().with_line_width(0),
            Err(ValidationError::OutOfRange { field: "line_width", .. })
        ));
        assert!(SeriesOptions::default().with_title("  ").is_err());
    }
}
