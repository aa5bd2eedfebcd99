use serde::Serialize;

use crate::registry::{CrosshairMode, LineStyle, PriceScaleMode};
use crate::{validate, Color, ValidationError};

/// Chart background fill.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Background {
    Solid {
        color: Color,
    },
    #[serde(rename = "gradient")]
    VerticalGradient {
        top_color: Color,
        bottom_color: Color,
    },
}

impl Background {
    pub fn solid(color: impl AsRef<str>) -> Result<Self, ValidationError> {
        Ok(Self::Solid {
            color: Color::parse_field("background", color.as_ref())?,
        })
    }

    pub fn vertical_gradient(
        top: impl AsRef<str>,
        bottom: impl AsRef<str>,
    ) -> Result<Self, ValidationError> {
        Ok(Self::VerticalGradient {
            top_color: Color::parse_field("top_color", top.as_ref())?,
            bottom_color: Color::parse_field("bottom_color", bottom.as_ref())?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LayoutOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    background: Option<Background>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    font_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    attribution_logo: Option<bool>,
}

impl LayoutOptions {
    value_setters! {
        with_background => background: Background;
    }

    color_setters! {
        with_text_color => text_color;
    }

    flag_setters! {
        with_attribution_logo => attribution_logo;
    }

    pub fn with_font_size(mut self, size: u32) -> Result<Self, ValidationError> {
        self.font_size = Some(validate::positive_int("font_size", size)?);
        Ok(self)
    }

    pub fn with_font_family(mut self, family: &str) -> Result<Self, ValidationError> {
        self.font_family = Some(validate::non_empty("font_family", family)?);
        Ok(self)
    }

    pub fn background(&self) -> Option<&Background> {
        self.background.as_ref()
    }

    pub fn text_color(&self) -> Option<&Color> {
        self.text_color.as_ref()
    }
}

/// One family of grid lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GridLineOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    style: Option<LineStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    visible: Option<bool>,
}

impl GridLineOptions {
    color_setters! {
        with_color => color;
    }

    value_setters! {
        with_style => style: LineStyle;
    }

    flag_setters! {
        with_visible => visible;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GridOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    vert_lines: Option<GridLineOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    horz_lines: Option<GridLineOptions>,
}

impl GridOptions {
    value_setters! {
        with_vert_lines => vert_lines: GridLineOptions;
        with_horz_lines => horz_lines: GridLineOptions;
    }

    /// Same settings for both directions.
    pub fn with_lines(self, lines: GridLineOptions) -> Self {
        self.with_vert_lines(lines.clone()).with_horz_lines(lines)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CrosshairLineOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    style: Option<LineStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    label_visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    label_background_color: Option<Color>,
}

impl CrosshairLineOptions {
    color_setters! {
        with_color => color;
        with_label_background_color => label_background_color;
    }

    line_width_setters! {
        with_width => width;
    }

    value_setters! {
        with_style => style: LineStyle;
    }

    flag_setters! {
        with_visible => visible;
        with_label_visible => label_visible;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CrosshairOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    mode: Option<CrosshairMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    vert_line: Option<CrosshairLineOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    horz_line: Option<CrosshairLineOptions>,
}

impl CrosshairOptions {
    value_setters! {
        with_mode => mode: CrosshairMode;
        with_vert_line => vert_line: CrosshairLineOptions;
        with_horz_line => horz_line: CrosshairLineOptions;
    }

    pub fn mode(&self) -> Option<CrosshairMode> {
        self.mode
    }
}

/// Empty space above and below the series, as fractions of the pane height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScaleMargins {
    top: f64,
    bottom: f64,
}

impl ScaleMargins {
    /// Both margins in `[0, 1]` and together no more than the full pane.
    pub fn new(top: f64, bottom: f64) -> Result<Self, ValidationError> {
        let top = validate::fraction("top", top)?;
        let bottom = validate::fraction("bottom", bottom)?;
        validate::fraction("scale_margins", top + bottom)?;
        Ok(Self { top, bottom })
    }

    pub fn top(&self) -> f64 {
        self.top
    }

    pub fn bottom(&self) -> f64 {
        self.bottom
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PriceScaleOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    auto_scale: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mode: Option<PriceScaleMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    invert_scale: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    align_labels: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scale_margins: Option<ScaleMargins>,
    #[serde(skip_serializing_if = "Option::is_none")]
    border_visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    border_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    entire_text_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    minimum_width: Option<u32>,
}

impl PriceScaleOptions {
    flag_setters! {
        with_visible => visible;
        with_auto_scale => auto_scale;
        with_invert_scale => invert_scale;
        with_align_labels => align_labels;
        with_border_visible => border_visible;
        with_entire_text_only => entire_text_only;
    }

    value_setters! {
        with_mode => mode: PriceScaleMode;
        with_scale_margins => scale_margins: ScaleMargins;
        with_minimum_width => minimum_width: u32;
    }

    color_setters! {
        with_border_color => border_color;
        with_text_color => text_color;
    }

    pub fn mode(&self) -> Option<PriceScaleMode> {
        self.mode
    }

    pub fn scale_margins(&self) -> Option<ScaleMargins> {
        self.scale_margins
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimeScaleOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    right_offset: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bar_spacing: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_bar_spacing: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fix_left_edge: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fix_right_edge: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lock_visible_time_range_on_resize: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    right_bar_stays_on_scroll: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    border_visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    border_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    time_visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    seconds_visible: Option<bool>,
}

impl TimeScaleOptions {
    flag_setters! {
        with_fix_left_edge => fix_left_edge;
        with_fix_right_edge => fix_right_edge;
        with_lock_visible_time_range_on_resize => lock_visible_time_range_on_resize;
        with_right_bar_stays_on_scroll => right_bar_stays_on_scroll;
        with_border_visible => border_visible;
        with_visible => visible;
        with_time_visible => time_visible;
        with_seconds_visible => seconds_visible;
    }

    color_setters! {
        with_border_color => border_color;
    }

    /// Bars of empty space right of the last bar.
    pub fn with_right_offset(mut self, bars: f64) -> Result<Self, ValidationError> {
        self.right_offset = Some(validate::non_negative("right_offset", bars)?);
        Ok(self)
    }

    pub fn with_bar_spacing(mut self, pixels: f64) -> Result<Self, ValidationError> {
        self.bar_spacing = Some(validate::positive("bar_spacing", pixels)?);
        Ok(self)
    }

    pub fn with_min_bar_spacing(mut self, pixels: f64) -> Result<Self, ValidationError> {
        self.min_bar_spacing = Some(validate::positive("min_bar_spacing", pixels)?);
        Ok(self)
    }

    pub fn bar_spacing(&self) -> Option<f64> {
        self.bar_spacing
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LocalizationOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    locale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    date_format: Option<String>,
}

impl LocalizationOptions {
    pub fn with_locale(mut self, locale: &str) -> Result<Self, ValidationError> {
        self.locale = Some(validate::locale(locale)?);
        Ok(self)
    }

    /// Frontend date pattern such as `yyyy-MM-dd`.
    pub fn with_date_format(mut self, format: &str) -> Result<Self, ValidationError> {
        self.date_format = Some(validate::non_empty("date_format", format)?);
        Ok(self)
    }

    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }
}

/// Options for one chart pane.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    auto_size: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    layout: Option<LayoutOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    grid: Option<GridOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    crosshair: Option<CrosshairOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    left_price_scale: Option<PriceScaleOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    right_price_scale: Option<PriceScaleOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    time_scale: Option<TimeScaleOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    localization: Option<LocalizationOptions>,
}

impl ChartOptions {
    pub fn with_width(mut self, pixels: u32) -> Result<Self, ValidationError> {
        self.width = Some(validate::positive_int("width", pixels)?);
        Ok(self)
    }

    pub fn with_height(mut self, pixels: u32) -> Result<Self, ValidationError> {
        self.height = Some(validate::positive_int("height", pixels)?);
        Ok(self)
    }

    flag_setters! {
        with_auto_size => auto_size;
    }

    value_setters! {
        with_layout => layout: LayoutOptions;
        with_grid => grid: GridOptions;
        with_crosshair => crosshair: CrosshairOptions;
        with_left_price_scale => left_price_scale: PriceScaleOptions;
        with_right_price_scale => right_price_scale: PriceScaleOptions;
        with_time_scale => time_scale: TimeScaleOptions;
        with_localization => localization: LocalizationOptions;
    }

    pub fn width(&self) -> Option<u32> {
        self.width
    }

    pub fn height(&self) -> Option<u32> {
        self.height
    }

    pub fn layout(&self) -> Option<&LayoutOptions> {
        self.layout.as_ref()
    }

    pub fn crosshair(&self) -> Option<&CrosshairOptions> {
        self.crosshair.as_ref()
    }

    pub fn right_price_scale(&self) -> Option<&PriceScaleOptions> {
        self.right_price_scale.as_ref()
    }

    pub fn time_scale(&self) -> Option<&TimeScaleOptions> {
        self.time_scale.as_ref()
    }

    pub fn localization(&self) -> Option<&LocalizationOptions> {
        self.localization.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn unset_groups_serialize_empty() {
        let value = serde_json::to_value(ChartOptions::default()).expect("serialize");
        assert_eq!(value, json!({}));
    }

    #[test]
    fn nested_groups_compose() {
        let options = ChartOptions::default()
            .with_height(400)
            .expect("height")
            .with_layout(
                LayoutOptions::default()
                    .with_background(Background::solid("#ffffff").expect("color"))
                    .with_text_color("#333333")
                    .expect("color"),
            )
            .with_crosshair(CrosshairOptions::default().with_mode(CrosshairMode::Magnet))
            .with_right_price_scale(
                PriceScaleOptions::default()
                    .with_scale_margins(ScaleMargins::new(0.1, 0.2).expect("margins")),
            );

        let value = serde_json::to_value(&options).expect("serialize");
        assert_eq!(
            value,
            json!({
                "height": 400,
                "layout": {
                    "background": {"type": "solid", "color": "#ffffff"},
                    "text_color": "#333333"
                },
                "crosshair": {"mode": 1},
                "right_price_scale": {"scale_margins": {"top": 0.1, "bottom": 0.2}}
            })
        );
    }

    #[test]
    fn gradient_background_uses_frontend_tag() {
        let value = serde_json::to_value(
            Background::vertical_gradient("#000000", "#00000000").expect("colors"),
        )
        .expect("serialize");
        assert_eq!(
            value,
            json!({"type": "gradient", "top_color": "#000000", "bottom_color": "#00000000"})
        );
    }

    #[test]
    fn setters_validate_their_domain() {
        assert!(matches!(
            ScaleMargins::new(0.6, 0.6),
            Err(ValidationError::OutOfRange { field: "scale_margins", .. })
        ));
        assert!(TimeScaleOptions::default().with_bar_spacing(0.0).is_err());
        assert!(ChartOptions::default().with_width(0).is_err());
        assert!(CrosshairLineOptions::default().with_width(11).is_err());
        assert!(matches!(
            GridLineOptions::default().with_color("#zz"),
            Err(ValidationError::InvalidColor { field: "color", .. })
        ));
        let localization = LocalizationOptions::default()
            .with_locale("de_DE")
            .expect("locale");
        assert_eq!(localization.locale(), Some("de-DE"));
    }
}
