//! # Option Models
//!
//! Configuration bundles for charts and series.
//!
//! Every group is `Default` with all fields unset. Setters consume the group
//! and hand it back, validated setters wrapped in `Result`. Unset fields are
//! skipped on output so the frontend applies its own defaults.
//!
//! | Group | Scope |
//! |-------|-------|
//! | [`ChartOptions`] | Layout, grid, crosshair, price/time scales, localization |
//! | [`SeriesOptions`] | Title, visibility, scale/pane placement, price line, price format |
//! | `*StyleOptions` | Per-kind drawing style, owned by exactly one series |

macro_rules! flag_setters {
    ($($setter:ident => $field:ident;)+) => {
        $(
            pub fn $setter(mut self, value: bool) -> Self {
                self.$field = Some(value);
                self
            }
        )+
    };
}

macro_rules! value_setters {
    ($($setter:ident => $field:ident: $ty:ty;)+) => {
        $(
            pub fn $setter(mut self, value: $ty) -> Self {
                self.$field = Some(value);
                self
            }
        )+
    };
}

macro_rules! color_setters {
    ($($setter:ident => $field:ident;)+) => {
        $(
            pub fn $setter(
                mut self,
                color: impl AsRef<str>,
            ) -> Result<Self, $crate::ValidationError> {
                self.$field = Some($crate::Color::parse_field(
                    stringify!($field),
                    color.as_ref(),
                )?);
                Ok(self)
            }
        )+
    };
}

macro_rules! line_width_setters {
    ($($setter:ident => $field:ident;)+) => {
        $(
            pub fn $setter(mut self, width: u32) -> Result<Self, $crate::ValidationError> {
                self.$field = Some($crate::validate::line_width(stringify!($field), width)?);
                Ok(self)
            }
        )+
    };
}

mod chart;
mod series;

pub use chart::{
    Background, ChartOptions, CrosshairLineOptions, CrosshairOptions, GridLineOptions,
    GridOptions, LayoutOptions, LocalizationOptions, PriceScaleOptions, ScaleMargins,
    TimeScaleOptions,
};
pub use series::{
    AreaStyleOptions, BandStyleOptions, BarStyleOptions, BaseValue, BaselineStyleOptions,
    CandlestickStyleOptions, HistogramStyleOptions, LineStyleOptions, PriceFormat,
    RibbonStyleOptions, SeriesOptions,
};
