//! Closed registries of the enumerations understood by the frontend.
//!
//! Every registry enum has a stable name (`as_str`, `Display`, `FromStr`) and
//! a fixed wire form: style and mode enums travel as their numeric code, the
//! shape, position and kind enums travel as their name.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ValidationError;

#[derive(Deserialize)]
#[serde(untagged)]
enum WireName {
    Code(u8),
    Text(String),
}

/// Case and separator insensitive form used for name lookups, so that
/// `arrow_up`, `arrow-up` and `ArrowUp` all resolve to `arrowUp`.
fn fold_name(value: &str) -> String {
    value
        .trim()
        .chars()
        .filter(|ch| !matches!(ch, '_' | '-' | ' '))
        .map(|ch| ch.to_ascii_lowercase())
        .collect()
}

macro_rules! registry {
    (@wire text, $value:expr, $serializer:expr) => {
        $serializer.serialize_str($value.as_str())
    };
    (@wire code, $value:expr, $serializer:expr) => {
        $serializer.serialize_u8($value.code())
    };
    (
        $(#[$meta:meta])*
        pub enum $name:ident as $label:literal, wire = $wire:ident {
            $($(#[$vmeta:meta])* $variant:ident = ($code:literal, $text:literal),)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant,)+];

            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }

            pub const fn code(self) -> u8 {
                match self {
                    $(Self::$variant => $code,)+
                }
            }

            pub fn from_code(code: u8) -> Option<Self> {
                Self::ALL.iter().copied().find(|variant| variant.code() == code)
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                let wanted = fold_name(value);
                Self::ALL
                    .iter()
                    .copied()
                    .find(|variant| fold_name(variant.as_str()) == wanted)
                    .ok_or_else(|| ValidationError::UnknownVariant {
                        registry: $label,
                        value: value.trim().to_owned(),
                    })
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                registry!(@wire $wire, self, serializer)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                match WireName::deserialize(deserializer)? {
                    WireName::Code(code) => Self::from_code(code).ok_or_else(|| {
                        D::Error::custom(format!("unknown {} code {code}", $label))
                    }),
                    WireName::Text(text) => text.parse().map_err(D::Error::custom),
                }
            }
        }
    };
}

registry! {
    /// Series types the frontend can render.
    pub enum SeriesKind as "series kind", wire = text {
        Line = (0, "line"),
        Area = (1, "area"),
        Histogram = (2, "histogram"),
        Baseline = (3, "baseline"),
        Candlestick = (4, "candlestick"),
        Bar = (5, "bar"),
        Band = (6, "band"),
        Ribbon = (7, "ribbon"),
    }
}

registry! {
    /// Shapes of the validated data point records.
    pub enum DataPointKind as "data point kind", wire = text {
        Line = (0, "line"),
        Area = (1, "area"),
        Histogram = (2, "histogram"),
        Baseline = (3, "baseline"),
        Candlestick = (4, "candlestick"),
        Bar = (5, "bar"),
        Ohlcv = (6, "ohlcv"),
        Band = (7, "band"),
        Ribbon = (8, "ribbon"),
    }
}

registry! {
    pub enum LineStyle as "line style", wire = code {
        Solid = (0, "solid"),
        Dotted = (1, "dotted"),
        Dashed = (2, "dashed"),
        LargeDashed = (3, "largeDashed"),
        SparseDotted = (4, "sparseDotted"),
    }
}

registry! {
    pub enum LineType as "line type", wire = code {
        Simple = (0, "simple"),
        WithSteps = (1, "withSteps"),
        Curved = (2, "curved"),
    }
}

registry! {
    pub enum CrosshairMode as "crosshair mode", wire = code {
        Normal = (0, "normal"),
        /// Snaps the horizontal line to the nearest series value.
        Magnet = (1, "magnet"),
        Hidden = (2, "hidden"),
    }
}

registry! {
    pub enum PriceScaleMode as "price scale mode", wire = code {
        Normal = (0, "normal"),
        Logarithmic = (1, "logarithmic"),
        Percentage = (2, "percentage"),
        IndexedTo100 = (3, "indexedTo100"),
    }
}

registry! {
    pub enum MarkerShape as "marker shape", wire = text {
        Circle = (0, "circle"),
        Square = (1, "square"),
        ArrowUp = (2, "arrowUp"),
        ArrowDown = (3, "arrowDown"),
    }
}

registry! {
    pub enum MarkerPosition as "marker position", wire = text {
        AboveBar = (0, "aboveBar"),
        BelowBar = (1, "belowBar"),
        InBar = (2, "inBar"),
    }
}

registry! {
    pub enum PriceFormatKind as "price format", wire = text {
        Price = (0, "price"),
        Volume = (1, "volume"),
        Percent = (2, "percent"),
    }
}

registry! {
    pub enum LastPriceAnimationMode as "last price animation mode", wire = code {
        Disabled = (0, "disabled"),
        Continuous = (1, "continuous"),
        OnDataUpdate = (2, "onDataUpdate"),
    }
}

registry! {
    pub enum PriceLineSource as "price line source", wire = code {
        LastBar = (0, "lastBar"),
        LastVisible = (1, "lastVisible"),
    }
}

impl SeriesKind {
    /// Point kind produced when a series of this kind is built from a table.
    pub const fn native_point(self) -> DataPointKind {
        match self {
            Self::Line => DataPointKind::Line,
            Self::Area => DataPointKind::Area,
            Self::Histogram => DataPointKind::Histogram,
            Self::Baseline => DataPointKind::Baseline,
            Self::Candlestick => DataPointKind::Candlestick,
            Self::Bar => DataPointKind::Bar,
            Self::Band => DataPointKind::Band,
            Self::Ribbon => DataPointKind::Ribbon,
        }
    }

    /// Every point kind a series of this kind can hold.
    pub const fn accepted_points(self) -> &'static [DataPointKind] {
        match self {
            Self::Line => &[DataPointKind::Line],
            Self::Area => &[DataPointKind::Area],
            Self::Histogram => &[DataPointKind::Histogram],
            Self::Baseline => &[DataPointKind::Baseline],
            Self::Candlestick => &[DataPointKind::Candlestick, DataPointKind::Ohlcv],
            Self::Bar => &[DataPointKind::Bar, DataPointKind::Ohlcv],
            Self::Band => &[DataPointKind::Band],
            Self::Ribbon => &[DataPointKind::Ribbon],
        }
    }

    pub fn accepts(self, point: DataPointKind) -> bool {
        self.accepted_points().contains(&point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_loosely() {
        assert_eq!(MarkerShape::from_str("arrow_up").expect("must parse"), MarkerShape::ArrowUp);
        assert_eq!(LineStyle::from_str("Large-Dashed").expect("must parse"), LineStyle::LargeDashed);
        assert_eq!(
            PriceScaleMode::from_str("indexed_to_100").expect("must parse"),
            PriceScaleMode::IndexedTo100
        );
    }

    #[test]
    fn rejects_unknown_names() {
        let err = SeriesKind::from_str("pie").expect_err("must fail");
        assert!(matches!(
            err,
            ValidationError::UnknownVariant { registry: "series kind", .. }
        ));
    }

    #[test]
    fn wire_form_depends_on_registry() {
        assert_eq!(serde_json::to_value(LineStyle::Dashed).expect("serialize"), 2);
        assert_eq!(
            serde_json::to_value(MarkerPosition::BelowBar).expect("serialize"),
            "belowBar"
        );
    }

    #[test]
    fn deserializes_from_code_or_name() {
        let from_code: CrosshairMode = serde_json::from_str("1").expect("code");
        let from_name: CrosshairMode = serde_json::from_str("\"magnet\"").expect("name");
        assert_eq!(from_code, CrosshairMode::Magnet);
        assert_eq!(from_name, CrosshairMode::Magnet);
    }

    #[test]
    fn ohlc_series_accept_ohlcv_points() {
        assert!(SeriesKind::Candlestick.accepts(DataPointKind::Ohlcv));
        assert!(SeriesKind::Bar.accepts(DataPointKind::Ohlcv));
        assert!(!SeriesKind::Line.accepts(DataPointKind::Candlestick));
        for kind in SeriesKind::ALL {
            assert!(kind.accepts(kind.native_point()));
        }
    }
}
