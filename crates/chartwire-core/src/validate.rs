//! Pure field validators.
//!
//! Each validator takes the field name it is checking plus the raw value and
//! returns the normalized value or a [`ValidationError`] naming the field.

use crate::ValidationError;

/// Widest line the frontend draws without artefacts.
pub const MAX_LINE_WIDTH: u32 = 10;
/// Maximum number of decimals a price formatter accepts.
pub const MAX_PRECISION: u8 = 15;

/// Named colors from CSS Color Module Level 4, plus `transparent`.
const CSS_NAMED_COLORS: &[&str] = &[
    "aliceblue", "antiquewhite", "aqua", "aquamarine", "azure", "beige", "bisque", "black",
    "blanchedalmond", "blue", "blueviolet", "brown", "burlywood", "cadetblue", "chartreuse",
    "chocolate", "coral", "cornflowerblue", "cornsilk", "crimson", "cyan", "darkblue",
    "darkcyan", "darkgoldenrod", "darkgray", "darkgreen", "darkgrey", "darkkhaki",
    "darkmagenta", "darkolivegreen", "darkorange", "darkorchid", "darkred", "darksalmon",
    "darkseagreen", "darkslateblue", "darkslategray", "darkslategrey", "darkturquoise",
    "darkviolet", "deeppink", "deepskyblue", "dimgray", "dimgrey", "dodgerblue", "firebrick",
    "floralwhite", "forestgreen", "fuchsia", "gainsboro", "ghostwhite", "gold", "goldenrod",
    "gray", "green", "greenyellow", "grey", "honeydew", "hotpink", "indianred", "indigo",
    "ivory", "khaki", "lavender", "lavenderblush", "lawngreen", "lemonchiffon", "lightblue",
    "lightcoral", "lightcyan", "lightgoldenrodyellow", "lightgray", "lightgreen", "lightgrey",
    "lightpink", "lightsalmon", "lightseagreen", "lightskyblue", "lightslategray",
    "lightslategrey", "lightsteelblue", "lightyellow", "lime", "limegreen", "linen", "magenta",
    "maroon", "mediumaquamarine", "mediumblue", "mediumorchid", "mediumpurple",
    "mediumseagreen", "mediumslateblue", "mediumspringgreen", "mediumturquoise",
    "mediumvioletred", "midnightblue", "mintcream", "mistyrose", "moccasin", "navajowhite",
    "navy", "oldlace", "olive", "olivedrab", "orange", "orangered", "orchid", "palegoldenrod",
    "palegreen", "paleturquoise", "palevioletred", "papayawhip", "peachpuff", "peru", "pink",
    "plum", "powderblue", "purple", "rebeccapurple", "red", "rosybrown", "royalblue",
    "saddlebrown", "salmon", "sandybrown", "seagreen", "seashell", "sienna", "silver",
    "skyblue", "slateblue", "slategray", "slategrey", "snow", "springgreen", "steelblue", "tan",
    "teal", "thistle", "tomato", "transparent", "turquoise", "violet", "wheat", "white",
    "whitesmoke", "yellow", "yellowgreen",
];

/// Validate a color string.
///
/// Accepts `#RRGGBB` and `#RRGGBBAA` hex, kept as written, and CSS named
/// colors in any case, returned lower-cased. Outer whitespace is trimmed;
/// whitespace inside the value is rejected.
pub fn color(field: &'static str, input: &str) -> Result<String, ValidationError> {
    let trimmed = input.trim();
    let invalid = || ValidationError::InvalidColor {
        field,
        value: input.to_owned(),
    };

    if let Some(digits) = trimmed.strip_prefix('#') {
        let valid = matches!(digits.len(), 6 | 8) && digits.chars().all(|ch| ch.is_ascii_hexdigit());
        return if valid { Ok(trimmed.to_owned()) } else { Err(invalid()) };
    }

    let lowered = trimmed.to_ascii_lowercase();
    if CSS_NAMED_COLORS.binary_search(&lowered.as_str()).is_ok() {
        return Ok(lowered);
    }

    Err(invalid())
}

pub fn finite(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    Ok(value)
}

/// Widths, sizes and volumes.
pub fn non_negative(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    finite(field, value)?;
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(value)
}

pub fn positive(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    finite(field, value)?;
    if value <= 0.0 {
        return Err(ValidationError::NonPositiveValue { field });
    }
    Ok(value)
}

pub fn in_range(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<f64, ValidationError> {
    finite(field, value)?;
    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(value)
}

/// Percentage-like fields, `[0, 100]`.
pub fn percentage(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    in_range(field, value, 0.0, 100.0)
}

/// Fractions of the pane height, `[0, 1]`.
pub fn fraction(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    in_range(field, value, 0.0, 1.0)
}

pub fn positive_int(field: &'static str, value: u32) -> Result<u32, ValidationError> {
    if value == 0 {
        return Err(ValidationError::NonPositiveValue { field });
    }
    Ok(value)
}

pub fn line_width(field: &'static str, value: u32) -> Result<u32, ValidationError> {
    if value == 0 || value > MAX_LINE_WIDTH {
        return Err(ValidationError::OutOfRange {
            field,
            value: f64::from(value),
            min: 1.0,
            max: f64::from(MAX_LINE_WIDTH),
        });
    }
    Ok(value)
}

pub fn precision(field: &'static str, value: u8) -> Result<u8, ValidationError> {
    if value > MAX_PRECISION {
        return Err(ValidationError::OutOfRange {
            field,
            value: f64::from(value),
            min: 0.0,
            max: f64::from(MAX_PRECISION),
        });
    }
    Ok(value)
}

pub fn non_empty(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyText { field });
    }
    Ok(trimmed.to_owned())
}

/// Validate a BCP-47 shaped tag and normalize `_` separators to `-`.
///
/// The primary subtag must be 2-3 ASCII letters; every further subtag must be
/// 1-8 ASCII alphanumerics.
pub fn locale(input: &str) -> Result<String, ValidationError> {
    let normalized = input.trim().replace('_', "-");
    let mut subtags = normalized.split('-');

    let primary_ok = subtags.next().is_some_and(|primary| {
        (2..=3).contains(&primary.len()) && primary.chars().all(|ch| ch.is_ascii_alphabetic())
    });
    let rest_ok = subtags.all(|subtag| {
        (1..=8).contains(&subtag.len()) && subtag.chars().all(|ch| ch.is_ascii_alphanumeric())
    });

    if !(primary_ok && rest_ok) {
        return Err(ValidationError::InvalidLocale {
            value: input.to_owned(),
        });
    }

    Ok(normalized)
}
