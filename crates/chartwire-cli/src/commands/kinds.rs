use chartwire_core::{DataPointKind, LogicalField, SeriesKind};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct KindEntry {
    kind: SeriesKind,
    accepts: Vec<PointEntry>,
}

#[derive(Debug, Serialize)]
pub struct PointEntry {
    kind: DataPointKind,
    required: Vec<&'static str>,
    optional: Vec<&'static str>,
}

/// Snake_case field names, which are also the default column names.
fn names(fields: &[LogicalField]) -> Vec<&'static str> {
    fields.iter().map(|field| field.as_str()).collect()
}

pub fn registry() -> Vec<KindEntry> {
    SeriesKind::ALL
        .iter()
        .map(|kind| KindEntry {
            kind: *kind,
            accepts: kind
                .accepted_points()
                .iter()
                .map(|point| PointEntry {
                    kind: *point,
                    required: names(point.required_fields()),
                    optional: names(point.optional_fields()),
                })
                .collect(),
        })
        .collect()
}
