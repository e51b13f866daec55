//! JSON persistence of the canvas and `<area>` markup assembly.
//!
//! The persisted form is a single JSON string
//! `{"areas": [{"type", "coords", "attributes"}, ...], "img": url}` written to
//! the backing form field. An empty canvas persists as the empty string.

use serde::{Deserialize, Serialize};

use imagemap_core::{AreaError, AreaResult};
use imagemap_settings::MarkupSettings;

use crate::area::{Area, AreaAttributes};
use crate::canvas::AreaId;
use crate::model::{AreaCoords, Shape, ShapeKind};

/// Persisted form of one area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaRecord {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub coords: serde_json::Value,
    #[serde(default)]
    pub attributes: AreaAttributes,
}

impl AreaRecord {
    /// Validated shape and attributes described by this record.
    ///
    /// Fails with `UnknownShapeKind` for an unregistered `type` and with
    /// `InvalidShape` when the coordinates do not decode or do not pass the
    /// kind's validity predicate. Polygons always come back closed.
    pub fn decode(&self) -> AreaResult<(Shape, AreaAttributes)> {
        let kind: ShapeKind = self.kind.parse()?;
        let mut coords = AreaCoords::from_value(kind, self.coords.clone())?;
        if !coords.is_valid() {
            return Err(AreaError::invalid_shape(
                kind.as_str(),
                "coordinates are not valid for this kind",
            ));
        }
        if let AreaCoords::Polygon(polygon) = &mut coords {
            polygon.is_open = false;
        }
        Ok((Shape::from_coords(coords), self.attributes.clone()))
    }
}

#[derive(Serialize)]
struct EncodedMap<'a> {
    areas: Vec<AreaRecord>,
    img: Option<&'a str>,
}

/// Persisted document as read back. Areas stay raw so that one broken record
/// does not sink the others.
#[derive(Debug, Default, Deserialize)]
pub struct MapDocument {
    #[serde(default)]
    pub areas: Vec<serde_json::Value>,
    #[serde(default)]
    pub img: Option<String>,
}

impl MapDocument {
    /// Parses a persisted string. Blank input is an empty document.
    pub fn parse(json: &str) -> AreaResult<Self> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(json)?)
    }

    /// Decodes every area, in order, keeping each record's own outcome.
    pub fn decode_areas(&self) -> Vec<AreaResult<(Shape, AreaAttributes)>> {
        self.areas
            .iter()
            .map(|value| {
                let record: AreaRecord = serde_json::from_value(value.clone())
                    .map_err(|e| AreaError::invalid_shape("area", e.to_string()))?;
                record.decode()
            })
            .collect()
    }
}

/// Serializes `areas` (in the order given) with the image source.
///
/// Returns the empty string when there are no areas.
pub fn encode<'a>(areas: impl IntoIterator<Item = &'a Area>, img: Option<&str>) -> AreaResult<String> {
    let areas = areas
        .into_iter()
        .map(Area::to_record)
        .collect::<AreaResult<Vec<_>>>()?;
    if areas.is_empty() {
        return Ok(String::new());
    }
    Ok(serde_json::to_string(&EncodedMap { areas, img })?)
}

/// Concatenated `<area>` elements of `areas`.
pub fn html_markup<'a>(areas: impl IntoIterator<Item = &'a Area>, options: &MarkupSettings) -> String {
    areas
        .into_iter()
        .map(|area| area.to_map_element(options))
        .collect::<Vec<_>>()
        .join(options.separator.as_str())
}

/// One input record that did not make it onto the canvas.
#[derive(Debug)]
pub struct RejectedArea {
    /// Position of the record in its input (JSON array index or `<area>` tag
    /// ordinal).
    pub index: usize,
    pub error: AreaError,
}

/// Outcome of a batch load: partial success is normal.
#[derive(Debug, Default)]
pub struct ImportReport {
    pub imported: Vec<AreaId>,
    pub rejected: Vec<RejectedArea>,
}

impl ImportReport {
    pub fn is_complete(&self) -> bool {
        self.rejected.is_empty()
    }

    pub(crate) fn reject(&mut self, index: usize, error: AreaError) {
        tracing::warn!("Skipping area record {}: {}", index, error);
        self.rejected.push(RejectedArea { index, error });
    }
}
