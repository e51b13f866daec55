use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use imagemap_core::{AreaError, AreaResult};

use crate::handles::{EditAction, Handles};

mod circle;
mod polygon;
mod rectangle;

pub use circle::{AreaCircle, CircleCoords};
pub use polygon::{AreaPolygon, PolygonCoords};
pub use rectangle::{AreaRectangle, RectCoords};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn offset(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

/// Pointer modifiers that switch on drawing assists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { shift: false };
    pub const SHIFT: Modifiers = Modifiers { shift: true };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Circle,
    Polygon,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Rectangle, ShapeKind::Circle, ShapeKind::Polygon];

    /// Name used in the persisted JSON `type` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Circle => "circle",
            ShapeKind::Polygon => "polygon",
        }
    }

    /// Value of the HTML `shape` attribute.
    pub fn html_name(&self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rect",
            ShapeKind::Circle => "circle",
            ShapeKind::Polygon => "poly",
        }
    }

    pub fn from_html_name(name: &str) -> AreaResult<Self> {
        ShapeKind::ALL
            .into_iter()
            .find(|kind| kind.html_name().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| AreaError::unknown_kind(name))
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeKind {
    type Err = AreaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShapeKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| AreaError::unknown_kind(s))
    }
}

/// Behaviour shared by the three area variants.
///
/// Edits never mutate in place: `edit` and `apply_edit` return a candidate
/// that the caller previews and later commits with `set_coords`.
pub trait AreaShape {
    type Coords: Clone + PartialEq + fmt::Debug;

    const KIND: ShapeKind;

    fn coords(&self) -> &Self::Coords;
    fn set_coords(&mut self, coords: Self::Coords);

    /// Handle positions for the given coordinates.
    fn compute_handles(coords: &Self::Coords) -> Handles;

    /// Candidate produced by `action` moved by `dx`/`dy` starting from `coords`.
    fn edit(&self, coords: &Self::Coords, action: EditAction, dx: f64, dy: f64) -> Self::Coords;

    fn apply_edit(&self, action: EditAction, dx: f64, dy: f64) -> Self::Coords {
        self.edit(self.coords(), action, dx, dy)
    }

    /// Post-processing applied to an edit candidate before it is previewed.
    fn constrain_edit(
        &self,
        candidate: Self::Coords,
        _original: &Self::Coords,
        _constrain: bool,
    ) -> Self::Coords {
        candidate
    }

    /// Minimum-validity predicate for persisted areas.
    fn test_coords(coords: &Self::Coords) -> bool;

    fn from_html_coordinates(values: &[f64]) -> AreaResult<Self::Coords>;
    fn html_coordinates(coords: &Self::Coords) -> Vec<f64>;

    fn contains_point(&self, p: Point, tolerance: f64) -> bool;
}

/// Coordinates of any variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AreaCoords {
    Rectangle(RectCoords),
    Circle(CircleCoords),
    Polygon(PolygonCoords),
}

impl AreaCoords {
    pub fn kind(&self) -> ShapeKind {
        match self {
            AreaCoords::Rectangle(_) => ShapeKind::Rectangle,
            AreaCoords::Circle(_) => ShapeKind::Circle,
            AreaCoords::Polygon(_) => ShapeKind::Polygon,
        }
    }

    pub fn is_valid(&self) -> bool {
        match self {
            AreaCoords::Rectangle(c) => AreaRectangle::test_coords(c),
            AreaCoords::Circle(c) => AreaCircle::test_coords(c),
            AreaCoords::Polygon(c) => AreaPolygon::test_coords(c),
        }
    }

    pub fn handles(&self) -> Handles {
        match self {
            AreaCoords::Rectangle(c) => AreaRectangle::compute_handles(c),
            AreaCoords::Circle(c) => AreaCircle::compute_handles(c),
            AreaCoords::Polygon(c) => AreaPolygon::compute_handles(c),
        }
    }

    /// Flattened numbers for the HTML `coords` attribute.
    pub fn html_coordinates(&self) -> Vec<f64> {
        match self {
            AreaCoords::Rectangle(c) => AreaRectangle::html_coordinates(c),
            AreaCoords::Circle(c) => AreaCircle::html_coordinates(c),
            AreaCoords::Polygon(c) => AreaPolygon::html_coordinates(c),
        }
    }

    pub fn from_html_coordinates(kind: ShapeKind, values: &[f64]) -> AreaResult<Self> {
        Ok(match kind {
            ShapeKind::Rectangle => {
                AreaCoords::Rectangle(AreaRectangle::from_html_coordinates(values)?)
            }
            ShapeKind::Circle => AreaCoords::Circle(AreaCircle::from_html_coordinates(values)?),
            ShapeKind::Polygon => {
                AreaCoords::Polygon(AreaPolygon::from_html_coordinates(values)?)
            }
        })
    }

    /// Decodes the persisted `coords` object of the given kind.
    pub fn from_value(kind: ShapeKind, value: serde_json::Value) -> AreaResult<Self> {
        let value = if value.is_null() {
            serde_json::Value::Object(Default::default())
        } else {
            value
        };
        let invalid = |e: serde_json::Error| AreaError::invalid_shape(kind.as_str(), e.to_string());
        Ok(match kind {
            ShapeKind::Rectangle => AreaCoords::Rectangle(serde_json::from_value(value).map_err(invalid)?),
            ShapeKind::Circle => AreaCoords::Circle(serde_json::from_value(value).map_err(invalid)?),
            ShapeKind::Polygon => AreaCoords::Polygon(serde_json::from_value(value).map_err(invalid)?),
        })
    }
}

/// One area's geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rectangle(AreaRectangle),
    Circle(AreaCircle),
    Polygon(AreaPolygon),
}

impl Shape {
    /// Zero-sized shape anchored at `p`, as created by the first drawing click.
    pub fn new_at(kind: ShapeKind, p: Point) -> Self {
        match kind {
            ShapeKind::Rectangle => Shape::Rectangle(AreaRectangle::new(p.x, p.y, 0.0, 0.0)),
            ShapeKind::Circle => Shape::Circle(AreaCircle::new(p.x, p.y, 0.0)),
            ShapeKind::Polygon => Shape::Polygon(AreaPolygon::open_at(p)),
        }
    }

    pub fn from_coords(coords: AreaCoords) -> Self {
        match coords {
            AreaCoords::Rectangle(c) => Shape::Rectangle(AreaRectangle::from_coords(c)),
            AreaCoords::Circle(c) => Shape::Circle(AreaCircle::from_coords(c)),
            AreaCoords::Polygon(c) => Shape::Polygon(AreaPolygon::from_coords(c)),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Rectangle(_) => ShapeKind::Rectangle,
            Shape::Circle(_) => ShapeKind::Circle,
            Shape::Polygon(_) => ShapeKind::Polygon,
        }
    }

    pub fn coords(&self) -> AreaCoords {
        match self {
            Shape::Rectangle(s) => AreaCoords::Rectangle(*s.coords()),
            Shape::Circle(s) => AreaCoords::Circle(*s.coords()),
            Shape::Polygon(s) => AreaCoords::Polygon(s.coords().clone()),
        }
    }

    /// Commits new coordinates. Coordinates of another kind are rejected.
    pub fn set_coords(&mut self, coords: AreaCoords) -> AreaResult<()> {
        match (self, coords) {
            (Shape::Rectangle(s), AreaCoords::Rectangle(c)) => s.set_coords(c),
            (Shape::Circle(s), AreaCoords::Circle(c)) => s.set_coords(c),
            (Shape::Polygon(s), AreaCoords::Polygon(c)) => s.set_coords(c),
            (shape, coords) => {
                return Err(AreaError::invalid_shape(
                    shape.kind().as_str(),
                    format!("cannot take {} coordinates", coords.kind()),
                ))
            }
        }
        Ok(())
    }

    pub fn test_coords(&self) -> bool {
        self.coords().is_valid()
    }

    pub fn apply_edit(&self, action: EditAction, dx: f64, dy: f64) -> AreaCoords {
        match self {
            Shape::Rectangle(s) => AreaCoords::Rectangle(s.apply_edit(action, dx, dy)),
            Shape::Circle(s) => AreaCoords::Circle(s.apply_edit(action, dx, dy)),
            Shape::Polygon(s) => AreaCoords::Polygon(s.apply_edit(action, dx, dy)),
        }
    }

    /// Like [`Shape::apply_edit`] but starting from `from` instead of the
    /// stored coordinates. Coordinates of another kind come back unchanged.
    pub fn edit_from(&self, from: &AreaCoords, action: EditAction, dx: f64, dy: f64) -> AreaCoords {
        match (self, from) {
            (Shape::Rectangle(s), AreaCoords::Rectangle(c)) => {
                AreaCoords::Rectangle(s.edit(c, action, dx, dy))
            }
            (Shape::Circle(s), AreaCoords::Circle(c)) => AreaCoords::Circle(s.edit(c, action, dx, dy)),
            (Shape::Polygon(s), AreaCoords::Polygon(c)) => {
                AreaCoords::Polygon(s.edit(c, action, dx, dy))
            }
            _ => from.clone(),
        }
    }

    pub fn constrain_edit(&self, candidate: AreaCoords, original: &AreaCoords, constrain: bool) -> AreaCoords {
        match (self, candidate, original) {
            (Shape::Rectangle(s), AreaCoords::Rectangle(c), AreaCoords::Rectangle(o)) => {
                AreaCoords::Rectangle(s.constrain_edit(c, o, constrain))
            }
            (Shape::Circle(s), AreaCoords::Circle(c), AreaCoords::Circle(o)) => {
                AreaCoords::Circle(s.constrain_edit(c, o, constrain))
            }
            (Shape::Polygon(s), AreaCoords::Polygon(c), AreaCoords::Polygon(o)) => {
                AreaCoords::Polygon(s.constrain_edit(c, o, constrain))
            }
            (_, candidate, _) => candidate,
        }
    }

    /// Live preview while the shape is being drawn with the pointer at `cursor`.
    pub fn draw_preview(&self, cursor: Point, constrain: bool) -> AreaCoords {
        match self {
            Shape::Rectangle(s) => AreaCoords::Rectangle(s.draw_to(cursor, constrain)),
            Shape::Circle(s) => AreaCoords::Circle(s.draw_to(cursor)),
            Shape::Polygon(s) => AreaCoords::Polygon(s.preview_to(cursor, constrain)),
        }
    }

    pub fn contains_point(&self, p: Point, tolerance: f64) -> bool {
        match self {
            Shape::Rectangle(s) => s.contains_point(p, tolerance),
            Shape::Circle(s) => s.contains_point(p, tolerance),
            Shape::Polygon(s) => s.contains_point(p, tolerance),
        }
    }

    /// Point the attribute panel is placed next to.
    pub fn info_anchor(&self) -> Point {
        match self {
            Shape::Rectangle(s) => Point::new(s.coords().x, s.coords().y),
            Shape::Circle(s) => Point::new(s.coords().cx, s.coords().cy),
            Shape::Polygon(s) => s.coords().points.first().copied().unwrap_or_default(),
        }
    }

    pub fn as_polygon(&self) -> Option<&AreaPolygon> {
        match self {
            Shape::Polygon(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_polygon_mut(&mut self) -> Option<&mut AreaPolygon> {
        match self {
            Shape::Polygon(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Rectangle(s) => write!(f, "{}", s),
            Shape::Circle(s) => write!(f, "{}", s),
            Shape::Polygon(s) => write!(f, "{}", s),
        }
    }
}
