use serde::{Deserialize, Serialize};
use std::fmt;

use imagemap_core::constants::RECT_HTML_COORDS;
use imagemap_core::{AreaError, AreaResult};

use super::{AreaShape, Point, ShapeKind};
use crate::geometry::{normalize_rect, proportional_rect, square_rect};
use crate::handles::{EditAction, HandleName, Handles};

/// Top-left corner plus size. Width and height are only negative while a
/// rectangle is being drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RectCoords {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AreaRectangle {
    coords: RectCoords,
}

impl AreaRectangle {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::from_coords(RectCoords {
            x,
            y,
            width,
            height,
        })
    }

    pub fn from_coords(coords: RectCoords) -> Self {
        Self { coords }
    }

    /// Drawing preview: the stored origin is the anchor, the cursor the
    /// opposite corner.
    pub fn draw_to(&self, cursor: Point, square: bool) -> RectCoords {
        let mut preview = RectCoords {
            x: self.coords.x,
            y: self.coords.y,
            width: cursor.x - self.coords.x,
            height: cursor.y - self.coords.y,
        };
        if square {
            preview = square_rect(preview);
        }
        normalize_rect(preview)
    }
}

impl AreaShape for AreaRectangle {
    type Coords = RectCoords;

    const KIND: ShapeKind = ShapeKind::Rectangle;

    fn coords(&self) -> &RectCoords {
        &self.coords
    }

    fn set_coords(&mut self, coords: RectCoords) {
        self.coords = coords;
    }

    fn compute_handles(c: &RectCoords) -> Handles {
        let (left, top) = (c.x, c.y);
        let (right, bottom) = (c.x + c.width, c.y + c.height);
        let (cx, cy) = (c.x + c.width / 2.0, c.y + c.height / 2.0);

        let mut handles = Handles::new();
        handles.insert(HandleName::Center, EditAction::Move, Point::new(cx, cy));
        handles.insert(HandleName::Top, EditAction::EditTop, Point::new(cx, top));
        handles.insert(HandleName::Bottom, EditAction::EditBottom, Point::new(cx, bottom));
        handles.insert(HandleName::Left, EditAction::EditLeft, Point::new(left, cy));
        handles.insert(HandleName::Right, EditAction::EditRight, Point::new(right, cy));
        handles.insert(HandleName::TopLeft, EditAction::EditTopLeft, Point::new(left, top));
        handles.insert(HandleName::TopRight, EditAction::EditTopRight, Point::new(right, top));
        handles.insert(HandleName::BottomLeft, EditAction::EditBottomLeft, Point::new(left, bottom));
        handles.insert(HandleName::BottomRight, EditAction::EditBottomRight, Point::new(right, bottom));
        handles
    }

    fn edit(&self, coords: &RectCoords, action: EditAction, dx: f64, dy: f64) -> RectCoords {
        let mut c = *coords;
        match action {
            EditAction::Move => {
                c.x += dx;
                c.y += dy;
            }
            EditAction::EditLeft => {
                c.x += dx;
                c.width -= dx;
            }
            EditAction::EditRight => {
                c.width += dx;
            }
            EditAction::EditTop => {
                c.y += dy;
                c.height -= dy;
            }
            EditAction::EditBottom => {
                c.height += dy;
            }
            EditAction::EditTopLeft => {
                c.x += dx;
                c.y += dy;
                c.width -= dx;
                c.height -= dy;
            }
            EditAction::EditTopRight => {
                c.y += dy;
                c.width += dx;
                c.height -= dy;
            }
            EditAction::EditBottomLeft => {
                c.x += dx;
                c.width -= dx;
                c.height += dy;
            }
            EditAction::EditBottomRight => {
                c.width += dx;
                c.height += dy;
            }
            EditAction::MoveVertex => {}
        }
        c
    }

    fn constrain_edit(&self, candidate: RectCoords, original: &RectCoords, constrain: bool) -> RectCoords {
        let normalized = normalize_rect(candidate);
        if constrain {
            proportional_rect(normalized, original)
        } else {
            normalized
        }
    }

    // Zero counts as missing, so a rectangle touching the image's left or top
    // edge does not validate.
    fn test_coords(c: &RectCoords) -> bool {
        truthy(c.x) && truthy(c.y) && truthy(c.width) && truthy(c.height)
    }

    fn from_html_coordinates(values: &[f64]) -> AreaResult<RectCoords> {
        if values.len() != RECT_HTML_COORDS {
            return Err(AreaError::MalformedCoordinates {
                kind: Self::KIND.as_str().to_string(),
                count: values.len(),
            });
        }
        let (x1, y1, x2, y2) = (values[0], values[1], values[2], values[3]);
        Ok(RectCoords {
            x: x1,
            y: y1,
            width: x2 - x1,
            height: y2 - y1,
        })
    }

    fn html_coordinates(c: &RectCoords) -> Vec<f64> {
        vec![c.x, c.y, c.x + c.width, c.y + c.height]
    }

    fn contains_point(&self, p: Point, tolerance: f64) -> bool {
        let c = normalize_rect(self.coords);
        p.x >= c.x - tolerance
            && p.x <= c.x + c.width + tolerance
            && p.y >= c.y - tolerance
            && p.y <= c.y + c.height + tolerance
    }
}

/// Non-zero and not NaN.
pub(crate) fn truthy(value: f64) -> bool {
    value != 0.0 && !value.is_nan()
}

impl fmt::Display for AreaRectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rectangle {{x: {}, y: {}, width: {}, height: {}}}",
            self.coords.x, self.coords.y, self.coords.width, self.coords.height
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f64, y: f64, width: f64, height: f64) -> RectCoords {
        RectCoords {
            x,
            y,
            width,
            height,
        }
    }

    #[test]
    fn test_edit_actions() {
        let shape = AreaRectangle::new(10.0, 10.0, 100.0, 50.0);
        assert_eq!(shape.apply_edit(EditAction::Move, 5.0, -5.0), rect(15.0, 5.0, 100.0, 50.0));
        assert_eq!(shape.apply_edit(EditAction::EditLeft, 5.0, 99.0), rect(15.0, 10.0, 95.0, 50.0));
        assert_eq!(shape.apply_edit(EditAction::EditRight, 5.0, 99.0), rect(10.0, 10.0, 105.0, 50.0));
        assert_eq!(shape.apply_edit(EditAction::EditTop, 99.0, 5.0), rect(10.0, 15.0, 100.0, 45.0));
        assert_eq!(shape.apply_edit(EditAction::EditBottom, 99.0, 5.0), rect(10.0, 10.0, 100.0, 55.0));
        assert_eq!(
            shape.apply_edit(EditAction::EditTopLeft, 5.0, 5.0),
            rect(15.0, 15.0, 95.0, 45.0)
        );
        assert_eq!(
            shape.apply_edit(EditAction::EditTopRight, 5.0, 5.0),
            rect(10.0, 15.0, 105.0, 45.0)
        );
        assert_eq!(
            shape.apply_edit(EditAction::EditBottomLeft, 5.0, 5.0),
            rect(15.0, 10.0, 95.0, 55.0)
        );
        assert_eq!(
            shape.apply_edit(EditAction::EditBottomRight, 5.0, 5.0),
            rect(10.0, 10.0, 105.0, 55.0)
        );
        assert_eq!(shape.apply_edit(EditAction::MoveVertex, 5.0, 5.0), *shape.coords());
        // The stored coordinates are untouched.
        assert_eq!(*shape.coords(), rect(10.0, 10.0, 100.0, 50.0));
    }

    #[test]
    fn test_edit_past_opposite_edge_is_normalized() {
        let shape = AreaRectangle::new(10.0, 10.0, 20.0, 20.0);
        let candidate = shape.apply_edit(EditAction::EditRight, -30.0, 0.0);
        assert_eq!(candidate, rect(10.0, 10.0, -10.0, 20.0));
        assert_eq!(
            shape.constrain_edit(candidate, shape.coords(), false),
            rect(0.0, 10.0, 10.0, 20.0)
        );
    }

    #[test]
    fn test_draw_to_square_and_normalize() {
        let shape = AreaRectangle::new(50.0, 50.0, 0.0, 0.0);
        assert_eq!(shape.draw_to(Point::new(20.0, 60.0), false), rect(20.0, 50.0, 30.0, 10.0));
        assert_eq!(shape.draw_to(Point::new(20.0, 60.0), true), rect(40.0, 50.0, 10.0, 10.0));
    }

    #[test]
    fn test_handles_positions() {
        let handles = AreaRectangle::compute_handles(&rect(10.0, 20.0, 100.0, 50.0));
        assert_eq!(handles.len(), 9);
        assert_eq!(handles.get(HandleName::Center).unwrap().position, Point::new(60.0, 45.0));
        assert_eq!(handles.get(HandleName::Top).unwrap().position, Point::new(60.0, 20.0));
        assert_eq!(handles.get(HandleName::Left).unwrap().position, Point::new(10.0, 45.0));
        assert_eq!(
            handles.get(HandleName::BottomRight).unwrap().action,
            EditAction::EditBottomRight
        );
    }

    #[test]
    fn test_zero_origin_is_invalid() {
        assert!(!AreaRectangle::test_coords(&rect(0.0, 5.0, 10.0, 10.0)));
        assert!(!AreaRectangle::test_coords(&rect(5.0, 5.0, 0.0, 10.0)));
        assert!(!AreaRectangle::test_coords(&rect(5.0, f64::NAN, 10.0, 10.0)));
        assert!(AreaRectangle::test_coords(&rect(5.0, 5.0, 10.0, 10.0)));
    }

    #[test]
    fn test_html_coordinates() {
        assert_eq!(
            AreaRectangle::from_html_coordinates(&[1.0, 2.0, 3.0, 4.0]).unwrap(),
            rect(1.0, 2.0, 2.0, 2.0)
        );
        assert!(matches!(
            AreaRectangle::from_html_coordinates(&[1.0, 2.0, 3.0]),
            Err(AreaError::MalformedCoordinates { count: 3, .. })
        ));
        assert_eq!(
            AreaRectangle::html_coordinates(&rect(10.0, 10.0, 100.0, 50.0)),
            vec![10.0, 10.0, 110.0, 60.0]
        );
    }

    #[test]
    fn test_display() {
        let shape = AreaRectangle::new(1.0, 2.0, 3.5, 4.0);
        assert_eq!(shape.to_string(), "Rectangle {x: 1, y: 2, width: 3.5, height: 4}");
    }
}
