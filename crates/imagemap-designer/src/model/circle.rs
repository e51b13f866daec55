use serde::{Deserialize, Serialize};
use std::fmt;

use imagemap_core::constants::CIRCLE_HTML_COORDS;
use imagemap_core::{AreaError, AreaResult};

use super::rectangle::truthy;
use super::{AreaShape, Point, ShapeKind};
use crate::geometry::round_half_up;
use crate::handles::{EditAction, HandleName, Handles};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CircleCoords {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AreaCircle {
    coords: CircleCoords,
}

impl AreaCircle {
    pub fn new(cx: f64, cy: f64, radius: f64) -> Self {
        Self::from_coords(CircleCoords { cx, cy, radius })
    }

    pub fn from_coords(coords: CircleCoords) -> Self {
        Self { coords }
    }

    pub fn center(&self) -> Point {
        Point::new(self.coords.cx, self.coords.cy)
    }

    /// Drawing preview: radius is the rounded distance from the center to the
    /// cursor.
    pub fn draw_to(&self, cursor: Point) -> CircleCoords {
        CircleCoords {
            radius: round_half_up(self.center().distance_to(&cursor)),
            ..self.coords
        }
    }
}

impl AreaShape for AreaCircle {
    type Coords = CircleCoords;

    const KIND: ShapeKind = ShapeKind::Circle;

    fn coords(&self) -> &CircleCoords {
        &self.coords
    }

    fn set_coords(&mut self, coords: CircleCoords) {
        self.coords = coords;
    }

    fn compute_handles(c: &CircleCoords) -> Handles {
        let mut handles = Handles::new();
        handles.insert(HandleName::Center, EditAction::Move, Point::new(c.cx, c.cy));
        handles.insert(HandleName::Top, EditAction::EditTop, Point::new(c.cx, c.cy - c.radius));
        handles.insert(HandleName::Bottom, EditAction::EditBottom, Point::new(c.cx, c.cy + c.radius));
        handles.insert(HandleName::Left, EditAction::EditLeft, Point::new(c.cx - c.radius, c.cy));
        handles.insert(HandleName::Right, EditAction::EditRight, Point::new(c.cx + c.radius, c.cy));
        handles
    }

    fn edit(&self, coords: &CircleCoords, action: EditAction, dx: f64, dy: f64) -> CircleCoords {
        let mut c = *coords;
        match action {
            EditAction::Move => {
                c.cx += dx;
                c.cy += dy;
            }
            EditAction::EditTop => c.radius -= dy,
            EditAction::EditBottom => c.radius += dy,
            EditAction::EditLeft => c.radius -= dx,
            EditAction::EditRight => c.radius += dx,
            _ => {}
        }
        c
    }

    fn constrain_edit(&self, candidate: CircleCoords, _original: &CircleCoords, _constrain: bool) -> CircleCoords {
        CircleCoords {
            radius: candidate.radius.abs(),
            ..candidate
        }
    }

    fn test_coords(c: &CircleCoords) -> bool {
        truthy(c.cx) && truthy(c.cy) && truthy(c.radius)
    }

    fn from_html_coordinates(values: &[f64]) -> AreaResult<CircleCoords> {
        if values.len() != CIRCLE_HTML_COORDS {
            return Err(AreaError::MalformedCoordinates {
                kind: Self::KIND.as_str().to_string(),
                count: values.len(),
            });
        }
        Ok(CircleCoords {
            cx: values[0],
            cy: values[1],
            radius: values[2],
        })
    }

    fn html_coordinates(c: &CircleCoords) -> Vec<f64> {
        vec![c.cx, c.cy, c.radius]
    }

    fn contains_point(&self, p: Point, tolerance: f64) -> bool {
        self.center().distance_to(&p) <= self.coords.radius.abs() + tolerance
    }
}

impl fmt::Display for AreaCircle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Circle {{cx: {}, cy: {}, radius: {}}}",
            self.coords.cx, self.coords.cy, self.coords.radius
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_to_rounds_radius() {
        let circle = AreaCircle::new(50.0, 50.0, 0.0);
        assert_eq!(circle.draw_to(Point::new(80.0, 50.0)).radius, 30.0);
        assert_eq!(circle.draw_to(Point::new(53.0, 54.0)).radius, 5.0);
        assert_eq!(circle.draw_to(Point::new(51.0, 51.0)).radius, 1.0);
    }

    #[test]
    fn test_edit_radius_from_each_side() {
        let circle = AreaCircle::new(50.0, 50.0, 20.0);
        assert_eq!(circle.apply_edit(EditAction::EditTop, 0.0, -5.0).radius, 25.0);
        assert_eq!(circle.apply_edit(EditAction::EditBottom, 0.0, 5.0).radius, 25.0);
        assert_eq!(circle.apply_edit(EditAction::EditLeft, 5.0, 0.0).radius, 15.0);
        assert_eq!(circle.apply_edit(EditAction::EditRight, 5.0, 0.0).radius, 25.0);

        let moved = circle.apply_edit(EditAction::Move, 3.0, 4.0);
        assert_eq!((moved.cx, moved.cy, moved.radius), (53.0, 54.0, 20.0));
    }

    #[test]
    fn test_radius_is_clamped_to_absolute_value() {
        let circle = AreaCircle::new(50.0, 50.0, 10.0);
        let candidate = circle.apply_edit(EditAction::EditRight, -25.0, 0.0);
        assert_eq!(candidate.radius, -15.0);
        let constrained = circle.constrain_edit(candidate, circle.coords(), false);
        assert_eq!(constrained.radius, 15.0);
    }

    #[test]
    fn test_handles_sit_on_cardinal_points() {
        let handles = AreaCircle::compute_handles(&CircleCoords {
            cx: 10.0,
            cy: 10.0,
            radius: 5.0,
        });
        assert_eq!(handles.len(), 5);
        assert_eq!(handles.get(HandleName::Top).unwrap().position, Point::new(10.0, 5.0));
        assert_eq!(handles.get(HandleName::Right).unwrap().position, Point::new(15.0, 10.0));
    }

    #[test]
    fn test_html_coordinates() {
        let coords = AreaCircle::from_html_coordinates(&[5.0, 6.0, 7.0]).unwrap();
        assert_eq!(AreaCircle::html_coordinates(&coords), vec![5.0, 6.0, 7.0]);
        assert!(AreaCircle::from_html_coordinates(&[5.0, 6.0, 7.0, 8.0]).is_err());
    }

    #[test]
    fn test_zero_radius_is_invalid() {
        assert!(!AreaCircle::test_coords(&CircleCoords {
            cx: 5.0,
            cy: 5.0,
            radius: 0.0
        }));
    }
}
