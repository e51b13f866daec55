use serde::{Deserialize, Serialize};
use std::fmt;

use imagemap_core::constants::{MIN_POLYGON_POINTS, MIN_POLY_HTML_COORDS};
use imagemap_core::{AreaError, AreaResult};

use super::{AreaShape, Point, ShapeKind};
use crate::geometry::{distance_to_segment, point_in_polygon, snap_angle};
use crate::handles::{EditAction, HandleName, Handles};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonCoords {
    #[serde(default = "default_points")]
    pub points: Vec<Point>,
    /// True only while the polygon is still being drawn.
    #[serde(rename = "isOpen", alias = "isOpened", default)]
    pub is_open: bool,
}

fn default_points() -> Vec<Point> {
    vec![Point::default()]
}

impl Default for PolygonCoords {
    fn default() -> Self {
        Self {
            points: default_points(),
            is_open: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AreaPolygon {
    coords: PolygonCoords,
    /// Vertex targeted by `moveVertex` edits.
    selected_point: Option<usize>,
}

impl AreaPolygon {
    /// Open polygon whose first vertex is `p`.
    pub fn open_at(p: Point) -> Self {
        Self::from_coords(PolygonCoords {
            points: vec![p],
            is_open: true,
        })
    }

    pub fn from_coords(coords: PolygonCoords) -> Self {
        Self {
            coords,
            selected_point: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.coords.is_open
    }

    pub fn points(&self) -> &[Point] {
        &self.coords.points
    }

    pub fn selected_point(&self) -> Option<usize> {
        self.selected_point
    }

    pub fn select_point(&mut self, index: Option<usize>) {
        self.selected_point = index;
    }

    /// Point that a click at `cursor` would add, snapped against the last
    /// committed vertex when `snap` is set.
    pub fn next_point(&self, cursor: Point, snap: bool) -> Point {
        match self.coords.points.last() {
            Some(last) if snap => snap_angle(*last, cursor),
            _ => cursor,
        }
    }

    /// Committed vertices plus a trailing preview point at the cursor.
    pub fn preview_to(&self, cursor: Point, snap: bool) -> PolygonCoords {
        let mut preview = self.coords.clone();
        preview.points.push(self.next_point(cursor, snap));
        preview
    }

    pub fn add_point(&mut self, p: Point) -> AreaResult<()> {
        if !self.coords.is_open {
            return Err(AreaError::PolygonClosed);
        }
        self.coords.points.push(p);
        Ok(())
    }

    /// Closes the outline if enough vertices have been committed.
    ///
    /// Returns whether the polygon is closed afterwards.
    pub fn close(&mut self) -> bool {
        if !Self::test_coords(&self.coords) {
            return false;
        }
        self.coords.is_open = false;
        true
    }
}

impl AreaShape for AreaPolygon {
    type Coords = PolygonCoords;

    const KIND: ShapeKind = ShapeKind::Polygon;

    fn coords(&self) -> &PolygonCoords {
        &self.coords
    }

    fn set_coords(&mut self, coords: PolygonCoords) {
        self.coords = coords;
    }

    fn compute_handles(c: &PolygonCoords) -> Handles {
        let mut handles = Handles::new();
        for (index, point) in c.points.iter().enumerate() {
            handles.insert(HandleName::Vertex(index), EditAction::MoveVertex, *point);
        }
        handles
    }

    fn edit(&self, coords: &PolygonCoords, action: EditAction, dx: f64, dy: f64) -> PolygonCoords {
        let mut c = coords.clone();
        match action {
            EditAction::Move => {
                for point in &mut c.points {
                    *point = point.offset(dx, dy);
                }
            }
            EditAction::MoveVertex => {
                if let Some(point) = self.selected_point.and_then(|i| c.points.get_mut(i)) {
                    *point = point.offset(dx, dy);
                }
            }
            _ => {}
        }
        c
    }

    fn test_coords(c: &PolygonCoords) -> bool {
        c.points.len() >= MIN_POLYGON_POINTS
    }

    fn from_html_coordinates(values: &[f64]) -> AreaResult<PolygonCoords> {
        if values.len() < MIN_POLY_HTML_COORDS || values.len() % 2 != 0 {
            return Err(AreaError::MalformedCoordinates {
                kind: Self::KIND.as_str().to_string(),
                count: values.len(),
            });
        }
        Ok(PolygonCoords {
            points: values
                .chunks_exact(2)
                .map(|pair| Point::new(pair[0], pair[1]))
                .collect(),
            is_open: false,
        })
    }

    fn html_coordinates(c: &PolygonCoords) -> Vec<f64> {
        c.points.iter().flat_map(|p| [p.x, p.y]).collect()
    }

    fn contains_point(&self, p: Point, tolerance: f64) -> bool {
        let points = &self.coords.points;
        let near_edge = points
            .windows(2)
            .any(|edge| distance_to_segment(p, edge[0], edge[1]) <= tolerance);
        if near_edge {
            return true;
        }
        if self.coords.is_open {
            return false;
        }
        let closing_edge = match (points.first(), points.last()) {
            (Some(first), Some(last)) => distance_to_segment(p, *last, *first) <= tolerance,
            _ => false,
        };
        closing_edge || point_in_polygon(p, points)
    }
}

impl fmt::Display for AreaPolygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let points: Vec<String> = self
            .coords
            .points
            .iter()
            .map(|p| format!("[{}, {}]", p.x, p.y))
            .collect();
        write!(f, "Polygon {{points: [{}]}}", points.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> AreaPolygon {
        AreaPolygon::from_coords(PolygonCoords {
            points: vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0)],
            is_open: false,
        })
    }

    #[test]
    fn test_add_point_to_closed_polygon_fails() {
        let mut polygon = triangle();
        assert!(matches!(
            polygon.add_point(Point::new(1.0, 1.0)),
            Err(AreaError::PolygonClosed)
        ));
    }

    #[test]
    fn test_close_requires_three_points() {
        let mut polygon = AreaPolygon::open_at(Point::new(0.0, 0.0));
        polygon.add_point(Point::new(10.0, 0.0)).unwrap();
        assert!(!polygon.close());
        assert!(polygon.is_open());

        polygon.add_point(Point::new(10.0, 10.0)).unwrap();
        assert!(polygon.close());
        assert!(!polygon.is_open());
    }

    #[test]
    fn test_preview_snaps_trailing_point() {
        let polygon = AreaPolygon::open_at(Point::new(0.0, 0.0));
        let preview = polygon.preview_to(Point::new(10.0, -1.0), true);
        assert_eq!(preview.points, vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)]);
        assert_eq!(polygon.points().len(), 1);

        let free = polygon.preview_to(Point::new(10.0, -1.0), false);
        assert_eq!(free.points[1], Point::new(10.0, -1.0));
    }

    #[test]
    fn test_move_vertex_only_touches_selected_point() {
        let mut polygon = triangle();
        assert_eq!(polygon.apply_edit(EditAction::MoveVertex, 5.0, 5.0), *polygon.coords());

        polygon.select_point(Some(1));
        let edited = polygon.apply_edit(EditAction::MoveVertex, 5.0, 5.0);
        assert_eq!(
            edited.points,
            vec![Point::new(0.0, 0.0), Point::new(15.0, 5.0), Point::new(10.0, 10.0)]
        );
    }

    #[test]
    fn test_move_translates_every_point() {
        let polygon = triangle();
        let moved = polygon.apply_edit(EditAction::Move, 1.0, 2.0);
        assert_eq!(
            moved.points,
            vec![Point::new(1.0, 2.0), Point::new(11.0, 2.0), Point::new(11.0, 12.0)]
        );
    }

    #[test]
    fn test_html_coordinates() {
        let coords = AreaPolygon::from_html_coordinates(&[0.0, 0.0, 10.0, 0.0, 10.0, 10.0]).unwrap();
        assert_eq!(coords, *triangle().coords());
        assert!(AreaPolygon::from_html_coordinates(&[0.0, 0.0, 10.0, 0.0]).is_err());
        assert!(AreaPolygon::from_html_coordinates(&[0.0, 0.0, 10.0, 0.0, 10.0, 10.0, 3.0]).is_err());
    }

    #[test]
    fn test_legacy_open_flag_is_accepted() {
        let coords: PolygonCoords = serde_json::from_str(
            r#"{"points":[{"x":1,"y":2},{"x":3,"y":4},{"x":5,"y":6}],"isOpened":true}"#,
        )
        .unwrap();
        assert!(coords.is_open);

        let defaulted: PolygonCoords = serde_json::from_str("{}").unwrap();
        assert_eq!(defaulted.points, vec![Point::new(0.0, 0.0)]);
        assert!(!defaulted.is_open);
    }

    #[test]
    fn test_contains_point() {
        let polygon = triangle();
        assert!(polygon.contains_point(Point::new(8.0, 2.0), 0.0));
        assert!(!polygon.contains_point(Point::new(2.0, 8.0), 0.5));
        assert!(polygon.contains_point(Point::new(5.0, -1.0), 2.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            triangle().to_string(),
            "Polygon {points: [[0, 0], [10, 0], [10, 10]]}"
        );
    }
}
