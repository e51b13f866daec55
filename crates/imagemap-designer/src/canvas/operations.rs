//! Hit testing against the areas on the canvas.

use super::{AreaId, Canvas};
use crate::handles::HandleName;
use crate::model::Point;

/// What a pointer position lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// A handle of an area.
    Handle(AreaId, HandleName),
    /// The body of an area.
    Body(AreaId),
}

impl HitTarget {
    pub fn area_id(&self) -> AreaId {
        match self {
            HitTarget::Handle(id, _) | HitTarget::Body(id) => *id,
        }
    }
}

impl Canvas {
    /// Finds the topmost target under `p`.
    ///
    /// Handles win over bodies, and newer areas over older ones. Handles are
    /// tested with the square of side `handle_size` as drawn, bodies with
    /// `tolerance` of slack.
    pub fn hit_test(&self, p: Point, handle_size: f64, tolerance: f64) -> Option<HitTarget> {
        let handle_hit = self.areas().iter().rev().find_map(|area| {
            area.handles()
                .hit_test(p, handle_size)
                .map(|handle| HitTarget::Handle(area.id(), handle.name))
        });
        if handle_hit.is_some() {
            return handle_hit;
        }

        self.areas()
            .iter()
            .rev()
            .find(|area| area.shape().contains_point(p, tolerance))
            .map(|area| HitTarget::Body(area.id()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::area::AreaAttributes;
    use crate::model::{AreaRectangle, Shape};

    fn canvas_with_overlap() -> (Canvas, AreaId, AreaId) {
        let mut canvas = Canvas::new();
        let lower = canvas.add_area(
            Shape::Rectangle(AreaRectangle::new(10.0, 10.0, 100.0, 100.0)),
            AreaAttributes::default(),
        );
        let upper = canvas.add_area(
            Shape::Rectangle(AreaRectangle::new(50.0, 50.0, 100.0, 100.0)),
            AreaAttributes::default(),
        );
        (canvas, lower, upper)
    }

    #[test]
    fn test_newest_body_wins() {
        let (canvas, lower, upper) = canvas_with_overlap();
        assert_eq!(canvas.hit_test(Point::new(70.0, 70.0), 5.0, 0.0), Some(HitTarget::Body(upper)));
        assert_eq!(canvas.hit_test(Point::new(20.0, 30.0), 5.0, 0.0), Some(HitTarget::Body(lower)));
        assert_eq!(canvas.hit_test(Point::new(500.0, 500.0), 5.0, 0.0), None);
    }

    #[test]
    fn test_handles_win_over_bodies() {
        let (canvas, lower, _) = canvas_with_overlap();
        // Bottom-right corner of the lower area lies inside the upper body.
        let hit = canvas.hit_test(Point::new(110.0, 110.0), 5.0, 0.0);
        assert_eq!(hit, Some(HitTarget::Handle(lower, HandleName::BottomRight)));
        assert_eq!(hit.map(|h| h.area_id()), Some(lower));
    }
}
