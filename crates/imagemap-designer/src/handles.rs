//! Handle model: named control points that start edit gestures.
//!
//! Handles are derived state. Every variant recomputes its handles from its
//! coordinates on each redraw; nothing here is persisted.

use crate::model::Point;
use std::collections::BTreeMap;
use std::fmt;

/// Geometry change requested by a handle (or the body) during an edit gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditAction {
    Move,
    MoveVertex,
    EditTop,
    EditBottom,
    EditLeft,
    EditRight,
    EditTopLeft,
    EditTopRight,
    EditBottomLeft,
    EditBottomRight,
}

impl EditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            EditAction::Move => "move",
            EditAction::MoveVertex => "moveVertex",
            EditAction::EditTop => "editTop",
            EditAction::EditBottom => "editBottom",
            EditAction::EditLeft => "editLeft",
            EditAction::EditRight => "editRight",
            EditAction::EditTopLeft => "editTopLeft",
            EditAction::EditTopRight => "editTopRight",
            EditAction::EditBottomLeft => "editBottomLeft",
            EditAction::EditBottomRight => "editBottomRight",
        }
    }

    /// CSS cursor a surface shows while hovering a handle with this action.
    pub fn cursor(&self) -> &'static str {
        match self {
            EditAction::Move => "move",
            EditAction::MoveVertex => "pointer",
            EditAction::EditTop => "n-resize",
            EditAction::EditBottom => "s-resize",
            EditAction::EditLeft => "w-resize",
            EditAction::EditRight => "e-resize",
            EditAction::EditTopLeft => "nw-resize",
            EditAction::EditTopRight => "ne-resize",
            EditAction::EditBottomLeft => "sw-resize",
            EditAction::EditBottomRight => "se-resize",
        }
    }
}

impl fmt::Display for EditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handle identity within one area.
///
/// Ordering puts the fixed box handles first and vertices by index, which is
/// also the order hit testing walks them in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HandleName {
    Center,
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Vertex(usize),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    pub name: HandleName,
    pub action: EditAction,
    pub position: Point,
}

impl Handle {
    pub fn new(name: HandleName, action: EditAction, position: Point) -> Self {
        Self {
            name,
            action,
            position,
        }
    }

    /// Polygon vertex index carried by `moveVertex` handles.
    pub fn vertex(&self) -> Option<usize> {
        match self.name {
            HandleName::Vertex(index) => Some(index),
            _ => None,
        }
    }

    /// Square occupied by the handle on the surface as `(min_x, min_y, max_x, max_y)`.
    ///
    /// The square's top-left sits `ceil(size / 2)` above and left of the
    /// handle position.
    pub fn bounds(&self, size: f64) -> (f64, f64, f64, f64) {
        let offset = -(size / 2.0).ceil();
        let min_x = self.position.x + offset;
        let min_y = self.position.y + offset;
        (min_x, min_y, min_x + size, min_y + size)
    }

    pub fn contains(&self, p: Point, size: f64) -> bool {
        let (min_x, min_y, max_x, max_y) = self.bounds(size);
        p.x >= min_x && p.x <= max_x && p.y >= min_y && p.y <= max_y
    }
}

/// Handles of one area keyed by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Handles {
    handles: BTreeMap<HandleName, Handle>,
}

impl Handles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: HandleName, action: EditAction, position: Point) {
        self.handles
            .insert(name, Handle::new(name, action, position));
    }

    pub fn get(&self, name: HandleName) -> Option<&Handle> {
        self.handles.get(&name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Handle> {
        self.handles.values()
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// First handle whose square of side `size` contains `p`.
    pub fn hit_test(&self, p: Point, size: f64) -> Option<&Handle> {
        self.iter().find(|handle| handle.contains(p, size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_bounds_use_ceil_offset() {
        let handle = Handle::new(HandleName::Center, EditAction::Move, Point::new(10.0, 10.0));
        assert_eq!(handle.bounds(5.0), (7.0, 7.0, 12.0, 12.0));
        assert!(handle.contains(Point::new(7.0, 12.0), 5.0));
        assert!(!handle.contains(Point::new(12.5, 10.0), 5.0));
    }

    #[test]
    fn test_hit_test_prefers_lower_names() {
        let mut handles = Handles::new();
        handles.insert(HandleName::Vertex(2), EditAction::MoveVertex, Point::new(0.0, 0.0));
        handles.insert(HandleName::Vertex(0), EditAction::MoveVertex, Point::new(1.0, 1.0));

        let hit = handles.hit_test(Point::new(0.5, 0.5), 5.0).unwrap();
        assert_eq!(hit.name, HandleName::Vertex(0));
        assert_eq!(hit.vertex(), Some(0));
        assert!(handles.hit_test(Point::new(40.0, 40.0), 5.0).is_none());
    }

    #[test]
    fn test_action_names_and_cursors() {
        assert_eq!(EditAction::EditTopLeft.to_string(), "editTopLeft");
        assert_eq!(EditAction::EditBottomRight.cursor(), "se-resize");
        assert_eq!(EditAction::MoveVertex.cursor(), "pointer");
    }
}
