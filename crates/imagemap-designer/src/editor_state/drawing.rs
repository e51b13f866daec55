//! Creating areas with the pointer.
//!
//! Rectangles and circles take two clicks: the first anchors the shape, the
//! second fixes its size. Polygons collect one vertex per click and are closed
//! by clicking the first vertex or pressing Enter.

use super::{EditorState, Gesture, Key, PointerEvent, PointerTarget};
use crate::area::AreaAttributes;
use crate::canvas::{AreaId, EditorMode};
use crate::handles::HandleName;
use crate::model::{Point, Shape, ShapeKind};
use crate::surface::{AttributePanel, RenderSurface};

impl<S: RenderSurface, P: AttributePanel> EditorState<S, P> {
    /// Pointer click on the canvas.
    pub fn click(&mut self, event: PointerEvent) {
        match self.gesture {
            Gesture::Drawing { area } => self.continue_drawing(area, event),
            Gesture::Idle => {
                if self.canvas.mode() != EditorMode::Drawing || self.canvas.in_progress().is_some() {
                    return;
                }
                if let Some(kind) = self.canvas.active_kind() {
                    self.start_drawing(kind, event.position);
                }
            }
            Gesture::Editing { .. } => {}
        }
    }

    /// Pointer motion, with or without a button held.
    pub fn pointer_move(&mut self, event: PointerEvent) {
        match self.gesture {
            Gesture::Drawing { area } => self.preview_drawing(area, event),
            Gesture::Editing { .. } => self.preview_editing(event),
            Gesture::Idle => {}
        }
    }

    pub fn key_down(&mut self, key: Key) {
        if key != Key::Enter {
            return;
        }
        if let Gesture::Drawing { area } = self.gesture {
            if self.canvas.get(area).map(|a| a.kind()) == Some(ShapeKind::Polygon) {
                self.close_polygon(area);
            }
        }
    }

    fn start_drawing(&mut self, kind: ShapeKind, p: Point) {
        let id = self.register(Shape::new_at(kind, p), AreaAttributes::default());
        self.canvas.set_in_progress(Some(id));
        self.gesture = Gesture::Drawing { area: id };
        tracing::debug!("Started drawing {} area {} at ({}, {})", kind, id, p.x, p.y);
    }

    fn continue_drawing(&mut self, id: AreaId, event: PointerEvent) {
        let Some(area) = self.canvas.get(id) else {
            self.gesture = Gesture::Idle;
            self.canvas.set_in_progress(None);
            return;
        };

        match area.kind() {
            ShapeKind::Rectangle | ShapeKind::Circle => self.finish_sized_shape(id, event),
            ShapeKind::Polygon => {
                let on_first_vertex = matches!(
                    event.target,
                    PointerTarget::Handle(visual, HandleName::Vertex(0)) if Some(visual) == area.visual
                );
                if on_first_vertex {
                    self.close_polygon(id);
                } else {
                    self.add_polygon_point(id, event);
                }
            }
        }
    }

    fn preview_drawing(&mut self, id: AreaId, event: PointerEvent) {
        let Some(kind) = self.canvas.get(id).map(|area| area.kind()) else {
            return;
        };
        let constrain = self.constrain_enabled(kind, event.modifiers);
        if let Some(area) = self.canvas.get_mut(id) {
            let preview = area.shape.draw_preview(event.position, constrain);
            area.redraw(&mut self.surface, Some(&preview));
        }
    }

    fn finish_sized_shape(&mut self, id: AreaId, event: PointerEvent) {
        let Some(kind) = self.canvas.get(id).map(|area| area.kind()) else {
            return;
        };
        let constrain = self.constrain_enabled(kind, event.modifiers);
        if let Some(area) = self.canvas.get_mut(id) {
            let coords = area.shape.draw_preview(event.position, constrain);
            if let Err(e) = area.set_coords(coords) {
                tracing::warn!("Could not size area {}: {}", id, e);
            }
        }
        self.end_drawing(id);
    }

    fn add_polygon_point(&mut self, id: AreaId, event: PointerEvent) {
        let snap = self.constrain_enabled(ShapeKind::Polygon, event.modifiers);
        let Some(area) = self.canvas.get_mut(id) else {
            return;
        };
        if let Some(polygon) = area.shape.as_polygon_mut() {
            let p = polygon.next_point(event.position, snap);
            if let Err(e) = polygon.add_point(p) {
                tracing::warn!("Could not add point to area {}: {}", id, e);
                return;
            }
        }
        area.redraw(&mut self.surface, None);
    }

    /// Closes the polygon being drawn. Too few vertices leaves it open and
    /// the drawing continues.
    fn close_polygon(&mut self, id: AreaId) {
        let closed = self
            .canvas
            .get_mut(id)
            .and_then(|area| area.shape.as_polygon_mut())
            .is_some_and(|polygon| polygon.close());
        if closed {
            self.end_drawing(id);
        } else {
            tracing::debug!("Polygon {} needs at least 3 points to close", id);
        }
    }

    fn end_drawing(&mut self, id: AreaId) {
        self.gesture = Gesture::Idle;
        self.canvas.set_in_progress(None);
        self.canvas.set_mode(EditorMode::Editing);

        let Some(area) = self.canvas.get(id) else {
            return;
        };
        if !area.test_coords() {
            let kind = area.kind();
            self.unregister(id);
            tracing::debug!("Discarded degenerate {} area {}", kind, id);
            return;
        }

        self.redraw(id, None);
        self.select(id);
        self.update();
        tracing::info!("Drew area {}", id);
    }
}
