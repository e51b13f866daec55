//! Moving and resizing areas by dragging their bodies and handles.

use super::{EditorState, Gesture, PointerEvent, PointerTarget};
use crate::canvas::{AreaId, EditorMode};
use crate::handles::{EditAction, HandleName};
use crate::model::{AreaCoords, Point, ShapeKind};
use crate::surface::{AttributePanel, RenderSurface, DEFAULT_CURSOR};

impl<S: RenderSurface, P: AttributePanel> EditorState<S, P> {
    /// Pointer button pressed.
    ///
    /// In editing mode a press on an area grabs it (body: move, handle: the
    /// handle's action) and a press anywhere else clears the selection.
    pub fn pointer_down(&mut self, event: PointerEvent) {
        if self.canvas.mode() != EditorMode::Editing || self.gesture != Gesture::Idle {
            return;
        }

        let grab = match event.target {
            PointerTarget::Background => None,
            PointerTarget::Area(visual) => self
                .area_for_visual(visual)
                .map(|id| (id, EditAction::Move, None)),
            PointerTarget::Handle(visual, name) => self.area_for_visual(visual).and_then(|id| {
                let handle = self.canvas.get(id)?.handles().get(name)?;
                Some((id, handle.action, handle.vertex()))
            }),
        };

        match grab {
            Some((id, action, vertex)) => self.start_editing(id, action, vertex, event.position),
            None => self.deselect_all(),
        }
    }

    /// Pointer button released: commits the gesture in progress.
    ///
    /// Coordinates that would fail the shape's validity check are not
    /// committed; the area keeps the geometry it had when the gesture began.
    /// Returns whether new coordinates were stored.
    pub fn pointer_up(&mut self, event: PointerEvent) -> bool {
        if !matches!(self.gesture, Gesture::Editing { .. }) {
            return false;
        }
        let Gesture::Editing {
            area: id,
            action,
            anchor,
            original,
            candidate,
        } = std::mem::replace(&mut self.gesture, Gesture::Idle)
        else {
            return false;
        };
        self.surface.set_cursor(DEFAULT_CURSOR);

        let Some((coords, _)) = self.edit_step(id, action, anchor, &original, &candidate, event) else {
            return false;
        };
        let valid = coords.is_valid();
        if let Some(area) = self.canvas.get_mut(id) {
            if valid {
                if let Err(e) = area.set_coords(coords) {
                    tracing::warn!("Could not commit edit of area {}: {}", id, e);
                }
            } else {
                tracing::debug!(
                    "Discarded {} on area {}: result is not a valid {}",
                    action,
                    id,
                    area.kind()
                );
            }
            area.redraw(&mut self.surface, None);
        }
        if !valid {
            return false;
        }
        self.update();
        tracing::debug!("Committed {} on area {}", action, id);
        true
    }

    fn start_editing(&mut self, id: AreaId, action: EditAction, vertex: Option<usize>, anchor: Point) {
        if !self.select(id) {
            return;
        }
        let Some(area) = self.canvas.get_mut(id) else {
            return;
        };
        if let Some(polygon) = area.shape.as_polygon_mut() {
            polygon.select_point(vertex.filter(|_| action == EditAction::MoveVertex));
        }
        let original = area.coords();
        self.surface.set_cursor(action.cursor());
        self.gesture = Gesture::Editing {
            area: id,
            action,
            anchor,
            candidate: original.clone(),
            original,
        };
        tracing::debug!("Started {} on area {}", action, id);
    }

    pub(super) fn preview_editing(&mut self, event: PointerEvent) {
        let Gesture::Editing {
            area: id,
            action,
            anchor,
            ref original,
            ref candidate,
        } = self.gesture
        else {
            return;
        };
        let Some((next, next_anchor)) = self.edit_step(id, action, anchor, original, candidate, event) else {
            return;
        };

        self.redraw(id, Some(&next));
        if let Gesture::Editing {
            anchor, candidate, ..
        } = &mut self.gesture
        {
            *anchor = next_anchor;
            *candidate = next;
        }
    }

    /// Coordinates the gesture reaches with the pointer at `event`, and the
    /// anchor the next step measures from.
    ///
    /// Polygons accumulate small steps and re-anchor every time. Rectangles
    /// and circles are always recomputed from the coordinates the gesture
    /// started with, so the constraint sees the whole drag.
    fn edit_step(
        &self,
        id: AreaId,
        action: EditAction,
        anchor: Point,
        original: &AreaCoords,
        candidate: &AreaCoords,
        event: PointerEvent,
    ) -> Option<(AreaCoords, Point)> {
        let area = self.canvas.get(id)?;
        let dx = event.position.x - anchor.x;
        let dy = event.position.y - anchor.y;

        match area.kind() {
            ShapeKind::Polygon => {
                let next = area.shape.edit_from(candidate, action, dx, dy);
                Some((next, event.position))
            }
            kind => {
                let raw = area.shape.edit_from(original, action, dx, dy);
                let constrain = self.constrain_enabled(kind, event.modifiers);
                Some((area.shape.constrain_edit(raw, original, constrain), anchor))
            }
        }
    }

    /// Drags the handle `name` of area `id` from `from` to `to` in one go.
    ///
    /// Convenience for hosts that only report drag start and end. Returns
    /// whether the area took new coordinates.
    pub fn drag_handle(&mut self, id: AreaId, name: HandleName, from: Point, to: Point) -> bool {
        let Some(visual) = self.canvas.get(id).and_then(|area| area.visual) else {
            return false;
        };
        self.pointer_down(PointerEvent::new(from, PointerTarget::Handle(visual, name)));
        if !matches!(self.gesture, Gesture::Editing { area, .. } if area == id) {
            return false;
        }
        let end = PointerEvent::new(to, PointerTarget::Background);
        self.pointer_move(end);
        self.pointer_up(end)
    }
}
