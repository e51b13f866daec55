//! Selection, removal and attribute updates.

use imagemap_core::AreaResult;

use super::{EditorState, Gesture};
use crate::area::AreaAttributes;
use crate::canvas::{AreaId, EditorMode};
use crate::surface::{AttributePanel, RenderSurface, DEFAULT_CURSOR};

impl<S: RenderSurface, P: AttributePanel> EditorState<S, P> {
    pub fn selected_id(&self) -> Option<AreaId> {
        self.canvas.selected_id()
    }

    /// Makes `id` the only selected area and shows its attributes.
    ///
    /// The area being drawn cannot be selected.
    pub fn select(&mut self, id: AreaId) -> bool {
        if self.canvas.in_progress() == Some(id) {
            return false;
        }
        self.deselect_all();
        if !self.canvas.select(id) {
            return false;
        }
        if let Some(area) = self.canvas.get(id) {
            if let Some(visual) = area.visual {
                self.surface.set_visual_selected(visual, true);
            }
            self.panel.load(&area.attributes, area.shape.info_anchor());
        }
        true
    }

    /// Clears the selection and hides the attribute panel.
    ///
    /// An unfinished edit gesture is abandoned and the stored geometry shown
    /// again. Drawing in progress is not affected.
    pub fn deselect_all(&mut self) {
        if let Gesture::Editing { area, .. } = self.gesture {
            self.gesture = Gesture::Idle;
            self.surface.set_cursor(DEFAULT_CURSOR);
            self.redraw(area, None);
            tracing::debug!("Edit of area {} abandoned", area);
        }

        if let Some(previous) = self.canvas.deselect_all() {
            if let Some(area) = self.canvas.get_mut(previous) {
                if let Some(polygon) = area.shape.as_polygon_mut() {
                    polygon.select_point(None);
                }
                if let Some(visual) = area.visual {
                    self.surface.set_visual_selected(visual, false);
                }
            }
        }
        self.panel.unload();
    }

    /// Deletes the selected area.
    pub fn remove_selected(&mut self) -> Option<AreaId> {
        let id = self.canvas.selected_id()?;
        self.deselect_all();
        self.unregister(id)?;
        self.canvas.set_mode(EditorMode::Editing);
        self.update();
        tracing::info!("Removed area {}", id);
        Some(id)
    }

    /// Deletes every area, including one still being drawn.
    pub fn clear(&mut self) {
        self.deselect_all();
        self.gesture = Gesture::Idle;
        let ids: Vec<AreaId> = self.canvas.areas().iter().map(|area| area.id()).collect();
        for id in ids {
            self.unregister(id);
        }
        self.update();
    }

    /// Translates the selected area by `dx`/`dy`.
    ///
    /// Returns `false` when nothing is selected. A move that would leave the
    /// area invalid (e.g. a rectangle at x = 0) fails with `InvalidShape` and
    /// changes nothing.
    pub fn move_selected(&mut self, dx: f64, dy: f64) -> AreaResult<bool> {
        let Some(id) = self.canvas.selected_id() else {
            return Ok(false);
        };
        if let Some(area) = self.canvas.get_mut(id) {
            area.move_by(dx, dy, &mut self.surface)?;
        }
        self.update();
        Ok(true)
    }

    /// Applies attributes edited in the panel to the selected area.
    pub fn set_selected_attributes(&mut self, attributes: AreaAttributes) -> bool {
        let Some(area) = self
            .canvas
            .selected_id()
            .and_then(|id| self.canvas.get_mut(id))
        else {
            return false;
        };
        area.attributes = attributes;
        self.update();
        true
    }
}
