//! Canvas holding the registered areas and the editor's tool state.

mod operations;
mod types;

pub use operations::HitTarget;
pub use types::{AreaId, EditorMode};

use crate::area::{Area, AreaAttributes};
use crate::model::{Shape, ShapeKind};
use crate::selection_manager::SelectionManager;

/// Registry of areas in creation order, plus selection, the area being drawn,
/// the tool mode and the armed shape kind.
#[derive(Debug, Clone, Default)]
pub struct Canvas {
    areas: Vec<Area>,
    next_id: AreaId,
    pub selection_manager: SelectionManager,
    in_progress: Option<AreaId>,
    mode: EditorMode,
    active_kind: Option<ShapeKind>,
}

impl Canvas {
    /// Creates an empty canvas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new area and returns its ID.
    pub fn add_area(&mut self, shape: Shape, attributes: AreaAttributes) -> AreaId {
        self.next_id += 1;
        let id = self.next_id;
        self.areas.push(Area::new(id, shape, attributes));
        id
    }

    /// Removes an area, clearing selection and in-progress state that point
    /// at it.
    pub fn remove_area(&mut self, id: AreaId) -> Option<Area> {
        let index = self.position(id)?;
        self.selection_manager.forget(id);
        if self.in_progress == Some(id) {
            self.in_progress = None;
        }
        Some(self.areas.remove(index))
    }

    /// Removes every area.
    pub fn clear(&mut self) -> Vec<Area> {
        self.selection_manager.deselect_all(&mut self.areas);
        self.in_progress = None;
        std::mem::take(&mut self.areas)
    }

    pub fn get(&self, id: AreaId) -> Option<&Area> {
        self.areas.iter().find(|area| area.id == id)
    }

    pub fn get_mut(&mut self, id: AreaId) -> Option<&mut Area> {
        self.areas.iter_mut().find(|area| area.id == id)
    }

    fn position(&self, id: AreaId) -> Option<usize> {
        self.areas.iter().position(|area| area.id == id)
    }

    /// Areas in creation order.
    pub fn areas(&self) -> &[Area] {
        &self.areas
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    /// Areas that are finished, i.e. everything except the one being drawn.
    pub fn committed_areas(&self) -> impl Iterator<Item = &Area> {
        let in_progress = self.in_progress;
        self.areas
            .iter()
            .filter(move |area| Some(area.id) != in_progress)
    }

    pub fn select(&mut self, id: AreaId) -> bool {
        self.selection_manager.select(&mut self.areas, id)
    }

    pub fn deselect_all(&mut self) -> Option<AreaId> {
        self.selection_manager.deselect_all(&mut self.areas)
    }

    pub fn selected_id(&self) -> Option<AreaId> {
        self.selection_manager.selected_id()
    }

    pub fn selected(&self) -> Option<&Area> {
        self.selected_id().and_then(|id| self.get(id))
    }

    pub fn in_progress(&self) -> Option<AreaId> {
        self.in_progress
    }

    pub fn set_in_progress(&mut self, id: Option<AreaId>) {
        self.in_progress = id;
    }

    /// Sets the tool mode.
    pub fn set_mode(&mut self, mode: EditorMode) {
        self.mode = mode;
    }

    /// Gets the current tool mode.
    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn active_kind(&self) -> Option<ShapeKind> {
        self.active_kind
    }

    pub fn set_active_kind(&mut self, kind: Option<ShapeKind>) {
        self.active_kind = kind;
    }
}
