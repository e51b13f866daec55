use crate::area::Area;
use crate::canvas::AreaId;

/// Tracks the single selected area.
///
/// The editor supports exactly one selection at a time. Selecting an area
/// clears the `selected` flag of every other area, so the flags on the areas
/// and `selected_id` never disagree.
#[derive(Debug, Clone, Default)]
pub struct SelectionManager {
    /// The ID of the selected area, if any
    selected_id: Option<AreaId>,
}

impl SelectionManager {
    /// Creates a new `SelectionManager` with no selection.
    ///
    /// # Examples
    ///
    /// ```
    /// use imagemap_designer::selection_manager::SelectionManager;
    ///
    /// let manager = SelectionManager::new();
    /// assert_eq!(manager.selected_id(), None);
    /// ```
    pub fn new() -> Self {
        Self { selected_id: None }
    }

    /// Returns the ID of the selected area.
    pub fn selected_id(&self) -> Option<AreaId> {
        self.selected_id
    }

    /// Returns `true` if `id` is the selected area.
    pub fn is_selected(&self, id: AreaId) -> bool {
        self.selected_id == Some(id)
    }

    /// Selects the area with `id`, deselecting every other area.
    ///
    /// # Returns
    ///
    /// `false` (and no change) if no area has that ID.
    pub fn select(&mut self, areas: &mut [Area], id: AreaId) -> bool {
        if !areas.iter().any(|area| area.id == id) {
            return false;
        }
        for area in areas.iter_mut() {
            area.selected = area.id == id;
        }
        self.selected_id = Some(id);
        true
    }

    /// Deselects all areas and clears the selection.
    ///
    /// # Returns
    ///
    /// The ID that was selected before the call.
    pub fn deselect_all(&mut self, areas: &mut [Area]) -> Option<AreaId> {
        for area in areas.iter_mut() {
            area.selected = false;
        }
        self.selected_id.take()
    }

    /// Forgets `id` if it is the selected area. Used when the area is removed.
    pub fn forget(&mut self, id: AreaId) {
        if self.selected_id == Some(id) {
            self.selected_id = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::area::AreaAttributes;
    use crate::model::{Point, Shape, ShapeKind};

    fn areas() -> Vec<Area> {
        (1..=3)
            .map(|id| {
                Area::new(
                    id,
                    Shape::new_at(ShapeKind::Circle, Point::new(id as f64, 1.0)),
                    AreaAttributes::default(),
                )
            })
            .collect()
    }

    #[test]
    fn test_select_is_exclusive() {
        let mut areas = areas();
        let mut manager = SelectionManager::new();

        assert!(manager.select(&mut areas, 1));
        assert!(manager.select(&mut areas, 2));
        assert_eq!(manager.selected_id(), Some(2));
        assert_eq!(areas.iter().filter(|a| a.is_selected()).count(), 1);
        assert!(areas[1].is_selected());
    }

    #[test]
    fn test_select_unknown_id() {
        let mut areas = areas();
        let mut manager = SelectionManager::new();
        assert!(!manager.select(&mut areas, 42));
        assert_eq!(manager.selected_id(), None);
    }

    #[test]
    fn test_deselect_all() {
        let mut areas = areas();
        let mut manager = SelectionManager::new();
        manager.select(&mut areas, 3);

        assert_eq!(manager.deselect_all(&mut areas), Some(3));
        assert!(areas.iter().all(|a| !a.is_selected()));
        assert_eq!(manager.deselect_all(&mut areas), None);
    }
}
