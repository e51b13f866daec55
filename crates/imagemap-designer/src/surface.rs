//! Collaborators driven by the editor: the rendering surface and the
//! attribute panel.
//!
//! The editor only ever talks to these through the traits below. The
//! in-memory implementations back the CLI and the tests.

use std::collections::BTreeMap;

use crate::area::AreaAttributes;
use crate::handles::Handles;
use crate::model::{AreaCoords, Point, ShapeKind};

/// Identifier of a visual node owned by a [`RenderSurface`].
pub type VisualId = u64;

/// Draws areas and their handles.
pub trait RenderSurface {
    /// Creates an empty visual node for an area of `kind`.
    fn create_shape_visual(&mut self, kind: ShapeKind) -> VisualId;

    /// Replaces the geometry shown for `visual`. An open polygon is drawn as a
    /// polyline, a closed one as a filled outline.
    fn update_shape_visual(&mut self, visual: VisualId, coords: &AreaCoords, handles: &Handles);

    fn remove_shape_visual(&mut self, visual: VisualId);

    /// Toggles the selected styling of `visual`.
    fn set_visual_selected(&mut self, _visual: VisualId, _selected: bool) {}

    /// CSS cursor to show over the surface, e.g. while a resize is in progress.
    fn set_cursor(&mut self, _cursor: &'static str) {}
}

/// Cursor shown when no gesture is in progress.
pub const DEFAULT_CURSOR: &str = "default";

/// Form editing the selected area's attributes.
///
/// Edits made in the form come back through
/// [`EditorState::set_selected_attributes`](crate::EditorState::set_selected_attributes).
pub trait AttributePanel {
    /// Shows `attributes`, placed next to `anchor`.
    fn load(&mut self, attributes: &AreaAttributes, anchor: Point);
    fn unload(&mut self);
}

/// What a [`HeadlessSurface`] currently shows for one visual.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceVisual {
    pub kind: ShapeKind,
    pub coords: Option<AreaCoords>,
    pub handles: Handles,
    pub selected: bool,
}

/// Rendering surface that keeps the latest state of every visual in memory.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    visuals: BTreeMap<VisualId, SurfaceVisual>,
    next_id: VisualId,
    cursor: Option<&'static str>,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visual(&self, id: VisualId) -> Option<&SurfaceVisual> {
        self.visuals.get(&id)
    }

    /// Last cursor requested, if any.
    pub fn cursor(&self) -> Option<&'static str> {
        self.cursor
    }

    pub fn visuals(&self) -> impl Iterator<Item = (&VisualId, &SurfaceVisual)> {
        self.visuals.iter()
    }

    pub fn len(&self) -> usize {
        self.visuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visuals.is_empty()
    }
}

impl RenderSurface for HeadlessSurface {
    fn create_shape_visual(&mut self, kind: ShapeKind) -> VisualId {
        self.next_id += 1;
        self.visuals.insert(
            self.next_id,
            SurfaceVisual {
                kind,
                coords: None,
                handles: Handles::new(),
                selected: false,
            },
        );
        self.next_id
    }

    fn update_shape_visual(&mut self, visual: VisualId, coords: &AreaCoords, handles: &Handles) {
        match self.visuals.get_mut(&visual) {
            Some(entry) => {
                entry.coords = Some(coords.clone());
                entry.handles = handles.clone();
            }
            None => tracing::warn!("Update for unknown visual {}", visual),
        }
    }

    fn remove_shape_visual(&mut self, visual: VisualId) {
        self.visuals.remove(&visual);
    }

    fn set_visual_selected(&mut self, visual: VisualId, selected: bool) {
        if let Some(entry) = self.visuals.get_mut(&visual) {
            entry.selected = selected;
        }
    }

    fn set_cursor(&mut self, cursor: &'static str) {
        self.cursor = Some(cursor);
    }
}

/// Attribute panel that just remembers what it was last asked to show.
#[derive(Debug, Default)]
pub struct DetachedPanel {
    loaded: Option<(AreaAttributes, Point)>,
    loads: usize,
}

impl DetachedPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&AreaAttributes> {
        self.loaded.as_ref().map(|(attributes, _)| attributes)
    }

    pub fn anchor(&self) -> Option<Point> {
        self.loaded.as_ref().map(|(_, anchor)| *anchor)
    }

    /// Number of `load` calls so far.
    pub fn loads(&self) -> usize {
        self.loads
    }
}

impl AttributePanel for DetachedPanel {
    fn load(&mut self, attributes: &AreaAttributes, anchor: Point) {
        self.loaded = Some((attributes.clone(), anchor));
        self.loads += 1;
    }

    fn unload(&mut self) {
        self.loaded = None;
    }
}
