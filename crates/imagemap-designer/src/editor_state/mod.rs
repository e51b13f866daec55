//! Editor state: the interaction state machine driving the canvas.
//!
//! Split into submodules:
//! - `selection`: selecting, deselecting, removing and nudging areas
//! - `drawing`: creating new areas with the pointer
//! - `editing`: moving and resizing areas through their handles
//! - `file_io`: JSON and `<area>` import/export and the backing field

mod drawing;
mod editing;
mod file_io;
mod selection;

use std::collections::HashMap;

use imagemap_core::constants::KEY_ENTER;
use imagemap_settings::EditorConfig;

use crate::area::{Area, AreaAttributes};
use crate::canvas::{AreaId, Canvas, EditorMode, HitTarget};
use crate::handles::{EditAction, HandleName};
use crate::model::{AreaCoords, Modifiers, Point, Shape, ShapeKind};
use crate::surface::{AttributePanel, DetachedPanel, HeadlessSurface, RenderSurface, VisualId};

/// What a pointer event landed on, in rendering-surface terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// Empty canvas or the image itself.
    Background,
    /// The body of the area drawn by this visual.
    Area(VisualId),
    /// A handle of the area drawn by this visual.
    Handle(VisualId, HandleName),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub position: Point,
    pub target: PointerTarget,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    pub fn new(position: Point, target: PointerTarget) -> Self {
        Self {
            position,
            target,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn with_shift(mut self) -> Self {
        self.modifiers.shift = true;
        self
    }
}

/// Keys the editor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Other(u32),
}

impl Key {
    pub fn from_code(code: u32) -> Self {
        if code == KEY_ENTER {
            Key::Enter
        } else {
            Key::Other(code)
        }
    }
}

/// The single live pointer gesture.
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    Idle,
    /// An area is being drawn.
    Drawing { area: AreaId },
    /// An area is being moved or resized with the button held.
    Editing {
        area: AreaId,
        action: EditAction,
        /// Pointer position the next delta is measured from.
        anchor: Point,
        /// Coordinates before the gesture started.
        original: AreaCoords,
        /// Latest previewed coordinates.
        candidate: AreaCoords,
    },
}

/// Source image the areas are drawn over.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSource {
    pub url: String,
    /// Natural size, known once the image is ready.
    pub size: Option<(f64, f64)>,
}

/// Editor state owning the canvas and driving its collaborators.
pub struct EditorState<S = HeadlessSurface, P = DetachedPanel> {
    canvas: Canvas,
    gesture: Gesture,
    visuals: HashMap<VisualId, AreaId>,
    surface: S,
    panel: P,
    config: EditorConfig,
    image: Option<ImageSource>,
    initial_load_done: bool,
    field_value: String,
}

impl EditorState {
    /// Editor backed by the in-memory surface and panel.
    pub fn headless(config: EditorConfig) -> Self {
        Self::new(HeadlessSurface::new(), DetachedPanel::new(), config)
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::headless(EditorConfig::default())
    }
}

impl<S: RenderSurface, P: AttributePanel> EditorState<S, P> {
    pub fn new(surface: S, panel: P, config: EditorConfig) -> Self {
        Self {
            canvas: Canvas::new(),
            gesture: Gesture::Idle,
            visuals: HashMap::new(),
            surface,
            panel,
            config,
            image: None,
            initial_load_done: false,
            field_value: String::new(),
        }
    }

    /// Seeds the backing field, e.g. with the value the form was rendered
    /// with. It is imported when the image first becomes ready.
    pub fn with_field_value(mut self, value: impl Into<String>) -> Self {
        self.field_value = value.into();
        self
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn panel(&self) -> &P {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut P {
        &mut self.panel
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn mode(&self) -> EditorMode {
        self.canvas.mode()
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn image(&self) -> Option<&ImageSource> {
        self.image.as_ref()
    }

    pub fn area(&self, id: AreaId) -> Option<&Area> {
        self.canvas.get(id)
    }

    /// Area drawn by a surface visual.
    pub fn area_for_visual(&self, visual: VisualId) -> Option<AreaId> {
        self.visuals.get(&visual).copied()
    }

    /// Arms the drawing tool with `kind`.
    pub fn arm(&mut self, kind: ShapeKind) {
        self.canvas.set_mode(EditorMode::Drawing);
        self.canvas.set_active_kind(Some(kind));
        self.deselect_all();
        tracing::debug!("Drawing tool armed with {}", kind);
    }

    /// Returns to the editing tool.
    pub fn disarm(&mut self) {
        self.canvas.set_mode(EditorMode::Editing);
        self.canvas.set_active_kind(None);
        self.deselect_all();
    }

    /// Toolbar button behaviour: pressing the armed kind again disarms it.
    pub fn toggle_tool(&mut self, kind: ShapeKind) {
        if self.canvas.mode() == EditorMode::Drawing && self.canvas.active_kind() == Some(kind) {
            self.disarm();
        } else {
            self.arm(kind);
        }
    }

    /// Records the image URL. Areas are only loaded once the host reports the
    /// image as ready.
    pub fn load_image(&mut self, url: impl Into<String>) {
        let url = url.into();
        tracing::debug!("Loading image {}", url);
        self.image = Some(ImageSource { url, size: None });
    }

    /// Resolves a surface position to a pointer target using the editor's own
    /// hit testing.
    pub fn hit_test(&self, p: Point) -> PointerTarget {
        let handles = &self.config.handles;
        let visual_of = |id: AreaId| self.canvas.get(id).and_then(Area::visual);
        match self.canvas.hit_test(p, handles.size, handles.hit_tolerance) {
            Some(HitTarget::Handle(id, name)) => visual_of(id)
                .map(|visual| PointerTarget::Handle(visual, name))
                .unwrap_or(PointerTarget::Background),
            Some(HitTarget::Body(id)) => visual_of(id)
                .map(PointerTarget::Area)
                .unwrap_or(PointerTarget::Background),
            None => PointerTarget::Background,
        }
    }

    /// Pointer event at `p` with its target resolved by [`Self::hit_test`].
    pub fn event_at(&self, p: Point, modifiers: Modifiers) -> PointerEvent {
        PointerEvent {
            position: p,
            target: self.hit_test(p),
            modifiers,
        }
    }

    /// Adds an area to the canvas and gives it a visual.
    fn register(&mut self, shape: Shape, attributes: AreaAttributes) -> AreaId {
        let kind = shape.kind();
        let id = self.canvas.add_area(shape, attributes);
        let visual = self.surface.create_shape_visual(kind);
        self.visuals.insert(visual, id);
        if let Some(area) = self.canvas.get_mut(id) {
            area.visual = Some(visual);
            area.redraw(&mut self.surface, None);
        }
        id
    }

    /// Removes an area and its visual.
    fn unregister(&mut self, id: AreaId) -> Option<Area> {
        let area = self.canvas.remove_area(id)?;
        if let Some(visual) = area.visual {
            self.visuals.remove(&visual);
            self.surface.remove_shape_visual(visual);
        }
        Some(area)
    }

    fn redraw(&mut self, id: AreaId, coords: Option<&AreaCoords>) {
        if let Some(area) = self.canvas.get_mut(id) {
            area.redraw(&mut self.surface, coords);
        }
    }

    fn constrain_enabled(&self, kind: ShapeKind, modifiers: Modifiers) -> bool {
        modifiers.shift
            && match kind {
                ShapeKind::Rectangle => self.config.drawing.constrain_rectangles,
                ShapeKind::Polygon => self.config.drawing.snap_polygon_angles,
                ShapeKind::Circle => false,
            }
    }
}
