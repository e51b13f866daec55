//! # Imagemap Designer
//!
//! Interactive editing of clickable regions drawn over an image, and their
//! persistence as JSON and as HTML `<area>` markup.
//!
//! ## Core Components
//!
//! - **Shapes**: rectangles, circles and polygons, each with its own handles,
//!   edit rules and validity predicate
//! - **Canvas**: registry of areas with exclusive selection
//! - **Editor state**: the drawing/editing state machine fed with pointer and
//!   key events
//! - **Serialization**: the persisted JSON document, `<area>` emission and
//!   import of existing markup
//!
//! ## Architecture
//!
//! ```text
//! EditorState (events in, field value out)
//!   ├── Canvas (areas, selection, mode)
//!   │     └── Area (shape, attributes, handles)
//!   ├── RenderSurface (visual nodes)
//!   └── AttributePanel (selected area's form)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use imagemap_designer::{EditorState, PointerEvent, PointerTarget, Point, ShapeKind};
//!
//! let mut editor = EditorState::default();
//! editor.load_image("map.png");
//! editor.image_ready(640.0, 480.0);
//!
//! editor.arm(ShapeKind::Rectangle);
//! editor.click(PointerEvent::new(Point::new(10.0, 10.0), PointerTarget::Background));
//! editor.click(PointerEvent::new(Point::new(50.0, 40.0), PointerTarget::Background));
//!
//! assert_eq!(editor.canvas().len(), 1);
//! assert!(editor.map_data().contains("\"type\":\"rectangle\""));
//! ```

pub mod area;
pub mod canvas;
pub mod editor_state;
pub mod geometry;
pub mod handles;
pub mod import;
pub mod model;
pub mod selection_manager;
pub mod serialization;
pub mod surface;

pub use area::{Area, AreaAttributes};
pub use canvas::{AreaId, Canvas, EditorMode, HitTarget};
pub use editor_state::{EditorState, Gesture, ImageSource, Key, PointerEvent, PointerTarget};
pub use handles::{EditAction, Handle, HandleName, Handles};
pub use import::{parse_coordinates, scan_area_tags, AreaTag};
pub use model::{
    AreaCircle, AreaCoords, AreaPolygon, AreaRectangle, AreaShape, CircleCoords, Modifiers, Point,
    PolygonCoords, RectCoords, Shape, ShapeKind,
};
pub use selection_manager::SelectionManager;
pub use serialization::{encode, html_markup, AreaRecord, ImportReport, MapDocument, RejectedArea};
pub use surface::{
    AttributePanel, DetachedPanel, HeadlessSurface, RenderSurface, SurfaceVisual, VisualId,
    DEFAULT_CURSOR,
};

pub use imagemap_core::{AreaError, AreaResult};
