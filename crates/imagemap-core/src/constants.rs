//! Constants shared across the editor.

/// Side length of a square handle drawn on the rendering surface.
pub const HANDLE_SIZE: f64 = 5.0;

/// tan(22.5°), lower bound of the diagonal sector used by angle snapping.
pub const TAN_22_5: f64 = 0.414;

/// tan(67.5°), upper bound of the diagonal sector used by angle snapping.
pub const TAN_67_5: f64 = 2.414;

/// Minimum number of vertices a closed polygon needs.
pub const MIN_POLYGON_POINTS: usize = 3;

/// Coordinate count of an HTML `rect` area (x1, y1, x2, y2).
pub const RECT_HTML_COORDS: usize = 4;

/// Coordinate count of an HTML `circle` area (cx, cy, r).
pub const CIRCLE_HTML_COORDS: usize = 3;

/// Smallest coordinate count of an HTML `poly` area.
pub const MIN_POLY_HTML_COORDS: usize = MIN_POLYGON_POINTS * 2;

/// Key code that closes a polygon being drawn.
pub const KEY_ENTER: u32 = 13;
