//! Canvas type definitions: AreaId, EditorMode.

/// Identifier assigned to an area when it joins the canvas.
pub type AreaId = u64;

/// Tool mode of the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorMode {
    /// Nothing armed yet (before the image is ready).
    #[default]
    None,
    /// Clicks draw a new area of the armed kind.
    Drawing,
    /// Clicks grab, move and resize existing areas.
    Editing,
}

impl std::fmt::Display for EditorMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditorMode::None => write!(f, "none"),
            EditorMode::Drawing => write!(f, "drawing"),
            EditorMode::Editing => write!(f, "editing"),
        }
    }
}
