//! # Imagemap
//!
//! Editor for the clickable regions of an HTML image map:
//! - Rectangle, circle and polygon areas drawn and edited over an image
//! - Link and alt-text attributes per area
//! - Persistence as a JSON document and export as `<area>` markup
//!
//! ## Architecture
//!
//! The workspace is split into crates:
//!
//! 1. **imagemap-core** - Error taxonomy and shared constants
//! 2. **imagemap-settings** - Editor configuration (markup policy, handles, drawing assists)
//! 3. **imagemap-designer** - Shapes, handles, canvas, the editor state machine and serialization
//! 4. **imagemap** - Command-line converter between the JSON document and `<area>` markup

pub use imagemap_core::{AreaError, AreaResult};
pub use imagemap_designer as designer;
pub use imagemap_designer::{
    Area, AreaAttributes, AreaCoords, Canvas, EditorMode, EditorState, ImportReport, Point,
    PointerEvent, PointerTarget, Shape, ShapeKind,
};
pub use imagemap_settings::{default_config_path, EditorConfig, MarkupSeparator, MarkupSettings};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Sets up structured logging with:
/// - Output on stderr, so stdout stays free for converted documents
/// - RUST_LOG environment variable support
/// - Optional JSON lines instead of the human readable format
pub fn init_logging(json: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    if json {
        let fmt_layer = fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    }

    Ok(())
}
