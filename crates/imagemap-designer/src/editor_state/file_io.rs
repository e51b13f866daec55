//! Persistence: the backing field, JSON documents and `<area>` markup.

use std::path::Path;

use anyhow::{Context, Result};

use imagemap_core::AreaResult;

use super::EditorState;
use crate::canvas::EditorMode;
use crate::import::scan_area_tags;
use crate::serialization::{self, ImportReport, MapDocument};
use crate::surface::{AttributePanel, RenderSurface};

impl<S: RenderSurface, P: AttributePanel> EditorState<S, P> {
    /// Current value of the backing field.
    pub fn map_data(&self) -> &str {
        &self.field_value
    }

    /// Serializes the finished areas with the image URL.
    pub fn to_json(&self) -> AreaResult<String> {
        let img = self.image.as_ref().map(|image| image.url.as_str());
        serialization::encode(self.canvas.committed_areas(), img)
    }

    /// Rewrites the backing field from the canvas.
    pub fn update(&mut self) {
        match self.to_json() {
            Ok(json) => self.field_value = json,
            Err(e) => tracing::error!("Failed to serialize areas: {}", e),
        }
    }

    /// `<area>` elements for every finished area.
    pub fn html_markup(&self) -> String {
        serialization::html_markup(self.canvas.committed_areas(), &self.config.markup)
    }

    /// The host reports the image as loaded with its natural size.
    ///
    /// Switches to editing. The first time only, the areas stored in the
    /// backing field are loaded.
    pub fn image_ready(&mut self, width: f64, height: f64) -> Option<ImportReport> {
        if let Some(image) = &mut self.image {
            image.size = Some((width, height));
        }
        self.canvas.set_mode(EditorMode::Editing);
        self.deselect_all();

        if self.initial_load_done {
            return None;
        }
        self.initial_load_done = true;
        if self.field_value.trim().is_empty() {
            return None;
        }

        let data = self.field_value.clone();
        match self.load_json(&data) {
            Ok(report) => Some(report),
            Err(e) => {
                tracing::warn!("Stored area data could not be read: {}", e);
                None
            }
        }
    }

    /// Adds the areas of a persisted document to the canvas.
    ///
    /// A document that does not parse fails as a whole and leaves the canvas
    /// untouched. Otherwise each record is loaded or rejected on its own.
    pub fn load_json(&mut self, json: &str) -> AreaResult<ImportReport> {
        let document = MapDocument::parse(json)?;
        let mut report = ImportReport::default();
        for (index, decoded) in document.decode_areas().into_iter().enumerate() {
            match decoded {
                Ok((shape, attributes)) => report.imported.push(self.register(shape, attributes)),
                Err(e) => report.reject(index, e),
            }
        }
        self.update();
        tracing::info!(
            "Loaded {} areas ({} rejected)",
            report.imported.len(),
            report.rejected.len()
        );
        Ok(report)
    }

    /// Adds the areas described by `<area>` tags in `html`.
    pub fn import_html(&mut self, html: &str) -> ImportReport {
        let mut report = ImportReport::default();
        for tag in scan_area_tags(html) {
            match tag.decode(&self.config.markup) {
                Ok(Some((shape, attributes))) => report.imported.push(self.register(shape, attributes)),
                Ok(None) => tracing::debug!("Ignoring <area> tag {} without shape or coords", tag.index),
                Err(e) => report.reject(tag.index, e),
            }
        }
        self.update();
        tracing::info!(
            "Imported {} areas from markup ({} rejected)",
            report.imported.len(),
            report.rejected.len()
        );
        report
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write map file {}", path.display()))?;
        Ok(())
    }

    pub fn load_from_file(&mut self, path: &Path) -> Result<ImportReport> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read map file {}", path.display()))?;
        self.load_json(&content)
            .with_context(|| format!("Failed to parse map file {}", path.display()))
    }

    pub fn export_html(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.html_markup())
            .with_context(|| format!("Failed to write markup to {}", path.display()))?;
        Ok(())
    }
}
