//! The area entity: geometry, free-form attributes and derived handles.

use serde::{Deserialize, Serialize};

use imagemap_core::{AreaError, AreaResult};
use imagemap_settings::MarkupSettings;

use crate::canvas::AreaId;
use crate::handles::{EditAction, Handles};
use crate::model::{AreaCoords, Shape, ShapeKind};
use crate::serialization::AreaRecord;
use crate::surface::{RenderSurface, VisualId};

/// Free-form attributes edited through the attribute panel. Independent of
/// geometry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AreaAttributes {
    pub link: String,
    pub asset: String,
    pub page: String,
    pub alt: String,
    pub target: String,
}

/// A clickable region registered on the canvas.
#[derive(Debug, Clone)]
pub struct Area {
    pub(crate) id: AreaId,
    pub(crate) shape: Shape,
    pub attributes: AreaAttributes,
    pub(crate) handles: Handles,
    pub(crate) visual: Option<VisualId>,
    pub(crate) selected: bool,
}

impl Area {
    pub fn new(id: AreaId, shape: Shape, attributes: AreaAttributes) -> Self {
        let handles = shape.coords().handles();
        Self {
            id,
            shape,
            attributes,
            handles,
            visual: None,
            selected: false,
        }
    }

    pub fn id(&self) -> AreaId {
        self.id
    }

    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn shape_mut(&mut self) -> &mut Shape {
        &mut self.shape
    }

    pub fn coords(&self) -> AreaCoords {
        self.shape.coords()
    }

    /// Handles as of the last redraw.
    pub fn handles(&self) -> &Handles {
        &self.handles
    }

    pub fn visual(&self) -> Option<VisualId> {
        self.visual
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn compute_handles(&self) -> Handles {
        self.shape.coords().handles()
    }

    /// Pushes `coords` (or the stored coordinates) and the matching handles to
    /// the surface. Stored coordinates are never changed here.
    pub fn redraw<S: RenderSurface + ?Sized>(&mut self, surface: &mut S, coords: Option<&AreaCoords>) {
        let coords = coords.cloned().unwrap_or_else(|| self.shape.coords());
        self.handles = coords.handles();
        if let Some(visual) = self.visual {
            surface.update_shape_visual(visual, &coords, &self.handles);
        }
    }

    pub fn apply_edit(&self, action: EditAction, dx: f64, dy: f64) -> AreaCoords {
        self.shape.apply_edit(action, dx, dy)
    }

    pub fn set_coords(&mut self, coords: AreaCoords) -> AreaResult<()> {
        self.shape.set_coords(coords)
    }

    /// Translates the whole area and redraws it.
    ///
    /// Fails without moving when the result would not pass the validity
    /// check.
    pub fn move_by<S: RenderSurface + ?Sized>(&mut self, dx: f64, dy: f64, surface: &mut S) -> AreaResult<()> {
        let moved = self.shape.apply_edit(EditAction::Move, dx, dy);
        if !moved.is_valid() {
            return Err(AreaError::invalid_shape(
                self.kind().as_str(),
                format!("moving by ({}, {}) leaves invalid coordinates", dx, dy),
            ));
        }
        self.shape.set_coords(moved)?;
        self.redraw(surface, None);
        Ok(())
    }

    pub fn test_coords(&self) -> bool {
        self.shape.test_coords()
    }

    pub fn to_record(&self) -> AreaResult<AreaRecord> {
        Ok(AreaRecord {
            kind: self.kind().as_str().to_string(),
            coords: serde_json::to_value(self.shape.coords())?,
            attributes: self.attributes.clone(),
        })
    }

    /// `<area ... />` element for this area.
    pub fn to_map_element(&self, options: &MarkupSettings) -> String {
        let coords = self
            .shape
            .coords()
            .html_coordinates()
            .into_iter()
            .map(format_number)
            .collect::<Vec<_>>()
            .join(", ");

        let mut element = format!(
            "<area shape=\"{}\" coords=\"{}\"",
            self.kind().html_name(),
            coords
        );
        if options.link_as_href && !self.attributes.link.is_empty() {
            element.push_str(&format!(" href=\"{}\"", encode(&self.attributes.link)));
        }
        if !self.attributes.alt.is_empty() {
            element.push_str(&format!(" alt=\"{}\"", encode(&self.attributes.alt)));
        }
        element.push_str(" />");
        element
    }
}

/// Shortest decimal form: `10` rather than `10.0`.
pub(crate) fn format_number(value: f64) -> String {
    if value == 0.0 {
        // Avoid printing "-0".
        return "0".to_string();
    }
    value.to_string()
}

/// Escapes text for use inside a double-quoted attribute.
pub(crate) fn encode(text: &str) -> String {
    text.replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AreaRectangle, Point};
    use crate::surface::HeadlessSurface;

    fn rectangle_area() -> Area {
        Area::new(
            1,
            Shape::Rectangle(AreaRectangle::new(10.0, 10.0, 100.0, 50.0)),
            AreaAttributes::default(),
        )
    }

    #[test]
    fn test_map_element_without_attributes() {
        let area = rectangle_area();
        assert_eq!(
            area.to_map_element(&MarkupSettings::default()),
            r#"<area shape="rect" coords="10, 10, 110, 60" />"#
        );
    }

    #[test]
    fn test_map_element_escapes_attributes() {
        let mut area = rectangle_area();
        area.attributes.alt = "<b>\"Home\"</b>".to_string();
        area.attributes.link = "/home".to_string();

        let plain = area.to_map_element(&MarkupSettings::default());
        assert_eq!(
            plain,
            r#"<area shape="rect" coords="10, 10, 110, 60" alt="&lt;b&gt;&quot;Home&quot;&lt;/b&gt;" />"#
        );

        let options = MarkupSettings {
            link_as_href: true,
            ..MarkupSettings::default()
        };
        assert!(area
            .to_map_element(&options)
            .contains(r#"coords="10, 10, 110, 60" href="/home" alt="#));
    }

    #[test]
    fn test_move_by_redraws() {
        let mut surface = HeadlessSurface::new();
        let mut area = rectangle_area();
        area.visual = Some(surface.create_shape_visual(ShapeKind::Rectangle));

        area.move_by(5.0, 5.0, &mut surface).unwrap();
        assert_eq!(area.shape().info_anchor(), Point::new(15.0, 15.0));
        let visual = surface.visual(area.visual().unwrap()).unwrap();
        assert_eq!(visual.coords.as_ref(), Some(&area.coords()));
    }

    #[test]
    fn test_move_by_rejects_invalid_result() {
        let mut surface = HeadlessSurface::new();
        let mut area = rectangle_area();
        let before = area.coords();

        let err = area.move_by(-10.0, 0.0, &mut surface).unwrap_err();
        assert!(matches!(err, AreaError::InvalidShape { ref kind, .. } if kind == "rectangle"));
        assert_eq!(area.coords(), before);
    }

    #[test]
    fn test_record_carries_type_and_attributes() {
        let mut area = rectangle_area();
        area.attributes.page = "12".to_string();
        let record = area.to_record().unwrap();
        assert_eq!(record.kind, "rectangle");
        assert_eq!(record.coords["width"], 100.0);
        assert_eq!(record.attributes.page, "12");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(10.0), "10");
        assert_eq!(format_number(10.5), "10.5");
        assert_eq!(format_number(-0.0), "0");
    }
}
