//! Reading areas back out of existing `<area>` markup.

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

use imagemap_core::{AreaError, AreaResult};
use imagemap_settings::MarkupSettings;

use crate::area::AreaAttributes;
use crate::model::{AreaCoords, Shape, ShapeKind};

/// Attributes of one `<area>` tag, as written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AreaTag {
    /// Ordinal of the tag within the scanned markup.
    pub index: usize,
    pub shape: Option<String>,
    pub coords: Option<String>,
    pub href: Option<String>,
    pub alt: Option<String>,
    pub title: Option<String>,
}

fn area_tag_regex() -> &'static Regex {
    static AREA_TAG: OnceLock<Regex> = OnceLock::new();
    AREA_TAG.get_or_init(|| Regex::new(r"(?is)<area\b[^>]*>").expect("invalid regex pattern"))
}

fn attribute_regex() -> &'static Regex {
    static ATTRIBUTE: OnceLock<Regex> = OnceLock::new();
    ATTRIBUTE.get_or_init(|| {
        Regex::new(r#"(?is)\s([a-z][a-z0-9_:-]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
            .expect("invalid regex pattern")
    })
}

fn delimiter_regex() -> &'static Regex {
    static DELIMITER: OnceLock<Regex> = OnceLock::new();
    DELIMITER.get_or_init(|| Regex::new(r"[\s,]+").expect("invalid regex pattern"))
}

/// Finds every `<area>` tag in `html`, in document order.
pub fn scan_area_tags(html: &str) -> Vec<AreaTag> {
    area_tag_regex()
        .find_iter(html)
        .enumerate()
        .map(|(index, tag)| {
            let mut attributes: HashMap<String, String> = HashMap::new();
            for caps in attribute_regex().captures_iter(tag.as_str()) {
                let name = caps[1].to_ascii_lowercase();
                let value = caps
                    .get(2)
                    .or_else(|| caps.get(3))
                    .map(|m| decode_entities(m.as_str()))
                    .unwrap_or_default();
                attributes.entry(name).or_insert(value);
            }
            AreaTag {
                index,
                shape: attributes.remove("shape"),
                coords: attributes.remove("coords"),
                href: attributes.remove("href"),
                alt: attributes.remove("alt"),
                title: attributes.remove("title"),
            }
        })
        .collect()
}

/// Splits a comma/space-delimited `coords` value into numbers.
pub fn parse_coordinates(text: &str) -> AreaResult<Vec<f64>> {
    delimiter_regex()
        .split(text.trim())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .ok_or_else(|| AreaError::InvalidNumber {
                    value: token.to_string(),
                })
        })
        .collect()
}

impl AreaTag {
    /// Shape and attributes this tag describes.
    ///
    /// `Ok(None)` for tags that carry no `shape` or no `coords` and therefore
    /// describe no region.
    pub fn decode(&self, options: &MarkupSettings) -> AreaResult<Option<(Shape, AreaAttributes)>> {
        let (Some(shape), Some(coords)) = (&self.shape, &self.coords) else {
            return Ok(None);
        };

        let kind = ShapeKind::from_html_name(shape)?;
        let values = parse_coordinates(coords)?;
        let coords = AreaCoords::from_html_coordinates(kind, &values)?;
        if !coords.is_valid() {
            return Err(AreaError::invalid_shape(
                kind.as_str(),
                "coordinates are not valid for this kind",
            ));
        }

        let mut attributes = AreaAttributes {
            alt: self.alt.clone().unwrap_or_default(),
            ..AreaAttributes::default()
        };
        if options.link_as_href {
            attributes.link = self.href.clone().unwrap_or_default();
        }
        Ok(Some((Shape::from_coords(coords), attributes)))
    }
}

fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RectCoords;

    #[test]
    fn test_scan_reads_attributes_in_any_order() {
        let html = r#"<map name="m">
            <area href="/x" coords="1,2,3,4" shape="rect">
            <AREA SHAPE='circle' COORDS='5, 5, 5' alt="A &lt;b&gt;" title="t"/>
            <img src="a.png">
        </map>"#;

        let tags = scan_area_tags(html);
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].shape.as_deref(), Some("rect"));
        assert_eq!(tags[0].coords.as_deref(), Some("1,2,3,4"));
        assert_eq!(tags[0].href.as_deref(), Some("/x"));
        assert_eq!(tags[1].index, 1);
        assert_eq!(tags[1].alt.as_deref(), Some("A <b>"));
        assert_eq!(tags[1].title.as_deref(), Some("t"));
    }

    #[test]
    fn test_parse_coordinates() {
        assert_eq!(parse_coordinates("1,2, 3 ,4").unwrap(), vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(parse_coordinates(" 1 2\t3 ").unwrap(), vec![1.0, 2.0, 3.0]);
        assert!(matches!(
            parse_coordinates("1,x,3"),
            Err(AreaError::InvalidNumber { ref value }) if value == "x"
        ));
    }

    #[test]
    fn test_decode_rect_ignores_href_by_default() {
        let tag = &scan_area_tags(r#"<area shape="rect" coords="1,2,3,4" href="/x">"#)[0];
        let (shape, attributes) = tag.decode(&MarkupSettings::default()).unwrap().unwrap();
        assert_eq!(
            shape.coords(),
            AreaCoords::Rectangle(RectCoords {
                x: 1.0,
                y: 2.0,
                width: 2.0,
                height: 2.0
            })
        );
        assert_eq!(attributes.link, "");

        let options = MarkupSettings {
            link_as_href: true,
            ..MarkupSettings::default()
        };
        let (_, attributes) = tag.decode(&options).unwrap().unwrap();
        assert_eq!(attributes.link, "/x");
    }

    #[test]
    fn test_decode_errors() {
        let tags = scan_area_tags(
            r#"<area shape="default" coords="1">
               <area shape="circle" coords="1,2">
               <area shape="rect" coords="0,0,10,10">
               <area href="/nowhere">"#,
        );
        let options = MarkupSettings::default();
        assert!(matches!(tags[0].decode(&options), Err(AreaError::UnknownShapeKind { .. })));
        assert!(matches!(
            tags[1].decode(&options),
            Err(AreaError::MalformedCoordinates { count: 2, .. })
        ));
        assert!(matches!(tags[2].decode(&options), Err(AreaError::InvalidShape { .. })));
        assert!(tags[3].decode(&options).unwrap().is_none());
    }
}
