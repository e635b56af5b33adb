//! SBOL RDF/XML reader.
//!
//! Reads top-level SBOL3 `Component` (and SBOL2 `ComponentDefinition`)
//! objects with their features (`hasFeature` / `sequenceAnnotation`), the
//! features' roles, names and locations. Everything else in the document is
//! ignored. Namespace prefixes are not checked, elements are matched by
//! local name.

use crate::{
    error::DesignLoadError,
    sbol_component::{DnaComponent, Location, SubComponent},
};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

const COMPONENT_ELEMENTS: &[&str] = &["Component", "ComponentDefinition"];
const FEATURE_PROPERTIES: &[&str] = &["hasFeature", "sequenceAnnotation"];
const LOCATION_PROPERTIES: &[&str] = &["hasLocation", "location"];
const NAME_PROPERTIES: &[&str] = &["name", "title"];

pub fn parse_sbol_xml_file(path: &str) -> Result<Vec<DnaComponent>, DesignLoadError> {
    let text = std::fs::read_to_string(path).map_err(|e| DesignLoadError::io(path, e))?;
    parse_sbol_xml_text(&text)
}

pub fn parse_sbol_xml_text(xml: &str) -> Result<Vec<DnaComponent>, DesignLoadError> {
    let mut parser = SbolXmlParser::default();
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    loop {
        match reader.read_event()? {
            Event::Start(e) => parser.open(&e)?,
            Event::Empty(e) => {
                parser.open(&e)?;
                parser.close()?;
            }
            Event::Text(t) => parser.text.push_str(&t.unescape()?),
            Event::CData(c) => parser
                .text
                .push_str(&String::from_utf8_lossy(&c.into_inner())),
            Event::End(_) => parser.close()?,
            Event::Eof => break,
            _ => {}
        }
    }
    if parser.components.is_empty() {
        return Err(DesignLoadError::Structure(
            "no Component or ComponentDefinition element found".to_string(),
        ));
    }
    Ok(parser.components)
}

#[derive(Debug, Default)]
struct LocationXml {
    depth: usize,
    start: Option<i64>,
    end: Option<i64>,
    at: Option<i64>,
}

impl LocationXml {
    fn into_location(self) -> Option<Location> {
        match (self.start, self.end, self.at) {
            (Some(start), Some(end), _) => Some(Location::new(start, end)),
            (_, _, Some(at)) => Some(Location::new(at, at)),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct ObjectXml<T> {
    depth: usize,
    uri: Option<String>,
    value: T,
}

#[derive(Debug, Default)]
struct SbolXmlParser {
    /// Local names of the currently open elements.
    stack: Vec<String>,
    text: String,
    component: Option<ObjectXml<DnaComponent>>,
    feature: Option<ObjectXml<SubComponent>>,
    location: Option<LocationXml>,
    components: Vec<DnaComponent>,
}

fn local_name(e: &BytesStart) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

fn attr_value(e: &BytesStart, key: &[u8]) -> Result<Option<String>, DesignLoadError> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.local_name().as_ref() == key {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

/// Last path segment of an SBOL identity, used when `displayId` is absent.
fn display_id_from_uri(uri: &str) -> String {
    uri.trim_end_matches('/')
        .rsplit(['/', '#'])
        .next()
        .unwrap_or(uri)
        .to_string()
}

fn parse_coordinate(name: &str, text: &str) -> Result<i64, DesignLoadError> {
    text.trim().parse::<i64>().map_err(|e| {
        DesignLoadError::Structure(format!("invalid location {name} '{text}': {e}"))
    })
}

impl SbolXmlParser {
    fn parent(&self) -> Option<&str> {
        self.stack.last().map(String::as_str)
    }

    fn open(&mut self, e: &BytesStart) -> Result<(), DesignLoadError> {
        let name = local_name(e);
        let parent = self.parent().unwrap_or_default().to_string();
        self.stack.push(name.clone());
        self.text.clear();
        let depth = self.stack.len();

        if self.component.is_none() {
            if COMPONENT_ELEMENTS.contains(&name.as_str()) {
                self.component = Some(ObjectXml {
                    depth,
                    uri: attr_value(e, b"about")?,
                    value: DnaComponent::default(),
                });
            }
            return Ok(());
        }

        let Some(feature) = self.feature.as_mut() else {
            if FEATURE_PROPERTIES.contains(&parent.as_str()) {
                self.feature = Some(ObjectXml {
                    depth,
                    uri: attr_value(e, b"about")?,
                    value: SubComponent::default(),
                });
            }
            return Ok(());
        };

        if self.location.is_none() && LOCATION_PROPERTIES.contains(&parent.as_str()) {
            self.location = Some(LocationXml {
                depth,
                ..Default::default()
            });
        } else if depth == feature.depth + 1 && name == "role" {
            if let Some(role) = attr_value(e, b"resource")? {
                feature.value.roles.push(role);
            }
        }
        Ok(())
    }

    fn close(&mut self) -> Result<(), DesignLoadError> {
        let depth = self.stack.len();
        let Some(name) = self.stack.pop() else {
            return Ok(());
        };
        let text = std::mem::take(&mut self.text);

        if let Some(location) = self.location.as_mut() {
            if depth == location.depth + 1 {
                match name.as_str() {
                    "start" => location.start = Some(parse_coordinate("start", &text)?),
                    "end" => location.end = Some(parse_coordinate("end", &text)?),
                    "at" => location.at = Some(parse_coordinate("at", &text)?),
                    _ => {}
                }
            } else if depth == location.depth {
                let location = self.location.take().and_then(LocationXml::into_location);
                if let (Some(location), Some(feature)) = (location, self.feature.as_mut()) {
                    feature.value.locations.push(location);
                }
            }
            return Ok(());
        }

        if let Some(feature) = self.feature.as_mut() {
            if depth == feature.depth + 1 {
                match name.as_str() {
                    "displayId" => feature.value.display_id = text.trim().to_string(),
                    n if NAME_PROPERTIES.contains(&n) => feature.value.name = Some(text),
                    _ => {}
                }
            } else if depth == feature.depth {
                if let Some(mut feature) = self.feature.take() {
                    if feature.value.display_id.is_empty() {
                        feature.value.display_id =
                            feature.uri.as_deref().map(display_id_from_uri).unwrap_or_default();
                    }
                    if let Some(component) = self.component.as_mut() {
                        component.value.features.push(feature.value);
                    }
                }
            }
            return Ok(());
        }

        if let Some(component) = self.component.as_mut() {
            if depth == component.depth + 1 {
                match name.as_str() {
                    "displayId" => component.value.display_id = text.trim().to_string(),
                    n if NAME_PROPERTIES.contains(&n) => component.value.name = Some(text),
                    _ => {}
                }
            } else if depth == component.depth {
                if let Some(mut component) = self.component.take() {
                    if component.value.display_id.is_empty() {
                        component.value.display_id = component
                            .uri
                            .as_deref()
                            .map(display_id_from_uri)
                            .unwrap_or_default();
                    }
                    self.components.push(component.value);
                }
            }
        }
        Ok(())
    }
}
