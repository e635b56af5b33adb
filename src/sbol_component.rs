//! In-memory SBOL design model: a DNA component made of subcomponent features.

use crate::error::DesignLoadError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A region on the parent sequence, in SBOL's 1-based inclusive coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub start: i64,
    pub end: i64,
}

impl Location {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SubComponent {
    pub display_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub locations: Vec<Location>,
}

impl SubComponent {
    pub fn new(display_id: &str) -> Self {
        Self {
            display_id: display_id.to_string(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_role(mut self, role: &str) -> Self {
        self.roles.push(role.to_string());
        self
    }

    pub fn with_location(mut self, start: i64, end: i64) -> Self {
        self.locations.push(Location::new(start, end));
        self
    }

    /// The name shown on the glyph: the name if set and non-empty, else the display id.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.display_id,
        }
    }

    pub fn first_location(&self) -> Option<&Location> {
        self.locations.first()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DnaComponent {
    pub display_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub features: Vec<SubComponent>,
}

impl DnaComponent {
    pub fn new(display_id: &str) -> Self {
        Self {
            display_id: display_id.to_string(),
            ..Default::default()
        }
    }

    pub fn with_feature(mut self, feature: SubComponent) -> Self {
        self.features.push(feature);
        self
    }

    pub fn from_json_str(text: &str) -> Result<Self, DesignLoadError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_json_file(path: &str) -> Result<Self, DesignLoadError> {
        let text = std::fs::read_to_string(path).map_err(|e| DesignLoadError::io(path, e))?;
        Self::from_json_str(&text)
    }

    /// Loads every component of a design file, choosing the reader by extension.
    pub fn load_all_from_path(path: &str) -> Result<Vec<Self>, DesignLoadError> {
        let extension = Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "xml" | "sbol" | "rdf" => crate::sbol_xml::parse_sbol_xml_file(path),
            "gb" | "gbk" | "genbank" => crate::genbank_import::components_from_genbank_file(path),
            "json" => Ok(vec![Self::from_json_file(path)?]),
            _ => Err(DesignLoadError::UnsupportedFormat(path.to_string())),
        }
    }

    /// Loads the design to render from a file.
    ///
    /// With `display_id`, the component with that display id is returned.
    /// Otherwise the first component that has features is used, falling back
    /// to the first component, so leaf parts listed ahead of the composite
    /// design are passed over.
    pub fn load_from_path(path: &str, display_id: Option<&str>) -> Result<Self, DesignLoadError> {
        let components = Self::load_all_from_path(path)?;
        let component = Self::select(components, display_id).map_err(|e| match e {
            DesignLoadError::ComponentNotFound { display_id, .. } => {
                DesignLoadError::ComponentNotFound {
                    display_id,
                    path: path.to_string(),
                }
            }
            other => other,
        })?;
        log::info!(
            "Loaded design '{}' with {} features from '{path}'",
            component.display_id,
            component.features.len()
        );
        Ok(component)
    }

    pub fn select(
        components: Vec<Self>,
        display_id: Option<&str>,
    ) -> Result<Self, DesignLoadError> {
        match display_id {
            Some(wanted) => components
                .into_iter()
                .find(|c| c.display_id == wanted)
                .ok_or_else(|| DesignLoadError::ComponentNotFound {
                    display_id: wanted.to_string(),
                    path: String::new(),
                }),
            None => {
                let index = components
                    .iter()
                    .position(|c| !c.features.is_empty())
                    .unwrap_or(0);
                components.into_iter().nth(index).ok_or_else(|| {
                    DesignLoadError::Structure("design file contains no component".to_string())
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_falls_back_to_display_id() {
        let unnamed = SubComponent::new("pTet");
        assert_eq!(unnamed.display_name(), "pTet");
        let empty = SubComponent::new("pTet").with_name("");
        assert_eq!(empty.display_name(), "pTet");
        let named = SubComponent::new("pTet").with_name("TetR promoter");
        assert_eq!(named.display_name(), "TetR promoter");
    }

    #[test]
    fn test_from_json_str_defaults_missing_collections() {
        let component = DnaComponent::from_json_str(
            r#"{"display_id":"design","features":[{"display_id":"p1"}]}"#,
        )
        .expect("parse design JSON");
        assert_eq!(component.features.len(), 1);
        assert!(component.features[0].roles.is_empty());
        assert!(component.features[0].locations.is_empty());
        assert_eq!(component.features[0].name, None);
    }

    #[test]
    fn test_load_from_path_json() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("design.json");
        let component = DnaComponent::new("design").with_feature(
            SubComponent::new("cds")
                .with_role("SO:0000316")
                .with_location(10, 400),
        );
        std::fs::write(&path, serde_json::to_string(&component).expect("serialize"))
            .expect("write design");
        let loaded =
            DnaComponent::load_from_path(&path.to_string_lossy(), None).expect("load design JSON");
        assert_eq!(loaded, component);
    }

    #[test]
    fn test_load_from_path_rejects_unknown_extension() {
        let err = DnaComponent::load_from_path("design.fasta", None).expect_err("unsupported");
        assert!(matches!(err, DesignLoadError::UnsupportedFormat(_)));
        let message = err.to_string();
        assert!(message.contains(".rdf") && message.contains(".genbank"), "got: {message}");
    }

    const LEAF_FIRST_XML: &str = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:sbol="http://sbols.org/v3#">
  <sbol:Component rdf:about="https://example.org/E0040">
    <sbol:displayId>E0040</sbol:displayId>
  </sbol:Component>
  <sbol:Component rdf:about="https://example.org/i13504">
    <sbol:displayId>i13504</sbol:displayId>
    <sbol:hasFeature>
      <sbol:SubComponent rdf:about="https://example.org/i13504/SubComponent1">
        <sbol:displayId>SubComponent1</sbol:displayId>
        <sbol:role rdf:resource="https://identifiers.org/SO:0000316"/>
      </sbol:SubComponent>
    </sbol:hasFeature>
  </sbol:Component>
</rdf:RDF>"#;

    fn write_leaf_first_design(dir: &tempfile::TempDir) -> String {
        let path = dir.path().join("leaf_first.xml");
        std::fs::write(&path, LEAF_FIRST_XML).expect("write design");
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_load_from_path_skips_leaf_components_listed_first() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_leaf_first_design(&dir);
        let component = DnaComponent::load_from_path(&path, None).expect("load design");
        assert_eq!(component.display_id, "i13504");
        assert_eq!(component.features.len(), 1);
    }

    #[test]
    fn test_load_from_path_selects_component_by_display_id() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_leaf_first_design(&dir);
        let leaf = DnaComponent::load_from_path(&path, Some("E0040")).expect("load leaf");
        assert_eq!(leaf.display_id, "E0040");
        let err = DnaComponent::load_from_path(&path, Some("B0015")).expect_err("absent");
        assert!(
            matches!(err, DesignLoadError::ComponentNotFound { ref display_id, ref path }
                if display_id == "B0015" && path.ends_with("leaf_first.xml")),
            "got: {err}"
        );
    }

    #[test]
    fn test_select_without_features_falls_back_to_first() {
        let components = vec![DnaComponent::new("a"), DnaComponent::new("b")];
        let component = DnaComponent::select(components, None).expect("select");
        assert_eq!(component.display_id, "a");
    }
}
