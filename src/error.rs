use thiserror::Error;

/// Failures of the glyph renderers and the linear layout routine.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("No part renderer registered for part type '{part_type}' (part '{part_name}')")]
    UnknownPartType {
        part_type: String,
        part_name: String,
    },
    #[error("Invalid value for option '{key}' on part '{part_name}': {reason}")]
    InvalidOption {
        key: String,
        part_name: String,
        reason: String,
    },
}

/// Failures of `SbolRenderer::render_sbol` and `SbolRenderer::translate`.
#[derive(Debug, Error)]
pub enum SbolRenderError {
    #[error("DNA component '{component}' does not have any features. Cannot render SBOL.")]
    MissingFeatures { component: String },
    #[error("Subcomponent '{subcomponent}' does not have a role. Cannot render SBOL.")]
    MissingRole { subcomponent: String },
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Failures while reading a design from SBOL XML, GenBank or JSON.
#[derive(Debug, Error)]
pub enum DesignLoadError {
    #[error("Could not read design file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed SBOL XML: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("Malformed SBOL XML attribute: {0}")]
    XmlAttribute(#[from] quick_xml::events::attributes::AttrError),
    #[error("Malformed design JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Could not parse GenBank file: {0}")]
    GenBank(String),
    #[error("No component with display id '{display_id}' in '{path}'")]
    ComponentNotFound { display_id: String, path: String },
    #[error("Invalid SBOL document: {0}")]
    Structure(String),
    #[error("Unsupported design file extension for '{0}'; expected .xml, .sbol, .rdf, .gb, .gbk, .genbank or .json")]
    UnsupportedFormat(String),
}

impl DesignLoadError {
    pub(crate) fn io(path: &str, source: std::io::Error) -> Self {
        DesignLoadError::Io {
            path: path.to_string(),
            source,
        }
    }
}
