use lazy_static::lazy_static;
use so_terms::SoTerms;

pub mod about;
pub mod error;
pub mod genbank_import;
pub mod glyphs;
pub mod part;
pub mod render_dna;
pub mod sbol_component;
pub mod sbol_renderer;
pub mod sbol_xml;
pub mod settings;
pub mod so_terms;
pub mod surface;

lazy_static! {
    // Sequence Ontology terms with a built-in part renderer
    pub static ref SO_TERMS: SoTerms = SoTerms::default();
}
