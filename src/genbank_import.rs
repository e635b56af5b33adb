//! Builds SBOL components from GenBank records.
//!
//! Feature keys are mapped to Sequence Ontology roles; keys without a
//! mapping become generic `sequence_feature` roles and are therefore not
//! drawn. GenBank's 0-based half-open ranges become SBOL's 1-based
//! inclusive locations.

use crate::{
    error::DesignLoadError,
    sbol_component::{DnaComponent, Location, SubComponent},
};
use gb_io::seq::{Feature, Location as GbLocation, Seq};

pub const SO_ROLE_PREFIX: &str = "https://identifiers.org/";
const SEQUENCE_FEATURE_TERM: &str = "SO:0000110";

const NAME_QUALIFIERS: &[&str] = &[
    "label",
    "name",
    "standard_name",
    "gene",
    "protein_id",
    "product",
    "bound_moiety",
];

pub fn components_from_genbank_file(path: &str) -> Result<Vec<DnaComponent>, DesignLoadError> {
    let records = gb_io::reader::parse_file(path)
        .map_err(|e| DesignLoadError::GenBank(format!("'{path}': {e}")))?;
    Ok(records.iter().map(component_from_genbank_seq).collect())
}

pub fn components_from_genbank_text(text: &str) -> Result<Vec<DnaComponent>, DesignLoadError> {
    gb_io::reader::SeqReader::new(text.as_bytes())
        .map(|record| {
            record
                .map(|seq| component_from_genbank_seq(&seq))
                .map_err(|e| DesignLoadError::GenBank(e.to_string()))
        })
        .collect()
}

pub fn component_from_genbank_seq(seq: &Seq) -> DnaComponent {
    let display_id = seq
        .name
        .clone()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| "genbank_record".to_string());
    let mut component = DnaComponent::new(&display_id);
    component.name = seq.definition.clone();
    for (index, feature) in seq.features.iter().enumerate() {
        if feature.kind.to_string().eq_ignore_ascii_case("source") {
            continue;
        }
        component
            .features
            .push(subcomponent_from_feature(feature, index));
    }
    component
}

fn subcomponent_from_feature(feature: &Feature, index: usize) -> SubComponent {
    let kind = feature.kind.to_string();
    let mut subcomponent = SubComponent::new(&format!("{kind}_{}", index + 1));
    subcomponent.name = feature_name(feature);
    let so_term = so_term_for_feature(feature).unwrap_or(SEQUENCE_FEATURE_TERM);
    subcomponent.roles.push(format!("{SO_ROLE_PREFIX}{so_term}"));
    if let Some((from, to)) = first_range(&feature.location) {
        subcomponent.locations.push(Location::new(from + 1, to));
    }
    if location_is_reverse(&feature.location, false) {
        log::debug!(
            "Feature '{}' lies on the reverse strand; it will be drawn forward",
            subcomponent.display_id
        );
    }
    subcomponent
}

fn feature_name(feature: &Feature) -> Option<String> {
    NAME_QUALIFIERS.iter().find_map(|key| {
        feature
            .qualifier_values((*key).into())
            .map(str::trim)
            .find(|value| !value.is_empty())
            .map(ToOwned::to_owned)
    })
}

/// SO term for a GenBank feature key, honouring `/regulatory_class` on `regulatory` features.
pub fn so_term_for_feature(feature: &Feature) -> Option<&'static str> {
    let kind = feature.kind.to_string().to_ascii_lowercase();
    if kind == "regulatory" {
        return feature
            .qualifier_values("regulatory_class".into())
            .find_map(|class| match class.trim().to_ascii_lowercase().as_str() {
                "promoter" => Some("SO:0000167"),
                "terminator" => Some("SO:0000141"),
                "ribosome_binding_site" => Some("SO:0000552"),
                _ => None,
            });
    }
    match kind.as_str() {
        "promoter" => Some("SO:0000167"),
        "cds" => Some("SO:0000316"),
        "terminator" => Some("SO:0000141"),
        "rbs" => Some("SO:0000552"),
        "rep_origin" => Some("SO:0000296"),
        "primer_bind" => Some("SO:0005850"),
        "protein_bind" => Some("SO:0000057"),
        "misc_recomb" => Some("SO:0000299"),
        "misc_feature" => Some("SO:0000001"),
        _ => None,
    }
}

/// First concrete span of a location, in the order the location lists them.
fn first_range(location: &GbLocation) -> Option<(i64, i64)> {
    match location {
        GbLocation::Range((from, _), (to, _)) | GbLocation::Between(from, to) => {
            if *from < 0 || *to < 0 {
                return None;
            }
            Some((*from.min(to), *from.max(to)))
        }
        GbLocation::Complement(inner) => first_range(inner),
        GbLocation::Join(parts)
        | GbLocation::Order(parts)
        | GbLocation::Bond(parts)
        | GbLocation::OneOf(parts) => parts.iter().find_map(first_range),
        GbLocation::External(_, inner) => inner.as_deref().and_then(first_range),
        GbLocation::Gap(_) => None,
    }
}

fn location_is_reverse(location: &GbLocation, reverse: bool) -> bool {
    match location {
        GbLocation::Complement(inner) => location_is_reverse(inner, !reverse),
        GbLocation::Join(parts)
        | GbLocation::Order(parts)
        | GbLocation::Bond(parts)
        | GbLocation::OneOf(parts) => parts
            .first()
            .is_some_and(|part| location_is_reverse(part, reverse)),
        GbLocation::External(_, Some(inner)) => location_is_reverse(inner, reverse),
        _ => reverse,
    }
}
