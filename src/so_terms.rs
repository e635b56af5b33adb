//! Sequence Ontology terms with a built-in SBOL Visual part renderer.

use serde::Serialize;
use std::collections::HashMap;

/// Built-in part types referenced by Sequence Ontology term, in table order.
///
/// Spacer, EmptySpace and Insulator have no SO term with matching semantics
/// and are therefore not listed.
pub const SO_TERM_TABLE: &[(&str, &str)] = &[
    ("SO:0000167", "Promoter"),
    ("SO:0000316", "CDS"),
    ("SO:0000141", "Terminator"),
    ("SO:0000552", "RBS"),
    ("SO:0001953", "Scar"),
    ("SO:000037", "Ribozyme"),
    ("SO:0001977", "Ribonuclease"),
    ("SO:0001955", "ProteinStability"),
    ("SO:0001956", "Protease"),
    ("SO:0000057", "Operator"),
    ("SO:0000296", "Origin"),
    ("SO:0001932", "5Overhang"),
    ("SO:0001933", "3Overhang"),
    ("SO:0001687", "RestrictionSite"),
    ("SO:0000299", "RecombinaseSite"),
    ("SO:0001691", "BluntRestrictionSite"),
    ("SO:0005850", "PrimerBindingSite"),
    ("SO:0001694", "5StickyRestrictionSite"),
    ("SO:0001690", "3StickyRestrictionSite"),
    ("SO:0000001", "UserDefined"),
    ("SO:0001978", "Signature"),
];

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct SoTermSummary {
    pub so_term: String,
    pub part_type: String,
}

pub struct SoTerms {
    by_term: HashMap<&'static str, &'static str>,
}

impl SoTerms {
    pub fn lookup(&self, term_id: &str) -> Option<&'static str> {
        self.by_term.get(term_id).copied()
    }

    pub fn len(&self) -> usize {
        self.by_term.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_term.is_empty()
    }

    pub fn summaries(&self) -> Vec<SoTermSummary> {
        SO_TERM_TABLE
            .iter()
            .map(|(so_term, part_type)| SoTermSummary {
                so_term: so_term.to_string(),
                part_type: part_type.to_string(),
            })
            .collect()
    }

    /// Distinct part type names, in table order.
    pub fn part_types(&self) -> impl Iterator<Item = &'static str> {
        SO_TERM_TABLE.iter().map(|(_, part_type)| *part_type)
    }
}

impl Default for SoTerms {
    fn default() -> Self {
        Self {
            by_term: SO_TERM_TABLE.iter().copied().collect(),
        }
    }
}

/// Extracts the ontology code from a role identifier, i.e. everything after
/// the final `/`. A role without any `/` is returned unchanged.
pub fn so_term_from_role(role: &str) -> &str {
    role.rsplit('/').next().unwrap_or(role)
}

pub fn lookup(term_id: &str) -> Option<&'static str> {
    crate::SO_TERMS.lookup(term_id)
}
