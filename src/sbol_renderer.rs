//! Renders SBOL DNA components by translating their subcomponents into part
//! descriptors and handing those to a `DnaRenderer`.

use crate::{
    SO_TERMS,
    error::SbolRenderError,
    glyphs::PartRenderers,
    part::{PartDescriptor, PartOptions},
    render_dna::{DnaRenderer, LinearRenderer},
    sbol_component::{DnaComponent, SubComponent},
    so_terms::{SoTerms, so_term_from_role},
    surface::Surface,
};

/// Outcome of translating one subcomponent.
#[derive(Clone, Debug, PartialEq)]
enum Translation {
    Part(PartDescriptor),
    /// The first role has no built-in part type; the subcomponent is not drawn.
    Skip { so_term: String },
}

#[derive(Clone, Debug, Default)]
pub struct SbolRenderer<R: DnaRenderer = LinearRenderer> {
    renderer: R,
}

impl<R: DnaRenderer> SbolRenderer<R> {
    pub fn new(renderer: R) -> Self {
        Self { renderer }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// The built-in part renderers referenced by Sequence Ontology term.
    pub fn so_terms(&self) -> &'static SoTerms {
        &SO_TERMS
    }

    /// Translates `component` into part descriptors, sorted by start position.
    ///
    /// Subcomponents whose first role is not in the SO term table are left out.
    pub fn translate(
        &self,
        component: &DnaComponent,
        opts: Option<&PartOptions>,
    ) -> Result<Vec<PartDescriptor>, SbolRenderError> {
        if component.features.is_empty() {
            return Err(SbolRenderError::MissingFeatures {
                component: component.display_id.clone(),
            });
        }
        let mut parts = Vec::with_capacity(component.features.len());
        for subcomponent in &component.features {
            match self.translate_subcomponent(subcomponent, opts)? {
                Translation::Part(part) => parts.push(part),
                Translation::Skip { so_term } => {
                    log::debug!(
                        "Skipping subcomponent '{}' of '{}': no part renderer for role '{so_term}'",
                        subcomponent.display_id,
                        component.display_id
                    );
                }
            }
        }
        // Stable, so parts without coordinates keep their relative order.
        parts.sort_by_key(PartDescriptor::sort_key);
        Ok(parts)
    }

    fn translate_subcomponent(
        &self,
        subcomponent: &SubComponent,
        opts: Option<&PartOptions>,
    ) -> Result<Translation, SbolRenderError> {
        let role = subcomponent
            .roles
            .first()
            .ok_or_else(|| SbolRenderError::MissingRole {
                subcomponent: subcomponent.display_id.clone(),
            })?;
        let so_term = so_term_from_role(role);
        let Some(part_type) = self.so_terms().lookup(so_term) else {
            return Ok(Translation::Skip {
                so_term: so_term.to_string(),
            });
        };
        let mut part = PartDescriptor::new(part_type, subcomponent.display_name());
        if let Some(location) = subcomponent.first_location() {
            part.start = Some(location.start);
            part.end = Some(location.end);
        }
        part.opts = opts.filter(|o| !o.is_empty()).cloned();
        Ok(Translation::Part(part))
    }

    /// Renders a design from an SBOL DNA component.
    ///
    /// Returns the x positions in axis space where drawing begins and ends.
    /// Nothing is drawn if the component cannot be translated.
    pub fn render_sbol(
        &self,
        surface: &mut dyn Surface,
        component: &DnaComponent,
        part_renderers: &PartRenderers,
        opts: Option<&PartOptions>,
        plot_backbone: bool,
    ) -> Result<(f64, f64), SbolRenderError> {
        let parts = self.translate(component, opts)?;
        let (start, end) =
            self.renderer
                .render_dna(surface, &parts, part_renderers, plot_backbone)?;
        log::info!(
            "Rendered '{}': {} of {} subcomponents drawn, x {start}..{end}",
            component.display_id,
            parts.len(),
            component.features.len()
        );
        Ok((start, end))
    }
}
