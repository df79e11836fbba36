//! KSI intervention suggestions for ICF codes.

use bridge_model::{
    IcfComponent, InterventionContext, InterventionSuggestion, KsiAction, KsiTarget,
};

use crate::engine::MappingEngine;

/// Actions proposed for a code of the given component.
pub fn suggested_actions(
    component: IcfComponent,
    context: InterventionContext,
) -> &'static [KsiAction] {
    match context {
        InterventionContext::School => match component {
            // Assessment first, then teaching, compensation and advice
            IcfComponent::ActivitiesParticipation => {
                &[KsiAction::AA, KsiAction::PM, KsiAction::RA, KsiAction::PN]
            }
            IcfComponent::BodyFunctions => &[KsiAction::AA, KsiAction::PH, KsiAction::PU],
            IcfComponent::EnvironmentalFactors => &[KsiAction::SM, KsiAction::RB],
            IcfComponent::BodyStructures => &[KsiAction::AA],
        },
        InterventionContext::General => &[KsiAction::AA, KsiAction::PM, KsiAction::RA],
    }
}

/// Short Swedish rationale for proposing an action.
pub fn action_rationale(action: KsiAction) -> &'static str {
    match action {
        KsiAction::AA => "Bedömning behövs för att kartlägga omfattning",
        KsiAction::PM => "Undervisning kan träna denna förmåga",
        KsiAction::RA => "Kompensatoriskt stöd kan avhjälpa svårigheter",
        KsiAction::PN => "Råd kan hjälpa eleven att utveckla strategier",
        KsiAction::PH => "Färdighetsträning kan förbättra funktionen",
        KsiAction::SM => "Miljöanpassning kan minska barriärer",
        KsiAction::RB => "Praktiskt stöd kan underlätta vardagen",
        KsiAction::PU => "Stödjande samtal kan bearbeta svårigheter",
        _ => "Rekommenderad insats",
    }
}

impl MappingEngine {
    /// Proposes `{target}-{action}` interventions for each ICF code.
    ///
    /// Codes absent from the ICF table are skipped. Output order follows the
    /// input codes, then KSI target order, then action order.
    pub fn suggest_interventions<S: AsRef<str>>(
        &self,
        icf_codes: &[S],
        context: InterventionContext,
    ) -> Vec<InterventionSuggestion> {
        let mut suggestions = Vec::new();
        for icf_code in icf_codes {
            let Some(entry) = self.dataset().icf_entry(icf_code.as_ref().trim()) else {
                continue;
            };
            let mapping = self.icf_to_ksi(&entry.code);
            for target in &mapping.target_codes {
                let Ok(target) = target.parse::<KsiTarget>() else {
                    continue;
                };
                for &action in suggested_actions(entry.component, context) {
                    suggestions.push(InterventionSuggestion {
                        icf_code: entry.code.clone(),
                        icf_name: entry.name.clone(),
                        ksi_target: target,
                        ksi_target_name: self.dataset().ksi_target_name(target).to_string(),
                        ksi_action: action,
                        ksi_action_name: action.label().to_string(),
                        suggested_code: format!("{}-{}", target.as_str(), action.as_str()),
                        confidence: mapping.confidence,
                        rationale: action_rationale(action).to_string(),
                    });
                }
            }
        }
        suggestions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn school_actions_depend_on_component() {
        assert_eq!(
            suggested_actions(IcfComponent::EnvironmentalFactors, InterventionContext::School),
            &[KsiAction::SM, KsiAction::RB]
        );
        assert_eq!(
            suggested_actions(IcfComponent::BodyStructures, InterventionContext::School),
            &[KsiAction::AA]
        );
        assert_eq!(
            suggested_actions(IcfComponent::EnvironmentalFactors, InterventionContext::General),
            &[KsiAction::AA, KsiAction::PM, KsiAction::RA]
        );
    }

    #[test]
    fn unlisted_actions_get_generic_rationale() {
        assert_eq!(action_rationale(KsiAction::SZ), "Rekommenderad insats");
    }
}
