//! Recommendations derived from theme clusters.

use bridge_model::ThemeCluster;

/// Themes considered, taken from the front of the frequency-sorted list.
pub const MAX_RECOMMENDED_THEMES: usize = 3;
/// Share of texts above which a theme calls for structured assessment.
pub const HIGH_FREQUENCY_PERCENT: f64 = 20.0;
/// Share of texts above which a theme calls for preventive measures.
pub const MODERATE_FREQUENCY_PERCENT: f64 = 10.0;

/// One Swedish recommendation per sufficiently frequent theme among the top three.
///
/// `themes` must already be sorted by descending frequency, as
/// [`crate::TextAnalyzer::analyze_batch`] returns them.
pub fn generate_recommendations(themes: &[ThemeCluster]) -> Vec<String> {
    themes
        .iter()
        .take(MAX_RECOMMENDED_THEMES)
        .filter_map(|theme| {
            if theme.percentage > HIGH_FREQUENCY_PERCENT {
                Some(format!(
                    "Hög frekvens ({:.1}%) rapporterar: {}. Föreslår strukturerad kartläggning och insatser.",
                    theme.percentage, theme.name
                ))
            } else if theme.percentage > MODERATE_FREQUENCY_PERCENT {
                Some(format!(
                    "Betydande andel ({:.1}%) nämner: {}. Överväg förebyggande åtgärder.",
                    theme.percentage, theme.name
                ))
            } else {
                None
            }
        })
        .collect()
}
