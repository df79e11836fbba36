use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use bridge_analyze::TextAnalyzer;
use bridge_model::confidence::BOOST_CAP;
use bridge_model::{Suggestion, SuggestionSource};
use bridge_standards::ReferenceDataset;
use proptest::prelude::*;

static ANALYZER: LazyLock<TextAnalyzer> = LazyLock::new(|| {
    let dataset = ReferenceDataset::builtin().expect("load builtin dataset");
    TextAnalyzer::new(Arc::new(dataset)).expect("compile rules")
});

const WORDS: &[&str] = &[
    "jag", "är", "stressad", "svårt att koncentrera", "ljud", "mobbad", "trött",
    "känner mig ensam", "orolig", "läsa", "matte", "fritid", "och", "rädd för", "högt",
];

fn sentence() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(WORDS), 0..12).prop_map(|w| w.join(" "))
}

proptest! {
    #[test]
    fn no_duplicate_codes_and_sorted(text in sentence(), context in prop::option::of(prop::sample::select(vec!["utvecklas", "trygghet", "ma_bra"]))) {
        let suggestions = ANALYZER.analyze_text(&text, context, 0.75);
        let codes: HashSet<_> = suggestions.iter().map(|s| s.code.as_str()).collect();
        prop_assert_eq!(codes.len(), suggestions.len());
        prop_assert!(suggestions.windows(2).all(|w| w[0].confidence >= w[1].confidence));
    }

    #[test]
    fn context_boost_never_lowers_confidence(text in sentence()) {
        let plain = ANALYZER.analyze_text(&text, None, 0.75);
        let boosted = ANALYZER.analyze_text(&text, Some("trygghet"), 0.75);
        prop_assert_eq!(plain.len(), boosted.len());
        for suggestion in &boosted {
            let base = plain.iter().find(|s| s.code == suggestion.code).map(|s| s.confidence);
            prop_assert!(base.is_some_and(|b| suggestion.confidence >= b.min(BOOST_CAP)));
            prop_assert!(suggestion.confidence <= 1.0);
        }
    }

    #[test]
    fn cluster_percentage_matches_frequency(texts in prop::collection::vec(sentence(), 1..20), min_frequency in 1usize..4) {
        let batch = ANALYZER.analyze_batch(&texts, min_frequency, 0.80);
        for cluster in &batch.clusters {
            prop_assert!(cluster.frequency >= min_frequency);
            prop_assert_eq!(cluster.percentage, 100.0 * cluster.frequency as f64 / texts.len() as f64);
            prop_assert!(cluster.example_responses.len() <= 3);
        }
        prop_assert!(batch.clusters.windows(2).all(|w| w[0].frequency >= w[1].frequency));
    }

    #[test]
    fn repeated_validation_converges_to_cap(confidence in 0.0f64..=1.0, rounds in 1usize..40) {
        let mut suggestion = Suggestion {
            code: "b152".to_string(),
            name: "Känslofunktioner".to_string(),
            confidence,
            source: SuggestionSource::PatternMatch,
            matched_text: None,
            rationale: None,
        };
        for _ in 0..rounds {
            let next = ANALYZER.validate_suggestion(&suggestion, None);
            prop_assert!(next.confidence <= BOOST_CAP);
            prop_assert!(next.confidence >= suggestion.confidence.min(BOOST_CAP));
            suggestion = next;
        }
        prop_assert_eq!(suggestion.source, SuggestionSource::PatternMatchValidated);
    }
}
