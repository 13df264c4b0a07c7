//! Idea-enhancement normalization.

use serde_json::Value;
use tracing::{debug, warn};

use smartidea_core::{CanonicalEnhancement, Normalized, ParseFailure};

use crate::clean::strip_fences;
use crate::fields::{self, Object};
use crate::first_parsed_block;

const STRENGTHS: &[&str] = &["Strengths", "strengths", "Strengths of the Current Idea"];
const WEAKNESSES: &[&str] = &[
    "Weaknesses",
    "Potential Weaknesses",
    "Potential Weaknesses or Gaps",
    "weaknesses",
    "gaps",
];
const SUGGESTIONS: &[&str] = &[
    "Improvement Suggestions",
    "Suggestions",
    "Specific Improvement Suggestions",
    "suggestions",
    "improvement_suggestions",
    "improvements",
];
const MARKET_OPPORTUNITY: &[&str] = &[
    "Market Opportunity",
    "Market Opportunity Analysis",
    "market_opportunity",
    "marketOpportunity",
];
const NEXT_STEPS: &[&str] = &[
    "Recommended Next Steps",
    "Next Steps",
    "next_steps",
    "recommended_next_steps",
    "nextSteps",
];

const ALL_FIELDS: &[&[&str]] = &[STRENGTHS, WEAKNESSES, SUGGESTIONS, MARKET_OPPORTUNITY, NEXT_STEPS];

/// Normalize a completion into an enhancement analysis.
///
/// Only object blocks are candidates.
pub fn normalize_enhancement(raw: &str) -> Normalized<CanonicalEnhancement> {
    let cleaned = strip_fences(raw);

    let Some(Value::Object(obj)) = first_parsed_block(&cleaned, |block| block.starts_with('{'))
    else {
        warn!(response_len = raw.len(), "Could not parse an enhancement object");
        return Normalized::Failed(ParseFailure::new(raw));
    };

    let obj = unwrap_analysis(&obj);
    let enhancement = CanonicalEnhancement {
        strengths: fields::list(obj, STRENGTHS),
        weaknesses: fields::list(obj, WEAKNESSES),
        suggestions: fields::list(obj, SUGGESTIONS),
        market_opportunity: fields::opt_text(obj, MARKET_OPPORTUNITY).unwrap_or_default(),
        next_steps: fields::list(obj, NEXT_STEPS),
        sections: fields::remaining(obj, ALL_FIELDS),
    };

    debug!(
        strengths = enhancement.strengths.len(),
        suggestions = enhancement.suggestions.len(),
        "Normalized enhancement"
    );
    Normalized::Document(enhancement)
}

/// `{"Analysis": {...}}` with none of the known fields at top level.
fn unwrap_analysis(obj: &Object) -> &Object {
    let has_known = ALL_FIELDS
        .iter()
        .any(|aliases| fields::lookup(obj, aliases).is_some());
    if has_known {
        return obj;
    }
    fields::unwrap_single(obj).unwrap_or(obj)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case_sections() {
        let raw = r#"Analysis follows.
        {
          "Strengths": ["Clear niche"],
          "Potential Weaknesses": ["Low moat"],
          "Improvement Suggestions": [{"Suggestion": "Add B2B tier"}, "Partner with gyms"],
          "Market Opportunity": {"TAM": "$4B"},
          "Recommended Next Steps": "Interview 20 users"
        }"#;
        let e = normalize_enhancement(raw).into_document().unwrap();
        assert_eq!(e.strengths, vec!["Clear niche"]);
        assert_eq!(e.weaknesses, vec!["Low moat"]);
        assert_eq!(
            e.suggestions,
            vec!["Suggestion: Add B2B tier", "Partner with gyms"]
        );
        assert_eq!(e.market_opportunity, "TAM: $4B");
        assert_eq!(e.next_steps, vec!["Interview 20 users"]);
        assert!(e.sections.is_empty());
    }

    #[test]
    fn test_array_blocks_are_not_candidates() {
        let raw = r#"["noise"] {"strengths": ["s"]}"#;
        let e = normalize_enhancement(raw).into_document().unwrap();
        assert_eq!(e.strengths, vec!["s"]);
    }

    #[test]
    fn test_single_wrapper_is_unwrapped() {
        let raw = r#"{"Idea Analysis": {"Strengths": ["a"], "Risks": ["r"]}}"#;
        let e = normalize_enhancement(raw).into_document().unwrap();
        assert_eq!(e.strengths, vec!["a"]);
        assert!(e.sections.contains_key("Risks"));
    }

    #[test]
    fn test_plain_text_is_parse_failure() {
        let raw = "The idea is strong but needs validation.";
        match normalize_enhancement(raw) {
            Normalized::Failed(f) => assert_eq!(f.raw_content, raw),
            other => panic!("expected failure, got {:?}", other),
        }
    }
}
