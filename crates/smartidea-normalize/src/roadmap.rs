//! Roadmap normalization.

use serde_json::Value;
use tracing::{debug, warn};

use smartidea_core::{CanonicalRoadmap, Milestone, Normalized, ParseFailure, Phase};

use crate::clean::strip_fences;
use crate::fields::{self, Object};
use crate::first_parsed_block;

const WRAPPERS: &[&str] = &[
    "Project Roadmap",
    "project_roadmap",
    "projectRoadmap",
    "Roadmap",
    "roadmap",
];

const PHASES: &[&str] = &["Phases", "phases"];
const MILESTONES: &[&str] = &["Milestones", "Key Milestones", "milestones", "key_milestones"];

const PHASE_TITLE: &[&str] = &["Title", "title", "Phase", "Phase Name", "phase_name", "name"];
const PHASE_DURATION: &[&str] = &["Duration", "duration", "Duration/Timeline", "Timeline"];
const PHASE_OBJECTIVES: &[&str] = &["Key Objectives", "objectives", "key_objectives", "Objectives"];
const PHASE_DELIVERABLES: &[&str] = &["Deliverables/Milestones", "deliverables", "Deliverables"];
const PHASE_RESOURCES: &[&str] = &["Required Resources", "resources", "required_resources"];
const PHASE_METRICS: &[&str] = &["Success Metrics", "success_metrics", "successMetrics"];
const PHASE_RISKS: &[&str] = &["Potential Risks", "risks", "Risks"];

const MILESTONE_NAME: &[&str] = &["Milestone", "milestone", "name", "Name", "Title", "title"];
const MILESTONE_DATE: &[&str] = &["Target Date", "target_date", "targetDate", "date", "Date"];
const MILESTONE_DESCRIPTION: &[&str] = &["Description", "description"];

/// Normalize a completion into a roadmap.
pub fn normalize_roadmap(raw: &str) -> Normalized<CanonicalRoadmap> {
    let cleaned = strip_fences(raw);

    let Some(parsed) = first_parsed_block(&cleaned, |_| true) else {
        warn!(response_len = raw.len(), "Could not parse any roadmap block");
        return Normalized::Failed(ParseFailure::new(raw));
    };

    let roadmap = match &parsed {
        Value::Object(obj) => roadmap_from_object(unwrap_roadmap(obj)),
        Value::Array(items) => CanonicalRoadmap {
            phases: phases_from(items),
            ..Default::default()
        },
        _ => return Normalized::Failed(ParseFailure::new(raw)),
    };

    debug!(
        phases = roadmap.phases.len(),
        milestones = roadmap.milestones.len(),
        "Normalized roadmap"
    );
    Normalized::Document(roadmap)
}

fn unwrap_roadmap(obj: &Object) -> &Object {
    if let Some(inner) = fields::unwrap_named(obj, WRAPPERS) {
        return inner;
    }
    if fields::lookup(obj, PHASES).is_none() && fields::lookup(obj, MILESTONES).is_none() {
        if let Some(inner) = fields::unwrap_single(obj) {
            return inner;
        }
    }
    obj
}

fn roadmap_from_object(obj: &Object) -> CanonicalRoadmap {
    let phases = fields::lookup(obj, PHASES).and_then(|value| match value {
        Value::Array(items) => Some(phases_from(items)),
        Value::Object(map) => Some(
            map.iter()
                .filter_map(|(label, v)| labelled_phase(label, v))
                .collect(),
        ),
        _ => None,
    });
    let milestones = fields::lookup(obj, MILESTONES).and_then(|value| match value {
        Value::Array(items) => Some(items.iter().filter_map(milestone_from).collect()),
        Value::Object(map) => Some(
            map.iter()
                .filter_map(|(label, v)| labelled_milestone(label, v))
                .collect(),
        ),
        _ => None,
    });

    // Unconvertible values stay in `sections` under their original key.
    let mut consumed: Vec<&[&str]> = Vec::with_capacity(2);
    if phases.is_some() {
        consumed.push(PHASES);
    }
    if milestones.is_some() {
        consumed.push(MILESTONES);
    }

    CanonicalRoadmap {
        phases: phases.unwrap_or_default(),
        milestones: milestones.unwrap_or_default(),
        sections: fields::remaining(obj, &consumed),
    }
}

fn phases_from(items: &[Value]) -> Vec<Phase> {
    items.iter().filter_map(phase_from).collect()
}

/// Phase keyed by its label, as in `{"Phase 1: Planning": {...}}`.
///
/// The label is the title unless the entry names one itself. A plain
/// string entry becomes the phase's only objective.
fn labelled_phase(label: &str, value: &Value) -> Option<Phase> {
    match value {
        Value::Object(obj) => phase_from(value).map(|mut phase| {
            if fields::lookup(obj, PHASE_TITLE).is_none() {
                phase.title = label.trim().to_string();
            }
            phase
        }),
        other => Some(Phase {
            title: label.trim().to_string(),
            duration: "TBD".to_string(),
            objectives: fields::to_list(other),
            ..Default::default()
        }),
    }
}

/// Milestone keyed by its name, as in `{"MVP": {"Target Date": "Month 3"}}`.
/// A plain string entry becomes the description.
fn labelled_milestone(label: &str, value: &Value) -> Option<Milestone> {
    match value {
        Value::Object(obj) => milestone_from(value).map(|mut milestone| {
            if fields::lookup(obj, MILESTONE_NAME).is_none() {
                milestone.name = label.trim().to_string();
            }
            milestone
        }),
        other => Some(Milestone {
            name: label.trim().to_string(),
            description: fields::display_text(other),
            ..Default::default()
        }),
    }
}

fn phase_from(value: &Value) -> Option<Phase> {
    match value {
        Value::Object(obj) => Some(Phase {
            title: fields::text(obj, PHASE_TITLE, "Phase"),
            duration: fields::text(obj, PHASE_DURATION, "TBD"),
            objectives: fields::list(obj, PHASE_OBJECTIVES),
            deliverables: fields::list(obj, PHASE_DELIVERABLES),
            resources: fields::list(obj, PHASE_RESOURCES),
            success_metrics: fields::list(obj, PHASE_METRICS),
            risks: fields::list(obj, PHASE_RISKS),
        }),
        Value::String(s) if !s.trim().is_empty() => Some(Phase {
            title: s.trim().to_string(),
            duration: "TBD".to_string(),
            ..Default::default()
        }),
        _ => None,
    }
}

fn milestone_from(value: &Value) -> Option<Milestone> {
    match value {
        Value::Object(obj) => Some(Milestone {
            name: fields::text(obj, MILESTONE_NAME, "Milestone"),
            target_date: fields::text(obj, MILESTONE_DATE, ""),
            description: fields::text(obj, MILESTONE_DESCRIPTION, ""),
        }),
        Value::String(s) if !s.trim().is_empty() => Some(Milestone {
            name: s.trim().to_string(),
            ..Default::default()
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn roadmap(raw: &str) -> CanonicalRoadmap {
        normalize_roadmap(raw)
            .into_document()
            .expect("expected a roadmap")
    }

    #[test]
    fn test_phase_casing_variants_are_identical() {
        let upper = roadmap(r#"{"Phases": [{"Title": "A", "Duration": "2w"}]}"#);
        let lower = roadmap(r#"{"phases": [{"title": "A", "duration": "2w"}]}"#);
        assert_eq!(upper.phases, lower.phases);
        assert_eq!(
            upper.phases[0],
            Phase {
                title: "A".to_string(),
                duration: "2w".to_string(),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_phase_defaults() {
        let r = roadmap(r#"{"Phases": [{}]}"#);
        assert_eq!(r.phases[0].title, "Phase");
        assert_eq!(r.phases[0].duration, "TBD");
        assert!(r.phases[0].objectives.is_empty());
    }

    #[test]
    fn test_project_roadmap_wrapper_is_unwrapped() {
        let raw = r#"Here is the plan:
        {"Project Roadmap": {
            "Phases": [{"Phase": "Planning", "Duration/Timeline": "1 month",
                        "Key Objectives": ["Scope"], "Potential Risks": "Delays"}],
            "Key Milestones": [{"Milestone": "MVP", "Target Date": "Month 3"}],
            "Risk Management": ["Buffer time"]
        }}"#;
        let r = roadmap(raw);
        assert_eq!(r.phases[0].title, "Planning");
        assert_eq!(r.phases[0].duration, "1 month");
        assert_eq!(r.phases[0].objectives, vec!["Scope"]);
        assert_eq!(r.phases[0].risks, vec!["Delays"]);
        assert_eq!(r.milestones[0].name, "MVP");
        assert_eq!(r.milestones[0].target_date, "Month 3");
        assert_eq!(r.sections.get("Risk Management"), Some(&json!(["Buffer time"])));
    }

    #[test]
    fn test_single_key_container_is_unwrapped() {
        let raw = r#"{"Acme Roadmap": {"phases": [{"title": "Build"}]}}"#;
        assert_eq!(roadmap(raw).phases[0].title, "Build");
    }

    #[test]
    fn test_milestones_preferred_over_key_milestones() {
        let raw = r#"{"Milestones": [{"name": "first"}], "Key Milestones": [{"name": "second"}]}"#;
        let r = roadmap(raw);
        assert_eq!(r.milestones.len(), 1);
        assert_eq!(r.milestones[0].name, "first");
        assert!(!r.sections.contains_key("Key Milestones"));
    }

    #[test]
    fn test_string_milestones() {
        let r = roadmap(r#"{"milestones": ["Week 1: Kickoff"]}"#);
        assert_eq!(r.milestones[0].name, "Week 1: Kickoff");
        assert_eq!(r.milestones[0].target_date, "");
    }

    #[test]
    fn test_comments_do_not_break_parse() {
        let raw = "{\n \"Phases\": [ /* four phases */ {\"Title\": \"A\"} ] // end\n}";
        assert_eq!(roadmap(raw).phases[0].title, "A");
    }

    #[test]
    fn test_first_parseable_block_wins() {
        let raw = r#"{"Phases": [{"Title": "one"}]} {"Phases": [{"Title": "two"}]}"#;
        let r = roadmap(raw);
        assert_eq!(r.phases.len(), 1);
        assert_eq!(r.phases[0].title, "one");
    }

    #[test]
    fn test_truncated_roadmap_is_parse_failure() {
        let raw = r#"{"Phases": [{"Title": "A"}, {"Title": "B""#;
        match normalize_roadmap(raw) {
            Normalized::Failed(f) => assert_eq!(f.raw_content, raw),
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_phases_keyed_by_label() {
        let raw = r#"{
            "Phases": {
                "Phase 1: Planning": {"Duration": "2w", "Key Objectives": ["Scope"]},
                "Phase 2: Build": {"Title": "MVP Build", "Duration": "8w"},
                "Phase 3: Launch": "Release to early users"
            },
            "Milestones": {
                "MVP": {"Target Date": "Week 10"},
                "Launch": "Public release"
            }
        }"#;
        let r = roadmap(raw);

        let titles: Vec<_> = r.phases.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Phase 1: Planning", "MVP Build", "Phase 3: Launch"]);
        assert_eq!(r.phases[0].duration, "2w");
        assert_eq!(r.phases[0].objectives, vec!["Scope"]);
        assert_eq!(r.phases[2].objectives, vec!["Release to early users"]);

        assert_eq!(r.milestones.len(), 2);
        assert_eq!(r.milestones[0].name, "MVP");
        assert_eq!(r.milestones[0].target_date, "Week 10");
        assert_eq!(r.milestones[1].description, "Public release");
        assert!(r.sections.is_empty());
    }

    #[test]
    fn test_unconvertible_phases_kept_as_section() {
        let r = roadmap(r#"{"Phases": "To be decided", "Milestones": []}"#);
        assert!(r.phases.is_empty());
        assert_eq!(r.sections.get("Phases"), Some(&json!("To be decided")));
    }

    #[test]
    fn test_renormalizing_canonical_output_is_stable() {
        let raw = r#"{"Project Roadmap": {
            "Phases": [{"Title": "A", "Duration": "2w", "Success Metrics": ["users"]}],
            "Milestones": [{"Milestone": "M", "Target Date": "Q1", "Description": "d"}],
            "Dependencies": ["API access"]
        }}"#;
        let first = roadmap(raw);
        let serialized = serde_json::to_string(&first).unwrap();
        assert_eq!(roadmap(&serialized), first);
    }
}
