//! Idea-list normalization, including truncation repair.

use serde_json::Value;
use tracing::{debug, warn};

use smartidea_core::{CanonicalIdea, Normalized, ParseFailure};

use crate::clean::{strip_comments, strip_fences};
use crate::extract::truncated_array_start;
use crate::fields::{self, Object};
use crate::first_parsed_block;

const TITLE: &[&str] = &["Title", "title", "Idea Title", "name"];
const DESCRIPTION: &[&str] = &["Description", "description"];
const TARGET_MARKET: &[&str] = &["Target Market", "targetMarket", "target_market"];
const UNIQUE_VALUE: &[&str] = &[
    "Unique Value Proposition",
    "uniqueValueProposition",
    "unique_value_proposition",
    "uniqueValue",
];
const CHALLENGES: &[&str] = &[
    "Potential Challenges",
    "potentialChallenges",
    "potential_challenges",
    "challenges",
];
const MARKET_SIZE: &[&str] = &[
    "Estimated Market Size",
    "estimatedMarketSize",
    "estimated_market_size",
    "marketSize",
];
const SCORE: &[&str] = &[
    "Innovation Score",
    "innovationScore",
    "innovation_score",
    "score",
];

/// Keys under which a model sometimes nests the list.
const LIST_WRAPPERS: &[&str] = &[
    "ideas",
    "Ideas",
    "Business Ideas",
    "business_ideas",
    "businessIdeas",
];

/// Normalize a completion into a list of ideas.
pub fn normalize_ideas(raw: &str) -> Normalized<Vec<CanonicalIdea>> {
    let cleaned = strip_fences(raw);

    // An idea array wins over any object block that precedes it.
    let ideas = [is_array_block, is_object_block]
        .into_iter()
        .find_map(|accept| {
            first_parsed_block(&cleaned, accept)
                .as_ref()
                .and_then(ideas_from_value)
        })
        .or_else(|| repair_truncated(&cleaned).as_ref().and_then(ideas_from_value));

    match ideas {
        Some(ideas) => {
            debug!(count = ideas.len(), "Normalized idea list");
            Normalized::Document(ideas)
        }
        None => {
            warn!(response_len = raw.len(), "Could not recover an idea list");
            Normalized::Failed(ParseFailure::new(raw))
        }
    }
}

fn is_array_block(block: &str) -> bool {
    block.starts_with('[')
}

fn is_object_block(block: &str) -> bool {
    block.starts_with('{')
}

/// Close an idea array cut off mid-element.
///
/// Keeps every element that closed before the cut, appends `]`, and parses
/// once.
fn repair_truncated(cleaned: &str) -> Option<Value> {
    let start = truncated_array_start(cleaned)?;
    let tail = &cleaned[start..];
    let cut = last_complete_element_end(tail)?;

    let repaired = format!("{}\n]", &tail[..cut]);
    match serde_json::from_str::<Value>(&strip_comments(&repaired)) {
        Ok(value) => {
            warn!("Repaired truncated idea array");
            Some(value)
        }
        Err(e) => {
            debug!(error = %e, "Truncation repair did not parse");
            None
        }
    }
}

/// End offset (exclusive) of the last `}` that closed a direct element of
/// the array opening at `tail[0]`.
fn last_complete_element_end(tail: &str) -> Option<usize> {
    let mut square = 0i32;
    let mut curly = 0i32;
    let mut in_string = false;
    let mut escaped = false;
    let mut last = None;

    for (i, b) in tail.bytes().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        if in_string {
            match b {
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'[' => square += 1,
            b']' => square -= 1,
            b'{' => curly += 1,
            b'}' => {
                curly -= 1;
                if square == 1 && curly == 0 {
                    last = Some(i + 1);
                }
            }
            _ => {}
        }
    }

    last
}

fn ideas_from_value(value: &Value) -> Option<Vec<CanonicalIdea>> {
    match value {
        Value::Array(items) => Some(
            items
                .iter()
                .enumerate()
                .filter_map(|(i, item)| idea_from_item(i, item))
                .collect(),
        ),
        Value::Object(obj) => {
            if let Some(list) = LIST_WRAPPERS
                .iter()
                .filter_map(|w| obj.get(*w))
                .find(|v| v.is_array())
            {
                return ideas_from_value(list);
            }
            fields::lookup(obj, TITLE).map(|_| vec![idea_from_object(0, obj)])
        }
        _ => None,
    }
}

fn idea_from_item(index: usize, item: &Value) -> Option<CanonicalIdea> {
    match item {
        Value::Object(obj) => Some(idea_from_object(index, obj)),
        Value::String(s) if !s.trim().is_empty() => Some(CanonicalIdea {
            title: s.trim().to_string(),
            ..Default::default()
        }),
        _ => None,
    }
}

fn idea_from_object(index: usize, obj: &Object) -> CanonicalIdea {
    CanonicalIdea {
        title: fields::text(obj, TITLE, &format!("Idea {}", index + 1)),
        description: fields::text(obj, DESCRIPTION, ""),
        target_market: fields::text(obj, TARGET_MARKET, ""),
        unique_value_proposition: fields::text(obj, UNIQUE_VALUE, ""),
        potential_challenges: fields::text(obj, CHALLENGES, ""),
        estimated_market_size: fields::text(obj, MARKET_SIZE, ""),
        innovation_score: fields::number(obj, SCORE),
    }
}
