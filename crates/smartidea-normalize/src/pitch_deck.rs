//! Pitch deck normalization.
//!
//! Models return slides in several layouts. Each layout is a [`SlideShape`]
//! with a detector and a converter; shapes are tried in table order and the
//! first detector that matches converts the block.
//!
//! | shape | example |
//! |-------|---------|
//! | `pitch_deck_array` | `{"pitch_deck": [{...}, ...]}` |
//! | `slides_array` | `{"Slides": [{"Slide 1: Cover": {...}}, {...}]}` |
//! | `array_of_labelled_object` | `[{"Slide 1: Cover": {...}, "Slide 2: Problem": {...}}]` |
//! | `plain_array` | `[{...}, {...}]` or `[{"Slide 1: Cover": {...}}, {...}]` |
//! | `labelled_object` | `{"Slide 1: Cover": {...}, "Slide 2: Problem": {...}}` |

use serde_json::Value;
use tracing::{debug, warn};

use smartidea_core::{CanonicalPitchDeck, Normalized, ParseFailure, Slide};

use crate::clean::strip_fences;
use crate::fields::{self, Object};
use crate::first_parsed_block;

const WRAPPERS: &[&str] = &["pitchDeck", "PitchDeck", "Pitch Deck", "pitch_deck"];
const PITCH_DECK_ARRAY: &[&str] = &["pitch_deck"];
const SLIDES_ARRAY: &[&str] = &["Slides", "slides"];

const TITLE: &[&str] = &["title", "Title"];
const HEADLINE: &[&str] = &["headline", "Headline"];
const KEY_POINTS: &[&str] = &["Key Points", "key_points", "keyPoints", "Bullet Points"];
const CONTENT: &[&str] = &["content", "Content"];
const SUPPORTING_DATA: &[&str] = &["Supporting Data", "supporting_data", "supportingData"];
const VISUAL: &[&str] = &[
    "Visual Suggestions",
    "Visual Suggestion",
    "visual_suggestions",
    "visual_suggestion",
    "visualSuggestion",
];
const TYPE: &[&str] = &["type", "Type"];

/// A recognised slide layout.
struct SlideShape {
    name: &'static str,
    detect: fn(&Value) -> bool,
    convert: fn(&Value) -> Vec<Slide>,
}

const SHAPES: &[SlideShape] = &[
    SlideShape {
        name: "pitch_deck_array",
        detect: is_pitch_deck_array,
        convert: from_pitch_deck_array,
    },
    SlideShape {
        name: "slides_array",
        detect: is_slides_array,
        convert: from_slides_array,
    },
    SlideShape {
        name: "array_of_labelled_object",
        detect: is_array_of_labelled_object,
        convert: from_array_of_labelled_object,
    },
    SlideShape {
        name: "plain_array",
        detect: Value::is_array,
        convert: from_plain_array,
    },
    SlideShape {
        name: "labelled_object",
        detect: is_labelled_object,
        convert: from_labelled_object,
    },
];

/// Normalize a completion into a pitch deck.
pub fn normalize_pitch_deck(raw: &str) -> Normalized<CanonicalPitchDeck> {
    let cleaned = strip_fences(raw);

    let Some(parsed) = first_parsed_block(&cleaned, |_| true) else {
        warn!(response_len = raw.len(), "Could not parse any pitch deck block");
        return Normalized::Failed(ParseFailure::new(raw));
    };

    let deck = unwrap_deck(&parsed);
    match SHAPES.iter().find(|shape| (shape.detect)(deck)) {
        Some(shape) => {
            let slides = (shape.convert)(deck);
            debug!(shape = shape.name, slides = slides.len(), "Normalized pitch deck");
            Normalized::Document(CanonicalPitchDeck { slides })
        }
        None => {
            warn!("Parsed pitch deck block matched no known slide layout");
            Normalized::Failed(ParseFailure::new(raw))
        }
    }
}

/// Step into `{"pitchDeck": {...}}`-style containers.
fn unwrap_deck(value: &Value) -> &Value {
    if let Value::Object(obj) = value {
        for key in WRAPPERS {
            if let Some(inner @ Value::Object(_)) = obj.get(*key) {
                return inner;
            }
        }
    }
    value
}

// ─── Detectors ─────────────────────────────────────────────────────────────

fn array_under<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Vec<Value>> {
    let obj = value.as_object()?;
    keys.iter().filter_map(|k| obj.get(*k)).find_map(Value::as_array)
}

fn is_pitch_deck_array(value: &Value) -> bool {
    array_under(value, PITCH_DECK_ARRAY).is_some()
}

fn is_slides_array(value: &Value) -> bool {
    array_under(value, SLIDES_ARRAY).is_some()
}

fn is_slide_label(key: &str) -> bool {
    key.starts_with("Slide") && key != "Slides"
}

fn labelled_entries(obj: &Object) -> Vec<(&String, &Value)> {
    obj.iter().filter(|(k, _)| is_slide_label(k)).collect()
}

/// An array whose sole element is a labelled-slide object.
fn is_array_of_labelled_object(value: &Value) -> bool {
    match value.as_array().map(Vec::as_slice) {
        Some([Value::Object(only)]) => !labelled_entries(only).is_empty(),
        _ => false,
    }
}

fn is_labelled_object(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|obj| !labelled_entries(obj).is_empty())
}

// ─── Converters ────────────────────────────────────────────────────────────

fn from_pitch_deck_array(value: &Value) -> Vec<Slide> {
    array_under(value, PITCH_DECK_ARRAY)
        .map(|items| items_to_slides(items))
        .unwrap_or_default()
}

fn from_slides_array(value: &Value) -> Vec<Slide> {
    array_under(value, SLIDES_ARRAY)
        .map(|items| items_to_slides(items))
        .unwrap_or_default()
}

fn from_array_of_labelled_object(value: &Value) -> Vec<Slide> {
    match value.as_array().map(Vec::as_slice) {
        Some([Value::Object(only)]) => labelled_to_slides(only),
        _ => Vec::new(),
    }
}

fn from_plain_array(value: &Value) -> Vec<Slide> {
    value.as_array().map(|items| items_to_slides(items)).unwrap_or_default()
}

fn from_labelled_object(value: &Value) -> Vec<Slide> {
    value.as_object().map(labelled_to_slides).unwrap_or_default()
}

/// One slide per item. An item may wrap its slide in a label,
/// `{"Slide N: Title": {...}}`.
fn items_to_slides(items: &[Value]) -> Vec<Slide> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let labelled = item.as_object().and_then(|obj| {
                obj.iter()
                    .find(|(k, v)| k.contains("Slide") && v.is_object())
            });
            match labelled {
                Some((label, data)) => labelled_slide(i, label, data),
                None => item_to_slide(i, item),
            }
        })
        .collect()
}

fn labelled_to_slides(obj: &Object) -> Vec<Slide> {
    labelled_entries(obj)
        .into_iter()
        .enumerate()
        .map(|(i, (label, data))| labelled_slide(i, label, data))
        .collect()
}

fn item_to_slide(index: usize, item: &Value) -> Slide {
    match item {
        Value::Object(obj) => slide_from_object(index, obj, None),
        other => Slide {
            title: format!("Slide {}", index + 1),
            content: fields::display_text(other),
            ..Default::default()
        },
    }
}

fn labelled_slide(index: usize, label: &str, data: &Value) -> Slide {
    match data {
        Value::Object(obj) => slide_from_object(index, obj, Some(label)),
        Value::Array(_) => Slide {
            title: label.to_string(),
            headline: label.to_string(),
            key_points: fields::to_list(data),
            ..Default::default()
        },
        other => Slide {
            title: label.to_string(),
            headline: label.to_string(),
            content: fields::display_text(other),
            ..Default::default()
        },
    }
}

/// Build a slide from its fields; `label` is the slide's key in labelled
/// layouts and stands in for a missing title and headline.
fn slide_from_object(index: usize, obj: &Object, label: Option<&str>) -> Slide {
    let positional = format!("Slide {}", index + 1);
    let title_default = label.unwrap_or(&positional);
    Slide {
        title: fields::text(obj, TITLE, title_default),
        headline: fields::text(obj, HEADLINE, label.unwrap_or("")),
        key_points: fields::list(obj, KEY_POINTS),
        content: fields::text(obj, CONTENT, ""),
        supporting_data: fields::text(obj, SUPPORTING_DATA, ""),
        visual_suggestion: fields::text(obj, VISUAL, ""),
        slide_type: fields::text(obj, TYPE, "default"),
    }
}
