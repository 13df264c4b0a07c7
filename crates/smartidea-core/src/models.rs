//! Core data models for Smart Idea Finder.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value as JsonValue};
use uuid::Uuid;

use crate::defaults;

// =============================================================================
// GENERATION REQUESTS
// =============================================================================

/// Kind of document a generation call produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GenerationKind {
    Idea,
    Roadmap,
    PitchDeck,
    Enhancement,
}

impl GenerationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationKind::Idea => "idea",
            GenerationKind::Roadmap => "roadmap",
            GenerationKind::PitchDeck => "pitchDeck",
            GenerationKind::Enhancement => "enhancement",
        }
    }
}

impl std::fmt::Display for GenerationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts strings, numbers, booleans, or lists where free text is expected.
///
/// Form clients send `teamSize: 4` or `keywords: ["ai", "health"]` as often
/// as plain strings.
fn loose_text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = JsonValue::deserialize(deserializer)?;
    Ok(json_to_text(&value))
}

/// Render a JSON value as display text (lists joined with ", ").
pub fn json_to_text(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => String::new(),
        JsonValue::String(s) => s.clone(),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::Array(items) => items
            .iter()
            .map(json_to_text)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        JsonValue::Object(_) => value.to_string(),
    }
}

/// Input for idea generation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IdeaRequest {
    #[serde(deserialize_with = "loose_text")]
    pub domain: String,
    #[serde(deserialize_with = "loose_text")]
    pub keywords: String,
    #[serde(deserialize_with = "loose_text")]
    pub region: String,
    /// Trend data as returned by the trends endpoint, forwarded verbatim.
    pub trends: Option<JsonValue>,
    #[serde(deserialize_with = "loose_text")]
    pub constraints: String,
}

/// Input for roadmap generation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoadmapRequest {
    #[serde(deserialize_with = "loose_text")]
    pub idea_title: String,
    #[serde(deserialize_with = "loose_text")]
    pub idea_description: String,
    #[serde(deserialize_with = "loose_text")]
    pub timeline: String,
    #[serde(deserialize_with = "loose_text")]
    pub team_size: String,
    #[serde(deserialize_with = "loose_text")]
    pub budget: String,
}

/// Input for pitch deck generation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PitchDeckRequest {
    #[serde(deserialize_with = "loose_text")]
    pub idea_title: String,
    #[serde(deserialize_with = "loose_text")]
    pub idea_description: String,
    #[serde(deserialize_with = "loose_text")]
    pub target_market: String,
    #[serde(deserialize_with = "loose_text")]
    pub business_model: String,
    #[serde(deserialize_with = "loose_text")]
    pub competitive_advantage: String,
    #[serde(deserialize_with = "loose_text")]
    pub funding_goal: String,
}

/// Input for idea enhancement.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnhancementRequest {
    /// The idea to analyze; must be a JSON object.
    pub idea: JsonValue,
    #[serde(deserialize_with = "loose_text")]
    pub focus_area: String,
}

impl EnhancementRequest {
    /// Title of the idea under analysis, if it has one.
    pub fn idea_title(&self) -> String {
        ["title", "Title"]
            .iter()
            .find_map(|k| self.idea.get(*k))
            .map(json_to_text)
            .unwrap_or_default()
    }
}

/// A generation request, tagged by kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum GenerationRequest {
    Idea(IdeaRequest),
    Roadmap(RoadmapRequest),
    PitchDeck(PitchDeckRequest),
    Enhancement(EnhancementRequest),
}

impl GenerationRequest {
    pub fn kind(&self) -> GenerationKind {
        match self {
            GenerationRequest::Idea(_) => GenerationKind::Idea,
            GenerationRequest::Roadmap(_) => GenerationKind::Roadmap,
            GenerationRequest::PitchDeck(_) => GenerationKind::PitchDeck,
            GenerationRequest::Enhancement(_) => GenerationKind::Enhancement,
        }
    }
}

/// Sampling parameters for a single completion call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub temperature: f32,
    pub max_tokens: u32,
    /// Overrides the backend's configured model when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl GenerationParams {
    /// Parameters used for each generation kind.
    pub fn for_kind(kind: GenerationKind) -> Self {
        let (temperature, max_tokens) = match kind {
            GenerationKind::Idea => (defaults::IDEA_TEMPERATURE, defaults::IDEA_MAX_TOKENS),
            GenerationKind::Roadmap => (defaults::ROADMAP_TEMPERATURE, defaults::ROADMAP_MAX_TOKENS),
            GenerationKind::PitchDeck => (
                defaults::PITCH_DECK_TEMPERATURE,
                defaults::PITCH_DECK_MAX_TOKENS,
            ),
            GenerationKind::Enhancement => (
                defaults::ENHANCEMENT_TEMPERATURE,
                defaults::ENHANCEMENT_MAX_TOKENS,
            ),
        };
        Self {
            temperature,
            max_tokens,
            model: None,
        }
    }
}

// =============================================================================
// CANONICAL DOCUMENTS
// =============================================================================

/// One business idea in canonical field naming.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalIdea {
    pub title: String,
    pub description: String,
    pub target_market: String,
    pub unique_value_proposition: String,
    pub potential_challenges: String,
    pub estimated_market_size: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub innovation_score: Option<f64>,
}

/// One roadmap phase.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phase {
    pub title: String,
    pub duration: String,
    pub objectives: Vec<String>,
    pub deliverables: Vec<String>,
    pub resources: Vec<String>,
    pub success_metrics: Vec<String>,
    pub risks: Vec<String>,
}

/// One roadmap milestone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub name: String,
    pub target_date: String,
    pub description: String,
}

/// A project roadmap.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalRoadmap {
    pub phases: Vec<Phase>,
    pub milestones: Vec<Milestone>,
    /// Further top-level sections (resource allocation, dependencies, ...)
    /// kept as the model produced them.
    #[serde(flatten)]
    pub sections: Map<String, JsonValue>,
}

/// One pitch deck slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    pub title: String,
    pub headline: String,
    pub key_points: Vec<String>,
    pub content: String,
    pub supporting_data: String,
    pub visual_suggestion: String,
    #[serde(rename = "type")]
    pub slide_type: String,
}

impl Default for Slide {
    fn default() -> Self {
        Self {
            title: String::new(),
            headline: String::new(),
            key_points: Vec::new(),
            content: String::new(),
            supporting_data: String::new(),
            visual_suggestion: String::new(),
            slide_type: "default".to_string(),
        }
    }
}

/// A pitch deck.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanonicalPitchDeck {
    pub slides: Vec<Slide>,
}

/// Analysis of an existing idea.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalEnhancement {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub suggestions: Vec<String>,
    pub market_opportunity: String,
    pub next_steps: Vec<String>,
    #[serde(flatten)]
    pub sections: Map<String, JsonValue>,
}

/// A completion that could not be mapped onto its schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseFailure {
    /// The completion text, untouched.
    pub raw_content: String,
    pub parse_error: bool,
}

impl ParseFailure {
    pub fn new(raw_content: impl Into<String>) -> Self {
        Self {
            raw_content: raw_content.into(),
            parse_error: true,
        }
    }
}

/// Either a fully populated document or a parse failure carrying raw text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Normalized<T> {
    Failed(ParseFailure),
    Document(T),
}

impl<T> Normalized<T> {
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, Normalized::Failed(_))
    }

    pub fn document(&self) -> Option<&T> {
        match self {
            Normalized::Document(doc) => Some(doc),
            Normalized::Failed(_) => None,
        }
    }

    pub fn into_document(self) -> Option<T> {
        match self {
            Normalized::Document(doc) => Some(doc),
            Normalized::Failed(_) => None,
        }
    }
}

/// Generated payload keyed by kind (`ideas`, `roadmap`, `pitchDeck`, `enhancement`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GeneratedDocument {
    Ideas(Normalized<Vec<CanonicalIdea>>),
    Roadmap(Normalized<CanonicalRoadmap>),
    PitchDeck(Normalized<CanonicalPitchDeck>),
    Enhancement(Normalized<CanonicalEnhancement>),
}

impl GeneratedDocument {
    pub fn kind(&self) -> GenerationKind {
        match self {
            GeneratedDocument::Ideas(_) => GenerationKind::Idea,
            GeneratedDocument::Roadmap(_) => GenerationKind::Roadmap,
            GeneratedDocument::PitchDeck(_) => GenerationKind::PitchDeck,
            GeneratedDocument::Enhancement(_) => GenerationKind::Enhancement,
        }
    }

    pub fn is_parse_failure(&self) -> bool {
        match self {
            GeneratedDocument::Ideas(n) => n.is_parse_failure(),
            GeneratedDocument::Roadmap(n) => n.is_parse_failure(),
            GeneratedDocument::PitchDeck(n) => n.is_parse_failure(),
            GeneratedDocument::Enhancement(n) => n.is_parse_failure(),
        }
    }
}

/// Result of one orchestrated generation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOutcome {
    pub success: bool,
    #[serde(flatten)]
    pub data: GeneratedDocument,
    /// Knowledge-base documents that were placed in the prompt.
    pub context: Vec<RetrievedDocument>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    pub timestamp: DateTime<Utc>,
}

// =============================================================================
// RETRIEVAL
// =============================================================================

/// Embedding vector.
pub type Vector = Vec<f32>;

/// A stored knowledge-base entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeDocument {
    pub id: Uuid,
    pub content: String,
    pub embedding: Vector,
    pub metadata: JsonValue,
    pub created_at: DateTime<Utc>,
}

/// A knowledge-base entry scored against a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedDocument {
    pub content: String,
    pub score: f32,
    pub metadata: JsonValue,
}

/// Context assembled for a prompt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrievalContext {
    pub query: String,
    /// `[Context i]: content` entries separated by blank lines.
    pub context: String,
    pub documents: Vec<RetrievedDocument>,
}

impl RetrievalContext {
    /// Context with no documents, used when retrieval is skipped or fails.
    pub fn empty(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            context: String::new(),
            documents: Vec::new(),
        }
    }
}

// =============================================================================
// USERS
// =============================================================================

/// A registered account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    /// Argon2 PHC string; never serialized to clients.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Fields needed to create an account.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: Option<String>,
    pub password_hash: String,
}

// =============================================================================
// SAVED DOCUMENTS
// =============================================================================

/// A persisted idea with any roadmap, pitch deck, or idea list attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedDocument {
    pub id: Uuid,
    pub owner: Uuid,
    pub title: String,
    pub description: String,
    pub score: f64,
    pub domain: String,
    pub saved: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roadmap: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitch_deck: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ideas: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_market: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub competitive_advantage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub funding_goal: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied by a save request. `None` (or an empty string) means
/// "not provided".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub score: Option<f64>,
    pub domain: Option<String>,
    pub roadmap: Option<JsonValue>,
    pub pitch_deck: Option<JsonValue>,
    pub ideas: Option<JsonValue>,
    pub target_market: Option<String>,
    pub business_model: Option<String>,
    pub competitive_advantage: Option<String>,
    pub funding_goal: Option<String>,
}

/// Keep a provided text field only if it is non-empty.
pub fn provided(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

/// Keep a provided JSON field only if it is not null.
pub fn provided_json(value: &Option<JsonValue>) -> Option<&JsonValue> {
    value.as_ref().filter(|v| !v.is_null())
}
