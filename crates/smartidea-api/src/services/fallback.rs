//! Deterministic documents served when the completion provider is unavailable.

use serde_json::Map;

use smartidea_core::{
    CanonicalEnhancement, CanonicalIdea, CanonicalPitchDeck, CanonicalRoadmap, GeneratedDocument,
    GenerationRequest, IdeaRequest, Milestone, Normalized, Phase, PitchDeckRequest, Slide,
};

pub const IDEAS_WARNING: &str = "OpenAI unavailable; showing fallback ideas.";
pub const ROADMAP_WARNING: &str = "OpenAI unavailable; showing basic roadmap template.";
pub const PITCH_DECK_WARNING: &str =
    "AI service unavailable; showing pitch deck template. Customize with your specific details.";
pub const ENHANCEMENT_WARNING: &str =
    "OpenAI unavailable; showing generic enhancement suggestions.";

fn or<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.trim().is_empty() {
        default
    } else {
        value
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Fallback document and warning for `request`.
pub fn fallback_for(request: &GenerationRequest) -> (GeneratedDocument, &'static str) {
    match request {
        GenerationRequest::Idea(req) => (
            GeneratedDocument::Ideas(Normalized::Document(fallback_ideas(req))),
            IDEAS_WARNING,
        ),
        GenerationRequest::Roadmap(_) => (
            GeneratedDocument::Roadmap(Normalized::Document(fallback_roadmap())),
            ROADMAP_WARNING,
        ),
        GenerationRequest::PitchDeck(req) => (
            GeneratedDocument::PitchDeck(Normalized::Document(fallback_pitch_deck(req))),
            PITCH_DECK_WARNING,
        ),
        GenerationRequest::Enhancement(_) => (
            GeneratedDocument::Enhancement(Normalized::Document(fallback_enhancement())),
            ENHANCEMENT_WARNING,
        ),
    }
}

/// Three template ideas built around the request's keywords (or domain).
pub fn fallback_ideas(req: &IdeaRequest) -> Vec<CanonicalIdea> {
    let domain = or(&req.domain, "General");
    let region = or(&req.region, "Global");
    let base = or(&req.keywords, domain);

    let idea = |title: String, description: String, fields: [&str; 4], score: f64| {
        let [target_market, value, challenges, size] = fields;
        CanonicalIdea {
            title,
            description,
            target_market: target_market.to_string(),
            unique_value_proposition: value.to_string(),
            potential_challenges: challenges.to_string(),
            estimated_market_size: size.to_string(),
            innovation_score: Some(score),
        }
    };

    vec![
        idea(
            format!("{} automation platform", base),
            format!(
                "A practical tool that automates repetitive workflows in the {} space for {} teams. Ships with templates and human-in-the-loop review.",
                domain, region
            ),
            [
                "SMBs and startups",
                "Ops-friendly setup, no-code builder, audit trails",
                "Distribution, data access, change management",
                "Mid-sized and growing",
            ],
            7.0,
        ),
        idea(
            format!("{} insights co-pilot", base),
            format!(
                "An insights layer that aggregates signals (support, CRM, product usage) to suggest next-best-actions in {}.",
                domain
            ),
            [
                "Product and growth teams",
                "Connectors first, fast dashboards, alerting",
                "Data quality, integrations coverage",
                "Large and horizontal",
            ],
            8.0,
        ),
        idea(
            format!("{} marketplace", base),
            format!(
                "Curate a niche marketplace in {} with vetted vendors and transparent pricing for {} buyers.",
                domain, region
            ),
            [
                "Procurement leads and founders",
                "Curation + buyer playbooks",
                "Trust, supply density, take-rate sustainability",
                "Dependent on niche depth",
            ],
            6.0,
        ),
    ]
}

/// Four-phase, twelve-week roadmap template.
pub fn fallback_roadmap() -> CanonicalRoadmap {
    let phase = |title: &str, duration: &str, objectives: &[&str]| Phase {
        title: title.to_string(),
        duration: duration.to_string(),
        objectives: strings(objectives),
        ..Default::default()
    };
    let milestone = |week: &str, name: &str| Milestone {
        name: name.to_string(),
        target_date: week.to_string(),
        description: String::new(),
    };

    CanonicalRoadmap {
        phases: vec![
            phase("Planning", "2 weeks", &["Define scope", "Set up team"]),
            phase("Development", "8 weeks", &["Build MVP", "Iterate"]),
            phase("Testing", "2 weeks", &["QA", "Bug fixes"]),
            phase("Launch", "1 week", &["Release", "Monitor"]),
        ],
        milestones: vec![
            milestone("Week 1", "Team kickoff"),
            milestone("Week 3", "MVP ready"),
            milestone("Week 10", "Testing begins"),
            milestone("Week 12", "Launch"),
        ],
        sections: Map::new(),
    }
}

/// Ten-slide deck template, personalized with whatever the request provides.
pub fn fallback_pitch_deck(req: &PitchDeckRequest) -> CanonicalPitchDeck {
    let slides = [
        ("Cover Slide", or(&req.idea_title, "Your Startup"), "Company name, tagline, and positioning statement"),
        ("Problem", "Problem Statement", or(&req.idea_description, "The problem you are solving")),
        ("Solution", "Our Solution", "Your unique solution and competitive advantage"),
        ("Market Opportunity", "Market Size", "Total addressable market (TAM) analysis"),
        ("Business Model", or(&req.business_model, "Revenue Model"), "How you make money"),
        ("Competition", "Competitive Landscape", or(&req.competitive_advantage, "Competitive advantage")),
        ("Go-to-Market", "Customer Acquisition", "How you will acquire customers"),
        ("Financial Projections", "3-Year Forecast", "Revenue projections and unit economics"),
        ("Team", "Team & Advisors", "Key team members and their experience"),
        ("Ask", or(&req.funding_goal, "Funding Request"), "Funding amount and use of funds"),
    ];

    CanonicalPitchDeck {
        slides: slides
            .iter()
            .map(|(title, headline, content)| Slide {
                title: title.to_string(),
                headline: headline.to_string(),
                content: content.to_string(),
                ..Default::default()
            })
            .collect(),
    }
}

/// Generic enhancement suggestions.
pub fn fallback_enhancement() -> CanonicalEnhancement {
    CanonicalEnhancement {
        strengths: strings(&["Clear concept", "Defined market"]),
        weaknesses: strings(&["Needs validation", "Competitive landscape unclear"]),
        suggestions: strings(&[
            "Conduct market research",
            "Define MVP features",
            "Identify key competitors",
            "Create financial projections",
            "Build prototype",
        ]),
        ..Default::default()
    }
}
