//! Prompt templates and retrieval queries per generation kind.

use smartidea_core::{EnhancementRequest, IdeaRequest, PitchDeckRequest, RoadmapRequest};

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.trim().is_empty() {
        default
    } else {
        value
    }
}

// =============================================================================
// RETRIEVAL QUERIES
// =============================================================================

pub fn idea_query(req: &IdeaRequest) -> String {
    format!(
        "business ideas for {} domain with keywords: {}",
        req.domain, req.keywords
    )
}

pub fn roadmap_query(req: &RoadmapRequest) -> String {
    format!(
        "project roadmap planning for {} with timeline {}",
        req.idea_title, req.timeline
    )
}

pub fn pitch_deck_query(req: &PitchDeckRequest) -> String {
    format!("pitch deck content for {} startup fundraising", req.idea_title)
}

pub fn enhancement_query(req: &EnhancementRequest) -> String {
    format!("enhance business idea: {}", req.idea_title())
}

// =============================================================================
// PROMPTS
// =============================================================================

pub fn idea_prompt(req: &IdeaRequest, context: &str) -> String {
    let trends = req
        .trends
        .as_ref()
        .filter(|t| !t.is_null())
        .map(|t| format!("Current Trends: {}", t))
        .unwrap_or_default();
    let constraints = if req.constraints.trim().is_empty() {
        String::new()
    } else {
        format!("Constraints/Requirements: {}", req.constraints)
    };

    format!(
        "Generate 5 innovative business ideas based on the following:

Domain: {domain}
Keywords: {keywords}
Region: {region}
{trends}
{constraints}

Context from knowledge base:
{context}

For each idea, provide:
1. Title (catchy and descriptive)
2. Description (2-3 sentences explaining the concept)
3. Target Market (who would use this)
4. Unique Value Proposition (what makes it special)
5. Potential Challenges
6. Estimated Market Size
7. Innovation Score (1-10)

Format the response as a JSON array of idea objects.",
        domain = req.domain,
        keywords = req.keywords,
        region = or_default(&req.region, "Global"),
    )
}

pub fn roadmap_prompt(req: &RoadmapRequest, context: &str) -> String {
    format!(
        "Create a detailed project roadmap for the following business idea:

Title: {title}
Description: {description}
Timeline: {timeline}
Team Size: {team_size}
Budget: {budget}

Context from knowledge base:
{context}

Generate a comprehensive roadmap with:

1. **Phases**: Break down into 4-6 major phases (e.g., Planning, MVP Development, Testing, Launch, Growth)

2. **For each phase, include:**
   - Phase name and duration
   - Key objectives
   - Deliverables/Milestones
   - Required resources
   - Success metrics
   - Potential risks

3. **Key Milestones**: List 8-10 critical milestones with target dates

4. **Resource Allocation**: Breakdown by role/function

5. **Dependencies**: Critical path items

6. **Risk Management**: Top 5 risks and mitigation strategies

Format as a structured JSON object with phases, milestones, resources, and risks.",
        title = req.idea_title,
        description = req.idea_description,
        timeline = or_default(&req.timeline, "6 months"),
        team_size = or_default(&req.team_size, "Small (3-5 people)"),
        budget = or_default(&req.budget, "Bootstrapped"),
    )
}

pub fn pitch_deck_prompt(req: &PitchDeckRequest, context: &str) -> String {
    format!(
        "Create compelling pitch deck content for the following startup:

Title: {title}
Description: {description}
Target Market: {target_market}
Business Model: {business_model}
Competitive Advantage: {advantage}
Funding Goal: {funding_goal}

Context from knowledge base:
{context}

Generate content for a 10-12 slide pitch deck with the following sections:

1. **Cover Slide**: Company name, tagline, and positioning statement
2. **Problem**: What problem are we solving? (include statistics if possible)
3. **Solution**: Our unique solution and how it works
4. **Market Opportunity**: TAM, SAM, SOM analysis
5. **Product/Service**: Key features and benefits
6. **Business Model**: How we make money
7. **Traction**: Milestones achieved or planned
8. **Competition**: Competitive landscape and our advantage
9. **Go-to-Market Strategy**: How we'll acquire customers
10. **Team**: Key team members and advisors (template)
11. **Financial Projections**: 3-year revenue projection
12. **Ask**: Funding amount and use of funds

For each slide, provide:
- Headline
- Key points (3-5 bullet points)
- Supporting data or statistics
- Visual suggestions

Format as a JSON object with slides array.",
        title = req.idea_title,
        description = req.idea_description,
        target_market = or_default(&req.target_market, "To be defined"),
        business_model = or_default(&req.business_model, "To be defined"),
        advantage = or_default(&req.competitive_advantage, "To be defined"),
        funding_goal = or_default(&req.funding_goal, "$500K seed round"),
    )
}

pub fn enhancement_prompt(req: &EnhancementRequest, context: &str) -> String {
    let idea = serde_json::to_string_pretty(&req.idea).unwrap_or_else(|_| req.idea.to_string());
    format!(
        "Analyze and enhance the following business idea:

{idea}

Focus Area: {focus}

Context:
{context}

Provide:
1. Strengths of the current idea
2. Potential weaknesses or gaps
3. 5 specific improvement suggestions
4. Market opportunity analysis
5. Recommended next steps

Format as a structured JSON object.",
        focus = or_default(&req.focus_area, "General improvement"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_idea_prompt_defaults_and_optional_lines() {
        let req = IdeaRequest {
            domain: "Health".to_string(),
            keywords: "ai, clinics".to_string(),
            ..Default::default()
        };
        let prompt = idea_prompt(&req, "[Context 1]: tip");

        assert!(prompt.contains("Domain: Health"));
        assert!(prompt.contains("Region: Global"));
        assert!(!prompt.contains("Current Trends"));
        assert!(!prompt.contains("Constraints/Requirements"));
        assert!(prompt.contains("Context from knowledge base:\n[Context 1]: tip"));
        assert!(prompt.ends_with("Format the response as a JSON array of idea objects."));
    }

    #[test]
    fn test_idea_prompt_includes_trends_as_json() {
        let req = IdeaRequest {
            trends: Some(json!({"top": [{"name": "ai", "value": 100}]})),
            constraints: "B2B only".to_string(),
            ..Default::default()
        };
        let prompt = idea_prompt(&req, "");
        assert!(prompt.contains(r#"Current Trends: {"top":[{"name":"ai","value":100}]}"#));
        assert!(prompt.contains("Constraints/Requirements: B2B only"));
    }

    #[test]
    fn test_roadmap_prompt_defaults() {
        let prompt = roadmap_prompt(&RoadmapRequest::default(), "");
        assert!(prompt.contains("Timeline: 6 months"));
        assert!(prompt.contains("Team Size: Small (3-5 people)"));
        assert!(prompt.contains("Budget: Bootstrapped"));
    }

    #[test]
    fn test_pitch_deck_prompt_defaults() {
        let req = PitchDeckRequest {
            idea_title: "Acme".to_string(),
            business_model: "SaaS".to_string(),
            ..Default::default()
        };
        let prompt = pitch_deck_prompt(&req, "");
        assert!(prompt.contains("Title: Acme"));
        assert!(prompt.contains("Target Market: To be defined"));
        assert!(prompt.contains("Business Model: SaaS"));
        assert!(prompt.contains("Funding Goal: $500K seed round"));
    }

    #[test]
    fn test_enhancement_prompt_pretty_prints_idea() {
        let req = EnhancementRequest {
            idea: json!({"title": "Acme"}),
            focus_area: String::new(),
        };
        let prompt = enhancement_prompt(&req, "");
        assert!(prompt.contains("{\n  \"title\": \"Acme\"\n}"));
        assert!(prompt.contains("Focus Area: General improvement"));
    }

    #[test]
    fn test_retrieval_queries() {
        let idea = IdeaRequest {
            domain: "Tech".to_string(),
            keywords: "ai".to_string(),
            ..Default::default()
        };
        assert_eq!(
            idea_query(&idea),
            "business ideas for Tech domain with keywords: ai"
        );

        let enhancement = EnhancementRequest {
            idea: json!({"title": "Acme"}),
            focus_area: String::new(),
        };
        assert_eq!(enhancement_query(&enhancement), "enhance business idea: Acme");
    }
}
