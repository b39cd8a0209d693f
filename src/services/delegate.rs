//! Generative delegate: defers recommendation construction to the external
//! text-generation service.
//!
//! Every call is context-free. Failures never reach the engine's caller;
//! they resolve into an explicit outcome the strategy selector matches on
//! exhaustively.

use std::fmt::Write as _;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::models::{
    AggregateStats, Encounter, GenerativeConfig, Partner, PatternSet, Recommendation,
};
use crate::domain::ports::{GenerationRequest, GenerativeClient};

const SYSTEM_PROMPT: &str = "You are an expert, discreet intimacy consultant. You analyze \
encounter histories to craft unique, personalized, varied suggestions. Every response must be \
different, creative, and grounded in the data you are given. You always answer with valid JSON.";

/// How a delegate attempt resolved. `Unavailable` and `Malformed` both mean
/// "fall back to the heuristic"; they are distinct so the selector's
/// branching is exhaustive and the log lines say what actually happened.
#[derive(Debug)]
pub enum DelegateOutcome {
    Success(Recommendation),
    Unavailable(String),
    Malformed(String),
}

/// Everything the prompt is built from.
pub struct DelegateContext<'a> {
    /// The specific partner, or None for the cross-partner view.
    pub partner: Option<&'a Partner>,
    pub stats: &'a AggregateStats,
    pub patterns: &'a PatternSet,
    /// Full history, newest first; only the first `history_limit` entries
    /// are rendered into the prompt.
    pub history: &'a [Encounter],
    /// Optional in-progress form context; enriches the prompt only.
    pub form: Option<&'a serde_json::Value>,
}

pub struct GenerativeDelegate {
    client: Arc<dyn GenerativeClient>,
    temperature: f64,
    max_tokens: u32,
    history_limit: usize,
}

impl GenerativeDelegate {
    pub fn new(client: Arc<dyn GenerativeClient>, config: &GenerativeConfig) -> Self {
        Self {
            client,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            history_limit: config.history_limit,
        }
    }

    /// Attempt one generative call and recover a structured result.
    pub async fn generate(&self, context: &DelegateContext<'_>) -> DelegateOutcome {
        if !self.client.is_configured() {
            return DelegateOutcome::Unavailable("no credentials configured".to_string());
        }

        let prompt = build_prompt(context, self.history_limit);
        debug!(prompt_len = prompt.len(), "sending generative request");

        let request = GenerationRequest {
            system: Some(SYSTEM_PROMPT.to_string()),
            prompt,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let text = match self.client.complete(request).await {
            Ok(text) => text,
            Err(e) => return DelegateOutcome::Unavailable(e.to_string()),
        };

        let Some(span) = recover_json_span(&text) else {
            warn!("completion contained no JSON object");
            return DelegateOutcome::Malformed("no JSON object in completion".to_string());
        };

        match serde_json::from_str::<Recommendation>(span) {
            Ok(recommendation) => DelegateOutcome::Success(recommendation),
            Err(e) => {
                warn!(error = %e, "recovered span failed schema validation");
                DelegateOutcome::Malformed(format!("recovered span failed validation: {e}"))
            }
        }
    }
}

/// Greedy span recovery: everything from the first `{` to the last `}`.
fn recover_json_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end >= start).then(|| &text[start..=end])
}

fn format_optional(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("not specified")
}

/// Render the full prompt: context header, aggregates, patterns, history
/// blocks, current form data, and the field-by-field output contract.
fn build_prompt(context: &DelegateContext<'_>, history_limit: usize) -> String {
    let stats = context.stats;
    let mut prompt = String::new();

    match context.partner {
        Some(partner) => {
            let _ = writeln!(prompt, "Partner information:");
            let _ = writeln!(prompt, "- Alias: {}", partner.alias);
            let _ = writeln!(
                prompt,
                "- Physique: {}",
                format_optional(partner.physique.as_deref())
            );
            let _ = writeln!(prompt, "- Face: {}", format_optional(partner.face.as_deref()));
            match partner.age {
                Some(age) => {
                    let _ = writeln!(prompt, "- Age: {age}");
                }
                None => {
                    let _ = writeln!(prompt, "- Age: not specified");
                }
            }
        }
        None => {
            let _ = writeln!(prompt, "GENERAL ANALYSIS - ALL PARTNERS:");
            let _ = writeln!(
                prompt,
                "This analysis covers the most recent encounters across ALL partners, not one in particular."
            );
        }
    }

    let _ = writeln!(prompt, "\nOVERALL STATISTICS:");
    let _ = writeln!(prompt, "- Total encounters logged: {}", stats.count);
    let _ = writeln!(prompt, "- Average rating: {:.1}/10", stats.avg_rating);
    let _ = writeln!(
        prompt,
        "- Average duration: {} minutes",
        stats.avg_duration.round() as i64
    );

    let positions = context
        .patterns
        .top_positions
        .iter()
        .map(|e| format!("{} ({} times)", e.name, e.count))
        .collect::<Vec<_>>()
        .join("; ");
    let locations = context
        .patterns
        .top_locations
        .iter()
        .map(|e| format!("{} ({} times)", e.name, e.count))
        .collect::<Vec<_>>()
        .join(", ");
    let _ = writeln!(prompt, "- Most frequent positions: {positions}");
    let _ = writeln!(prompt, "- Most frequent locations: {locations}");

    let visible = &context.history[..context.history.len().min(history_limit)];
    let _ = writeln!(
        prompt,
        "\nDETAILED HISTORY OF PAST ENCOUNTERS (latest {}):",
        visible.len()
    );
    if visible.is_empty() {
        let _ = writeln!(prompt, "No previous encounters recorded");
    }
    for (idx, encounter) in visible.iter().enumerate() {
        let _ = writeln!(
            prompt,
            "Encounter {} ({}):",
            idx + 1,
            encounter.occurred_at.format("%Y-%m-%d")
        );
        if context.partner.is_none() {
            let _ = writeln!(
                prompt,
                "- Partner: {}",
                format_optional(encounter.partner_alias.as_deref())
            );
        }
        let _ = writeln!(
            prompt,
            "- Location: {}",
            format_optional(encounter.location.as_deref())
        );
        let rendered_positions = encounter.positions.join(", ");
        let _ = writeln!(
            prompt,
            "- Positions: {}",
            format_optional(Some(rendered_positions.as_str()))
        );
        let _ = writeln!(
            prompt,
            "- Attire: {}",
            format_optional(encounter.attire.as_deref())
        );
        let _ = writeln!(prompt, "- Duration: {} minutes", encounter.duration_minutes);
        let _ = writeln!(prompt, "- Rating: {}/10", encounter.rating);
        let scores = encounter.scores;
        let _ = writeln!(
            prompt,
            "- Scores: intensity {}/10, exposure {}/10, immersion {}/10, oral given {}/10, oral received {}/10",
            scores.intensity, scores.exposure, scores.immersion, scores.oral_given, scores.oral_received
        );
        let _ = writeln!(
            prompt,
            "- Outcome: {}",
            format_optional(encounter.outcome.as_deref())
        );
        let _ = writeln!(
            prompt,
            "- Notes: {}\n",
            format_optional(encounter.notes.as_deref())
        );
    }

    if let Some(form) = context.form {
        let _ = writeln!(prompt, "\nCURRENT FORM DATA (if applicable):");
        let _ = writeln!(
            prompt,
            "{}",
            serde_json::to_string_pretty(form).unwrap_or_else(|_| "{}".to_string())
        );
    }

    prompt.push_str(OUTPUT_CONTRACT);
    prompt
}

const OUTPUT_CONTRACT: &str = r#"
CRITICAL INSTRUCTIONS FOR UNIQUE CONTENT:
1. MANDATORY VARIETY: every response must be completely different. Do not repeat phrasing, structure, or suggestions from earlier analyses.
2. DEEP PERSONALIZATION: analyze the specific patterns of the history (what worked best, what did not, emerging preferences).
3. CREATIVITY: suggest new combinations, variations of what already worked, and experiments grounded in the history.
4. UNIQUE SCENARIO: write specific, detailed ambience descriptions with sensory detail (scent, texture, temperature, sound).
5. PERSONALIZED TIPS: base the tips on the historical scores (boost weak areas, lean into strong ones).

Provide a UNIQUE, PERSONALIZED analysis as a JSON object with exactly this structure:
{
  "suggestion": {
    "summary": "A unique, personalized summary grounded in the history",
    "nextDateSuggestion": "Suggested date-time in RFC 3339 format, e.g. 2024-03-15T20:30:00Z",
    "location": "Recommended location (a frequent one, or a fresh variation)",
    "positions": ["position 1", "position 2 (optional)"],
    "attire": "Specific attire suggestion based on the history (optional)",
    "durationMinutes": integer,
    "rationale": "Detailed, unique recommendations based on the history's patterns",
    "scenario": {
      "ambience": "Unique, detailed ambience description with specific sensory detail",
      "lighting": "Creative, varied lighting recommendation for this encounter",
      "sound": "Personalized music or sound suggestion (genres, artists, playlists, or silence)",
      "detail": "Additional unique scenario detail: temperature, scents, textures, decor"
    },
    "tips": [
      "Tip 1 personalized from the historical scores",
      "Tip 2 targeting a weak area or reinforcing a strength",
      "Tip 3 technical and detailed",
      "Tip 4 about communication and connection",
      "Tip 5 about physical and mental preparation"
    ]
  },
  "patterns": {
    "topPositions": [{"name": "string", "count": integer}],
    "topLocations": [{"name": "string", "count": integer}],
    "stats": {"avgRating": number, "avgDuration": number, "count": integer}
  },
  "insights": [
    "Unique insight 1 from deep analysis of the history",
    "Unique insight 2 about discovered patterns or trends",
    "Unique insight 3 with a specific recommendation"
  ]
}

IMPORTANT: Respond ONLY with the JSON, no text before or after. The JSON must be valid and parseable."#;
