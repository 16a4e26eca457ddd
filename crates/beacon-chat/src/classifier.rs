//! Intent classification.
//!
//! An ordered rule table maps lower-cased visitor text to a single
//! [`Intent`]. Rules are tried in [`Intent::ALL`] order and the first match
//! wins, so overlapping keywords ("school", "food", "contribute") resolve to
//! the earlier category.

use std::sync::LazyLock;

use beacon_core::Intent;
use regex::Regex;

/// A compiled pattern linked to the intent it selects.
pub struct IntentRule {
    pub intent: Intent,
    pub pattern: Regex,
}

// =============================================================================
// Rule table (compiled once, reused across calls)
// =============================================================================

static RULES: LazyLock<Vec<IntentRule>> = LazyLock::new(|| {
    // Patterns run against lower-cased input, so no (?i) flag is needed.
    let table: [(Intent, &str); 20] = [
        (
            Intent::Greeting,
            r"^(?:hi|hello|hey|good morning|good afternoon|good evening|greetings)",
        ),
        (
            Intent::Donation,
            r"donat|give|contribut|support financially|money|fund|payment|stripe",
        ),
        (
            Intent::Volunteer,
            r"volunteer|help out|get involved|join|participate|how can i help",
        ),
        (
            Intent::Contact,
            r"contact|reach|phone|call|email|location|address|where are you",
        ),
        (
            Intent::ProgramsOverview,
            r"program|what do you do|services|activities|work|help people",
        ),
        (
            Intent::EducationProgram,
            r"education|school|children|student|books|uniform|supplies|learning",
        ),
        (Intent::WidowProgram, r"widow|women|food|hunger|daily needs"),
        (Intent::OrphanProgram, r"orphan|parentless|abandoned"),
        (Intent::GirlsProgram, r"girl|young women|dignity|safety"),
        (
            Intent::Leadership,
            r"founder|who started|leadership|team|director|lionel|grace|board",
        ),
        (Intent::Mission, r"mission|purpose|goal|objective"),
        (Intent::Vision, r"vision|future|dream|aspiration"),
        (
            Intent::About,
            r"about|who are you|tell me about|what is beacon|organization",
        ),
        (
            Intent::Impact,
            r"impact|results|achievement|accomplish|done|difference",
        ),
        (
            Intent::ProblemStatement,
            r"problem|issue|challenge|why needed|why exist|need",
        ),
        (
            Intent::Faith,
            r"faith|christian|jesus|church|god|religion|spiritual|prayer",
        ),
        (Intent::LocationNigeria, r"nigeria|african|africa|country"),
        (Intent::Thanks, r"thank|thanks|appreciate|grateful"),
        (Intent::Goodbye, r"bye|goodbye|see you|farewell|take care"),
        (Intent::HowToSupport, r"how.*support|ways.*help|contribute"),
    ];

    table
        .iter()
        .map(|(intent, pat)| IntentRule {
            intent: *intent,
            pattern: Regex::new(pat).expect("Invalid intent regex"),
        })
        .collect()
});

/// The ordered rule table, first entry checked first.
pub fn rules() -> &'static [IntentRule] {
    &RULES
}

/// Classify raw visitor text into exactly one intent.
///
/// Total over all strings: empty, whitespace-only, or unrecognised input
/// yields [`Intent::Unmatched`].
pub fn classify(raw: &str) -> Intent {
    if raw.trim().is_empty() {
        return Intent::Unmatched;
    }

    let normalized = raw.to_lowercase();
    let intent = RULES
        .iter()
        .find(|rule| rule.pattern.is_match(&normalized))
        .map(|rule| rule.intent)
        .unwrap_or(Intent::Unmatched);

    tracing::trace!(%intent, len = raw.len(), "Classified message");
    intent
}

// =============================================================================
// Tests
// =============================================================================
