use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};

// =============================================================================
// Intent
// =============================================================================

/// The single category describing what a visitor's message is asking about.
///
/// Variant order is the classifier's priority order: when a message matches
/// several categories, the one declared first wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Greeting,
    Donation,
    Volunteer,
    Contact,
    ProgramsOverview,
    EducationProgram,
    WidowProgram,
    OrphanProgram,
    GirlsProgram,
    Leadership,
    Mission,
    Vision,
    About,
    Impact,
    ProblemStatement,
    Faith,
    LocationNigeria,
    Thanks,
    Goodbye,
    HowToSupport,
    /// Nothing matched. Resolves to the topic menu, never an error.
    Unmatched,
}

impl Intent {
    /// Every intent, in priority order.
    pub const ALL: [Intent; 21] = [
        Intent::Greeting,
        Intent::Donation,
        Intent::Volunteer,
        Intent::Contact,
        Intent::ProgramsOverview,
        Intent::EducationProgram,
        Intent::WidowProgram,
        Intent::OrphanProgram,
        Intent::GirlsProgram,
        Intent::Leadership,
        Intent::Mission,
        Intent::Vision,
        Intent::About,
        Intent::Impact,
        Intent::ProblemStatement,
        Intent::Faith,
        Intent::LocationNigeria,
        Intent::Thanks,
        Intent::Goodbye,
        Intent::HowToSupport,
        Intent::Unmatched,
    ];

    /// Stable snake_case tag, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Greeting => "greeting",
            Intent::Donation => "donation",
            Intent::Volunteer => "volunteer",
            Intent::Contact => "contact",
            Intent::ProgramsOverview => "programs_overview",
            Intent::EducationProgram => "education_program",
            Intent::WidowProgram => "widow_program",
            Intent::OrphanProgram => "orphan_program",
            Intent::GirlsProgram => "girls_program",
            Intent::Leadership => "leadership",
            Intent::Mission => "mission",
            Intent::Vision => "vision",
            Intent::About => "about",
            Intent::Impact => "impact",
            Intent::ProblemStatement => "problem_statement",
            Intent::Faith => "faith",
            Intent::LocationNigeria => "location_nigeria",
            Intent::Thanks => "thanks",
            Intent::Goodbye => "goodbye",
            Intent::HowToSupport => "how_to_support",
            Intent::Unmatched => "unmatched",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Conversation turns
// =============================================================================

/// Who authored a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// One message in a conversation transcript. Never edited after creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
    /// Epoch seconds when the turn was appended.
    pub created_at: i64,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text)
    }

    fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            created_at: Utc::now().timestamp(),
        }
    }
}
