//! Reply composition.
//!
//! Turns a classified [`Intent`] into human-readable text drawn from the
//! [`KnowledgeBase`]. Emphasis uses the paired `**` convention; rendering it
//! is left to the presentation layer (see [`crate::markup`]).

use beacon_core::{Intent, KnowledgeBase, ProgramSlot};
use serde::Serialize;

use crate::classifier::classify;

/// Greeting seeded into every new session.
pub const GREETING: &str = "Hello! I'm your guide to Beacon of Blessings Charity Initiative. \
I can tell you about our programs, how to donate, volunteer opportunities, our leadership, \
and much more. How can I help you today?";

const GOODBYE: &str = "Thank you for visiting! May you be blessed. If you ever want to learn \
more or get involved, we're always here. Take care! 🌟";

const THANKS: &str = "You're very welcome! Thank you for your interest in Beacon of Blessings. \
Your curiosity and care mean a lot to us. Is there anything else you'd like to know?";

/// Topic menu returned for unmatched input.
pub const MENU: &str = "Thank you for your question! I'm here to help you learn about Beacon of \
Blessings Charity Initiative.\n\n\
Here's what I can tell you about:\n\
• Our **programs** (education, widow support, orphan care, young girls)\n\
• **How to donate** or support our work\n\
• How to **volunteer** with us\n\
• Our **mission, vision,** and **leadership**\n\
• Our **impact** and the **problems** we address\n\
• **Contact** information\n\n\
What would you like to know more about?";

/// A classified reply, as returned by [`respond`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub intent: Intent,
    pub text: String,
}

/// Classify `raw` and compose the matching reply in one step.
pub fn respond(raw: &str, kb: &KnowledgeBase) -> Reply {
    let intent = classify(raw);
    Reply {
        intent,
        text: compose(intent, kb),
    }
}

/// Compose the reply for `intent`.
///
/// Pure and total: the same inputs always produce the same non-empty text.
pub fn compose(intent: Intent, kb: &KnowledgeBase) -> String {
    let org = &kb.organization;
    match intent {
        Intent::Greeting => format!(
            "Hello! Welcome to {}. I'm here to help you learn about our mission to support \
             vulnerable communities in {}. What would you like to know about? You can ask about \
             our programs, how to donate, volunteer opportunities, or our leadership team.",
            org.name, org.location
        ),
        Intent::Donation => "Thank you for your generous heart! Your donations help us provide:\n\n\
             • School supplies for children (bags, books, uniforms)\n\
             • Food assistance for widows\n\
             • Care and support for orphans\n\
             • Basic needs for young girls\n\n\
             You can donate securely through our Donate page. Every contribution, no matter the \
             size, makes a real difference in someone's life. Would you like to know more about \
             how your donation is used?"
            .to_string(),
        Intent::Volunteer => "We'd love to have you join our mission! Here's how you can get involved:\n\n\
             1. **Volunteer** - Join our community outreach programs\n\
             2. **Partner** - Collaborate with us to expand our impact\n\
             3. **Donate** - Support our mission financially\n\
             4. **Spread the Word** - Share our mission with others\n\n\
             Visit our 'Get Involved' page to learn more. Your time, skills, or resources can \
             transform lives!"
            .to_string(),
        Intent::Contact => format!(
            "You can reach {} at:\n\n📞 Phone: {}\n📍 Location: {}\n\n\
             You can also use the contact form on our Contact page to send us a message \
             directly. We welcome inquiries, partnership proposals, and support offers!",
            org.name, org.phone, org.location
        ),
        Intent::ProgramsOverview => {
            let programs = kb
                .programs
                .iter()
                .enumerate()
                .map(|(i, p)| format!("{}. **{}**", i + 1, p.name))
                .collect::<Vec<_>>()
                .join("\n");
            format!(
                "We run {} key programs:\n\n{}\n\nWould you like to know more about any specific program?",
                count_word(kb.programs.len()),
                programs
            )
        }
        Intent::EducationProgram => program_reply(
            kb,
            ProgramSlot::Education,
            &format!(
                "Many children in {} attend school without basic materials, which limits their \
                 ability to learn effectively. Your support helps change that!",
                org.location
            ),
        ),
        Intent::WidowProgram => program_reply(
            kb,
            ProgramSlot::Widows,
            "Widows often face tremendous challenges in providing for themselves and their \
             families. We're here to ease their burdens.",
        ),
        Intent::OrphanProgram => program_reply(
            kb,
            ProgramSlot::Orphans,
            "Every child deserves love, care, and a chance at a better future.",
        ),
        Intent::GirlsProgram => program_reply(
            kb,
            ProgramSlot::Girls,
            "We believe every girl deserves to grow up with dignity, safety, and opportunity.",
        ),
        Intent::Leadership => {
            let lead = &kb.leadership;
            format!(
                "**Our Leadership Team:**\n\n\
                 👤 **{}** - {}\n\
                 👤 **{}** - {}\n\n\
                 **Board Members:**\n{}\n\n\
                 **Advisors:**\n{}\n\n\
                 Visit our Leadership page to learn more about the people behind our mission.",
                lead.founder.name,
                lead.founder.role,
                lead.coordinator.name,
                lead.coordinator.role,
                bullets("•", &lead.board),
                bullets("•", &lead.advisors)
            )
        }
        Intent::Mission => format!(
            "**Our Mission:**\n\n{}\n\nWe believe that practical acts of compassion, inspired by \
             the love of Jesus Christ, can transform communities.",
            kb.mission
        ),
        Intent::Vision => format!(
            "**Our Vision:**\n\n{}\n\nWe work every day toward this vision, one community at a time.",
            kb.vision
        ),
        Intent::About => format!(
            "**{}** is a {} committed to serving vulnerable communities in {}.\n\n\
             **Tagline:** \"{}\"\n\n{}\n\n\
             Would you like to know about our programs or how you can help?",
            org.name,
            org.org_type,
            org.location,
            org.tagline,
            kb.why_established
        ),
        Intent::Impact => format!(
            "**Our Impact So Far:**\n\n{}\n\nThough we are growing, each outreach brings real \
             change to lives within our community. Visit our Impact page to see our journey!",
            bullets("✓", &kb.impact_statements)
        ),
        Intent::ProblemStatement => format!(
            "**The Problems We Address:**\n\n{}\n\nThese challenges motivate us to act with \
             compassion and urgency. Every contribution helps address these issues.",
            bullets("•", &kb.problems_addressed)
        ),
        Intent::Faith => format!(
            "{} is rooted in Christian faith.\n\n**Our foundation:** {}\n\n\
             Our calling is to love our neighbors and care for the vulnerable. \
             We express our faith through practical acts of compassion, serving all people \
             regardless of their background. Our motivation is love, and our goal is to share \
             hope and dignity with every person we serve.",
            org.name, org.founding_statement
        ),
        Intent::LocationNigeria => format!(
            "We are based in {loc} and focus our efforts on serving vulnerable communities across \
             the country. {loc} faces significant challenges in education access, food security, \
             and support for vulnerable populations, especially widows, orphans, and young \
             girls.\n\n\
             Our community-based approach ensures we reach those who need help the most.",
            loc = org.location
        ),
        Intent::Thanks => THANKS.to_string(),
        Intent::Goodbye => GOODBYE.to_string(),
        Intent::HowToSupport => format!(
            "**Ways You Can Support:**\n\n{}\n\nEvery contribution, whether time, skills, or \
             resources, helps change lives. Which option interests you most?",
            bullets("•", &kb.ways_to_help)
        ),
        Intent::Unmatched => MENU.to_string(),
    }
}

/// Name, description, and a closing line for one of the four programs.
///
/// A knowledge base without the slot gets the topic menu instead.
fn program_reply(kb: &KnowledgeBase, slot: ProgramSlot, closing: &str) -> String {
    match kb.program(slot) {
        Some(program) => format!(
            "**{}**\n\n{}\n\n{}",
            program.name, program.description, closing
        ),
        None => {
            tracing::warn!(?slot, "Knowledge base has no program at slot");
            MENU.to_string()
        }
    }
}

fn bullets(marker: &str, items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("{} {}", marker, item))
        .collect::<Vec<_>>()
        .join("\n")
}

fn count_word(n: usize) -> String {
    match n {
        1 => "one".to_string(),
        2 => "two".to_string(),
        3 => "three".to_string(),
        4 => "four".to_string(),
        5 => "five".to_string(),
        6 => "six".to_string(),
        _ => n.to_string(),
    }
}

// =============================================================================
// Tests
// =============================================================================
