//! Organizational reference data backing the chat assistant.
//!
//! The knowledge base is built once at startup (either the built-in content
//! or an override loaded from TOML), validated, and then shared read-only.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{BeaconError, Result};

/// Number of programs the composer indexes positionally.
pub const REQUIRED_PROGRAMS: usize = 4;

/// Identity and contact details of the charity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub name: String,
    pub tagline: String,
    /// Kind of organization, e.g. "Faith-based non-profit organization".
    #[serde(rename = "type")]
    pub org_type: String,
    pub location: String,
    pub phone: String,
    pub founding_statement: String,
}

/// A named leader and the role they hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leader {
    pub name: String,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leadership {
    pub founder: Leader,
    pub coordinator: Leader,
    pub board: Vec<String>,
    pub advisors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    pub name: String,
    pub description: String,
}

/// Fixed positions in [`KnowledgeBase::programs`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgramSlot {
    Education,
    Widows,
    Orphans,
    Girls,
}

impl ProgramSlot {
    pub fn index(&self) -> usize {
        match self {
            ProgramSlot::Education => 0,
            ProgramSlot::Widows => 1,
            ProgramSlot::Orphans => 2,
            ProgramSlot::Girls => 3,
        }
    }
}

/// Immutable record of everything the assistant knows about the charity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    pub organization: Organization,
    pub mission: String,
    pub vision: String,
    /// Why the charity was founded; used by the "about" reply.
    pub why_established: String,
    pub leadership: Leadership,
    /// Order is significant: education, widows, orphans, girls.
    pub programs: Vec<Program>,
    pub impact_statements: Vec<String>,
    pub ways_to_help: Vec<String>,
    pub problems_addressed: Vec<String>,
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::builtin()
    }
}

impl KnowledgeBase {
    /// Load a knowledge base from a TOML file and validate it.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let kb: KnowledgeBase =
            toml::from_str(&content).map_err(|e| BeaconError::Knowledge(e.to_string()))?;
        kb.validate()?;
        info!(
            path = %path.display(),
            programs = kb.programs.len(),
            "Knowledge base loaded"
        );
        Ok(kb)
    }

    /// Check the invariants the composer relies on.
    pub fn validate(&self) -> Result<()> {
        if self.organization.name.trim().is_empty() {
            return Err(BeaconError::Knowledge(
                "organization name must not be empty".to_string(),
            ));
        }
        if self.programs.len() < REQUIRED_PROGRAMS {
            return Err(BeaconError::Knowledge(format!(
                "expected at least {} programs, found {}",
                REQUIRED_PROGRAMS,
                self.programs.len()
            )));
        }
        Ok(())
    }

    /// The program stored at a fixed slot, if present.
    pub fn program(&self, slot: ProgramSlot) -> Option<&Program> {
        self.programs.get(slot.index())
    }

    /// The Beacon of Blessings Charity Initiative's published facts.
    pub fn builtin() -> Self {
        Self {
            organization: Organization {
                name: "Beacon of Blessings Charity Initiative".to_string(),
                tagline: "Helping Hands, Healing Hearts".to_string(),
                org_type: "Faith-based non-profit organization".to_string(),
                location: "Nigeria".to_string(),
                phone: "+1 (587) 432-0753".to_string(),
                founding_statement:
                    "Christian faith-based, inspired by the teachings of Jesus Christ".to_string(),
            },
            mission: "To demonstrate the love of Jesus Christ by supporting vulnerable children, \
                      widows, orphans, and young girls through education assistance, basic needs \
                      support, and community outreach."
                .to_string(),
            vision: "A Nigeria where vulnerable individuals are supported, empowered, and given \
                     hope for a brighter future."
                .to_string(),
            why_established: "The organization was founded out of a desire to share God's love \
                              with those who lack basic necessities: people who may not have \
                              access to education, food, or support systems. We believe that \
                              everyone deserves care, dignity, and opportunity."
                .to_string(),
            leadership: Leadership {
                founder: Leader {
                    name: "Lionel Tchami".to_string(),
                    role: "Founder & Director".to_string(),
                },
                coordinator: Leader {
                    name: "Grace".to_string(),
                    role: "Community Coordinator (Nigeria)".to_string(),
                },
                board: vec![
                    "Samuel Okafor".to_string(),
                    "Rebecca Johnson".to_string(),
                    "Michael Adeyemi".to_string(),
                ],
                advisors: vec!["Faith Williams".to_string(), "Daniel Thompson".to_string()],
            },
            programs: vec![
                Program {
                    name: "Education Support for Children".to_string(),
                    description: "We provide school bags, books, pens, and uniforms to children \
                                  who attend school without basic learning materials. Our first \
                                  outreach focused on equipping students with essential supplies \
                                  to support their education."
                        .to_string(),
                },
                Program {
                    name: "Widow Support Program".to_string(),
                    description: "We reach out to widows who lack food and basic necessities by \
                                  providing food items and support to help ease daily hardships."
                        .to_string(),
                },
                Program {
                    name: "Orphan Care & Support".to_string(),
                    description: "We support orphans through material assistance and community \
                                  care, ensuring they are not forgotten or neglected."
                        .to_string(),
                },
                Program {
                    name: "Support for Young Girls".to_string(),
                    description: "We assist young girls from vulnerable backgrounds by addressing \
                                  their basic needs and promoting dignity, safety, and care."
                        .to_string(),
                },
            ],
            impact_statements: vec![
                "First community outreach successfully completed".to_string(),
                "School bags and supplies distributed to children".to_string(),
                "Food support provided to widows".to_string(),
                "Direct community engagement achieved".to_string(),
            ],
            ways_to_help: vec![
                "Volunteer in community outreach".to_string(),
                "Partner with us to expand our impact".to_string(),
                "Support our mission financially through donations".to_string(),
            ],
            problems_addressed: vec![
                "Children attend school without basic learning materials (school bags, books, \
                 pens, uniforms)"
                    .to_string(),
                "Widows and vulnerable families struggle to access food and essential support"
                    .to_string(),
                "Orphans and young girls are often left without protection, guidance, or \
                 opportunities"
                    .to_string(),
                "These challenges limit education, dignity, and hope for a better future"
                    .to_string(),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_builtin_is_valid() {
        let kb = KnowledgeBase::builtin();
        assert!(kb.validate().is_ok());
        assert_eq!(kb.programs.len(), REQUIRED_PROGRAMS);
    }

    #[test]
    fn test_program_slots_follow_stored_order() {
        let kb = KnowledgeBase::builtin();
        assert_eq!(
            kb.program(ProgramSlot::Education).unwrap().name,
            "Education Support for Children"
        );
        assert_eq!(
            kb.program(ProgramSlot::Widows).unwrap().name,
            "Widow Support Program"
        );
        assert_eq!(
            kb.program(ProgramSlot::Orphans).unwrap().name,
            "Orphan Care & Support"
        );
        assert_eq!(
            kb.program(ProgramSlot::Girls).unwrap().name,
            "Support for Young Girls"
        );
    }

    #[test]
    fn test_program_missing_slot_is_none() {
        let mut kb = KnowledgeBase::builtin();
        kb.programs.truncate(2);
        assert!(kb.program(ProgramSlot::Orphans).is_none());
        assert!(kb.program(ProgramSlot::Widows).is_some());
    }

    #[test]
    fn test_validate_rejects_too_few_programs() {
        let mut kb = KnowledgeBase::builtin();
        kb.programs.pop();
        let err = kb.validate().unwrap_err();
        assert!(matches!(err, BeaconError::Knowledge(_)));
        assert!(err.to_string().contains("found 3"));
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        let mut kb = KnowledgeBase::builtin();
        kb.organization.name = "   ".to_string();
        assert!(kb.validate().is_err());
    }

    #[test]
    fn test_load_round_trips_through_toml() {
        let mut kb = KnowledgeBase::builtin();
        kb.organization.phone = "+234 800 000 0000".to_string();
        let content = toml::to_string_pretty(&kb).unwrap();
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();

        let loaded = KnowledgeBase::load(file.path()).unwrap();
        assert_eq!(loaded, kb);
    }

    #[test]
    fn test_load_invalid_toml_is_knowledge_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"mission = 42").unwrap();
        let err = KnowledgeBase::load(file.path()).unwrap_err();
        assert!(matches!(err, BeaconError::Knowledge(_)));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = KnowledgeBase::load(Path::new("/nonexistent/kb.toml")).unwrap_err();
        assert!(matches!(err, BeaconError::Io(_)));
    }

    #[test]
    fn test_organization_type_serializes_as_type() {
        let json = serde_json::to_value(KnowledgeBase::builtin()).unwrap();
        assert_eq!(
            json["organization"]["type"],
            "Faith-based non-profit organization"
        );
    }
}
