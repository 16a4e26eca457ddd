pub mod config;
pub mod error;
pub mod knowledge;
pub mod types;

pub use config::BeaconConfig;
pub use error::{BeaconError, Result};
pub use knowledge::{KnowledgeBase, Leader, Leadership, Organization, Program, ProgramSlot};
pub use types::*;
