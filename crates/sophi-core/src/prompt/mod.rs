//! Prompt assembly.

mod assembler;
pub mod protocol;

pub use assembler::{PromptInputs, RECALL_LIMIT, assemble_system_instruction, select_recall_candidates};
pub use protocol::{CONTRADICTION_SENTINEL, UNIVERSAL_DEBATE_PROTOCOL};
