mod artifact;
mod session;
mod tool;

pub use artifact::{Artifact, ArtifactKind};
pub use session::{ensure_system_preamble, Message, ProposalState, Role};
pub use tool::{FunctionCall, ToolCall};
