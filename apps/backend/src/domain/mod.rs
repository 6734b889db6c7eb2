//! Domain layer: pure session logic types and helpers.

pub mod player_view;
pub mod session;
pub mod session_id;
pub mod snapshot;

#[cfg(test)]
mod test_gens;

// Re-exports for ergonomics
pub use player_view::AdvisorView;
pub use session::{GuessOutcome, Outcome, Participant, Phase, Session, Slot, AI_NAME, DRAW};
pub use session_id::SessionId;
pub use snapshot::{SessionSnapshot, StateView};
