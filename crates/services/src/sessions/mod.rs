mod plan;
mod progress;
mod service;
mod view;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use plan::{AttemptPlan, AttemptSelector};
pub use progress::AttemptProgress;
pub use service::{SessionController, SessionPhase};
pub use view::{AttemptHistoryService, ResultListItem};
pub use workflow::QuizFlow;
