#![forbid(unsafe_code)]

pub mod error;
pub mod identity;
pub mod pool;
pub mod scoring;
pub mod sessions;

pub use quiz_core::Clock;

pub use error::{PoolError, SessionError};
pub use identity::{FixedIdentity, IdentityProvider};
pub use pool::PoolBuilder;
pub use scoring::ScoringEngine;

pub use sessions::{
    AttemptHistoryService, AttemptPlan, AttemptProgress, AttemptSelector, QuizFlow,
    ResultListItem, SessionController, SessionPhase,
};
