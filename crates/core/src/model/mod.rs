mod ids;
mod pool;
mod question;
mod result;
mod selection;
pub mod source;

pub use ids::{OptionId, QuestionId, UserId};
pub use pool::QuestionPool;
pub use question::{AnswerOption, Question, QuestionMode};
pub use result::{
    ResultRecord, ResultRecordError, ScoreTally, SubmitReason, Verdict, VerdictKind,
};
pub use selection::SelectionState;
pub use source::{RawFile, RawOption, RawQuestion};
