//! Training: line tracking and the session around it
//!
//! - [`lines`] - active-line narrowing and computer reply selection
//! - [`timer`] - attempt timer with hint penalties
//! - [`hint`] - two-stage hint protocol
//! - [`stats`] - running statistics and their display formatting
//! - [`scheduler`] - generation-stamped deferred replies
//! - [`session`] - the controller tying them together

pub mod error;
pub mod hint;
pub mod lines;
pub mod scheduler;
pub mod session;
pub mod stats;
pub mod timer;

pub use error::{TrackError, TrackResult};
pub use hint::{HintOutcome, HintState};
pub use lines::{ActiveLineSet, FirstPicker, LineTracker, RandomPicker, ReplyPicker, SubmitOutcome};
pub use scheduler::{ReplyScheduler, ScheduledReply};
pub use session::{
    Collaborators, MoveAttempt, Rejection, SessionController, SessionOptions, SessionPhase,
};
pub use stats::{format_time, format_timer, SessionStats, StatsView};
pub use timer::TrainingTimer;
