//! Small async building blocks shared by the search session.

mod cancel;
mod scheduled;

pub use cancel::CancelErr;
pub use cancel::OrCancelExt;
pub use scheduled::ScheduledTask;
