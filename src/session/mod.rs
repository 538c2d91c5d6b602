//! Interactive quiz session: question sequencing, countdown and feedback
//! pauses.

mod controller;
mod timer;

pub use controller::{ActiveView, Feedback, SessionController, SessionView, Step};
pub use timer::{SessionEvent, TimerHandle};
