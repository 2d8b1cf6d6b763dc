//! Feedback control: the PI law and the per-sample loop around it.

mod feedback;
mod pi;

pub use feedback::{limit_sample_acceleration, FeedbackController};
pub use pi::{PiController, PiOutput};
