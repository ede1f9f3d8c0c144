//! Presentation queue for detected milestones.
//!
//! - [`queue`] is the pure two-channel FIFO with display tokens
//! - [`CelebrationCenter`] shares the queue with auto-dismiss timers and fires
//!   sound and haptic cues when a full-screen milestone is displayed

mod center;
pub mod queue;
mod timers;

pub use center::CelebrationCenter;
pub use queue::{CelebrationQueue, Channel, DisplayToken, Displayed, PendingCounts, Promoted};
