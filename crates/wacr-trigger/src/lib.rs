//! WAcr Trigger
//!
//! Polls the WAcr API for records created since the previous tick.
//!
//! Each tick issues one single-page request filtered by `created_at >= cursor`
//! and then moves the cursor to the tick's start time. The cursor moves even
//! when the request fails, so a failing window is skipped rather than retried
//! forever.
//!
//! [`PollScheduler`] drives a [`PollTrigger`] at a fixed interval and sends
//! each non-empty batch over a channel.

mod cursor;
mod error;
mod scheduler;
mod trigger;

pub use cursor::{CURSOR_LOOKBACK_SECS, CursorStore, cursor_key, format_cursor};
pub use error::TriggerError;
pub use scheduler::PollScheduler;
pub use trigger::{POLL_PAGE_SIZE, PollStatus, PollTrigger};
