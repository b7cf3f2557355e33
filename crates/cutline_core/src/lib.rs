//! Timeline-editing engine for an interactive video-cutting editor.
//!
//! The engine keeps four independent pieces of state over one shared time
//! axis: the segment partition being cut ([`cutting`]), per-flavor subtitle
//! cue tracks ([`subtitle`]), the playhead ([`playhead`]), and the zoom/
//! scroll viewport with its time-to-pixel mapping ([`viewport`]). The
//! [`session`] module composes them and dispatches atomic edit actions;
//! [`drag`] wraps the pointer gestures as begin/preview/commit transactions.

pub mod cutting;
pub mod drag;
pub mod error;
pub mod playhead;
pub mod session;
pub mod subtitle;
pub mod types;
pub mod viewport;

pub use error::{CoreError, Result};
pub use session::{EditAction, EditorSession};
pub use types::TimeMs;
