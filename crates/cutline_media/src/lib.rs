//! Collaborator-boundary state for the cutline engine: the waveform image
//! cache fed by the external generator, and tracking of snapshot submissions
//! to the persistence collaborator.

pub mod error;
pub mod publish;
pub mod waveform;

pub use error::{MediaError, Result};
pub use publish::{submit_snapshot, SaveState};
pub use waveform::{WaveformCache, WaveformImage};
