use cutline_core::types::RequestStatus;
use std::collections::HashMap;
use tracing::{debug, warn};

/// A ready-to-display waveform image as delivered by the external generator,
/// typically a data URI or a local file path. Opaque to the engine.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WaveformImage(pub String);

#[derive(Debug, Clone, Default)]
struct WaveformEntry {
    status: RequestStatus,
    image: Option<WaveformImage>,
    error: Option<String>,
}

/// Cache of waveform images, zero-or-one per media source.
///
/// Generation itself happens in an external asynchronous producer; this cache
/// only tracks its lifecycle. A source that ever reached `Success` keeps its
/// image forever — [`begin_generation`](Self::begin_generation) refuses to
/// regenerate, so the expensive producer runs at most once per source.
/// Failures park the source in `Failed` with a reason; whether to retry is
/// the UI's call, by asking again.
#[derive(Debug, Default)]
pub struct WaveformCache {
    entries: HashMap<String, WaveformEntry>,
}

impl WaveformCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask to generate a waveform for `source`. Returns `true` when the
    /// caller should actually start the producer; `false` when an image is
    /// already present or generation is in flight.
    pub fn begin_generation(&mut self, source: &str) -> bool {
        let entry = self.entries.entry(source.to_string()).or_default();
        match entry.status {
            RequestStatus::Success | RequestStatus::Loading => false,
            RequestStatus::Idle | RequestStatus::Failed => {
                entry.status = RequestStatus::Loading;
                entry.error = None;
                debug!(source, "waveform generation started");
                true
            }
        }
    }

    /// Producer callback: the image is ready. A second image for the same
    /// source is discarded; the first one wins.
    pub fn on_image_ready(&mut self, source: &str, image: WaveformImage) {
        let entry = self.entries.entry(source.to_string()).or_default();
        if entry.status == RequestStatus::Success {
            debug!(source, "duplicate waveform image discarded");
            return;
        }
        entry.status = RequestStatus::Success;
        entry.image = Some(image);
        entry.error = None;
    }

    /// Producer callback: generation failed. Never downgrades a success.
    pub fn on_error(&mut self, source: &str, reason: impl Into<String>) {
        let entry = self.entries.entry(source.to_string()).or_default();
        if entry.status == RequestStatus::Success {
            return;
        }
        let reason = reason.into();
        warn!(source, %reason, "waveform generation failed");
        entry.status = RequestStatus::Failed;
        entry.error = Some(reason);
    }

    pub fn status(&self, source: &str) -> RequestStatus {
        self.entries
            .get(source)
            .map(|e| e.status)
            .unwrap_or_default()
    }

    pub fn image(&self, source: &str) -> Option<&WaveformImage> {
        self.entries.get(source).and_then(|e| e.image.as_ref())
    }

    pub fn error(&self, source: &str) -> Option<&str> {
        self.entries.get(source).and_then(|e| e.error.as_deref())
    }
}
