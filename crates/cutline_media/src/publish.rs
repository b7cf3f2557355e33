use crate::error::Result;
use cutline_core::types::{RequestStatus, Snapshot};
use std::future::Future;
use tracing::{info, warn};

/// Outcome of the most recent save submission, surfaced to the UI.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaveState {
    pub status: RequestStatus,
    pub error: Option<String>,
}

impl SaveState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Encode a snapshot as the JSON payload handed to the persistence
/// collaborator.
pub fn encode_snapshot(snapshot: &Snapshot) -> Result<String> {
    Ok(serde_json::to_string(snapshot)?)
}

/// Submit a snapshot through the caller-supplied transfer function and record
/// the outcome in `state`.
///
/// The transfer (an HTTP post, a file write, whatever the collaborator does)
/// is entirely the caller's; its failure message lands in `state.error`. The
/// engine does not retry — a failed state stays failed until the user saves
/// again. Returns the final status.
pub async fn submit_snapshot<F, Fut>(
    state: &mut SaveState,
    snapshot: &Snapshot,
    transfer: F,
) -> Result<RequestStatus>
where
    F: FnOnce(String) -> Fut,
    Fut: Future<Output = std::result::Result<(), String>>,
{
    state.status = RequestStatus::Loading;
    state.error = None;

    let payload = encode_snapshot(snapshot)?;
    match transfer(payload).await {
        Ok(()) => {
            info!(
                segments = snapshot.segments.len(),
                tracks = snapshot.subtitles.len(),
                "snapshot saved"
            );
            state.status = RequestStatus::Success;
        }
        Err(message) => {
            warn!(%message, "snapshot save failed");
            state.status = RequestStatus::Failed;
            state.error = Some(message);
        }
    }
    Ok(state.status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cutline_core::types::{SegmentSpan, TimeMs};

    fn snapshot() -> Snapshot {
        Snapshot {
            duration: TimeMs(10_000.0),
            segments: vec![SegmentSpan {
                start: TimeMs(0.0),
                end: TimeMs(10_000.0),
                deleted: false,
            }],
            subtitles: vec![],
        }
    }

    #[tokio::test]
    async fn successful_submission() {
        let mut state = SaveState::new();
        let status = submit_snapshot(&mut state, &snapshot(), |payload| async move {
            assert!(payload.contains("\"segments\""));
            Ok(())
        })
        .await
        .unwrap();

        assert_eq!(status, RequestStatus::Success);
        assert_eq!(state.status, RequestStatus::Success);
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn failed_submission_surfaces_message() {
        let mut state = SaveState::new();
        let status = submit_snapshot(&mut state, &snapshot(), |_payload| async move {
            Err("503 service unavailable".to_string())
        })
        .await
        .unwrap();

        assert_eq!(status, RequestStatus::Failed);
        assert_eq!(state.error.as_deref(), Some("503 service unavailable"));
    }

    #[tokio::test]
    async fn resubmitting_clears_previous_error() {
        let mut state = SaveState::new();
        submit_snapshot(&mut state, &snapshot(), |_| async { Err("boom".to_string()) })
            .await
            .unwrap();
        assert_eq!(state.status, RequestStatus::Failed);

        submit_snapshot(&mut state, &snapshot(), |_| async { Ok(()) })
            .await
            .unwrap();
        assert_eq!(state.status, RequestStatus::Success);
        assert!(state.error.is_none());
    }

    #[test]
    fn encode_contains_flavor_and_flags() {
        let json = encode_snapshot(&snapshot()).unwrap();
        assert!(json.contains("\"deleted\":false"));
        assert!(json.contains("\"duration\""));
    }
}
