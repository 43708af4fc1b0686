//! # Media Lifecycle Manager
//!
//! Owns the single "current" generated image: preview state, download
//! arming, and handle revocation across resubmissions. No other component
//! creates or revokes handles; all access goes through the manager.
//!
//! States: `Empty → Pending → Ready`, `Ready → Pending` on resubmission,
//! `Ready|Pending → Failed` on a dispatch failure. Each submission gets a
//! monotonic sequence number; an outcome whose number is not the latest
//! issued is ignored, so out-of-order network completion can never put a
//! superseded image on screen.

mod handle;
pub mod svg;

pub use handle::{HandleRegistry, ObjectUrl};

use tracing::warn;

use crate::error::FaroError;

/// What happens to a previously displayed image when a resubmission fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Drop the stale preview. A failed resubmission should not imply the
    /// old image still matches the current field values.
    #[default]
    ClearPreview,
    /// Keep the stale preview visible; downloads stay disabled either way.
    RetainPreview,
}

/// A successfully generated image: raw bytes plus its live object handle.
#[derive(Debug)]
pub struct GeneratedImage {
    bytes: Vec<u8>,
    url: ObjectUrl,
}

impl GeneratedImage {
    /// Raw image bytes, as received from the service.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn handle(&self) -> &ObjectUrl {
        &self.url
    }

    /// The SVG container wrap for this image, computed on demand. A wrap
    /// failure leaves the raster state untouched.
    pub fn to_svg(&self) -> Result<String, FaroError> {
        svg::wrap_raster(&self.bytes)
    }
}

/// Preview/download state of the workbench.
#[derive(Debug, Default)]
pub enum PreviewState {
    /// Nothing generated yet.
    #[default]
    Empty,
    /// A request is in flight. The previously visible image (if any) stays
    /// visible until the outcome arrives.
    Pending {
        seq: u64,
        prev: Option<GeneratedImage>,
    },
    /// The latest submission succeeded; downloads are armed.
    Ready(GeneratedImage),
    /// The latest submission failed.
    Failed {
        message: String,
        retained: Option<GeneratedImage>,
    },
}

/// Owns the current generated image and its lifecycle.
#[derive(Debug)]
pub struct MediaManager {
    registry: HandleRegistry,
    state: PreviewState,
    last_issued: u64,
    policy: FailurePolicy,
}

impl MediaManager {
    pub fn new(policy: FailurePolicy) -> Self {
        Self {
            registry: HandleRegistry::new(),
            state: PreviewState::Empty,
            last_issued: 0,
            policy,
        }
    }

    pub fn registry(&self) -> &HandleRegistry {
        &self.registry
    }

    /// Start a new submission; returns its sequence number. The previously
    /// visible image stays visible while the request is in flight.
    pub fn begin(&mut self) -> u64 {
        self.last_issued += 1;
        let prev = self.take_current();
        self.state = PreviewState::Pending {
            seq: self.last_issued,
            prev,
        };
        self.last_issued
    }

    fn take_current(&mut self) -> Option<GeneratedImage> {
        match std::mem::take(&mut self.state) {
            PreviewState::Ready(image) => Some(image),
            PreviewState::Pending { prev, .. } => prev,
            PreviewState::Failed { retained, .. } => retained,
            PreviewState::Empty => None,
        }
    }

    /// Install a successful outcome. Returns false when the response is
    /// stale, i.e. a newer submission has been issued since.
    pub fn resolve(&mut self, seq: u64, bytes: Vec<u8>) -> bool {
        if seq != self.last_issued {
            warn!(seq, latest = self.last_issued, "ignoring stale generation response");
            return false;
        }
        let prev = self.take_current();
        let url = self.registry.create();
        self.state = PreviewState::Ready(GeneratedImage { bytes, url });
        // The superseded handle is released here, exactly once.
        drop(prev);
        true
    }

    /// Record a failed outcome. Returns false when the failure is stale.
    pub fn reject(&mut self, seq: u64, message: impl Into<String>) -> bool {
        if seq != self.last_issued {
            warn!(seq, latest = self.last_issued, "ignoring stale generation failure");
            return false;
        }
        let prev = self.take_current();
        let retained = match self.policy {
            FailurePolicy::RetainPreview => prev,
            FailurePolicy::ClearPreview => {
                drop(prev);
                None
            }
        };
        self.state = PreviewState::Failed {
            message: message.into(),
            retained,
        };
        true
    }

    /// Image to show in the preview pane, if any.
    pub fn preview(&self) -> Option<&GeneratedImage> {
        match &self.state {
            PreviewState::Ready(image) => Some(image),
            PreviewState::Pending { prev, .. } => prev.as_ref(),
            PreviewState::Failed { retained, .. } => retained.as_ref(),
            PreviewState::Empty => None,
        }
    }

    /// The image downloads are armed with. Only available in `Ready`.
    pub fn current(&self) -> Option<&GeneratedImage> {
        match &self.state {
            PreviewState::Ready(image) => Some(image),
            _ => None,
        }
    }

    pub fn downloads_armed(&self) -> bool {
        self.current().is_some()
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, PreviewState::Pending { .. })
    }

    /// Failure message of the latest submission, if it failed.
    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            PreviewState::Failed { message, .. } => Some(message),
            _ => None,
        }
    }
}
