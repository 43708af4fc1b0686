//! # Studio
//!
//! The composition layer: owns the active content type, its form values,
//! the common-option state, the dispatcher and the media manager, and runs
//! the submit workflow between them. All state lives here, not in globals,
//! so every piece stays independently testable.

use tracing::debug;

use crate::client::Dispatcher;
use crate::error::FaroError;
use crate::form::{self, FormValues};
use crate::media::{FailurePolicy, MediaManager};
use crate::options::{CommonOptions, KeyValueStore, OptionsStore};
use crate::request::{self, RequestParams};
use crate::schema::{self, QrType};

/// A submission that has been validated, normalized and sequence-tagged,
/// but not yet dispatched.
#[derive(Debug)]
pub struct PendingSubmission {
    pub seq: u64,
    pub qr_type: QrType,
    pub params: RequestParams,
}

/// One generator session.
pub struct Studio<S: KeyValueStore> {
    qr_type: QrType,
    form: FormValues,
    common: CommonOptions,
    options: OptionsStore<S>,
    dispatcher: Dispatcher,
    media: MediaManager,
}

impl<S: KeyValueStore> Studio<S> {
    /// Create a session. Persisted common options are restored once, here,
    /// before any interaction.
    pub fn new(qr_type: QrType, dispatcher: Dispatcher, store: S, policy: FailurePolicy) -> Self {
        let options = OptionsStore::new(store);
        let mut common = CommonOptions::new();
        options.restore(&mut common);
        Self {
            qr_type,
            form: FormValues::new(),
            common,
            options,
            dispatcher,
            media: MediaManager::new(policy),
        }
    }

    pub fn qr_type(&self) -> QrType {
        self.qr_type
    }

    /// Switch the active content type. The previous type's form values are
    /// discarded, never merged into the new form.
    pub fn select_type(&mut self, qr_type: QrType) {
        if qr_type != self.qr_type {
            self.qr_type = qr_type;
            self.form = FormValues::new();
        }
    }

    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.form.set(name, value);
    }

    pub fn form(&self) -> &FormValues {
        &self.form
    }

    pub fn common_options(&self) -> &CommonOptions {
        &self.common
    }

    /// Update a common option and persist the full set.
    pub fn set_option(&mut self, name: &str, value: &str) -> Result<(), FaroError> {
        if !schema::common_fields().iter().any(|f| f.name == name) {
            return Err(FaroError::Validation {
                field: name.to_string(),
                message: "unknown common option".to_string(),
            });
        }
        self.common.insert(name.to_string(), value.to_string());
        self.options.save(&self.common)
    }

    /// Validate and normalize the current form into a sequence-tagged
    /// submission. Fails before any network traffic when a required field
    /// is blank; the media state is left untouched in that case.
    pub fn begin_submission(&mut self) -> Result<PendingSubmission, FaroError> {
        form::validate(self.qr_type, &self.form)?;
        let params = request::normalize(self.qr_type, &self.form);
        let seq = self.media.begin();
        debug!(seq, qr_type = %self.qr_type, "submission started");
        Ok(PendingSubmission {
            seq,
            qr_type: self.qr_type,
            params,
        })
    }

    /// Route a dispatch outcome into the media manager under its sequence
    /// tag. Stale outcomes are ignored by the manager.
    pub fn finish_submission(
        &mut self,
        seq: u64,
        outcome: Result<Vec<u8>, FaroError>,
    ) -> Result<(), FaroError> {
        match outcome {
            Ok(bytes) => {
                self.media.resolve(seq, bytes);
                Ok(())
            }
            Err(err) => {
                self.media.reject(seq, err.to_string());
                Err(err)
            }
        }
    }

    /// Run the full submit workflow: validate, normalize, dispatch, and
    /// install the outcome.
    pub async fn submit(&mut self) -> Result<(), FaroError> {
        let pending = self.begin_submission()?;
        let outcome = self
            .dispatcher
            .generate(pending.qr_type, pending.params, &self.common)
            .await;
        self.finish_submission(pending.seq, outcome)
    }

    pub fn media(&self) -> &MediaManager {
        &self.media
    }
}
