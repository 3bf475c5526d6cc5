use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};
use crate::models::consent::{ConsentField, ConsentState, LocationPrecision};
use crate::models::privacy::RequestStatus;
use crate::models::session::Session;
use crate::services::data_access::DashboardApi;
use crate::services::interaction::{Notice, UserInteraction};
use crate::views::privacy_view::{render_privacy_panel, PrivacyPanelView};

pub const CONSENT_UPDATED_NOTICE: &str = "Consent updated successfully";
pub const CONSENT_FAILED_NOTICE: &str = "Failed to update consent";
pub const EXPORT_FAILED_NOTICE: &str = "Failed to request data export";
pub const DELETION_FAILED_NOTICE: &str = "Failed to request data deletion";
pub const DELETION_CONFIRMATION: &str =
    "Are you sure you want to delete all your data? This action cannot be undone.";

/// Whether the local consent copy matches what the server last accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Synced,
    Unsynced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrivacyRequestOutcome {
    /// The user declined the confirmation; nothing was sent.
    Declined,
    Submitted,
    Failed,
}

/// Consent and data-rights controls.
///
/// Edits are applied locally first and then pushed as a full
/// [`ConsentState`]. A failed push keeps the local value and marks the
/// edited field unsynced until a later push succeeds.
pub struct ConsentPanel {
    api: Arc<dyn DashboardApi>,
    session: Session,
    interaction: Arc<dyn UserInteraction>,
    consent: ConsentState,
    unsynced: BTreeSet<ConsentField>,
    export_status: Option<RequestStatus>,
    delete_status: Option<RequestStatus>,
}

impl ConsentPanel {
    pub fn new(
        api: Arc<dyn DashboardApi>,
        session: Session,
        interaction: Arc<dyn UserInteraction>,
    ) -> Self {
        Self::with_initial(api, session, interaction, ConsentState::default())
    }

    /// Start from a consent state the host already knows about instead of
    /// the built-in default.
    pub fn with_initial(
        api: Arc<dyn DashboardApi>,
        session: Session,
        interaction: Arc<dyn UserInteraction>,
        consent: ConsentState,
    ) -> Self {
        Self {
            api,
            session,
            interaction,
            consent,
            unsynced: BTreeSet::new(),
            export_status: None,
            delete_status: None,
        }
    }

    pub fn consent(&self) -> &ConsentState {
        &self.consent
    }

    pub fn unsynced_fields(&self) -> &BTreeSet<ConsentField> {
        &self.unsynced
    }

    pub fn sync_state(&self) -> SyncState {
        if self.unsynced.is_empty() {
            SyncState::Synced
        } else {
            SyncState::Unsynced
        }
    }

    pub fn export_status(&self) -> Option<&RequestStatus> {
        self.export_status.as_ref()
    }

    pub fn delete_status(&self) -> Option<&RequestStatus> {
        self.delete_status.as_ref()
    }

    pub async fn set_telematics_sharing(&mut self, enabled: bool) -> AppResult<SyncState> {
        let next = ConsentState {
            telematics_sharing_enabled: enabled,
            ..self.consent.clone()
        };
        Ok(self.apply(ConsentField::TelematicsSharing, next).await)
    }

    /// Rejected without a request while telematics sharing is off; the
    /// stored precision is left as it was.
    pub async fn set_location_precision(
        &mut self,
        precision: LocationPrecision,
    ) -> AppResult<SyncState> {
        if !self.consent.location_editable() {
            return Err(AppError::validation(
                "location precision cannot change while telematics sharing is disabled",
            ));
        }

        let next = ConsentState {
            location_precision: precision,
            ..self.consent.clone()
        };
        Ok(self.apply(ConsentField::LocationPrecision, next).await)
    }

    pub async fn set_data_retention(&mut self, enabled: bool) -> AppResult<SyncState> {
        let next = ConsentState {
            data_retention_enabled: enabled,
            ..self.consent.clone()
        };
        Ok(self.apply(ConsentField::DataRetention, next).await)
    }

    async fn apply(&mut self, field: ConsentField, next: ConsentState) -> SyncState {
        self.consent = next;
        debug!(target: "app::privacy", field = %field, "consent changed locally");

        match self.api.update_consent(&self.session, &self.consent).await {
            Ok(ack) => {
                self.unsynced.clear();
                info!(
                    target: "app::privacy",
                    field = %field,
                    status = %ack.status,
                    "consent synced"
                );
                self.interaction.notify(&Notice::success(CONSENT_UPDATED_NOTICE));
            }
            Err(error) => {
                self.unsynced.insert(field);
                warn!(
                    target: "app::privacy",
                    field = %field,
                    error = %error,
                    "consent sync failed, keeping local value"
                );
                self.interaction.notify(&Notice::failure(CONSENT_FAILED_NOTICE));
            }
        }

        self.sync_state()
    }

    pub async fn request_data_export(&mut self) -> PrivacyRequestOutcome {
        match self.api.request_data_export(&self.session).await {
            Ok(status) => {
                info!(
                    target: "app::privacy",
                    status = %status.status,
                    request_id = ?status.request_id,
                    "data export requested"
                );
                self.export_status = Some(status);
                PrivacyRequestOutcome::Submitted
            }
            Err(error) => {
                warn!(target: "app::privacy", error = %error, "data export request failed");
                self.interaction.notify(&Notice::failure(EXPORT_FAILED_NOTICE));
                PrivacyRequestOutcome::Failed
            }
        }
    }

    pub async fn request_data_deletion(&mut self) -> PrivacyRequestOutcome {
        if !self.interaction.confirm(DELETION_CONFIRMATION) {
            debug!(target: "app::privacy", "data deletion declined");
            return PrivacyRequestOutcome::Declined;
        }

        match self.api.request_data_deletion(&self.session).await {
            Ok(status) => {
                info!(
                    target: "app::privacy",
                    status = %status.status,
                    request_id = ?status.request_id,
                    "data deletion requested"
                );
                self.delete_status = Some(status);
                PrivacyRequestOutcome::Submitted
            }
            Err(error) => {
                warn!(target: "app::privacy", error = %error, "data deletion request failed");
                self.interaction.notify(&Notice::failure(DELETION_FAILED_NOTICE));
                PrivacyRequestOutcome::Failed
            }
        }
    }

    pub fn render(&self) -> String {
        render_privacy_panel(&PrivacyPanelView {
            consent: &self.consent,
            unsynced: &self.unsynced,
            export_status: self.export_status.as_ref(),
            delete_status: self.delete_status.as_ref(),
        })
    }
}
