use std::fmt;
use std::future::Future;

use tokio_util::sync::CancellationToken;

use super::api::{ApiError, RoomApi};
use super::ui::{room_location, LobbyUi, MSG_ROOM_FULL, MSG_UNREACHABLE, MSG_WRONG_PASSWORD};

/// One user's try at entering a room. Built per action, dropped once the
/// flow resolves.
#[derive(Clone)]
pub struct AdmissionAttempt {
    pub room_id: String,
    pub password: String,
}

impl AdmissionAttempt {
    pub fn new(room_id: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            room_id: room_id.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for AdmissionAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdmissionAttempt")
            .field("room_id", &self.room_id)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdmissionOutcome {
    /// Both checks passed and the UI was sent to `location`.
    Entered { location: String },
    WrongPassword,
    RoomFull,
    /// A request failed in transport or with an unexpected server error.
    Failed { reason: String },
    /// The caller gave up before the flow finished.
    Cancelled,
}

/// Result of the live password check in the room settings dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordCheck {
    Confirmed,
    Mismatch,
}

/// Password confirmation, then capacity check, then navigation.
pub struct AdmissionFlow<'a> {
    api: &'a dyn RoomApi,
    ui: &'a dyn LobbyUi,
}

async fn until_cancelled<F: Future>(cancel: &CancellationToken, fut: F) -> Option<F::Output> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => None,
        out = fut => Some(out),
    }
}

impl<'a> AdmissionFlow<'a> {
    pub fn new(api: &'a dyn RoomApi, ui: &'a dyn LobbyUi) -> Self {
        Self { api, ui }
    }

    /// Run the admission sequence for `attempt`.
    ///
    /// The capacity check is only sent after the password was confirmed.
    /// A cancelled token ends the flow silently at the next request.
    pub async fn attempt_entry(
        &self,
        attempt: &AdmissionAttempt,
        cancel: &CancellationToken,
    ) -> AdmissionOutcome {
        let room_id = attempt.room_id.as_str();

        let confirm = self.api.confirm_password(room_id, &attempt.password);
        let confirmed = match until_cancelled(cancel, confirm).await {
            None => return self.cancelled(room_id),
            Some(Err(e)) => return self.failed(room_id, "confirm_password", e),
            Some(Ok(confirmed)) => confirmed,
        };
        if !confirmed {
            tracing::info!(room_id = %room_id, "Admission refused: wrong password");
            self.ui.alert(MSG_WRONG_PASSWORD);
            return AdmissionOutcome::WrongPassword;
        }

        let has_space = match until_cancelled(cancel, self.api.check_user_count(room_id)).await {
            None => return self.cancelled(room_id),
            Some(Err(e)) => return self.failed(room_id, "check_user_count", e),
            Some(Ok(has_space)) => has_space,
        };
        if !has_space {
            tracing::info!(room_id = %room_id, "Admission refused: room full");
            self.ui.alert(MSG_ROOM_FULL);
            return AdmissionOutcome::RoomFull;
        }

        let location = room_location(room_id);
        tracing::info!(room_id = %room_id, "Admission granted");
        self.ui.navigate(&location);
        AdmissionOutcome::Entered { location }
    }

    /// Confirm a password without entering; used to unlock room settings.
    pub async fn check_password(
        &self,
        room_id: &str,
        password: &str,
    ) -> Result<PasswordCheck, ApiError> {
        let confirmed = self.api.confirm_password(room_id, password).await?;
        Ok(if confirmed {
            PasswordCheck::Confirmed
        } else {
            PasswordCheck::Mismatch
        })
    }

    fn cancelled(&self, room_id: &str) -> AdmissionOutcome {
        tracing::debug!(room_id = %room_id, "Admission cancelled");
        AdmissionOutcome::Cancelled
    }

    fn failed(&self, room_id: &str, step: &str, err: ApiError) -> AdmissionOutcome {
        tracing::error!(room_id = %room_id, step, error = %err, "Admission request failed");
        self.ui.alert(MSG_UNREACHABLE);
        AdmissionOutcome::Failed {
            reason: err.to_string(),
        }
    }
}
