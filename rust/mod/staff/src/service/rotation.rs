//! Verified password rotation.
//!
//! ```text
//! Idle ─► AwaitingOldPasswordCheck ─┬─► Rejected(NotFound | CredentialMismatch)
//!                                   └─► AwaitingNewHash ─► Committed
//! ```
//!
//! The only write is a compare-and-set of the hash that was just verified,
//! so a failed or lost write leaves the old password in force.

use std::fmt;

use tracing::{debug, info, warn};

use crate::model::PasswordChange;
use crate::service::{StaffError, StaffService};
use crate::store::StoreError;

/// Why a rotation stopped without writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    NotFound,
    CredentialMismatch,
}

#[derive(Clone, PartialEq, Eq)]
pub enum RotationState {
    Idle,
    AwaitingOldPasswordCheck,
    /// Old password verified against `current_hash`.
    AwaitingNewHash { current_hash: String },
    Rejected(Rejection),
    Committed,
}

impl RotationState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RotationState::Rejected(_) | RotationState::Committed)
    }

    /// State name for logs. Never includes the hash.
    fn name(&self) -> &'static str {
        match self {
            RotationState::Idle => "idle",
            RotationState::AwaitingOldPasswordCheck => "awaiting_old_password_check",
            RotationState::AwaitingNewHash { .. } => "awaiting_new_hash",
            RotationState::Rejected(Rejection::NotFound) => "rejected_not_found",
            RotationState::Rejected(Rejection::CredentialMismatch) => "rejected_credential_mismatch",
            RotationState::Committed => "committed",
        }
    }
}

/// Hand-written so `{:?}` never prints the stored hash.
impl fmt::Debug for RotationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RotationState::Idle => f.write_str("Idle"),
            RotationState::AwaitingOldPasswordCheck => f.write_str("AwaitingOldPasswordCheck"),
            RotationState::AwaitingNewHash { .. } => f.write_str("AwaitingNewHash { .. }"),
            RotationState::Rejected(reason) => f.debug_tuple("Rejected").field(reason).finish(),
            RotationState::Committed => f.write_str("Committed"),
        }
    }
}

struct Rotation<'a> {
    svc: &'a StaffService,
    id: i64,
    change: PasswordChange,
    state: RotationState,
}

impl Rotation<'_> {
    /// Advance one transition. Errors abort the rotation with nothing written.
    async fn step(&mut self) -> Result<(), StaffError> {
        let next = match &self.state {
            RotationState::Idle => RotationState::AwaitingOldPasswordCheck,

            RotationState::AwaitingOldPasswordCheck => match self.svc.store.find(self.id) {
                Err(StoreError::NotFound(_)) => RotationState::Rejected(Rejection::NotFound),
                Err(e) => return Err(e.into()),
                Ok(staff) => {
                    let matches = self
                        .svc
                        .verify_password(self.change.old_password.clone(), staff.password_hash.clone())
                        .await?;
                    if matches {
                        RotationState::AwaitingNewHash {
                            current_hash: staff.password_hash,
                        }
                    } else {
                        RotationState::Rejected(Rejection::CredentialMismatch)
                    }
                }
            },

            RotationState::AwaitingNewHash { current_hash } => {
                let new_hash = self
                    .svc
                    .hash_password(self.change.new_password.clone())
                    .await?;
                match self
                    .svc
                    .store
                    .swap_password_hash(self.id, current_hash, &new_hash)
                {
                    Ok(true) => RotationState::Committed,
                    // The hash moved after we verified it.
                    Ok(false) => RotationState::Rejected(Rejection::CredentialMismatch),
                    Err(StoreError::NotFound(_)) => RotationState::Rejected(Rejection::NotFound),
                    Err(e) => return Err(e.into()),
                }
            }

            terminal => terminal.clone(),
        };

        debug!(
            staff_id = self.id,
            from = self.state.name(),
            to = next.name(),
            "password rotation transition"
        );
        self.state = next;
        Ok(())
    }
}

impl StaffService {
    /// Run a rotation to its terminal state.
    ///
    /// Returns `Committed` or `Rejected`; storage and hashing failures are
    /// errors.
    pub async fn rotate_password(
        &self,
        id: i64,
        change: PasswordChange,
    ) -> Result<RotationState, StaffError> {
        let mut rotation = Rotation {
            svc: self,
            id,
            change,
            state: RotationState::Idle,
        };
        while !rotation.state.is_terminal() {
            rotation.step().await?;
        }

        match rotation.state {
            RotationState::Committed => info!(staff_id = id, "password changed"),
            RotationState::Rejected(reason) => {
                warn!(staff_id = id, ?reason, "password change rejected")
            }
            _ => {}
        }
        Ok(rotation.state)
    }

    /// Change a password after verifying the old one.
    ///
    /// A missing record and a wrong old password are distinct errors.
    pub async fn change_password(&self, id: i64, change: PasswordChange) -> Result<(), StaffError> {
        match self.rotate_password(id, change).await? {
            RotationState::Committed => Ok(()),
            RotationState::Rejected(Rejection::NotFound) => Err(StaffError::NotFound(id)),
            RotationState::Rejected(Rejection::CredentialMismatch) => {
                Err(StaffError::CredentialMismatch)
            }
            other => Err(StaffError::Internal(format!(
                "rotation stopped in non-terminal state {}",
                other.name()
            ))),
        }
    }
}
