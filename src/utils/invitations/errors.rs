use crate::app_errors::{error_response, ErrorKind, ErrorKindExt};
use crate::stores::StoreError;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InvitationError {
    #[error("invitation not found")]
    NotFound,
    #[error("event not found")]
    EventNotFound,
    #[error("inviter not found")]
    InviterNotFound,
    #[error("invitee not found")]
    InviteeNotFound,
    #[error("only event creator can send invitations")]
    NotEventCreator,
    #[error("access denied: you can only respond to your own invitations")]
    NotInvitee,
    #[error("access denied: you can only cancel your own invitations")]
    NotInviter,
    #[error("invitation already sent to this user")]
    AlreadySent,
    #[error("cannot invite yourself")]
    SelfInvite,
    #[error("invitation has already been responded to")]
    AlreadyResponded,
    #[error("cannot cancel invitation that has already been responded to")]
    NotCancellable,
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl ErrorKindExt for InvitationError {
    fn kind(&self) -> ErrorKind {
        match self {
            InvitationError::NotFound
            | InvitationError::EventNotFound
            | InvitationError::InviterNotFound
            | InvitationError::InviteeNotFound => ErrorKind::NotFound,
            InvitationError::NotEventCreator
            | InvitationError::NotInvitee
            | InvitationError::NotInviter => ErrorKind::Forbidden,
            InvitationError::AlreadySent => ErrorKind::Conflict,
            InvitationError::SelfInvite => ErrorKind::InvalidArgument,
            InvitationError::AlreadyResponded | InvitationError::NotCancellable => {
                ErrorKind::FailedPrecondition
            }
            InvitationError::Unexpected(_) => ErrorKind::Internal,
        }
    }
}

impl IntoResponse for InvitationError {
    fn into_response(self) -> Response {
        error_response(self)
    }
}

impl From<StoreError> for InvitationError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::UniqueViolation => Self::AlreadySent,
            StoreError::Unexpected(e) => Self::Unexpected(e),
        }
    }
}
