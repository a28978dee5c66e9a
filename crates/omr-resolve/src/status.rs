//! # Status Projector
//!
//! Two projections for two call sites. Object, link, and action types get
//! the simplified [`ReleaseStatus`] label; properties keep the full tagged
//! form so that per-property deprecation detail survives resolution.

use omr_core::ir::IrStatus;
use omr_core::metadata::{ReleaseStatus, TaggedStatus};

use crate::error::StatusError;

/// Map an IR status onto `ACTIVE | EXPERIMENTAL | DEPRECATED`.
///
/// # Errors
///
/// `endorsed` and `example` have no label and fail with
/// [`StatusError::NoMapping`]; unknown tags fail with
/// [`StatusError::Unrecognized`].
pub fn project_release_status(status: &IrStatus) -> Result<ReleaseStatus, StatusError> {
    match status {
        IrStatus::Active => Ok(ReleaseStatus::Active),
        IrStatus::Experimental => Ok(ReleaseStatus::Experimental),
        IrStatus::Deprecated(_) => Ok(ReleaseStatus::Deprecated),
        IrStatus::Endorsed | IrStatus::Example => Err(StatusError::NoMapping {
            tag: status.tag().to_string(),
        }),
        IrStatus::Unrecognized(tag) => Err(StatusError::Unrecognized { tag: tag.clone() }),
    }
}

/// Identity passthrough of the IR status. Never fails.
pub fn project_tagged_status(status: &IrStatus) -> TaggedStatus {
    let deprecation = match status {
        IrStatus::Deprecated(detail) => Some(detail.clone()),
        _ => None,
    };
    TaggedStatus {
        kind: status.tag().to_string(),
        deprecation,
    }
}
