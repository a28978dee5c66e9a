//! # Identifier Synthesizer
//!
//! Resource identifiers do not exist in the IR; they are derived here from
//! API names and relationship ids only. No randomness, clock, or counter is
//! involved, so a rid is stable for as long as the names it is built from.
//!
//! | Element                  | Rid                                   |
//! |--------------------------|---------------------------------------|
//! | object type              | `ri.<object>`                         |
//! | property                 | `ri.<object>.<property>`              |
//! | link type (both views)   | `ri.<one side>.<link id>.<many side>` |
//! | action type              | `ri.action.<action>`                  |
//! | shared property type     | `ri.spt.<spt>`                        |
//! | interface type           | `ri.interface.<interface>`            |
//! | interface property       | `ri.interface.<interface>.<spt>`      |
//! | interface link           | `ri.interfacelink.<target>.<link>`    |
//! | struct field             | `ri.struct.<fingerprint>.<field>`     |
//!
//! Uniqueness is not guaranteed by construction. [`RidRegistry`] records
//! every rid handed out during one resolution and rejects a second claim.

use std::collections::BTreeMap;

use omr_core::{sha256_hex, CanonicalBytes, CanonicalizationError};
use serde::Serialize;

use crate::error::{Owner, ResolveError, ResolveResult};

/// Hex characters of the struct fingerprint kept in struct field rids.
pub const STRUCT_FINGERPRINT_LEN: usize = 10;

pub fn object_type_rid(object: &str) -> String {
    format!("ri.{object}")
}

pub fn property_rid(object: &str, property: &str) -> String {
    format!("ri.{object}.{property}")
}

/// Shared by the one-side and many-side views of a relationship.
pub fn link_type_rid(one_side: &str, link_id: &str, many_side: &str) -> String {
    format!("ri.{one_side}.{link_id}.{many_side}")
}

pub fn action_type_rid(action: &str) -> String {
    format!("ri.action.{action}")
}

pub fn shared_property_type_rid(spt: &str) -> String {
    format!("ri.spt.{spt}")
}

pub fn interface_type_rid(interface: &str) -> String {
    format!("ri.interface.{interface}")
}

pub fn interface_property_rid(interface: &str, spt: &str) -> String {
    format!("ri.interface.{interface}.{spt}")
}

pub fn interface_link_rid(target: &str, link: &str) -> String {
    format!("ri.interfacelink.{target}.{link}")
}

/// `ri.struct.<fingerprint>`: the first [`STRUCT_FINGERPRINT_LEN`] hex
/// characters of the SHA-256 of the canonical field list.
pub fn struct_rid_base(fields: &impl Serialize) -> Result<String, CanonicalizationError> {
    let bytes = CanonicalBytes::new(fields)?;
    let hex = sha256_hex(&bytes);
    Ok(format!("ri.struct.{}", &hex[..STRUCT_FINGERPRINT_LEN]))
}

pub fn struct_field_rid(base: &str, field: &str) -> String {
    format!("{base}.{field}")
}

/// Per-call record of synthesized rids and who claimed them.
#[derive(Debug, Default)]
pub struct RidRegistry {
    claimed: BTreeMap<String, Owner>,
}

impl RidRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `rid` as belonging to `owner`.
    ///
    /// # Errors
    ///
    /// [`ResolveError::DuplicateRid`] if the rid was already claimed.
    pub fn claim(&mut self, rid: &str, owner: &Owner) -> ResolveResult<()> {
        if let Some(first) = self.claimed.get(rid) {
            return Err(ResolveError::DuplicateRid {
                rid: rid.to_string(),
                first: first.clone(),
                second: owner.clone(),
            });
        }
        self.claimed.insert(rid.to_string(), owner.clone());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.claimed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claimed.is_empty()
    }
}
