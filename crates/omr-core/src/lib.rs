//! # omr-core: Document Models for the Ontology Metadata Resolver
//!
//! Defines the two documents the resolver sits between: the author-facing
//! ontology IR ([`ir`]) and the resolved, client-facing metadata
//! ([`metadata`]). It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Closed sums for IR unions.** Statuses, storage types, parameter types,
//!    link definitions, and logic rules decode into exhaustive enums through
//!    [`union::RawUnion`]. Unknown tags become `Unrecognized(tag)` so the
//!    resolver can report them against the element that carried them.
//!
//! 2. **Output-only resolved types.** Everything in [`metadata`] is
//!    `Serialize`; nothing reads resolved documents back.
//!
//! 3. **`CanonicalBytes` for every digest.** Document fingerprints and struct
//!    rid prefixes are computed over JCS bytes, never over raw
//!    `serde_json::to_vec()` output.
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod digest;
pub mod error;
pub mod ir;
pub mod metadata;
pub mod union;

pub use canonical::CanonicalBytes;
pub use digest::{sha256_digest, sha256_hex, ContentDigest, DigestAlgorithm};
pub use error::{CanonicalizationError, CoreError};
pub use ir::OntologyIr;
pub use metadata::{OntologyHeader, ResolvedOntology};
pub use union::RawUnion;
