//! # omr-resolve: Schema Resolution Compiler
//!
//! Turns a compact ontology IR document into fully normalized, bidirectional,
//! client-facing metadata. The work is compiler-shaped: cross-reference
//! resolution, deterministic rid synthesis, type-table projection, and
//! structural validation.
//!
//! ## Components
//!
//! | Module           | Role                                                   |
//! |------------------|--------------------------------------------------------|
//! | [`status`]       | Lifecycle status → simplified label or tagged form     |
//! | [`rid`]          | Deterministic rid synthesis and collision detection    |
//! | [`types`]        | Property-side and parameter-side type tables           |
//! | [`link`]         | One relationship declaration → two per-entity views    |
//! | [`primary_key`]  | Single-property primary key flattening                 |
//! | [`action`]       | Operations summary and parameter projection            |
//! | [`interface`]    | Shared property types and interface inheritance        |
//! | [`object`]       | Object type projection                                 |
//! | [`assemble`]     | [`resolve_ontology`], the entry point                  |
//!
//! ## Crate Policy
//!
//! - Pure and synchronous: no I/O, no global state, no caches.
//! - Fail fast: the first violation aborts resolution; no partial output.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod action;
pub mod assemble;
pub mod catalog;
pub mod error;
pub mod interface;
pub mod link;
pub mod object;
pub mod options;
pub mod primary_key;
pub mod rid;
pub mod status;
pub mod types;

#[cfg(test)]
mod fixtures;

pub use assemble::resolve_ontology;
pub use error::{
    LinkError, Owner, PrimaryKeyError, ResolveError, ResolveResult, StatusError, TypeError,
};
pub use options::{PluralDisplayNames, ResolveOptions};
