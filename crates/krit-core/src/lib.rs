//! # krit-core
//!
//! Core types for bidder criteria audits.
//!
//! This crate provides the foundational types shared across all krit crates:
//! - Entity structs for source criteria, audit events, entries and documents
//! - Event kinds and the derived lifecycle state
//! - The append primitive with its dedupe rule
//! - State derivation from an entry's event log
//! - Name validation and cross-cutting error types
//! - Service/CLI response types

pub mod derive;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod names;
pub mod responses;
