//! Shared types and helpers for the MedHelp contract suite.
//!
//! This crate provides:
//! - [`Role`] — the role claim stored by the registry and checked by every
//!   other contract's authorization gate.
//! - Input validators for names, emails, content identifiers, and free-text
//!   fields ([`validation`]).
//! - Persistent-storage TTL helpers ([`ttl`]).

#![cfg_attr(not(feature = "std"), no_std)]

use soroban_sdk::contracttype;

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod ttl;
pub mod validation;

// ── Roles ────────────────────────────────────────────────────────────────────

/// Role claim attached to a registered identity.
///
/// Roles are mutually exclusive: an address holds exactly one role, assigned
/// by the registry at registration (or by admin approval for doctors).
#[contracttype]
#[derive(Clone, Debug, Copy, Eq, PartialEq)]
pub enum Role {
    Admin,
    Doctor,
    Patient,
}
