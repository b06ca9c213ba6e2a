//! Core rule model and conversion logic
//!
//! This module contains the types and logic for representing iptables rules
//! and converting them to and from the rule-management binary's syntax:
//!
//! - [`types`]: Enumerated vocabulary (tables, chains, protocols, IP versions)
//! - [`target`]: Polymorphic rule targets (jump, NAT, DSCP, mark, ...)
//! - [`matches`]: Match extensions and comment-embedded markers
//! - [`rule`]: The rule aggregate, serializer, parser, and lifecycle operations
//! - [`sync`]: Rule-set synchronization from live listings
//! - [`error`]: Error types for rule operations

pub mod error;
pub mod matches;
pub mod rule;
pub mod sync;
pub mod target;
pub mod types;

#[cfg(test)]
pub mod test_helpers;
