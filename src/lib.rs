//! iptrules - structured iptables rule management
//!
//! Models packet-filtering rules for iptables/ip6tables as structured data
//! and converts them bidirectionally between that model and the textual
//! invocation syntax of the rule-management binary.
//!
//! # Architecture
//!
//! - [`core`] - Rule model, command-line serializer, listing parser, and
//!   rule-set synchronization
//! - [`exec`] - The external collaborator surface: command execution,
//!   binary-path resolution, and privilege detection
//! - [`validators`] - Input validation for rule criteria
//!
//! # Example
//!
//! ```no_run
//! use iptrules::{Chain, Rule, SystemExecutor, Table};
//!
//! # fn main() -> iptrules::Result<()> {
//! let exec = SystemExecutor::new();
//! let mut rule = Rule::new("allow-dns");
//! rule.table = Table::Filter;
//! rule.chain = Some(Chain::Input);
//! rule.protocol = Some("udp".to_string().into());
//! rule.destination_port = Some("53".to_string());
//! rule.append(&exec)?;
//! # Ok(())
//! # }
//! ```

// Allow pedantic clippy warnings that are not worth fixing for this codebase
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_errors_doc)]

pub mod core;
pub mod exec;
pub mod validators;

// Re-export commonly used types
pub use self::core::error::{Error, Result};
pub use self::core::matches::{Marker, Match, MatchComment, MatchGeneric};
pub use self::core::rule::Rule;
pub use self::core::sync;
pub use self::core::target::{
    Target, TargetDnat, TargetDscp, TargetDscpClass, TargetGoto, TargetJump, TargetKind,
    TargetMark, TargetMasquerade, TargetReject, TargetSnat,
};
pub use self::core::types::{Chain, IpVersion, Protocol, RuleCommand, Table};
pub use self::exec::{Executor, SystemExecutor};
