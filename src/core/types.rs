//! Enumerated vocabulary shared across the rule model
//!
//! Tables and IP versions are closed sets; chains and protocols are open
//! (user-defined chains and uncommon protocols appear in listing output), so
//! those enums carry a catch-all variant that preserves the original token.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

// List of built-in chains taken from: man 8 iptables
const BUILTIN_CHAINS_FILTER: &[&str] = &["INPUT", "FORWARD", "OUTPUT"];
const BUILTIN_CHAINS_MANGLE: &[&str] = &["PREROUTING", "INPUT", "FORWARD", "OUTPUT", "POSTROUTING"];
const BUILTIN_CHAINS_NAT: &[&str] = &["PREROUTING", "INPUT", "OUTPUT", "POSTROUTING"];
const BUILTIN_CHAINS_RAW: &[&str] = &["PREROUTING", "OUTPUT"];
const BUILTIN_CHAINS_SECURITY: &[&str] = &["INPUT", "FORWARD", "OUTPUT"];

/// A netfilter table: a named group of chains with a specific filtering purpose
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Hash,
    Default,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
pub enum Table {
    /// The default table, home of INPUT/FORWARD/OUTPUT packet filtering
    #[default]
    #[strum(serialize = "filter")]
    Filter,
    /// Network address translation
    #[strum(serialize = "nat")]
    Nat,
    /// Specialized packet alteration (DSCP, marks)
    #[strum(serialize = "mangle")]
    Mangle,
    /// Connection-tracking exemptions
    #[strum(serialize = "raw")]
    Raw,
    /// Mandatory access control rules
    #[strum(serialize = "security")]
    Security,
}

impl Table {
    /// Returns the chains built into this table, per `man 8 iptables`.
    pub const fn builtin_chains(self) -> &'static [&'static str] {
        match self {
            Table::Filter => BUILTIN_CHAINS_FILTER,
            Table::Mangle => BUILTIN_CHAINS_MANGLE,
            Table::Nat => BUILTIN_CHAINS_NAT,
            Table::Raw => BUILTIN_CHAINS_RAW,
            Table::Security => BUILTIN_CHAINS_SECURITY,
        }
    }
}

/// A chain within a table: builtin traversal points plus user-defined names
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, strum::Display, strum::EnumString)]
#[serde(from = "String", into = "String")]
pub enum Chain {
    #[strum(serialize = "INPUT")]
    Input,
    #[strum(serialize = "FORWARD")]
    Forward,
    #[strum(serialize = "OUTPUT")]
    Output,
    #[strum(serialize = "PREROUTING")]
    Prerouting,
    #[strum(serialize = "POSTROUTING")]
    Postrouting,
    /// A user-defined chain, kept verbatim
    #[strum(default)]
    Custom(String),
}

impl From<String> for Chain {
    fn from(value: String) -> Self {
        // The default variant makes FromStr infallible in practice
        Chain::from_str(&value).unwrap_or(Chain::Custom(value))
    }
}

impl From<Chain> for String {
    fn from(value: Chain) -> Self {
        value.to_string()
    }
}

/// A protocol criterion token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, strum::Display, strum::EnumString)]
#[serde(from = "String", into = "String")]
pub enum Protocol {
    #[strum(serialize = "all")]
    All,
    #[strum(serialize = "ip")]
    Ip,
    #[strum(serialize = "ipv6")]
    Ipv6,
    #[strum(serialize = "icmp")]
    Icmp,
    #[strum(serialize = "tcp")]
    Tcp,
    #[strum(serialize = "udp")]
    Udp,
    #[strum(serialize = "sctp")]
    Sctp,
    /// Any other `/etc/protocols` name or number, kept verbatim
    #[strum(default)]
    Other(String),
}

impl From<String> for Protocol {
    fn from(value: String) -> Self {
        Protocol::from_str(&value).unwrap_or(Protocol::Other(value))
    }
}

impl From<Protocol> for String {
    fn from(value: Protocol) -> Self {
        value.to_string()
    }
}

/// IP protocol version, selecting which rule-management binary applies
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Hash,
    Default,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum IpVersion {
    #[default]
    #[strum(serialize = "ipv4")]
    Ipv4,
    #[strum(serialize = "ipv6")]
    Ipv6,
}

impl IpVersion {
    /// True for the default version (IPv4); used to omit the field from
    /// serialized rules.
    pub(crate) fn is_default(&self) -> bool {
        matches!(self, IpVersion::Ipv4)
    }
}

/// The pending command kind for a rule's next execution
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display, strum::EnumString, strum::AsRefStr,
)]
pub enum RuleCommand {
    #[default]
    #[strum(serialize = "append")]
    Append,
    #[strum(serialize = "insert")]
    Insert,
    #[strum(serialize = "replace")]
    Replace,
    #[strum(serialize = "delete")]
    Delete,
}

/// Renders a criterion's negation marker: a `! ` prefix placed immediately
/// before the affected flag, or nothing.
pub(crate) fn negation_prefix(negated: bool) -> &'static str {
    if negated { "! " } else { "" }
}
