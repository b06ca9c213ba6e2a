//! Polymorphic rule targets
//!
//! Exactly one target terminates every rule. Each variant owns its own
//! command-line segment, its table-validity check, and the logic to
//! reconstruct itself from the option/value token pair seen while parsing a
//! listing. The `type` tag is preserved in the interchange format so decoders
//! can dispatch on the variant.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::error::{Error, Result};
use crate::core::rule::Rule;
use crate::core::types::Table;

/// Built-in terminating actions understood by every chain.
pub const TARGET_ACCEPT: &str = "ACCEPT";
pub const TARGET_DROP: &str = "DROP";
pub const TARGET_QUEUE: &str = "QUEUE";
pub const TARGET_RETURN: &str = "RETURN";

/// Jump to a built-in action or user-defined chain
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TargetJump {
    pub value: String,
}

/// Continue in a user-defined chain without a return frame
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TargetGoto {
    pub value: String,
}

/// Destination NAT; rewrites the destination address
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TargetDnat {
    pub to_destination: String,
}

/// Source NAT; rewrites the source address
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TargetSnat {
    pub to_source: String,
}

/// Numeric DSCP mark
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TargetDscp {
    pub value: u8,
}

/// Named DSCP class (e.g. EF, AF11)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TargetDscpClass {
    pub class: String,
}

/// Packet mark bitmask
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TargetMark {
    pub value: u32,
}

/// Source NAT onto the outgoing interface address, with an optional port range
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TargetMasquerade {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_ports: Option<String>,
}

/// Reject the packet, optionally with a specific ICMP response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TargetReject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reject_with: Option<String>,
}

/// The terminating action of a rule once its criteria match
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Target {
    Jump(TargetJump),
    Goto(TargetGoto),
    Dnat(TargetDnat),
    Snat(TargetSnat),
    Dscp(TargetDscp),
    DscpClass(TargetDscpClass),
    Mark(TargetMark),
    Masquerade(TargetMasquerade),
    Reject(TargetReject),
}

/// Target variant discriminant, for filtering synchronized rule sets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Jump,
    Goto,
    Dnat,
    Snat,
    Dscp,
    DscpClass,
    Mark,
    Masquerade,
    Reject,
}

impl Target {
    /// The default target applied to rules built without an explicit one.
    pub fn jump_accept() -> Self {
        Target::Jump(TargetJump {
            value: TARGET_ACCEPT.to_string(),
        })
    }

    pub fn kind(&self) -> TargetKind {
        match self {
            Target::Jump(_) => TargetKind::Jump,
            Target::Goto(_) => TargetKind::Goto,
            Target::Dnat(_) => TargetKind::Dnat,
            Target::Snat(_) => TargetKind::Snat,
            Target::Dscp(_) => TargetKind::Dscp,
            Target::DscpClass(_) => TargetKind::DscpClass,
            Target::Mark(_) => TargetKind::Mark,
            Target::Masquerade(_) => TargetKind::Masquerade,
            Target::Reject(_) => TargetKind::Reject,
        }
    }

    /// Renders the target as its command-line segment.
    pub fn command_segment(&self) -> String {
        match self {
            Target::Jump(t) => format!("--jump {}", t.value),
            Target::Goto(t) => format!("--goto {}", t.value),
            Target::Dnat(t) => format!("--jump DNAT --to-destination {}", t.to_destination),
            Target::Snat(t) => format!("--jump SNAT --to-source {}", t.to_source),
            Target::Dscp(t) => format!("--jump DSCP --set-dscp {}", t.value),
            Target::DscpClass(t) => format!("--jump DSCP --set-dscp-class {}", t.class),
            Target::Mark(t) => format!("--jump MARK --set-mark {}", t.value),
            Target::Masquerade(t) => match &t.to_ports {
                Some(ports) => format!("--jump MASQUERADE --to-ports {ports}"),
                None => "--jump MASQUERADE".to_string(),
            },
            Target::Reject(t) => match &t.reject_with {
                Some(with) => format!("--jump REJECT --reject-with {with}"),
                None => "--jump REJECT".to_string(),
            },
        }
    }

    /// Checks whether applying this target to the owning rule's table would
    /// be rejected by the rule-management binary.
    pub fn validate(&self, rule: &Rule) -> Result<()> {
        match self {
            Target::Jump(_) | Target::Goto(_) | Target::Reject(_) => Ok(()),
            Target::Dscp(_) | Target::DscpClass(_) => {
                require_table(rule, Table::Mangle, "DSCP")
            }
            Target::Mark(_) => require_table(rule, Table::Mangle, "MARK"),
            Target::Dnat(_) => require_table(rule, Table::Nat, "DNAT"),
            Target::Snat(_) => require_table(rule, Table::Nat, "SNAT"),
            Target::Masquerade(_) => require_table(rule, Table::Nat, "MASQUERADE"),
        }
    }

    /// Reconstructs a DSCP-family target from the option/value pair following
    /// `-j DSCP` in a listing. Returns `None` when the pair is not
    /// understood, leaving the caller to fall back to a plain jump.
    pub(crate) fn parse_dscp(option: &str, value: &str) -> Option<Self> {
        match option.trim_start_matches('-') {
            "set-dscp" => match parse_u8_token(value) {
                Some(parsed) => Some(Target::Dscp(TargetDscp { value: parsed })),
                None => {
                    warn!(value, "unparseable DSCP value");
                    None
                }
            },
            "set-dscp-class" => Some(Target::DscpClass(TargetDscpClass {
                class: value.to_string(),
            })),
            other => {
                warn!(option = other, "unrecognized DSCP target option");
                None
            }
        }
    }

    /// Reconstructs a MARK target from `--set-mark`/`--set-xmark` tokens.
    /// Listing dumps print hex values, optionally with a `/mask` suffix.
    pub(crate) fn parse_mark(option: &str, value: &str) -> Option<Self> {
        match option.trim_start_matches('-') {
            "set-mark" | "set-xmark" => {
                let raw = value.split('/').next().unwrap_or(value);
                match parse_u32_token(raw) {
                    Some(parsed) => Some(Target::Mark(TargetMark { value: parsed })),
                    None => {
                        warn!(value, "unparseable mark value");
                        None
                    }
                }
            }
            other => {
                warn!(option = other, "unrecognized MARK target option");
                None
            }
        }
    }
}

fn require_table(rule: &Rule, table: Table, target: &str) -> Result<()> {
    if rule.table == table {
        Ok(())
    } else {
        Err(Error::validation(
            "target",
            format!("target {target} is only valid on the '{table}' table"),
        ))
    }
}

fn parse_u8_token(token: &str) -> Option<u8> {
    match token.strip_prefix("0x") {
        Some(hex) => u8::from_str_radix(hex, 16).ok(),
        None => token.parse().ok(),
    }
}

fn parse_u32_token(token: &str) -> Option<u32> {
    match token.strip_prefix("0x") {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => token.parse().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mangle_rule() -> Rule {
        let mut rule = Rule::new("t");
        rule.table = Table::Mangle;
        rule
    }

    #[test]
    fn test_jump_segment() {
        assert_eq!(Target::jump_accept().command_segment(), "--jump ACCEPT");
    }

    #[test]
    fn test_dscp_segment() {
        let target = Target::Dscp(TargetDscp { value: 10 });
        assert_eq!(target.command_segment(), "--jump DSCP --set-dscp 10");
    }

    #[test]
    fn test_dscp_requires_mangle() {
        let target = Target::Dscp(TargetDscp { value: 10 });
        assert!(target.validate(&mangle_rule()).is_ok());

        let filter_rule = Rule::new("t");
        let err = target.validate(&filter_rule).unwrap_err();
        assert!(err.to_string().contains("mangle"));
    }

    #[test]
    fn test_masquerade_optional_ports() {
        let bare = Target::Masquerade(TargetMasquerade { to_ports: None });
        assert_eq!(bare.command_segment(), "--jump MASQUERADE");

        let ranged = Target::Masquerade(TargetMasquerade {
            to_ports: Some("1024-2048".to_string()),
        });
        assert_eq!(
            ranged.command_segment(),
            "--jump MASQUERADE --to-ports 1024-2048"
        );
    }

    #[test]
    fn test_parse_dscp_hex_value() {
        let target = Target::parse_dscp("--set-dscp", "0x0a").unwrap();
        assert_eq!(target, Target::Dscp(TargetDscp { value: 10 }));
    }

    #[test]
    fn test_parse_mark_strips_mask() {
        let target = Target::parse_mark("--set-xmark", "0x123/0xffffffff").unwrap();
        assert_eq!(target, Target::Mark(TargetMark { value: 0x123 }));
    }

    #[test]
    fn test_target_serde_keeps_type_tag() {
        let target = Target::Snat(TargetSnat {
            to_source: "10.0.0.1".to_string(),
        });
        let json = serde_json::to_value(&target).unwrap();
        assert_eq!(json["type"], "snat");
        assert_eq!(json["value"]["to_source"], "10.0.0.1");
        let back: Target = serde_json::from_value(json).unwrap();
        assert_eq!(back, target);
    }
}
