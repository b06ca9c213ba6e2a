//! Input validation for rule criteria
//!
//! Centralized checks applied before a rule is serialized, so obviously
//! malformed criteria fail locally with a named field instead of surfacing
//! as an opaque error from the rule-management binary.

use std::str::FromStr;

use ipnetwork::IpNetwork;

/// A multiport match accepts at most 15 port slots; a range occupies two.
const MAX_MULTIPORT_SLOTS: u32 = 15;

/// Validates a source or destination criterion: an IP address or network in
/// CIDR notation, IPv4 or IPv6.
///
/// # Errors
///
/// Returns `Err` with a human-readable message when the input is not a valid
/// address or network.
pub fn validate_address(input: &str) -> Result<(), String> {
    if input.is_empty() {
        return Err("address is empty".to_string());
    }
    IpNetwork::from_str(input)
        .map(|_| ())
        .map_err(|err| format!("invalid address or network '{input}': {err}"))
}

/// Validates a network interface name.
///
/// Linux kernel interface name rules:
/// - Max 15 characters (IFNAMSIZ - 1)
/// - Alphanumeric, dot, dash, underscore, plus (iptables wildcard) only
/// - Cannot be "." or ".."
///
/// # Errors
///
/// Returns `Err` if the name violates kernel constraints.
pub fn validate_interface(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("interface name is empty".to_string());
    }
    if name.len() > 15 {
        return Err("interface name too long (max 15 characters)".to_string());
    }
    if name == "." || name == ".." {
        return Err("invalid interface name".to_string());
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | '+'))
    {
        return Err("interface name contains invalid characters".to_string());
    }
    Ok(())
}

/// Validates a multiport port specification: comma-separated ports and
/// `start:end` ranges, e.g. `22`, `80,443`, `6000:6010,7000`.
///
/// # Errors
///
/// Returns `Err` if any entry is not a port, a range is inverted, or the
/// specification exceeds the multiport slot limit.
pub fn validate_port_spec(spec: &str) -> Result<(), String> {
    if spec.is_empty() {
        return Err("port specification is empty".to_string());
    }

    let mut slots = 0u32;
    for entry in spec.split(',') {
        match entry.split_once(':') {
            Some((start, end)) => {
                let start = parse_port(start)?;
                let end = parse_port(end)?;
                if start > end {
                    return Err(format!("port range '{entry}' is inverted"));
                }
                slots += 2;
            }
            None => {
                parse_port(entry)?;
                slots += 1;
            }
        }
    }

    if slots > MAX_MULTIPORT_SLOTS {
        return Err(format!(
            "too many ports for a multiport match (max {MAX_MULTIPORT_SLOTS} slots)"
        ));
    }
    Ok(())
}

fn parse_port(input: &str) -> Result<u16, String> {
    let port: u16 = input
        .parse()
        .map_err(|_| format!("invalid port '{input}'"))?;
    if port == 0 {
        return Err("port must be between 1 and 65535".to_string());
    }
    Ok(port)
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_validate_port_spec_single_ports(port in any::<u16>()) {
            let result = validate_port_spec(&port.to_string());
            if port == 0 {
                prop_assert!(result.is_err());
            } else {
                prop_assert!(result.is_ok());
            }
        }

        #[test]
        fn test_validate_port_spec_range_consistency(
            start in 1u16..=65535,
            end in 1u16..=65535
        ) {
            let result = validate_port_spec(&format!("{start}:{end}"));
            if start <= end {
                prop_assert!(result.is_ok());
            } else {
                prop_assert!(result.is_err());
            }
        }

        #[test]
        fn test_validate_interface_length_constraint(name in "[a-zA-Z0-9._-]{1,20}") {
            let result = validate_interface(&name);
            if name.len() <= 15 && name != "." && name != ".." {
                prop_assert!(result.is_ok());
            } else if name.len() > 15 {
                prop_assert!(result.is_err());
            }
        }

        #[test]
        fn test_validate_address_never_panics(input in "\\PC{0,40}") {
            let _ = validate_address(&input);
        }
    }
}
