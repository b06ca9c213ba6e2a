use thiserror::Error;

use crate::core::types::IpVersion;

/// Core error types for rule operations
#[derive(Debug, Error)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A rule field or target/table combination failed validation
    #[error("validation error in {field}: {message}")]
    Validation { field: String, message: String },

    /// The caller lacks the privileges needed to manage the packet filter
    #[error("this operation requires root privileges to manage ip(6)tables")]
    Privilege,

    /// No rule-management binary could be resolved for the IP version
    #[error("no rule-management binary found for {ip_version}")]
    PathResolution { ip_version: IpVersion },

    /// The rule-management binary reported failure
    #[error("command failed: {command}")]
    Execution {
        command: String,
        stderr: Option<String>,
        exit_code: Option<i32>,
    },

    /// A rule listing referenced a table this model does not know
    #[error("unrecognized table name: {0}")]
    UnknownTable(String),
}

impl Error {
    /// Shorthand for a [`Error::Validation`] with the given field and message.
    pub(crate) fn validation(field: &str, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_names_field() {
        let err = Error::validation("id", "a rule with the id r1 already exists");
        assert_eq!(
            err.to_string(),
            "validation error in id: a rule with the id r1 already exists"
        );
    }

    #[test]
    fn test_path_resolution_names_ip_version() {
        let err = Error::PathResolution {
            ip_version: IpVersion::Ipv6,
        };
        assert!(err.to_string().contains("ipv6"));
    }

    #[test]
    fn test_execution_carries_command() {
        let err = Error::Execution {
            command: "/sbin/iptables -t filter -S".to_string(),
            stderr: Some("iptables: Permission denied".to_string()),
            exit_code: Some(4),
        };
        assert!(err.to_string().contains("/sbin/iptables"));
    }
}
