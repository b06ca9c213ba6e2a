//! External collaborator surface
//!
//! The core model never talks to the system directly; everything that
//! touches the packet filter flows through [`Executor`]: running a command
//! line and capturing its output, resolving the rule-management binary for
//! an IP version, and answering privilege and vocabulary queries. Production
//! code uses [`SystemExecutor`]; tests substitute a mock.

use std::path::PathBuf;
use std::process::Command;

use strum::IntoEnumIterator;
use tracing::debug;

use crate::core::error::{Error, Result};
use crate::core::types::{IpVersion, Table};

/// Abstraction over the rule-management binary and its host system.
///
/// All methods are synchronous; an operation blocks until the underlying
/// command completes or fails. Timeout policy, if any, belongs to the
/// implementation.
pub trait Executor {
    /// Runs one command line and returns its captured standard output.
    fn execute(&self, command_line: &str) -> Result<String>;

    /// Resolves the path of the rule-management binary for an IP version.
    fn resolve_binary(&self, ip_version: IpVersion) -> Result<PathBuf>;

    /// Whether this process may manipulate the packet filter.
    fn is_privileged(&self) -> bool;

    /// The tables visited during synchronization, in order.
    fn known_tables(&self) -> Vec<Table> {
        Table::iter().collect()
    }

    /// Whether a chain (or chain-valued target) is known for the table.
    fn is_valid_chain(&self, table: Table, name: &str) -> bool {
        table.builtin_chains().contains(&name)
    }
}

/// [`Executor`] backed by the local system: binaries discovered on PATH,
/// commands run synchronously, privilege derived from the effective uid.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemExecutor;

impl SystemExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl Executor for SystemExecutor {
    fn execute(&self, command_line: &str) -> Result<String> {
        let argv = split_quoted(command_line);
        let Some((program, args)) = argv.split_first() else {
            return Err(Error::Execution {
                command: command_line.to_string(),
                stderr: None,
                exit_code: None,
            });
        };

        debug!(command = command_line, "executing");
        let output = Command::new(program).args(args).output()?;
        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            Err(Error::Execution {
                command: command_line.to_string(),
                stderr: Some(String::from_utf8_lossy(&output.stderr).into_owned()),
                exit_code: output.status.code(),
            })
        }
    }

    fn resolve_binary(&self, ip_version: IpVersion) -> Result<PathBuf> {
        let name = match ip_version {
            IpVersion::Ipv4 => "iptables",
            IpVersion::Ipv6 => "ip6tables",
        };
        find_in_path(name).ok_or(Error::PathResolution { ip_version })
    }

    fn is_privileged(&self) -> bool {
        nix::unistd::geteuid().is_root()
    }
}

/// Searches PATH for a binary and returns its full path.
fn find_in_path(name: &str) -> Option<PathBuf> {
    std::env::var_os("PATH").and_then(|paths| {
        std::env::split_paths(&paths).find_map(|dir| {
            let full_path = dir.join(name);
            if full_path.is_file() { Some(full_path) } else { None }
        })
    })
}

/// Splits a command line into argv entries, honoring double and single
/// quotes so quoted comment values survive as a single argument.
fn split_quoted(line: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for ch in line.chars() {
        match ch {
            '"' | '\'' => match quote {
                Some(open) if open == ch => quote = None,
                Some(_) => current.push(ch),
                None => quote = Some(ch),
            },
            c if c.is_whitespace() && quote.is_none() => {
                if !current.is_empty() {
                    args.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        args.push(current);
    }
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_plain_tokens() {
        assert_eq!(
            split_quoted("iptables -t filter -S"),
            vec!["iptables", "-t", "filter", "-S"]
        );
    }

    #[test]
    fn test_split_preserves_quoted_comment() {
        let argv = split_quoted("-m comment --comment \"id:abc def\" -j ACCEPT");
        assert_eq!(
            argv,
            vec!["-m", "comment", "--comment", "id:abc def", "-j", "ACCEPT"]
        );
    }

    #[test]
    fn test_split_mixed_quote_styles() {
        let argv = split_quoted("a 'b c' \"d 'e'\"");
        assert_eq!(argv, vec!["a", "b c", "d 'e'"]);
    }

    #[test]
    fn test_find_in_path() {
        // sh should exist on all Unix systems
        assert!(find_in_path("sh").is_some());
        assert!(find_in_path("iptrules_nonexistent_binary_xyz").is_none());
    }

    #[test]
    fn test_default_chain_vocabulary() {
        let exec = SystemExecutor::new();
        assert_eq!(exec.known_tables().len(), 5);
        assert!(exec.is_valid_chain(Table::Filter, "FORWARD"));
        assert!(!exec.is_valid_chain(Table::Filter, "WANEM-UL"));
    }
}
