//! Shared test utilities for core module tests
//!
//! Provides an [`Executor`] test double and rule builders so the suites do
//! not depend on a live iptables installation or root privileges. This
//! module is only compiled in test mode.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::core::error::{Error, Result};
use crate::core::rule::Rule;
use crate::core::types::{Chain, IpVersion, Table};
use crate::exec::Executor;

/// Executor test double with canned listings per (IP version, table), a
/// command log, and switchable privilege and failure behavior.
///
/// Listing queries (`-S`, `-vnL`) always succeed so lifecycle tests can
/// exercise apply-time failures in isolation: `fail_execution` only fails
/// the non-listing commands.
pub struct MockExecutor {
    pub privileged: bool,
    pub fail_execution: bool,
    pub listings: HashMap<(IpVersion, Table), String>,
    pub numbered_listing: String,
    pub executed: RefCell<Vec<String>>,
}

impl MockExecutor {
    pub fn new() -> Self {
        Self {
            privileged: true,
            fail_execution: false,
            listings: HashMap::new(),
            numbered_listing: String::new(),
            executed: RefCell::new(Vec::new()),
        }
    }

    pub fn with_listing(mut self, ip_version: IpVersion, table: Table, listing: &str) -> Self {
        self.listings
            .insert((ip_version, table), listing.to_string());
        self
    }

    /// The commands executed so far, in order.
    pub fn commands(&self) -> Vec<String> {
        self.executed.borrow().clone()
    }

    fn table_of(command_line: &str) -> Table {
        let mut parts = command_line.split_whitespace();
        while let Some(token) = parts.next() {
            if token == "-t" {
                if let Some(name) = parts.next() {
                    return name.parse().unwrap_or_default();
                }
            }
        }
        Table::default()
    }
}

impl Executor for MockExecutor {
    fn execute(&self, command_line: &str) -> Result<String> {
        self.executed.borrow_mut().push(command_line.to_string());

        if command_line.contains("-vnL") {
            return Ok(self.numbered_listing.clone());
        }
        if command_line.ends_with(" -S") {
            let ip_version = if command_line.contains("ip6tables") {
                IpVersion::Ipv6
            } else {
                IpVersion::Ipv4
            };
            let table = Self::table_of(command_line);
            return Ok(self
                .listings
                .get(&(ip_version, table))
                .cloned()
                .unwrap_or_default());
        }

        if self.fail_execution {
            return Err(Error::Execution {
                command: command_line.to_string(),
                stderr: Some("mock execution failure".to_string()),
                exit_code: Some(1),
            });
        }
        Ok(String::new())
    }

    fn resolve_binary(&self, ip_version: IpVersion) -> Result<PathBuf> {
        Ok(PathBuf::from(match ip_version {
            IpVersion::Ipv4 => "/sbin/iptables",
            IpVersion::Ipv6 => "/sbin/ip6tables",
        }))
    }

    fn is_privileged(&self) -> bool {
        self.privileged
    }
}

/// Creates a basic filter/FORWARD rule with the given id.
pub fn forward_rule(id: &str) -> Rule {
    let mut rule = Rule::new(id);
    rule.table = Table::Filter;
    rule.chain = Some(Chain::Forward);
    rule
}
