//! Rule-set synchronization
//!
//! Rebuilds the structured rule population from live listings: for every IP
//! version and table, the current rules are dumped in parseable form, parsed
//! line by line, and numbered 1-based per chain in listing order. The
//! labeling pass retrofits generated ids onto rules that were created
//! outside this model.

use std::collections::HashMap;

use strum::IntoEnumIterator;
use tracing::{info, warn};
use uuid::Uuid;

use crate::core::error::{Error, Result};
use crate::core::rule::Rule;
use crate::core::target::TargetKind;
use crate::core::types::IpVersion;
use crate::exec::Executor;

/// Queries the full rule population for both IP versions and every known
/// table. Each rule is tagged with its IP version and its 1-based position
/// within its chain; the per-chain counters reset for every table and IP
/// version pass.
pub fn sync<E: Executor + ?Sized>(exec: &E) -> Result<Vec<Rule>> {
    if !exec.is_privileged() {
        return Err(Error::Privilege);
    }

    let mut rules = Vec::new();
    for ip_version in IpVersion::iter() {
        let binary = exec.resolve_binary(ip_version)?;
        for table in exec.known_tables() {
            let listing = exec.execute(&format!("{} -t {table} -S", binary.display()))?;
            let mut chain_counts: HashMap<String, u32> = HashMap::new();
            for line in listing.lines() {
                if line.starts_with("-A") || line.starts_with("-I") {
                    let mut rule = Rule::parse(table.as_ref(), line)?;
                    rule.ip_version = ip_version;
                    let chain = rule
                        .chain
                        .as_ref()
                        .map(ToString::to_string)
                        .unwrap_or_default();
                    let count = chain_counts.entry(chain).or_insert(0);
                    *count += 1;
                    rule.number = *count;
                    rules.push(rule);
                }
            }
        }
    }
    Ok(rules)
}

/// The currently-known rule population; alias for [`sync`].
pub fn current_rules<E: Executor + ?Sized>(exec: &E) -> Result<Vec<Rule>> {
    sync(exec)
}

/// Looks up a rule by its embedded id.
pub fn find_by_id<'a>(rules: &'a [Rule], id: &str) -> Option<&'a Rule> {
    rules.iter().find(|rule| rule.id == id)
}

/// Filters rules by their target variant.
pub fn rules_with_target(rules: &[Rule], kind: TargetKind) -> Vec<&Rule> {
    rules
        .iter()
        .filter(|rule| rule.target.as_ref().is_some_and(|t| t.kind() == kind))
        .collect()
}

/// Assigns a freshly generated id to every synchronized rule missing one and
/// re-applies it in place via replace. Per-rule failures are logged and the
/// pass continues.
pub fn label_rules<E: Executor + ?Sized>(exec: &E) -> Result<()> {
    let rules = sync(exec)?;
    for mut rule in rules {
        if rule.id.is_empty() {
            rule.id = Uuid::new_v4().to_string();
            info!(id = %rule.id, number = rule.number, "labeling rule");
            if let Err(err) = rule.replace(exec) {
                warn!(error = %err, "failed to set id on rule");
            }
        }
    }
    Ok(())
}

/// Deletes every synchronized rule tagged with an `app:<name>` marker.
pub fn delete_all_matching_app<E: Executor + ?Sized>(exec: &E, app: &str) -> Result<()> {
    let rules = sync(exec)?;
    for mut rule in rules {
        if rule
            .markers
            .iter()
            .any(|marker| marker.name == "app" && marker.value == app)
        {
            if let Err(err) = rule.delete(exec) {
                warn!(error = %err, app, "failed to delete rule for app");
            }
        }
    }
    Ok(())
}
