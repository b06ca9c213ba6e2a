//! Integration tests for iptrules
//!
//! These tests drive the public API end to end: building rules, applying
//! them through a scripted executor, synchronizing a rule population back
//! out of listing text, and the labeling pass. No live iptables installation
//! or root privileges are required; the executor is a test double.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Once;

use iptrules::{
    sync, Chain, Error, Executor, IpVersion, Marker, Result, Rule, Table, Target, TargetDscp,
    TargetKind,
};

static TRACING_INIT: Once = Once::new();

/// Routes parser diagnostics to the test output when run with
/// `--nocapture`.
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

/// Scripted executor: canned listings per (IP version, table) plus a command
/// log. Mirrors the narrow interface the core consumes.
#[derive(Default)]
struct ScriptedExecutor {
    listings: HashMap<(IpVersion, Table), String>,
    executed: RefCell<Vec<String>>,
    unprivileged: bool,
}

impl ScriptedExecutor {
    fn new() -> Self {
        Self::default()
    }

    fn with_listing(mut self, ip_version: IpVersion, table: Table, listing: &str) -> Self {
        self.listings
            .insert((ip_version, table), listing.to_string());
        self
    }

    fn commands(&self) -> Vec<String> {
        self.executed.borrow().clone()
    }
}

impl Executor for ScriptedExecutor {
    fn execute(&self, command_line: &str) -> Result<String> {
        self.executed.borrow_mut().push(command_line.to_string());
        if command_line.ends_with(" -S") {
            let ip_version = if command_line.contains("ip6tables") {
                IpVersion::Ipv6
            } else {
                IpVersion::Ipv4
            };
            let table = command_line
                .split_whitespace()
                .skip_while(|token| *token != "-t")
                .nth(1)
                .and_then(|name| name.parse().ok())
                .unwrap_or_default();
            return Ok(self
                .listings
                .get(&(ip_version, table))
                .cloned()
                .unwrap_or_default());
        }
        Ok(String::new())
    }

    fn resolve_binary(&self, ip_version: IpVersion) -> Result<PathBuf> {
        Ok(PathBuf::from(match ip_version {
            IpVersion::Ipv4 => "/usr/sbin/iptables",
            IpVersion::Ipv6 => "/usr/sbin/ip6tables",
        }))
    }

    fn is_privileged(&self) -> bool {
        !self.unprivileged
    }
}

#[test]
fn test_append_flow_issues_expected_command() {
    init_tracing();
    let exec = ScriptedExecutor::new();

    let mut rule = Rule::new("web-in");
    rule.set_name("allow-web");
    rule.chain = Some(Chain::Input);
    rule.protocol = Some("tcp".to_string().into());
    rule.destination_port = Some("80,443".to_string());
    rule.append(&exec).unwrap();

    assert!(rule.valid);
    assert!(rule.applied);

    let last = exec.commands().pop().unwrap();
    assert_eq!(
        last,
        "/usr/sbin/iptables -t filter --append INPUT --protocol tcp \
         --match multiport --dports 80,443 -m comment --comment id:web-in \
         -m comment --comment name:allow-web --jump ACCEPT"
    );
}

#[test]
fn test_insert_flow_places_index_after_chain() {
    init_tracing();
    let exec = ScriptedExecutor::new();

    let mut rule = Rule::new("early");
    rule.chain = Some(Chain::Forward);
    rule.source = Some("10.0.0.0/8".to_string());
    rule.insert(&exec, 1).unwrap();

    let last = exec.commands().pop().unwrap();
    assert!(last.contains("--insert FORWARD 1 --source 10.0.0.0/8"));
}

#[test]
fn test_unprivileged_flow_never_reaches_the_binary() {
    init_tracing();
    let mut exec = ScriptedExecutor::new();
    exec.unprivileged = true;

    let mut rule = Rule::new("r1");
    rule.chain = Some(Chain::Input);
    let err = rule.append(&exec).unwrap_err();

    assert!(matches!(err, Error::Privilege));
    assert!(exec.commands().is_empty());
    assert!(!rule.valid);
    assert!(!rule.applied);
}

#[test]
fn test_synchronized_population_round_trips() {
    init_tracing();
    let filter = "-P INPUT ACCEPT\n\
                  -A INPUT -s 192.168.1.0/24 -p tcp -m tcp --dport 22 \
                  -m comment --comment \"id:ssh-lan\" -j ACCEPT\n\
                  -A INPUT ! -i lo -s 127.0.0.0/8 -j DROP\n\
                  -A FORWARD -m comment --comment \"app:wanemd\" -g WANEM-UL\n";
    let nat = "-A POSTROUTING -o eth0 -j MASQUERADE --to-ports 1024-65000\n";
    let exec = ScriptedExecutor::new()
        .with_listing(IpVersion::Ipv4, Table::Filter, filter)
        .with_listing(IpVersion::Ipv4, Table::Nat, nat);

    let rules = sync::sync(&exec).unwrap();
    assert_eq!(rules.len(), 4);

    let ssh = sync::find_by_id(&rules, "ssh-lan").unwrap();
    assert_eq!(ssh.chain, Some(Chain::Input));
    assert_eq!(ssh.number, 1);
    assert_eq!(ssh.destination_port.as_deref(), Some("22"));

    let spoofed = &rules[1];
    assert_eq!(spoofed.number, 2);
    assert!(spoofed.input_negated);
    assert_eq!(spoofed.input.as_deref(), Some("lo"));

    let tagged = &rules[2];
    assert_eq!(tagged.number, 1, "numbering is per chain");
    assert_eq!(tagged.markers, vec![Marker::new("app", "wanemd")]);
    assert!(matches!(tagged.target, Some(Target::Goto(_))));

    let masquerades = sync::rules_with_target(&rules, TargetKind::Masquerade);
    assert_eq!(masquerades.len(), 1);
    assert_eq!(masquerades[0].table, Table::Nat);

    // A synchronized rule re-serializes into an equivalent rule
    let reparsed = Rule::parse("filter", &ssh.command_fragment()).unwrap();
    assert_eq!(reparsed.id, ssh.id);
    assert_eq!(reparsed.source, ssh.source);
    assert_eq!(reparsed.destination_port, ssh.destination_port);
    assert_eq!(reparsed.target, ssh.target);
}

#[test]
fn test_labeling_pass_end_to_end() {
    init_tracing();
    let filter = "-A INPUT -m comment --comment id:keep -j ACCEPT\n\
                  -A INPUT -p udp -m udp --dport 53 -j ACCEPT\n";
    let exec = ScriptedExecutor::new().with_listing(IpVersion::Ipv4, Table::Filter, filter);

    sync::label_rules(&exec).unwrap();

    let replaces: Vec<String> = exec
        .commands()
        .into_iter()
        .filter(|command| command.contains("--replace"))
        .collect();
    assert_eq!(replaces.len(), 1, "only the unlabeled rule is relabeled");
    assert!(replaces[0].contains("--replace INPUT 2"));
    assert!(replaces[0].contains("--match multiport --dports 53"));
    assert!(replaces[0].contains("-m comment --comment id:"));
}

#[test]
fn test_interchange_format_round_trip() {
    init_tracing();
    let mut rule = Rule::new("dscp-voice");
    rule.table = Table::Mangle;
    rule.chain = Some(Chain::Postrouting);
    rule.protocol = Some("udp".to_string().into());
    rule.destination_port = Some("5060".to_string());
    rule.target = Some(Target::Dscp(TargetDscp { value: 46 }));

    let json = rule.to_json().unwrap();
    assert!(json.contains("\"type\":\"dscp\""));

    let back = Rule::from_json(&json).unwrap();
    assert_eq!(back, rule);
    assert_eq!(back.command_fragment(), rule.command_fragment());
}

#[test]
fn test_validation_failure_leaves_no_partial_state() {
    init_tracing();
    let exec = ScriptedExecutor::new();

    let mut rule = Rule::new("bad");
    rule.chain = Some(Chain::Input);
    rule.source = Some("not-an-address".to_string());

    let err = rule.append(&exec).unwrap_err();
    assert!(matches!(err, Error::Validation { ref field, .. } if field == "source"));
    assert!(!rule.valid);
    assert!(!rule.applied);
    // Listing queries for the uniqueness snapshot are fine; the rule command
    // itself must never have run
    assert!(exec.commands().iter().all(|c| c.ends_with(" -S")));
}
