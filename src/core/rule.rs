//! The rule aggregate
//!
//! A [`Rule`] combines identity, addressing criteria, match extensions,
//! markers, and exactly one target. It owns both directions of the textual
//! conversion: [`Rule::command_fragment`] renders the canonical invocation
//! for the rule-management binary, and [`Rule::parse`] rebuilds a rule from
//! one line of `-S` listing output.
//!
//! The parser is a hand-written token cursor: listing syntax is positional
//! with per-keyword arity, so each recognized flag consumes its own number
//! of tokens. Unrecognized tokens are logged and skipped so that a bulk
//! synchronization scan recovers as much of each rule as possible.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::error::{Error, Result};
use crate::core::matches::{Marker, Match, MatchComment, MatchGeneric};
use crate::core::sync;
use crate::core::target::{
    Target, TargetDnat, TargetGoto, TargetJump, TargetMasquerade, TargetReject, TargetSnat,
    TARGET_ACCEPT, TARGET_DROP, TARGET_QUEUE, TARGET_RETURN,
};
use crate::core::types::{negation_prefix, Chain, IpVersion, Protocol, RuleCommand, Table};
use crate::exec::Executor;
use crate::validators;

/// A single packet-filtering rule.
///
/// Every field is individually tagged for the interchange format and omitted
/// when empty or default. The pending command kind is operational state, not
/// rule-defining data, and is never serialized.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Rule {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default)]
    pub table: Table,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain: Option<Chain>,
    #[serde(default, skip_serializing_if = "IpVersion::is_default")]
    pub ip_version: IpVersion,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<Protocol>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub protocol_negated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub input_negated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub output_negated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub source_negated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_port: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub source_port_negated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub destination_negated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_port: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub destination_port_negated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Target>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub markers: Vec<Marker>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub matches: Vec<Match>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub valid: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub applied: bool,
    /// 1-based position within the chain; meaningful for insert/replace and
    /// for rules discovered through synchronization.
    #[serde(default, rename = "rule_number", skip_serializing_if = "is_zero")]
    pub number: u32,
    #[serde(skip)]
    pub(crate) command: RuleCommand,
}

impl Rule {
    /// Creates a rule with the given id and the model defaults applied
    /// (IPv4, jump-to-ACCEPT target, pending append).
    pub fn new(id: impl Into<String>) -> Self {
        let mut rule = Rule {
            id: id.into(),
            ..Rule::default()
        };
        rule.apply_defaults();
        rule
    }

    /// Applies the model defaults. Idempotent: re-applying changes nothing.
    pub fn apply_defaults(&mut self) {
        if self.target.is_none() {
            self.target = Some(Target::jump_accept());
        }
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn add_match(&mut self, m: Match) {
        self.matches.push(m);
    }

    pub fn add_marker(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    /// Tags the rule with its owning application: records an `app:<name>`
    /// marker and the comment match that carries it onto the command line.
    pub fn set_app(&mut self, app: &str) {
        let marker = Marker::new("app", app);
        self.matches
            .push(Match::Comment(MatchComment::new(marker.to_string())));
        self.markers.push(marker);
    }

    fn set_state(&mut self, valid: bool, applied: bool) {
        self.valid = valid;
        self.applied = applied;
    }

    /// Encodes the rule into the interchange format.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decodes a rule from the interchange format and applies defaults.
    pub fn from_json(data: &str) -> Result<Self> {
        let mut rule: Rule = serde_json::from_str(data)?;
        rule.apply_defaults();
        Ok(rule)
    }

    /// Renders the complete invocation line, binary path included. A failed
    /// binary-path resolution aborts serialization.
    pub fn to_command<E: Executor + ?Sized>(&self, exec: &E) -> Result<String> {
        let binary = exec.resolve_binary(self.ip_version)?;
        Ok(format!("{} {}", binary.display(), self.command_fragment()))
    }

    /// Renders the invocation line without the binary prefix, in the fixed
    /// emission order: table, command and chain (plus index for
    /// insert/replace), protocol, source, destination, ports, interfaces,
    /// matches, identity comments, target. Negation renders as a `! ` prefix
    /// immediately before the affected flag.
    pub fn command_fragment(&self) -> String {
        let mut out: Vec<String> = Vec::new();

        out.push(format!("-t {}", self.table));
        out.push(format!("--{}", self.command));
        if let Some(chain) = &self.chain {
            out.push(chain.to_string());
        }
        if matches!(self.command, RuleCommand::Insert | RuleCommand::Replace) {
            out.push(self.number.to_string());
        }

        if let Some(protocol) = &self.protocol {
            out.push(format!(
                "{}--protocol {protocol}",
                negation_prefix(self.protocol_negated)
            ));
        }
        if let Some(source) = &self.source {
            out.push(format!(
                "{}--source {source}",
                negation_prefix(self.source_negated)
            ));
        }
        if let Some(destination) = &self.destination {
            out.push(format!(
                "{}--destination {destination}",
                negation_prefix(self.destination_negated)
            ));
        }
        if let Some(ports) = &self.source_port {
            out.push(format!(
                "--match multiport {}--sports {ports}",
                negation_prefix(self.source_port_negated)
            ));
        }
        if let Some(ports) = &self.destination_port {
            out.push(format!(
                "--match multiport {}--dports {ports}",
                negation_prefix(self.destination_port_negated)
            ));
        }
        if let Some(input) = &self.input {
            out.push(format!(
                "{}--in-interface {input}",
                negation_prefix(self.input_negated)
            ));
        }
        if let Some(output) = &self.output {
            out.push(format!(
                "{}--out-interface {output}",
                negation_prefix(self.output_negated)
            ));
        }

        for m in &self.matches {
            out.push(m.command_segment());
        }

        if !self.id.is_empty() {
            out.push(format!("-m comment --comment id:{}", self.id));
        }
        if !self.name.is_empty() {
            out.push(format!("-m comment --comment name:{}", self.name));
        }

        let target = self.target.clone().unwrap_or_else(Target::jump_accept);
        out.push(target.command_segment());

        out.join(" ")
    }

    /// Parses one line of listing output (`-S` dialect) into a rule.
    ///
    /// An unrecognized table name is fatal; an unrecognized token mid-line is
    /// logged and skipped so bulk synchronization stays resilient to
    /// partially-understood rule dialects. Long-form flags are accepted
    /// alongside the short listing forms so the serializer's own output
    /// parses back.
    pub fn parse(table: &str, line: &str) -> Result<Self> {
        let table: Table = table
            .parse()
            .map_err(|_| Error::UnknownTable(table.to_string()))?;
        let mut rule = Rule {
            table,
            ..Rule::default()
        };

        let tokens: Vec<&str> = line.split_whitespace().collect();
        let mut idx = 0;
        while idx < tokens.len() {
            let mut negated = false;
            if tokens[idx] == "!" {
                negated = true;
                idx += 1;
                if idx >= tokens.len() {
                    warn!(line, "dangling negation at end of rule line");
                    break;
                }
            }

            match tokens[idx] {
                "-t" | "--table" => {
                    // Listing dumps omit the table; accept it anyway so the
                    // serializer's own output parses back.
                    let Some(name) = tokens.get(idx + 1) else {
                        warn!(line, "rule line ends before table name");
                        break;
                    };
                    match name.parse::<Table>() {
                        Ok(inline_table) if inline_table != rule.table => {
                            warn!(token = *name, table = %rule.table, "inline table differs from listing table");
                        }
                        Ok(_) => {}
                        Err(_) => warn!(token = *name, "unrecognized inline table name"),
                    }
                    idx += 2;
                }
                "-A" | "--append" | "-I" | "--insert" | "-R" | "--replace" => {
                    let Some(chain) = tokens.get(idx + 1) else {
                        warn!(line, "rule line ends before chain name");
                        break;
                    };
                    rule.chain = Some(Chain::from((*chain).to_string()));
                    idx += 2;
                    // An index after the chain only appears for insert/replace
                    // forms; listing dumps omit it.
                    if let Some(number) = tokens.get(idx).and_then(|t| t.parse::<u32>().ok()) {
                        rule.number = number;
                        idx += 1;
                    }
                }
                "-s" | "--source" => {
                    let Some(value) = tokens.get(idx + 1) else {
                        warn!(line, "rule line ends before source value");
                        break;
                    };
                    rule.source = Some((*value).to_string());
                    rule.source_negated = negated;
                    idx += 2;
                }
                "-d" | "--destination" => {
                    let Some(value) = tokens.get(idx + 1) else {
                        warn!(line, "rule line ends before destination value");
                        break;
                    };
                    rule.destination = Some((*value).to_string());
                    rule.destination_negated = negated;
                    idx += 2;
                }
                "-i" | "--in-interface" => {
                    let Some(value) = tokens.get(idx + 1) else {
                        warn!(line, "rule line ends before input interface");
                        break;
                    };
                    rule.input = Some((*value).to_string());
                    rule.input_negated = negated;
                    idx += 2;
                }
                "-o" | "--out-interface" => {
                    let Some(value) = tokens.get(idx + 1) else {
                        warn!(line, "rule line ends before output interface");
                        break;
                    };
                    rule.output = Some((*value).to_string());
                    rule.output_negated = negated;
                    idx += 2;
                }
                "-p" | "--protocol" => {
                    let Some(value) = tokens.get(idx + 1) else {
                        warn!(line, "rule line ends before protocol value");
                        break;
                    };
                    rule.protocol = Some(Protocol::from((*value).to_string()));
                    rule.protocol_negated = negated;
                    idx += 2;
                }
                "-m" | "--match" => {
                    idx = rule.consume_match(&tokens, idx, negated, line);
                }
                "-j" | "--jump" | "-g" | "--goto" => {
                    idx = rule.consume_target(&tokens, idx, line);
                }
                other => {
                    warn!(token = other, line, "unrecognized token; rule parsed partially");
                    idx += 1;
                }
            }
        }

        rule.apply_defaults();
        Ok(rule)
    }

    /// Consumes a `-m <name> [!] --<option> <value>` group starting at `idx`
    /// and returns the cursor position after it.
    fn consume_match(&mut self, tokens: &[&str], idx: usize, negated: bool, line: &str) -> usize {
        let Some(name) = tokens.get(idx + 1) else {
            warn!(line, "rule line ends before match name");
            return tokens.len();
        };
        let name = (*name).to_string();

        let mut negated = negated;
        let mut cursor = idx + 2;
        if tokens.get(cursor) == Some(&"!") {
            negated = true;
            cursor += 1;
        }
        let Some(option_token) = tokens.get(cursor) else {
            warn!(line, "rule line ends before match option");
            return tokens.len();
        };
        let option = option_token.trim_start_matches('-').to_string();

        // tcp/udp/multiport port options populate the rule's port fields
        // directly instead of becoming a generic match.
        if matches!(name.as_str(), "tcp" | "udp" | "multiport")
            && (option.starts_with("dport") || option.starts_with("sport"))
        {
            let Some(value) = tokens.get(cursor + 1) else {
                warn!(line, "rule line ends before port value");
                return tokens.len();
            };
            if option.starts_with("dport") {
                self.destination_port = Some((*value).to_string());
                self.destination_port_negated = negated;
            } else {
                self.source_port = Some((*value).to_string());
                self.source_port_negated = negated;
            }
            return cursor + 2;
        }

        if name == "comment" {
            // Comment text runs until the next flag token; quotes are an
            // artifact of the listing dialect and are stripped.
            let mut words = Vec::new();
            let mut end = cursor + 1;
            while let Some(token) = tokens.get(end) {
                if token.starts_with('-') {
                    break;
                }
                words.push(*token);
                end += 1;
            }
            if words.is_empty() {
                warn!(line, "comment match without text");
                return end;
            }
            let text = words
                .join(" ")
                .replace("\\\"", "")
                .replace('"', "")
                .replace('\'', "");

            if let Some(id) = text.strip_prefix("id:") {
                self.id = id.to_string();
            } else if let Some(name) = text.strip_prefix("name:") {
                self.name = name.to_string();
            } else if let Some((marker_name, marker_value)) = text.split_once(':') {
                self.add_marker(Marker::new(marker_name, marker_value));
            } else {
                self.add_match(Match::Comment(MatchComment { comment: text, negated }));
            }
            return end;
        }

        let Some(value) = tokens.get(cursor + 1) else {
            warn!(line, "rule line ends before match value");
            return tokens.len();
        };
        self.add_match(Match::Generic(MatchGeneric {
            name,
            option,
            value: (*value).to_string(),
            negated,
        }));
        cursor + 2
    }

    /// Consumes a `-j`/`-g <target> [options]` group starting at `idx` and
    /// returns the cursor position after it. Target arity depends on the
    /// keyword: NAT and DSCP targets carry a mandatory option/value pair,
    /// MARK/MASQUERADE/REJECT an optional one, everything else none.
    fn consume_target(&mut self, tokens: &[&str], idx: usize, line: &str) -> usize {
        let is_goto = matches!(tokens[idx], "-g" | "--goto");
        let Some(keyword) = tokens.get(idx + 1) else {
            warn!(line, "rule line ends before target keyword");
            return tokens.len();
        };
        let keyword = *keyword;

        let plain = |value: &str| {
            if is_goto {
                Target::Goto(TargetGoto {
                    value: value.to_string(),
                })
            } else {
                Target::Jump(TargetJump {
                    value: value.to_string(),
                })
            }
        };

        match keyword {
            TARGET_ACCEPT | TARGET_DROP | TARGET_QUEUE | TARGET_RETURN => {
                self.target = Some(plain(keyword));
                idx + 2
            }
            "DNAT" | "SNAT" => {
                let (Some(option), Some(value)) = (tokens.get(idx + 2), tokens.get(idx + 3)) else {
                    warn!(line, "NAT target without option/value pair");
                    self.target = Some(plain(keyword));
                    return tokens.len();
                };
                let expected = if keyword == "DNAT" { "to-destination" } else { "to-source" };
                if option.trim_start_matches('-') != expected {
                    warn!(option = *option, keyword, "unexpected NAT target option");
                }
                self.target = Some(if keyword == "DNAT" {
                    Target::Dnat(TargetDnat {
                        to_destination: (*value).to_string(),
                    })
                } else {
                    Target::Snat(TargetSnat {
                        to_source: (*value).to_string(),
                    })
                });
                idx + 4
            }
            "DSCP" => {
                let (Some(option), Some(value)) = (tokens.get(idx + 2), tokens.get(idx + 3)) else {
                    warn!(line, "DSCP target without option/value pair");
                    self.target = Some(plain(keyword));
                    return tokens.len();
                };
                self.target = Some(Target::parse_dscp(option, value).unwrap_or_else(|| plain(keyword)));
                idx + 4
            }
            "MARK" => {
                if let (Some(option), Some(value)) = (tokens.get(idx + 2), tokens.get(idx + 3)) {
                    if option.trim_start_matches('-').starts_with("set-") {
                        self.target =
                            Some(Target::parse_mark(option, value).unwrap_or_else(|| plain(keyword)));
                        return idx + 4;
                    }
                }
                debug!(line, "MARK target without a mark value");
                self.target = Some(plain(keyword));
                idx + 2
            }
            "MASQUERADE" => {
                if tokens.get(idx + 2) == Some(&"--to-ports") {
                    if let Some(ports) = tokens.get(idx + 3) {
                        self.target = Some(Target::Masquerade(TargetMasquerade {
                            to_ports: Some((*ports).to_string()),
                        }));
                        return idx + 4;
                    }
                }
                self.target = Some(Target::Masquerade(TargetMasquerade { to_ports: None }));
                idx + 2
            }
            "REJECT" => {
                if tokens.get(idx + 2) == Some(&"--reject-with") {
                    if let Some(with) = tokens.get(idx + 3) {
                        self.target = Some(Target::Reject(TargetReject {
                            reject_with: Some((*with).to_string()),
                        }));
                        return idx + 4;
                    }
                }
                self.target = Some(Target::Reject(TargetReject { reject_with: None }));
                idx + 2
            }
            chain => {
                // Anything else is a jump/goto into a user-defined chain.
                if !self.table.builtin_chains().contains(&chain) {
                    debug!(chain, table = %self.table, "target is not a builtin chain; assuming user-defined");
                }
                self.target = Some(plain(chain));
                idx + 2
            }
        }
    }

    /// Checks the rule against its target's table constraints, the supplied
    /// snapshot of currently-known rules, its criteria, and the privilege
    /// precondition. Runs before every execution; nothing is applied when it
    /// fails.
    pub fn validate<E: Executor + ?Sized>(&self, exec: &E, known: &[Rule]) -> Result<()> {
        let Some(target) = &self.target else {
            return Err(Error::validation("target", "rule has no target"));
        };
        target.validate(self)?;

        if matches!(self.command, RuleCommand::Append | RuleCommand::Insert)
            && !self.id.is_empty()
            && known.iter().any(|r| r.id == self.id)
        {
            return Err(Error::validation(
                "id",
                format!("a rule with the id {} already exists", self.id),
            ));
        }
        // A rule never collides with itself: entries carrying the same id are
        // the rule being replaced or deleted.
        if !self.name.is_empty()
            && known
                .iter()
                .any(|r| r.name == self.name && r.id != self.id)
        {
            return Err(Error::validation(
                "name",
                format!("a rule with the name {} already exists", self.name),
            ));
        }

        self.validate_criteria()?;

        if let Some(chain) = &self.chain {
            let label = chain.to_string();
            if !exec.is_valid_chain(self.table, &label) {
                debug!(chain = %label, table = %self.table, "chain is not builtin for table; assuming user-defined");
            }
        }

        if !exec.is_privileged() {
            return Err(Error::Privilege);
        }
        Ok(())
    }

    fn validate_criteria(&self) -> Result<()> {
        if let Some(source) = &self.source {
            validators::validate_address(source).map_err(|m| Error::validation("source", m))?;
        }
        if let Some(destination) = &self.destination {
            validators::validate_address(destination)
                .map_err(|m| Error::validation("destination", m))?;
        }
        if let Some(input) = &self.input {
            validators::validate_interface(input).map_err(|m| Error::validation("input", m))?;
        }
        if let Some(output) = &self.output {
            validators::validate_interface(output).map_err(|m| Error::validation("output", m))?;
        }
        if let Some(ports) = &self.source_port {
            validators::validate_port_spec(ports)
                .map_err(|m| Error::validation("source_port", m))?;
        }
        if let Some(ports) = &self.destination_port {
            validators::validate_port_spec(ports)
                .map_err(|m| Error::validation("destination_port", m))?;
        }
        Ok(())
    }

    /// Appends the rule to its chain.
    pub fn append<E: Executor + ?Sized>(&mut self, exec: &E) -> Result<()> {
        self.command = RuleCommand::Append;
        self.execute(exec)
    }

    /// Inserts the rule at the given 1-based position in its chain.
    pub fn insert<E: Executor + ?Sized>(&mut self, exec: &E, index: u32) -> Result<()> {
        self.command = RuleCommand::Insert;
        self.number = index;
        self.execute(exec)
    }

    /// Replaces the rule at its recorded position in its chain.
    pub fn replace<E: Executor + ?Sized>(&mut self, exec: &E) -> Result<()> {
        self.command = RuleCommand::Replace;
        self.execute(exec)
    }

    /// Deletes the matching live rule from the packet-filter configuration.
    pub fn delete<E: Executor + ?Sized>(&mut self, exec: &E) -> Result<()> {
        self.command = RuleCommand::Delete;
        self.execute(exec)
    }

    /// Shared execution routine: snapshot, validate, serialize, run. Either
    /// the rule is fully applied (`valid` and `applied` both true) or it is
    /// left exactly as before the call with both flags false.
    fn execute<E: Executor + ?Sized>(&mut self, exec: &E) -> Result<()> {
        self.apply_defaults();

        let known = match sync::current_rules(exec) {
            Ok(rules) => rules,
            Err(err) => {
                self.set_state(false, false);
                return Err(err);
            }
        };
        if let Err(err) = self.validate(exec, &known) {
            self.set_state(false, false);
            return Err(err);
        }
        let command = match self.to_command(exec) {
            Ok(command) => command,
            Err(err) => {
                self.set_state(false, false);
                return Err(err);
            }
        };

        match exec.execute(&command) {
            Ok(_) => {
                debug!(command = %command, "rule applied");
                self.set_state(true, true);
                Ok(())
            }
            Err(err) => {
                warn!(command = %command, error = %err, "rule execution failed");
                self.set_state(false, false);
                Err(err)
            }
        }
    }

    /// Merges the populated fields of `other` into this rule. Negation flags
    /// merge into their own fields and can only be switched on, matching the
    /// populated-fields-win semantics of the value merges.
    pub fn update_from(&mut self, other: &Rule) {
        if !other.name.is_empty() {
            self.name = other.name.clone();
        }
        if other.protocol.is_some() {
            self.protocol = other.protocol.clone();
        }
        if other.protocol_negated {
            self.protocol_negated = true;
        }
        if other.input.is_some() {
            self.input = other.input.clone();
        }
        if other.input_negated {
            self.input_negated = true;
        }
        if other.output.is_some() {
            self.output = other.output.clone();
        }
        if other.output_negated {
            self.output_negated = true;
        }
        if other.source.is_some() {
            self.source = other.source.clone();
        }
        if other.source_negated {
            self.source_negated = true;
        }
        if other.source_port.is_some() {
            self.source_port = other.source_port.clone();
        }
        if other.source_port_negated {
            self.source_port_negated = true;
        }
        if other.destination.is_some() {
            self.destination = other.destination.clone();
        }
        if other.destination_negated {
            self.destination_negated = true;
        }
        if other.destination_port.is_some() {
            self.destination_port = other.destination_port.clone();
        }
        if other.destination_port_negated {
            self.destination_port_negated = true;
        }
    }

    /// Re-derives the rule's chain position from a numbered listing, located
    /// by its embedded id.
    pub fn refresh_number<E: Executor + ?Sized>(&mut self, exec: &E) -> Result<()> {
        if self.id.is_empty() {
            warn!("unable to update rule number: rule has no id");
            return Ok(());
        }
        let binary = exec.resolve_binary(self.ip_version)?;
        let chain = self
            .chain
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();
        let command = format!(
            "{} -t {} -vnL {} --line-numbers",
            binary.display(),
            self.table,
            chain
        );
        let listing = exec.execute(&command)?;
        // The first two lines are the chain header and the column legend.
        for line in listing.lines().skip(2) {
            if line.contains(&self.id) {
                if let Some(first) = line.split_whitespace().next() {
                    match first.parse::<u32>() {
                        Ok(number) => self.number = number,
                        Err(err) => warn!(error = %err, line, "failed to extract rule number"),
                    }
                }
            }
        }
        Ok(())
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

fn is_zero(value: &u32) -> bool {
    *value == 0
}
