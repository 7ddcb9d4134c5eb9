//! Converging command construction
//!
//! A [`PmmCommand`] is an ordered token list executed directly, never joined
//! into a shell string, so values with spaces or shell metacharacters are
//! passed through verbatim. Its `Debug`, `Display` and `Serialize` forms mask
//! credentials; only [`PmmCommand::tokens`] exposes the exact arguments.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::redact::redact_token;
use crate::types::{DesiredState, Secret, ServiceSpec};

/// Program name every converging command starts with
pub const PROGRAM: &str = "pmm-admin";

#[derive(Clone, PartialEq, Eq)]
pub struct PmmCommand {
    tokens: Vec<String>,
}

impl PmmCommand {
    /// Build the command that moves pmm-admin towards `spec.desired_state`
    ///
    /// `present`: `pmm-admin add <kind>` followed by one flag per set field,
    /// in a fixed order. `absent`: `pmm-admin remove <kind> <service_name>`.
    pub fn build(spec: &ServiceSpec) -> Self {
        let mut tokens = vec![PROGRAM.to_string()];

        match spec.desired_state {
            DesiredState::Present => {
                tokens.push("add".to_string());
                tokens.push(spec.database_kind.to_string());

                push_flag(&mut tokens, "username", spec.username.as_ref().map(Secret::expose));
                push_flag(&mut tokens, "password", spec.password.as_ref().map(Secret::expose));
                push_flag(&mut tokens, "host", spec.hostname.as_deref());
                push_flag(&mut tokens, "port", spec.port.map(|p| p.to_string()).as_deref());
                push_flag(&mut tokens, "environment", spec.environment.as_deref());
                push_flag(&mut tokens, "service-name", Some(spec.service_name.as_str()));
                push_flag(&mut tokens, "metrics-mode", spec.metrics_mode.map(|m| m.as_str()));
                push_flag(&mut tokens, "cluster", spec.cluster.as_deref());
                push_flag(&mut tokens, "replication-set", spec.replication_set.as_deref());
                if spec.tls {
                    tokens.push("--tls".to_string());
                }
            }
            DesiredState::Absent => {
                tokens.push("remove".to_string());
                tokens.push(spec.database_kind.to_string());
                tokens.push(spec.service_name.clone());
            }
        }

        Self { tokens }
    }

    /// Exact tokens, program first. Contains cleartext credentials.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn program(&self) -> &str {
        self.tokens.first().map(String::as_str).unwrap_or(PROGRAM)
    }

    /// Arguments after the program name
    pub fn args(&self) -> &[String] {
        self.tokens.get(1..).unwrap_or(&[])
    }

    /// Tokens with credential values masked
    pub fn redacted(&self) -> Vec<String> {
        self.tokens
            .iter()
            .map(|t| redact_token(t).into_owned())
            .collect()
    }

    pub fn into_tokens(self) -> Vec<String> {
        self.tokens
    }
}

fn push_flag(tokens: &mut Vec<String>, name: &str, value: Option<&str>) {
    if let Some(value) = value {
        tokens.push(format!("--{}={}", name, value));
    }
}

impl fmt::Display for PmmCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.redacted().join(" "))
    }
}

impl fmt::Debug for PmmCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PmmCommand").field(&self.redacted()).finish()
    }
}

impl Serialize for PmmCommand {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.redacted().serialize(serializer)
    }
}
