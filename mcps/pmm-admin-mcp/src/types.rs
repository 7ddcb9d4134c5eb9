//! Type definitions for pmm-admin reconciliation

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::pmm::command::PmmCommand;
use crate::pmm::error::{PmmError, PmmResult};
use crate::redact::{mask_secrets, REDACTED};

// ============================================================================
// Enumerations
// ============================================================================

/// Kind of database instance pmm-admin can monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseKind {
    Mysql,
    Mongodb,
    Postgresql,
    Proxysql,
}

impl DatabaseKind {
    /// Token pmm-admin expects after `add` / `remove`
    pub fn as_str(&self) -> &'static str {
        match self {
            DatabaseKind::Mysql => "mysql",
            DatabaseKind::Mongodb => "mongodb",
            DatabaseKind::Postgresql => "postgresql",
            DatabaseKind::Proxysql => "proxysql",
        }
    }
}

impl fmt::Display for DatabaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatabaseKind {
    type Err = PmmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mysql" => Ok(DatabaseKind::Mysql),
            "mongodb" => Ok(DatabaseKind::Mongodb),
            "postgresql" => Ok(DatabaseKind::Postgresql),
            "proxysql" => Ok(DatabaseKind::Proxysql),
            _ => Err(PmmError::validation(format!(
                "unsupported database '{}' (expected mysql, mongodb, postgresql or proxysql)",
                s
            ))),
        }
    }
}

/// How the PMM server obtains metrics from the agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricsMode {
    Push,
    Pull,
}

impl MetricsMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricsMode::Push => "push",
            MetricsMode::Pull => "pull",
        }
    }
}

impl fmt::Display for MetricsMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricsMode {
    type Err = PmmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "push" => Ok(MetricsMode::Push),
            "pull" => Ok(MetricsMode::Pull),
            _ => Err(PmmError::validation(format!(
                "unsupported metrics mode '{}' (expected push or pull)",
                s
            ))),
        }
    }
}

/// Whether the service should be registered or not
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DesiredState {
    Present,
    Absent,
}

impl DesiredState {
    pub fn as_str(&self) -> &'static str {
        match self {
            DesiredState::Present => "present",
            DesiredState::Absent => "absent",
        }
    }
}

impl fmt::Display for DesiredState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DesiredState {
    type Err = PmmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "present" => Ok(DesiredState::Present),
            "absent" => Ok(DesiredState::Absent),
            _ => Err(PmmError::validation(format!(
                "unsupported state '{}' (expected present or absent)",
                s
            ))),
        }
    }
}

// ============================================================================
// Service Description
// ============================================================================

/// A credential value that never prints itself
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The cleartext value. Only the command builder should need this.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret({})", REDACTED)
    }
}

/// Desired registration of one monitored database instance
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceSpec {
    pub database_kind: DatabaseKind,
    /// Unique key of the service inside PMM, used for removal
    pub service_name: String,
    /// Database host; required when registering
    pub hostname: Option<String>,
    pub username: Option<Secret>,
    pub password: Option<Secret>,
    pub port: Option<u16>,
    pub environment: Option<String>,
    pub cluster: Option<String>,
    pub replication_set: Option<String>,
    /// Unset leaves the choice to pmm-admin (push)
    pub metrics_mode: Option<MetricsMode>,
    pub tls: bool,
    pub desired_state: DesiredState,
}

impl ServiceSpec {
    pub fn new(
        database_kind: DatabaseKind,
        service_name: impl Into<String>,
        desired_state: DesiredState,
    ) -> Self {
        Self {
            database_kind,
            service_name: service_name.into(),
            hostname: None,
            username: None,
            password: None,
            port: None,
            environment: None,
            cluster: None,
            replication_set: None,
            metrics_mode: None,
            tls: false,
            desired_state,
        }
    }

    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(Secret::new(username));
        self.password = Some(Secret::new(password));
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    pub fn with_cluster(mut self, cluster: impl Into<String>) -> Self {
        self.cluster = Some(cluster.into());
        self
    }

    pub fn with_replication_set(mut self, replication_set: impl Into<String>) -> Self {
        self.replication_set = Some(replication_set.into());
        self
    }

    pub fn with_metrics_mode(mut self, mode: MetricsMode) -> Self {
        self.metrics_mode = Some(mode);
        self
    }

    pub fn with_tls(mut self, tls: bool) -> Self {
        self.tls = tls;
        self
    }

    /// Check the fields the desired state depends on
    ///
    /// `service_name` is always required; `hostname` only for `present`.
    /// Everything else is optional, and ignored entirely for `absent`.
    pub fn validate(&self) -> PmmResult<()> {
        if self.service_name.trim().is_empty() {
            return Err(PmmError::validation("service_name is required"));
        }

        if self.desired_state == DesiredState::Present {
            match self.hostname.as_deref() {
                Some(host) if !host.trim().is_empty() => {}
                _ => {
                    return Err(PmmError::validation(
                        "hostname is required when state is present",
                    ))
                }
            }
        }

        Ok(())
    }

    /// Credential values that must be masked in anything returned
    pub fn secrets(&self) -> Vec<&str> {
        [&self.username, &self.password]
            .into_iter()
            .flatten()
            .map(Secret::expose)
            .collect()
    }
}

// ============================================================================
// Observed State
// ============================================================================

/// Raw text snapshot of what pmm-admin currently tracks
///
/// Never parsed into records; only searched for substrings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationListing(String);

impl RegistrationListing {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.0.contains(needle)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for RegistrationListing {
    fn from(text: String) -> Self {
        Self(text)
    }
}

// ============================================================================
// Response Types
// ============================================================================

/// Captured result of running one process to completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOutcome {
    /// Exit code, -1 when terminated by a signal
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ExecutionOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Outcome of reconciling one service
///
/// Serializes with credentials masked inside `command`.
#[derive(Debug, Clone, Serialize)]
pub struct ReconciliationResult {
    /// Whether registration state changed (or would change, in check mode)
    pub changed: bool,
    /// False only when the converging command exited non-zero
    pub succeeded: bool,
    /// Converging command, absent when nothing needed doing
    pub command: Option<PmmCommand>,
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    /// True when the command was planned but deliberately not run
    pub check_mode: bool,
}

impl ReconciliationResult {
    /// Desired state already holds
    pub fn unchanged() -> Self {
        Self {
            changed: false,
            succeeded: true,
            command: None,
            exit_code: None,
            stdout: String::new(),
            stderr: String::new(),
            check_mode: false,
        }
    }

    /// Check mode: the command that would have been run
    pub fn planned(command: PmmCommand) -> Self {
        Self {
            changed: true,
            command: Some(command),
            check_mode: true,
            ..Self::unchanged()
        }
    }

    /// Classify a finished converging command
    pub fn from_execution(command: PmmCommand, outcome: ExecutionOutcome) -> Self {
        let succeeded = outcome.success();
        Self {
            changed: succeeded,
            succeeded,
            command: Some(command),
            exit_code: Some(outcome.exit_code),
            stdout: outcome.stdout,
            stderr: outcome.stderr,
            check_mode: false,
        }
    }

    /// Mask credential values echoed in the captured output
    pub fn mask_secrets(mut self, secrets: &[&str]) -> Self {
        self.stdout = mask_secrets(&self.stdout, secrets);
        self.stderr = mask_secrets(&self.stderr, secrets);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_enums_case_insensitive() {
        assert_eq!("MySQL".parse::<DatabaseKind>().unwrap(), DatabaseKind::Mysql);
        assert_eq!(" pull ".parse::<MetricsMode>().unwrap(), MetricsMode::Pull);
        assert_eq!("Absent".parse::<DesiredState>().unwrap(), DesiredState::Absent);
    }

    #[test]
    fn test_parse_rejects_unknown_values() {
        assert!("oracle".parse::<DatabaseKind>().unwrap_err().is_validation());
        assert!("stream".parse::<MetricsMode>().unwrap_err().is_validation());
        let err = "latest".parse::<DesiredState>().unwrap_err();
        assert!(err.to_string().contains("expected present or absent"));
    }

    #[test]
    fn test_validate_present_requires_hostname() {
        let spec = ServiceSpec::new(DatabaseKind::Mysql, "db1-svc", DesiredState::Present);
        assert!(spec.validate().unwrap_err().is_validation());

        let spec = spec.with_hostname("  ");
        assert!(spec.validate().is_err());

        let spec = spec.with_hostname("db1");
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn test_validate_absent_only_needs_service_name() {
        let spec = ServiceSpec::new(DatabaseKind::Proxysql, "proxysql-001", DesiredState::Absent);
        assert!(spec.validate().is_ok());

        let spec = ServiceSpec::new(DatabaseKind::Proxysql, "", DesiredState::Absent);
        let err = spec.validate().unwrap_err();
        assert!(err.to_string().contains("service_name is required"));
    }

    #[test]
    fn test_secret_debug_is_masked() {
        let spec = ServiceSpec::new(DatabaseKind::Mysql, "db1-svc", DesiredState::Present)
            .with_credentials("admin", "hunter2");
        let debug = format!("{:?}", spec);
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("admin"));
        assert_eq!(spec.secrets(), vec!["admin", "hunter2"]);
    }

    #[test]
    fn test_classify_execution() {
        let spec = ServiceSpec::new(DatabaseKind::Mysql, "db1-svc", DesiredState::Absent);
        let failed = ReconciliationResult::from_execution(
            PmmCommand::build(&spec),
            ExecutionOutcome {
                exit_code: 1,
                stdout: String::new(),
                stderr: "Service with name \"db1-svc\" not found.".to_string(),
            },
        );
        assert!(!failed.changed);
        assert!(!failed.succeeded);
        assert_eq!(failed.exit_code, Some(1));

        let ok = ReconciliationResult::from_execution(
            PmmCommand::build(&spec),
            ExecutionOutcome {
                exit_code: 0,
                stdout: "Service removed.".to_string(),
                stderr: String::new(),
            },
        );
        assert!(ok.changed && ok.succeeded);
    }

    #[test]
    fn test_short_credentials_do_not_mangle_output() {
        let spec = ServiceSpec::new(DatabaseKind::Mysql, "db1-svc", DesiredState::Present)
            .with_hostname("db1")
            .with_credentials("pmm", "p");
        let result = ReconciliationResult::from_execution(
            PmmCommand::build(&spec),
            ExecutionOutcome {
                exit_code: 1,
                stdout: "pmm-admin: done".to_string(),
                stderr: "Access denied for user 'pmm' (using password: p)".to_string(),
            },
        )
        .mask_secrets(&spec.secrets());

        assert_eq!(result.stdout, "pmm-admin: done");
        assert_eq!(
            result.stderr,
            "Access denied for user '********' (using password: ********)"
        );
    }

    #[test]
    fn test_mask_secrets_in_result() {
        let result = ReconciliationResult {
            stderr: "access denied for user 'admin'".to_string(),
            ..ReconciliationResult::unchanged()
        };
        let masked = result.mask_secrets(&["admin"]);
        assert_eq!(masked.stderr, "access denied for user '********'");
    }
}
