//! Parameter types for pmm-admin tools
//!
//! Callers send loosely typed values; [`ReconcileServiceParams::to_spec`]
//! turns them into a validated [`ServiceSpec`] or a validation error.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::pmm::error::PmmResult;
use crate::redact::REDACTED;
use crate::types::{MetricsMode, Secret, ServiceSpec};

#[derive(Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ReconcileServiceParams {
    #[schemars(description = "Desired state of the service: present or absent")]
    pub state: String,

    #[schemars(description = "Database kind: mysql, mongodb, postgresql or proxysql")]
    pub database: String,

    #[schemars(description = "Service name in PMM (unique key, used for removal)")]
    pub service_name: String,

    #[schemars(description = "Database hostname (required when state is present)")]
    #[serde(default)]
    pub hostname: Option<String>,

    #[schemars(description = "Username to connect to the database")]
    #[serde(default)]
    pub username: Option<String>,

    #[schemars(description = "Password to connect to the database")]
    #[serde(default)]
    pub password: Option<String>,

    #[schemars(description = "Database port")]
    #[serde(default)]
    pub port: Option<u16>,

    #[schemars(description = "Environment name")]
    #[serde(default)]
    pub environment: Option<String>,

    #[schemars(description = "Cluster name")]
    #[serde(default)]
    pub cluster: Option<String>,

    #[schemars(description = "Replication set name")]
    #[serde(default)]
    pub replication_set: Option<String>,

    #[schemars(description = "Metrics flow mode: push or pull (pmm-admin defaults to push)")]
    #[serde(default)]
    pub metrics_mode: Option<String>,

    #[schemars(description = "Use TLS to connect to the database")]
    #[serde(default)]
    pub tls: Option<bool>,

    #[schemars(description = "Report what would change without running pmm-admin add/remove")]
    #[serde(default)]
    pub check_mode: Option<bool>,
}

impl fmt::Debug for ReconcileServiceParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let masked = |v: &Option<String>| v.as_ref().map(|_| REDACTED);
        f.debug_struct("ReconcileServiceParams")
            .field("state", &self.state)
            .field("database", &self.database)
            .field("service_name", &self.service_name)
            .field("hostname", &self.hostname)
            .field("username", &masked(&self.username))
            .field("password", &masked(&self.password))
            .field("port", &self.port)
            .field("environment", &self.environment)
            .field("cluster", &self.cluster)
            .field("replication_set", &self.replication_set)
            .field("metrics_mode", &self.metrics_mode)
            .field("tls", &self.tls)
            .field("check_mode", &self.check_mode)
            .finish()
    }
}

impl ReconcileServiceParams {
    /// Parse and validate into a [`ServiceSpec`]
    pub fn to_spec(&self) -> PmmResult<ServiceSpec> {
        let mut spec = ServiceSpec::new(
            self.database.parse()?,
            self.service_name.trim(),
            self.state.parse()?,
        );

        spec.hostname = self.hostname.clone();
        spec.username = self.username.clone().map(Secret::new);
        spec.password = self.password.clone().map(Secret::new);
        spec.port = self.port;
        spec.environment = self.environment.clone();
        spec.cluster = self.cluster.clone();
        spec.replication_set = self.replication_set.clone();
        spec.metrics_mode = self.metrics_mode.as_deref().map(str::parse::<MetricsMode>).transpose()?;
        spec.tls = self.tls.unwrap_or(false);

        spec.validate()?;
        Ok(spec)
    }
}
