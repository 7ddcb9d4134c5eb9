//! Process execution against stock unix programs standing in for pmm-admin
#![cfg(unix)]

use std::time::Duration;

use pmm_admin_mcp::config::Config;
use pmm_admin_mcp::pmm::ProcessError;
use pmm_admin_mcp::types::{DatabaseKind, DesiredState};
use pmm_admin_mcp::{
    CommandExecutor, PmmAdminCli, PmmCommand, PmmError, Reconciler, ServiceSpec, StateLister,
};

fn cli_with(binary: &str, list_args: &[&str]) -> PmmAdminCli {
    let mut config = Config::default();
    config.pmm_admin.binary = binary.to_string();
    config.pmm_admin.list_args = list_args.iter().map(|s| s.to_string()).collect();
    PmmAdminCli::new(&config)
}

#[tokio::test]
async fn test_listing_captures_stdout() {
    let cli = cli_with("echo", &["MySQL", "db1-svc", "db1:3306"]);
    let listing = cli.list_current().await.unwrap();
    assert_eq!(listing.as_str(), "MySQL db1-svc db1:3306\n");
    assert!(listing.contains("db1-svc"));
}

#[tokio::test]
async fn test_listing_nonzero_exit() {
    let cli = cli_with("false", &[]);
    let err = cli.list_current().await.unwrap_err();
    match err {
        PmmError::ListingFailed(ProcessError::NonZeroExit { code, .. }) => assert_eq!(code, 1),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_listing_missing_binary() {
    let cli = cli_with("/nonexistent/bin/pmm-admin", &["list"]);
    let err = cli.list_current().await.unwrap_err();
    assert!(matches!(
        err,
        PmmError::ListingFailed(ProcessError::NotFound { .. })
    ));
    assert!(err.to_string().contains("not found"));
}

#[tokio::test]
async fn test_listing_timeout_kills_child() {
    let cli = cli_with("sleep", &["5"]).with_timeout(Duration::from_millis(200));
    let started = std::time::Instant::now();
    let err = cli.list_current().await.unwrap_err();
    assert!(matches!(
        err,
        PmmError::ListingFailed(ProcessError::Timeout { .. })
    ));
    assert!(started.elapsed() < Duration::from_secs(4));
}

#[tokio::test]
async fn test_execute_passes_arguments_verbatim() {
    let cli = cli_with("echo", &[]);
    let spec = ServiceSpec::new(DatabaseKind::Mysql, "db1-svc", DesiredState::Present)
        .with_hostname("db1")
        .with_environment("prod; echo injected $(id)");
    let command = PmmCommand::build(&spec);

    let outcome = cli.execute(&command).await.unwrap();
    assert!(outcome.success());
    // one line means no shell split the value
    assert_eq!(outcome.stdout.lines().count(), 1);
    assert!(outcome
        .stdout
        .contains("--environment=prod; echo injected $(id)"));
    assert!(outcome.stdout.starts_with("add mysql "));
}

#[tokio::test]
async fn test_execute_nonzero_exit_is_an_outcome() {
    let cli = cli_with("false", &[]);
    let spec = ServiceSpec::new(DatabaseKind::Proxysql, "proxysql-001", DesiredState::Absent);
    let outcome = cli.execute(&PmmCommand::build(&spec)).await.unwrap();
    assert_eq!(outcome.exit_code, 1);
    assert!(!outcome.success());
}

#[tokio::test]
async fn test_execute_missing_binary() {
    let cli = cli_with("/nonexistent/bin/pmm-admin", &[]);
    let spec = ServiceSpec::new(DatabaseKind::Proxysql, "proxysql-001", DesiredState::Absent);
    let err = cli.execute(&PmmCommand::build(&spec)).await.unwrap_err();
    assert!(matches!(
        err,
        PmmError::ExecutionFailed(ProcessError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_reconcile_end_to_end_with_echo() {
    // echo prints its arguments, so the listing is "db1-svc\n"
    let cli = cli_with("echo", &["db1-svc"]);
    let reconciler = Reconciler::from_cli(cli);

    // hostname "db1" is a substring of the listing
    let present = ServiceSpec::new(DatabaseKind::Mysql, "db1-svc", DesiredState::Present)
        .with_hostname("db1");
    let result = reconciler.reconcile(&present).await.unwrap();
    assert!(!result.changed);

    let absent = ServiceSpec::new(DatabaseKind::Mysql, "db1-svc", DesiredState::Absent);
    let result = reconciler.reconcile(&absent).await.unwrap();
    assert!(result.changed);
    assert!(result.succeeded);
    assert_eq!(result.exit_code, Some(0));
    assert_eq!(result.stdout, "remove mysql db1-svc\n");
    assert_eq!(
        result.command.unwrap().tokens(),
        ["pmm-admin", "remove", "mysql", "db1-svc"]
    );
}

#[tokio::test]
async fn test_config_file_selects_binary() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pmm-reconcile.toml");
    std::fs::write(
        &path,
        r#"
[pmm_admin]
binary = "echo"
list_args = ["ProxySQL", "proxysql-001"]

[timeouts]
default_secs = 5
"#,
    )
    .unwrap();

    let config = Config::load_from_path(&path).unwrap();
    let cli = PmmAdminCli::new(&config);
    assert_eq!(cli.binary(), "echo");

    let listing = cli.list_current().await.unwrap();
    assert!(listing.contains("proxysql-001"));
}
