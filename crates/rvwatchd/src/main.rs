use rv_core::config::{load_watch_config, ConfigError, WatchConfig};
use rv_core::validation::{Validate, ValidationIssue, ValidationLevel};
use rv_git::{all_commit_topics, discover_root, is_git_repository, user_email, user_name, GitCli};
use rv_git::GitError;
use rv_core::types::InstallStatus;
use rv_revup::{RevupCli, RevupClient, RevupError};
use rvwatchd::{
    prepare_commit_message, CommitMsgError, LogListener, ShellLauncher, StdioPrompt,
    TrackerRegistry,
};
use serde::Serialize;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

const SHUTDOWN_POLL_INTERVAL: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, PartialEq, Eq)]
struct ProbeCliArgs {
    config_path: Option<PathBuf>,
    json: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct TopicsCliArgs {
    root: Option<PathBuf>,
    config_path: Option<PathBuf>,
    json: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CommitTopicsCliArgs {
    root: Option<PathBuf>,
    config_path: Option<PathBuf>,
    json: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct DoctorCliArgs {
    root: Option<PathBuf>,
    config_path: Option<PathBuf>,
    json: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct WatchCliArgs {
    root: Option<PathBuf>,
    config_path: Option<PathBuf>,
    interval_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PrepareCommitMsgCliArgs {
    message_path: PathBuf,
    root: Option<PathBuf>,
    config_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum CliCommand {
    Probe(ProbeCliArgs),
    Topics(TopicsCliArgs),
    CommitTopics(CommitTopicsCliArgs),
    Doctor(DoctorCliArgs),
    Watch(WatchCliArgs),
    PrepareCommitMsg(PrepareCommitMsgCliArgs),
    Help(String),
}

#[derive(Debug, thiserror::Error)]
enum MainError {
    #[error("{0}")]
    Args(String),
    #[error("failed to load config at {path}: {source}")]
    LoadConfig {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },
    #[error("{0}")]
    InvalidConfig(String),
    #[error("failed to resolve current directory: {source}")]
    CurrentDir {
        #[source]
        source: std::io::Error,
    },
    #[error("failed to register shutdown signal handler: {source}")]
    Signals {
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize report as json: {source}")]
    SerializeReport {
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Git(#[from] GitError),
    #[error(transparent)]
    Revup(#[from] RevupError),
    #[error(transparent)]
    CommitMsg(#[from] CommitMsgError),
}

fn main() {
    if let Err(err) = run() {
        eprintln!("revwatch failed: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), MainError> {
    let mut argv = env::args();
    let program = argv.next().unwrap_or_else(|| "revwatch".to_string());
    let command = parse_cli_args(argv.collect::<Vec<_>>(), &program)?;

    match command {
        CliCommand::Help(text) => {
            println!("{text}");
            Ok(())
        }
        CliCommand::Probe(args) => run_probe(args),
        CliCommand::Topics(args) => run_topics(args),
        CliCommand::CommitTopics(args) => run_commit_topics(args),
        CliCommand::Doctor(args) => run_doctor(args),
        CliCommand::Watch(args) => run_watch(args),
        CliCommand::PrepareCommitMsg(args) => run_prepare_commit_msg(args),
    }
}

#[derive(Debug, Serialize)]
struct ProbeReport {
    installed: bool,
    version: Option<String>,
}

fn run_probe(args: ProbeCliArgs) -> Result<(), MainError> {
    let config = resolve_config(args.config_path.as_deref())?;
    let client = RevupClient::with_cli(".", RevupCli::new(config.revup_binary.clone()));

    let report = match client.probe_version() {
        Ok(output) => ProbeReport {
            installed: true,
            version: Some(output.stdout.trim().to_string()),
        },
        Err(err) => {
            eprintln!("[watch] revup probe failed: {err}");
            ProbeReport {
                installed: false,
                version: None,
            }
        }
    };

    if args.json {
        println!("{}", to_json(&report)?);
    } else if report.installed {
        println!(
            "revup installed ({})",
            report.version.as_deref().unwrap_or("unknown version")
        );
    } else {
        println!("revup not installed");
    }
    Ok(())
}

fn run_topics(args: TopicsCliArgs) -> Result<(), MainError> {
    let config = resolve_config(args.config_path.as_deref())?;
    let git = GitCli::new(config.git_binary.clone());
    let root = resolve_root(args.root.as_deref(), &git)?;

    let client = RevupClient::with_cli(root, RevupCli::new(config.revup_binary.clone()));
    let snapshot = client.list_topics()?;

    if args.json {
        println!("{}", to_json(&snapshot.topics)?);
    } else {
        for topic in &snapshot.topics {
            println!("{topic}");
        }
    }
    Ok(())
}

fn run_commit_topics(args: CommitTopicsCliArgs) -> Result<(), MainError> {
    let config = resolve_config(args.config_path.as_deref())?;
    let git = GitCli::new(config.git_binary.clone());
    let root = resolve_root(args.root.as_deref(), &git)?;

    let topics = all_commit_topics(&root, &git)?;
    if args.json {
        println!("{}", to_json(&topics)?);
    } else {
        for topic in &topics {
            println!("{topic}");
        }
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    revup_installed: bool,
    revup_version: Option<String>,
    git_repository: bool,
    root: Option<PathBuf>,
    user_email: Option<String>,
    user_name: Option<String>,
    config: WatchConfig,
    issues: Vec<ValidationIssue>,
}

fn run_doctor(args: DoctorCliArgs) -> Result<(), MainError> {
    // Doctor reports findings instead of failing on them, so config
    // issues land in the report rather than aborting the run.
    let config = match args.config_path.as_deref() {
        Some(path) => load_watch_config(path).map_err(|source| MainError::LoadConfig {
            path: path.to_path_buf(),
            source,
        })?,
        None => WatchConfig::default(),
    };
    let issues = config.validate();

    let git = GitCli::new(config.git_binary.clone());
    let start = start_directory(args.root.as_deref())?;
    let git_repository = is_git_repository(&start, &git)?;
    let root = if git_repository {
        Some(discover_root(&start, &git)?)
    } else {
        None
    };

    let (email, name) = match &root {
        Some(root) => (
            user_email(root, &git).ok(),
            user_name(root, &git).ok(),
        ),
        None => (None, None),
    };

    let client = RevupClient::with_cli(".", RevupCli::new(config.revup_binary.clone()));
    let (revup_installed, revup_version) = match client.probe_version() {
        Ok(output) => (true, Some(output.stdout.trim().to_string())),
        Err(_) => (false, None),
    };

    let report = DoctorReport {
        revup_installed,
        revup_version,
        git_repository,
        root,
        user_email: email,
        user_name: name,
        config,
        issues,
    };

    if args.json {
        println!("{}", to_json(&report)?);
        return Ok(());
    }

    println!(
        "revup: {}",
        match report.revup_version.as_deref() {
            Some(version) => format!("installed ({version})"),
            None => "not installed".to_string(),
        }
    );
    match &report.root {
        Some(root) => println!("repository: {}", root.display()),
        None => println!("repository: not inside a git work tree"),
    }
    println!(
        "identity: {} <{}>",
        report.user_name.as_deref().unwrap_or("(unset)"),
        report.user_email.as_deref().unwrap_or("(unset)")
    );
    for issue in &report.issues {
        let level = match issue.level {
            ValidationLevel::Error => "error",
            ValidationLevel::Warning => "warning",
        };
        println!("config {level} [{}]: {}", issue.code, issue.message);
    }
    Ok(())
}

fn run_watch(args: WatchCliArgs) -> Result<(), MainError> {
    let config = resolve_config(args.config_path.as_deref())?;
    let interval_ms = args.interval_ms.unwrap_or(config.refresh_interval_ms);
    let interval = Duration::from_millis(interval_ms);

    let git = GitCli::new(config.git_binary.clone());
    let root = resolve_root(args.root.as_deref(), &git)?;

    let registry = TrackerRegistry::new(
        interval,
        Arc::new(RevupCli::new(config.revup_binary.clone())),
        Arc::new(StdioPrompt),
        Arc::new(ShellLauncher),
        Arc::new(LogListener),
    );

    let shutdown = Arc::new(AtomicBool::new(false));
    for signal in [
        signal_hook::consts::SIGINT,
        signal_hook::consts::SIGTERM,
    ] {
        signal_hook::flag::register(signal, Arc::clone(&shutdown))
            .map_err(|source| MainError::Signals { source })?;
    }

    eprintln!(
        "[watch] tracking {} every {}ms",
        root.display(),
        interval_ms
    );
    let tracker = registry.tracker_for(&root);
    tracker.probe_installed();

    // While the tool is missing, recheck quietly on the interval so a
    // finished interactive install is picked up without a restart.
    let mut next_recheck = Instant::now() + interval;
    while !shutdown.load(Ordering::SeqCst) {
        thread::sleep(SHUTDOWN_POLL_INTERVAL);
        if tracker.installation_status() != InstallStatus::Installed
            && Instant::now() >= next_recheck
        {
            if tracker.recheck_installed() {
                eprintln!("[watch] revup became available");
            }
            next_recheck = Instant::now() + interval;
        }
    }

    eprintln!("[watch] shutting down");
    registry.dispose_all();
    Ok(())
}

fn run_prepare_commit_msg(args: PrepareCommitMsgCliArgs) -> Result<(), MainError> {
    let config = resolve_config(args.config_path.as_deref())?;
    let git = GitCli::new(config.git_binary.clone());
    let root = resolve_root(args.root.as_deref(), &git)?;

    let client = RevupClient::with_cli(root, RevupCli::new(config.revup_binary.clone()));
    let topics = match client.list_topics() {
        Ok(snapshot) => snapshot.topics,
        Err(err) => {
            eprintln!("[watch] failed to list topics: {err} (injecting template without suggestions)");
            Vec::new()
        }
    };

    let changed = prepare_commit_message(&args.message_path, &topics)?;
    if changed {
        eprintln!(
            "[watch] added topic template to {}",
            args.message_path.display()
        );
    }
    Ok(())
}

fn to_json<T: Serialize>(value: &T) -> Result<String, MainError> {
    serde_json::to_string_pretty(value).map_err(|source| MainError::SerializeReport { source })
}

/// Load and validate the effective config. Warnings log, errors abort.
fn resolve_config(path: Option<&Path>) -> Result<WatchConfig, MainError> {
    let config = match path {
        Some(path) => load_watch_config(path).map_err(|source| MainError::LoadConfig {
            path: path.to_path_buf(),
            source,
        })?,
        None => WatchConfig::default(),
    };

    let issues = config.validate();
    let mut errors = Vec::new();
    for issue in &issues {
        match issue.level {
            ValidationLevel::Warning => {
                eprintln!("[watch] config warning [{}]: {}", issue.code, issue.message);
            }
            ValidationLevel::Error => errors.push(format!("[{}] {}", issue.code, issue.message)),
        }
    }
    if !errors.is_empty() {
        return Err(MainError::InvalidConfig(format!(
            "invalid config: {}",
            errors.join("; ")
        )));
    }
    Ok(config)
}

fn start_directory(explicit: Option<&Path>) -> Result<PathBuf, MainError> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => env::current_dir().map_err(|source| MainError::CurrentDir { source }),
    }
}

fn resolve_root(explicit: Option<&Path>, git: &GitCli) -> Result<PathBuf, MainError> {
    let start = start_directory(explicit)?;
    Ok(discover_root(&start, git)?)
}

fn parse_cli_args(args: Vec<String>, program: &str) -> Result<CliCommand, MainError> {
    if args.is_empty() {
        return Ok(CliCommand::Watch(WatchCliArgs::default()));
    }

    match args[0].as_str() {
        "probe" => parse_probe_cli_args(args[1..].to_vec(), program),
        "topics" => parse_topics_cli_args(args[1..].to_vec(), program),
        "commit-topics" => parse_commit_topics_cli_args(args[1..].to_vec(), program),
        "doctor" => parse_doctor_cli_args(args[1..].to_vec(), program),
        "watch" => parse_watch_cli_args(args[1..].to_vec(), program),
        "prepare-commit-msg" => parse_prepare_commit_msg_cli_args(args[1..].to_vec(), program),
        "help" | "--help" | "-h" => Ok(CliCommand::Help(usage(program))),
        _ if args[0].starts_with('-') => parse_watch_cli_args(args, program),
        other => Err(MainError::Args(format!(
            "unknown command: {other}\n\n{}",
            usage(program)
        ))),
    }
}

fn parse_probe_cli_args(args: Vec<String>, program: &str) -> Result<CliCommand, MainError> {
    let mut parsed = ProbeCliArgs {
        config_path: None,
        json: false,
    };

    let mut idx = 0usize;
    while idx < args.len() {
        let arg = &args[idx];
        match arg.as_str() {
            "--help" | "-h" => return Ok(CliCommand::Help(probe_usage(program))),
            "--config" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| MainError::Args("missing value for --config".to_string()))?;
                parsed.config_path = Some(PathBuf::from(value));
            }
            "--json" => {
                parsed.json = true;
            }
            other => {
                return Err(MainError::Args(format!(
                    "unknown probe argument: {other}\n\n{}",
                    probe_usage(program)
                )));
            }
        }
        idx += 1;
    }

    Ok(CliCommand::Probe(parsed))
}

fn parse_topics_cli_args(args: Vec<String>, program: &str) -> Result<CliCommand, MainError> {
    let mut parsed = TopicsCliArgs {
        root: None,
        config_path: None,
        json: false,
    };

    let mut idx = 0usize;
    while idx < args.len() {
        let arg = &args[idx];
        match arg.as_str() {
            "--help" | "-h" => return Ok(CliCommand::Help(topics_usage(program))),
            "--root" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| MainError::Args("missing value for --root".to_string()))?;
                parsed.root = Some(PathBuf::from(value));
            }
            "--config" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| MainError::Args("missing value for --config".to_string()))?;
                parsed.config_path = Some(PathBuf::from(value));
            }
            "--json" => {
                parsed.json = true;
            }
            other => {
                return Err(MainError::Args(format!(
                    "unknown topics argument: {other}\n\n{}",
                    topics_usage(program)
                )));
            }
        }
        idx += 1;
    }

    Ok(CliCommand::Topics(parsed))
}

fn parse_commit_topics_cli_args(args: Vec<String>, program: &str) -> Result<CliCommand, MainError> {
    let mut parsed = CommitTopicsCliArgs {
        root: None,
        config_path: None,
        json: false,
    };

    let mut idx = 0usize;
    while idx < args.len() {
        let arg = &args[idx];
        match arg.as_str() {
            "--help" | "-h" => return Ok(CliCommand::Help(commit_topics_usage(program))),
            "--root" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| MainError::Args("missing value for --root".to_string()))?;
                parsed.root = Some(PathBuf::from(value));
            }
            "--config" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| MainError::Args("missing value for --config".to_string()))?;
                parsed.config_path = Some(PathBuf::from(value));
            }
            "--json" => {
                parsed.json = true;
            }
            other => {
                return Err(MainError::Args(format!(
                    "unknown commit-topics argument: {other}\n\n{}",
                    commit_topics_usage(program)
                )));
            }
        }
        idx += 1;
    }

    Ok(CliCommand::CommitTopics(parsed))
}

fn parse_doctor_cli_args(args: Vec<String>, program: &str) -> Result<CliCommand, MainError> {
    let mut parsed = DoctorCliArgs {
        root: None,
        config_path: None,
        json: false,
    };

    let mut idx = 0usize;
    while idx < args.len() {
        let arg = &args[idx];
        match arg.as_str() {
            "--help" | "-h" => return Ok(CliCommand::Help(doctor_usage(program))),
            "--root" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| MainError::Args("missing value for --root".to_string()))?;
                parsed.root = Some(PathBuf::from(value));
            }
            "--config" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| MainError::Args("missing value for --config".to_string()))?;
                parsed.config_path = Some(PathBuf::from(value));
            }
            "--json" => {
                parsed.json = true;
            }
            other => {
                return Err(MainError::Args(format!(
                    "unknown doctor argument: {other}\n\n{}",
                    doctor_usage(program)
                )));
            }
        }
        idx += 1;
    }

    Ok(CliCommand::Doctor(parsed))
}

fn parse_watch_cli_args(args: Vec<String>, program: &str) -> Result<CliCommand, MainError> {
    let mut parsed = WatchCliArgs::default();

    let mut idx = 0usize;
    while idx < args.len() {
        let arg = &args[idx];
        match arg.as_str() {
            "--help" | "-h" => return Ok(CliCommand::Help(watch_usage(program))),
            "--root" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| MainError::Args("missing value for --root".to_string()))?;
                parsed.root = Some(PathBuf::from(value));
            }
            "--config" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| MainError::Args("missing value for --config".to_string()))?;
                parsed.config_path = Some(PathBuf::from(value));
            }
            "--interval-ms" => {
                idx += 1;
                let value = args.get(idx).ok_or_else(|| {
                    MainError::Args("missing value for --interval-ms".to_string())
                })?;
                let interval_ms = value.parse::<u64>().map_err(|_| {
                    MainError::Args(format!("invalid --interval-ms value: {value} (expected u64)"))
                })?;
                if interval_ms == 0 {
                    return Err(MainError::Args(
                        "invalid --interval-ms value: 0 (must be > 0)".to_string(),
                    ));
                }
                parsed.interval_ms = Some(interval_ms);
            }
            other => {
                return Err(MainError::Args(format!(
                    "unknown watch argument: {other}\n\n{}",
                    watch_usage(program)
                )));
            }
        }
        idx += 1;
    }

    Ok(CliCommand::Watch(parsed))
}

fn parse_prepare_commit_msg_cli_args(
    args: Vec<String>,
    program: &str,
) -> Result<CliCommand, MainError> {
    let mut message_path = None;
    let mut root = None;
    let mut config_path = None;

    let mut idx = 0usize;
    while idx < args.len() {
        let arg = &args[idx];
        match arg.as_str() {
            "--help" | "-h" => return Ok(CliCommand::Help(prepare_commit_msg_usage(program))),
            "--root" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| MainError::Args("missing value for --root".to_string()))?;
                root = Some(PathBuf::from(value));
            }
            "--config" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| MainError::Args("missing value for --config".to_string()))?;
                config_path = Some(PathBuf::from(value));
            }
            other if other.starts_with('-') => {
                return Err(MainError::Args(format!(
                    "unknown prepare-commit-msg argument: {other}\n\n{}",
                    prepare_commit_msg_usage(program)
                )));
            }
            value => {
                if message_path.is_some() {
                    return Err(MainError::Args(format!(
                        "unexpected extra argument: {value}\n\n{}",
                        prepare_commit_msg_usage(program)
                    )));
                }
                message_path = Some(PathBuf::from(value));
            }
        }
        idx += 1;
    }

    let message_path = message_path.ok_or_else(|| {
        MainError::Args(format!(
            "prepare-commit-msg requires a message file path\n\n{}",
            prepare_commit_msg_usage(program)
        ))
    })?;

    Ok(CliCommand::PrepareCommitMsg(PrepareCommitMsgCliArgs {
        message_path,
        root,
        config_path,
    }))
}

fn usage(program: &str) -> String {
    format!(
        "Usage:\n  {program}\n  {program} watch [--root <path>] [--config <path>] [--interval-ms <u64>]\n  {program} probe [--config <path>] [--json]\n  {program} topics [--root <path>] [--config <path>] [--json]\n  {program} commit-topics [--root <path>] [--config <path>] [--json]\n  {program} doctor [--root <path>] [--config <path>] [--json]\n  {program} prepare-commit-msg <path> [--root <path>] [--config <path>]\n\
\nDefaults:\n  {program}: watches the repository containing the current directory\n  --interval-ms 10000\n  --root discovered from the current directory\n  config defaults apply when --config is omitted"
    )
}

fn probe_usage(program: &str) -> String {
    format!(
        "Usage: {program} probe [--config <path>] [--json]\n\
\nNotes:\n  runs `revup --version` and reports whether the tool is installed"
    )
}

fn topics_usage(program: &str) -> String {
    format!(
        "Usage: {program} topics [--root <path>] [--config <path>] [--json]\n\
\nNotes:\n  lists topics reported by `revup toolkit list-topics` for the repository root"
    )
}

fn commit_topics_usage(program: &str) -> String {
    format!(
        "Usage: {program} commit-topics [--root <path>] [--config <path>] [--json]\n\
\nNotes:\n  scans commit messages on all refs for `topic:` tags"
    )
}

fn doctor_usage(program: &str) -> String {
    format!(
        "Usage: {program} doctor [--root <path>] [--config <path>] [--json]\n\
\nNotes:\n  reports revup installation, repository detection, git identity, and config issues"
    )
}

fn prepare_commit_msg_usage(program: &str) -> String {
    format!(
        "Usage: {program} prepare-commit-msg <path> [--root <path>] [--config <path>]\n\
\nNotes:\n  injects a `topic:` template and the known topic list into a fresh commit message\n  install as a git prepare-commit-msg hook: {program} prepare-commit-msg \"$1\""
    )
}

fn watch_usage(program: &str) -> String {
    format!(
        "Usage: {program} watch [--root <path>] [--config <path>] [--interval-ms <u64>]\n\
\nNotes:\n  probes revup, then refreshes the topic list on the interval until interrupted\n  --interval-ms overrides refresh_interval_ms from the config"
    )
}

#[cfg(test)]
mod tests {
    use super::{
        parse_cli_args, resolve_config, usage, CliCommand, DoctorCliArgs, MainError,
        PrepareCommitMsgCliArgs, ProbeCliArgs, TopicsCliArgs, WatchCliArgs,
    };
    use std::io::Write;
    use std::path::PathBuf;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn no_arguments_defaults_to_watch() {
        let parsed = parse_cli_args(Vec::new(), "revwatch").expect("parse empty args");
        assert_eq!(parsed, CliCommand::Watch(WatchCliArgs::default()));
    }

    #[test]
    fn leading_flag_is_treated_as_watch_arguments() {
        let parsed = parse_cli_args(args(&["--interval-ms", "5000"]), "revwatch")
            .expect("parse watch flags");
        assert_eq!(
            parsed,
            CliCommand::Watch(WatchCliArgs {
                interval_ms: Some(5000),
                ..WatchCliArgs::default()
            })
        );
    }

    #[test]
    fn watch_parses_root_config_and_interval() {
        let parsed = parse_cli_args(
            args(&[
                "watch",
                "--root",
                "/srv/repo",
                "--config",
                "/etc/revwatch.toml",
                "--interval-ms",
                "2000",
            ]),
            "revwatch",
        )
        .expect("parse watch args");
        assert_eq!(
            parsed,
            CliCommand::Watch(WatchCliArgs {
                root: Some(PathBuf::from("/srv/repo")),
                config_path: Some(PathBuf::from("/etc/revwatch.toml")),
                interval_ms: Some(2000),
            })
        );
    }

    #[test]
    fn watch_rejects_zero_interval() {
        let err = parse_cli_args(args(&["watch", "--interval-ms", "0"]), "revwatch")
            .expect_err("zero interval should fail");
        assert!(matches!(err, MainError::Args(message) if message.contains("--interval-ms")));
    }

    #[test]
    fn watch_rejects_non_numeric_interval() {
        let err = parse_cli_args(args(&["watch", "--interval-ms", "soon"]), "revwatch")
            .expect_err("non-numeric interval should fail");
        assert!(matches!(err, MainError::Args(message) if message.contains("soon")));
    }

    #[test]
    fn probe_parses_json_flag() {
        let parsed =
            parse_cli_args(args(&["probe", "--json"]), "revwatch").expect("parse probe args");
        assert_eq!(
            parsed,
            CliCommand::Probe(ProbeCliArgs {
                config_path: None,
                json: true,
            })
        );
    }

    #[test]
    fn topics_parses_root_and_json() {
        let parsed = parse_cli_args(args(&["topics", "--root", "/srv/repo", "--json"]), "revwatch")
            .expect("parse topics args");
        assert_eq!(
            parsed,
            CliCommand::Topics(TopicsCliArgs {
                root: Some(PathBuf::from("/srv/repo")),
                config_path: None,
                json: true,
            })
        );
    }

    #[test]
    fn doctor_defaults_are_empty() {
        let parsed = parse_cli_args(args(&["doctor"]), "revwatch").expect("parse doctor args");
        assert_eq!(
            parsed,
            CliCommand::Doctor(DoctorCliArgs {
                root: None,
                config_path: None,
                json: false,
            })
        );
    }

    #[test]
    fn prepare_commit_msg_takes_a_positional_path() {
        let parsed = parse_cli_args(
            args(&[
                "prepare-commit-msg",
                ".git/COMMIT_EDITMSG",
                "--root",
                "/srv/repo",
            ]),
            "revwatch",
        )
        .expect("parse prepare-commit-msg args");
        assert_eq!(
            parsed,
            CliCommand::PrepareCommitMsg(PrepareCommitMsgCliArgs {
                message_path: PathBuf::from(".git/COMMIT_EDITMSG"),
                root: Some(PathBuf::from("/srv/repo")),
                config_path: None,
            })
        );
    }

    #[test]
    fn prepare_commit_msg_requires_the_path() {
        let err = parse_cli_args(args(&["prepare-commit-msg"]), "revwatch")
            .expect_err("missing path should fail");
        assert!(
            matches!(err, MainError::Args(message) if message.contains("requires a message file path"))
        );
    }

    #[test]
    fn prepare_commit_msg_rejects_extra_positional_arguments() {
        let err = parse_cli_args(
            args(&["prepare-commit-msg", "a.txt", "b.txt"]),
            "revwatch",
        )
        .expect_err("second positional should fail");
        assert!(matches!(err, MainError::Args(message) if message.contains("b.txt")));
    }

    #[test]
    fn help_returns_usage_text() {
        let parsed = parse_cli_args(args(&["--help"]), "revwatch").expect("parse help");
        assert_eq!(parsed, CliCommand::Help(usage("revwatch")));
    }

    #[test]
    fn unknown_command_reports_usage() {
        let err = parse_cli_args(args(&["bogus"]), "revwatch").expect_err("unknown command");
        assert!(matches!(err, MainError::Args(message) if message.contains("bogus")));
    }

    #[test]
    fn missing_flag_value_is_an_error() {
        let err = parse_cli_args(args(&["topics", "--root"]), "revwatch")
            .expect_err("missing value should fail");
        assert!(
            matches!(err, MainError::Args(message) if message.contains("missing value for --root"))
        );
    }

    #[test]
    fn resolve_config_uses_defaults_without_a_path() {
        let config = resolve_config(None).expect("default config");
        assert_eq!(config.refresh_interval_ms, 10_000);
    }

    #[test]
    fn resolve_config_reads_overrides_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("create temp config");
        writeln!(file, "refresh_interval_ms = 4000").expect("write temp config");

        let config = resolve_config(Some(file.path())).expect("load config");
        assert_eq!(config.refresh_interval_ms, 4000);
    }

    #[test]
    fn resolve_config_rejects_error_level_issues() {
        let mut file = tempfile::NamedTempFile::new().expect("create temp config");
        writeln!(file, "refresh_interval_ms = 0").expect("write temp config");

        let err = resolve_config(Some(file.path())).expect_err("zero interval should fail");
        assert!(matches!(
            err,
            MainError::InvalidConfig(message) if message.contains("refresh.interval.zero")
        ));
    }

    #[test]
    fn resolve_config_surfaces_missing_files() {
        let err = resolve_config(Some(std::path::Path::new("/definitely/missing/revwatch.toml")))
            .expect_err("missing config should fail");
        assert!(matches!(err, MainError::LoadConfig { .. }));
    }
}
