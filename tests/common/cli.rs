use assert_cmd::Command;
use std::ffi::OsStr;
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tempfile::TempDir;

#[derive(Debug)]
pub struct ItrackRun {
    pub stdout: String,
    pub stderr: String,
    pub status: std::process::ExitStatus,
    pub duration: Duration,
    pub log_path: PathBuf,
}

impl ItrackRun {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout)
            .unwrap_or_else(|e| panic!("stdout is not JSON ({e}):\n{}", self.stdout))
    }
}

pub struct ItrackWorkspace {
    pub temp_dir: TempDir,
    pub root: PathBuf,
    pub log_dir: PathBuf,
}

impl ItrackWorkspace {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("temp dir");
        let root = temp_dir.path().to_path_buf();
        let log_dir = root.join("logs");
        fs::create_dir_all(&log_dir).expect("log dir");
        Self {
            temp_dir,
            root,
            log_dir,
        }
    }

    /// Workspace with `itrack init` already run.
    pub fn initialized() -> Self {
        let workspace = Self::new();
        let run = run_itrack(&workspace, ["init"], "init");
        assert!(run.status.success(), "init failed: {}", run.stderr);
        workspace
    }

    pub fn slot_path(&self) -> PathBuf {
        self.root.join(".itrack").join("issues.json")
    }
}

pub fn run_itrack<I, S>(workspace: &ItrackWorkspace, args: I, label: &str) -> ItrackRun
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    run_itrack_with_env(
        workspace,
        args,
        std::iter::empty::<(String, String)>(),
        label,
    )
}

pub fn run_itrack_with_env<I, S, E, K, V>(
    workspace: &ItrackWorkspace,
    args: I,
    env_vars: E,
    label: &str,
) -> ItrackRun
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
    E: IntoIterator<Item = (K, V)>,
    K: AsRef<OsStr>,
    V: AsRef<OsStr>,
{
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("itrack"));
    cmd.current_dir(&workspace.root);
    cmd.args(args);
    cmd.env_remove("ITRACK_DIR");
    cmd.env_remove("ITRACK_STORAGE_KEY");
    cmd.env_remove("ITRACK_SEED");
    cmd.env_remove("ITRACK_LOG_FORMAT");
    cmd.envs(env_vars);
    cmd.env("NO_COLOR", "1");
    cmd.env("RUST_LOG", "itrack=debug,itrack_lib=debug");
    cmd.env("RUST_BACKTRACE", "1");
    cmd.env("HOME", &workspace.root);

    let start = Instant::now();
    let output = cmd.output().expect("run itrack");
    let duration = start.elapsed();

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    let log_path = workspace.log_dir.join(format!("{label}.log"));
    let log_body = format!(
        "label: {label}\nduration: {:?}\nstatus: {}\nargs: {:?}\ncwd: {}\n\nstdout:\n{}\n\nstderr:\n{}\n",
        duration,
        output.status,
        cmd.get_args().collect::<Vec<_>>(),
        workspace.root.display(),
        stdout,
        stderr
    );
    fs::write(&log_path, log_body).expect("write log");

    ItrackRun {
        stdout,
        stderr,
        status: output.status,
        duration,
        log_path,
    }
}
