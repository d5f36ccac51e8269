//! # Git Invocation
//!
//! Every change this tool makes goes through the system `git` command, which
//! brings along whatever SSH keys, credential helpers and `~/.gitconfig`
//! settings the operator already has. Git is never asked to prompt on the
//! terminal (`GIT_TERMINAL_PROMPT=0`): an authentication request fails the
//! command instead of stealing the operator's input.
//!
//! [`GitRunner`] is the seam between the workflow and the process: the
//! registrar and the delete/move pipelines only ever see the trait, and tests
//! swap in recording fakes.

use std::ffi::OsString;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::{debug, info};
use serde::Serialize;

use crate::error::{Error, Result};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Runs git commands inside one working directory.
pub trait GitRunner {
    /// Run `git <args>` and return its standard output.
    ///
    /// With a `timeout`, the process is killed once it runs longer and
    /// [`Error::GitTimeout`] is returned.
    fn run(&self, args: &[&str], timeout: Option<Duration>) -> Result<String>;

    /// The directory the commands run in.
    fn work_dir(&self) -> &Path;
}

/// [`GitRunner`] backed by the `git` executable.
#[derive(Debug, Clone)]
pub struct SystemGit {
    program: OsString,
    work_dir: PathBuf,
}

impl SystemGit {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self::with_program("git", work_dir)
    }

    /// Use another executable in place of `git`.
    pub fn with_program(program: impl Into<OsString>, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            work_dir: work_dir.into(),
        }
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(args)
            .current_dir(&self.work_dir)
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null());
        cmd
    }

    fn run_with_timeout(&self, args: &[&str], limit: Duration) -> Result<String> {
        let command = args.join(" ");
        let mut cmd = self.command(args);
        // Own process group, so a timeout also stops the clone git spawns.
        #[cfg(unix)]
        std::os::unix::process::CommandExt::process_group(&mut cmd, 0);
        let mut child = cmd
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| spawn_error(&command, &e))?;

        let stdout = child.stdout.take().map(drain);
        let stderr = child.stderr.take().map(drain);

        let deadline = Instant::now() + limit;
        let status = loop {
            if let Some(status) = child.try_wait()? {
                break status;
            }
            if Instant::now() >= deadline {
                debug!("Killing git {} after {:?}", command, limit);
                kill_tree(&mut child);
                return Err(Error::GitTimeout {
                    command,
                    timeout: limit,
                });
            }
            thread::sleep(POLL_INTERVAL);
        };

        finish(command, status, collect(stdout), collect(stderr))
    }
}

impl GitRunner for SystemGit {
    fn run(&self, args: &[&str], timeout: Option<Duration>) -> Result<String> {
        info!("Running git {} in {}", args.join(" "), self.work_dir.display());

        match timeout {
            Some(limit) => self.run_with_timeout(args, limit),
            None => {
                let command = args.join(" ");
                let output = self
                    .command(args)
                    .output()
                    .map_err(|e| spawn_error(&command, &e))?;
                finish(command, output.status, output.stdout, output.stderr)
            }
        }
    }

    fn work_dir(&self) -> &Path {
        &self.work_dir
    }
}

/// Kill `child` and every process in its group.
fn kill_tree(child: &mut Child) {
    kill_group(child);
    // The child may exit on its own between try_wait and kill.
    let _ = child.kill();
    let _ = child.wait();
}

#[cfg(unix)]
fn kill_group(child: &Child) {
    if let Ok(pid) = libc::pid_t::try_from(child.id()) {
        // SAFETY: kill(2) with a negative pid only signals that process group.
        unsafe {
            libc::kill(-pid, libc::SIGKILL);
        }
    }
}

#[cfg(not(unix))]
fn kill_group(_child: &Child) {}

fn drain<R: Read + Send + 'static>(mut reader: R) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = reader.read_to_end(&mut buf);
        buf
    })
}

fn collect(handle: Option<JoinHandle<Vec<u8>>>) -> Vec<u8> {
    handle.and_then(|h| h.join().ok()).unwrap_or_default()
}

fn spawn_error(command: &str, err: &std::io::Error) -> Error {
    Error::GitCommand {
        command: command.to_string(),
        stderr: format!("failed to start git: {}", err),
    }
}

fn finish(command: String, status: ExitStatus, stdout: Vec<u8>, stderr: Vec<u8>) -> Result<String> {
    if status.success() {
        return Ok(String::from_utf8_lossy(&stdout).into_owned());
    }

    let stderr = String::from_utf8_lossy(&stderr).trim().to_string();
    let stderr = if stderr.is_empty() {
        match status.code() {
            Some(code) => format!("exited with status {}", code),
            None => "terminated by signal".to_string(),
        }
    } else {
        stderr
    };
    Err(Error::GitCommand { command, stderr })
}

/// Whether `dir` already has git metadata (a `.git` directory or gitfile).
pub fn has_repository(dir: &Path) -> bool {
    dir.join(crate::defaults::METADATA_DIR).exists()
}

/// `git init`
pub fn init(git: &dyn GitRunner) -> Result<()> {
    git.run(&["init"], None).map(|_| ())
}

/// `git submodule add -- <url> <destination>`, bounded by `timeout`.
pub fn submodule_add(
    git: &dyn GitRunner,
    url: &str,
    destination: &str,
    timeout: Duration,
) -> Result<()> {
    git.run(&["submodule", "add", "--", url, destination], Some(timeout))
        .map(|_| ())
}

/// A submodule declared in `.gitmodules`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submodule {
    pub name: String,
    pub path: String,
}

/// Read the submodules declared in the work tree's `.gitmodules`.
pub fn list_submodules(git: &dyn GitRunner) -> Result<Vec<Submodule>> {
    if !git.work_dir().join(".gitmodules").is_file() {
        return Ok(Vec::new());
    }

    let output = git.run(
        &[
            "config",
            "--file",
            ".gitmodules",
            "--get-regexp",
            r"^submodule\..*\.path$",
        ],
        None,
    );
    match output {
        Ok(stdout) => Ok(parse_submodule_paths(&stdout)),
        // `git config --get-regexp` exits 1 without output when nothing matches
        Err(Error::GitCommand { stderr, .. }) if stderr.starts_with("exited with status 1") => {
            Ok(Vec::new())
        }
        Err(err) => Err(err),
    }
}

/// Parse `submodule.<name>.path <path>` lines.
pub fn parse_submodule_paths(output: &str) -> Vec<Submodule> {
    output
        .lines()
        .filter_map(|line| {
            let (key, path) = line.split_once(' ')?;
            let name = key.strip_prefix("submodule.")?.strip_suffix(".path")?;
            Some(Submodule {
                name: name.to_string(),
                path: path.trim().to_string(),
            })
        })
        .collect()
}
