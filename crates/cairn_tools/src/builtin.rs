//! Built-in local tools.
//!
//! | Tool | Arguments |
//! |------|-----------|
//! | [`TimeTool`] (`get_time`) | none |
//! | [`ListDirectoryTool`] (`list_directory`) | `path` |
//! | [`ReadFileTool`] (`read_file`) | `path` |
//! | [`ExecuteCommandTool`] (`execute_command`) | `args`, optional `workdir` |
//! | [`CommandTool`] (custom name) | optional `workdir` |
//!
//! Processes started by the command tools are killed if they run longer than
//! [`COMMAND_TIMEOUT`].

use crate::args::ToolArgs;
use crate::error::ToolError;
use crate::tool::{Tool, ToolFuture};
use core::time::Duration;
use std::process::Stdio;
use tokio::process::Command;

/// Upper bound on the run time of a command started by a tool.
pub const COMMAND_TIMEOUT: Duration = Duration::from_secs(20);

/// `strftime` pattern for the ANSI C `asctime` layout, e.g. `Mon Jan  2 15:04:05 2006`.
const ANSIC: &str = "%a %b %e %H:%M:%S %Y";

// ─────────────────────────────────────────────────────────────────────
// Clock
// ─────────────────────────────────────────────────────────────────────

/// Reports the current local time.
#[derive(Debug, Default, Clone, Copy)]
pub struct TimeTool;

impl Tool for TimeTool {
    fn name(&self) -> &str {
        "get_time"
    }

    fn description(&self) -> Vec<String> {
        vec![
            "Gets the current time".to_string(),
            "Takes no arguments".to_string(),
        ]
    }

    fn call(&self, _args: ToolArgs) -> ToolFuture<'_> {
        Box::pin(async { Ok(chrono::Local::now().format(ANSIC).to_string()) })
    }
}

// ─────────────────────────────────────────────────────────────────────
// Filesystem
// ─────────────────────────────────────────────────────────────────────

/// Lists the entries of a directory as a type/name table.
#[derive(Debug, Default, Clone, Copy)]
pub struct ListDirectoryTool;

impl Tool for ListDirectoryTool {
    fn name(&self) -> &str {
        "list_directory"
    }

    fn description(&self) -> Vec<String> {
        vec![
            "Lists the contents of a directory (like ls command)".to_string(),
            "Takes one argument: 'path' (string) - the directory path to list".to_string(),
            "If path is empty or not provided, lists current directory".to_string(),
        ]
    }

    fn call(&self, args: ToolArgs) -> ToolFuture<'_> {
        Box::pin(async move {
            let path = match args.optional_str("path")? {
                None | Some("") => ".".to_string(),
                Some(path) => path.to_string(),
            };
            list_directory(&path).await
        })
    }
}

async fn list_directory(path: &str) -> Result<String, ToolError> {
    let read_error =
        |err: std::io::Error| ToolError::execution_error(format!("failed to read directory {path}: {err}"));

    let mut dir = tokio::fs::read_dir(path).await.map_err(read_error)?;
    let mut entries = Vec::new();
    while let Some(entry) = dir.next_entry().await.map_err(read_error)? {
        let is_dir = entry.file_type().await.map_err(read_error)?.is_dir();
        entries.push((entry.file_name().to_string_lossy().into_owned(), is_dir));
    }
    entries.sort();

    let mut out = format!("Contents of directory: {path}\nType\tName\n----\t----\n");
    for (name, is_dir) in entries {
        let kind = if is_dir { "dir" } else { "file" };
        out.push_str(&format!("{kind}\t{name}\n"));
    }
    Ok(out)
}

/// Returns the full text of a file.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReadFileTool;

impl Tool for ReadFileTool {
    fn name(&self) -> &str {
        "read_file"
    }

    fn description(&self) -> Vec<String> {
        vec![
            "Reads and returns the entire content of a file".to_string(),
            "Takes one argument: 'path' (string) - the file path to read".to_string(),
        ]
    }

    fn call(&self, args: ToolArgs) -> ToolFuture<'_> {
        Box::pin(async move {
            let path = args.required_str("path")?;
            let bytes = tokio::fs::read(path).await.map_err(|err| {
                ToolError::execution_error(format!("failed to read file {path}: {err}"))
            })?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        })
    }
}

// ─────────────────────────────────────────────────────────────────────
// Processes
// ─────────────────────────────────────────────────────────────────────

/// Runs an arbitrary command given as an argument list.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExecuteCommandTool;

impl Tool for ExecuteCommandTool {
    fn name(&self) -> &str {
        "execute_command"
    }

    fn description(&self) -> Vec<String> {
        vec![
            "Run a command on the host system.".to_string(),
            "Must specify 'args' as a string list (the first arg is the command).".to_string(),
            "Optionally can also specify 'workdir' as a string, for the dir to run the command in (default is where the user ran you from).".to_string(),
        ]
    }

    fn call(&self, args: ToolArgs) -> ToolFuture<'_> {
        Box::pin(async move {
            let argv = match args.value("args") {
                None => return Err(ToolError::parameter_error("must specify 'args'")),
                Some(serde_json::Value::Array(items)) => items
                    .iter()
                    .map(|item| item.as_str().map(str::to_string))
                    .collect::<Option<Vec<_>>>()
                    .ok_or_else(|| {
                        ToolError::parameter_error("must specify 'args' as a list of strings")
                    })?,
                Some(_) => {
                    return Err(ToolError::parameter_error(
                        "must specify 'args' as a list of strings",
                    ));
                }
            };
            let Some((program, rest)) = argv.split_first() else {
                return Err(ToolError::parameter_error("must specify at least one arg"));
            };
            let workdir = args.optional_str("workdir")?.unwrap_or(".");

            run_command(program, rest, workdir, COMMAND_TIMEOUT).await
        })
    }
}

/// A tool that runs one fixed command, exposed under its own name.
///
/// ```
/// use cairn_tools::Tool;
/// use cairn_tools::builtin::CommandTool;
///
/// let status = CommandTool::new("git_status", ["Shows the working tree status."], "git", ["status"]);
/// assert_eq!(status.name(), "git_status");
/// assert_eq!(status.description().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct CommandTool {
    name: String,
    description: Vec<String>,
    program: String,
    args: Vec<String>,
}

impl CommandTool {
    /// Creates a tool that runs `program` with `args`.
    ///
    /// A line documenting the optional `workdir` argument is appended to the description.
    pub fn new(
        name: impl Into<String>,
        description: impl IntoIterator<Item = impl Into<String>>,
        program: impl Into<String>,
        args: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let mut description: Vec<String> = description.into_iter().map(Into::into).collect();
        description.push(
            "You can also optionally specify a 'workdir' to set the working directory (default .)."
                .to_string(),
        );
        Self {
            name: name.into(),
            description,
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl Tool for CommandTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Vec<String> {
        self.description.clone()
    }

    fn call(&self, args: ToolArgs) -> ToolFuture<'_> {
        Box::pin(async move {
            let workdir = args.optional_str("workdir")?.unwrap_or(".");
            run_command(&self.program, &self.args, workdir, COMMAND_TIMEOUT).await
        })
    }
}

/// Runs a process to completion and returns stdout followed by stderr.
///
/// The process is killed once `timeout` elapses.
async fn run_command(
    program: &str,
    args: &[String],
    workdir: &str,
    timeout: Duration,
) -> Result<String, ToolError> {
    tracing::debug!(program, ?args, workdir, "running command");

    let child = Command::new(program)
        .args(args)
        .current_dir(workdir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|err| ToolError::execution_error(format!("failed to start {program}: {err}")))?;

    // Dropping the timed-out future drops the child, which kills it.
    let output = tokio::time::timeout(timeout, child.wait_with_output())
        .await
        .map_err(|_| {
            tracing::warn!(program, ?timeout, "command timed out");
            ToolError::execution_error(format!("command timed out after {timeout:?}"))
        })?
        .map_err(|err| ToolError::execution_error(err.to_string()))?;

    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));

    if !output.status.success() {
        return Err(ToolError::execution_error(format!(
            "{}\n{combined}",
            output.status
        )));
    }
    Ok(combined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(pairs: &[(&str, serde_json::Value)]) -> ToolArgs {
        pairs
            .iter()
            .map(|(name, value)| (*name, value.clone()))
            .collect()
    }

    #[tokio::test]
    async fn time_has_ansic_shape() {
        let now = TimeTool.call(ToolArgs::new()).await.unwrap();
        let parts: Vec<&str> = now.split_whitespace().collect();
        assert_eq!(parts.len(), 5, "unexpected time layout: {now}");
        assert_eq!(parts[3].matches(':').count(), 2);
    }

    #[tokio::test]
    async fn list_directory_renders_sorted_table() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.txt"), "b").unwrap();
        std::fs::create_dir(dir.path().join("a_dir")).unwrap();
        let path = dir.path().to_string_lossy().into_owned();

        let out = ListDirectoryTool
            .call(args(&[("path", json!(path.clone()))]))
            .await
            .unwrap();

        assert_eq!(
            out,
            format!("Contents of directory: {path}\nType\tName\n----\t----\ndir\ta_dir\nfile\tb.txt\n")
        );
    }

    #[tokio::test]
    async fn list_directory_defaults_to_current_dir() {
        let out = ListDirectoryTool
            .call(args(&[("path", json!(""))]))
            .await
            .unwrap();
        assert!(out.starts_with("Contents of directory: .\n"));
    }

    #[tokio::test]
    async fn list_directory_missing_path_fails() {
        let err = ListDirectoryTool
            .call(args(&[("path", json!("/definitely/not/here"))]))
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("failed to read directory /definitely/not/here"));
    }

    #[tokio::test]
    async fn read_file_returns_contents() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("notes.md");
        std::fs::write(&file, "# notes\nline").unwrap();

        let out = ReadFileTool
            .call(args(&[("path", json!(file.to_string_lossy()))]))
            .await
            .unwrap();
        assert_eq!(out, "# notes\nline");

        let err = ReadFileTool.call(ToolArgs::new()).await.unwrap_err();
        assert_eq!(err.to_string(), "missing required argument: path");
    }

    #[tokio::test]
    async fn execute_command_validates_args() {
        let err = ExecuteCommandTool.call(ToolArgs::new()).await.unwrap_err();
        assert_eq!(err.to_string(), "must specify 'args'");

        let err = ExecuteCommandTool
            .call(args(&[("args", json!([]))]))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "must specify at least one arg");

        let err = ExecuteCommandTool
            .call(args(&[("args", json!("ls"))]))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "must specify 'args' as a list of strings");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn execute_command_runs_in_workdir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("marker"), "").unwrap();

        let out = ExecuteCommandTool
            .call(args(&[
                ("args", json!(["ls"])),
                ("workdir", json!(dir.path().to_string_lossy())),
            ]))
            .await
            .unwrap();
        assert_eq!(out.trim(), "marker");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn slow_command_is_killed_at_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("finished");
        let script = format!("sleep 2; touch {}", marker.display());
        let started = std::time::Instant::now();

        let err = run_command(
            "sh",
            &["-c".to_string(), script],
            ".",
            Duration::from_millis(200),
        )
        .await
        .unwrap_err();

        assert_eq!(err.to_string(), "command timed out after 200ms");
        assert!(started.elapsed() < Duration::from_secs(1), "took {:?}", started.elapsed());

        tokio::time::sleep(Duration::from_millis(2500)).await;
        assert!(!marker.exists(), "command kept running after the timeout");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn command_tool_reports_failure_status() {
        let tool = CommandTool::new("fail", ["Always fails."], "sh", ["-c", "echo oops >&2; exit 3"]);
        let err = tool.call(ToolArgs::new()).await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains('3'), "{message}");
        assert!(message.contains("oops"), "{message}");
    }
}
