//! Engine adapter that runs the analyzer as a child process
//!
//! One child per analysis. The child is killed when the analysis future is
//! dropped, which is how deadlines and client disconnects reach it.

use async_trait::async_trait;
use dfm_config::AnalysisSettings;
use dfm_types::constants::limits::{MAX_ENGINE_DIAGNOSTIC_BYTES, MAX_ENGINE_OUTPUT_BYTES};
use dfm_types::{
	AnalysisEngine, AnalysisError, AnalysisResult, EngineInfo, EngineInvocation, EngineReport,
};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tracing::{debug, warn};

use crate::cap_diagnostic;

#[derive(Debug)]
pub struct SubprocessEngine {
	info: EngineInfo,
	program: String,
	args: Vec<String>,
	working_dir: Option<PathBuf>,
}

impl SubprocessEngine {
	pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
		Self {
			info: EngineInfo::new("subprocess", "Subprocess DFM Engine", env!("CARGO_PKG_VERSION"))
				.with_description("Runs the DFM analyzer as a child process per request"),
			program: program.into(),
			args,
			working_dir: None,
		}
	}

	pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
		self.working_dir = Some(dir.into());
		self
	}

	pub fn from_settings(settings: &AnalysisSettings) -> AnalysisResult<Self> {
		let program = settings
			.program
			.as_deref()
			.map(str::trim)
			.filter(|p| !p.is_empty())
			.ok_or_else(|| AnalysisError::Unavailable {
				reason: "analysis.program is not configured".to_string(),
			})?;

		let engine = Self::new(program, settings.args.clone());
		Ok(match &settings.working_dir {
			Some(dir) => engine.with_working_dir(dir),
			None => engine,
		})
	}

	/// Arguments after the configured ones, in the analyzer's CLI order
	fn invocation_args(invocation: &EngineInvocation) -> Vec<OsString> {
		let mut args: Vec<OsString> = vec![
			invocation.model_path.clone().into_os_string(),
			"--method".into(),
			invocation.method.as_str().into(),
			"--material".into(),
			invocation.material.clone().into(),
			"--finish".into(),
			invocation.finish.clone().into(),
		];
		if let Some(technology) = &invocation.technology {
			args.push("--technology".into());
			args.push(technology.clone().into());
		}
		if invocation.detailed {
			args.push("--detailed".into());
		}
		args
	}
}

/// Parse stdout as a report
///
/// Analyzers may print progress before the document, so when the whole
/// output is not JSON the last line starting with `{` is tried.
fn parse_report(stdout: &str) -> AnalysisResult<EngineReport> {
	let trimmed = stdout.trim();
	if trimmed.is_empty() {
		return Err(AnalysisError::MalformedOutput {
			reason: "engine produced no output".to_string(),
		});
	}

	match EngineReport::from_json(trimmed) {
		Ok(report) => Ok(report),
		Err(whole) => trimmed
			.lines()
			.rev()
			.map(str::trim)
			.find(|line| line.starts_with('{'))
			.map(EngineReport::from_json)
			.unwrap_or(Err(whole)),
	}
}

/// Read a whole stream, or `None` once it grows past `limit`
async fn read_bounded<R: AsyncRead + Unpin>(reader: R, limit: usize) -> std::io::Result<Option<Vec<u8>>> {
	let mut buf = Vec::new();
	let read = reader.take(limit as u64 + 1).read_to_end(&mut buf).await?;
	Ok((read <= limit).then_some(buf))
}

/// Drain a stream keeping at most `limit + 1` trailing bytes
async fn read_tail<R: AsyncRead + Unpin>(mut reader: R, limit: usize) -> std::io::Result<Vec<u8>> {
	let mut tail = Vec::new();
	let mut chunk = [0u8; 8 * 1024];
	loop {
		let n = reader.read(&mut chunk).await?;
		if n == 0 {
			return Ok(tail);
		}
		tail.extend_from_slice(&chunk[..n]);
		if tail.len() > 2 * limit {
			tail.drain(..tail.len() - limit - 1);
		}
	}
}

fn pipe_error(stream: &str, e: std::io::Error) -> AnalysisError {
	AnalysisError::MalformedOutput {
		reason: format!("failed to read engine {}: {}", stream, e),
	}
}

#[async_trait]
impl AnalysisEngine for SubprocessEngine {
	fn engine_info(&self) -> &EngineInfo {
		&self.info
	}

	async fn analyze(&self, invocation: &EngineInvocation) -> AnalysisResult<EngineReport> {
		let mut command = Command::new(&self.program);
		command
			.args(&self.args)
			.args(Self::invocation_args(invocation))
			.stdin(Stdio::null())
			.stdout(Stdio::piped())
			.stderr(Stdio::piped())
			.kill_on_drop(true);
		if let Some(dir) = &self.working_dir {
			command.current_dir(dir);
		}

		debug!(
			"Launching {} for quote {} ({})",
			self.program,
			invocation.quote_id,
			invocation.method.as_str()
		);

		let launch_error = |reason: String| AnalysisError::Launch {
			program: self.program.clone(),
			reason,
		};
		let mut child = command.spawn().map_err(|e| launch_error(e.to_string()))?;
		let (Some(stdout), Some(stderr)) = (child.stdout.take(), child.stderr.take()) else {
			return Err(launch_error("engine pipes were not captured".to_string()));
		};

		let collected = tokio::try_join!(
			async {
				read_bounded(stdout, MAX_ENGINE_OUTPUT_BYTES)
					.await
					.map_err(|e| pipe_error("stdout", e))?
					.ok_or_else(|| AnalysisError::MalformedOutput {
						reason: format!("engine output exceeds {} bytes", MAX_ENGINE_OUTPUT_BYTES),
					})
			},
			async {
				read_tail(stderr, MAX_ENGINE_DIAGNOSTIC_BYTES)
					.await
					.map_err(|e| pipe_error("stderr", e))
			},
			async {
				child
					.wait()
					.await
					.map_err(|e| launch_error(e.to_string()))
			},
		);
		let (stdout, stderr, status) = match collected {
			Ok(collected) => collected,
			Err(e) => {
				warn!("Stopping analysis engine for quote {}: {}", invocation.quote_id, e);
				if let Err(kill) = child.start_kill() {
					debug!("Engine for quote {} already exited: {}", invocation.quote_id, kill);
				}
				return Err(e);
			},
		};

		if !status.success() {
			let stderr = cap_diagnostic(&stderr, MAX_ENGINE_DIAGNOSTIC_BYTES);
			warn!(
				"Analysis engine exited with {} for quote {}",
				status, invocation.quote_id
			);
			return Err(AnalysisError::EngineExit {
				status: status.to_string(),
				stderr,
			});
		}

		parse_report(&String::from_utf8_lossy(&stdout))
	}

	async fn health_check(&self) -> AnalysisResult<bool> {
		if let Some(dir) = &self.working_dir {
			if !dir.is_dir() {
				warn!("Analysis working directory {} is missing", dir.display());
				return Ok(false);
			}
		}

		let program = Path::new(&self.program);
		if program.components().count() > 1 && !program.exists() {
			warn!("Analysis program {} does not exist", self.program);
			return Ok(false);
		}
		Ok(true)
	}
}
