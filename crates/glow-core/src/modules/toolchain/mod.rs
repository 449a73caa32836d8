use crate::domain::{GlowError, GlowResult};
use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::OnceLock;

/// Build output directory relative to the simulation source tree.
pub const BUILD_SUBDIR: &str = "build";

/// Configure and build the simulation source tree with CMake. Both tool
/// invocations inherit stdio so build diagnostics stay visible.
pub fn cmake_build(src_dir: &Path) -> GlowResult<()> {
    // CMake needs absolute paths, and the source tree must exist
    let src_dir = src_dir.canonicalize()?;

    let cmake = which("cmake").ok_or_else(|| GlowError::ToolUnavailable {
        name: "cmake".to_string(),
        reason: "not found on PATH".to_string(),
    })?;

    let build_dir = src_dir.join(BUILD_SUBDIR);

    let mut configure = Command::new(&cmake);
    configure
        .arg(format!("-S{}", src_dir.display()))
        .arg(format!("-B{}", build_dir.display()));
    if cfg!(windows) && env::var_os("CMAKE_GENERATOR").is_none() {
        configure.args(["-G", "MinGW Makefiles"]);
    }
    run_build_step(configure, "configure")?;

    let mut build = Command::new(&cmake);
    build.arg("--build").arg(&build_dir).arg("--parallel");
    run_build_step(build, "build")
}

fn run_build_step(mut command: Command, step: &str) -> GlowResult<()> {
    let status = command.status()?;
    if !status.success() {
        return Err(GlowError::BuildFailure {
            step: step.to_string(),
            status,
        });
    }
    Ok(())
}

/// Lazily resolved path of the native simulation executable. The resolved
/// path is cached write-once for the lifetime of this value; a failed
/// resolution is not cached, so the next call re-attempts the build.
#[derive(Debug)]
pub struct GlowExecutable {
    name: String,
    source_dir: PathBuf,
    resolved: OnceLock<PathBuf>,
}

impl GlowExecutable {
    pub fn new(name: impl Into<String>, source_dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            source_dir: source_dir.into(),
            resolved: OnceLock::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return a usable executable path, building the source tree on a
    /// cache miss. Repeated calls after a success are cheap.
    pub fn resolve(&self) -> GlowResult<PathBuf> {
        if let Some(path) = self.resolved.get() {
            return Ok(path.clone());
        }

        let bin_dir = self.source_dir.join(BUILD_SUBDIR);
        let path = match which_in(&bin_dir, &self.name) {
            Some(path) => path,
            None => {
                cmake_build(&self.source_dir)?;
                which_in(&bin_dir, &self.name).ok_or_else(|| GlowError::ToolUnavailable {
                    name: self.name.clone(),
                    reason: format!(
                        "not present in '{}' after CMake build",
                        bin_dir.display()
                    ),
                })?
            }
        };

        Ok(self.resolved.get_or_init(|| path).clone())
    }
}

/// Minimal PATH walk, the moral equivalent of `shutil.which`.
pub fn which(name: &str) -> Option<PathBuf> {
    let path_var = env::var_os("PATH")?;
    env::split_paths(&path_var).find_map(|dir| executable_in(&dir, name))
}

pub fn which_in(dir: &Path, name: &str) -> Option<PathBuf> {
    executable_in(dir, name)
}

fn executable_in(dir: &Path, name: &str) -> Option<PathBuf> {
    let candidate = dir.join(name);
    if is_executable(&candidate) {
        return Some(candidate);
    }
    if cfg!(windows) {
        let candidate = dir.join(format!("{name}.exe"));
        if candidate.is_file() {
            return Some(candidate);
        }
    }
    None
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
