//! External container image build.

use std::{
    ffi::OsStr,
    io,
    path::Path,
    process::{Command, ExitStatus},
};

use thiserror::Error;
use tracing::info;

use crate::BuildWorkspace;

/// Build argument that carries the script file name into the descriptor.
pub const SCRIPT_BUILD_ARG: &str = "builder_sh";

/// Proxy variables forwarded from the caller's environment.
const PROXY_VARS: [&str; 2] = ["HTTP_PROXY", "HTTPS_PROXY"];

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("failed to prepare the build workspace")]
    Workspace(#[source] io::Error),

    #[error("failed to launch '{program}'")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("image build failed ({status})")]
    Failed { status: ExitStatus },
}

/// A configured invocation of an external image build tool.
///
/// # Example
///
/// ```ignore
/// let build = ImageBuild::new("langs:latest").proxies_from_env();
/// build.invoke(&dockerfile, &script)?;
/// ```
#[derive(Debug, Clone)]
pub struct ImageBuild {
    program: String,
    image: String,
    force_rm: bool,
    no_cache: bool,
    pull: bool,
    build_args: Vec<(String, String)>,
}

impl ImageBuild {
    /// A `docker build` of `image` with intermediate containers removed and
    /// the layer cache disabled.
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            program: "docker".to_string(),
            image: image.into(),
            force_rm: true,
            no_cache: true,
            pull: false,
            build_args: Vec::new(),
        }
    }

    /// Use a different build tool (e.g. `podman`).
    pub fn program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Always attempt to pull a newer base image.
    pub fn pull(mut self, pull: bool) -> Self {
        self.pull = pull;
        self
    }

    pub fn no_cache(mut self, no_cache: bool) -> Self {
        self.no_cache = no_cache;
        self
    }

    /// Add a `--build-arg KEY=VALUE`.
    pub fn build_arg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.build_args.push((key.into(), value.into()));
        self
    }

    /// Forward `HTTP_PROXY` and `HTTPS_PROXY` when they are set.
    pub fn proxies_from_env(self) -> Self {
        self.proxies_from(|key| std::env::var(key).ok())
    }

    /// Forward proxy variables resolved through `lookup`.
    pub fn proxies_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        for key in PROXY_VARS {
            if let Some(value) = lookup(key).filter(|v| !v.is_empty()) {
                self.build_args.push((key.to_string(), value));
            }
        }
        self
    }

    /// The image reference the result is tagged with.
    pub fn image(&self) -> &str {
        &self.image
    }

    /// The tool program name.
    pub fn program_name(&self) -> &str {
        &self.program
    }

    /// Build the command for a descriptor and script inside `context`.
    pub fn command(&self, context: &Path, descriptor: &Path, script_name: &str) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("build");
        if self.force_rm {
            cmd.arg("--force-rm");
        }
        if self.no_cache {
            cmd.arg("--no-cache");
        }
        if self.pull {
            cmd.arg("--pull");
        }
        for (key, value) in &self.build_args {
            cmd.arg("--build-arg").arg(format!("{}={}", key, value));
        }
        cmd.arg("--build-arg")
            .arg(format!("{}={}", SCRIPT_BUILD_ARG, script_name))
            .arg("-t")
            .arg(&self.image)
            .arg("-f")
            .arg(descriptor)
            .arg(context)
            .current_dir(context);
        cmd
    }

    /// Render a command as a single display line.
    pub fn command_line(cmd: &Command) -> String {
        std::iter::once(cmd.get_program())
            .chain(cmd.get_args())
            .map(OsStr::to_string_lossy)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Write both artifacts to a fresh workspace and run the build.
    ///
    /// Tool output is streamed to the caller's terminal. The workspace is
    /// removed before returning, on success and on failure.
    pub fn invoke(&self, descriptor: &str, script: &str) -> Result<(), BuildError> {
        let workspace = BuildWorkspace::new().map_err(BuildError::Workspace)?;
        self.invoke_in(&workspace, descriptor, script)
    }

    /// Like [`ImageBuild::invoke`], using an existing workspace.
    pub fn invoke_in(
        &self,
        workspace: &BuildWorkspace,
        descriptor: &str,
        script: &str,
    ) -> Result<(), BuildError> {
        let descriptor_path = workspace
            .add("Dockerfile.", "", descriptor)
            .map_err(BuildError::Workspace)?;
        let script_path = workspace
            .add("langs-", ".sh", script)
            .map_err(BuildError::Workspace)?;
        let script_name = script_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut cmd = self.command(workspace.path(), &descriptor_path, &script_name);
        info!(command = %Self::command_line(&cmd), "running image build");

        let status = cmd.status().map_err(|source| BuildError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        if status.success() {
            info!(image = %self.image, "image build finished");
            Ok(())
        } else {
            Err(BuildError::Failed { status })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn args(cmd: &Command) -> Vec<String> {
        cmd.get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_command_flags() {
        let build = ImageBuild::new("langs:latest");
        let cmd = build.command(
            Path::new("/tmp/ctx"),
            Path::new("/tmp/ctx/Dockerfile.abc"),
            "langs-xyz.sh",
        );

        assert_eq!(cmd.get_program(), "docker");
        assert_eq!(
            args(&cmd),
            [
                "build",
                "--force-rm",
                "--no-cache",
                "--build-arg",
                "builder_sh=langs-xyz.sh",
                "-t",
                "langs:latest",
                "-f",
                "/tmp/ctx/Dockerfile.abc",
                "/tmp/ctx",
            ]
        );
        assert_eq!(cmd.get_current_dir(), Some(Path::new("/tmp/ctx")));
    }

    #[test]
    fn test_proxies_are_forwarded_when_set() {
        let build = ImageBuild::new("langs:latest").proxies_from(|key| match key {
            "HTTP_PROXY" => Some("http://proxy:3128".to_string()),
            "HTTPS_PROXY" => Some(String::new()),
            _ => None,
        });
        let cmd = build.command(Path::new("/ctx"), Path::new("/ctx/D"), "s.sh");
        let args = args(&cmd);

        assert!(args.contains(&"HTTP_PROXY=http://proxy:3128".to_string()));
        assert!(!args.iter().any(|a| a.starts_with("HTTPS_PROXY")));
    }

    #[test]
    fn test_program_and_pull() {
        let build = ImageBuild::new("dev:1").program("podman").pull(true);
        let cmd = build.command(Path::new("/ctx"), Path::new("/ctx/D"), "s.sh");

        assert_eq!(cmd.get_program(), "podman");
        assert_eq!(args(&cmd)[..4], ["build", "--force-rm", "--no-cache", "--pull"]);
    }

    #[test]
    fn test_command_line() {
        let build = ImageBuild::new("langs:latest").no_cache(false);
        let cmd = build.command(Path::new("/ctx"), &PathBuf::from("/ctx/D"), "s.sh");

        assert_eq!(
            ImageBuild::command_line(&cmd),
            "docker build --force-rm --build-arg builder_sh=s.sh -t langs:latest -f /ctx/D /ctx"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_invoke_success() {
        let build = ImageBuild::new("langs:latest").program("true");
        build.invoke("FROM scratch\n", "#!/bin/sh\n").unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_invoke_failure_reports_status_and_cleans_up() {
        let workspace = BuildWorkspace::new().unwrap();
        let root = workspace.path().to_path_buf();

        let build = ImageBuild::new("langs:latest").program("false");
        let err = build
            .invoke_in(&workspace, "FROM scratch\n", "#!/bin/sh\n")
            .unwrap_err();
        assert!(matches!(err, BuildError::Failed { .. }));

        drop(workspace);
        assert!(!root.exists());
    }

    #[test]
    fn test_invoke_missing_program() {
        let build = ImageBuild::new("langs:latest").program("langs-no-such-build-tool");
        let err = build.invoke("FROM scratch\n", "#!/bin/sh\n").unwrap_err();
        assert!(matches!(err, BuildError::Spawn { .. }));
    }
}
