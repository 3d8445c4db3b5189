//! Built-in group epilogues.

use langs_manifest::{InstallMethod, Package, PackageManager};

use super::HookContext;
use crate::{builder::ScriptBuilder, shell, url};

/// Point pip at the configured index.
pub(super) fn python(ctx: &HookContext<'_>, _packages: &[Package]) -> Option<String> {
    let index = ctx.settings().pip_index.as_deref()?;
    let trusted = url::host_of(index)
        .map(|host| format!("trusted-host = {}", host))
        .unwrap_or_default();

    let body = [
        "[global]".to_string(),
        format!("index-url = {}", index),
        trusted,
        "disable-pip-version-check = true".to_string(),
        "timeout = 120".to_string(),
    ];
    let text = ScriptBuilder::new()
        .comment("pip index")
        .heredoc(
            "cat > /etc/pip.conf",
            true,
            body.iter().filter(|line| !line.is_empty()),
        )
        .build();
    Some(text)
}

/// Export `JAVA_HOME` and friends.
///
/// An archive-installed JDK in the group wins; otherwise `JAVA_HOME` is
/// derived from the `java` binary the package manager put on the path.
pub(super) fn java(ctx: &HookContext<'_>, packages: &[Package]) -> Option<String> {
    let archive_jdk = packages
        .iter()
        .find(|p| p.install == InstallMethod::HttpArchive)
        .map(|p| ctx.install_home(p));

    let classpath = [
        "export CLASSPATH=.:\\${JAVA_HOME}/lib:\\${JAVA_HOME}/lib/dt.jar:\\${JAVA_HOME}/lib/tools.jar",
        "export PATH=\\${PATH}:\\${JAVA_HOME}/bin",
    ];

    let builder = ScriptBuilder::new().comment("java environment");
    let builder = match archive_jdk {
        Some(home) => builder.line(&format!("JAVA_HOME={}", home)),
        None => builder.line("JAVA_HOME=$(dirname $(dirname $(readlink -f $(which java))))"),
    };

    let mut body = vec![
        String::new(),
        "# java".to_string(),
        "export JAVA_HOME=${JAVA_HOME}".to_string(),
    ];
    body.extend(classpath.iter().map(|line| line.to_string()));

    Some(
        builder
            .heredoc(&format!("cat >> {}", shell::PROFILE), false, body)
            .build(),
    )
}

/// Create the Go workspace and export `GOPATH`.
pub(super) fn golang(ctx: &HookContext<'_>, _packages: &[Package]) -> Option<String> {
    let workspace = &ctx.settings().go_workspace;
    let builder = ScriptBuilder::new()
        .comment("go workspace")
        .line(&format!("mkdir -p {}", workspace));
    let builder = shell::append_profile(
        builder,
        "go",
        [
            format!("export GOPATH={}", workspace),
            "export PATH=${PATH}:${GOPATH}/bin".to_string(),
        ],
    );
    Some(builder.build())
}

/// Host keys and daemon configuration for remote access.
pub(super) fn ssh(ctx: &HookContext<'_>, _packages: &[Package]) -> Option<String> {
    let password = ctx.settings().root_password.as_deref();

    let text = ScriptBuilder::new()
        .comment("sshd")
        .line("mkdir -p /var/run/sshd")
        .when_some(password, |b, password| {
            b.line(&format!(
                "echo {} | chpasswd",
                shell::quote(&format!("root:{}", password))
            ))
        })
        .line("ssh-keygen -q -t rsa -b 2048 -f /etc/ssh/ssh_host_rsa_key -N ''")
        .line("ssh-keygen -q -t ecdsa -f /etc/ssh/ssh_host_ecdsa_key -N ''")
        .line("ssh-keygen -q -t ed25519 -f /etc/ssh/ssh_host_ed25519_key -N ''")
        .continued(
            "sed -i /etc/ssh/sshd_config",
            [
                "",
                "-e 's/#UsePrivilegeSeparation.*/UsePrivilegeSeparation no/g'",
                "-e 's/UsePAM.*/UsePAM no/g'",
                "-e 's~^#PermitRootLogin yes~PermitRootLogin yes~g'",
                "-e 's~^#UseDNS yes~UseDNS no~g'",
                "-e 's~^\\(.*\\)/usr/libexec/openssh/sftp-server$~\\1internal-sftp~g'",
            ],
            "",
        )
        .build();
    Some(text)
}

/// Relax TLS verification for git and the package manager.
pub(super) fn cert(ctx: &HookContext<'_>, _packages: &[Package]) -> Option<String> {
    let package_manager = match ctx.settings().package_manager {
        PackageManager::Yum => "echo \"sslverify=false\" >> /etc/yum.conf",
        PackageManager::Dnf => "echo \"sslverify=false\" >> /etc/dnf/dnf.conf",
        PackageManager::Apt => {
            "echo 'Acquire::https::Verify-Peer \"false\";' > /etc/apt/apt.conf.d/99langs-insecure"
        }
    };

    let text = ScriptBuilder::new()
        .comment("tls verification")
        .line("git config --global http.sslVerify false")
        .line(package_manager)
        .build();
    Some(text)
}
