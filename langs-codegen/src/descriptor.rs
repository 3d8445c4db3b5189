//! Image descriptor (Dockerfile) assembly.

use std::path::{Path, PathBuf};

use langs_core::{FileRules, GeneratedFile, SCRIPT_BUILD_ARG};
use langs_manifest::{ImageConfig, Locale};

use crate::{builder::ScriptBuilder, script::SCRIPT_FILE_NAME};

/// Systemd units removed so the container boots like a small VM.
const SYSTEMD_PRUNE: [&str; 8] = [
    "(cd /lib/systemd/system/sysinit.target.wants/; for i in *; do [ $i = systemd-tmpfiles-setup.service ] || rm -f $i; done)",
    "rm -f /lib/systemd/system/multi-user.target.wants/*",
    "rm -f /etc/systemd/system/*.wants/*",
    "rm -f /lib/systemd/system/local-fs.target.wants/*",
    "rm -f /lib/systemd/system/sockets.target.wants/*udev*",
    "rm -f /lib/systemd/system/sockets.target.wants/*initctl*",
    "rm -f /lib/systemd/system/basic.target.wants/*",
    "rm -f /lib/systemd/system/anaconda.target.wants/*",
];

/// A Dockerfile that copies the provisioning script into the base image and
/// runs it in a single layer.
#[derive(Debug, Clone)]
pub struct ImageDescriptor<'a> {
    image: &'a ImageConfig,
    locale: &'a Locale,
    script: String,
}

impl<'a> ImageDescriptor<'a> {
    pub fn new(image: &'a ImageConfig, locale: &'a Locale) -> Self {
        Self {
            image,
            locale,
            script: SCRIPT_FILE_NAME.to_string(),
        }
    }

    /// Default value of the script build argument.
    pub fn script(mut self, script: impl Into<String>) -> Self {
        self.script = script.into();
        self
    }

    /// The descriptor text.
    pub fn text(&self) -> String {
        let image = self.image;
        let locale = self.locale.name();

        let mut steps = Vec::new();
        if image.motd {
            steps.push("echo \"Built in `date \"+%Y%m%dT%H%M%S%z\"`\" >> /etc/motd".to_string());
        }
        steps.push(format!("sh /tmp/${{{}}}", SCRIPT_BUILD_ARG));
        steps.push(format!("rm -f /tmp/${{{}}}", SCRIPT_BUILD_ARG));
        if image.prune_systemd {
            steps.extend(SYSTEMD_PRUNE.iter().map(|s| s.to_string()));
        }

        ScriptBuilder::new()
            .line(&format!("FROM {}", image.base))
            .blank()
            .when_some(image.maintainer.as_deref(), |b, maintainer| {
                b.line(&format!("LABEL maintainer={}", json_string(maintainer)))
                    .blank()
            })
            .line(&format!(
                "ENV LANG={} LC_ALL={} LANGUAGE={}",
                json_string(&locale),
                json_string(&locale),
                json_string(&self.locale.language())
            ))
            .blank()
            .line(&format!("ARG {}={}", SCRIPT_BUILD_ARG, self.script))
            .line(&format!("ADD ${{{}}} /tmp/", SCRIPT_BUILD_ARG))
            .blank()
            .continued("RUN ", steps, ";")
            .when(!image.ports.is_empty(), |b| {
                let ports: Vec<String> = image.ports.iter().map(u16::to_string).collect();
                b.blank().line(&format!("EXPOSE {}", ports.join(" ")))
            })
            .when(!image.volumes.is_empty(), |b| {
                b.blank()
                    .line(&format!("VOLUME {}", json_array(&image.volumes)))
            })
            .blank()
            .line(&format!("CMD {}", json_array(&[image.entrypoint.clone()])))
            .build()
    }
}

impl GeneratedFile for ImageDescriptor<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join("Dockerfile")
    }

    fn rules(&self) -> FileRules {
        FileRules::always_overwrite()
    }

    fn render(&self) -> String {
        self.text()
    }
}

/// Assemble the descriptor for `image`, defaulting the script argument to `script`.
pub fn assemble_image_descriptor(image: &ImageConfig, locale: &Locale, script: &str) -> String {
    ImageDescriptor::new(image, locale).script(script).text()
}

fn json_string(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

fn json_array(items: &[String]) -> String {
    serde_json::Value::from(items.to_vec()).to_string()
}
