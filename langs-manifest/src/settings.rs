//! The `[image]` and `[generator]` tables.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Image descriptor configuration (`[image]`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImageConfig {
    /// Image repository name used to tag the result.
    pub name: String,
    pub tag: String,
    /// Base image reference (`FROM`).
    pub base: String,
    pub maintainer: Option<String>,
    /// Ports declared with `EXPOSE`.
    pub ports: Vec<u16>,
    /// Mount points declared with `VOLUME`.
    pub volumes: Vec<String>,
    /// Entry-point script written by the build script and used as `CMD`.
    pub entrypoint: String,
    /// Remove systemd units that do not make sense inside a container.
    pub prune_systemd: bool,
    /// Append the build time to `/etc/motd`.
    pub motd: bool,
}

impl ImageConfig {
    /// The `name:tag` reference passed to the build tool.
    pub fn reference(&self) -> String {
        format!("{}:{}", self.name, self.tag)
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            name: "langs".to_string(),
            tag: "latest".to_string(),
            base: "centos:centos7".to_string(),
            maintainer: None,
            ports: vec![22, 8080, 34433],
            volumes: vec!["/sys/fs/cgroup".to_string()],
            entrypoint: "/usr/sbin/forever".to_string(),
            prune_systemd: true,
            motd: true,
        }
    }
}

/// Generator configuration (`[generator]`).
///
/// These are the process-wide defaults of the script renderer. They are
/// passed to the renderer at construction, never read from globals.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Internal mirror that replaces the scheme and host of download URLs.
    pub mirror: Option<String>,
    /// Scratch directory inside the image, removed at the end of the script.
    pub build_root: String,
    /// Parent directory of every archive install home.
    pub install_root: String,
    pub package_manager: PackageManager,
    pub locale: Locale,
    /// Repository definition file that replaces the distribution defaults.
    pub repo_file: Option<String>,
    /// Python package index written to `/etc/pip.conf`.
    pub pip_index: Option<String>,
    /// Host serving rustup dist files and the crates.io index.
    pub rustup_mirror: Option<String>,
    /// `GOPATH` for the golang group.
    pub go_workspace: String,
    pub root_password: Option<String>,
}

impl Settings {
    /// The mirror with any trailing slash removed.
    pub fn mirror(&self) -> Option<&str> {
        self.mirror
            .as_deref()
            .map(|m| m.trim_end_matches('/'))
            .filter(|m| !m.is_empty())
    }

    /// The build root, always ending with a slash.
    pub fn build_root(&self) -> String {
        with_trailing_slash(&self.build_root)
    }

    /// The install root, without a trailing slash.
    pub fn install_root(&self) -> &str {
        let trimmed = self.install_root.trim_end_matches('/');
        if trimmed.is_empty() { "/" } else { trimmed }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mirror: None,
            build_root: "/tmp/langs-build-directory/".to_string(),
            install_root: "/opt".to_string(),
            package_manager: PackageManager::default(),
            locale: Locale::default(),
            repo_file: None,
            pip_index: None,
            rustup_mirror: None,
            go_workspace: "${HOME}/gowork".to_string(),
            root_password: None,
        }
    }
}

fn with_trailing_slash(path: &str) -> String {
    if path.ends_with('/') {
        path.to_string()
    } else {
        format!("{}/", path)
    }
}

/// Distribution package manager used inside the image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    #[default]
    Yum,
    Dnf,
    Apt,
}

impl PackageManager {
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageManager::Yum => "yum",
            PackageManager::Dnf => "dnf",
            PackageManager::Apt => "apt",
        }
    }

    /// Command prefix that installs registry packages non-interactively.
    pub fn install_command(&self) -> &'static str {
        match self {
            PackageManager::Yum => "yum install -y",
            PackageManager::Dnf => "dnf install -y",
            PackageManager::Apt => "DEBIAN_FRONTEND=noninteractive apt-get install -y",
        }
    }

    /// Command that refreshes the package metadata cache.
    pub fn refresh_command(&self) -> &'static str {
        match self {
            PackageManager::Yum => "yum makecache",
            PackageManager::Dnf => "dnf makecache",
            PackageManager::Apt => "apt-get update",
        }
    }

    /// Command that drops cached package data.
    pub fn clean_command(&self) -> &'static str {
        match self {
            PackageManager::Yum => "yum clean all",
            PackageManager::Dnf => "dnf clean all",
            PackageManager::Apt => "apt-get clean && rm -rf /var/lib/apt/lists/*",
        }
    }

    /// Command prefix that installs a downloaded package file.
    pub fn local_install_command(&self) -> &'static str {
        match self {
            PackageManager::Yum | PackageManager::Dnf => "rpm -ivh",
            PackageManager::Apt => "dpkg -i",
        }
    }

    /// Version-qualified package name in this package manager's syntax.
    pub fn qualify(&self, name: &str, version: Option<&str>) -> String {
        match (self, version) {
            (_, None) => name.to_string(),
            (PackageManager::Yum | PackageManager::Dnf, Some(v)) => format!("{}-{}", name, v),
            (PackageManager::Apt, Some(v)) => format!("{}={}", name, v),
        }
    }

    /// Command that restores the locale definitions stripped from slim base images.
    pub fn locale_data_command(&self) -> &'static str {
        match self {
            PackageManager::Yum => "yum reinstall -y glibc-common",
            PackageManager::Dnf => "dnf reinstall -y glibc-common",
            PackageManager::Apt => {
                "DEBIAN_FRONTEND=noninteractive apt-get install --reinstall -y locales"
            }
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A POSIX locale such as `en_US.UTF-8`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locale {
    /// Language and territory, e.g. `en_US`.
    territory: String,
    /// Character set, e.g. `UTF-8`.
    charset: String,
}

impl Locale {
    /// The full locale name (`LANG`/`LC_ALL`).
    pub fn name(&self) -> String {
        format!("{}.{}", self.territory, self.charset)
    }

    pub fn territory(&self) -> &str {
        &self.territory
    }

    pub fn charset(&self) -> &str {
        &self.charset
    }

    /// The `LANGUAGE` priority list, e.g. `en_US:en`.
    pub fn language(&self) -> String {
        let lang = self
            .territory
            .split('_')
            .next()
            .unwrap_or(&self.territory);
        format!("{}:{}", self.territory, lang)
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self {
            territory: "en_US".to_string(),
            charset: "UTF-8".to_string(),
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (territory, charset) = s
            .split_once('.')
            .ok_or_else(|| format!("invalid locale '{}', expected 'xx_YY.CHARSET'", s))?;
        let valid = |part: &str| {
            !part.is_empty()
                && part
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '@')
        };
        if !valid(territory) || !valid(charset) {
            return Err(format!("invalid locale '{}', expected 'xx_YY.CHARSET'", s));
        }
        Ok(Self {
            territory: territory.to_string(),
            charset: charset.to_string(),
        })
    }
}

impl TryFrom<String> for Locale {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.name()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.territory, self.charset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let image = ImageConfig::default();
        assert_eq!(image.reference(), "langs:latest");
        assert_eq!(image.ports, vec![22, 8080, 34433]);
        assert_eq!(image.entrypoint, "/usr/sbin/forever");

        let settings = Settings::default();
        assert_eq!(settings.mirror(), None);
        assert_eq!(settings.build_root(), "/tmp/langs-build-directory/");
        assert_eq!(settings.install_root(), "/opt");
    }

    #[test]
    fn test_mirror_trims_trailing_slash() {
        let settings = Settings {
            mirror: Some("http://mirror.internal/".to_string()),
            ..Settings::default()
        };
        assert_eq!(settings.mirror(), Some("http://mirror.internal"));

        let empty = Settings {
            mirror: Some(String::new()),
            ..Settings::default()
        };
        assert_eq!(empty.mirror(), None);
    }

    #[test]
    fn test_build_root_gets_trailing_slash() {
        let settings = Settings {
            build_root: "/tmp/build".to_string(),
            install_root: "/usr/local/".to_string(),
            ..Settings::default()
        };
        assert_eq!(settings.build_root(), "/tmp/build/");
        assert_eq!(settings.install_root(), "/usr/local");
    }

    #[test]
    fn test_qualify() {
        assert_eq!(PackageManager::Yum.qualify("golang", None), "golang");
        assert_eq!(
            PackageManager::Yum.qualify("golang", Some("1.14")),
            "golang-1.14"
        );
        assert_eq!(
            PackageManager::Apt.qualify("golang", Some("1.14")),
            "golang=1.14"
        );
    }

    #[test]
    fn test_locale_data_is_reinstalled() {
        assert_eq!(
            PackageManager::Yum.locale_data_command(),
            "yum reinstall -y glibc-common"
        );
        assert_eq!(
            PackageManager::Dnf.locale_data_command(),
            "dnf reinstall -y glibc-common"
        );
        assert!(PackageManager::Apt
            .locale_data_command()
            .ends_with("apt-get install --reinstall -y locales"));
    }

    #[test]
    fn test_locale() {
        let locale: Locale = "zh_CN.UTF-8".parse().unwrap();
        assert_eq!(locale.name(), "zh_CN.UTF-8");
        assert_eq!(locale.territory(), "zh_CN");
        assert_eq!(locale.language(), "zh_CN:zh");

        assert!("zh_CN".parse::<Locale>().is_err());
        assert!("zh CN.UTF-8".parse::<Locale>().is_err());
    }

    #[test]
    fn test_settings_deserialize() {
        let settings: Settings = toml::from_str(
            r#"
            mirror = "http://mirror.internal"
            package_manager = "apt"
            locale = "zh_CN.UTF-8"
        "#,
        )
        .unwrap();

        assert_eq!(settings.package_manager, PackageManager::Apt);
        assert_eq!(settings.locale.language(), "zh_CN:zh");
        assert_eq!(settings.install_root(), "/opt");
    }

    #[test]
    fn test_settings_rejects_unknown_keys() {
        let result: Result<Settings, _> = toml::from_str(r#"mirorr = "typo""#);
        assert!(result.is_err());
    }
}
