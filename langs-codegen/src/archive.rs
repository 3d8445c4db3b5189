//! Archive format detection and extraction commands.

use std::fmt;

use crate::url::strip_query;

/// Compression formats an http-archive package can be shipped in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchiveFormat {
    TarXz,
    TarGz,
    TarBz,
    TarBz2,
    TarZ,
    Zip,
}

impl ArchiveFormat {
    pub const ALL: [ArchiveFormat; 6] = [
        ArchiveFormat::TarXz,
        ArchiveFormat::TarGz,
        ArchiveFormat::TarBz,
        ArchiveFormat::TarBz2,
        ArchiveFormat::TarZ,
        ArchiveFormat::Zip,
    ];

    /// File name suffix, including the leading dot.
    pub fn suffix(&self) -> &'static str {
        match self {
            ArchiveFormat::TarXz => ".tar.xz",
            ArchiveFormat::TarGz => ".tar.gz",
            ArchiveFormat::TarBz => ".tar.bz",
            ArchiveFormat::TarBz2 => ".tar.bz2",
            ArchiveFormat::TarZ => ".tar.Z",
            ArchiveFormat::Zip => ".zip",
        }
    }

    /// Detect the format from a file name or URL. Query and fragment are ignored.
    pub fn from_url(url: &str) -> Option<Self> {
        let path = strip_query(url);
        Self::ALL
            .into_iter()
            .find(|format| path.ends_with(format.suffix()))
    }

    /// `name` with this format's suffix removed.
    pub fn strip_suffix<'a>(&self, name: &'a str) -> &'a str {
        name.strip_suffix(self.suffix()).unwrap_or(name)
    }

    /// Shell commands that unpack `archive` into the existing directory `dest`.
    pub fn extract_commands(&self, archive: &str, dest: &str) -> Vec<String> {
        match self {
            ArchiveFormat::TarXz => {
                let tarball = archive.strip_suffix(".xz").unwrap_or(archive);
                vec![
                    format!("xz -d {}", archive),
                    format!("tar -xf {} -C {}", tarball, dest),
                ]
            }
            ArchiveFormat::TarGz => vec![format!("tar -zxf {} -C {}", archive, dest)],
            ArchiveFormat::TarBz | ArchiveFormat::TarBz2 => {
                vec![format!("tar -jxf {} -C {}", archive, dest)]
            }
            ArchiveFormat::TarZ => vec![format!("tar -Zxf {} -C {}", archive, dest)],
            ArchiveFormat::Zip => vec![format!("unzip -q {} -d {}", archive, dest)],
        }
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}
