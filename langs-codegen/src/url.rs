//! Download location resolution.

use langs_manifest::Package;

use crate::error::{GenerateError, Result};

/// Schemes that name a network location and are eligible for mirroring.
const NETWORK_SCHEMES: [&str; 4] = ["http", "https", "ftp", "ftps"];

/// Substitute `{name}` and `{version}` in `template`.
///
/// The template is scanned once; substituted values are never rescanned,
/// so a value that itself contains braces is copied as-is. Any other brace
/// sequence is left untouched.
pub fn substitute(template: &str, name: &str, version: Option<&str>) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        if let Some(after) = tail.strip_prefix("{name}") {
            out.push_str(name);
            rest = after;
        } else if let Some(after) = tail.strip_prefix("{version}") {
            let version = version.ok_or_else(|| GenerateError::MissingVersion {
                package: name.to_string(),
            })?;
            out.push_str(version);
            rest = after;
        } else {
            out.push('{');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);

    Ok(out)
}

/// Whether `template` references `{version}`.
pub fn uses_version(template: &str) -> bool {
    template.contains("{version}")
}

/// Resolve the download location of `package`.
///
/// Placeholders are substituted first. When a `mirror` is given, an
/// absolute URL with a network scheme has its scheme and host replaced by
/// `{mirror}/{name}`, keeping the path and query. Anything else (relative
/// paths, `file://` locations) is returned unchanged.
pub fn resolve_url(package: &Package, mirror: Option<&str>) -> Result<String> {
    let template = package
        .url
        .as_deref()
        .ok_or_else(|| GenerateError::MissingUrl {
            package: package.name.clone(),
            install: package.install,
        })?;
    let url = substitute(template, &package.name, package.version.as_deref())?;

    Ok(match mirror {
        Some(mirror) => rewrite_to_mirror(&url, mirror, &package.name),
        None => url,
    })
}

/// Replace scheme and host of a network URL with `{mirror}/{name}`.
pub fn rewrite_to_mirror(url: &str, mirror: &str, name: &str) -> String {
    match split_network_url(url) {
        Some(parts) => format!("{}/{}{}", mirror.trim_end_matches('/'), name, parts.suffix),
        None => url.to_string(),
    }
}

/// Host part of a network URL, without port or credentials.
pub fn host_of(url: &str) -> Option<&str> {
    let parts = split_network_url(url)?;
    let host = parts.authority.rsplit('@').next().unwrap_or(parts.authority);
    let host = match host.rfind(':') {
        Some(i) if !host.ends_with(']') => &host[..i],
        _ => host,
    };
    Some(host)
}

/// File name of the last path segment, ignoring query and fragment.
pub fn file_name(url: &str) -> Option<&str> {
    let path = strip_query(url);
    let path = match split_network_url(path) {
        Some(parts) => parts.suffix,
        None => path,
    };
    path.rsplit('/').next().filter(|n| !n.is_empty())
}

/// `url` without any `?query` or `#fragment`.
pub fn strip_query(url: &str) -> &str {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    &url[..end]
}

struct UrlParts<'a> {
    authority: &'a str,
    /// Path, query and fragment, starting at the first `/`, `?` or `#`.
    suffix: &'a str,
}

fn split_network_url(url: &str) -> Option<UrlParts<'_>> {
    let (scheme, rest) = url.split_once("://")?;
    if !NETWORK_SCHEMES
        .iter()
        .any(|s| s.eq_ignore_ascii_case(scheme))
    {
        return None;
    }
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let authority = &rest[..end];
    if authority.is_empty() {
        return None;
    }
    Some(UrlParts {
        authority,
        suffix: &rest[end..],
    })
}
