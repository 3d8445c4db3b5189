//! Shell snippets shared by the renderer and the hooks.

use crate::builder::ScriptBuilder;

/// Profile file that receives environment exports.
pub const PROFILE: &str = "${BASH_PROFILE}";
/// Scratch directory for extraction and source builds.
pub const BUILD_ROOT: &str = "${BUILD_ROOT}";
/// Download cache under the build root.
pub const ARCHIVES_ROOT: &str = "${ARCHIVES_ROOT}";

/// Double-quote `s` for the shell.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        if matches!(c, '"' | '\\' | '$' | '`') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

/// Download `url` into the archive cache as `file`.
pub fn download(builder: ScriptBuilder, url: &str, file: &str) -> ScriptBuilder {
    builder.line(&format!(
        "curl -skL -o {}{} {}",
        ARCHIVES_ROOT,
        file,
        quote(url)
    ))
}

/// Append `exports` to the profile under a `# title` heading.
///
/// The heredoc is quoted, so `${PATH}` and friends are written literally
/// and expand at login rather than at build time.
pub fn append_profile<I, S>(builder: ScriptBuilder, title: &str, exports: I) -> ScriptBuilder
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut body = vec![String::new(), format!("# {}", title)];
    body.extend(exports.into_iter().map(|e| e.as_ref().to_string()));
    builder.heredoc(&format!("cat >> {}", PROFILE), true, body)
}

/// `PATH` and `LD_LIBRARY_PATH` exports for a prefix with `bin/` and `lib/`.
pub fn prefix_exports(prefix: &str) -> [String; 2] {
    [
        format!("export PATH=${{PATH}}:{}/bin", prefix),
        format!("export LD_LIBRARY_PATH={}/lib:${{LD_LIBRARY_PATH}}", prefix),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote() {
        assert_eq!(quote("https://h/a?x=1&y=2"), "\"https://h/a?x=1&y=2\"");
        assert_eq!(quote("a\"$b`"), "\"a\\\"\\$b\\`\"");
    }

    #[test]
    fn test_append_profile() {
        let text = append_profile(ScriptBuilder::new(), "node", prefix_exports("/opt/node/10")).build();
        assert_eq!(
            text,
            "cat >> ${BASH_PROFILE} <<'EOF'\n\
             \n\
             # node\n\
             export PATH=${PATH}:/opt/node/10/bin\n\
             export LD_LIBRARY_PATH=/opt/node/10/lib:${LD_LIBRARY_PATH}\n\
             EOF\n"
        );
    }
}
