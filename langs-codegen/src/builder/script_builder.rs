//! Script builder for generating shell and descriptor text.

/// Fluent API for building shell text line by line.
///
/// Supports both consuming methods (returning `Self`) for chaining and
/// mutable methods (returning `&mut Self`) for loops.
///
/// # Example
///
/// ```
/// use langs_codegen::builder::ScriptBuilder;
///
/// let text = ScriptBuilder::new()
///     .comment("cmake")
///     .line("mkdir -p /opt/cmake")
///     .heredoc("cat >> ${BASH_PROFILE}", true, ["export PATH=${PATH}:/opt/cmake/bin"])
///     .build();
///
/// assert_eq!(
///     text,
///     "# cmake\nmkdir -p /opt/cmake\ncat >> ${BASH_PROFILE} <<'EOF'\nexport PATH=${PATH}:/opt/cmake/bin\nEOF\n"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptBuilder {
    indent_level: usize,
    buffer: String,
}

const INDENT: &str = "    ";

/// Heredoc terminator used for every generated here-document.
pub const HEREDOC_DELIMITER: &str = "EOF";

impl ScriptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Mutable API - methods prefixed with `push_`
    // =========================================================================

    /// Add a line with current indentation (mutable).
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        self.write_indent();
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Add a blank line (mutable).
    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    /// Add raw text without indentation or newline (mutable).
    pub fn push_raw(&mut self, s: &str) -> &mut Self {
        self.buffer.push_str(s);
        self
    }

    /// Add a `# text` comment line (mutable).
    pub fn push_comment(&mut self, text: &str) -> &mut Self {
        self.write_indent();
        self.buffer.push_str("# ");
        self.buffer.push_str(text);
        self.buffer.push('\n');
        self
    }

    /// Add a here-document fed to `command` (mutable).
    ///
    /// With `quoted` the delimiter is written as `'EOF'` so the shell does
    /// not expand `${...}` in the body. Body lines are never indented.
    pub fn push_heredoc<I, S>(&mut self, command: &str, quoted: bool, body: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.write_indent();
        self.buffer.push_str(command);
        if quoted {
            self.buffer.push_str(" <<'");
            self.buffer.push_str(HEREDOC_DELIMITER);
            self.buffer.push('\'');
        } else {
            self.buffer.push_str(" <<");
            self.buffer.push_str(HEREDOC_DELIMITER);
        }
        self.buffer.push('\n');
        for line in body {
            self.buffer.push_str(line.as_ref());
            self.buffer.push('\n');
        }
        self.buffer.push_str(HEREDOC_DELIMITER);
        self.buffer.push('\n');
        self
    }

    /// Increase indentation level (mutable).
    pub fn push_indent(&mut self) -> &mut Self {
        self.indent_level += 1;
        self
    }

    /// Decrease indentation level (mutable).
    pub fn push_dedent(&mut self) -> &mut Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    // =========================================================================
    // Consuming API
    // =========================================================================

    pub fn line(mut self, s: &str) -> Self {
        self.push_line(s);
        self
    }

    pub fn blank(mut self) -> Self {
        self.push_blank();
        self
    }

    pub fn raw(mut self, s: &str) -> Self {
        self.push_raw(s);
        self
    }

    pub fn comment(mut self, text: &str) -> Self {
        self.push_comment(text);
        self
    }

    pub fn heredoc<I, S>(mut self, command: &str, quoted: bool, body: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.push_heredoc(command, quoted, body);
        self
    }

    pub fn indent(mut self) -> Self {
        self.push_indent();
        self
    }

    pub fn dedent(mut self) -> Self {
        self.push_dedent();
        self
    }

    /// Add lines joined by shell line continuations.
    ///
    /// The first line carries `head`; every following line is indented one
    /// level. Each line but the last ends with `separator` and ` \`.
    pub fn continued<I, S>(mut self, head: &str, lines: I, separator: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lines: Vec<String> = lines.into_iter().map(|l| l.as_ref().to_string()).collect();
        let last = lines.len().saturating_sub(1);
        for (i, line) in lines.iter().enumerate() {
            let text = if i == 0 {
                format!("{}{}", head, line)
            } else {
                line.clone()
            };
            if i < last {
                self.push_line(&format!("{}{} \\", text, separator));
            } else {
                self.push_line(&text);
            }
            if i == 0 {
                self.push_indent();
            }
        }
        if !lines.is_empty() {
            self.push_dedent();
        }
        self
    }

    /// Conditionally add content.
    pub fn when<F>(self, condition: bool, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        if condition { f(self) } else { self }
    }

    /// Add content for an optional value.
    pub fn when_some<T, F>(self, value: Option<T>, f: F) -> Self
    where
        F: FnOnce(Self, T) -> Self,
    {
        match value {
            Some(v) => f(self, v),
            None => self,
        }
    }

    /// Iterate and add content for each item.
    pub fn each<T, I, F>(mut self, items: I, f: F) -> Self
    where
        I: IntoIterator<Item = T>,
        F: Fn(Self, T) -> Self,
    {
        for item in items {
            self = f(self, item);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Consume the builder and return the text.
    pub fn build(self) -> String {
        self.buffer
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(INDENT);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_line() {
        let text = ScriptBuilder::new().line("yum makecache").build();
        assert_eq!(text, "yum makecache\n");
    }

    #[test]
    fn test_blank_and_comment() {
        let text = ScriptBuilder::new()
            .comment("common")
            .blank()
            .line("echo ok")
            .build();

        assert_eq!(text, "# common\n\necho ok\n");
    }

    #[test]
    fn test_unquoted_heredoc() {
        let text = ScriptBuilder::new()
            .heredoc("cat > /etc/pip.conf", false, ["[global]", "timeout = 120"])
            .build();

        assert_eq!(text, "cat > /etc/pip.conf <<EOF\n[global]\ntimeout = 120\nEOF\n");
    }

    #[test]
    fn test_heredoc_body_is_not_indented() {
        let text = ScriptBuilder::new()
            .indent()
            .heredoc("cat", true, ["body"])
            .build();

        assert_eq!(text, "    cat <<'EOF'\nbody\nEOF\n");
    }

    #[test]
    fn test_continued() {
        let text = ScriptBuilder::new()
            .continued("RUN ", ["a", "b", "c"], ";")
            .line("EXPOSE 22")
            .build();

        assert_eq!(text, "RUN a; \\\n    b; \\\n    c\nEXPOSE 22\n");
    }

    #[test]
    fn test_continued_single_line() {
        let text = ScriptBuilder::new().continued("RUN ", ["a"], ";").build();
        assert_eq!(text, "RUN a\n");
    }

    #[test]
    fn test_conditional() {
        let on = ScriptBuilder::new().when(true, |b| b.line("x")).build();
        let off = ScriptBuilder::new().when(false, |b| b.line("x")).build();
        let some = ScriptBuilder::new()
            .when_some(Some("y"), |b, v| b.line(v))
            .build();

        assert_eq!(on, "x\n");
        assert_eq!(off, "");
        assert_eq!(some, "y\n");
    }

    #[test]
    fn test_each() {
        let text = ScriptBuilder::new()
            .each(["gcc", "make"], |b, p| b.line(p))
            .build();
        assert_eq!(text, "gcc\nmake\n");
    }

    #[test]
    fn test_mutable_api() {
        let mut builder = ScriptBuilder::new();
        builder
            .push_line("if true; then")
            .push_indent()
            .push_line("echo yes")
            .push_dedent()
            .push_line("fi");

        assert_eq!(builder.as_str(), "if true; then\n    echo yes\nfi\n");
    }
}
