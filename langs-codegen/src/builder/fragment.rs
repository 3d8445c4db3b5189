//! Labelled script fragments.

use std::fmt;

/// One rendered piece of the provisioning script.
///
/// A fragment is opaque text plus a label naming what produced it (a
/// package, a package-manager batch or a group epilogue). The label is
/// only used for logging and reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    label: String,
    text: String,
}

impl Fragment {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        let mut text = text.into();
        if !text.is_empty() && !text.ends_with('\n') {
            text.push('\n');
        }
        Self {
            label: label.into(),
            text,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Fragment text, always newline-terminated unless empty.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Concatenate fragments with blank-line separators, skipping empty ones.
pub fn join_fragments(fragments: &[Fragment]) -> String {
    let mut out = String::new();
    for fragment in fragments.iter().filter(|f| !f.is_empty()) {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(fragment.text());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_is_newline_terminated() {
        let fragment = Fragment::new("vim", "yum install -y vim");
        assert_eq!(fragment.text(), "yum install -y vim\n");
        assert_eq!(fragment.label(), "vim");
    }

    #[test]
    fn test_join_separates_with_blank_lines() {
        let joined = join_fragments(&[
            Fragment::new("a", "echo a\n"),
            Fragment::new("empty", ""),
            Fragment::new("b", "echo b\n"),
        ]);

        assert_eq!(joined, "echo a\n\necho b\n");
    }
}
