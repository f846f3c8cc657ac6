// cleanse-core/src/links.rs
//! Mirror link rewriting for ordinary (non-sensitive) files.
//!
//! Each rule is a plain substring replacement applied to every line. Line
//! terminators are carried through untouched, so a file with no match comes
//! back byte-identical and is never rewritten.

use crate::config::LinkRule;

/// Result of rewriting a file that contained at least one match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRewrite {
    pub content: String,
    pub replacements: usize,
}

#[derive(Debug, Clone, Default)]
pub struct LinkRewriter {
    rules: Vec<LinkRule>,
}

impl LinkRewriter {
    pub fn new(rules: Vec<LinkRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[LinkRule] {
        &self.rules
    }

    /// Rewrites every occurrence of every rule's `from`. Returns `None` when
    /// nothing matched.
    pub fn rewrite(&self, content: &str) -> Option<LinkRewrite> {
        if self.rules.is_empty() {
            return None;
        }

        let mut out = String::with_capacity(content.len());
        let mut replacements = 0;
        let mut changed = false;

        for line in content.split_inclusive('\n') {
            let mut current = std::borrow::Cow::Borrowed(line);
            for rule in &self.rules {
                let hits = current.matches(rule.from.as_str()).count();
                if hits > 0 {
                    replacements += hits;
                    current = std::borrow::Cow::Owned(current.replace(rule.from.as_str(), &rule.to));
                }
            }
            changed |= current != line;
            out.push_str(&current);
        }

        changed.then(|| LinkRewrite { content: out, replacements })
    }
}
