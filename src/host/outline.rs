//! Outline tree built from markdown headings, the tree-mode host.
//!
//! Each ATX heading becomes one tree item whose depth is the heading level.
//! Headings inside fenced code blocks are ignored.

use crate::error::Result;
use crate::source::TreeProvider;
use regex::Regex;
use std::sync::OnceLock;

/// One tree view item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineItem {
    pub label: String,
    /// Depth in the tree; `None` for items without position info.
    pub level: Option<usize>,
    /// Source line the item came from.
    pub line: usize,
}

/// Flat, depth-annotated list of tree items with a focused item.
#[derive(Debug, Clone, Default)]
pub struct Outline {
    items: Vec<OutlineItem>,
    focus: usize,
}

impl Outline {
    pub fn from_items(items: Vec<OutlineItem>) -> Self {
        Self { items, focus: 0 }
    }

    /// Build the outline from markdown headings.
    ///
    /// # Examples
    ///
    /// ```
    /// # use indentnav::host::Outline;
    /// let outline = Outline::from_markdown("# Title\n## Usage\n```\n# not a heading\n```\n");
    /// assert_eq!(outline.items().len(), 2);
    /// assert_eq!(outline.items()[1].level, Some(2));
    /// ```
    pub fn from_markdown(content: &str) -> Self {
        static HEADING: OnceLock<Regex> = OnceLock::new();
        let heading = HEADING.get_or_init(|| {
            Regex::new(r"^ {0,3}(#{1,6})(?:[ \t]+(.*))?$").expect("heading pattern is valid")
        });

        let mut items = Vec::new();
        let mut fence: Option<&str> = None;

        for (line_no, line) in content.lines().enumerate() {
            let trimmed = line.trim_start();
            if let Some(marker) = fence {
                if trimmed.starts_with(marker) {
                    fence = None;
                }
                continue;
            }
            if trimmed.starts_with("```") {
                fence = Some("```");
                continue;
            }
            if trimmed.starts_with("~~~") {
                fence = Some("~~~");
                continue;
            }

            if let Some(caps) = heading.captures(line) {
                let level = caps[1].len();
                let label = caps
                    .get(2)
                    .map(|m| strip_closing_hashes(m.as_str()))
                    .unwrap_or_default();
                items.push(OutlineItem {
                    label,
                    level: Some(level),
                    line: line_no,
                });
            }
        }

        Self::from_items(items)
    }

    pub fn items(&self) -> &[OutlineItem] {
        &self.items
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn focused_item(&self) -> Option<&OutlineItem> {
        self.items.get(self.focus)
    }

    /// Focus item `index`, clamped to the last item.
    pub fn set_focus_index(&mut self, index: usize) {
        self.focus = index.min(self.items.len().saturating_sub(1));
    }

    /// Focus the last item that starts at or before source line `line`.
    pub fn focus_source_line(&mut self, line: usize) {
        let index = self
            .items
            .iter()
            .rposition(|item| item.line <= line)
            .unwrap_or(0);
        self.set_focus_index(index);
    }
}

/// Drop an optional closing sequence: `Title ##` becomes `Title`.
fn strip_closing_hashes(text: &str) -> String {
    let text = text.trim_end();
    let without = text.trim_end_matches('#');
    if without.is_empty() {
        return String::new();
    }
    if without.len() != text.len() && without.ends_with([' ', '\t']) {
        without.trim_end().to_string()
    } else {
        text.to_string()
    }
}

impl TreeProvider for Outline {
    type Node = usize;

    fn focused(&self) -> Option<usize> {
        (!self.items.is_empty()).then_some(self.focus)
    }

    fn next(&self, node: &usize) -> Option<usize> {
        let next = node + 1;
        (next < self.items.len()).then_some(next)
    }

    fn previous(&self, node: &usize) -> Option<usize> {
        node.checked_sub(1)
    }

    fn level(&self, node: &usize) -> Option<usize> {
        self.items.get(*node).and_then(|item| item.level)
    }

    fn label(&self, node: &usize) -> String {
        self.items
            .get(*node)
            .map(|item| item.label.clone())
            .unwrap_or_default()
    }

    fn set_focus(&mut self, node: &usize) -> Result<()> {
        self.set_focus_index(*node);
        Ok(())
    }
}
