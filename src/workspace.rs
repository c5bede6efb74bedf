//! A document opened in one of the reference hosts.

use crate::audio::TonePlayer;
use crate::commands::NavCommand;
use crate::error::Result;
use crate::host::{EmulatedEditor, LineBuffer, Outline, SharedClipboard};
use crate::nav::Outcome;
use crate::session::Session;
use crate::source::{
    ClipboardBridge, DirectSource, HostInfo, Role, SideChannelOptions, SideChannelSource,
    SourceKind, TreeSource, UnitKind,
};
use crate::speech::Speech;
use serde::Serialize;

/// Where the caret or focus is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Position {
    /// 0-based document line. In a tree, the line of the focused heading.
    pub line: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
    /// Focused tree item label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

pub enum Workspace {
    /// Editable text with a native caret API.
    Text(LineBuffer),
    /// Code editor reachable only through keystrokes and the clipboard.
    /// `bridge` is our own handle on the clipboard the editor copies to.
    Editor {
        editor: EmulatedEditor<Box<dyn ClipboardBridge>>,
        bridge: Box<dyn ClipboardBridge>,
    },
    /// Tree view of the document's headings.
    Tree(Outline),
}

impl Workspace {
    pub fn text(content: &str, line: usize) -> Self {
        Workspace::Text(LineBuffer::new(content, line))
    }

    /// Editor whose clipboard lives in-process, seeded with `clipboard`.
    pub fn editor(content: &str, line: usize, clipboard: &str) -> Self {
        let clipboard = SharedClipboard::new(clipboard);
        Self::editor_with(
            content,
            line,
            Box::new(clipboard.clone()),
            Box::new(clipboard),
        )
    }

    /// Editor on explicit clipboard handles, e.g. two system clipboard
    /// connections.
    pub fn editor_with(
        content: &str,
        line: usize,
        editor_clipboard: Box<dyn ClipboardBridge>,
        bridge: Box<dyn ClipboardBridge>,
    ) -> Self {
        Workspace::Editor {
            editor: EmulatedEditor::new(content, editor_clipboard).with_caret(line, 0),
            bridge,
        }
    }

    /// Outline of the markdown headings in `content`, focused on the heading
    /// that owns `line`.
    pub fn tree(content: &str, line: usize) -> Self {
        let mut outline = Outline::from_markdown(content);
        outline.focus_source_line(line);
        Workspace::Tree(outline)
    }

    /// Open `content` the way the focused host object calls for, or `None`
    /// when the object does not support structural navigation.
    pub fn for_host(info: &HostInfo, content: &str, line: usize) -> Option<Self> {
        Some(match SourceKind::select(info)? {
            SourceKind::Direct => Self::text(content, line),
            SourceKind::SideChannel => Self::editor(content, line, ""),
            SourceKind::Tree => Self::tree(content, line),
        })
    }

    /// Host description matching this workspace.
    pub fn host_info(&self) -> HostInfo {
        let (role, app_name) = match self {
            Workspace::Text(_) => (Role::EditableText, "notepad"),
            Workspace::Editor { .. } => (Role::EditableText, "code"),
            Workspace::Tree(_) => (Role::TreeViewItem, "explorer"),
        };
        HostInfo {
            role,
            app_name: app_name.to_string(),
            window_class: None,
        }
    }

    pub fn source_kind(&self) -> SourceKind {
        match self {
            Workspace::Text(_) => SourceKind::Direct,
            Workspace::Editor { .. } => SourceKind::SideChannel,
            Workspace::Tree(_) => SourceKind::Tree,
        }
    }

    pub fn unit_kind(&self) -> UnitKind {
        self.source_kind().unit_kind()
    }

    pub fn position(&self) -> Position {
        match self {
            Workspace::Text(buffer) => Position {
                line: buffer.caret_line(),
                column: None,
                label: None,
            },
            Workspace::Editor { editor, .. } => {
                let caret = editor.caret();
                Position {
                    line: caret.line,
                    column: Some(caret.col),
                    label: None,
                }
            }
            Workspace::Tree(outline) => {
                let item = outline.focused_item();
                Position {
                    line: item.map_or(0, |item| item.line),
                    column: None,
                    label: item.map(|item| item.label.clone()),
                }
            }
        }
    }

    /// Text of the unit under the caret or focus.
    pub fn current_text(&self) -> String {
        match self {
            Workspace::Text(buffer) => buffer.line(buffer.caret_line()).unwrap_or_default().to_string(),
            Workspace::Editor { editor, .. } => editor
                .text()
                .split('\n')
                .nth(editor.caret().line)
                .unwrap_or_default()
                .to_string(),
            Workspace::Tree(outline) => outline
                .focused_item()
                .map(|item| item.label.clone())
                .unwrap_or_default(),
        }
    }

    /// Acquire the matching level source and run `command` through `session`.
    pub fn run<P: TonePlayer, S: Speech>(
        &mut self,
        session: &mut Session<P, S>,
        command: NavCommand,
        repeat_count: usize,
    ) -> Result<Outcome> {
        match self {
            Workspace::Text(buffer) => {
                let mut source = DirectSource::acquire(buffer)?;
                session.execute(&mut source, command, repeat_count)
            }
            Workspace::Editor { editor, bridge } => {
                let options = SideChannelOptions::from(&session.config().side_channel);
                let mut source = SideChannelSource::acquire(bridge, editor, options)?;
                session.execute(&mut source, command, repeat_count)
            }
            Workspace::Tree(outline) => {
                let mut source = TreeSource::acquire(outline)?;
                session.execute(&mut source, command, repeat_count)
            }
        }
    }
}
