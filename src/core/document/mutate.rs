use std::{
    fs,
    path::{Path, PathBuf},
};

use super::tree::{Element, Node};
use super::{DocumentHandle, Namespace, UNIT_ELEMENT};
use crate::core::{KeySet, SyncError};

const INDENT: &str = "  ";

/// Whitespace to put before new units and before their children.
/// `None` keeps the output compact, like the surrounding markup.
#[derive(Debug, Default, PartialEq, Eq)]
struct Layout {
    unit: Option<String>,
    inner: Option<String>,
}

impl DocumentHandle {
    /// Remove the units listed in `to_remove` and append one unit per id in
    /// `to_add` to the body, in sorted order.
    ///
    /// Every id to remove must be stored in the document; ids to add that
    /// are already stored are left alone so no unit is ever duplicated.
    pub fn apply(&mut self, to_add: &KeySet, to_remove: &KeySet) -> Result<(), SyncError> {
        if let Some(missing) = to_remove.iter().find(|id| self.unit(id).is_none()) {
            return Err(SyncError::EntryNotFound {
                id: missing.clone(),
            });
        }
        let existing = self.keys();

        for id in to_remove {
            self.tree.root_mut().detach_where(&|element: &Element| {
                element.local_name() == UNIT_ELEMENT && element.attribute("id") == Some(id.as_str())
            });
        }

        let namespace = self.namespace.clone();
        let body = self.body_mut()?;
        let layout = Layout::of(body);
        let closing = if body.children.last().is_some_and(Node::is_whitespace) {
            body.children.pop()
        } else {
            None
        };

        for id in to_add.iter().filter(|id| !existing.contains(*id)) {
            if let Some(indent) = &layout.unit {
                body.push(Node::Text(indent.clone()));
            }
            body.push(Node::Element(new_unit(id, &namespace, &layout)));
        }

        if let Some(closing) = closing {
            body.push(closing);
        }
        Ok(())
    }

    /// Replace the file on disk with the serialized document.
    ///
    /// The bytes go to a sibling temporary file first, which is then renamed
    /// over the target, so a failed write leaves the original untouched.
    /// Symbolic links are written through, and an existing file keeps its
    /// permissions.
    pub fn save(&self) -> Result<(), SyncError> {
        let target = fs::canonicalize(&self.path).unwrap_or_else(|_| self.path.clone());
        let permissions = fs::metadata(&target).ok().map(|meta| meta.permissions());

        let staging = staging_path(&target);
        let written = fs::write(&staging, self.to_xml())
            .and_then(|()| match permissions {
                Some(permissions) => fs::set_permissions(&staging, permissions),
                None => Ok(()),
            })
            .and_then(|()| fs::rename(&staging, &target));

        if let Err(source) = written {
            let _ = fs::remove_file(&staging);
            return Err(SyncError::WriteFailure {
                path: self.path.clone(),
                source,
            });
        }
        Ok(())
    }
}

impl Layout {
    fn of(body: &Element) -> Self {
        let children = body.children();

        match children
            .iter()
            .rposition(|node| matches!(node, Node::Element(_)))
        {
            Some(pos) => {
                let unit = pos
                    .checked_sub(1)
                    .and_then(|before| line_indent(&children[before]));
                let inner = match &children[pos] {
                    Node::Element(last) => last.children().first().and_then(line_indent),
                    _ => None,
                }
                .or_else(|| unit.as_ref().map(|unit| format!("{}{}", unit, INDENT)));
                Self { unit, inner }
            }
            None => {
                // Empty body: one level deeper than its closing tag.
                let unit = children
                    .last()
                    .and_then(line_indent)
                    .map(|closing| format!("{}{}", closing, INDENT));
                let inner = unit.as_ref().map(|unit| format!("{}{}", unit, INDENT));
                Self { unit, inner }
            }
        }
    }
}

/// Newline plus the indentation of the last line, for whitespace nodes
/// spanning lines.
fn line_indent(node: &Node) -> Option<String> {
    match node {
        Node::Text(text) if node.is_whitespace() => text
            .rfind('\n')
            .map(|newline| format!("\n{}", &text[newline + 1..])),
        _ => None,
    }
}

fn new_unit(id: &str, namespace: &Namespace, layout: &Layout) -> Element {
    let mut unit = Element::new(namespace.qualify(UNIT_ELEMENT)).with_attribute("id", id);
    let source = Element::new(namespace.qualify("source")).with_text(id);
    let target = Element::new(namespace.qualify("target"));

    for child in [source, target] {
        if let Some(indent) = &layout.inner {
            unit.push(Node::Text(indent.clone()));
        }
        unit.push(Node::Element(child));
    }
    if let Some(indent) = &layout.unit {
        unit.push(Node::Text(indent.clone()));
    }
    unit
}

fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.xlfsync-tmp", name))
}
