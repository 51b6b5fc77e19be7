//! XLIFF document loading.
//!
//! A [`DocumentHandle`] owns the parsed tree of one XLIFF file together with
//! the namespace prefix of its root element. It is produced either from an
//! existing file or, for a brand-new translation file, from a minimal
//! skeleton.

mod mutate;
pub mod tree;

use std::{
    fmt, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    str::FromStr,
};

use quick_xml::escape::escape;

use super::{KeySet, SyncError};
use tree::{Element, XmlTree};

pub const ROOT_ELEMENT: &str = "xliff";
pub const BODY_ELEMENT: &str = "body";
pub const UNIT_ELEMENT: &str = "trans-unit";

/// Source and target language of a translation file, written as `en/fr`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguagePair {
    pub source: String,
    pub target: String,
}

impl LanguagePair {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

impl Default for LanguagePair {
    fn default() -> Self {
        Self::new("en", "en")
    }
}

impl FromStr for LanguagePair {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((source, target))
                if !source.trim().is_empty()
                    && !target.trim().is_empty()
                    && !target.contains('/') =>
            {
                Ok(Self::new(source.trim(), target.trim()))
            }
            _ => Err(format!(
                "expected a language pair such as \"en/fr\", got \"{}\"",
                s
            )),
        }
    }
}

impl fmt::Display for LanguagePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.source, self.target)
    }
}

/// Namespace prefix of the document root, carried onto every element
/// created in the document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Namespace {
    prefix: Option<String>,
}

impl Namespace {
    fn of(root: &Element) -> Self {
        Self {
            prefix: root.prefix().map(str::to_string),
        }
    }

    /// Element name carrying the document's prefix.
    pub fn qualify(&self, local_name: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}:{}", prefix, local_name),
            None => local_name.to_string(),
        }
    }
}

/// A loaded XLIFF document, ready to be reconciled and written back.
#[derive(Debug, Clone)]
pub struct DocumentHandle {
    path: PathBuf,
    tree: XmlTree,
    namespace: Namespace,
}

impl DocumentHandle {
    /// Load the document at `path`.
    pub fn load(path: &Path) -> Result<Self, SyncError> {
        let content = fs::read_to_string(path).map_err(|err| match err.kind() {
            ErrorKind::NotFound => SyncError::PathUnusable {
                path: path.to_path_buf(),
                reason: "no such file".to_string(),
            },
            _ => SyncError::MalformedDocument {
                path: path.to_path_buf(),
                reason: err.to_string(),
            },
        })?;
        Self::parse(&content, path)
    }

    /// Load the document at `path`, or build an empty one for `languages`
    /// when the file does not exist yet.
    ///
    /// The flag is true when the document was created in memory.
    pub fn load_or_create(path: &Path, languages: &LanguagePair) -> Result<(Self, bool), SyncError> {
        if path.exists() {
            Ok((Self::load(path)?, false))
        } else {
            Ok((Self::create(path, languages)?, true))
        }
    }

    /// Build a minimal document with one `file` element and an empty body.
    pub fn create(path: &Path, languages: &LanguagePair) -> Result<Self, SyncError> {
        let original = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let skeleton = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<xliff xmlns="urn:oasis:names:tc:xliff:document:1.2" version="1.2">
  <file source-language="{}" target-language="{}" datatype="plaintext" original="{}" tool="xlfsync">
    <body>
    </body>
  </file>
</xliff>
"#,
            escape(&languages.source),
            escape(&languages.target),
            escape(&original),
        );
        Self::parse(&skeleton, path)
    }

    /// Parse `content` as an XLIFF document; `path` is only used for errors
    /// and for writing the result back.
    pub fn parse(content: &str, path: &Path) -> Result<Self, SyncError> {
        let malformed = |reason: String| SyncError::MalformedDocument {
            path: path.to_path_buf(),
            reason,
        };

        let tree = XmlTree::parse(content).map_err(|err| malformed(err.to_string()))?;
        let root = tree.root();
        if root.local_name() != ROOT_ELEMENT {
            return Err(malformed(format!(
                "root element is <{}>, expected <{}>",
                root.name(),
                ROOT_ELEMENT
            )));
        }
        if root.find_first(BODY_ELEMENT).is_none() {
            return Err(SyncError::MissingContainer {
                path: path.to_path_buf(),
            });
        }

        let namespace = Namespace::of(root);
        Ok(Self {
            path: path.to_path_buf(),
            tree,
            namespace,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn root(&self) -> &Element {
        self.tree.root()
    }

    /// The first `body` element in depth-first order.
    pub fn body(&self) -> Result<&Element, SyncError> {
        self.tree
            .root()
            .find_first(BODY_ELEMENT)
            .ok_or_else(|| SyncError::MissingContainer {
                path: self.path.clone(),
            })
    }

    pub(crate) fn body_mut(&mut self) -> Result<&mut Element, SyncError> {
        let path = self.path.clone();
        self.tree
            .root_mut()
            .find_first_mut(BODY_ELEMENT)
            .ok_or(SyncError::MissingContainer { path })
    }

    /// All `trans-unit` elements under the root, in document order.
    pub fn units(&self) -> impl Iterator<Item = &Element> {
        self.tree
            .root()
            .descendants()
            .into_iter()
            .filter(|e| e.local_name() == UNIT_ELEMENT)
    }

    /// Ids of the stored entries. Units without an id are ignored.
    pub fn keys(&self) -> KeySet {
        self.units()
            .filter_map(|unit| unit.attribute("id"))
            .map(str::to_string)
            .collect()
    }

    /// Find the entry stored under `id`.
    pub fn unit(&self, id: &str) -> Option<&Element> {
        self.units().find(|unit| unit.attribute("id") == Some(id))
    }

    pub fn to_xml(&self) -> String {
        self.tree.to_xml()
    }
}
