//! Translation key extraction.
//!
//! Keys come either from Twig templates, where they are pulled out of
//! `trans` tags and filters, or from a flat list with one key per line.

use std::{fs, io::ErrorKind, path::Path, sync::LazyLock};

use regex::Regex;

use super::{KeySet, SyncError};

// One alternative per supported notation. Quoted literals get one capture
// group per quote style, and no span may run past the tag it started in.
// 1. {% trans %}Hello{% endtrans %}
// 2. {{ 'Hello'|trans }}
// 3. {{ app.translator.trans('Hello') }}
// 4. {% trans with {'%name%': name} %}Hello %name%{% endtrans %}
// 5. {{ 'Hello %name%'|trans({'%name%': name}) }}
static TRANS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"(?i)\{% ?trans ?%\}(.*?)\{% ?endtrans ?%\}"#,
        r#"|\{\{ ?(?:'([^']*)'|"([^"]*)") ?\| ?trans ?\}\}"#,
        r#"|\{\{ ?[^{}]*?\.translator\.trans\((?:'([^']*)'|"([^"]*)")\) ?\}\}"#,
        r#"|\{% ?trans ?with\b.*?%\}(.*?)\{% ?endtrans ?%\}"#,
        r#"|\{\{ ?(?:'([^']*)'|"([^"]*)") ?\| ?trans\([^)]*\) ?\}\}"#,
    ))
    .unwrap()
});

/// Collect the keys found on one template line into `keys`.
///
/// Every match on the line counts, not only the first one.
fn extract_line(line: &str, keys: &mut KeySet) {
    for captures in TRANS_REGEX.captures_iter(line) {
        keys.extend(
            captures
                .iter()
                .skip(1)
                .flatten()
                .map(|m| m.as_str())
                .filter(|key| !key.is_empty())
                .map(str::to_string),
        );
    }
}

/// Keys used by a template, line by line.
pub fn extract_keys(source: &str) -> KeySet {
    let mut keys = KeySet::new();
    for line in source.lines() {
        extract_line(line, &mut keys);
    }
    keys
}

/// Keys of a flat list: every non-empty line is one key, taken as-is apart
/// from its line terminator.
pub fn parse_key_list(content: &str) -> KeySet {
    content
        .lines()
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read a flat key list from disk.
///
/// Fails when the file is missing or holds no key at all.
pub fn read_key_list(path: &Path) -> Result<KeySet, SyncError> {
    let content = fs::read_to_string(path).map_err(|err| SyncError::PathUnusable {
        path: path.to_path_buf(),
        reason: match err.kind() {
            ErrorKind::NotFound => "source file does not exist".to_string(),
            _ => err.to_string(),
        },
    })?;

    let keys = parse_key_list(&content);
    if keys.is_empty() {
        return Err(SyncError::SourceListEmpty {
            path: path.to_path_buf(),
        });
    }
    Ok(keys)
}
