// Copyright 2025 the TileScope Authors
// SPDX-License-Identifier: GPL-3.0-or-later

//! A small INI document model that keeps inline comments.
//!
//! The dialect is the one desktop tools commonly write:
//! - `[section]` headers, `key = value` or `key: value` entries;
//! - keys are case-insensitive and stored lower-case;
//! - full-line comments start with `;` or `#`;
//! - an inline comment starts at a `;` or `#` that begins the value or
//!   follows whitespace, so `#RRGGBB` after `=` is a comment but `a#b` is not;
//! - a line without a delimiter is a key with an empty value.
//!
//! Full-line comments are not retained; inline comments are, and are
//! written back after the value.

use core::fmt;

/// Width the value column is padded to when a comment follows it.
const VALUE_COLUMN: usize = 18;

/// One `key = value ; comment` line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IniEntry {
    /// Lower-case key.
    pub key: String,
    /// Value with surrounding whitespace and the inline comment removed.
    pub value: String,
    /// Inline comment text without its marker.
    pub comment: Option<String>,
}

/// A `[section]` and its entries, in file order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IniSection {
    name: String,
    entries: Vec<IniEntry>,
}

impl IniSection {
    /// Section name as written between the brackets.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Entries in file order.
    #[must_use]
    pub fn entries(&self) -> &[IniEntry] {
        &self.entries
    }

    fn entry_mut(&mut self, key: &str) -> Option<&mut IniEntry> {
        self.entries.iter_mut().find(|e| e.key == key)
    }
}

/// Error produced by [`IniDocument::parse`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum IniError {
    /// An entry appeared before the first section header.
    #[error("line {line}: entry outside of any section")]
    MissingSectionHeader {
        /// One-based line number.
        line: usize,
    },
    /// A section header appeared twice.
    #[error("line {line}: section [{section}] already defined")]
    DuplicateSection {
        /// One-based line number.
        line: usize,
        /// The repeated section.
        section: String,
    },
    /// A key appeared twice in one section.
    #[error("line {line}: key `{key}` already defined in [{section}]")]
    DuplicateKey {
        /// One-based line number.
        line: usize,
        /// Section holding the key.
        section: String,
        /// The repeated key.
        key: String,
    },
}

/// Ordered sections of an INI file plus leading comment lines.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IniDocument {
    header: Vec<String>,
    sections: Vec<IniSection>,
}

impl IniDocument {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses INI text.
    pub fn parse(text: &str) -> Result<Self, IniError> {
        let mut doc = Self::new();
        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }
            if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                let name = name.trim();
                if doc.section(name).is_some() {
                    return Err(IniError::DuplicateSection {
                        line: line_no,
                        section: name.to_owned(),
                    });
                }
                doc.sections.push(IniSection {
                    name: name.to_owned(),
                    entries: Vec::new(),
                });
                continue;
            }

            let Some(section) = doc.sections.last_mut() else {
                return Err(IniError::MissingSectionHeader { line: line_no });
            };
            let entry = parse_entry(line);
            if section.entries.iter().any(|e| e.key == entry.key) {
                return Err(IniError::DuplicateKey {
                    line: line_no,
                    section: section.name.clone(),
                    key: entry.key,
                });
            }
            section.entries.push(entry);
        }
        Ok(doc)
    }

    /// Sets the comment lines written before the first section.
    pub fn set_header<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.header = lines.into_iter().map(Into::into).collect();
    }

    /// Sections in file order.
    pub fn sections(&self) -> impl Iterator<Item = &IniSection> {
        self.sections.iter()
    }

    /// Looks up a section by name.
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&IniSection> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Looks up an entry; `key` is matched case-insensitively.
    #[must_use]
    pub fn entry(&self, section: &str, key: &str) -> Option<&IniEntry> {
        let key = key.to_ascii_lowercase();
        self.section(section)?.entries.iter().find(|e| e.key == key)
    }

    /// Looks up a value; `key` is matched case-insensitively.
    #[must_use]
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.entry(section, key).map(|e| e.value.as_str())
    }

    /// Sets a value, creating the section and entry as needed.
    ///
    /// An existing entry keeps its comment.
    pub fn set(&mut self, section: &str, key: &str, value: impl Into<String>) {
        let value = value.into();
        let key = key.to_ascii_lowercase();
        let section = self.section_mut_or_insert(section);
        if let Some(entry) = section.entry_mut(&key) {
            entry.value = value;
        } else {
            section.entries.push(IniEntry {
                key,
                value,
                comment: None,
            });
        }
    }

    /// Sets a value and its inline comment.
    pub fn set_with_comment(
        &mut self,
        section: &str,
        key: &str,
        value: impl Into<String>,
        comment: Option<&str>,
    ) {
        self.set(section, key, value);
        let key = key.to_ascii_lowercase();
        if let Some(entry) = self.section_mut_or_insert(section).entry_mut(&key) {
            entry.comment = comment.map(str::to_owned);
        }
    }

    fn section_mut_or_insert(&mut self, name: &str) -> &mut IniSection {
        let idx = match self.sections.iter().position(|s| s.name == name) {
            Some(idx) => idx,
            None => {
                self.sections.push(IniSection {
                    name: name.to_owned(),
                    entries: Vec::new(),
                });
                self.sections.len() - 1
            }
        };
        &mut self.sections[idx]
    }
}

fn parse_entry(line: &str) -> IniEntry {
    let (key, rest) = match line.find(['=', ':']) {
        Some(pos) => (&line[..pos], &line[pos + 1..]),
        None => (line, ""),
    };
    let (value, comment) = split_inline_comment(rest);
    IniEntry {
        key: key.trim().to_ascii_lowercase(),
        value: value.trim().to_owned(),
        comment: comment.map(|c| c.trim().to_owned()).filter(|c| !c.is_empty()),
    }
}

fn split_inline_comment(rest: &str) -> (&str, Option<&str>) {
    let trimmed = rest.trim_start();
    let mut prev_ws = true;
    for (pos, ch) in trimmed.char_indices() {
        if (ch == ';' || ch == '#') && prev_ws {
            return (&trimmed[..pos], Some(&trimmed[pos + 1..]));
        }
        prev_ws = ch.is_whitespace();
    }
    (trimmed, None)
}

impl fmt::Display for IniDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.header {
            writeln!(f, "; {line}")?;
        }
        if !self.header.is_empty() {
            writeln!(f)?;
        }
        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "[{}]", section.name)?;
            for entry in &section.entries {
                match &entry.comment {
                    Some(comment) => writeln!(
                        f,
                        "{} = {:<width$} ; {comment}",
                        entry.key,
                        entry.value,
                        width = VALUE_COLUMN
                    )?,
                    None => writeln!(f, "{} = {}", entry.key, entry.value)?,
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{IniDocument, IniError};

    const SAMPLE: &str = "\
; leading comment
[DisplayColors]
background = (25, 30, 40)   ; main background
Grid_Color: (60, 70, 90)

[Export]
default_path = C:\\tiles#1 ; hash inside a value
flag
";

    #[test]
    fn parses_values_and_comments() {
        let doc = IniDocument::parse(SAMPLE).unwrap();
        let bg = doc.entry("DisplayColors", "background").unwrap();
        assert_eq!(bg.value, "(25, 30, 40)");
        assert_eq!(bg.comment.as_deref(), Some("main background"));
        assert_eq!(doc.get("DisplayColors", "grid_color"), Some("(60, 70, 90)"));
        assert_eq!(doc.get("Export", "default_path"), Some("C:\\tiles#1"));
        assert_eq!(doc.get("Export", "flag"), Some(""));
        assert_eq!(doc.get("Export", "missing"), None);
    }

    #[test]
    fn rejects_structural_errors() {
        assert_eq!(
            IniDocument::parse("key = 1\n"),
            Err(IniError::MissingSectionHeader { line: 1 })
        );
        assert!(matches!(
            IniDocument::parse("[a]\n[a]\n"),
            Err(IniError::DuplicateSection { line: 2, .. })
        ));
        assert!(matches!(
            IniDocument::parse("[a]\nk=1\nK=2\n"),
            Err(IniError::DuplicateKey { line: 3, .. })
        ));
    }

    #[test]
    fn written_text_parses_back() {
        let mut doc = IniDocument::parse(SAMPLE).unwrap();
        doc.set_header(["generated"]);
        doc.set("Toggles", "show_grid_default", "false");
        doc.set_with_comment("Toggles", "show_numbers_default", "true", Some("labels"));

        let text = doc.to_string();
        assert!(text.starts_with("; generated\n"));
        assert!(text.contains("show_numbers_default = true"));

        let again = IniDocument::parse(&text).unwrap();
        assert_eq!(again.get("Toggles", "show_grid_default"), Some("false"));
        assert_eq!(
            again.entry("Toggles", "show_numbers_default").unwrap().comment.as_deref(),
            Some("labels")
        );
        assert_eq!(again.get("Export", "default_path"), Some("C:\\tiles#1"));
    }
}
