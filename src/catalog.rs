use std::fmt;
use std::path::{Path, PathBuf};
use anyhow::{Result, anyhow};
use chrono::Local;
use log::debug;

use crate::file_utils::FileManager;

// @module: Gettext catalog parsing and manipulation

/// Flag marking an entry whose translation is possibly stale
const FUZZY_FLAG: &str = "fuzzy";

// @struct: Single catalog entry (one msgid/msgstr pair)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogEntry {
    // @field: Comment lines preceding the entry, kept verbatim (incl. #., #: ...)
    pub comments: Vec<String>,

    // @field: Flags from "#," lines (fuzzy, python-format, ...)
    pub flags: Vec<String>,

    // @field: Message context
    pub msgctxt: Option<String>,

    // @field: Source text
    pub msgid: String,

    // @field: Plural source text, preserved but never translated
    pub msgid_plural: Option<String>,

    // @field: Translated text
    pub msgstr: String,

    // @field: Plural translations (msgstr[0], msgstr[1], ...)
    pub msgstr_plural: Vec<String>,

    // @field: Entry no longer referenced by the sources (#~ prefix)
    pub obsolete: bool,
}

impl CatalogEntry {
    /// Create a plain entry - used by tests and external consumers
    pub fn new(msgid: impl Into<String>, msgstr: impl Into<String>) -> Self {
        CatalogEntry {
            msgid: msgid.into(),
            msgstr: msgstr.into(),
            ..Default::default()
        }
    }

    /// Whether the entry carries the fuzzy flag
    pub fn is_fuzzy(&self) -> bool {
        self.flags.iter().any(|f| f == FUZZY_FLAG)
    }

    /// Add or remove the fuzzy flag
    pub fn set_fuzzy(&mut self, fuzzy: bool) {
        if fuzzy {
            if !self.is_fuzzy() {
                self.flags.push(FUZZY_FLAG.to_string());
            }
        } else {
            self.flags.retain(|f| f != FUZZY_FLAG);
        }
    }

    /// The catalog header is the entry with an empty msgid
    pub fn is_header(&self) -> bool {
        self.msgid.is_empty() && self.msgctxt.is_none()
    }

    /// Whether the entry uses plural forms
    pub fn has_plural(&self) -> bool {
        self.msgid_plural.is_some()
    }

    /// Whether the entry is a candidate for machine translation.
    ///
    /// An entry qualifies when it is a regular singular entry and its
    /// translation is missing, marked fuzzy, or identical to the source
    /// (an untouched copy is almost always a stale placeholder).
    pub fn needs_translation(&self) -> bool {
        if self.obsolete || self.is_header() || self.has_plural() {
            return false;
        }

        self.msgstr.is_empty() || self.is_fuzzy() || self.msgstr == self.msgid
    }
}

impl fmt::Display for CatalogEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let prefix = if self.obsolete { "#~ " } else { "" };

        for comment in &self.comments {
            writeln!(f, "{}", comment)?;
        }
        if !self.flags.is_empty() {
            writeln!(f, "#, {}", self.flags.join(", "))?;
        }
        if let Some(msgctxt) = &self.msgctxt {
            write_field(f, prefix, "msgctxt", msgctxt)?;
        }
        write_field(f, prefix, "msgid", &self.msgid)?;
        if let Some(plural) = &self.msgid_plural {
            write_field(f, prefix, "msgid_plural", plural)?;
            for (index, form) in self.msgstr_plural.iter().enumerate() {
                write_field(f, prefix, &format!("msgstr[{}]", index), form)?;
            }
        } else {
            write_field(f, prefix, "msgstr", &self.msgstr)?;
        }
        Ok(())
    }
}

/// Write one keyword with its quoted value, splitting multi-line values
/// into the conventional continuation form (`msgid ""` + one line per segment).
fn write_field(f: &mut fmt::Formatter, prefix: &str, keyword: &str, value: &str) -> fmt::Result {
    if value.contains('\n') {
        writeln!(f, "{}{} \"\"", prefix, keyword)?;
        for segment in value.split_inclusive('\n') {
            writeln!(f, "{}\"{}\"", prefix, escape(segment))?;
        }
    } else {
        writeln!(f, "{}{} \"{}\"", prefix, keyword, escape(value))?;
    }
    Ok(())
}

/// Collection of catalog entries tied to a `.po` file on disk
#[derive(Debug)]
pub struct Catalog {
    /// Path of the backing file
    pub path: PathBuf,

    /// Entries in file order (header first, when present)
    pub entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Create an empty in-memory catalog
    pub fn new(path: PathBuf) -> Self {
        Catalog {
            path,
            entries: Vec::new(),
        }
    }

    /// Load a catalog from a `.po` file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = FileManager::read_to_string(path)?;
        let entries = Self::parse_str(&content)?;

        debug!("Loaded {} entries from {}", entries.len(), path.display());

        Ok(Catalog {
            path: path.to_path_buf(),
            entries,
        })
    }

    /// Parse `.po` file contents into entries
    pub fn parse_str(content: &str) -> Result<Vec<CatalogEntry>> {
        let mut entries = Vec::new();
        let mut builder = EntryBuilder::default();

        for (line_number, raw_line) in content.lines().enumerate() {
            builder
                .feed(raw_line)
                .map_err(|e| anyhow!("Line {}: {}", line_number + 1, e))?;

            if builder.boundary_reached() {
                if let Some(entry) = builder.take() {
                    entries.push(entry);
                }
            }
        }

        // File may not end with a blank line
        if let Some(entry) = builder.take() {
            entries.push(entry);
        }

        Ok(entries)
    }

    /// Serialize the catalog back to `.po` syntax
    pub fn to_po_string(&self) -> String {
        let mut output = String::new();
        for (index, entry) in self.entries.iter().enumerate() {
            if index > 0 {
                output.push('\n');
            }
            output.push_str(&entry.to_string());
        }
        output
    }

    /// Persist the catalog to its backing file
    pub fn save(&self) -> Result<()> {
        FileManager::write_to_file(&self.path, &self.to_po_string())
    }

    /// Copy the backing file into a timestamped snapshot under `backups/`
    pub fn create_backup(&self) -> Result<PathBuf> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| anyhow!("Catalog path has no parent directory: {:?}", self.path))?;
        let stem = self
            .path
            .file_stem()
            .ok_or_else(|| anyhow!("Catalog path has no file name: {:?}", self.path))?
            .to_string_lossy();

        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let backup_path = parent
            .join("backups")
            .join(format!("{}_backup_{}.po", stem, timestamp));

        FileManager::copy_file(&self.path, &backup_path)?;

        Ok(backup_path)
    }
}

/// Which quoted field continuation lines currently append to
#[derive(Debug, Clone, Copy, PartialEq)]
enum Field {
    Msgctxt,
    Msgid,
    MsgidPlural,
    Msgstr,
    MsgstrPlural(usize),
}

/// Incremental line-by-line entry assembler
#[derive(Default)]
struct EntryBuilder {
    entry: CatalogEntry,
    current_field: Option<Field>,
    has_content: bool,
    at_boundary: bool,
}

impl EntryBuilder {
    /// Consume one line of the file
    fn feed(&mut self, raw_line: &str) -> Result<()> {
        let line = raw_line.trim();

        if line.is_empty() {
            self.at_boundary = true;
            return Ok(());
        }
        self.at_boundary = false;

        // Obsolete entries repeat the directive syntax behind a "#~" prefix
        let (line, obsolete) = match line.strip_prefix("#~") {
            Some(rest) => (rest.trim_start(), true),
            None => (line, false),
        };
        if obsolete {
            self.entry.obsolete = true;
            if line.is_empty() {
                return Ok(());
            }
        }

        if let Some(rest) = line.strip_prefix("#,") {
            self.entry
                .flags
                .extend(rest.split(',').map(|f| f.trim().to_string()).filter(|f| !f.is_empty()));
            return Ok(());
        }

        if line.starts_with('#') {
            self.entry.comments.push(line.to_string());
            return Ok(());
        }

        if let Some(rest) = line.strip_prefix("msgctxt ") {
            self.entry.msgctxt = Some(unquote(rest)?);
            self.current_field = Some(Field::Msgctxt);
        } else if let Some(rest) = line.strip_prefix("msgid_plural ") {
            self.entry.msgid_plural = Some(unquote(rest)?);
            self.current_field = Some(Field::MsgidPlural);
        } else if let Some(rest) = line.strip_prefix("msgid ") {
            self.entry.msgid = unquote(rest)?;
            self.current_field = Some(Field::Msgid);
            self.has_content = true;
        } else if let Some(rest) = line.strip_prefix("msgstr[") {
            let (index_part, value_part) = rest
                .split_once(']')
                .ok_or_else(|| anyhow!("Malformed plural msgstr: {}", line))?;
            let index: usize = index_part
                .parse()
                .map_err(|_| anyhow!("Malformed plural index: {}", line))?;
            let value = unquote(value_part.trim_start())?;
            if self.entry.msgstr_plural.len() <= index {
                self.entry.msgstr_plural.resize(index + 1, String::new());
            }
            self.entry.msgstr_plural[index] = value;
            self.current_field = Some(Field::MsgstrPlural(index));
        } else if let Some(rest) = line.strip_prefix("msgstr ") {
            self.entry.msgstr = unquote(rest)?;
            self.current_field = Some(Field::Msgstr);
        } else if line.starts_with('"') {
            let continued = unquote(line)?;
            match self.current_field {
                Some(Field::Msgctxt) => {
                    if let Some(msgctxt) = &mut self.entry.msgctxt {
                        msgctxt.push_str(&continued);
                    }
                }
                Some(Field::Msgid) => self.entry.msgid.push_str(&continued),
                Some(Field::MsgidPlural) => {
                    if let Some(plural) = &mut self.entry.msgid_plural {
                        plural.push_str(&continued);
                    }
                }
                Some(Field::Msgstr) => self.entry.msgstr.push_str(&continued),
                Some(Field::MsgstrPlural(index)) => {
                    if let Some(form) = self.entry.msgstr_plural.get_mut(index) {
                        form.push_str(&continued);
                    }
                }
                None => return Err(anyhow!("Continuation line outside of any field")),
            }
        } else {
            return Err(anyhow!("Unrecognized directive: {}", line));
        }

        Ok(())
    }

    fn boundary_reached(&self) -> bool {
        self.at_boundary
    }

    /// Finish the current entry, if one was started
    fn take(&mut self) -> Option<CatalogEntry> {
        if !self.has_content {
            // Discard stray comments with no directive attached
            *self = EntryBuilder::default();
            return None;
        }

        let entry = std::mem::take(&mut self.entry);
        *self = EntryBuilder::default();
        Some(entry)
    }
}

/// Remove surrounding quotes and unescape basic sequences.
///
/// Uses a single-pass character-by-character scan so sequences like `\\n`
/// cannot be double-unescaped.
fn unquote(s: &str) -> Result<String> {
    let s = s.trim();
    if !s.starts_with('"') || !s.ends_with('"') || s.len() < 2 {
        return Err(anyhow!("Expected a quoted string, got: {}", s));
    }
    let s = &s[1..s.len() - 1];

    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => result.push('\n'),
                Some('t') => result.push('\t'),
                Some('r') => result.push('\r'),
                Some('"') => result.push('"'),
                Some('\\') => result.push('\\'),
                Some(other) => {
                    result.push('\\');
                    result.push(other);
                }
                None => result.push('\\'),
            }
        } else {
            result.push(c);
        }
    }

    Ok(result)
}

/// Escape a value for embedding between quotes
fn escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '"' => result.push_str("\\\""),
            '\n' => result.push_str("\\n"),
            '\t' => result.push_str("\\t"),
            '\r' => result.push_str("\\r"),
            other => result.push(other),
        }
    }
    result
}
