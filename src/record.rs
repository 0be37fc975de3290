use crate::error::{BuildError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// One keyed text record: a single `[section]` header followed by
/// `key: value` (or `key = value`) pairs, UTF-8, one entity per file.
///
/// Field order is preserved as written so that vertex and edge output
/// stays deterministic for a fixed input tree. Keys are lowercased the
/// way the record format treats them as case-insensitive.
#[derive(Debug, Clone)]
pub struct Record {
    pub path: PathBuf,
    pub section: String,
    fields: Vec<(String, String)>,
}

impl Record {
    pub fn load(path: &Path) -> Result<Record> {
        let text = fs::read_to_string(path).map_err(|e| BuildError::Record {
            path: path.to_path_buf(),
            reason: format!("unreadable record file: {}", e),
        })?;
        Self::parse(path, &text)
    }

    pub fn parse(path: &Path, text: &str) -> Result<Record> {
        let mut section = None;
        let mut fields = Vec::new();

        for (lineno, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }
            if let Some(name) = line.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
                if section.is_some() {
                    return Err(malformed(path, lineno, "more than one section header"));
                }
                section = Some(name.trim().to_string());
                continue;
            }
            if section.is_none() {
                return Err(malformed(path, lineno, "field before section header"));
            }
            // Split on whichever of ':' / '=' comes first, like configparser
            let split = line
                .char_indices()
                .find(|&(_, c)| c == ':' || c == '=')
                .map(|(i, _)| i);
            match split {
                Some(i) => {
                    let key = line[..i].trim().to_lowercase();
                    let value = line[i + 1..].trim().to_string();
                    if key.is_empty() {
                        return Err(malformed(path, lineno, "field with empty key"));
                    }
                    fields.push((key, value));
                }
                None => return Err(malformed(path, lineno, "field without delimiter")),
            }
        }

        let section = section.ok_or_else(|| BuildError::Record {
            path: path.to_path_buf(),
            reason: "missing section header".to_string(),
        })?;

        Ok(Record {
            path: path.to_path_buf(),
            section,
            fields,
        })
    }

    /// Fails unless the record's section matches the expected entity kind
    pub fn expect_section(&self, section: &str) -> Result<()> {
        if self.section == section {
            Ok(())
        } else {
            Err(BuildError::Record {
                path: self.path.clone(),
                reason: format!("expected [{}] section, found [{}]", section, self.section),
            })
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn require(&self, key: &str) -> Result<&str> {
        self.get(key).ok_or_else(|| BuildError::Record {
            path: self.path.clone(),
            reason: format!("missing required field: {}", key),
        })
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

fn malformed(path: &Path, lineno: usize, what: &str) -> BuildError {
    BuildError::Record {
        path: path.to_path_buf(),
        reason: format!("line {}: {}", lineno + 1, what),
    }
}
