use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::errors::LedgerError;

use super::StateStore;

const FILE_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";
const DEFAULT_DIR_NAME: &str = "spendbook";

/// Filesystem-backed store keeping one JSON document per key.
#[derive(Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Creates a store rooted at `root`, or at the platform data directory
    /// when no root is given. The directory is created if missing.
    pub fn new(root: Option<PathBuf>) -> Result<Self, LedgerError> {
        let root = resolve_root(root);
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn new_default() -> Result<Self, LedgerError> {
        Self::new(None)
    }

    /// Returns the file path backing `key`.
    pub fn key_path(&self, key: &str) -> Result<PathBuf, LedgerError> {
        let stem = canonical_key(key)?;
        Ok(self.root.join(format!("{}.{}", stem, FILE_EXTENSION)))
    }
}

impl StateStore for JsonFileStore {
    fn load(&self, key: &str) -> Result<Option<String>, LedgerError> {
        let path = self.key_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&path)?))
    }

    fn save(&self, key: &str, raw: &str) -> Result<(), LedgerError> {
        let path = self.key_path(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = tmp_path(&path);
        write_file(&tmp, raw)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

fn resolve_root(root: Option<PathBuf>) -> PathBuf {
    root.unwrap_or_else(|| {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    })
}

fn canonical_key(key: &str) -> Result<String, LedgerError> {
    let sanitized: String = key
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        return Err(LedgerError::InvalidKey(key.to_string()));
    }
    Ok(sanitized)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_file(path: &Path, data: &str) -> Result<(), LedgerError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::canonical_key;

    #[test]
    fn canonical_key_sanitizes_punctuation() {
        assert_eq!(canonical_key("Global Totals!").unwrap(), "global_totals_");
    }

    #[test]
    fn canonical_key_rejects_empty_keys() {
        assert!(canonical_key("").is_err());
        assert!(canonical_key("  --  ").is_err());
    }
}
