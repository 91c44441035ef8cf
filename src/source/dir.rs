use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::error::Result;
use crate::models::RawDocument;
use crate::source::MenuSource;

/// Reads saved documents laid out as `{root}/{hall_slug}/{meal_slug}.json`.
///
/// Each file holds a full weekly document; the date picks the day later.
#[derive(Debug, Clone)]
pub struct DirMenuSource {
    root: PathBuf,
}

impl DirMenuSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path(&self, hall_slug: &str, meal_slug: &str) -> PathBuf {
        self.root.join(hall_slug).join(format!("{meal_slug}.json"))
    }
}

impl MenuSource for DirMenuSource {
    fn fetch(&self, hall_slug: &str, meal_slug: &str, _date: &str) -> Result<RawDocument> {
        let path = self.path(hall_slug, meal_slug);
        debug!(path = %path.display(), "reading menu document");
        let content = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn location(&self, hall_slug: &str, meal_slug: &str, _date: &str) -> String {
        self.path(hall_slug, meal_slug).display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_reads_document_from_layout() {
        let dir = tempdir().unwrap();
        let hall_dir = dir.path().join("busch-dining-hall");
        fs::create_dir_all(&hall_dir).unwrap();
        fs::write(
            hall_dir.join("dinner.json"),
            r#"{"days": [{"date": "2024-09-03", "menu_items": []}]}"#,
        )
        .unwrap();

        let source = DirMenuSource::new(dir.path());
        let doc = source.fetch("busch-dining-hall", "dinner", "2024-09-03").unwrap();

        assert_eq!(doc.days.len(), 1);
        assert!(source.location("busch-dining-hall", "dinner", "2024-09-03").ends_with("dinner.json"));
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempdir().unwrap();
        let source = DirMenuSource::new(dir.path());
        assert!(source.fetch("nowhere", "lunch-test", "2024-09-03").is_err());
    }
}
