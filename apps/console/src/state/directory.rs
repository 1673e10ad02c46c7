use shared::{domain::SourceFile, error::InputError};

/// Available source files and the one operations are scoped to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directory {
    files: Vec<SourceFile>,
    selected: Option<String>,
}

impl Directory {
    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Replaces the listing wholesale. A still-listed selection survives,
    /// otherwise the first file (or nothing) becomes selected.
    pub fn apply_listing(&mut self, files: Vec<SourceFile>) {
        let kept = self
            .selected
            .take()
            .filter(|name| files.iter().any(|file| file.file_name == *name));
        self.selected = kept.or_else(|| files.first().map(|file| file.file_name.clone()));
        self.files = files;
    }

    pub fn clear(&mut self) {
        self.files.clear();
        self.selected = None;
    }

    pub fn select(&mut self, file_name: &str) -> Result<(), InputError> {
        if !self.files.iter().any(|file| file.file_name == file_name) {
            return Err(InputError::UnknownSourceFile(file_name.to_string()));
        }
        self.selected = Some(file_name.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> SourceFile {
        SourceFile {
            file_name: name.to_string(),
            item_count: 1,
        }
    }

    #[test]
    fn keeps_selection_that_is_still_listed() {
        let mut directory = Directory::default();
        directory.apply_listing(vec![file("a.json"), file("b.json")]);
        directory.select("b.json").expect("listed");

        directory.apply_listing(vec![file("c.json"), file("b.json")]);
        assert_eq!(directory.selected(), Some("b.json"));
    }

    #[test]
    fn falls_back_to_first_file_when_selection_vanishes() {
        let mut directory = Directory::default();
        directory.apply_listing(vec![file("a.json")]);
        assert_eq!(directory.selected(), Some("a.json"));

        directory.apply_listing(vec![file("x.json"), file("y.json")]);
        assert_eq!(directory.selected(), Some("x.json"));
    }

    #[test]
    fn empty_listing_clears_selection() {
        let mut directory = Directory::default();
        directory.apply_listing(vec![file("a.json")]);
        directory.apply_listing(Vec::new());
        assert_eq!(directory.selected(), None);
        assert!(directory.files().is_empty());
    }

    #[test]
    fn rejects_unlisted_file() {
        let mut directory = Directory::default();
        directory.apply_listing(vec![file("a.json")]);
        assert_eq!(
            directory.select("zzz.json"),
            Err(InputError::UnknownSourceFile("zzz.json".into()))
        );
        assert_eq!(directory.selected(), Some("a.json"));
    }
}
