//! Fixed endpoint map derived from the configurable API base URL.

/// Every URL the console talks to, anchored at one base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub base: String,
    pub docs: String,
    pub upload: String,
    pub status: String,
    pub items: String,
    pub files: String,
    pub validate_one: String,
    pub upload_selected: String,
    pub delete_by_item_number: String,
}

impl Endpoints {
    pub fn resolve(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/').to_string();
        Self {
            docs: format!("{base}/docs"),
            upload: format!("{base}/items/upload"),
            status: format!("{base}/items/status"),
            items: format!("{base}/items/json"),
            files: format!("{base}/items/json/files"),
            validate_one: format!("{base}/items/validate_one/"),
            upload_selected: format!("{base}/items/upload_one"),
            delete_by_item_number: format!("{base}/items/delete/by-item-number"),
            base,
        }
    }

    pub fn items_url(&self, limit: u32, source: Option<&str>) -> String {
        with_source(format!("{}?limit={limit}", self.items), source)
    }

    pub fn validate_one_url(&self, item_id: &str, source: Option<&str>) -> String {
        with_source(
            format!("{}{}", self.validate_one, urlencoding::encode(item_id)),
            source,
        )
    }

    pub fn upload_selected_url(&self, source: Option<&str>) -> String {
        with_source(self.upload_selected.clone(), source)
    }

    /// `limit=0` asks the backend for every item in scope.
    pub fn upload_all_url(&self, source: Option<&str>) -> String {
        with_source(format!("{}?limit=0", self.upload), source)
    }
}

/// Appends `source_file` only when a source is selected.
pub fn with_source(url: String, source: Option<&str>) -> String {
    let Some(source) = source.filter(|s| !s.is_empty()) else {
        return url;
    };
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}source_file={}", urlencoding::encode(source))
}
