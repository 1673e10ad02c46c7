use std::collections::HashSet;

use shared::{
    domain::{Item, ItemId},
    error::InputError,
    protocol::ItemsPage,
};

/// Loaded items, the free-text filter and the multi-select set.
///
/// Every selected id refers to a loaded item: the selection is cleared on
/// reload and pruned whenever items are removed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    items: Vec<Item>,
    total: Option<u64>,
    query: String,
    selection: Vec<ItemId>,
}

impl Catalog {
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn total(&self) -> Option<u64> {
        self.total
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn selection(&self) -> &[ItemId] {
        &self.selection
    }

    pub fn replace(&mut self, page: ItemsPage) {
        self.items = page.items;
        self.total = page.total;
        self.selection.clear();
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.total = None;
        self.selection.clear();
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Case-insensitive substring match on id or resolved title.
    pub fn filtered(&self) -> Vec<&Item> {
        let query = self.query.trim().to_lowercase();
        if query.is_empty() {
            return self.items.iter().collect();
        }
        self.items
            .iter()
            .filter(|item| {
                item.id.as_str().to_lowercase().contains(&query)
                    || item.title().to_lowercase().contains(&query)
            })
            .collect()
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.items.iter().any(|item| item.id == *id)
    }

    pub fn is_selected(&self, id: &ItemId) -> bool {
        self.selection.contains(id)
    }

    pub fn select(&mut self, id: &ItemId) -> Result<(), InputError> {
        if !self.contains(id) {
            return Err(InputError::UnknownItem(id.to_string()));
        }
        if !self.is_selected(id) {
            self.selection.push(id.clone());
        }
        Ok(())
    }

    pub fn deselect(&mut self, id: &ItemId) {
        self.selection.retain(|selected| selected != id);
    }

    /// Returns whether the id is selected afterwards.
    pub fn toggle(&mut self, id: &ItemId) -> Result<bool, InputError> {
        if self.is_selected(id) {
            self.deselect(id);
            return Ok(false);
        }
        self.select(id)?;
        Ok(true)
    }

    /// First selected item in catalog order.
    pub fn first_selected_item(&self) -> Option<&Item> {
        self.items.iter().find(|item| self.is_selected(&item.id))
    }

    pub fn remove_ids(&mut self, ids: &HashSet<ItemId>) -> usize {
        let before = self.items.len();
        self.items.retain(|item| !ids.contains(&item.id));
        self.selection.retain(|id| !ids.contains(id));
        before - self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn catalog() -> Catalog {
        let mut catalog = Catalog::default();
        catalog.replace(ItemsPage::from_body(&json!({
            "items": [
                {"ID": "83859", "Name": "Corner Sofa"},
                {"ID": "2", "Artikelbeschreibung": "Dining TABLE"},
                {"ID": "3"}
            ],
            "total": 3
        })));
        catalog
    }

    #[test]
    fn reload_always_clears_selection() {
        let mut catalog = catalog();
        catalog.select(&ItemId::new("2")).expect("loaded");
        catalog.replace(ItemsPage::from_body(&json!({"items": [{"ID": "2"}]})));
        assert!(catalog.selection().is_empty());
        assert_eq!(catalog.total(), None);
    }

    #[test]
    fn filter_matches_id_or_title_without_mutating_items() {
        let mut catalog = catalog();
        catalog.set_query("  sofa ");
        let ids: Vec<_> = catalog.filtered().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["83859"]);

        catalog.set_query("table");
        let ids: Vec<_> = catalog.filtered().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["2"]);

        catalog.set_query("ITEM");
        let ids: Vec<_> = catalog.filtered().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["3"], "fallback title participates in matching");

        catalog.set_query("");
        assert_eq!(catalog.filtered().len(), 3);
        assert_eq!(catalog.items().len(), 3);
    }

    #[test]
    fn toggling_is_insertion_ordered_and_idempotent() {
        let mut catalog = catalog();
        assert_eq!(catalog.toggle(&ItemId::new("3")), Ok(true));
        assert_eq!(catalog.toggle(&ItemId::new("83859")), Ok(true));
        catalog.select(&ItemId::new("3")).expect("again");
        assert_eq!(
            catalog.selection(),
            &[ItemId::new("3"), ItemId::new("83859")]
        );
        assert_eq!(
            catalog.first_selected_item().map(|i| i.id.as_str()),
            Some("83859")
        );

        assert_eq!(catalog.toggle(&ItemId::new("3")), Ok(false));
        catalog.deselect(&ItemId::new("3"));
        assert_eq!(catalog.selection(), &[ItemId::new("83859")]);
    }

    #[test]
    fn unknown_ids_cannot_be_selected() {
        let mut catalog = catalog();
        assert_eq!(
            catalog.toggle(&ItemId::new("404")),
            Err(InputError::UnknownItem("404".into()))
        );
        assert!(catalog.selection().is_empty());
    }
}
