//! Applies per-item bulk upload outcomes to the catalog.

use std::collections::HashSet;

use shared::{domain::ItemId, protocol::BulkUploadEntry};
use tracing::debug;

use super::catalog::Catalog;

/// Removes every item reported as uploaded from the catalog and the
/// selection. Failed or unidentifiable entries stay put for a retry.
/// Returns the number of items removed.
pub fn reconcile(catalog: &mut Catalog, entries: &[BulkUploadEntry]) -> usize {
    let succeeded: HashSet<ItemId> = entries
        .iter()
        .filter(|entry| entry.success)
        .filter_map(|entry| entry.item_id_local.clone())
        .collect();
    if succeeded.is_empty() {
        return 0;
    }
    let removed = catalog.remove_ids(&succeeded);
    debug!(
        reported = succeeded.len(),
        removed, "reconciled bulk upload result"
    );
    removed
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use shared::protocol::ItemsPage;

    use super::*;

    fn loaded(ids: &[&str]) -> Catalog {
        let items: Vec<_> = ids.iter().map(|id| json!({"ID": id})).collect();
        let mut catalog = Catalog::default();
        catalog.replace(ItemsPage::from_body(&json!({ "items": items })));
        for id in ids {
            catalog.select(&ItemId::new(*id)).expect("loaded");
        }
        catalog
    }

    fn entries(body: serde_json::Value) -> Vec<BulkUploadEntry> {
        BulkUploadEntry::parse_all(&body).expect("sequence")
    }

    fn ids(catalog: &Catalog) -> Vec<&str> {
        catalog.items().iter().map(|item| item.id.as_str()).collect()
    }

    #[test]
    fn keeps_failed_items_selected_for_retry() {
        let mut catalog = loaded(&["1", "2"]);
        let removed = reconcile(
            &mut catalog,
            &entries(json!([
                {"success": true, "item_id_local": "1"},
                {"success": false, "item_id_local": "2"}
            ])),
        );
        assert_eq!(removed, 1);
        assert_eq!(ids(&catalog), vec!["2"]);
        assert_eq!(catalog.selection(), &[ItemId::new("2")]);
    }

    #[test]
    fn no_successes_is_a_no_op() {
        let mut catalog = loaded(&["1", "2"]);
        let before = catalog.clone();
        reconcile(
            &mut catalog,
            &entries(json!([
                {"success": false, "item_id_local": "1"},
                {"success": "true", "item_id_local": "2"},
                {"item_id_local": "1"}
            ])),
        );
        assert_eq!(catalog, before);

        reconcile(&mut catalog, &[]);
        assert_eq!(catalog, before);
    }

    #[test]
    fn removes_only_reported_ids_with_duplicates_and_malformed_entries() {
        let mut catalog = loaded(&["1", "2", "3", "4"]);
        let removed = reconcile(
            &mut catalog,
            &entries(json!([
                {"success": true, "item_id_local": "3"},
                {"success": true, "item_id_local": " 3 "},
                {"success": true, "item_id_local": ""},
                {"success": true},
                {"success": true, "item_id_local": "999"},
                {"success": false, "item_id_local": "4"},
                "not an object"
            ])),
        );
        assert_eq!(removed, 1);
        assert_eq!(ids(&catalog), vec!["1", "2", "4"]);
        assert_eq!(
            catalog.selection(),
            &[ItemId::new("1"), ItemId::new("2"), ItemId::new("4")]
        );
    }
}
