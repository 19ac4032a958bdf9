//! Records fetched from the API, keyed by query.

use std::collections::HashMap;

use crate::api::{Records, Resource, ResourceKind};
use crate::cache::QueryKey;
use crate::models::InformationSheet;

/// Last successful result of every list query.
#[derive(Default)]
pub struct Store {
    lists: HashMap<QueryKey, Records>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: QueryKey, records: Records) {
        self.lists.insert(key, records);
    }

    /// Records of `R` for `scope`; empty until the first fetch completes.
    pub fn list<R: Resource>(&self, scope: Option<i64>) -> &[R] {
        self.lists
            .get(&QueryKey::scoped(R::KIND, scope))
            .and_then(R::from_records)
            .unwrap_or(&[])
    }

    pub fn contains(&self, key: QueryKey) -> bool {
        self.lists.contains_key(&key)
    }

    /// Unscoped record count, if loaded.
    pub fn count(&self, kind: ResourceKind) -> Option<usize> {
        self.lists.get(&QueryKey::all(kind)).map(Records::len)
    }

    pub fn sheets(&self) -> &[InformationSheet] {
        self.list::<InformationSheet>(None)
    }

    pub fn sheet(&self, id: i64) -> Option<&InformationSheet> {
        self.sheets().iter().find(|s| s.id == id)
    }

    /// `M00012 BENALI Karim`, or `#12` when the sheet is not loaded.
    pub fn sheet_label(&self, id: i64) -> String {
        self.sheet(id)
            .map(|s| s.label())
            .unwrap_or_else(|| format!("#{id}"))
    }

    pub fn clear(&mut self) {
        self.lists.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::bank_experience::fixtures::bank_experience;
    use crate::models::information_sheet::fixtures::sheet;
    use crate::models::{BankExperience, Gender};

    #[test]
    fn test_scopes_are_kept_apart() {
        let mut store = Store::new();
        store.insert(
            QueryKey::all(ResourceKind::BankExperiences),
            BankExperience::into_records(vec![
                bank_experience(1, 1, (2010, 1, 1), None),
                bank_experience(2, 2, (2011, 1, 1), None),
            ]),
        );
        store.insert(
            QueryKey::scoped(ResourceKind::BankExperiences, Some(2)),
            BankExperience::into_records(vec![bank_experience(2, 2, (2011, 1, 1), None)]),
        );

        assert_eq!(store.list::<BankExperience>(None).len(), 2);
        assert_eq!(store.list::<BankExperience>(Some(2)).len(), 1);
        assert!(store.list::<BankExperience>(Some(3)).is_empty());
        assert_eq!(store.count(ResourceKind::BankExperiences), Some(2));
    }

    #[test]
    fn test_sheet_lookup() {
        let mut store = Store::new();
        assert_eq!(store.sheet_label(7), "#7");

        store.insert(
            QueryKey::all(ResourceKind::InformationSheets),
            InformationSheet::into_records(vec![sheet(7, "Haddad", "Samia", Gender::Female)]),
        );
        assert_eq!(store.sheet_label(7), "M00007 HADDAD Samia");
        assert_eq!(store.count(ResourceKind::Users), None);

        store.clear();
        assert!(store.sheets().is_empty());
    }
}
