//! Generic data table state: text search, faceted filters, column visibility,
//! row selection, sorting and pagination.
//!
//! The rendering half lives in `ui::data_table`; everything here is plain data
//! so it can be shared by every record panel and tested without a UI.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

/// Rows shown in a data table must expose a stable id for selection.
pub trait TableRow {
    fn row_id(&self) -> i64;
}

/// One selectable value of a faceted filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetOption {
    /// Value compared against the column key.
    pub value: String,
    /// Text shown to the user.
    pub label: String,
}

impl FacetOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Column definition.
pub struct Column<T> {
    pub id: &'static str,
    pub title: &'static str,
    /// Display text of the cell.
    pub value: fn(&T) -> String,
    /// Machine key used for facets and sorting; falls back to `value`.
    pub key: Option<fn(&T) -> String>,
    pub hideable: bool,
    pub sortable: bool,
    pub facet: Option<Vec<FacetOption>>,
}

impl<T> Column<T> {
    pub fn new(id: &'static str, title: &'static str, value: fn(&T) -> String) -> Self {
        Self {
            id,
            title,
            value,
            key: None,
            hideable: true,
            sortable: true,
            facet: None,
        }
    }

    /// Sort (and facet) on a machine key instead of the display text.
    pub fn keyed(mut self, key: fn(&T) -> String) -> Self {
        self.key = Some(key);
        self
    }

    /// Enable a multi-select faceted filter on this column.
    pub fn faceted(mut self, options: Vec<FacetOption>, key: fn(&T) -> String) -> Self {
        self.facet = Some(options);
        self.key = Some(key);
        self
    }

    /// Column cannot be hidden.
    pub fn fixed(mut self) -> Self {
        self.hideable = false;
        self
    }

    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    pub fn cell(&self, row: &T) -> String {
        (self.value)(row)
    }

    pub fn key_of(&self, row: &T) -> String {
        match self.key {
            Some(key) => key(row),
            None => (self.value)(row),
        }
    }
}

/// Filter, selection and paging state of one table.
#[derive(Debug, Clone)]
pub struct TableState {
    search_column: &'static str,
    search: String,
    facets: BTreeMap<&'static str, BTreeSet<String>>,
    hidden: BTreeSet<&'static str>,
    selected: BTreeSet<i64>,
    sort: Option<(&'static str, SortDirection)>,
    page: usize,
    page_size: usize,
}

impl TableState {
    pub fn new(search_column: &'static str, page_size: usize) -> Self {
        Self {
            search_column,
            search: String::new(),
            facets: BTreeMap::new(),
            hidden: BTreeSet::new(),
            selected: BTreeSet::new(),
            sort: None,
            page: 0,
            page_size: page_size.max(1),
        }
    }

    pub fn search_column(&self) -> &'static str {
        self.search_column
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Mutable search text for a text edit. Call [`Self::filters_changed`] when it changes.
    pub fn search_mut(&mut self) -> &mut String {
        &mut self.search
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
        self.filters_changed();
    }

    /// Any filter change sends the user back to the first page.
    pub fn filters_changed(&mut self) {
        self.page = 0;
    }

    /// Selected values of a faceted filter.
    pub fn facet_selection(&self, column: &str) -> Option<&BTreeSet<String>> {
        self.facets.get(column)
    }

    pub fn is_facet_selected(&self, column: &str, value: &str) -> bool {
        self.facets.get(column).is_some_and(|set| set.contains(value))
    }

    /// Toggle one value of a faceted filter.
    pub fn toggle_facet(&mut self, column: &'static str, value: &str) {
        let set = self.facets.entry(column).or_default();
        if !set.remove(value) {
            set.insert(value.to_string());
        }
        if set.is_empty() {
            self.facets.remove(column);
        }
        self.filters_changed();
    }

    /// Clear a single faceted filter.
    pub fn clear_facet(&mut self, column: &str) {
        self.facets.remove(column);
        self.filters_changed();
    }

    /// Clear the text filter and every faceted filter.
    pub fn reset_filters(&mut self) {
        self.search.clear();
        self.facets.clear();
        self.filters_changed();
    }

    pub fn is_filtered(&self) -> bool {
        !self.search.trim().is_empty() || !self.facets.is_empty()
    }

    pub fn is_visible<T>(&self, column: &Column<T>) -> bool {
        !column.hideable || !self.hidden.contains(column.id)
    }

    pub fn toggle_column<T>(&mut self, column: &Column<T>) {
        if !column.hideable {
            return;
        }
        if !self.hidden.remove(column.id) {
            self.hidden.insert(column.id);
        }
    }

    pub fn sort(&self) -> Option<(&'static str, SortDirection)> {
        self.sort
    }

    /// Cycle a column through ascending, descending and unsorted.
    pub fn toggle_sort(&mut self, column: &'static str) {
        self.sort = match self.sort {
            Some((current, SortDirection::Ascending)) if current == column => {
                Some((column, SortDirection::Descending))
            }
            Some((current, SortDirection::Descending)) if current == column => None,
            _ => Some((column, SortDirection::Ascending)),
        };
    }

    pub fn is_selected(&self, id: i64) -> bool {
        self.selected.contains(&id)
    }

    pub fn toggle_row(&mut self, id: i64) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    /// Select every visible row, or clear them if all are already selected.
    pub fn toggle_all(&mut self, visible: &[i64]) {
        if !visible.is_empty() && visible.iter().all(|id| self.selected.contains(id)) {
            for id in visible {
                self.selected.remove(id);
            }
        } else {
            self.selected.extend(visible.iter().copied());
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    pub fn selected_ids(&self) -> Vec<i64> {
        self.selected.iter().copied().collect()
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Drop selections of rows that no longer exist.
    pub fn retain_selection(&mut self, existing: &[i64]) {
        let existing: BTreeSet<i64> = existing.iter().copied().collect();
        self.selected.retain(|id| existing.contains(id));
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn set_page_size(&mut self, size: usize) {
        self.page_size = size.max(1);
        self.page = 0;
    }

    pub fn page_count(&self, row_count: usize) -> usize {
        row_count.div_ceil(self.page_size).max(1)
    }

    /// Current page, clamped to the available pages.
    pub fn current_page(&self, row_count: usize) -> usize {
        self.page.min(self.page_count(row_count) - 1)
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Rows of the current page.
    pub fn page_rows<'r, R>(&self, rows: &'r [R]) -> &'r [R] {
        let start = self.current_page(rows.len()) * self.page_size;
        let end = (start + self.page_size).min(rows.len());
        &rows[start..end]
    }

    fn matches_search<T>(&self, columns: &[Column<T>], row: &T) -> bool {
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        columns
            .iter()
            .find(|c| c.id == self.search_column)
            .is_none_or(|c| c.cell(row).to_lowercase().contains(&needle))
    }

    fn matches_facets<T>(&self, columns: &[Column<T>], row: &T, skip: Option<&str>) -> bool {
        self.facets.iter().all(|(column_id, values)| {
            if Some(*column_id) == skip || values.is_empty() {
                return true;
            }
            columns
                .iter()
                .find(|c| c.id == *column_id)
                .is_none_or(|c| values.contains(&c.key_of(row)))
        })
    }

    /// Filter (AND of search and all facets) and sort.
    pub fn apply<'a, T>(&self, columns: &[Column<T>], rows: &'a [T]) -> Vec<&'a T> {
        let mut out: Vec<&T> = rows
            .iter()
            .filter(|row| self.matches_search(columns, row) && self.matches_facets(columns, row, None))
            .collect();

        if let Some((sort_id, direction)) = self.sort
            && let Some(column) = columns.iter().find(|c| c.id == sort_id)
        {
            out.sort_by(|a, b| {
                let cmp = compare_keys(&column.key_of(a), &column.key_of(b));
                match direction {
                    SortDirection::Ascending => cmp,
                    SortDirection::Descending => cmp.reverse(),
                }
            });
        }

        out
    }

    /// Count rows per facet value, over rows matching every other active filter.
    pub fn facet_counts<T>(&self, columns: &[Column<T>], column_id: &str, rows: &[T]) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        let Some(column) = columns.iter().find(|c| c.id == column_id) else {
            return counts;
        };

        for row in rows
            .iter()
            .filter(|row| self.matches_search(columns, row) && self.matches_facets(columns, row, Some(column_id)))
        {
            *counts.entry(column.key_of(row)).or_insert(0) += 1;
        }
        counts
    }
}

/// Numeric-aware comparison so ids and counts sort naturally.
fn compare_keys(a: &str, b: &str) -> Ordering {
    match (a.parse::<f64>(), b.parse::<f64>()) {
        (Ok(x), Ok(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => a.to_lowercase().cmp(&b.to_lowercase()),
    }
}

/// Columns and state of one table, borrowed for a frame.
///
/// Columns are rebuilt each frame so row types may borrow from the store;
/// the state lives with the panel.
pub struct DataTable<'a, T> {
    pub columns: &'a [Column<T>],
    pub state: &'a mut TableState,
}

impl<'a, T: TableRow> DataTable<'a, T> {
    pub fn new(columns: &'a [Column<T>], state: &'a mut TableState) -> Self {
        Self { columns, state }
    }

    pub fn filtered<'r>(&self, rows: &'r [T]) -> Vec<&'r T> {
        self.state.apply(self.columns, rows)
    }

    pub fn facet_counts(&self, column_id: &str, rows: &[T]) -> BTreeMap<String, usize> {
        self.state.facet_counts(self.columns, column_id, rows)
    }

    pub fn visible_columns(&self) -> Vec<&'a Column<T>> {
        let columns: &'a [Column<T>] = self.columns;
        columns.iter().filter(|c| self.state.is_visible(c)).collect()
    }

    pub fn search_title(&self) -> &'static str {
        self.columns
            .iter()
            .find(|c| c.id == self.state.search_column())
            .map(|c| c.title)
            .unwrap_or("")
    }

    /// Selected rows that are still loaded.
    pub fn selected_rows<'r>(&self, rows: &'r [T]) -> Vec<&'r T> {
        rows.iter().filter(|r| self.state.is_selected(r.row_id())).collect()
    }

    /// Forget selections for rows no longer loaded.
    pub fn sync_selection(&mut self, rows: &[T]) {
        let ids: Vec<i64> = rows.iter().map(TableRow::row_id).collect();
        self.state.retain_selection(&ids);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Row {
        id: i64,
        name: &'static str,
        status: &'static str,
        kind: &'static str,
    }

    impl TableRow for Row {
        fn row_id(&self) -> i64 {
            self.id
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { id: 1, name: "Benali Karim", status: "pending", kind: "internal" },
            Row { id: 2, name: "Haddad Samia", status: "approved", kind: "external" },
            Row { id: 3, name: "Benali Nadia", status: "rejected", kind: "external" },
            Row { id: 4, name: "Ould Ali", status: "pending", kind: "external" },
            Row { id: 10, name: "Zerrouki Amine", status: "approved", kind: "internal" },
        ]
    }

    fn columns() -> Vec<Column<Row>> {
        vec![
            Column::new("id", "Id", |r: &Row| r.id.to_string()).fixed(),
            Column::new("name", "Name", |r: &Row| r.name.to_string()),
            Column::new("status", "Status", |r: &Row| r.status.to_uppercase()).faceted(
                vec![
                    FacetOption::new("pending", "Pending"),
                    FacetOption::new("approved", "Approved"),
                    FacetOption::new("rejected", "Rejected"),
                ],
                |r: &Row| r.status.to_string(),
            ),
            Column::new("kind", "Kind", |r: &Row| r.kind.to_string()).faceted(
                vec![FacetOption::new("internal", "Internal"), FacetOption::new("external", "External")],
                |r: &Row| r.kind.to_string(),
            ),
        ]
    }

    fn state() -> TableState {
        TableState::new("name", 2)
    }

    fn ids(rows: &[&Row]) -> Vec<i64> {
        rows.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_no_filters_returns_all() {
        let data = rows();
        let cols = columns();
        let mut state = state();
        let table = DataTable::new(&cols, &mut state);
        assert_eq!(table.filtered(&data).len(), 5);
        assert!(!table.state.is_filtered());
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let data = rows();
        let cols = columns();
        let mut state = state();
        let mut table = DataTable::new(&cols, &mut state);
        table.state.set_search("benali");
        assert_eq!(ids(&table.filtered(&data)), vec![1, 3]);
    }

    #[test]
    fn test_search_only_targets_its_column() {
        let data = rows();
        let cols = columns();
        let mut state = state();
        let mut table = DataTable::new(&cols, &mut state);
        table.state.set_search("pending");
        assert!(table.filtered(&data).is_empty());
    }

    #[test]
    fn test_facet_values_are_ored_within_a_column() {
        let data = rows();
        let cols = columns();
        let mut state = state();
        let mut table = DataTable::new(&cols, &mut state);
        table.state.toggle_facet("status", "pending");
        table.state.toggle_facet("status", "rejected");
        assert_eq!(ids(&table.filtered(&data)), vec![1, 3, 4]);
    }

    #[test]
    fn test_filters_combine_with_and() {
        let data = rows();
        let cols = columns();
        let mut state = state();
        let mut table = DataTable::new(&cols, &mut state);
        table.state.toggle_facet("status", "pending");
        table.state.toggle_facet("kind", "external");
        assert_eq!(ids(&table.filtered(&data)), vec![4]);

        table.state.set_search("benali");
        assert!(table.filtered(&data).is_empty());
    }

    #[test]
    fn test_toggle_facet_twice_removes_filter() {
        let cols = columns();
        let mut state = state();
        let mut table = DataTable::new(&cols, &mut state);
        table.state.toggle_facet("kind", "internal");
        assert!(table.state.is_filtered());
        table.state.toggle_facet("kind", "internal");
        assert!(!table.state.is_filtered());
        assert!(table.state.facet_selection("kind").is_none());
    }

    #[test]
    fn test_reset_clears_everything() {
        let data = rows();
        let cols = columns();
        let mut state = state();
        let mut table = DataTable::new(&cols, &mut state);
        table.state.set_search("ali");
        table.state.toggle_facet("status", "approved");
        table.state.toggle_facet("kind", "internal");
        table.state.reset_filters();
        assert!(!table.state.is_filtered());
        assert_eq!(table.filtered(&data).len(), 5);
    }

    #[test]
    fn test_facet_counts_ignore_own_facet() {
        let data = rows();
        let cols = columns();
        let mut state = state();
        let mut table = DataTable::new(&cols, &mut state);
        table.state.toggle_facet("status", "pending");
        table.state.toggle_facet("kind", "internal");

        let status_counts = table.facet_counts("status", &data);
        assert_eq!(status_counts.get("pending"), Some(&1));
        assert_eq!(status_counts.get("approved"), Some(&1));
        assert_eq!(status_counts.get("rejected"), None);

        let kind_counts = table.facet_counts("kind", &data);
        assert_eq!(kind_counts.get("internal"), Some(&1));
        assert_eq!(kind_counts.get("external"), Some(&1));
    }

    #[test]
    fn test_sort_numeric_and_cycle() {
        let data = rows();
        let cols = columns();
        let mut state = state();
        let mut table = DataTable::new(&cols, &mut state);

        table.state.toggle_sort("id");
        assert_eq!(ids(&table.filtered(&data)), vec![1, 2, 3, 4, 10]);

        table.state.toggle_sort("id");
        assert_eq!(ids(&table.filtered(&data)), vec![10, 4, 3, 2, 1]);

        table.state.toggle_sort("id");
        assert_eq!(table.state.sort(), None);
    }

    #[test]
    fn test_pagination_and_clamp() {
        let data = rows();
        let cols = columns();
        let mut state = state();
        let mut table = DataTable::new(&cols, &mut state);
        let filtered = table.filtered(&data);
        assert_eq!(table.state.page_count(filtered.len()), 3);

        table.state.set_page(2);
        assert_eq!(ids(table.state.page_rows(&filtered)), vec![10]);

        // A narrower result set clamps to its last page.
        table.state.set_page(2);
        let narrowed: Vec<&Row> = filtered.iter().copied().take(3).collect();
        assert_eq!(table.state.current_page(narrowed.len()), 1);
        assert_eq!(ids(table.state.page_rows(&narrowed)), vec![3]);
    }

    #[test]
    fn test_filter_change_resets_page() {
        let cols = columns();
        let mut state = state();
        let mut table = DataTable::new(&cols, &mut state);
        table.state.set_page(2);
        table.state.toggle_facet("kind", "external");
        assert_eq!(table.state.current_page(100), 0);
    }

    #[test]
    fn test_empty_rows_have_one_page() {
        let cols = columns();
        let mut state = state();
        let table = DataTable::new(&cols, &mut state);
        let empty: Vec<&Row> = Vec::new();
        assert_eq!(table.state.page_count(0), 1);
        assert!(table.state.page_rows(&empty).is_empty());
    }

    #[test]
    fn test_selection_toggle_all() {
        let cols = columns();
        let mut state = state();
        let mut table = DataTable::new(&cols, &mut state);
        table.state.toggle_row(3);
        table.state.toggle_all(&[1, 2]);
        assert_eq!(table.state.selected_ids(), vec![1, 2, 3]);

        table.state.toggle_all(&[1, 2]);
        assert_eq!(table.state.selected_ids(), vec![3]);

        table.state.toggle_row(3);
        assert_eq!(table.state.selected_count(), 0);
    }

    #[test]
    fn test_sync_selection_drops_missing_rows() {
        let data = rows();
        let cols = columns();
        let mut state = state();
        let mut table = DataTable::new(&cols, &mut state);
        table.state.toggle_row(4);
        table.state.toggle_row(99);
        table.sync_selection(&data);
        assert_eq!(table.state.selected_ids(), vec![4]);
        assert_eq!(table.selected_rows(&data).len(), 1);
    }

    #[test]
    fn test_column_visibility() {
        let cols = columns();
        let mut state = state();
        let mut table = DataTable::new(&cols, &mut state);
        assert_eq!(table.visible_columns().len(), 4);

        let name = Column::new("name", "Name", |r: &Row| r.name.to_string());
        table.state.toggle_column(&name);
        assert_eq!(table.visible_columns().len(), 3);

        // Fixed columns stay visible.
        let id = Column::new("id", "Id", |r: &Row| r.id.to_string()).fixed();
        table.state.toggle_column(&id);
        assert_eq!(table.visible_columns().len(), 3);

        table.state.toggle_column(&name);
        assert_eq!(table.visible_columns().len(), 4);
    }
}
