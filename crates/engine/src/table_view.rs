//! Search, Sort and Pagination - Table View Layer
//!
//! A pure view over a borrowed row set:
//! - `render(state)` maps (rows, columns, state) -> one visible page
//! - `update(state, event)` is the only way state changes
//!
//! Key invariants:
//! - Search filters first, sort applies to the filtered set, paging last
//! - Sort is stable; equal keys keep original row order in both directions
//! - total_pages >= 1 even when nothing matches
//! - Changing the search term always lands on page 1

use std::cmp::Ordering;

use dashgen_core::{RawValue, Row};
use ordered_float::OrderedFloat;
use serde::Serialize;

/// Rows per page.
pub const PAGE_SIZE: usize = 10;

// =============================================================================
// State
// =============================================================================

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Current sort state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortState {
    pub column: String,
    pub direction: SortDirection,
}

/// Everything a table instance remembers between events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableViewState {
    pub search_term: String,
    /// 1-based
    pub current_page: usize,
    /// None = original row order
    pub sort: Option<SortState>,
}

impl Default for TableViewState {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            current_page: 1,
            sort: None,
        }
    }
}

/// User interactions the table reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent {
    /// New search term; resets to page 1
    Search(String),
    /// Header activated: same column toggles direction, new column sorts ascending
    SortBy(String),
    /// Jump to a 1-based page, clamped
    GoToPage(usize),
    NextPage,
    PrevPage,
}

// =============================================================================
// Output
// =============================================================================

/// One rendered page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TablePage<'a> {
    pub rows: Vec<&'a Row>,
    pub total_filtered: usize,
    pub total_pages: usize,
    /// Page actually shown (clamped into range)
    pub current_page: usize,
    /// 1-based index of the first row shown; 0 when nothing matches
    pub first_entry: usize,
    /// 1-based index of the last row shown; 0 when nothing matches
    pub last_entry: usize,
}

/// `max(1, ceil(filtered / PAGE_SIZE))`
pub fn total_pages(filtered: usize) -> usize {
    filtered.div_ceil(PAGE_SIZE).max(1)
}

// =============================================================================
// TableView
// =============================================================================

#[derive(Debug, Clone, Copy)]
pub struct TableView<'a> {
    rows: &'a [Row],
    columns: &'a [String],
}

impl<'a> TableView<'a> {
    pub fn new(rows: &'a [Row], columns: &'a [String]) -> Self {
        Self { rows, columns }
    }

    /// Rows matching `term` on any bound column, case-insensitive. Empty term matches all.
    pub fn filtered(&self, term: &str) -> Vec<&'a Row> {
        if term.is_empty() {
            return self.rows.iter().collect();
        }
        let needle = term.to_lowercase();
        self.rows
            .iter()
            .filter(|row| {
                self.columns
                    .iter()
                    .any(|col| row.get(col).display_string().to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Filtered and sorted rows (all pages).
    pub fn arranged(&self, state: &TableViewState) -> Vec<&'a Row> {
        let mut rows = self.filtered(&state.search_term);
        if let Some(sort) = &state.sort {
            rows.sort_by(|a, b| {
                let ord = compare_values(a.get(&sort.column), b.get(&sort.column));
                match sort.direction {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                }
            });
        }
        rows
    }

    pub fn filtered_count(&self, state: &TableViewState) -> usize {
        self.filtered(&state.search_term).len()
    }

    /// The visible page for `state`.
    pub fn render(&self, state: &TableViewState) -> TablePage<'a> {
        let arranged = self.arranged(state);
        let total_filtered = arranged.len();
        let pages = total_pages(total_filtered);
        let current_page = state.current_page.clamp(1, pages);

        let start = (current_page - 1) * PAGE_SIZE;
        let rows: Vec<&'a Row> = arranged.into_iter().skip(start).take(PAGE_SIZE).collect();
        let (first_entry, last_entry) = if rows.is_empty() {
            (0, 0)
        } else {
            (start + 1, start + rows.len())
        };

        TablePage {
            rows,
            total_filtered,
            total_pages: pages,
            current_page,
            first_entry,
            last_entry,
        }
    }

    /// Apply one event and return the next state.
    pub fn update(&self, mut state: TableViewState, event: TableEvent) -> TableViewState {
        match event {
            TableEvent::Search(term) => {
                state.search_term = term;
                state.current_page = 1;
            }
            TableEvent::SortBy(column) => {
                state.sort = Some(match state.sort.take() {
                    Some(current) if current.column == column => SortState {
                        column,
                        direction: current.direction.toggled(),
                    },
                    _ => SortState {
                        column,
                        direction: SortDirection::Ascending,
                    },
                });
            }
            TableEvent::GoToPage(page) => {
                state.current_page = self.clamp_page(&state, page);
            }
            TableEvent::NextPage => {
                state.current_page = self.clamp_page(&state, state.current_page.saturating_add(1));
            }
            TableEvent::PrevPage => {
                state.current_page = self.clamp_page(&state, state.current_page.saturating_sub(1));
            }
        }
        state
    }

    fn clamp_page(&self, state: &TableViewState, page: usize) -> usize {
        page.clamp(1, total_pages(self.filtered_count(state)))
    }
}

/// Native numbers on both sides compare numerically. Anything else, numeric
/// text included, compares by lowercase display string.
pub fn compare_values(a: &RawValue, b: &RawValue) -> Ordering {
    match (a, b) {
        (RawValue::Number(x), RawValue::Number(y)) => OrderedFloat(*x).cmp(&OrderedFloat(*y)),
        _ => a
            .display_string()
            .to_lowercase()
            .cmp(&b.display_string().to_lowercase()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows_with(values: &[(&str, &str)]) -> Vec<Row> {
        values
            .iter()
            .map(|(name, amount)| [("name", *name), ("amount", *amount)].into_iter().collect())
            .collect()
    }

    fn cols() -> Vec<String> {
        vec!["name".into(), "amount".into()]
    }

    fn names(page: &TablePage<'_>) -> Vec<String> {
        page.rows.iter().map(|r| r.get("name").display_string()).collect()
    }

    #[test]
    fn total_pages_minimum_one() {
        assert_eq!(total_pages(0), 1);
        assert_eq!(total_pages(1), 1);
        assert_eq!(total_pages(10), 1);
        assert_eq!(total_pages(11), 2);
        assert_eq!(total_pages(25), 3);
    }

    #[test]
    fn scenario_c_search_and_paging() {
        // 25 rows, 12 of which contain "match"
        let owned: Vec<(String, String)> = (0..25)
            .map(|i| {
                let name = if i < 12 { format!("match-{i}") } else { format!("other-{i}") };
                (name, i.to_string())
            })
            .collect();
        let pairs: Vec<(&str, &str)> = owned.iter().map(|(a, b)| (a.as_str(), b.as_str())).collect();
        let rows = rows_with(&pairs);
        let columns = cols();
        let view = TableView::new(&rows, &columns);

        let state = view.update(TableViewState::default(), TableEvent::Search("MATCH".into()));
        let page1 = view.render(&state);
        assert_eq!(page1.total_filtered, 12);
        assert_eq!(page1.total_pages, 2);
        assert_eq!(page1.rows.len(), 10);
        assert_eq!((page1.first_entry, page1.last_entry), (1, 10));

        let state = view.update(state, TableEvent::NextPage);
        let page2 = view.render(&state);
        assert_eq!(page2.current_page, 2);
        assert_eq!(page2.rows.len(), 2);
        assert_eq!((page2.first_entry, page2.last_entry), (11, 12));
    }

    #[test]
    fn search_resets_page() {
        let owned: Vec<String> = (0..40).map(|i| format!("row{i}")).collect();
        let pairs: Vec<(&str, &str)> = owned.iter().map(|s| (s.as_str(), "1")).collect();
        let rows = rows_with(&pairs);
        let columns = cols();
        let view = TableView::new(&rows, &columns);

        let state = view.update(TableViewState::default(), TableEvent::GoToPage(4));
        assert_eq!(state.current_page, 4);
        let state = view.update(state, TableEvent::Search("row3".into()));
        assert_eq!(state.current_page, 1);
    }

    #[test]
    fn page_navigation_clamps() {
        let rows = rows_with(&[("a", "1"), ("b", "2")]);
        let columns = cols();
        let view = TableView::new(&rows, &columns);

        let state = view.update(TableViewState::default(), TableEvent::GoToPage(9));
        assert_eq!(state.current_page, 1);
        let state = view.update(state, TableEvent::PrevPage);
        assert_eq!(state.current_page, 1);
        let state = view.update(state, TableEvent::GoToPage(0));
        assert_eq!(state.current_page, 1);
    }

    #[test]
    fn no_match_still_one_page() {
        let rows = rows_with(&[("a", "1")]);
        let columns = cols();
        let view = TableView::new(&rows, &columns);
        let state = view.update(TableViewState::default(), TableEvent::Search("zzz".into()));
        let page = view.render(&state);
        assert_eq!(page.total_filtered, 0);
        assert_eq!(page.total_pages, 1);
        assert!(page.rows.is_empty());
        assert_eq!((page.first_entry, page.last_entry), (0, 0));
    }

    #[test]
    fn sort_numeric_then_toggle() {
        let rows: Vec<Row> = [("a", 10.0), ("b", 9.0), ("c", 100.0)]
            .iter()
            .map(|(name, amount)| {
                [("name", RawValue::from(*name)), ("amount", RawValue::Number(*amount))]
                    .into_iter()
                    .collect()
            })
            .collect();
        let columns = cols();
        let view = TableView::new(&rows, &columns);

        let state = view.update(TableViewState::default(), TableEvent::SortBy("amount".into()));
        assert_eq!(names(&view.render(&state)), vec!["b", "a", "c"]);

        let state = view.update(state, TableEvent::SortBy("amount".into()));
        assert_eq!(state.sort.as_ref().unwrap().direction, SortDirection::Descending);
        assert_eq!(names(&view.render(&state)), vec!["c", "a", "b"]);
    }

    #[test]
    fn new_column_resets_to_ascending() {
        let rows = rows_with(&[("b", "1"), ("A", "2"), ("c", "3")]);
        let columns = cols();
        let view = TableView::new(&rows, &columns);

        let state = view.update(TableViewState::default(), TableEvent::SortBy("amount".into()));
        let state = view.update(state, TableEvent::SortBy("amount".into()));
        let state = view.update(state, TableEvent::SortBy("name".into()));
        let sort = state.sort.as_ref().unwrap();
        assert_eq!(sort.column, "name");
        assert_eq!(sort.direction, SortDirection::Ascending);
        // case-insensitive string order
        assert_eq!(names(&view.render(&state)), vec!["A", "b", "c"]);
    }

    #[test]
    fn numeric_text_sorts_as_strings() {
        let rows = rows_with(&[("nine", "9"), ("ten", "10")]);
        let columns = cols();
        let view = TableView::new(&rows, &columns);

        let state = view.update(TableViewState::default(), TableEvent::SortBy("amount".into()));
        assert_eq!(names(&view.render(&state)), vec!["ten", "nine"]);
    }

    #[test]
    fn mixed_values_fall_back_to_strings() {
        assert_eq!(compare_values(&"10".into(), &"9".into()), Ordering::Less);
        assert_eq!(compare_values(&RawValue::Number(10.0), &RawValue::Number(9.0)), Ordering::Greater);
        assert_eq!(compare_values(&RawValue::Number(10.0), &"9".into()), Ordering::Less);
        assert_eq!(compare_values(&"10".into(), &"x".into()), Ordering::Less);
        assert_eq!(compare_values(&"Apple".into(), &"apple".into()), Ordering::Equal);
        assert_eq!(compare_values(&RawValue::Empty, &"a".into()), Ordering::Less);
    }

    #[test]
    fn sort_is_stable_both_directions() {
        let rows = rows_with(&[("first", "1"), ("second", "1"), ("third", "0")]);
        let columns = cols();
        let view = TableView::new(&rows, &columns);

        let asc = view.update(TableViewState::default(), TableEvent::SortBy("amount".into()));
        assert_eq!(names(&view.render(&asc)), vec!["third", "first", "second"]);
        let desc = view.update(asc, TableEvent::SortBy("amount".into()));
        assert_eq!(names(&view.render(&desc)), vec!["first", "second", "third"]);
    }

    #[test]
    fn unsorted_keeps_original_order() {
        let rows = rows_with(&[("z", "3"), ("a", "1")]);
        let columns = cols();
        let view = TableView::new(&rows, &columns);
        assert_eq!(names(&view.render(&TableViewState::default())), vec!["z", "a"]);
    }

    #[test]
    fn search_only_looks_at_bound_columns() {
        let rows: Vec<Row> = vec![[("name", "a"), ("hidden", "needle")].into_iter().collect()];
        let columns = vec!["name".to_string()];
        let view = TableView::new(&rows, &columns);
        assert!(view.filtered("needle").is_empty());
        assert_eq!(view.filtered("").len(), 1);
    }
}
