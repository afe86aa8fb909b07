// src/form/test_cases.rs
use std::collections::BTreeMap;
use std::fmt;

use crate::errors::{ClientError, Result};
use crate::models::TestCase;

/// Identifier of a test case row. Never reused within one list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowId(u32);

impl RowId {
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hands out row ids. The counter only ever grows.
#[derive(Debug, Clone, Default)]
pub struct RowIdAllocator {
    next: u32,
}

impl RowIdAllocator {
    pub fn allocate(&mut self) -> RowId {
        let id = RowId(self.next);
        self.next += 1;
        id
    }

    /// Upper bound (exclusive) of every id handed out so far.
    pub fn bound(&self) -> u32 {
        self.next
    }
}

/// The two inputs of one row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestCaseRow {
    pub function_call: String,
    pub expected: String,
}

impl TestCaseRow {
    fn to_test_case(&self) -> Option<TestCase> {
        if self.function_call.is_empty() || self.expected.is_empty() {
            return None;
        }
        Some(TestCase::new(self.function_call.clone(), self.expected.clone()))
    }
}

/// Editable list of test case rows.
///
/// Starts with a single empty row `0`. Removing a row leaves a hole in the id
/// sequence; ids are never handed out twice.
#[derive(Debug, Clone)]
pub struct TestCaseList {
    ids: RowIdAllocator,
    rows: BTreeMap<RowId, TestCaseRow>,
}

impl Default for TestCaseList {
    fn default() -> Self {
        Self::new()
    }
}

impl TestCaseList {
    pub fn new() -> Self {
        let mut list = Self {
            ids: RowIdAllocator::default(),
            rows: BTreeMap::new(),
        };
        list.add_row();
        list
    }

    /// Builds a list whose rows hold `pairs` in order, the first pair in row 0.
    pub fn from_pairs<I, C, E>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (C, E)>,
        C: Into<String>,
        E: Into<String>,
    {
        let mut list = Self::new();
        let mut first = true;
        for (call, expected) in pairs {
            let id = if first {
                first = false;
                RowId(0)
            } else {
                list.add_row()
            };
            if let Some(row) = list.rows.get_mut(&id) {
                row.function_call = call.into();
                row.expected = expected.into();
            }
        }
        list
    }

    pub fn add_row(&mut self) -> RowId {
        let id = self.ids.allocate();
        self.rows.insert(id, TestCaseRow::default());
        log::debug!("Added test case row {}", id);
        id
    }

    /// Returns `false` if the row was already gone.
    pub fn remove_row(&mut self, id: RowId) -> bool {
        let removed = self.rows.remove(&id).is_some();
        if removed {
            log::debug!("Removed test case row {}", id);
        }
        removed
    }

    pub fn set_call(&mut self, id: RowId, value: impl Into<String>) -> Result<()> {
        self.row_mut(id)?.function_call = value.into();
        Ok(())
    }

    pub fn set_expected(&mut self, id: RowId, value: impl Into<String>) -> Result<()> {
        self.row_mut(id)?.expected = value.into();
        Ok(())
    }

    pub fn row(&self, id: RowId) -> Option<&TestCaseRow> {
        self.rows.get(&id)
    }

    /// Live rows in id order.
    pub fn rows(&self) -> impl Iterator<Item = (RowId, &TestCaseRow)> {
        self.rows.iter().map(|(id, row)| (*id, row))
    }

    /// Lowest live row id.
    pub fn first_row(&self) -> Option<RowId> {
        self.rows.keys().next().copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The id the next `add_row` will hand out.
    pub fn next_id(&self) -> RowId {
        RowId(self.ids.bound())
    }

    /// Complete pairs in add order. Walks every id ever handed out, skipping
    /// removed rows and rows with an empty field.
    pub fn collect(&self) -> Vec<TestCase> {
        (0..self.ids.bound())
            .filter_map(|n| self.rows.get(&RowId(n)))
            .filter_map(TestCaseRow::to_test_case)
            .collect()
    }

    fn row_mut(&mut self, id: RowId) -> Result<&mut TestCaseRow> {
        self.rows.get_mut(&id).ok_or(ClientError::UnknownRow(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_with_row_zero() {
        let list = TestCaseList::new();
        assert_eq!(list.len(), 1);
        assert!(list.row(RowId(0)).is_some());
        assert_eq!(list.next_id(), RowId(1));
        assert!(list.collect().is_empty());
    }

    #[test]
    fn test_incomplete_rows_are_dropped() {
        let mut list = TestCaseList::new();
        list.set_call(RowId(0), "add(1, 2)").unwrap();

        let second = list.add_row();
        list.set_call(second, "add(2, 2)").unwrap();
        list.set_expected(second, "4").unwrap();

        let third = list.add_row();
        list.set_expected(third, "9").unwrap();

        assert_eq!(list.collect(), vec![TestCase::new("add(2, 2)", "4")]);
    }

    #[test]
    fn test_complete_rows_keep_add_order() {
        let list = TestCaseList::from_pairs([("f(0)", "0"), ("f(1)", "1"), ("f(5)", "5")]);
        assert_eq!(
            list.collect(),
            vec![
                TestCase::new("f(0)", "0"),
                TestCase::new("f(1)", "1"),
                TestCase::new("f(5)", "5"),
            ]
        );
    }

    #[test]
    fn test_removed_row_is_skipped_and_id_not_reused() {
        let mut list = TestCaseList::from_pairs([("a()", "1"), ("b()", "2")]);
        assert!(list.remove_row(RowId(1)));
        assert!(!list.remove_row(RowId(1)));

        let next = list.add_row();
        assert_eq!(next, RowId(2));
        list.set_call(next, "c()").unwrap();
        list.set_expected(next, "3").unwrap();

        assert_eq!(
            list.collect(),
            vec![TestCase::new("a()", "1"), TestCase::new("c()", "3")]
        );
    }

    #[test]
    fn test_editing_removed_row_fails() {
        let mut list = TestCaseList::new();
        let id = list.add_row();
        list.remove_row(id);
        assert!(matches!(list.set_call(id, "x"), Err(ClientError::UnknownRow(row)) if row == id));
    }

    #[test]
    fn test_values_are_not_trimmed() {
        let list = TestCaseList::from_pairs([(" ", " ")]);
        assert_eq!(list.collect(), vec![TestCase::new(" ", " ")]);
    }
}
