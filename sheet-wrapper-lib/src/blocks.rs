//! Contiguous-run compaction of row ids
//!
//! Range operations on a spreadsheet host (hide, show, format) are remote
//! calls, so hiding twenty adjacent rows should cost one call rather than
//! twenty. [`compact_to_blocks`] folds a sequence of row ids into runs and
//! [`apply_blocks`] issues one action per run.

use std::ops::RangeInclusive;

use crate::model::RowRecord;

/// A contiguous run of rows: `start_row_id ..= start_row_id + count - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Block {
    /// First row of the run (1-based).
    pub start_row_id: usize,
    /// Number of rows in the run, at least 1.
    pub count: usize,
}

impl Block {
    /// Creates a block.
    pub fn new(start_row_id: usize, count: usize) -> Self {
        Self {
            start_row_id,
            count,
        }
    }

    /// Returns the last row covered by the block.
    pub fn end_row_id(&self) -> usize {
        self.start_row_id + self.count - 1
    }

    /// Returns the covered rows as an inclusive range.
    pub fn row_ids(&self) -> RangeInclusive<usize> {
        self.start_row_id..=self.end_row_id()
    }

    /// Returns `true` if `row_id` directly follows the end of this block.
    fn extends_with(&self, row_id: usize) -> bool {
        self.start_row_id + self.count == row_id
    }
}

/// Compacts row ids into runs of consecutive ids.
///
/// The ids are taken in the order given and never sorted: an id joins the
/// open run only when it equals `start + count` of that run. Blocks come out
/// in the order their first id was seen.
///
/// # Example
///
/// ```
/// use sheet_wrapper_lib::blocks::{compact_to_blocks, Block};
///
/// assert_eq!(
///     compact_to_blocks([5, 6, 7, 10, 11]),
///     vec![Block::new(5, 3), Block::new(10, 2)]
/// );
/// // Descending input is not merged.
/// assert_eq!(compact_to_blocks([7, 6]), vec![Block::new(7, 1), Block::new(6, 1)]);
/// ```
pub fn compact_to_blocks<I>(row_ids: I) -> Vec<Block>
where
    I: IntoIterator<Item = usize>,
{
    let mut blocks = Vec::new();
    let mut open: Option<Block> = None;

    for row_id in row_ids {
        match open.as_mut() {
            Some(block) if block.extends_with(row_id) => block.count += 1,
            _ => {
                if let Some(closed) = open.replace(Block::new(row_id, 1)) {
                    blocks.push(closed);
                }
            }
        }
    }

    blocks.extend(open);
    blocks
}

/// Compacts the row ids of the records matching `predicate`.
pub fn matching_blocks<'a, I, P>(records: I, mut predicate: P) -> Vec<Block>
where
    I: IntoIterator<Item = &'a RowRecord>,
    P: FnMut(&RowRecord) -> bool,
{
    compact_to_blocks(
        records
            .into_iter()
            .filter(|record| predicate(record))
            .map(RowRecord::row_id),
    )
}

/// Re-expands blocks into the row ids they cover, in block order.
pub fn expand_blocks(blocks: &[Block]) -> Vec<usize> {
    blocks.iter().flat_map(Block::row_ids).collect()
}

/// Calls `action(start_row_id, count)` once per block, in order.
pub fn apply_blocks<F>(blocks: &[Block], mut action: F)
where
    F: FnMut(usize, usize),
{
    for block in blocks {
        action(block.start_row_id, block.count);
    }
}

/// Fallible form of [`apply_blocks`]; stops at the first error.
pub fn try_apply_blocks<F, E>(blocks: &[Block], mut action: F) -> Result<(), E>
where
    F: FnMut(usize, usize) -> Result<(), E>,
{
    for block in blocks {
        action(block.start_row_id, block.count)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::to_row_records;
    use crate::model::Schema;
    use crate::model::Value;

    #[test]
    fn test_empty_input() {
        assert_eq!(compact_to_blocks(Vec::new()), Vec::<Block>::new());
    }

    #[test]
    fn test_single_id() {
        assert_eq!(compact_to_blocks([5]), vec![Block::new(5, 1)]);
    }

    #[test]
    fn test_runs_merged() {
        assert_eq!(
            compact_to_blocks([5, 6, 7, 10, 11]),
            vec![Block::new(5, 3), Block::new(10, 2)]
        );
    }

    #[test]
    fn test_descending_not_merged() {
        assert_eq!(
            compact_to_blocks([7, 6, 5]),
            vec![Block::new(7, 1), Block::new(6, 1), Block::new(5, 1)]
        );
    }

    #[test]
    fn test_unsorted_keeps_first_seen_order() {
        assert_eq!(
            compact_to_blocks([10, 11, 3, 4, 5, 12]),
            vec![Block::new(10, 2), Block::new(3, 3), Block::new(12, 1)]
        );
    }

    #[test]
    fn test_repeated_id_starts_new_block() {
        assert_eq!(
            compact_to_blocks([4, 4, 5]),
            vec![Block::new(4, 1), Block::new(4, 2)]
        );
    }

    #[test]
    fn test_recompacting_expanded_blocks_is_stable() {
        let inputs: [&[usize]; 4] = [&[1, 2, 3], &[2, 4, 6], &[3, 4, 8, 9, 10, 20], &[7]];
        for ids in inputs {
            let blocks = compact_to_blocks(ids.iter().copied());
            let expanded = expand_blocks(&blocks);
            assert_eq!(expanded, ids);
            assert_eq!(compact_to_blocks(expanded), blocks);
        }
    }

    #[test]
    fn test_block_bounds() {
        let block = Block::new(4, 3);
        assert_eq!(block.end_row_id(), 6);
        assert_eq!(block.row_ids().collect::<Vec<_>>(), vec![4, 5, 6]);
    }

    #[test]
    fn test_apply_once_per_block_in_order() {
        let blocks = compact_to_blocks([2, 3, 4, 9, 11, 12]);
        let mut calls = Vec::new();
        apply_blocks(&blocks, |start, count| calls.push((start, count)));
        assert_eq!(calls, vec![(2, 3), (9, 1), (11, 2)]);
    }

    #[test]
    fn test_try_apply_stops_at_first_error() {
        let blocks = compact_to_blocks([1, 5, 9]);
        let mut seen = Vec::new();
        let result = try_apply_blocks(&blocks, |start, _| {
            seen.push(start);
            if start == 5 { Err("boom") } else { Ok(()) }
        });
        assert_eq!(result, Err("boom"));
        assert_eq!(seen, vec![1, 5]);
    }

    #[test]
    fn test_matching_blocks_use_absolute_row_ids() {
        let schema = Schema::parse("status", 1).unwrap();
        let table: Vec<Vec<Value>> = ["status", "done", "done", "open", "done"]
            .iter()
            .map(|s| vec![Value::from(*s)])
            .collect();
        let records = to_row_records(&table, &schema);

        let blocks = matching_blocks(&records, |r| r.get_string("status") == Ok(Some("done")));
        assert_eq!(blocks, vec![Block::new(2, 2), Block::new(5, 1)]);
    }
}
