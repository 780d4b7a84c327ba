/// Hash join evaluator
///
/// Algorithm:
/// 1. Seed phase: the first absorbed input (left table) is grouped by
///    composite key
/// 2. Probe phase: each row of the next input (right table) is matched
///    against the current grouping and merged into a new grouping
/// 3. Retention: the join kind decides which unmatched keys survive
///
/// Time complexity: O(n + m + output)
/// Space complexity: O(output)
///
/// All four join kinds share the projection and merge mechanics; only the
/// retention policy differs.
use crate::error::Result;
use crate::types::Table;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use super::grouping::Grouping;
use super::key::{is_blank_key, KeyCodec};
use super::projector::RowProjector;

/// Join variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JoinKind {
    /// Only keys present on both sides
    Inner,
    /// Every left key; right-only keys dropped
    LeftOuter,
    /// Every right key; left-only keys dropped
    RightOuter,
    /// Every key from either side
    FullOuter,
}

impl JoinKind {
    pub const ALL: [JoinKind; 4] = [
        JoinKind::Inner,
        JoinKind::LeftOuter,
        JoinKind::RightOuter,
        JoinKind::FullOuter,
    ];

    /// Keys of the incoming input with no match are seeded alone
    fn keeps_unmatched_incoming(self) -> bool {
        matches!(self, JoinKind::RightOuter | JoinKind::FullOuter)
    }

    /// Keys of the current grouping with no match are copied through
    fn keeps_unmatched_current(self) -> bool {
        matches!(self, JoinKind::LeftOuter | JoinKind::FullOuter)
    }
}

impl fmt::Display for JoinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JoinKind::Inner => "INNER",
            JoinKind::LeftOuter => "LEFT OUTER",
            JoinKind::RightOuter => "RIGHT OUTER",
            JoinKind::FullOuter => "FULL OUTER",
        };
        f.write_str(name)
    }
}

/// One side of a join step: a table restricted to key and output columns
#[derive(Debug, Clone, Copy)]
pub struct JoinInput<'a> {
    pub table: &'a Table,
    pub key_columns: &'a [String],
    pub selected_columns: &'a [String],
}

impl<'a> JoinInput<'a> {
    pub fn new(table: &'a Table, key_columns: &'a [String], selected_columns: &'a [String]) -> Self {
        Self {
            table,
            key_columns,
            selected_columns,
        }
    }
}

/// Counters for one absorbed input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AbsorbStats {
    pub rows: usize,
    pub blank_keys: usize,
    pub matched_rows: usize,
}

/// Hash join evaluator
pub struct HashJoinEvaluator {
    kind: JoinKind,
    /// Grouping built so far; `None` until the first input is absorbed
    current: Option<Grouping>,
}

impl HashJoinEvaluator {
    pub fn new(kind: JoinKind) -> Self {
        Self {
            kind,
            current: None,
        }
    }

    pub fn kind(&self) -> JoinKind {
        self.kind
    }

    /// Fold one input into the current grouping
    pub fn absorb(&mut self, input: JoinInput<'_>) -> Result<AbsorbStats> {
        let table = input.table;
        let codec = KeyCodec::new(&table.headers, input.key_columns);
        let projector = RowProjector::new(&table.headers, Some(input.selected_columns), None);

        let mut stats = AbsorbStats::default();
        let mut temp = Grouping::new();

        for row in &table.data {
            stats.rows += 1;

            let key = codec.key(row);
            if is_blank_key(&key) {
                stats.blank_keys += 1;
                continue;
            }

            match &self.current {
                None => {
                    let record = projector.project(row)?;
                    temp.push(&key, record);
                }
                Some(current) => match current.get(&key) {
                    Some(existing) => {
                        let record = projector.project(row)?;
                        let group = temp.group_mut(&key);
                        group.extend(existing.iter().map(|prev| prev.merge(&record)));
                        stats.matched_rows += 1;
                    }
                    None if self.kind.keeps_unmatched_incoming() => {
                        let record = projector.project(row)?;
                        temp.push(&key, record);
                    }
                    None => {}
                },
            }
        }

        self.current = Some(match self.current.take() {
            None => temp,
            Some(mut current) if self.kind.keeps_unmatched_current() => {
                for (key, records) in temp.into_entries() {
                    current.set(key, records);
                }
                current
            }
            Some(_) => temp,
        });

        debug!(
            kind = %self.kind,
            table = %table.name,
            rows = stats.rows,
            blank_keys = stats.blank_keys,
            matched_rows = stats.matched_rows,
            "Absorbed join input"
        );

        Ok(stats)
    }

    /// Current grouping, if any input has been absorbed
    pub fn grouping(&self) -> Option<&Grouping> {
        self.current.as_ref()
    }

    /// Consume the evaluator, returning the final grouping (empty if nothing
    /// was absorbed)
    pub fn finish(self) -> Grouping {
        self.current.unwrap_or_default()
    }

    /// Run a complete two-table join: seed with `left`, probe with `right`
    pub fn join(kind: JoinKind, left: JoinInput<'_>, right: JoinInput<'_>) -> Result<Grouping> {
        let mut evaluator = Self::new(kind);
        evaluator.absorb(left)?;
        evaluator.absorb(right)?;
        Ok(evaluator.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Record, Row, Value};

    fn record_value(record: &Record, column: &str) -> Value {
        record.get(column).cloned().unwrap_or(Value::Null)
    }

    fn strings(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn users() -> Table {
        Table::from_parts(
            "users",
            &["id", "name"],
            vec![
                vec![1.into(), "Alice".into()],
                vec![2.into(), "Bob".into()],
                vec![3.into(), "Carol".into()],
            ],
        )
        .unwrap()
    }

    fn orders(rows: Vec<Row>) -> Table {
        Table::from_parts("orders", &["order_id", "user_id", "amount"], rows).unwrap()
    }

    fn make_order_row(order_id: i64, user_id: i64, amount: i64) -> Row {
        vec![order_id.into(), user_id.into(), amount.into()]
    }

    fn run(kind: JoinKind, left: &Table, right: &Table) -> Grouping {
        let lk = strings(&["id"]);
        let ls = strings(&["name"]);
        let rk = strings(&["user_id"]);
        let rs = strings(&["order_id", "amount"]);
        HashJoinEvaluator::join(
            kind,
            JoinInput::new(left, &lk, &ls),
            JoinInput::new(right, &rk, &rs),
        )
        .unwrap()
    }

    fn names(g: &Grouping) -> Vec<Value> {
        g.records().map(|r| record_value(r, "name")).collect()
    }

    #[test]
    fn test_inner_basic() {
        let o = orders(vec![make_order_row(101, 1, 100), make_order_row(102, 2, 200)]);
        let g = run(JoinKind::Inner, &users(), &o);

        assert_eq!(g.total_records(), 2);
        let first = g.records().next().unwrap();
        assert_eq!(first.get("name"), Some(&Value::text("Alice")));
        assert_eq!(first.get("amount"), Some(&Value::Integer(100)));
    }

    #[test]
    fn test_inner_no_match() {
        let o = orders(vec![make_order_row(101, 999, 100)]);
        let g = run(JoinKind::Inner, &users(), &o);

        assert_eq!(g.total_records(), 0);
    }

    #[test]
    fn test_one_to_many() {
        let o = orders(vec![make_order_row(101, 1, 100), make_order_row(102, 1, 200)]);
        let g = run(JoinKind::Inner, &users(), &o);

        assert_eq!(g.total_records(), 2);
        assert_eq!(names(&g), vec![Value::text("Alice"), Value::text("Alice")]);
    }

    #[test]
    fn test_many_to_many_is_cross_product() {
        let left = Table::from_parts(
            "l",
            &["id", "name"],
            vec![vec![1.into(), "A1".into()], vec![1.into(), "A2".into()]],
        )
        .unwrap();
        let o = orders(vec![
            make_order_row(101, 1, 100),
            make_order_row(102, 1, 200),
            make_order_row(103, 1, 300),
        ]);

        for kind in JoinKind::ALL {
            let g = run(kind, &left, &o);
            assert_eq!(g.total_records(), 6, "{kind}");
        }
    }

    #[test]
    fn test_left_outer_keeps_unmatched_left_in_place() {
        let o = orders(vec![make_order_row(101, 2, 100), make_order_row(102, 999, 200)]);
        let g = run(JoinKind::LeftOuter, &users(), &o);

        assert_eq!(
            names(&g),
            vec![Value::text("Alice"), Value::text("Bob"), Value::text("Carol")]
        );
        let alice = g.get("1").unwrap();
        assert_eq!(alice[0].get("amount"), None);
        assert_eq!(g.get("2").unwrap()[0].get("amount"), Some(&Value::Integer(100)));
        assert!(!g.contains_key("999"));
    }

    #[test]
    fn test_right_outer_follows_right_order() {
        let o = orders(vec![make_order_row(101, 3, 100), make_order_row(102, 999, 200)]);
        let g = run(JoinKind::RightOuter, &users(), &o);

        assert_eq!(g.keys().collect::<Vec<_>>(), vec!["3", "999"]);
        assert_eq!(names(&g), vec![Value::text("Carol"), Value::Null]);
    }

    #[test]
    fn test_full_outer_appends_right_only_keys() {
        let o = orders(vec![make_order_row(101, 2, 100), make_order_row(102, 999, 200)]);
        let g = run(JoinKind::FullOuter, &users(), &o);

        assert_eq!(g.keys().collect::<Vec<_>>(), vec!["1", "2", "3", "999"]);
        assert_eq!(g.total_records(), 4);
    }

    #[test]
    fn test_blank_keys_never_participate() {
        let left = Table::from_parts(
            "l",
            &["id", "name"],
            vec![vec![Value::Null, "Ghost".into()], vec!["  ".into(), "Blank".into()]],
        )
        .unwrap();
        let right = Table::from_parts(
            "orders",
            &["order_id", "user_id", "amount"],
            vec![vec![1.into(), Value::Null, 5.into()], vec![2.into(), "".into(), 6.into()]],
        )
        .unwrap();

        for kind in JoinKind::ALL {
            let g = run(kind, &left, &right);
            assert!(g.is_empty(), "{kind}");
        }
    }

    #[test]
    fn test_absorb_stats() {
        let mut evaluator = HashJoinEvaluator::new(JoinKind::Inner);
        let o = orders(vec![make_order_row(101, 1, 100), vec![102.into(), Value::Null, 1.into()]]);
        let u = users();
        let (lk, ls) = (strings(&["id"]), strings(&["name"]));
        let (rk, rs) = (strings(&["user_id"]), strings(&["amount"]));

        let seeded = evaluator.absorb(JoinInput::new(&u, &lk, &ls)).unwrap();
        assert_eq!(seeded.rows, 3);
        assert_eq!(seeded.matched_rows, 0);

        let probed = evaluator.absorb(JoinInput::new(&o, &rk, &rs)).unwrap();
        assert_eq!(probed.rows, 2);
        assert_eq!(probed.blank_keys, 1);
        assert_eq!(probed.matched_rows, 1);
        assert_eq!(evaluator.grouping().unwrap().total_records(), 1);
    }

    #[test]
    fn test_right_columns_win_on_collision() {
        let left = Table::from_parts("l", &["id", "v"], vec![vec![1.into(), "left".into()]]).unwrap();
        let right = Table::from_parts("r", &["id", "v"], vec![vec![1.into(), "right".into()]]).unwrap();
        let k = strings(&["id"]);
        let s = strings(&["v"]);

        let g = HashJoinEvaluator::join(
            JoinKind::Inner,
            JoinInput::new(&left, &k, &s),
            JoinInput::new(&right, &k, &s),
        )
        .unwrap();

        assert_eq!(record_value(g.records().next().unwrap(), "v"), Value::text("right"));
    }
}
