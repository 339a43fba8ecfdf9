//! Range descriptors for the sorted set range commands.

use crate::{LexBound, ScoreBound};

/// The `LIMIT offset count` clause of a score or lex range.
///
/// Works like `SELECT ... LIMIT offset, count` in SQL. A negative `count` returns all the
/// elements from `offset` and is written as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Limit {
    offset: i64,
    count: i64,
}

/// A range over a sorted set.
///
/// Only the score and lex variants carry a [`Limit`]; the server rejects `LIMIT` on an index
/// range, so the field does not exist there.
#[derive(Debug, Clone, PartialEq)]
pub enum RangeQuery {
    /// Zero-based, inclusive ranks. Negative ranks count from the end of the set.
    ByIndex { start: i64, stop: i64 },
    ByScore {
        start: ScoreBound,
        stop: ScoreBound,
        limit: Option<Limit>,
    },
    ByLex {
        start: LexBound,
        stop: LexBound,
        limit: Option<Limit>,
    },
}

impl Limit {
    pub fn new(offset: i64, count: i64) -> Limit {
        Limit { offset, count }
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    pub fn count(&self) -> i64 {
        self.count
    }
}

impl RangeQuery {
    pub fn by_index(start: i64, stop: i64) -> RangeQuery {
        RangeQuery::ByIndex { start, stop }
    }

    pub fn by_score(
        start: impl Into<ScoreBound>,
        stop: impl Into<ScoreBound>,
        limit: Option<Limit>,
    ) -> RangeQuery {
        RangeQuery::ByScore {
            start: start.into(),
            stop: stop.into(),
            limit,
        }
    }

    pub fn by_lex(
        start: impl Into<LexBound>,
        stop: impl Into<LexBound>,
        limit: Option<Limit>,
    ) -> RangeQuery {
        RangeQuery::ByLex {
            start: start.into(),
            stop: stop.into(),
            limit,
        }
    }

    /// Returns the limit clause, if any. Always `None` for an index range.
    pub fn limit(&self) -> Option<Limit> {
        match self {
            RangeQuery::ByIndex { .. } => None,
            RangeQuery::ByScore { limit, .. } | RangeQuery::ByLex { limit, .. } => *limit,
        }
    }

    /// Appends `start stop [BYSCORE|BYLEX] [REV] [LIMIT offset count]` to `args`.
    ///
    /// Shared by the read and store forms of the range command so both stay in sync.
    pub(crate) fn push_args(&self, args: &mut Vec<String>, reverse: bool) {
        match self {
            RangeQuery::ByIndex { start, stop } => {
                args.push(start.to_string());
                args.push(stop.to_string());
            }
            RangeQuery::ByScore { start, stop, .. } => {
                args.push(start.to_arg());
                args.push(stop.to_arg());
                args.push("BYSCORE".to_string());
            }
            RangeQuery::ByLex { start, stop, .. } => {
                args.push(start.to_arg());
                args.push(stop.to_arg());
                args.push("BYLEX".to_string());
            }
        }

        if reverse {
            args.push("REV".to_string());
        }

        if let Some(limit) = self.limit() {
            args.push("LIMIT".to_string());
            args.push(limit.offset.to_string());
            args.push(limit.count.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{InfBound, LexBoundary, ScoreBoundary};

    fn args_of(query: &RangeQuery, reverse: bool) -> Vec<String> {
        let mut args = vec![];
        query.push_args(&mut args, reverse);
        args
    }

    #[test]
    fn index_range_has_no_marker() {
        let query = RangeQuery::by_index(0, -1);
        assert_eq!(args_of(&query, false), ["0", "-1"]);
        assert_eq!(args_of(&query, true), ["0", "-1", "REV"]);
        assert_eq!(query.limit(), None);
    }

    #[test]
    fn score_range_marker_then_rev_then_limit() {
        let query = RangeQuery::by_score(
            ScoreBoundary::exclusive(1.5),
            InfBound::PosInf,
            Some(Limit::new(0, 10)),
        );
        assert_eq!(
            args_of(&query, true),
            ["(1.5", "+inf", "BYSCORE", "REV", "LIMIT", "0", "10"]
        );
    }

    #[test]
    fn negative_limit_count_is_kept() {
        let query = RangeQuery::by_lex(
            LexBoundary::inclusive("a"),
            InfBound::PosInf,
            Some(Limit::new(3, -1)),
        );
        assert_eq!(query.limit(), Some(Limit::new(3, -1)));
        assert_eq!(
            args_of(&query, false),
            ["[a", "+", "BYLEX", "LIMIT", "3", "-1"]
        );
    }
}
