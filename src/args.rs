//! Argument builders for the sorted set range and combine commands.
//!
//! Each builder is a pure function of its inputs. The returned tokens do not include the
//! command name; they are what follows it on the wire.

use crate::{Aggregate, KeySet, RangeQuery};

/// Builds the arguments of `ZRANGE`.
///
/// ```text
/// key start stop [BYSCORE | BYLEX] [REV] [LIMIT offset count] [WITHSCORES]
/// ```
pub fn build_range_args(
    key: &str,
    query: &RangeQuery,
    reverse: bool,
    with_scores: bool,
) -> Vec<String> {
    let mut args = vec![key.to_string()];

    query.push_args(&mut args, reverse);

    if with_scores {
        args.push("WITHSCORES".to_string());
    }

    args
}

/// Builds the arguments of `ZRANGESTORE`.
///
/// ```text
/// dst src start stop [BYSCORE | BYLEX] [REV] [LIMIT offset count]
/// ```
pub fn build_range_store_args(
    destination: &str,
    source: &str,
    query: &RangeQuery,
    reverse: bool,
) -> Vec<String> {
    let mut args = vec![destination.to_string(), source.to_string()];

    query.push_args(&mut args, reverse);

    args
}

/// Builds the arguments of `ZUNIONSTORE` and `ZINTERSTORE`.
///
/// ```text
/// destination numkeys key [key ...] [WEIGHTS weight [weight ...]] [AGGREGATE SUM|MIN|MAX]
/// ```
///
/// An empty key set produces `destination 0` and nothing else.
pub fn build_combine_store_args(
    destination: &str,
    keys: &KeySet,
    aggregate: Option<Aggregate>,
) -> Vec<String> {
    let (keys, weights) = keys.separate();

    let mut args = Vec::with_capacity(2 + keys.len() + weights.len() + 3);
    args.push(destination.to_string());
    args.push(keys.len().to_string());
    args.extend(keys);

    if !weights.is_empty() {
        args.push("WEIGHTS".to_string());
        args.extend(weights);
    }

    if let Some(aggregate) = aggregate {
        args.push("AGGREGATE".to_string());
        args.push(aggregate.as_str().to_string());
    }

    args
}
