use crate::parse::parse_int;
use crate::{
    build_range_args, BoundContext, Frame, LexBound, Limit, Parse, ParseError, RangeQuery,
    ScoreBound,
};

use tracing::{debug, instrument};

/// Returns the elements of the sorted set stored at key within a range.
///
/// The range is by rank, by score (`BYSCORE`) or by lexicographic order (`BYLEX`). `REV`
/// reverses the ordering and `WITHSCORES` returns the score of every element.
#[derive(Debug, Clone, PartialEq)]
pub struct ZRange {
    key: String,
    query: RangeQuery,
    reverse: bool,
    with_scores: bool,
}

/// Range part shared by `ZRANGE` and `ZRANGESTORE`.
#[derive(Debug)]
pub(crate) struct RangeOpts {
    pub(crate) query: RangeQuery,
    pub(crate) reverse: bool,
    pub(crate) with_scores: bool,
}

const ERR_SYNTAX: &str = "syntax error";

const ERR_LIMIT: &str =
    "syntax error, LIMIT is only supported in combination with either BYSCORE or BYLEX";

impl ZRange {
    /// Create a new `ZRange` command.
    pub fn new(key: impl ToString, query: RangeQuery, reverse: bool, with_scores: bool) -> ZRange {
        ZRange {
            key: key.to_string(),
            query,
            reverse,
            with_scores,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn query(&self) -> &RangeQuery {
        &self.query
    }

    pub fn is_reverse(&self) -> bool {
        self.reverse
    }

    pub fn with_scores(&self) -> bool {
        self.with_scores
    }

    /// Returns the arguments following the command name.
    pub fn args(&self) -> Vec<String> {
        build_range_args(&self.key, &self.query, self.reverse, self.with_scores)
    }

    /// Parse a `ZRange` instance from a received frame.
    ///
    /// # Format
    ///
    /// ```text
    /// ZRANGE key start stop [BYSCORE | BYLEX] [REV] [LIMIT offset count] [WITHSCORES]
    /// ```
    #[instrument(skip(parse))]
    pub(crate) fn parse_frames(parse: &mut Parse) -> crate::Result<ZRange> {
        let key = parse.next_string()?;
        let opts = parse_range(parse)?;

        debug!(?opts);

        Ok(ZRange {
            key,
            query: opts.query,
            reverse: opts.reverse,
            with_scores: opts.with_scores,
        })
    }

    pub fn into_frame(self) -> Frame {
        Frame::command("ZRANGE", self.args())
    }
}

/// Reads `start stop` and the range options that follow them.
///
/// The bounds are read as raw tokens first: how they are interpreted depends on the
/// `BYSCORE` / `BYLEX` option found later in the command.
pub(crate) fn parse_range(parse: &mut Parse) -> crate::Result<RangeOpts> {
    let start = parse.next_string()?;
    let stop = parse.next_string()?;

    let mut by: Option<BoundContext> = None;
    let mut reverse = false;
    let mut with_scores = false;
    let mut limit = None;

    loop {
        match parse.next_string() {
            Ok(s) => match &s.to_uppercase()[..] {
                "BYSCORE" | "BYLEX" if by.is_some() => return Err(ERR_SYNTAX.into()),
                "BYSCORE" => by = Some(BoundContext::Score),
                "BYLEX" => by = Some(BoundContext::Lex),
                "REV" => reverse = true,
                "WITHSCORES" => with_scores = true,
                "LIMIT" => {
                    let offset = next_limit_value(parse)?;
                    let count = next_limit_value(parse)?;
                    limit = Some(Limit::new(offset, count));
                }
                _ => return Err(format!("{}: unsupported option {}", ERR_SYNTAX, s).into()),
            },
            // No more options.
            Err(ParseError::EndOfStream) => break,
            Err(err) => return Err(err.into()),
        }
    }

    let query = match by {
        None => {
            if limit.is_some() {
                return Err(ERR_LIMIT.into());
            }
            RangeQuery::by_index(parse_index(&start)?, parse_index(&stop)?)
        }
        Some(BoundContext::Score) => RangeQuery::by_score(
            ScoreBound::from_arg(&start)?,
            ScoreBound::from_arg(&stop)?,
            limit,
        ),
        Some(BoundContext::Lex) => RangeQuery::by_lex(
            LexBound::from_arg(&start)?,
            LexBound::from_arg(&stop)?,
            limit,
        ),
    };

    Ok(RangeOpts {
        query,
        reverse,
        with_scores,
    })
}

fn next_limit_value(parse: &mut Parse) -> crate::Result<i64> {
    match parse.next_int() {
        Ok(value) => Ok(value),
        Err(ParseError::EndOfStream) => Err(ERR_SYNTAX.into()),
        Err(err) => Err(err.into()),
    }
}

fn parse_index(arg: &str) -> crate::Result<i64> {
    parse_int(arg.as_bytes()).ok_or_else(|| "value is not an integer or out of range".into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{InfBound, LexBoundary, ScoreBoundary};
    use bytes::Bytes;

    fn parse_of(tokens: &[&str]) -> Parse {
        let mut frame = Frame::array();
        for token in tokens {
            frame.push_bulk(Bytes::from(token.to_string()));
        }
        Parse::new(frame).unwrap()
    }

    #[test]
    fn parse_index_range() {
        let cmd = ZRange::parse_frames(&mut parse_of(&["k", "0", "-1", "REV"])).unwrap();
        assert_eq!(cmd, ZRange::new("k", RangeQuery::by_index(0, -1), true, false));
    }

    #[test]
    fn parse_score_range_with_options_in_any_order() {
        let cmd = ZRange::parse_frames(&mut parse_of(&[
            "k", "(1", "+inf", "withscores", "LIMIT", "2", "-1", "byscore",
        ]))
        .unwrap();

        let query = RangeQuery::by_score(
            ScoreBoundary::exclusive(1.0),
            InfBound::PosInf,
            Some(Limit::new(2, -1)),
        );
        assert_eq!(cmd, ZRange::new("k", query, false, true));
    }

    #[test]
    fn parse_lex_range() {
        let cmd = ZRange::parse_frames(&mut parse_of(&["k", "-", "[m", "BYLEX"])).unwrap();
        let query = RangeQuery::by_lex(InfBound::NegInf, LexBoundary::inclusive("m"), None);
        assert_eq!(cmd.query(), &query);
    }

    #[test]
    fn limit_requires_byscore_or_bylex() {
        let err = ZRange::parse_frames(&mut parse_of(&["k", "0", "-1", "LIMIT", "0", "1"]))
            .unwrap_err();
        assert_eq!(err.to_string(), ERR_LIMIT);
    }

    #[test]
    fn rejects_bad_input() {
        // both range kinds
        assert!(ZRange::parse_frames(&mut parse_of(&["k", "0", "1", "BYSCORE", "BYLEX"])).is_err());
        // lex bound without prefix
        assert!(ZRange::parse_frames(&mut parse_of(&["k", "a", "b", "BYLEX"])).is_err());
        // score range read as index range
        assert!(ZRange::parse_frames(&mut parse_of(&["k", "(1", "2"])).is_err());
        // truncated limit
        assert!(ZRange::parse_frames(&mut parse_of(&["k", "0", "1", "BYSCORE", "LIMIT", "0"])).is_err());
        // unknown option
        assert!(ZRange::parse_frames(&mut parse_of(&["k", "0", "1", "NX"])).is_err());
        // missing stop
        assert!(ZRange::parse_frames(&mut parse_of(&["k", "0"])).is_err());
    }

    #[test]
    fn into_frame_prefixes_command_name() {
        let cmd = ZRange::new("k", RangeQuery::by_index(0, 3), false, true);
        assert_eq!(
            cmd.into_frame().to_args().unwrap(),
            ["ZRANGE", "k", "0", "3", "WITHSCORES"]
        );
    }
}
