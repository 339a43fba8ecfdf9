use crate::cmd::zrange::parse_range;
use crate::{build_range_store_args, Frame, Parse, RangeQuery};

use tracing::{debug, instrument};

/// Stores the elements of a range of the sorted set at `source` into `destination`.
///
/// Takes the same range options as `ZRANGE`, except `WITHSCORES`.
#[derive(Debug, Clone, PartialEq)]
pub struct ZRangeStore {
    destination: String,
    source: String,
    query: RangeQuery,
    reverse: bool,
}

impl ZRangeStore {
    /// Create a new `ZRangeStore` command.
    pub fn new(
        destination: impl ToString,
        source: impl ToString,
        query: RangeQuery,
        reverse: bool,
    ) -> ZRangeStore {
        ZRangeStore {
            destination: destination.to_string(),
            source: source.to_string(),
            query,
            reverse,
        }
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn query(&self) -> &RangeQuery {
        &self.query
    }

    pub fn is_reverse(&self) -> bool {
        self.reverse
    }

    /// Returns the arguments following the command name.
    pub fn args(&self) -> Vec<String> {
        build_range_store_args(&self.destination, &self.source, &self.query, self.reverse)
    }

    /// Parse a `ZRangeStore` instance from a received frame.
    ///
    /// # Format
    ///
    /// ```text
    /// ZRANGESTORE dst src start stop [BYSCORE | BYLEX] [REV] [LIMIT offset count]
    /// ```
    #[instrument(skip(parse))]
    pub(crate) fn parse_frames(parse: &mut Parse) -> crate::Result<ZRangeStore> {
        let destination = parse.next_string()?;
        let source = parse.next_string()?;
        let opts = parse_range(parse)?;

        debug!(?opts);

        // The stored range has no scores to return.
        if opts.with_scores {
            return Err("syntax error, WITHSCORES is not supported by ZRANGESTORE".into());
        }

        Ok(ZRangeStore {
            destination,
            source,
            query: opts.query,
            reverse: opts.reverse,
        })
    }

    pub fn into_frame(self) -> Frame {
        Frame::command("ZRANGESTORE", self.args())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{InfBound, LexBoundary, Limit};
    use bytes::Bytes;

    fn parse_of(tokens: &[&str]) -> Parse {
        let mut frame = Frame::array();
        for token in tokens {
            frame.push_bulk(Bytes::from(token.to_string()));
        }
        Parse::new(frame).unwrap()
    }

    #[test]
    fn parse_lex_store() {
        let cmd = ZRangeStore::parse_frames(&mut parse_of(&[
            "dst", "src", "[a", "+", "BYLEX", "REV", "LIMIT", "0", "3",
        ]))
        .unwrap();

        let query = RangeQuery::by_lex(
            LexBoundary::inclusive("a"),
            InfBound::PosInf,
            Some(Limit::new(0, 3)),
        );
        assert_eq!(cmd, ZRangeStore::new("dst", "src", query, true));
        assert_eq!(cmd.destination(), "dst");
        assert_eq!(cmd.source(), "src");
    }

    #[test]
    fn rejects_withscores() {
        let res = ZRangeStore::parse_frames(&mut parse_of(&["dst", "src", "0", "-1", "WITHSCORES"]));
        assert!(res.is_err());
    }

    #[test]
    fn into_frame_prefixes_command_name() {
        let cmd = ZRangeStore::new("dst", "src", RangeQuery::by_index(0, -1), false);
        assert_eq!(
            cmd.into_frame().to_args().unwrap(),
            ["ZRANGESTORE", "dst", "src", "0", "-1"]
        );
    }
}
