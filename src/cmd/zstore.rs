use crate::{build_combine_store_args, Aggregate, Frame, KeySet, Parse, ParseError};

use tracing::{debug, instrument};

/// Computes the union of the sorted sets at the given keys and stores the result in
/// `destination`.
///
/// The score of an element is combined across the inputs with the aggregate (sum when
/// omitted), after multiplying each input by its weight.
#[derive(Debug, Clone, PartialEq)]
pub struct ZUnionStore {
    opts: StoreOpts,
}

/// Computes the intersection of the sorted sets at the given keys and stores the result in
/// `destination`.
///
/// Weights and aggregation work as for [`ZUnionStore`].
#[derive(Debug, Clone, PartialEq)]
pub struct ZInterStore {
    opts: StoreOpts,
}

#[derive(Debug, Clone, PartialEq)]
struct StoreOpts {
    destination: String,
    keys: KeySet,
    aggregate: Option<Aggregate>,
}

impl ZUnionStore {
    /// Create a new `ZUnionStore` command.
    pub fn new(
        destination: impl ToString,
        keys: impl Into<KeySet>,
        aggregate: Option<Aggregate>,
    ) -> ZUnionStore {
        ZUnionStore {
            opts: StoreOpts::new(destination, keys, aggregate),
        }
    }

    pub fn destination(&self) -> &str {
        &self.opts.destination
    }

    pub fn keys(&self) -> &KeySet {
        &self.opts.keys
    }

    pub fn aggregate(&self) -> Option<Aggregate> {
        self.opts.aggregate
    }

    /// Returns the arguments following the command name.
    pub fn args(&self) -> Vec<String> {
        self.opts.args()
    }

    /// Parse a `ZUnionStore` instance from a received frame.
    ///
    /// # Format
    ///
    /// ```text
    /// ZUNIONSTORE destination numkeys key [key ...] [WEIGHTS weight ...] [AGGREGATE SUM|MIN|MAX]
    /// ```
    #[instrument(skip(parse))]
    pub(crate) fn parse_frames(parse: &mut Parse) -> crate::Result<ZUnionStore> {
        let opts = StoreOpts::parse_frames(parse)?;
        Ok(ZUnionStore { opts })
    }

    pub fn into_frame(self) -> Frame {
        Frame::command("ZUNIONSTORE", self.args())
    }
}

impl ZInterStore {
    /// Create a new `ZInterStore` command.
    pub fn new(
        destination: impl ToString,
        keys: impl Into<KeySet>,
        aggregate: Option<Aggregate>,
    ) -> ZInterStore {
        ZInterStore {
            opts: StoreOpts::new(destination, keys, aggregate),
        }
    }

    pub fn destination(&self) -> &str {
        &self.opts.destination
    }

    pub fn keys(&self) -> &KeySet {
        &self.opts.keys
    }

    pub fn aggregate(&self) -> Option<Aggregate> {
        self.opts.aggregate
    }

    /// Returns the arguments following the command name.
    pub fn args(&self) -> Vec<String> {
        self.opts.args()
    }

    /// Parse a `ZInterStore` instance from a received frame.
    ///
    /// # Format
    ///
    /// ```text
    /// ZINTERSTORE destination numkeys key [key ...] [WEIGHTS weight ...] [AGGREGATE SUM|MIN|MAX]
    /// ```
    #[instrument(skip(parse))]
    pub(crate) fn parse_frames(parse: &mut Parse) -> crate::Result<ZInterStore> {
        let opts = StoreOpts::parse_frames(parse)?;
        Ok(ZInterStore { opts })
    }

    pub fn into_frame(self) -> Frame {
        Frame::command("ZINTERSTORE", self.args())
    }
}

impl StoreOpts {
    fn new(
        destination: impl ToString,
        keys: impl Into<KeySet>,
        aggregate: Option<Aggregate>,
    ) -> StoreOpts {
        StoreOpts {
            destination: destination.to_string(),
            keys: keys.into(),
            aggregate,
        }
    }

    fn args(&self) -> Vec<String> {
        build_combine_store_args(&self.destination, &self.keys, self.aggregate)
    }

    fn parse_frames(parse: &mut Parse) -> crate::Result<StoreOpts> {
        const ERR_SYNTAX: &str = "syntax error";

        let destination = parse.next_string()?;

        let numkeys = parse.next_int()?;
        if numkeys < 0 {
            return Err("numkeys can't be negative".into());
        }
        let numkeys = numkeys as usize;

        // Exactly `numkeys` keys follow. Running out of tokens means `numkeys` is wrong.
        // `numkeys` comes from the client, so it is not used as a capacity hint.
        let mut keys = vec![];
        for _ in 0..numkeys {
            match parse.next_string() {
                Ok(key) => keys.push(key),
                Err(ParseError::EndOfStream) => return Err(ERR_SYNTAX.into()),
                Err(err) => return Err(err.into()),
            }
        }

        let mut weights: Option<Vec<f64>> = None;
        let mut aggregate = None;

        loop {
            match parse.next_string() {
                Ok(s) if s.to_uppercase() == "WEIGHTS" => {
                    let mut values = Vec::with_capacity(keys.len());
                    for _ in 0..numkeys {
                        match parse.next_float() {
                            Ok(weight) => values.push(weight),
                            Err(ParseError::EndOfStream) => return Err(ERR_SYNTAX.into()),
                            Err(_) => return Err("weight value is not a float".into()),
                        }
                    }
                    weights = Some(values);
                }
                Ok(s) if s.to_uppercase() == "AGGREGATE" => match parse.next_string() {
                    Ok(name) => aggregate = Some(name.parse::<Aggregate>()?),
                    Err(ParseError::EndOfStream) => return Err(ERR_SYNTAX.into()),
                    Err(err) => return Err(err.into()),
                },
                Ok(s) => return Err(format!("{}: unsupported option {}", ERR_SYNTAX, s).into()),
                // No more options.
                Err(ParseError::EndOfStream) => break,
                Err(err) => return Err(err.into()),
            }
        }

        let keys = match weights {
            Some(weights) => KeySet::Weighted(keys.into_iter().zip(weights).collect()),
            None => KeySet::Keys(keys),
        };

        let opts = StoreOpts {
            destination,
            keys,
            aggregate,
        };

        debug!(?opts);

        Ok(opts)
    }
}
