//! Argument encoding for the sorted set range, range-store and combine-store commands.
//!
//! Callers describe a query with typed values ([`RangeQuery`], [`KeySet`], [`Aggregate`])
//! and get back the exact token sequence a Redis compatible server expects.

mod aggregate;
mod args;
mod bound;
mod frame;
mod parse;
mod range;

pub mod cmd;

#[doc(inline)]
pub use aggregate::{Aggregate, KeyEntry, KeySet};

#[doc(inline)]
pub use args::{build_combine_store_args, build_range_args, build_range_store_args};

#[doc(inline)]
pub use bound::{BoundContext, InfBound, LexBound, LexBoundary, ScoreBound, ScoreBoundary};

#[doc(inline)]
pub use cmd::Command;

#[doc(inline)]
pub use frame::Frame;

pub(crate) use parse::{Parse, ParseError};

#[doc(inline)]
pub use range::{Limit, RangeQuery};

/// Error returned by most functions.
pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// A specialized `Result` type for sorted set command encoding.
pub type Result<T> = std::result::Result<T, Error>;
