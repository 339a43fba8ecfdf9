use crate::Frame;

use std::convert::TryFrom;
use std::{fmt, str, vec};

/// Utility for parsing a command.
///
/// Commands are represented as array frames. Each entry in the frame is a "token".
#[derive(Debug)]
pub(crate) struct Parse {
    parts: vec::IntoIter<Frame>,
}

/// Error encountered while parsing a frame.
///
/// `EndOfStream` marks the end of the optional clauses of a command. All other errors reject
/// the command.
#[derive(Debug)]
pub(crate) enum ParseError {
    /// Failed to extract a value due to the frame being fully consumed.
    EndOfStream,

    /// All other errors.
    Other(crate::Error),
}

impl Parse {
    pub(crate) fn new(frame: Frame) -> Result<Parse, ParseError> {
        let array = match frame {
            Frame::Array(array) => array,
            frame => return Err(format!("protocol error: expected array, got {:?}", frame).into()),
        };

        Ok(Parse {
            parts: array.into_iter(),
        })
    }

    /// Returns the next frame.
    pub(crate) fn next(&mut self) -> Result<Frame, ParseError> {
        self.parts.next().ok_or(ParseError::EndOfStream)
    }

    /// Returns the next frame as a string.
    ///
    /// `Simple` and `Bulk` frames are read as is; `Integer` frames are written out in decimal.
    pub(crate) fn next_string(&mut self) -> Result<String, ParseError> {
        match self.next()? {
            Frame::Simple(s) => Ok(s),
            Frame::Bulk(data) => str::from_utf8(&data[..])
                .map(|s| s.to_string())
                .map_err(|_| "protocol error: invalid string".into()),
            Frame::Integer(num) => Ok(num.to_string()),
            other => Err(format!(
                "protocol error: expected simple frame or bulk frame, got {:?}",
                other
            )
            .into()),
        }
    }

    /// Returns the next frame as a signed integer.
    pub(crate) fn next_int(&mut self) -> Result<i64, ParseError> {
        const MSG: &str = "value is not an integer or out of range";

        match self.next()? {
            Frame::Integer(v) => Ok(v),
            Frame::Simple(s) => parse_int(s.as_bytes()).ok_or_else(|| MSG.into()),
            Frame::Bulk(data) => parse_int(&data).ok_or_else(|| MSG.into()),
            other => Err(format!("protocol error: expected integer frame but got {:?}", other).into()),
        }
    }

    /// Returns the next frame as a float.
    pub(crate) fn next_float(&mut self) -> Result<f64, ParseError> {
        const MSG: &str = "value is not a valid float";

        let s = self.next_string()?;
        match s.parse::<f64>() {
            Ok(v) if !v.is_nan() => Ok(v),
            _ => Err(MSG.into()),
        }
    }

    /// Ensure there are no more entries in the array.
    pub(crate) fn finish(&mut self) -> Result<(), ParseError> {
        if self.parts.next().is_none() {
            Ok(())
        } else {
            Err("protocol error: expected end of frame, but there was more".into())
        }
    }
}

/// Parses a whole token as a decimal integer with an optional leading sign.
pub(crate) fn parse_int(src: &[u8]) -> Option<i64> {
    use atoi::atoi;

    let (negative, digits) = match src.first() {
        Some(b'-') => (true, &src[1..]),
        Some(b'+') => (false, &src[1..]),
        _ => (false, src),
    };

    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
        return None;
    }

    // Read the magnitude unsigned so `i64::MIN` fits before the sign is applied.
    let magnitude = i128::from(atoi::<u64>(digits)?);
    let value = if negative { -magnitude } else { magnitude };
    i64::try_from(value).ok()
}

impl From<String> for ParseError {
    fn from(src: String) -> ParseError {
        ParseError::Other(src.into())
    }
}

impl From<&str> for ParseError {
    fn from(src: &str) -> ParseError {
        ParseError::Other(src.to_string().into())
    }
}

impl std::error::Error for ParseError {}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::EndOfStream => f.write_str("protocol error: unexpected end of stream"),
            ParseError::Other(err) => write!(f, "{}", err),
        }
    }
}
