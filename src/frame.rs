//! Provides a type representing a Redis protocol frame.
//!
//! Only the request side of the protocol is covered: a command is an array of bulk strings.
//! The Redis protocol can be found at <https://redis.io/topics/protocol>

use bytes::{BufMut, Bytes, BytesMut};
use std::fmt;

/// A frame in the Redis protocol.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    Simple(String),
    Integer(i64),
    Bulk(Bytes),
    Array(Vec<Frame>),
}

impl Frame {
    /// Returns an empty array frame.
    pub fn array() -> Frame {
        Frame::Array(vec![])
    }

    /// Builds a command frame: the command name followed by its arguments, all as bulk strings.
    pub fn command<I, S>(name: &str, args: I) -> Frame
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut frame = Frame::array();
        frame.push_bulk(Bytes::from(name.to_string()));
        for arg in args {
            frame.push_bulk(Bytes::from(arg.into()));
        }
        frame
    }

    /// Pushes a "bulk" frame into the array.
    ///
    /// # Panics
    ///
    /// Panics if `self` is not an array.
    pub fn push_bulk(&mut self, bytes: Bytes) {
        match self {
            Frame::Array(vec) => vec.push(Frame::Bulk(bytes)),
            _ => panic!("not an array frame"),
        }
    }

    /// Writes the RESP encoding of the frame into `dst`.
    pub fn encode(&self, dst: &mut BytesMut) {
        match self {
            // "+OK\r\n"
            Frame::Simple(val) => {
                dst.put_u8(b'+');
                dst.put_slice(val.as_bytes());
                dst.put_slice(b"\r\n");
            }
            // ":1000\r\n"
            Frame::Integer(val) => {
                dst.put_u8(b':');
                put_decimal(dst, *val);
            }
            // "$6\r\nfoobar\r\n"
            Frame::Bulk(val) => {
                dst.put_u8(b'$');
                put_decimal(dst, val.len() as i64);
                dst.put_slice(val);
                dst.put_slice(b"\r\n");
            }
            // "*2\r\n$3\r\nget\r\n$3\r\nkey\r\n"
            Frame::Array(val) => {
                dst.put_u8(b'*');
                put_decimal(dst, val.len() as i64);

                for entry in val {
                    entry.encode(dst);
                }
            }
        }
    }

    /// Returns the frame as string tokens, if it is an array of strings.
    pub fn to_args(&self) -> Option<Vec<String>> {
        match self {
            Frame::Array(parts) => parts
                .iter()
                .map(|part| match part {
                    Frame::Simple(s) => Some(s.clone()),
                    Frame::Bulk(data) => std::str::from_utf8(data).ok().map(str::to_string),
                    Frame::Integer(num) => Some(num.to_string()),
                    Frame::Array(_) => None,
                })
                .collect(),
            _ => None,
        }
    }
}

fn put_decimal(dst: &mut BytesMut, val: i64) {
    dst.put_slice(val.to_string().as_bytes());
    dst.put_slice(b"\r\n");
}

impl PartialEq<&str> for Frame {
    fn eq(&self, other: &&str) -> bool {
        match self {
            Frame::Simple(s) => s.eq(other),
            Frame::Bulk(s) => s.eq(other),
            _ => false,
        }
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        use std::str;

        match self {
            Frame::Simple(response) => fmt.write_str(response),
            Frame::Integer(num) => write!(fmt, "{}", num),
            Frame::Bulk(msg) => match str::from_utf8(msg) {
                Ok(string) => fmt.write_str(string),
                Err(_) => write!(fmt, "{:?}", msg),
            },
            Frame::Array(parts) => {
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        write!(fmt, " ")?;
                    }
                    write!(fmt, "{}", part)?;
                }

                Ok(())
            }
        }
    }
}
