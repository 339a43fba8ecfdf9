//! Sorted set range and combine commands.

mod zrange;
pub use zrange::ZRange;

mod zrangestore;
pub use zrangestore::ZRangeStore;

mod zstore;
pub use zstore::{ZInterStore, ZUnionStore};

use crate::{Frame, Parse};

use tracing::debug;

/// Supported sorted set commands.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    ZRange(ZRange),
    ZRangeStore(ZRangeStore),
    ZUnionStore(ZUnionStore),
    ZInterStore(ZInterStore),
}

impl Command {
    /// Parse a command from a received frame.
    ///
    /// The frame must be the array variant and represent a supported command.
    pub fn from_frame(frame: Frame) -> crate::Result<Command> {
        let mut parse = Parse::new(frame)?;

        // The command name is matched case-insensitively.
        let command_name = parse.next_string()?.to_lowercase();

        let command = match &command_name[..] {
            "zrange" => Command::ZRange(ZRange::parse_frames(&mut parse)?),
            "zrangestore" => Command::ZRangeStore(ZRangeStore::parse_frames(&mut parse)?),
            "zunionstore" => Command::ZUnionStore(ZUnionStore::parse_frames(&mut parse)?),
            "zinterstore" => Command::ZInterStore(ZInterStore::parse_frames(&mut parse)?),
            _ => return Err(format!("unknown command '{}'", command_name).into()),
        };

        // Check if there is any remaining unconsumed fields in the `Parse`.
        parse.finish()?;

        debug!(?command);

        Ok(command)
    }

    /// Returns the arguments following the command name.
    pub fn args(&self) -> Vec<String> {
        match self {
            Command::ZRange(cmd) => cmd.args(),
            Command::ZRangeStore(cmd) => cmd.args(),
            Command::ZUnionStore(cmd) => cmd.args(),
            Command::ZInterStore(cmd) => cmd.args(),
        }
    }

    /// Converts the command into the frame sent to the server.
    pub fn into_frame(self) -> Frame {
        let frame = match self {
            Command::ZRange(cmd) => cmd.into_frame(),
            Command::ZRangeStore(cmd) => cmd.into_frame(),
            Command::ZUnionStore(cmd) => cmd.into_frame(),
            Command::ZInterStore(cmd) => cmd.into_frame(),
        };

        debug!(request = ?frame);

        frame
    }

    /// Returns the command name.
    pub fn get_name(&self) -> &str {
        match self {
            Command::ZRange(_) => "zrange",
            Command::ZRangeStore(_) => "zrangestore",
            Command::ZUnionStore(_) => "zunionstore",
            Command::ZInterStore(_) => "zinterstore",
        }
    }
}

impl From<ZRange> for Command {
    fn from(src: ZRange) -> Command {
        Command::ZRange(src)
    }
}

impl From<ZRangeStore> for Command {
    fn from(src: ZRangeStore) -> Command {
        Command::ZRangeStore(src)
    }
}

impl From<ZUnionStore> for Command {
    fn from(src: ZUnionStore) -> Command {
        Command::ZUnionStore(src)
    }
}

impl From<ZInterStore> for Command {
    fn from(src: ZInterStore) -> Command {
        Command::ZInterStore(src)
    }
}
