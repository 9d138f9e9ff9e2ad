//! Spawn script parsing and serialization
//!
//! The on-disk format is line oriented: `#`-prefixed directive lines
//! establish a folder context, `bot spawn` / `spawn` lines place NPCs and
//! props, and everything else (blank lines, `//` comments, malformed
//! commands) passes through verbatim. Parsing never fails; serialization
//! regroups records by folder and preserves intra-folder order.

mod format;
mod parser;
mod writer;

pub use format::{split_path, CommandKind, Orientation, Payload, Record, ScriptFile, SpawnPoint};
pub use parser::{is_near_miss, parse_script, parse_script_full};
pub use writer::{write_script, write_script_with_folders};
