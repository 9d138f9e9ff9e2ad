//! Spawn script format definitions

use garrison_core::Vec3;
use serde::{Deserialize, Serialize};

/// Recognized spawn command kinds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    /// `bot spawn` - an NPC spawn point
    BotSpawn,
    /// `spawn` - a prop placement
    Spawn,
}

impl CommandKind {
    /// The keyword as it appears at the start of a script line
    pub fn keyword(&self) -> &'static str {
        match self {
            CommandKind::BotSpawn => "bot spawn",
            CommandKind::Spawn => "spawn",
        }
    }
}

/// Facing of a spawn point, in degrees: a single yaw heading or a full
/// Euler rotation triple
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Heading(f32),
    Euler(Vec3),
}

impl Orientation {
    /// Yaw component in degrees; for Euler rotations this is the y axis
    pub fn yaw(&self) -> f32 {
        match self {
            Orientation::Heading(h) => *h,
            Orientation::Euler(r) => r.y,
        }
    }
}

/// A recognized spawn command
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub kind: CommandKind,
    /// Repeat count token carried by the game format; almost always 1
    pub count: u32,
    pub npc_type: String,
    pub position: Vec3,
    pub orientation: Orientation,
}

impl SpawnPoint {
    pub fn new(
        kind: CommandKind,
        npc_type: impl Into<String>,
        position: Vec3,
        orientation: Orientation,
    ) -> Self {
        Self {
            kind,
            count: 1,
            npc_type: npc_type.into(),
            position,
            orientation,
        }
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }
}

/// Line content: a structured spawn command or verbatim passthrough text
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Payload {
    Spawn(SpawnPoint),
    Raw(String),
}

/// One line of a spawn script, with its folder grouping key and stable
/// position within that folder
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub payload: Payload,
    /// Slash-delimited folder key; the empty string is the root
    pub path: String,
    pub order: u32,
}

impl Record {
    pub fn spawn(point: SpawnPoint, path: impl Into<String>, order: u32) -> Self {
        Self {
            payload: Payload::Spawn(point),
            path: path.into(),
            order,
        }
    }

    pub fn raw(text: impl Into<String>, path: impl Into<String>, order: u32) -> Self {
        Self {
            payload: Payload::Raw(text.into()),
            path: path.into(),
            order,
        }
    }

    pub fn is_raw(&self) -> bool {
        matches!(self.payload, Payload::Raw(_))
    }

    pub fn as_spawn(&self) -> Option<&SpawnPoint> {
        match &self.payload {
            Payload::Spawn(point) => Some(point),
            Payload::Raw(_) => None,
        }
    }

    pub fn as_spawn_mut(&mut self) -> Option<&mut SpawnPoint> {
        match &mut self.payload {
            Payload::Spawn(point) => Some(point),
            Payload::Raw(_) => None,
        }
    }

    pub fn raw_text(&self) -> Option<&str> {
        match &self.payload {
            Payload::Raw(text) => Some(text),
            Payload::Spawn(_) => None,
        }
    }
}

/// A fully parsed script: the record sequence plus every folder path
/// established by a directive, in first-encounter order. Folders may hold
/// no records and still survive a load/save cycle.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScriptFile {
    pub records: Vec<Record>,
    pub folders: Vec<String>,
}

impl ScriptFile {
    /// Serialize back to script text, keeping empty folders alive
    pub fn to_text(&self) -> String {
        crate::writer::write_script_with_folders(&self.records, &self.folders)
    }
}

/// Split a slash-delimited folder key into its non-empty components
pub fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|part| !part.is_empty()).collect()
}
