//! Spawn script parsing
//!
//! Parsing never fails. The format is hand-edited by mission makers, so a
//! malformed line degrades to a raw passthrough record instead of aborting
//! the load; blank lines and `//` comments pass through the same way.

use crate::format::{CommandKind, Orientation, Payload, Record, ScriptFile, SpawnPoint};
use garrison_core::Vec3;
use std::collections::HashMap;

/// Marker for comment lines kept as passthrough
const COMMENT: &str = "//";

/// Parse script text into an ordered record sequence
pub fn parse_script(text: &str) -> Vec<Record> {
    parse_script_full(text).records
}

/// Parse script text, also collecting every folder path established by a
/// directive so that empty folders survive a round trip
pub fn parse_script_full(text: &str) -> ScriptFile {
    let mut records = Vec::new();
    let mut folders: Vec<String> = Vec::new();
    let mut stack: Vec<String> = Vec::new();
    let mut counters: HashMap<String, u32> = HashMap::new();

    for line in text.lines() {
        let trimmed = line.trim();

        if let Some((level, name)) = parse_directive(trimmed) {
            stack.truncate(level - 1);
            stack.push(name.to_string());
            let path = stack.join("/");
            if !folders.contains(&path) {
                folders.push(path);
            }
            continue;
        }

        let path = stack.join("/");
        let order = next_order(&mut counters, &path);
        let payload = if trimmed.is_empty() || trimmed.starts_with(COMMENT) {
            Payload::Raw(line.to_string())
        } else if let Some(point) = parse_spawn_line(trimmed) {
            Payload::Spawn(point)
        } else {
            Payload::Raw(line.to_string())
        };
        records.push(Record {
            payload,
            path,
            order,
        });
    }

    ScriptFile { records, folders }
}

/// Whether a line starts with a spawn keyword but does not parse as a spawn
/// command. These are the lines most likely to be genuine format mistakes
/// (a missing coordinate, a stray letter in a numeric slot).
pub fn is_near_miss(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with(COMMENT) || trimmed.starts_with('#') {
        return false;
    }
    let mut tokens = split_tokens(trimmed);
    let keyworded = match tokens.next() {
        Some("spawn") => true,
        Some("bot") => tokens.next() == Some("spawn"),
        _ => false,
    };
    keyworded && parse_spawn_line(trimmed).is_none()
}

/// A directive is one or more `#` followed by a non-empty folder name.
/// Returns the folder depth (number of `#`) and the name.
fn parse_directive(trimmed: &str) -> Option<(usize, &str)> {
    if !trimmed.starts_with('#') {
        return None;
    }
    let level = trimmed.chars().take_while(|c| *c == '#').count();
    let name = trimmed[level..].trim();
    if name.is_empty() {
        return None;
    }
    Some((level, name))
}

fn split_tokens(line: &str) -> impl Iterator<Item = &str> {
    line.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
}

fn parse_spawn_line(line: &str) -> Option<SpawnPoint> {
    let tokens: Vec<&str> = split_tokens(line).collect();

    let (kind, rest) = match tokens.as_slice() {
        ["bot", "spawn", rest @ ..] => (CommandKind::BotSpawn, rest),
        ["spawn", rest @ ..] => (CommandKind::Spawn, rest),
        _ => return None,
    };

    // The game format carries a repeat count right after the keyword.
    // Prefer that reading, and fall back to the count-less layout when the
    // remaining tokens do not fit.
    if let Some(count) = rest.first().and_then(|t| parse_count(t)) {
        if let Some(point) = parse_spawn_args(kind, count, &rest[1..]) {
            return Some(point);
        }
    }
    parse_spawn_args(kind, 1, rest)
}

/// Positional layout after the keyword and optional count: type, x, y, z,
/// then nothing (heading 0), one heading value, or three rotation values.
fn parse_spawn_args(kind: CommandKind, count: u32, args: &[&str]) -> Option<SpawnPoint> {
    let (npc_type, coords) = args.split_first()?;
    let values: Vec<f32> = coords
        .iter()
        .map(|t| parse_coord(t))
        .collect::<Option<Vec<f32>>>()?;

    let (position, orientation) = match values.as_slice() {
        [x, y, z] => (Vec3::new(*x, *y, *z), Orientation::Heading(0.0)),
        [x, y, z, h] => (Vec3::new(*x, *y, *z), Orientation::Heading(*h)),
        [x, y, z, rx, ry, rz] => (
            Vec3::new(*x, *y, *z),
            Orientation::Euler(Vec3::new(*rx, *ry, *rz)),
        ),
        _ => return None,
    };

    Some(SpawnPoint {
        kind,
        count,
        npc_type: npc_type.to_string(),
        position,
        orientation,
    })
}

/// Numeric slots accept only sign, digits and a decimal point, matching the
/// hand-written coordinates the format sees in practice.
fn parse_coord(token: &str) -> Option<f32> {
    if token.is_empty()
        || !token
            .chars()
            .all(|c| c.is_ascii_digit() || c == '-' || c == '.')
    {
        return None;
    }
    token.parse().ok()
}

fn parse_count(token: &str) -> Option<u32> {
    if token.is_empty() || !token.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

fn next_order(counters: &mut HashMap<String, u32>, path: &str) -> u32 {
    let counter = counters.entry(path.to_string()).or_insert(0);
    let order = *counter;
    *counter += 1;
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(parse_script("").is_empty());
    }

    #[test]
    fn test_folder_grouping_and_order() {
        let text = "\
# A
bot spawn 1 Guard 0 0 0 0
bot spawn 1 Guard 1 0 0 0
# B
bot spawn 1 Sniper 2 0 0 0
bot spawn 1 Sniper 3 0 0 0
";
        let records = parse_script(text);
        assert_eq!(records.len(), 4);
        let paths: Vec<&str> = records.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["A", "A", "B", "B"]);
        let orders: Vec<u32> = records.iter().map(|r| r.order).collect();
        assert_eq!(orders, vec![0, 1, 0, 1]);
    }

    #[test]
    fn test_comma_separated_heading() {
        let records = parse_script("spawn, Guard, 10, 0, 5, 90");
        assert_eq!(records.len(), 1);
        let point = records[0].as_spawn().unwrap();
        assert_eq!(point.kind, CommandKind::Spawn);
        assert_eq!(point.npc_type, "Guard");
        assert_eq!(point.position, Vec3::new(10.0, 0.0, 5.0));
        assert_eq!(point.orientation, Orientation::Heading(90.0));
        assert_eq!(point.count, 1);
    }

    #[test]
    fn test_count_token() {
        let records = parse_script("bot spawn 3 Rifleman 10 20 30 45");
        let point = records[0].as_spawn().unwrap();
        assert_eq!(point.count, 3);
        assert_eq!(point.npc_type, "Rifleman");
        assert_eq!(point.position, Vec3::new(10.0, 20.0, 30.0));
        assert_eq!(point.orientation, Orientation::Heading(45.0));
    }

    #[test]
    fn test_missing_orientation_defaults_to_zero_heading() {
        let records = parse_script("bot spawn 1 Guard 1 2 3");
        let point = records[0].as_spawn().unwrap();
        assert_eq!(point.orientation, Orientation::Heading(0.0));
    }

    #[test]
    fn test_euler_rotation() {
        let records = parse_script("spawn 1 Crate -4.5 0 12 0 90 0");
        let point = records[0].as_spawn().unwrap();
        assert_eq!(point.position, Vec3::new(-4.5, 0.0, 12.0));
        assert_eq!(
            point.orientation,
            Orientation::Euler(Vec3::new(0.0, 90.0, 0.0))
        );
    }

    #[test]
    fn test_unrecognized_lines_kept_verbatim() {
        let text = "bot spawn 1 Guard 1 2 x\nsome note\nspawn 1 Crate 1 2\n";
        let records = parse_script(text);
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].raw_text(), Some("bot spawn 1 Guard 1 2 x"));
        assert_eq!(records[1].raw_text(), Some("some note"));
        assert_eq!(records[2].raw_text(), Some("spawn 1 Crate 1 2"));
    }

    #[test]
    fn test_blank_and_comment_passthrough() {
        let text = "// patrol layout\n\nbot spawn 1 Guard 0 0 0 0\n";
        let records = parse_script(text);
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].raw_text(), Some("// patrol layout"));
        assert_eq!(records[1].raw_text(), Some(""));
        assert!(records[2].as_spawn().is_some());
        // Passthrough lines share the per-folder counter
        assert_eq!(records[2].order, 2);
    }

    #[test]
    fn test_nested_folders() {
        let text = "\
# Base
## North
bot spawn 1 Guard 0 0 0 0
# Field
bot spawn 1 Sniper 0 0 0 0
";
        let records = parse_script(text);
        assert_eq!(records[0].path, "Base/North");
        assert_eq!(records[1].path, "Field");
    }

    #[test]
    fn test_deep_directive_clamps_to_stack() {
        // A level-3 directive with nothing above lands at depth 1
        let records = parse_script("### Lost\nbot spawn 1 Guard 0 0 0 0\n");
        assert_eq!(records[0].path, "Lost");
    }

    #[test]
    fn test_bare_hash_is_raw() {
        let records = parse_script("#\n");
        assert_eq!(records[0].raw_text(), Some("#"));
    }

    #[test]
    fn test_count_less_numeric_type_falls_back() {
        // The first token is numeric but the count-bearing reading does not
        // fit, so it is read as the type
        let records = parse_script("spawn 1 2 3 4");
        let point = records[0].as_spawn().unwrap();
        assert_eq!(point.count, 1);
        assert_eq!(point.npc_type, "1");
        assert_eq!(point.position, Vec3::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn test_folders_collected_in_encounter_order() {
        let file = parse_script_full("# A\n## B\n# C\nbot spawn 1 Guard 0 0 0 0\n");
        assert_eq!(file.folders, vec!["A", "A/B", "C"]);
        assert_eq!(file.records.len(), 1);
        assert_eq!(file.records[0].path, "C");
    }

    #[test]
    fn test_near_miss_detection() {
        assert!(is_near_miss("bot spawn 1 Guard 1 2 x"));
        assert!(is_near_miss("spawn 1 Crate 1 2"));
        assert!(!is_near_miss("bot spawn 1 Guard 1 2 3 0"));
        assert!(!is_near_miss("some note"));
        assert!(!is_near_miss("// spawn 1 Crate 1 2"));
        assert!(!is_near_miss("# Folder"));
        assert!(!is_near_miss(""));
    }
}
