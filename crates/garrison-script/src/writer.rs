//! Spawn script serialization
//!
//! Records are grouped by folder path and emitted in ascending intra-folder
//! order, with directive lines written wherever the path changes. The
//! output is not guaranteed byte-identical to the source, but it reparses
//! to the same structured records.

use crate::format::{split_path, Orientation, Payload, Record, SpawnPoint};
use std::collections::HashMap;

/// Serialize records to script text
pub fn write_script(records: &[Record]) -> String {
    write_script_with_folders(records, &[])
}

/// Serialize records to script text, also emitting directives for known
/// folders that hold no records so they survive the round trip
pub fn write_script_with_folders(records: &[Record], folders: &[String]) -> String {
    let mut out = String::new();
    let mut last_parts: Vec<String> = Vec::new();

    let groups = group_records(records);

    for (path, group) in &groups {
        emit_directives(&mut out, &mut last_parts, split_path(path));
        for record in group {
            match &record.payload {
                Payload::Raw(text) => out.push_str(text),
                Payload::Spawn(point) => out.push_str(&format_spawn(point)),
            }
            out.push('\n');
        }
    }

    // Folders with no records trail the output, shallowest first
    let mut empty: Vec<&String> = folders
        .iter()
        .filter(|path| !path.is_empty() && !groups.iter().any(|(p, _)| p == *path))
        .collect();
    empty.sort_by(|a, b| {
        (split_path(a).len(), a.as_str()).cmp(&(split_path(b).len(), b.as_str()))
    });
    for path in empty {
        emit_directives(&mut out, &mut last_parts, split_path(path));
    }

    out
}

/// Group records by path. Groups keep the order in which each path was
/// first encountered, except the root group: root records cannot follow a
/// directive in the text format, so the root always leads the output.
fn group_records(records: &[Record]) -> Vec<(String, Vec<&Record>)> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<&str, Vec<&Record>> = HashMap::new();

    for record in records {
        if !groups.contains_key(record.path.as_str()) {
            order.push(record.path.clone());
        }
        groups.entry(record.path.as_str()).or_default().push(record);
    }

    if let Some(root) = order.iter().position(|path| path.is_empty()) {
        let path = order.remove(root);
        order.insert(0, path);
    }

    order
        .into_iter()
        .map(|path| {
            let mut group = groups.remove(path.as_str()).unwrap_or_default();
            group.sort_by_key(|record| record.order);
            (path, group)
        })
        .collect()
}

/// Emit directive lines for the transition from the previously written path
/// to `parts`. Only components below the common prefix are written; when
/// the new path is a strict prefix of the previous one, its deepest
/// component is re-emitted so the folder stack pops on reparse.
fn emit_directives(out: &mut String, last: &mut Vec<String>, parts: Vec<&str>) {
    let mut common = 0;
    while common < last.len() && common < parts.len() && last[common] == parts[common] {
        common += 1;
    }

    if common == parts.len() && !parts.is_empty() && last.len() > parts.len() {
        push_directive(out, parts.len(), parts[parts.len() - 1]);
    } else {
        for (depth, name) in parts.iter().enumerate().skip(common) {
            push_directive(out, depth + 1, name);
        }
    }

    *last = parts.into_iter().map(String::from).collect();
}

fn push_directive(out: &mut String, depth: usize, name: &str) {
    for _ in 0..depth {
        out.push('#');
    }
    out.push(' ');
    out.push_str(name);
    out.push('\n');
}

/// Format a spawn command in the parser's positional layout
fn format_spawn(point: &SpawnPoint) -> String {
    let p = point.position;
    let mut line = format!(
        "{} {} {} {} {} {}",
        point.kind.keyword(),
        point.count,
        point.npc_type,
        p.x,
        p.y,
        p.z
    );
    match point.orientation {
        Orientation::Heading(h) => {
            line.push(' ');
            line.push_str(&h.to_string());
        }
        Orientation::Euler(r) => {
            for v in [r.x, r.y, r.z] {
                line.push(' ');
                line.push_str(&v.to_string());
            }
        }
    }
    line
}
