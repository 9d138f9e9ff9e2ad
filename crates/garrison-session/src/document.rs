//! The open document: a spawn script held in memory
//!
//! The record list is the single source of truth for an editing session.
//! Mutations operate on `path` and `order` fields; the text layout is
//! recomputed on save.

use garrison_core::{GarrisonError, Result, Vec3};
use garrison_script::{
    parse_script, parse_script_full, split_path, Payload, Record, ScriptFile, SpawnPoint,
};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// An open spawn script: records, the folders known to the session and the
/// backing file path
#[derive(Debug, Default, Clone)]
pub struct Document {
    records: Vec<Record>,
    folders: Vec<String>,
    path: Option<PathBuf>,
}

impl Document {
    /// Load a script file. I/O failures surface as `ScriptUnavailable`;
    /// the parse itself cannot fail.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| GarrisonError::ScriptUnavailable {
            path: path.display().to_string(),
            source,
        })?;
        let ScriptFile { records, folders } = parse_script_full(&text);
        Ok(Self {
            records,
            folders,
            path: Some(path.to_path_buf()),
        })
    }

    /// Build a document from script text, with no backing file
    pub fn from_text(text: &str) -> Self {
        let ScriptFile { records, folders } = parse_script_full(text);
        Self {
            records,
            folders,
            path: None,
        }
    }

    /// Write the document back to its backing file
    pub fn save(&self) -> Result<()> {
        let path = self.path.as_ref().ok_or(GarrisonError::NoScriptPath)?;
        fs::write(path, self.to_text()).map_err(|source| GarrisonError::ScriptUnavailable {
            path: path.display().to_string(),
            source,
        })
    }

    /// Write the document to a new file and adopt it as the backing file
    pub fn save_as<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_text()).map_err(|source| GarrisonError::ScriptUnavailable {
            path: path.display().to_string(),
            source,
        })?;
        self.path = Some(path.to_path_buf());
        Ok(())
    }

    /// Serialize to script text, keeping empty folders alive
    pub fn to_text(&self) -> String {
        garrison_script::write_script_with_folders(&self.records, &self.folders)
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    /// The spawn point at `index`; raw records and out-of-range indices
    /// both report `PointNotFound`
    pub fn spawn_at(&self, index: usize) -> Result<&SpawnPoint> {
        self.records
            .get(index)
            .and_then(|r| r.as_spawn())
            .ok_or(GarrisonError::PointNotFound(index))
    }

    pub fn spawn_at_mut(&mut self, index: usize) -> Result<&mut SpawnPoint> {
        self.records
            .get_mut(index)
            .and_then(|r| r.as_spawn_mut())
            .ok_or(GarrisonError::PointNotFound(index))
    }

    /// Every folder known to the session: directives seen at load time
    /// first, then any paths introduced by later edits
    pub fn folder_paths(&self) -> Vec<String> {
        let mut paths = self.folders.clone();
        for record in &self.records {
            if !record.path.is_empty() && !paths.contains(&record.path) {
                paths.push(record.path.clone());
            }
        }
        paths
    }

    /// Sorted unique type names across all spawn records
    pub fn unique_types(&self) -> Vec<String> {
        let mut types: Vec<String> = self
            .records
            .iter()
            .filter_map(|r| r.as_spawn())
            .map(|p| p.npc_type.clone())
            .collect();
        types.sort();
        types.dedup();
        types
    }

    /// Record indices in a folder, ascending by order
    pub fn indices_in_folder(&self, path: &str) -> Vec<usize> {
        let target = split_path(path).join("/");
        let mut indices: Vec<usize> = (0..self.records.len())
            .filter(|&i| self.records[i].path == target)
            .collect();
        indices.sort_by_key(|&i| self.records[i].order);
        indices
    }

    /// Append a new spawn point at the tail of a folder. Returns its index.
    pub fn add_point(&mut self, point: SpawnPoint, path: &str) -> usize {
        let target = split_path(path).join("/");
        let order = self.next_order_in(&target);
        self.register_folder(&target);
        self.records.push(Record::spawn(point, target, order));
        self.records.len() - 1
    }

    /// Parse a pasted snippet and append its recognized spawn commands at
    /// the root, after the current root tail. Raw lines are dropped.
    /// Returns the number of points added.
    pub fn append_from_text(&mut self, text: &str) -> usize {
        let mut order = self.next_order_in("");
        let mut added = 0;
        for record in parse_script(text) {
            if let Payload::Spawn(point) = record.payload {
                self.records.push(Record::spawn(point, "", order));
                order += 1;
                added += 1;
            }
        }
        added
    }

    /// Delete records by index and renumber the affected folders.
    /// Returns the number of records removed.
    pub fn delete(&mut self, indices: &[usize]) -> Result<usize> {
        let mut sorted: Vec<usize> = indices.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        if let Some(&bad) = sorted.iter().find(|&&i| i >= self.records.len()) {
            return Err(GarrisonError::PointNotFound(bad));
        }
        for &i in sorted.iter().rev() {
            self.records.remove(i);
        }
        self.renumber();
        Ok(sorted.len())
    }

    /// Swap a record with its neighbor in the same folder. `delta` is -1
    /// for up, +1 for down. Returns false when already at the boundary.
    pub fn shift_in_folder(&mut self, index: usize, delta: isize) -> Result<bool> {
        if index >= self.records.len() {
            return Err(GarrisonError::PointNotFound(index));
        }
        let folder = self.records[index].path.clone();
        let siblings = self.indices_in_folder(&folder);
        let pos = siblings
            .iter()
            .position(|&i| i == index)
            .ok_or(GarrisonError::PointNotFound(index))?;
        let target = pos as isize + delta;
        if target < 0 || target as usize >= siblings.len() {
            return Ok(false);
        }
        let a = siblings[pos];
        let b = siblings[target as usize];
        let order = self.records[a].order;
        self.records[a].order = self.records[b].order;
        self.records[b].order = order;
        Ok(true)
    }

    /// Reassign a record to another folder, appending at its tail
    pub fn move_to_folder(&mut self, index: usize, path: &str) -> Result<()> {
        if index >= self.records.len() {
            return Err(GarrisonError::PointNotFound(index));
        }
        let target = split_path(path).join("/");
        self.records[index].order = self.next_order_in(&target);
        self.records[index].path = target.clone();
        self.register_folder(&target);
        self.renumber();
        Ok(())
    }

    /// Rename a folder, rewriting the paths of every record under it
    /// (descendants included). Returns the number of records touched.
    pub fn rename_folder(&mut self, old: &str, new: &str) -> Result<usize> {
        let old_parts = split_path(old);
        let new_parts = split_path(new);
        if old_parts.is_empty() || new_parts.is_empty() {
            return Err(GarrisonError::FolderNotFound(old.to_string()));
        }

        let mut known = false;
        let mut touched = 0;
        for record in &mut self.records {
            if let Some(path) = reparent(&record.path, &old_parts, &new_parts) {
                record.path = path;
                touched += 1;
            }
        }
        for folder in &mut self.folders {
            if let Some(path) = reparent(folder, &old_parts, &new_parts) {
                *folder = path;
                known = true;
            }
        }
        let mut seen: Vec<String> = Vec::new();
        self.folders.retain(|folder| {
            if seen.contains(folder) {
                false
            } else {
                seen.push(folder.clone());
                true
            }
        });

        if touched == 0 && !known {
            return Err(GarrisonError::FolderNotFound(old.to_string()));
        }
        // A rename can merge two folders; renumbering keeps orders unique
        self.renumber();
        Ok(touched)
    }

    /// The spawn point closest to a world-space position
    pub fn nearest_point(&self, target: Vec3) -> Option<(usize, f32)> {
        let mut best: Option<(usize, f32)> = None;
        for (index, record) in self.records.iter().enumerate() {
            if let Some(point) = record.as_spawn() {
                let dist = point.position.distance(&target);
                if best.map_or(true, |(_, d)| dist < d) {
                    best = Some((index, dist));
                }
            }
        }
        best
    }

    fn next_order_in(&self, target: &str) -> u32 {
        self.records
            .iter()
            .filter(|r| r.path == target)
            .map(|r| r.order + 1)
            .max()
            .unwrap_or(0)
    }

    fn register_folder(&mut self, target: &str) {
        if !target.is_empty() && !self.folders.contains(&target.to_string()) {
            self.folders.push(target.to_string());
        }
    }

    /// Reassign dense per-folder orders, preserving the current relative
    /// order within each folder
    fn renumber(&mut self) {
        let mut by_folder: HashMap<String, Vec<usize>> = HashMap::new();
        for (index, record) in self.records.iter().enumerate() {
            by_folder.entry(record.path.clone()).or_default().push(index);
        }
        for indices in by_folder.values_mut() {
            indices.sort_by_key(|&i| self.records[i].order);
            for (order, &i) in indices.iter().enumerate() {
                self.records[i].order = order as u32;
            }
        }
    }
}

/// Rewrite `path` if it is `old` or a descendant of it, grafting the
/// remainder onto `new`
fn reparent(path: &str, old: &[&str], new: &[&str]) -> Option<String> {
    let parts = split_path(path);
    if parts.len() < old.len() || parts[..old.len()] != *old {
        return None;
    }
    let grafted: Vec<&str> = new.iter().chain(&parts[old.len()..]).copied().collect();
    Some(grafted.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use garrison_script::{CommandKind, Orientation};

    const SAMPLE: &str = "\
# Base
bot spawn 1 Guard 0 0 0 0
bot spawn 1 Guard 1 0 0 0
## Roof
bot spawn 1 Sniper 2 0 0 0
# Field
spawn 1 Crate 3 0 0 0 45 0
";

    fn doc() -> Document {
        Document::from_text(SAMPLE)
    }

    #[test]
    fn test_spawn_at() {
        let doc = doc();
        assert_eq!(doc.spawn_at(0).unwrap().npc_type, "Guard");
        assert!(matches!(
            doc.spawn_at(99),
            Err(GarrisonError::PointNotFound(99))
        ));
    }

    #[test]
    fn test_unique_types_sorted() {
        assert_eq!(doc().unique_types(), vec!["Crate", "Guard", "Sniper"]);
    }

    #[test]
    fn test_add_point_appends_at_folder_tail() {
        let mut doc = doc();
        let point = SpawnPoint::new(
            CommandKind::BotSpawn,
            "Medic",
            Vec3::new(5.0, 0.0, 0.0),
            Orientation::Heading(0.0),
        );
        let index = doc.add_point(point, "Base");
        assert_eq!(doc.get(index).unwrap().path, "Base");
        assert_eq!(doc.get(index).unwrap().order, 2);
    }

    #[test]
    fn test_add_point_registers_new_folder() {
        let mut doc = doc();
        let point = SpawnPoint::new(
            CommandKind::BotSpawn,
            "Scout",
            Vec3::ZERO,
            Orientation::Heading(0.0),
        );
        doc.add_point(point, "Reserve/East");
        assert!(doc.folder_paths().contains(&"Reserve/East".to_string()));
    }

    #[test]
    fn test_append_from_text_lands_at_root() {
        let mut doc = doc();
        let added = doc.append_from_text(
            "bot spawn 1 Guard 9 9 9 0\nnot a command\nspawn 1 Crate 1 2 3 0 0 0\n",
        );
        assert_eq!(added, 2);
        let last = doc.get(doc.len() - 1).unwrap();
        assert_eq!(last.path, "");
        assert_eq!(last.order, 1);
        assert_eq!(doc.get(doc.len() - 2).unwrap().order, 0);
    }

    #[test]
    fn test_delete_renumbers() {
        let mut doc = doc();
        let removed = doc.delete(&[0]).unwrap();
        assert_eq!(removed, 1);
        // The surviving Base guard slides down to order 0
        let base = doc.indices_in_folder("Base");
        assert_eq!(base.len(), 1);
        assert_eq!(doc.get(base[0]).unwrap().order, 0);
    }

    #[test]
    fn test_delete_out_of_range() {
        let mut doc = doc();
        assert!(matches!(
            doc.delete(&[0, 42]),
            Err(GarrisonError::PointNotFound(42))
        ));
        assert_eq!(doc.len(), 4);
    }

    #[test]
    fn test_shift_in_folder_swaps_orders() {
        let mut doc = doc();
        assert!(doc.shift_in_folder(0, 1).unwrap());
        assert_eq!(doc.get(0).unwrap().order, 1);
        assert_eq!(doc.get(1).unwrap().order, 0);
        // Survives a save/load cycle
        let reloaded = Document::from_text(&doc.to_text());
        assert_eq!(reloaded.spawn_at(0).unwrap().position.x, 1.0);
        assert_eq!(reloaded.spawn_at(1).unwrap().position.x, 0.0);
    }

    #[test]
    fn test_shift_at_boundary_is_noop() {
        let mut doc = doc();
        assert!(!doc.shift_in_folder(0, -1).unwrap());
        assert_eq!(doc.get(0).unwrap().order, 0);
    }

    #[test]
    fn test_move_to_folder() {
        let mut doc = doc();
        doc.move_to_folder(0, "Field").unwrap();
        assert_eq!(doc.get(0).unwrap().path, "Field");
        assert_eq!(doc.get(0).unwrap().order, 1);
        // The source folder closes the gap
        let base = doc.indices_in_folder("Base");
        assert_eq!(doc.get(base[0]).unwrap().order, 0);
    }

    #[test]
    fn test_rename_folder_rewrites_descendants() {
        let mut doc = doc();
        let touched = doc.rename_folder("Base", "Camp").unwrap();
        assert_eq!(touched, 3);
        assert_eq!(doc.get(0).unwrap().path, "Camp");
        assert_eq!(doc.get(2).unwrap().path, "Camp/Roof");
        assert!(matches!(
            doc.rename_folder("Nowhere", "X"),
            Err(GarrisonError::FolderNotFound(_))
        ));
    }

    #[test]
    fn test_nearest_point() {
        let doc = doc();
        let (index, dist) = doc.nearest_point(Vec3::new(2.9, 0.0, 0.0)).unwrap();
        assert_eq!(index, 3);
        assert!((dist - 0.1).abs() < 1e-4);
    }

    #[test]
    fn test_save_and_reopen() {
        let dir = std::env::temp_dir().join(format!("garrison_doc_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("spawns.txt");

        let mut doc = doc();
        doc.save_as(&path).unwrap();
        let reloaded = Document::open(&path).unwrap();
        assert_eq!(reloaded.records(), doc.records());

        std::fs::remove_file(&path).ok();
        std::fs::remove_dir(&dir).ok();
    }

    #[test]
    fn test_open_missing_file_is_script_unavailable() {
        let err = Document::open("/nonexistent/garrison/spawns.txt").unwrap_err();
        assert!(matches!(err, GarrisonError::ScriptUnavailable { .. }));
    }
}
