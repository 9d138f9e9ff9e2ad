//! Folder tree view over the flat record list
//!
//! The stored model keeps the slash-delimited path as a flat grouping key;
//! this module materializes the explicit tree the editor displays. The
//! tree is a view - rebuilding it after a mutation is cheap and keeps the
//! text format the single source of truth.

use crate::document::Document;
use garrison_script::split_path;

/// One folder in the tree
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FolderNode {
    pub name: String,
    pub children: Vec<FolderNode>,
    /// Indices into the document's record list, ascending by order
    pub points: Vec<usize>,
}

impl FolderNode {
    fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            children: Vec::new(),
            points: Vec::new(),
        }
    }

    fn ensure_child(&mut self, name: &str) -> &mut FolderNode {
        let pos = match self.children.iter().position(|c| c.name == name) {
            Some(pos) => pos,
            None => {
                self.children.push(FolderNode::named(name));
                self.children.len() - 1
            }
        };
        &mut self.children[pos]
    }

    fn ensure_path(&mut self, parts: &[&str]) -> &mut FolderNode {
        let mut node = self;
        for part in parts {
            node = node.ensure_child(part);
        }
        node
    }

    /// Total spawn points in this folder and all descendants
    pub fn total_points(&self) -> usize {
        self.points.len()
            + self
                .children
                .iter()
                .map(FolderNode::total_points)
                .sum::<usize>()
    }
}

/// The whole folder hierarchy; the root node has an empty name and holds
/// records with no folder path
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FolderTree {
    pub root: FolderNode,
}

impl FolderTree {
    /// Build the tree from a document. Folders appear in first-encounter
    /// order; raw passthrough records are not points and are skipped.
    pub fn build(doc: &Document) -> Self {
        let mut root = FolderNode::default();

        for path in doc.folder_paths() {
            root.ensure_path(&split_path(&path));
        }

        for (index, record) in doc.records().iter().enumerate() {
            if record.as_spawn().is_none() {
                continue;
            }
            let node = root.ensure_path(&split_path(&record.path));
            node.points.push(index);
        }

        sort_points(&mut root, doc);
        Self { root }
    }

    /// Every folder path in the tree, pre-order
    pub fn folder_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        collect_paths(&self.root, &mut Vec::new(), &mut paths);
        paths
    }
}

fn sort_points(node: &mut FolderNode, doc: &Document) {
    node.points.sort_by_key(|&i| {
        doc.get(i)
            .map(|record| record.order)
            .unwrap_or(u32::MAX)
    });
    for child in &mut node.children {
        sort_points(child, doc);
    }
}

fn collect_paths(node: &FolderNode, prefix: &mut Vec<String>, out: &mut Vec<String>) {
    for child in &node.children {
        prefix.push(child.name.clone());
        out.push(prefix.join("/"));
        collect_paths(child, prefix, out);
        prefix.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_nested_tree() {
        let doc = Document::from_text(
            "\
# Base
bot spawn 1 Guard 0 0 0 0
## Roof
bot spawn 1 Sniper 1 0 0 0
# Field
bot spawn 1 Rifleman 2 0 0 0
bot spawn 1 Guard 3 0 0 0
",
        );
        let tree = FolderTree::build(&doc);
        assert_eq!(tree.root.children.len(), 2);

        let base = &tree.root.children[0];
        assert_eq!(base.name, "Base");
        assert_eq!(base.points, vec![0]);
        assert_eq!(base.children[0].name, "Roof");
        assert_eq!(base.children[0].points, vec![1]);
        assert_eq!(base.total_points(), 2);

        let field = &tree.root.children[1];
        assert_eq!(field.points, vec![2, 3]);
    }

    #[test]
    fn test_root_points_and_raw_skipped() {
        let doc = Document::from_text("bot spawn 1 Guard 0 0 0 0\n// note\n");
        let tree = FolderTree::build(&doc);
        assert_eq!(tree.root.points, vec![0]);
        assert!(tree.root.children.is_empty());
    }

    #[test]
    fn test_empty_folder_has_node() {
        let doc = Document::from_text("# Reserve\n# Base\nbot spawn 1 Guard 0 0 0 0\n");
        let tree = FolderTree::build(&doc);
        assert_eq!(tree.folder_paths(), vec!["Reserve", "Base"]);
        assert_eq!(tree.root.children[0].total_points(), 0);
    }

    #[test]
    fn test_points_follow_order_not_index() {
        let mut doc = Document::from_text(
            "# A\nbot spawn 1 Guard 0 0 0 0\nbot spawn 1 Guard 1 0 0 0\n",
        );
        doc.shift_in_folder(0, 1).unwrap();
        let tree = FolderTree::build(&doc);
        assert_eq!(tree.root.children[0].points, vec![1, 0]);
    }
}
