//! in-memory directory tree of archive entries

use crate::archive::ArchiveEntry;
use crate::filter::EntryFilter;
use std::collections::{BTreeSet, HashMap};
use time::PrimitiveDateTime;

const S_IFMT: u32 = 0o170000;
const S_IFLNK: u32 = 0o120000;
const DEFAULT_DIR_MODE: u32 = 0o755;
const DEFAULT_FILE_MODE: u32 = 0o644;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    Symlink,
}

#[derive(Debug, Clone)]
pub struct Node {
    pub kind: EntryKind,
    pub size: u64,
    pub compressed_size: u64,
    pub modified: Option<PrimitiveDateTime>,
    /// permission bits, including setuid/setgid/sticky
    pub mode: u32,
    /// directory with no entry of its own, only known through its descendants
    pub implicit: bool,
    children: Option<BTreeSet<String>>,
}

impl Node {
    fn from_entry(entry: &ArchiveEntry) -> Self {
        let kind = if entry.is_dir {
            EntryKind::Directory
        } else if entry.mode.is_some_and(|m| m & S_IFMT == S_IFLNK) {
            EntryKind::Symlink
        } else {
            EntryKind::File
        };
        let mode = match (entry.mode, kind) {
            (Some(m), _) => m & 0o7777,
            (None, EntryKind::Directory) => DEFAULT_DIR_MODE,
            (None, _) => DEFAULT_FILE_MODE,
        };

        Self {
            kind,
            size: entry.size,
            compressed_size: entry.compressed_size,
            modified: entry.modified,
            mode,
            implicit: false,
            children: (kind == EntryKind::Directory).then(BTreeSet::new),
        }
    }

    fn placeholder(modified: Option<PrimitiveDateTime>) -> Self {
        Self {
            kind: EntryKind::Directory,
            size: 0,
            compressed_size: 0,
            modified,
            mode: DEFAULT_DIR_MODE,
            implicit: true,
            children: Some(BTreeSet::new()),
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// index of every path in the archive, rooted at `""`
#[derive(Debug)]
pub struct ArchiveTree {
    nodes: HashMap<String, Node>,
}

impl Default for ArchiveTree {
    fn default() -> Self {
        let mut nodes = HashMap::new();
        let mut root = Node::placeholder(None);
        root.implicit = false;
        nodes.insert(String::new(), root);
        Self { nodes }
    }
}

impl ArchiveTree {
    /// build the tree from central directory records, skipping filtered entries
    pub fn build(entries: impl IntoIterator<Item = ArchiveEntry>, filter: &EntryFilter) -> Self {
        let mut tree = Self::default();
        for entry in entries {
            if filter.should_include_entry(&entry.name) {
                tree.insert(&entry);
            }
        }
        tree
    }

    fn insert(&mut self, entry: &ArchiveEntry) {
        let (parent, leaf) = split_parent(&entry.name);
        self.ensure_dir(parent, entry.modified);

        let node = Node::from_entry(entry);
        match self.nodes.get_mut(&entry.name) {
            Some(existing) if existing.is_dir() => {
                // keep the children collected so far
                if node.is_dir() {
                    let children = existing.children.take();
                    *existing = Node { children, ..node };
                }
            }
            Some(existing) => *existing = node,
            None => {
                self.nodes.insert(entry.name.clone(), node);
            }
        }

        self.link_child(parent, leaf);
    }

    /// make sure `path` and all its ancestors exist as directories
    fn ensure_dir(&mut self, path: &str, modified: Option<PrimitiveDateTime>) {
        if self.nodes.get(path).is_some_and(Node::is_dir) {
            return;
        }
        if !path.is_empty() {
            let (parent, leaf) = split_parent(path);
            self.ensure_dir(parent, modified);
            self.link_child(parent, leaf);
        }
        self.nodes.insert(path.to_string(), Node::placeholder(modified));
    }

    fn link_child(&mut self, parent: &str, leaf: &str) {
        if let Some(children) = self.nodes.get_mut(parent).and_then(|n| n.children.as_mut()) {
            children.insert(leaf.to_string());
        }
    }

    pub fn get(&self, path: &str) -> Option<&Node> {
        self.nodes.get(path)
    }

    pub fn is_dir(&self, path: &str) -> bool {
        self.get(path).is_some_and(Node::is_dir)
    }

    /// child names of a directory, sorted; `None` if `path` is not a directory
    pub fn children(&self, path: &str) -> Option<impl Iterator<Item = &str>> {
        self.get(path)
            .and_then(|n| n.children.as_ref())
            .map(|c| c.iter().map(String::as_str))
    }

    /// number of indexed paths, not counting the root
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// join two path parts, skipping an empty parent
pub fn join_path(parent: &str, leaf: &str) -> String {
    if parent.is_empty() {
        leaf.to_string()
    } else {
        format!("{parent}/{leaf}")
    }
}

fn split_parent(path: &str) -> (&str, &str) {
    path.rsplit_once('/').unwrap_or(("", path))
}
