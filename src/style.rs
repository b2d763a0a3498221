//! color and type indicator lookup

use crate::tree::{EntryKind, Node};
use clap::ValueEnum;
use std::io::IsTerminal;

pub const RESET: &str = "\x1b[0m";

/// display category of an entry, decides color and `-F` indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Directory,
    Executable,
    Symlink,
    Regular,
}

impl Category {
    pub fn of(node: &Node) -> Self {
        match node.kind {
            EntryKind::Directory => Category::Directory,
            EntryKind::Symlink => Category::Symlink,
            EntryKind::File if node.mode & 0o100 != 0 => Category::Executable,
            EntryKind::File => Category::Regular,
        }
    }

    /// escape sequence starting this category's color, matching the dircolors defaults
    pub fn color(self) -> Option<&'static str> {
        match self {
            Category::Directory => Some("\x1b[01;34m"),
            Category::Executable => Some("\x1b[01;32m"),
            Category::Symlink => Some("\x1b[01;36m"),
            Category::Regular => None,
        }
    }

    /// suffix appended with `-F`
    pub fn indicator(self) -> Option<char> {
        match self {
            Category::Directory => Some('/'),
            Category::Executable => Some('*'),
            Category::Symlink => Some('@'),
            Category::Regular => None,
        }
    }
}

/// when to colorize output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    Always,
    Auto,
    #[default]
    Never,
}

impl ColorChoice {
    pub fn enabled(self) -> bool {
        match self {
            ColorChoice::Always => true,
            ColorChoice::Auto => std::io::stdout().is_terminal(),
            ColorChoice::Never => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::ArchiveEntry;
    use crate::filter::EntryFilter;
    use crate::tree::ArchiveTree;

    fn node_for(name: &str, mode: u32, is_dir: bool) -> Category {
        let tree = ArchiveTree::build(
            vec![ArchiveEntry {
                name: name.to_string(),
                size: 0,
                compressed_size: 0,
                modified: None,
                mode: Some(mode),
                is_dir,
            }],
            &EntryFilter::default(),
        );
        Category::of(tree.get(name).expect("node exists"))
    }

    #[test]
    fn test_categories() {
        assert_eq!(node_for("dir", 0o40755, true), Category::Directory);
        assert_eq!(node_for("run.sh", 0o100755, false), Category::Executable);
        assert_eq!(node_for("group_exec", 0o100654, false), Category::Regular);
        assert_eq!(node_for("link", 0o120777, false), Category::Symlink);
        assert_eq!(node_for("notes.txt", 0o100644, false), Category::Regular);
    }

    #[test]
    fn test_indicators_and_colors() {
        assert_eq!(Category::Directory.indicator(), Some('/'));
        assert_eq!(Category::Executable.indicator(), Some('*'));
        assert_eq!(Category::Symlink.indicator(), Some('@'));
        assert_eq!(Category::Regular.indicator(), None);

        assert_eq!(Category::Directory.color(), Some("\x1b[01;34m"));
        assert!(Category::Regular.color().is_none());
    }

    #[test]
    fn test_color_choice() {
        assert!(ColorChoice::Always.enabled());
        assert!(!ColorChoice::Never.enabled());
        assert_eq!(ColorChoice::default(), ColorChoice::Never);
    }
}
