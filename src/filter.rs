//! entry filtering, glob expansion and pathspec resolution

use crate::tree::{join_path, ArchiveTree, Node};
use glob::{MatchOptions, Pattern};

/// folder created by the macOS Finder when compressing, holding resource forks
pub const MACOSX_DIR: &str = "__MACOSX";

const GLOB_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct EntryFilter {
    /// show names starting with `.`
    pub show_hidden: bool,
    /// drop the top-level `__MACOSX` folder and its descendants
    pub hide_macosx: bool,
}

impl EntryFilter {
    /// check if an archive entry should be indexed at all
    pub fn should_include_entry(&self, path: &str) -> bool {
        if !self.hide_macosx {
            return true;
        }
        match path.strip_prefix(MACOSX_DIR) {
            Some(rest) => !(rest.is_empty() || rest.starts_with('/')),
            None => true,
        }
    }

    /// check if a child shows up when its directory is listed
    pub fn should_show_child(&self, name: &str) -> bool {
        self.show_hidden || !name.starts_with('.')
    }
}

/// an entry ready for display
#[derive(Debug, Clone)]
pub struct ListItem<'a> {
    /// name relative to the listed directory, or the pathspec itself
    pub name: String,
    pub node: &'a Node,
}

/// outcome of looking up one pathspec
#[derive(Debug)]
pub enum Resolved<'a> {
    Missing,
    /// a file, or a directory listed as itself (`-d`)
    Entry(ListItem<'a>),
    /// the visible children of a directory
    Directory(Vec<ListItem<'a>>),
}

/// check if a path component contains glob wildcards
pub fn has_wildcards(component: &str) -> bool {
    if component.contains('*') || component.contains('?') {
        return true;
    }
    // a class needs at least one character between the brackets
    match component.find('[') {
        Some(open) => component[open + 1..]
            .find(']')
            .is_some_and(|close| close > 0),
        None => false,
    }
}

/// normalize a user supplied path inside the archive; `""` is the root
pub fn normalize_pathspec(spec: &str) -> String {
    spec.split('/')
        .filter(|part| !part.is_empty() && *part != ".")
        .collect::<Vec<_>>()
        .join("/")
}

/// expand wildcards in a pathspec to the matching archive paths
///
/// Components are matched one at a time so `*` never crosses a `/`. When nothing
/// matches, the pathspec is returned unchanged so it reports as missing later.
pub fn expand(tree: &ArchiveTree, pathspec: &str) -> Vec<String> {
    let parts: Vec<&str> = pathspec.split('/').filter(|p| !p.is_empty()).collect();
    let mut matches = Vec::new();
    expand_into(tree, String::new(), &parts, &mut matches);
    if matches.is_empty() {
        matches.push(pathspec.to_string());
    }
    matches
}

/// `base` is an already resolved path, `rest` the components still to match
fn expand_into(tree: &ArchiveTree, mut base: String, mut rest: &[&str], out: &mut Vec<String>) {
    while let Some((first, tail)) = rest.split_first() {
        if has_wildcards(first) {
            break;
        }
        base = join_path(&base, first);
        rest = tail;
    }

    if tree.get(&base).is_none() {
        return;
    }
    let Some((glob_part, tail)) = rest.split_first() else {
        out.push(base);
        return;
    };

    // unparseable patterns match literally
    let pattern = Pattern::new(glob_part).or_else(|_| Pattern::new(&Pattern::escape(glob_part)));
    let Ok(pattern) = pattern else {
        return;
    };
    let Some(children) = tree.children(&base) else {
        return;
    };
    let matched: Vec<String> = children
        .filter(|child| pattern.matches_with(child, GLOB_OPTIONS))
        .map(|child| join_path(&base, child))
        .collect();

    for child_path in matched {
        expand_into(tree, child_path, tail, out);
    }
}

/// look up one literal pathspec and collect what should be displayed for it
pub fn resolve<'a>(
    tree: &'a ArchiveTree,
    pathspec: &str,
    filter: &EntryFilter,
    list_directory_itself: bool,
) -> Resolved<'a> {
    let Some(node) = tree.get(pathspec) else {
        return Resolved::Missing;
    };

    match tree.children(pathspec) {
        Some(children) if !list_directory_itself => {
            let items = children
                .filter(|name| filter.should_show_child(name))
                .filter_map(|name| {
                    tree.get(&join_path(pathspec, name)).map(|node| ListItem {
                        name: name.to_string(),
                        node,
                    })
                })
                .collect();
            Resolved::Directory(items)
        }
        _ => Resolved::Entry(ListItem {
            name: display_path(pathspec).to_string(),
            node,
        }),
    }
}

/// how a pathspec is shown in headers and `-d` listings
pub fn display_path(pathspec: &str) -> &str {
    if pathspec.is_empty() {
        "."
    } else {
        pathspec
    }
}
