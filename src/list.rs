//! archive listing functionality

use crate::archive::{self, ArchiveEntry};
use crate::filter::{self, ListItem, Resolved};
use crate::format::{Formatter, ListOptions};
use crate::tree::ArchiveTree;
use crate::utils::human_size;
use crate::Result;
use std::io::{self, Write};
use std::path::Path;
use time::{OffsetDateTime, PrimitiveDateTime};

/// what happened while listing
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ListSummary {
    /// pathspecs that matched nothing in the archive
    pub missing: usize,
}

/// list the contents of a zip archive on stdout, problems on stderr
pub fn list(
    archive_path: &Path,
    pathspecs: &[String],
    options: &ListOptions,
    verbose: bool,
) -> Result<ListSummary> {
    if verbose {
        eprintln!("listing contents of {}", archive_path.display());
    }

    let entries = archive::read_entries(archive_path)?;
    if verbose {
        log_totals(&entries);
    }

    let tree = ArchiveTree::build(entries, &options.entry_filter());
    let stdout = io::stdout();
    let stderr = io::stderr();
    let mut out = stdout.lock();
    let mut err = stderr.lock();

    let summary = render_listing(
        &tree,
        pathspecs,
        options,
        local_now(),
        verbose,
        &mut out,
        &mut err,
    )?;
    out.flush()?;
    Ok(summary)
}

/// write the listing for `pathspecs` in `ls` order
///
/// Missing paths are reported first, then every non-directory operand as one group,
/// then one group per directory operand.
pub fn render_listing<W: Write, E: Write>(
    tree: &ArchiveTree,
    pathspecs: &[String],
    options: &ListOptions,
    now: PrimitiveDateTime,
    verbose: bool,
    out: &mut W,
    err: &mut E,
) -> Result<ListSummary> {
    let filter = options.entry_filter();
    let formatter = Formatter::new(options, now);

    let specs: Vec<String> = if pathspecs.is_empty() {
        vec![String::new()]
    } else {
        pathspecs
            .iter()
            .map(|spec| filter::normalize_pathspec(spec))
            .collect()
    };

    let mut operands = Vec::new();
    for spec in &specs {
        let expanded = filter::expand(tree, spec);
        if verbose && filter::has_wildcards(spec) {
            eprintln!("expanded '{}' to {} path(s)", spec, expanded.len());
        }
        operands.extend(expanded);
    }

    let mut summary = ListSummary::default();
    let mut files: Vec<ListItem<'_>> = Vec::new();
    let mut directories: Vec<(String, Vec<ListItem<'_>>)> = Vec::new();

    for operand in &operands {
        match filter::resolve(tree, operand, &filter, options.directory) {
            Resolved::Missing => {
                summary.missing += 1;
                writeln!(
                    err,
                    "zipls: cannot access '{}': No such file or directory",
                    operand
                )?;
            }
            Resolved::Entry(item) => files.push(item),
            Resolved::Directory(items) => directories.push((operand.clone(), items)),
        }
    }

    let mut wrote_output = false;
    if !files.is_empty() {
        write_lines(out, formatter.render(files))?;
        wrote_output = true;
    }

    let show_headers = operands.len() > 1;
    directories.sort_by(|a, b| a.0.cmp(&b.0));
    for (path, items) in directories {
        if wrote_output {
            writeln!(out)?;
        }
        if show_headers {
            writeln!(out, "{}:", filter::display_path(&path))?;
        }
        write_lines(out, formatter.render(items))?;
        wrote_output = true;
    }

    Ok(summary)
}

fn write_lines<W: Write>(out: &mut W, lines: Vec<String>) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

fn log_totals(entries: &[ArchiveEntry]) {
    let (size, compressed) = total_sizes(entries);
    eprintln!(
        "read {} entries ({}, {} compressed)",
        entries.len(),
        human_size(size),
        human_size(compressed)
    );
}

/// uncompressed and compressed totals, saturating on absurd declared sizes
fn total_sizes(entries: &[ArchiveEntry]) -> (u64, u64) {
    entries.iter().fold((0u64, 0u64), |(size, compressed), e| {
        (
            size.saturating_add(e.size),
            compressed.saturating_add(e.compressed_size),
        )
    })
}

/// current wall-clock time, archive timestamps are local time as well
fn local_now() -> PrimitiveDateTime {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    PrimitiveDateTime::new(now.date(), now.time())
}
