//! listing formatter: grid, one-per-line and long layouts

use crate::filter::{EntryFilter, ListItem};
use crate::style::{Category, RESET};
use crate::tree::Node;
use crate::utils::{display_width, human_size, mode_string, DEFAULT_WIDTH};
use std::cmp::Ordering;
use time::{Duration, PrimitiveDateTime};

/// spaces between grid columns
const COLUMN_GAP: usize = 2;
/// narrowest possible column: one character plus the gap
const MIN_COLUMN_WIDTH: usize = 1 + COLUMN_GAP;
/// timestamps closer to now than this show the time instead of the year
const RECENT: Duration = Duration::days(180);

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Name,
    /// newest first
    Time,
    /// largest first
    Size,
}

/// listing options, built from the command line
#[derive(Debug, Clone)]
pub struct ListOptions {
    pub long: bool,
    pub human_readable: bool,
    pub classify: bool,
    pub color: bool,
    pub one_per_line: bool,
    /// list directories themselves, not their contents
    pub directory: bool,
    /// show entries starting with `.`
    pub all: bool,
    pub hide_macosx: bool,
    pub sort: SortKey,
    pub reverse: bool,
    /// screen width for the grid layout
    pub width: usize,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            long: false,
            human_readable: false,
            classify: false,
            color: false,
            one_per_line: false,
            directory: false,
            all: false,
            hide_macosx: false,
            sort: SortKey::Name,
            reverse: false,
            width: DEFAULT_WIDTH,
        }
    }
}

impl ListOptions {
    pub fn entry_filter(&self) -> EntryFilter {
        EntryFilter {
            show_hidden: self.all,
            hide_macosx: self.hide_macosx,
        }
    }
}

/// a decorated name and its visible width
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub width: usize,
}

pub struct Formatter<'a> {
    options: &'a ListOptions,
    now: PrimitiveDateTime,
}

impl<'a> Formatter<'a> {
    pub fn new(options: &'a ListOptions, now: PrimitiveDateTime) -> Self {
        Self { options, now }
    }

    /// sort one group of items and render it into output lines
    pub fn render(&self, mut items: Vec<ListItem<'_>>) -> Vec<String> {
        sort_items(&mut items, self.options.sort, self.options.reverse);

        if self.options.long {
            return self.long_lines(&items);
        }

        let cells: Vec<Cell> = items.iter().map(|item| self.decorate(item)).collect();
        if self.options.one_per_line {
            cells.into_iter().map(|cell| cell.text).collect()
        } else {
            layout_grid(&cells, self.options.width)
        }
    }

    /// apply color and the `-F` indicator to a name
    pub fn decorate(&self, item: &ListItem<'_>) -> Cell {
        let category = Category::of(item.node);
        let mut width = display_width(&item.name);

        let mut text = match category.color().filter(|_| self.options.color) {
            Some(color) => format!("{color}{}{RESET}", item.name),
            None => item.name.clone(),
        };

        if self.options.classify {
            if let Some(indicator) = category.indicator() {
                text.push(indicator);
                width += 1;
            }
        }

        Cell { text, width }
    }

    fn size_field(&self, node: &Node) -> String {
        if self.options.human_readable {
            human_size(node.size)
        } else {
            node.size.to_string()
        }
    }

    fn long_lines(&self, items: &[ListItem<'_>]) -> Vec<String> {
        let sizes: Vec<String> = items.iter().map(|i| self.size_field(i.node)).collect();
        let size_width = sizes.iter().map(String::len).max().unwrap_or(0);

        items
            .iter()
            .zip(sizes)
            .map(|(item, size)| {
                format!(
                    "{} {:>size_width$} {} {}",
                    mode_string(item.node.kind, item.node.mode),
                    size,
                    format_mtime(item.node.modified, self.now),
                    self.decorate(item).text,
                )
            })
            .collect()
    }
}

/// order a group by the requested key, breaking ties by name
pub fn sort_items(items: &mut [ListItem<'_>], key: SortKey, reverse: bool) {
    items.sort_by(|a, b| {
        let primary = match key {
            SortKey::Name => Ordering::Equal,
            SortKey::Time => b.node.modified.cmp(&a.node.modified),
            SortKey::Size => b.node.size.cmp(&a.node.size),
        };
        primary.then_with(|| a.name.cmp(&b.name))
    });
    if reverse {
        items.reverse();
    }
}

/// `Mon dd HH:MM` for recent timestamps, `Mon dd  yyyy` otherwise
pub fn format_mtime(mtime: Option<PrimitiveDateTime>, now: PrimitiveDateTime) -> String {
    let Some(mtime) = mtime else {
        return format!("{:>12}", "?");
    };

    let month = MONTHS[usize::from(u8::from(mtime.month())) - 1];
    if (now - mtime).abs() < RECENT {
        format!(
            "{month} {:>2} {:02}:{:02}",
            mtime.day(),
            mtime.hour(),
            mtime.minute()
        )
    } else {
        format!("{month} {:>2}  {}", mtime.day(), mtime.year())
    }
}

/// lay cells out in columns, filled top to bottom, using as many columns as fit
pub fn layout_grid(cells: &[Cell], width: usize) -> Vec<String> {
    if cells.is_empty() {
        return Vec::new();
    }

    let max_cols = (width / MIN_COLUMN_WIDTH).clamp(1, cells.len());
    for cols in (1..=max_cols).rev() {
        let rows = cells.len().div_ceil(cols);
        let used = cells.len().div_ceil(rows);
        let widths: Vec<usize> = cells
            .chunks(rows)
            .map(|column| column.iter().map(|c| c.width).max().unwrap_or(0))
            .collect();
        let total = widths.iter().sum::<usize>() + COLUMN_GAP * (used - 1);

        if total <= width || cols == 1 {
            return render_rows(cells, rows, &widths);
        }
    }

    Vec::new()
}

fn render_rows(cells: &[Cell], rows: usize, widths: &[usize]) -> Vec<String> {
    (0..rows)
        .map(|row| {
            let mut line = String::new();
            for (col, col_width) in widths.iter().enumerate() {
                let Some(cell) = cells.get(col * rows + row) else {
                    break;
                };
                line.push_str(&cell.text);
                if (col + 1) * rows + row < cells.len() {
                    let pad = col_width + COLUMN_GAP - cell.width;
                    line.extend(std::iter::repeat(' ').take(pad));
                }
            }
            line
        })
        .collect()
}
