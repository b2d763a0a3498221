//! utility functions for size, permission and width formatting

use crate::tree::EntryKind;
use unicode_width::UnicodeWidthStr;

/// screen width used when nothing else is known
pub const DEFAULT_WIDTH: usize = 80;

/// format bytes the way `ls -h` does: powers of 1024, rounded up
pub fn human_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["K", "M", "G", "T", "P", "E"];

    if bytes < 1024 {
        return bytes.to_string();
    }

    let mut size = bytes as f64 / 1024.0;
    let mut unit_index = 0;
    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if size < 10.0 {
        let rounded = (size * 10.0).ceil() / 10.0;
        if rounded < 10.0 {
            return format!("{:.1}{}", rounded, UNITS[unit_index]);
        }
        return format!("{:.0}{}", rounded, UNITS[unit_index]);
    }

    let rounded = size.ceil();
    if rounded >= 1024.0 && unit_index < UNITS.len() - 1 {
        return format!("1.0{}", UNITS[unit_index + 1]);
    }
    format!("{:.0}{}", rounded, UNITS[unit_index])
}

/// render type and permission bits like `drwxr-xr-x`
pub fn mode_string(kind: EntryKind, mode: u32) -> String {
    let mut out = String::with_capacity(10);
    out.push(match kind {
        EntryKind::Directory => 'd',
        EntryKind::Symlink => 'l',
        EntryKind::File => '-',
    });

    // (shift, special bit, special char when executable)
    let triads = [(6, 0o4000, 's'), (3, 0o2000, 's'), (0, 0o1000, 't')];
    for (shift, special, special_char) in triads {
        let bits = (mode >> shift) & 0o7;
        out.push(if bits & 4 != 0 { 'r' } else { '-' });
        out.push(if bits & 2 != 0 { 'w' } else { '-' });
        let exec = bits & 1 != 0;
        out.push(match (mode & special != 0, exec) {
            (true, true) => special_char,
            (true, false) => special_char.to_ascii_uppercase(),
            (false, true) => 'x',
            (false, false) => '-',
        });
    }

    out
}

/// columns available for output: `COLUMNS`, then the terminal, then 80
pub fn terminal_width() -> usize {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|cols| cols.trim().parse::<usize>().ok())
        .filter(|&cols| cols > 0)
        .or_else(|| term_size::dimensions().map(|(w, _)| w))
        .unwrap_or(DEFAULT_WIDTH)
}

/// number of terminal cells a string occupies
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}
