//! command line interface

use crate::format::{ListOptions, SortKey};
use crate::style::ColorChoice;
use crate::utils;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "zipls",
    version,
    about = "zipls: ls inside of a zip file",
    long_about = "List the contents of a zip archive like ls lists a directory, without extracting anything",
    disable_help_flag = true
)]
pub struct Cli {
    /// path to the zip file
    pub zipfile: PathBuf,

    /// paths inside the archive, relative to its top level (globs allowed)
    pub paths: Vec<String>,

    /// do not ignore entries starting with .
    #[arg(short, long)]
    pub all: bool,

    /// use a long listing format
    #[arg(short = 'l')]
    pub long: bool,

    /// with -l, print sizes like 1K 234M 2G
    #[arg(short = 'h', long)]
    pub human_readable: bool,

    /// list directories themselves, not their contents
    #[arg(short, long)]
    pub directory: bool,

    /// append indicator (one of */@) to entries
    #[arg(short = 'F', long)]
    pub classify: bool,

    /// colorize the output
    #[arg(
        long,
        value_enum,
        value_name = "WHEN",
        num_args = 0..=1,
        default_value = "never",
        default_missing_value = "always",
        require_equals = true
    )]
    pub color: ColorChoice,

    /// list one entry per line
    #[arg(short = '1')]
    pub one_per_line: bool,

    /// reverse order while sorting
    #[arg(short, long)]
    pub reverse: bool,

    /// sort by modification time, newest first
    #[arg(short = 't', overrides_with = "sort_size")]
    pub sort_time: bool,

    /// sort by file size, largest first
    #[arg(short = 'S', overrides_with = "sort_time")]
    pub sort_size: bool,

    /// assume screen width instead of the terminal's
    #[arg(short, long, value_name = "COLS")]
    pub width: Option<usize>,

    /// hide the Mac-specific top-level folder __MACOSX and its descendants
    #[arg(long, alias = "hide_macosx")]
    pub hide_macosx: bool,

    /// print diagnostics to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// print help
    #[arg(long, action = ArgAction::Help)]
    pub help: Option<bool>,
}

impl Cli {
    /// build listing options, resolving color and screen width against the environment
    pub fn list_options(&self) -> ListOptions {
        let sort = if self.sort_time {
            SortKey::Time
        } else if self.sort_size {
            SortKey::Size
        } else {
            SortKey::Name
        };

        ListOptions {
            long: self.long,
            human_readable: self.human_readable,
            classify: self.classify,
            color: self.color.enabled(),
            one_per_line: self.one_per_line,
            directory: self.directory,
            all: self.all,
            hide_macosx: self.hide_macosx,
            sort,
            reverse: self.reverse,
            width: self
                .width
                .filter(|&w| w > 0)
                .unwrap_or_else(utils::terminal_width),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_ls_style_flags() {
        let cli = Cli::try_parse_from(["zipls", "-lhaF", "archive.zip", "src", "*.md"])
            .expect("valid arguments");
        assert!(cli.long && cli.human_readable && cli.all && cli.classify);
        assert_eq!(cli.zipfile, PathBuf::from("archive.zip"));
        assert_eq!(cli.paths, vec!["src", "*.md"]);
        assert_eq!(cli.color, ColorChoice::Never);
    }

    #[test]
    fn test_color_values() {
        let bare = Cli::try_parse_from(["zipls", "--color", "a.zip"]).expect("valid");
        assert_eq!(bare.color, ColorChoice::Always);
        assert_eq!(bare.paths, Vec::<String>::new());

        let never = Cli::try_parse_from(["zipls", "--color=never", "a.zip"]).expect("valid");
        assert_eq!(never.color, ColorChoice::Never);

        let auto = Cli::try_parse_from(["zipls", "--color=auto", "a.zip"]).expect("valid");
        assert_eq!(auto.color, ColorChoice::Auto);

        assert!(Cli::try_parse_from(["zipls", "--color=sometimes", "a.zip"]).is_err());
    }

    #[test]
    fn test_list_options_conversion() {
        let cli = Cli::try_parse_from(["zipls", "-1rS", "-w", "40", "--color=always", "a.zip"])
            .expect("valid");
        let options = cli.list_options();
        assert!(options.one_per_line);
        assert!(options.reverse);
        assert!(options.color);
        assert_eq!(options.sort, SortKey::Size);
        assert_eq!(options.width, 40);
    }

    #[test]
    fn test_last_sort_flag_wins() {
        let cli = Cli::try_parse_from(["zipls", "-S", "-t", "a.zip"]).expect("valid");
        assert_eq!(cli.list_options().sort, SortKey::Time);
    }

    #[test]
    fn test_hide_macosx_spellings() {
        for flag in ["--hide-macosx", "--hide_macosx"] {
            let cli = Cli::try_parse_from(["zipls", flag, "a.zip"]).expect("valid");
            assert!(cli.hide_macosx);
            assert!(cli.list_options().hide_macosx);
        }
    }

    #[test]
    fn test_missing_zipfile_is_error() {
        assert!(Cli::try_parse_from(["zipls"]).is_err());
    }
}
