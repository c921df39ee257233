//! CLI schema for the bookmark_tool binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "bookmark_tool")]
#[command(about = "Bookmark project assets and organize them into groups")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
    /// Configuration file (defaults to the user config directory)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Bookmark file to read and write
    #[arg(long, global = true, value_name = "FILE")]
    pub data_file: Option<PathBuf>,

    /// Project directory asset paths are relative to
    #[arg(long, global = true, value_name = "DIR")]
    pub project: Option<PathBuf>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show bookmarks, newest first
    List(ListArgs),
    /// Bookmark assets
    Add {
        /// Asset paths, absolute or relative to the project
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Group for the new bookmarks
        #[arg(long, short = 'g', default_value = "")]
        group: String,
    },
    /// Remove the bookmark at a store index
    Remove {
        index: usize,
    },
    /// Put an asset into a group, bookmarking it if needed (omit GROUP to ungroup)
    Assign {
        path: PathBuf,
        #[arg(default_value = "")]
        group: String,
    },
    /// Move a bookmark to another store index
    Move {
        from: usize,
        to: usize,
    },
    /// Manage custom groups
    Group {
        /// Group subcommand action.
        #[command(subcommand)]
        action: GroupAction,
    },
    /// Show bookmarks whose asset no longer exists
    Missing {
        /// Try to resolve them again first
        #[arg(long)]
        relink: bool,
    },
    /// Show a summary of the bookmark file
    Status,
}

/// Filters for `list`; they apply to this listing only.
#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Only bookmarks in this group
    #[arg(long, short = 'g', conflicts_with = "ungrouped")]
    pub group: Option<String>,

    /// Only bookmarks without a group
    #[arg(long)]
    pub ungrouped: bool,

    /// Only assets of this kind or a subtype (e.g. Texture, Prefab)
    #[arg(long = "type", short = 't', value_name = "KIND")]
    pub kind: Option<String>,

    /// One section per group
    #[arg(long)]
    pub grouped: bool,
}

/// Group management subcommands.
#[derive(Subcommand, Debug)]
pub enum GroupAction {
    /// List custom groups with their member counts
    List,
    /// Create a group
    Add { name: String },
    /// Rename a group and move its members along
    Rename { old: String, new: String },
    /// Delete a group; members become ungrouped
    Delete {
        name: String,
        /// Confirm deleting a group that still has members
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Move a group to another position
    Move { from: usize, to: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("bookmark_tool").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_list_filters() {
        let cli = parse(&["list", "--group", "Characters", "--type", "Prefab", "--grouped"]);
        let Command::List(args) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(args.group.as_deref(), Some("Characters"));
        assert_eq!(args.kind.as_deref(), Some("Prefab"));
        assert!(args.grouped);
        assert!(!args.ungrouped);
    }

    #[test]
    fn test_group_and_ungrouped_conflict() {
        let result = Cli::try_parse_from(["bookmark_tool", "list", "--group", "a", "--ungrouped"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_assign_without_group_ungroups() {
        let cli = parse(&["assign", "Assets/A.prefab"]);
        let Command::Assign { group, .. } = cli.command else {
            panic!("expected assign");
        };
        assert_eq!(group, "");
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = parse(&["status", "--data-file", "/tmp/b.json.gz", "--project", "/tmp/p"]);
        assert_eq!(cli.data_file, Some(PathBuf::from("/tmp/b.json.gz")));
        assert_eq!(cli.project, Some(PathBuf::from("/tmp/p")));
        assert!(matches!(cli.command, Command::Status));
    }

    #[test]
    fn test_add_requires_paths() {
        assert!(Cli::try_parse_from(["bookmark_tool", "add"]).is_err());
        let cli = parse(&["add", "a.png", "b.png", "-g", "Textures"]);
        let Command::Add { paths, group } = cli.command else {
            panic!("expected add");
        };
        assert_eq!(paths.len(), 2);
        assert_eq!(group, "Textures");
    }
}
