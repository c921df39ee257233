//! Subcommand handlers
//!
//! Every handler turns its arguments into `BookmarkCommand`s for the session
//! and prints the result. Saving is left to the caller.

use crate::cli::{Command, GroupAction, ListArgs};
use anyhow::{bail, Result};
use app_core::{
    visible_entries, AppError, BookmarkCommand, BookmarkSession, DisplayMode, FilterView,
    GroupFilter, VisibleEntry,
};
use app_fs::{AssetRef, AssetResolver, ProjectResolver};
use std::io::Write;
use std::path::Path;

type Session = BookmarkSession<ProjectResolver>;

pub fn run<W: Write>(command: Command, session: &mut Session, out: &mut W) -> Result<()> {
    match command {
        Command::List(args) => list(args, session, out),
        Command::Add { paths, group } => add(&paths, &group, session, out),
        Command::Remove { index } => remove(index, session, out),
        Command::Assign { path, group } => assign(&path, &group, session, out),
        Command::Move { from, to } => move_entry(from, to, session, out),
        Command::Group { action } => group(action, session, out),
        Command::Missing { relink } => missing(relink, session, out),
        Command::Status => status(session, out),
    }
}

fn list<W: Write>(args: ListArgs, session: &Session, out: &mut W) -> Result<()> {
    let kinds = session.resolver().kinds();
    let mut view = session.view().clone();

    if let Some(group) = args.group {
        view.group_filter = GroupFilter::Named(group);
    }
    if args.ungrouped {
        view.group_filter = GroupFilter::Ungrouped;
    }
    if let Some(kind) = args.kind {
        let Some(tag) = kinds.parse_filter(&kind) else {
            bail!("Empty type filter");
        };
        if &tag != kinds.root() && !kinds.kinds().any(|k| k == &tag) {
            bail!("Unknown asset type {:?}", kind);
        }
        view.type_filter = Some(tag);
    }
    if args.grouped {
        view.display_mode = DisplayMode::Grouped;
    }

    match visible_entries(session.store(), &view, kinds) {
        FilterView::Flat(entries) => {
            if entries.is_empty() {
                writeln!(out, "No bookmarks")?;
            }
            for entry in &entries {
                write_entry(out, entry)?;
            }
        }
        FilterView::Grouped(sections) => {
            for section in &sections {
                writeln!(out, "== {} ({}) ==", section.key, section.entries.len())?;
                for entry in &section.entries {
                    write_entry(out, entry)?;
                }
            }
        }
    }
    Ok(())
}

fn write_entry<W: Write>(out: &mut W, visible: &VisibleEntry<'_>) -> Result<()> {
    let entry = visible.entry;
    write!(out, "{:>4}  {}  {}", visible.index, entry.display_name, entry.asset.path())?;
    if !entry.is_ungrouped() {
        write!(out, "  [{}]", entry.group)?;
    }
    if entry.asset.is_missing() {
        write!(out, "  (missing)")?;
    }
    writeln!(out)?;
    Ok(())
}

fn add<W: Write>(paths: &[std::path::PathBuf], group: &str, session: &mut Session, out: &mut W) -> Result<()> {
    require_group(session, group)?;

    let mut assets = Vec::with_capacity(paths.len());
    for path in paths {
        match resolve(session, path) {
            Ok(asset) => assets.push(asset),
            Err(e) => writeln!(out, "Skipped {}: {}", path.display(), e)?,
        }
    }

    let before = session.store().len();
    let after = session
        .dispatch(BookmarkCommand::AddMany { assets, group: group.to_string() })
        .len();
    writeln!(out, "Added {} bookmarks", after - before)?;
    Ok(())
}

fn remove<W: Write>(index: usize, session: &mut Session, out: &mut W) -> Result<()> {
    let Some(entry) = session.store().get(index) else {
        bail!("No bookmark at index {}", index);
    };
    let name = entry.display_name.clone();

    session.dispatch(BookmarkCommand::RemoveAt { index });
    writeln!(out, "Removed {}", name)?;
    Ok(())
}

fn assign<W: Write>(path: &Path, group: &str, session: &mut Session, out: &mut W) -> Result<()> {
    require_group(session, group)?;
    let asset = resolve(session, path)?;
    let name = asset.handle().map(|h| h.name().to_string()).unwrap_or_default();

    session.dispatch(BookmarkCommand::AssignGroup { asset, group: group.to_string() });
    if group.is_empty() {
        writeln!(out, "{} is ungrouped", name)?;
    } else {
        writeln!(out, "{} is in {}", name, group)?;
    }
    Ok(())
}

fn move_entry<W: Write>(from: usize, to: usize, session: &mut Session, out: &mut W) -> Result<()> {
    let len = session.store().len();
    if from >= len || to >= len {
        bail!("Index out of range, there are {} bookmarks", len);
    }

    session.dispatch(BookmarkCommand::Reorder { from: Some(from), to: Some(to) });
    writeln!(out, "Moved bookmark {} to {}", from, to)?;
    Ok(())
}

fn group<W: Write>(action: GroupAction, session: &mut Session, out: &mut W) -> Result<()> {
    let (cmd, done) = match action {
        GroupAction::List => {
            let store = session.store();
            writeln!(out, "  -  Ungrouped ({})", store.group_member_count(""))?;
            for (i, name) in store.groups().iter().enumerate() {
                writeln!(out, "{:>3}  {} ({})", i, name, store.group_member_count(name))?;
            }
            return Ok(());
        }
        GroupAction::Add { name } => {
            let done = format!("Created group {}", name);
            (BookmarkCommand::AddGroup { name }, done)
        }
        GroupAction::Rename { old, new } => {
            let done = format!("Renamed {} to {}", old, new.trim());
            (BookmarkCommand::RenameGroup { old, new }, done)
        }
        GroupAction::Delete { name, yes } => {
            // Members of a group missing from the group list are ungrouped too
            let members = session.store().group_member_count(&name);
            if members > 0 && !yes {
                bail!(
                    "Group {:?} has {} bookmarks, pass --yes to delete it and ungroup them",
                    name,
                    members
                );
            }
            let done = format!("Deleted group {}", name);
            (BookmarkCommand::DeleteGroup { name }, done)
        }
        GroupAction::Move { from, to } => {
            let done = format!("Moved group {} to {}", from, to);
            (BookmarkCommand::ReorderGroup { from: Some(from), to: Some(to) }, done)
        }
    };

    let id = cmd.id();
    if !session.execute(cmd) {
        bail!("Nothing changed ({}): the group name is blank, reserved, taken or unknown", id);
    }
    writeln!(out, "{}", done)?;
    Ok(())
}

fn missing<W: Write>(relink: bool, session: &mut Session, out: &mut W) -> Result<()> {
    if relink {
        let relinked = session.relink_missing();
        writeln!(out, "Relinked {} bookmarks", relinked)?;
    }

    let mut count = 0;
    for (index, entry) in session.store().missing_entries() {
        writeln!(out, "{:>4}  {}  {}", index, entry.display_name, entry.asset.path())?;
        count += 1;
    }
    if count == 0 {
        writeln!(out, "No missing assets")?;
    }
    Ok(())
}

fn status<W: Write>(session: &Session, out: &mut W) -> Result<()> {
    let store = session.store();
    let view = session.view();

    writeln!(out, "{}", session.title())?;
    writeln!(out, "File:      {}", session.file().path().display())?;
    writeln!(out, "Project:   {}", session.resolver().root().display())?;
    writeln!(out, "Bookmarks: {}", store.len())?;
    writeln!(out, "Groups:    {}", store.groups().len())?;
    writeln!(out, "Missing:   {}", store.missing_entries().count())?;
    writeln!(
        out,
        "View:      {}, group {}, type {}",
        view.display_mode.as_str(),
        view.group_filter,
        view.type_filter.as_ref().map(|t| t.as_str()).unwrap_or("any")
    )?;
    Ok(())
}

fn resolve(session: &Session, path: &Path) -> Result<AssetRef> {
    let (relative, handle) = session
        .resolver()
        .resolve_user_path(path)
        .map_err(|e| anyhow::anyhow!(AppError::from(e).user_message()))?;
    Ok(AssetRef::resolved(relative, handle))
}

/// Only existing custom groups (or none) can be assigned from the command line
fn require_group(session: &Session, group: &str) -> Result<()> {
    if !group.is_empty() && !session.store().has_group(group) {
        bail!("Unknown group {:?}, create it with `group add`", group);
    }
    Ok(())
}
