//! Mapping between the store and the on-disk document

use crate::{AppError, BookmarkEntry, BookmarkStore, DisplayMode, GroupFilter, ViewState};
use app_fs::{AssetRef, AssetResolver};
use app_persist::{decode_document, encode_document, PersistedDocument, PersistedEntry};

/// Build the document for the current store and view
///
/// Paths are taken from the live handles when they still resolve, so the
/// document records where assets are now, not where they were bookmarked.
pub fn to_document(store: &BookmarkStore, view: &ViewState, resolver: &dyn AssetResolver) -> PersistedDocument {
    let list = store
        .entries()
        .iter()
        .map(|entry| {
            let asset_path = entry
                .asset
                .handle()
                .and_then(|h| resolver.path_of(h))
                .unwrap_or_else(|| entry.asset.path().to_string());
            PersistedEntry {
                name: entry.display_name.clone(),
                asset_path,
                group: entry.group.clone(),
            }
        })
        .collect();

    PersistedDocument {
        list,
        custom_groups: store.groups().to_vec(),
        display_mode: view.display_mode.as_str().to_string(),
        filter_group: Some(view.group_filter.to_token()),
        filter_type_name: view
            .type_filter
            .as_ref()
            .map(|t| t.as_str().to_string())
            .unwrap_or_default(),
    }
}

/// Rebuild store and view from a document, resolving every asset path
///
/// Paths that no longer resolve are kept verbatim on a missing reference.
pub fn from_document(doc: PersistedDocument, resolver: &dyn AssetResolver) -> (BookmarkStore, ViewState) {
    let mut missing = 0;

    let entries = doc
        .list
        .into_iter()
        .map(|stored| {
            let asset = match resolver.resolve(&stored.asset_path) {
                Some(handle) => AssetRef::resolved(stored.asset_path, handle),
                None => {
                    missing += 1;
                    AssetRef::missing(stored.asset_path)
                }
            };
            let name = match (stored.name.is_empty(), asset.handle()) {
                (true, Some(handle)) => handle.name().to_string(),
                _ => stored.name,
            };
            BookmarkEntry::new(name, asset, stored.group)
        })
        .collect::<Vec<_>>();

    if missing > 0 {
        tracing::warn!("{} bookmarked assets could not be resolved", missing);
    }

    let view = ViewState {
        display_mode: DisplayMode::parse(&doc.display_mode).unwrap_or_default(),
        group_filter: GroupFilter::from_token(doc.filter_group.as_deref()),
        type_filter: resolver.kinds().parse_filter(&doc.filter_type_name),
    };

    (BookmarkStore::from_parts(entries, doc.custom_groups), view)
}

/// Serialize store and view to compressed bytes
pub fn encode(store: &BookmarkStore, view: &ViewState, resolver: &dyn AssetResolver) -> Result<Vec<u8>, AppError> {
    Ok(encode_document(&to_document(store, view, resolver))?)
}

/// Parse compressed bytes into a store and view
///
/// Fails with `AppError::CorruptData` when the bytes are not a valid document.
pub fn decode(bytes: &[u8], resolver: &dyn AssetResolver) -> Result<(BookmarkStore, ViewState), AppError> {
    let doc = decode_document(bytes)?;
    Ok(from_document(doc, resolver))
}
