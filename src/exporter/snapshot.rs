//! Collection snapshot: fetch and export-map construction
//!
//! One fetch is one point-in-time snapshot. The whole collection is loaded
//! into memory before anything is written; there is no pagination or
//! streaming, so a very large collection is bounded by available RAM. This
//! keeps the output a single consistent snapshot rather than an
//! incrementally-consistent stream.

use futures::TryStreamExt;
use mongodb::Collection;
use mongodb::bson::{Bson, Document, doc};
use serde_json::Value as JsonValue;
use tracing::{debug, info};

use crate::error::{ExportError, Result, into_export_error};
use crate::formatter::{bson_to_json, document_to_json};

/// In-memory mapping from document id to document contents.
///
/// Constructed fresh on every run, written once, then discarded. Key
/// uniqueness is guaranteed by the source collection's `_id` uniqueness;
/// no deduplication happens here.
pub type ExportMap = serde_json::Map<String, JsonValue>;

/// Fetch every document of a collection
///
/// # Arguments
/// * `collection` - Handle to the collection to snapshot
///
/// # Returns
/// * `Result<Vec<Document>>` - All documents, or a classified driver error
pub async fn fetch_all(collection: &Collection<Document>) -> Result<Vec<Document>> {
    debug!("Fetching all documents from '{}'", collection.name());

    let cursor = collection
        .find(doc! {})
        .await
        .map_err(into_export_error)?;

    // Drains the cursor fully; memory use is proportional to collection size.
    let docs: Vec<Document> = cursor.try_collect().await.map_err(into_export_error)?;

    info!(
        "Fetched {} documents from '{}'",
        docs.len(),
        collection.name()
    );
    Ok(docs)
}

/// Build the id → contents mapping from fetched documents
///
/// The `_id` field becomes the map key (rendered as a string) and is
/// removed from the exported contents. Ids are unique in the source
/// collection, but ids of different BSON types can render to the same
/// string (`Int32(7)` and `"7"`); that collision is an error rather than
/// a silent overwrite, so the map always has one entry per document.
///
/// # Arguments
/// * `docs` - Documents from one collection fetch
///
/// # Returns
/// * `Result<ExportMap>` - Mapping with one entry per document
pub fn build_export_map(docs: Vec<Document>) -> Result<ExportMap> {
    let mut map = ExportMap::new();

    for mut doc in docs {
        let id = doc.remove("_id").ok_or_else(|| {
            ExportError::Generic("Encountered a document without an _id field".to_string())
        })?;

        let key = id_to_string(&id);
        if map.insert(key.clone(), document_to_json(&doc)).is_some() {
            return Err(ExportError::Generic(format!(
                "Documents with distinct ids render the same key '{key}'"
            )));
        }
    }

    Ok(map)
}

/// Render a document id as a map key
fn id_to_string(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s.clone(),
        other => match bson_to_json(other) {
            JsonValue::String(s) => s,
            value => value.to_string(),
        },
    }
}
