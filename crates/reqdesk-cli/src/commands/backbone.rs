// Rust guideline compliant 2026-10-14

//! Implementation of the `rqd backbone` command.
//!
//! Prints the minimum spanning forest of the relationship graph, the
//! cheapest set of links that keeps every group of related requests
//! connected.

use crate::output::BackboneEdge;
use crate::OutputFormatter;
use anyhow::Result;
use reqdesk_app::WorkspaceContext;
use reqdesk_core::{SnapshotStore, Store};
use std::path::Path;

/// Prints the backbone edges labelled by tracking code.
///
/// # Errors
///
/// Returns an error if the workspace is missing.
pub fn execute(root: Option<&Path>, formatter: &dyn OutputFormatter) -> Result<()> {
    let workspace = WorkspaceContext::discover(root)?;
    let config = workspace.load_config()?;
    let store = workspace.open_store(&config)?;

    let edges = backbone_edges(&store);
    println!("{}", formatter.format_backbone(&edges));
    Ok(())
}

/// Resolves the spanning tree edges of `store` to tracking codes.
pub fn backbone_edges<S: SnapshotStore>(store: &Store<S>) -> Vec<BackboneEdge> {
    store
        .minimum_spanning_tree()
        .into_iter()
        .filter_map(|edge| {
            let from = store.get_by_id(edge.from)?;
            let to = store.get_by_id(edge.to)?;
            Some(BackboneEdge {
                from: from.tracking_code.clone(),
                to: to.tracking_code.clone(),
                weight: edge.weight,
            })
        })
        .collect()
}
