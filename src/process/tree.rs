// src/process/tree.rs
//! Folding flat table rows into a facet hierarchy.
//!
//! Each facet in the active list is one level of nesting, outermost first.
//! The innermost level maps a facet value to the ordered `[date, value]`
//! observations of every row that reached it.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info};

use super::utils::parse_value;
use super::RawTable;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::error::{ReshapeError, Result};

/// One `[date, value]` leaf pair. Serializes as a two-element JSON array.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation(pub String, pub Option<f64>);

/// A level of the hierarchy. Every node at a given depth has the same variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Node {
    Branch(FacetTree),
    Leaf(Vec<Observation>),
}

/// Facet value to child node. `BTreeMap` keeps keys sorted for output.
pub type FacetTree = BTreeMap<String, Node>;

impl Node {
    fn empty_for(remaining: usize) -> Node {
        if remaining == 0 {
            Node::Leaf(Vec::new())
        } else {
            Node::Branch(FacetTree::new())
        }
    }

    /// Number of mapping levels from this node down to the leaf lists.
    fn depth(&self) -> usize {
        match self {
            Node::Leaf(_) => 0,
            Node::Branch(children) => 1 + children.values().map(Node::depth).max().unwrap_or(0),
        }
    }
}

/// Insert `obs` under the facet-value path `path` (one value per level).
fn insert(level: &mut FacetTree, path: &[&str], obs: Observation) {
    let Some((head, rest)) = path.split_first() else {
        return;
    };
    let node = level
        .entry((*head).to_string())
        .or_insert_with(|| Node::empty_for(rest.len()));
    match node {
        Node::Leaf(observations) if rest.is_empty() => observations.push(obs),
        Node::Branch(children) if !rest.is_empty() => insert(children, rest, obs),
        // every path in one tree has the same length
        _ => unreachable!("facet path length changed within a single tree"),
    }
}

/// Depth of a whole tree: the number of facet levels.
pub fn tree_depth(tree: &FacetTree) -> usize {
    if tree.is_empty() {
        return 0;
    }
    1 + tree.values().map(Node::depth).max().unwrap_or(0)
}

/// The field of `row` at `idx`. A column absent from the header is fatal;
/// a row too short to have the field is reported and yields `None`.
fn leaf_field<'r>(
    row: &'r [String],
    idx: Option<usize>,
    column: &str,
    row_no: usize,
    sink: &dyn DiagnosticSink,
) -> Result<Option<&'r String>> {
    let idx = idx.ok_or_else(|| ReshapeError::MissingColumn(column.to_string()))?;
    let got = row.get(idx);
    if got.is_none() {
        sink.report(Diagnostic::RowFieldMissing {
            row: row_no,
            column: column.to_string(),
        });
    }
    Ok(got)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reshaped {
    pub tree: FacetTree,
    /// Data rows read, including dropped ones.
    pub rows_read: usize,
    pub rows_dropped: usize,
}

/// Column names every leaf is built from.
#[derive(Debug, Clone, Copy)]
pub struct LeafColumns<'a> {
    pub date: &'a str,
    pub value: &'a str,
}

/// Build the facet hierarchy from `table` in one pass over its rows.
///
/// A row lacking a field for any facet (or for the date/value columns) is
/// reported to `sink` and dropped whole. A `VALUE` that is neither empty nor
/// numeric aborts the build.
pub fn reshape(
    table: &RawTable,
    facets: &[String],
    columns: LeafColumns<'_>,
    sink: &dyn DiagnosticSink,
) -> Result<Reshaped> {
    let facet_idx: Vec<Option<usize>> = facets.iter().map(|f| table.column_index(f)).collect();
    let date_idx = table.column_index(columns.date);
    let value_idx = table.column_index(columns.value);

    let mut tree = FacetTree::new();
    let mut rows_dropped = 0;
    let mut path: Vec<&str> = Vec::with_capacity(facets.len());

    'rows: for (i, row) in table.rows.iter().enumerate() {
        let row_no = i + 1;
        path.clear();

        for (facet, idx) in facets.iter().zip(&facet_idx) {
            match idx.and_then(|j| row.get(j)) {
                Some(v) => path.push(v.as_str()),
                None => {
                    sink.report(Diagnostic::RowFacetMissing {
                        row: row_no,
                        facet: facet.clone(),
                    });
                    rows_dropped += 1;
                    continue 'rows;
                }
            }
        }
        if path.is_empty() {
            continue;
        }

        let Some(date) = leaf_field(row, date_idx, columns.date, row_no, sink)? else {
            rows_dropped += 1;
            continue;
        };
        let Some(raw_value) = leaf_field(row, value_idx, columns.value, row_no, sink)? else {
            rows_dropped += 1;
            continue;
        };

        let value = parse_value(raw_value, row_no)?;
        insert(&mut tree, &path, Observation(date.clone(), value));
    }

    info!(rows = table.rows.len(), dropped = rows_dropped, "parsed rows");
    debug!(
        top_level_keys = tree.len(),
        depth = tree_depth(&tree),
        "facet tree built"
    );

    Ok(Reshaped {
        tree,
        rows_read: table.rows.len(),
        rows_dropped,
    })
}
