// src/output/mod.rs
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::{fs, path::Path};
use tracing::{debug, info};

use crate::error::{ReshapeError, Result};
use crate::process::tree::FacetTree;

/// A pretty-printed `[ "date", number|null ]` spread over three lines.
static LEAF_PAIR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\[\s*\n\s*"([^"]+)",\s*(null|-?[0-9]+(?:\.[0-9]+)?)\s*\n\s*\]"#)
        .expect("leaf pair pattern should compile")
});

#[derive(Serialize)]
struct Document<'a> {
    data: &'a FacetTree,
}

/// Pretty JSON (2-space indent, keys sorted) with every leaf pair on one line.
pub fn render(tree: &FacetTree) -> Result<String> {
    info!("serializing JSON");
    let pretty = serde_json::to_string_pretty(&Document { data: tree })?;
    let collapsed = collapse_leaf_pairs(&pretty);
    debug!("applied leaf pair collapse");
    Ok(collapsed)
}

/// Rewrite multi-line two-element `[string, number|null]` arrays as
/// `[ "<date>", <value> ]`. Everything else is left as is.
pub fn collapse_leaf_pairs(pretty: &str) -> String {
    LEAF_PAIR
        .replace_all(pretty, r#"[ "${1}", ${2} ]"#)
        .into_owned()
}

/// Write `text` to `path`, or to standard output (with a trailing newline) when `None`.
pub fn write_output(text: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            info!(path = %path.display(), "writing output");
            fs::write(path, text).map_err(|source| ReshapeError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
        None => {
            info!("writing output to stdout");
            println!("{}", text);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::tree::{Node, Observation};
    use anyhow::Result;
    use tempfile::NamedTempFile;

    fn sample_tree() -> FacetTree {
        let mut sexes = FacetTree::new();
        sexes.insert(
            "Males".into(),
            Node::Leaf(vec![Observation("2021-01".into(), Some(-3.5))]),
        );
        sexes.insert(
            "Females".into(),
            Node::Leaf(vec![
                Observation("2021-01".into(), Some(2.0)),
                Observation("2021-02".into(), None),
            ]),
        );
        let mut tree = FacetTree::new();
        tree.insert("Canada".into(), Node::Branch(sexes));
        tree
    }

    #[test]
    fn renders_sorted_and_collapsed() -> Result<()> {
        let text = render(&sample_tree())?;
        let expected = r#"{
  "data": {
    "Canada": {
      "Females": [
        [ "2021-01", 2.0 ],
        [ "2021-02", null ]
      ],
      "Males": [
        [ "2021-01", -3.5 ]
      ]
    }
  }
}"#;
        assert_eq!(text, expected);
        Ok(())
    }

    #[test]
    fn scenario_a_document() -> Result<()> {
        let mut tree = FacetTree::new();
        tree.insert(
            "Canada".into(),
            Node::Leaf(vec![
                Observation("2020".into(), Some(5.0)),
                Observation("2021".into(), None),
            ]),
        );
        let text = render(&tree)?;
        let parsed: serde_json::Value = serde_json::from_str(&text)?;
        assert_eq!(
            parsed,
            serde_json::json!({"data": {"Canada": [["2020", 5.0], ["2021", null]]}})
        );
        Ok(())
    }

    #[test]
    fn render_is_deterministic() -> Result<()> {
        let tree = sample_tree();
        assert_eq!(render(&tree)?, render(&tree.clone())?);
        Ok(())
    }

    #[test]
    fn empty_tree_renders_empty_data() -> Result<()> {
        assert_eq!(render(&FacetTree::new())?, "{\n  \"data\": {}\n}");
        Ok(())
    }

    #[test]
    fn non_ascii_keys_stay_raw_utf8() -> Result<()> {
        let mut tree = FacetTree::new();
        tree.insert(
            "Québec".into(),
            Node::Leaf(vec![Observation("2020".into(), Some(1.0))]),
        );
        let text = render(&tree)?;
        assert!(text.contains("\"Québec\": ["));
        assert!(text.contains("[ \"2020\", 1.0 ]"));
        Ok(())
    }

    #[test]
    fn collapses_only_string_number_pairs() {
        let pair = "[\n  \"2021-01\",\n  3.14\n]";
        assert_eq!(collapse_leaf_pairs(pair), "[ \"2021-01\", 3.14 ]");

        let triple = "[\n  \"2021-01\",\n  3.14,\n  1\n]";
        assert_eq!(collapse_leaf_pairs(triple), triple);

        let object = "{\n  \"2021-01\": 3.14\n}";
        assert_eq!(collapse_leaf_pairs(object), object);

        let two_numbers = "[\n  1,\n  2\n]";
        assert_eq!(collapse_leaf_pairs(two_numbers), two_numbers);

        let exponent = "[\n  \"2021\",\n  1e16\n]";
        assert_eq!(collapse_leaf_pairs(exponent), exponent);
    }

    #[test]
    fn writes_file_without_trailing_newline() -> Result<()> {
        let tmp = NamedTempFile::new()?;
        write_output("{\n  \"data\": {}\n}", Some(tmp.path()))?;
        assert_eq!(std::fs::read_to_string(tmp.path())?, "{\n  \"data\": {}\n}");
        Ok(())
    }

    #[test]
    fn unwritable_destination_is_io_error() {
        let err = write_output("{}", Some(Path::new("/nonexistent-dir/out.json"))).unwrap_err();
        assert!(matches!(err, ReshapeError::Io { .. }));
    }
}
