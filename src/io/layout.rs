//! Floorplan layout parsing.
//!
//! A layout is a JSON document; the only field used here is `ignore`, a list
//! of `[x, y]` cells outside the walkable area:
//!
//! ```json
//! { "ignore": [[0, 3], [0, 4]], "image": "..." }
//! ```
//!
//! Layout data is optional. [`exclusions_from_layouts`] never fails: any
//! document that cannot be parsed is logged and contributes no exclusions.

use serde::Deserialize;
use thiserror::Error;

use crate::core::{GridBounds, GridCoord};
use crate::grid::ExclusionMask;

/// Layout parse errors
#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Invalid layout JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct Layout {
    ignore: Vec<(i64, i64)>,
}

/// Parse the excluded cells of one layout document.
///
/// Cells outside `bounds` are skipped.
pub fn parse_exclusions(json: &str, bounds: GridBounds) -> Result<ExclusionMask, LayoutError> {
    let layout: Layout = serde_json::from_str(json)?;
    let total = layout.ignore.len();

    let mask: ExclusionMask = layout
        .ignore
        .into_iter()
        .filter_map(|(x, y)| Some(GridCoord::new(i32::try_from(x).ok()?, i32::try_from(y).ok()?)))
        .filter(|c| bounds.contains(*c))
        .collect();

    if mask.len() < total {
        log::debug!(
            "Skipped {} excluded cells outside {:?}",
            total - mask.len(),
            bounds
        );
    }
    Ok(mask)
}

/// Union of the exclusions of every layout document.
///
/// Malformed documents are logged and ignored.
pub fn exclusions_from_layouts<I, S>(layouts: I, bounds: GridBounds) -> ExclusionMask
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut mask = ExclusionMask::empty();
    for (i, layout) in layouts.into_iter().enumerate() {
        match parse_exclusions(layout.as_ref(), bounds) {
            Ok(cells) => mask.extend(cells.iter().copied()),
            Err(e) => log::warn!("Ignoring layout {}: {}", i, e),
        }
    }
    mask
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> GridBounds {
        GridBounds::new(0, 0, 9, 9)
    }

    #[test]
    fn test_parse_ignore_list() {
        let mask = parse_exclusions(r#"{"ignore": [[1, 2], [3, 4]], "width": 10}"#, bounds())
            .unwrap();

        assert_eq!(mask.len(), 2);
        assert!(mask.contains(GridCoord::new(1, 2)));
        assert!(mask.contains(GridCoord::new(3, 4)));
    }

    #[test]
    fn test_out_of_bounds_cells_skipped() {
        let mask = parse_exclusions(r#"{"ignore": [[1, 2], [30, 4], [-1, 0]]}"#, bounds())
            .unwrap();
        assert_eq!(mask.len(), 1);
    }

    #[test]
    fn test_malformed_layouts_are_errors() {
        assert!(parse_exclusions("not json", bounds()).is_err());
        assert!(parse_exclusions(r#"{"walls": []}"#, bounds()).is_err());
        assert!(parse_exclusions(r#"{"ignore": [[1]]}"#, bounds()).is_err());
    }

    #[test]
    fn test_lenient_union_skips_bad_documents() {
        let layouts = [
            r#"{"ignore": [[0, 0]]}"#,
            "{{{",
            r#"{"ignore": [[0, 1], [0, 0]]}"#,
        ];

        let mask = exclusions_from_layouts(layouts, bounds());

        assert_eq!(mask.len(), 2);
        assert!(mask.contains(GridCoord::new(0, 1)));
    }

    #[test]
    fn test_no_layouts_means_no_exclusions() {
        let mask = exclusions_from_layouts(Vec::<String>::new(), bounds());
        assert!(mask.is_empty());
    }
}
