//! Reconciliation: which OneDrive files have no matching Immich filename.
//!
//! Matching is exact string equality on the filename, deliberately without
//! normalization — renamed or re-encoded assets will show up as missing.

use std::collections::HashSet;

use crate::immich::types::ImmichAsset;
use crate::onedrive::types::DriveItem;

/// Collapse the target assets into the set of names they are known under.
/// Assets with no derivable name contribute nothing.
pub fn target_name_set(assets: &[ImmichAsset]) -> HashSet<String> {
    assets
        .iter()
        .filter_map(|a| a.display_name())
        .map(str::to_owned)
        .collect()
}

/// The subsequence of source files whose name is absent from the target
/// set, in original source order.
pub fn missing_files(files: &[DriveItem], target_names: &HashSet<String>) -> Vec<DriveItem> {
    files
        .iter()
        .filter(|f| !target_names.contains(&f.name))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn drive_files(names: &[&str]) -> Vec<DriveItem> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                serde_json::from_value(json!({
                    "id": format!("id-{i}"),
                    "name": name,
                    "size": 10,
                    "file": {}
                }))
                .unwrap()
            })
            .collect()
    }

    fn assets(values: serde_json::Value) -> Vec<ImmichAsset> {
        serde_json::from_value(values).unwrap()
    }

    #[test]
    fn test_name_set_uses_field_preference_order() {
        let set = target_name_set(&assets(json!([
            {"originalFileName": "a.jpg"},
            {"fileName": "b.jpg"},
            {"originalPath": "/x/c.jpg"},
            {}
        ])));
        let expected: HashSet<String> = ["a.jpg", "b.jpg", "c.jpg"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(set, expected);
    }

    #[test]
    fn test_name_set_collapses_duplicates() {
        let set = target_name_set(&assets(json!([
            {"originalFileName": "a.jpg"},
            {"fileName": "a.jpg"},
            {"originalPath": "/2023/a.jpg"}
        ])));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_missing_preserves_source_order() {
        let files = drive_files(&["a.jpg", "b.jpg", "c.jpg"]);
        let target: HashSet<String> = ["a.jpg".to_string()].into_iter().collect();

        let missing = missing_files(&files, &target);

        let names: Vec<&str> = missing.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["b.jpg", "c.jpg"]);
    }

    #[test]
    fn test_missing_is_idempotent() {
        let files = drive_files(&["a.jpg", "b.jpg", "c.jpg"]);
        let target: HashSet<String> = ["b.jpg".to_string()].into_iter().collect();

        let first = missing_files(&files, &target);
        let second = missing_files(&files, &target);

        let names = |v: &[DriveItem]| v.iter().map(|f| f.name.clone()).collect::<Vec<_>>();
        assert_eq!(names(&first), names(&second));
    }

    #[test]
    fn test_match_is_case_sensitive() {
        let files = drive_files(&["Photo.JPG"]);
        let target: HashSet<String> = ["photo.jpg".to_string()].into_iter().collect();
        assert_eq!(missing_files(&files, &target).len(), 1);
    }

    #[test]
    fn test_everything_present_yields_empty() {
        let files = drive_files(&["a.jpg", "b.jpg"]);
        let target: HashSet<String> = ["a.jpg".to_string(), "b.jpg".to_string()]
            .into_iter()
            .collect();
        assert!(missing_files(&files, &target).is_empty());
    }
}
