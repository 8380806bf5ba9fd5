use pip_sync_fs::{normalize, relative_path};
use proptest::prelude::*;
use std::path::{Component, PathBuf};

proptest! {
    #[test]
    fn test_normalize_is_idempotent(parts in prop::collection::vec("[a-z]{1,6}|\\.|\\.\\.", 0..8)) {
        let path: PathBuf = parts.iter().collect();
        let once = normalize(&path);
        let twice = normalize(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn test_normalize_has_no_cur_dir(parts in prop::collection::vec("[a-z]{1,6}|\\.", 1..8)) {
        let path: PathBuf = parts.iter().collect();
        let normalized = normalize(&path);
        if normalized != PathBuf::from(".") {
            prop_assert!(normalized.components().all(|c| c != Component::CurDir));
        }
    }

    #[test]
    fn test_relative_path_rejoins_to_target(
        base in prop::collection::vec("[a-z]{1,6}", 0..5),
        target in prop::collection::vec("[a-z]{1,6}", 0..5),
    ) {
        let root = std::env::temp_dir();
        let base_path: PathBuf = root.join(base.iter().collect::<PathBuf>());
        let target_path: PathBuf = root.join(target.iter().collect::<PathBuf>());

        let relative = relative_path(&base_path, &target_path).unwrap();
        let rejoined = normalize(&base_path.join(relative));

        prop_assert_eq!(rejoined, normalize(&target_path));
    }
}
