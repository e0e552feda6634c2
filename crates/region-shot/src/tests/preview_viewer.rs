use crate::{PreviewViewer, config::PreviewConfig};

use std::path::PathBuf;

/// WHAT: Preview file names are sanitised
/// WHY: Region ids come from the backend and must not escape the directory
#[test]
fn given_labels_with_separators_when_building_path_then_stays_in_directory() {
    // Given: A viewer writing to /tmp/previews
    let viewer = PreviewViewer::new(&PreviewConfig {
        directory: PathBuf::from("/tmp/previews"),
        open_viewer: false,
    });

    // When: Building paths for plain and hostile labels
    let plain = viewer.path_for("region-42");
    let hostile = viewer.path_for("../../etc/passwd");

    // Then: Both land directly inside the directory
    assert_eq!(plain, PathBuf::from("/tmp/previews/region-42.png"));
    assert_eq!(hostile.parent(), Some(PathBuf::from("/tmp/previews").as_path()));
    assert_eq!(hostile, PathBuf::from("/tmp/previews/______etc_passwd.png"));
}
