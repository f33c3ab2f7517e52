//! End-to-end tests: OBJ file on disk through the default engine to
//! PNG output.

use std::fs;
use std::path::Path;

use crosscut::{process_locators, Locator, SliceStatus};

const CUBE_OBJ: &str = "\
# unit cube
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
v 0 0 1
v 1 0 1
v 1 1 1
v 0 1 1
f 1 3 2
f 1 4 3
f 5 6 7
f 5 7 8
f 1 2 6
f 1 6 5
f 4 8 7
f 4 7 3
f 1 5 8
f 1 8 4
f 2 3 7
f 2 7 6
";

fn write_cube(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("cube.obj");
    fs::write(&path, CUBE_OBJ).unwrap();
    path
}

#[test]
fn cube_center_locator_produces_image() {
    let dir = tempfile::tempdir().unwrap();
    let mesh_path = write_cube(dir.path());
    let out_dir = dir.path().join("slices");
    fs::create_dir_all(&out_dir).unwrap();

    let locators = vec![Locator::at("CENTER", 0.5, 0.5, 0.5)];
    let outcome = process_locators(&mesh_path, &locators, &out_dir);

    assert!(outcome.ok);
    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.records[0].status, SliceStatus::Success);

    let image_path = Path::new(outcome.records[0].image_path.as_deref().unwrap());
    assert!(image_path.exists(), "expected {:?} on disk", image_path);
    assert_eq!(image_path, out_dir.join("CENTER.png"));
}

#[test]
fn rotated_locators_produce_images() {
    let dir = tempfile::tempdir().unwrap();
    let mesh_path = write_cube(dir.path());
    let out_dir = dir.path().join("slices");
    fs::create_dir_all(&out_dir).unwrap();

    let locators = vec![
        Locator {
            rx: 45.0,
            ..Locator::at("TILT_X", 0.0, 0.0, 0.5)
        },
        Locator {
            ry: 45.0,
            ..Locator::at("TILT_Y", 0.5, 0.5, 0.5)
        },
    ];
    let outcome = process_locators(&mesh_path, &locators, &out_dir);

    assert!(outcome.ok);
    for record in &outcome.records {
        assert_eq!(record.status, SliceStatus::Success, "{:?}", record);
        assert!(Path::new(record.image_path.as_deref().unwrap()).exists());
    }
}

#[test]
fn far_away_locator_is_success_without_image() {
    let dir = tempfile::tempdir().unwrap();
    let mesh_path = write_cube(dir.path());
    let out_dir = dir.path().join("slices");
    fs::create_dir_all(&out_dir).unwrap();

    let locators = vec![Locator::at("FAR", 5000.0, 5000.0, 5000.0)];
    let outcome = process_locators(&mesh_path, &locators, &out_dir);

    assert!(outcome.ok);
    assert_eq!(outcome.records[0].status, SliceStatus::Success);
    // Empty section skips rasterization entirely.
    assert!(!out_dir.join("FAR.png").exists());
}

#[test]
fn unloadable_mesh_fails_whole_batch() {
    let dir = tempfile::tempdir().unwrap();
    let mesh_path = dir.path().join("missing.obj");
    let out_dir = dir.path().join("slices");

    let locators = vec![
        Locator::at("a", 0.0, 0.0, 0.0),
        Locator::at("b", 1.0, 1.0, 1.0),
    ];
    let outcome = process_locators(&mesh_path, &locators, &out_dir);

    assert!(!outcome.ok);
    assert_eq!(outcome.records.len(), 2);
    for record in &outcome.records {
        assert_eq!(record.status, SliceStatus::Error);
    }
}

#[test]
fn records_follow_input_order() {
    let dir = tempfile::tempdir().unwrap();
    let mesh_path = write_cube(dir.path());
    let out_dir = dir.path().join("slices");
    fs::create_dir_all(&out_dir).unwrap();

    let locators = vec![
        Locator::at("first", 0.5, 0.5, 0.5),
        Locator::at("second", 0.5, 0.5, 0.25),
        Locator::at("third", 0.5, 0.5, 0.75),
    ];
    let outcome = process_locators(&mesh_path, &locators, &out_dir);

    let ids: Vec<_> = outcome.records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["first", "second", "third"]);
}
