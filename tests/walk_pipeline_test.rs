//! Integration tests for the trajectory pipeline
//!
//! These tests build small dataset trees on disk and verify the complete path:
//! Directory walk -> name filter -> header skip -> row decoding -> emitted trajectory

use std::path::{Path, PathBuf};
use tempfile::TempDir;
use traj_ingest::decode::InvalidFieldPolicy;
use traj_ingest::walk::{TrajectoryWalker, WalkFailure, WalkOptions};
use traj_ingest::{Point, Trajectory};

const HEADER: &str = "Geolife trajectory\nWGS 84\nAltitude is in Feet\nReserved 3\n0,2,255,My Track,0,0,2,8421376\n0\n";

/// Write a log file with the standard six-line header
fn write_plt(dir: &Path, name: &str, rows: &[&str]) -> PathBuf {
    std::fs::create_dir_all(dir).expect("Failed to create fixture dir");
    let mut content = HEADER.to_string();
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    let path = dir.join(name);
    std::fs::write(&path, content).expect("Failed to write fixture");
    path
}

/// Write a log file whose data rows are raw bytes
fn write_plt_bytes(dir: &Path, name: &str, rows: &[u8]) -> PathBuf {
    std::fs::create_dir_all(dir).expect("Failed to create fixture dir");
    let mut content = HEADER.as_bytes().to_vec();
    content.extend_from_slice(rows);
    let path = dir.join(name);
    std::fs::write(&path, content).expect("Failed to write fixture");
    path
}

/// Run a walk and collect everything emitted
fn walk_all(root: &Path, options: WalkOptions) -> (Vec<(PathBuf, Trajectory)>, traj_ingest::WalkReport) {
    let walker = TrajectoryWalker::new(options);
    let mut emitted = Vec::new();
    let report = walker.walk(root, |path, trajectory| {
        emitted.push((path.to_path_buf(), trajectory));
    });
    (emitted, report)
}

fn sorted_options() -> WalkOptions {
    WalkOptions {
        sort_entries: true,
        ..WalkOptions::default()
    }
}

#[test]
fn test_two_row_scenario() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    write_plt(temp_dir.path(), "a.plt", &["39.9,116.3,0,50", "39.91,116.31,0,55"]);

    let (emitted, report) = walk_all(temp_dir.path(), WalkOptions::default());

    assert_eq!(emitted.len(), 1);
    let trajectory = &emitted[0].1;
    assert_eq!(trajectory.id(), "a");
    assert_eq!(
        trajectory.path(),
        &[Point::new(39.9, 116.3, 50.0), Point::new(39.91, 116.31, 55.0)]
    );
    assert!(report.is_clean());
}

#[test]
fn test_wrong_extension_and_empty_file_scenario() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    write_plt(temp_dir.path(), "b.txt", &["1,2,0,3"]);
    write_plt(temp_dir.path(), "c.plt", &[]);

    let (emitted, report) = walk_all(temp_dir.path(), WalkOptions::default());

    assert_eq!(emitted.len(), 1);
    assert_eq!(emitted[0].1.id(), "c");
    assert!(emitted[0].1.is_empty());
    assert_eq!(report.files_matched, 1);
}

#[test]
fn test_point_count_matches_row_count() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let rows: Vec<String> = (0..250)
        .map(|i| format!("{}.5,{}.25,0,{},39744.1,2008-10-23,02:53:04", i, i + 100, i * 10))
        .collect();
    let row_refs: Vec<&str> = rows.iter().map(String::as_str).collect();
    write_plt(temp_dir.path(), "long.plt", &row_refs);

    let (emitted, _) = walk_all(temp_dir.path(), WalkOptions::default());

    let trajectory = &emitted[0].1;
    assert_eq!(trajectory.len(), 250);
    for (i, point) in trajectory.path().iter().enumerate() {
        assert_eq!(point.lat, i as f64 + 0.5);
        assert_eq!(point.lng, (i + 100) as f64 + 0.25);
        assert_eq!(point.alt, (i * 10) as f64);
    }
}

#[test]
fn test_non_matching_names_never_emit() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    write_plt(temp_dir.path(), "noext", &["1,2,0,3"]);
    write_plt(temp_dir.path(), "two.dots.plt", &["1,2,0,3"]);
    write_plt(temp_dir.path(), "upper.PLT", &["1,2,0,3"]);
    write_plt(temp_dir.path(), "backup.plt.orig", &["1,2,0,3"]);
    write_plt(temp_dir.path(), "kept.plt", &["1,2,0,3"]);

    let (emitted, report) = walk_all(temp_dir.path(), WalkOptions::default());

    let ids: Vec<&str> = emitted.iter().map(|(_, t)| t.id()).collect();
    assert_eq!(ids, vec!["kept"]);
    assert_eq!(report.files_matched, 1);
}

#[test]
fn test_column_two_garbage_is_ignored() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    write_plt(
        temp_dir.path(),
        "g.plt",
        &["1.0,2.0,###,3.0", "4.0,5.0,,6.0", "7.0,8.0,\"quoted text\",9.0"],
    );

    let (emitted, report) = walk_all(temp_dir.path(), WalkOptions::default());

    assert_eq!(
        emitted[0].1.path(),
        &[
            Point::new(1.0, 2.0, 3.0),
            Point::new(4.0, 5.0, 6.0),
            Point::new(7.0, 8.0, 9.0)
        ]
    );
    assert_eq!(report.rows_skipped, 0);
}

#[test]
fn test_non_utf8_column_two_is_ignored() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    write_plt_bytes(temp_dir.path(), "raw.plt", b"1,2,\xff\xfe,3\n4,5,0,6\n");

    let (emitted, report) = walk_all(temp_dir.path(), WalkOptions::default());

    assert_eq!(emitted.len(), 1);
    assert_eq!(emitted[0].1.path(), &[Point::new(1.0, 2.0, 3.0), Point::new(4.0, 5.0, 6.0)]);
    assert!(report.is_clean());
}

#[test]
fn test_non_utf8_coordinate_becomes_zero() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    write_plt_bytes(temp_dir.path(), "raw.plt", b"\xff,2,0,3\n4,5,0,6\n");

    let (emitted, report) = walk_all(temp_dir.path(), WalkOptions::default());

    assert_eq!(emitted.len(), 1);
    assert_eq!(emitted[0].1.path(), &[Point::new(0.0, 2.0, 3.0), Point::new(4.0, 5.0, 6.0)]);
    assert!(report.is_clean());
}

#[test]
fn test_unbalanced_quote_keeps_later_rows() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    write_plt(temp_dir.path(), "q.plt", &["1,2,\"oops,3", "4,5,0,6", "7,8,0,9"]);

    let (emitted, report) = walk_all(temp_dir.path(), WalkOptions::default());

    assert_eq!(
        emitted[0].1.path(),
        &[
            Point::new(1.0, 2.0, 3.0),
            Point::new(4.0, 5.0, 6.0),
            Point::new(7.0, 8.0, 9.0)
        ]
    );
    assert_eq!(report.points_emitted, 3);
    assert!(report.is_clean());
}

#[test]
fn test_non_numeric_coordinate_becomes_zero() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    write_plt(
        temp_dir.path(),
        "z.plt",
        &["x,2.0,0,3.0", "1.0,y,0,3.0", "1.0,2.0,0,z", "4.0,5.0,0,6.0"],
    );

    let (emitted, _) = walk_all(temp_dir.path(), WalkOptions::default());

    assert_eq!(
        emitted[0].1.path(),
        &[
            Point::new(0.0, 2.0, 3.0),
            Point::new(1.0, 0.0, 3.0),
            Point::new(1.0, 2.0, 0.0),
            Point::new(4.0, 5.0, 6.0)
        ]
    );
}

#[test]
fn test_short_rows_skipped_per_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    write_plt(temp_dir.path(), "s.plt", &["1,2,0,3", "truncated,row", "4,5,0,6", "7"]);

    let (emitted, report) = walk_all(temp_dir.path(), WalkOptions::default());

    assert_eq!(emitted[0].1.path(), &[Point::new(1.0, 2.0, 3.0), Point::new(4.0, 5.0, 6.0)]);
    assert_eq!(report.rows_skipped, 2);
    assert!(report.is_clean());
}

#[test]
fn test_fail_file_policy_keeps_other_files() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    write_plt(temp_dir.path(), "bad.plt", &["1,2,0,3", "oops,2,0,3"]);
    write_plt(temp_dir.path(), "good.plt", &["1,2,0,3"]);

    let mut options = sorted_options();
    options.decode.on_invalid_field = InvalidFieldPolicy::FailFile;
    let (emitted, report) = walk_all(temp_dir.path(), options);

    let ids: Vec<&str> = emitted.iter().map(|(_, t)| t.id()).collect();
    assert_eq!(ids, vec!["good"]);
    assert_eq!(report.failure_count(), 1);
    assert_eq!(report.failures[0].path(), Some(temp_dir.path().join("bad.plt").as_path()));
}

#[cfg(unix)]
#[test]
fn test_unopenable_file_does_not_stop_walk() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let user_dir = temp_dir.path().join("000").join("Trajectory");
    write_plt(&user_dir, "first.plt", &["1,2,0,3"]);
    std::os::unix::fs::symlink(user_dir.join("vanished.plt"), user_dir.join("broken.plt"))
        .expect("Failed to create symlink");
    write_plt(&temp_dir.path().join("001").join("Trajectory"), "second.plt", &["4,5,0,6"]);

    let (emitted, report) = walk_all(temp_dir.path(), sorted_options());

    let ids: Vec<&str> = emitted.iter().map(|(_, t)| t.id()).collect();
    assert_eq!(ids, vec!["first", "second"]);
    assert_eq!(report.failure_count(), 1);
    assert!(matches!(report.failures[0], WalkFailure::File { .. }));
}

#[cfg(unix)]
#[test]
fn test_unreadable_subdirectory_is_reported() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    write_plt(temp_dir.path(), "good.plt", &["1,2,0,3"]);
    let locked = temp_dir.path().join("locked");
    write_plt(&locked, "hidden.plt", &["4,5,0,6"]);
    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000))
        .expect("Failed to lock directory");

    // Permission bits do not bind a privileged user.
    if std::fs::read_dir(&locked).is_ok() {
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let (emitted, report) = walk_all(temp_dir.path(), sorted_options());
    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();

    let ids: Vec<&str> = emitted.iter().map(|(_, t)| t.id()).collect();
    assert_eq!(ids, vec!["good"]);
    assert_eq!(report.failure_count(), 1);
    assert!(matches!(report.failures[0], WalkFailure::Traversal(_)));
    assert_eq!(report.failures[0].path(), Some(locked.as_path()));
}

#[cfg(unix)]
#[test]
fn test_symlink_loop_is_reported() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    write_plt(temp_dir.path(), "good.plt", &["1,2,0,3"]);
    let sub = temp_dir.path().join("sub");
    std::fs::create_dir(&sub).expect("Failed to create subdir");
    std::os::unix::fs::symlink(temp_dir.path(), sub.join("back")).expect("Failed to create symlink");

    let options = WalkOptions {
        follow_links: true,
        ..sorted_options()
    };
    let (emitted, report) = walk_all(temp_dir.path(), options);

    let ids: Vec<&str> = emitted.iter().map(|(_, t)| t.id()).collect();
    assert_eq!(ids, vec!["good"]);
    assert_eq!(report.failure_count(), 1);
    assert!(matches!(report.failures[0], WalkFailure::Traversal(_)));
}

#[test]
fn test_geolife_layout_emits_full_paths() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let data = temp_dir.path().join("Data");
    let p1 = write_plt(&data.join("000").join("Trajectory"), "20081023025304.plt", &["39.984702,116.318417,0,492,39744.1201851852,2008-10-23,02:53:04"]);
    let p2 = write_plt(&data.join("010").join("Trajectory"), "20070804033032.plt", &["39.921712,116.472343,0,13,39298.1462037037,2007-08-04,03:30:32"]);
    std::fs::write(data.join("010").join("labels.txt"), "Start Time\tEnd Time\tTransportation Mode\n").unwrap();

    let (emitted, report) = walk_all(&data, sorted_options());

    assert_eq!(emitted.len(), 2);
    assert_eq!(emitted[0].0, p1);
    assert_eq!(emitted[0].1.id(), "20081023025304");
    assert_eq!(emitted[1].0, p2);
    assert_eq!(emitted[1].1.path(), &[Point::new(39.921712, 116.472343, 13.0)]);
    assert_eq!(report.points_emitted, 2);
}
