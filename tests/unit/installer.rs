//! Unit tests for the dependency installer service — the install/uninstall
//! state machine and its failure-cleanup guarantees.

#![allow(clippy::expect_used)]

use std::path::Path;

use grapnel_cli::application::services::DependencyInstaller;
use grapnel_cli::domain::{Artifact, InstallError};
use grapnel_cli::infra::fs::LocalDisk;
use grapnel_cli::infra::registrar::NullRegistrar;

use crate::mocks::{
    CopyQuota, FailingRegistrar, FailingResolver, QuietReporter, RecordingRegistrar, StubResolver,
    seed_files, widget,
};

fn installer(ext_dir: &Path) -> DependencyInstaller<NullRegistrar> {
    DependencyInstaller::new(NullRegistrar, ext_dir)
}

#[test]
fn test_install_materializes_resolved_files_flat() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let payload = tmp.path().join("payload");
    std::fs::create_dir(&payload).expect("mkdir");
    let resolver = StubResolver {
        files: seed_files(&payload, &["widget.jar", "util.jar"]),
    };
    let ext_dir = tmp.path().join("ext");

    installer(&ext_dir)
        .install(&widget(), &resolver, &LocalDisk, &QuietReporter)
        .expect("install");

    assert!(ext_dir.join("widget").join("widget.jar").is_file());
    assert!(ext_dir.join("widget").join("util.jar").is_file());
}

#[test]
fn test_second_install_fails_and_leaves_directory_untouched() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let payload = tmp.path().join("payload");
    std::fs::create_dir(&payload).expect("mkdir");
    let resolver = StubResolver {
        files: seed_files(&payload, &["widget.jar"]),
    };
    let ext_dir = tmp.path().join("ext");
    let installer = installer(&ext_dir);

    installer
        .install(&widget(), &resolver, &LocalDisk, &QuietReporter)
        .expect("first install");
    let err = installer
        .install(&widget(), &resolver, &LocalDisk, &QuietReporter)
        .expect_err("second install must fail");

    assert!(
        matches!(err, InstallError::AlreadyInstalled { ref name } if name == "widget"),
        "unexpected error: {err}"
    );
    // The failed attempt must not have deleted or altered the existing dir.
    assert!(ext_dir.join("widget").join("widget.jar").is_file());
}

#[test]
fn test_install_uninstall_cycle_leaves_root_clean() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let payload = tmp.path().join("payload");
    std::fs::create_dir(&payload).expect("mkdir");
    let resolver = StubResolver {
        files: seed_files(&payload, &["widget.jar"]),
    };
    let ext_dir = tmp.path().join("ext");
    let installer = installer(&ext_dir);
    let artifact = widget();

    installer
        .install(&artifact, &resolver, &LocalDisk, &QuietReporter)
        .expect("install");
    assert!(ext_dir.join("widget").is_dir());

    installer
        .uninstall(&artifact, &LocalDisk, &QuietReporter)
        .expect("uninstall");
    assert!(!ext_dir.join("widget").exists());

    // Uninstalling again is a successful no-op.
    installer
        .uninstall(&artifact, &LocalDisk, &QuietReporter)
        .expect("idempotent uninstall");
    assert!(!ext_dir.join("widget").exists());
}

#[test]
fn test_uninstall_of_never_installed_plugin_changes_nothing() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let ext_dir = tmp.path().join("ext");

    installer(&ext_dir)
        .uninstall(&widget(), &LocalDisk, &QuietReporter)
        .expect("uninstall absent");

    // Not even the root is created by an uninstall.
    assert!(!ext_dir.exists());
}

#[test]
fn test_resolution_failure_creates_no_directory() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let ext_dir = tmp.path().join("ext");

    let err = installer(&ext_dir)
        .install(&widget(), &FailingResolver, &LocalDisk, &QuietReporter)
        .expect_err("resolution must fail");

    assert!(
        matches!(err, InstallError::Resolution { .. }),
        "unexpected error: {err}"
    );
    assert!(!ext_dir.exists());
}

#[test]
fn test_midcopy_failure_removes_partial_directory_and_allows_retry() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let payload = tmp.path().join("payload");
    std::fs::create_dir(&payload).expect("mkdir");
    let resolver = StubResolver {
        files: seed_files(&payload, &["a.jar", "b.jar", "c.jar"]),
    };
    let ext_dir = tmp.path().join("ext");
    let installer = installer(&ext_dir);

    let err = installer
        .install(&widget(), &resolver, &CopyQuota::new(1), &QuietReporter)
        .expect_err("copy must fail");

    match err {
        InstallError::CopyFailed { cleanup_error, .. } => {
            assert!(cleanup_error.is_none(), "cleanup should have succeeded");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(
        !ext_dir.join("widget").exists(),
        "partial directory must not survive a failed install"
    );

    // The failed attempt must not block a retry with AlreadyInstalled.
    installer
        .install(&widget(), &resolver, &LocalDisk, &QuietReporter)
        .expect("retry after failed install");
    assert!(ext_dir.join("widget").join("c.jar").is_file());
}

#[test]
fn test_cleanup_failure_is_reported_with_the_copy_error() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let payload = tmp.path().join("payload");
    std::fs::create_dir(&payload).expect("mkdir");
    let resolver = StubResolver {
        files: seed_files(&payload, &["a.jar"]),
    };
    let ext_dir = tmp.path().join("ext");
    let mut fs = CopyQuota::new(0);
    fs.refuse_removal = true;

    let err = installer(&ext_dir)
        .install(&widget(), &resolver, &fs, &QuietReporter)
        .expect_err("copy must fail");

    match err {
        InstallError::CopyFailed {
            cleanup_error: Some(cleanup),
            ..
        } => {
            assert!(cleanup.contains("directory is busy"), "cleanup: {cleanup}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_registrar_sees_successful_installs_only() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let payload = tmp.path().join("payload");
    std::fs::create_dir(&payload).expect("mkdir");
    let resolver = StubResolver {
        files: seed_files(&payload, &["widget.jar", "util.jar"]),
    };
    let registrar = RecordingRegistrar::default();
    let installer = DependencyInstaller::new(registrar.clone(), tmp.path().join("ext"));

    installer
        .install(&widget(), &FailingResolver, &LocalDisk, &QuietReporter)
        .expect_err("resolution failure");
    installer
        .install(&widget(), &resolver, &CopyQuota::new(0), &QuietReporter)
        .expect_err("copy failure");
    assert!(registrar.seen.lock().expect("lock").is_empty());

    installer
        .install(&widget(), &resolver, &LocalDisk, &QuietReporter)
        .expect("install");
    let seen = registrar.seen.lock().expect("lock");
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0], ("org.example:widget:1.0".to_string(), 2));
}

#[test]
fn test_registration_failure_keeps_the_installed_directory() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let payload = tmp.path().join("payload");
    std::fs::create_dir(&payload).expect("mkdir");
    let resolver = StubResolver {
        files: seed_files(&payload, &["widget.jar"]),
    };
    let ext_dir = tmp.path().join("ext");
    let installer = DependencyInstaller::new(FailingRegistrar, ext_dir.clone());

    let err = installer
        .install(&widget(), &resolver, &LocalDisk, &QuietReporter)
        .expect_err("registration must fail");

    assert!(
        matches!(err, InstallError::Registration { .. }),
        "unexpected error: {err}"
    );
    // The on-disk install state is already durable.
    assert!(ext_dir.join("widget").join("widget.jar").is_file());
}

#[test]
fn test_uninstall_named_rejects_path_traversal() {
    let tmp = tempfile::tempdir().expect("tempdir");

    let err = installer(tmp.path())
        .uninstall_named("../escape", &LocalDisk, &QuietReporter)
        .expect_err("unsafe name must fail");

    assert!(
        matches!(err, InstallError::InvalidCoordinate(_)),
        "unexpected error: {err}"
    );
}

#[test]
fn test_installed_lists_plugin_names_sorted() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let payload = tmp.path().join("payload");
    std::fs::create_dir(&payload).expect("mkdir");
    let resolver = StubResolver {
        files: seed_files(&payload, &["lib.jar"]),
    };
    let ext_dir = tmp.path().join("ext");
    let installer = installer(&ext_dir);

    assert!(installer.installed(&LocalDisk).expect("empty root").is_empty());

    for name in ["zeta", "alpha"] {
        let artifact = Artifact::new("org.example", name, "1.0").expect("valid");
        installer
            .install(&artifact, &resolver, &LocalDisk, &QuietReporter)
            .expect("install");
    }

    assert_eq!(
        installer.installed(&LocalDisk).expect("list"),
        vec!["alpha".to_string(), "zeta".to_string()]
    );
}

#[test]
fn test_concurrent_installs_of_same_artifact_serialize() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let payload = tmp.path().join("payload");
    std::fs::create_dir(&payload).expect("mkdir");
    let resolver = StubResolver {
        files: seed_files(&payload, &["widget.jar"]),
    };
    let ext_dir = tmp.path().join("ext");
    let installer = installer(&ext_dir);
    let artifact = widget();

    let results: Vec<Result<(), InstallError>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..2)
            .map(|_| {
                scope.spawn(|| installer.install(&artifact, &resolver, &LocalDisk, &QuietReporter))
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("thread"))
            .collect()
    });

    let ok = results.iter().filter(|r| r.is_ok()).count();
    let already = results
        .iter()
        .filter(|r| matches!(r, Err(InstallError::AlreadyInstalled { .. })))
        .count();
    assert_eq!((ok, already), (1, 1), "results: {results:?}");
    assert!(ext_dir.join("widget").join("widget.jar").is_file());
}
