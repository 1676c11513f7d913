//! End-to-end tests: documentation → spec → rendered region → file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use argspec_core::OptionType;
use argspec_gen::{GenError, GeneratorConfig, ModuleStatus, process_module, process_modules};

const GENERATED_WIDGET_REGION: &str = r#"    # AUTOMATIC MODULE ARGUMENTS
    argument_spec = {
        "auth": {
            "type": "dict",
            "options": {
                "timeout": {"default": 30, "type": "int"},
                "username": {"type": "str"},
            },
            "apply_defaults": True,
        },
        "name": {"required": True, "type": "str"},
        "path": {"type": "path"},
        "preset": {"type": "str"},
        "size": {"type": "int"},
        "state": {
            "choices": ["present", "absent"],
            "default": "present",
            "type": "str",
        },
    }
    required_if = [("state", "present", ("path",))]
    mutually_exclusive = [("preset", "size")]
    # AUTOMATIC MODULE ARGUMENTS
"#;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn copy_fixture(dir: &Path, name: &str) -> PathBuf {
    let target = dir.join(name);
    fs::copy(fixture(name), &target).expect("failed to copy fixture");
    target
}

#[test]
fn test_widget_module_gets_full_spec() {
    let dir = tempfile::tempdir().unwrap();
    let module = copy_fixture(dir.path(), "widget.py");

    let changed = process_module(&module, &GeneratorConfig::default(), &mut io::sink()).unwrap();
    assert!(changed);

    let patched = fs::read_to_string(&module).unwrap();
    assert!(
        patched.contains(GENERATED_WIDGET_REGION),
        "unexpected generated region:\n{patched}"
    );
    assert!(patched.ends_with("if __name__ == \"__main__\":\n    main()\n"));
}

#[test]
fn test_second_run_reports_no_change() {
    let dir = tempfile::tempdir().unwrap();
    let module = copy_fixture(dir.path(), "widget.py");
    let config = GeneratorConfig::default();

    assert!(process_module(&module, &config, &mut io::sink()).unwrap());
    let first = fs::read(&module).unwrap();

    assert!(!process_module(&module, &config, &mut io::sink()).unwrap());
    assert_eq!(fs::read(&module).unwrap(), first);
}

#[test]
fn test_dry_run_reports_change_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let module = copy_fixture(dir.path(), "widget.py");
    let original = fs::read(&module).unwrap();
    let config = GeneratorConfig {
        dry_run: true,
        ..GeneratorConfig::default()
    };

    assert!(process_module(&module, &config, &mut io::sink()).unwrap());
    assert_eq!(fs::read(&module).unwrap(), original);
}

#[test]
fn test_diff_is_written_when_enabled() {
    let dir = tempfile::tempdir().unwrap();
    let module = copy_fixture(dir.path(), "widget.py");
    let config = GeneratorConfig {
        show_diff: true,
        dry_run: true,
        ..GeneratorConfig::default()
    };

    let mut diff: Vec<u8> = Vec::new();
    process_module(&module, &config, &mut diff).unwrap();
    let diff = String::from_utf8(diff).unwrap();

    let label = module.display().to_string();
    assert!(diff.starts_with(&format!("--- {label}.old\n+++ {label}.new\n")));
    assert!(diff.contains("+    required_if = [(\"state\", \"present\", (\"path\",))]\n"));
    assert!(!diff.contains("\n-"), "nothing should be removed:\n{diff}");
}

#[test]
fn test_no_diff_when_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let module = copy_fixture(dir.path(), "widget.py");
    process_module(&module, &GeneratorConfig::default(), &mut io::sink()).unwrap();

    let config = GeneratorConfig {
        show_diff: true,
        ..GeneratorConfig::default()
    };
    let mut diff: Vec<u8> = Vec::new();
    assert!(!process_module(&module, &config, &mut diff).unwrap());
    assert!(diff.is_empty());
}

#[test]
fn test_stale_region_is_replaced() {
    let dir = tempfile::tempdir().unwrap();
    let module = copy_fixture(dir.path(), "widget.py");
    let source = fs::read_to_string(&module).unwrap();
    let stale = source.replacen(
        "    # AUTOMATIC MODULE ARGUMENTS\n    # AUTOMATIC MODULE ARGUMENTS\n",
        "    # AUTOMATIC MODULE ARGUMENTS\n    argument_spec = {}\n    # AUTOMATIC MODULE ARGUMENTS\n",
        1,
    );
    fs::write(&module, stale).unwrap();

    assert!(process_module(&module, &GeneratorConfig::default(), &mut io::sink()).unwrap());
    let patched = fs::read_to_string(&module).unwrap();
    assert!(!patched.contains("argument_spec = {}"));
    assert!(patched.contains(GENERATED_WIDGET_REGION));
}

#[test]
fn test_single_marker_fails() {
    let err = process_module(
        &fixture("single_marker.py"),
        &GeneratorConfig::default(),
        &mut io::sink(),
    )
    .unwrap_err();
    assert!(matches!(err, GenError::MissingMarkerPair));
}

#[test]
fn test_unconvertible_trigger_fails() {
    let err = process_module(
        &fixture("bad_trigger.py"),
        &GeneratorConfig::default(),
        &mut io::sink(),
    )
    .unwrap_err();
    match err {
        GenError::TypeConversion { option, source } => {
            assert_eq!(option, "force");
            assert_eq!(source.target, OptionType::Bool);
            assert_eq!(source.value, "maybe");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_batch_continues_after_failures() {
    let dir = tempfile::tempdir().unwrap();
    let bad = copy_fixture(dir.path(), "bad_trigger.py");
    let single = copy_fixture(dir.path(), "single_marker.py");
    let widget = copy_fixture(dir.path(), "widget.py");
    let missing = dir.path().join("missing.py");

    let report = process_modules(
        &[&bad, &missing, &single, &widget],
        &GeneratorConfig::default(),
        &mut io::sink(),
    );

    assert_eq!(report.modules.len(), 4);
    assert!(matches!(
        report.modules[0].status,
        ModuleStatus::Failed(GenError::TypeConversion { .. })
    ));
    assert!(matches!(
        report.modules[1].status,
        ModuleStatus::Failed(GenError::Io(_))
    ));
    assert!(matches!(
        report.modules[2].status,
        ModuleStatus::Failed(GenError::MissingMarkerPair)
    ));
    assert!(matches!(report.modules[3].status, ModuleStatus::Changed));
    assert!(report.changed());
    assert!(report.failed());
    assert_eq!(report.exit_code(), 2);
    assert!(fs::read_to_string(&widget).unwrap().contains(GENERATED_WIDGET_REGION));
}

#[test]
fn test_markers_after_the_pair_are_inert() {
    let dir = tempfile::tempdir().unwrap();
    let module = dir.path().join("three.py");
    let tail = "# AUTOMATIC MODULE ARGUMENTS\nkeep = True\n# AUTOMATIC MODULE ARGUMENTS\nalso_keep = 1\n";
    fs::write(
        &module,
        format!(
            "DOCUMENTATION = '''\noptions:\n  name:\n    description: Name.\n'''\n# AUTOMATIC MODULE ARGUMENTS\n{tail}"
        ),
    )
    .unwrap();

    assert!(process_module(&module, &GeneratorConfig::default(), &mut io::sink()).unwrap());
    let patched = fs::read_to_string(&module).unwrap();
    assert!(patched.ends_with(&format!(
        "# AUTOMATIC MODULE ARGUMENTS\nargument_spec = {{\"name\": {{}}}}\n{tail}"
    )));
    assert!(!patched.contains("keep = True\nargument_spec"));
}

#[test]
fn test_all_unchanged_batch_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let module = copy_fixture(dir.path(), "widget.py");
    let config = GeneratorConfig::default();
    process_module(&module, &config, &mut io::sink()).unwrap();

    let report = process_modules(&[&module], &config, &mut io::sink());
    assert!(!report.changed());
    assert!(!report.failed());
    assert_eq!(report.exit_code(), 0);
}
