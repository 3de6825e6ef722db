// tests/config_loading.rs

use std::error::Error;
use std::io::Write;
use std::path::{Path, PathBuf};

use forgewatch::config::{RawConfig, load_and_validate, load_rc, parse_rc, render_rc, write_rc};
use forgewatch::errors::ForgewatchError;
use forgewatch::fs::RealFileSystem;
use forgewatch::fs::mock::MockFileSystem;
use forgewatch_test_utils::init_tracing;
use tempfile::{NamedTempFile, TempDir};

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn parses_all_recognised_keys() {
    let raw = parse_rc("path=src include\nbuild=make && ./app | tee log\nextensions=.c .h\n");

    assert_eq!(raw.paths, vec!["src".to_string(), "include".to_string()]);
    assert_eq!(raw.build.as_deref(), Some("make && ./app | tee log"));
    assert_eq!(raw.extensions.as_deref(), Some(".c .h"));
}

#[test]
fn accepts_legacy_prefixed_keys_and_crlf() {
    let raw = parse_rc(
        "ForgWatch_path=/proj/src\r\nForgWatch_build=echo built\r\nForgWatch_Extension=.c\r\n",
    );

    assert_eq!(raw.paths, vec!["/proj/src".to_string()]);
    assert_eq!(raw.build.as_deref(), Some("echo built"));
    assert_eq!(raw.extensions.as_deref(), Some(".c"));
}

#[test]
fn ignores_unknown_lines_and_keeps_the_last_value() {
    let raw = parse_rc("# comment\nbogus line\ncolor=red\nbuild=first\nbuild=second=with=equals\n");

    assert!(raw.paths.is_empty());
    assert_eq!(raw.build.as_deref(), Some("second=with=equals"));
    assert!(raw.extensions.is_none());
}

#[test]
fn missing_rc_file_is_not_an_error() -> TestResult {
    let fs = MockFileSystem::new();
    let raw = load_rc(&fs, Path::new("/proj/.forgewatchrc"))?;
    assert_eq!(raw, RawConfig::default());
    Ok(())
}

#[test]
fn rc_values_win_and_positionals_fill_the_gaps() -> TestResult {
    init_tracing();

    let fs = MockFileSystem::new();
    fs.add_dir("/proj/src");
    fs.add_dir("/other");
    fs.add_file("/proj/.forgewatchrc", "path=/proj/src\nextensions=.c\n");

    let fallback = RawConfig {
        paths: vec!["/other".to_string()],
        build: Some("echo built".to_string()),
        extensions: None,
    };
    let cfg = load_and_validate(&fs, Path::new("/proj/.forgewatchrc"), fallback)?;

    assert_eq!(cfg.roots(), &[PathBuf::from("/proj/src")]);
    assert_eq!(cfg.build_command(), "echo built");
    let exts: Vec<&str> = cfg.extensions().map(|e| e.iter().collect()).unwrap_or_default();
    assert_eq!(exts, vec![".c"]);
    Ok(())
}

#[test]
fn positionals_alone_are_enough() -> TestResult {
    let fs = MockFileSystem::new();
    fs.add_dir("/a");
    fs.add_dir("/b");

    let fallback = RawConfig {
        paths: vec!["/a".to_string(), "/b".to_string(), "/a".to_string()],
        build: Some("make".to_string()),
        extensions: None,
    };
    let cfg = load_and_validate(&fs, Path::new("/.forgewatchrc"), fallback)?;

    assert_eq!(cfg.roots(), &[PathBuf::from("/a"), PathBuf::from("/b")]);
    assert!(cfg.extensions().is_none());
    Ok(())
}

#[test]
fn missing_paths_or_command_is_a_config_error() {
    let fs = MockFileSystem::new();
    fs.add_dir("/a");

    let no_paths = RawConfig {
        build: Some("make".to_string()),
        ..RawConfig::default()
    };
    assert!(matches!(
        no_paths.resolve(&fs),
        Err(ForgewatchError::ConfigError(_))
    ));

    let blank_build = RawConfig {
        paths: vec!["/a".to_string()],
        build: Some("   ".to_string()),
        extensions: None,
    };
    assert!(matches!(
        blank_build.resolve(&fs),
        Err(ForgewatchError::ConfigError(_))
    ));
}

#[test]
fn unresolvable_or_non_directory_paths_are_rejected() {
    let fs = MockFileSystem::new();
    fs.add_file("/proj/README", "hello");

    for path in ["/does/not/exist", "/proj/README"] {
        let raw = RawConfig {
            paths: vec![path.to_string()],
            build: Some("make".to_string()),
            extensions: None,
        };
        match raw.resolve(&fs) {
            Err(ForgewatchError::ConfigError(msg)) => assert!(msg.contains(path), "{msg}"),
            other => panic!("expected ConfigError for {path}, got {other:?}"),
        }
    }
}

#[test]
fn relative_paths_resolve_to_absolute_directories() -> TestResult {
    let dir = TempDir::new()?;
    std::fs::create_dir(dir.path().join("src"))?;

    let mut rc = NamedTempFile::new_in(dir.path())?;
    writeln!(rc, "path={}", dir.path().join("src").join("..").join("src").display())?;
    writeln!(rc, "build=echo built")?;

    let cfg = load_and_validate(&RealFileSystem, rc.path(), RawConfig::default())?;

    let expected = dir.path().join("src").canonicalize()?;
    assert_eq!(cfg.roots(), &[expected]);
    assert!(cfg.roots()[0].is_absolute());
    Ok(())
}

#[test]
fn wizard_output_reads_back_as_the_same_config() -> TestResult {
    let fs = MockFileSystem::new();
    let raw = RawConfig {
        paths: vec!["/proj/src".to_string(), "/proj/include".to_string()],
        build: Some("make -j4 && ./app".to_string()),
        extensions: Some(".c .h".to_string()),
    };

    write_rc(&fs, Path::new("/proj/.forgewatchrc"), &raw)?;

    let written = load_rc(&fs, Path::new("/proj/.forgewatchrc"))?;
    assert_eq!(written, raw);
    assert_eq!(
        render_rc(&raw),
        "path=/proj/src /proj/include\nbuild=make -j4 && ./app\nextensions=.c .h\n"
    );
    Ok(())
}
