#![cfg(unix)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use std::time::{Duration, Instant};

use jsxt::{
    ArchiveToolchain, CancelToken, ChildProcessRunner, CompileError, Compiler, CompilerOptions,
    Phase,
};
use jsxt_archive::ArchiveLocation;
use zip::write::SimpleFileOptions;

const JSX: &str = "META-INF/node_modules/react-tools/bin/jsx";

/// A toolchain whose entry point records its arguments and working
/// directory, then exits with `exit_code`.
fn toolchain(dir: &Path, exit_code: i32) -> PathBuf {
    toolchain_running(
        dir,
        &format!(
            "pwd -P > invocation.txt\nprintf '%s\\n' \"$@\" >> invocation.txt\nexit {exit_code}\n"
        ),
    )
}

fn toolchain_running(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("jsxt-toolchain.zip");
    let script = format!("#!/bin/sh\n{body}");

    let file = File::create(&path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    let options = SimpleFileOptions::default();
    zip.add_directory("META-INF/node_modules/react-tools/bin/", options)
        .unwrap();
    zip.start_file(JSX, options.unix_permissions(0o755)).unwrap();
    zip.write_all(script.as_bytes()).unwrap();
    zip.start_file("com/example/Plugin.class", options).unwrap();
    zip.write_all(b"\xca\xfe\xba\xbe").unwrap();
    zip.finish().unwrap();
    path
}

fn options(root: &Path) -> CompilerOptions {
    CompilerOptions {
        node_module_extract_path: root.join("react-jsxtransformer"),
        source_path: root.join("src").to_string_lossy().into_owned(),
        target_path: root.join("out").to_string_lossy().into_owned(),
        module_ids: vec!["app/Main".to_string()],
        interpreter: Some("sh".to_string()),
        ..Default::default()
    }
}

fn compiler(archive: &Path, interpreter: Option<&str>) -> Compiler<ArchiveToolchain, ChildProcessRunner> {
    let location = ArchiveLocation::from_path(archive).unwrap();
    Compiler::new(
        ArchiveToolchain::new(location),
        ChildProcessRunner::new(interpreter),
    )
}

fn invocation(options: &CompilerOptions) -> Vec<String> {
    let recorded = options.node_module_extract_path.join("invocation.txt");
    std::fs::read_to_string(recorded)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn transformer_runs_inside_the_extract_path() {
    let dir = tempfile::tempdir().unwrap();
    let archive = toolchain(dir.path(), 0);
    let options = options(dir.path());
    let mut compiler = compiler(&archive, options.interpreter());

    compiler.compile(&options).unwrap();

    assert_eq!(compiler.phase(), Phase::Done);
    assert!(options.entry_point_path().is_file());
    assert!(!options.node_module_extract_path.join("com").exists());

    let lines = invocation(&options);
    let cwd = std::fs::canonicalize(&options.node_module_extract_path).unwrap();
    assert_eq!(Path::new(&lines[0]), cwd);
    assert_eq!(
        lines[1..],
        [
            "--source-charset",
            "utf8",
            "--output-charset",
            "utf8",
            "--target",
            "es5",
            "--extension",
            "js",
            options.source_path.as_str(),
            options.target_path.as_str(),
            "app/Main",
        ]
    );
}

#[test]
fn non_zero_exit_carries_the_code() {
    let dir = tempfile::tempdir().unwrap();
    let archive = toolchain(dir.path(), 2);
    let options = options(dir.path());
    let mut compiler = compiler(&archive, options.interpreter());

    let err = compiler.compile(&options).unwrap_err();

    assert!(matches!(err, CompileError::ToolFailed { code: 2, cause: None }));
    assert_eq!(
        err.to_string(),
        "execution: JSX transformer returned non zero status code 2"
    );
    assert_eq!(compiler.phase(), Phase::Failed);
}

#[test]
fn second_run_reuses_the_extract_path() {
    let dir = tempfile::tempdir().unwrap();
    let archive = toolchain(dir.path(), 0);
    let options = options(dir.path());
    let mut compiler = compiler(&archive, options.interpreter());

    compiler.compile(&options).unwrap();
    compiler.compile(&options).unwrap();

    assert_eq!(compiler.phase(), Phase::Done);
}

#[test]
fn entry_point_can_run_directly() {
    let dir = tempfile::tempdir().unwrap();
    let archive = toolchain(dir.path(), 0);
    let options = CompilerOptions {
        interpreter: Some(String::new()),
        ..options(dir.path())
    };
    let mut compiler = compiler(&archive, options.interpreter());

    compiler.compile(&options).unwrap();

    assert_eq!(invocation(&options).last().map(String::as_str), Some("app/Main"));
}

#[test]
fn archive_without_toolchain_fails_at_launch() {
    let dir = tempfile::tempdir().unwrap();
    let archive = dir.path().join("empty.zip");
    let mut zip = zip::ZipWriter::new(File::create(&archive).unwrap());
    zip.start_file("README", SimpleFileOptions::default()).unwrap();
    zip.write_all(b"nothing here\n").unwrap();
    zip.finish().unwrap();

    let options = options(dir.path());
    let mut compiler = compiler(&archive, options.interpreter());

    let err = compiler.compile(&options).unwrap_err();

    // sh reports the missing script with its own non-zero status
    assert!(err.is_build_failure());
    assert!(err.exit_code().is_some_and(|code| code != 0));
}

#[test]
fn missing_archive_is_unresolvable() {
    let dir = tempfile::tempdir().unwrap();
    let result = ArchiveLocation::from_path(dir.path().join("absent.jar"));
    assert!(matches!(
        result,
        Err(jsxt_archive::Error::LocationUnresolvable { .. })
    ));
}

#[test]
fn cancellation_stops_a_running_transformer() {
    let dir = tempfile::tempdir().unwrap();
    let archive = toolchain_running(dir.path(), "exec sleep 30\n");
    let options = options(dir.path());
    let cancel = CancelToken::new();
    let location = ArchiveLocation::from_path(&archive).unwrap();
    let runner = ChildProcessRunner::new(options.interpreter()).with_cancel(cancel.clone());
    let mut compiler = Compiler::new(ArchiveToolchain::new(location), runner);

    let trigger = std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(200));
        cancel.cancel();
    });
    let started = Instant::now();
    let err = compiler.compile(&options).unwrap_err();
    trigger.join().unwrap();

    assert!(matches!(
        err,
        CompileError::Launch(jsxt_platform::Error::Interrupted { .. })
    ));
    assert!(!err.is_build_failure());
    assert!(started.elapsed() < Duration::from_secs(10));
    assert_eq!(compiler.phase(), Phase::Failed);
}
