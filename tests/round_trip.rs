//! Driver and loader properties that need a real `javac` on the path.
//! Tests that would invoke the compiler skip with a note when the
//! toolchain is absent, mirroring how the pipeline itself reports it.

use std::fs;
use std::process::Command;

use classforge::descriptor::{ClassDescriptor, MethodDescriptor, Visibility};
use classforge::error::Error;
use classforge::loader::{MappedUnitLoader, Resolution};
use classforge::render;
use classforge::toolchain::Toolchain;

fn javac_available() -> bool {
    Command::new("javac").arg("-version").output().is_ok()
}

fn tempdir_or_panic() -> tempfile::TempDir {
    tempfile::tempdir().unwrap_or_else(|err| panic!("temp dir: {err}"))
}

fn some_class(body: &str) -> ClassDescriptor {
    let method = MethodDescriptor::builder("doWork")
        .visibility(Visibility::Public)
        .returns("void")
        .body(body)
        .build();
    ClassDescriptor::builder("SomeClass")
        .visibility(Visibility::Public)
        .method(method)
        .build()
        .unwrap_or_else(|err| panic!("descriptor: {err}"))
}

#[test]
fn compile_produces_artifact_at_the_conventional_path() {
    if !javac_available() {
        eprintln!("skipping: javac not available");
        return;
    }
    let dir = tempdir_or_panic();
    let class = some_class("System.out.println(1);");
    let toolchain = Toolchain::javac();

    let artifact = toolchain.compile(&class, dir.path()).unwrap();
    assert_eq!(artifact, dir.path().join("SomeClass.class"));
    assert!(artifact.exists(), "artifact must exist at the reported path");

    let source = fs::read_to_string(dir.path().join("SomeClass.java")).unwrap();
    assert_eq!(source, render::class_text(&class), "source written verbatim");
}

#[test]
fn resolved_bytes_match_the_artifact_on_disk() {
    if !javac_available() {
        eprintln!("skipping: javac not available");
        return;
    }
    let dir = tempdir_or_panic();
    let class = some_class("System.out.println(1);");
    let artifact = Toolchain::javac().compile(&class, dir.path()).unwrap();

    let mut loader = MappedUnitLoader::new();
    loader.register(class.qualified_name(), &artifact);

    match loader.resolve(&class.qualified_name()).unwrap() {
        Resolution::Defined(bytes) => assert_eq!(bytes, fs::read(&artifact).unwrap()),
        Resolution::Delegated => panic!("registered unit must not delegate"),
    }
}

#[test]
fn recompilation_overwrites_and_reports_the_same_artifact() {
    if !javac_available() {
        eprintln!("skipping: javac not available");
        return;
    }
    let dir = tempdir_or_panic();
    let class = some_class("System.out.println(1);");
    let toolchain = Toolchain::javac();

    let first = toolchain.compile(&class, dir.path()).unwrap();
    let first_bytes = fs::read(&first).unwrap();
    let second = toolchain.compile(&class, dir.path()).unwrap();

    assert_eq!(first, second);
    assert_eq!(fs::read(&second).unwrap(), first_bytes);
}

#[test]
fn compiler_rejection_reports_the_exit_status() {
    if !javac_available() {
        eprintln!("skipping: javac not available");
        return;
    }
    let dir = tempdir_or_panic();
    let class = some_class("this is not java");

    match Toolchain::javac().compile(&class, dir.path()) {
        Err(Error::Compile { program, status }) => {
            assert_eq!(program, "javac");
            assert!(!status.success());
        }
        other => panic!("expected compile failure, got {other:?}"),
    }
}

#[test]
fn no_artifact_path_is_reported_after_a_failed_compile() {
    if !javac_available() {
        eprintln!("skipping: javac not available");
        return;
    }
    let dir = tempdir_or_panic();
    let class = some_class("definitely broken ===");

    assert!(Toolchain::javac().compile(&class, dir.path()).is_err());
    // The source was still written; only the artifact is missing.
    assert!(dir.path().join("SomeClass.java").exists());
    assert!(!dir.path().join("SomeClass.class").exists());
}
