//! End-to-end round trip through the in-process JVM.
//!
//! Everything lives in a single test because a process gets one JVM; the
//! test skips with a note when `javac` is missing or no JVM can be
//! started in this environment.

use std::fs;
use std::path::Path;
use std::process::Command;

use classforge::descriptor::{ClassDescriptor, Inheritance, MethodDescriptor, Visibility};
use classforge::host::UnitHost;
use classforge::loader::{MappedUnitLoader, Resolution};
use classforge::render;
use classforge::toolchain::Toolchain;

const GOLDEN_PREFIX: &str = "package org.example;\npublic class SomeClass implements Worker {\n\
                             public void doWork() {\nSystem.out.println(1);\n}\n}\n";

fn javac_available() -> bool {
    Command::new("javac").arg("-version").output().is_ok()
}

/// Places `org/example/Worker.class` under the work directory so the
/// generated class can compile against and link the capability.
fn compile_capability(work_dir: &Path) {
    let source = work_dir.join("Worker.java");
    fs::write(
        &source,
        "package org.example;\n\npublic interface Worker {\n    void doWork();\n}\n",
    )
    .unwrap();
    let status = Command::new("javac")
        .arg("-d")
        .arg(work_dir)
        .arg(&source)
        .status()
        .unwrap();
    assert!(status.success(), "capability interface must compile");
}

#[test]
fn generated_unit_round_trips_into_the_running_process() {
    if !javac_available() {
        eprintln!("skipping: javac not available");
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let work_dir = dir.path();
    compile_capability(work_dir);

    let class = ClassDescriptor::builder("SomeClass")
        .package("org.example")
        .visibility(Visibility::Public)
        .inheritance(Inheritance::None)
        .capability("Worker")
        .method(
            MethodDescriptor::builder("doWork")
                .visibility(Visibility::Public)
                .returns("void")
                .body("System.out.println(1);")
                .build(),
        )
        .build()
        .unwrap();
    assert!(
        render::class_text(&class).starts_with(GOLDEN_PREFIX),
        "rendered unit must match the agreed source shape"
    );

    let toolchain = Toolchain::javac();
    let artifact = toolchain.compile(&class, work_dir).unwrap();

    // A second unit whose side effect is observable from outside the JVM:
    // one invocation appends exactly one byte to the marker file.
    let marker = work_dir.join("invoked.log");
    let probe = ClassDescriptor::builder("Probe")
        .visibility(Visibility::Public)
        .method(
            MethodDescriptor::builder("doWork")
                .visibility(Visibility::Public)
                .returns("void")
                .body(format!(
                    "try {{\n\
                     java.io.FileWriter w = new java.io.FileWriter(\"{}\", true);\n\
                     w.write(\"x\");\n\
                     w.close();\n\
                     }} catch (java.io.IOException e) {{\n\
                     throw new RuntimeException(e);\n\
                     }}",
                    marker.display()
                ))
                .build(),
        )
        .build()
        .unwrap();
    let probe_artifact = toolchain.compile(&probe, work_dir).unwrap();

    let mut loader = MappedUnitLoader::new();
    loader.register(class.qualified_name(), &artifact);
    loader.register(probe.qualified_name(), &probe_artifact);

    match loader.resolve("org.example.SomeClass").unwrap() {
        Resolution::Defined(bytes) => assert_eq!(bytes, fs::read(&artifact).unwrap()),
        Resolution::Delegated => panic!("registered unit must not delegate"),
    }

    let host = match UnitHost::start(&[work_dir.to_path_buf()]) {
        Ok(host) => host,
        Err(err) => {
            eprintln!("skipping: unable to start a JVM: {err}");
            return;
        }
    };

    // Mapped load: SomeClass.class sits flat in the work directory, where
    // the class path alone would never find a unit named org.example.*.
    let unit = host.load(&loader, "org.example.SomeClass").unwrap();
    let instance = host.instantiate(&unit, Some("org.example.Worker")).unwrap();
    host.invoke(&instance, "doWork", "()V").unwrap();

    let probe_unit = host.load(&loader, "Probe").unwrap();
    let probe_instance = host.instantiate(&probe_unit, None).unwrap();
    host.invoke(&probe_instance, "doWork", "()V").unwrap();
    assert_eq!(
        fs::read_to_string(&marker).unwrap(),
        "x",
        "the generated body must run exactly once"
    );

    // Unmapped names delegate to the JVM's own loading strategy.
    let delegated = host.load(&loader, "java.util.ArrayList").unwrap();
    assert_eq!(delegated.name(), "java.util.ArrayList");

    // A name nobody knows surfaces as a load failure.
    assert!(host.load(&loader, "org.example.Ghost").is_err());

    // The capability cast is enforced: Probe does not implement Worker.
    assert!(host
        .instantiate(&probe_unit, Some("org.example.Worker"))
        .is_err());
}
