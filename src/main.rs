#![deny(unsafe_code)]
#![deny(clippy::all)]
#![deny(clippy::unwrap_used, clippy::expect_used)]

//! Demo pipeline: generate a `SomeClass` unit with a console-provided
//! `doWork` body, compile it, and invoke it in-process through the
//! `Worker` capability.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use classforge::console;
use classforge::descriptor::{ClassDescriptor, MethodDescriptor, Visibility};
use classforge::error::Result;
use classforge::host::UnitHost;
use classforge::loader::MappedUnitLoader;
use classforge::logging::{self, LogOptions};
use classforge::render;
use classforge::toolchain::Toolchain;

const CAPABILITY: &str = "Worker";
const CAPABILITY_SOURCE: &str = "public interface Worker {\n    void doWork();\n}\n";

fn main() -> ExitCode {
    logging::init(LogOptions::from_env());
    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn try_main() -> Result<()> {
    let work_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("workdir"));
    std::fs::create_dir_all(&work_dir)?;

    let method = read_method_from_console()?;
    let class = ClassDescriptor::builder("SomeClass")
        .visibility(Visibility::Public)
        .capability(CAPABILITY)
        .method(method)
        .build()?;

    let toolchain = Toolchain::javac();
    // The capability interface has to be on the search path before the
    // generated class can compile against it.
    toolchain.compile_source(CAPABILITY, CAPABILITY_SOURCE, &work_dir)?;
    let artifact = toolchain.compile(&class, &work_dir)?;

    let mut loader = MappedUnitLoader::new();
    loader.register(class.qualified_name(), &artifact);

    let host = UnitHost::start(std::slice::from_ref(&work_dir))?;
    let unit = host.load(&loader, &class.qualified_name())?;
    let instance = host.instantiate(&unit, Some(CAPABILITY))?;
    println!(
        "{} loaded successfully. Invoking doWork().",
        class.qualified_name()
    );
    host.invoke(&instance, "doWork", "()V")?;
    Ok(())
}

fn read_method_from_console() -> Result<MethodDescriptor> {
    let prototype = MethodDescriptor::builder("doWork")
        .visibility(Visibility::Public)
        .returns("void")
        .build();
    let stdin = io::stdin();
    let body = console::read_method_body(
        stdin.lock(),
        &mut io::stdout(),
        &render::method_header(&prototype),
    )?;
    Ok(MethodDescriptor::builder("doWork")
        .visibility(Visibility::Public)
        .returns("void")
        .body(body)
        .build())
}
