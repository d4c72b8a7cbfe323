//! Driver for the external compiler toolchain.
//!
//! The driver renders a class descriptor, writes the text verbatim into the
//! work directory, and runs the compiler as a subprocess with that
//! directory on its unit-search path. Compiler diagnostics stream straight
//! through to the host's own output; the exit status is the only signal
//! interpreted programmatically. On success the artifact path follows the
//! toolchain's naming convention; the directory is never re-scanned.

use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info};

use crate::descriptor::ClassDescriptor;
use crate::error::{Error, Result};
use crate::render;

/// Environment variable overriding the compiler program of [`Toolchain::javac`].
pub const JAVAC_ENV: &str = "CLASSFORGE_JAVAC";

/// External compiler invocation recipe.
#[derive(Debug, Clone)]
pub struct Toolchain {
    program: String,
    source_ext: String,
    artifact_ext: String,
    search_path_flag: String,
}

impl Toolchain {
    /// The Java toolchain: `javac`, `.java` sources, `.class` artifacts,
    /// `-cp <workdir>` as the unit-search path.
    pub fn javac() -> Self {
        let program = env::var(JAVAC_ENV).unwrap_or_else(|_| "javac".into());
        Self::custom(program, "java", "class", "-cp")
    }

    /// A toolchain with explicit program, extensions, and search-path flag.
    pub fn custom(
        program: impl Into<String>,
        source_ext: impl Into<String>,
        artifact_ext: impl Into<String>,
        search_path_flag: impl Into<String>,
    ) -> Self {
        Self {
            program: program.into(),
            source_ext: source_ext.into(),
            artifact_ext: artifact_ext.into(),
            search_path_flag: search_path_flag.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Path of the source file for a unit named `name` in `work_dir`.
    pub fn source_path(&self, work_dir: &Path, name: &str) -> PathBuf {
        work_dir.join(format!("{name}.{}", self.source_ext))
    }

    /// Conventional path of the compiled artifact for a unit named `name`.
    pub fn artifact_path(&self, work_dir: &Path, name: &str) -> PathBuf {
        work_dir.join(format!("{name}.{}", self.artifact_ext))
    }

    /// Render `class` and write the text verbatim to
    /// `<work_dir>/<Name>.<source-ext>`, overwriting any existing file.
    pub fn write_source(&self, class: &ClassDescriptor, work_dir: &Path) -> Result<PathBuf> {
        self.write_unit_source(class.name(), &render::class_text(class), work_dir)
    }

    /// Write and compile a raw source text for a unit named `name`.
    ///
    /// This is the layer beneath [`Toolchain::compile`]; it also serves to
    /// bootstrap hand-written units (capability interfaces) onto the
    /// search path.
    pub fn compile_source(&self, name: &str, text: &str, work_dir: &Path) -> Result<PathBuf> {
        let source = self.write_unit_source(name, text, work_dir)?;
        self.run_compiler(&source, work_dir)?;
        let artifact = self.artifact_path(work_dir, name);
        info!(
            target: "pipeline",
            stage = "toolchain.compile",
            unit = name,
            status = "ok",
            artifact = %artifact.display()
        );
        Ok(artifact)
    }

    /// Render, persist, and compile a class descriptor, returning the
    /// conventional artifact path.
    ///
    /// Re-invocation with an identical descriptor and work directory
    /// rewrites byte-identical source and yields the same result.
    pub fn compile(&self, class: &ClassDescriptor, work_dir: &Path) -> Result<PathBuf> {
        self.compile_source(class.name(), &render::class_text(class), work_dir)
    }

    fn write_unit_source(&self, name: &str, text: &str, work_dir: &Path) -> Result<PathBuf> {
        let path = self.source_path(work_dir, name);
        fs::write(&path, text).map_err(|source| Error::SourceWrite {
            path: path.clone(),
            source,
        })?;
        debug!(
            target: "pipeline",
            stage = "toolchain.write",
            unit = name,
            path = %path.display(),
            source_digest = %blake3::hash(text.as_bytes()).to_hex()
        );
        Ok(path)
    }

    fn run_compiler(&self, source: &Path, work_dir: &Path) -> Result<()> {
        let mut cmd = Command::new(&self.program);
        cmd.arg(source).arg(&self.search_path_flag).arg(work_dir);
        // Inherited stdio: the subprocess's diagnostics are relayed, not parsed.
        let status = cmd.status().map_err(|err| {
            if err.kind() == ErrorKind::NotFound {
                Error::ToolchainMissing {
                    program: self.program.clone(),
                }
            } else {
                Error::Io(err)
            }
        })?;
        if !status.success() {
            return Err(Error::Compile {
                program: self.program.clone(),
                status,
            });
        }
        Ok(())
    }
}

impl Default for Toolchain {
    fn default() -> Self {
        Self::javac()
    }
}
