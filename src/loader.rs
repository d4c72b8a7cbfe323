//! Name-indexed lookup table for compiled unit artifacts.
//!
//! The table maps fully qualified unit names to artifact paths on disk; it
//! is an index, not a cache. Resolution re-reads the file every time, a
//! mapped-but-unreadable file reports the same way as an unknown unit, and
//! an unmapped name is handed back to the hosting environment's default
//! loading strategy. Entries are never removed.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::error::{Error, Result};

/// Outcome of a name lookup.
#[derive(Debug)]
pub enum Resolution {
    /// The name was mapped; these are the raw bytes of its artifact.
    Defined(Vec<u8>),
    /// The name has no mapping; the host's default strategy applies.
    Delegated,
}

/// Mutable name→path table with process-wide lifetime.
///
/// Not synchronized: concurrent `register`/`resolve` from multiple threads
/// is outside this design.
#[derive(Debug, Default)]
pub struct MappedUnitLoader {
    units: HashMap<String, PathBuf>,
}

impl MappedUnitLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a mapping unconditionally; the last write wins.
    pub fn register(&mut self, name: impl Into<String>, path: impl Into<PathBuf>) {
        let name = name.into();
        let path = path.into();
        if let Some(previous) = self.units.insert(name.clone(), path) {
            debug!(
                target: "pipeline",
                stage = "loader.register",
                unit = %name,
                replaced = %previous.display()
            );
        }
    }

    pub fn is_mapped(&self, name: &str) -> bool {
        self.units.contains_key(name)
    }

    /// Look up `name` and read its artifact bytes.
    ///
    /// A read failure on a mapped path is folded into the not-found error
    /// rather than distinguished.
    pub fn resolve(&self, name: &str) -> Result<Resolution> {
        match self.units.get(name) {
            Some(path) => match fs::read(path) {
                Ok(bytes) => Ok(Resolution::Defined(bytes)),
                Err(_) => Err(Error::unit_not_found(name)),
            },
            None => Ok(Resolution::Delegated),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn tempdir_or_panic() -> tempfile::TempDir {
        tempfile::tempdir().unwrap_or_else(|err| panic!("temp dir: {err}"))
    }

    #[test]
    fn resolve_reads_the_mapped_artifact() {
        let dir = tempdir_or_panic();
        let artifact = dir.path().join("SomeClass.class");
        fs::write(&artifact, b"\xca\xfe\xba\xbe").unwrap();

        let mut loader = MappedUnitLoader::new();
        loader.register("org.example.SomeClass", &artifact);

        match loader.resolve("org.example.SomeClass").unwrap() {
            Resolution::Defined(bytes) => assert_eq!(bytes, b"\xca\xfe\xba\xbe"),
            Resolution::Delegated => panic!("mapped name must not delegate"),
        }
    }

    #[test]
    fn unmapped_names_delegate_without_error() {
        let loader = MappedUnitLoader::new();
        assert!(matches!(
            loader.resolve("never.Registered").unwrap(),
            Resolution::Delegated
        ));
    }

    #[test]
    fn reregistering_a_name_overwrites_the_mapping() {
        let dir = tempdir_or_panic();
        let first = dir.path().join("first.class");
        let second = dir.path().join("second.class");
        fs::write(&first, b"first").unwrap();
        fs::write(&second, b"second").unwrap();

        let mut loader = MappedUnitLoader::new();
        loader.register("SomeClass", &first);
        loader.register("SomeClass", &second);

        match loader.resolve("SomeClass").unwrap() {
            Resolution::Defined(bytes) => assert_eq!(bytes, b"second"),
            Resolution::Delegated => panic!("mapped name must not delegate"),
        }
    }

    #[test]
    fn unreadable_mapped_file_reports_not_found() {
        let dir = tempdir_or_panic();
        let mut loader = MappedUnitLoader::new();
        loader.register("SomeClass", dir.path().join("never-written.class"));

        match loader.resolve("SomeClass") {
            Err(Error::UnitNotFound { name }) => assert_eq!(name, "SomeClass"),
            other => panic!("expected not-found, got {other:?}"),
        }
    }

    #[test]
    fn resolution_is_uncached() {
        let dir = tempdir_or_panic();
        let artifact = dir.path().join("SomeClass.class");
        fs::write(&artifact, b"one").unwrap();

        let mut loader = MappedUnitLoader::new();
        loader.register("SomeClass", &artifact);
        assert!(matches!(
            loader.resolve("SomeClass").unwrap(),
            Resolution::Defined(bytes) if bytes == b"one"
        ));

        fs::write(&artifact, b"two").unwrap();
        assert!(matches!(
            loader.resolve("SomeClass").unwrap(),
            Resolution::Defined(bytes) if bytes == b"two"
        ));
    }
}
