#![deny(clippy::all, clippy::perf, clippy::suspicious)]
#![deny(clippy::unwrap_used, clippy::expect_used)]

//! Runtime generation, compilation, and in-process loading of Java
//! compilation units.
//!
//! The pipeline is synchronous and composed bottom-up: a [`descriptor`]
//! model is rendered to source text by [`render`], persisted and compiled
//! by the [`toolchain`] driver, registered with the name-indexed
//! [`loader`], and finally materialized and invoked through the [`host`]
//! JVM boundary.

pub mod console;
pub mod descriptor;
pub mod error;
pub mod host;
pub mod loader;
pub mod logging;
pub mod render;
pub mod toolchain;

pub use descriptor::{
    ClassBuilder, ClassDescriptor, Inheritance, MethodBuilder, MethodDescriptor, Visibility,
};
pub use error::{Error, Result};
pub use host::{LoadedUnit, UnitHost, UnitInstance};
pub use loader::{MappedUnitLoader, Resolution};
pub use toolchain::Toolchain;
