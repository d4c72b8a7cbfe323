//! Host-environment boundary: materializing compiled units into the
//! running process and invoking them through a capability contract.
//!
//! The host is a decorator over the JVM's native loading facility: a
//! mapped name is defined from the bytes the [`MappedUnitLoader`] resolved,
//! an unmapped name falls through to the JVM's own class-path strategy.
//! Whether a name can be defined twice is governed by the JVM's
//! load-once-per-name semantics, not by this layer.

use std::path::PathBuf;

use jni::objects::{GlobalRef, JClass, JObject};
use jni::{AttachGuard, InitArgsBuilder, JNIEnv, JNIVersion, JavaVM};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::loader::{MappedUnitLoader, Resolution};

/// A unit materialized into the host's namespace.
pub struct LoadedUnit {
    name: String,
    class: GlobalRef,
}

impl LoadedUnit {
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// An object constructed from a loaded unit.
pub struct UnitInstance {
    name: String,
    object: GlobalRef,
}

impl UnitInstance {
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// An in-process JVM hosting dynamically loaded units.
pub struct UnitHost {
    vm: JavaVM,
}

impl UnitHost {
    /// Start the host JVM with the given directories on its class path.
    ///
    /// The JVM specification allows a single VM per process; a second call
    /// in the same process fails with a host-start error.
    pub fn start(class_path: &[PathBuf]) -> Result<Self> {
        let mut builder = InitArgsBuilder::new().version(JNIVersion::V8);
        if !class_path.is_empty() {
            let separator = if cfg!(windows) { ";" } else { ":" };
            let joined = class_path
                .iter()
                .map(|path| path.display().to_string())
                .collect::<Vec<_>>()
                .join(separator);
            let option = format!("-Djava.class.path={joined}");
            builder = builder.option(option);
        }
        let args = builder
            .build()
            .map_err(|err| Error::host_start(err.to_string()))?;
        let vm = JavaVM::new(args).map_err(|err| Error::host_start(err.to_string()))?;
        info!(target: "pipeline", stage = "host.start", status = "ok");
        Ok(Self { vm })
    }

    /// Materialize a unit by name: table-mapped names are defined from
    /// their artifact bytes, everything else delegates to the JVM's
    /// default loading strategy.
    pub fn load(&self, loader: &MappedUnitLoader, name: &str) -> Result<LoadedUnit> {
        let mut env = self.attach()?;
        let internal = internal_name(name);
        let class = match loader.resolve(name)? {
            Resolution::Defined(bytes) => {
                let system_loader = system_class_loader(&mut env)?;
                match env.define_class(internal.as_str(), &system_loader, &bytes) {
                    Ok(class) => class,
                    Err(err) => return Err(load_failure(&mut env, name, &err)),
                }
            }
            Resolution::Delegated => match env.find_class(internal.as_str()) {
                Ok(class) => class,
                Err(err) => return Err(load_failure(&mut env, name, &err)),
            },
        };
        let class = env
            .new_global_ref(class)
            .map_err(|err| Error::host_start(err.to_string()))?;
        info!(target: "pipeline", stage = "host.load", unit = name, status = "ok");
        Ok(LoadedUnit {
            name: name.to_string(),
            class,
        })
    }

    /// Construct an instance of a loaded unit through its zero-argument
    /// constructor, optionally checking a capability cast.
    ///
    /// The cast mirrors what the compiler enforced at compile time; no
    /// further verification of the capability's methods happens here.
    pub fn instantiate(
        &self,
        unit: &LoadedUnit,
        capability: Option<&str>,
    ) -> Result<UnitInstance> {
        let mut env = self.attach()?;
        let class_ref = env
            .new_local_ref(unit.class.as_obj())
            .map_err(|err| Error::instantiation(&unit.name, err.to_string()))?;
        let class = JClass::from(class_ref);
        let object = match env.new_object(class, "()V", &[]) {
            Ok(object) => object,
            Err(err) => {
                describe_pending_exception(&mut env);
                return Err(Error::instantiation(&unit.name, err.to_string()));
            }
        };
        if let Some(capability) = capability {
            let capability_class = match env.find_class(internal_name(capability).as_str()) {
                Ok(class) => class,
                Err(err) => {
                    describe_pending_exception(&mut env);
                    return Err(Error::instantiation(
                        &unit.name,
                        format!("capability `{capability}` is unknown to the host: {err}"),
                    ));
                }
            };
            let implements = env
                .is_instance_of(&object, capability_class)
                .map_err(|err| Error::instantiation(&unit.name, err.to_string()))?;
            if !implements {
                return Err(Error::CapabilityMismatch {
                    name: unit.name.clone(),
                    capability: capability.to_string(),
                });
            }
        }
        let object = env
            .new_global_ref(object)
            .map_err(|err| Error::instantiation(&unit.name, err.to_string()))?;
        Ok(UnitInstance {
            name: unit.name.clone(),
            object,
        })
    }

    /// Invoke a method on an instance through its pre-agreed JNI
    /// signature, e.g. `invoke(&worker, "doWork", "()V")`.
    pub fn invoke(&self, instance: &UnitInstance, method: &str, signature: &str) -> Result<()> {
        let mut env = self.attach()?;
        if let Err(err) = env.call_method(instance.object.as_obj(), method, signature, &[]) {
            describe_pending_exception(&mut env);
            return Err(Error::invocation(&instance.name, method, err.to_string()));
        }
        info!(
            target: "pipeline",
            stage = "host.invoke",
            unit = %instance.name,
            method,
            status = "ok"
        );
        Ok(())
    }

    fn attach(&self) -> Result<AttachGuard<'_>> {
        self.vm
            .attach_current_thread()
            .map_err(|err| Error::host_start(err.to_string()))
    }
}

/// JNI internal form of a binary name: dots become slashes.
fn internal_name(name: &str) -> String {
    name.replace('.', "/")
}

fn system_class_loader<'local>(env: &mut JNIEnv<'local>) -> Result<JObject<'local>> {
    let value = env
        .call_static_method(
            "java/lang/ClassLoader",
            "getSystemClassLoader",
            "()Ljava/lang/ClassLoader;",
            &[],
        )
        .map_err(|err| Error::host_start(err.to_string()))?;
    value.l().map_err(|err| Error::host_start(err.to_string()))
}

fn load_failure(env: &mut JNIEnv<'_>, name: &str, err: &jni::errors::Error) -> Error {
    describe_pending_exception(env);
    warn!(
        target: "pipeline",
        stage = "host.load",
        unit = name,
        status = "error",
        error = %err
    );
    Error::unit_not_found(name)
}

/// Relay a pending Java exception to stderr and clear it so the
/// environment stays usable for the caller's error path.
fn describe_pending_exception(env: &mut JNIEnv<'_>) {
    if env.exception_check().unwrap_or(false) {
        let _ = env.exception_describe();
        let _ = env.exception_clear();
    }
}
