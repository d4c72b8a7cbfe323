//! Structural model for generated compilation units.
//!
//! Descriptors are built through consuming builders and are immutable once
//! frozen by `build()`; the renderer only ever sees frozen values.

use crate::error::{Error, Result};

/// Visibility of a method or class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Protected,
    Private,
    PackagePrivate,
}

impl Visibility {
    /// Source keyword for this visibility; package-private has none.
    pub fn keyword(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Private => "private",
            Visibility::PackagePrivate => "",
        }
    }
}

/// Inheritance qualifier of a method or class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inheritance {
    Abstract,
    Final,
    None,
}

impl Inheritance {
    /// Source keyword for this qualifier; `None` has none.
    pub fn keyword(self) -> &'static str {
        match self {
            Inheritance::Abstract => "abstract",
            Inheritance::Final => "final",
            Inheritance::None => "",
        }
    }
}

/// Frozen description of a single method.
///
/// `parameters` and `body` are opaque text inserted verbatim at render
/// time; an abstract method ignores its body entirely.
#[derive(Debug, Clone)]
pub struct MethodDescriptor {
    name: String,
    visibility: Visibility,
    inheritance: Inheritance,
    return_type: String,
    parameters: String,
    body: String,
}

impl MethodDescriptor {
    pub fn builder(name: impl Into<String>) -> MethodBuilder {
        MethodBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn inheritance(&self) -> Inheritance {
        self.inheritance
    }

    pub fn return_type(&self) -> &str {
        &self.return_type
    }

    pub fn parameters(&self) -> &str {
        &self.parameters
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Mutable construction phase of a [`MethodDescriptor`].
#[derive(Debug)]
pub struct MethodBuilder {
    name: String,
    visibility: Visibility,
    inheritance: Inheritance,
    return_type: String,
    parameters: String,
    body: String,
}

impl MethodBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::PackagePrivate,
            inheritance: Inheritance::None,
            return_type: "void".into(),
            parameters: String::new(),
            body: String::new(),
        }
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn inheritance(mut self, inheritance: Inheritance) -> Self {
        self.inheritance = inheritance;
        self
    }

    pub fn returns(mut self, return_type: impl Into<String>) -> Self {
        self.return_type = return_type.into();
        self
    }

    /// Raw parameter-list text, without the surrounding parentheses.
    pub fn parameters(mut self, parameters: impl Into<String>) -> Self {
        self.parameters = parameters.into();
        self
    }

    /// Raw statement text, inserted verbatim between the braces.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Freeze the builder. Method construction never fails.
    pub fn build(self) -> MethodDescriptor {
        MethodDescriptor {
            name: self.name,
            visibility: self.visibility,
            inheritance: self.inheritance,
            return_type: self.return_type,
            parameters: self.parameters,
            body: self.body,
        }
    }
}

/// Frozen description of a compilation unit: one class with its methods.
#[derive(Debug, Clone)]
pub struct ClassDescriptor {
    package: String,
    name: String,
    visibility: Visibility,
    inheritance: Inheritance,
    capabilities: Vec<String>,
    methods: Vec<MethodDescriptor>,
}

impl ClassDescriptor {
    pub fn builder(name: impl Into<String>) -> ClassBuilder {
        ClassBuilder::new(name)
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn inheritance(&self) -> Inheritance {
        self.inheritance
    }

    /// Implemented capability names, in insertion order.
    pub fn capabilities(&self) -> &[String] {
        &self.capabilities
    }

    /// Methods in insertion order; the order is significant at render time.
    pub fn methods(&self) -> &[MethodDescriptor] {
        &self.methods
    }

    /// Fully qualified unit name: `package.Name`, or the bare name when the
    /// package is empty.
    pub fn qualified_name(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.package, self.name)
        }
    }
}

/// Mutable construction phase of a [`ClassDescriptor`].
#[derive(Debug)]
pub struct ClassBuilder {
    package: String,
    name: String,
    visibility: Visibility,
    inheritance: Inheritance,
    capabilities: Vec<String>,
    methods: Vec<MethodDescriptor>,
}

impl ClassBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            package: String::new(),
            name: name.into(),
            visibility: Visibility::PackagePrivate,
            inheritance: Inheritance::None,
            capabilities: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn package(mut self, package: impl Into<String>) -> Self {
        self.package = package.into();
        self
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn inheritance(mut self, inheritance: Inheritance) -> Self {
        self.inheritance = inheritance;
        self
    }

    /// Append a capability name. Duplicates are kept; the renderer passes
    /// the list through without deduplication.
    pub fn capability(mut self, name: impl Into<String>) -> Self {
        self.capabilities.push(name.into());
        self
    }

    /// Append a method descriptor. Insertion order is preserved.
    pub fn method(mut self, method: MethodDescriptor) -> Self {
        self.methods.push(method);
        self
    }

    /// Freeze the builder.
    ///
    /// A top-level unit must be `Public` or `PackagePrivate`; nested-unit
    /// emission is unsupported, so `Protected`/`Private` is rejected here,
    /// before any rendering or I/O.
    pub fn build(self) -> Result<ClassDescriptor> {
        if matches!(self.visibility, Visibility::Protected | Visibility::Private) {
            return Err(Error::descriptor(format!(
                "top-level class `{}` cannot be `{}`: only public or package-private \
                 classes can be emitted as compilation units",
                self.name,
                self.visibility.keyword()
            )));
        }
        Ok(ClassDescriptor {
            package: self.package,
            name: self.name,
            visibility: self.visibility,
            inheritance: self.inheritance,
            capabilities: self.capabilities,
            methods: self.methods,
        })
    }
}
