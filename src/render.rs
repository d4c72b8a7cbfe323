//! Deterministic rendering of descriptors into source text.
//!
//! Every function here is pure: identical descriptors always render
//! byte-identical text. Header tokens appear in a fixed order (visibility,
//! then inheritance, then the core declaration) separated by single ASCII
//! spaces, with absent tokens (package-private, `Inheritance::None`)
//! contributing nothing.

use crate::descriptor::{ClassDescriptor, Inheritance, MethodDescriptor};

fn push_keyword(out: &mut String, keyword: &str) {
    if !keyword.is_empty() {
        out.push_str(keyword);
        out.push(' ');
    }
}

/// Declaration header of a method: modifiers, return type, name, and the
/// parenthesized raw parameter list.
pub fn method_header(method: &MethodDescriptor) -> String {
    let mut header = String::new();
    push_keyword(&mut header, method.visibility().keyword());
    push_keyword(&mut header, method.inheritance().keyword());
    header.push_str(method.return_type());
    header.push(' ');
    header.push_str(method.name());
    header.push('(');
    header.push_str(method.parameters());
    header.push(')');
    header
}

/// Full text of a method: the header followed by `;` for an abstract
/// member (its body is ignored) or the braced body otherwise.
pub fn method_text(method: &MethodDescriptor) -> String {
    let mut text = method_header(method);
    if method.inheritance() == Inheritance::Abstract {
        text.push(';');
    } else {
        text.push_str(" {\n");
        text.push_str(method.body());
        text.push_str("\n}");
    }
    text
}

/// Declaration header of a class, including the `implements` clause when
/// the capability list is non-empty (names joined by `, ` in insertion
/// order, duplicates passed through).
pub fn class_header(class: &ClassDescriptor) -> String {
    let mut header = String::new();
    push_keyword(&mut header, class.visibility().keyword());
    push_keyword(&mut header, class.inheritance().keyword());
    header.push_str("class ");
    header.push_str(class.name());
    if !class.capabilities().is_empty() {
        header.push_str(" implements ");
        header.push_str(&class.capabilities().join(", "));
    }
    header
}

/// Full text of a compilation unit: optional `package` line, class header,
/// each method's full text in insertion order followed by a newline, and
/// the closing brace.
pub fn class_text(class: &ClassDescriptor) -> String {
    let mut text = String::new();
    if !class.package().is_empty() {
        text.push_str("package ");
        text.push_str(class.package());
        text.push_str(";\n");
    }
    text.push_str(&class_header(class));
    text.push_str(" {\n");
    for method in class.methods() {
        text.push_str(&method_text(method));
        text.push('\n');
    }
    text.push_str("}\n");
    text
}
