// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Introspection data model and XML rendering.
//!
//! [`Interface::introspect`](crate::service::Interface::introspect) projects
//! the non-disabled members of a service interface into these plain-data
//! description types. [`Interface::to_xml`] renders the standard
//! `org.freedesktop.DBus.Introspectable` element for the interface.

use crate::service::{ArgDirection, PropertyAccess};
use std::fmt::Write as _;

/// Description of a single argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arg {
    /// Argument name, if the declaration carried one.
    pub name: Option<String>,
    /// Argument direction.
    pub direction: ArgDirection,
    /// Complete-type token, e.g. `a{sv}`.
    pub ty: String,
}

/// Description of a method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    pub name: String,
    pub in_args: Vec<Arg>,
    pub out_args: Vec<Arg>,
}

/// Description of a signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signal {
    pub name: String,
    pub args: Vec<Arg>,
}

/// Description of a property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub name: String,
    /// Single complete-type token.
    pub ty: String,
    pub access: PropertyAccess,
}

/// Description of an interface: its non-disabled members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interface {
    pub name: String,
    pub methods: Vec<Method>,
    pub signals: Vec<Signal>,
    pub properties: Vec<Property>,
}

impl Interface {
    /// Render the `<interface>` element of an introspection document.
    pub fn to_xml(&self) -> String {
        let mut xml = String::new();
        let _ = writeln!(xml, "<interface name=\"{}\">", escape_attr(&self.name));
        for method in &self.methods {
            let _ = writeln!(xml, "  <method name=\"{}\">", escape_attr(&method.name));
            for arg in method.in_args.iter().chain(&method.out_args) {
                write_arg(&mut xml, arg);
            }
            xml.push_str("  </method>\n");
        }
        for signal in &self.signals {
            let _ = writeln!(xml, "  <signal name=\"{}\">", escape_attr(&signal.name));
            for arg in &signal.args {
                write_arg(&mut xml, arg);
            }
            xml.push_str("  </signal>\n");
        }
        for property in &self.properties {
            let _ = writeln!(
                xml,
                "  <property name=\"{}\" type=\"{}\" access=\"{}\"/>",
                escape_attr(&property.name),
                escape_attr(&property.ty),
                property.access.as_str()
            );
        }
        xml.push_str("</interface>\n");
        xml
    }
}

fn write_arg(xml: &mut String, arg: &Arg) {
    xml.push_str("    <arg");
    if let Some(name) = &arg.name {
        let _ = write!(xml, " name=\"{}\"", escape_attr(name));
    }
    let _ = writeln!(
        xml,
        " direction=\"{}\" type=\"{}\"/>",
        arg.direction.as_str(),
        escape_attr(&arg.ty)
    );
}

fn escape_attr(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_xml() {
        let iface = Interface {
            name: "com.example.Echo".into(),
            methods: vec![Method {
                name: "Echo".into(),
                in_args: vec![Arg {
                    name: Some("text".into()),
                    direction: ArgDirection::In,
                    ty: "s".into(),
                }],
                out_args: vec![Arg {
                    name: None,
                    direction: ArgDirection::Out,
                    ty: "s".into(),
                }],
            }],
            signals: vec![Signal {
                name: "Echoed".into(),
                args: vec![Arg {
                    name: None,
                    direction: ArgDirection::Out,
                    ty: "s".into(),
                }],
            }],
            properties: vec![Property {
                name: "Loud".into(),
                ty: "b".into(),
                access: PropertyAccess::ReadWrite,
            }],
        };

        let xml = iface.to_xml();
        assert!(xml.starts_with("<interface name=\"com.example.Echo\">"));
        assert!(xml.contains("<method name=\"Echo\">"));
        assert!(xml.contains("<arg name=\"text\" direction=\"in\" type=\"s\"/>"));
        assert!(xml.contains("<arg direction=\"out\" type=\"s\"/>"));
        assert!(xml.contains("<signal name=\"Echoed\">"));
        assert!(xml.contains("<property name=\"Loud\" type=\"b\" access=\"readwrite\"/>"));
        assert!(xml.ends_with("</interface>\n"));
    }

    #[test]
    fn test_attr_escaping() {
        assert_eq!(escape_attr("a&b<c>\"d'"), "a&amp;b&lt;c&gt;&quot;d&apos;");
    }
}
