// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # hbus - D-Bus service-interface layer
//!
//! `hbus` turns a set of explicitly declared members (methods, properties,
//! signals) into a structured, introspectable D-Bus interface description,
//! and implements the runtime contract for converting member results into
//! wire-shaped message bodies fanned out to every attached connection.
//!
//! ## Quick Start
//!
//! ```rust
//! use hbus::{Interface, Method, Property, PropertyAccess, Value};
//! use std::sync::Arc;
//!
//! let interface = Interface::builder("com.example.Echo")
//!     .method(
//!         Method::builder("Echo")
//!             .in_arg("text", "s")
//!             .out("s")
//!             .handler(Arc::new(|args: &[Value]| Ok(args.first().cloned())))
//!             .build()?,
//!     )
//!     .property(
//!         Property::builder("Greeting", "s")
//!             .access(PropertyAccess::Read)
//!             .getter(Arc::new(|| Ok(Value::Str("hello".into()))))
//!             .build()?,
//!     )
//!     .build()?;
//!
//! // The transport layer resolves incoming calls by name...
//! let reply = interface
//!     .method("Echo")
//!     .unwrap()
//!     .invoke(&[Value::Str("hi".into())])?;
//! assert_eq!(reply, Some(Value::Str("hi".into())));
//!
//! // ...and introspection requests from the projected view.
//! let xml = interface.introspect().to_xml();
//! assert!(xml.contains("<method name=\"Echo\">"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +--------------------------------------------------------------------+
//! |                        Service Author                              |
//! |    Method/Signal/Property builders -> InterfaceBuilder             |
//! +--------------------------------------------------------------------+
//! |                        Service Layer                               |
//! |    Registration | Property Merge | Name Index | Dispatch           |
//! +--------------------------------------------------------------------+
//! |                        Type System                                 |
//! |    Signature Grammar | Dynamic Values | Tagged Variants            |
//! +--------------------------------------------------------------------+
//! |                        Transport Seam                              |
//! |    Transport trait: marshaling, framing, sockets (not this crate)  |
//! +--------------------------------------------------------------------+
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Interface`] | Registered interface: member collections, dispatch, introspection |
//! | [`Method`], [`Signal`], [`Property`] | Immutable member descriptors with builders |
//! | [`Signature`], [`Type`] | Parsed type-signature grammar |
//! | [`Value`], [`Variant`] | Dynamic message-body values and tagged values |
//! | [`Transport`] | Connection seam receiving notification fan-out |
//!
//! ## Scope
//!
//! This crate stops at the connection boundary: byte-level marshaling,
//! authentication, connection lifecycle and I/O scheduling belong to the
//! transport implementation. Dispatch is synchronous call/return; any
//! concurrency lives in the transport layer.

/// Introspection data model and XML rendering.
pub mod introspection;
/// Member descriptors, interface registration and dispatch.
pub mod service;
/// D-Bus type-signature grammar.
pub mod signature;
/// Connection seam between interfaces and the wire.
pub mod transport;
/// Name validation per the D-Bus specification.
pub mod validators;
/// Dynamic value model for message bodies.
pub mod value;

pub use service::{
    Arg, ArgDirection, BuildError, CallError, Interface, InterfaceBuilder, Method, MethodBuilder,
    MethodHandler, Property, PropertyAccess, PropertyBuilder, PropertyGetter, PropertySetter,
    Signal, SignalBuilder, SignalTrigger, PROPERTIES_CHANGED_MEMBER,
    PROPERTIES_CHANGED_SIGNATURE, PROPERTIES_INTERFACE,
};
pub use signature::{Signature, SignatureError, Type};
pub use transport::Transport;
pub use value::{Value, Variant};
