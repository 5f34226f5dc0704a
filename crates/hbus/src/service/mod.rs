// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Service interfaces: member descriptors, registration and dispatch.
//!
//! A service author declares members through the builders on [`Method`],
//! [`Signal`] and [`Property`], then registers them on an
//! [`InterfaceBuilder`]. Registration validates every declaration (split
//! getter/setter property declarations are merged, writable properties must
//! end up with a setter) and produces an immutable [`Interface`] whose
//! member collections keep insertion order and resolve names in O(1).
//!
//! # Example
//!
//! ```rust
//! use hbus::service::{Interface, Method, Signal};
//! use hbus::value::Value;
//! use std::sync::Arc;
//!
//! let interface = Interface::builder("com.example.Echo")
//!     .method(
//!         Method::builder("Echo")
//!             .in_arg("text", "s")
//!             .out("s")
//!             .handler(Arc::new(|args: &[Value]| Ok(Some(args[0].clone()))))
//!             .build()?,
//!     )
//!     .signal(
//!         Signal::builder("Echoed")
//!             .out("s")
//!             .trigger(Arc::new(|args: &[Value]| args.first().cloned()))
//!             .build()?,
//!     )
//!     .build()?;
//!
//! assert!(interface.method("Echo").is_some());
//! # Ok::<(), hbus::service::BuildError>(())
//! ```

mod interface;
mod member;

pub use interface::{Interface, InterfaceBuilder};
pub use member::{Arg, Method, MethodBuilder, Property, PropertyBuilder, Signal, SignalBuilder};

use crate::signature::SignatureError;
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// Interface name carrying property-change notifications.
pub const PROPERTIES_INTERFACE: &str = "org.freedesktop.DBus.Properties";
/// Member name of the property-change notification.
pub const PROPERTIES_CHANGED_MEMBER: &str = "PropertiesChanged";
/// Body signature of the property-change notification.
pub const PROPERTIES_CHANGED_SIGNATURE: &str = "sa{sv}as";

/// Direction of an argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgDirection {
    In,
    Out,
}

impl ArgDirection {
    /// Introspection attribute value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
        }
    }
}

/// Access mode of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyAccess {
    Read,
    Write,
    ReadWrite,
}

impl PropertyAccess {
    /// Whether a getter is exposed.
    pub fn readable(self) -> bool {
        matches!(self, Self::Read | Self::ReadWrite)
    }

    /// Whether a setter is required and exposed.
    pub fn writable(self) -> bool {
        matches!(self, Self::Write | Self::ReadWrite)
    }

    /// Introspection attribute value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::ReadWrite => "readwrite",
        }
    }
}

/// Callable backing a method. Receives the call body, returns the result
/// value (or `None` for a void method).
pub type MethodHandler =
    Arc<dyn Fn(&[Value]) -> Result<Option<Value>, CallError> + Send + Sync>;

/// Callable backing a signal. Receives the emitter's local arguments,
/// returns the signal payload (or `None` for a payload-free signal).
pub type SignalTrigger = Arc<dyn Fn(&[Value]) -> Option<Value> + Send + Sync>;

/// Callable producing a property's current value.
pub type PropertyGetter = Arc<dyn Fn() -> Result<Value, CallError> + Send + Sync>;

/// Callable storing a property's new value.
pub type PropertySetter = Arc<dyn Fn(Value) -> Result<(), CallError> + Send + Sync>;

/// Construction-time errors. These abort descriptor or interface
/// construction entirely; no partially-valid interface is ever observable.
#[derive(Debug)]
pub enum BuildError {
    /// A type or signature string does not parse.
    Signature(SignatureError),
    /// A method argument was annotated with more or less than one complete type.
    ArgTypeNotSingle { member: String, arg: String },
    /// A property type was annotated with more or less than one complete type.
    PropertyTypeNotSingle { property: String },
    /// Interface name fails D-Bus naming rules.
    InvalidInterfaceName(String),
    /// Member name fails D-Bus naming rules.
    InvalidMemberName(String),
    /// Property declared without a getter.
    PropertyMissingGetter { property: String },
    /// Method or signal declared without its callable.
    MissingHandler { member: String },
    /// Writable property reached registration without a setter.
    WritableWithoutSetter { property: String },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Signature(err) => write!(f, "invalid signature: {}", err),
            Self::ArgTypeNotSingle { member, arg } => write!(
                f,
                "argument \"{}\" of \"{}\" must be annotated with a single complete type",
                arg, member
            ),
            Self::PropertyTypeNotSingle { property } => write!(
                f,
                "the signature of property \"{}\" must be a single complete type",
                property
            ),
            Self::InvalidInterfaceName(name) => write!(f, "invalid interface name: \"{}\"", name),
            Self::InvalidMemberName(name) => write!(f, "invalid member name: \"{}\"", name),
            Self::PropertyMissingGetter { property } => {
                write!(f, "property \"{}\" was declared without a getter", property)
            }
            Self::MissingHandler { member } => {
                write!(f, "member \"{}\" was declared without its callable", member)
            }
            Self::WritableWithoutSetter { property } => write!(
                f,
                "property \"{}\" is writable but does not have a setter",
                property
            ),
        }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Signature(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SignatureError> for BuildError {
    fn from(err: SignatureError) -> Self {
        Self::Signature(err)
    }
}

/// Call-time errors, surfaced to the caller of the dispatch engine. A
/// failing dispatch notifies no transport at all.
#[derive(Debug)]
pub enum CallError {
    /// The addressed signal is disabled.
    SignalDisabled(String),
    /// No signal with that name on this interface.
    UnknownSignal(String),
    /// The callable returned a value but declares no out arguments.
    UnexpectedReturn { member: String },
    /// The callable declares several out arguments but returned a single
    /// non-sequence value.
    ExpectedSequence { member: String },
    /// Set attempted on a property without a setter.
    PropertyReadOnly(String),
    /// The user callable itself reported a failure.
    Failed(String),
}

impl fmt::Display for CallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SignalDisabled(name) => write!(f, "signal \"{}\" is disabled", name),
            Self::UnknownSignal(name) => {
                write!(f, "no signal named \"{}\" on this interface", name)
            }
            Self::UnexpectedReturn { member } => {
                write!(f, "\"{}\" was not expected to return an argument", member)
            }
            Self::ExpectedSequence { member } => {
                write!(f, "expected \"{}\" to return a sequence of arguments", member)
            }
            Self::PropertyReadOnly(name) => write!(f, "property \"{}\" is not writable", name),
            Self::Failed(message) => write!(f, "call failed: {}", message),
        }
    }
}

impl std::error::Error for CallError {}

/// Convert a callable result into a message body under the arity contract.
///
/// With no declared out arguments an absent result is the empty body and a
/// present result is an error. One out argument takes the result verbatim
/// as the only body element, without inspecting its shape. Several out
/// arguments require the result to be an ordered sequence, which becomes
/// the body as-is.
pub(crate) fn fn_result_to_body(
    member: &str,
    result: Option<Value>,
    out_len: usize,
) -> Result<Vec<Value>, CallError> {
    match result {
        None => Ok(Vec::new()),
        Some(_) if out_len == 0 => Err(CallError::UnexpectedReturn {
            member: member.to_owned(),
        }),
        Some(value) if out_len == 1 => Ok(vec![value]),
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(CallError::ExpectedSequence {
            member: member.to_owned(),
        }),
    }
}
