// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Member descriptors and their builders.
//!
//! Descriptors are built once at declaration time and are immutable
//! afterwards, with one exception: a [`Property`] may gain a setter while
//! the registrar merges split getter/setter declarations, before the owning
//! interface is constructed.

use crate::introspection;
use crate::service::{
    fn_result_to_body, ArgDirection, BuildError, CallError, MethodHandler, PropertyAccess,
    PropertyGetter, PropertySetter, SignalTrigger,
};
use crate::signature::{Signature, Type};
use crate::validators::is_member_name_valid;
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// A single declared argument of a method or signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arg {
    name: Option<String>,
    direction: ArgDirection,
    ty: Type,
}

impl Arg {
    fn new(name: Option<String>, direction: ArgDirection, ty: Type) -> Self {
        Self {
            name,
            direction,
            ty,
        }
    }

    /// Argument name, if the declaration carried one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Argument direction.
    pub fn direction(&self) -> ArgDirection {
        self.direction
    }

    /// The argument's complete type.
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    pub(crate) fn to_introspection(&self) -> introspection::Arg {
        introspection::Arg {
            name: self.name.clone(),
            direction: self.direction,
            ty: self.ty.to_string(),
        }
    }
}

/// A callable exposed as a D-Bus method.
///
/// Built through [`Method::builder`]; immutable once built. The transport
/// layer resolves an incoming call to a `Method` by name, invokes the
/// handler with the call body and converts the result with
/// [`Method::result_to_body`].
pub struct Method {
    name: String,
    disabled: bool,
    in_args: Vec<Arg>,
    out_args: Vec<Arg>,
    in_signature: String,
    out_signature: String,
    handler: MethodHandler,
}

impl Method {
    /// Start declaring a method with the given member name.
    pub fn builder(name: impl Into<String>) -> MethodBuilder {
        MethodBuilder {
            name: name.into(),
            disabled: false,
            in_args: Vec::new(),
            out: None,
            handler: None,
        }
    }

    /// Member name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the method is hidden from introspection.
    pub fn disabled(&self) -> bool {
        self.disabled
    }

    /// Declared input arguments, in declaration order.
    pub fn in_args(&self) -> &[Arg] {
        &self.in_args
    }

    /// Declared output arguments, in signature order.
    pub fn out_args(&self) -> &[Arg] {
        &self.out_args
    }

    /// Concatenated input argument types.
    pub fn in_signature(&self) -> &str {
        &self.in_signature
    }

    /// Output signature as declared (empty for void methods).
    pub fn out_signature(&self) -> &str {
        &self.out_signature
    }

    /// Run the handler with the given call body.
    ///
    /// The handler's result is propagated to the caller; converting it into
    /// a reply body is a separate step ([`Method::result_to_body`]) so the
    /// caller still sees the raw result.
    pub fn invoke(&self, args: &[Value]) -> Result<Option<Value>, CallError> {
        (self.handler)(args)
    }

    /// Convert a handler result into a reply body under the arity contract.
    pub fn result_to_body(&self, result: Option<Value>) -> Result<Vec<Value>, CallError> {
        fn_result_to_body(&self.name, result, self.out_args.len())
    }

    pub(crate) fn to_introspection(&self) -> introspection::Method {
        introspection::Method {
            name: self.name.clone(),
            in_args: self.in_args.iter().map(Arg::to_introspection).collect(),
            out_args: self.out_args.iter().map(Arg::to_introspection).collect(),
        }
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Method")
            .field("name", &self.name)
            .field("disabled", &self.disabled)
            .field("in_signature", &self.in_signature)
            .field("out_signature", &self.out_signature)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Method`].
pub struct MethodBuilder {
    name: String,
    disabled: bool,
    in_args: Vec<(String, String)>,
    out: Option<String>,
    handler: Option<MethodHandler>,
}

impl MethodBuilder {
    /// Declare an input argument with its complete-type token.
    pub fn in_arg(mut self, name: impl Into<String>, ty: impl Into<String>) -> Self {
        self.in_args.push((name.into(), ty.into()));
        self
    }

    /// Declare the output signature (may contain several complete types).
    pub fn out(mut self, signature: impl Into<String>) -> Self {
        self.out = Some(signature.into());
        self
    }

    /// Hide the method from introspection.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Attach the callable executed on invocation.
    pub fn handler(mut self, handler: MethodHandler) -> Self {
        self.handler = Some(handler);
        self
    }

    /// Validate the declaration and build the descriptor.
    pub fn build(self) -> Result<Method, BuildError> {
        if !is_member_name_valid(&self.name) {
            return Err(BuildError::InvalidMemberName(self.name));
        }

        let mut in_args = Vec::with_capacity(self.in_args.len());
        let mut in_signature = String::new();
        for (arg_name, ty_text) in &self.in_args {
            let parsed = Signature::parse(ty_text)?;
            if parsed.len() != 1 {
                return Err(BuildError::ArgTypeNotSingle {
                    member: self.name,
                    arg: arg_name.clone(),
                });
            }
            in_signature.push_str(ty_text);
            in_args.push(Arg::new(
                Some(arg_name.clone()),
                ArgDirection::In,
                parsed.types()[0].clone(),
            ));
        }

        let (out_args, out_signature) = match &self.out {
            None => (Vec::new(), String::new()),
            Some(out) => {
                let parsed = Signature::parse(out)?;
                let args = parsed
                    .types()
                    .iter()
                    .map(|ty| Arg::new(None, ArgDirection::Out, ty.clone()))
                    .collect();
                (args, out.clone())
            }
        };

        let handler = match self.handler {
            Some(handler) => handler,
            None => return Err(BuildError::MissingHandler { member: self.name }),
        };

        Ok(Method {
            name: self.name,
            disabled: self.disabled,
            in_args,
            out_args,
            in_signature,
            out_signature,
            handler,
        })
    }
}

/// A callable exposed as a D-Bus signal.
///
/// Signals model no remote-callable input arguments; the trigger's
/// parameters are emitter-local. The trigger's return value becomes the
/// signal payload under the arity contract.
pub struct Signal {
    name: String,
    disabled: bool,
    args: Vec<Arg>,
    signature: String,
    trigger: SignalTrigger,
}

impl Signal {
    /// Start declaring a signal with the given member name.
    pub fn builder(name: impl Into<String>) -> SignalBuilder {
        SignalBuilder {
            name: name.into(),
            disabled: false,
            out: None,
            trigger: None,
        }
    }

    /// Member name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the signal is hidden from introspection and not triggerable.
    pub fn disabled(&self) -> bool {
        self.disabled
    }

    /// Declared output arguments, in signature order.
    pub fn args(&self) -> &[Arg] {
        &self.args
    }

    /// Output signature as declared (empty for payload-free signals).
    pub fn signature(&self) -> &str {
        &self.signature
    }

    pub(crate) fn raise(&self, args: &[Value]) -> Option<Value> {
        (self.trigger)(args)
    }

    pub(crate) fn to_introspection(&self) -> introspection::Signal {
        introspection::Signal {
            name: self.name.clone(),
            args: self.args.iter().map(Arg::to_introspection).collect(),
        }
    }
}

impl fmt::Debug for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("name", &self.name)
            .field("disabled", &self.disabled)
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Signal`].
pub struct SignalBuilder {
    name: String,
    disabled: bool,
    out: Option<String>,
    trigger: Option<SignalTrigger>,
}

impl SignalBuilder {
    /// Declare the output signature (may contain several complete types).
    pub fn out(mut self, signature: impl Into<String>) -> Self {
        self.out = Some(signature.into());
        self
    }

    /// Hide the signal and make it non-triggerable.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Attach the trigger producing the signal payload.
    pub fn trigger(mut self, trigger: SignalTrigger) -> Self {
        self.trigger = Some(trigger);
        self
    }

    /// Validate the declaration and build the descriptor.
    pub fn build(self) -> Result<Signal, BuildError> {
        if !is_member_name_valid(&self.name) {
            return Err(BuildError::InvalidMemberName(self.name));
        }

        let (args, signature) = match &self.out {
            None => (Vec::new(), String::new()),
            Some(out) => {
                let parsed = Signature::parse(out)?;
                let args = parsed
                    .types()
                    .iter()
                    .map(|ty| Arg::new(None, ArgDirection::Out, ty.clone()))
                    .collect();
                (args, out.clone())
            }
        };

        let trigger = match self.trigger {
            Some(trigger) => trigger,
            None => return Err(BuildError::MissingHandler { member: self.name }),
        };

        Ok(Signal {
            name: self.name,
            disabled: self.disabled,
            args,
            signature,
            trigger,
        })
    }
}

/// A getter/setter pair exposed as a D-Bus property.
///
/// The property type is exactly one complete type. A writable property must
/// have a setter by the time the owning interface is built; the registrar
/// enforces this.
pub struct Property {
    name: String,
    disabled: bool,
    access: PropertyAccess,
    ty: Type,
    signature: String,
    getter: PropertyGetter,
    setter: Option<PropertySetter>,
}

impl Property {
    /// Start declaring a property with its member name and complete-type
    /// token.
    pub fn builder(name: impl Into<String>, ty: impl Into<String>) -> PropertyBuilder {
        PropertyBuilder {
            name: name.into(),
            ty: ty.into(),
            disabled: false,
            access: PropertyAccess::ReadWrite,
            getter: None,
            setter: None,
        }
    }

    /// Member name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the property is hidden from introspection.
    pub fn disabled(&self) -> bool {
        self.disabled
    }

    /// Access mode.
    pub fn access(&self) -> PropertyAccess {
        self.access
    }

    /// The property's single complete type.
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    /// The property's type token.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Whether a setter is attached.
    pub fn has_setter(&self) -> bool {
        self.setter.is_some()
    }

    /// Run the getter.
    pub fn get(&self) -> Result<Value, CallError> {
        (self.getter)()
    }

    /// Run the setter with a new value.
    pub fn set(&self, value: Value) -> Result<(), CallError> {
        match &self.setter {
            Some(setter) => setter(value),
            None => Err(CallError::PropertyReadOnly(self.name.clone())),
        }
    }

    /// Two declarations describe the same property iff they share the same
    /// getter callable.
    pub(crate) fn shares_getter(&self, other: &Property) -> bool {
        Arc::ptr_eq(&self.getter, &other.getter)
    }

    pub(crate) fn attach_setter(&mut self, setter: PropertySetter) {
        self.setter = Some(setter);
    }

    pub(crate) fn into_setter(self) -> Option<PropertySetter> {
        self.setter
    }

    pub(crate) fn to_introspection(&self) -> introspection::Property {
        introspection::Property {
            name: self.name.clone(),
            ty: self.signature.clone(),
            access: self.access,
        }
    }
}

impl fmt::Debug for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("name", &self.name)
            .field("disabled", &self.disabled)
            .field("access", &self.access)
            .field("signature", &self.signature)
            .field("has_setter", &self.setter.is_some())
            .finish_non_exhaustive()
    }
}

/// Two-step builder for [`Property`]: configure options, then attach the
/// getter (and optionally the setter).
pub struct PropertyBuilder {
    name: String,
    ty: String,
    disabled: bool,
    access: PropertyAccess,
    getter: Option<PropertyGetter>,
    setter: Option<PropertySetter>,
}

impl PropertyBuilder {
    /// Set the access mode (defaults to read-write).
    pub fn access(mut self, access: PropertyAccess) -> Self {
        self.access = access;
        self
    }

    /// Hide the property from introspection.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Attach the getter.
    pub fn getter(mut self, getter: PropertyGetter) -> Self {
        self.getter = Some(getter);
        self
    }

    /// Attach the setter.
    pub fn setter(mut self, setter: PropertySetter) -> Self {
        self.setter = Some(setter);
        self
    }

    /// Validate the declaration and build the descriptor.
    pub fn build(self) -> Result<Property, BuildError> {
        if !is_member_name_valid(&self.name) {
            return Err(BuildError::InvalidMemberName(self.name));
        }

        let parsed = Signature::parse(&self.ty)?;
        if parsed.len() != 1 {
            return Err(BuildError::PropertyTypeNotSingle {
                property: self.name,
            });
        }

        let getter = match self.getter {
            Some(getter) => getter,
            None => {
                return Err(BuildError::PropertyMissingGetter {
                    property: self.name,
                })
            }
        };

        Ok(Property {
            name: self.name,
            disabled: self.disabled,
            access: self.access,
            ty: parsed.types()[0].clone(),
            signature: self.ty,
            getter,
            setter: self.setter,
        })
    }
}
