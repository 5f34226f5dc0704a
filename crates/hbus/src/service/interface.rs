// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Interface registry and notification dispatch.
//!
//! [`InterfaceBuilder`] consumes explicitly declared member descriptors,
//! merges split property declarations, validates access-mode invariants and
//! produces an [`Interface`]. The interface owns its member collections for
//! life; only the attached-transport list mutates afterwards.
//!
//! # Dispatch
//!
//! [`Interface::emit_signal`] and [`Interface::emit_properties_changed`]
//! convert results into wire-shaped bodies and fan them out synchronously
//! to every attached transport, in attachment order. A failing conversion
//! notifies no transport at all.

use crate::introspection;
use crate::service::{
    fn_result_to_body, BuildError, CallError, Method, Property, Signal, PROPERTIES_CHANGED_MEMBER,
    PROPERTIES_CHANGED_SIGNATURE, PROPERTIES_INTERFACE,
};
use crate::transport::Transport;
use crate::validators::is_interface_name_valid;
use crate::value::{Value, Variant};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A registered service interface.
///
/// Member collections keep declaration order (introspection output is
/// stable) and are indexed by name for O(1) lookup; on duplicate names the
/// first declaration wins for lookup. Disabled members stay in the
/// collections and remain reachable by name, but are excluded from
/// introspection and, for signals, from being triggered.
pub struct Interface {
    name: String,
    methods: Vec<Method>,
    signals: Vec<Signal>,
    properties: Vec<Property>,
    method_index: HashMap<String, usize>,
    signal_index: HashMap<String, usize>,
    property_index: HashMap<String, usize>,
    transports: Mutex<Vec<Arc<dyn Transport>>>,
}

impl Interface {
    /// Start declaring an interface with the given name.
    pub fn builder(name: impl Into<String>) -> InterfaceBuilder {
        InterfaceBuilder {
            name: name.into(),
            methods: Vec::new(),
            signals: Vec::new(),
            properties: Vec::new(),
        }
    }

    /// Interface name as it appears to clients.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared methods, in declaration order.
    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    /// Declared signals, in declaration order.
    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }

    /// Declared properties, in declaration order.
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// Resolve a method by name.
    pub fn method(&self, name: &str) -> Option<&Method> {
        self.method_index.get(name).map(|&i| &self.methods[i])
    }

    /// Resolve a signal by name.
    pub fn signal(&self, name: &str) -> Option<&Signal> {
        self.signal_index.get(name).map(|&i| &self.signals[i])
    }

    /// Resolve a property by name.
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.property_index.get(name).map(|&i| &self.properties[i])
    }

    /// Attach a transport. Attaching the same transport twice is a no-op.
    pub fn attach_transport(&self, transport: Arc<dyn Transport>) {
        let mut transports = self.transports.lock();
        if !transports.iter().any(|t| Arc::ptr_eq(t, &transport)) {
            transports.push(transport);
            log::debug!(
                "[Interface] {}: transport attached ({} total)",
                self.name,
                transports.len()
            );
        }
    }

    /// Detach a previously attached transport (matched by identity).
    pub fn detach_transport(&self, transport: &Arc<dyn Transport>) {
        let mut transports = self.transports.lock();
        if let Some(index) = transports.iter().position(|t| Arc::ptr_eq(t, transport)) {
            transports.remove(index);
            log::debug!(
                "[Interface] {}: transport detached ({} remain)",
                self.name,
                transports.len()
            );
        }
    }

    /// Snapshot of the attached transports, in attachment order.
    pub fn attached_transports(&self) -> Vec<Arc<dyn Transport>> {
        self.transports.lock().clone()
    }

    /// Trigger a signal and fan the payload out to every attached transport.
    ///
    /// Runs the signal's trigger with `args`, converts its result into a
    /// body under the arity contract and forwards
    /// `(interface name, signal name, out signature, body)` to each
    /// transport in attachment order. The trigger's result is returned to
    /// the caller unchanged.
    ///
    /// A disabled signal fails with [`CallError::SignalDisabled`] before the
    /// trigger runs; a body mismatch fails before any transport is notified.
    pub fn emit_signal(&self, name: &str, args: &[Value]) -> Result<Option<Value>, CallError> {
        let signal = self
            .signal(name)
            .ok_or_else(|| CallError::UnknownSignal(name.to_owned()))?;
        if signal.disabled() {
            return Err(CallError::SignalDisabled(name.to_owned()));
        }

        let result = signal.raise(args);
        let body = fn_result_to_body(signal.name(), result.clone(), signal.args().len())?;

        self.notify_all(&self.name, signal.name(), signal.signature(), &body);
        Ok(result)
    }

    /// Notify every attached transport that properties changed.
    ///
    /// `changed` values are wrapped in a [`Variant`] tagged with the
    /// property's declared type; names not matching a declared property are
    /// silently dropped. `invalidated` is passed through verbatim.
    pub fn emit_properties_changed(
        &self,
        changed: &HashMap<String, Value>,
        invalidated: &[String],
    ) {
        let mut dict = Vec::new();
        for property in &self.properties {
            if let Some(value) = changed.get(property.name()) {
                dict.push((
                    Value::Str(property.name().to_owned()),
                    Value::Variant(Box::new(Variant::new(property.ty().clone(), value.clone()))),
                ));
            }
        }

        let body = vec![
            Value::Str(self.name.clone()),
            Value::Dict(dict),
            Value::Array(invalidated.iter().cloned().map(Value::Str).collect()),
        ];

        self.notify_all(
            PROPERTIES_INTERFACE,
            PROPERTIES_CHANGED_MEMBER,
            PROPERTIES_CHANGED_SIGNATURE,
            &body,
        );
    }

    /// Introspection view of the interface, excluding disabled members.
    pub fn introspect(&self) -> introspection::Interface {
        introspection::Interface {
            name: self.name.clone(),
            methods: self
                .methods
                .iter()
                .filter(|m| !m.disabled())
                .map(Method::to_introspection)
                .collect(),
            signals: self
                .signals
                .iter()
                .filter(|s| !s.disabled())
                .map(Signal::to_introspection)
                .collect(),
            properties: self
                .properties
                .iter()
                .filter(|p| !p.disabled())
                .map(Property::to_introspection)
                .collect(),
        }
    }

    /// Forward one notification to a snapshot of the attached transports.
    ///
    /// The snapshot is taken under the lock, the fan-out happens outside it:
    /// an attach or detach racing an in-flight dispatch neither blocks nor
    /// tears the iteration.
    fn notify_all(&self, interface_name: &str, member: &str, signature: &str, body: &[Value]) {
        let snapshot = self.transports.lock().clone();
        log::trace!(
            "[Dispatch] {}.{} ({}) -> {} transport(s)",
            interface_name,
            member,
            signature,
            snapshot.len()
        );
        for transport in &snapshot {
            transport.interface_notify(self, interface_name, member, signature, body);
        }
    }
}

impl fmt::Debug for Interface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interface")
            .field("name", &self.name)
            .field("methods", &self.methods.len())
            .field("signals", &self.signals.len())
            .field("properties", &self.properties.len())
            .finish_non_exhaustive()
    }
}

/// Builder consuming explicit member declarations into an [`Interface`].
pub struct InterfaceBuilder {
    name: String,
    methods: Vec<Method>,
    signals: Vec<Signal>,
    properties: Vec<Property>,
}

impl InterfaceBuilder {
    /// Register a method.
    pub fn method(mut self, method: Method) -> Self {
        self.methods.push(method);
        self
    }

    /// Register a signal.
    pub fn signal(mut self, signal: Signal) -> Self {
        self.signals.push(signal);
        self
    }

    /// Register a property.
    ///
    /// A declaration sharing its getter with an already registered property
    /// describes the same property: it contributes its setter (if any) to
    /// the existing descriptor instead of being appended, and the options
    /// configured on the first declaration stay in force.
    pub fn property(mut self, property: Property) -> Self {
        if let Some(existing) = self
            .properties
            .iter_mut()
            .find(|p| p.shares_getter(&property))
        {
            if let Some(setter) = property.into_setter() {
                existing.attach_setter(setter);
            }
        } else {
            self.properties.push(property);
        }
        self
    }

    /// Validate the interface and build it.
    ///
    /// Fails if the interface name is invalid or any writable property is
    /// missing a setter; no partially-valid interface is observable after a
    /// failure.
    pub fn build(self) -> Result<Interface, BuildError> {
        if !is_interface_name_valid(&self.name) {
            return Err(BuildError::InvalidInterfaceName(self.name));
        }

        for property in &self.properties {
            if property.access().writable() && !property.has_setter() {
                return Err(BuildError::WritableWithoutSetter {
                    property: property.name().to_owned(),
                });
            }
        }

        // First declaration wins on duplicate names.
        let method_index = index_by_name(self.methods.iter().map(Method::name));
        let signal_index = index_by_name(self.signals.iter().map(Signal::name));
        let property_index = index_by_name(self.properties.iter().map(Property::name));

        log::debug!(
            "[Interface] registered {} ({} methods, {} signals, {} properties)",
            self.name,
            self.methods.len(),
            self.signals.len(),
            self.properties.len()
        );

        Ok(Interface {
            name: self.name,
            methods: self.methods,
            signals: self.signals,
            properties: self.properties,
            method_index,
            signal_index,
            property_index,
            transports: Mutex::new(Vec::new()),
        })
    }
}

fn index_by_name<'a>(names: impl Iterator<Item = &'a str>) -> HashMap<String, usize> {
    let mut index = HashMap::new();
    for (i, name) in names.enumerate() {
        index.entry(name.to_owned()).or_insert(i);
    }
    index
}
