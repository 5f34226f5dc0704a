// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! End-to-end service interface tests.
//!
//! Drives a stateful media-player interface through the public API the way
//! a connection layer would: member lookup, invocation, property access,
//! signal fan-out and introspection.

use hbus::{
    CallError, Interface, Method, Property, Signal, Transport, Value, Variant,
    PROPERTIES_CHANGED_MEMBER, PROPERTIES_CHANGED_SIGNATURE, PROPERTIES_INTERFACE,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::thread;

#[derive(Debug, Clone, PartialEq)]
struct Notification {
    interface: String,
    member: String,
    signature: String,
    body: Vec<Value>,
}

#[derive(Default)]
struct RecordingTransport {
    events: Mutex<Vec<Notification>>,
}

impl RecordingTransport {
    fn events(&self) -> Vec<Notification> {
        self.events.lock().clone()
    }
}

impl Transport for RecordingTransport {
    fn interface_notify(
        &self,
        _iface: &Interface,
        interface_name: &str,
        member: &str,
        signature: &str,
        body: &[Value],
    ) {
        self.events.lock().push(Notification {
            interface: interface_name.to_owned(),
            member: member.to_owned(),
            signature: signature.to_owned(),
            body: body.to_vec(),
        });
    }
}

struct PlayerState {
    track: String,
    volume: u32,
}

/// Build a player interface over shared state.
fn player_interface(state: &Arc<Mutex<PlayerState>>) -> Interface {
    let play_state = state.clone();
    let volume_get = state.clone();
    let volume_set = state.clone();

    Interface::builder("com.example.Player")
        .method(
            Method::builder("Play")
                .in_arg("track", "s")
                .out("b")
                .handler(Arc::new(move |args: &[Value]| {
                    let track = match args.first().and_then(Value::as_str) {
                        Some(track) => track.to_owned(),
                        None => return Err(CallError::Failed("track must be a string".into())),
                    };
                    play_state.lock().track = track;
                    Ok(Some(Value::Boolean(true)))
                }))
                .build()
                .expect("Play"),
        )
        .signal(
            Signal::builder("TrackChanged")
                .out("s")
                .trigger(Arc::new(|args: &[Value]| args.first().cloned()))
                .build()
                .expect("TrackChanged"),
        )
        .property(
            Property::builder("Volume", "u")
                .getter(Arc::new(move || {
                    Ok(Value::UInt32(volume_get.lock().volume))
                }))
                .setter(Arc::new(move |value: Value| match value.as_u32() {
                    Some(volume) => {
                        volume_set.lock().volume = volume;
                        Ok(())
                    }
                    None => Err(CallError::Failed("volume must be a u32".into())),
                }))
                .build()
                .expect("Volume"),
        )
        .build()
        .expect("interface")
}

#[test]
fn player_round_trip() {
    let state = Arc::new(Mutex::new(PlayerState {
        track: String::new(),
        volume: 5,
    }));
    let interface = player_interface(&state);
    let transport = Arc::new(RecordingTransport::default());
    interface.attach_transport(transport.clone());

    // Incoming call, resolved by name the way a connection would.
    let play = interface.method("Play").expect("method lookup");
    assert_eq!(play.in_signature(), "s");
    let reply = play
        .invoke(&[Value::Str("comfortably numb".into())])
        .expect("invoke");
    assert_eq!(reply, Some(Value::Boolean(true)));
    assert_eq!(play.result_to_body(reply).expect("body"), vec![Value::Boolean(true)]);
    assert_eq!(state.lock().track, "comfortably numb");

    // The service reacts by raising its signal.
    interface
        .emit_signal("TrackChanged", &[Value::Str("comfortably numb".into())])
        .expect("emit");
    let events = transport.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].member, "TrackChanged");
    assert_eq!(events[0].body, vec![Value::Str("comfortably numb".into())]);

    // Incoming property set, then a change notification.
    let volume = interface.property("Volume").expect("property lookup");
    volume.set(Value::UInt32(9)).expect("set");
    assert_eq!(volume.get().expect("get"), Value::UInt32(9));

    let mut changed = HashMap::new();
    changed.insert("Volume".to_owned(), Value::UInt32(9));
    interface.emit_properties_changed(&changed, &[]);

    let events = transport.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[1].interface, PROPERTIES_INTERFACE);
    assert_eq!(events[1].member, PROPERTIES_CHANGED_MEMBER);
    assert_eq!(events[1].signature, PROPERTIES_CHANGED_SIGNATURE);
    let expected_type = hbus::Signature::parse("u").expect("type").types()[0].clone();
    assert_eq!(
        events[1].body[1],
        Value::Dict(vec![(
            Value::Str("Volume".into()),
            Value::Variant(Box::new(Variant::new(expected_type, Value::UInt32(9)))),
        )])
    );
}

#[test]
fn introspection_document() {
    let state = Arc::new(Mutex::new(PlayerState {
        track: String::new(),
        volume: 0,
    }));
    let xml = player_interface(&state).introspect().to_xml();

    assert!(xml.contains("<interface name=\"com.example.Player\">"));
    assert!(xml.contains("<arg name=\"track\" direction=\"in\" type=\"s\"/>"));
    assert!(xml.contains("<arg direction=\"out\" type=\"b\"/>"));
    assert!(xml.contains("<signal name=\"TrackChanged\">"));
    assert!(xml.contains("<property name=\"Volume\" type=\"u\" access=\"readwrite\"/>"));
}

#[test]
fn dispatch_from_other_threads() {
    let state = Arc::new(Mutex::new(PlayerState {
        track: String::new(),
        volume: 0,
    }));
    let interface = Arc::new(player_interface(&state));
    let transport = Arc::new(RecordingTransport::default());
    interface.attach_transport(transport.clone());

    // Emitters race transport churn; every successful emit must see a
    // consistent snapshot of the attachment list.
    let mut handles = Vec::new();
    for _ in 0..4 {
        let iface = interface.clone();
        handles.push(thread::spawn(move || {
            for i in 0..50 {
                iface
                    .emit_signal("TrackChanged", &[Value::Str(format!("track-{}", i))])
                    .expect("emit");
            }
        }));
    }
    let churn_iface = interface.clone();
    let churn = thread::spawn(move || {
        for _ in 0..50 {
            let extra = Arc::new(RecordingTransport::default());
            churn_iface.attach_transport(extra.clone());
            let as_dyn: Arc<dyn Transport> = extra;
            churn_iface.detach_transport(&as_dyn);
        }
    });

    for handle in handles {
        handle.join().expect("emitter");
    }
    churn.join().expect("churn");

    // The transport attached for the whole run saw every emission.
    assert_eq!(transport.events().len(), 4 * 50);
}
