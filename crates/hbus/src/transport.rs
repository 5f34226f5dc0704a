// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Connection seam between interfaces and the wire.
//!
//! An [`Interface`](crate::service::Interface) does not talk to sockets.
//! When a signal fires or properties change it hands a ready-made
//! notification tuple to every attached [`Transport`]; the transport owns
//! framing, marshaling and delivery. A transport may be attached to many
//! interfaces and an interface to many transports.
//!
//! # Thread Safety
//!
//! Notifications are issued synchronously, in attachment order, from
//! whichever thread triggered the dispatch. Implementations must be
//! `Send + Sync` and should not block for long or panic.

use crate::service::Interface;
use crate::value::Value;

/// A connection capable of delivering interface notifications to peers.
pub trait Transport: Send + Sync {
    /// Deliver one notification originating from `iface`.
    ///
    /// `interface_name` and `member` address the emitting member,
    /// `signature` describes the body shape, and `body` carries one value
    /// per complete type in the signature.
    fn interface_notify(
        &self,
        iface: &Interface,
        interface_name: &str,
        member: &str,
        signature: &str,
        body: &[Value],
    );
}
