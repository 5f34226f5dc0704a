// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Name validation per the D-Bus specification.
//!
//! Member and interface names have a fixed charset and length limit; the
//! member builders and the interface registrar reject invalid names at
//! construction time so a bad name can never reach the wire.

/// Maximum length of any bus name, per the D-Bus specification.
pub const MAX_NAME_LEN: usize = 255;

fn is_element_valid(element: &str) -> bool {
    let mut bytes = element.bytes();
    match bytes.next() {
        None => return false,
        Some(first) => {
            if !(first.is_ascii_alphabetic() || first == b'_') {
                return false;
            }
        }
    }
    bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// Whether `name` is a valid member (method, signal, property) name.
///
/// Members are a single element: ASCII letters, digits and `_`, not starting
/// with a digit, at most [`MAX_NAME_LEN`] bytes.
pub fn is_member_name_valid(name: &str) -> bool {
    name.len() <= MAX_NAME_LEN && is_element_valid(name)
}

/// Whether `name` is a valid interface name.
///
/// Interface names are two or more `.`-separated elements, each following
/// the member-name charset, at most [`MAX_NAME_LEN`] bytes in total.
pub fn is_interface_name_valid(name: &str) -> bool {
    if name.len() > MAX_NAME_LEN {
        return false;
    }
    let mut elements = 0;
    for element in name.split('.') {
        if !is_element_valid(element) {
            return false;
        }
        elements += 1;
    }
    elements >= 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_names() {
        assert!(is_member_name_valid("Frobate"));
        assert!(is_member_name_valid("_private"));
        assert!(is_member_name_valid("Get2"));
        assert!(!is_member_name_valid(""));
        assert!(!is_member_name_valid("2Get"));
        assert!(!is_member_name_valid("has-dash"));
        assert!(!is_member_name_valid("has.dot"));
        assert!(!is_member_name_valid(&"x".repeat(MAX_NAME_LEN + 1)));
    }

    #[test]
    fn test_interface_names() {
        assert!(is_interface_name_valid("com.example.Echo"));
        assert!(is_interface_name_valid("org._private.X1"));
        assert!(!is_interface_name_valid("single"));
        assert!(!is_interface_name_valid(""));
        assert!(!is_interface_name_valid("com..Echo"));
        assert!(!is_interface_name_valid("com.2example.Echo"));
        assert!(!is_interface_name_valid(".com.example"));
    }
}
