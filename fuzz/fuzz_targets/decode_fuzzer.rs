//! Fuzz target for the inbound payload decoder.
//!
//! Feeds arbitrary text, including malformed JSON, truncated legacy markers
//! and mixed line endings. The decoder is total: it must never panic, and an
//! identity is only reported for a payload carrying the welcome marker.

#![no_main]

use chatroom_proto::{decode, legacy};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let payload = String::from_utf8_lossy(data);
    let decoded = decode(&payload);

    if decoded.identity.is_some() {
        assert!(payload.contains(legacy::LOGIN_WELCOME_PREFIX));
    }

    let _ = decoded.into_events();
});
