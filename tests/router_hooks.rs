// tests/router_hooks.rs

use std::sync::{Arc, Mutex};

use sardine_bridge::relay::{OutputRouter, OutputStream};

fn recorder() -> (Arc<Mutex<Vec<String>>>, impl Fn() -> sardine_bridge::relay::HookFn) {
    let seen: Arc<Mutex<Vec<String>>> = Arc::default();
    let make = {
        let seen = seen.clone();
        move || -> sardine_bridge::relay::HookFn {
            let seen = seen.clone();
            Box::new(move |rest: &str| seen.lock().unwrap().push(rest.to_string()))
        }
    };
    (seen, make)
}

#[test]
fn hook_fires_once_and_is_removed() {
    let (seen, hook) = recorder();
    let mut router = OutputRouter::new();
    router.register_hook("OK:", hook());

    assert!(router.intercept(OutputStream::Stdout, "OK:1"));
    assert_eq!(router.pending_hooks(), 0);
    // Second match falls through to the sink.
    assert!(!router.intercept(OutputStream::Stdout, "OK:2"));
    assert_eq!(*seen.lock().unwrap(), vec!["1".to_string()]);
}

#[test]
fn handler_receives_chunk_minus_prefix() {
    let (seen, hook) = recorder();
    let mut router = OutputRouter::new();
    router.register_hook("BPM:", hook());

    assert!(router.intercept(OutputStream::Stdout, "BPM:120.5\n"));
    assert_eq!(*seen.lock().unwrap(), vec!["120.5\n".to_string()]);
}

#[test]
fn first_registered_match_wins() {
    let (seen, hook) = recorder();
    let mut router = OutputRouter::new();
    router.register_hook("AB", hook());
    router.register_hook("A", hook());

    assert!(router.intercept(OutputStream::Stdout, "ABC"));
    assert_eq!(*seen.lock().unwrap(), vec!["C".to_string()]);
    // The broader "A" hook is still pending.
    assert_eq!(router.pending_hooks(), 1);
    assert!(router.intercept(OutputStream::Stdout, "A rest"));
    assert_eq!(seen.lock().unwrap().len(), 2);
}

#[test]
fn non_matching_chunk_falls_through() {
    let (seen, hook) = recorder();
    let mut router = OutputRouter::new();
    router.register_hook("OK:", hook());

    assert!(!router.intercept(OutputStream::Stdout, "unrelated output"));
    // A mid-chunk occurrence of the prefix is not a match.
    assert!(!router.intercept(OutputStream::Stdout, "log OK: fine"));
    assert_eq!(router.pending_hooks(), 1);
    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn stderr_is_never_intercepted() {
    let (seen, hook) = recorder();
    let mut router = OutputRouter::new();
    router.register_hook("OK:", hook());

    assert!(!router.intercept(OutputStream::Stderr, "OK:1"));
    assert_eq!(router.pending_hooks(), 1);
    assert!(seen.lock().unwrap().is_empty());
}
