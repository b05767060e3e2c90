//! Binding the Trello client into the contract-layer registry.

use tracker_api::{get_client, is_registered, unregister_client_factory, ClientOptions, TrackerError};

#[test]
fn register_binds_get_client_to_trello() {
    unregister_client_factory();
    assert!(matches!(
        get_client(ClientOptions::default()),
        Err(TrackerError::NotImplemented { operation: "get_client" })
    ));

    trello::register();
    trello::register();
    assert!(is_registered());

    let client = get_client(ClientOptions::interactive()).expect("registered factory builds a client");
    assert!(client.is_interactive());

    let client = get_client(ClientOptions::default()).expect("registered factory builds a client");
    assert!(!client.is_interactive());

    unregister_client_factory();
}
