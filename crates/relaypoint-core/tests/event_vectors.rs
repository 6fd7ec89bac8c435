//! Wire event vector tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::fs;

use serde_json::json;

use relaypoint_core::protocol::events::{ClientEvent, Identity, OnlineUser, ServerEvent};

fn load(name: &str) -> String {
    fs::read_to_string(format!("tests/vectors/{name}")).unwrap()
}

#[test]
fn parse_identify() {
    let s = load("identify.json");
    let ev: ClientEvent = serde_json::from_str(&s).unwrap();
    assert_eq!(ev.name(), "identify");
    let ClientEvent::Identify { user } = ev else {
        panic!("wrong variant");
    };
    assert_eq!(user.user_id, "u-42");
    // profile fields ride along untouched
    assert_eq!(
        user.profile.get("email").and_then(|v| v.as_str()),
        Some("mina@example.com")
    );
}

#[test]
fn parse_send_message() {
    let s = load("send_message.json");
    let ev: ClientEvent = serde_json::from_str(&s).unwrap();
    ev.validate().unwrap();
    let ClientEvent::SendMessage {
        message,
        sender,
        receiver,
    } = ev
    else {
        panic!("wrong variant");
    };
    assert_eq!(message["text"], "hi");
    assert_eq!(sender.user_id, "u-1");
    assert_eq!(receiver.user_id, "u-2");
}

#[test]
fn parse_contact_created() {
    let s = load("contact_created.json");
    let ev: ClientEvent = serde_json::from_str(&s).unwrap();
    ev.validate().unwrap();
    assert_eq!(ev.name(), "contactCreated");
}

#[test]
fn unknown_type_is_rejected() {
    let s = r#"{"type":"subscribe","channel":"news"}"#;
    assert!(serde_json::from_str::<ClientEvent>(s).is_err());
}

#[test]
fn missing_user_id_fails_validation() {
    let s = r#"{"type":"identify","user":{"email":"x@example.com","userId":""}}"#;
    let ev: ClientEvent = serde_json::from_str(&s).unwrap();
    assert_eq!(
        ev.validate().unwrap_err().client_code().as_str(),
        "BAD_REQUEST"
    );
}

#[test]
fn online_users_round_trips_by_shape() {
    let snapshot = ServerEvent::OnlineUsersChanged {
        users: vec![OnlineUser {
            user: Identity {
                user_id: "u-1".into(),
                profile: serde_json::Map::new(),
            },
            connection_id: "conn-7".into(),
        }],
    };
    let v: serde_json::Value = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(v["type"], "onlineUsersChanged");
    assert_eq!(v["users"][0]["user"]["userId"], "u-1");
    assert_eq!(v["users"][0]["connectionId"], "conn-7");
}

#[test]
fn new_message_payload_shape() {
    let ev = ServerEvent::NewMessage {
        message: json!({"text": "hi"}),
        sender: Identity {
            user_id: "u-1".into(),
            profile: serde_json::Map::new(),
        },
        receiver: Identity {
            user_id: "u-2".into(),
            profile: serde_json::Map::new(),
        },
    };
    let v: serde_json::Value = serde_json::to_value(&ev).unwrap();
    assert_eq!(v["type"], "newMessage");
    assert_eq!(v["message"]["text"], "hi");
    assert_eq!(v["sender"]["userId"], "u-1");
    assert_eq!(v["receiver"]["userId"], "u-2");
}
