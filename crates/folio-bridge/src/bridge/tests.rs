use super::*;
use crate::messages::HostMessage;
use serde_json::json;

/// Records what each handler saw.
#[derive(Default)]
struct Recorder {
    seen: Vec<String>,
}

fn bridge() -> MessageBridge<Recorder> {
    let mut bridge = MessageBridge::new();
    bridge.register("linkClicked", |r: &mut Recorder, msg: &BridgeMessage| {
        r.seen.push(format!("link:{}", msg.payload["href"].as_str().unwrap_or("")));
        Ok(())
    });
    bridge.register("ipaSpan", |r: &mut Recorder, msg: &BridgeMessage| {
        r.seen.push(format!("ipa:{}", msg.payload["contents"].as_str().unwrap_or("")));
        Ok(())
    });
    bridge
}

fn post(endpoint: &RendererEndpoint, kind: &str, payload: serde_json::Value) -> bool {
    endpoint.post(&BridgeMessage::new(kind, payload).to_json())
}

#[test]
fn dispatches_in_arrival_order() {
    let mut bridge = bridge();
    let endpoint = bridge.endpoint();
    post(&endpoint, "linkClicked", json!({"href": "/wiki/A"}));
    post(&endpoint, "ipaSpan", json!({"contents": "æ"}));
    post(&endpoint, "linkClicked", json!({"href": "/wiki/B"}));

    let mut rec = Recorder::default();
    assert_eq!(bridge.dispatch_pending(&mut rec).unwrap(), 3);
    assert_eq!(rec.seen, vec!["link:/wiki/A", "ipa:æ", "link:/wiki/B"]);
    assert_eq!(bridge.dispatch_pending(&mut rec).unwrap(), 0);
}

#[test]
fn second_registration_replaces_first() {
    let mut bridge = bridge();
    bridge.register("linkClicked", |r: &mut Recorder, _msg: &BridgeMessage| {
        r.seen.push("replacement".into());
        Ok(())
    });
    post(&bridge.endpoint(), "linkClicked", json!({"href": "/wiki/A"}));

    let mut rec = Recorder::default();
    bridge.dispatch_pending(&mut rec).unwrap();
    assert_eq!(rec.seen, vec!["replacement"]);
}

#[test]
fn unknown_names_are_dropped() {
    let mut bridge = bridge();
    let endpoint = bridge.endpoint();
    post(&endpoint, "mystery", json!({}));
    post(&endpoint, "ipaSpan", json!({"contents": "ə"}));

    let mut rec = Recorder::default();
    assert_eq!(bridge.dispatch_pending(&mut rec).unwrap(), 1);
    assert_eq!(rec.seen, vec!["ipa:ə"]);
}

#[test]
fn endpoint_rejects_invalid_json() {
    let bridge = bridge();
    let endpoint = bridge.endpoint();
    assert!(!endpoint.post("{ nope"));
    assert!(!endpoint.post(r#"{"payload": {}}"#));
    assert!(post(&endpoint, "ipaSpan", json!({"contents": "a"})));
}

#[test]
fn endpoint_posts_from_other_threads() {
    let mut bridge = bridge();
    let endpoint = bridge.endpoint();
    let worker = std::thread::spawn(move || {
        for i in 0..5 {
            post(&endpoint, "linkClicked", json!({ "href": format!("/wiki/{i}") }));
        }
    });
    worker.join().unwrap();

    let mut rec = Recorder::default();
    assert_eq!(bridge.dispatch_pending(&mut rec).unwrap(), 5);
    assert_eq!(rec.seen[4], "link:/wiki/4");
}

#[test]
fn handler_error_keeps_remaining_messages() {
    let mut bridge = bridge();
    bridge.register("fail", |_r: &mut Recorder, msg: &BridgeMessage| {
        Err(BridgeError::PayloadNotObject {
            name: msg.kind.clone(),
        })
    });
    let endpoint = bridge.endpoint();
    post(&endpoint, "ipaSpan", json!({"contents": "1"}));
    post(&endpoint, "fail", json!({}));
    post(&endpoint, "ipaSpan", json!({"contents": "2"}));

    let mut rec = Recorder::default();
    assert!(bridge.dispatch_pending(&mut rec).is_err());
    assert_eq!(rec.seen, vec!["ipa:1"]);
    assert_eq!(bridge.dispatch_pending(&mut rec).unwrap(), 1);
    assert_eq!(rec.seen, vec!["ipa:1", "ipa:2"]);
}

#[test]
fn flush_preserves_send_order() {
    let bridge: MessageBridge<Recorder> = MessageBridge::new();
    let sender = bridge.sender();
    sender
        .send_message(&HostMessage::SetDecorOffset { offset: 56 })
        .unwrap();
    bridge.send("handleReference", &json!({"anchor": "cite_note-2"})).unwrap();
    assert_eq!(sender.pending(), 2);

    let mut scripts: Vec<String> = Vec::new();
    assert_eq!(bridge.flush(&mut scripts).unwrap(), 2);
    assert_eq!(
        scripts,
        vec![
            r#"window.folio.bridge._dispatch("setDecorOffset", {"offset":56});"#,
            r#"window.folio.bridge._dispatch("handleReference", {"anchor":"cite_note-2"});"#,
        ]
    );
    assert_eq!(sender.pending(), 0);
}

#[test]
fn non_object_payload_is_rejected() {
    let bridge: MessageBridge<Recorder> = MessageBridge::new();
    let err = bridge.send("setDecorOffset", &56).unwrap_err();
    assert!(matches!(err, BridgeError::PayloadNotObject { ref name } if name == "setDecorOffset"));
    assert_eq!(bridge.sender().pending(), 0);
}

struct FailingPort {
    accepted: usize,
    calls: usize,
}

impl RendererPort for FailingPort {
    fn evaluate_script(&mut self, _script: &str) -> Result<(), BridgeError> {
        self.calls += 1;
        if self.calls > self.accepted {
            Err(BridgeError::Script("page gone".into()))
        } else {
            Ok(())
        }
    }
}

#[test]
fn failed_flush_keeps_undelivered_messages() {
    let bridge: MessageBridge<Recorder> = MessageBridge::new();
    for offset in [1u32, 2, 3] {
        bridge
            .sender()
            .send_message(&HostMessage::SetDecorOffset { offset })
            .unwrap();
    }
    let mut port = FailingPort {
        accepted: 1,
        calls: 0,
    };
    assert!(bridge.flush(&mut port).is_err());
    assert_eq!(bridge.sender().pending(), 2);

    let mut scripts: Vec<String> = Vec::new();
    bridge.flush(&mut scripts).unwrap();
    assert!(scripts[0].contains(r#"{"offset":2}"#));
}

#[test]
fn cleanup_drops_everything_afterwards() {
    let mut bridge = bridge();
    let endpoint = bridge.endpoint();
    let sender = bridge.sender();
    post(&endpoint, "ipaSpan", json!({"contents": "queued"}));

    bridge.cleanup();
    assert!(!bridge.is_open());
    assert!(!bridge.has_handler("linkClicked"));
    assert!(!post(&endpoint, "ipaSpan", json!({"contents": "late"})));
    sender
        .send_message(&HostMessage::ToggleDarkMode { enabled: true })
        .unwrap();
    assert_eq!(sender.pending(), 0);

    let mut rec = Recorder::default();
    assert_eq!(bridge.dispatch_pending(&mut rec).unwrap(), 0);
    assert!(rec.seen.is_empty());
}
