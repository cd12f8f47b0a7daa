//! Tests for Session / DivinationService against a fake transport

mod common;

use std::sync::Arc;

use guaxiang::application::services::DivinationService;
use guaxiang::application::{ApplicationError, NOTICE_INVALID_INPUT, NOTICE_REQUEST_FAILED};
use guaxiang::domain::{Align, ClassifyMode, Element, LineRole, Renderer};
use guaxiang::util::testing;

use common::{
    reply, session_with, FakeTransport, RecordingNotifier, LEGACY_BODY, STRUCTURED_BODY,
};

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

#[test]
fn given_valid_entry_and_legacy_reply_when_submitting_then_header_and_colored_rows() {
    // Arrange
    let transport = FakeTransport::ok(LEGACY_BODY);
    let notifier = Arc::new(RecordingNotifier::default());
    let mut session = session_with(transport.clone(), notifier.clone());

    // Act
    let tree = session.submit("012301").unwrap().clone();

    // Assert: one request with the raw entry
    assert_eq!(*transport.calls.lock().unwrap(), vec!["012301".to_string()]);
    assert!(notifier.notices().is_empty());

    let rows: Vec<_> = tree.rows().collect();
    assert_eq!(rows.len(), 7);

    let header = rows[0];
    assert_eq!(header.children[0].text.as_deref(), Some("乾为天"));
    assert_eq!(header.children[1].text.as_deref(), Some("坤为地"));
    assert!(header
        .children
        .iter()
        .all(|c| c.align == Align::Center && c.element().is_none()));

    // second row shows the top line; char at index 2 is 戌 (Earth), 酉 (Metal)
    let second = rows[1];
    let zheng = second.child("zheng").unwrap();
    assert_eq!(zheng.child("text").unwrap().text.as_deref(), Some("父母戌土━━━━━"));
    assert_eq!(zheng.element(), Some(Element::Earth));
    assert_eq!(second.child("bian").unwrap().element(), Some(Element::Metal));
    assert!(zheng.child("role").unwrap().has_class("shi"));

    assert!(session.panel().is_shown());
}

#[test]
fn given_structured_reply_when_submitting_then_six_lines_reversed_with_relations() {
    let transport = FakeTransport::ok(STRUCTURED_BODY);
    let notifier = Arc::new(RecordingNotifier::default());
    let mut session = session_with(transport, notifier);

    let tree = session.submit("123012").unwrap();
    let line_rows: Vec<_> = tree.rows().filter(|r| r.has_class("line")).collect();

    assert_eq!(line_rows.len(), 6);
    let texts: Vec<String> = line_rows
        .iter()
        .map(|r| r.child("zheng").unwrap().child("text").unwrap().text.clone().unwrap())
        .collect();
    assert_eq!(
        texts,
        vec![
            "父母子水━━ ━━",
            "兄弟戌土━━━━━",
            "官鬼申金━━ ━━",
            "父母辰土━━ ━━",
            "妻财寅木━━ ━━",
            "子孙子水━━━━━",
        ]
    );

    let bottom = line_rows[5];
    let bian = bottom.child("bian").unwrap();
    assert_eq!(bian.child("relation").unwrap().text.as_deref(), Some("父母"));
    assert_eq!(bian.element(), Some(Element::Fire));

    let ying_row = line_rows[4];
    let role = ying_row.child("zheng").unwrap().child("role").unwrap();
    assert_eq!(role.text.as_deref(), Some(LineRole::Ying.marker().unwrap().to_string().as_str()));
}

#[test]
fn given_five_char_entry_when_submitting_then_no_request_and_input_notice() {
    let transport = FakeTransport::ok(LEGACY_BODY);
    let notifier = Arc::new(RecordingNotifier::default());
    let mut session = session_with(transport.clone(), notifier.clone());

    let err = session.submit("01230").unwrap_err();

    assert!(err.is_invalid_input());
    assert_eq!(transport.call_count(), 0);
    assert_eq!(notifier.notices(), vec![NOTICE_INVALID_INPUT.to_string()]);
    assert!(session.panel().tree().is_none());
}

#[test]
fn given_http_500_after_good_result_when_submitting_then_notice_and_panel_unchanged() {
    // Arrange: first reply succeeds, second fails
    let transport =
        FakeTransport::scripted(vec![reply(200, LEGACY_BODY), reply(500, "internal error")]);
    let notifier = Arc::new(RecordingNotifier::default());
    let mut session = session_with(transport.clone(), notifier.clone());
    session.submit("012301").unwrap();
    let before = session.panel().clone();

    // Act
    let err = session.submit("333333").unwrap_err();

    // Assert
    assert!(matches!(err, ApplicationError::RequestFailed { status: 500 }));
    assert_eq!(transport.call_count(), 2);
    assert_eq!(notifier.notices(), vec![NOTICE_REQUEST_FAILED.to_string()]);
    assert_eq!(session.panel(), &before);
}

#[test]
fn given_unreachable_server_when_submitting_then_failure_notice_and_control_restored() {
    let notifier = Arc::new(RecordingNotifier::default());
    let mut session = session_with(FakeTransport::unreachable(), notifier.clone());
    let trigger = session.trigger();

    let err = session.submit("012301").unwrap_err();

    assert!(matches!(err, ApplicationError::NetworkError { .. }));
    assert_eq!(notifier.notices(), vec![NOTICE_REQUEST_FAILED.to_string()]);
    assert!(trigger.is_enabled());
    assert!(!session.panel().is_shown());
}

#[test]
fn given_undecodable_body_when_submitting_then_failure_notice() {
    let notifier = Arc::new(RecordingNotifier::default());
    let transport = FakeTransport::ok(r#"{"year_ganzhi": "甲辰"}"#);
    let mut session = session_with(transport, notifier.clone());

    let err = session.submit("012301").unwrap_err();

    assert!(matches!(err, ApplicationError::Decode { .. }));
    assert_eq!(notifier.notices(), vec![NOTICE_REQUEST_FAILED.to_string()]);
}

#[test]
fn given_successive_results_when_submitting_then_panel_fully_replaced() {
    let transport =
        FakeTransport::scripted(vec![reply(200, LEGACY_BODY), reply(200, STRUCTURED_BODY)]);
    let notifier = Arc::new(RecordingNotifier::default());
    let mut session = session_with(transport, notifier);

    session.submit("012301").unwrap();
    let tree = session.submit("123012").unwrap();

    let header = tree.rows().next().unwrap();
    assert_eq!(header.children[0].text.as_deref(), Some("水雷屯"));
    assert_eq!(tree.rows().count(), 7);
}

#[test]
fn given_text_mode_service_when_rendering_then_lines_classified_by_contained_glyph() {
    let service =
        DivinationService::new(FakeTransport::ok(LEGACY_BODY), Renderer::new(ClassifyMode::Text));
    let result = service.decode(LEGACY_BODY).unwrap();
    let tree = service.render(&result);

    // "父母戌土━━━━━" contains 土
    let top = tree.rows().nth(1).unwrap();
    assert_eq!(top.child("zheng").unwrap().element(), Some(Element::Earth));
}

#[test]
fn given_control_held_by_host_when_submitting_then_busy_without_request() {
    let transport = FakeTransport::ok(LEGACY_BODY);
    let notifier = Arc::new(RecordingNotifier::default());
    let mut session = session_with(transport.clone(), notifier.clone());
    let trigger = session.trigger();

    let guard = trigger.engage().unwrap();
    let err = session.submit("012301").unwrap_err();
    drop(guard);

    assert!(matches!(err, ApplicationError::Busy));
    assert_eq!(transport.call_count(), 0);
    assert_eq!(notifier.notices(), vec![NOTICE_REQUEST_FAILED.to_string()]);
    assert!(!session.panel().is_shown());

    // released by the host, the next submit goes through
    assert!(session.submit("012301").is_ok());
}
