//! Fakes shared by the integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use guaxiang::application::services::Session;
use guaxiang::config::Settings;
use guaxiang::infrastructure::di::ServiceContainer;
use guaxiang::infrastructure::traits::{GuaTransport, Notifier, RawResponse, TransportError};

/// Transport that records every request and plays back scripted replies.
///
/// The last reply repeats once the script runs out.
pub struct FakeTransport {
    replies: Mutex<VecDeque<Result<RawResponse, TransportError>>>,
    pub calls: Mutex<Vec<String>>,
}

pub fn reply(status: u16, body: &str) -> Result<RawResponse, TransportError> {
    Ok(RawResponse {
        status,
        body: body.to_string(),
    })
}

impl FakeTransport {
    pub fn scripted(replies: Vec<Result<RawResponse, TransportError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn ok(body: &str) -> Arc<Self> {
        Self::status(200, body)
    }

    pub fn status(status: u16, body: &str) -> Arc<Self> {
        Self::scripted(vec![reply(status, body)])
    }

    pub fn unreachable() -> Arc<Self> {
        Self::scripted(vec![Err(TransportError::new("connection refused"))])
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl GuaTransport for FakeTransport {
    fn post_numbers(&self, numbers: &str) -> Result<RawResponse, TransportError> {
        self.calls.lock().unwrap().push(numbers.to_string());
        let mut replies = self.replies.lock().unwrap();
        if replies.len() > 1 {
            replies.pop_front().expect("non-empty script")
        } else {
            replies.front().cloned().expect("empty reply script")
        }
    }
}

/// Notifier that keeps every notice.
#[derive(Default)]
pub struct RecordingNotifier {
    pub notices: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<String> {
        self.notices.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.notices.lock().unwrap().push(message.to_string());
    }
}

pub fn session_with(transport: Arc<FakeTransport>, notifier: Arc<RecordingNotifier>) -> Session {
    ServiceContainer::with_deps(Settings::default(), transport, notifier).session()
}

/// Legacy response as the old backend sent it: name row first, then 初爻..上爻.
pub const LEGACY_BODY: &str = r#"{
    "year_ganzhi": "甲辰",
    "month_ganzhi": "丙寅",
    "day_ganzhi": "壬子",
    "hour_ganzhi": "庚午",
    "gua_xian": [
        "乾为天\t坤为地",
        "子孙子水━━━━━ o\t父母未土━━ ━━",
        "妻财寅木━━━━━\t父母巳火━━ ━━",
        "父母辰土━━━━━ 应\t兄弟卯木━━ ━━",
        "官鬼午火━━━━━\t妻财丑土━━ ━━",
        "兄弟申金━━━━━\t子孙亥水━━ ━━",
        "父母戌土━━━━━ 世\t官鬼酉金━━ ━━"
    ]
}"#;

/// Structured response with relations.
pub const STRUCTURED_BODY: &str = r#"{
    "year_ganzhi": "甲辰",
    "month_ganzhi": "丙寅",
    "day_ganzhi": "壬子",
    "hour_ganzhi": "庚午",
    "gua_lines": [
        {"text": "水雷屯", "bian_text": "水泽节"},
        {"text": "子孙子水━━━━━", "bian_text": "父母巳火━━━━━", "relation": "子孙", "bian_relation": "父母"},
        {"text": "妻财寅木━━ ━━", "bian_text": "妻财卯木━━━━━", "relation": "妻财", "role": "ying"},
        {"text": "父母辰土━━ ━━", "bian_text": "父母丑土━━ ━━", "relation": "父母"},
        {"text": "官鬼申金━━ ━━", "bian_text": "官鬼申金━━ ━━", "relation": "官鬼"},
        {"text": "兄弟戌土━━━━━", "bian_text": "兄弟戌土━━━━━", "relation": "兄弟", "role": "shi"},
        {"text": "父母子水━━ ━━", "bian_text": "父母子水━━ ━━", "relation": "父母"}
    ]
}"#;
