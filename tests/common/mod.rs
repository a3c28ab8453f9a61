#![allow(dead_code)]

use std::env;
use std::sync::Mutex;

static ENV_LOCK: Mutex<()> = Mutex::new(());

const PREFIXES: &[&str] = &["OPENAI_", "TELEGRAM_", "AGENT_", "ALLOWED_DOMAINS", "JOBBRIEF_"];

pub struct EnvGuard {
    _lock: std::sync::MutexGuard<'static, ()>,
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        clear_env();
    }
}

pub fn with_jobbrief_env<'a>(vars: impl IntoIterator<Item = (&'a str, &'a str)>) -> EnvGuard {
    let guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    clear_env();
    for (k, v) in vars {
        env::set_var(k, v);
    }
    EnvGuard { _lock: guard }
}

fn clear_env() {
    for (key, _) in env::vars() {
        if PREFIXES.iter().any(|prefix| key.starts_with(prefix)) {
            env::remove_var(key);
        }
    }
}

/// A Responses API payload carrying one message with `text` and a single
/// web search call.
pub fn responses_body(text: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "resp_123",
        "object": "response",
        "status": "completed",
        "output": [
            {
                "type": "web_search_call",
                "id": "ws_1",
                "status": "completed",
                "action": {
                    "type": "search",
                    "query": "rynek pracy IT",
                    "sources": [
                        { "type": "url", "url": "https://example.com/jobs" }
                    ]
                }
            },
            {
                "type": "message",
                "id": "msg_1",
                "role": "assistant",
                "status": "completed",
                "content": [
                    {
                        "type": "output_text",
                        "text": text,
                        "annotations": [
                            {
                                "type": "url_citation",
                                "start_index": 0,
                                "end_index": 1,
                                "url": "https://example.com/jobs",
                                "title": "Jobs"
                            }
                        ]
                    }
                ]
            }
        ],
        "usage": { "input_tokens": 120, "output_tokens": 80, "total_tokens": 200 }
    })
}
