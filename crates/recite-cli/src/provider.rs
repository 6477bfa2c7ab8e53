//! Example sentence sources, chained: remote chat endpoint, then the
//! local example database. Every failure here degrades to the next
//! source; the scheduling core supplies the final synthetic fallback.

use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use regex::Regex;
use serde::{Deserialize, Serialize};

use recite_core::{Example, ExampleProvider};
use recite_store::ProviderConfig;

// ---------------------------------------------------------------------------
// Pure parsing helpers (no I/O, fully unit-testable)
// ---------------------------------------------------------------------------

/// Split a provider line of the form `english sentence_中文翻译` into an
/// example. Underscores past the first are dropped; a line without a
/// separator is split at the first run of CJK characters; failing that,
/// the whole line is the sentence and the translation is empty.
pub fn split_example_line(line: &str) -> Example {
    let line = line.trim();

    if let Some((en, zh)) = line.split_once('_') {
        return Example::new(en.trim(), zh.replace('_', "").trim());
    }

    // CJK ranges: common hanzi plus CJK and fullwidth punctuation.
    static CJK: OnceLock<Regex> = OnceLock::new();
    let cjk = CJK.get_or_init(|| {
        Regex::new(r"[\u{4e00}-\u{9fff}\u{3000}-\u{303f}\u{ff00}-\u{ffef}]").expect("static regex")
    });
    match cjk.find(line) {
        Some(m) => Example::new(line[..m.start()].trim(), line[m.start()..].trim()),
        None => Example::new(line, ""),
    }
}

/// A usable example must actually contain the term (case-insensitive)
/// and a non-empty sentence.
fn line_usable(example: &Example, term: &str) -> bool {
    !example.sentence.is_empty()
        && example
            .sentence
            .to_lowercase()
            .contains(&term.to_lowercase())
}

// ---------------------------------------------------------------------------
// Remote chat-completions provider
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

struct RemoteProvider {
    client: reqwest::blocking::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl RemoteProvider {
    fn from_config(config: &ProviderConfig) -> Option<Self> {
        if config.endpoint.is_empty() {
            return None;
        }
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .ok()?;
        Some(Self {
            client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key: std::env::var(&config.api_key_env).ok(),
        })
    }

    fn fetch(&self, term: &str) -> Option<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: format!(
                    "请生成一个包含英文单词'{term}'的例句，全部小写字母，带中文翻译。\
                     输出格式为英文例句_中文翻译，不要其他多余的输出"
                ),
            }],
        };

        let mut builder = self.client.post(&self.endpoint).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| tracing::warn!("example request for '{term}' failed: {e}"))
            .ok()?;
        let parsed: ChatResponse = response
            .json()
            .map_err(|e| tracing::warn!("example response for '{term}' unparseable: {e}"))
            .ok()?;
        parsed.choices.into_iter().next().map(|c| c.message.content)
    }
}

// ---------------------------------------------------------------------------
// Local example database
// ---------------------------------------------------------------------------

/// `examples.json`: a map of lowercase term → example lines, same line
/// format as the remote provider.
struct LocalExamples {
    entries: HashMap<String, Vec<String>>,
}

impl LocalExamples {
    fn load(path: &Path) -> Self {
        let entries = std::fs::read_to_string(path)
            .ok()
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default();
        Self { entries }
    }

    fn lines_for(&self, term: &str) -> Option<&Vec<String>> {
        self.entries.get(&term.to_lowercase())
    }
}

// ---------------------------------------------------------------------------
// The chain
// ---------------------------------------------------------------------------

pub struct ChainProvider {
    remote: Option<RemoteProvider>,
    local: LocalExamples,
    rng: SmallRng,
}

impl ChainProvider {
    pub fn new(config: &ProviderConfig, examples_path: &Path) -> Self {
        Self {
            remote: RemoteProvider::from_config(config),
            local: LocalExamples::load(examples_path),
            rng: SmallRng::from_os_rng(),
        }
    }

    fn remote_example(&mut self, term: &str) -> Option<Example> {
        let content = self.remote.as_ref()?.fetch(term)?;
        let lines: Vec<&str> = content
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let line = lines.choose(&mut self.rng)?;
        let example = split_example_line(line);
        line_usable(&example, term).then_some(example)
    }

    fn local_example(&mut self, term: &str) -> Option<Example> {
        let lines = self.local.lines_for(term)?;
        let line = lines.choose(&mut self.rng)?;
        let example = split_example_line(line);
        (!example.sentence.is_empty()).then_some(example)
    }
}

impl ExampleProvider for ChainProvider {
    fn example(&mut self, term: &str, _translation: &str) -> Option<Example> {
        self.remote_example(term)
            .or_else(|| self.local_example(term))
    }
}
