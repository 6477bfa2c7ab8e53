//! Fire-and-forget speech cue via the platform TTS command. Failures
//! are swallowed; speech never affects scheduling state.

use std::process::{Command, Stdio};

pub struct Speech {
    enabled: bool,
}

impl Speech {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Speak `text` without waiting for the command to finish.
    pub fn speak(&self, text: &str) {
        if !self.enabled || text.trim().is_empty() {
            return;
        }
        let (cmd, args): (&str, &[&str]) = if cfg!(target_os = "macos") {
            ("say", &[])
        } else {
            ("espeak", &[])
        };
        let result = Command::new(cmd)
            .args(args)
            .arg(text)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        if let Err(e) = result {
            tracing::debug!("speech cue unavailable ({cmd}): {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_speech_is_silent_noop() {
        Speech::new(false).speak("hello");
    }

    #[test]
    fn test_empty_text_is_noop() {
        Speech::new(true).speak("   ");
    }
}
