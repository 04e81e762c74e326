use std::env;
use std::process::{Child, Command, Stdio};

use crate::sinks::Narrator;

/// Narrates by spawning an external text-to-speech command.
///
/// The command is taken from `STRETCHER_TTS` (an empty value disables
/// narration), defaulting to `say` on macOS and `espeak` elsewhere.
/// Spawning is fire-and-forget; if the command cannot be started,
/// narration goes silent and the session carries on.
pub(crate) struct SpeechNarrator {
    command: Option<String>,
    children: Vec<Child>,
}

impl SpeechNarrator {
    pub(crate) fn from_env() -> SpeechNarrator {
        let command = match env::var("STRETCHER_TTS") {
            Ok(command) => {
                if command.is_empty() {
                    None
                } else {
                    Some(command)
                }
            }
            Err(_) => Some(default_command().to_string()),
        };

        SpeechNarrator {
            command,
            children: Vec::new(),
        }
    }

    /// Collect children that have finished speaking
    fn reap(&mut self) {
        self.children
            .retain_mut(|child| !matches!(child.try_wait(), Ok(Some(_))));
    }
}

fn default_command() -> &'static str {
    if cfg!(target_os = "macos") {
        "say"
    } else {
        "espeak"
    }
}

impl Narrator for SpeechNarrator {
    fn speak(&mut self, text: &str) {
        self.reap();

        let command = match &self.command {
            Some(command) => command,
            None => return,
        };

        match Command::new(command)
            .arg(text)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(child) => self.children.push(child),
            Err(_) => {
                // Engine unavailable, stay silent from here on
                self.command = None;
            }
        }
    }

    fn stop(&mut self) {
        for child in self.children.iter_mut() {
            let _ = child.kill();
            let _ = child.wait();
        }
        self.children.clear();
    }
}

impl Drop for SpeechNarrator {
    fn drop(&mut self) {
        self.stop();
    }
}
