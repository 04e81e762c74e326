use std::env;
use std::io::{stdout, Write};
use std::process::Child;
#[cfg(target_os = "macos")]
use std::process::{Command, Stdio};

use crate::sinks::AlertSink;

#[cfg(target_os = "macos")]
const PIP_SOUND: &str = "/System/Library/Sounds/Ping.aiff";
#[cfg(target_os = "macos")]
const FINAL_SOUND: &str = "/System/Library/Sounds/Glass.aiff";

/// Plays warning pulses.
///
/// On macOS the bundled system sounds are played through `afplay`, with
/// a distinct sound for the final warning. Everywhere else (and when
/// `afplay` cannot be spawned) the terminal bell is rung instead, twice
/// for the final warning. `STRETCHER_MUTE` disables alerts entirely.
pub(crate) struct Beeper {
    muted: bool,
    children: Vec<Child>,
}

impl Beeper {
    pub(crate) fn from_env() -> Beeper {
        Beeper {
            muted: env::var_os("STRETCHER_MUTE").is_some(),
            children: Vec::new(),
        }
    }

    /// Collect players that have finished
    fn reap(&mut self) {
        self.children
            .retain_mut(|child| !matches!(child.try_wait(), Ok(Some(_))));
    }

    #[cfg(target_os = "macos")]
    fn play_system_sound(&mut self, last_warning: bool) -> Result<(), ()> {
        let path = if last_warning { FINAL_SOUND } else { PIP_SOUND };

        match Command::new("afplay")
            .arg(path)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(child) => {
                self.children.push(child);
                Ok(())
            }
            Err(_) => Err(()),
        }
    }

    #[cfg(not(target_os = "macos"))]
    fn play_system_sound(&mut self, _last_warning: bool) -> Result<(), ()> {
        Err(())
    }
}

impl AlertSink for Beeper {
    fn play_alert(&mut self, last_warning: bool) {
        if self.muted {
            return;
        }

        self.reap();

        if self.play_system_sound(last_warning).is_err() {
            let mut stdout = stdout();
            let bell: &[u8] = if last_warning { b"\x07\x07" } else { b"\x07" };
            let _ = stdout.write_all(bell);
            let _ = stdout.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::sinks::AlertSink;

    use super::Beeper;

    #[test]
    fn muted_beeper_spawns_nothing() {
        let mut beeper = Beeper {
            muted: true,
            children: Vec::new(),
        };

        beeper.play_alert(false);
        beeper.play_alert(true);
        assert!(beeper.children.is_empty());
    }
}
