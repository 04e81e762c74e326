use core::time::Duration;

use crossterm::event::EventStream;
use futures_util::StreamExt;
use tokio::time::interval;

use crate::sinks::{AlertSink, DisplaySink, Narrator};
use crate::ui::input::{self, UserCommand};

use super::{Session, SessionState, Tick};

/// Time elapsed between two ticks of the session
const UPDATE_PERIOD_MS: u64 = 50;

/// Drive the session until the step sequence is exhausted or the user
/// quits.
///
/// The tick and the key handlers run interleaved on this one task, so
/// session state is never touched from two places at once.
pub(crate) async fn drive(
    mut session: Session,
    narrator: &mut dyn Narrator,
    display: &mut dyn DisplaySink,
    alert: &mut dyn AlertSink,
) {
    let mut ticker = interval(Duration::from_millis(UPDATE_PERIOD_MS));
    let mut events = EventStream::new();
    let mut input_open = true;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if session.advance(narrator, display, alert) == Tick::Stop {
                    break;
                }
            }
            event = events.next(), if input_open => {
                match event {
                    Some(Ok(event)) => {
                        if !handle_event(&event, &mut session, narrator, display) {
                            break;
                        }
                    }
                    Some(Err(err)) => {
                        dbg!(err.to_string());
                    }
                    // Input closed; keep the session running on ticks alone
                    None => input_open = false,
                }
            }
        }
    }
}

/// Dispatch one terminal event. Returns false when the user quits.
fn handle_event(
    event: &crossterm::event::Event,
    session: &mut Session,
    narrator: &mut dyn Narrator,
    display: &mut dyn DisplaySink,
) -> bool {
    match input::command_for(event) {
        Some(UserCommand::TogglePause) => match session.state() {
            SessionState::RunningAction => {
                session.toggle_pause(true);
                display.set_paused(true);
            }
            SessionState::Paused => {
                session.toggle_pause(false);
                display.set_paused(false);
            }
            SessionState::AwaitingStep | SessionState::Finished => {}
        },
        Some(UserCommand::Skip) => {
            session.skip(narrator);
            display.set_paused(false);
        }
        Some(UserCommand::Quit) => {
            narrator.stop();
            return false;
        }
        None => {}
    }

    true
}
