use audio::Beeper;
use speech::SpeechNarrator;
use state::Session;
use time::SystemClock;
use ui::Terminal;

mod audio;
mod exercise;
pub(crate) mod markup;
mod sinks;
mod speech;
mod state;
mod steps;
mod time;
mod ui;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let exercises = exercise::load();
    let steps = steps::generate(&exercises)?;

    let mut narrator = SpeechNarrator::from_env();
    let mut alert = Beeper::from_env();
    let mut display = Terminal::new()?;

    let session = Session::new(steps, Box::new(SystemClock));

    // The loop to tick the session and react to key presses
    state::periodic::drive(session, &mut narrator, &mut display, &mut alert).await;

    Ok(())
}
