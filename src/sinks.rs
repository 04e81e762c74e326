//! Seams between the session and its collaborators.
//!
//! All emissions are fire-and-forget. Implementations must not block
//! the caller, and failures stay inside the sink; the session proceeds
//! whether or not a sink did anything.

/// Queues text for speech output.
pub(crate) trait Narrator {
    fn speak(&mut self, text: &str);

    /// Cut off any narration still in flight.
    fn stop(&mut self);
}

/// Receives everything the session wants on screen.
pub(crate) trait DisplaySink {
    /// Countdown line plus the current action label
    fn set_timer_text(&mut self, text: &str);

    /// Full instructions for the current exercise
    fn set_description(&mut self, text: &str);

    /// Tag of the image depicting the current exercise
    fn set_image(&mut self, image: &str);

    /// Whole-session progress, 0-100
    fn set_overall_progress(&mut self, percent: u8);

    /// Progress within the current exercise, 0-100
    fn set_inner_progress(&mut self, percent: u8);

    /// Reflect the play/pause state
    fn set_paused(&mut self, paused: bool);
}

/// Plays one discrete audible countdown pulse.
pub(crate) trait AlertSink {
    /// The last warning before an action expires is longer than the
    /// earlier ones.
    fn play_alert(&mut self, last_warning: bool);
}
