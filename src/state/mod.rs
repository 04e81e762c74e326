use crate::sinks::{AlertSink, DisplaySink, Narrator};
use crate::steps::Step;
use crate::time::{self, Clock};

use self::session_state::SessionState;

pub(crate) mod periodic;
mod session_state;

/// Signal returned by `advance` to the polling loop.
#[derive(Eq, PartialEq, Debug)]
pub(crate) enum Tick {
    /// Keep scheduling `advance` calls
    Continue,
    /// The sequence is exhausted, stop polling
    Stop,
}

/// Drives one run through a generated step sequence.
///
/// The session owns its state exclusively; the host interacts with it
/// only through `advance`, `toggle_pause` and `skip`, all of which must
/// be called from the same logical thread.
pub(crate) struct Session {
    /// Generated steps. Consumed via `cursor`; runtime fields of the
    /// steps mutate in place, the shape of the sequence never changes.
    steps: Vec<Step>,

    /// Index of the next step to dequeue
    cursor: usize,

    /// Index of the `SwitchExercise` step currently on screen
    current_exercise: Option<usize>,

    /// Index of the `Action` step currently ticking
    current_action: Option<usize>,

    /// Set once `Finished` has been dequeued
    finished: bool,

    clock: Box<dyn Clock>,
}

impl Session {
    pub(crate) fn new(steps: Vec<Step>, clock: Box<dyn Clock>) -> Session {
        Session {
            steps,
            cursor: 0,
            current_exercise: None,
            current_action: None,
            finished: false,
            clock,
        }
    }

    /// Run one tick of the session.
    ///
    /// Dequeues steps until a timed action becomes active (switch and
    /// sentinel steps consume no time), then accounts for warning beeps,
    /// completion and the countdown display of that action.
    pub(crate) fn advance(
        &mut self,
        narrator: &mut dyn Narrator,
        display: &mut dyn DisplaySink,
        alert: &mut dyn AlertSink,
    ) -> Tick {
        if self.finished {
            return Tick::Stop;
        }

        while self.current_action.is_none() {
            let index = self.cursor;
            if index >= self.steps.len() {
                // Generated sequences always end with `Finished`; a queue
                // without one is treated as exhausted.
                self.finished = true;
                return Tick::Stop;
            }
            self.cursor += 1;

            display.set_overall_progress(percent(self.cursor as u32, self.steps.len() as u32));

            match &self.steps[index] {
                Step::Started => {}
                Step::Finished => {
                    narrator.speak("All exercises finished");
                    display.set_timer_text("Done");
                    self.finished = true;
                    return Tick::Stop;
                }
                Step::SwitchExercise { exercise, .. } => {
                    display.set_description(exercise.full_description);
                    display.set_image(exercise.image);
                    narrator.speak(&format!(
                        "{}. {}",
                        exercise.name, exercise.brief_description
                    ));
                    self.current_exercise = Some(index);
                }
                Step::Action(_) => self.begin_action(index, narrator, display),
            }
        }

        let index = match self.current_action {
            Some(index) => index,
            None => return Tick::Continue,
        };
        let now_ms = self.clock.now_ms();

        if let Step::Action(ref mut action) = self.steps[index] {
            // Give off a warning that the action is about to expire
            if let Some(last_warning) = action.pending_warning(now_ms) {
                alert.play_alert(last_warning);
            }

            if action.is_completed(now_ms) {
                self.current_action = None;
                return Tick::Continue;
            }

            display.set_timer_text(&format!(
                "{}\n{}",
                time::format_elapsed_time(action.remaining_ms(now_ms)),
                action.label
            ));
        }

        Tick::Continue
    }

    /// Pause or resume the active action. No-op while no action is
    /// active, or when the requested state matches the current one.
    pub(crate) fn toggle_pause(&mut self, paused: bool) {
        let index = match self.current_action {
            Some(index) => index,
            None => return,
        };
        let now_ms = self.clock.now_ms();

        if let Step::Action(ref mut action) = self.steps[index] {
            action.toggle_pause(paused, now_ms);
        }
    }

    /// Drop the active action without waiting for it to expire. The next
    /// `advance` call dequeues the following step.
    pub(crate) fn skip(&mut self, narrator: &mut dyn Narrator) {
        let index = match self.current_action.take() {
            Some(index) => index,
            None => return,
        };

        narrator.stop();

        let now_ms = self.clock.now_ms();
        if let Step::Action(ref mut action) = self.steps[index] {
            action.toggle_pause(false, now_ms);
        }
    }

    pub(crate) fn state(&self) -> SessionState {
        if self.finished {
            SessionState::Finished
        } else if self.current_action.is_some() {
            if self.is_paused() {
                SessionState::Paused
            } else {
                SessionState::RunningAction
            }
        } else {
            SessionState::AwaitingStep
        }
    }
}

/// Private methods
impl Session {
    /// Bookkeeping and side effects for a freshly dequeued action
    fn begin_action(
        &mut self,
        index: usize,
        narrator: &mut dyn Narrator,
        display: &mut dyn DisplaySink,
    ) {
        if let Some(exercise_index) = self.current_exercise {
            if let Step::SwitchExercise {
                num_actions,
                ref mut num_actions_done,
                ..
            } = self.steps[exercise_index]
            {
                *num_actions_done += 1;
                display.set_inner_progress(percent(*num_actions_done, num_actions));
            }
        }

        let now_ms = self.clock.now_ms();
        if let Step::Action(ref mut action) = self.steps[index] {
            action.reset(now_ms);
            narrator.speak(action.label);
        }

        self.current_action = Some(index);
    }

    fn is_paused(&self) -> bool {
        match self.current_action {
            Some(index) => match self.steps[index] {
                Step::Action(ref action) => action.is_paused(),
                _ => false,
            },
            None => false,
        }
    }
}

fn percent(done: u32, total: u32) -> u8 {
    if total == 0 {
        return 100;
    }
    (done * 100 / total) as u8
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::{Session, SessionState, Tick};
    use crate::exercise::{self, Exercise};
    use crate::sinks::{AlertSink, DisplaySink, Narrator};
    use crate::steps;
    use crate::time::Clock;

    struct TestClock(Rc<Cell<i64>>);

    impl Clock for TestClock {
        fn now_ms(&self) -> i64 {
            self.0.get()
        }
    }

    #[derive(Default)]
    struct SpokenLog {
        spoken: Vec<String>,
        stops: u32,
    }

    impl Narrator for SpokenLog {
        fn speak(&mut self, text: &str) {
            self.spoken.push(text.to_string());
        }

        fn stop(&mut self) {
            self.stops += 1;
        }
    }

    #[derive(Default)]
    struct ScreenLog {
        timer_texts: Vec<String>,
        descriptions: Vec<String>,
        images: Vec<String>,
        overall: Vec<u8>,
        inner: Vec<u8>,
        paused_flags: Vec<bool>,
    }

    impl DisplaySink for ScreenLog {
        fn set_timer_text(&mut self, text: &str) {
            self.timer_texts.push(text.to_string());
        }

        fn set_description(&mut self, text: &str) {
            self.descriptions.push(text.to_string());
        }

        fn set_image(&mut self, image: &str) {
            self.images.push(image.to_string());
        }

        fn set_overall_progress(&mut self, percent: u8) {
            self.overall.push(percent);
        }

        fn set_inner_progress(&mut self, percent: u8) {
            self.inner.push(percent);
        }

        fn set_paused(&mut self, paused: bool) {
            self.paused_flags.push(paused);
        }
    }

    #[derive(Default)]
    struct AlertLog {
        alerts: Vec<bool>,
    }

    impl AlertSink for AlertLog {
        fn play_alert(&mut self, last_warning: bool) {
            self.alerts.push(last_warning);
        }
    }

    struct Harness {
        session: Session,
        time: Rc<Cell<i64>>,
        narrator: SpokenLog,
        display: ScreenLog,
        alerts: AlertLog,
    }

    impl Harness {
        fn new(exercises: &[Exercise]) -> Harness {
            let time = Rc::new(Cell::new(0));
            let generated = steps::generate(exercises).expect("generate");
            let session = Session::new(generated, Box::new(TestClock(time.clone())));

            Harness {
                session,
                time,
                narrator: SpokenLog::default(),
                display: ScreenLog::default(),
                alerts: AlertLog::default(),
            }
        }

        fn tick(&mut self) -> Tick {
            self.session
                .advance(&mut self.narrator, &mut self.display, &mut self.alerts)
        }

        fn tick_at(&mut self, now_ms: i64) -> Tick {
            self.time.set(now_ms);
            self.tick()
        }
    }

    fn exercise(name: &'static str, both_sides: bool, num_repetitions: u32) -> Exercise {
        Exercise {
            name,
            brief_description: "brief",
            full_description: "full",
            image: "image",
            both_sides,
            num_repetitions,
        }
    }

    #[test]
    fn single_rep_session_runs_to_finish() {
        // Sequence: Started, SwitchExercise, Rest 5s, Hold 15s, Finished
        let mut harness = Harness::new(&[exercise("Necks", false, 1)]);

        assert_eq!(harness.session.state(), SessionState::AwaitingStep);

        // First tick dequeues through to the leading rest
        assert_eq!(harness.tick(), Tick::Continue);
        assert_eq!(harness.narrator.spoken, vec!["Necks. brief", "Rest"]);
        assert_eq!(harness.display.descriptions, vec!["full"]);
        assert_eq!(harness.display.images, vec!["image"]);
        assert_eq!(harness.display.timer_texts, vec!["00:05.000\nRest"]);
        assert_eq!(harness.session.state(), SessionState::RunningAction);

        // Rest expires, one tick clears it, the next starts the hold
        assert_eq!(harness.tick_at(5_000), Tick::Continue);
        assert_eq!(harness.tick_at(5_000), Tick::Continue);
        assert_eq!(harness.narrator.spoken.last().map(String::as_str), Some("Hold"));
        assert_eq!(
            harness.display.timer_texts.last().map(String::as_str),
            Some("00:15.000\nHold")
        );

        // Hold expires
        assert_eq!(harness.tick_at(20_000), Tick::Continue);
        assert_eq!(harness.tick_at(20_000), Tick::Stop);

        assert_eq!(
            harness.narrator.spoken.last().map(String::as_str),
            Some("All exercises finished")
        );
        assert_eq!(harness.display.timer_texts.last().map(String::as_str), Some("Done"));
        assert_eq!(harness.display.overall, vec![20, 40, 60, 80, 100]);
        assert_eq!(harness.display.inner, vec![50, 100]);
        assert_eq!(harness.session.state(), SessionState::Finished);
    }

    #[test]
    fn advance_after_finish_stays_a_noop() {
        let mut harness = Harness::new(&[exercise("a", false, 1)]);

        harness.tick();
        harness.tick_at(5_000);
        harness.tick_at(5_000);
        harness.tick_at(20_000);
        assert_eq!(harness.tick_at(20_000), Tick::Stop);

        let spoken = harness.narrator.spoken.len();
        let timer_texts = harness.display.timer_texts.len();

        assert_eq!(harness.tick_at(21_000), Tick::Stop);
        assert_eq!(harness.tick_at(22_000), Tick::Stop);
        assert_eq!(harness.narrator.spoken.len(), spoken);
        assert_eq!(harness.display.timer_texts.len(), timer_texts);
    }

    #[test]
    fn full_table_progress_is_monotone_and_complete() {
        let mut harness = Harness::new(&exercise::load());

        let mut guard = 0;
        loop {
            guard += 1;
            assert!(guard < 10_000, "session never finished");

            if harness.tick() == Tick::Stop {
                break;
            }
            self_advance(&mut harness, 1_000);
        }

        let overall = &harness.display.overall;
        assert!(overall.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(overall.last(), Some(&100));

        assert!(harness.display.inner.iter().all(|&percent| percent <= 100));
        assert_eq!(harness.display.inner.last(), Some(&100));

        // Every action gets two short warnings and one long one
        assert!(harness.alerts.alerts.len() % 3 == 0);
        assert!(harness
            .alerts
            .alerts
            .chunks(3)
            .all(|chunk| chunk == &[false, false, true][..]));
    }

    fn self_advance(harness: &mut Harness, delta_ms: i64) {
        harness.time.set(harness.time.get() + delta_ms);
    }

    #[test]
    fn pause_freezes_the_countdown_exactly() {
        let mut harness = Harness::new(&[exercise("a", false, 1)]);

        harness.tick();
        harness.tick_at(5_000);
        harness.tick_at(5_000);

        // One second into the hold
        harness.tick_at(6_000);
        assert_eq!(
            harness.display.timer_texts.last().map(String::as_str),
            Some("00:14.000\nHold")
        );

        harness.session.toggle_pause(true);
        assert_eq!(harness.session.state(), SessionState::Paused);

        // Five seconds pass while paused, remaining time does not move
        assert_eq!(harness.tick_at(11_000), Tick::Continue);
        assert_eq!(
            harness.display.timer_texts.last().map(String::as_str),
            Some("00:14.000\nHold")
        );

        harness.session.toggle_pause(false);
        assert_eq!(harness.session.state(), SessionState::RunningAction);
        harness.tick_at(11_000);
        assert_eq!(
            harness.display.timer_texts.last().map(String::as_str),
            Some("00:14.000\nHold")
        );

        harness.tick_at(12_000);
        assert_eq!(
            harness.display.timer_texts.last().map(String::as_str),
            Some("00:13.000\nHold")
        );
    }

    #[test]
    fn toggle_pause_without_active_action_is_a_noop() {
        let mut harness = Harness::new(&[exercise("a", false, 1)]);

        harness.session.toggle_pause(true);
        assert_eq!(harness.session.state(), SessionState::AwaitingStep);

        harness.tick();
        assert_eq!(harness.session.state(), SessionState::RunningAction);
    }

    #[test]
    fn warning_beeps_count_down_to_a_final_one() {
        let mut harness = Harness::new(&[exercise("a", false, 1)]);

        // Skip the leading rest so the hold starts at t=0
        harness.tick();
        harness.session.skip(&mut harness.narrator);
        harness.tick();
        assert_eq!(harness.narrator.spoken.last().map(String::as_str), Some("Hold"));
        assert_eq!(harness.narrator.stops, 1);

        assert_eq!(harness.tick_at(11_900), Tick::Continue);
        assert_eq!(harness.alerts.alerts, Vec::<bool>::new());

        harness.tick_at(12_050);
        harness.tick_at(12_100);
        assert_eq!(harness.alerts.alerts, vec![false]);

        harness.tick_at(13_050);
        harness.tick_at(14_050);
        assert_eq!(harness.alerts.alerts, vec![false, false, true]);

        harness.tick_at(14_900);
        assert_eq!(harness.alerts.alerts, vec![false, false, true]);
    }

    #[test]
    fn skip_drops_a_paused_action_and_resumes_the_flow() {
        let mut harness = Harness::new(&[exercise("a", true, 1)]);

        harness.tick();
        harness.session.toggle_pause(true);
        assert_eq!(harness.session.state(), SessionState::Paused);

        harness.session.skip(&mut harness.narrator);
        assert_eq!(harness.narrator.stops, 1);
        assert_eq!(harness.session.state(), SessionState::AwaitingStep);

        // Next tick starts the first hold, unpaused
        harness.tick();
        assert_eq!(
            harness.narrator.spoken.last().map(String::as_str),
            Some("Hold left")
        );
        assert_eq!(harness.session.state(), SessionState::RunningAction);
    }
}
