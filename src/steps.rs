use std::fmt;

use crate::exercise::Exercise;

/// How long should the position be held for
pub(crate) const HOLD_DURATION_MS: i64 = 15_000;

/// Rest between reps
pub(crate) const REP_REST_DURATION_MS: i64 = 5_000;

/// Rest between exercises
pub(crate) const EXERCISE_REST_DURATION_MS: i64 = 10_000;

/// Warning beeps played before an action expires, one per second
const NUM_WARNING_BEEPS: u8 = 3;

/// One entry of the generated step sequence.
///
/// A sequence always starts with exactly one `Started` and ends with
/// exactly one `Finished`. Runtime fields (`num_actions_done`, the
/// timing fields of `Action`) mutate in place while the session runs;
/// the shape of the sequence never changes.
#[derive(Debug, Clone)]
pub(crate) enum Step {
    /// Sentinel marking the start of the sequence
    Started,

    /// Switch to a new exercise
    SwitchExercise {
        exercise: Exercise,
        /// Count of `Action` steps belonging to this exercise,
        /// leading rest included
        num_actions: u32,
        /// How many of them have been dequeued so far
        num_actions_done: u32,
    },

    /// A timed hold or rest
    Action(Action),

    /// Sentinel marking the end of the sequence
    Finished,
}

/// A timed unit of work within an exercise.
#[derive(Debug, Clone)]
pub(crate) struct Action {
    /// Label spoken and shown while the action runs
    pub(crate) label: &'static str,

    /// Duration
    pub(crate) duration_ms: i64,

    /// Timestamp when the action was started
    start_time_ms: i64,

    /// Indication if the action is paused or not
    paused: bool,

    /// Timestamp when the action was paused
    paused_at_ms: i64,

    /// How many warning beeps are left to be played
    remaining_warning_beeps: u8,
}

impl Action {
    fn new(label: &'static str, duration_ms: i64) -> Action {
        Action {
            label,
            duration_ms,
            start_time_ms: 0,
            paused: false,
            paused_at_ms: 0,
            remaining_warning_beeps: NUM_WARNING_BEEPS,
        }
    }

    /// Mark the action as started now.
    pub(crate) fn reset(&mut self, now_ms: i64) {
        self.start_time_ms = now_ms;
    }

    fn elapsed_ms(&self, now_ms: i64) -> i64 {
        if self.paused {
            self.paused_at_ms - self.start_time_ms
        } else {
            now_ms - self.start_time_ms
        }
    }

    pub(crate) fn remaining_ms(&self, now_ms: i64) -> i64 {
        self.duration_ms - self.elapsed_ms(now_ms)
    }

    pub(crate) fn is_completed(&self, now_ms: i64) -> bool {
        self.remaining_ms(now_ms) <= 0
    }

    pub(crate) fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pause or resume the action. A request matching the current state
    /// is a no-op. Resuming shifts the start timestamp forward by the
    /// paused duration, so the remaining time is preserved exactly.
    pub(crate) fn toggle_pause(&mut self, paused: bool, now_ms: i64) {
        if self.paused == paused {
            return;
        }

        self.paused = paused;

        if self.paused {
            self.paused_at_ms = now_ms;
        } else {
            self.start_time_ms = now_ms - (self.paused_at_ms - self.start_time_ms);
        }
    }

    /// Check off one warning beep if the remaining time has crossed the
    /// next whole-second boundary before expiry.
    ///
    /// Returns `Some(true)` for the final (longer) warning, `Some(false)`
    /// for the earlier ones, `None` when no beep is due.
    pub(crate) fn pending_warning(&mut self, now_ms: i64) -> Option<bool> {
        if self.remaining_warning_beeps == 0 {
            return None;
        }

        if self.remaining_ms(now_ms) > i64::from(self.remaining_warning_beeps) * 1000 {
            return None;
        }

        self.remaining_warning_beeps -= 1;
        Some(self.remaining_warning_beeps == 0)
    }
}

/// Rejected exercise input.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum GenerateError {
    /// The exercise list was empty
    NoExercises,
    /// The named exercise has no repetitions
    ZeroRepetitions(&'static str),
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::NoExercises => write!(f, "no exercises to generate steps for"),
            GenerateError::ZeroRepetitions(name) => {
                write!(f, "exercise {:?} has zero repetitions", name)
            }
        }
    }
}

impl std::error::Error for GenerateError {}

/// Given a list of exercises, generate the flat list of steps
///
/// Each exercise contributes one `SwitchExercise` step followed by a
/// rest (shorter before the very first exercise, since nothing precedes
/// it) and its hold/rest actions. No rest is emitted after the last
/// repetition of an exercise.
pub(crate) fn generate(exercises: &[Exercise]) -> Result<Vec<Step>, GenerateError> {
    if exercises.is_empty() {
        return Err(GenerateError::NoExercises);
    }

    let mut steps = vec![Step::Started];

    for (exercise_index, exercise) in exercises.iter().enumerate() {
        if exercise.num_repetitions == 0 {
            return Err(GenerateError::ZeroRepetitions(exercise.name));
        }

        let mut actions = Vec::new();

        // Rest before the first hold
        actions.push(generate_rest(if exercise_index == 0 {
            REP_REST_DURATION_MS
        } else {
            EXERCISE_REST_DURATION_MS
        }));

        for rep in 0..exercise.num_repetitions {
            // Do rep
            actions.push(Action::new(
                if exercise.both_sides { "Hold left" } else { "Hold" },
                HOLD_DURATION_MS,
            ));

            if exercise.both_sides {
                // Rest between sides
                actions.push(generate_rest(REP_REST_DURATION_MS));

                // Do other side
                actions.push(Action::new("Hold right", HOLD_DURATION_MS));
            }

            // Rest between reps (if not the last one)
            if rep + 1 != exercise.num_repetitions {
                actions.push(generate_rest(REP_REST_DURATION_MS));
            }
        }

        steps.push(Step::SwitchExercise {
            exercise: exercise.clone(),
            num_actions: actions.len() as u32,
            num_actions_done: 0,
        });
        steps.extend(actions.into_iter().map(Step::Action));
    }

    steps.push(Step::Finished);

    Ok(steps)
}

fn generate_rest(duration_ms: i64) -> Action {
    Action::new("Rest", duration_ms)
}
