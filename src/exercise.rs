/// A single stretching exercise.
///
/// Exercises are loaded once from the built-in table and shared
/// read-only by the step generator and the session.
#[derive(Debug, Clone)]
pub(crate) struct Exercise {
    /// Name
    pub(crate) name: &'static str,

    /// Short text spoken when the exercise starts
    pub(crate) brief_description: &'static str,

    /// Full instructions shown on screen
    pub(crate) full_description: &'static str,

    /// Tag of the image depicting the exercise
    pub(crate) image: &'static str,

    /// Indication if each rep should be repeated for both sides (e.g. left and right)
    pub(crate) both_sides: bool,

    /// How many reps
    pub(crate) num_repetitions: u32,
}

/// Load the list of exercises
pub(crate) fn load() -> Vec<Exercise> {
    vec![
        Exercise {
            name: "Neck Retractions",
            brief_description: "Head back, eyes on the horizon.",
            full_description: "While sitting down, bring head straight back, keeping your \
                eyes on the horizon. Then return to neutral.",
            image: "neck_retraction",
            both_sides: false,
            num_repetitions: 10,
        },
        Exercise {
            name: "Head Drop",
            brief_description: "Look up",
            full_description: "Starting in a seated position, retract neck (as shown in \
                picture). Slowly move head up, and backward as far as you can comfortably \
                go. Return to neutral.",
            image: "head_drop",
            both_sides: false,
            num_repetitions: 10,
        },
        Exercise {
            name: "Side Bend",
            brief_description: "Pull head left and right",
            full_description: "Sit down, bring head into neck-retraction position, then \
                gently guide right ear toward right shoulder with right hand.\nStop when \
                you feel a stretch on the left side of neck. Return to neutral. Repeat \
                for other side.",
            image: "side_bend",
            both_sides: true,
            num_repetitions: 5,
        },
        Exercise {
            name: "Rotation",
            brief_description: "Look left, then right.",
            full_description: "While sitting, bring head back into neck-retraction \
                position, then gently turn head diagonally to the right so your nose is \
                over your shoulder. Return to neutral. Repeat in other direction.",
            image: "rotation",
            both_sides: true,
            num_repetitions: 5,
        },
        Exercise {
            name: "Flexion",
            brief_description: "Clasp head and push down",
            full_description: "Sitting down, bring head into neck-retraction position. \
                Clasp hands behind head and gently guide head down, bringing chin toward \
                chest. Stop when you feel a stretch in the back of your neck. Return to \
                neutral.",
            image: "flexion",
            both_sides: false,
            num_repetitions: 5,
        },
        Exercise {
            name: "Should Blade Pull",
            brief_description: "Bend arms behind back.",
            full_description: "While sitting, bend raised arms at 90-degree angles. Relax \
                shoulders and neck. Keeping arms and neck still, squeeze the muscles \
                between shoulder blades drawing shoulder blades closer together. Return \
                to neutral.",
            image: "should_blade_pull",
            both_sides: false,
            num_repetitions: 5,
        },
    ]
}
