//! Test utilities shared by unit tests.
//!
//! Provides quiz fixtures with known answers and assertions for camera poses.

/// Fixtures with known correct answers.
pub mod fixtures {
    use crate::content::QuizQuestion;
    use crate::portrait::{AvatarProfile, Gender, HairColor, HairStyle, Height};

    /// A single question whose answer is option 0.
    pub static ONE_QUESTION: &[QuizQuestion] = &[QuizQuestion {
        prompt: "Quin color té el Sol?",
        options: &["Groc", "Verd"],
        correct: 0,
    }];

    /// Two three-option questions, both answered by option 0.
    pub static TWO_QUESTIONS: &[QuizQuestion] = &[
        QuizQuestion {
            prompt: "Primera pregunta",
            options: &["Correcta", "Incorrecta", "Tampoc"],
            correct: 0,
        },
        QuizQuestion {
            prompt: "Segona pregunta",
            options: &["Correcta", "Incorrecta", "Tampoc"],
            correct: 0,
        },
    ];

    /// A filled-in avatar profile without generated images.
    pub fn cadet(name: &str) -> AvatarProfile {
        AvatarProfile {
            name: name.to_string(),
            gender: Gender::Girl,
            height: Height::Medium,
            hair_color: HairColor::Brown,
            hair_style: HairStyle::Curly,
            portrait: None,
            outro: None,
        }
    }
}

/// Assertions for geometric invariants.
pub mod assertions {
    use bevy::math::Vec3;

    /// Assert two points are within `tolerance` of each other.
    pub fn assert_near(actual: Vec3, expected: Vec3, tolerance: f32) {
        let dist = actual.distance(expected);
        assert!(
            dist <= tolerance,
            "expected {expected:?}, got {actual:?} (distance {dist})"
        );
    }
}
