//! Static scene content: one descriptor per celestial body.
//!
//! Visual parameters are in scene units (the Sun sits at the origin and
//! planets orbit in the XZ plane). Quiz content is authored here and never
//! edited at runtime.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Identifier for every body the cadet can visit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BodyId {
    Sun,
    Mercury,
    Venus,
    Earth,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
}

impl BodyId {
    /// All bodies, ordered outward from the Sun.
    pub const ALL: [BodyId; 9] = [
        BodyId::Sun,
        BodyId::Mercury,
        BodyId::Venus,
        BodyId::Earth,
        BodyId::Mars,
        BodyId::Jupiter,
        BodyId::Saturn,
        BodyId::Uranus,
        BodyId::Neptune,
    ];

    /// Static descriptor for this body.
    pub fn data(self) -> &'static BodyData {
        &BODIES[self as usize]
    }

    /// Stable lowercase key, used in logs and texture seeds.
    pub fn key(self) -> &'static str {
        match self {
            BodyId::Sun => "sun",
            BodyId::Mercury => "mercury",
            BodyId::Venus => "venus",
            BodyId::Earth => "earth",
            BodyId::Mars => "mars",
            BodyId::Jupiter => "jupiter",
            BodyId::Saturn => "saturn",
            BodyId::Uranus => "uranus",
            BodyId::Neptune => "neptune",
        }
    }

    pub fn from_key(key: &str) -> Option<BodyId> {
        BodyId::ALL.into_iter().find(|id| id.key() == key)
    }

    pub fn is_star(self) -> bool {
        self == BodyId::Sun
    }
}

/// A single multiple-choice question.
#[derive(Clone, Copy, Debug)]
pub struct QuizQuestion {
    pub prompt: &'static str,
    pub options: &'static [&'static str],
    /// Index into `options` of the right answer.
    pub correct: usize,
}

/// How the procedural surface texture of a body is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureStyle {
    /// Flat fill with the body colour.
    Plain,
    /// Radial fiery gradient with plasma blobs.
    Plasma,
    /// Thick swirling yellow clouds.
    Clouds,
    /// Ocean, continents, deserts and polar caps.
    Continents,
    /// Rust surface with dark patches and ice caps.
    RustPatches,
    /// Wavy bands and a great storm spot.
    Bands,
    /// Smooth gold/cream gradient with faint bands.
    GoldGradient,
    /// Deep blue gradient, dark spot and wispy clouds.
    IceGiant,
}

/// Ring variants. Each one has its own texture palette and tilt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RingStyle {
    /// Bright golden rings with the Cassini division.
    Saturn,
    /// Pale thin rings, standing almost vertical.
    Uranus,
}

impl RingStyle {
    /// Rotation applied to a ring mesh built in the XY plane.
    pub fn tilt(self) -> Quat {
        match self {
            RingStyle::Saturn => Quat::from_rotation_x(std::f32::consts::PI / 2.2),
            RingStyle::Uranus => Quat::from_rotation_z(std::f32::consts::FRAC_PI_2),
        }
    }
}

/// Static data for a celestial body.
#[derive(Clone, Debug)]
pub struct BodyData {
    pub id: BodyId,
    pub name: &'static str,
    /// 0xRRGGBB.
    pub color: u32,
    /// Sphere radius in scene units.
    pub size: f32,
    /// Orbit radius in scene units (0 for the Sun).
    pub distance: f32,
    /// Orbital angular speed factor.
    pub speed: f32,
    pub texture: TextureStyle,
    pub ring: Option<RingStyle>,
    pub moons: u8,
    pub description: &'static str,
    pub video_text: &'static str,
    pub quiz_text: &'static str,
    pub youtube_id: &'static str,
    pub external_quiz_url: Option<&'static str>,
    pub quiz: &'static [QuizQuestion],
}

impl BodyData {
    /// Colour as sRGB bytes.
    pub fn rgb(&self) -> [u8; 3] {
        [
            ((self.color >> 16) & 0xFF) as u8,
            ((self.color >> 8) & 0xFF) as u8,
            (self.color & 0xFF) as u8,
        ]
    }

    pub fn bevy_color(&self) -> Color {
        let [r, g, b] = self.rgb();
        Color::srgb_u8(r, g, b)
    }

    pub fn video_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.youtube_id)
    }
}

/// Body table, indexed by `BodyId as usize`.
pub static BODIES: [BodyData; 9] = [
    BodyData {
        id: BodyId::Sun,
        name: "Sol",
        color: 0xFDB813,
        size: 4.5,
        distance: 0.0,
        speed: 0.002,
        texture: TextureStyle::Plasma,
        ring: None,
        moons: 0,
        description: "L'estrella que hi ha al centre del nostre sistema solar.",
        video_text: "El capità de la nau ens envia un missatge ardent!",
        quiz_text: "Demostra que coneixes l'estrella que ens dona llum.",
        youtube_id: "1YcXany7XDs",
        external_quiz_url: Some(
            "https://notebooklm.google.com/notebook/01e6f3bb-ee3b-4451-8573-9c90164ff25b?artifactId=31e995fd-18cd-4605-b743-d9e9b3b70289",
        ),
        quiz: &[
            QuizQuestion {
                prompt: "Què és el Sol?",
                options: &["Un planeta", "Una estrella", "Un satèl·lit"],
                correct: 1,
            },
            QuizQuestion {
                prompt: "Què ens dona el Sol?",
                options: &["Llum i calor", "Pluja", "Neu"],
                correct: 0,
            },
        ],
    },
    BodyData {
        id: BodyId::Mercury,
        name: "Mercuri",
        color: 0xA5A5A5,
        size: 0.8,
        distance: 8.0,
        speed: 0.04,
        texture: TextureStyle::Plain,
        ring: None,
        moons: 0,
        description: "El planeta més petit i el més proper al Sol.",
        video_text: "Una transmissió des del planeta més ràpid!",
        quiz_text: "Supera el repte del planeta petitó.",
        youtube_id: "Vqazv5WUFBs",
        external_quiz_url: Some(
            "https://notebooklm.google.com/notebook/d973e17c-92e3-4631-8c46-14389b064433?artifactId=7ed66502-d6cf-4e96-8c33-7c2bc126c09e",
        ),
        quiz: &[
            QuizQuestion {
                prompt: "Quin és el planeta més petit del sistema solar?",
                options: &["Júpiter", "Saturn", "Mercuri"],
                correct: 2,
            },
            QuizQuestion {
                prompt: "Mercuri és el planeta més... al Sol.",
                options: &["Proper", "Llunyà"],
                correct: 0,
            },
        ],
    },
    BodyData {
        id: BodyId::Venus,
        name: "Venus",
        color: 0xE3BB76,
        size: 1.1,
        distance: 12.0,
        speed: 0.015,
        texture: TextureStyle::Clouds,
        ring: None,
        moons: 0,
        description: "El planeta més calorós del sistema solar.",
        video_text: "Alerta de calor! Mira què amaguen els núvols de Venus.",
        quiz_text: "Respon sense cremar-te els dits.",
        youtube_id: "y7QpSLd3DCQ",
        external_quiz_url: Some(
            "https://notebooklm.google.com/notebook/c684f72d-eb49-4d65-b0a0-c4c7aef548ea?artifactId=166ea394-172d-41b8-ab14-987ee4af93f6",
        ),
        quiz: &[
            QuizQuestion {
                prompt: "Quin és el planeta més calent?",
                options: &["Mart", "Venus", "Neptú"],
                correct: 1,
            },
            QuizQuestion {
                prompt: "Com és el cel de Venus?",
                options: &["Ple de núvols espessos", "Sense aire", "De gel"],
                correct: 0,
            },
        ],
    },
    BodyData {
        id: BodyId::Earth,
        name: "la Terra",
        color: 0x22A6B3,
        size: 1.15,
        distance: 17.0,
        speed: 0.01,
        texture: TextureStyle::Continents,
        ring: None,
        moons: 1,
        description: "La nostra casa, el planeta blau.",
        video_text: "Un missatge des de casa: així és el nostre planeta!",
        quiz_text: "Quant saps del planeta on vius?",
        youtube_id: "ASWtl4HdIJQ",
        external_quiz_url: Some(
            "https://notebooklm.google.com/notebook/09800d3e-4afd-4134-be90-1fb41c163736?artifactId=f69eedf9-d1bf-4404-a0f6-3c39eaf08b33",
        ),
        quiz: &[
            QuizQuestion {
                prompt: "Quantes llunes té la Terra?",
                options: &["Cap", "Una", "Dues"],
                correct: 1,
            },
            QuizQuestion {
                prompt: "Per què la Terra es veu blava des de l'espai?",
                options: &["Per l'aigua dels oceans", "Perquè fa fred", "Per la pintura"],
                correct: 0,
            },
            QuizQuestion {
                prompt: "Com es diu el gir de la Terra sobre ella mateixa?",
                options: &["Translació", "Rotació", "Salt"],
                correct: 1,
            },
        ],
    },
    BodyData {
        id: BodyId::Mars,
        name: "Mart",
        color: 0xEB4D4B,
        size: 0.9,
        distance: 22.0,
        speed: 0.008,
        texture: TextureStyle::RustPatches,
        ring: None,
        moons: 2,
        description: "El planeta roig.",
        video_text: "Els robots exploradors de Mart t'envien imatges!",
        quiz_text: "Investiga el planeta roig.",
        youtube_id: "sezt04Hq5RA",
        external_quiz_url: Some(
            "https://notebooklm.google.com/notebook/64a58a7e-2781-43b9-9a64-fa504ea165f3?artifactId=f3fd3c22-7b97-435d-a0e6-7af1630641d2",
        ),
        quiz: &[
            QuizQuestion {
                prompt: "De quin color és Mart?",
                options: &["Blau", "Roig", "Verd"],
                correct: 1,
            },
            QuizQuestion {
                prompt: "Quantes llunes té Mart?",
                options: &["Una", "Dues", "Cap"],
                correct: 1,
            },
        ],
    },
    BodyData {
        id: BodyId::Jupiter,
        name: "Júpiter",
        color: 0xE1B12C,
        size: 3.5,
        distance: 32.0,
        speed: 0.02,
        texture: TextureStyle::Bands,
        ring: None,
        moons: 4,
        description: "El planeta més gran del sistema solar.",
        video_text: "Prepara't per a la tempesta més gran que has vist mai!",
        quiz_text: "Un repte gegant per a un planeta gegant.",
        youtube_id: "jFV4dB5AplU",
        external_quiz_url: Some(
            "https://notebooklm.google.com/notebook/ca3f78e2-9537-40d3-88c1-62d94b289049?artifactId=53e6f189-94cc-4aca-aa6a-45e9296ca1d3",
        ),
        quiz: &[
            QuizQuestion {
                prompt: "Quin és el planeta més gran?",
                options: &["La Terra", "Mercuri", "Júpiter"],
                correct: 2,
            },
            QuizQuestion {
                prompt: "Què és la Gran Taca Roja?",
                options: &["Una tempesta gegant", "Un volcà", "Un oceà"],
                correct: 0,
            },
        ],
    },
    BodyData {
        id: BodyId::Saturn,
        name: "Saturn",
        color: 0xF3D250,
        size: 3.0,
        distance: 42.0,
        speed: 0.018,
        texture: TextureStyle::GoldGradient,
        ring: Some(RingStyle::Saturn),
        moons: 5,
        description: "Famós pels seus anells espectaculars.",
        video_text: "Descobreix de què estan fets els anells més bonics.",
        quiz_text: "Dona una volta pels anells i respon.",
        youtube_id: "epZdZaEQhS0",
        external_quiz_url: Some(
            "https://notebooklm.google.com/notebook/9423026c-d637-4ee8-9ce2-8743ab6f8f63?artifactId=b94f4900-aaa0-4b8b-911d-db89961d82ce",
        ),
        quiz: &[
            QuizQuestion {
                prompt: "Per què és famós Saturn?",
                options: &["Pels seus anells", "Perquè és quadrat", "Pels seus volcans"],
                correct: 0,
            },
            QuizQuestion {
                prompt: "De què estan fets els anells de Saturn?",
                options: &["De fusta", "De gel i roca", "D'aigua calenta"],
                correct: 1,
            },
        ],
    },
    BodyData {
        id: BodyId::Uranus,
        name: "Urà",
        color: 0x74B9FF,
        size: 2.2,
        distance: 50.0,
        speed: 0.015,
        texture: TextureStyle::Plain,
        ring: Some(RingStyle::Uranus),
        moons: 3,
        description: "El gegant de gel que gira de costat.",
        video_text: "Un planeta que roda com una pilota! Mira-ho.",
        quiz_text: "No et maregis i respon les preguntes.",
        youtube_id: "6QvQ3Nq01aI",
        external_quiz_url: Some(
            "https://notebooklm.google.com/notebook/3ff940e7-c428-41ee-b499-cd291cd398e5?artifactId=8cb0256e-0522-4d7d-bdc6-109ce082db5e",
        ),
        quiz: &[
            QuizQuestion {
                prompt: "Què té d'especial Urà?",
                options: &["És el més calent", "Gira de costat", "No té atmosfera"],
                correct: 1,
            },
            QuizQuestion {
                prompt: "Urà és un gegant de...",
                options: &["Gel", "Foc", "Sorra"],
                correct: 0,
            },
        ],
    },
    BodyData {
        id: BodyId::Neptune,
        name: "Neptú",
        color: 0x0984E3,
        size: 2.1,
        distance: 58.0,
        speed: 0.012,
        texture: TextureStyle::IceGiant,
        ring: None,
        moons: 3,
        description: "El planeta amb més vent i el més llunyà.",
        video_text: "Agafa't fort: arriben els vents més forts del sistema solar!",
        quiz_text: "L'última parada abans de tornar a casa.",
        youtube_id: "NStn75gIhwg",
        external_quiz_url: None,
        quiz: &[
            QuizQuestion {
                prompt: "De quin color és Neptú?",
                options: &["Blau intens", "Verd", "Groc"],
                correct: 0,
            },
            QuizQuestion {
                prompt: "Neptú és el planeta...",
                options: &["Més proper al Sol", "Més petit", "Més llunyà i ventós"],
                correct: 2,
            },
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_order_matches_ids() {
        for id in BodyId::ALL {
            assert_eq!(id.data().id, id, "BODIES out of order at {:?}", id);
        }
    }

    #[test]
    fn test_keys_round_trip() {
        for id in BodyId::ALL {
            assert_eq!(BodyId::from_key(id.key()), Some(id));
        }
        assert_eq!(BodyId::from_key("pluto"), None);
    }

    #[test]
    fn test_quiz_content_is_well_formed() {
        for body in &BODIES {
            assert!(!body.quiz.is_empty(), "{} has no quiz", body.name);
            for q in body.quiz {
                assert!(q.options.len() >= 2, "{}: '{}' needs options", body.name, q.prompt);
                assert!(
                    q.correct < q.options.len(),
                    "{}: '{}' correct index out of range",
                    body.name,
                    q.prompt
                );
            }
        }
    }

    #[test]
    fn test_planets_ordered_outward() {
        for pair in BODIES.windows(2) {
            assert!(pair[0].distance < pair[1].distance);
        }
        assert_eq!(BodyId::Sun.data().distance, 0.0);
    }

    #[test]
    fn test_rgb_unpacking() {
        assert_eq!(BodyId::Mercury.data().rgb(), [0xA5, 0xA5, 0xA5]);
        assert_eq!(BodyId::Neptune.data().rgb(), [0x09, 0x84, 0xE3]);
    }
}
