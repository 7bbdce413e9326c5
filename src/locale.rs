//! User-facing strings.
//!
//! Body names, descriptions and quiz questions live in the content table and
//! are Catalan only; this module covers the screens around them.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocaleId {
    #[default]
    #[serde(rename = "ca")]
    Catalan,
    #[serde(rename = "en")]
    English,
}

impl LocaleId {
    pub fn strings(self) -> &'static Strings {
        match self {
            LocaleId::Catalan => &CATALAN,
            LocaleId::English => &ENGLISH,
        }
    }

    pub fn slides(self) -> &'static [Slide] {
        match self {
            LocaleId::Catalan => &CATALAN_SLIDES,
            LocaleId::English => &ENGLISH_SLIDES,
        }
    }
}

/// Replace `{name}` in a template.
pub fn with_name(template: &str, name: &str) -> String {
    template.replace("{name}", name)
}

/// Sound played when a slide is shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlideSound {
    Engine,
    Countdown,
}

/// Picture shown above a slide title.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlideIcon {
    Wave,
    Target,
    Orbit,
    Spin,
    Moon,
    Warning,
    Check,
    Timer,
}

/// One Academy slide. `body` may contain `{name}`.
#[derive(Clone, Copy, Debug)]
pub struct Slide {
    pub title: &'static str,
    pub body: &'static str,
    pub icon: SlideIcon,
    pub sound: Option<SlideSound>,
    pub countdown: bool,
}

pub struct Strings {
    pub app_title: &'static str,
    pub avatar_subtitle: &'static str,
    pub name_label: &'static str,
    pub name_hint: &'static str,
    pub gender_label: &'static str,
    pub height_label: &'static str,
    pub hair_color_label: &'static str,
    pub hair_style_label: &'static str,
    pub create_avatar: &'static str,
    pub generating: &'static str,
    pub avatar_placeholder: &'static str,
    pub name_required: &'static str,
    pub generation_failed: &'static str,
    pub lift_off: &'static str,
    pub skip_academy: &'static str,

    pub previous: &'static str,
    pub next: &'static str,
    pub launch: &'static str,
    pub go: &'static str,

    pub pilot: &'static str,
    pub exploring: &'static str,
    pub destinations: &'static str,
    pub return_home: &'static str,
    pub back_to_space: &'static str,
    pub video_heading: &'static str,
    pub watch_video: &'static str,
    pub quiz_heading: &'static str,
    pub open_external_quiz: &'static str,
    pub start_quiz: &'static str,
    pub close: &'static str,
    pub mission_report: &'static str,
    pub external_step: &'static str,
    pub external_question: &'static str,
    pub reopen_external: &'static str,
    pub question: &'static str,
    pub correct_banner: &'static str,
    pub mission_accomplished: &'static str,

    pub ending_title: &'static str,
    /// Contains `{name}`.
    pub ending_body: &'static str,
    pub result_heading: &'static str,
    pub correct_answers: &'static str,
    pub restart: &'static str,
    pub preparing_welcome: &'static str,
    pub welcome_to: &'static str,
}

pub static CATALAN: Strings = Strings {
    app_title: "Missió Espacial",
    avatar_subtitle: "Configura el teu astronauta",
    name_label: "Nom",
    name_hint: "El teu nom",
    gender_label: "Gènere",
    height_label: "Alçada",
    hair_color_label: "Color de cabell",
    hair_style_label: "Tipus de cabell",
    create_avatar: "Crear Avatar",
    generating: "Generant el teu avatar...",
    avatar_placeholder: "El teu avatar apareixerà aquí",
    name_required: "Si us plau, escriu un nom!",
    generation_failed: "Hi ha hagut un error connectant amb la IA. Verifica la teva clau API.",
    lift_off: "Enlairament a l'Espai!",
    skip_academy: "Saltar l'Acadèmia",

    previous: "Anterior",
    next: "Següent",
    launch: "Llançament!",
    go: "GO!",

    pilot: "Pilot",
    exploring: "Explorant...",
    destinations: "Destinacions",
    return_home: "Tornar a Casa",
    back_to_space: "Tornar a l'espai",
    video_heading: "Transmissió Entrant",
    watch_video: "Veure vídeo a YouTube",
    quiz_heading: "Repte de Cadet",
    open_external_quiz: "Obrir NotebookLM i Verificar",
    start_quiz: "Iniciar Test",
    close: "Tancar",
    mission_report: "Informe de Missió",
    external_step: "Pas 1: Missió Externa",
    external_question: "Ja has completat el test a la pestanya que s'ha obert?",
    reopen_external: "(Obrir de nou si s'ha tancat)",
    question: "Pregunta",
    correct_banner: "Correcte! Molt bé, cadet!",
    mission_accomplished: "Missió Complerta! Has guanyat la teva insígnia.",

    ending_title: "Missió Complerta!",
    ending_body: "L'astronauta {name} ha aterrat amb èxit i torna a casa amb moltes històries per explicar.",
    result_heading: "Resultat de la Missió",
    correct_answers: "Preguntes encertades",
    restart: "Començar nova aventura",
    preparing_welcome: "Preparant la rebuda al cole...",
    welcome_to: "Benvingut al",
};

pub static ENGLISH: Strings = Strings {
    app_title: "Space Mission",
    avatar_subtitle: "Set up your astronaut",
    name_label: "Name",
    name_hint: "Your name",
    gender_label: "Gender",
    height_label: "Height",
    hair_color_label: "Hair colour",
    hair_style_label: "Hair style",
    create_avatar: "Create Avatar",
    generating: "Generating your avatar...",
    avatar_placeholder: "Your avatar will appear here",
    name_required: "Please write a name!",
    generation_failed: "Could not reach the image service. Check your API key.",
    lift_off: "Lift off into space!",
    skip_academy: "Skip the Academy",

    previous: "Previous",
    next: "Next",
    launch: "Launch!",
    go: "GO!",

    pilot: "Pilot",
    exploring: "Exploring...",
    destinations: "Destinations",
    return_home: "Return Home",
    back_to_space: "Back to space",
    video_heading: "Incoming Transmission",
    watch_video: "Watch the video on YouTube",
    quiz_heading: "Cadet Challenge",
    open_external_quiz: "Open NotebookLM and Verify",
    start_quiz: "Start Test",
    close: "Close",
    mission_report: "Mission Report",
    external_step: "Step 1: External Mission",
    external_question: "Have you finished the test in the tab that just opened?",
    reopen_external: "(Open again if it was closed)",
    question: "Question",
    correct_banner: "Correct! Well done, cadet!",
    mission_accomplished: "Mission Complete! You earned your badge.",

    ending_title: "Mission Complete!",
    ending_body: "Astronaut {name} landed safely and comes home with lots of stories to tell.",
    result_heading: "Mission Result",
    correct_answers: "Correct answers",
    restart: "Start a new adventure",
    preparing_welcome: "Getting the school welcome ready...",
    welcome_to: "Welcome to",
};

pub static CATALAN_SLIDES: [Slide; 8] = [
    Slide {
        title: "Benvingut a bord",
        body: "Hola, Cadet {name}! Estàs a punt d'entrar a la nau \"Max Aub\". La nostra missió és la més important de la història de l'escola.",
        icon: SlideIcon::Wave,
        sound: None,
        countdown: false,
    },
    Slide {
        title: "Objectiu de la Missió",
        body: "Hem de viatjar per tot el Sistema Solar, des del Sol ardent fins al fred Neptú. La teva tasca és recollir dades i resoldre els enigmes de cada planeta.",
        icon: SlideIcon::Target,
        sound: None,
        countdown: false,
    },
    Slide {
        title: "El Gran Ball: La Translació",
        body: "El Sistema Solar està format pel Sol (el capità) i 8 planetes. Tots giren al voltant del Sol en un cercle gegant.\n\nAquest moviment es diu TRANSLACIÓ. És com una ballarina fent voltes pel teatre!",
        icon: SlideIcon::Orbit,
        sound: None,
        countdown: false,
    },
    Slide {
        title: "Gira que giraràs: Rotació",
        body: "Compte, no et maregis!\nEncara que no ho sembli, els planetes també giren sobre ells mateixos com una baldufa.\n\nAixò es diu ROTACIÓ. Gràcies a això tenim dia per jugar i nit per dormir.",
        icon: SlideIcon::Spin,
        sound: None,
        countdown: false,
    },
    Slide {
        title: "Els Satèl·lits (Planetes Xicotets)",
        body: "Alguns planetes tenen 'planetes xicotets' que els persegueixen: són els satèl·lits o llunes.\n\nAvís al pilot: Quan aparquis la nau, mira bé on aterres! No et confonguis de planeta i acabis a la Lluna!",
        icon: SlideIcon::Moon,
        sound: None,
        countdown: false,
    },
    Slide {
        title: "Normes de Seguretat",
        body: "Norma #1: No obrir la finestra (fa fred fora).\nNorma #2: No donar menjar als marcians.\nNorma #3: Divertir-se molt!",
        icon: SlideIcon::Warning,
        sound: None,
        countdown: false,
    },
    Slide {
        title: "Comprovació de Sistemes",
        body: "Motors... 100%\nOxigen... 100%\nEntrepans per l'esbarjo... 100%\nTot llest per l'enlairament!",
        icon: SlideIcon::Check,
        sound: Some(SlideSound::Engine),
        countdown: false,
    },
    Slide {
        title: "Compte Enrere",
        body: "Prepara't per al llançament en...",
        icon: SlideIcon::Timer,
        sound: Some(SlideSound::Countdown),
        countdown: true,
    },
];

pub static ENGLISH_SLIDES: [Slide; 8] = [
    Slide {
        title: "Welcome aboard",
        body: "Hello, Cadet {name}! You are about to board the ship \"Max Aub\". Our mission is the most important one in the history of the school.",
        icon: SlideIcon::Wave,
        sound: None,
        countdown: false,
    },
    Slide {
        title: "Mission Objective",
        body: "We must travel across the whole Solar System, from the blazing Sun to cold Neptune. Your task is to collect data and solve the puzzles of every planet.",
        icon: SlideIcon::Target,
        sound: None,
        countdown: false,
    },
    Slide {
        title: "The Great Dance: Revolution",
        body: "The Solar System is made of the Sun (the captain) and 8 planets. They all travel around the Sun in a giant circle.\n\nThis movement is called REVOLUTION. It is like a ballerina twirling around the stage!",
        icon: SlideIcon::Orbit,
        sound: None,
        countdown: false,
    },
    Slide {
        title: "Round and Round: Rotation",
        body: "Careful, don't get dizzy!\nEven if it doesn't look like it, planets also spin on themselves like a spinning top.\n\nThis is called ROTATION. Thanks to it we have day to play and night to sleep.",
        icon: SlideIcon::Spin,
        sound: None,
        countdown: false,
    },
    Slide {
        title: "Satellites (Little Planets)",
        body: "Some planets have 'little planets' chasing them: they are satellites, or moons.\n\nPilot notice: when you park the ship, look carefully where you land! Don't mix up planets and end up on the Moon!",
        icon: SlideIcon::Moon,
        sound: None,
        countdown: false,
    },
    Slide {
        title: "Safety Rules",
        body: "Rule #1: Do not open the window (it is cold outside).\nRule #2: Do not feed the martians.\nRule #3: Have lots of fun!",
        icon: SlideIcon::Warning,
        sound: None,
        countdown: false,
    },
    Slide {
        title: "Systems Check",
        body: "Engines... 100%\nOxygen... 100%\nBreak-time sandwiches... 100%\nReady for lift off!",
        icon: SlideIcon::Check,
        sound: Some(SlideSound::Engine),
        countdown: false,
    },
    Slide {
        title: "Countdown",
        body: "Get ready for launch in...",
        icon: SlideIcon::Timer,
        sound: Some(SlideSound::Countdown),
        countdown: true,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slide_tables_line_up() {
        for locale in [LocaleId::Catalan, LocaleId::English] {
            let slides = locale.slides();
            assert_eq!(slides.len(), 8);
            assert!(slides[0].body.contains("{name}"));
            // Only the last slide counts down.
            assert!(slides.last().is_some_and(|s| s.countdown));
            assert_eq!(slides.iter().filter(|s| s.countdown).count(), 1);
        }
        for (ca, en) in CATALAN_SLIDES.iter().zip(ENGLISH_SLIDES.iter()) {
            assert_eq!(ca.icon, en.icon);
            assert_eq!(ca.sound, en.sound);
        }
    }

    #[test]
    fn test_with_name() {
        assert_eq!(
            with_name(CATALAN.ending_body, "Nil"),
            "L'astronauta Nil ha aterrat amb èxit i torna a casa amb moltes històries per explicar."
        );
    }

    #[test]
    fn test_locale_keys() {
        #[derive(Deserialize)]
        struct Wrapper {
            locale: LocaleId,
        }
        let parsed: Wrapper = toml::from_str("locale = \"en\"").unwrap();
        assert_eq!(parsed.locale, LocaleId::English);
    }
}
