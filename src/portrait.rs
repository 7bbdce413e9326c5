//! Avatar profile and generated portraits.
//!
//! Portraits come from a Gemini-compatible `generateContent` endpoint. The
//! blocking HTTP call runs on a worker thread; results flow back through a
//! channel and are matched against the ticket of the request still pending
//! for that kind of portrait. Anything else is stale and dropped.

use std::collections::HashMap;
use std::time::Duration;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use bevy::prelude::*;
use crossbeam_channel::{Receiver, Sender, unbounded};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{AppConfig, PortraitConfig};
use crate::locale::LocaleId;

/// Environment variable consulted when the configured one is unset.
pub const FALLBACK_API_KEY_ENV: &str = "API_KEY";

/// Errors from portrait generation.
#[derive(Debug, Error)]
pub enum PortraitError {
    #[error("no API key in environment variable {0}")]
    MissingApiKey(String),

    #[error("portrait service returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("portrait request failed: {0}")]
    Transport(String),

    #[error("failed to read portrait response: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed portrait response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("portrait response contained no image")]
    EmptyResponse,

    #[error("portrait image could not be decoded: {0}")]
    Decode(String),
}

impl From<ureq::Error> for PortraitError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(status, response) => PortraitError::Status {
                status,
                body: response.into_string().unwrap_or_default(),
            },
            ureq::Error::Transport(transport) => PortraitError::Transport(transport.to_string()),
        }
    }
}

// ============================================================================
// Avatar attributes
// ============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Boy,
    #[default]
    Girl,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Girl, Gender::Boy];

    pub fn label(self, locale: LocaleId) -> &'static str {
        match (self, locale) {
            (Gender::Boy, LocaleId::Catalan) => "Nen",
            (Gender::Girl, LocaleId::Catalan) => "Nena",
            (Gender::Boy, LocaleId::English) => "Boy",
            (Gender::Girl, LocaleId::English) => "Girl",
        }
    }

    fn prompt_word(self) -> &'static str {
        match self {
            Gender::Boy => "boy",
            Gender::Girl => "girl",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Height {
    Tall,
    #[default]
    Medium,
    Short,
}

impl Height {
    pub const ALL: [Height; 3] = [Height::Tall, Height::Medium, Height::Short];

    pub fn label(self, locale: LocaleId) -> &'static str {
        match (self, locale) {
            (Height::Tall, LocaleId::Catalan) => "Alta",
            (Height::Medium, LocaleId::Catalan) => "Mitjana",
            (Height::Short, LocaleId::Catalan) => "Baixa",
            (Height::Tall, LocaleId::English) => "Tall",
            (Height::Medium, LocaleId::English) => "Medium",
            (Height::Short, LocaleId::English) => "Short",
        }
    }

    fn prompt_word(self) -> &'static str {
        match self {
            Height::Tall => "tall",
            Height::Medium => "medium height",
            Height::Short => "short",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HairColor {
    Blonde,
    #[default]
    Brown,
    Black,
    Red,
    BlueFantasy,
    PinkFantasy,
}

impl HairColor {
    pub const ALL: [HairColor; 6] = [
        HairColor::Blonde,
        HairColor::Brown,
        HairColor::Black,
        HairColor::Red,
        HairColor::BlueFantasy,
        HairColor::PinkFantasy,
    ];

    pub fn label(self, locale: LocaleId) -> &'static str {
        match (self, locale) {
            (HairColor::Blonde, LocaleId::Catalan) => "Ros",
            (HairColor::Brown, LocaleId::Catalan) => "Castany",
            (HairColor::Black, LocaleId::Catalan) => "Negre",
            (HairColor::Red, LocaleId::Catalan) => "Pèl-roig",
            (HairColor::BlueFantasy, LocaleId::Catalan) => "Blau",
            (HairColor::PinkFantasy, LocaleId::Catalan) => "Rosa",
            (HairColor::Blonde, LocaleId::English) => "Blonde",
            (HairColor::Brown, LocaleId::English) => "Brown",
            (HairColor::Black, LocaleId::English) => "Black",
            (HairColor::Red, LocaleId::English) => "Red",
            (HairColor::BlueFantasy, LocaleId::English) => "Blue",
            (HairColor::PinkFantasy, LocaleId::English) => "Pink",
        }
    }

    fn prompt_word(self) -> &'static str {
        match self {
            HairColor::Blonde => "blonde",
            HairColor::Brown => "brown",
            HairColor::Black => "black",
            HairColor::Red => "red",
            HairColor::BlueFantasy => "blue fantasy",
            HairColor::PinkFantasy => "pink fantasy",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HairStyle {
    #[default]
    Straight,
    Curly,
    Wavy,
    Short,
    Pigtails,
}

impl HairStyle {
    pub const ALL: [HairStyle; 5] = [
        HairStyle::Straight,
        HairStyle::Curly,
        HairStyle::Wavy,
        HairStyle::Short,
        HairStyle::Pigtails,
    ];

    pub fn label(self, locale: LocaleId) -> &'static str {
        match (self, locale) {
            (HairStyle::Straight, LocaleId::Catalan) => "Llis",
            (HairStyle::Curly, LocaleId::Catalan) => "Arrissat",
            (HairStyle::Wavy, LocaleId::Catalan) => "Ondulat",
            (HairStyle::Short, LocaleId::Catalan) => "Curt",
            (HairStyle::Pigtails, LocaleId::Catalan) => "Cues",
            (HairStyle::Straight, LocaleId::English) => "Straight",
            (HairStyle::Curly, LocaleId::English) => "Curly",
            (HairStyle::Wavy, LocaleId::English) => "Wavy",
            (HairStyle::Short, LocaleId::English) => "Short",
            (HairStyle::Pigtails, LocaleId::English) => "Pigtails",
        }
    }

    fn prompt_word(self) -> &'static str {
        match self {
            HairStyle::Straight => "straight",
            HairStyle::Curly => "curly",
            HairStyle::Wavy => "wavy",
            HairStyle::Short => "short",
            HairStyle::Pigtails => "pigtails",
        }
    }
}

/// A generated picture, kept as base64 so it serializes with the profile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Portrait {
    pub png_base64: String,
}

impl Portrait {
    /// Wrap base64 image data, rejecting anything that is not a known image format.
    pub fn from_base64(data: &str) -> Result<Self, PortraitError> {
        let bytes = STANDARD
            .decode(data.trim())
            .map_err(|e| PortraitError::Decode(e.to_string()))?;
        image::guess_format(&bytes).map_err(|e| PortraitError::Decode(e.to_string()))?;
        Ok(Self {
            png_base64: data.trim().to_string(),
        })
    }

    pub fn bytes(&self) -> Result<Vec<u8>, PortraitError> {
        STANDARD
            .decode(&self.png_base64)
            .map_err(|e| PortraitError::Decode(e.to_string()))
    }

    /// Decode to `(width, height, rgba8)`.
    pub fn to_rgba(&self) -> Result<(u32, u32, Vec<u8>), PortraitError> {
        let bytes = self.bytes()?;
        let rgba = image::load_from_memory(&bytes)
            .map_err(|e| PortraitError::Decode(e.to_string()))?
            .to_rgba8();
        Ok((rgba.width(), rgba.height(), rgba.into_raw()))
    }
}

/// The cadet's avatar: form attributes plus any pictures generated for it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvatarProfile {
    pub name: String,
    pub gender: Gender,
    pub height: Height,
    pub hair_color: HairColor,
    pub hair_style: HairStyle,
    #[serde(default)]
    pub portrait: Option<Portrait>,
    #[serde(default)]
    pub outro: Option<Portrait>,
}

/// Prompt for the astronaut portrait shown during the journey.
pub fn avatar_prompt(profile: &AvatarProfile) -> String {
    format!(
        "A cute Studio Ghibli style illustration of a 9 year old {height} {gender} astronaut named {name}. \
         The child has {color} hair that is {style}. \
         They are wearing a white astronaut suit but NO helmet. Their head is visible. \
         Happy, adventurous expression. Clean white or simple pastel background. High quality anime style art.",
        height = profile.height.prompt_word(),
        gender = profile.gender.prompt_word(),
        name = profile.name.trim(),
        color = profile.hair_color.prompt_word(),
        style = profile.hair_style.prompt_word(),
    )
}

/// Prompt for the farewell picture at the school gate.
pub fn outro_prompt(profile: &AvatarProfile, school_name: &str) -> String {
    format!(
        "A cute Studio Ghibli style illustration of a 9 year old {gender} astronaut named {name} \
         (same character: {color}, {style} hair, astronaut suit without helmet). \
         The child is standing in front of a school gate. There is a sign on the gate that says \"{school}\". \
         The child is surrounded by other happy diverse children in normal clothes. \
         The astronaut child is waving goodbye. Warm, sunset lighting, nostalgic but happy atmosphere.",
        gender = profile.gender.prompt_word(),
        name = profile.name.trim(),
        color = profile.hair_color.prompt_word(),
        style = profile.hair_style.prompt_word(),
        school = school_name.to_uppercase(),
    )
}

// ============================================================================
// Wire format
// ============================================================================

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<&'static str>,
}

impl<'a> GenerateRequest<'a> {
    fn new(prompt: &'a str) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["IMAGE"],
            },
        }
    }
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    inline_data: Option<InlineData>,
}

#[derive(Deserialize)]
struct InlineData {
    data: String,
}

/// Extract the first inline image of the first candidate.
pub fn parse_response(body: &str) -> Result<Portrait, PortraitError> {
    let response: GenerateResponse = serde_json::from_str(body)?;
    let data = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.inline_data)
                .map(|inline| inline.data)
                .find(|data| !data.is_empty())
        })
        .ok_or(PortraitError::EmptyResponse)?;
    Portrait::from_base64(&data)
}

/// Blocking client for the image-generation endpoint.
#[derive(Clone, Debug)]
pub struct PortraitClient {
    endpoint: String,
    model: String,
    api_key: String,
    timeout: Duration,
}

impl PortraitClient {
    /// Build a client, reading the API key from the environment.
    pub fn from_config(config: &PortraitConfig) -> Result<Self, PortraitError> {
        let api_key = [config.api_key_env.as_str(), FALLBACK_API_KEY_ENV]
            .into_iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|key| !key.trim().is_empty())
            .ok_or_else(|| PortraitError::MissingApiKey(config.api_key_env.clone()))?;

        Ok(Self {
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key,
            timeout: Duration::from_secs(config.timeout_secs),
        })
    }

    pub fn url(&self) -> String {
        format!(
            "{}/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }

    pub fn generate(&self, prompt: &str) -> Result<Portrait, PortraitError> {
        let agent = ureq::AgentBuilder::new().timeout(self.timeout).build();
        let response = agent
            .post(&self.url())
            .set("x-goog-api-key", &self.api_key)
            .send_json(GenerateRequest::new(prompt))?;
        let body = response.into_string()?;
        parse_response(&body)
    }
}

// ============================================================================
// Background requests
// ============================================================================

/// Which picture a request produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PortraitKind {
    Avatar,
    Outro,
}

/// A finished request as reported by its worker thread.
#[derive(Debug)]
pub struct PortraitOutcome {
    pub ticket: u64,
    pub kind: PortraitKind,
    pub result: Result<Portrait, PortraitError>,
}

/// Ticketed channel between worker threads and the main schedule.
#[derive(Resource)]
pub struct PortraitRequests {
    sender: Sender<PortraitOutcome>,
    receiver: Receiver<PortraitOutcome>,
    next_ticket: u64,
    pending: HashMap<PortraitKind, u64>,
}

impl Default for PortraitRequests {
    fn default() -> Self {
        let (sender, receiver) = unbounded();
        Self {
            sender,
            receiver,
            next_ticket: 0,
            pending: HashMap::new(),
        }
    }
}

impl PortraitRequests {
    /// Run `job` on a worker thread. Supersedes any pending request of `kind`.
    pub fn submit<F>(&mut self, kind: PortraitKind, job: F) -> u64
    where
        F: FnOnce() -> Result<Portrait, PortraitError> + Send + 'static,
    {
        self.next_ticket += 1;
        let ticket = self.next_ticket;
        self.pending.insert(kind, ticket);

        let sender = self.sender.clone();
        std::thread::spawn(move || {
            let result = job();
            // The receiver only goes away with the app.
            let _ = sender.send(PortraitOutcome {
                ticket,
                kind,
                result,
            });
        });
        ticket
    }

    pub fn is_pending(&self, kind: PortraitKind) -> bool {
        self.pending.contains_key(&kind)
    }

    /// Forget the pending request of `kind`; its result will be dropped.
    pub fn cancel(&mut self, kind: PortraitKind) {
        self.pending.remove(&kind);
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    /// Collect finished requests that are still wanted.
    pub fn drain(&mut self) -> Vec<PortraitOutcome> {
        let mut current = Vec::new();
        for outcome in self.receiver.try_iter() {
            if self.pending.get(&outcome.kind) == Some(&outcome.ticket) {
                self.pending.remove(&outcome.kind);
                current.push(outcome);
            } else {
                debug!(
                    "Dropping stale {:?} portrait (ticket {})",
                    outcome.kind, outcome.ticket
                );
            }
        }
        current
    }
}

/// UI-facing state of one kind of portrait.
#[derive(Debug, Clone, Default)]
pub struct PortraitState {
    pub loading: bool,
    /// Detail of the last failure; the UI shows a fixed message.
    pub error: Option<String>,
    pub image: Option<Portrait>,
    /// Bumped whenever `image` changes so cached textures can be refreshed.
    pub revision: u32,
}

impl PortraitState {
    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Apply a finished request. On failure the previous image is kept.
    pub fn apply(&mut self, result: Result<Portrait, PortraitError>) {
        self.loading = false;
        match result {
            Ok(portrait) => {
                self.image = Some(portrait);
                self.error = None;
                self.revision = self.revision.wrapping_add(1);
            }
            Err(err) => {
                warn!("Portrait generation failed: {err}");
                self.error = Some(err.to_string());
            }
        }
    }

    pub fn set_image(&mut self, image: Option<Portrait>) {
        self.image = image;
        self.revision = self.revision.wrapping_add(1);
    }
}

/// Avatar and outro portrait states.
#[derive(Resource, Debug, Default)]
pub struct Portraits {
    pub avatar: PortraitState,
    pub outro: PortraitState,
}

impl Portraits {
    pub fn get(&self, kind: PortraitKind) -> &PortraitState {
        match kind {
            PortraitKind::Avatar => &self.avatar,
            PortraitKind::Outro => &self.outro,
        }
    }

    pub fn get_mut(&mut self, kind: PortraitKind) -> &mut PortraitState {
        match kind {
            PortraitKind::Avatar => &mut self.avatar,
            PortraitKind::Outro => &mut self.outro,
        }
    }

    /// Start generating a `kind` portrait from `prompt`.
    pub fn request(
        &mut self,
        requests: &mut PortraitRequests,
        kind: PortraitKind,
        config: &PortraitConfig,
        prompt: String,
    ) {
        let state = self.get_mut(kind);
        state.begin();
        match PortraitClient::from_config(config) {
            Ok(client) => {
                let ticket = requests.submit(kind, move || client.generate(&prompt));
                info!("Requested {kind:?} portrait (ticket {ticket})");
            }
            Err(err) => state.apply(Err(err)),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Plugin wiring portrait requests into the frame loop.
pub struct PortraitPlugin;

impl Plugin for PortraitPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AppConfig>()
            .init_resource::<PortraitRequests>()
            .init_resource::<Portraits>()
            .add_systems(Update, receive_portraits);
    }
}

fn receive_portraits(mut requests: ResMut<PortraitRequests>, mut portraits: ResMut<Portraits>) {
    for outcome in requests.drain() {
        if outcome.result.is_ok() {
            info!("{:?} portrait ready", outcome.kind);
        }
        portraits.get_mut(outcome.kind).apply(outcome.result);
    }
}
