//! AI librarian: prompt construction and fallback handling around an
//! external generative model.
//!
//! # Invariants
//! - Every public method returns a usable value; model errors are logged and
//!   replaced by static fallbacks.
//! - An empty ledger is answered without calling the model.

use crate::model::book::Book;
use crate::model::document::embedded_data_url;
use crate::model::epiphany::Epiphany;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Reply used when the model answers with empty text.
pub const SILENT_ARCHIVE_REPLY: &str =
    "The archives remain silent on this matter for now. Perhaps rephrase your inquiry?";
/// Reply used when the model call fails.
pub const FLICKERING_LIGHT_REPLY: &str =
    "The light in the archive flickers. Please try asking again in a moment.";
/// Reply used when synthesis is requested over an empty ledger.
pub const BLANK_LEDGER_REPLY: &str =
    "The Ledger is currently blank. Seal an epiphany before seeking collective wisdom.";
/// Reply used when synthesis fails.
pub const SYNTHESIS_FAILED_REPLY: &str =
    "The voices of the council blur together. Please seek collective wisdom again in a moment.";

const RECOMMEND_TEMPERATURE: f32 = 0.7;
const RECOMMEND_TOP_P: f32 = 0.95;

/// Failure reported by a [`GenerativeModel`] adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// No credentials or backend configured.
    Unavailable(String),
    /// Network or HTTP-level failure.
    Transport(String),
    /// The backend answered with an unexpected payload.
    InvalidResponse(String),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(message) => write!(f, "model unavailable: {message}"),
            Self::Transport(message) => write!(f, "model transport error: {message}"),
            Self::InvalidResponse(message) => write!(f, "invalid model response: {message}"),
        }
    }
}

impl Error for ModelError {}

/// Text completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRequest {
    pub prompt: String,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
}

impl TextRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            temperature: None,
            top_p: None,
        }
    }
}

/// Inline image returned by an image-capable model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub mime_type: String,
    /// Base64-encoded image bytes.
    pub data: String,
}

/// External generative-AI backend.
pub trait GenerativeModel {
    /// Returns the completion text; an empty string means "no answer".
    fn generate_text(&self, request: &TextRequest) -> Result<String, ModelError>;

    /// Returns the first inline image of the response, if any.
    fn generate_image(&self, prompt: &str) -> Result<Option<GeneratedImage>, ModelError>;
}

impl<M: GenerativeModel + ?Sized> GenerativeModel for &M {
    fn generate_text(&self, request: &TextRequest) -> Result<String, ModelError> {
        (**self).generate_text(request)
    }

    fn generate_image(&self, prompt: &str) -> Result<Option<GeneratedImage>, ModelError> {
        (**self).generate_image(prompt)
    }
}

/// Model stand-in used when no backend is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineModel;

impl GenerativeModel for OfflineModel {
    fn generate_text(&self, _request: &TextRequest) -> Result<String, ModelError> {
        Err(ModelError::Unavailable("no generative backend configured".to_string()))
    }

    fn generate_image(&self, _prompt: &str) -> Result<Option<GeneratedImage>, ModelError> {
        Err(ModelError::Unavailable("no generative backend configured".to_string()))
    }
}

pub struct Librarian<M: GenerativeModel> {
    model: M,
}

impl<M: GenerativeModel> Librarian<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    /// Suggests books from `catalog` for a seeker's inquiry.
    pub fn recommend(&self, query: &str, catalog: &[Book]) -> String {
        let request = TextRequest {
            prompt: recommendation_prompt(query, catalog),
            temperature: Some(RECOMMEND_TEMPERATURE),
            top_p: Some(RECOMMEND_TOP_P),
        };

        match self.model.generate_text(&request) {
            Ok(text) if text.trim().is_empty() => {
                info!("event=librarian_recommend module=service status=empty");
                SILENT_ARCHIVE_REPLY.to_string()
            }
            Ok(text) => {
                info!(
                    "event=librarian_recommend module=service status=ok catalog_size={} reply_chars={}",
                    catalog.len(),
                    text.chars().count()
                );
                text
            }
            Err(err) => {
                warn!("event=librarian_recommend module=service status=fallback error={err}");
                FLICKERING_LIGHT_REPLY.to_string()
            }
        }
    }

    /// Weaves ledger entries into one collective observation.
    pub fn synthesize(&self, entries: &[Epiphany]) -> String {
        if entries.is_empty() {
            return BLANK_LEDGER_REPLY.to_string();
        }

        match self
            .model
            .generate_text(&TextRequest::new(synthesis_prompt(entries)))
        {
            Ok(text) if !text.trim().is_empty() => {
                info!(
                    "event=ledger_synthesize module=service status=ok entries={}",
                    entries.len()
                );
                text
            }
            Ok(_) => {
                warn!("event=ledger_synthesize module=service status=fallback error=empty_reply");
                SYNTHESIS_FAILED_REPLY.to_string()
            }
            Err(err) => {
                warn!("event=ledger_synthesize module=service status=fallback error={err}");
                SYNTHESIS_FAILED_REPLY.to_string()
            }
        }
    }

    /// Generates a cover as a `data:` URL, or returns an empty string.
    pub fn generate_cover(&self, title: &str, discipline: &str) -> String {
        match self.model.generate_image(&cover_prompt(title, discipline)) {
            Ok(Some(image)) => embedded_data_url(&image.mime_type, &image.data),
            Ok(None) => {
                warn!("event=cover_generate module=service status=empty");
                String::new()
            }
            Err(err) => {
                warn!("event=cover_generate module=service status=fallback error={err}");
                String::new()
            }
        }
    }
}

fn recommendation_prompt(query: &str, catalog: &[Book]) -> String {
    let inventory = catalog
        .iter()
        .map(|book| {
            format!(
                "- {} by {} ({}): {}",
                book.title, book.author, book.discipline, book.description
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are the AI Librarian of the Athenaeum Arcanum archives. A seeker is looking for knowledge.\n\n\
         User Query: \"{query}\"\n\n\
         Current Archive Inventory:\n{inventory}\n\n\
         Respond in a solemn, wise, and helpful tone. Suggest specific books from the list that might help them on their journey. \
         If no books match perfectly, guide them toward the disciplines that might be relevant. Keep it concise but profound."
    )
}

fn synthesis_prompt(entries: &[Epiphany]) -> String {
    let voices = entries
        .iter()
        .map(|entry| {
            format!(
                "- {} (resonance {}): \"{}\"",
                entry.seeker, entry.resonance, entry.content
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are the Sage of the Council of Seekers. The community has sealed these epiphanies in the ledger:\n\n\
         {voices}\n\n\
         Weave their collective wisdom into a single profound observation of no more than three sentences. \
         Give more weight to entries with higher resonance. Do not quote names."
    )
}

fn cover_prompt(title: &str, discipline: &str) -> String {
    format!(
        "A professional, aesthetic, and minimalist book cover illustration for a text titled \"{title}\" in the discipline of \"{discipline}\". \
         Classical, scholarly style, high contrast, textured parchment, muted gold and midnight tones. \
         No text on the cover, purely symbolic and atmospheric."
    )
}
