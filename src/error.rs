// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use thiserror::Error;

/// Failure reported by a bills store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Erreur {status}")]
    Status { status: u16, body: String },

    #[error("Erreur réseau : {0}")]
    Network(#[from] reqwest::Error),

    #[error("Erreur de décodage : {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{0}")]
    Message(String),
}

impl StoreError {
    pub fn not_found() -> Self {
        StoreError::Status {
            status: 404,
            body: String::new(),
        }
    }

    pub fn server_error() -> Self {
        StoreError::Status {
            status: 500,
            body: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid date '{raw}'")]
pub struct FormatError {
    pub raw: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown route '{0}'")]
pub struct RouteNotFound(pub String);

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no user stored in session")]
    Missing,

    #[error("invalid user descriptor: {0}")]
    Invalid(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportErrorKind {
    NotFound,
    ServerError,
    Unknown,
}

impl TransportErrorKind {
    pub fn code(self) -> &'static str {
        match self {
            TransportErrorKind::NotFound => "404",
            TransportErrorKind::ServerError => "500",
            TransportErrorKind::Unknown => "unknown",
        }
    }
}

/// A store failure after classification, ready to be shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub status: Option<u16>,
    pub message: String,
}

impl TransportError {
    /// Classifies by message content: "404" wins over "500".
    pub fn classify(message: &str) -> Self {
        let kind = if message.contains("404") {
            TransportErrorKind::NotFound
        } else if message.contains("500") {
            TransportErrorKind::ServerError
        } else {
            TransportErrorKind::Unknown
        };
        TransportError {
            kind,
            status: None,
            message: message.to_string(),
        }
    }

    pub fn from_status(status: u16, message: &str) -> Self {
        let kind = match status {
            404 => TransportErrorKind::NotFound,
            500..=599 => TransportErrorKind::ServerError,
            _ => TransportErrorKind::Unknown,
        };
        TransportError {
            kind,
            status: Some(status),
            message: message.to_string(),
        }
    }

    pub fn unknown(message: &str) -> Self {
        TransportError {
            kind: TransportErrorKind::Unknown,
            status: None,
            message: message.to_string(),
        }
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn user_message(&self) -> String {
        match self.kind {
            TransportErrorKind::NotFound => {
                "Erreur 404 : la ressource demandée est introuvable".to_string()
            }
            TransportErrorKind::ServerError => format!(
                "Erreur {} : erreur interne du serveur",
                self.status.unwrap_or(500)
            ),
            TransportErrorKind::Unknown if self.message.starts_with("Erreur") => {
                self.message.clone()
            }
            TransportErrorKind::Unknown => format!("Erreur : {}", self.message),
        }
    }
}

/// Status codes decide for HTTP rejections. Only free-form messages are
/// searched for a code, since transport and decode errors may quote a URL.
impl From<&StoreError> for TransportError {
    fn from(e: &StoreError) -> Self {
        match e {
            StoreError::Status { status, .. } => {
                TransportError::from_status(*status, &e.to_string())
            }
            StoreError::Network(_) | StoreError::Decode(_) => {
                TransportError::unknown(&e.to_string())
            }
            StoreError::Message(msg) => TransportError::classify(msg),
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.user_message())
    }
}

impl std::error::Error for TransportError {}
