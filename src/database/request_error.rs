use log::{error, info, warn};
use rocket::{
    http::Status,
    request::Request,
    response::{self, Responder},
    serde::json::{json, Json},
};

use crate::i18n::{self, Lang, MessageKey};

#[derive(thiserror::Error, Debug)]
pub enum RequestError {
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error("missing name or score")]
    ParamsMissing,
    #[error("invalid score: {value}")]
    InvalidScore { value: String },
    #[error("invalid name: {name:?}")]
    InvalidName { name: String },
    #[error("unknown difficulty: {difficulty}")]
    InvalidDifficulty { difficulty: String },
    #[error("invalid time: {value}")]
    InvalidTime { value: String },
    #[error("the name {name:?} belongs to another member")]
    NameTaken { name: String },
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl RequestError {
    pub fn status(&self) -> Status {
        match self {
            Self::MethodNotAllowed => Status::MethodNotAllowed,
            Self::ParamsMissing
            | Self::InvalidScore { .. }
            | Self::InvalidName { .. }
            | Self::InvalidDifficulty { .. }
            | Self::InvalidTime { .. } => Status::BadRequest,
            Self::NameTaken { .. } => Status::Conflict,
            Self::Database(_) => Status::InternalServerError,
        }
    }

    pub fn message_key(&self) -> MessageKey {
        match self {
            Self::MethodNotAllowed => MessageKey::MethodNotAllowed,
            Self::ParamsMissing => MessageKey::ParamsMissing,
            Self::InvalidScore { .. } => MessageKey::InvalidScore,
            Self::InvalidName { .. } => MessageKey::InvalidName,
            Self::InvalidDifficulty { .. } => MessageKey::InvalidDifficulty,
            Self::InvalidTime { .. } => MessageKey::InvalidTime,
            Self::NameTaken { .. } => MessageKey::NameTaken,
            Self::Database(_) => MessageKey::ServerError,
        }
    }
}

/// Language selected by the `lang` query parameter of the request.
pub fn request_lang(request: &Request<'_>) -> Lang {
    request
        .query_value::<&str>("lang")
        .and_then(|value| value.ok())
        .map(Lang::from_code)
        .unwrap_or_default()
}

impl<'r> Responder<'r, 'static> for RequestError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        let status = self.status();
        match &self {
            Self::Database(_) => error!("{} {}: {}", request.method(), request.uri(), self),
            Self::NameTaken { .. } => warn!("{} {}: {}", request.method(), request.uri(), self),
            _ => info!("{} {}: {}", request.method(), request.uri(), self),
        }

        let message = i18n::message(request_lang(request), self.message_key());
        (status, Json(json!({ "error": message }))).respond_to(request)
    }
}

pub type RequestResult<T, E = RequestError> = std::result::Result<T, E>;
