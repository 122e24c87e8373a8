//! User-facing error messages in the languages the game ships with.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lang {
    Fr,
    En,
    Es,
}

impl Default for Lang {
    fn default() -> Self {
        Lang::Fr
    }
}

impl Lang {
    /// Unknown codes fall back to the default language.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Lang::En,
            "es" => Lang::Es,
            _ => Lang::Fr,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKey {
    MethodNotAllowed,
    ParamsMissing,
    InvalidScore,
    InvalidName,
    InvalidDifficulty,
    InvalidTime,
    NameTaken,
    ServerError,
    NotFound,
    StructureInvalid,
}

pub fn message(lang: Lang, key: MessageKey) -> &'static str {
    use MessageKey::*;

    match lang {
        Lang::Fr => match key {
            MethodNotAllowed => "Méthode non autorisée",
            ParamsMissing => "Données manquantes",
            InvalidScore => "Score invalide",
            InvalidName => "Pseudo invalide (2 à 20 caractères : lettres, chiffres, espaces, - et _)",
            InvalidDifficulty => "Niveau de difficulté inconnu",
            InvalidTime => "Temps invalide",
            NameTaken => "Pseudo déjà pris",
            ServerError => "Erreur serveur",
            NotFound => "Ressource introuvable",
            StructureInvalid => "Structure de données invalide",
        },
        Lang::En => match key {
            MethodNotAllowed => "Method not allowed",
            ParamsMissing => "Missing data",
            InvalidScore => "Invalid score",
            InvalidName => "Invalid name (2 to 20 characters: letters, digits, spaces, - and _)",
            InvalidDifficulty => "Unknown difficulty level",
            InvalidTime => "Invalid time",
            NameTaken => "Name already taken",
            ServerError => "Server error",
            NotFound => "Not found",
            StructureInvalid => "Invalid data structure",
        },
        Lang::Es => match key {
            MethodNotAllowed => "Método no permitido",
            ParamsMissing => "Faltan datos",
            InvalidScore => "Puntuación no válida",
            InvalidName => "Nombre no válido (de 2 a 20 caracteres: letras, cifras, espacios, - y _)",
            InvalidDifficulty => "Nivel de dificultad desconocido",
            InvalidTime => "Tiempo no válido",
            NameTaken => "Nombre ya en uso",
            ServerError => "Error del servidor",
            NotFound => "Recurso no encontrado",
            StructureInvalid => "Estructura de datos no válida",
        },
    }
}
