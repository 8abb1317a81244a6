use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    #[default]
    Cedula,
    Pasaporte,
    #[serde(alias = "cedulaExtranjeria")]
    CedulaExtranjeria,
}

impl Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let document_type = match self {
            DocumentType::Cedula => "cedula",
            DocumentType::Pasaporte => "pasaporte",
            DocumentType::CedulaExtranjeria => "cedula_extranjeria",
        };
        write!(f, "{}", document_type)
    }
}

impl DocumentType {
    pub fn from_str(value: &str) -> Self {
        match value {
            "pasaporte" => DocumentType::Pasaporte,
            "cedula_extranjeria" | "cedulaExtranjeria" => DocumentType::CedulaExtranjeria,
            _ => DocumentType::Cedula,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_legacy_camel_case_spelling() {
        let parsed: DocumentType = serde_json::from_str("\"cedulaExtranjeria\"").unwrap();
        assert_eq!(parsed, DocumentType::CedulaExtranjeria);
        assert_eq!(parsed.to_string(), "cedula_extranjeria");
    }

    #[test]
    fn display_and_from_str_agree() {
        for document_type in [
            DocumentType::Cedula,
            DocumentType::Pasaporte,
            DocumentType::CedulaExtranjeria,
        ] {
            assert_eq!(DocumentType::from_str(&document_type.to_string()), document_type);
        }
    }
}
