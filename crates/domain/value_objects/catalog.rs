use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{
    insurance_options::InsuranceOptionEntity, promo_codes::PromoCodeEntity,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InsuranceOptionDto {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub coverage_amount: i64,
    pub premium_amount: i64,
    pub coverage_days: i32,
}

impl From<InsuranceOptionEntity> for InsuranceOptionDto {
    fn from(value: InsuranceOptionEntity) -> Self {
        Self {
            id: value.id,
            name: value.name,
            description: value.description,
            coverage_amount: value.coverage_amount,
            premium_amount: value.premium_amount,
            coverage_days: value.coverage_days,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PromoCodeDto {
    pub code: String,
    pub discount: f64,
    pub insurance_option_id: Uuid,
    pub coverage_days: i32,
}

impl From<PromoCodeEntity> for PromoCodeDto {
    fn from(value: PromoCodeEntity) -> Self {
        Self {
            code: value.code,
            discount: value.discount,
            insurance_option_id: value.insurance_option_id,
            coverage_days: value.coverage_days,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct ProductLine {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

pub const PRODUCT_LINES: [ProductLine; 5] = [
    ProductLine {
        id: "recorrido",
        title: "Acgura tu Recorrido",
        description: "Protección para tus recorridos diarios",
    },
    ProductLine {
        id: "entrenamiento",
        title: "Acgura tu Entrenamiento",
        description: "Seguridad en tus sesiones de entrenamiento",
    },
    ProductLine {
        id: "rodada",
        title: "Acgura tu Rodada",
        description: "Cobertura para tus rodadas grupales",
    },
    ProductLine {
        id: "jornal",
        title: "Acgura tu Jornal",
        description: "Protección para tu jornada laboral",
    },
    ProductLine {
        id: "evento",
        title: "Acgura tu Evento",
        description: "Cobertura para eventos especiales",
    },
];

/// Promo codes are stored upper-case; user input is matched case-insensitively.
pub fn normalize_promo_code(raw: &str) -> String {
    raw.trim().to_uppercase()
}
