use std::collections::HashMap;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared_models::access::{AccessScope, SedeScoped};
use shared_models::timefmt;

/// Weekday keys of the availability map, as stored in the `availability`
/// jsonb column.
pub const DAYS: [&str; 7] = [
    "Lunes",
    "Martes",
    "Miércoles",
    "Jueves",
    "Viernes",
    "Sábado",
    "Domingo",
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeInterval {
    #[serde(with = "timefmt")]
    pub start: NaiveTime,
    #[serde(with = "timefmt")]
    pub end: NaiveTime,
}

/// One weekday of the availability map. The inner keys are camelCase in
/// the stored jsonb blob; that casing is the contract.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DayAvailability {
    pub is_open: bool,
    pub intervals: Vec<TimeInterval>,
}

pub type AvailabilityMap = HashMap<String, DayAvailability>;

/// A physical clinic location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sede {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub whatsapp: String,
    pub availability: Option<AvailabilityMap>,
    pub company_id: String,
}

impl SedeScoped for Sede {
    fn visible_to(&self, scope: &AccessScope) -> bool {
        scope.can_access_sede(self.id)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSedeRequest {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub whatsapp: String,
    pub availability: Option<AvailabilityMap>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSedeRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub whatsapp: Option<String>,
    pub availability: Option<AvailabilityMap>,
}

#[derive(Debug, thiserror::Error)]
pub enum SedeError {
    #[error("Sede not found")]
    NotFound,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap_or_default()
}

fn open(intervals: Vec<(u32, u32, u32, u32)>) -> DayAvailability {
    DayAvailability {
        is_open: true,
        intervals: intervals
            .into_iter()
            .map(|(sh, sm, eh, em)| TimeInterval {
                start: hm(sh, sm),
                end: hm(eh, em),
            })
            .collect(),
    }
}

/// The schedule a sede starts with: split shift on weekdays, mornings on
/// Saturday, closed on Sunday.
pub fn default_availability() -> AvailabilityMap {
    let mut map = AvailabilityMap::new();
    for day in ["Lunes", "Martes", "Miércoles", "Jueves", "Viernes"] {
        map.insert(day.to_string(), open(vec![(9, 0, 13, 0), (14, 0, 18, 0)]));
    }
    map.insert("Sábado".to_string(), open(vec![(9, 0, 13, 0)]));
    map.insert(
        "Domingo".to_string(),
        DayAvailability {
            is_open: false,
            intervals: vec![],
        },
    );
    map
}
