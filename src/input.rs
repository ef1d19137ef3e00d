//! Normalization of raw operator input into typed values.
//!
//! Consoles and forms accept loose spellings: menu numbers, aliases such
//! as `medic`, mixed case, and zones written as `Zone 3` or just `3`.
//! Everything here runs before the engine sees a value; the engine only
//! works with the typed enumerations.

use crate::error::DispatchError;
use crate::model::{IncidentType, Priority, ResourceType, Zone};
use std::collections::BTreeSet;
use std::str::FromStr;

/// Lowercases and folds spaces and hyphens into underscores.
fn normalize(raw: &str) -> String {
    raw.trim()
        .to_ascii_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect()
}

impl FromStr for IncidentType {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "1" | "fire" => Ok(IncidentType::Fire),
            "2" | "accident" | "collision" => Ok(IncidentType::Accident),
            "3" | "crime" => Ok(IncidentType::Crime),
            "4" | "medical" => Ok(IncidentType::Medical),
            _ => Err(DispatchError::InvalidInput(format!("unknown incident type: {s:?}"))),
        }
    }
}

impl FromStr for Priority {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "1" | "high" | "h" => Ok(Priority::High),
            "2" | "medium" | "med" | "m" => Ok(Priority::Medium),
            "3" | "low" | "l" => Ok(Priority::Low),
            _ => Err(DispatchError::InvalidPriority(s.to_string())),
        }
    }
}

impl FromStr for ResourceType {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "1" | "ambulance" | "medic" | "ems" => Ok(ResourceType::Ambulance),
            "2" | "fire_engine" | "fireengine" | "fire_truck" | "engine" => {
                Ok(ResourceType::FireEngine)
            }
            "3" | "police_car" | "policecar" | "police" => Ok(ResourceType::PoliceCar),
            _ => Err(DispatchError::InvalidInput(format!("unknown resource type: {s:?}"))),
        }
    }
}

impl FromStr for Zone {
    type Err = DispatchError;

    /// Accepts `Zone 3`, `zone3`, `z3` and `3`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // No hyphen folding here: "Zone -1" must not read as zone 1.
        let lowered = s.trim().to_ascii_lowercase();
        let digits = lowered
            .strip_prefix("zone")
            .or_else(|| lowered.strip_prefix('z'))
            .unwrap_or(&lowered)
            .trim_start_matches(|c: char| c == ' ' || c == '_');
        let invalid = || DispatchError::InvalidInput(format!("invalid zone: {s:?}"));
        // Plain digits only: u32 parsing would also take a leading '+'.
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        digits.parse::<u32>().map(Zone).map_err(|_| invalid())
    }
}

/// Parses a comma-separated list of resource types, e.g. `"ambulance, police"`.
///
/// Duplicates collapse. An empty list is rejected, since an incident must
/// require at least one type.
pub fn parse_required_types(raw: &str) -> Result<BTreeSet<ResourceType>, DispatchError> {
    let required = raw
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(ResourceType::from_str)
        .collect::<Result<BTreeSet<_>, _>>()?;

    if required.is_empty() {
        return Err(DispatchError::InvalidInput(
            "at least one resource type is required".into(),
        ));
    }
    Ok(required)
}
