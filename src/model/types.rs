//! Enumerations, identifiers and zones shared by incidents and resources.

use std::fmt;

/// Kind of emergency reported by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum IncidentType {
    Fire,
    Accident,
    Crime,
    Medical,
}

impl IncidentType {
    /// All incident types in menu order.
    pub const ALL: [IncidentType; 4] = [
        IncidentType::Fire,
        IncidentType::Accident,
        IncidentType::Crime,
        IncidentType::Medical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IncidentType::Fire => "fire",
            IncidentType::Accident => "accident",
            IncidentType::Crime => "crime",
            IncidentType::Medical => "medical",
        }
    }
}

impl fmt::Display for IncidentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity tier of an incident.
///
/// Variants are declared from lowest to highest so that the derived
/// `Ord` ranks `High > Medium > Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// All tiers, highest first.
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of deployable unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ResourceType {
    Ambulance,
    FireEngine,
    PoliceCar,
}

impl ResourceType {
    /// All resource types in menu order.
    pub const ALL: [ResourceType; 3] = [
        ResourceType::Ambulance,
        ResourceType::FireEngine,
        ResourceType::PoliceCar,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Ambulance => "ambulance",
            ResourceType::FireEngine => "fire_engine",
            ResourceType::PoliceCar => "police_car",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether an incident's requirements are currently covered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum IncidentStatus {
    Unassigned,
    Assigned,
}

/// Whether a resource is free to be dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ResourceStatus {
    Available,
    Assigned,
}

/// Identifier of a registered incident. Displays as `INC-0001`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IncidentId(pub u64);

impl fmt::Display for IncidentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "INC-{:04}", self.0)
    }
}

/// Identifier of a registered resource. Displays as `RES-0001`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceId(pub u64);

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RES-{:04}", self.0)
    }
}

/// Abstract location identifier. Only used for proximity comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Zone(pub u32);

impl Zone {
    /// Raw zone number.
    pub fn number(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Zone {}", self.0)
    }
}
