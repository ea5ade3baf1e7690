//! Domain records for equipment, parts orders and maintenance history.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Error;

/// Kind of equipment an asset is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EquipmentType {
    Pump,
    Compressor,
    Valve,
    Motor,
    #[serde(rename = "Heat Exchanger")]
    HeatExchanger,
    Tank,
    Conveyor,
    Generator,
    Fan,
    Boiler,
}

impl EquipmentType {
    /// All equipment types, in keyword-recognition order.
    pub const ALL: [EquipmentType; 10] = [
        EquipmentType::Pump,
        EquipmentType::Compressor,
        EquipmentType::Valve,
        EquipmentType::Motor,
        EquipmentType::HeatExchanger,
        EquipmentType::Tank,
        EquipmentType::Conveyor,
        EquipmentType::Generator,
        EquipmentType::Fan,
        EquipmentType::Boiler,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentType::Pump => "Pump",
            EquipmentType::Compressor => "Compressor",
            EquipmentType::Valve => "Valve",
            EquipmentType::Motor => "Motor",
            EquipmentType::HeatExchanger => "Heat Exchanger",
            EquipmentType::Tank => "Tank",
            EquipmentType::Conveyor => "Conveyor",
            EquipmentType::Generator => "Generator",
            EquipmentType::Fan => "Fan",
            EquipmentType::Boiler => "Boiler",
        }
    }
}

impl fmt::Display for EquipmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Operational status of an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AssetStatus {
    #[serde(rename = "In Use")]
    InUse,
    #[serde(rename = "Not In Use")]
    NotInUse,
    #[serde(rename = "Out of Service")]
    OutOfService,
    #[serde(rename = "Under Maintenance")]
    UnderMaintenance,
    Standby,
    Unknown,
}

impl AssetStatus {
    pub const ALL: [AssetStatus; 6] = [
        AssetStatus::InUse,
        AssetStatus::NotInUse,
        AssetStatus::OutOfService,
        AssetStatus::UnderMaintenance,
        AssetStatus::Standby,
        AssetStatus::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetStatus::InUse => "In Use",
            AssetStatus::NotInUse => "Not In Use",
            AssetStatus::OutOfService => "Out of Service",
            AssetStatus::UnderMaintenance => "Under Maintenance",
            AssetStatus::Standby => "Standby",
            AssetStatus::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for AssetStatus {
    type Err = Error;

    /// Accepts display names ("Out of Service") and kebab-case ("out-of-service").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', '_'], " ");
        AssetStatus::ALL
            .into_iter()
            .find(|status| status.as_str().to_lowercase() == normalized)
            .ok_or_else(|| Error::InvalidInput(format!("unknown asset status '{}'", s)))
    }
}

/// How much an outage of this asset hurts production.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Criticality {
    Low,
    Medium,
    High,
    Critical,
}

impl Criticality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Criticality::Low => "Low",
            Criticality::Medium => "Medium",
            Criticality::High => "High",
            Criticality::Critical => "Critical",
        }
    }
}

impl fmt::Display for Criticality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Where an asset is installed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetLocation {
    /// Plant or site name (e.g., "Plant A").
    pub facility: String,
    /// Area within the facility (e.g., "Pump House 2").
    pub area: String,
}

/// A line on an asset's bill of materials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WearComponent {
    pub part_number: String,
    pub description: String,
    pub quantity: u32,
    /// Flagged for scheduled replacement.
    pub is_wear_part: bool,
    /// Replacement interval in days, for wear parts.
    pub replacement_interval_days: Option<u32>,
}

/// An industrial equipment record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    pub name: String,
    pub serial_number: String,
    pub brand: String,
    pub model_code: String,
    pub equipment_type: EquipmentType,
    pub status: AssetStatus,
    pub criticality: Criticality,
    pub location: AssetLocation,
    pub install_date: NaiveDate,
    pub last_maintenance: Option<NaiveDate>,
    pub next_maintenance: Option<NaiveDate>,
    /// Bill of materials.
    #[serde(default)]
    pub bom: Vec<WearComponent>,
}

impl Asset {
    /// High and Critical assets count as critical.
    pub fn is_critical(&self) -> bool {
        self.criticality >= Criticality::High
    }

    pub fn install_year(&self) -> i32 {
        self.install_date.year()
    }

    /// Next maintenance falls on or before `today + window_days`.
    pub fn is_maintenance_due(&self, today: NaiveDate, window_days: i64) -> bool {
        match self.next_maintenance {
            Some(next) => (next - today).num_days() <= window_days,
            None => false,
        }
    }

    /// BOM lines flagged for scheduled replacement.
    pub fn wear_components(&self) -> impl Iterator<Item = &WearComponent> {
        self.bom.iter().filter(|c| c.is_wear_part)
    }

    /// Text fields searched by the residual term, in a fixed order.
    pub fn search_fields(&self) -> [&str; 6] {
        [
            self.name.as_str(),
            self.serial_number.as_str(),
            self.brand.as_str(),
            self.model_code.as_str(),
            self.location.facility.as_str(),
            self.location.area.as_str(),
        ]
    }
}

/// Lifecycle of a parts order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Ordered,
    Shipped,
    Delivered,
    Cancelled,
}

/// A parts order raised against an asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartsOrder {
    pub id: String,
    pub asset_id: String,
    pub part_number: String,
    pub quantity: u32,
    pub status: OrderStatus,
    pub ordered_on: NaiveDate,
}

/// Summary of a completed maintenance job, as stored in history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceRecord {
    /// Unique identifier (UUIDv7 for time-ordering).
    pub id: Uuid,
    pub asset_id: String,
    pub asset_name: String,
    pub technician: String,
    pub completed_at: DateTime<Utc>,
    #[serde(default)]
    pub notes: String,
    /// Part numbers consumed during the job.
    #[serde(default)]
    pub parts_used: Vec<String>,
    /// Number of checklist items signed off.
    pub checklist_items: usize,
}
