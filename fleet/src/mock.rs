//! Built-in asset and parts-order data.
//!
//! The records are built on first access and shared for the life of the
//! process. Dates are anchored around [`reference_date`] so that filters such
//! as "maintenance due" give stable answers in tests.

use std::sync::OnceLock;

use chrono::NaiveDate;

use crate::schema::{
    Asset, AssetLocation, AssetStatus, Criticality, EquipmentType, OrderStatus, PartsOrder,
    WearComponent,
};

static ASSETS: OnceLock<Vec<Asset>> = OnceLock::new();
static ORDERS: OnceLock<Vec<PartsOrder>> = OnceLock::new();

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap_or_default()
}

/// The "today" the mock data was written against.
pub fn reference_date() -> NaiveDate {
    d(2024, 6, 1)
}

/// All mock assets.
pub fn assets() -> &'static [Asset] {
    ASSETS.get_or_init(build_assets)
}

/// All mock parts orders.
pub fn orders() -> &'static [PartsOrder] {
    ORDERS.get_or_init(build_orders)
}

/// Look up a mock asset by id.
pub fn find_asset(id: &str) -> Option<&'static Asset> {
    assets().iter().find(|a| a.id == id)
}

struct Row {
    id: &'static str,
    name: &'static str,
    serial: &'static str,
    brand: &'static str,
    model: &'static str,
    kind: EquipmentType,
    status: AssetStatus,
    criticality: Criticality,
    facility: &'static str,
    area: &'static str,
    installed: NaiveDate,
    last: Option<NaiveDate>,
    next: Option<NaiveDate>,
}

impl Row {
    fn into_asset(self, bom: Vec<WearComponent>) -> Asset {
        Asset {
            id: self.id.to_string(),
            name: self.name.to_string(),
            serial_number: self.serial.to_string(),
            brand: self.brand.to_string(),
            model_code: self.model.to_string(),
            equipment_type: self.kind,
            status: self.status,
            criticality: self.criticality,
            location: AssetLocation {
                facility: self.facility.to_string(),
                area: self.area.to_string(),
            },
            install_date: self.installed,
            last_maintenance: self.last,
            next_maintenance: self.next,
            bom,
        }
    }
}

fn part(
    part_number: &str,
    description: &str,
    quantity: u32,
    interval: Option<u32>,
) -> WearComponent {
    WearComponent {
        part_number: part_number.to_string(),
        description: description.to_string(),
        quantity,
        is_wear_part: interval.is_some(),
        replacement_interval_days: interval,
    }
}

fn build_assets() -> Vec<Asset> {
    use AssetStatus::*;
    use Criticality::*;
    use EquipmentType::*;

    vec![
        Row {
            id: "AST-001",
            name: "Main Feed Pump",
            serial: "SN-PMP-1001",
            brand: "Grundfos",
            model: "CR-64-2",
            kind: Pump,
            status: InUse,
            criticality: Critical,
            facility: "Plant A",
            area: "Pump House 1",
            installed: d(2018, 3, 15),
            last: Some(d(2024, 3, 1)),
            next: Some(d(2024, 6, 10)),
        }
        .into_asset(vec![
            part("GF-SEAL-64", "Mechanical seal", 2, Some(365)),
            part("GF-BRG-64", "Motor bearing", 2, Some(730)),
            part("GF-IMP-64", "Impeller stack", 1, None),
        ]),
        Row {
            id: "AST-002",
            name: "Cooling Water Pump",
            serial: "SN-PMP-1002",
            brand: "KSB",
            model: "Etanorm 80",
            kind: Pump,
            status: Standby,
            criticality: High,
            facility: "Plant A",
            area: "Cooling Tower",
            installed: d(2019, 7, 22),
            last: Some(d(2024, 1, 15)),
            next: Some(d(2024, 7, 15)),
        }
        .into_asset(vec![part("KSB-PACK-80", "Gland packing", 1, Some(180))]),
        Row {
            id: "AST-003",
            name: "Transfer Pump 3",
            serial: "SN-PMP-2003",
            brand: "Flowserve",
            model: "Durco Mark 3",
            kind: Pump,
            status: OutOfService,
            criticality: Medium,
            facility: "Plant B",
            area: "Tank Farm",
            installed: d(2015, 11, 2),
            last: Some(d(2023, 11, 20)),
            next: Some(d(2024, 5, 20)),
        }
        .into_asset(vec![part("FS-IMPELLER-3", "Impeller", 1, None)]),
        Row {
            id: "AST-004",
            name: "Air Compressor 1",
            serial: "SN-CMP-3001",
            brand: "Atlas Copco",
            model: "GA 75",
            kind: Compressor,
            status: InUse,
            criticality: Critical,
            facility: "Plant A",
            area: "Utility Room",
            installed: d(2020, 1, 10),
            last: Some(d(2024, 4, 2)),
            next: Some(d(2024, 6, 25)),
        }
        .into_asset(vec![
            part("AC-FILTER-75", "Air intake filter", 1, Some(90)),
            part("AC-OIL-75", "Oil separator", 1, Some(365)),
        ]),
        Row {
            id: "AST-005",
            name: "Backup Compressor",
            serial: "SN-CMP-3002",
            brand: "Ingersoll Rand",
            model: "R55n",
            kind: Compressor,
            status: NotInUse,
            criticality: Low,
            facility: "Plant B",
            area: "Utility Room",
            installed: d(2012, 5, 30),
            last: Some(d(2023, 6, 30)),
            next: Some(d(2024, 12, 30)),
        }
        .into_asset(Vec::new()),
        Row {
            id: "AST-006",
            name: "Steam Control Valve",
            serial: "SN-VLV-4001",
            brand: "Fisher",
            model: "ED 667",
            kind: Valve,
            status: UnderMaintenance,
            criticality: High,
            facility: "Plant C",
            area: "Boiler House",
            installed: d(2019, 9, 9),
            last: Some(d(2024, 5, 25)),
            next: Some(d(2024, 8, 25)),
        }
        .into_asset(vec![part("FI-TRIM-667", "Valve trim set", 1, Some(540))]),
        Row {
            id: "AST-007",
            name: "Isolation Valve 12",
            serial: "SN-VLV-4012",
            brand: "Emerson",
            model: "Keystone F9",
            kind: Valve,
            status: Unknown,
            criticality: Low,
            facility: "Plant C",
            area: "Pipe Rack",
            installed: d(2016, 2, 14),
            last: None,
            next: None,
        }
        .into_asset(Vec::new()),
        Row {
            id: "AST-008",
            name: "Conveyor Drive Motor",
            serial: "SN-MTR-5001",
            brand: "Siemens",
            model: "1LE1003",
            kind: Motor,
            status: InUse,
            criticality: Medium,
            facility: "Plant B",
            area: "Packaging Line",
            installed: d(2021, 6, 1),
            last: Some(d(2024, 2, 10)),
            next: Some(d(2024, 8, 10)),
        }
        .into_asset(vec![part("SI-BEARING-6309", "Drive end bearing", 1, Some(720))]),
        Row {
            id: "AST-009",
            name: "Plate Heat Exchanger",
            serial: "SN-HEX-6001",
            brand: "Alfa Laval",
            model: "M10-BW",
            kind: HeatExchanger,
            status: InUse,
            criticality: High,
            facility: "Plant A",
            area: "Process Hall",
            installed: d(2017, 8, 19),
            last: Some(d(2023, 12, 1)),
            next: Some(d(2024, 6, 1)),
        }
        .into_asset(vec![
            part("AL-PLATE-10", "Heat transfer plate", 10, None),
            part("AL-GASKET-10", "Plate gasket", 10, Some(1095)),
        ]),
        Row {
            id: "AST-010",
            name: "Packaging Conveyor",
            serial: "SN-CNV-7001",
            brand: "Interroll",
            model: "RM 8320",
            kind: Conveyor,
            status: Standby,
            criticality: Medium,
            facility: "Plant B",
            area: "Packaging Line",
            installed: d(2022, 3, 3),
            last: Some(d(2024, 3, 3)),
            next: Some(d(2024, 9, 3)),
        }
        .into_asset(vec![part("IR-BELT-8320", "Conveyor belt", 1, Some(365))]),
        Row {
            id: "AST-011",
            name: "Emergency Generator",
            serial: "SN-GEN-8001",
            brand: "Caterpillar",
            model: "C15",
            kind: Generator,
            status: NotInUse,
            criticality: Critical,
            facility: "Plant C",
            area: "Generator Building",
            installed: d(2014, 10, 10),
            last: Some(d(2024, 4, 10)),
            next: Some(d(2024, 10, 10)),
        }
        .into_asset(vec![part("CAT-FUEL-C15", "Fuel filter", 2, Some(180))]),
        Row {
            id: "AST-012",
            name: "Steam Boiler 2",
            serial: "SN-BLR-9002",
            brand: "Cleaver-Brooks",
            model: "CBEX Elite",
            kind: Boiler,
            status: OutOfService,
            criticality: Critical,
            facility: "Plant C",
            area: "Boiler House",
            installed: d(2019, 4, 4),
            last: Some(d(2023, 10, 4)),
            next: Some(d(2024, 4, 4)),
        }
        .into_asset(vec![part("CB-GASKET-15", "Manway gasket", 1, Some(365))]),
    ]
}

fn build_orders() -> Vec<PartsOrder> {
    let order = |id: &str, asset_id: &str, part_number: &str, quantity: u32, status, ordered_on| {
        PartsOrder {
            id: id.to_string(),
            asset_id: asset_id.to_string(),
            part_number: part_number.to_string(),
            quantity,
            status,
            ordered_on,
        }
    };

    vec![
        order("ORD-1001", "AST-001", "GF-SEAL-64", 2, OrderStatus::Delivered, d(2024, 4, 20)),
        order("ORD-1002", "AST-004", "AC-FILTER-75", 4, OrderStatus::Shipped, d(2024, 5, 18)),
        order("ORD-1003", "AST-012", "CB-GASKET-15", 1, OrderStatus::Ordered, d(2024, 5, 28)),
        order("ORD-1004", "AST-003", "FS-IMPELLER-3", 1, OrderStatus::Pending, d(2024, 1, 5)),
        order("ORD-1005", "AST-009", "AL-PLATE-10", 10, OrderStatus::Delivered, d(2023, 11, 15)),
        order("ORD-1006", "AST-006", "FI-TRIM-667", 1, OrderStatus::Delivered, d(2024, 5, 22)),
        order("ORD-1007", "AST-008", "SI-BEARING-6309", 1, OrderStatus::Cancelled, d(2024, 5, 1)),
    ]
}
