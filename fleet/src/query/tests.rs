//! Tests for the search parser.

use std::collections::BTreeSet;

use super::*;
use crate::schema::{AssetStatus, EquipmentType};

#[test]
fn test_empty_query() {
    let q = parse_search("");
    assert!(q.filters.is_empty());
    assert!(!q.has_natural_language);
    assert_eq!(q.cleaned_term, "");
    assert_eq!(q.original_term, "");
}

#[test]
fn test_plain_text_is_residual() {
    let q = parse_search("  Grundfos   CR-64 ");
    assert!(q.filters.is_empty());
    assert!(!q.has_natural_language);
    assert_eq!(q.cleaned_term, "Grundfos CR-64");
    assert_eq!(q.original_term, "  Grundfos   CR-64 ");
}

#[test]
fn test_pumps_in_plant_a() {
    let q = parse_search("pumps in Plant A");
    assert_eq!(q.filters.equipment_type, Some(EquipmentType::Pump));
    assert!(q.filters.location.as_deref().unwrap().contains("plant a"));
    assert_eq!(q.cleaned_term, "");
    assert!(q.has_natural_language);
}

#[test]
fn test_equipment_singular_and_multiword() {
    assert_eq!(
        parse_search("valve").filters.equipment_type,
        Some(EquipmentType::Valve)
    );
    assert_eq!(
        parse_search("Heat  Exchangers").filters.equipment_type,
        Some(EquipmentType::HeatExchanger)
    );
    // Only whole words count
    assert_eq!(parse_search("pumphouse").filters.equipment_type, None);
}

#[test]
fn test_location_requires_place_keyword() {
    let q = parse_search("in the basement");
    assert_eq!(q.filters.location, None);
    assert_eq!(q.cleaned_term, "in the basement");

    let q = parse_search("motors at Building 4");
    assert_eq!(q.filters.location.as_deref(), Some("building 4"));
    assert_eq!(q.filters.equipment_type, Some(EquipmentType::Motor));
}

#[test]
fn test_maintenance_due() {
    assert!(parse_search("maintenance due").filters.maintenance_due);
    assert!(parse_search("compressors needing maintenance").filters.maintenance_due);
    assert!(parse_search("OVERDUE").filters.maintenance_due);
    assert!(!parse_search("maintenance").filters.maintenance_due);
}

#[test]
fn test_critical() {
    let q = parse_search("critical pumps");
    assert!(q.filters.critical);
    assert_eq!(q.cleaned_term, "");

    assert!(parse_search("high-priority valves").filters.critical);
    assert!(parse_search("high priority").filters.critical);
}

#[test]
fn test_install_year() {
    let q = parse_search("pumps installed in 2019");
    assert_eq!(q.filters.install_year, Some(2019));
    assert_eq!(q.cleaned_term, "");

    let q = parse_search("from 1998 Siemens");
    assert_eq!(q.filters.install_year, Some(1998));
    assert_eq!(q.cleaned_term, "Siemens");

    // Serial fragments are not years
    assert_eq!(parse_search("SN-PMP-1001").filters.install_year, None);
    assert_eq!(parse_search("12019").filters.install_year, None);
}

#[test]
fn test_single_status() {
    assert_eq!(
        parse_search("offline compressors").filters.status,
        Some(AssetStatus::OutOfService)
    );
    assert_eq!(
        parse_search("not in use").filters.status,
        Some(AssetStatus::NotInUse)
    );
    assert_eq!(
        parse_search("running").filters.status,
        Some(AssetStatus::InUse)
    );
    assert_eq!(
        parse_search("stand by").filters.status,
        Some(AssetStatus::Standby)
    );
}

#[test]
fn test_single_status_stops_at_first_match() {
    // Both phrases present; priority order picks Out of Service and leaves the other
    let q = parse_search("running offline");
    assert_eq!(q.filters.status, Some(AssetStatus::OutOfService));
    assert_eq!(q.filters.status_or, None);
    assert_eq!(q.cleaned_term, "running");
}

#[test]
fn test_status_or_set() {
    let q = parse_search("not in use or unknown");
    let expected: BTreeSet<_> = [AssetStatus::NotInUse, AssetStatus::Unknown].into();
    assert_eq!(q.filters.status_or, Some(expected.clone()));
    assert_eq!(q.filters.status, None);
    assert_eq!(q.cleaned_term, "");

    // Order-independent
    let q = parse_search("unknown or not in use");
    assert_eq!(q.filters.status_or, Some(expected));
}

#[test]
fn test_status_or_overlapping_synonyms() {
    let q = parse_search("running or offline or standby");
    let expected: BTreeSet<_> = [
        AssetStatus::InUse,
        AssetStatus::OutOfService,
        AssetStatus::Standby,
    ]
    .into();
    assert_eq!(q.filters.status_or, Some(expected));
    assert_eq!(q.cleaned_term, "");
}

#[test]
fn test_status_or_keeps_unrelated_text() {
    let q = parse_search("Grundfos running or offline");
    assert_eq!(q.cleaned_term, "Grundfos");
    assert_eq!(q.filters.status_or.as_ref().map(|s| s.len()), Some(2));
}

#[test]
fn test_or_without_status_is_plain_text() {
    let q = parse_search("KSB or Fisher");
    assert!(q.filters.is_empty());
    assert_eq!(q.cleaned_term, "KSB or Fisher");
}

#[test]
fn test_or_branch_excludes_single_status() {
    // "or" is present, so the single-status branch never runs
    let q = parse_search("offline or");
    assert_eq!(q.filters.status, None);
    assert_eq!(
        q.filters.status_or,
        Some([AssetStatus::OutOfService].into())
    );
}

#[test]
fn test_combined_query() {
    let q = parse_search("critical pumps in Plant A maintenance due installed 2018 running Grundfos");
    assert_eq!(q.filters.equipment_type, Some(EquipmentType::Pump));
    assert_eq!(q.filters.location.as_deref(), Some("plant a"));
    assert!(q.filters.maintenance_due);
    assert!(q.filters.critical);
    assert_eq!(q.filters.install_year, Some(2018));
    assert_eq!(q.filters.status, Some(AssetStatus::InUse));
    assert_eq!(q.cleaned_term, "Grundfos");
}

#[test]
fn test_parse_is_deterministic() {
    let input = "offline valves at site 7 from 2016";
    assert_eq!(parse_search(input), parse_search(input));
}

#[test]
fn test_residual_is_idempotent_without_or() {
    let inputs = [
        "pumps in Plant A",
        "critical Grundfos",
        "Atlas Copco GA 75",
        "idle motors installed in 2021 Siemens",
        "maintenance due at zone 3 heat exchanger",
        "pump pumps",
        "pumps valves motors",
        "critical high priority",
        "2019 2020",
        "installed in 2019 from 2020",
        "in Plant A at Building 4",
        "overdue maintenance due overdue",
        // Stripping the middle word joins the outer ones into a phrase
        "maintenance critical due",
        "heat 2018 exchanger",
        "high 1999 priority",
        "maintenance idle due",
        "",
    ];
    for input in inputs {
        let first = parse_search(input);
        let second = parse_search(&first.cleaned_term);
        assert_eq!(second.cleaned_term, first.cleaned_term, "input: {:?}", input);
        assert!(second.filters.is_empty(), "input: {:?}", input);
    }

    // A second distinct status is left as text, since only one single status
    // is taken when there is no "or"
    let first = parse_search("idle running");
    assert_eq!(first.cleaned_term, "running");
    assert_eq!(
        parse_search(&first.cleaned_term).filters.status,
        Some(AssetStatus::InUse)
    );
}

#[test]
fn test_repeated_phrases_keep_first_value() {
    let q = parse_search("2019 2020 pumps valves");
    assert_eq!(q.filters.install_year, Some(2019));
    assert_eq!(q.filters.equipment_type, Some(EquipmentType::Pump));
    assert_eq!(q.cleaned_term, "");

    let q = parse_search("maintenance critical due");
    assert!(q.filters.critical);
    assert!(q.filters.maintenance_due);
    assert_eq!(q.cleaned_term, "");
}

#[test]
fn test_status_or_collects_every_phrase_in_segment() {
    let q = parse_search("running idle or unknown");
    let expected: BTreeSet<_> = [
        AssetStatus::InUse,
        AssetStatus::NotInUse,
        AssetStatus::Unknown,
    ]
    .into();
    assert_eq!(q.filters.status_or, Some(expected));
    assert_eq!(q.cleaned_term, "");

    // "not in use" is consumed before "in use" can match inside it
    let q = parse_search("not in use standby or broken");
    let expected: BTreeSet<_> = [
        AssetStatus::NotInUse,
        AssetStatus::Standby,
        AssetStatus::OutOfService,
    ]
    .into();
    assert_eq!(q.filters.status_or, Some(expected));
    assert_eq!(q.cleaned_term, "");
}

#[test]
fn test_serialized_field_names() {
    let q = parse_search("pumps or offline");
    let json = serde_json::to_value(&q).unwrap();
    assert_eq!(json["originalTerm"], "pumps or offline");
    assert_eq!(json["hasNaturalLanguage"], true);
    assert_eq!(json["filters"]["equipmentType"], "Pump");
    assert_eq!(json["filters"]["statusOr"][0], "Out of Service");
}
