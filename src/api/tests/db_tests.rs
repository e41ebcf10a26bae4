use crate::api::ArborDb;
use crate::core::census::BoroughTally;
use crate::core::config::Config;
use crate::core::types::{Borough, HealthRating, LifeStatus, TreeRecord, BOROUGH_COUNT};
use std::io::Write;
use tempfile::NamedTempFile;

fn record(id: u32, species: &str, borough: Borough) -> TreeRecord {
    TreeRecord::new(
        id,
        21,
        LifeStatus::Alive,
        HealthRating::Fair,
        species,
        borough,
        10027,
        "512 W 122 ST",
        40.8119,
        -73.9577,
    )
}

/// A 41-column census line with the ten semantic fields at their fixed
/// positions.
fn census_line(id: u32, species: &str, borough: &str) -> String {
    let mut columns = vec![String::new(); 41];
    columns[0] = id.to_string();
    columns[1] = "13".to_string();
    columns[6] = "Alive".to_string();
    columns[7] = "Good".to_string();
    columns[10] = species.to_string();
    columns[26] = "1139 57 STREET".to_string();
    columns[27] = borough.to_string();
    columns[28] = "11219".to_string();
    columns[39] = "40.6324".to_string();
    columns[40] = "-73.9948".to_string();
    columns.join(",")
}

#[test]
fn open_with_config_loads_the_configured_file() {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    writeln!(file, "header,row").expect("Failed to write temp file");
    writeln!(file, "{}", census_line(1, "red oak", "Brooklyn")).expect("Failed to write");
    writeln!(file, "{}", census_line(2, "ginkgo", "Queens")).expect("Failed to write");

    let config = Config::builder()
        .data_file(file.path())
        .has_header(true)
        .strict_ingest(true)
        .build()
        .expect("config should validate");
    let db = ArborDb::open(config).expect("open should load the data file");

    assert_eq!(db.total_tree_count(), 2);
    assert_eq!(db.number_of_species(), 2);
    assert_eq!(db.count_of_tree_species("Red Oak"), 1);
    assert_eq!(db.count_of_trees_in_boro("queens"), 1);
}

#[test]
fn open_without_data_file_starts_empty() {
    let db = ArborDb::open(Config::for_testing()).expect("no file to load, cannot fail");
    assert_eq!(db.total_tree_count(), 0);
    assert_eq!(db.number_of_species(), 0);
}

#[test]
fn with_config_rejects_invalid_configuration() {
    let config = Config { default_radius_km: -1.0, ..Config::default() };
    assert!(ArborDb::with_config(config).is_err());
}

#[test]
fn queries_delegate_to_the_collection() {
    let mut db = ArborDb::new();
    assert!(db.add_record(record(1, "pin oak", Borough::Manhattan)));
    assert!(db.add_record(record(2, "pin oak", Borough::Bronx)));
    assert!(db.add_record(record(3, "silver linden", Borough::Manhattan)));
    assert!(!db.add_record(record(3, "Silver Linden", Borough::Manhattan)));

    assert_eq!(db.total_tree_count(), 3);
    assert_eq!(db.count_of_tree_species("PIN-OAK"), 2);
    assert_eq!(db.count_of_tree_species_in_boro("pin oak", "Bronx"), 1);

    let mut tallies = [BoroughTally::default(); BOROUGH_COUNT];
    assert_eq!(db.get_counts_of_trees_by_boro("pin oak", &mut tallies), 2);
    assert_eq!(tallies[0].count, 1);
    assert_eq!(tallies[1].count, 1);

    let mut matches = db.get_matching_species("lin");
    matches.sort();
    assert_eq!(matches, vec!["silver linden".to_string()]);
    assert_eq!(db.get_all_in_zipcode(10027).len(), 2);
    assert_eq!(db.get_all_near(40.8119, -73.9577, 0.5).len(), 2);
    assert_eq!(db.get_all_near_default(40.8119, -73.9577).len(), 2);

    let mut out = Vec::new();
    db.print_all_species(&mut out).expect("write to Vec cannot fail");
    assert_eq!(String::from_utf8_lossy(&out), "pin oak\nsilver linden\n");
}
