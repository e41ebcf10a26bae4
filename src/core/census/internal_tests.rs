#![cfg(test)]

use super::{BoroughTally, TreeCollection};
use crate::core::types::{Borough, HealthRating, LifeStatus, TreeRecord, BOROUGH_COUNT};

fn record(id: u32, species: &str, zipcode: u32, borough: Borough) -> TreeRecord {
    TreeRecord::new(
        id,
        10,
        LifeStatus::Alive,
        HealthRating::Good,
        species,
        borough,
        zipcode,
        "1 Census Way",
        40.7,
        -73.9,
    )
}

fn located(id: u32, species: &str, latitude: f64, longitude: f64) -> TreeRecord {
    TreeRecord::new(
        id,
        10,
        LifeStatus::Alive,
        HealthRating::Good,
        species,
        Borough::Manhattan,
        10001,
        "1 Census Way",
        latitude,
        longitude,
    )
}

/// The scenario pinned by the query-engine contract: mixed-case duplicated
/// species across two boroughs and two zip codes.
fn scenario() -> TreeCollection {
    let mut collection = TreeCollection::new();
    assert!(collection.add_tree(record(1, "Oak", 10001, Borough::Manhattan)));
    assert!(collection.add_tree(record(2, "oak", 10001, Borough::Manhattan)));
    assert!(collection.add_tree(record(3, "Pine", 10002, Borough::Bronx)));
    collection
}

#[test]
fn scenario_counts_and_listings() {
    let collection = scenario();
    assert_eq!(collection.count_of_tree_species("OAK"), 2);
    assert_eq!(collection.total_tree_count(), 3);
    assert_eq!(collection.get_all_in_zipcode(10001), vec!["Oak".to_string()]);
    assert_eq!(collection.count_of_trees_in_boro("Bronx"), 1);
    assert_eq!(collection.number_of_species(), 2);
}

#[test]
fn total_equals_accepted_insertions() {
    let mut collection = TreeCollection::new();
    let mut accepted = 0;
    for id in 0..50 {
        let borough = Borough::CANONICAL[(id as usize) % BOROUGH_COUNT];
        if collection.add_tree(record(id, "London Planetree", 11375, borough)) {
            accepted += 1;
        }
    }
    // A few deliberate duplicates.
    assert!(!collection.add_tree(record(7, "london planetree", 11375, Borough::Queens)));
    assert!(!collection.add_tree(record(8, "London Planetree", 10001, Borough::Bronx)));
    assert_eq!(collection.total_tree_count(), accepted);
    assert_eq!(collection.index().len(), accepted);
    collection.index().check_invariants();
}

#[test]
fn duplicate_insertion_is_idempotent() {
    let mut collection = TreeCollection::new();
    assert!(collection.add_tree(record(1, "Oak", 10001, Borough::Manhattan)));
    let before = collection.total_tree_count();
    assert!(!collection.add_tree(record(1, "Oak", 10001, Borough::Manhattan)));
    // Same species key and id, different borough: still the same record.
    assert!(!collection.add_tree(record(1, "OAK", 10305, Borough::StatenIsland)));
    assert_eq!(collection.total_tree_count(), before);
    assert_eq!(collection.count_of_trees_in_boro("Staten Island"), 0);
}

#[test]
fn species_matching_is_case_and_hyphen_insensitive() {
    let mut collection = TreeCollection::new();
    collection.add_tree(record(1, "honey-locust", 10001, Borough::Manhattan));
    collection.add_tree(record(2, "Honey Locust", 10002, Borough::Bronx));
    assert_eq!(
        collection.count_of_tree_species("honey-locust"),
        collection.count_of_tree_species("Honey Locust")
    );
    assert_eq!(collection.count_of_tree_species("HONEY-LOCUST"), 2);
    assert_eq!(collection.count_of_tree_species("white oak"), 0);
}

#[test]
fn species_count_in_borough() {
    let collection = scenario();
    assert_eq!(collection.count_of_tree_species_in_boro("oak", "manhattan"), 2);
    assert_eq!(collection.count_of_tree_species_in_boro("oak", "Bronx"), 0);
    assert_eq!(collection.count_of_tree_species_in_boro("pine", "BRONX"), 1);
    assert_eq!(collection.count_of_tree_species_in_boro("pine", "Atlantis"), 0);
}

#[test]
fn counts_by_borough_relabel_and_sum() {
    let collection = scenario();
    // Garbage-filled slots must be relabeled and zeroed before the traversal.
    let mut tallies = [BoroughTally { borough: Borough::Unknown, count: 999 }; BOROUGH_COUNT];
    let total = collection.get_counts_of_trees_by_boro("oak", &mut tallies);
    assert_eq!(total, collection.count_of_tree_species("oak"));
    let slot_sum: usize = tallies.iter().map(|t| t.count).sum();
    assert_eq!(slot_sum, total);
    assert_eq!(tallies[0].borough, Borough::Manhattan);
    assert_eq!(tallies[0].count, 2);
    assert_eq!(tallies[4].borough, Borough::StatenIsland);
    assert_eq!(tallies[4].count, 0);
}

#[test]
fn matching_species_deduplicates_and_matches_all_on_empty() {
    let collection = scenario();
    let mut all = collection.get_matching_species("");
    all.sort();
    assert_eq!(all, vec!["Oak".to_string(), "Pine".to_string()]);

    let partial = collection.get_matching_species("ak");
    assert_eq!(partial, vec!["Oak".to_string()]);
    assert!(collection.get_matching_species("maple").is_empty());
}

#[test]
fn matching_species_reports_first_seen_spelling() {
    let mut collection = TreeCollection::new();
    collection.add_tree(record(1, "Crimson King Maple", 10001, Borough::Manhattan));
    collection.add_tree(record(2, "crimson king maple", 10001, Borough::Manhattan));
    assert_eq!(
        collection.get_matching_species("crimson"),
        vec!["Crimson King Maple".to_string()]
    );
}

#[test]
fn zipcode_listing_deduplicates() {
    let mut collection = scenario();
    collection.add_tree(record(4, "Pine", 10001, Borough::Manhattan));
    let names = collection.get_all_in_zipcode(10001);
    assert_eq!(names, vec!["Oak".to_string(), "Pine".to_string()]);
    assert!(collection.get_all_in_zipcode(99999).is_empty());
}

#[test]
fn radius_search_zero_distance_hits_exact_position_only() {
    let mut collection = TreeCollection::new();
    collection.add_tree(located(1, "Oak", 40.7484, -73.9857));
    collection.add_tree(located(2, "Pine", 40.6892, -74.0445));

    let here = collection.get_all_near(40.7484, -73.9857, 0.0);
    assert_eq!(here, vec!["Oak".to_string()]);

    // About 8.2 km between the two points; a 10 km radius covers both.
    let mut nearby = collection.get_all_near(40.7484, -73.9857, 10.0);
    nearby.sort();
    assert_eq!(nearby, vec!["Oak".to_string(), "Pine".to_string()]);

    assert!(collection.get_all_near(40.7484, -73.9857, -1.0).is_empty());
}

#[test]
fn sentinel_is_never_counted_or_listed() {
    let mut collection = scenario();
    assert!(!collection.add_tree(TreeRecord::sentinel()));
    assert_eq!(collection.total_tree_count(), 3);
    assert_eq!(collection.number_of_species(), 2);
    assert_eq!(collection.count_of_tree_species(""), 0);
    assert!(!collection.get_matching_species("").contains(&String::new()));
    assert!(collection.get_all_in_zipcode(0).is_empty());

    let mut out = Vec::new();
    collection.print_all_species(&mut out).expect("write to Vec cannot fail");
    let text = String::from_utf8(out).expect("species names are UTF-8");
    assert!(!text.lines().any(str::is_empty));
}

#[test]
fn unknown_borough_records_are_stored_but_never_tallied() {
    let mut collection = TreeCollection::new();
    assert!(collection.add_tree(record(1, "Ginkgo", 10001, Borough::Unknown)));
    assert_eq!(collection.total_tree_count(), 0);
    assert_eq!(collection.count_of_tree_species("ginkgo"), 1);
    assert_eq!(collection.number_of_species(), 1);
}

#[test]
fn print_all_species_is_ordered_and_deduplicated() {
    let mut collection = TreeCollection::new();
    collection.add_tree(record(5, "pin oak", 10001, Borough::Manhattan));
    collection.add_tree(record(2, "American Elm", 10001, Borough::Manhattan));
    collection.add_tree(record(9, "Pin Oak", 10002, Borough::Bronx));
    collection.add_tree(record(1, "ginkgo", 10002, Borough::Bronx));

    let mut out = Vec::new();
    collection.print_all_species(&mut out).expect("write to Vec cannot fail");
    let text = String::from_utf8(out).expect("species names are UTF-8");
    let lines: Vec<&str> = text.lines().collect();
    // Index order is case-folded lexicographic; spelling is first-seen by
    // (species key, id), so "Pin Oak" (id 9) loses to "pin oak" (id 5).
    assert_eq!(lines, vec!["American Elm", "ginkgo", "pin oak"]);
}

#[test]
fn print_all_dumps_records_in_index_order() {
    let collection = scenario();
    let mut out = Vec::new();
    collection.print_all(&mut out).expect("write to Vec cannot fail");
    let text = String::from_utf8(out).expect("record dumps are UTF-8");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("Oak,1,"));
    assert!(lines[1].starts_with("oak,2,"));
    assert!(lines[2].starts_with("Pine,3,"));
}

#[test]
fn with_record_seeds_the_collection() {
    let collection = TreeCollection::with_record(record(1, "Oak", 10001, Borough::Manhattan));
    assert_eq!(collection.total_tree_count(), 1);
    assert_eq!(collection.number_of_species(), 1);
}
