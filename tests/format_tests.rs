use card_stacks::{
    load_stack, write_stack, Card, CardKey, ErrorKind, IoConfig, KeyDomain, Print, Stack,
};
use std::fs;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

// Test fixtures - sample data for testing

fn create_sample_deck_content() -> String {
    r#"Deck
4 Lightning Bolt
2 Counterspell
20 Island

Sideboard
3 Pyroblast"#
        .to_string()
}

fn create_sample_csv_content() -> String {
    r#"Count,Card Name,Set Name,Collector Number,Foil,Price
1,Lightning Bolt,Beta,161,false,100.00
4,Lightning Bolt,M10,146,true,2.50
10,Island,Beta,,false,
2,Counterspell,Alpha,55,no,12.00"#
        .to_string()
}

fn temp_file(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

fn card(name: &str) -> CardKey {
    Card::new(name).unwrap().into()
}

// Tests for deck lists

#[test]
fn test_load_deck_list() {
    let file = temp_file(".arena", &create_sample_deck_content());

    let stack = load_stack(file.path(), &IoConfig::default()).unwrap();

    assert_eq!(stack.total(), 26);
    assert_eq!(stack.count(&card("Island")), 20);
    assert!(!stack.contains(&card("Pyroblast")));
    assert_eq!(stack.domain(), Some(KeyDomain::Card));
}

#[test]
fn test_load_deck_list_with_sideboard() {
    let file = temp_file(".txt", &create_sample_deck_content());

    let config = IoConfig::new().with_sideboard(true);
    let stack = load_stack(file.path(), &config).unwrap();

    assert_eq!(stack.total(), 29);
    assert_eq!(stack.count(&card("Pyroblast")), 3);
}

#[test]
fn test_load_invalid_deck_list() {
    let file = temp_file(".deck", "Deck\n4 Lightning Bolt\nnot_a_number Force of Will\n");

    let err = load_stack(file.path(), &IoConfig::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
    assert!(err.to_string().contains("line 3"));
}

#[test]
fn test_deck_list_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("deck.arena");
    let stack = load_stack(
        temp_file(".arena", &create_sample_deck_content()).path(),
        &IoConfig::default(),
    )
    .unwrap();

    write_stack(&stack, &path, &IoConfig::default()).unwrap();
    let back = load_stack(&path, &IoConfig::default()).unwrap();

    assert_eq!(back, stack);
}

// Tests for CSV collections

#[test]
fn test_load_csv() {
    let file = temp_file(".csv", &create_sample_csv_content());

    let stack = load_stack(file.path(), &IoConfig::default()).unwrap();

    assert_eq!(stack.len(), 4);
    assert_eq!(stack.total(), 17);
    assert_eq!(stack.domain(), Some(KeyDomain::Print));

    let beta_bolt: CardKey = Print::new("Lightning Bolt", "Beta", false, Some("100".parse().unwrap()))
        .unwrap()
        .into();
    assert_eq!(stack.count(&beta_bolt), 1);

    let counterspell: CardKey =
        Print::new("Counterspell", "Alpha", false, Some("12".parse().unwrap()))
            .unwrap()
            .into();
    assert_eq!(stack.count(&counterspell), 2);
}

#[test]
fn test_load_invalid_csv() {
    let file = temp_file(".csv", "invalid,csv,format\nmissing,required,fields\n");

    let err = load_stack(file.path(), &IoConfig::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[test]
fn test_csv_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out/collection.csv");
    let stack = load_stack(
        temp_file(".csv", &create_sample_csv_content()).path(),
        &IoConfig::default(),
    )
    .unwrap();

    write_stack(&stack, &path, &IoConfig::default()).unwrap();
    let back = load_stack(&path, &IoConfig::default()).unwrap();

    assert_eq!(back, stack);
}

#[test]
fn test_csv_round_trip_with_collector_numbers() {
    let config = IoConfig::new().with_collector_number_identity(true);
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("plains.csv");
    let input = temp_file(
        ".csv",
        "Count,Card Name,Set Name,Collector Number\n1,Plains,Alpha,286\n2,Plains,Alpha,287\n",
    );

    let stack = load_stack(input.path(), &config).unwrap();
    assert_eq!(stack.len(), 2);

    write_stack(&stack, &path, &config).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("1,Plains,Alpha,286,false,\n"));
    assert!(text.contains("2,Plains,Alpha,287,false,\n"));

    assert_eq!(load_stack(&path, &config).unwrap(), stack);
}

// Tests for cross-format conversion

#[test]
fn test_csv_to_deck_list_merges_prints() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("deck.arena");
    let stack = load_stack(
        temp_file(".csv", &create_sample_csv_content()).path(),
        &IoConfig::default(),
    )
    .unwrap();

    write_stack(&stack, &path, &IoConfig::default()).unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "Deck\n5 Lightning Bolt\n10 Island\n2 Counterspell\n\nSideboard\n"
    );
}

#[test]
fn test_mixed_stack_to_csv() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("mixed.csv");
    let stack = Stack::from_entries([
        (card("Lightning Bolt"), 2),
        (Print::new("Lightning Bolt", "", false, None).unwrap().into(), 1),
    ])
    .unwrap();

    write_stack(&stack, &path, &IoConfig::default()).unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "Count,Card Name,Set Name,Collector Number,Foil,Price\n3,Lightning Bolt,,,false,\n"
    );
}

#[test]
fn test_empty_stack_writes() {
    let dir = TempDir::new().unwrap();
    let csv = dir.path().join("empty.csv");
    let deck = dir.path().join("empty.arena");

    write_stack(&Stack::new(), &csv, &IoConfig::default()).unwrap();
    write_stack(&Stack::new(), &deck, &IoConfig::default()).unwrap();

    assert!(load_stack(&csv, &IoConfig::default()).unwrap().is_empty());
    assert!(load_stack(&deck, &IoConfig::default()).unwrap().is_empty());
}

#[test]
fn test_unsupported_extension() {
    let file = temp_file(".json", "{}");

    let err = load_stack(file.path(), &IoConfig::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
    assert!(err.to_string().contains(".json"));
}
