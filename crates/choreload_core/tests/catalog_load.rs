use choreload_core::{CatalogError, ChoreCatalog, RawChoreRow, RawValue};

fn row(name: &str, frequency: i64, dedicated: &str, weight: f64) -> RawChoreRow {
    RawChoreRow::new(name, frequency, dedicated, weight)
}

#[test]
fn load_preserves_row_order_and_is_restartable() {
    let catalog = ChoreCatalog::load([
        row("Vacuum", 7, "", 2.0),
        row("Bathroom", 14, "Lee", 3.0),
        row("Trash", 7, "", 0.5),
    ])
    .unwrap();

    let first: Vec<&str> = catalog.all_chores().map(|c| c.name.as_str()).collect();
    let second: Vec<&str> = catalog.all_chores().map(|c| c.name.as_str()).collect();
    assert_eq!(first, vec!["Vacuum", "Bathroom", "Trash"]);
    assert_eq!(first, second);
    assert_eq!(
        catalog.get("Bathroom").unwrap().dedicated_owner.as_deref(),
        Some("Lee")
    );
}

#[test]
fn each_missing_field_is_a_schema_error() {
    let full = row("Vacuum", 7, "", 2.0);
    let cases = [
        ("Chore", RawChoreRow { chore: None, ..full.clone() }),
        ("Frequency", RawChoreRow { frequency: None, ..full.clone() }),
        ("Dedicated", RawChoreRow { dedicated: None, ..full.clone() }),
        ("Weight", RawChoreRow { weight: None, ..full.clone() }),
    ];

    for (field, broken) in cases {
        let err = ChoreCatalog::load([full.clone(), broken]).unwrap_err();
        assert_eq!(err, CatalogError::Schema { row: 2, field });
    }
}

#[test]
fn blank_name_is_a_schema_error() {
    let err = ChoreCatalog::load([row("   ", 7, "", 1.0)]).unwrap_err();
    assert_eq!(
        err,
        CatalogError::Schema {
            row: 1,
            field: "Chore"
        }
    );
}

#[test]
fn duplicate_names_fail_the_whole_load() {
    let err = ChoreCatalog::load([
        row("Vacuum", 7, "", 2.0),
        row("Trash", 7, "", 1.0),
        row("Vacuum", 14, "", 1.0),
    ])
    .unwrap_err();
    assert_eq!(
        err,
        CatalogError::DuplicateChore {
            row: 3,
            name: "Vacuum".to_string()
        }
    );
}

#[test]
fn frequency_must_be_a_positive_integer() {
    let bad_values = [
        RawValue::Integer(0),
        RawValue::Integer(-7),
        RawValue::Float(7.0),
        RawValue::Text("weekly".to_string()),
    ];
    for value in bad_values {
        let broken = RawChoreRow {
            frequency: Some(value.clone()),
            ..row("Vacuum", 7, "", 1.0)
        };
        let err = ChoreCatalog::load([broken]).unwrap_err();
        assert_eq!(
            err,
            CatalogError::InvalidFrequency {
                row: 1,
                chore: "Vacuum".to_string(),
                value,
            }
        );
    }
}

#[test]
fn weight_must_be_a_positive_number() {
    let bad_values = [
        RawValue::Integer(0),
        RawValue::Float(-0.5),
        RawValue::Text("heavy".to_string()),
    ];
    for value in bad_values {
        let broken = RawChoreRow {
            weight: Some(value.clone()),
            ..row("Vacuum", 7, "", 1.0)
        };
        let err = ChoreCatalog::load([broken]).unwrap_err();
        assert!(
            matches!(err, CatalogError::InvalidWeight { row: 1, .. }),
            "unexpected error for {value}: {err}"
        );
    }
}

#[test]
fn integer_weight_is_accepted() {
    let catalog = ChoreCatalog::load([RawChoreRow::new("Vacuum", 7_i64, "", 3_i64)]).unwrap();
    assert_eq!(catalog.get("Vacuum").unwrap().weight, 3.0);
}

#[test]
fn error_messages_name_row_and_value() {
    let err = ChoreCatalog::load([RawChoreRow::new("Vacuum", 7_i64, "", "lots")]).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("row 1"), "unexpected message: {message}");
    assert!(message.contains("\"lots\""), "unexpected message: {message}");
}
