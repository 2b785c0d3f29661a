use choreload_core::{
    ChoreCatalog, OverdueEntry, OverdueStore, ParticipantSet, RawChoreRow, ScheduleError,
    Scheduler, SENTINEL_DAYS_OVERDUE,
};

fn participants(ids: &[&str]) -> ParticipantSet {
    ParticipantSet::new(ids.iter().copied()).unwrap()
}

fn counters(pairs: &[(&str, u32)]) -> Vec<OverdueEntry> {
    pairs
        .iter()
        .map(|(name, days)| OverdueEntry::new(*name, *days))
        .collect()
}

#[test]
fn weekly_scenario_balances_around_dedicated_load() {
    let catalog = ChoreCatalog::load([
        RawChoreRow::new("A", 7_i64, "", 1_i64),
        RawChoreRow::new("B", 7_i64, "", 3_i64),
        RawChoreRow::new("C", 14_i64, "Sam", 2_i64),
    ])
    .unwrap();
    let store = OverdueStore::load(counters(&[("A", 7), ("B", 7), ("C", 14)]), &catalog);

    let outcome = Scheduler::default()
        .schedule(&catalog, &store, &participants(&["Sam", "Lee"]))
        .unwrap();
    let assignment = &outcome.assignment;

    assert_eq!(assignment.participant_for("C"), Some("Sam"));
    assert_eq!(assignment.participant_for("B"), Some("Lee"));
    assert_eq!(assignment.participant_for("A"), Some("Sam"));
    assert_eq!(assignment.load_of("Sam"), Some(3.0));
    assert_eq!(assignment.load_of("Lee"), Some(3.0));

    let new_counters: Vec<(&str, u32)> = outcome
        .updates
        .iter()
        .map(|update| (update.chore.as_str(), update.days_overdue))
        .collect();
    assert_eq!(new_counters, vec![("A", 0), ("B", 0), ("C", 0)]);
}

#[test]
fn chore_exactly_at_frequency_is_due() {
    let catalog = ChoreCatalog::load([
        RawChoreRow::new("Exact", 14_i64, "", 1_i64),
        RawChoreRow::new("Early", 14_i64, "", 1_i64),
    ])
    .unwrap();
    let store = OverdueStore::load(counters(&[("Exact", 14), ("Early", 13)]), &catalog);

    let outcome = Scheduler::default()
        .schedule(&catalog, &store, &participants(&["Sam"]))
        .unwrap();

    assert_eq!(outcome.assignment.participant_for("Exact"), Some("Sam"));
    assert_eq!(outcome.assignment.participant_for("Early"), None);
}

#[test]
fn counters_reset_for_assigned_and_advance_for_skipped() {
    let catalog = ChoreCatalog::load([
        RawChoreRow::new("Vacuum", 7_i64, "", 2_i64),
        RawChoreRow::new("Windows", 28_i64, "", 4_i64),
    ])
    .unwrap();
    let store = OverdueStore::load(counters(&[("Vacuum", 9), ("Windows", 7)]), &catalog);

    let outcome = Scheduler::new(7)
        .unwrap()
        .schedule(&catalog, &store, &participants(&["Sam"]))
        .unwrap();

    let vacuum = &outcome.updates[0];
    assert_eq!((vacuum.previous, vacuum.days_overdue), (9, 0));
    let windows = &outcome.updates[1];
    assert_eq!((windows.previous, windows.days_overdue), (7, 14));
}

#[test]
fn custom_period_advances_by_that_period() {
    let catalog = ChoreCatalog::load([RawChoreRow::new("Gutters", 90_i64, "", 5_i64)]).unwrap();
    let store = OverdueStore::load(counters(&[("Gutters", 10)]), &catalog);

    let outcome = Scheduler::new(3)
        .unwrap()
        .schedule(&catalog, &store, &participants(&["Sam"]))
        .unwrap();

    assert_eq!(outcome.updates[0].days_overdue, 13);
}

#[test]
fn sentinel_counter_saturates_instead_of_overflowing() {
    let catalog = ChoreCatalog::load([RawChoreRow::new("Rare", u32::MAX as i64, "", 1_i64)])
        .unwrap();
    let store = OverdueStore::load(counters(&[("Rare", u32::MAX - 2)]), &catalog);

    let outcome = Scheduler::default()
        .schedule(&catalog, &store, &participants(&["Sam"]))
        .unwrap();

    assert_eq!(outcome.updates[0].days_overdue, u32::MAX);
}

#[test]
fn empty_store_makes_every_chore_due() {
    let catalog = ChoreCatalog::load([
        RawChoreRow::new("Vacuum", 7_i64, "", 2_i64),
        RawChoreRow::new("Windows", 28_i64, "", 4_i64),
        RawChoreRow::new("Car", 30_i64, "Lee", 3_i64),
    ])
    .unwrap();
    let store = OverdueStore::load(Vec::new(), &catalog);
    assert_eq!(store.days_overdue("Car").unwrap(), SENTINEL_DAYS_OVERDUE);

    let outcome = Scheduler::default()
        .schedule(&catalog, &store, &participants(&["Sam", "Lee"]))
        .unwrap();

    assert_eq!(outcome.assignment.len(), 3);
    assert!(outcome.updates.iter().all(|update| update.days_overdue == 0));
}

#[test]
fn no_participants_fails_without_partial_assignment() {
    let catalog = ChoreCatalog::load([
        RawChoreRow::new("Vacuum", 7_i64, "", 2_i64),
        RawChoreRow::new("Car", 7_i64, "Lee", 3_i64),
    ])
    .unwrap();
    let store = OverdueStore::load(Vec::new(), &catalog);

    let err = Scheduler::default()
        .schedule(&catalog, &store, &ParticipantSet::empty())
        .unwrap_err();

    assert_eq!(
        err,
        ScheduleError::NoParticipants {
            pending: vec!["Vacuum".to_string()]
        }
    );
}

#[test]
fn only_dedicated_chores_need_no_participants() {
    let catalog = ChoreCatalog::load([RawChoreRow::new("Car", 7_i64, "Lee", 3_i64)]).unwrap();
    let store = OverdueStore::load(Vec::new(), &catalog);

    let outcome = Scheduler::default()
        .schedule(&catalog, &store, &ParticipantSet::empty())
        .unwrap();

    assert_eq!(outcome.assignment.participant_for("Car"), Some("Lee"));
}

#[test]
fn dedicated_chore_ignores_load_balance() {
    let catalog = ChoreCatalog::load([
        RawChoreRow::new("Laundry", 7_i64, "Sam", 5_i64),
        RawChoreRow::new("Cooking", 7_i64, "Sam", 5_i64),
        RawChoreRow::new("Trash", 7_i64, "", 1_i64),
    ])
    .unwrap();
    let store = OverdueStore::load(Vec::new(), &catalog);

    let outcome = Scheduler::default()
        .schedule(&catalog, &store, &participants(&["Sam", "Lee"]))
        .unwrap();

    assert_eq!(outcome.assignment.participant_for("Laundry"), Some("Sam"));
    assert_eq!(outcome.assignment.participant_for("Cooking"), Some("Sam"));
    assert_eq!(outcome.assignment.participant_for("Trash"), Some("Lee"));
    assert!(outcome
        .assignment
        .chores()
        .iter()
        .filter(|assigned| assigned.chore != "Trash")
        .all(|assigned| assigned.dedicated));
}

#[test]
fn equal_weights_are_ordered_by_name_and_ties_go_to_first_participant() {
    let catalog = ChoreCatalog::load([
        RawChoreRow::new("Zebra", 7_i64, "", 1_i64),
        RawChoreRow::new("Apple", 7_i64, "", 1_i64),
        RawChoreRow::new("Mango", 7_i64, "", 1_i64),
    ])
    .unwrap();
    let store = OverdueStore::load(Vec::new(), &catalog);

    let outcome = Scheduler::default()
        .schedule(&catalog, &store, &participants(&["Lee", "Sam"]))
        .unwrap();

    assert_eq!(outcome.assignment.participant_for("Apple"), Some("Lee"));
    assert_eq!(outcome.assignment.participant_for("Mango"), Some("Sam"));
    assert_eq!(outcome.assignment.participant_for("Zebra"), Some("Lee"));
}

#[test]
fn identical_inputs_give_identical_assignments() {
    let rows: Vec<RawChoreRow> = (0..12)
        .map(|i| RawChoreRow::new(format!("chore-{i}"), 7_i64, "", (i % 4 + 1) as f64 * 0.75))
        .collect();
    let catalog = ChoreCatalog::load(rows).unwrap();
    let set = participants(&["Ana", "Ben", "Cy"]);

    let first = Scheduler::default()
        .schedule(&catalog, &OverdueStore::load(Vec::new(), &catalog), &set)
        .unwrap();
    let second = Scheduler::default()
        .schedule(&catalog, &OverdueStore::load(Vec::new(), &catalog), &set)
        .unwrap();

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn load_spread_never_exceeds_heaviest_balanced_chore() {
    let mut seed: u64 = 0x5eed_cafe;
    let mut next = move |bound: u64| {
        seed = seed
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        (seed >> 33) % bound
    };

    for _ in 0..200 {
        let chore_count = next(15) + 1;
        let rows: Vec<RawChoreRow> = (0..chore_count)
            .map(|i| {
                let weight = (next(40) + 1) as f64 / 4.0;
                RawChoreRow::new(format!("chore-{i}"), 7_i64, "", weight)
            })
            .collect();
        let catalog = ChoreCatalog::load(rows).unwrap();
        let ids: Vec<String> = (0..next(5) + 1).map(|i| format!("p{i}")).collect();
        let set = ParticipantSet::new(&ids).unwrap();

        let outcome = Scheduler::default()
            .schedule(&catalog, &OverdueStore::load(Vec::new(), &catalog), &set)
            .unwrap();

        let heaviest = catalog
            .all_chores()
            .map(|chore| chore.weight)
            .fold(0.0_f64, f64::max);
        let spread = outcome.assignment.load_spread();
        assert!(
            spread <= heaviest + 1e-9,
            "spread {spread} exceeds heaviest chore {heaviest}"
        );
    }
}
