use academy_core::db::open_db_in_memory;
use academy_core::{
    assign_category, CategoryDraft, CategoryService, PlayerDraft, PlayerService, ServiceError,
    Sport, SportDraft, SportService, SqliteCategoryRepository,
};
use chrono::{Local, Months, NaiveDate};
use rusqlite::Connection;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn today() -> NaiveDate {
    date(2025, 6, 15)
}

fn seed_sport(conn: &mut Connection, name: &str) -> Sport {
    SportService::new(conn).create(SportDraft::new(name)).unwrap()
}

fn player_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM players;", [], |row| row.get(0))
        .unwrap()
}

#[test]
fn bracket_bounds_are_inclusive() {
    let mut conn = open_db_in_memory().unwrap();
    let sport = seed_sport(&mut conn, "Football");
    let a = CategoryService::new(&mut conn)
        .create(CategoryDraft::new("A", 6, 9), sport.id)
        .unwrap();
    let b = CategoryService::new(&mut conn)
        .create(CategoryDraft::new("B", 10, 13), sport.id)
        .unwrap();

    let mut players = PlayerService::with_today(&mut conn, today());
    let six = players
        .create(PlayerDraft::new("Six", "Years", date(2019, 6, 15)), sport.id)
        .unwrap();
    let nine = players
        .create(PlayerDraft::new("Nine", "Years", date(2015, 6, 16)), sport.id)
        .unwrap();
    let ten = players
        .create(PlayerDraft::new("Ten", "Years", date(2015, 6, 15)), sport.id)
        .unwrap();
    let thirteen = players
        .create(PlayerDraft::new("Thirteen", "Years", date(2011, 7, 1)), sport.id)
        .unwrap();

    assert_eq!(six.category_id, a.id);
    assert_eq!(nine.category_id, a.id);
    assert_eq!(ten.category_id, b.id);
    assert_eq!(thirteen.category_id, b.id);
    assert!(players.list().unwrap().iter().all(|p| p.sport_id == sport.id));
}

#[test]
fn no_matching_bracket_fails_and_persists_nothing() {
    let mut conn = open_db_in_memory().unwrap();
    let sport = seed_sport(&mut conn, "Football");
    CategoryService::new(&mut conn)
        .create(CategoryDraft::new("A", 6, 9), sport.id)
        .unwrap();

    let err = PlayerService::with_today(&mut conn, today())
        .create(PlayerDraft::new("Old", "Timer", date(2000, 1, 1)), sport.id)
        .unwrap_err();
    match err {
        ServiceError::NotFound(message) => {
            assert!(message.contains("25"), "{message}");
            assert!(message.contains("Football"), "{message}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(player_count(&conn), 0);
}

#[test]
fn sport_without_categories_cannot_enroll() {
    let mut conn = open_db_in_memory().unwrap();
    let sport = seed_sport(&mut conn, "Chess");
    let err = PlayerService::with_today(&mut conn, today())
        .create(PlayerDraft::new("Ana", "Ruiz", date(2016, 1, 1)), sport.id)
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
    assert_eq!(player_count(&conn), 0);
}

#[test]
fn unknown_sport_is_not_found() {
    let mut conn = open_db_in_memory().unwrap();
    let err = PlayerService::with_today(&mut conn, today())
        .create(PlayerDraft::new("Ana", "Ruiz", date(2016, 1, 1)), 12)
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[test]
fn invalid_drafts_are_rejected() {
    let mut conn = open_db_in_memory().unwrap();
    let sport = seed_sport(&mut conn, "Football");
    CategoryService::new(&mut conn)
        .create(CategoryDraft::new("A", 0, 99), sport.id)
        .unwrap();
    let mut players = PlayerService::with_today(&mut conn, today());

    let missing_birth = PlayerDraft {
        first_name: "Ana".to_string(),
        last_name: "Ruiz".to_string(),
        ..PlayerDraft::default()
    };
    assert!(matches!(
        players.create(missing_birth, sport.id),
        Err(ServiceError::Validation(_))
    ));

    assert!(matches!(
        players.create(PlayerDraft::new(" ", "Ruiz", date(2016, 1, 1)), sport.id),
        Err(ServiceError::Validation(_))
    ));

    assert!(matches!(
        players.create(PlayerDraft::new("Ana", "Ruiz", date(2030, 1, 1)), sport.id),
        Err(ServiceError::Validation(_))
    ));

    assert!(players.list().unwrap().is_empty());
}

#[test]
fn football_example_follows_the_current_date() {
    let mut conn = open_db_in_memory().unwrap();
    let football = seed_sport(&mut conn, "Football");
    CategoryService::new(&mut conn)
        .create(CategoryDraft::new("A", 6, 9), football.id)
        .unwrap();
    let b = CategoryService::new(&mut conn)
        .create(CategoryDraft::new("B", 10, 13), football.id)
        .unwrap();

    let now = Local::now().date_naive();
    let birth_date = now.checked_sub_months(Months::new(120)).unwrap();
    let draft = PlayerDraft::new("Leo", "Diaz", birth_date).with_national_id("ID-10");

    let player = PlayerService::new(&mut conn)
        .create(draft.clone(), football.id)
        .unwrap();
    assert_eq!(player.category_id, b.id);

    CategoryService::new(&mut conn)
        .update(b.id, CategoryDraft::new("B", 10, 9), None)
        .unwrap_err();
    CategoryService::new(&mut conn)
        .update(b.id, CategoryDraft::new("B", 11, 13), None)
        .unwrap();

    // Stored placement stays until the player is written again.
    let stored = PlayerService::new(&mut conn).get_by_id(player.id).unwrap();
    assert_eq!(stored.category_id, b.id);

    let err = PlayerService::new(&mut conn)
        .update(player.id, draft, None)
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));

    let unchanged = PlayerService::new(&mut conn).get_by_id(player.id).unwrap();
    assert_eq!(unchanged, stored);
}

#[test]
fn birth_date_change_reassigns_category() {
    let mut conn = open_db_in_memory().unwrap();
    let sport = seed_sport(&mut conn, "Football");
    let a = CategoryService::new(&mut conn)
        .create(CategoryDraft::new("A", 6, 9), sport.id)
        .unwrap();
    let b = CategoryService::new(&mut conn)
        .create(CategoryDraft::new("B", 10, 13), sport.id)
        .unwrap();
    let mut players = PlayerService::with_today(&mut conn, today());

    let player = players
        .create(PlayerDraft::new("Ana", "Ruiz", date(2017, 1, 1)), sport.id)
        .unwrap();
    assert_eq!(player.category_id, a.id);

    let updated = players
        .update(
            player.id,
            PlayerDraft::new("Ana", "Ruiz", date(2013, 1, 1)).with_contact("555-0101", "ana@x.io"),
            None,
        )
        .unwrap();
    assert_eq!(updated.category_id, b.id);
    assert_eq!(updated.birth_date, date(2013, 1, 1));
    assert_eq!(updated.phone.as_deref(), Some("555-0101"));
    assert_eq!(updated.email.as_deref(), Some("ana@x.io"));
}

#[test]
fn update_can_move_player_to_another_sport() {
    let mut conn = open_db_in_memory().unwrap();
    let football = seed_sport(&mut conn, "Football");
    let basketball = seed_sport(&mut conn, "Basketball");
    CategoryService::new(&mut conn)
        .create(CategoryDraft::new("Kids", 6, 9), football.id)
        .unwrap();
    let mini = CategoryService::new(&mut conn)
        .create(CategoryDraft::new("Mini", 7, 10), basketball.id)
        .unwrap();
    let mut players = PlayerService::with_today(&mut conn, today());
    let draft = PlayerDraft::new("Ana", "Ruiz", date(2017, 1, 1));
    let player = players.create(draft.clone(), football.id).unwrap();

    let err = players
        .update(player.id, draft.clone(), Some(999))
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));

    let moved = players
        .update(player.id, draft, Some(basketball.id))
        .unwrap();
    assert_eq!(moved.sport_id, basketball.id);
    assert_eq!(moved.category_id, mini.id);
}

#[test]
fn national_id_is_unique_across_players() {
    let mut conn = open_db_in_memory().unwrap();
    let sport = seed_sport(&mut conn, "Football");
    CategoryService::new(&mut conn)
        .create(CategoryDraft::new("All", 0, 99), sport.id)
        .unwrap();
    let mut players = PlayerService::with_today(&mut conn, today());

    let first = players
        .create(
            PlayerDraft::new("Ana", "Ruiz", date(2015, 1, 1)).with_national_id("X-1"),
            sport.id,
        )
        .unwrap();
    let second = players
        .create(
            PlayerDraft::new("Luis", "Mora", date(2014, 1, 1)).with_national_id("X-2"),
            sport.id,
        )
        .unwrap();

    let duplicate = players
        .create(
            PlayerDraft::new("Eva", "Sol", date(2013, 1, 1)).with_national_id("X-1"),
            sport.id,
        )
        .unwrap_err();
    assert!(matches!(duplicate, ServiceError::Validation(_)));

    let taken = players
        .update(
            second.id,
            PlayerDraft::new("Luis", "Mora", date(2014, 1, 1)).with_national_id("X-1"),
            None,
        )
        .unwrap_err();
    assert!(matches!(taken, ServiceError::Validation(_)));

    let kept = players
        .update(
            first.id,
            PlayerDraft::new("Ana", "Ruiz", date(2015, 1, 1)).with_national_id("X-1"),
            None,
        )
        .unwrap();
    assert_eq!(kept.national_id.as_deref(), Some("X-1"));

    let omitted = players
        .update(
            second.id,
            PlayerDraft::new("Luis", "Mora", date(2014, 1, 1)),
            None,
        )
        .unwrap();
    assert_eq!(omitted.national_id.as_deref(), Some("X-2"));
}

#[test]
fn players_without_national_id_can_coexist() {
    let mut conn = open_db_in_memory().unwrap();
    let sport = seed_sport(&mut conn, "Football");
    CategoryService::new(&mut conn)
        .create(CategoryDraft::new("All", 0, 99), sport.id)
        .unwrap();
    let mut players = PlayerService::with_today(&mut conn, today());

    players
        .create(PlayerDraft::new("Ana", "Ruiz", date(2015, 1, 1)), sport.id)
        .unwrap();
    players
        .create(PlayerDraft::new("Luis", "Mora", date(2014, 1, 1)), sport.id)
        .unwrap();
    assert_eq!(players.list().unwrap().len(), 2);
}

#[test]
fn overlapping_brackets_pick_the_earliest_category() {
    let mut conn = open_db_in_memory().unwrap();
    let sport = seed_sport(&mut conn, "Football");
    let wide = CategoryService::new(&mut conn)
        .create(CategoryDraft::new("Wide", 5, 12), sport.id)
        .unwrap();
    CategoryService::new(&mut conn)
        .create(CategoryDraft::new("Narrow", 8, 9), sport.id)
        .unwrap();

    let categories = SqliteCategoryRepository::try_new(&conn).unwrap();
    let chosen = assign_category(&categories, Some(date(2016, 6, 1)), &sport, today()).unwrap();
    assert_eq!(chosen.id, wide.id);
}

#[test]
fn update_and_delete_unknown_player_are_not_found() {
    let mut conn = open_db_in_memory().unwrap();
    let mut players = PlayerService::with_today(&mut conn, today());

    assert!(matches!(
        players.update(8, PlayerDraft::new("Ana", "Ruiz", date(2015, 1, 1)), None),
        Err(ServiceError::NotFound(_))
    ));
    assert!(matches!(players.delete(8), Err(ServiceError::NotFound(_))));
    assert!(matches!(players.get_by_id(8), Err(ServiceError::NotFound(_))));
}
