use std::fs;

use h2h_backend::error::StoreError;
use h2h_backend::fs_store::FsStore;
use h2h_backend::store::{LeagueStore, TeamStore};

fn scratch_store() -> (tempfile::TempDir, FsStore) {
    let tmp = tempfile::tempdir().expect("tempdir");
    let store = FsStore::new(tmp.path().join("leagues"));
    (tmp, store)
}

#[test]
fn created_league_is_listed_with_rederived_name() {
    let (_tmp, store) = scratch_store();
    let created = store.create_league("Spain LaLiga").unwrap();
    assert_eq!(created.league_id, "spain-laliga");
    assert_eq!(created.name, "Spain LaLiga");

    let listed = store.list_leagues().unwrap();
    let league = listed
        .iter()
        .find(|l| l.league_id == "spain-laliga")
        .expect("league listed");
    assert_eq!(league.name, "Spain Laliga");
    assert!(store.league_exists("spain-laliga"));
}

#[test]
fn creating_colliding_names_is_a_noop() {
    let (_tmp, store) = scratch_store();
    store.create_league("Primeira Liga").unwrap();
    store.create_league("PRIMEIRA  LIGA").unwrap();
    assert_eq!(store.list_leagues().unwrap().len(), 1);
}

#[test]
fn create_league_rejects_blank_and_stopword_names() {
    let (_tmp, store) = scratch_store();
    assert!(matches!(
        store.create_league("  "),
        Err(StoreError::InvalidInput(_))
    ));
    assert!(matches!(
        store.create_league("FC U21"),
        Err(StoreError::InvalidInput(_))
    ));
}

#[test]
fn list_leagues_skips_plain_files() {
    let (_tmp, store) = scratch_store();
    store.create_league("Serie A").unwrap();
    fs::write(store.root().join("notes.txt"), "x").unwrap();
    let ids: Vec<String> = store
        .list_leagues()
        .unwrap()
        .into_iter()
        .map(|l| l.league_id)
        .collect();
    assert_eq!(ids, vec!["serie-a".to_string()]);
}

#[test]
fn upload_then_find_is_normalization_insensitive() {
    let (_tmp, store) = scratch_store();
    store.create_league("Spain LaLiga").unwrap();
    let team = store
        .save_team_csv("spain-laliga", "Real Madrid.csv", b"goals_for\n2.1\n")
        .unwrap();
    assert_eq!(team.team_id, "real-madrid");
    assert_eq!(team.name, "Real Madrid");

    let file = store.find_team_file("spain-laliga", "real madrid").unwrap();
    assert_eq!(file.stem, "Real Madrid");
    assert_eq!(
        store.read_team_file(&file).unwrap(),
        fs::read(store.root().join("spain-laliga").join("Real Madrid.csv")).unwrap()
    );
    assert!(store.find_team_file("spain-laliga", "Réal Madrid CF").is_ok());
}

#[test]
fn second_upload_replaces_the_file() {
    let (_tmp, store) = scratch_store();
    store.create_league("Liga").unwrap();
    store.save_team_csv("liga", "Porto.csv", b"pts\n10\n").unwrap();
    store.save_team_csv("liga", "Porto.CSV", b"pts\n12\n").unwrap();

    let entries: Vec<String> = fs::read_dir(store.root().join("liga"))
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(entries, vec!["Porto.csv".to_string()]);
    assert_eq!(
        fs::read(store.root().join("liga").join("Porto.csv")).unwrap(),
        b"pts\n12\n"
    );
}

#[test]
fn list_teams_only_sees_csv_files() {
    let (_tmp, store) = scratch_store();
    store.create_league("Liga").unwrap();
    let dir = store.root().join("liga");
    fs::write(dir.join("Benfica.csv"), "a\n1\n").unwrap();
    fs::write(dir.join("Braga.CSV"), "a\n1\n").unwrap();
    fs::write(dir.join("readme.md"), "x").unwrap();
    fs::create_dir(dir.join("archive.csv")).unwrap();

    let teams = store.list_teams("liga").unwrap();
    assert_eq!(teams.len(), 1);
    assert_eq!(teams[0].name, "Benfica");
    assert_eq!(teams[0].team_id, "benfica");
}

#[test]
fn missing_league_behaviour() {
    let (_tmp, store) = scratch_store();
    assert!(store.list_teams("nonexistent").unwrap().is_empty());
    assert!(matches!(
        store.find_team_file("nonexistent", "x"),
        Err(StoreError::NotFound(_))
    ));
    assert!(matches!(
        store.save_team_csv("nonexistent", "x.csv", b"a\n1\n"),
        Err(StoreError::NotFound(_))
    ));
}

#[test]
fn upload_validation_errors() {
    let (_tmp, store) = scratch_store();
    store.create_league("Liga").unwrap();
    for name in ["team.txt", " .csv", "FC.csv"] {
        assert!(
            matches!(
                store.save_team_csv("liga", name, b"a\n1\n"),
                Err(StoreError::InvalidInput(_))
            ),
            "{name} should be rejected"
        );
    }
    assert!(store.list_teams("liga").unwrap().is_empty());
}

#[test]
fn unknown_team_is_not_found() {
    let (_tmp, store) = scratch_store();
    store.create_league("Liga").unwrap();
    store.save_team_csv("liga", "Porto.csv", b"a\n1\n").unwrap();
    let err = store.find_team_file("liga", "Benfica").unwrap_err();
    assert!(matches!(err, StoreError::NotFound(ref msg) if msg.contains("Benfica")));
}
