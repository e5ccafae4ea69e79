//! End-to-end library workflows through the session gate

use musicverse_applications::{
    ApplicationError, FilterUpdate, GroupBy, MusicApp, NewSong, SortBy, SortOrder,
};
use musicverse_core::{MusicverseConfig, MusicverseError, SlotBacking};

fn memory_config() -> MusicverseConfig {
    let mut config = MusicverseConfig::default();
    config.session.storage = SlotBacking::Memory;
    config
}

fn file_config(dir: &std::path::Path) -> MusicverseConfig {
    let mut config = MusicverseConfig::default();
    config.storage.data_dir = dir.to_string_lossy().into_owned();
    config
}

fn new_song(title: &str) -> NewSong {
    NewSong {
        title: title.to_string(),
        artist: "Nina Simone".to_string(),
        album: "I Put a Spell on You".to_string(),
        duration: "2:55".to_string(),
        genre: "Jazz".to_string(),
        year: 1965,
        cover_url: None,
    }
}

#[test]
fn test_library_requires_login() {
    let mut app = MusicApp::start(&memory_config()).unwrap();
    assert!(!app.is_authenticated());

    assert!(matches!(app.library(), Err(ApplicationError::NotAuthenticated)));
    assert!(matches!(
        app.update_filters(FilterUpdate::new().search("x")),
        Err(ApplicationError::NotAuthenticated)
    ));
    assert!(matches!(
        app.add_song(new_song("Feeling Good")),
        Err(ApplicationError::NotAuthenticated)
    ));

    assert!(app.login("user@musicverse.com", "user123"));
    let page = app.library().unwrap();
    assert_eq!(page.total_songs, 10);
    assert_eq!(page.view.songs.len(), 10);
    assert_eq!(page.stats.unique_genres, 6);
}

#[test]
fn test_regular_user_cannot_edit() {
    let mut app = MusicApp::start(&memory_config()).unwrap();
    assert!(app.login("user@musicverse.com", "user123"));
    assert!(!app.is_admin());

    assert!(matches!(
        app.add_song(new_song("Feeling Good")),
        Err(ApplicationError::Permission { .. })
    ));
    assert!(matches!(
        app.remove_song("1"),
        Err(ApplicationError::Permission { .. })
    ));
    assert_eq!(app.catalog().total_songs(), 10);

    // Viewing operations are still allowed
    app.update_filters(FilterUpdate::new().genre("Pop")).unwrap();
    assert_eq!(app.library().unwrap().view.songs.len(), 3);
}

#[test]
fn test_admin_adds_and_removes() {
    let mut app = MusicApp::start(&memory_config()).unwrap();
    assert!(app.login("admin@musicverse.com", "admin123"));

    let added = app.add_song(new_song("Feeling Good")).unwrap();
    assert_eq!(added.id, "11");
    assert!(app.catalog().get("11").is_some());
    assert!(app.genre_options().unwrap().contains(&"Jazz".to_string()));
    assert!(app.unique_genres().unwrap().contains(&"Jazz".to_string()));

    app.update_filters(FilterUpdate::new().genre("Jazz")).unwrap();
    let page = app.library().unwrap();
    assert_eq!(page.view.songs.len(), 1);
    assert_eq!(page.stats.most_popular_genre, "Jazz");

    assert!(app.remove_song(&added.id).unwrap());
    assert!(!app.remove_song(&added.id).unwrap());
    assert!(app.library().unwrap().view.is_empty());
}

#[test]
fn test_add_rejects_missing_fields() {
    let mut app = MusicApp::start(&memory_config()).unwrap();
    assert!(app.login("admin@musicverse.com", "admin123"));

    let incomplete = NewSong {
        album: String::new(),
        ..new_song("Feeling Good")
    };
    match app.add_song(incomplete) {
        Err(ApplicationError::Validation { field, .. }) => assert_eq!(field, "album"),
        other => panic!("expected validation error, got {:?}", other),
    }
    assert_eq!(app.catalog().total_songs(), 10);
}

#[test]
fn test_filters_survive_changes_and_clear() {
    let mut app = MusicApp::start(&memory_config()).unwrap();
    assert!(app.login("user@musicverse.com", "user123"));

    app.update_filters(FilterUpdate::new().sort_by(SortBy::Year).group_by(GroupBy::Genre))
        .unwrap();
    app.toggle_sort_order().unwrap();

    let filters = app.filters().unwrap();
    assert_eq!(filters.sort_by, SortBy::Year);
    assert_eq!(filters.sort_order, SortOrder::Desc);
    assert_eq!(filters.group_by, GroupBy::Genre);

    let page = app.library().unwrap();
    assert_eq!(page.view.groups[0].label, "Hip Hop");
    assert_eq!(page.view.songs[0].title, "Lose Yourself");

    app.clear_filters().unwrap();
    let page = app.library().unwrap();
    assert_eq!(page.view.groups.len(), 1);
    assert_eq!(page.view.songs[0].title, "Billie Jean");
}

#[test]
fn test_logout_closes_the_library() {
    let mut app = MusicApp::start(&memory_config()).unwrap();
    assert!(app.login("admin@musicverse.com", "admin123"));
    app.logout();

    assert!(app.current_user().is_none());
    assert!(matches!(app.library(), Err(ApplicationError::NotAuthenticated)));
    app.logout();
}

#[test]
fn test_session_carries_over_between_starts() {
    let dir = tempfile::tempdir().unwrap();
    let config = file_config(dir.path());

    let mut first = MusicApp::start(&config).unwrap();
    assert!(first.login("admin@musicverse.com", "admin123"));
    first.add_song(new_song("Feeling Good")).unwrap();

    let second = MusicApp::start(&config).unwrap();
    assert!(second.is_admin());
    assert_eq!(second.current_user().map(|u| u.name.as_str()), Some("Admin User"));
    // The catalog itself is not persisted
    assert_eq!(second.catalog().total_songs(), 10);
}

#[test]
fn test_empty_catalog_start() {
    let mut config = memory_config();
    config.catalog.seed_on_start = false;

    let mut app = MusicApp::start(&config).unwrap();
    assert!(app.login("user@musicverse.com", "user123"));

    let page = app.library().unwrap();
    assert_eq!(page.total_songs, 0);
    assert_eq!(page.stats.most_popular_genre, "None");
    assert_eq!(page.view.groups.len(), 1);
    assert_eq!(page.view.groups[0].label, "All Songs");
}

#[test]
fn test_start_rejects_invalid_config() {
    let mut config = memory_config();
    config.session.lifetime_hours = u32::MAX;

    match MusicApp::start(&config) {
        Err(ApplicationError::Core(MusicverseError::Validation { field, .. })) => {
            assert_eq!(field.as_deref(), Some("session.lifetime_hours"));
        }
        Err(other) => panic!("expected core validation error, got {:?}", other),
        Ok(_) => panic!("expected core validation error, got a running app"),
    }

    config.session.lifetime_hours = 1;
    config.session.storage_key = "  ".to_string();
    assert!(matches!(
        MusicApp::start(&config),
        Err(ApplicationError::Core(_))
    ));
}
