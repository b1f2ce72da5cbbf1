mod common;

use common::{open_test_store, signup};
use skillshare_lib::{StoreError, UserUpdate};

#[test]
fn signup_rejects_duplicate_email() {
    let (_dir, app) = open_test_store();

    app.signup("Alice", "alice@example.com", "secret")
        .expect("First signup should succeed");
    let result = app.signup("Other Alice", "alice@example.com", "different");

    assert!(matches!(result, Err(StoreError::DuplicateEmail)));
    let users = app.load_users().expect("Failed to load users");
    assert_eq!(users.len(), 1, "Failed signup must not grow the collection");
}

#[test]
fn signup_assigns_id_and_empty_skills() {
    let (_dir, app) = open_test_store();

    let alice = signup(&app, "Alice");
    let bob = signup(&app, "Bob");

    assert!(!alice.id.is_empty());
    assert_ne!(alice.id, bob.id);
    assert!(alice.skills.is_empty());
}

#[test]
fn login_requires_exact_credentials() {
    let (_dir, app) = open_test_store();
    app.signup("Alice", "alice@example.com", "secret")
        .expect("Failed to sign up");

    let wrong_password = app.login("alice@example.com", "guess");
    assert!(matches!(wrong_password, Err(StoreError::InvalidCredentials)));

    let unknown_email = app.login("nobody@example.com", "secret");
    assert!(matches!(unknown_email, Err(StoreError::InvalidCredentials)));

    let user = app
        .login("alice@example.com", "secret")
        .expect("Exact credentials should log in");
    assert_eq!(user.email, "alice@example.com");
}

#[test]
fn login_persists_session_and_logout_clears_it() {
    let (_dir, app) = open_test_store();
    let alice = signup(&app, "Alice");

    assert!(app.current_user().expect("Failed to read session").is_none());

    app.login("alice@example.com", "hunter2")
        .expect("Failed to log in");
    let session = app
        .current_user()
        .expect("Failed to read session")
        .expect("Session should be set after login");
    assert_eq!(session, alice);

    app.logout().expect("Failed to log out");
    assert!(app.current_user().expect("Failed to read session").is_none());
}

#[test]
fn update_user_merges_fields_and_refreshes_session() {
    let (_dir, app) = open_test_store();
    let alice = signup(&app, "Alice");
    app.login("alice@example.com", "hunter2")
        .expect("Failed to log in");

    let updated = app
        .update_user(
            &alice.id,
            UserUpdate {
                name: Some("Alice Cooper".to_string()),
                ..UserUpdate::default()
            },
        )
        .expect("Failed to update user");

    assert_eq!(updated.name, "Alice Cooper");
    assert_eq!(updated.email, alice.email, "Absent fields keep their value");

    let session = app
        .current_user()
        .expect("Failed to read session")
        .expect("Session should survive the update");
    assert_eq!(session.name, "Alice Cooper");
}

#[test]
fn update_user_on_missing_id_is_not_found() {
    let (_dir, app) = open_test_store();
    signup(&app, "Alice");

    let result = app.update_user("no-such-id", UserUpdate::default());
    assert!(matches!(result, Err(StoreError::NotFound { .. })));
}

#[test]
fn skills_keep_insertion_order_and_reject_duplicates() {
    let (_dir, app) = open_test_store();
    let alice = signup(&app, "Alice");

    app.add_skill(&alice.id, "Guitar").expect("Failed to add skill");
    let alice = app.add_skill(&alice.id, "Cooking").expect("Failed to add skill");
    assert_eq!(alice.skills, vec!["Guitar", "Cooking"]);

    let duplicate = app.add_skill(&alice.id, "Guitar");
    assert!(matches!(duplicate, Err(StoreError::DuplicateSkill)));

    let alice = app
        .remove_skill(&alice.id, "Guitar")
        .expect("Failed to remove skill");
    assert_eq!(alice.skills, vec!["Cooking"]);
}

#[test]
fn search_matches_name_or_skill_and_excludes_viewer() {
    let (_dir, app) = open_test_store();
    let alice = signup(&app, "Alice");
    let bob = signup(&app, "Bob");
    let carol = signup(&app, "Carol");
    app.add_skill(&bob.id, "Guitar").expect("Failed to add skill");
    app.add_skill(&carol.id, "Cooking").expect("Failed to add skill");

    let everyone = app
        .search_users(&alice.id, "  ")
        .expect("Failed to search users");
    assert_eq!(everyone.len(), 2, "Blank term lists all other users");

    let by_skill = app
        .search_users(&alice.id, "guitar")
        .expect("Failed to search users");
    assert_eq!(by_skill.len(), 1);
    assert_eq!(by_skill[0].id, bob.id);

    let by_name = app
        .search_users(&bob.id, "CAROL")
        .expect("Failed to search users");
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].id, carol.id);

    let own_name = app
        .search_users(&alice.id, "alice")
        .expect("Failed to search users");
    assert!(own_name.is_empty(), "The viewer never matches themselves");
}
