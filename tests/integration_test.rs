mod common;

use common::{open_test_store, signup};
use skillshare_lib::libs::storage::storage_sqlite::{SqliteTransaction, USERS_KEY};
use skillshare_lib::{ContactRole, RequestStatus, SkillShare, StoreError, Transactional};
use tempfile::TempDir;

// Full walkthrough: A signs up, B signs up and lists Cooking, A requests it,
// B accepts, both sides end up with each other's contact details.
#[test]
fn accepted_request_shares_contacts_both_ways() {
    let (_dir, app) = open_test_store();

    let alice = signup(&app, "Alice");
    let bob = signup(&app, "Bob");
    app.add_skill(&bob.id, "Cooking").expect("Failed to add skill");

    let request = app
        .add_learn_request(&alice.id, &bob.id, "Cooking")
        .expect("Failed to create request");

    let inbox = app
        .pending_requests_for(&bob.id)
        .expect("Failed to load inbox");
    assert_eq!(inbox.len(), 1);

    app.update_learn_request(&request.id, RequestStatus::Accepted)
        .expect("Failed to accept request");

    let alice_contacts = app.user_contacts(&alice.id).expect("Failed to load contacts");
    assert_eq!(alice_contacts.len(), 1);
    assert_eq!(alice_contacts[0].role, ContactRole::Teacher);
    assert_eq!(alice_contacts[0].skill, "Cooking");
    assert_eq!(alice_contacts[0].contact_user_id, bob.id);

    let learners = app
        .previous_learners(&bob.id, "Cooking")
        .expect("Failed to load learners");
    assert_eq!(learners.len(), 1);
    let learner = learners[0]
        .learner_user
        .as_ref()
        .expect("Learner join should resolve");
    assert_eq!(learner.id, alice.id);

    // The learner roster is per skill.
    assert!(app
        .previous_learners(&bob.id, "Guitar")
        .expect("Failed to load learners")
        .is_empty());
}

#[test]
fn session_survives_across_handles_on_the_same_file() {
    let dir = TempDir::new().expect("Failed to create test directory");
    let db_path = dir.path().join("skillshare.db");
    let path = db_path.to_str().expect("Non UTF-8 test db path");

    let first = SkillShare::open(path).expect("Failed to open store");
    let alice = signup(&first, "Alice");
    first
        .login("alice@example.com", "hunter2")
        .expect("Failed to log in");
    drop(first);

    let second = SkillShare::open(path).expect("Failed to reopen store");
    let session = second
        .current_user()
        .expect("Failed to read session")
        .expect("Session should rehydrate from storage");
    assert_eq!(session, alice);
}

#[test]
fn malformed_stored_collection_is_an_error_not_empty() {
    let (_dir, app) = open_test_store();
    signup(&app, "Alice");

    // Corrupt the users collection behind the typed layer.
    {
        let store = skillshare_lib::libs::storage::database::initialize_database(
            app_db_path(&_dir).as_str(),
        )
        .expect("Failed to reopen store");
        let mut connection = store.new_connection().expect("Failed to get connection");
        let mut tx = SqliteTransaction::new(&mut connection).expect("Failed to start transaction");
        tx.set_value(USERS_KEY, "{not json").expect("Failed to corrupt value");
        tx.commit().expect("Failed to commit");
    }

    let result = app.load_users();
    assert!(matches!(result, Err(StoreError::Serialisation(_))));
}

fn app_db_path(dir: &TempDir) -> String {
    dir.path()
        .join("skillshare.db")
        .to_str()
        .expect("Non UTF-8 test db path")
        .to_string()
}
