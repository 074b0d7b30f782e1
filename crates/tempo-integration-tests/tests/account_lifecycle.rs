//! Integration test: full account lifecycle over a real SQLite store.
//!
//! Exercises the complete first-run flow the UI drives:
//! 1. Open a fresh database and run the layout migration
//! 2. Verify the bootstrap admin account
//! 3. Register, log in with remember-me, read the composite view back
//! 4. Walk the start-route state machine through onboarding and logout
//! 5. Reopen a file-backed store and prove everything persisted
//!
//! Uses only the library crates (tempo-db, tempo-accounts, tempo-types)
//! without requiring a running daemon process.

use std::sync::Arc;

use tempo_accounts::{migrate, AccountManager, PrefStore, SqlitePrefs};
use tempo_types::StartRoute;

/// Open a migrated, in-memory account manager.
fn open_manager() -> AccountManager {
    let conn = tempo_db::open_memory().expect("In-memory DB should open");
    let store: Arc<dyn PrefStore> = Arc::new(SqlitePrefs::new(conn));
    migrate::migrate_legacy(store.as_ref()).expect("Migration should succeed");
    AccountManager::new(store).expect("Account manager should build")
}

#[test]
#[ignore]
fn fresh_store_first_run_flow() {
    // =========================================================
    // Step 1: Fresh store contains exactly the admin account
    // =========================================================
    let accounts = open_manager();
    assert_eq!(
        accounts.list_users().expect("Listing should succeed"),
        ["admin"],
        "A fresh store must contain exactly the admin account"
    );

    // =========================================================
    // Step 2: Register and log in
    // =========================================================
    accounts
        .register("alice", "pw12")
        .expect("Registration should succeed");
    assert_eq!(
        accounts.session().current_user().expect("Read should succeed"),
        None,
        "Registration must not log the user in"
    );

    accounts
        .login("alice", "pw12", true)
        .expect("Login should succeed");

    // =========================================================
    // Step 3: Read the composite view back
    // =========================================================
    let view = accounts
        .current_user_view()
        .expect("View read should succeed")
        .expect("A logged-in user must have a view");
    assert_eq!(view.username, "alice");
    assert!(!view.is_admin, "alice must not carry the admin flag");
    assert_eq!(view.bio, "", "Bio defaults to empty");
    assert_eq!(view.avatar_seed, "alice", "Seed defaults to the username");
    assert!(
        view.avatar_url.contains("seed=alice"),
        "Avatar URL must be derived from the seed"
    );

    // =========================================================
    // Step 4: Logout clears user and remember-me together
    // =========================================================
    accounts.logout().expect("Logout should succeed");
    assert_eq!(
        accounts.session().current_user().expect("Read should succeed"),
        None
    );
    assert!(
        !accounts.session().remember_me().expect("Read should succeed"),
        "Logout must clear the remember flag"
    );
}

#[test]
#[ignore]
fn start_route_state_machine() {
    let accounts = open_manager();

    // Onboarding wins over everything, even a remembered session.
    accounts.register("alice", "pw12").expect("Registration should succeed");
    accounts.login("alice", "pw12", true).expect("Login should succeed");
    assert_eq!(
        accounts.start_route().expect("Route should resolve"),
        StartRoute::Onboarding,
        "First launch must win over a remembered session"
    );

    accounts
        .session()
        .complete_onboarding()
        .expect("Onboarding completion should succeed");
    assert_eq!(
        accounts.start_route().expect("Route should resolve"),
        StartRoute::Home,
        "A remembered session lands on Home after onboarding"
    );

    accounts.logout().expect("Logout should succeed");
    assert_eq!(
        accounts.start_route().expect("Route should resolve"),
        StartRoute::Login,
        "Logged out and onboarded lands on Login"
    );

    // Logging in without remember-me still lands on Login next time.
    accounts.login("alice", "pw12", false).expect("Login should succeed");
    assert_eq!(
        accounts.start_route().expect("Route should resolve"),
        StartRoute::Login,
        "Without remember-me there is no auto-login"
    );
}

#[test]
#[ignore]
fn admin_account_management_flow() {
    let accounts = open_manager();

    accounts
        .update_password("admin", "s3cure")
        .expect("Password update should succeed");
    assert!(
        accounts.login("admin", "admin", false).is_err(),
        "The old admin password must stop working"
    );
    accounts
        .login("admin", "s3cure", false)
        .expect("The new admin password must work");

    // The admin account cannot be deleted through the facade.
    assert!(
        accounts.delete_user("admin").is_err(),
        "Deleting admin must be refused"
    );
    assert!(
        accounts
            .credentials()
            .exists("admin")
            .expect("Existence check should succeed"),
        "admin must survive the refused delete"
    );

    // Deleting a normal account leaves the session pointing at nothing.
    accounts.register("carol", "pw").expect("Registration should succeed");
    accounts.login("carol", "pw", false).expect("Login should succeed");
    accounts.delete_user("carol").expect("Delete should succeed");
    assert!(
        accounts
            .current_user_view()
            .expect("View read should succeed")
            .is_none(),
        "A deleted account reads as logged out"
    );
}

#[test]
#[ignore]
fn file_backed_store_survives_reopen() {
    let db_path = std::env::temp_dir().join(format!(
        "tempo-lifecycle-{}.db",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&db_path);

    // First "launch": migrate, register, write a profile.
    {
        let conn = tempo_db::open(&db_path).expect("File DB should open");
        let store: Arc<dyn PrefStore> = Arc::new(SqlitePrefs::new(conn));
        migrate::migrate_legacy(store.as_ref()).expect("Migration should succeed");
        let accounts = AccountManager::new(store).expect("Account manager should build");

        accounts.register("dave", "pw").expect("Registration should succeed");
        accounts.update_bio("dave", "drummer").expect("Bio update should succeed");
        accounts.login("dave", "pw", true).expect("Login should succeed");
        accounts
            .session()
            .complete_onboarding()
            .expect("Onboarding completion should succeed");
    }

    // Second "launch": everything written above must still be there.
    {
        let conn = tempo_db::open(&db_path).expect("File DB should reopen");
        let store: Arc<dyn PrefStore> = Arc::new(SqlitePrefs::new(conn));
        migrate::migrate_legacy(store.as_ref()).expect("Migration should stay idempotent");
        let accounts = AccountManager::new(store).expect("Account manager should rebuild");

        let view = accounts
            .user_view("dave")
            .expect("View read should succeed")
            .expect("dave must survive the restart");
        assert_eq!(view.bio, "drummer", "Profile must survive the restart");

        assert_eq!(
            accounts.start_route().expect("Route should resolve"),
            StartRoute::Home,
            "A remembered session must auto-login across restarts"
        );
    }

    let _ = std::fs::remove_file(&db_path);
}
