mod common;

use std::sync::Arc;

use hr_server::db::repository::UserRepository;
use hr_server::services::RecordingMailer;
use hr_server::{Config, ServerState};
use shared::Role;

#[tokio::test]
async fn test_rocksdb_start_seeds_admin_once() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = Config {
        database_path: dir.path().join("hr.db").to_string_lossy().into_owned(),
        ..Config::for_tests()
    };

    let state = ServerState::initialize_with_mailer(&config, Arc::new(RecordingMailer::new()))
        .await
        .expect("state");
    hr_server::services::seed::ensure_super_admin(&state)
        .await
        .expect("second seed");

    let users = UserRepository::new(state.get_db());
    assert_eq!(users.count_with_role(Role::SuperAdmin).await.expect("count"), 1);
    let admin = users
        .find_by_email(common::ADMIN_EMAIL)
        .await
        .expect("lookup")
        .expect("admin");
    assert!(!admin.must_change_password);
}
