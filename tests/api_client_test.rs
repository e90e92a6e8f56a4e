mod common;
use common::utils::{seed_session, seed_workout, spawn_app};

use workout_tracker::client::{ApiClient, ClientError, Credentials, TrackerApi};
use workout_tracker::flows::log::{LabelChoice, LogFlow, LogState, SessionForm};
use workout_tracker::flows::progress::{ProgressFlow, ProgressView};
use workout_tracker::models::session::NewSessionRequest;

fn squat_request(value: f64, label: &str) -> NewSessionRequest {
    NewSessionRequest {
        workout_id: "squat".to_string(),
        value,
        label: label.to_string(),
        successful: true,
        description: None,
    }
}

#[tokio::test]
async fn client_reads_workouts_and_sessions() {
    let test_app = spawn_app().await;
    seed_workout(&test_app.db_pool, "squat", "Back squat", "kg", "reps").await;
    seed_session(&test_app.db_pool, "squat", 100.0, Some("5x5"), "2024-01-01").await;
    let client = &test_app.api_client;

    let workouts = client.get_workouts().await.expect("Failed to fetch workouts");
    let sessions = client.get_sessions("squat").await.expect("Failed to fetch sessions");

    assert_eq!(workouts.len(), 1);
    assert_eq!(workouts[0].label_unit, "reps");
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].label.as_deref(), Some("5x5"));
}

#[tokio::test]
async fn client_writes_with_credentials() {
    let test_app = spawn_app().await;
    seed_workout(&test_app.db_pool, "squat", "Back squat", "kg", "reps").await;
    let client = &test_app.api_client;

    let session = client
        .add_session(&squat_request(110.0, "3x3"))
        .await
        .expect("Failed to add session");

    assert_eq!(session.value, 110.0);
    assert_eq!(client.get_sessions("squat").await.unwrap(), vec![session]);
}

#[tokio::test]
async fn client_error_hides_server_detail() {
    let test_app = spawn_app().await;
    seed_workout(&test_app.db_pool, "squat", "Back squat", "kg", "reps").await;
    let bad_key = ApiClient::new(&test_app.address, Credentials::new("wrong"));
    let good_key = &test_app.api_client;

    let unauthorized = bad_key.add_session(&squat_request(1.0, "5x5")).await;
    let invalid = good_key.add_session(&squat_request(1.0, "")).await;

    // Both failures look the same to the caller
    for result in [unauthorized, invalid] {
        match result {
            Err(ClientError::RequestFailed(message)) => assert_eq!(message, "Failed to add session"),
            other => panic!("expected a request failure, got {:?}", other),
        }
    }
}

#[tokio::test]
async fn logging_flow_round_trip_feeds_the_progress_chart() {
    let test_app = spawn_app().await;
    seed_workout(&test_app.db_pool, "squat", "Back squat", "kg", "reps").await;
    seed_session(&test_app.db_pool, "squat", 100.0, Some("5x5"), "2024-01-01").await;
    let client = &test_app.api_client;

    let mut log = LogFlow::new();
    log.load_labels(client, "squat").await.unwrap();
    assert_eq!(log.labels(), Some(&["5x5".to_string()][..]));

    log.choose_label(LabelChoice::New);
    log.submit(
        client,
        SessionForm {
            value: 60.0,
            new_label: Some("1x10".to_string()),
            successful: false,
            description: Some("Deload".to_string()),
        },
    )
    .await
    .expect("Failed to log session");
    assert_eq!(log.state(), &LogState::Idle);

    let mut progress = ProgressFlow::new();
    progress.load_workouts(client).await.unwrap();
    assert!(progress.show(client, "squat").await);

    match progress.view() {
        ProgressView::Chart(chart) => {
            assert_eq!(chart.y_axis_title, "kg");
            assert_eq!(chart.axis.len(), 2);
            assert_eq!(chart.series.len(), 2);
            let deload = chart.series.iter().find(|s| s.key == "1x10").unwrap();
            assert_eq!(deload.name, "1x10 reps");
            assert!(deload.points[0].is_gap());
            assert_eq!(deload.points[1].tooltip_lines(), vec!["Deload"]);
        }
        other => panic!("expected a chart, got {:?}", other),
    }
}

#[tokio::test]
async fn client_built_from_configuration_targets_the_server() {
    let test_app = spawn_app().await;
    seed_workout(&test_app.db_pool, "squat", "Back squat", "kg", "reps").await;

    assert_eq!(test_app.api_client.base_url(), test_app.address);
    let created = test_app
        .api_client
        .add_session(&squat_request(95.0, "5x5"))
        .await
        .expect("Configured credentials should be accepted");
    assert_eq!(created.workout_id, "squat");
}

#[tokio::test]
async fn workout_ids_with_reserved_characters_reach_their_sessions() {
    let test_app = spawn_app().await;
    let workout_id = "bench?incline#2";
    seed_workout(&test_app.db_pool, workout_id, "Incline bench", "kg", "reps").await;
    seed_workout(&test_app.db_pool, "bench", "Bench press", "kg", "reps").await;
    seed_session(&test_app.db_pool, workout_id, 60.0, Some("3x8"), "2024-01-01").await;
    seed_session(&test_app.db_pool, "bench", 80.0, Some("5x5"), "2024-01-01").await;

    let sessions = test_app
        .api_client
        .get_sessions(workout_id)
        .await
        .expect("Failed to fetch sessions");

    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].workout_id, workout_id);
    assert_eq!(sessions[0].value, 60.0);
}
