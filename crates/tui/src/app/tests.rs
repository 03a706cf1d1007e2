use std::time::Duration;

use serde_json::{Value, json};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path},
};

use super::*;
use crate::app::{forms::SalaryField, gate::AuthState};

async fn app_for(server: &MockServer, session: &SessionStore) -> App {
    let config = AppConfig {
        base_url: format!("{}/api", server.uri()),
        refresh_on_unauthorized: false,
        ..AppConfig::default()
    };
    App::new(&config, session.clone()).unwrap()
}

async fn signed_in(server: &MockServer) -> (App, SessionStore) {
    let session = SessionStore::in_memory();
    session.set("acc", Some("ref")).await.unwrap();
    let mut app = app_for(server, &session).await;
    app.state.gate.resolve(true);
    (app, session)
}

fn member(household: Value) -> Value {
    json!({ "id": 1, "name": "ana", "household": household, "balance": "12.50" })
}

async fn mount_get(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_household(server: &MockServer) {
    mount_get(server, "/api/members/me/", member(json!({ "id": 7, "name": "Smiths" }))).await;
}

fn movement(id: i64, date: &str) -> Value {
    json!({
        "id": id,
        "amount": "10.00",
        "member": { "id": 1, "name": "ana" },
        "category": { "id": 3, "name": "Groceries" },
        "date": date,
        "description": null
    })
}

async fn requested_paths(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|request| format!("{} {}", request.method, request.url.path()))
        .collect()
}

#[tokio::test]
async fn protected_route_without_token_never_hits_the_network() {
    let server = MockServer::start().await;
    let session = SessionStore::in_memory();
    let mut app = app_for(&server, &session).await;

    app.start().await;
    assert_eq!(app.state.route, Route::Auth);

    app.navigate(Route::Movements);
    app.settle().await;

    assert_eq!(app.state.route, Route::Auth);
    assert!(requested_paths(&server).await.is_empty());
}

#[tokio::test]
async fn login_stores_tokens_and_opens_dashboard() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token/"))
        .and(body_json(json!({ "username": "ana", "password": "pw" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "access": "acc", "refresh": "ref" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_household(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/movements/"))
        .and(header("authorization", "Bearer acc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    mount_get(&server, "/api/categories/", json!([])).await;
    mount_get(&server, "/api/members/", json!([])).await;
    mount_get(&server, "/api/members/detailed_balances/", json!([])).await;

    let session = SessionStore::in_memory();
    let mut app = app_for(&server, &session).await;
    app.start().await;
    for ch in "ana".chars() {
        app.handle_action(AppAction::Input(ch)).await;
    }
    app.handle_action(AppAction::NextField).await;
    for ch in "pw".chars() {
        app.handle_action(AppAction::Input(ch)).await;
    }
    app.handle_action(AppAction::Submit).await;
    app.settle().await;

    assert_eq!(app.state.route, Route::Dashboard);
    assert!(app.state.gate.is_authenticated());
    assert!(app.state.auth.password.is_empty());
    assert_eq!(session.access_token().await.as_deref(), Some("acc"));
    assert_eq!(session.refresh_token().await.as_deref(), Some("ref"));
    assert_eq!(app.state.household.household_name(), Some("Smiths"));
}

#[tokio::test]
async fn rejected_login_keeps_the_form() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "detail": "nope" })))
        .mount(&server)
        .await;

    let session = SessionStore::in_memory();
    let mut app = app_for(&server, &session).await;
    app.start().await;
    app.state.auth.username = "ana".to_string();
    app.state.auth.password = "wrong".to_string();
    app.handle_action(AppAction::Submit).await;
    app.settle().await;

    assert_eq!(app.state.route, Route::Auth);
    assert_eq!(
        app.state.auth.message.as_deref(),
        Some("Invalid username or password")
    );
    assert!(!app.state.auth.loading);
    assert_eq!(session.get().await, None);
}

#[tokio::test]
async fn register_signs_in_afterwards() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/register/"))
        .and(body_json(
            json!({ "username": "bo", "email": "bo@example.com", "password": "pw" }),
        ))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 2 })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/token/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "access": "new", "refresh": "r" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_get(&server, "/api/members/me/", member(Value::Null)).await;

    let session = SessionStore::in_memory();
    let mut app = app_for(&server, &session).await;
    app.start().await;
    app.handle_action(AppAction::ToggleMode).await;
    app.state.auth.username = "bo".to_string();
    app.state.auth.email = "bo@example.com".to_string();
    app.state.auth.password = "pw".to_string();
    app.handle_action(AppAction::Submit).await;
    app.settle().await;

    assert_eq!(app.state.route, Route::Dashboard);
    assert_eq!(session.access_token().await.as_deref(), Some("new"));
    assert!(app.state.household.modal.is_some());
}

#[tokio::test]
async fn typing_q_on_the_auth_screen_does_not_quit() {
    let server = MockServer::start().await;
    let session = SessionStore::in_memory();
    let mut app = app_for(&server, &session).await;
    app.start().await;

    app.handle_action(AppAction::Input('q')).await;
    assert!(!app.should_quit);
    assert_eq!(app.state.auth.username, "q");
}

#[tokio::test]
async fn missing_household_gates_data_until_created() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/members/me/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(member(Value::Null)))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    let no_movements = Mock::given(method("GET"))
        .and(path("/api/movements/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount_as_scoped(&server)
        .await;

    let (mut app, _session) = signed_in(&server).await;
    app.navigate(Route::Dashboard);
    app.settle().await;

    assert_eq!(app.state.household.status, HouseholdStatus::Missing);
    assert!(app.state.household.modal.is_some());
    assert_eq!(requested_paths(&server).await, vec!["GET /api/members/me/"]);
    drop(no_movements);

    // Empty name is rejected locally.
    app.handle_action(AppAction::Submit).await;
    assert_eq!(
        app.state.household.modal.as_ref().and_then(|modal| modal.error.as_deref()),
        Some("Please enter a household name")
    );

    Mock::given(method("POST"))
        .and(path("/api/households/"))
        .and(body_json(json!({ "name": "Smiths" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 7, "name": "Smiths" })))
        .expect(1)
        .mount(&server)
        .await;
    mount_household(&server).await;
    mount_get(&server, "/api/movements/", json!([])).await;
    mount_get(&server, "/api/categories/", json!([])).await;
    mount_get(&server, "/api/members/", json!([])).await;
    mount_get(&server, "/api/members/detailed_balances/", json!([])).await;

    for ch in "Smiths".chars() {
        app.handle_action(AppAction::Input(ch)).await;
    }
    app.handle_action(AppAction::Submit).await;
    app.settle().await;

    assert!(app.state.household.modal.is_none());
    assert_eq!(app.state.household.status, HouseholdStatus::Present);
    let paths = requested_paths(&server).await;
    for expected in [
        "GET /api/movements/",
        "GET /api/categories/",
        "GET /api/members/",
        "GET /api/members/detailed_balances/",
    ] {
        assert!(paths.iter().any(|seen| seen == expected), "missing {expected}");
    }
}

#[tokio::test]
async fn failed_join_shows_generic_message() {
    let server = MockServer::start().await;
    mount_get(&server, "/api/members/me/", member(Value::Null)).await;
    Mock::given(method("POST"))
        .and(path("/api/households/join/"))
        .and(body_json(json!({ "name": "Nobody" })))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let (mut app, _session) = signed_in(&server).await;
    app.navigate(Route::Analytics);
    app.settle().await;

    app.handle_action(AppAction::NextField).await;
    for ch in "Nobody".chars() {
        app.handle_action(AppAction::Input(ch)).await;
    }
    app.handle_action(AppAction::Submit).await;
    app.settle().await;

    let modal = app.state.household.modal.as_ref().unwrap();
    assert_eq!(modal.mode, HouseholdMode::Join);
    assert!(!modal.saving);
    assert_eq!(
        modal.error.as_deref(),
        Some("Failed to join household. Please check the name and try again.")
    );

    app.handle_action(AppAction::Cancel).await;
    assert!(app.state.household.modal.is_none());
    app.handle_action(AppAction::Input('o')).await;
    assert!(app.state.household.modal.is_some());
}

#[tokio::test]
async fn creating_a_movement_posts_and_refetches() {
    let server = MockServer::start().await;
    mount_household(&server).await;
    mount_get(&server, "/api/categories/", json!([{ "id": 3, "name": "Groceries" }])).await;
    Mock::given(method("GET"))
        .and(path("/api/movements/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/movements/"))
        .and(body_json(json!({
            "amount": 42.5,
            "date": "2024-03-01",
            "category_id": 3,
            "description": ""
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 11 })))
        .expect(1)
        .mount(&server)
        .await;

    let (mut app, _session) = signed_in(&server).await;
    app.navigate(Route::Movements);
    app.settle().await;

    app.handle_action(AppAction::Input('n')).await;
    let form = app.state.movements.form.as_mut().unwrap();
    form.amount = "42.50".to_string();
    form.date = "2024-03-01".to_string();
    form.category.select_id(Some(3));
    app.handle_action(AppAction::Submit).await;
    assert!(app.state.movements.form.as_ref().unwrap().saving);
    app.settle().await;

    assert!(app.state.movements.form.is_none());
    assert!(app.state.movements.table.error.is_none());
}

#[tokio::test]
async fn movement_submit_is_disabled_without_category() {
    let server = MockServer::start().await;
    mount_household(&server).await;
    mount_get(&server, "/api/categories/", json!([])).await;
    mount_get(&server, "/api/movements/", json!([])).await;
    Mock::given(method("POST"))
        .and(path("/api/movements/"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let (mut app, _session) = signed_in(&server).await;
    app.navigate(Route::Movements);
    app.settle().await;

    app.handle_action(AppAction::Input('n')).await;
    app.handle_action(AppAction::Input('5')).await;
    app.handle_action(AppAction::Submit).await;
    app.settle().await;

    let form = app.state.movements.form.as_ref().unwrap();
    assert_eq!(form.amount, "5");
    assert!(!form.can_submit());
}

#[tokio::test]
async fn server_rejection_stays_in_the_dialog() {
    let server = MockServer::start().await;
    mount_household(&server).await;
    mount_get(&server, "/api/categories/", json!([{ "id": 3, "name": "Groceries" }])).await;
    mount_get(&server, "/api/movements/", json!([])).await;
    Mock::given(method("POST"))
        .and(path("/api/movements/"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "amount": ["Too large."] })),
        )
        .mount(&server)
        .await;

    let (mut app, _session) = signed_in(&server).await;
    app.navigate(Route::Movements);
    app.settle().await;

    app.handle_action(AppAction::Input('n')).await;
    let form = app.state.movements.form.as_mut().unwrap();
    form.amount = "99999999".to_string();
    form.category.select_id(Some(3));
    app.handle_action(AppAction::Submit).await;
    app.settle().await;

    let form = app.state.movements.form.as_ref().unwrap();
    assert!(!form.saving);
    assert_eq!(form.error.as_deref(), Some("amount: Too large."));
}

#[tokio::test]
async fn unauthorized_response_clears_session_and_returns_to_auth() {
    let server = MockServer::start().await;
    mount_household(&server).await;
    mount_get(&server, "/api/categories/", json!([])).await;
    Mock::given(method("GET"))
        .and(path("/api/movements/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "detail": "expired" })))
        .mount(&server)
        .await;

    let (mut app, session) = signed_in(&server).await;
    app.navigate(Route::Movements);
    app.settle().await;

    assert_eq!(app.state.route, Route::Auth);
    assert_eq!(app.state.gate.state(), AuthState::Unauthenticated);
    assert_eq!(session.get().await, None);
    assert_eq!(session.refresh_token().await, None);
    assert_eq!(app.state.auth.message.as_deref(), Some(SESSION_EXPIRED));
    assert!(app.state.household.member.is_none());
}

#[tokio::test]
async fn malformed_period_keeps_submit_disabled() {
    let server = MockServer::start().await;
    mount_household(&server).await;
    mount_get(&server, "/api/salaries/", json!([])).await;
    mount_get(&server, "/api/members/", json!([{ "id": 1, "name": "ana" }])).await;
    mount_get(&server, "/api/periods/", json!([{ "id": 2, "period": "2024-02" }])).await;
    Mock::given(method("POST"))
        .and(path("/api/periods/"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let (mut app, _session) = signed_in(&server).await;
    app.navigate(Route::Salaries);
    app.settle().await;

    app.handle_action(AppAction::Input('n')).await;
    app.handle_action(AppAction::NextField).await;
    app.handle_action(AppAction::NextField).await;
    assert_eq!(app.state.salaries.form.as_ref().unwrap().focus, SalaryField::Period);
    app.handle_action(AppAction::Down).await;
    app.handle_action(AppAction::Down).await;
    app.handle_action(AppAction::Submit).await;
    assert!(app.state.salaries.period_form.is_some());

    for ch in "2024-3".chars() {
        app.handle_action(AppAction::Input(ch)).await;
    }
    let period_form = app.state.salaries.period_form.as_ref().unwrap();
    assert!(!period_form.can_submit());
    app.handle_action(AppAction::Submit).await;
    app.settle().await;
    assert!(app.state.salaries.period_form.is_some());

    // A well-formed duplicate is caught locally too.
    app.state.salaries.period_form.as_mut().unwrap().input = "2024-02".to_string();
    app.handle_action(AppAction::Submit).await;
    app.settle().await;
    assert_eq!(
        app.state
            .salaries
            .period_form
            .as_ref()
            .and_then(|form| form.error.as_deref()),
        Some("Period already exists")
    );
}

#[tokio::test]
async fn new_period_is_selected_in_the_salary_form() {
    let server = MockServer::start().await;
    mount_household(&server).await;
    mount_get(&server, "/api/salaries/", json!([])).await;
    mount_get(&server, "/api/members/", json!([{ "id": 1, "name": "ana" }])).await;
    mount_get(&server, "/api/periods/", json!([])).await;
    Mock::given(method("POST"))
        .and(path("/api/periods/"))
        .and(body_json(json!({ "period": "2024-03" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 9, "period": "2024-03" })))
        .expect(1)
        .mount(&server)
        .await;

    let (mut app, _session) = signed_in(&server).await;
    app.navigate(Route::Settings(SettingsTab::Salaries));
    app.settle().await;

    app.handle_action(AppAction::Input('n')).await;
    let form = app.state.salaries.form.as_mut().unwrap();
    form.focus = SalaryField::Period;
    form.period.cycle(1);
    app.handle_action(AppAction::Submit).await;
    for ch in "2024-03".chars() {
        app.handle_action(AppAction::Input(ch)).await;
    }
    app.handle_action(AppAction::Submit).await;
    app.settle().await;

    assert!(app.state.salaries.period_form.is_none());
    let form = app.state.salaries.form.as_ref().unwrap();
    assert_eq!(form.period.selected_id(), Some(9));
    assert_eq!(app.state.salaries.periods.len(), 1);
}

#[tokio::test]
async fn deleting_a_category_is_immediate_and_refetches() {
    let server = MockServer::start().await;
    mount_household(&server).await;
    mount_get(&server, "/api/distribution-types/", json!([{ "id": 1, "name": "Equal" }])).await;
    Mock::given(method("GET"))
        .and(path("/api/categories/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": 4, "name": "Rent" }])))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/categories/4/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let (mut app, _session) = signed_in(&server).await;
    app.navigate(Route::Settings(SettingsTab::Categories));
    app.settle().await;
    assert_eq!(app.state.categories.table.items.len(), 1);

    app.handle_action(AppAction::Input('d')).await;
    app.settle().await;

    assert!(app.state.categories.table.error.is_none());
}

#[tokio::test]
async fn settings_tabs_remount_their_own_data() {
    let server = MockServer::start().await;
    mount_household(&server).await;
    mount_get(&server, "/api/users/me/", json!({ "id": 1, "username": "ana" })).await;
    mount_get(&server, "/api/members/", json!([{ "id": 1, "name": "ana" }])).await;
    mount_get(&server, "/api/categories/", json!([])).await;
    mount_get(&server, "/api/distribution-types/", json!([])).await;

    let (mut app, _session) = signed_in(&server).await;
    app.navigate(Route::Settings(SettingsTab::General));
    app.settle().await;
    assert_eq!(app.state.user.as_ref().map(|user| user.username.as_str()), Some("ana"));
    assert_eq!(app.state.members.items.len(), 1);

    app.handle_action(AppAction::NextField).await;
    app.settle().await;
    assert_eq!(app.state.route, Route::Settings(SettingsTab::Categories));
    assert!(requested_paths(&server).await.iter().any(|seen| seen == "GET /api/distribution-types/"));
}

#[tokio::test]
async fn navigating_away_discards_in_flight_results() {
    let server = MockServer::start().await;
    mount_household(&server).await;
    mount_get(&server, "/api/categories/", json!([])).await;
    Mock::given(method("GET"))
        .and(path("/api/movements/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{
                    "id": 1,
                    "amount": "10.00",
                    "member": { "id": 1, "name": "ana" },
                    "category": { "id": 3, "name": "Groceries" },
                    "date": "2024-03-01",
                    "description": null
                }]))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;

    let (mut app, _session) = signed_in(&server).await;
    app.navigate(Route::Movements);
    let first = app.scope.next().await.unwrap();
    assert!(matches!(first, Message::MemberMe(Ok(_))));
    app.apply(first).await;
    assert!(app.scope.in_flight() > 0);

    app.navigate(Route::Analytics);
    app.settle().await;

    assert_eq!(app.state.route, Route::Analytics);
    assert!(app.state.movements.table.items.is_empty());
}

#[tokio::test]
async fn logout_clears_tokens() {
    let server = MockServer::start().await;
    mount_household(&server).await;

    let (mut app, session) = signed_in(&server).await;
    app.navigate(Route::Analytics);
    app.settle().await;

    app.handle_action(AppAction::Input('L')).await;
    assert_eq!(app.state.route, Route::Auth);
    assert_eq!(session.get().await, None);
    assert!(!app.state.gate.is_authenticated());
}

#[tokio::test]
async fn failed_movement_writes_fall_back_to_generic_messages() {
    let server = MockServer::start().await;
    mount_household(&server).await;
    mount_get(&server, "/api/categories/", json!([{ "id": 3, "name": "Groceries" }])).await;
    mount_get(&server, "/api/movements/", json!([movement(1, "2024-03-01")])).await;
    Mock::given(method("PUT"))
        .and(path("/api/movements/1/"))
        .and(body_json(json!({
            "amount": 10.0,
            "date": "2024-03-01",
            "category_id": 3,
            "description": ""
        })))
        .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/movements/1/"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let (mut app, _session) = signed_in(&server).await;
    app.navigate(Route::Movements);
    app.settle().await;

    app.handle_action(AppAction::Input('e')).await;
    assert_eq!(app.state.movements.form.as_ref().unwrap().editing, Some(1));
    app.handle_action(AppAction::Submit).await;
    app.settle().await;

    let form = app.state.movements.form.as_ref().unwrap();
    assert!(!form.saving);
    assert_eq!(
        form.error.as_deref(),
        Some("Failed to update movement. Please try again.")
    );

    app.handle_action(AppAction::Cancel).await;
    app.handle_action(AppAction::Input('d')).await;
    app.settle().await;
    assert_eq!(
        app.state.movements.table.error.as_deref(),
        Some("Failed to delete movement. Please try again.")
    );
}

#[tokio::test]
async fn dashboard_rows_can_be_edited_and_deleted() {
    let server = MockServer::start().await;
    mount_household(&server).await;
    mount_get(&server, "/api/categories/", json!([{ "id": 3, "name": "Groceries" }])).await;
    mount_get(&server, "/api/members/", json!([])).await;
    Mock::given(method("GET"))
        .and(path("/api/members/detailed_balances/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/movements/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            movement(1, "2024-03-01"),
            movement(2, "2024-03-05"),
        ])))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/movements/1/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let (mut app, _session) = signed_in(&server).await;
    app.navigate(Route::Dashboard);
    app.settle().await;

    // Most recent first.
    app.handle_action(AppAction::Input('e')).await;
    assert_eq!(app.state.movements.form.as_ref().unwrap().editing, Some(2));
    app.handle_action(AppAction::Cancel).await;

    app.handle_action(AppAction::Down).await;
    app.handle_action(AppAction::Input('d')).await;
    app.settle().await;

    assert!(app.state.movements.table.error.is_none());
    assert_eq!(app.state.route, Route::Dashboard);
}

#[tokio::test]
async fn creating_a_salary_posts_and_refetches() {
    let server = MockServer::start().await;
    mount_household(&server).await;
    mount_get(&server, "/api/members/", json!([{ "id": 1, "name": "ana" }])).await;
    mount_get(&server, "/api/periods/", json!([{ "id": 2, "period": "2024-02" }])).await;
    Mock::given(method("GET"))
        .and(path("/api/salaries/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/salaries/"))
        .and(body_json(json!({ "amount": 1500.0, "period": "2024-02", "member_id": 1 })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 5 })))
        .expect(1)
        .mount(&server)
        .await;

    let (mut app, _session) = signed_in(&server).await;
    app.navigate(Route::Salaries);
    app.settle().await;

    app.handle_action(AppAction::Input('n')).await;
    for ch in "1500".chars() {
        app.handle_action(AppAction::Input(ch)).await;
    }
    app.handle_action(AppAction::NextField).await;
    app.handle_action(AppAction::Down).await;
    app.handle_action(AppAction::NextField).await;
    app.handle_action(AppAction::Down).await;
    assert!(app.state.salaries.form.as_ref().unwrap().can_submit());
    app.handle_action(AppAction::Submit).await;
    app.settle().await;

    assert!(app.state.salaries.form.is_none());
    assert!(app.state.salaries.table.error.is_none());
}

#[tokio::test]
async fn editing_a_salary_puts_to_its_id() {
    let server = MockServer::start().await;
    mount_household(&server).await;
    mount_get(&server, "/api/members/", json!([{ "id": 1, "name": "ana" }])).await;
    mount_get(&server, "/api/periods/", json!([{ "id": 2, "period": "2024-02" }])).await;
    Mock::given(method("GET"))
        .and(path("/api/salaries/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 5,
            "amount": "1500.00",
            "period": { "id": 2, "period": "2024-02" },
            "member": { "id": 1, "name": "ana" }
        }])))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/salaries/5/"))
        .and(body_json(json!({ "amount": 1750.0, "period": "2024-02", "member_id": 1 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 5 })))
        .expect(1)
        .mount(&server)
        .await;

    let (mut app, _session) = signed_in(&server).await;
    app.navigate(Route::Settings(SettingsTab::Salaries));
    app.settle().await;

    app.handle_action(AppAction::Input('e')).await;
    let form = app.state.salaries.form.as_mut().unwrap();
    assert_eq!(form.amount, "1500");
    assert_eq!(form.period.display(), "2024-02");
    form.amount = "1750".to_string();
    app.handle_action(AppAction::Submit).await;
    app.settle().await;

    assert!(app.state.salaries.form.is_none());
}

#[tokio::test]
async fn category_writes_send_name_and_distribution() {
    let server = MockServer::start().await;
    mount_household(&server).await;
    mount_get(
        &server,
        "/api/distribution-types/",
        json!([{ "id": 1, "name": "Equal" }, { "id": 2, "name": "Proportional" }]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/api/categories/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 4,
            "name": "Rent",
            "distribution_type": { "id": 1, "name": "Equal" }
        }])))
        .expect(3)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/categories/"))
        .and(body_json(json!({ "name": "Utilities", "distribution_type_id": 2 })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 5 })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/categories/4/"))
        .and(body_json(json!({ "name": "Housing", "distribution_type_id": 1 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 4 })))
        .expect(1)
        .mount(&server)
        .await;

    let (mut app, _session) = signed_in(&server).await;
    app.navigate(Route::Settings(SettingsTab::Categories));
    app.settle().await;

    app.handle_action(AppAction::Input('n')).await;
    for ch in "Utilities".chars() {
        app.handle_action(AppAction::Input(ch)).await;
    }
    app.handle_action(AppAction::NextField).await;
    app.handle_action(AppAction::Down).await;
    app.handle_action(AppAction::Down).await;
    app.handle_action(AppAction::Submit).await;
    app.settle().await;
    assert!(app.state.categories.form.is_none());

    app.handle_action(AppAction::Input('e')).await;
    app.state.categories.form.as_mut().unwrap().name = "Housing".to_string();
    app.handle_action(AppAction::Submit).await;
    app.settle().await;

    assert!(app.state.categories.form.is_none());
    assert!(app.state.categories.table.error.is_none());
}
