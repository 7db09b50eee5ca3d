use actix_web::{test, web, App};
use serde_json::Value;
use spinfour_backend::routes;

use crate::common::{harness, start_game};

#[actix_web::test]
async fn health_reports_active_games() {
    let h = harness().await;
    start_game(&h.state, "red", "yellow").await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(h.state.clone()))
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["active_games"], 1);
    assert_eq!(body["app_version"], env!("CARGO_PKG_VERSION"));
    assert!(body["time"].as_str().is_some());
}
