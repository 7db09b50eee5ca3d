use actix_web::{web, App, HttpServer};
use spinfour_backend::config::Settings;
use spinfour_backend::infra::state::build_state;
use spinfour_backend::middleware::request_trace::RequestTrace;
use spinfour_backend::routes;
use tracing::{error, info};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };
    let (host, port) = settings.bind_addr();
    let sweep_interval = settings.game.sweep_interval;

    let app_state = match build_state().with_settings(settings).build().await {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "Failed to build application state");
            eprintln!("❌ Failed to build application state: {e}");
            std::process::exit(1);
        }
    };

    // Lives for the whole process; dropping the handle detaches it.
    let _sweeper = app_state.store.clone().spawn_sweeper(sweep_interval);

    info!(%host, port, "Starting Spinfour backend");

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
