mod models;
mod service;
mod config;
mod dtos;
mod error;
mod db;
mod utils;
mod middleware;
mod handler;
mod routes;

use std::sync::Arc;

use axum::http::{header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE}, HeaderValue, Method};
use config::Config;
use db::DBClient;
use dotenv::dotenv;
use routes::create_router;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing_subscriber::filter::LevelFilter;

use service::{
    dashboard_service::DashboardService, department_service::DepartmentService,
    feedback_service::FeedbackService, knowledge_service::KnowledgeService,
    seed_service::SeedService, ticket_service::TicketService, user_service::UserService,
};

#[derive(Debug, Clone)]
pub struct AppState {
    pub env: Config,
    pub db_client: Arc<DBClient>,
    pub user_service: Arc<UserService>,
    pub ticket_service: Arc<TicketService>,
    pub department_service: Arc<DepartmentService>,
    pub knowledge_service: Arc<KnowledgeService>,
    pub feedback_service: Arc<FeedbackService>,
    pub dashboard_service: Arc<DashboardService>,
}

impl AppState {
    pub fn new(db_client: Arc<DBClient>, env: Config) -> Self {
        let department_service = Arc::new(DepartmentService::new(db_client.clone()));
        let user_service = Arc::new(UserService::new(
            db_client.clone(),
            department_service.clone(),
            env.password_secret.clone(),
        ));

        AppState {
            db_client: db_client.clone(),
            user_service,
            ticket_service: Arc::new(TicketService::new(db_client.clone())),
            department_service,
            knowledge_service: Arc::new(KnowledgeService::new(db_client.clone())),
            feedback_service: Arc::new(FeedbackService::new(db_client.clone())),
            dashboard_service: Arc::new(DashboardService::new(db_client)),
            env,
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
    .with_max_level(LevelFilter::DEBUG)
    .init();

    dotenv().ok();

    let config = Config::init();

    let pool = match PgPoolOptions::new()
            .max_connections(20)
            .min_connections(5)
            .connect(&config.database_url)
            .await
    {
        Ok(pool) => {
            println!("✅Connection to the database is successful!");
            pool
        }
        Err(err) => {
            println!("🔥 Failed to connect to the database: {:?}", err);
            std::process::exit(1);
        }
    };

    let db_client = Arc::new(DBClient::new(pool));

    // Reference data and the bootstrap accounts; errors inside are logged,
    // not fatal.
    SeedService::new(db_client.clone(), config.password_secret.clone())
        .run()
        .await;

    let allowed_origins = vec![
        config.frontend_url.parse::<HeaderValue>().unwrap(),
        "http://localhost:5173".parse::<HeaderValue>().unwrap(),
        "http://localhost:8000".parse::<HeaderValue>().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_headers([AUTHORIZATION, ACCEPT, CONTENT_TYPE])
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ]);

    let app_state = AppState::new(db_client, config.clone());

    let app = create_router(Arc::new(app_state)).layer(cors);

    println!(
        "{}",
        format!("🚀 Server is running on http://localhost:{}", config.port)
    );

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", &config.port))
    .await
    .unwrap();

    axum::serve(listener, app).await.unwrap();
}
