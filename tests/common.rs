#![allow(dead_code, unreachable_pub, clippy::unwrap_used, clippy::missing_panics_doc, clippy::must_use_candidate)]
use clap::Parser;
use exercise_tracker::adapters::{MemoryUserStore, UserStore};
use exercise_tracker::api::{self, MgmtState};
use exercise_tracker::config::Config;
use exercise_tracker::services::exercise_service::ExerciseService;
use exercise_tracker::services::health_service::HealthService;
use std::sync::{Arc, Once};
use tokio::net::TcpListener;

static INIT: Once = Once::new();

pub fn setup_tracing() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "warn".into())
            .add_directive("exercise_tracker=debug".parse().unwrap())
            .add_directive("sqlx=warn".parse().unwrap())
            .add_directive("tower=warn".parse().unwrap())
            .add_directive("hyper=warn".parse().unwrap())
            .add_directive("reqwest=warn".parse().unwrap());

        let _ = tracing_subscriber::fmt().with_env_filter(filter).with_test_writer().try_init();
    });
}

pub fn get_test_config() -> Config {
    Config::try_parse_from([
        "exercise-tracker",
        "--store",
        "memory",
        "--host",
        "127.0.0.1",
        "--port",
        "0",
        "--mgmt-port",
        "0",
        "--public-dir",
        concat!(env!("CARGO_MANIFEST_DIR"), "/public"),
    ])
    .unwrap()
}

pub fn generate_username(prefix: &str) -> String {
    format!("{prefix}_{}", uuid::Uuid::new_v4().simple())
}

#[derive(Debug)]
pub struct TestApp {
    pub server_url: String,
    pub mgmt_url: String,
    pub client: reqwest::Client,
    pub config: Config,
    pub store: Arc<dyn UserStore>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with_store(Arc::new(MemoryUserStore::new())).await
    }

    pub async fn spawn_with_store(store: Arc<dyn UserStore>) -> Self {
        setup_tracing();
        let config = get_test_config();

        let exercise_service = ExerciseService::new(Arc::clone(&store));
        let health_service = HealthService::new(Arc::clone(&store), config.health.clone());

        let app = api::app_router(&config, exercise_service);
        let mgmt_app = api::mgmt_router(MgmtState { health_service });

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let server_url = format!("http://{}", listener.local_addr().unwrap());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let mgmt_listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let mgmt_url = format!("http://{}", mgmt_listener.local_addr().unwrap());
        tokio::spawn(async move {
            axum::serve(mgmt_listener, mgmt_app).await.unwrap();
        });

        Self { server_url, mgmt_url, client: reqwest::Client::new(), config, store }
    }

    pub async fn create_user(&self, username: &str) -> reqwest::Response {
        self.client
            .post(format!("{}/api/exercise/new-user", self.server_url))
            .form(&[("username", username)])
            .send()
            .await
            .unwrap()
    }

    /// Creates a user and returns its id.
    pub async fn register(&self, username: &str) -> String {
        let resp = self.create_user(username).await;
        assert_eq!(resp.status(), 200);
        let body: serde_json::Value = resp.json().await.unwrap();
        body["_id"].as_str().unwrap().to_string()
    }

    pub async fn add_exercise(
        &self,
        user_id: &str,
        description: &str,
        duration: &str,
        date: Option<&str>,
    ) -> reqwest::Response {
        let mut form = vec![("userId", user_id), ("description", description), ("duration", duration)];
        if let Some(date) = date {
            form.push(("date", date));
        }

        self.client.post(format!("{}/api/exercise/add", self.server_url)).form(&form).send().await.unwrap()
    }

    pub async fn get_log(&self, params: &[(&str, &str)]) -> reqwest::Response {
        self.client.get(format!("{}/api/exercise/log", self.server_url)).query(params).send().await.unwrap()
    }
}
