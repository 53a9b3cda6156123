use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, anyhow};
use tokio::net::TcpListener;

use medisync::application::ports::{PatientRecordConnector, TranscriptionJobClient};
use medisync::application::services::{
    CompletionHandler, JobPoller, RecordUpdater, UploadHandler,
};
use medisync::infrastructure::healthscribe::{AwsCredentials, HealthScribeClient};
use medisync::infrastructure::observability::{TracingConfig, init_tracing};
use medisync::infrastructure::persistence::MySqlPatientRecordConnector;
use medisync::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(|e| anyhow!(e))?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(&TracingConfig::new(
        environment.as_str(),
        settings.logging.json,
    ));

    let credentials = AwsCredentials::from_env()
        .context("AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY must be set")?;
    let scribe = &settings.healthscribe;
    let job_client: Arc<dyn TranscriptionJobClient> = match &scribe.endpoint {
        Some(endpoint) => Arc::new(HealthScribeClient::with_endpoint(
            endpoint,
            &scribe.region,
            credentials,
        )?),
        None => Arc::new(HealthScribeClient::new(&scribe.region, credentials)?),
    };

    let database = &settings.database;
    let connector: Arc<dyn PatientRecordConnector> = Arc::new(MySqlPatientRecordConnector::new(
        database.parsed_endpoint()?,
        &database.user,
        &database.password,
        &database.name,
    ));

    let poller = JobPoller::new(job_client, scribe.poller_config());
    let upload_handler = UploadHandler::new(poller, &scribe.output_bucket, &scribe.role_arn)?;
    let completion_handler = CompletionHandler::new(RecordUpdater::new(connector));

    let router = create_router(AppState::new(upload_handler, completion_handler));

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;
    tracing::info!(
        %addr,
        region = %scribe.region,
        output_bucket = %scribe.output_bucket,
        poll_interval_secs = scribe.poll_interval_secs,
        time_budget_secs = scribe.time_budget_secs,
        "Listening for trigger invocations"
    );

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
