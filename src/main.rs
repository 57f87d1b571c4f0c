use std::sync::Arc;

use lambda_http::{run, service_fn, Error, Request};
use log::info;
use user_directory::{
    config::DirectoryConfig,
    handlers::{ResponseBuilder, Router},
    DirectoryTable, DynamoBackend,
};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        // disable printing the name of the module in every log line.
        .with_target(false)
        // disabling time is handy because CloudWatch will add the ingestion time.
        .without_time()
        .init();

    let config = DirectoryConfig::from_env();
    info!("Initializing for table {}...", config.table_name);

    let sdk_config = config.load_sdk_config().await;
    let client = aws_sdk_dynamodb::Client::new(&sdk_config);

    let table = DirectoryTable::with_email_index(
        DynamoBackend::new(client, &config.table_name),
        &config.email_index,
    );
    let router = Arc::new(Router::new(table, ResponseBuilder::default()));

    info!("Ready!");

    run(service_fn(move |event: Request| {
        let router = Arc::clone(&router);
        async move { Ok::<_, Error>(router.route(&event).await) }
    }))
    .await
}
