//! Lambda function invoked by EventBridge when CloudTrail records a
//! `CreateNetworkAclEntry` call by an IAM user. It deletes the new entry from
//! the managed network ACL and tells the operator over SNS whether that
//! worked.

mod acl;
mod config;
mod error;
mod handler;
mod models;
mod notify;

#[cfg(test)]
mod testing;

use lambda_runtime::{LambdaEvent, service_fn};
use tracing_subscriber::filter;

use config::Config;
use handler::RemediationHandler;

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {

    tracing_subscriber::fmt()
        .with_level(true)
        .with_ansi(false)
        .with_target(false)
        .with_max_level(filter::LevelFilter::INFO)
        .init();

    let config = Config::from_env().inspect_err(|err| {
        tracing::error!("Refusing to start: {}", err);
    })?;
    tracing::info!("Managing NetworkAcl {}, reporting to {}", config.nacl_id, config.sns_topic_arn);

    let aws_config = aws_config::load_from_env().await;
    let handler = RemediationHandler::new(
        config,
        aws_sdk_ec2::Client::new(&aws_config),
        aws_sdk_sns::Client::new(&aws_config),
    );
    let handler = &handler;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<serde_json::Value>| async move {
        tracing::info!("Handling request {}", event.context.request_id);
        handler
            .handle(event.payload)
            .await
            .map_err(lambda_runtime::Error::from)
    }))
    .await
}
