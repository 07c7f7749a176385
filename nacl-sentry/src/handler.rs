use crate::acl::{AclClient, delete_offending_rule};
use crate::config::Config;
use crate::error::Result;
use crate::models::{RemediationEvent, Response};
use crate::notify::{Mode, Publisher, notify};

const SUCCESS_MESSAGE: &str = "Successful requests.";
const PUBLISH_ERROR: &str = "An error occurred in the SNS publish request.";
const DELETE_ERROR: &str = "an error occurred in the deleteEntry request.";
const DELETE_ERROR_NOTIFIED: &str = "an error occurred in the deleteEntry request. The operator has been notified.";

/// Reverts one unauthorized NACL entry per invocation and reports the result
/// to the operator.
///
/// | delete | notify | status |
/// |--------|--------|--------|
/// | ok     | ok     | 200    |
/// | ok     | failed | 206    |
/// | failed | ok     | 500    |
/// | failed | failed | 500    |
///
/// Each remote call is made exactly once. A malformed event is returned as
/// an error so the invocation fails loudly.
pub struct RemediationHandler<A, P> {
    config: Config,
    acl: A,
    publisher: P,
}

impl<A, P> RemediationHandler<A, P>
where
    A: AclClient,
    P: Publisher,
{
    pub fn new(config: Config, acl: A, publisher: P) -> Self {
        RemediationHandler { config, acl, publisher }
    }

    pub async fn handle(&self, payload: serde_json::Value) -> Result<Response> {
        let detail = RemediationEvent::from_value(payload)?.into_detail();
        let params = detail.request_parameters()?;

        let deleted = match delete_offending_rule(&self.acl, &self.config, params).await {
            Ok(()) => true,
            Err(err) if err.is_api() => false,
            Err(err) => return Err(err),
        };

        if deleted {
            tracing::info!("deleteEntry: Successful");

            return match notify(&self.publisher, &self.config.sns_topic_arn, &detail, Mode::default()).await {
                Ok(()) => {
                    tracing::info!("SNS publish: Successful");
                    Ok(Response::message(200, SUCCESS_MESSAGE))
                }
                Err(err) if err.is_api() => {
                    tracing::info!("SNS publish: an error occurred");
                    Ok(Response::error(206, PUBLISH_ERROR))
                }
                Err(err) => Err(err),
            };
        }

        match notify(&self.publisher, &self.config.sns_topic_arn, &detail, Mode::Failure).await {
            Ok(()) => {
                tracing::info!("deleteEntry: an error occurred, operator notified");
                Ok(Response::error(500, DELETE_ERROR_NOTIFIED))
            }
            Err(err) if err.is_api() => {
                tracing::info!("deleteEntry: an error occurred");
                Ok(Response::error(500, DELETE_ERROR))
            }
            Err(err) => Err(err),
        }
    }
}
