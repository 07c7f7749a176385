use async_trait::async_trait;
use aws_sdk_sns::error::DisplayErrorContext;

use crate::error::{Error, Result};
use crate::models::EventDetail;

const SUCCESS_HEADER: &str = "AUTO-MITIGATED: Entry rule successfully removed from NetworkAcl";
const SUCCESS_SUBJECT: &str = "Auto-Mitigation successful";
const FAILURE_HEADER: &str = "A new NACL entry is being created but the deleteEntry request has failed.";
const FAILURE_SUBJECT: &str = "WARNING: Auto-Mitigation unsuccessful";

/// The slice of the SNS API the handler needs.
#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish_message(&self, topic_arn: &str, subject: &str, message: &str) -> Result<()>;
}

#[async_trait]
impl Publisher for aws_sdk_sns::Client {
    async fn publish_message(&self, topic_arn: &str, subject: &str, message: &str) -> Result<()> {
        self.publish()
            .target_arn(topic_arn)
            .subject(subject)
            .message(message)
            .send()
            .await
            .map_err(|err| Error::Api {
                service: "SNS",
                message: DisplayErrorContext(&err).to_string(),
            })?;

        Ok(())
    }
}

/// Which template the operator message uses. Success unless told otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub subject: &'static str,
    pub message: String,
}

/// Builds the operator message. Field values are copied from the event as-is.
pub fn compose(detail: &EventDetail, mode: Mode) -> Result<Notification> {
    let params = detail.request_parameters()?;
    let identity = detail.user_identity()?;

    let (header, subject) = match mode {
        Mode::Success => (SUCCESS_HEADER, SUCCESS_SUBJECT),
        Mode::Failure => (FAILURE_HEADER, FAILURE_SUBJECT),
    };

    let message = format!(
        "{header}\n\
         NetworkAcl ID: {}\n\
         added by: {} - ID number: {}\n\
         rule_number: {}\n\
         rule_action: {}\n\
         port_range: {}\n\
         acl_protocol: {}\n\
         cidr_block: {}\n",
        params.network_acl_id()?,
        identity.arn()?,
        identity.account_id()?,
        params.rule_number()?,
        params.rule_action()?,
        params.port_range()?,
        params.acl_protocol()?,
        params.cidr_block()?,
    );

    Ok(Notification { subject, message })
}

/// Composes and publishes a status message for the operator.
///
/// Composition errors (missing keys) propagate; SNS errors are logged and
/// returned as `Error::Api`.
pub async fn notify<P>(publisher: &P, topic_arn: &str, detail: &EventDetail, mode: Mode) -> Result<()>
where
    P: Publisher + ?Sized,
{
    let notification = compose(detail, mode)?;

    tracing::info!("Publishing \"{}\" to SNS topic: {}", notification.subject, topic_arn);

    publisher
        .publish_message(topic_arn, notification.subject, &notification.message)
        .await
        .inspect_err(|err| tracing::error!("{}", err))
}
