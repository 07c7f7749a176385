use async_trait::async_trait;
use aws_sdk_ec2::error::DisplayErrorContext;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::RequestParameters;

/// The slice of the EC2 API the handler needs.
#[async_trait]
pub trait AclClient: Send + Sync {
    async fn delete_entry(&self, network_acl_id: &str, egress: bool, rule_number: i32) -> Result<()>;
}

#[async_trait]
impl AclClient for aws_sdk_ec2::Client {
    async fn delete_entry(&self, network_acl_id: &str, egress: bool, rule_number: i32) -> Result<()> {
        self.delete_network_acl_entry()
            .network_acl_id(network_acl_id)
            .egress(egress)
            .rule_number(rule_number)
            .send()
            .await
            .map_err(|err| Error::Api {
                service: "EC2",
                message: DisplayErrorContext(&err).to_string(),
            })?;

        Ok(())
    }
}

/// Removes the rule described by `params` from the configured ACL.
///
/// Missing `egress`/`ruleNumber` keys fail with `Error::MalformedEvent`.
/// Any error from EC2, including a rule that no longer exists, comes back as
/// `Error::Api` after being logged.
pub async fn delete_offending_rule<A>(acl: &A, config: &Config, params: &RequestParameters) -> Result<()>
where
    A: AclClient + ?Sized,
{
    let egress = params.egress()?;
    let rule_number = params.rule_number()?;

    if let Ok(event_acl) = params.network_acl_id() {
        if event_acl != config.nacl_id {
            tracing::warn!(
                "Event reports NetworkAcl {} but this handler only manages {}",
                event_acl,
                config.nacl_id
            );
        }
    }

    tracing::info!(
        "Deleting {} rule {} from NetworkAcl {}",
        if egress { "egress" } else { "ingress" },
        rule_number,
        config.nacl_id
    );

    acl.delete_entry(&config.nacl_id, egress, rule_number)
        .await
        .inspect_err(|err| tracing::error!("{}", err))
}
