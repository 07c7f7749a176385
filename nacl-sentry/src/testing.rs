//! In-memory stand-ins for EC2 and SNS used by the unit tests.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::acl::AclClient;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::notify::Publisher;

pub fn test_config() -> Config {
    Config {
        nacl_id: "acl-123".to_string(),
        sns_topic_arn: "arn:aws:sns:us-east-1:111122223333:nacl-alerts".to_string(),
    }
}

pub fn sample_event() -> serde_json::Value {
    serde_json::json!({
        "detail": {
            "requestParameters": {
                "egress": false,
                "ruleNumber": 105,
                "networkAclId": "acl-123",
                "ruleAction": "deny",
                "portRange": {"From": 80, "To": 80},
                "aclProtocol": "6",
                "cidrBlock": "0.0.0.0/0"
            },
            "userIdentity": {
                "arn": "arn:aws:iam::111122223333:user/eve",
                "accountId": "111122223333"
            }
        }
    })
}

/// Holds a set of (acl, egress, rule number) entries and rejects deletes of
/// anything not in it, the way EC2 answers `InvalidNetworkAclEntry.NotFound`.
#[derive(Default)]
pub struct FakeAcl {
    rules: Mutex<HashSet<(String, bool, i32)>>,
    calls: Mutex<Vec<(String, bool, i32)>>,
}

impl FakeAcl {
    pub fn with_rules(rules: &[(&str, bool, i32)]) -> Self {
        FakeAcl {
            rules: Mutex::new(
                rules
                    .iter()
                    .map(|(acl, egress, number)| (acl.to_string(), *egress, *number))
                    .collect(),
            ),
            calls: Mutex::default(),
        }
    }

    pub fn calls(&self) -> Vec<(String, bool, i32)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.lock().unwrap().is_empty()
    }
}

#[async_trait]
impl AclClient for FakeAcl {
    async fn delete_entry(&self, network_acl_id: &str, egress: bool, rule_number: i32) -> Result<()> {
        let key = (network_acl_id.to_string(), egress, rule_number);
        self.calls.lock().unwrap().push(key.clone());

        if self.rules.lock().unwrap().remove(&key) {
            Ok(())
        } else {
            Err(Error::Api {
                service: "EC2",
                message: format!(
                    "InvalidNetworkAclEntry.NotFound: The network ACL entry identified by {} could not be found.",
                    rule_number
                ),
            })
        }
    }
}

pub struct FakePublisher {
    fail: bool,
    published: Mutex<Vec<(String, String, String)>>,
}

impl FakePublisher {
    pub fn succeeding() -> Self {
        FakePublisher { fail: false, published: Mutex::default() }
    }

    pub fn failing() -> Self {
        FakePublisher { fail: true, published: Mutex::default() }
    }

    /// (topic, subject, message) for every publish that went through.
    pub fn published(&self) -> Vec<(String, String, String)> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl Publisher for FakePublisher {
    async fn publish_message(&self, topic_arn: &str, subject: &str, message: &str) -> Result<()> {
        if self.fail {
            return Err(Error::Api {
                service: "SNS",
                message: "AuthorizationError: not authorized to perform SNS:Publish".to_string(),
            });
        }

        self.published
            .lock()
            .unwrap()
            .push((topic_arn.to_string(), subject.to_string(), message.to_string()));
        Ok(())
    }
}
