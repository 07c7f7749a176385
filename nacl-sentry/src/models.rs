use std::io;

use serde::{Deserialize, Serialize};
use serde_json::ser::{Formatter, Serializer};

use crate::error::{Error, Result};

/// EventBridge envelope for a CloudTrail `CreateNetworkAclEntry` call.
/// Everything outside `detail` is ignored.
#[derive(Debug, Default, Deserialize)]
pub struct RemediationEvent {
    pub detail: Option<EventDetail>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDetail {
    pub request_parameters: Option<RequestParameters>,
    pub user_identity: Option<UserIdentity>,
}

// Every field is optional here so that a missing key surfaces as a
// MalformedEvent naming that key, at the point it is actually needed. Only
// `egress` and `ruleNumber` feed the delete call and are typed; the rest are
// copied into the operator message as they arrive.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestParameters {
    pub egress: Option<bool>,
    pub rule_number: Option<i32>,
    pub network_acl_id: Option<serde_json::Value>,
    pub rule_action: Option<serde_json::Value>,
    pub port_range: Option<serde_json::Value>,
    pub acl_protocol: Option<serde_json::Value>,
    pub cidr_block: Option<serde_json::Value>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    pub arn: Option<serde_json::Value>,
    pub account_id: Option<serde_json::Value>,
}

/// Strings render as their raw text, anything else as compact JSON.
pub fn render_verbatim(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

impl RemediationEvent {
    pub fn from_value(payload: serde_json::Value) -> Result<Self> {
        serde_json::from_value(payload).map_err(|err| Error::MalformedEvent(err.to_string()))
    }

    /// An absent `detail` behaves like an empty one.
    pub fn into_detail(self) -> EventDetail {
        self.detail.unwrap_or_default()
    }
}

impl EventDetail {
    pub fn request_parameters(&self) -> Result<&RequestParameters> {
        self.request_parameters
            .as_ref()
            .ok_or_else(|| Error::missing_key("requestParameters"))
    }

    pub fn user_identity(&self) -> Result<&UserIdentity> {
        self.user_identity
            .as_ref()
            .ok_or_else(|| Error::missing_key("userIdentity"))
    }
}

fn require<'a, T>(field: &'a Option<T>, path: &str) -> Result<&'a T> {
    field.as_ref().ok_or_else(|| Error::missing_key(path))
}

impl RequestParameters {
    pub fn egress(&self) -> Result<bool> {
        require(&self.egress, "requestParameters.egress").copied()
    }

    pub fn rule_number(&self) -> Result<i32> {
        require(&self.rule_number, "requestParameters.ruleNumber").copied()
    }

    pub fn network_acl_id(&self) -> Result<String> {
        require(&self.network_acl_id, "requestParameters.networkAclId").map(render_verbatim)
    }

    pub fn rule_action(&self) -> Result<String> {
        require(&self.rule_action, "requestParameters.ruleAction").map(render_verbatim)
    }

    pub fn port_range(&self) -> Result<String> {
        require(&self.port_range, "requestParameters.portRange").map(render_verbatim)
    }

    pub fn acl_protocol(&self) -> Result<String> {
        require(&self.acl_protocol, "requestParameters.aclProtocol").map(render_verbatim)
    }

    pub fn cidr_block(&self) -> Result<String> {
        require(&self.cidr_block, "requestParameters.cidrBlock").map(render_verbatim)
    }
}

impl UserIdentity {
    pub fn arn(&self) -> Result<String> {
        require(&self.arn, "userIdentity.arn").map(render_verbatim)
    }

    pub fn account_id(&self) -> Result<String> {
        require(&self.account_id, "userIdentity.accountId").map(render_verbatim)
    }
}

/// What the invocation hands back to Lambda.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Response {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl Response {
    pub fn message(status_code: u16, message: &str) -> Self {
        Response {
            status_code,
            body: render_body(&serde_json::json!({ "message": message })),
        }
    }

    pub fn error(status_code: u16, error: &str) -> Self {
        Response {
            status_code,
            body: render_body(&serde_json::json!({ "error": error })),
        }
    }
}

/// Writes JSON with `", "` and `": "` separators.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_key<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }
}

fn render_body(value: &serde_json::Value) -> String {
    let mut buffer = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buffer, SpacedFormatter);
    match value.serialize(&mut serializer) {
        Ok(()) => String::from_utf8(buffer).unwrap_or_else(|_| value.to_string()),
        Err(err) => {
            tracing::warn!("Falling back to compact response body: {}", err);
            value.to_string()
        }
    }
}
