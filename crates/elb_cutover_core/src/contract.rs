use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Membership state reported for an attachment that is already on its way
/// out of a group; such balancers must not be named in a detach batch.
pub const REMOVING_STATE: &str = "Removing";

/// Raw custom-resource event as delivered by the provisioning framework.
///
/// Envelope ids default to empty strings rather than failing
/// deserialization: a malformed envelope must still be answerable through
/// the callback as long as a response URL is present.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct CustomResourceEvent {
    pub request_type: Option<String>,
    #[serde(rename = "ResponseURL")]
    pub response_url: Option<String>,
    #[serde(default)]
    pub stack_id: String,
    #[serde(default)]
    pub request_id: String,
    #[serde(default)]
    pub logical_resource_id: String,
    pub physical_resource_id: Option<String>,
    #[serde(default)]
    pub resource_properties: CutoverProperties,
}

/// Declarative cutover description carried under `ResourceProperties`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct CutoverProperties {
    pub elbs: Option<Vec<String>>,
    pub asg_a: Option<String>,
    pub asg_b: Option<String>,
    pub active_asg: Option<String>,
    pub aws_region: Option<String>,
}

/// Which declared group is the live target of the cutover. Any wire value
/// other than `AsgA` or `AsgB` (including absence) selects maintenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveSelection {
    AsgA,
    AsgB,
    Maintenance,
}

/// Validated cutover request. Constructed only through [`normalize_request`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CutoverRequest {
    pub elbs: Vec<String>,
    pub asg_a: Option<String>,
    pub asg_b: Option<String>,
    pub active: ActiveSelection,
    pub region: String,
}

impl CutoverRequest {
    /// Declared group names in declaration order, `AsgA` before `AsgB`.
    pub fn group_names(&self) -> Vec<&str> {
        [self.asg_a.as_deref(), self.asg_b.as_deref()]
            .into_iter()
            .flatten()
            .collect()
    }

    pub fn active_group(&self) -> Option<&str> {
        match self.active {
            ActiveSelection::AsgA => self.asg_a.as_deref(),
            ActiveSelection::AsgB => self.asg_b.as_deref(),
            ActiveSelection::Maintenance => None,
        }
    }

    /// The other declared group when one is active; never a group in
    /// maintenance mode, where every declared group is probed instead.
    pub fn inactive_group(&self) -> Option<&str> {
        match self.active {
            ActiveSelection::AsgA => self.asg_b.as_deref(),
            ActiveSelection::AsgB => self.asg_a.as_deref(),
            ActiveSelection::Maintenance => None,
        }
    }
}

/// One row of a group's currently-attached-balancer listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalancerAttachment {
    pub name: String,
    pub state: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validates the declared properties into a [`CutoverRequest`], failing fast
/// with the first field-identifying reason. Empty and whitespace-only group
/// and region names count as absent.
pub fn normalize_request(properties: CutoverProperties) -> Result<CutoverRequest, ValidationError> {
    let elbs = match properties.elbs {
        Some(elbs) if !elbs.is_empty() => elbs,
        _ => return Err(ValidationError::new("Property Elbs must be defined")),
    };

    let asg_a = properties.asg_a.filter(|name| !name.trim().is_empty());
    let asg_b = properties.asg_b.filter(|name| !name.trim().is_empty());
    if asg_a.is_none() && asg_b.is_none() {
        return Err(ValidationError::new(
            "At least one of [AsgA, AsgB] must be defined",
        ));
    }

    let active = match properties.active_asg.as_deref() {
        Some("AsgA") => ActiveSelection::AsgA,
        Some("AsgB") => ActiveSelection::AsgB,
        _ => ActiveSelection::Maintenance,
    };

    if active == ActiveSelection::AsgA && asg_a.is_none() {
        return Err(ValidationError::new(
            "AsgA was set active but ASG name was not specified",
        ));
    }

    if active == ActiveSelection::AsgB && asg_b.is_none() {
        return Err(ValidationError::new(
            "AsgB was set active but ASG name was not specified",
        ));
    }

    let region = match properties.aws_region {
        Some(region) if !region.trim().is_empty() => region,
        _ => return Err(ValidationError::new("Property AwsRegion must be defined")),
    };

    Ok(CutoverRequest {
        elbs,
        asg_a,
        asg_b,
        active,
        region,
    })
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CallbackStatus {
    #[serde(rename = "SUCCESS")]
    Success,
    #[serde(rename = "FAILED")]
    Failed,
}

/// Response body delivered to the provisioning callback URL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct CallbackResponse {
    pub status: CallbackStatus,
    pub reason: String,
    pub physical_resource_id: String,
    pub stack_id: String,
    pub request_id: String,
    pub logical_resource_id: String,
    pub no_echo: bool,
    pub data: Value,
}

impl CallbackResponse {
    /// Builds the callback body for an event, echoing the envelope ids. The
    /// physical resource id falls back to `default_physical_resource_id`
    /// when the event carries none, so Update and Delete keep addressing the
    /// same resource the framework already knows.
    pub fn for_event(
        event: &CustomResourceEvent,
        default_physical_resource_id: &str,
        status: CallbackStatus,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            status,
            reason: reason.into(),
            physical_resource_id: event
                .physical_resource_id
                .clone()
                .unwrap_or_else(|| default_physical_resource_id.to_string()),
            stack_id: event.stack_id.clone(),
            request_id: event.request_id.clone(),
            logical_resource_id: event.logical_resource_id.clone(),
            no_echo: false,
            data: Value::Object(serde_json::Map::new()),
        }
    }
}
