use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::adapters::callback::ResponseSender;
use crate::adapters::group_membership::GroupMembershipClient;
use crate::logging::HandlerLog;
use crate::runtime::contract::{
    normalize_request, CallbackResponse, CallbackStatus, CustomResourceEvent, CutoverRequest,
};
use crate::runtime::plan::{detach_candidates, plan_cutover};

/// Outcome reported through the provisioning callback, returned to the
/// Lambda runtime for observability only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CutoverReport {
    pub status: CallbackStatus,
    pub reason: String,
}

/// Handles one custom-resource event end to end: parse the envelope, compute
/// the outcome, deliver exactly one callback.
///
/// The outcome computation is total; the only paths without a callback are a
/// payload that does not parse and an envelope without a usable response URL,
/// where there is nowhere to deliver one.
pub fn handle_cutover_event(
    event: Value,
    default_physical_resource_id: &str,
    membership: &dyn GroupMembershipClient,
    responder: &dyn ResponseSender,
    log: &HandlerLog,
) -> Result<CutoverReport, String> {
    let event: CustomResourceEvent = serde_json::from_value(event)
        .map_err(|error| format!("Malformed custom resource event: {error}"))?;

    let response_url = match event.response_url.as_deref() {
        Some(url) if !url.trim().is_empty() => url.to_string(),
        _ => {
            log.error(
                "callback_unreachable",
                json!({"request_id": event.request_id}),
            );
            return Err("Event carries no ResponseURL; outcome cannot be reported".to_string());
        }
    };

    let report = run_cutover(&event, membership, log);

    let response = CallbackResponse::for_event(
        &event,
        default_physical_resource_id,
        report.status,
        report.reason.clone(),
    );
    let body = serde_json::to_vec(&response)
        .map_err(|error| format!("Failed to serialize callback body: {error}"))?;

    if let Err(error) = responder.send_response(&response_url, &body) {
        log.error(
            "callback_failed",
            json!({
                "request_id": event.request_id,
                "status": report.status,
                "error": error,
            }),
        );
        return Err(format!("Failed to deliver provisioning callback: {error}"));
    }

    log.info(
        "callback_sent",
        json!({
            "request_id": event.request_id,
            "status": report.status,
            "reason": report.reason,
        }),
    );
    Ok(report)
}

fn run_cutover(
    event: &CustomResourceEvent,
    membership: &dyn GroupMembershipClient,
    log: &HandlerLog,
) -> CutoverReport {
    let request_type = match event.request_type.as_deref() {
        Some(value) if !value.trim().is_empty() => value,
        _ => return failed("RequestType must be provided"),
    };

    // The attachment resource owns no remote state of its own; teardown of
    // the membership relation is left to the groups' own lifecycle.
    if request_type == "Delete" {
        return success("Nothing to do upon delete");
    }

    let request = match normalize_request(event.resource_properties.clone()) {
        Ok(request) => request,
        Err(error) => return failed(error.message()),
    };

    log.info(
        "cutover_planned",
        json!({
            "all_groups": request.group_names(),
            "active_group": request.active_group(),
            "region": request.region,
        }),
    );

    match reconcile_attachments(&request, membership, log) {
        Ok(()) => success("Successfully attached/detached ELBs"),
        Err(error) => {
            log.error(
                "reconcile_failed",
                json!({
                    "elbs": request.elbs,
                    "region": request.region,
                    "error": error,
                }),
            );
            failed(format!(
                "Failed to attach/detach ELBs: {:?} ({})",
                request.elbs, request.region
            ))
        }
    }
}

/// Executes the plan: one batch attach to the active group when selected,
/// then a query-filter-detach pass per probed group. Not transactional; a
/// failure aborts the remainder and re-invocation is the recovery path.
fn reconcile_attachments(
    request: &CutoverRequest,
    membership: &dyn GroupMembershipClient,
    log: &HandlerLog,
) -> Result<(), String> {
    let plan = plan_cutover(request);

    if let Some(attach) = &plan.attach {
        log.info(
            "attaching_balancers",
            json!({"elbs": attach.balancer_names, "group": attach.group}),
        );
        membership.attach_balancers(&request.region, &attach.group, &attach.balancer_names)?;
    }

    for group in &plan.detach_probes {
        let attached = membership.describe_attached_balancers(&request.region, group)?;
        let candidates = detach_candidates(&attached, &request.elbs);
        if !candidates.is_empty() {
            log.info(
                "detaching_balancers",
                json!({"elbs": candidates, "group": group}),
            );
            membership.detach_balancers(&request.region, group, &candidates)?;
        }
    }

    Ok(())
}

fn success(reason: impl Into<String>) -> CutoverReport {
    CutoverReport {
        status: CallbackStatus::Success,
        reason: reason.into(),
    }
}

fn failed(reason: impl Into<String>) -> CutoverReport {
    CutoverReport {
        status: CallbackStatus::Failed,
        reason: reason.into(),
    }
}
