use crate::contract::{BalancerAttachment, CutoverRequest, REMOVING_STATE};

/// Batch attach of every declared balancer to one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachAction {
    pub group: String,
    pub balancer_names: Vec<String>,
}

/// Remote actions implied by a validated request: at most one batch attach,
/// plus the groups to probe with a query-filter-detach pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CutoverPlan {
    pub attach: Option<AttachAction>,
    pub detach_probes: Vec<String>,
}

/// Derives the attach/detach plan. With an active group, the full declared
/// batch is attached to it and only the inactive group (when declared) is
/// probed; in maintenance mode every declared group is probed in
/// declaration order.
pub fn plan_cutover(request: &CutoverRequest) -> CutoverPlan {
    match request.active_group() {
        Some(active) => CutoverPlan {
            attach: Some(AttachAction {
                group: active.to_string(),
                balancer_names: request.elbs.clone(),
            }),
            detach_probes: request
                .inactive_group()
                .map(str::to_string)
                .into_iter()
                .collect(),
        },
        None => CutoverPlan {
            attach: None,
            detach_probes: request
                .group_names()
                .into_iter()
                .map(str::to_string)
                .collect(),
        },
    }
}

/// Filters a group's attachment listing to the names that must be detached:
/// declared in the request and not already `Removing`. An empty result means
/// the detach call is skipped entirely.
pub fn detach_candidates(attached: &[BalancerAttachment], declared: &[String]) -> Vec<String> {
    attached
        .iter()
        .filter(|attachment| {
            attachment.state != REMOVING_STATE && declared.contains(&attachment.name)
        })
        .map(|attachment| attachment.name.clone())
        .collect()
}
