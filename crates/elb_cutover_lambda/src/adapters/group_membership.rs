use crate::runtime::contract::BalancerAttachment;

/// Remote autoscaling-group membership surface. Attach is idempotent for
/// already-attached balancers on the service side.
pub trait GroupMembershipClient {
    fn describe_attached_balancers(
        &self,
        region: &str,
        group: &str,
    ) -> Result<Vec<BalancerAttachment>, String>;

    fn attach_balancers(
        &self,
        region: &str,
        group: &str,
        balancer_names: &[String],
    ) -> Result<(), String>;

    fn detach_balancers(
        &self,
        region: &str,
        group: &str,
        balancer_names: &[String],
    ) -> Result<(), String>;
}
