use aws_config::Region;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

use elb_cutover_core::contract::BalancerAttachment;
use elb_cutover_lambda::adapters::callback::ResponseSender;
use elb_cutover_lambda::adapters::group_membership::GroupMembershipClient;
use elb_cutover_lambda::handlers::cutover::{handle_cutover_event, CutoverReport};
use elb_cutover_lambda::logging::HandlerLog;

struct AutoScalingMembershipClient {
    base_config: aws_config::SdkConfig,
}

impl AutoScalingMembershipClient {
    /// The target region is request data, so the client is rebuilt per call
    /// on top of the ambient credentials chain.
    fn regional_client(&self, region: &str) -> aws_sdk_autoscaling::Client {
        let config = aws_sdk_autoscaling::config::Builder::from(&self.base_config)
            .region(Region::new(region.to_string()))
            .build();
        aws_sdk_autoscaling::Client::from_conf(config)
    }
}

impl GroupMembershipClient for AutoScalingMembershipClient {
    fn describe_attached_balancers(
        &self,
        region: &str,
        group: &str,
    ) -> Result<Vec<BalancerAttachment>, String> {
        let client = self.regional_client(region);
        let group_name = group.to_string();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                let output = client
                    .describe_load_balancers()
                    .auto_scaling_group_name(group_name)
                    .send()
                    .await
                    .map_err(|error| format!("failed to describe load balancers: {error}"))?;

                Ok(output
                    .load_balancers()
                    .iter()
                    .map(|state| BalancerAttachment {
                        name: state.load_balancer_name().unwrap_or_default().to_string(),
                        state: state.state().unwrap_or_default().to_string(),
                    })
                    .collect())
            })
        })
    }

    fn attach_balancers(
        &self,
        region: &str,
        group: &str,
        balancer_names: &[String],
    ) -> Result<(), String> {
        let client = self.regional_client(region);
        let group_name = group.to_string();
        let balancer_names = balancer_names.to_vec();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .attach_load_balancers()
                    .auto_scaling_group_name(group_name)
                    .set_load_balancer_names(Some(balancer_names))
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(|error| format!("failed to attach load balancers: {error}"))
            })
        })
    }

    fn detach_balancers(
        &self,
        region: &str,
        group: &str,
        balancer_names: &[String],
    ) -> Result<(), String> {
        let client = self.regional_client(region);
        let group_name = group.to_string();
        let balancer_names = balancer_names.to_vec();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .detach_load_balancers()
                    .auto_scaling_group_name(group_name)
                    .set_load_balancer_names(Some(balancer_names))
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(|error| format!("failed to detach load balancers: {error}"))
            })
        })
    }
}

struct HttpResponseSender {
    http_client: reqwest::Client,
}

impl ResponseSender for HttpResponseSender {
    fn send_response(&self, url: &str, body: &[u8]) -> Result<(), String> {
        let client = self.http_client.clone();
        let url = url.to_string();
        let payload = body.to_vec();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                let response = client
                    .put(url)
                    // The pre-signed callback URL is signed without a content
                    // type; sending one invalidates the signature.
                    .header(reqwest::header::CONTENT_TYPE, "")
                    .body(payload)
                    .send()
                    .await
                    .map_err(|error| format!("failed to deliver callback: {error}"))?;

                response
                    .error_for_status()
                    .map(|_| ())
                    .map_err(|error| format!("callback endpoint rejected the response: {error}"))
            })
        })
    }
}

async fn handle_request(event: LambdaEvent<Value>) -> Result<CutoverReport, Error> {
    let base_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let membership = AutoScalingMembershipClient { base_config };

    let http_client = reqwest::Client::builder()
        .build()
        .map_err(|error| Error::from(format!("failed to build callback http client: {error}")))?;
    let responder = HttpResponseSender { http_client };

    let default_physical_resource_id = std::env::var("AWS_LAMBDA_LOG_STREAM_NAME")
        .unwrap_or_else(|_| "elb-cutover-attachment".to_string());
    let log = HandlerLog::new("cutover_handler");

    handle_cutover_event(
        event.payload,
        &default_physical_resource_id,
        &membership,
        &responder,
        &log,
    )
    .map_err(Error::from)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_runtime::run(service_fn(handle_request)).await
}
