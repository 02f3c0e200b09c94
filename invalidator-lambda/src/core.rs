use anyhow::anyhow;
use invalidator::aws::load_sdk_config;
use invalidator::cdn::InvalidationClient;
use invalidator::cdn::cloudfront::CloudFrontClient;
use invalidator::error::InvalidatorResult;
use invalidator::handler::{InvalidationHandler, JobOutcome};
use invalidator::pipeline::JobResultReporter;
use invalidator::pipeline::codepipeline::CodePipelineClient;
use invalidator::types::CodePipelineJobEvent;
use invalidator_config::shared::InvalidatorConfig;
use lambda_runtime::{LambdaEvent, service_fn};
use tracing::{Instrument, debug, error, info, info_span, warn};

/// Builds the AWS clients and serves invocations until the Lambda runtime stops.
///
/// The SDK configuration is loaded once here and shared by both clients for the lifetime of
/// the process.
pub async fn start_function(config: InvalidatorConfig) -> anyhow::Result<()> {
    info!("starting invalidation function");

    log_config(&config);

    let sdk_config = load_sdk_config(&config.aws).await;
    let handler = InvalidationHandler::new(
        CloudFrontClient::new(&sdk_config),
        CodePipelineClient::new(&sdk_config),
        &config,
    );
    let handler = &handler;

    lambda_runtime::run(service_fn(
        move |event: LambdaEvent<CodePipelineJobEvent>| async move {
            handle_event(handler, event).await
        },
    ))
    .await
    .map_err(|err| anyhow!(err))?;

    info!("invalidation function stopped");

    Ok(())
}

async fn handle_event<C, R>(
    handler: &InvalidationHandler<C, R>,
    event: LambdaEvent<CodePipelineJobEvent>,
) -> Result<(), lambda_runtime::Error>
where
    C: InvalidationClient,
    R: JobResultReporter,
{
    let (payload, context) = event.into_parts();
    let span = info_span!("invocation", request_id = context.request_id);

    async move {
        debug!(?payload, "received codepipeline job");

        log_job_result(handler.handle_job(&payload).await);

        Ok::<(), lambda_runtime::Error>(())
    }
    .instrument(span)
    .await
}

/// Logs how a job ended.
///
/// No job result ever fails the invocation. The pipeline is the only consumer of the outcome,
/// and a failed invocation would make Lambda retry it and invalidate the distribution again.
fn log_job_result(result: InvalidatorResult<JobOutcome>) {
    match result {
        Ok(JobOutcome::Invalidated(_)) => info!("job reported as succeeded"),
        Ok(JobOutcome::Failed(_)) => warn!("job reported as failed"),
        Err(err) => error!(error = %err, "job could not be reported"),
    }
}

fn log_config(config: &InvalidatorConfig) {
    match config.distribution_id() {
        Some(distribution_id) => debug!(distribution_id, "using distribution"),
        None => warn!("DISTRIBUTION_ID is not set, every job will be reported as failed"),
    }

    debug!(
        always_report_success = config.always_report_success,
        region = config.aws.region.as_deref(),
        endpoint_url = config.aws.endpoint_url.as_deref(),
        "function config"
    );
}
