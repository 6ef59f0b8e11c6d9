/// Bounded-concurrency fan-out over the push relay
///
/// Each recipient gets its own independent relay call. Failures are recorded
/// per recipient and never stop the remaining sends.
use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::models::{FanoutSummary, PushRequest, RecipientOutcome};
use crate::services::relay::PushRelay;
use crate::services::token_directory::TokenDirectory;

pub const NO_PUSH_TOKEN: &str = "no push token registered";

/// Send the same notification to every device token.
///
/// Results come back in input order.
pub async fn relay_to_tokens(
    relay: &PushRelay,
    tokens: &[String],
    title: &str,
    body: &str,
    concurrency: usize,
) -> FanoutSummary {
    info!(count = tokens.len(), concurrency, "fanning out push");

    let results: Vec<RecipientOutcome> = stream::iter(
        tokens
            .iter()
            .map(|token| relay_one(relay, token.clone(), token.clone(), title, body)),
    )
    .buffered(concurrency.max(1))
    .collect()
    .await;

    FanoutSummary::from_results(results)
}

/// Resolve recipients through the directory, then relay to each.
///
/// Recipients without a registered token fail without a relay call.
pub async fn notify_recipients(
    directory: &dyn TokenDirectory,
    relay: &PushRelay,
    recipients: &[String],
    title: &str,
    body: &str,
    concurrency: usize,
) -> FanoutSummary {
    let results: Vec<RecipientOutcome> = stream::iter(recipients.iter().map(|recipient| async move {
        let token = match directory.lookup(recipient).await {
            Ok(Some(token)) => token,
            Ok(None) => {
                debug!(recipient = %recipient, "recipient has no push token");
                return RecipientOutcome::failed(recipient.clone(), NO_PUSH_TOKEN);
            }
            Err(e) => {
                warn!(recipient = %recipient, error = %e, "token lookup failed");
                return RecipientOutcome::failed(recipient.clone(), e.to_string());
            }
        };

        relay_one(relay, recipient.clone(), token, title, body).await
    }))
    .buffered(concurrency.max(1))
    .collect()
    .await;

    FanoutSummary::from_results(results)
}

async fn relay_one(
    relay: &PushRelay,
    recipient: String,
    token: String,
    title: &str,
    body: &str,
) -> RecipientOutcome {
    let request = PushRequest {
        token,
        title: title.to_string(),
        body: body.to_string(),
    };
    match relay.relay(&request).await {
        Ok(sent) => RecipientOutcome::delivered(recipient, sent.message_id),
        Err(e) => RecipientOutcome::failed(recipient, e.caller_detail()),
    }
}
