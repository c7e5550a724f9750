//! Runs session commands on a tokio runtime and reports their outcomes.

use survey_form::{Command, Outcome};
use survey_form_client::SurveyClient;
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;

/// Spawns one task per command; each task sends exactly one `Outcome`.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    handle: Handle,
    client: SurveyClient,
    outcomes: UnboundedSender<Outcome>,
}

impl Dispatcher {
    pub fn new(handle: Handle, client: SurveyClient, outcomes: UnboundedSender<Outcome>) -> Self {
        Self {
            handle,
            client,
            outcomes,
        }
    }

    pub fn dispatch(&self, command: Command) {
        let client = self.client.clone();
        let outcomes = self.outcomes.clone();
        self.handle.spawn(async move {
            let outcome = run_command(&client, command).await;
            if outcomes.send(outcome).is_err() {
                tracing::debug!("form closed before a command finished");
            }
        });
    }

    pub fn dispatch_all(&self, commands: impl IntoIterator<Item = Command>) {
        for command in commands {
            self.dispatch(command);
        }
    }
}

/// Perform one command against the services.
pub async fn run_command(client: &SurveyClient, command: Command) -> Outcome {
    match command {
        Command::Enhance(request) => Outcome::Enhanced(
            client
                .enhance_prompt(&request)
                .await
                .map_err(anyhow::Error::from),
        ),
        Command::CheckHealth { seq } => Outcome::Health {
            seq,
            report: client.check_health().await,
        },
        Command::CheckInference { seq } => Outcome::Inference {
            seq,
            report: client.check_inference_health().await,
        },
    }
}
