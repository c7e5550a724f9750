mod cli;
mod config;
mod logging;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use survey_form::{FormError, FormSession, SessionConfig};
use survey_form_client::SurveyClient;
use survey_form_ratatui::{RatatuiFormBackend, RatatuiFormError};

use crate::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_file)?;

    let definition = config::load_definition(cli.questions.as_deref())?;
    let mut session =
        FormSession::new(SessionConfig::new(definition).with_instruction(cli.instruction.clone()))?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start the async runtime")?;
    let client = SurveyClient::new(&cli.client_config()).context("Failed to build HTTP client")?;
    let backend = RatatuiFormBackend::new(runtime.handle().clone(), client)
        .with_title(cli.title.clone())
        .with_startup_probes(!cli.no_probe);

    tracing::info!(
        base_url = %cli.base_url,
        questions = session.questions().len(),
        "starting form"
    );
    let result = session.run(&backend);

    // In-flight requests are not awaited
    runtime.shutdown_timeout(Duration::from_secs(1));

    match result {
        Ok(Some(submission)) if cli.print_submission => {
            println!("{}", serde_json::to_string_pretty(submission)?);
        }
        Ok(_) => {}
        Err(FormError::Backend(err))
            if matches!(
                err.downcast_ref::<RatatuiFormError>(),
                Some(RatatuiFormError::Cancelled)
            ) =>
        {
            tracing::info!("form cancelled");
        }
        Err(err) => return Err(err.into()),
    }
    Ok(())
}
