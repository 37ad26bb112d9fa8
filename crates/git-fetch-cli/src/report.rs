use git_fetch::{Feedback, RunReport};

/// Route run feedback to the log, one record per event with its counts as
/// fields.
fn log_feedback(feedback: &[Feedback]) {
    for item in feedback {
        match item {
            Feedback::IgnoredUsername { source, username } => tracing::warn!(
                source = %source,
                username = %username,
                "username ignored; listing repositories of the token owner"
            ),
            Feedback::Listed {
                source,
                account,
                repositories,
            } => tracing::info!(
                source = %source,
                account = %account,
                repositories,
                "listed repositories"
            ),
            Feedback::Fetched {
                source,
                external_id,
                pull_requests,
            } => tracing::info!(
                source = %source,
                external_id = %external_id,
                pull_requests,
                "fetched pull requests"
            ),
            Feedback::Skipped { unit, error } => {
                tracing::error!(unit = %unit, error = %error, "skipped after failure")
            }
        }
    }
}

pub fn log_report(report: &RunReport) {
    log_feedback(&report.feedback);

    tracing::info!(
        connections = report.connections,
        repositories = report.repositories,
        pull_requests = report.pull_requests,
        skipped = report.skipped,
        "fetch complete"
    );
}
