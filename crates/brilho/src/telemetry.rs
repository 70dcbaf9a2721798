use crate::config::{AppEnvironment, TelemetryConfig};
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

/// Directives appended to the configured level so connection-level noise
/// from the HTTP stack stays out of the marketplace logs.
const QUIET_DEPENDENCIES: &[&str] = &["hyper=warn", "mio=warn"];

#[derive(Debug)]
pub enum TelemetryError {
    Filter { directives: String, source: ParseError },
    Install(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::Filter { directives, .. } => {
                write!(
                    f,
                    "log filter '{}' is not a valid tracing directive set",
                    directives
                )
            }
            TelemetryError::Install(err) => {
                write!(f, "failed to install the tracing subscriber: {err}")
            }
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::Filter { source, .. } => Some(source),
            TelemetryError::Install(err) => Some(&**err),
        }
    }
}

fn filter_directives(level: &str) -> String {
    let mut directives = String::from(level);
    for dependency in QUIET_DEPENDENCIES {
        directives.push(',');
        directives.push_str(dependency);
    }
    directives
}

/// Install the global subscriber. `RUST_LOG` wins when set; otherwise the
/// configured level applies with the HTTP stack quieted. Colored output is
/// reserved for development shells.
pub fn init(environment: AppEnvironment, config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            let directives = filter_directives(&config.log_level);
            EnvFilter::try_new(&directives)
                .map_err(|source| TelemetryError::Filter { directives, source })?
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .with_ansi(environment == AppEnvironment::Development)
        .try_init()
        .map_err(TelemetryError::Install)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_extend_the_configured_level() {
        let directives = filter_directives("debug");
        assert!(directives.starts_with("debug,"));
        assert!(directives.contains("hyper=warn"));
        assert!(directives.contains("mio=warn"));
    }

    #[test]
    fn quieting_directives_parse_as_an_env_filter() {
        EnvFilter::try_new(filter_directives("info")).expect("directives parse");
    }

    #[test]
    fn a_broken_level_surfaces_the_offending_directives() {
        let directives = filter_directives("brilho=notalevel");
        let error = EnvFilter::try_new(&directives)
            .map_err(|source| TelemetryError::Filter {
                directives: directives.clone(),
                source,
            })
            .expect_err("invalid level rejected");
        assert!(error.to_string().contains("brilho=notalevel"));
    }
}
