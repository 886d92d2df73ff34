use fitfreak::config::{read_configuration, SessionConfig};
use fitfreak::session::Session;
use fitfreak::FfResult;
use log::debug;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::path::Path;

/// Just a simple struct to hold the various bits needed to run a fitfreak application.
pub struct FitfreakContext {
    pub config: SessionConfig,
}

impl FitfreakContext {
    pub fn new_session(&self) -> Session {
        Session::new(self.config.clone())
    }
}

/// This is a basic setup for a fitfreak application to get you started.
/// Duplicate and customize as needed when your needs grow.
///
/// config_path: a RON session configuration, the defaults are used when `None`.
///
/// text_log: if true, the log will be printed to the console.
/// Debug level in debug builds, Info in release builds.
pub fn basic_fitfreak_setup(config_path: Option<&Path>, text_log: bool) -> FfResult<FitfreakContext> {
    if text_log {
        #[cfg(debug_assertions)]
        let level = LevelFilter::Debug;
        #[cfg(not(debug_assertions))]
        let level = LevelFilter::Info;

        // Only one logger per process, a second setup keeps the first one.
        if TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto).is_err() {
            debug!("A logger is already installed");
        }
    }

    let config = match config_path {
        Some(path) => read_configuration(path)?,
        None => SessionConfig::default(),
    };
    debug!("Session configuration: {:?}", config);
    Ok(FitfreakContext { config })
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitfreak::prelude::ExerciseKind;
    use std::io::Write;

    #[test]
    fn test_default_setup() {
        let ctx = basic_fitfreak_setup(None, false).unwrap();
        assert_eq!(ctx.config, SessionConfig::default());
        assert_eq!(ctx.new_session().active(), None);
    }

    #[test]
    fn test_setup_twice() {
        assert!(basic_fitfreak_setup(None, true).is_ok());
        assert!(basic_fitfreak_setup(None, true).is_ok());
    }

    #[test]
    fn test_setup_with_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "(exercise: \"Lunges\")").unwrap();
        let ctx = basic_fitfreak_setup(Some(file.path()), false).unwrap();
        assert_eq!(ctx.new_session().active(), Some(ExerciseKind::Lunges));

        writeln!(file, "oops").unwrap();
        assert!(basic_fitfreak_setup(Some(file.path()), false).is_err());
    }
}
