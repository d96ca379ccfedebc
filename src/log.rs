// RustGamekit
// copyright rust_gamekit contributors 2016～2025

//! Log module sets up the file logger, reference
//! https://docs.rs/log4rs

use log::LevelFilter;
use thiserror::Error;

#[cfg(feature = "log4rs")]
use log4rs::{
    append::file::FileAppender,
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
};

#[derive(Debug, Error)]
pub enum LogError {
    #[error("create log file {path}: {source}")]
    Appender {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("log config: {0}")]
    Config(String),
    #[error("logger already installed")]
    AlreadyInstalled,
}

/// init logs system
#[cfg(feature = "log4rs")]
pub fn init_log(level: LevelFilter, file_path: &str) -> Result<(), LogError> {
    let logfile = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} {l} {t} {m}{n}",
        )))
        .build(file_path)
        .map_err(|source| LogError::Appender {
            path: file_path.to_string(),
            source,
        })?;
    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(level)))
                .build("logfile", Box::new(logfile)),
        )
        .build(Root::builder().appender("logfile").build(level))
        .map_err(|e| LogError::Config(e.to_string()))?;
    log4rs::init_config(config).map_err(|_| LogError::AlreadyInstalled)?;
    Ok(())
}

/// without log4rs the `log` macros stay no-ops
#[cfg(not(feature = "log4rs"))]
pub fn init_log(level: LevelFilter, _file_path: &str) -> Result<(), LogError> {
    log::set_max_level(level);
    Ok(())
}

/// init logs from the `[log]` section of the engine config
pub fn init_log_from_config(cfg: &crate::config::LogConfig) -> Result<(), LogError> {
    init_log(cfg.level_filter(), &cfg.file)
}
