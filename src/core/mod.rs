//! Core infrastructure module.
//!
//! This module provides the foundational pieces shared by every other
//! module: scalar type aliases, constants and defaults, the error type and
//! the objective function trait.
//!
//! - [`types`]: Fundamental data types and enumerations
//! - [`constants`]: Numerical guards and hyperparameter defaults
//! - [`error`]: Error handling and error types
//! - [`traits`]: Trait abstractions used by the boosting loop

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

pub use constants::*;
pub use error::{Result, XGBError};
pub use traits::*;
pub use types::*;

use std::sync::atomic::{AtomicBool, Ordering};

static CORE_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Initialize the core module: installs the `env_logger` backend for the
/// `log` facade. Safe to call more than once.
pub fn initialize_core() -> Result<()> {
    initialize_logging();
    if !CORE_INITIALIZED.swap(true, Ordering::SeqCst) {
        log::info!("xgb-classifier {} initialized", XGB_CLASSIFIER_VERSION);
    }
    Ok(())
}

/// Check whether [`initialize_core`] has run.
pub fn is_core_initialized() -> bool {
    CORE_INITIALIZED.load(Ordering::SeqCst)
}

fn initialize_logging() {
    // Another logger may already be installed by the host application.
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .is_test(cfg!(test))
        .try_init();
}
