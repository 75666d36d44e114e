//! Configuration module for the IP list synchronizer.
//!
//! This module handles all configuration-related functionality:
//! - Loading a `.env` file into the process environment
//! - Resolving PCE connection settings from flags and environment
//! - Validating the resolved settings

mod env;
mod settings;
mod validator;

pub use env::{load_dotenv, DOTENV_FILE};
pub use settings::{PceSettings, DEFAULT_ORG_ID, DEFAULT_PORT};
pub use validator::{SettingsValidator, ValidationError};
