//! tabstack library exports for testing

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub mod cli;
pub mod core;

#[cfg(test)]
pub mod test_support;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
