//! Command-line and environment configuration for the server binary.

use std::path::PathBuf;

use clap::Parser;

use crate::store::JsonFileStore;

#[derive(Debug, Clone, Parser)]
#[command(name = "patient-records")]
#[command(version, about = "Patient records over a flat JSON file", long_about = None)]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "PATIENTS_ADDR", default_value = "127.0.0.1:8000")]
    pub addr: String,

    /// JSON file holding the record set
    #[arg(long, env = "PATIENTS_DATA_FILE", default_value = "patients.json")]
    pub data_file: PathBuf,

    /// Log filter directive (RUST_LOG takes precedence when set)
    #[arg(long, env = "PATIENTS_LOG", default_value = "info")]
    pub log: String,

    /// Write an empty record set if the data file does not exist
    #[arg(long)]
    pub init: bool,
}

impl Config {
    pub fn store(&self) -> JsonFileStore {
        JsonFileStore::new(&self.data_file)
    }
}
