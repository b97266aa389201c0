use clap::{Args, Parser, Subcommand};
use regform_core::Gender;
use std::path::PathBuf;

/// CLI arguments for regform
#[derive(Debug, Parser)]
#[command(
    name = "regform",
    version,
    about = "Register, list, edit and delete users against a country/state/city dataset"
)]
pub struct CliArgs {
    /// Geography source (.json, .json.gz, .bin, .bin.gz). Defaults to the embedded dataset.
    #[arg(short = 'd', long = "data", env = "REGFORM_DATA", global = true)]
    pub data: Option<PathBuf>,

    /// Where users are stored: memory, file:<path>, a bare path, or an http(s) URL
    #[arg(
        short = 's',
        long = "store",
        env = "REGFORM_STORE",
        default_value = "file:users.json",
        global = true
    )]
    pub store: String,

    /// Log filter used when RUST_LOG is unset (e.g. info, debug, regform_core=trace)
    #[arg(long = "log-level", env = "REGFORM_LOG", default_value = "info", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show a summary of the geography dataset
    Stats,

    /// List all countries
    Countries,

    /// List the states of a country
    States {
        /// Country name (case- and accent-insensitive)
        country: String,
    },

    /// List the cities of a state, with their pincodes
    Cities {
        country: String,
        state: String,
    },

    /// Search for cities containing a substring
    Search {
        /// Substring to search (case- and accent-insensitive)
        query: String,
    },

    /// Fill in and submit a new registration
    Register {
        #[command(flatten)]
        fields: FieldArgs,
    },

    /// List stored users
    Users,

    /// Change a stored user and save it back
    Edit {
        /// Id of the stored user
        id: String,

        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Delete a stored user
    Delete {
        /// Id of the stored user
        id: String,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },
}

/// One flag per form field. Unset flags leave the field as it is.
#[derive(Debug, Default, Args)]
pub struct FieldArgs {
    #[arg(long = "full-name")]
    pub full_name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    /// Only used when no birth date is given
    #[arg(long)]
    pub age: Option<u32>,

    /// Date of birth, YYYY-MM-DD
    #[arg(long)]
    pub dob: Option<String>,

    /// Male or Female
    #[arg(long)]
    pub gender: Option<Gender>,

    #[arg(long)]
    pub address: Option<String>,

    #[arg(long)]
    pub country: Option<String>,

    #[arg(long)]
    pub state: Option<String>,

    #[arg(long)]
    pub city: Option<String>,
}
