use clap::Parser;
use std::path::PathBuf;

use crate::domain::KeyPolicy;

#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "wasps",
    version,
    about = "A CLI tool for consuming and seeding the AWS Parameter Store",
    long_about = None
)]
pub struct Args {
    /// The AWS profile you wish to use. Located in ~/.aws/credentials
    #[arg(long, short = 'p', value_name = "PROFILE")]
    pub profile: Option<String>,

    /// The AWS access key you wish to use to authenticate
    #[arg(long, short = 'a', value_name = "ACCESS_KEY")]
    pub access_key: Option<String>,

    /// The AWS secret key you wish to use to authenticate
    #[arg(long, short = 's', value_name = "SECRET_KEY")]
    pub secret_key: Option<String>,

    /// The AWS session token you wish to use to authenticate
    #[arg(long = "session", short = 'l', value_name = "SESSION_TOKEN")]
    pub session_token: Option<String>,

    /// The AWS region you wish to authenticate to
    #[arg(long, short = 'r', value_name = "REGION")]
    pub region: Option<String>,

    /// The parameter paths to retrieve. Later paths override earlier ones on key collision
    #[arg(long, short = 'd', num_args = 1.., value_name = "PATH")]
    pub parameter_path: Vec<String>,

    /// Write the merged parameters to this JSON file
    #[arg(long, short = 'j', value_name = "FILE")]
    pub json: Option<PathBuf>,

    /// Write the merged parameters to this INI file
    #[arg(long, short = 'i', value_name = "FILE")]
    pub ini: Option<PathBuf>,

    /// Write the merged parameters to this Java properties file
    #[arg(long, short = 'o', value_name = "FILE")]
    pub properties: Option<PathBuf>,

    /// JSON file of `name: value` pairs to write to the store before reading
    #[arg(long, short = 'c', value_name = "FILE", conflicts_with = "config_json")]
    pub config: Option<PathBuf>,

    /// Inline JSON object of `name: value` pairs to write to the store before reading
    #[arg(long, value_name = "JSON")]
    pub config_json: Option<String>,

    /// Do not print parameter values to stdout. Use if you have sensitive outputs
    #[arg(long, short = 'n', alias = "supress")]
    pub suppress: bool,

    /// How parameter names become output keys: full, relative (to the fetched path) or name
    #[arg(long, value_name = "POLICY", default_value_t = KeyPolicy::Relative)]
    pub key_policy: KeyPolicy,

    /// Split keys on '/' into nested JSON objects
    #[arg(long)]
    pub nested: bool,

    /// Write all INI entries under a single [SECTION] header
    #[arg(long, value_name = "SECTION")]
    pub ini_section: Option<String>,

    /// Override the SSM endpoint (e.g., http://localhost:4566)
    #[arg(long, value_name = "URL")]
    pub endpoint_url: Option<String>,

    /// Log debug output to stderr
    #[arg(long, short = 'v')]
    pub verbose: bool,
}
