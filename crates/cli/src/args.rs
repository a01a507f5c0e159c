//! Command-line surface of the stage-in binary.
//!
//! The list flags each carry one comma-joined sequence; the sequences are
//! parallel and reconciled downstream, so they stay raw strings here.

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "stagein", about = "Stage input files into a job work directory")]
pub struct Args {
    /// Enable debug mode for logging messages
    #[arg(short = 'd')]
    pub debug: bool,

    /// Queue name (e.g., AGLT2_TEST-condor)
    #[arg(short = 'q', required = true)]
    pub queuename: String,

    /// Working directory
    #[arg(short = 'w', default_value_os_t = default_workdir())]
    pub workdir: PathBuf,

    /// List of scopes (e.g., mc16_13TeV,mc16_13TeV)
    #[arg(long, required = true)]
    pub scopes: String,

    /// LFN list (e.g., filename1,filename2)
    #[arg(long, required = true)]
    pub lfns: String,

    /// Event type
    #[arg(long, required = true)]
    pub eventtype: String,

    /// Local site
    #[arg(long, required = true)]
    pub localsite: String,

    /// Remote site
    #[arg(long, required = true)]
    pub remotesite: String,

    /// Production user id
    #[arg(long, required = true)]
    pub produserid: String,

    /// Job id
    #[arg(long, required = true)]
    pub jobid: String,

    /// Task id
    #[arg(long, required = true)]
    pub taskid: String,

    /// Job definition id
    #[arg(long, required = true)]
    pub jobdefinitionid: String,

    /// Event service merge boolean
    #[arg(long, action = clap::ArgAction::Set, value_parser = parse_bool_string, default_value = "false")]
    pub eventservicemerge: bool,

    /// pcache boolean from queue metadata
    #[arg(long, action = clap::ArgAction::Set, value_parser = parse_bool_string, default_value = "false")]
    pub usepcache: bool,

    /// Do not write the pilot log to file
    #[arg(long = "no-pilot-log")]
    pub nopilotlog: bool,

    /// Replica file sizes
    #[arg(long, required = true)]
    pub filesizes: String,

    /// Replica checksums
    #[arg(long, required = true)]
    pub checksums: String,

    /// Replica allow_lan
    #[arg(long, required = true)]
    pub allowlans: String,

    /// Replica allow_wan
    #[arg(long, required = true)]
    pub allowwans: String,

    /// Replica direct_access_lan
    #[arg(long, required = true)]
    pub directaccesslans: String,

    /// Replica direct_access_wan
    #[arg(long, required = true)]
    pub directaccesswans: String,

    /// Replica is_tar
    #[arg(long, required = true)]
    pub istars: String,

    /// Replica access modes
    #[arg(long, required = true)]
    pub accessmodes: String,

    /// Replica storage tokens
    #[arg(long, required = true)]
    pub storagetokens: String,

    /// Replica guids
    #[arg(long, required = true)]
    pub guids: String,
}

fn default_workdir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Boolean flags arrive as strings from the launcher, with the historical
/// token set: yes/true/t/y/1 and no/false/f/n/0, case-insensitive.
fn parse_bool_string(value: &str) -> Result<bool, String> {
    match value.to_lowercase().as_str() {
        "yes" | "true" | "t" | "y" | "1" => Ok(true),
        "no" | "false" | "f" | "n" | "0" => Ok(false),
        other => Err(format!("boolean value expected, got '{}'", other)),
    }
}
