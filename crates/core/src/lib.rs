pub mod config;
pub mod context;
pub mod filespec;
pub mod infoservice;
pub mod report;
pub mod testing;
pub mod trace;
pub mod transfer;

pub use config::{
    load_config, load_config_from_str, load_default_config, Config, ConfigError, CONFIG_PATH_ENV,
};
pub use context::{InvocationContext, JobInfo};
pub use filespec::{
    build_file_specs, FileLists, FileSpec, FileType, FlagValue, RawFileLists, StatusCode,
};
pub use infoservice::{InfoService, InfoServiceError, QueueData};
pub use report::{
    extract_error_info, report_path, write_report, ReportError, StatusEntry, StatusReport,
    ERROR_KEY,
};
pub use trace::{TraceReport, PILOT_SITENAME_ENV};
pub use transfer::{
    dispatch, Activity, DispatchOutcome, EventServiceClient, StandardClient, TransferBackend,
    TransferClient, TransferError, TransferOptions, DISPATCH_ERROR_CODE,
};
