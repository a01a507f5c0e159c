mod args;
mod exit;
mod logging;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, warn};

use stagein_core::{
    build_file_specs, dispatch, load_default_config, report_path, write_report, FileLists,
    InfoService, InvocationContext, JobInfo, RawFileLists, StatusReport, TraceReport,
    TransferBackend, TransferOptions,
};

use args::Args;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    match run(args).await {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            // logging may not be installed yet when this path is taken
            eprintln!("error: {:#}", e);
            ExitCode::from(exit::GENERAL_FAILURE as u8)
        }
    }
}

async fn run(args: Args) -> Result<i32> {
    let config = load_default_config().context("failed to load configuration")?;

    logging::init(
        args.debug,
        &args.workdir,
        &config.logging.filename,
        args.nopilotlog,
    )
    .context("failed to initialize logging")?;

    let ctx = InvocationContext {
        queuename: args.queuename,
        workdir: args.workdir,
        eventtype: args.eventtype,
        localsite: args.localsite,
        remotesite: args.remotesite,
        event_service_merge: args.eventservicemerge,
        use_pcache: args.usepcache,
        job: JobInfo::new(
            args.produserid,
            args.jobid,
            args.taskid,
            args.jobdefinitionid,
        ),
    };

    let lists = FileLists::reconcile(&RawFileLists {
        lfns: Some(&args.lfns),
        scopes: Some(&args.scopes),
        filesizes: Some(&args.filesizes),
        checksums: Some(&args.checksums),
        allowlans: Some(&args.allowlans),
        allowwans: Some(&args.allowwans),
        directaccesslans: Some(&args.directaccesslans),
        directaccesswans: Some(&args.directaccesswans),
        istars: Some(&args.istars),
        accessmodes: Some(&args.accessmodes),
        storagetokens: Some(&args.storagetokens),
        guids: Some(&args.guids),
    });
    let mut files = build_file_specs(&lists, &ctx.workdir);

    let trace = TraceReport::new(&ctx);
    trace.send(&config.trace).await;

    let mut info_service = InfoService::new(config.infoservice.clone());
    if let Err(e) = info_service.init(&ctx.queuename).await {
        warn!("queue metadata lookup failed: {}", e);
    }

    let (backend, activity) = TransferBackend::select(&ctx, Arc::new(info_service));
    let options = TransferOptions::for_invocation(&ctx);
    let outcome = dispatch(&backend, &mut files, activity, &options).await;

    let report = StatusReport::from_transfers(&files, &outcome);
    let path = report_path(&ctx.workdir, &config.report);
    write_report(&path, &report)
        .with_context(|| format!("failed to write status report to {:?}", path))?;

    // the exit decision keys on the extracted message persisted in the
    // report's error entry, not on the raw captured failure
    let error_message = report.error_message();
    if !error_message.is_empty() {
        error!("containerised file transfers failed: {}", error_message);
        return Ok(exit::TRANSFER_ERROR);
    }

    info!("wrote {}", path.display());
    info!("containerised file transfers finished");
    Ok(exit::SUCCESS)
}
