//! rebound binary entry point.

use std::process::ExitCode;

use rebound::cli::{self, Args};
use rebound::config::Config;
use rebound::{
    execute_async, extract_error, logging, PlainPresenter, Presenter, SearchBackend, SearchQuery,
    UrlBackend,
};
use tracing::{debug, error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let args = match cli::parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("error: {}", e);
            eprintln!("Try 'rebound --help' for more information.");
            return ExitCode::FAILURE;
        }
    };

    if args.help {
        cli::print_help();
        return ExitCode::SUCCESS;
    }

    if args.version {
        cli::print_version();
        return ExitCode::SUCCESS;
    }

    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> rebound::Result<ExitCode> {
    let config = Config::load(&args)?;
    let _ = logging::try_init_with(config.log_filter());

    info!("rebound v{}", env!("CARGO_PKG_VERSION"));

    let target = args.resolve_target()?;
    debug!(command = %target.command.display_line(), language = ?target.language, "resolved target");

    let output = execute_async(target.command, config.relay_options()).await?;
    let exit_code = child_exit_code(output.exit_code);

    if !config.search.enabled {
        return Ok(exit_code);
    }

    let Some(message) = extract_error(&output.stderr, target.language) else {
        info!("no error message to search for");
        return Ok(exit_code);
    };

    let query = SearchQuery::new(message, target.language);
    let backend = UrlBackend::new(config.search.base_url.clone());
    let results = backend.search(&query)?;

    PlainPresenter::stdout().present(&query, &results)?;

    Ok(exit_code)
}

fn child_exit_code(code: Option<i32>) -> ExitCode {
    match code {
        Some(code) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
        // Killed by a signal
        None => ExitCode::FAILURE,
    }
}
