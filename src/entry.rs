use std::ffi::OsString;
use std::path::Path;

use clap::{ArgMatches, CommandFactory, FromArgMatches};

use boom::app::run_load;
use boom::args::{BoomArgs, DEFAULT_CONFIG_FILES};
use boom::error::AppResult;
use boom::report::Reporter;

pub(crate) fn run() -> AppResult<()> {
    let (mut args, matches) = match parse_args()? {
        Some(parsed) => parsed,
        None => return Ok(()),
    };

    crate::logger::init_logging(args.verbose);

    if let Some(config) = boom::config::load_config(args.config.as_deref())? {
        boom::config::apply_config(&mut args, &matches, &config)?;
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let snapshot = runtime.block_on(run_load(&args))?;
    Reporter::new(args.output).print(&snapshot, &mut std::io::stdout().lock())?;
    Ok(())
}

fn parse_args() -> AppResult<Option<(BoomArgs, ArgMatches)>> {
    let mut cmd = BoomArgs::command();
    let raw_args: Vec<OsString> = std::env::args_os().collect();

    if should_show_help(&raw_args) {
        cmd.print_help()?;
        println!();
        return Ok(None);
    }

    let matches = cmd.get_matches_from(raw_args);
    let args = BoomArgs::from_arg_matches(&matches)?;

    Ok(Some((args, matches)))
}

fn should_show_help(raw_args: &[OsString]) -> bool {
    let treat_as_empty =
        matches!(raw_args, [] | [_]) || matches!(raw_args, [_, second] if second == "--");
    if !treat_as_empty {
        return false;
    }

    !has_default_config()
}

fn has_default_config() -> bool {
    DEFAULT_CONFIG_FILES
        .iter()
        .any(|path| Path::new(path).exists())
}
