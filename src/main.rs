use anyhow::Context;
use clap::Parser;
use indentclm::{Cli, ClmError, IndentClm, OutputFormatter, OutputMode, SearchRequest};
use std::io;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = Cli::parse();
    setup_logging(&cli);

    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    // Nothing touches the filesystem until an identifier is known.
    let identifier = match cli.require_identifier() {
        Ok(identifier) => identifier.to_string(),
        Err(e) => {
            print_startup_error(&cli, &e);
            return e.exit_code();
        }
    };

    let indentclm = match IndentClm::from_cli(&cli) {
        Ok(indentclm) => indentclm,
        Err(e) => {
            print_startup_error(&cli, &e);
            return e.exit_code();
        }
    };

    let request = SearchRequest::new(identifier, cli.resolve_search_path(indentclm.config()));

    if cli.dry_run {
        return handle_dry_run(&indentclm, &request);
    }

    let formatter = indentclm.output_formatter();
    match indentclm.run(&request) {
        Ok(report) => {
            formatter.print_run_report(&report);
            formatter.print_result(true);
            0
        }
        Err(e) => {
            indentclm.handle_error(&e);
            formatter.print_result(false);
            e.exit_code()
        }
    }
}

fn setup_logging(cli: &Cli) {
    let filter = match cli.verbosity_level() {
        _ if cli.quiet => "error",
        0 => "warn",
        1 => "indentclm=info",
        2 => "indentclm=debug",
        _ => "trace",
    };

    // A second init (only possible in tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(io::stderr)
        .try_init();
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| "indentclm.toml".into());

    let result = IndentClm::generate_sample_config(&config_path)
        .with_context(|| format!("Failed to generate configuration file {}", config_path.display()));

    match result {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path.display());
            println!("\nTo use this configuration:");
            println!("  indentclm --id <IDENTIFIER> --config {}", config_path.display());
            println!("\nEdit the file to customize settings for your needs.");
            0
        }
        Err(e) => {
            eprintln!("{:#}", e);
            1
        }
    }
}

fn handle_dry_run(indentclm: &IndentClm, request: &SearchRequest) -> i32 {
    let formatter = indentclm.output_formatter();
    let config = indentclm.config();

    formatter.info("DRY RUN MODE - no tool will be run and no file written");
    formatter.print_separator();

    println!("  Identifier:      {}", request.identifier);
    println!("  Search path:     {}", request.search_path.display());
    println!("  Extension:       {}", config.search.extension);
    println!("  Output dir:      {}", config.output.directory.display());
    println!(
        "  Formatter:       {} {}",
        config.formatter.program,
        config.formatter.args.join(" ")
    );
    println!("  Strict format:   {}", config.formatter.strict);
    println!(
        "  Extraction tool: *{}* in ${}",
        config.extractor.tool_name, config.extractor.env_var
    );

    formatter.print_separator();
    formatter.success("Dry run completed successfully");
    0
}

fn print_startup_error(cli: &Cli, error: &ClmError) {
    let formatter = OutputFormatter::new(OutputMode::from(&cli.output_format), 0, false);
    formatter.print_user_friendly_error(error);
}
