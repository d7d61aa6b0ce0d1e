/// Example implementing a subset of the `tar` utility's option parsing.
///
/// Try `cargo run --example tar -- -cf archive.tar a.txt b.txt` or
/// `RUST_LOG=clopts=trace cargo run --example tar -- --help`.
use clopts::{OptionParser, ParserConfig};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut create = false;
    let mut extract = false;
    let mut archive_file = String::new();

    let (positionals, printed_usage) = {
        let config = ParserConfig::builder()
            .short_option_combination(true)
            .option_terminator(true)
            .build();
        let mut op = OptionParser::with_config(config);
        op.set_base_usage("This is toy example of the tar interface");

        if let Err(error) = register(&mut op, &mut create, &mut extract, &mut archive_file) {
            eprintln!("{error}");
            return ExitCode::FAILURE;
        }

        match op.parse_env() {
            Ok(positionals) => (positionals, op.did_print_usage()),
            Err(error) => {
                eprintln!("{error}");
                return ExitCode::FAILURE;
            }
        }
    };

    // If the user asked for the help message there is nothing else to do
    if printed_usage {
        return ExitCode::SUCCESS;
    }
    if create && extract {
        eprintln!("-c and -x cannot be specified at the same time");
        return ExitCode::FAILURE;
    }
    if !create && !extract {
        eprintln!("Either -c or -x must be specified");
        return ExitCode::FAILURE;
    }
    if archive_file.is_empty() {
        eprintln!("No archive file specified");
        return ExitCode::FAILURE;
    }

    if create {
        let inputs = positionals.get(1..).unwrap_or(&[]);
        if inputs.is_empty() {
            eprintln!("No input files were specified from which to create the archive");
            return ExitCode::FAILURE;
        }
        println!(
            "If this were a real implementation of tar it would create {} from {}",
            archive_file,
            join_names(inputs)
        );
    } else {
        println!("If this were a real implementation of tar it would extract {archive_file}");
    }
    ExitCode::SUCCESS
}

fn register<'a>(
    op: &mut OptionParser<'a>,
    create: &'a mut bool,
    extract: &'a mut bool,
    archive_file: &'a mut String,
) -> clopts::Result<()> {
    op.add_flag(
        'c',
        move || *create = true,
        "Create a new archive containing the specified items.",
    )?;
    op.add_flag('x', move || *extract = true, "Extract to disk from the archive.")?;
    op.add_store(
        'f',
        archive_file,
        "Read the archive from or write the archive to the specified file.",
    )?
    .value_name("archive");
    op.add_config_file(["o", "options"], "Read further options from a file.")?;
    Ok(())
}

fn join_names(names: &[String]) -> String {
    match names {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}
