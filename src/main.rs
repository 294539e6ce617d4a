//! Print a usage bar for each memory region of a linker map file.

use regionbar::{cli, error::Error, report};

fn run() -> Result<(), failure::Error> {
    let matches = match cli::cli_options().get_matches_safe() {
        Ok(matches) => matches,
        Err(err) => match err.kind {
            clap::ErrorKind::HelpDisplayed | clap::ErrorKind::VersionDisplayed => err.exit(),
            _ => return Err(Error::Usage(err.message).into()),
        },
    };
    let opts = cli::Options::from_matches(&matches);

    let stdout = std::io::stdout();
    let stderr = std::io::stderr();

    let printed = report::run(
        &opts.config,
        opts.map_file.as_deref(),
        opts.width,
        stdout.lock(),
        stderr.lock(),
    )?;

    log::info!("Printed {} region(s)", printed);

    Ok(())
}

fn main() {
    use console::style;

    env_logger::init();

    if let Err(err) = run() {
        // clap has already formatted usage errors for us.
        if let Some(Error::Usage(msg)) = err.downcast_ref::<Error>() {
            eprintln!("{}", msg);
        } else {
            eprintln!("{} {}", style("error:").red().bold(), err);
            for cause in err.iter_causes() {
                eprintln!("  caused by: {}", cause);
            }
        }

        std::process::exit(1);
    }
}
