//! Entry point for the `loadline` command-line interface.
#![forbid(unsafe_code)]

use loadline_cli::CliError;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    if let Err(err) = loadline_cli::run() {
        report(&err);
        std::process::exit(1);
    }
}

#[expect(clippy::print_stderr, reason = "fatal errors are reported on stderr")]
fn report(err: &CliError) {
    eprintln!("loadline: {err}");
}
