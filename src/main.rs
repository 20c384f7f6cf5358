use gvt::cli::Cli;
use gvt::error::{MISSING_COMMAND_CODE, exit_code_of};
use gvt::logging::init::flush_logs;
use gvt::{MissingCommand, run};

fn main() {
    let cli = Cli::parse_args();

    if let Err(err) = run(&cli) {
        eprintln!("{err}");
        for cause in err.chain().skip(1) {
            eprintln!("  caused by: {cause}");
        }

        let code = if err.is::<MissingCommand>() {
            MISSING_COMMAND_CODE
        } else {
            exit_code_of(&err)
        };
        flush_logs();
        std::process::exit(code);
    }
    flush_logs();
}
