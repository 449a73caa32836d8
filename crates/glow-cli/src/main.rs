mod cli;

fn main() {
    let exit_code = cli::run_from_env();
    std::process::exit(exit_code);
}
