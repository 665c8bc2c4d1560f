use simbench::cli;

fn main() {
    std::process::exit(cli::run());
}
