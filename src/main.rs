use colored::Colorize;

fn main() {
    if let Err(e) = lotus_submit::run() {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}
