use colored::Colorize;

fn main() {
    if let Err(err) = registrar::run() {
        eprintln!("{} {}", "✗".bright_red(), err);
        std::process::exit(1);
    }
}
