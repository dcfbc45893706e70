fn main() {
    if let Err(err) = portline::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
