fn main() {
    if let Err(error) = em_gallery::run_cli() {
        eprintln!("{error}");
        std::process::exit(1);
    }
}
