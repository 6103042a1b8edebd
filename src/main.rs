fn main() {
    if let Err(e) = triagecare_lib::run() {
        eprintln!("triagecare: {e}");
        std::process::exit(1);
    }
}
