use kmb_filtering_cli::{exit_code, run};

fn main() {
    if let Err(err) = run() {
        eprintln!("application error: {err}");
        std::process::exit(exit_code(&err));
    }
}
