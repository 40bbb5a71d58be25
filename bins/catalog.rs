//! Project catalog: JSON-file project list with image uploads.

fn main() -> std::process::ExitCode {
    server::bootstrap::launch("catalog", server::run_catalog)
}
