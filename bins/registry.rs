//! Admin project registry: in-memory project list behind HTTP Basic auth.

fn main() -> std::process::ExitCode {
    server::bootstrap::launch("registry", server::run_registry)
}
