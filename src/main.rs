use swagcheck::cli::run_cli;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if let Err(err) = run_cli() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
