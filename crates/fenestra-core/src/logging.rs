pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter("debug,fenestra_dock=trace")
        .init();
}
