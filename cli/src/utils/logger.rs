/// Log filter used when `RUST_LOG` is not set. Verbose mode only raises the
/// converter's own modules so dependency chatter stays at `warn`.
fn default_filter(verbose: bool) -> String {
    if verbose {
        "warn,filter_builder=debug,fbq=debug".to_string()
    } else {
        "warn".to_string()
    }
}

pub fn init_logger(verbose: bool) {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter(verbose));
    pretty_env_logger::formatted_builder()
        .parse_filters(&filter)
        .init();
}
