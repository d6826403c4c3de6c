use scrollmark::config::scrollmark_config::ScrollmarkConfig;

const DEFAULT_LOGGING: &'static str = "info,scrollmark=info,actix_web=warn,reqwest=warn";

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // init logging from RUST_LOG env var with info as default
    env_logger::Builder::from_env(env_logger::Env::default()
        .default_filter_or(DEFAULT_LOGGING))
        .init();
    let app_config = ScrollmarkConfig::read_args();

    scrollmark::run_server(app_config).await
}
