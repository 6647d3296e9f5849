use authgate::config::Config;
use clap::Parser;
use tracing::{event, Level};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::parse();
    if let Err(e) = authgate::provider::serve(config).await {
        event!(Level::ERROR, error = %e, "Authorization server stopped");
        std::process::exit(1);
    }
}
