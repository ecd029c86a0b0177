#[tokio::main]
async fn main() {
    if let Err(e) = tenancy_backend::run().await {
        tracing::error!("Fatal: {}", e);
        eprintln!("tenancy-backend failed to start: {}", e);
        std::process::exit(1);
    }
}
