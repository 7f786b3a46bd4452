#[tokio::main]
async fn main() {
    if let Err(e) = planetarium::run().await {
        eprintln!("{:?}", e);
        std::process::exit(1);
    }
}
