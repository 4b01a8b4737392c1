#[tokio::main]
async fn main() {
    chow::start_server().await;
}
