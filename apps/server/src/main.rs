#[tokio::main]
async fn main() -> anyhow::Result<()> {
    wordquiz_server::run().await
}
