#[tokio::main]
async fn main() -> anyhow::Result<()> {
    paraules_player::run().await
}
