//! Requests one essay from the command line: `completion-client <topic>`.

use completion_client::{ChatCompletionClient, CompletionClient, CompletionOptions, DEFAULT_BASE_URL};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let api_key = std::env::var("DEEPSEEK_API_KEY")
        .or_else(|_| std::env::var("OPENAI_API_KEY"))
        .map_err(|_| anyhow::anyhow!("DEEPSEEK_API_KEY environment variable not set"))?;
    let base_url =
        std::env::var("COMPLETION_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

    let topic = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if topic.trim().is_empty() {
        anyhow::bail!("usage: completion-client <topic>");
    }

    let client = ChatCompletionClient::new(api_key, &base_url, CompletionOptions::default())?;
    let essay = client.complete(&topic).await?;
    println!("{}", essay);

    Ok(())
}
