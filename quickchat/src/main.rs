use anyhow::Context;
use clap::Parser;
use deepseek_client::{ChatRequest, Config, DeepSeekClient, Message};
use flexi_logger::{Logger, WriteMode};
use log::{info, warn};

mod cli;

use cli::{Cli, Mode};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let _logger = Logger::try_with_str(&cli.log_level)?
        .write_mode(WriteMode::BufferAndFlush)
        .log_to_stderr()
        .start()?;

    let api_key = match cli.api_key {
        Some(key) => key,
        None => {
            warn!("API key not set, exiting");
            return Ok(());
        }
    };

    let mut config = Config::new(api_key)
        .with_max_retries(cli.max_retries)
        .with_timeout_secs(cli.timeout);
    if let Some(base_url) = cli.base_url {
        config = config.with_base_url(base_url);
    }
    info!("Using {config:?}");

    let client = DeepSeekClient::new(config).context("Failed to create DeepSeek client")?;

    if cli.mode.includes(Mode::Quick) {
        let answer = client
            .quick_chat(cli.system.as_str(), cli.prompt.as_str())
            .await
            .context("Quick chat failed")?;
        println!("Quick chat response:\n{answer}\n");
    }

    if cli.mode.includes(Mode::WebSearch) {
        let answer = client
            .quick_chat_web_search(cli.system.as_str(), cli.prompt.as_str())
            .await
            .context("Quick chat with web search failed")?;
        println!("Web search response:\n{answer}\n");
    }

    if cli.mode.includes(Mode::Full) {
        let request = ChatRequest::builder()
            .model("deepseek-chat")
            .message(Message::system(cli.system.as_str()))
            .message(Message::user(cli.prompt.as_str()))
            .max_tokens(1024)
            .temperature(0.7)
            .web_search(true)
            .build();
        let response = client.chat(request).await.context("Chat failed")?;

        println!("Detailed response:");
        println!("ID: {}", response.id);
        println!("Model: {}", response.model);
        if let Some(choice) = response.first_choice() {
            println!("Assistant: {}", choice.message.content);
            if choice.was_truncated() {
                println!("(answer truncated at the max_tokens limit)");
            }
        }
        println!(
            "Token usage: Prompt={}, Completion={}, Total={}",
            response.usage.prompt_tokens,
            response.usage.completion_tokens,
            response.usage.total_tokens
        );
    }

    Ok(())
}
