use clap::{Parser, ValueEnum};

/// Which client calls to run
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Plain quick chat
    Quick,
    /// Quick chat with web search enabled
    WebSearch,
    /// Full chat request with explicit sampling parameters
    Full,
    /// All of the above, in order
    All,
}

impl Mode {
    pub fn includes(self, other: Mode) -> bool {
        self == Mode::All || self == other
    }
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "deepseek-quickchat",
    about = "Send a prompt to the DeepSeek chat API and print the answer",
    version
)]
pub struct Cli {
    /// The user prompt to send
    pub prompt: String,

    /// API key for DeepSeek (alternatively use DEEPSEEK_API_KEY env var)
    #[arg(long, env = "DEEPSEEK_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Override the API base URL
    #[arg(long, env = "DEEPSEEK_BASE_URL")]
    pub base_url: Option<String>,

    /// Retries after a failed connection attempt
    #[arg(long, default_value = "3")]
    pub max_retries: u32,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout: u64,

    /// System prompt framing the conversation
    #[arg(long, default_value = "You are a helpful assistant")]
    pub system: String,

    /// Which calls to make
    #[arg(long, value_enum, default_value = "all")]
    pub mode: Mode,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["deepseek-quickchat", "--api-key", "sk-1", "hello"]).unwrap();
        assert_eq!(cli.prompt, "hello");
        assert_eq!(cli.api_key.as_deref(), Some("sk-1"));
        assert_eq!(cli.max_retries, 3);
        assert_eq!(cli.timeout, 30);
        assert_eq!(cli.mode, Mode::All);
    }

    #[test]
    fn test_mode_selection() {
        let cli = Cli::try_parse_from(["deepseek-quickchat", "--mode", "web-search", "hi"]).unwrap();
        assert!(cli.mode.includes(Mode::WebSearch));
        assert!(!cli.mode.includes(Mode::Quick));
        assert!(Mode::All.includes(Mode::Full));
    }

    #[test]
    fn test_prompt_is_required() {
        assert!(Cli::try_parse_from(["deepseek-quickchat"]).is_err());
    }
}
