pub mod chunk;
pub mod gate;
pub mod prompt;

use anyhow::Error;
use chrono::Local;

use chunk::split_message;
use gate::ensure_verifiable;
use prompt::build_prompt;

use crate::config::AppConfig;
use crate::tools::openai::OpenAiClient;
use crate::tools::telegram::TelegramClient;

pub struct Agent {
    completion: OpenAiClient,
    delivery: Option<TelegramClient>,
    max_len: usize,
}

impl Agent {
    /// Builds both clients up front so missing credentials fail the run
    /// before any request is made. Delivery is skipped in dry-run mode.
    pub fn new(config: AppConfig) -> Result<Self, Error> {
        let max_len = config.telegram.max_len();
        let completion = OpenAiClient::new(config.openai)?;
        let delivery = if config.dry_run.unwrap_or(false) {
            log::info!("dry run: brief will not be delivered");
            None
        } else {
            Some(TelegramClient::new(config.telegram)?)
        };

        Ok(Self {
            completion,
            delivery,
            max_len,
        })
    }

    /// Generates today's brief, delivers it and returns the chunks in send order.
    pub async fn run(&self) -> Result<Vec<String>, Error> {
        let today = Local::now().date_naive();
        let prompt = build_prompt(today);
        log::info!("sending prompt for {} to model", today);

        let brief = self.completion.complete(&prompt).await?;
        let brief = ensure_verifiable(brief);
        let chunks = split_message(&brief, self.max_len);
        log::info!("brief split into {} chunks", chunks.len());

        if let Some(delivery) = &self.delivery {
            delivery.send_chunks(&chunks).await?;
            log::info!("delivered {} chunks", chunks.len());
        }
        Ok(chunks)
    }
}
