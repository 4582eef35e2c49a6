use std::time::Instant;

use tracing::{debug, error, info, warn};
use url::Url;

use crate::error::{AppError, Result};
use crate::fetcher::{ContentFetcher, Fragment};
use crate::llm::Summarizer;
use crate::model::ChatModel;
use crate::validate::validate_url;

/// What a single invocation ends with. Exactly one is rendered per click.
#[derive(Debug)]
pub enum Outcome {
    /// Input was refused before any network call.
    Rejected(AppError),
    Summarized(Summary),
    Failed(AppError),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Summary {
    pub url: Url,
    pub model: ChatModel,
    pub text: String,
    /// Words in the text that was sent for summarization.
    pub article_words: usize,
}

/// Joins fragment texts in order with a blank line between them.
pub fn join_fragments(fragments: &[Fragment]) -> String {
    fragments
        .iter()
        .map(|fragment| fragment.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Runs one invocation from raw input to a renderable outcome.
pub async fn run(
    fetcher: &dyn ContentFetcher,
    summarizer: &dyn Summarizer,
    raw_url: &str,
    model: ChatModel,
) -> Outcome {
    debug!(stage = "validating", "pipeline");
    let url = match validate_url(raw_url) {
        Ok(url) => url,
        Err(err) => {
            warn!(input = raw_url, reason = %err, "rejected URL");
            return Outcome::Rejected(err);
        }
    };

    let start = Instant::now();
    info!(url = %url, model = %model, "summarizing");

    match fetch_and_summarize(fetcher, summarizer, &url, model).await {
        Ok((text, article_words)) => {
            info!(url = %url, elapsed = ?start.elapsed(), "summary ready");
            Outcome::Summarized(Summary {
                url,
                model,
                text,
                article_words,
            })
        }
        Err(err) => {
            error!(url = %url, elapsed = ?start.elapsed(), error = %err, "pipeline failed");
            Outcome::Failed(err)
        }
    }
}

async fn fetch_and_summarize(
    fetcher: &dyn ContentFetcher,
    summarizer: &dyn Summarizer,
    url: &Url,
    model: ChatModel,
) -> Result<(String, usize)> {
    debug!(stage = "fetching", "pipeline");
    let fragments = fetcher.fetch(url).await?;

    let article = join_fragments(&fragments);
    let article_words = article.split_whitespace().count();
    debug!(stage = "fetched", fragments = fragments.len(), words = article_words, "pipeline");

    debug!(stage = "summarizing", "pipeline");
    let summary = summarizer.summarize(&article, model).await?;
    debug!(stage = "summarized", chars = summary.len(), "pipeline");

    Ok((summary, article_words))
}
