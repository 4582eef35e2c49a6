#![allow(dead_code)]

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use tokio::net::TcpListener;
use url::Url;
use url_summarizer::error::{AppError, Result};
use url_summarizer::fetcher::{ContentFetcher, Fragment};
use url_summarizer::llm::Summarizer;
use url_summarizer::model::ChatModel;
use url_summarizer::AppState;

#[derive(Clone, Debug)]
pub enum FetchReply {
    Fragments(Vec<&'static str>),
    Fail(&'static str),
}

/// Fetcher that replays queued replies and records requested URLs.
/// The last reply repeats once the queue is drained.
#[derive(Default)]
pub struct StubFetcher {
    replies: Mutex<VecDeque<FetchReply>>,
    pub calls: Mutex<Vec<String>>,
}

impl StubFetcher {
    pub fn new(replies: impl IntoIterator<Item = FetchReply>) -> Arc<Self> {
        Arc::new(StubFetcher {
            replies: Mutex::new(replies.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn empty() -> Arc<Self> {
        Arc::new(StubFetcher::default())
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ContentFetcher for StubFetcher {
    async fn fetch(&self, url: &Url) -> Result<Vec<Fragment>> {
        self.calls.lock().unwrap().push(url.to_string());
        let reply = {
            let mut replies = self.replies.lock().unwrap();
            if replies.len() > 1 {
                replies.pop_front()
            } else {
                replies.front().cloned()
            }
        };
        match reply.unwrap_or(FetchReply::Fragments(Vec::new())) {
            FetchReply::Fragments(texts) => Ok(texts.into_iter().map(Fragment::new).collect()),
            FetchReply::Fail(msg) => Err(AppError::FetchError(msg.to_string())),
        }
    }
}

/// Summarizer that returns a fixed reply and records its inputs.
pub struct StubSummarizer {
    reply: std::result::Result<&'static str, &'static str>,
    pub calls: Mutex<Vec<(String, ChatModel)>>,
}

impl StubSummarizer {
    pub fn replying(text: &'static str) -> Arc<Self> {
        Arc::new(StubSummarizer { reply: Ok(text), calls: Mutex::new(Vec::new()) })
    }

    pub fn failing(msg: &'static str) -> Arc<Self> {
        Arc::new(StubSummarizer { reply: Err(msg), calls: Mutex::new(Vec::new()) })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_call(&self) -> Option<(String, ChatModel)> {
        self.calls.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Summarizer for StubSummarizer {
    async fn summarize(&self, text: &str, model: ChatModel) -> Result<String> {
        self.calls.lock().unwrap().push((text.to_string(), model));
        match self.reply {
            Ok(text) => Ok(text.to_string()),
            Err(msg) => Err(AppError::LlmError(msg.to_string())),
        }
    }
}

pub fn app_state(fetcher: Arc<StubFetcher>, summarizer: Arc<StubSummarizer>) -> AppState {
    AppState { fetcher, summarizer }
}

/// Serves `router` on an ephemeral localhost port.
pub async fn serve(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    addr
}
