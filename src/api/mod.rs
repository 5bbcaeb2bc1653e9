use futures::future::BoxFuture;

pub use radio_browser::RadioBrowser;

use crate::models::{SearchQuery, Station};

mod radio_browser;

pub trait Client: Sync + Send {
    fn search(&self, query: &SearchQuery) -> BoxFuture<anyhow::Result<Vec<Station>>>;
}
