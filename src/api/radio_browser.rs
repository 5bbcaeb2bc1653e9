use std::sync::Arc;

use anyhow::Context;
use futures::future::BoxFuture;
use reqwest::{redirect::Policy, ClientBuilder, Url};
use serde::de::DeserializeOwned;

use crate::models::{SearchQuery, Station};

use super::Client;

const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

const SEARCH_PATH: &str = "/json/stations/search";

pub struct RadioBrowser {
    addr: Arc<Url>,
    client: reqwest::Client,
}

impl RadioBrowser {
    pub fn new(addr: &str) -> anyhow::Result<Self> {
        let addr = Arc::new(addr.parse().context("parse api url")?);
        let client = ClientBuilder::new()
            .user_agent(APP_USER_AGENT)
            .redirect(Policy::default())
            .build()
            .context("build http client")?;

        Ok(Self { addr, client })
    }

    async fn get<T: DeserializeOwned>(
        client: reqwest::Client,
        addr: Arc<Url>,
        path: &str,
        params: Vec<(&'static str, String)>,
    ) -> anyhow::Result<T> {
        let uri = addr.join(path).context("build url")?;
        let res = client
            .get(uri)
            .query(&params)
            .send()
            .await
            .context("get")?
            .error_for_status()
            .context("status")?;

        res.json().await.context("unmarshal json")
    }
}

impl Client for RadioBrowser {
    fn search(&self, query: &SearchQuery) -> BoxFuture<anyhow::Result<Vec<Station>>> {
        let addr = self.addr.clone();
        let client = self.client.clone();
        let params = search_params(query);

        Box::pin(async move { Self::get(client, addr, SEARCH_PATH, params).await })
    }
}

// Pairs go through reqwest's query serializer, so terms get URL-encoded.
// Empty name/country mean "no filter" and are left out entirely.
fn search_params(query: &SearchQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("limit", query.limit.to_string()),
        ("hidebroken", "true".to_string()),
        ("order", "votes".to_string()),
        ("reverse", "true".to_string()),
    ];

    if let Some(code) = query.country_code.as_deref().filter(|c| !c.is_empty()) {
        params.push(("countrycode", code.to_string()));
    }

    if let Some(name) = query.name.as_deref().filter(|n| !n.is_empty()) {
        params.push(("name", name.to_string()));
    }

    params
}
