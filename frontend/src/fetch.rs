//! Record store transport over the browser `fetch` API.

use js_sys::encode_uri_component;
use log::debug;
use serde::{de::DeserializeOwned, Serialize};
use tracker_shared::{
    store::Filter, ClientConfig, Collection, RecordId, RecordStore, TrackerError, TrackerResult,
};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

#[derive(Debug, Clone)]
pub struct FetchStore {
    base_url: String,
}

impl FetchStore {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            base_url: config.api_base_url.clone(),
        }
    }

    fn collection_url(&self, collection: Collection, filters: &[Filter<'_>]) -> String {
        let mut url = format!("{}/{collection}", self.base_url);
        for (index, (field, value)) in filters.iter().enumerate() {
            let separator = if index == 0 { '?' } else { '&' };
            let value = String::from(encode_uri_component(value));
            url.push_str(&format!("{separator}{field}={value}"));
        }
        url
    }

    fn record_url(&self, collection: Collection, id: RecordId) -> String {
        format!("{}/{collection}/{id}", self.base_url)
    }

    /// Sends one request and returns the body of a 2xx response.
    async fn send(&self, method: &str, url: &str, body: Option<String>) -> TrackerResult<String> {
        debug!("event=fetch module=fetch method={method} url={url}");

        let opts = RequestInit::new();
        opts.set_method(method);
        opts.set_mode(RequestMode::Cors);
        if let Some(body) = &body {
            opts.set_body(&JsValue::from_str(body));
        }

        let request = Request::new_with_str_and_init(url, &opts).map_err(network_error)?;
        if body.is_some() {
            request
                .headers()
                .set("Content-Type", "application/json")
                .map_err(network_error)?;
        }

        let window = web_sys::window()
            .ok_or_else(|| TrackerError::Network("no browser window".to_string()))?;
        let response: Response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(network_error)?
            .into();

        if !response.ok() {
            return Err(TrackerError::Server {
                status: response.status(),
            });
        }

        JsFuture::from(response.text().map_err(network_error)?)
            .await
            .map_err(network_error)?
            .as_string()
            .ok_or_else(|| TrackerError::Decode("response body is not text".to_string()))
    }
}

impl RecordStore for FetchStore {
    async fn query<T: DeserializeOwned>(
        &self,
        collection: Collection,
        filters: &[Filter<'_>],
    ) -> TrackerResult<Vec<T>> {
        let text = self
            .send("GET", &self.collection_url(collection, filters), None)
            .await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn insert<B: Serialize, T: DeserializeOwned>(
        &self,
        collection: Collection,
        body: &B,
    ) -> TrackerResult<T> {
        let body = serde_json::to_string(body)?;
        let text = self
            .send("POST", &self.collection_url(collection, &[]), Some(body))
            .await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn replace<B: Serialize, T: DeserializeOwned>(
        &self,
        collection: Collection,
        id: RecordId,
        body: &B,
    ) -> TrackerResult<T> {
        let body = serde_json::to_string(body)?;
        let text = self
            .send("PUT", &self.record_url(collection, id), Some(body))
            .await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn remove(&self, collection: Collection, id: RecordId) -> TrackerResult<()> {
        self.send("DELETE", &self.record_url(collection, id), None)
            .await?;
        Ok(())
    }
}

fn network_error(err: JsValue) -> TrackerError {
    TrackerError::Network(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}
