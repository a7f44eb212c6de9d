use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

use super::types::{DirEntry, KernelEnvelope, Notebook, NotebooksData, RawBlock};
use super::{HostApi, HostError};

/// HTTP client for the SiYuan kernel API. All endpoints are POST with a
/// JSON body and answer with a `{code, msg, data}` envelope, except
/// `getFile` which streams the file body directly.
#[derive(Clone)]
pub struct KernelClient {
    base_url: String,
    token: String,
    http: Client,
}

impl KernelClient {
    pub fn new(base_url: &str, token: &str) -> Result<Self, HostError> {
        let http = Client::builder().build()?;
        Ok(KernelClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            http,
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    fn auth_header(&self) -> String {
        format!("Token {}", self.token)
    }

    /// POST a JSON payload and unwrap the kernel envelope.
    async fn post<P: Serialize, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        payload: &P,
    ) -> Result<Option<T>, HostError> {
        debug!(endpoint, "kernel call");
        let resp = self
            .http
            .post(self.url(endpoint))
            .header("Authorization", self.auth_header())
            .json(payload)
            .send()
            .await?;
        let envelope: KernelEnvelope<T> = resp.json().await?;
        if envelope.code != 0 {
            return Err(HostError::Kernel {
                code: envelope.code,
                msg: envelope.msg,
            });
        }
        Ok(envelope.data)
    }
}

#[async_trait]
impl HostApi for KernelClient {
    async fn sql_query(&self, stmt: &str) -> Result<Vec<RawBlock>, HostError> {
        let rows: Option<Vec<RawBlock>> =
            self.post("/api/query/sql", &json!({ "stmt": stmt })).await?;
        Ok(rows.unwrap_or_default())
    }

    async fn ls_notebooks(&self) -> Result<Vec<Notebook>, HostError> {
        let data: Option<NotebooksData> =
            self.post("/api/notebook/lsNotebooks", &json!({})).await?;
        Ok(data.map(|d| d.notebooks).unwrap_or_default())
    }

    async fn doc_hpath(&self, doc_id: &str) -> Result<String, HostError> {
        let path: Option<String> = self
            .post("/api/filetree/getHPathByID", &json!({ "id": doc_id }))
            .await?;
        Ok(path.unwrap_or_default())
    }

    async fn get_file(&self, path: &str) -> Result<Vec<u8>, HostError> {
        let resp = self
            .http
            .post(self.url("/api/file/getFile"))
            .header("Authorization", self.auth_header())
            .json(&json!({ "path": path }))
            .send()
            .await?;
        let bytes = resp.bytes().await?.to_vec();
        // A missing file comes back as a JSON envelope with a non-zero
        // code instead of the file body.
        if let Ok(envelope) = serde_json::from_slice::<KernelEnvelope<serde_json::Value>>(&bytes) {
            if envelope.code != 0 {
                return Err(HostError::FileNotFound(path.to_string()));
            }
        }
        Ok(bytes)
    }

    async fn put_file(&self, path: &str, data: Vec<u8>) -> Result<(), HostError> {
        let file_name = path.rsplit('/').next().unwrap_or("file").to_string();
        let part = reqwest::multipart::Part::bytes(data).file_name(file_name);
        let form = reqwest::multipart::Form::new()
            .text("path", path.to_string())
            .text("isDir", "false")
            .text("modTime", chrono::Utc::now().timestamp_millis().to_string())
            .part("file", part);
        let resp = self
            .http
            .post(self.url("/api/file/putFile"))
            .header("Authorization", self.auth_header())
            .multipart(form)
            .send()
            .await?;
        let envelope: KernelEnvelope<serde_json::Value> = resp.json().await?;
        if envelope.code != 0 {
            return Err(HostError::Kernel {
                code: envelope.code,
                msg: envelope.msg,
            });
        }
        Ok(())
    }

    async fn remove_file(&self, path: &str) -> Result<(), HostError> {
        let _: Option<serde_json::Value> = self
            .post("/api/file/removeFile", &json!({ "path": path }))
            .await?;
        Ok(())
    }

    async fn read_dir(&self, path: &str) -> Result<Vec<DirEntry>, HostError> {
        let entries: Option<Vec<DirEntry>> = self
            .post("/api/file/readDir", &json!({ "path": path }))
            .await?;
        Ok(entries.unwrap_or_default())
    }
}
