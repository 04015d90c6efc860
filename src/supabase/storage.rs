use crate::config::SupabaseConfig;
use crate::error::AppError;

/// Uploads objects to a Supabase Storage bucket and builds their public URLs.
#[derive(Clone)]
pub struct StorageClient {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
    bucket: String,
}

impl StorageClient {
    pub fn new(config: &SupabaseConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: format!("{}/storage/v1", config.url),
            anon_key: config.anon_key.clone(),
            bucket: config.storage_bucket.clone(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Store `bytes` at `path`, authenticated as the uploading user.
    pub async fn upload(
        &self,
        access_token: &str,
        path: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<(), AppError> {
        let url = format!("{}/object/{}/{}", self.base_url, self.bucket, path);

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v["message"].as_str().map(str::to_string))
                .unwrap_or_else(|| format!("Storage upload failed with HTTP {status}"));
            return Err(AppError::Backend {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }

    pub fn public_url(&self, path: &str) -> String {
        public_object_url(&self.base_url, &self.bucket, path)
    }
}

pub fn public_object_url(storage_base: &str, bucket: &str, path: &str) -> String {
    format!("{storage_base}/object/public/{bucket}/{path}")
}

/// Object path for a project attachment: `project-files/{project}/{random}.{ext}`.
pub fn attachment_path(project_id: uuid::Uuid, file_name: &str) -> String {
    let object = uuid::Uuid::new_v4().simple().to_string();
    match file_extension(file_name) {
        Some(ext) => format!("project-files/{project_id}/{object}.{ext}"),
        None => format!("project-files/{project_id}/{object}"),
    }
}

pub fn file_extension(file_name: &str) -> Option<&str> {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty() && !ext.contains('/'))
}

/// Best-effort content type from the file extension.
pub fn content_type_for(file_name: &str) -> &'static str {
    match file_extension(file_name).map(|e| e.to_ascii_lowercase()).as_deref() {
        Some("pdf") => "application/pdf",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("txt") => "text/plain",
        Some("csv") => "text/csv",
        Some("zip") => "application/zip",
        Some("doc") => "application/msword",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        _ => "application/octet-stream",
    }
}
