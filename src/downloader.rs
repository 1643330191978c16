use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::{Client, ClientBuilder};
use url::Url;

use crate::error::ArchiveError;
use crate::file_manager::FileManager;
use crate::html_parser::{self, LocalizedResource};
use crate::naming::PageContext;

/// HTTP fetch collaborator; text and binary variants over one client.
#[derive(Debug)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new() -> Result<Self, ArchiveError> {
        let client = ClientBuilder::new()
            .use_rustls_tls()
            .user_agent("PageArchiver/1.0")
            .timeout(std::time::Duration::from_secs(480))
            .build()
            .map_err(ArchiveError::Client)?;

        Ok(Self { client })
    }

    pub async fn fetch_text(&self, url: &Url) -> Result<String, ArchiveError> {
        let response = self.get(url).await?;
        response
            .text()
            .await
            .map_err(|source| ArchiveError::Request {
                url: url.to_string(),
                source,
            })
    }

    pub async fn fetch_binary(&self, url: &Url) -> Result<Vec<u8>, ArchiveError> {
        let response = self.get(url).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|source| ArchiveError::Request {
                url: url.to_string(),
                source,
            })?;
        Ok(bytes.to_vec())
    }

    async fn get(&self, url: &Url) -> Result<reqwest::Response, ArchiveError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| ArchiveError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ArchiveError::HttpStatus {
                url: url.to_string(),
                status,
            });
        }
        Ok(response)
    }
}

/// Download rewritten resources strictly in order, one at a time.
///
/// `link` and `script` resources are fetched as text, `img` as bytes; each
/// fetch is persisted before the next one starts. The first fetch or save
/// failure aborts the loop and propagates; remaining resources are never
/// attempted.
pub async fn download_resources(
    client: &HttpClient,
    file_manager: &FileManager,
    resources: &[LocalizedResource],
) -> Result<(), ArchiveError> {
    let progress = ProgressBar::new(resources.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{bar:30} {pos}/{len} {msg}")
            .unwrap(),
    );

    for resource in resources {
        progress.set_message(resource.fetch_url.to_string());
        log::debug!("new download task for '{}'", resource.fetch_url);

        if resource.tag.fetches_binary() {
            let bytes = client.fetch_binary(&resource.fetch_url).await?;
            file_manager.save_bytes(&resource.local_path, &bytes).await?;
        } else {
            let text = client.fetch_text(&resource.fetch_url).await?;
            file_manager.save_text(&resource.local_path, &text).await?;
        }
        progress.inc(1);
    }

    progress.finish_and_clear();
    Ok(())
}

/// Archives one page: fetches it, localizes its same-origin resources and
/// writes the rewritten document next to them.
#[derive(Debug)]
pub struct PageArchiver {
    context: PageContext,
    client: HttpClient,
    file_manager: FileManager,
}

impl PageArchiver {
    pub fn new(url: &str, output_dir: &Path) -> Result<Self, ArchiveError> {
        let base_url = Url::parse(url).map_err(|source| ArchiveError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;
        let context = PageContext::new(base_url)?;

        Ok(Self {
            context,
            client: HttpClient::new()?,
            file_manager: FileManager::new(output_dir),
        })
    }

    pub fn context(&self) -> &PageContext {
        &self.context
    }

    /// Where the rewritten page lands on disk.
    pub fn page_file_path(&self) -> PathBuf {
        self.file_manager
            .base_dir()
            .join(self.context.page_file_name())
    }

    /// Run the full pipeline and return the final serialized document.
    ///
    /// Directory checks happen before any network activity; any failure
    /// short-circuits the remaining steps, and files already written stay
    /// on disk.
    pub async fn archive(&self) -> Result<String, ArchiveError> {
        self.file_manager.verify_base_dir().await?;
        self.file_manager
            .ensure_directory(self.context.resource_dir())
            .await?;

        log::debug!("loading url '{}'", self.context.base_url());
        let html = self.client.fetch_text(self.context.base_url()).await?;

        let document = html_parser::parse_document(&html);
        let resources = html_parser::extract_resources(&document);
        log::debug!("extracted {} candidate resources", resources.len());
        let localized = html_parser::rewrite_resource_links(resources, &self.context);

        download_resources(&self.client, &self.file_manager, &localized).await?;

        let page = html_parser::serialize_document(&document).map_err(|source| {
            ArchiveError::Io {
                path: self.page_file_path(),
                source,
            }
        })?;
        self.file_manager
            .save_text(&self.context.page_file_name(), &page)
            .await?;

        Ok(page)
    }
}
