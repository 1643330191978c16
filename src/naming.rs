use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::error::ArchiveError;

/// Suffix of the directory holding a page's localized resources.
pub const RESOURCE_DIR_SUFFIX: &str = "_files";

static SCHEME_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://").expect("scheme prefix pattern"));
static NON_ALPHANUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{L}\p{N}]+").expect("non-alphanumeric pattern"));

/// Collapse a piece of a URL into a filesystem-safe slug.
///
/// A leading `http://` or `https://` is stripped, then every run of
/// characters that are not letters or digits becomes a single hyphen.
pub fn normalize_slug(text: &str) -> String {
    let stripped = SCHEME_PREFIX.replace(text, "");
    NON_ALPHANUMERIC.replace_all(&stripped, "-").into_owned()
}

/// Derive the local file name for a resource reference.
///
/// The reference is split at the last dot of its last path segment: the name
/// portion is slugged, the extension is kept verbatim (including anything
/// trailing it, such as a query string). References without an extension get
/// `.html` appended.
pub fn normalize_resource_path(reference: &str) -> String {
    let file_name = reference.rsplit_once('/').map_or(reference, |(_, name)| name);
    match file_name.rfind('.') {
        Some(offset) => {
            let split_at = reference.len() - file_name.len() + offset;
            let (name, extension) = reference.split_at(split_at);
            format!("{}{}", normalize_slug(name), extension)
        }
        None => format!("{}.html", normalize_slug(reference)),
    }
}

/// Immutable per-run naming values, computed once from the page URL.
#[derive(Debug, Clone)]
pub struct PageContext {
    base_url: Url,
    host: String,
    host_slug: String,
    path_slug: String,
    resource_dir: String,
}

impl PageContext {
    pub fn new(base_url: Url) -> Result<Self, ArchiveError> {
        let host = base_url
            .host_str()
            .ok_or_else(|| ArchiveError::InvalidUrl {
                url: base_url.to_string(),
                source: url::ParseError::EmptyHost,
            })?
            .to_string();
        let host_slug = normalize_slug(&host);
        let path_slug = if base_url.path() == "/" {
            String::new()
        } else {
            normalize_slug(base_url.path())
        };
        let resource_dir = format!("{host_slug}{path_slug}{RESOURCE_DIR_SUFFIX}");

        Ok(Self {
            base_url,
            host,
            host_slug,
            path_slug,
            resource_dir,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn host_slug(&self) -> &str {
        &self.host_slug
    }

    /// Name of the sibling directory the page's resources are saved into.
    pub fn resource_dir(&self) -> &str {
        &self.resource_dir
    }

    /// File name the rewritten page itself is saved under.
    pub fn page_file_name(&self) -> String {
        format!("{}{}.html", self.host_slug, self.path_slug)
    }
}
