use kuchiki::traits::TendrilSink;
use kuchiki::NodeRef;
use url::Url;

use crate::naming::{normalize_resource_path, PageContext};
use crate::urls::{is_absolute_url, is_same_origin, resolve_reference};

/// Image references are only localized for these suffixes.
const LOCALIZED_IMAGE_SUFFIXES: [&str; 2] = [".png", ".jpg"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceTag {
    Link,
    Script,
    Img,
}

impl ResourceTag {
    fn from_element_name(name: &str) -> Option<Self> {
        match name {
            "link" => Some(Self::Link),
            "script" => Some(Self::Script),
            "img" => Some(Self::Img),
            _ => None,
        }
    }

    pub fn element_name(self) -> &'static str {
        match self {
            Self::Link => "link",
            Self::Script => "script",
            Self::Img => "img",
        }
    }

    /// The attribute that holds the reference and gets rewritten.
    pub fn target_attribute(self) -> &'static str {
        match self {
            Self::Link => "href",
            Self::Script | Self::Img => "src",
        }
    }

    /// Images are fetched as bytes, everything else as text.
    pub fn fetches_binary(self) -> bool {
        matches!(self, Self::Img)
    }
}

/// One candidate for localization, found during the extraction scan.
///
/// Holds a handle into the document tree; references never outlive the
/// document they were extracted from within a run.
pub struct ResourceReference {
    node: NodeRef,
    pub tag: ResourceTag,
    pub original: String,
}

impl ResourceReference {
    fn rewrite_target(&self, local_path: &str) {
        if let Some(element) = self.node.as_element() {
            element
                .attributes
                .borrow_mut()
                .insert(self.tag.target_attribute(), local_path.to_string());
        }
    }
}

/// A kept reference after rewriting: same-origin by construction, with the
/// local path its element attribute now points at.
#[derive(Debug, Clone)]
pub struct LocalizedResource {
    pub tag: ResourceTag,
    pub original: String,
    pub fetch_url: Url,
    pub local_path: String,
}

pub fn parse_document(html: &str) -> NodeRef {
    kuchiki::parse_html().one(html)
}

pub fn serialize_document(document: &NodeRef) -> std::io::Result<String> {
    let mut output = Vec::new();
    document.serialize(&mut output)?;
    String::from_utf8(output)
        .map_err(|error| std::io::Error::new(std::io::ErrorKind::InvalidData, error))
}

/// Scan the document for localizable references, in document order.
///
/// Collects every `<link>` with an `href`, every `<script>` with a `src`,
/// and every `<img>` whose `src` ends in `.png` or `.jpg`. Elements with a
/// missing or empty target attribute are skipped. The document is not
/// mutated.
pub fn extract_resources(document: &NodeRef) -> Vec<ResourceReference> {
    let mut resources = Vec::new();

    for node in document.descendants() {
        let Some(element) = node.as_element() else {
            continue;
        };
        let Some(tag) = ResourceTag::from_element_name(&element.name.local) else {
            continue;
        };

        let original = {
            let attributes = element.attributes.borrow();
            match attributes.get(tag.target_attribute()) {
                Some(value) if !value.is_empty() => value.to_string(),
                Some(_) => {
                    log::debug!(
                        "skipping <{}> element with empty {}",
                        tag.element_name(),
                        tag.target_attribute()
                    );
                    continue;
                }
                None => continue,
            }
        };

        if tag == ResourceTag::Img
            && !LOCALIZED_IMAGE_SUFFIXES
                .iter()
                .any(|suffix| original.ends_with(suffix))
        {
            continue;
        }

        log::debug!("found resource <{}> '{}'", tag.element_name(), original);
        resources.push(ResourceReference {
            node: node.clone(),
            tag,
            original,
        });
    }

    resources
}

/// Point each same-origin reference at its local copy.
///
/// Cross-origin references (and references whose resolution fails to parse)
/// are dropped with their attribute left untouched. For the kept ones the
/// element attribute is rewritten in place, exactly once, and the enriched
/// reference is returned in the original document order.
pub fn rewrite_resource_links(
    resources: Vec<ResourceReference>,
    context: &PageContext,
) -> Vec<LocalizedResource> {
    let mut localized = Vec::with_capacity(resources.len());

    for resource in resources {
        let absolute = is_absolute_url(&resource.original);
        let fetch_url = match resolve_reference(&resource.original, context.base_url()) {
            Ok(url) => url,
            Err(error) => {
                log::debug!(
                    "skipping unresolvable reference '{}': {error}",
                    resource.original
                );
                continue;
            }
        };
        if !is_same_origin(&fetch_url, context.host()) {
            log::debug!(
                "skipping resource with external hostname '{}'",
                fetch_url.host_str().unwrap_or_default()
            );
            continue;
        }

        // Relative references need the host slug prefixed; absolute ones
        // already carry it in their normalized name.
        let file_name = normalize_resource_path(&resource.original);
        let local_path = if absolute {
            format!("{}/{}", context.resource_dir(), file_name)
        } else {
            format!(
                "{}/{}{}",
                context.resource_dir(),
                context.host_slug(),
                file_name
            )
        };

        resource.rewrite_target(&local_path);
        log::debug!(
            "rewrote <{}> reference '{}' to '{}'",
            resource.tag.element_name(),
            resource.original,
            local_path
        );

        localized.push(LocalizedResource {
            tag: resource.tag,
            original: resource.original,
            fetch_url,
            local_path,
        });
    }

    localized
}
