use page_archiver::html_parser::{
    extract_resources, parse_document, rewrite_resource_links, serialize_document,
};
use page_archiver::naming::{normalize_resource_path, normalize_slug, PageContext};
use page_archiver::urls::{is_absolute_url, is_same_origin, resolve_reference};
use page_archiver::ResourceTag;
use url::Url;

#[test]
fn test_is_absolute_url() {
    assert!(is_absolute_url("https://example.com/style.css"));
    assert!(is_absolute_url("http://example.com"));

    assert!(!is_absolute_url("/assets/app.css"));
    assert!(!is_absolute_url("image.png"));
    assert!(!is_absolute_url("//cdn.example.com/script.js"));
    assert!(!is_absolute_url(""));
    assert!(!is_absolute_url("not a url at all"));
}

#[test]
fn test_resolve_reference() {
    let page_url = Url::parse("https://example.com/courses").unwrap();

    let test_cases = vec![
        ("/assets/app.css", "https://example.com/assets/app.css"),
        ("/img/logo.png", "https://example.com/img/logo.png"),
        (
            "https://cdn.example.com/style.css",
            "https://cdn.example.com/style.css",
        ),
    ];

    for (input, expected) in test_cases {
        let resolved = resolve_reference(input, &page_url).unwrap();
        assert_eq!(resolved.as_str(), expected, "Failed for input: {}", input);
    }
}

#[test]
fn test_resolve_reference_keeps_port() {
    let page_url = Url::parse("http://127.0.0.1:8080/").unwrap();
    let resolved = resolve_reference("/a.png", &page_url).unwrap();
    assert_eq!(resolved.as_str(), "http://127.0.0.1:8080/a.png");
}

#[test]
fn test_is_same_origin() {
    let page_host = "example.com";

    let same = Url::parse("https://example.com/deep/path.css").unwrap();
    assert!(is_same_origin(&same, page_host));

    let subdomain = Url::parse("https://cdn.example.com/style.css").unwrap();
    assert!(!is_same_origin(&subdomain, page_host));

    let other = Url::parse("https://other.org/style.css").unwrap();
    assert!(!is_same_origin(&other, page_host));
}

#[test]
fn test_normalize_slug() {
    let test_cases = vec![
        ("ru.hexlet.io", "ru-hexlet-io"),
        ("https://ru.hexlet.io/courses", "ru-hexlet-io-courses"),
        ("http://example.com", "example-com"),
        ("/assets/app", "-assets-app"),
        ("a?&=b", "a-b"),
        ("так.ру", "так-ру"),
    ];

    for (input, expected) in test_cases {
        assert_eq!(normalize_slug(input), expected, "Failed for input: {}", input);
    }
}

#[test]
fn test_normalize_slug_is_idempotent() {
    let inputs = vec![
        "https://ru.hexlet.io/courses",
        "/assets/app.css",
        "path with spaces",
        "a---b",
    ];

    for input in inputs {
        let once = normalize_slug(input);
        assert_eq!(normalize_slug(&once), once, "Failed for input: {}", input);
    }
}

#[test]
fn test_normalize_resource_path() {
    let test_cases = vec![
        ("/assets/application.css", "-assets-application.css"),
        ("/courses", "-courses.html"),
        ("/img/logo.png", "-img-logo.png"),
        (
            "https://example.com/packs/app.js",
            "example-com-packs-app.js",
        ),
        // The extension is a literal suffix; query strings ride along.
        ("image.png?v=2", "image.png?v=2"),
        ("/foo.", "-foo."),
    ];

    for (input, expected) in test_cases {
        assert_eq!(
            normalize_resource_path(input),
            expected,
            "Failed for input: {}",
            input
        );
    }
}

#[test]
fn test_normalize_resource_path_keeps_extension() {
    for reference in ["/a/b/c.css", "script.js", "/deep/photo.jpg"] {
        let extension = reference.rsplit('.').next().unwrap();
        let normalized = normalize_resource_path(reference);
        assert!(
            normalized.ends_with(&format!(".{}", extension)),
            "'{}' lost its extension: '{}'",
            reference,
            normalized
        );
    }
}

#[test]
fn test_page_context_naming() {
    let context = PageContext::new(Url::parse("https://ru.hexlet.io/courses").unwrap()).unwrap();
    assert_eq!(context.host(), "ru.hexlet.io");
    assert_eq!(context.host_slug(), "ru-hexlet-io");
    assert_eq!(context.resource_dir(), "ru-hexlet-io-courses_files");
    assert_eq!(context.page_file_name(), "ru-hexlet-io-courses.html");
}

#[test]
fn test_page_context_root_path() {
    let context = PageContext::new(Url::parse("https://example.com").unwrap()).unwrap();
    assert_eq!(context.resource_dir(), "example-com_files");
    assert_eq!(context.page_file_name(), "example-com.html");
}

#[test]
fn test_page_context_requires_host() {
    let url = Url::parse("mailto:user@example.com").unwrap();
    assert!(PageContext::new(url).is_err());
}

#[test]
fn test_extract_resources_in_document_order() {
    let html = r#"
        <html>
            <head>
                <link rel="stylesheet" href="/assets/app.css">
                <script src="/packs/runtime.js"></script>
            </head>
            <body>
                <img src="/img/logo.png" alt="logo">
                <script src="/packs/main.js"></script>
                <img src="/img/banner.jpg" alt="banner">
            </body>
        </html>
    "#;

    let document = parse_document(html);
    let resources = extract_resources(&document);

    let found: Vec<(ResourceTag, &str)> = resources
        .iter()
        .map(|resource| (resource.tag, resource.original.as_str()))
        .collect();

    assert_eq!(
        found,
        vec![
            (ResourceTag::Link, "/assets/app.css"),
            (ResourceTag::Script, "/packs/runtime.js"),
            (ResourceTag::Img, "/img/logo.png"),
            (ResourceTag::Script, "/packs/main.js"),
            (ResourceTag::Img, "/img/banner.jpg"),
        ]
    );
}

#[test]
fn test_extract_skips_unusable_elements() {
    let html = r#"
        <html>
            <head>
                <link href="">
                <script>var inline = true;</script>
            </head>
            <body>
                <img src="/photo.gif">
                <img alt="no source">
                <img src="/photo.jpg">
            </body>
        </html>
    "#;

    let document = parse_document(html);
    let resources = extract_resources(&document);

    assert_eq!(resources.len(), 1);
    assert_eq!(resources[0].tag, ResourceTag::Img);
    assert_eq!(resources[0].original, "/photo.jpg");
}

#[test]
fn test_rewrite_mutates_attributes_and_preserves_order() {
    let html = r#"
        <html>
            <head>
                <link rel="stylesheet" href="/assets/app.css">
                <script src="https://example.com/packs/app.js"></script>
                <script src="https://cdn.other.com/x.js"></script>
            </head>
            <body>
                <img src="/img/logo.png">
            </body>
        </html>
    "#;

    let context = PageContext::new(Url::parse("https://example.com").unwrap()).unwrap();
    let document = parse_document(html);
    let resources = extract_resources(&document);
    assert_eq!(resources.len(), 4);

    let localized = rewrite_resource_links(resources, &context);

    let local_paths: Vec<&str> = localized
        .iter()
        .map(|resource| resource.local_path.as_str())
        .collect();
    assert_eq!(
        local_paths,
        vec![
            "example-com_files/example-com-assets-app.css",
            "example-com_files/example-com-packs-app.js",
            "example-com_files/example-com-img-logo.png",
        ]
    );

    assert_eq!(
        localized[0].fetch_url.as_str(),
        "https://example.com/assets/app.css"
    );
    assert_eq!(
        localized[1].fetch_url.as_str(),
        "https://example.com/packs/app.js"
    );

    let serialized = serialize_document(&document).unwrap();
    assert!(serialized.contains(r#"href="example-com_files/example-com-assets-app.css""#));
    assert!(serialized.contains(r#"src="example-com_files/example-com-packs-app.js""#));
    assert!(serialized.contains(r#"src="example-com_files/example-com-img-logo.png""#));
    // The cross-origin script keeps its original reference.
    assert!(serialized.contains(r#"src="https://cdn.other.com/x.js""#));
}

#[test]
fn test_rewrite_drops_cross_origin_without_touching_document() {
    let html = r#"<html><body><script src="https://cdn.other.com/x.js"></script></body></html>"#;

    let context = PageContext::new(Url::parse("https://example.com").unwrap()).unwrap();
    let document = parse_document(html);
    let resources = extract_resources(&document);
    assert_eq!(resources.len(), 1);

    let localized = rewrite_resource_links(resources, &context);
    assert!(localized.is_empty());

    let serialized = serialize_document(&document).unwrap();
    assert!(serialized.contains(r#"src="https://cdn.other.com/x.js""#));
}
