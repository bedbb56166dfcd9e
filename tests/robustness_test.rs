use entry_rewrite::{builtin_registry, rewrite};

const URL: &str = "https://example.org/post";

const MALFORMED: &[&str] = &[
    "",
    "   ",
    "<p>text<div>more",
    "<p><div></p></div>",
    "<div class=\"test id=broken>",
    "&amp text &lt;",
    "<<<>>>",
    "</span></div></p>",
    "<noscript>unterminated",
    "<img",
];

#[test]
fn every_transform_leaves_malformed_content_unchanged() {
    for id in builtin_registry().ids() {
        for content in MALFORMED {
            assert_eq!(rewrite(URL, content, &[id]), *content, "transform {id} on {content:?}");
        }
    }
}

#[test]
fn empty_transform_list_is_identity() {
    let empty: [&str; 0] = [];
    for content in MALFORMED.iter().chain(["<p>ok</p>\n", "line\nbreak"].iter()) {
        assert_eq!(rewrite(URL, content, &empty), *content);
    }
}

#[test]
fn unknown_identifiers_only_are_identity() {
    let content = "<p>body</p>";
    assert_eq!(rewrite(URL, content, &["nope", "also_nope"]), content);
}

#[test]
fn non_empty_input_never_becomes_empty() {
    let content = "<span>Baca juga</span>";
    assert_eq!(rewrite(URL, content, &["cleanup_balipost"]), content);

    let content = r#"<div class="td-all-devices">ad</div>"#;
    assert_eq!(rewrite(URL, content, &["cleanup_balipuspanews"]), content);

    let content = "<div><span>Baca juga</span></div><p>story</p>";
    let output = rewrite(URL, content, &["cleanup_balipost"]);
    assert_eq!(output, "<p>story</p>");
}

#[test]
fn deeply_nested_markup_does_not_panic() {
    let depth = 200;
    let html = format!("{}<img data-src=\"deep.jpg\">{}", "<div>".repeat(depth), "</div>".repeat(depth));
    let output = rewrite(URL, &html, &["add_dynamic_image", "cleanup_balipuspanews"]);
    assert!(output.contains(r#"src="deep.jpg""#));
}

#[test]
fn dynamic_image_is_idempotent() {
    let content = r#"<p>a</p><img data-src="a.jpg"><div data-original="b.jpg" alt="b"></div>"#;
    let once = rewrite(URL, content, &["add_dynamic_image"]);
    let twice = rewrite(URL, &once, &["add_dynamic_image"]);
    assert_eq!(once, twice);
}

#[test]
fn noscript_recovery_is_idempotent() {
    let content = r#"<p>a</p><noscript><img src="c.jpg"></noscript><noscript><img src="d.jpg"><img src="e.jpg"></noscript>"#;
    let once = rewrite(URL, content, &["add_dynamic_image"]);
    assert!(once.starts_with(r#"<p>a</p><img src="c.jpg">"#));
    assert!(once.contains("<noscript>"));
    let twice = rewrite(URL, &once, &["add_dynamic_image"]);
    assert_eq!(once, twice);
}

#[test]
fn linkification_is_idempotent() {
    let content = "<p>see http://a.b/c and <a href=\"http://a.b/d\">http://a.b/d</a></p>";
    let once = rewrite(URL, content, &["convert_text_link"]);
    let twice = rewrite(URL, &once, &["convert_text_link"]);
    assert_eq!(once, twice);
}
