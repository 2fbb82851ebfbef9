use sitemapper_model::ContentEntry;
use serde_json::json;

fn make_entry(data: serde_json::Value) -> ContentEntry {
    ContentEntry::new("1", "api::product.product", data)
}

// ── Construction & fields ────────────────────────────────────────

#[test]
fn entry_fields_accessible() {
    let e = make_entry(json!({"slug": "widget"}));
    assert_eq!(e.id, "1");
    assert_eq!(e.content_type, "api::product.product");
    assert_eq!(e.data["slug"], "widget");
}

#[test]
fn get_str_with_nested_path() {
    let e = make_entry(json!({"seo": {"metaTitle": "Widgets"}}));
    assert_eq!(e.get_str("/seo/metaTitle"), Some("Widgets"));
}

#[test]
fn get_str_returns_none_for_non_string() {
    let e = make_entry(json!({"slug": 42}));
    assert_eq!(e.get_str("/slug"), None);
}

// ── Slug ─────────────────────────────────────────────────────────

#[test]
fn slug_present() {
    let e = make_entry(json!({"slug": "widget"}));
    assert_eq!(e.slug(), Some("widget"));
}

#[test]
fn slug_missing() {
    let e = make_entry(json!({"title": "Widget"}));
    assert_eq!(e.slug(), None);
}

#[test]
fn empty_slug_counts_as_missing() {
    let e = make_entry(json!({"slug": ""}));
    assert_eq!(e.slug(), None);
}

#[test]
fn null_slug_counts_as_missing() {
    let e = make_entry(json!({"slug": null}));
    assert_eq!(e.slug(), None);
}

// ── Timestamps ───────────────────────────────────────────────────

#[test]
fn updated_at_is_raw_string() {
    let e = make_entry(json!({"updatedAt": "2024-01-15T00:00:00Z"}));
    assert_eq!(e.updated_at(), Some("2024-01-15T00:00:00Z"));
}

#[test]
fn published_at_none_for_draft() {
    let e = make_entry(json!({"slug": "draft", "publishedAt": null}));
    assert_eq!(e.published_at(), None);
}

// ── Display title fallback ───────────────────────────────────────

#[test]
fn display_title_prefers_title() {
    let e = make_entry(json!({"title": "Widget", "name": "widget-name", "slug": "widget"}));
    assert_eq!(e.display_title(), Some("Widget"));
}

#[test]
fn display_title_falls_back_to_name() {
    let e = make_entry(json!({"name": "Acme", "slug": "acme"}));
    assert_eq!(e.display_title(), Some("Acme"));
}

#[test]
fn display_title_falls_back_to_slug() {
    let e = make_entry(json!({"slug": "widget"}));
    assert_eq!(e.display_title(), Some("widget"));
}

#[test]
fn display_title_skips_empty_title() {
    let e = make_entry(json!({"title": "", "name": "Acme", "slug": "acme"}));
    assert_eq!(e.display_title(), Some("Acme"));
}

// ── Serde ────────────────────────────────────────────────────────

#[test]
fn entry_deserializes_from_listing_json() {
    let json = r#"{
        "id": "17",
        "content_type": "api::blog-post.blog-post",
        "data": {"slug": "hello", "updatedAt": "2024-03-01T10:00:00.000Z"}
    }"#;
    let e: ContentEntry = serde_json::from_str(json).unwrap();
    assert_eq!(e.id, "17");
    assert_eq!(e.slug(), Some("hello"));
}
