use super::*;

const FEED_HEADER: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns:im="http://itunes.apple.com/rss" xmlns="http://www.w3.org/2005/Atom" xml:lang="en">
  <id>https://mzstoreservices-int-st.itunes.apple.com/gb/rss/customerreviews/page=1/id=416048305/sortby=mostrecent/xml</id>
  <title>iTunes Store: Customer Reviews</title>
  <updated>2024-05-20T02:11:43-07:00</updated>
  <author><name>iTunes Store</name><uri>http://www.apple.com/uk/itunes/</uri></author>
"#;

const APP_ENTRY: &str = r#"
  <entry>
    <updated>2024-05-20T02:11:43-07:00</updated>
    <id im:id="416048305">https://apps.apple.com/gb/app/meitu/id416048305</id>
    <title>Meitu- AI Photo &amp; Video Editor - Meitu, Inc.</title>
    <im:name>Meitu- AI Photo &amp; Video Editor</im:name>
    <author><name>Meitu, Inc.</name></author>
  </entry>
"#;

fn review_entry(name: &str, updated: &str, rating: &str, title: &str, content: &str) -> String {
    format!(
        r#"
  <entry>
    <author><name>{name}</name><uri>https://itunes.apple.com/gb/reviews/id1</uri></author>
    <updated>{updated}</updated>
    <im:rating>{rating}</im:rating>
    <im:version>10.2.0</im:version>
    <id>1000</id>
    <title>{title}</title>
    <content type="text">{content}</content>
    <content type="html">&lt;table&gt;ignored&lt;/table&gt;</content>
    <im:voteSum>0</im:voteSum>
    <im:voteCount>0</im:voteCount>
  </entry>
"#
    )
}

fn feed(entries: &[String]) -> String {
    let mut xml = String::from(FEED_HEADER);
    xml.push_str(APP_ENTRY);
    for entry in entries {
        xml.push_str(entry);
    }
    xml.push_str("</feed>\n");
    xml
}

#[test]
fn test_parse_reviews_skips_metadata_entry() {
    let xml = feed(&[
        review_entry("alice", "2024-05-19T10:00:00-07:00", "5", "Great", "Love it"),
        review_entry("bob", "2024-05-18T09:30:00-07:00", "2", "Meh", "Too many ads"),
    ]);

    let reviews = parse_reviews(&xml).unwrap();
    assert_eq!(reviews.len(), 2);
    assert_eq!(reviews[0].username, "alice");
    assert_eq!(reviews[0].published_at, "2024-05-19T10:00:00-07:00");
    assert_eq!(reviews[0].rating, 5);
    assert_eq!(reviews[0].title, "Great");
    assert_eq!(reviews[0].content, "Love it");
    assert_eq!(reviews[1].username, "bob");
    assert_eq!(reviews[1].rating, 2);
}

#[test]
fn test_parse_reviews_preserves_document_order() {
    let entries: Vec<String> = (1..=7)
        .map(|i| review_entry(&format!("user{}", i), "2024-01-01T00:00:00Z", "3", "t", "c"))
        .collect();
    let reviews = parse_reviews(&feed(&entries)).unwrap();

    let names: Vec<&str> = reviews.iter().map(|r| r.username.as_str()).collect();
    assert_eq!(names, ["user1", "user2", "user3", "user4", "user5", "user6", "user7"]);
}

#[test]
fn test_parse_reviews_counts_only_rated_entries() {
    let xml = format!(
        "{}{}{}{}{}</feed>",
        FEED_HEADER,
        APP_ENTRY,
        review_entry("a", "2024-01-01T00:00:00Z", "4", "t", "c"),
        APP_ENTRY,
        review_entry("b", "2024-01-02T00:00:00Z", "1", "t", "c"),
    );
    assert_eq!(parse_reviews(&xml).unwrap().len(), 2);
}

#[test]
fn test_parse_reviews_metadata_only_page_is_empty() {
    let reviews = parse_reviews(&feed(&[])).unwrap();
    assert!(reviews.is_empty());
}

#[test]
fn test_parse_reviews_trims_text_fields() {
    let xml = feed(&[review_entry("  carol \n", " 2024-02-02T12:00:00Z ", " 4 ", "\n  Solid  ", "  Does the job\n")]);
    let review = &parse_reviews(&xml).unwrap()[0];

    assert_eq!(review.username, "carol");
    assert_eq!(review.published_at, "2024-02-02T12:00:00Z");
    assert_eq!(review.rating, 4);
    assert_eq!(review.title, "Solid");
    assert_eq!(review.content, "Does the job");
}

#[test]
fn test_parse_reviews_missing_title_and_content_default_to_empty() {
    let xml = format!(
        r#"{}<entry><author><name>dave</name></author><updated>2024-01-01T00:00:00Z</updated><im:rating>3</im:rating></entry></feed>"#,
        FEED_HEADER
    );
    let review = &parse_reviews(&xml).unwrap()[0];

    assert_eq!(review.username, "dave");
    assert_eq!(review.title, "");
    assert_eq!(review.content, "");
}

#[test]
fn test_parse_reviews_missing_author_defaults_to_empty() {
    let xml = format!(
        r#"{}<entry><updated>2024-01-01T00:00:00Z</updated><im:rating>3</im:rating><title>x</title></entry></feed>"#,
        FEED_HEADER
    );
    assert_eq!(parse_reviews(&xml).unwrap()[0].username, "");
}

#[test]
fn test_parse_reviews_prefers_updated_over_published() {
    let xml = format!(
        r#"{}<entry><published>2023-12-31T00:00:00Z</published><updated>2024-01-05T00:00:00Z</updated><im:rating>3</im:rating></entry></feed>"#,
        FEED_HEADER
    );
    assert_eq!(parse_reviews(&xml).unwrap()[0].published_at, "2024-01-05T00:00:00Z");
}

#[test]
fn test_parse_reviews_falls_back_to_published() {
    let xml = format!(
        r#"{}<entry><published>2023-12-31T00:00:00Z</published><im:rating>3</im:rating></entry>
<entry><updated></updated><published>2023-11-30T00:00:00Z</published><im:rating>2</im:rating></entry>
<entry><im:rating>1</im:rating></entry></feed>"#,
        FEED_HEADER
    );
    let reviews = parse_reviews(&xml).unwrap();

    assert_eq!(reviews[0].published_at, "2023-12-31T00:00:00Z");
    assert_eq!(reviews[1].published_at, "2023-11-30T00:00:00Z");
    assert_eq!(reviews[2].published_at, "");
}

#[test]
fn test_parse_reviews_ignores_elements_outside_namespaces() {
    // An unqualified <rating> in a non-Atom document is not a review marker
    let xml = r#"<feed><entry><rating>5</rating><title>x</title></entry></feed>"#;
    assert!(parse_reviews(xml).unwrap().is_empty());
}

#[test]
fn test_parse_reviews_malformed_document() {
    let err = parse_reviews("<feed><entry></feed>").unwrap_err();
    assert!(matches!(err, FeedError::MalformedDocument(_)));

    assert!(parse_reviews("not xml at all").is_err());
}

#[test]
fn test_parse_reviews_invalid_rating() {
    let xml = feed(&[review_entry("eve", "2024-01-01T00:00:00Z", "five", "t", "c")]);
    match parse_reviews(&xml).unwrap_err() {
        FeedError::InvalidRating { value, .. } => assert_eq!(value, "five"),
        other => panic!("expected invalid rating, got {:?}", other),
    }
}

#[test]
fn test_parse_reviews_decodes_entities() {
    let xml = feed(&[review_entry("fay", "2024-01-01T00:00:00Z", "5", "Fast &amp; easy", "5 &lt; 10")]);
    let review = &parse_reviews(&xml).unwrap()[0];
    assert_eq!(review.title, "Fast & easy");
    assert_eq!(review.content, "5 < 10");
}
