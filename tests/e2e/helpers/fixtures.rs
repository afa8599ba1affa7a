use chrono::{DateTime, Duration, Utc};

/// One item of a generated fixture feed
#[derive(Clone)]
pub struct FixtureItem {
    pub title: String,
    pub link: String,
    pub published: DateTime<Utc>,
    pub extra: String,
}

impl FixtureItem {
    pub fn new(title: &str, age: Duration) -> Self {
        Self {
            title: title.to_string(),
            link: format!("https://news.example.com/{}", title.to_lowercase().replace(' ', "-")),
            published: Utc::now() - age,
            extra: String::new(),
        }
    }

    /// Raw XML appended inside the <item>
    pub fn with_extra(mut self, xml: &str) -> Self {
        self.extra = xml.to_string();
        self
    }
}

pub fn rss_feed(items: &[FixtureItem]) -> String {
    let body: String = items
        .iter()
        .map(|item| {
            format!(
                r#"
    <item>
      <title>{}</title>
      <link>{}</link>
      <guid>{}</guid>
      <pubDate>{}</pubDate>
      {}
    </item>"#,
                item.title,
                item.link,
                item.link,
                item.published.to_rfc2822(),
                item.extra
            )
        })
        .collect();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:media="http://search.yahoo.com/mrss/" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:content="http://purl.org/rss/1.0/modules/content/">
  <channel>
    <title>Fixture Feed</title>
    <link>https://news.example.com</link>{}
  </channel>
</rss>"#,
        body
    )
}

pub fn atom_feed(items: &[FixtureItem]) -> String {
    let body: String = items
        .iter()
        .map(|item| {
            format!(
                r#"
  <entry>
    <title>{}</title>
    <link rel="alternate" href="{}"/>
    <id>{}</id>
    <updated>{}</updated>
    <author><name>Atom Author</name></author>
    {}
  </entry>"#,
                item.title,
                item.link,
                item.link,
                item.published.to_rfc3339(),
                item.extra
            )
        })
        .collect();

    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Fixture Atom</title>{}
</feed>"#,
        body
    )
}

/// Three well-formed, recent items, deliberately out of order
pub fn healthy_items() -> Vec<FixtureItem> {
    vec![
        FixtureItem::new("Middle story", Duration::hours(2)),
        FixtureItem::new("Newest story", Duration::minutes(30)),
        FixtureItem::new("Oldest story", Duration::hours(5)),
    ]
}

/// Ten recent items, one minute apart
pub fn many_items() -> Vec<FixtureItem> {
    (0..10)
        .map(|i| FixtureItem::new(&format!("Story {}", i), Duration::minutes(i)))
        .collect()
}
