use chrono::Datelike;

use top100_common::{Affordance, Card, Category, DirectoryState};

/// Render the rankings page for the active category.
pub fn render_directory(state: &DirectoryState, cards: &[Card], affiliate_tag: &str) -> String {
    let category = state.active();

    let tabs: String = Category::ALL
        .iter()
        .map(|&c| {
            let class = if c == category { "tab tab-active" } else { "tab" };
            format!(
                r#"<a class="{class}" href="{href}">{title}</a>"#,
                href = html_escape(&directory_href(&state.selected(c), None)),
                title = html_escape(c.title()),
            )
        })
        .collect::<Vec<_>>()
        .join("");

    let mut list = String::new();
    if cards.is_empty() {
        list.push_str(
            r#"<p class="empty">No books in this list yet. Run the refresh job to fetch them.</p>"#,
        );
    }
    for card in cards {
        list.push_str(&render_card(state, card, affiliate_tag));
    }

    let content = format!(
        r#"<div class="container">
    <nav class="top-nav"><a href="/about">About</a></nav>
    <div class="hero">
        <h2>Top 100 {title} Sci-Fi Books</h2>
        <p>Explore the best {lower} science fiction titles</p>
    </div>
    <div class="tabs">{tabs}</div>
    <div class="book-list">{list}</div>
</div>"#,
        title = html_escape(category.title()),
        lower = html_escape(&category.title().to_lowercase()),
    );

    build_page(&format!("Top 100 {}", category.title()), &content)
}

fn render_card(state: &DirectoryState, card: &Card, affiliate_tag: &str) -> String {
    let record = &card.record;
    let href = html_escape(&card.affiliate_url(affiliate_tag));
    let anchor = anchor_id(&card.key);

    let thumbnail = match card.thumbnail() {
        Some(src) => format!(
            r#"<img src="{}" alt="{}" loading="lazy">"#,
            html_escape(src),
            html_escape(&record.title)
        ),
        None => r#"<div class="placeholder">?</div>"#.to_string(),
    };

    let stars = match record.visible_stars() {
        Some(s) => format!(r#"<div class="stars"><span class="star">★</span> {s:.1}</div>"#),
        None => String::new(),
    };

    let description = &card.description;
    let paragraphs: String = description
        .visible_paragraphs()
        .iter()
        .map(|p| format!("<p>{}</p>", html_escape(p)))
        .collect::<Vec<_>>()
        .join("");
    let paragraphs = if paragraphs.is_empty() {
        String::new()
    } else {
        format!(r#"<div class="description">{paragraphs}</div>"#)
    };

    let affordance = match description.affordance() {
        Some(a) => {
            let arrow = match a {
                Affordance::ShowMore => "▼",
                Affordance::ShowLess => "▲",
            };
            format!(
                r#"<a class="disclosure-btn" href="{href}">{arrow} {label}</a>"#,
                href = html_escape(&directory_href(&state.toggled(&card.key), Some(&anchor))),
                label = a.label(),
            )
        }
        None => String::new(),
    };

    let preview = match card.preview_image() {
        Some(src) => format!(
            r#"<div class="preview"><img src="{}" alt="{} - High Resolution" loading="lazy"></div>"#,
            html_escape(src),
            html_escape(&record.title)
        ),
        None => String::new(),
    };

    let collapsed = if description.state().is_expanded() { "" } else { " collapsed" };

    format!(
        r#"<article class="book-card" id="{anchor}">
    <div class="rank-badge">#{position}</div>
    <a class="thumb" href="{href}" target="_blank" rel="noopener noreferrer">{thumbnail}</a>
    <div class="details{collapsed}">
        <h3><a href="{href}" target="_blank" rel="noopener noreferrer">{title}</a></h3>
        <p class="author">{author}</p>
        {stars}
        {paragraphs}
        {affordance}
    </div>
    {preview}
</article>"#,
        anchor = html_escape(&anchor),
        position = record.rank.position,
        title = html_escape(&record.title),
        author = html_escape(&record.author),
    )
}

/// Render the about page.
pub fn render_about() -> String {
    let categories: String = Category::ALL
        .iter()
        .map(|c| {
            format!(
                r#"<div><strong>{}:</strong> {}</div>"#,
                html_escape(c.title()),
                html_escape(c.blurb())
            )
        })
        .collect::<Vec<_>>()
        .join("");

    let content = format!(
        r#"<div class="container narrow">
    <nav class="top-nav"><a href="/">&larr; Back to Rankings</a></nav>
    <div class="hero"><h2>About Top 100 Sci-Fi</h2></div>
    <section class="panel">
        <h3>Mission</h3>
        <p>We track and curate the top 100 military science fiction books across three distinct categories:
        Space Marine, Military Sci-Fi, and Space Fleet. Rankings are refreshed from Amazon's
        bestseller lists to help you discover the most popular sci-fi books in the genre.</p>
    </section>
    <section class="panel">
        <h3>Affiliate Disclosure</h3>
        <p>This site contains affiliate links to Amazon. When you purchase books through our links,
        we may earn a small commission at no additional cost to you. This helps support the
        maintenance and development of this resource.</p>
    </section>
    <section class="panel">
        <h3>Categories</h3>
        {categories}
    </section>
    <p class="center"><a class="tab" href="/">Explore Rankings &rarr;</a></p>
</div>"#
    );

    build_page("About", &content)
}

pub fn render_not_found() -> String {
    build_page(
        "Not Found",
        r#"<div class="container"><p class="empty">Nothing here. <a href="/">Back to the rankings</a>.</p></div>"#,
    )
}

// --- Helpers ---

/// Link to the directory showing `state`, optionally scrolled to a card.
pub fn directory_href(state: &DirectoryState, anchor: Option<&str>) -> String {
    let mut query = url::form_urlencoded::Serializer::new(String::new());
    query.append_pair("tab", state.active().slug());
    for key in state.expanded() {
        query.append_pair("expanded", key);
    }
    match anchor {
        Some(a) => format!("/?{}#{a}", query.finish()),
        None => format!("/?{}", query.finish()),
    }
}

/// Element id of a book card.
fn anchor_id(key: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(key.as_bytes()).collect();
    format!("book-{encoded}")
}

fn footer() -> String {
    format!(
        r#"<footer>
    <div class="disclosure"><span class="warn">⚠ DISCLOSURE:</span> This site contains affiliate links.
    When you click on links to Amazon products and make a purchase, we may earn a small commission at no additional cost to you.
    This helps support our work in bringing you the best sci-fi book recommendations.</div>
    <p class="copyright">© {year} Top 100 Sci-Fi Books. All rights reserved.</p>
</footer>"#,
        year = chrono::Utc::now().year(),
    )
}

fn build_page(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | Top 100 Sci-Fi</title>
<style>
*{{margin:0;padding:0;box-sizing:border-box;}}
body{{font-family:ui-sans-serif,system-ui,sans-serif;color:#cbd5e1;background:#000;}}
a{{color:#22d3ee;}}
.container{{max-width:1280px;margin:0 auto;padding:48px 24px;}}
.narrow{{max-width:896px;}}
.top-nav{{display:flex;justify-content:flex-end;margin-bottom:32px;font-family:monospace;font-size:14px;}}
.top-nav a{{text-decoration:none;}}
.hero{{text-align:center;margin-bottom:48px;}}
.hero h2{{font-size:40px;color:#fafafa;}}
.hero p{{margin-top:16px;font-size:18px;color:#a1a1aa;}}
.tabs{{display:flex;justify-content:center;gap:8px;margin-bottom:32px;}}
.tab{{display:inline-block;padding:12px 32px;border:2px solid rgba(6,182,212,.3);border-radius:8px;font-weight:700;font-size:18px;text-decoration:none;color:rgba(34,211,238,.6);background:rgba(15,23,42,.5);}}
.tab-active{{border-color:#22d3ee;color:#67e8f9;box-shadow:0 0 12px rgba(6,182,212,.3);}}
.book-list{{display:flex;flex-direction:column;gap:16px;}}
.book-card{{position:relative;display:flex;align-items:flex-start;gap:16px;padding:16px;border:1px solid rgba(6,182,212,.2);border-radius:8px;background:linear-gradient(135deg,#0f172a,#1e293b,#0f172a);}}
.rank-badge{{flex-shrink:0;width:80px;height:80px;display:flex;align-items:center;justify-content:center;font-family:monospace;font-size:30px;font-weight:900;color:#67e8f9;border:2px solid rgba(34,211,238,.6);background:#000;}}
.thumb{{flex-shrink:0;width:200px;height:300px;margin:0 24px;overflow:hidden;border:1px solid rgba(6,182,212,.3);border-radius:4px;background:#020617;}}
.thumb img{{width:100%;height:100%;object-fit:cover;}}
.placeholder{{height:100%;display:flex;align-items:center;justify-content:center;font-size:72px;font-weight:700;color:rgba(6,182,212,.2);}}
.details{{flex:1;min-width:0;display:flex;flex-direction:column;}}
.details.collapsed{{max-height:300px;overflow:hidden;}}
.details h3{{font-size:30px;margin-bottom:8px;}}
.details h3 a{{text-decoration:none;color:#a5f3fc;}}
.author{{font-size:18px;color:rgba(34,211,238,.7);margin-bottom:12px;}}
.stars{{font-family:monospace;font-size:18px;color:#67e8f9;margin-bottom:12px;}}
.star{{color:#facc15;font-size:24px;}}
.description p{{font-size:18px;line-height:1.6;color:#94a3b8;margin-bottom:16px;}}
.disclosure-btn{{align-self:center;margin-top:8px;padding:8px 24px;font-family:monospace;font-size:14px;font-weight:700;text-decoration:none;border:1px solid rgba(34,211,238,.5);background:rgba(15,23,42,.8);}}
.preview{{display:none;}}
@media (min-width:1280px){{.book-card:hover .preview{{display:block;position:absolute;right:100%;top:0;margin-right:16px;width:288px;height:384px;border:2px solid rgba(34,211,238,.5);border-radius:8px;background:#020617;overflow:hidden;}}.preview img{{width:100%;height:100%;object-fit:contain;}}}}
.panel{{margin-bottom:32px;padding:32px;border:1px solid rgba(6,182,212,.2);border-radius:8px;background:rgba(15,23,42,.5);font-size:18px;line-height:1.6;}}
.panel h3{{font-family:monospace;font-size:24px;color:#22d3ee;margin-bottom:16px;}}
.panel div{{margin-bottom:12px;}}
.center{{text-align:center;}}
.empty{{text-align:center;padding:40px;color:#64748b;}}
footer{{margin-top:64px;padding:32px 24px;border-top:1px solid rgba(6,182,212,.2);text-align:center;}}
.disclosure{{max-width:1280px;margin:0 auto;padding:24px;font-size:14px;line-height:1.6;color:#94a3b8;border:1px solid rgba(6,182,212,.3);border-radius:8px;}}
.warn{{font-family:monospace;color:#22d3ee;}}
.copyright{{margin-top:24px;font-family:monospace;font-size:12px;color:#64748b;}}
</style>
</head>
<body>
{content}
{footer}
</body>
</html>"#,
        title = html_escape(title),
        footer = footer(),
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use top100_common::{card_key, DisplayRecord, Disclosure, RawRecord};

    fn card(value: serde_json::Value, state: Disclosure) -> Card {
        let raw: RawRecord = serde_json::from_value(value).unwrap();
        let record = DisplayRecord::from_raw(&raw, 0);
        Card::new(card_key(&record, 0), record, state)
    }

    #[test]
    fn href_round_trips_state() {
        let state = DirectoryState::with_expanded(Category::SpaceFleet, ["B2", "B1"]);
        assert_eq!(
            directory_href(&state, None),
            "/?tab=space-fleet&expanded=B1&expanded=B2"
        );
        assert_eq!(
            directory_href(&DirectoryState::new(Category::MilitaryScifi), Some("book-X")),
            "/?tab=military-scifi#book-X"
        );
    }

    #[test]
    fn href_keeps_each_expanded_key_separate() {
        let state = DirectoryState::with_expanded(Category::SpaceMarine, ["A,B", "#1"]);
        let href = directory_href(&state, None);
        assert_eq!(href, "/?tab=space-marine&expanded=%231&expanded=A%2CB");
    }

    #[test]
    fn card_escapes_scraped_text() {
        let c = card(
            serde_json::json!({"title": "<script>x</script>", "author": "A & B", "asin": "Q"}),
            Disclosure::Collapsed,
        );
        let html = render_card(&DirectoryState::default(), &c, "t-20");
        assert!(html.contains("&lt;script&gt;x&lt;/script&gt;"));
        assert!(html.contains("A &amp; B"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn disallowed_thumbnail_renders_placeholder() {
        let c = card(
            serde_json::json!({"title": "T", "thumbnailImage": "https://tracker.example/p.gif"}),
            Disclosure::Collapsed,
        );
        let html = render_card(&DirectoryState::default(), &c, "t-20");
        assert!(html.contains(r#"<div class="placeholder">?</div>"#));
        assert!(!html.contains("tracker.example"));
    }

    #[test]
    fn stars_show_one_decimal() {
        let c = card(serde_json::json!({"title": "T", "stars": 4}), Disclosure::Collapsed);
        let html = render_card(&DirectoryState::default(), &c, "t");
        assert!(html.contains("★</span> 4.0"));

        let c = card(serde_json::json!({"title": "T", "stars": 0}), Disclosure::Collapsed);
        let html = render_card(&DirectoryState::default(), &c, "t");
        assert!(!html.contains("★"));
    }

    #[test]
    fn footer_has_current_year() {
        let year = chrono::Utc::now().year().to_string();
        assert!(footer().contains(&format!("© {year} Top 100 Sci-Fi Books")));
    }
}
