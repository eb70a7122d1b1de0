// file: src/render/mod.rs
// description: renders summarized papers into a single HTML digest document
// reference: presentation layer for the outbound email

use crate::models::Paper;

/// Map `{topic -> ordered papers}` to one HTML document. Purely a
/// presentation concern; the input ordering is preserved as-is.
pub fn render_digest(topics: &[(String, Vec<Paper>)]) -> String {
    render(topics, None)
}

/// Same document with a confirmation note under the heading, used for the
/// email sent right after a subscription change.
pub fn render_confirmation(topics: &[(String, Vec<Paper>)]) -> String {
    render(
        topics,
        Some(
            "You're subscribed to the research digest. \
             You'll receive daily updates during the morning send window.",
        ),
    )
}

fn render(topics: &[(String, Vec<Paper>)], note: Option<&str>) -> String {
    let mut html = String::from(r#"<html><body style="font-family: Arial, sans-serif;">"#);
    html.push_str("<h2>📢 Daily Research Digest</h2>");

    if let Some(note) = note {
        html.push_str(&format!("<p style='font-style:italic;'>{}</p>", note));
    }

    html.push_str("<p>Hello learner, here are your selected topics:</p>");

    for (topic, papers) in topics {
        html.push_str(&format!("<h3>📂 {}</h3><ol>", escape(&title_case(topic))));

        for paper in papers {
            html.push_str(&format!(
                "<li><b>{}</b><br><p>{}</p><a href='{}'>Read full paper</a></li><br>",
                escape(&paper.title),
                escape(paper.display_text()),
                escape(&paper.link),
            ));
        }

        html.push_str("</ol>");
    }

    html.push_str("<p style='font-size:small;color:gray;'>Generated automatically.</p>");
    html.push_str("</body></html>");
    html
}

/// Capitalize the first letter of each whitespace-separated word.
fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
