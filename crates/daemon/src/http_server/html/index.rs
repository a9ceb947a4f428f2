use askama::Template;
use askama_axum::IntoResponse;
use axum::extract::State;
use tracing::instrument;

use crate::ServiceState;

const README: &str = include_str!("../../../README.md");

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub site_url: String,
    pub readme_html: String,
}

#[instrument(skip(state))]
pub async fn handler(State(state): State<ServiceState>) -> askama_axum::Response {
    let template = IndexTemplate {
        site_url: state.site_url().to_string(),
        readme_html: markdown_to_html(README),
    };

    template.into_response()
}

/// Converts markdown content to an HTML fragment
fn markdown_to_html(markdown: &str) -> String {
    use pulldown_cmark::{html, Options, Parser};

    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markdown, options);
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    html_output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_tables() {
        let html = markdown_to_html("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>1</td>"));
    }

    #[test]
    fn test_template_renders_readme() {
        let rendered = IndexTemplate {
            site_url: "http://localhost:8080/".to_string(),
            readme_html: markdown_to_html(README),
        }
        .render()
        .unwrap();
        assert!(rendered.contains("http://localhost:8080/"));
        assert!(rendered.contains("<h1>"));
    }
}
