use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
};
use serde::Deserialize;
use std::fmt::Write;
use std::sync::Arc;

use crate::{
    models::RecommendationGrid,
    routes::AppState,
    services::presentation,
};

const PAGE_TITLE: &str = "Movie Recommendation System";
const POSTER_WIDTH: u32 = 130;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    /// Title chosen in the selection control; absent before the first submit
    pub movie: Option<String>,
}

/// Handler for the browser page
///
/// Renders the title picker, and when a movie has been submitted, the grid
/// of recommendations below it. Lookup failures are shown on the page.
pub async fn index(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageQuery>,
) -> (StatusCode, Html<String>) {
    let selected = params.movie.as_deref();

    let (status, results) = match selected {
        None => (StatusCode::OK, String::new()),
        Some(title) => {
            match presentation::build_grid(
                &state.index,
                state.posters.as_ref(),
                title,
                state.recommendation_count,
                presentation::GRID_COLUMNS,
            )
            .await
            {
                Ok(grid) => (StatusCode::OK, render_grid(&grid)),
                Err(e) => {
                    tracing::info!(title = %title, error = %e, "Recommendation page lookup failed");
                    (
                        e.status_code(),
                        format!(r#"<p class="error">{}</p>"#, escape(&e.to_string())),
                    )
                }
            }
        }
    };

    let page = render_page(state.index.titles(), selected, &results);
    (status, Html(page))
}

fn render_page<'a>(
    titles: impl Iterator<Item = &'a str>,
    selected: Option<&str>,
    results: &str,
) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{0}</title></head>\n<body>\n<h1>{0}</h1>\n",
        PAGE_TITLE
    );

    html.push_str("<form method=\"get\" action=\"/\">\n<label for=\"movie\">Select a Movie</label>\n");
    html.push_str("<select id=\"movie\" name=\"movie\">\n");
    for title in titles {
        let marker = if Some(title) == selected { " selected" } else { "" };
        let escaped = escape(title);
        let _ = writeln!(html, "<option value=\"{0}\"{1}>{0}</option>", escaped, marker);
    }
    html.push_str("</select>\n<button type=\"submit\">Recommend</button>\n</form>\n");

    html.push_str(results);
    html.push_str("</body>\n</html>\n");
    html
}

fn render_grid(grid: &RecommendationGrid) -> String {
    let mut html = String::new();
    let _ = writeln!(html, "<h2>Top {} recommended movies:</h2>", grid.len());

    for row in &grid.rows {
        html.push_str("<div class=\"row\" style=\"display:flex;gap:1em\">\n");
        for card in row {
            let _ = writeln!(
                html,
                "<div class=\"card\"><img src=\"{}\" width=\"{}\" alt=\"{}\"><p>{}</p></div>",
                escape(&card.poster_url),
                POSTER_WIDTH,
                escape(&card.title),
                escape(&card.title),
            );
        }
        html.push_str("</div>\n");
    }

    html
}

/// Escapes text for use in HTML element content and quoted attributes
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
