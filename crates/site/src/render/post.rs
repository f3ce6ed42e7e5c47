//! Post page renderer.

use maud::{html, Markup};

use super::components::{format_date, is_safe_url, page_shell, post_href, preview_banner};
use super::richtext;
use crate::generate::{PostLink, PostPageProps};

pub const LOADING_TITLE: &str = "Carregando...";

/// Render a post page. `preview` adds the exit-preview banner.
pub fn render(props: &PostPageProps, preview: bool) -> Markup {
    let post = &props.post;
    let data = &post.data;
    let published = post.first_publication_date.as_ref();
    let banner = data.banner.url.as_deref().filter(|u| is_safe_url(u));

    let body = html! {
        @if preview { (preview_banner()) }

        @if let Some(url) = banner {
            img class="banner" src=(url) alt=(data.banner.alt.as_deref().unwrap_or(data.title.as_str()));
        }

        article class="post" {
            h1 { (data.title) }
            div class="post-info" {
                time datetime=[published.map(|d| d.to_rfc3339())] { (format_date(published)) }
                span class="author" { (data.author) }
                span class="read-time" { (props.read_time) " min" }
            }

            @for section in &data.content {
                section {
                    h2 { (section.heading) }
                    div class="post-content" { (richtext::as_html(&section.body)) }
                }
            }
        }

        (navigation(&props.prev_post, &props.next_post))
    };

    page_shell(&data.title, body)
}

/// Previous/next links; each side renders only when a neighbour exists.
fn navigation(prev_post: &[PostLink], next_post: &[PostLink]) -> Markup {
    let prev = prev_post.first();
    let next = next_post.first();
    html! {
        @if prev.is_some() || next.is_some() {
            nav class="post-navigation" {
                @if let Some(prev) = prev {
                    a class="prev" href=(post_href(&prev.uid)) {
                        span { (prev.title) }
                        small { "Post anterior" }
                    }
                }
                @if let Some(next) = next {
                    a class="next" href=(post_href(&next.uid)) {
                        span { (next.title) }
                        small { "Próximo post" }
                    }
                }
            }
        }
    }
}

/// Loading state served for posts that were not pre-rendered.
pub fn fallback() -> Markup {
    page_shell(
        LOADING_TITLE,
        html! {
            article class="post" {
                h1 { (LOADING_TITLE) }
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use spacetraveling_core::PostDocument;

    fn post() -> PostDocument {
        serde_json::from_value(json!({
            "id": "YF1",
            "uid": "como-utilizar-hooks",
            "type": "post",
            "first_publication_date": "2021-03-15T19:25:28+0000",
            "data": {
                "title": "Como utilizar Hooks",
                "author": "Joseph Oliveira",
                "banner": { "url": "https://images.prismic.io/banner.png" },
                "content": [{
                    "heading": "Proin et varius",
                    "body": [{ "type": "paragraph", "text": "Lorem ipsum", "spans": [] }]
                }]
            }
        }))
        .unwrap()
    }

    fn props(prev: Vec<PostLink>, next: Vec<PostLink>) -> PostPageProps {
        PostPageProps {
            post: post(),
            read_time: 1,
            prev_post: prev,
            next_post: next,
        }
    }

    fn link(uid: &str, title: &str) -> PostLink {
        PostLink {
            uid: uid.into(),
            title: title.into(),
        }
    }

    #[test]
    fn renders_post_details() {
        let html = render(&props(vec![], vec![]), false).into_string();
        assert!(html.contains("<h1>Como utilizar Hooks</h1>"));
        assert!(html.contains("15 Mar 2021"));
        assert!(html.contains("Joseph Oliveira"));
        assert!(html.contains("1 min"));
        assert!(html.contains("<h2>Proin et varius</h2>"));
        assert!(html.contains("<p>Lorem ipsum</p>"));
        assert!(html.contains(r#"src="https://images.prismic.io/banner.png""#));
        assert!(!html.contains(r#"class="preview-banner""#));
    }

    #[test]
    fn no_neighbours_renders_no_navigation() {
        let html = render(&props(vec![], vec![]), false).into_string();
        assert!(!html.contains(r#"class="post-navigation""#));
        assert!(!html.contains("Post anterior"));
        assert!(!html.contains("Próximo post"));
    }

    #[test]
    fn only_present_neighbours_render() {
        let html = render(&props(vec![link("older", "Older post")], vec![]), false).into_string();
        assert!(html.contains(r#"href="/post/older""#));
        assert!(html.contains("Post anterior"));
        assert!(!html.contains("Próximo post"));

        let html = render(&props(vec![], vec![link("newer", "Newer post")]), false).into_string();
        assert!(!html.contains("Post anterior"));
        assert!(html.contains(r#"href="/post/newer""#));
    }

    #[test]
    fn preview_mode_shows_exit_link() {
        let html = render(&props(vec![], vec![]), true).into_string();
        assert!(html.contains(r#"class="preview-banner""#));
        assert!(html.contains(r#"href="/api/exit-preview""#));
    }

    #[test]
    fn fallback_is_loading_state() {
        let html = fallback().into_string();
        assert!(html.contains("<h1>Carregando...</h1>"));
    }
}
