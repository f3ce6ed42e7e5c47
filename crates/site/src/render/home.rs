//! Home page: the latest published posts.

use maud::{html, Markup};
use spacetraveling_core::PostDocument;

use super::components::{format_date, page_shell, post_href, preview_banner};

pub fn render(posts: &[PostDocument], preview: bool) -> Markup {
    let body = html! {
        @if preview { (preview_banner()) }
        ul class="post-list" {
            @for post in posts {
                @if let Some(uid) = post.uid.as_deref() {
                    li {
                        a href=(post_href(uid)) {
                            h2 { (post.data.title) }
                        }
                        div class="post-info" {
                            time { (format_date(post.first_publication_date.as_ref())) }
                            span class="author" { (post.data.author) }
                        }
                    }
                }
            }
        }
        @if posts.is_empty() {
            p { "Nenhum post publicado." }
        }
    };
    page_shell("", body)
}
