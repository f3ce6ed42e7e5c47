//! HTML rendering for site pages.
//!
//! All rendering uses [maud](https://maud.lambda.xyz/), so every dynamic
//! value is escaped unless it is wrapped in `PreEscaped`.

pub mod components;
pub mod home;
pub mod post;
pub mod richtext;

use maud::{html, Markup};

use components::page_shell;

/// Page served for unknown paths and missing posts.
pub fn not_found_page() -> Markup {
    page_shell(
        "Página não encontrada",
        html! {
            div class="not-found" {
                h1 { "404" }
                p { "Página não encontrada." }
                a href="/" { "Voltar para o início" }
            }
        },
    )
}
