use crate::config::SiteMeta;
use crate::models::user::SessionUser;
use crate::renderer::escape_html;

/// Path of the sign-in entry point for the Google provider.
pub const GOOGLE_SIGNIN_PATH: &str = "/api/auth/signin/google";

/// Renders the root page shell around already-rendered navigation and content.
///
/// `nav_html` and `children_html` are inserted verbatim; only the metadata is escaped.
pub fn render_root_layout(meta: &SiteMeta, nav_html: &str, children_html: &str) -> String {
    let title = escape_html(&meta.title);
    let description = escape_html(&meta.description);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title}</title>
    <meta name="description" content="{description}">
    <link rel="stylesheet" href="/styles/globals.css">
  </head>
  <body>
    <div class="main">
      <div class="gradient"></div>
    </div>
    <main class="app">
      {nav_html}
      {children_html}
    </main>
  </body>
</html>
"#
    )
}

/// Navigation bar. Shows the username when signed in, a sign-in link otherwise.
pub fn render_nav(meta: &SiteMeta, user: Option<&SessionUser>) -> String {
    let title = escape_html(&meta.title);
    let account = match user {
        Some(u) => format!(r#"<span class="nav-user">@{}</span>"#, escape_html(&u.username)),
        None => format!(r#"<a class="black_btn" href="{GOOGLE_SIGNIN_PATH}">Sign in</a>"#),
    };

    format!(r#"<nav class="nav"><a class="logo_text" href="/">{title}</a>{account}</nav>"#)
}

pub fn render_landing(meta: &SiteMeta) -> String {
    format!(
        r#"<section class="feed"><h1 class="head_text">{}</h1><p class="desc">{}</p></section>"#,
        escape_html(&meta.title),
        escape_html(&meta.description)
    )
}
