//! Page chrome shared by every HTML view.

use library_core::resource::ResourceKind;

use super::escape;

/// Wrap `body` in the site layout.
///
/// `user` is the logged-in username; `None` renders the anonymous header
/// used by the login and registration pages.
pub fn page(title: &str, user: Option<&str>, body: &str) -> String {
    let nav = match user {
        Some(username) => {
            let links: String = ResourceKind::ALL
                .iter()
                .map(|kind| {
                    format!(
                        r#"<a href="/{}">{}</a>"#,
                        kind.slug(),
                        kind.plural_label()
                    )
                })
                .collect::<Vec<_>>()
                .join(" ");
            format!(
                r#"<a href="/index">Home</a> {links}
        <span class="user">{} <a href="/auth/logout">Log out</a></span>"#,
                escape(username)
            )
        }
        None => r#"<a href="/auth/login">Log in</a> <a href="/auth/register">Register</a>"#
            .to_string(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - Library</title>
    <style>
        body {{
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            margin: 0;
            color: #222;
        }}
        nav {{
            background-color: #2a2a2a;
            padding: 12px 20px;
        }}
        nav a {{
            color: #e0e0e0;
            margin-right: 12px;
            text-decoration: none;
        }}
        nav .user {{
            float: right;
            color: #888;
        }}
        main {{
            padding: 20px;
        }}
        table {{
            border-collapse: collapse;
        }}
        th, td {{
            border-bottom: 1px solid #ddd;
            padding: 6px 12px;
            text-align: left;
        }}
        .flash {{
            background-color: #fff3cd;
            border: 1px solid #ffe08a;
            padding: 10px;
            margin-bottom: 16px;
        }}
        .error {{
            color: #b00020;
        }}
    </style>
</head>
<body>
    <nav>
        {nav}
    </nav>
    <main>
        <h1>{title}</h1>
        {body}
    </main>
</body>
</html>"#,
        title = escape(title),
    )
}

/// A highlighted one-line message shown above a form.
pub fn flash(message: &str) -> String {
    format!(r#"<div class="flash">{}</div>"#, escape(message))
}
