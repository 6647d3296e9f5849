use crate::auth::ConsentView;

use html_escape::{encode_double_quoted_attribute, encode_text};

pub trait ConsentRenderer: Send + Sync {
    fn render(&self, view: &ConsentView) -> String;
}

/// Built-in approve/deny page. Both buttons submit to `/confirm_auth`.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlConsentRenderer;

impl ConsentRenderer for HtmlConsentRenderer {
    fn render(&self, view: &ConsentView) -> String {
        let scopes: String = view
            .scopes
            .iter()
            .map(|s| format!("      <li>{}</li>\n", encode_text(s)))
            .collect();

        let logo = if view.logo.is_empty() {
            String::new()
        } else {
            format!(
                "    <img src=\"{}\" alt=\"{}\">\n",
                encode_double_quoted_attribute(&view.logo),
                encode_double_quoted_attribute(&view.name),
            )
        };

        format!(
            r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8">
    <title>Authorize {name}</title>
  </head>
  <body>
{logo}    <h1>{name}</h1>
    <p><a href="{website}">{website_text}</a> is requesting access to:</p>
    <ul>
{scopes}    </ul>
    <form method="get" action="/confirm_auth">
      <input type="hidden" name="client_id" value="{client_id}">
      <input type="hidden" name="state" value="{state}">
      <button type="submit" name="authorize" value="true">Allow</button>
      <button type="submit" name="authorize" value="false">Deny</button>
    </form>
  </body>
</html>
"#,
            name = encode_text(&view.name),
            logo = logo,
            website = encode_double_quoted_attribute(&view.website),
            website_text = encode_text(&view.website),
            scopes = scopes,
            client_id = encode_double_quoted_attribute(&view.client_id),
            state = encode_double_quoted_attribute(&view.state),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> ConsentView {
        ConsentView {
            client_id: "acme".to_string(),
            name: "Acme".to_string(),
            website: "https://acme.example".to_string(),
            logo: "https://acme.example/logo.png".to_string(),
            state: "xyz".to_string(),
            scopes: vec!["profile".to_string(), "email".to_string()],
        }
    }

    #[test]
    fn page_lists_scopes_and_posts_back_client_and_state() {
        let page = HtmlConsentRenderer.render(&view());
        assert!(page.contains("<li>profile</li>"));
        assert!(page.contains("<li>email</li>"));
        assert!(page.contains(r#"name="client_id" value="acme""#));
        assert!(page.contains(r#"name="state" value="xyz""#));
        assert!(page.contains(r#"<img src="https://acme.example/logo.png""#));
    }

    #[test]
    fn caller_supplied_values_are_escaped() {
        let mut view = view();
        view.state = r#""><script>alert(1)</script>"#.to_string();
        view.scopes = vec!["<b>".to_string()];

        let page = HtmlConsentRenderer.render(&view);
        assert!(!page.contains(r#"value=""><script>"#));
        assert!(!page.contains("<li><b></li>"));
    }
}
