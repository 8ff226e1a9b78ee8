//! Server-rendered HTML pages.

/// Static landing page.
pub const INDEX_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>linkpay</title>
  <link rel="stylesheet" href="/static/style.css">
</head>
<body>
  <main>
    <h1>linkpay</h1>
    <p>Link a bank account with Plaid and charge it through Stripe ACH.</p>
    <a href="/billing">Go to billing</a>
  </main>
</body>
</html>
"#;

/// Billing page with the Link widget wired up.
///
/// The configured public key and environment tier are injected verbatim for
/// client-side initialization.
pub fn render_billing(public_key: &str, environment: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>linkpay - billing</title>
  <link rel="stylesheet" href="/static/style.css">
</head>
<body>
  <main>
    <h1>Billing</h1>
    <button id="link-btn">Link your bank account</button>
    <pre id="result"></pre>
  </main>
  <script src="https://cdn.plaid.com/link/v2/stable/link-initialize.js"></script>
  <script>
    var handler = Plaid.create({{
      key: '{public_key}',
      env: '{environment}',
      product: ['auth'],
      clientName: 'linkpay',
      onSuccess: function(public_token, metadata) {{
        fetch('/get_access_token', {{
          method: 'POST',
          headers: {{ 'Content-Type': 'application/json' }},
          body: JSON.stringify({{
            public_token: public_token,
            account_id: metadata.account_id
          }})
        }})
        .then(function(response) {{ return response.json(); }})
        .then(function(data) {{
          document.getElementById('result').textContent = JSON.stringify(data, null, 2);
        }});
      }}
    }});
    document.getElementById('link-btn').onclick = function() {{ handler.open(); }};
  </script>
</body>
</html>
"#
    )
}
