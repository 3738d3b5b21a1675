//! Inline documents rendered into the helper window.

use minijinja::{Environment, context};

const UNREACHABLE_TEMPLATE: &str = "<html>
<body>
    <h1>{{ heading }}</h1>
    {%- for paragraph in paragraphs %}
    <p>{{ paragraph }}</p>
    {%- endfor %}
</body>
</html>
";

const UNREACHABLE_HEADING: &str = "Unable to reach the regify application servers.";

const UNREACHABLE_PARAGRAPHS: [&str; 2] = [
    "Please make sure your internet connection is enabled and you're not blocking any internet traffic for this application.",
    "It also might be because of some maintenance. If you are sure that the internet connection is fine, try it again later.",
];

/// Renders the page shown when no regify server answers.
///
/// # Errors
///
/// Returns a [`minijinja::Error`] when rendering fails.
pub fn unreachable_server_page() -> Result<String, minijinja::Error> {
    let environment = Environment::new();
    environment.render_str(
        UNREACHABLE_TEMPLATE,
        context! {
            heading => UNREACHABLE_HEADING,
            paragraphs => UNREACHABLE_PARAGRAPHS,
        },
    )
}
