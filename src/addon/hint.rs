//! Detection of regimail notification messages in rendered message bodies.
//!
//! Regimail carrier messages use a recognisable template. When a body
//! matches it, a short hint pointing at the toolbar button is prepended.

const MARKERS: [&str; 5] = [
    "regimail - confidential",
    "regimail - vertrauliche",
    "regimail - message",
    "regify<sup>®</sup> -",
    "regify® -",
];

/// Returns `true` when `body` looks like a regimail carrier message.
#[must_use]
pub fn looks_like_regimail(body: &str) -> bool {
    MARKERS.iter().any(|marker| body.contains(marker))
}

/// Returns the hint text for a BCP 47 language tag.
#[must_use]
pub fn hint_text(language: &str) -> &'static str {
    let primary: String = language
        .chars()
        .take(2)
        .flat_map(char::to_lowercase)
        .collect();
    match primary.as_str() {
        "de" => {
            "Dies ist vermutlich eine regimail. Zum öffnen klicken Sie bei ausgewählter Nachricht in der Menüleiste den <b>regimail</b>-Knopf."
        }
        "fr" => {
            "Probablement un regimail. Pour l'ouvrir, sélectionnez le message dans la barre de menu et cliquez sur le bouton <b>regimail</b>."
        }
        "zh" => "这很可能是regimail邮件。要打开它，请选择该邮件并点击菜单栏中的<b>regimail</b>按钮。",
        _ => {
            "This is probably a regimail. To open it, select the message and click on the <b>regimail</b> button in the menu bar."
        }
    }
}

/// Prepends the hint to a regimail carrier body. Returns `None` for other
/// messages.
#[must_use]
pub fn annotate_body(body: &str, language: &str) -> Option<String> {
    looks_like_regimail(body)
        .then(|| format!("<div class=\"rgfHint\">{}</div>\n{body}", hint_text(language)))
}
