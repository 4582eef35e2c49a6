use crate::model::ChatModel;

const INDEX_TEMPLATE: &str = include_str!("index.html");
const SETUP_ERROR_TEMPLATE: &str = include_str!("setup_error.html");
const STYLE: &str = include_str!("style.css");

pub fn render_index() -> String {
    let options = ChatModel::ALL
        .iter()
        .map(|model| {
            let selected = if *model == ChatModel::default() { " selected" } else { "" };
            format!(
                "      <option value=\"{id}\" title=\"{hint}\"{selected}>{id}</option>",
                id = escape_html(model.id()),
                hint = escape_html(model.hint()),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let caption = format!("For longer articles, choose {}.", ChatModel::Llama33_70bVersatile);

    INDEX_TEMPLATE
        .replace("{{STYLE}}", STYLE)
        .replace("{{MODEL_OPTIONS}}", &options)
        .replace("{{MODEL_CAPTION}}", &escape_html(&caption))
}

pub fn render_setup_error(message: &str) -> String {
    SETUP_ERROR_TEMPLATE
        .replace("{{STYLE}}", STYLE)
        .replace("{{MESSAGE}}", &escape_html(message))
}

fn escape_html(text: &str) -> String {
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
