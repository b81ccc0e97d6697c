// Self-contained HTML dashboard.
//
// Every panel is rendered on its own: a failing chart turns into an error
// notice inside its panel and the rest of the page still renders. Charts are
// inline SVG, the word cloud is a base64 data URI with alt text, and the
// record selector is driven by a small change handler.

use std::fmt::Write as _;

use anyhow::Result;
use tracing::warn;

use super::escape_html;
use crate::inspect::ComparisonRecord;
use crate::session::Session;
use crate::viz::render::{bar_svg, bar_title, histogram_svg};

/// Where the selection handler gets the chosen record from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionMode {
    /// Every record is embedded in the page; works as a standalone file.
    Embedded,
    /// Records are fetched from `GET {prefix}/{index}`.
    Api { prefix: String },
}

const STYLE: &str = r#"
body { color: #000000; background-color: #ffffff; font-family: sans-serif; font-size: 1rem; margin: 0 auto; max-width: 960px; padding: 1rem; }
figure { margin: 1rem 0; }
figure svg, figure img { width: 100%; max-width: 900px; height: auto; }
figcaption { font-size: 0.9rem; color: #333333; }
.panel-error { border: 2px solid #a00000; padding: 0.75rem; color: #a00000; }
table { border-collapse: collapse; }
th, td { text-align: left; padding: 0.25rem 0.75rem; border-bottom: 1px solid #cccccc; }
select { max-width: 100%; font-size: 1rem; }
"#;

const ACCESSIBILITY_NOTES: [&str; 6] = [
    "Every image has a caption or a text alternative for screen readers.",
    "Non-text content such as the word cloud comes with alternative text describing it.",
    "Color is never the only carrier of information; captions and text descriptions are provided.",
    "Text and background contrast meets the recommended ratio of at least 4.5:1.",
    "Text can be resized up to 200% without loss of content or functionality.",
    "The page has a descriptive title to help navigation.",
];

/// Render the full dashboard page for a session.
pub fn render_dashboard(session: &Session, title: &str, mode: &SelectionMode) -> String {
    let title = escape_html(title);
    let k = session.options().top_k;
    let mut page = String::new();

    let _ = write!(
        page,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n<main>\n\
         <h1>{title}</h1>\n\
         <p>This dashboard gives an interactive view of the dataset and shows the sentiment \
         predicted by a bi-LSTM baseline and by LLaMA, zero-shot and fine-tuned.</p>\n"
    );

    page.push_str("<h2>Exploratory data analysis</h2>\n");

    page.push_str(&panel("length histogram", || {
        let svg = histogram_svg(&session.histogram()?)?;
        Ok(figure(
            &svg,
            "Histogram showing the distribution of tweet lengths in number of words.",
        ))
    }));

    let _ = writeln!(page, "<h3>{}</h3>", escape_html(&bar_title(k)));
    page.push_str(&panel("top tokens", || {
        let svg = bar_svg(&session.top_tokens())?;
        Ok(figure(
            &svg,
            &format!("Bar chart showing the {k} most frequent words and their frequency in the corpus."),
        ))
    }));

    page.push_str("<h3>Word cloud of the dataset</h3>\n");
    page.push_str(&panel("word cloud", || {
        let cloud = session.word_cloud()?;
        Ok(format!(
            "<figure>\n<img src=\"{}\" alt=\"{}\" width=\"{}\" height=\"{}\">\n\
             <figcaption>Word cloud of all tweets (visualization of text frequency).</figcaption>\n</figure>\n",
            cloud.data_uri(),
            escape_html(&cloud.alt_text),
            cloud.width,
            cloud.height,
        ))
    }));

    page.push_str("<h2>Prediction demo</h2>\n");
    page.push_str(&panel("record inspector", || prediction_demo(session, mode)));

    page.push_str(&panel("model agreement", || Ok(agreement_table(session))));

    page.push_str("<hr>\n<h2>Accessibility considerations</h2>\n<ul>\n");
    for note in ACCESSIBILITY_NOTES {
        let _ = writeln!(page, "<li>{note}</li>");
    }
    page.push_str("</ul>\n");

    let _ = write!(
        page,
        "<footer><p><small>Source: {} &middot; generated {}</small></p></footer>\n\
         </main>\n</body>\n</html>\n",
        escape_html(&session.source().to_string()),
        chrono::Utc::now().format("%Y-%m-%d %H:%M UTC"),
    );

    page
}

/// Render one panel, turning a failure into an inline error notice.
fn panel(name: &str, render: impl FnOnce() -> Result<String>) -> String {
    match render() {
        Ok(html) => format!("<section>\n{html}</section>\n"),
        Err(e) => {
            warn!(panel = name, error = %e, "Dashboard panel failed to render");
            format!(
                "<section class=\"panel-error\" role=\"alert\">\n<p>The {} panel could not be rendered: {}</p>\n</section>\n",
                escape_html(name),
                escape_html(&format!("{e:#}")),
            )
        }
    }
}

fn figure(svg: &str, caption: &str) -> String {
    format!(
        "<figure role=\"img\" aria-label=\"{caption}\">\n{svg}\n<figcaption>{caption}</figcaption>\n</figure>\n",
        caption = escape_html(caption),
    )
}

/// Selector, comparison display and the selection change handler.
fn prediction_demo(session: &Session, mode: &SelectionMode) -> Result<String> {
    let first = session.on_select(0)?;
    let mut html = String::new();

    html.push_str(
        "<p>Select an existing tweet from the dataset to see the predictions.</p>\n\
         <label for=\"record-select\">Choose a tweet</label><br>\n\
         <select id=\"record-select\">\n",
    );
    for option in session.selector_options() {
        let _ = writeln!(
            html,
            "<option value=\"{}\">{}</option>",
            option.index,
            escape_html(&option.label)
        );
    }
    html.push_str("</select>\n");
    html.push_str(&comparison_markup(&first));

    let source = match mode {
        SelectionMode::Embedded => {
            let records: Vec<ComparisonRecord> = (0..session.dataset().len() as i64)
                .map(|i| session.on_select(i))
                .collect::<Result<_, _>>()?;
            let json = serde_json::to_string(&records)?.replace("</", "<\\/");
            format!("const records = {json};\nconst load = (i) => Promise.resolve(records[i]);")
        }
        SelectionMode::Api { prefix } => {
            let prefix = serde_json::to_string(prefix)?.replace("</", "<\\/");
            format!(
                "const load = (i) => fetch({prefix} + '/' + i).then((r) => {{\n\
                 if (!r.ok) throw new Error('HTTP ' + r.status);\n  return r.json();\n}});"
            )
        }
    };

    let _ = write!(
        html,
        "<script>\n{source}\n\
         const show = (r) => {{\n\
           document.getElementById('selected-text').textContent = r.text;\n\
           for (const cell of document.querySelectorAll('[data-field]')) {{\n\
             cell.textContent = r[cell.dataset.field];\n\
           }}\n\
         }};\n\
         document.getElementById('record-select').addEventListener('change', (e) => {{\n\
           load(Number(e.target.value)).then(show).catch((err) => {{\n\
             document.getElementById('selected-text').textContent = 'Could not load tweet: ' + err.message;\n\
           }});\n\
         }});\n\
         </script>\n"
    );

    Ok(html)
}

/// Static markup for one comparison record; the change handler updates it in place.
pub fn comparison_markup(record: &ComparisonRecord) -> String {
    let fields = [
        "ground_truth_label",
        "pred_bilstm",
        "pred_llama_zeroshot",
        "pred_llama_finetuned",
    ];

    let mut html = format!(
        "<div id=\"comparison\" aria-live=\"polite\">\n\
         <p><strong>Selected tweet:</strong> <span id=\"selected-text\">{}</span></p>\n<table>\n",
        escape_html(&record.text)
    );
    for ((caption, label), field) in record.rows().iter().zip(fields) {
        let _ = writeln!(
            html,
            "<tr><th scope=\"row\">{caption}</th><td data-field=\"{field}\">{}</td></tr>",
            escape_html(label.as_str())
        );
    }
    html.push_str("</table>\n</div>\n");
    html
}

fn agreement_table(session: &Session) -> String {
    let mut html = String::from(
        "<h3>Agreement with ground truth</h3>\n<table>\n\
         <tr><th scope=\"col\">Model</th><th scope=\"col\">Matches</th><th scope=\"col\">Rate</th></tr>\n",
    );
    for a in session.agreement() {
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td>{} / {}</td><td>{:.1}%</td></tr>",
            a.model,
            a.matches,
            a.total,
            a.rate() * 100.0
        );
    }
    html.push_str("</table>\n");
    html
}
