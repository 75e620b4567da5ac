//! HTML for the single page.

use std::fmt::Write as _;

use askql_core::{QueryOutcome, Table};

use crate::pipeline::Resolution;

pub const TITLE: &str = "SQL Query Generator with AI";
pub const INPUT_LABEL: &str = "Ask a question: ";
pub const SUBMIT_LABEL: &str = "Generate SQL & Fetch Data";
pub const GENERATION_FAILED: &str = "Failed to generate a valid SQL query. Please try again.";

const STYLE: &str = "\
body{font-family:sans-serif;max-width:60rem;margin:2rem auto;padding:0 1rem;color:#262730}\
form{display:flex;flex-direction:column;gap:.5rem;margin-bottom:1.5rem}\
input[type=text]{padding:.5rem;font-size:1rem}\
button{align-self:flex-start;padding:.5rem 1rem;font-size:1rem}\
pre{background:#f0f2f6;padding:1rem;overflow-x:auto}\
table{border-collapse:collapse}\
th,td{border:1px solid #d6d6d9;padding:.25rem .5rem;text-align:left}\
td.null{color:#999}\
.error{background:#ffebe9;color:#7d1a1a;padding:.75rem 1rem;border-radius:.25rem}";

/// Escape text for HTML element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
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

/// The page, optionally with the result of a submitted question.
pub fn page(question: &str, resolution: Option<&Resolution>) -> String {
    let mut body = String::new();
    if let Some(resolution) = resolution {
        render_resolution(&mut body, resolution);
    }
    layout(question, &body)
}

/// Page shown when the language model could not be reached.
pub fn error_page(question: &str, message: &str) -> String {
    let body = format!(
        "<div class=\"error\" role=\"alert\"><strong>Error:</strong> {}</div>",
        escape(message)
    );
    layout(question, &body)
}

fn layout(question: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
<html lang=\"en\">\n\
<head>\n\
<meta charset=\"utf-8\">\n\
<title>{TITLE}</title>\n\
<style>{STYLE}</style>\n\
</head>\n\
<body>\n\
<h1>{TITLE}</h1>\n\
<form method=\"post\" action=\"/\">\n\
<label for=\"question\">{INPUT_LABEL}</label>\n\
<input type=\"text\" id=\"question\" name=\"question\" value=\"{question}\" autofocus>\n\
<button type=\"submit\">{}</button>\n\
</form>\n\
{body}\
</body>\n\
</html>\n",
        escape(SUBMIT_LABEL),
        question = escape(question),
    )
}

fn render_resolution(out: &mut String, resolution: &Resolution) {
    match resolution {
        Resolution::GenerationFailed => {
            error_banner(out, GENERATION_FAILED);
        }
        Resolution::Executed { sql, outcome } => {
            out.push_str("<h3>Generated SQL Query:</h3>\n");
            let _ = writeln!(
                out,
                "<pre><code class=\"language-sql\">{}</code></pre>",
                escape(sql.as_str())
            );
            out.push_str("<h3>Query Results:</h3>\n");
            render_outcome(out, outcome);
        }
    }
}

fn render_outcome(out: &mut String, outcome: &QueryOutcome) {
    match outcome {
        QueryOutcome::Tabular(table) => render_table(out, table),
        QueryOutcome::Count(n) => {
            let _ = writeln!(out, "<p>Count: {n}</p>");
        }
        QueryOutcome::Status(message) => result_line(out, message),
        QueryOutcome::Failure { kind, detail } => {
            let message = kind.describe(detail);
            error_banner(out, &message);
            result_line(out, &message);
        }
    }
}

fn render_table(out: &mut String, table: &Table) {
    out.push_str("<table>\n<thead><tr>");
    for column in table.columns() {
        let _ = write!(out, "<th>{}</th>", escape(column));
    }
    out.push_str("</tr></thead>\n<tbody>\n");
    for row in table.rows() {
        out.push_str("<tr>");
        for cell in row {
            if matches!(cell, askql_core::CellValue::Null) {
                out.push_str("<td class=\"null\">NULL</td>");
            } else {
                let _ = write!(out, "<td>{}</td>", escape(&cell.to_string()));
            }
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table>\n");
}

fn result_line(out: &mut String, message: &str) {
    let _ = writeln!(out, "<p>Result: {}</p>", escape(message));
}

fn error_banner(out: &mut String, message: &str) {
    let _ = writeln!(out, "<div class=\"error\" role=\"alert\">{}</div>", escape(message));
}
