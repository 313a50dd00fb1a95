// HTML dashboard export

use std::path::Path;

use dashgen_core::AnalysisResult;

use crate::error::IoError;

pub const DEFAULT_EXPORT_FILE_NAME: &str = "ai-generated-dashboard.html";

const STYLE: &str = "\
        body { font-family: Arial, sans-serif; margin: 20px; background: #f5f5f5; }
        .dashboard { max-width: 1200px; margin: 0 auto; }
        .header { text-align: center; margin-bottom: 30px; }
        .grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(300px, 1fr)); gap: 20px; }
        .card { background: white; padding: 20px; border-radius: 8px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }
        .type { font-size: 11px; text-transform: uppercase; color: #2563eb; }";

const PREVIEW_CARD: &str = "            <div class=\"card\">
                <h3>Dashboard Preview</h3>
                <p>This is a static HTML export of your AI-generated dashboard.</p>
                <p>For interactive features, please use the live dashboard.</p>
            </div>
";

/// Build a standalone HTML page for one analysis. All interpolated text is escaped.
pub fn render_html(dataset_name: &str, problem_statement: &str, result: &AnalysisResult) -> String {
    let mut html = format!(
        "<!DOCTYPE html>
<html lang=\"en\">
<head>
    <meta charset=\"UTF-8\">
    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">
    <title>Generated Dashboard</title>
    <style>
{STYLE}
    </style>
</head>
<body>
    <div class=\"dashboard\">
        <div class=\"header\">
            <h1>AI Generated Dashboard</h1>
            <p>Generated from: {}</p>
            <p>Problem Statement: {}</p>
        </div>
",
        escape_html(dataset_name),
        escape_html(problem_statement),
    );

    if !result.summary.is_empty() {
        html.push_str(&format!(
            "        <p class=\"summary\">{}</p>\n",
            escape_html(&result.summary)
        ));
    }
    if !result.insights.is_empty() {
        html.push_str("        <ul class=\"insights\">\n");
        for insight in &result.insights {
            html.push_str(&format!("            <li>{}</li>\n", escape_html(insight)));
        }
        html.push_str("        </ul>\n");
    }

    html.push_str("        <div class=\"grid\">\n");
    for chart in &result.recommended_charts {
        html.push_str(&format!(
            "            <div class=\"card\">
                <span class=\"type\">{}</span>
                <h3>{}</h3>
                <p>{}</p>
                <p>Columns: {}</p>
            </div>
",
            chart.chart_type,
            escape_html(&chart.title),
            escape_html(&chart.description),
            escape_html(&chart.columns.join(", ")),
        ));
    }
    html.push_str(PREVIEW_CARD);
    html.push_str(
        "        </div>
    </div>
</body>
</html>
",
    );
    html
}

pub fn export(
    path: &Path,
    dataset_name: &str,
    problem_statement: &str,
    result: &AnalysisResult,
) -> Result<(), IoError> {
    std::fs::write(path, render_html(dataset_name, problem_statement, result))?;
    Ok(())
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
