use index_dashboard_core::IndexDashboard;

/// Client-side wiring: one `/api/update` call per input change, then the
/// returned chart spec is handed to Plotly and the explanation is rendered
/// with `**` emphasis turned into bold text.
const PAGE_JS: &str = r#"
      const symbolEl = document.getElementById('index-select');
      const startEl = document.getElementById('start-date');
      const endEl = document.getElementById('end-date');
      const explanationEl = document.getElementById('explanation');

      function escapeHtml(text) {
        return text
          .replace(/&/g, '&amp;')
          .replace(/</g, '&lt;')
          .replace(/>/g, '&gt;');
      }

      function renderMarkup(text) {
        return escapeHtml(text).replace(/\*\*(.+?)\*\*/g, '<strong>$1</strong>');
      }

      function renderChart(chart) {
        const trace = {
          x: chart.points.map(p => p.date),
          y: chart.points.map(p => p.close),
          type: 'scatter',
          mode: 'lines',
        };
        Plotly.react('chart', [trace], {
          title: { text: chart.title },
          xaxis: { title: { text: chart.x_field } },
          yaxis: { title: { text: chart.y_field } },
        });
      }

      async function update() {
        const params = new URLSearchParams({
          symbol: symbolEl.value,
          start: startEl.value,
          end: endEl.value,
        });
        try {
          const resp = await fetch('/api/update?' + params.toString());
          const result = await resp.json();
          renderChart(result.chart);
          explanationEl.innerHTML = renderMarkup(result.explanation);
        } catch (e) {
          explanationEl.textContent = 'Request failed: ' + e;
        }
      }

      symbolEl.addEventListener('change', update);
      startEl.addEventListener('change', update);
      endEl.addEventListener('change', update);
      update();
"#;

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
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

/// Render the single dashboard page with the selector pre-filled.
pub fn render(dashboard: &IndexDashboard) -> String {
    let defaults = dashboard.default_request();

    let options: String = dashboard
        .indices()
        .iter()
        .map(|index| {
            let selected = if index.symbol == defaults.symbol {
                " selected"
            } else {
                ""
            };
            format!(
                r#"<option value="{}"{selected}>{}</option>"#,
                escape_html(&index.symbol),
                escape_html(&index.name)
            )
        })
        .collect::<Vec<_>>()
        .join("\n          ");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <title>Interactive Stock Index Dashboard</title>
    <script src="https://cdn.plot.ly/plotly-2.35.2.min.js"></script>
  </head>
  <body>
    <h1 style="text-align: center">Interactive Stock Index Dashboard</h1>

    <label for="index-select">Select a stock index:</label>
    <select id="index-select">
          {options}
    </select>

    <label>Select the analysis period:</label>
    <input type="date" id="start-date" value="{start}" />
    <input type="date" id="end-date" value="{end}" />

    <div id="chart"></div>

    <div id="explanation" style="font-size: 20px; margin-top: 20px"></div>

    <script>{PAGE_JS}</script>
  </body>
</html>
"#,
        start = escape_html(&defaults.start),
        end = escape_html(&defaults.end),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(escape_html("S&P <500>"), "S&amp;P &lt;500&gt;");
        assert_eq!(escape_html(r#"a"b'c"#), "a&quot;b&#39;c");
    }
}
