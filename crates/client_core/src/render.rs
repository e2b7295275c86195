//! Rendering of a prediction response into the results region.
//!
//! All user- and server-supplied text is escaped before it reaches markup.

use std::fmt::Write as _;

use shared::{
    domain::ConfidenceBand,
    protocol::{Prediction, PredictionResponse},
};

#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    /// 1-based position in the response.
    pub rank: usize,
    pub go_term: String,
    pub name: String,
    pub definition: String,
    pub confidence: f64,
    pub confidence_percent: f64,
    pub band: ConfidenceBand,
}

impl ResultRow {
    fn from_prediction(rank: usize, prediction: &Prediction) -> Self {
        Self {
            rank,
            go_term: prediction.go_term.clone(),
            name: prediction.name.clone(),
            definition: prediction.definition.clone(),
            confidence: prediction.confidence,
            confidence_percent: prediction.confidence_percent,
            band: prediction.band(),
        }
    }

    /// Width of the confidence bar, in percent of the cell.
    pub fn bar_width(&self) -> f64 {
        if self.confidence_percent.is_finite() {
            self.confidence_percent.clamp(0.0, 100.0)
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedResults {
    pub sequence_length: u64,
    pub sequence: String,
    pub rows: Vec<ResultRow>,
    /// Markup for the `sequence-info` region.
    pub sequence_info_html: String,
    /// Markup for the `predictions-table` region.
    pub predictions_table_html: String,
}

pub fn render_results(response: &PredictionResponse) -> RenderedResults {
    let rows: Vec<ResultRow> = response
        .predictions
        .iter()
        .enumerate()
        .map(|(i, prediction)| ResultRow::from_prediction(i + 1, prediction))
        .collect();

    RenderedResults {
        sequence_length: response.sequence_length,
        sequence: response.sequence.clone(),
        sequence_info_html: sequence_info_html(response.sequence_length, &response.sequence),
        predictions_table_html: predictions_table_html(&rows),
        rows,
    }
}

fn sequence_info_html(sequence_length: u64, sequence: &str) -> String {
    format!(
        "<div class=\"sequence-display\">\
         <h6>Sequence ({sequence_length} amino acids):</h6>\
         <code>{}</code>\
         </div>",
        escape_html(sequence)
    )
}

fn predictions_table_html(rows: &[ResultRow]) -> String {
    let mut html = String::from(
        "<table class=\"table\"><thead><tr><th>Rank</th><th>Function</th><th>Confidence</th></tr></thead><tbody>",
    );

    for row in rows {
        // Writing into a String cannot fail.
        let _ = write!(
            html,
            "<tr>\
             <td class=\"rank\">{rank}</td>\
             <td><div class=\"function-info\">\
             <div class=\"go-term-header\">\
             <span class=\"go-term\">{go_term}</span>\
             <span class=\"function-name\">{name}</span>\
             </div>\
             <small class=\"function-definition text-muted\">{definition}</small>\
             </div></td>\
             <td>{percent}%\
             <div class=\"confidence-bar mt-1\">\
             <div class=\"confidence-fill\" style=\"width: {width}%; background-color: {color};\"></div>\
             </div></td>\
             </tr>",
            rank = row.rank,
            go_term = escape_html(&row.go_term),
            name = escape_html(&row.name),
            definition = escape_html(&row.definition),
            percent = row.confidence_percent,
            width = row.bar_width(),
            color = row.band.hex_color(),
        );
    }

    html.push_str("</tbody></table>");
    html
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prediction(go_term: &str, name: &str, confidence: f64, confidence_percent: f64) -> Prediction {
        Prediction {
            go_term: go_term.to_string(),
            name: name.to_string(),
            definition: format!("{name} definition"),
            confidence,
            confidence_percent,
        }
    }

    fn response(predictions: Vec<Prediction>) -> PredictionResponse {
        PredictionResponse {
            sequence: "GIGAVLKVLTTGLPALISWIKRKRQQ".to_string(),
            sequence_length: 26,
            predictions,
        }
    }

    #[test]
    fn renders_one_ranked_row_per_prediction() {
        let rendered = render_results(&response(vec![
            prediction("GO:0090729", "toxin activity", 0.93, 93.12),
            prediction("GO:0005179", "hormone activity", 0.41, 41.5),
        ]));

        assert_eq!(rendered.rows.len(), 2);
        assert_eq!(rendered.rows[0].rank, 1);
        assert_eq!(rendered.rows[1].rank, 2);
        assert_eq!(rendered.rows[0].bar_width(), 93.12);
        assert_eq!(rendered.rows[1].bar_width(), 41.5);

        let table = &rendered.predictions_table_html;
        assert_eq!(table.matches("<td class=\"rank\">").count(), 2);
        let first = table.find("<td class=\"rank\">1</td>").expect("rank 1");
        let second = table.find("<td class=\"rank\">2</td>").expect("rank 2");
        assert!(first < second);
        assert!(table.contains("width: 93.12%; background-color: #28a745;"));
        assert!(table.contains("width: 41.5%; background-color: #dc3545;"));
        assert!(table.contains("93.12%"));
    }

    #[test]
    fn medium_band_uses_amber() {
        let rendered = render_results(&response(vec![prediction("GO:0016829", "lyase activity", 0.5, 50.0)]));
        assert_eq!(rendered.rows[0].band, ConfidenceBand::Medium);
        assert!(rendered
            .predictions_table_html
            .contains("width: 50%; background-color: #ffc107;"));
    }

    #[test]
    fn empty_prediction_list_renders_header_only() {
        let rendered = render_results(&response(Vec::new()));
        assert!(rendered.rows.is_empty());
        assert!(rendered.predictions_table_html.ends_with("<tbody></tbody></table>"));
    }

    #[test]
    fn escapes_server_supplied_text() {
        let mut hostile = prediction("GO:<b>", "<script>alert('x')</script>", 0.9, 90.0);
        hostile.definition = "a & b \"quoted\"".to_string();
        let mut resp = response(vec![hostile]);
        resp.sequence = "<img src=x onerror=alert(1)>".to_string();

        let rendered = render_results(&resp);
        assert!(!rendered.predictions_table_html.contains("<script>"));
        assert!(rendered
            .predictions_table_html
            .contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
        assert!(rendered.predictions_table_html.contains("GO:&lt;b&gt;"));
        assert!(rendered
            .predictions_table_html
            .contains("a &amp; b &quot;quoted&quot;"));
        assert!(!rendered.sequence_info_html.contains("<img"));
        assert!(rendered
            .sequence_info_html
            .contains("<code>&lt;img src=x onerror=alert(1)&gt;</code>"));
    }

    #[test]
    fn sequence_info_reports_length() {
        let rendered = render_results(&response(Vec::new()));
        assert!(rendered
            .sequence_info_html
            .contains("<h6>Sequence (26 amino acids):</h6>"));
    }

    #[test]
    fn bar_width_is_clamped() {
        let rendered = render_results(&response(vec![prediction("GO:1", "odd", 1.2, 120.0)]));
        assert_eq!(rendered.rows[0].bar_width(), 100.0);
        assert!(rendered.predictions_table_html.contains("120%"));
    }
}
