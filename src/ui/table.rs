use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
pub struct TableRow {
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

/// Two-column rounded table of `(label, value)` pairs; empty input renders nothing
pub fn stats_table(stats: &[(&str, String)]) -> String {
    if stats.is_empty() {
        return String::new();
    }

    let rows: Vec<TableRow> = stats
        .iter()
        .map(|(label, value)| TableRow {
            metric: label.to_string(),
            value: value.clone(),
        })
        .collect();

    Table::new(&rows).with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_table_lists_rows() {
        let table = stats_table(&[("Verses", "31102".to_string()), ("Books", "66".to_string())]);
        assert!(table.contains("Metric"));
        assert!(table.contains("Verses"));
        assert!(table.contains("31102"));
        assert!(table.contains("66"));
    }

    #[test]
    fn test_stats_table_empty() {
        assert!(stats_table(&[]).is_empty());
    }
}
