use crate::core::{ComponentNode, QualityCategory};
use crate::pipeline::AnalysisOutput;
use colored::*;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};
use std::io::Write;

/// Components listed in the "most complex" sections
const TOP_COMPONENTS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

pub trait OutputWriter {
    fn write_results(&mut self, output: &AnalysisOutput) -> anyhow::Result<()>;
}

pub fn create_writer(format: OutputFormat, writer: Box<dyn Write>) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer)),
    }
}

fn rating(score: f64) -> &'static str {
    match score {
        s if s >= 80.0 => "Good",
        s if s >= 60.0 => "Fair",
        _ => "Poor",
    }
}

/// File nodes by descending complexity, ties by id
fn most_complex(output: &AnalysisOutput) -> Vec<&ComponentNode> {
    let mut nodes: Vec<&ComponentNode> = output
        .graph
        .nodes
        .iter()
        .filter(|n| !n.is_external())
        .collect();
    nodes.sort_by(|a, b| b.complexity.cmp(&a.complexity).then_with(|| a.id.cmp(&b.id)));
    nodes.truncate(TOP_COMPONENTS);
    nodes
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_results(&mut self, output: &AnalysisOutput) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(output)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_results(&mut self, output: &AnalysisOutput) -> anyhow::Result<()> {
        self.write_header()?;
        self.write_summary(output)?;
        self.write_quality(output)?;
        self.write_components(output)?;
        self.write_insights(output)?;
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_header(&mut self) -> anyhow::Result<()> {
        writeln!(self.writer, "# Architecture Report")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Generated: {}",
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.writer, "Version: {}", env!("CARGO_PKG_VERSION"))?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_summary(&mut self, output: &AnalysisOutput) -> anyhow::Result<()> {
        let stats = &output.graph.stats;
        writeln!(self.writer, "## Summary")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        writeln!(self.writer, "| Components | {} |", stats.total_nodes)?;
        writeln!(self.writer, "| Dependencies | {} |", stats.total_edges)?;
        writeln!(
            self.writer,
            "| Average Connections | {:.2} |",
            stats.average_connections
        )?;
        writeln!(self.writer, "| Layers | {} |", join_or_none(&stats.layers))?;
        writeln!(self.writer, "| Frameworks | {} |", join_or_none(&stats.frameworks))?;
        writeln!(self.writer, "| Languages | {} |", join_or_none(&stats.languages))?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_quality(&mut self, output: &AnalysisOutput) -> anyhow::Result<()> {
        writeln!(self.writer, "## Quality Score: {:.1}", output.quality.overall)?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Category | Score | Rating |")?;
        writeln!(self.writer, "|----------|-------|--------|")?;
        for category in QualityCategory::ALL {
            let score = output.quality.category(category);
            writeln!(
                self.writer,
                "| {} | {:.1} | {} |",
                category.display_name(),
                score,
                rating(score)
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_components(&mut self, output: &AnalysisOutput) -> anyhow::Result<()> {
        let nodes = most_complex(output);
        if nodes.is_empty() {
            return Ok(());
        }
        writeln!(self.writer, "## Most Complex Components")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Path | Type | Complexity | Framework |")?;
        writeln!(self.writer, "|------|------|------------|-----------|")?;
        for node in nodes {
            writeln!(
                self.writer,
                "| `{}` | {} | {} | {} |",
                node.path,
                node.component_type,
                node.complexity,
                node.framework.as_deref().unwrap_or("-")
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_insights(&mut self, output: &AnalysisOutput) -> anyhow::Result<()> {
        let insights = &output.graph.insights;
        writeln!(self.writer, "## Insights")?;
        writeln!(self.writer)?;

        let sections: [(&str, &[String]); 4] = [
            ("Patterns", &insights.patterns),
            ("High Complexity", &insights.high_complexity),
            ("Critical Components", &insights.critical),
            ("Isolated Components", &insights.isolated),
        ];
        for (title, items) in sections {
            if items.is_empty() {
                continue;
            }
            writeln!(self.writer, "### {}", title)?;
            writeln!(self.writer)?;
            for item in items {
                writeln!(self.writer, "- {}", item)?;
            }
            writeln!(self.writer)?;
        }

        if !insights.circular_dependencies.is_empty() {
            writeln!(self.writer, "### Circular Dependencies")?;
            writeln!(self.writer)?;
            for group in &insights.circular_dependencies {
                writeln!(self.writer, "- {}", group.join(" -> "))?;
            }
            writeln!(self.writer)?;
        }

        if !insights.recommendations.is_empty() {
            writeln!(self.writer, "## Recommendations")?;
            writeln!(self.writer)?;
            for (i, recommendation) in insights.recommendations.iter().enumerate() {
                writeln!(self.writer, "{}. {}", i + 1, recommendation)?;
            }
            writeln!(self.writer)?;
        }
        Ok(())
    }
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn colored_score(score: f64) -> ColoredString {
        let text = format!("{:.1}", score);
        match rating(score) {
            "Good" => text.green(),
            "Fair" => text.yellow(),
            _ => text.red(),
        }
    }

    fn new_table() -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_content_arrangement(ContentArrangement::Dynamic);
        table
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_results(&mut self, output: &AnalysisOutput) -> anyhow::Result<()> {
        let stats = &output.graph.stats;
        let insights = &output.graph.insights;

        writeln!(self.writer)?;
        writeln!(self.writer, "{}", "═══════════════════════════════════════════".cyan())?;
        writeln!(self.writer, "{}", "           ARCHITECTURE REPORT".bold().cyan())?;
        writeln!(self.writer, "{}", "═══════════════════════════════════════════".cyan())?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "{} components, {} dependencies, {:.2} average connections",
            stats.total_nodes, stats.total_edges, stats.average_connections
        )?;
        if !stats.frameworks.is_empty() {
            writeln!(self.writer, "Frameworks: {}", stats.frameworks.join(", "))?;
        }
        if !stats.languages.is_empty() {
            writeln!(self.writer, "Languages: {}", stats.languages.join(", "))?;
        }
        writeln!(self.writer)?;

        writeln!(
            self.writer,
            "{} {}",
            "Quality Score:".bold(),
            Self::colored_score(output.quality.overall)
        )?;
        let mut quality = Self::new_table();
        quality.set_header(vec!["Category", "Score", "Rating"]);
        for category in QualityCategory::ALL {
            let score = output.quality.category(category);
            quality.add_row(vec![
                category.display_name().to_string(),
                format!("{:.1}", score),
                rating(score).to_string(),
            ]);
        }
        writeln!(self.writer, "{}", quality)?;

        let nodes = most_complex(output);
        if !nodes.is_empty() {
            writeln!(self.writer)?;
            writeln!(self.writer, "{}", "Most Complex Components".bold())?;
            let mut components = Self::new_table();
            components.set_header(vec!["Path", "Type", "Complexity"]);
            for node in nodes {
                components.add_row(vec![
                    node.path.clone(),
                    node.component_type.to_string(),
                    node.complexity.to_string(),
                ]);
            }
            writeln!(self.writer, "{}", components)?;
        }

        if !insights.patterns.is_empty() {
            writeln!(self.writer)?;
            writeln!(self.writer, "{} {}", "Patterns:".bold(), insights.patterns.join(", "))?;
        }
        for group in &insights.circular_dependencies {
            writeln!(self.writer, "{} {}", "Cycle:".red().bold(), group.join(" -> "))?;
        }
        if !insights.recommendations.is_empty() {
            writeln!(self.writer)?;
            writeln!(self.writer, "{}", "Recommendations".bold())?;
            for recommendation in &insights.recommendations {
                writeln!(self.writer, "  • {}", recommendation)?;
            }
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ArchmapConfig;
    use crate::core::{RepositorySnapshot, SourceFile};
    use crate::pipeline::analyze_repository;

    fn output() -> AnalysisOutput {
        let snapshot = RepositorySnapshot::new(vec![
            SourceFile::new("src/api/users.ts", "export async function GET() { return 1; }"),
            SourceFile::new("src/services/user.ts", "export class UserService {}"),
        ]);
        analyze_repository(&snapshot, &ArchmapConfig::default())
    }

    #[test]
    fn test_json_writer_round_trips() {
        let output = output();
        let mut buffer = Vec::new();
        JsonWriter::new(&mut buffer).write_results(&output).unwrap();
        let parsed: AnalysisOutput = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(parsed, output);
    }

    #[test]
    fn test_markdown_writer_sections() {
        let mut buffer = Vec::new();
        MarkdownWriter::new(&mut buffer).write_results(&output()).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("# Architecture Report"));
        assert!(text.contains("## Summary"));
        assert!(text.contains("| Code Quality |"));
        assert!(text.contains("`src/api/users.ts`"));
        assert!(text.contains("## Recommendations"));
    }

    #[test]
    fn test_terminal_writer_lists_categories() {
        colored::control::set_override(false);
        let mut buffer = Vec::new();
        TerminalWriter::new(&mut buffer).write_results(&output()).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("ARCHITECTURE REPORT"));
        for category in QualityCategory::ALL {
            assert!(text.contains(category.display_name()));
        }
    }

    #[test]
    fn test_rating_thresholds() {
        assert_eq!(rating(80.0), "Good");
        assert_eq!(rating(79.9), "Fair");
        assert_eq!(rating(10.0), "Poor");
    }
}
