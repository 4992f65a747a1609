use std::io::Write;

use colored::Colorize;

use medivision_core::pipeline::render::LineFormatter;
use medivision_core::pipeline::StreamOutcome;
use medivision_core::AnalysisReport;
use medivision_types::UsageStats;

/// Prints a growing response to stdout, one formatted line at a time.
#[derive(Default)]
pub struct StreamPrinter {
    formatter: LineFormatter,
    printed: usize,
}

impl StreamPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the cumulative buffer; prints whatever lines completed since last time.
    pub fn update(&mut self, buffer: &str) {
        self.formatter.advance(buffer);
        let committed = self.formatter.committed();
        if committed.len() > self.printed {
            print!("{}", &committed[self.printed..]);
            self.printed = committed.len();
            let _ = std::io::stdout().flush();
        }
    }

    /// Print the unfinished tail and end the block.
    pub fn finish(self, buffer: &str) {
        let printed = self.printed;
        let full = self.formatter.finish(buffer);
        if let Some(rest) = full.get(printed..) {
            print!("{}", rest);
        }
        println!();
    }
}

pub fn print_outcome(report: &AnalysisReport) {
    match &report.outcome {
        StreamOutcome::Completed => {},
        StreamOutcome::Blocked { reason } => {
            eprintln!(
                "{} Response blocked by safety filters ({}). Please rephrase your query.",
                "⚠".yellow(),
                reason
            );
        },
        StreamOutcome::Failed { error } => {
            eprintln!("{} Generation failed: {}", "✗".red(), error.user_message());
        },
    }
}

pub fn print_usage_line(report: &AnalysisReport, session: &UsageStats) {
    let (total_tokens, total_cost) = session.display();
    println!(
        "{}",
        format!(
            "📊 Tokens used: {} | Estimated cost: ${:.4} | Session: {} tokens, {}",
            report.total_tokens, report.cost, total_tokens, total_cost
        )
        .dimmed()
    );
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

pub fn print_ok(message: &str) {
    println!("{} {}", "✓".green(), message);
}
