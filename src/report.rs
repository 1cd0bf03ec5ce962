use dommod::{ApplyResult, RuleEvent, RuleOutcome};
use std::path::Path;

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub fn print_run(target: &Path, res: &ApplyResult, verbose: bool, color: bool) {
    let palette = ansi::Palette::new(color);

    if verbose {
        for event in &res.events {
            println!("  {}", fmt_event(event, &palette));
        }
    }

    // Broken patterns are worth a warning even without --verbose.
    for event in &res.events {
        if let RuleOutcome::BadPattern { error } = &event.outcome {
            eprintln!("warning: rule [{}] has an invalid pattern: {error}", event.rule);
        }
    }

    let replaced = res.events.iter().filter(|e| e.outcome.changed()).count();
    println!(
        "{} {} {}",
        palette.paint(format!("{} rules applied, {} rewrote the document", res.events.len(), replaced), ansi::CYAN),
        palette.dim("│"),
        palette.dim(format!("{:?}", res.elapsed)),
    );
    println!(
        "wrote {} ({} bytes)",
        palette.bold(palette.paint(target.display().to_string(), ansi::GREEN)),
        res.output.len(),
    );
}

fn fmt_event(event: &RuleEvent, palette: &ansi::Palette) -> String {
    let name = palette.paint(format!("[{}]", event.rule), ansi::CYAN);
    match &event.outcome {
        RuleOutcome::Skipped => format!("{name} {}", palette.paint("skipped (disabled)", ansi::GRAY)),
        RuleOutcome::BadPattern { error } => {
            format!("{name} {}", palette.paint(format!("✗ pattern error: {error}"), ansi::YELLOW))
        }
        RuleOutcome::NoMatch => format!("{name} {}", palette.dim("✗ no match")),
        RuleOutcome::Replaced { matches } => {
            format!("{name} {}", palette.paint(format!("✓ replaced {matches} match(es)"), ansi::GREEN))
        }
    }
}
