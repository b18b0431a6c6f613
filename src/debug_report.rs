use deinflect::{GuessDetails, GuessResult, GuessResultVerbose};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
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

pub fn print_run(input: &str, verbose: &GuessResultVerbose, color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Deinflecting: \"{}\"", input), ansi::CYAN)));

    println!("\n{}", palette.paint("━━━ Derivation ━━━", ansi::GRAY));
    if verbose.result.success {
        print_chain(&verbose.result, &palette);
    } else {
        println!("{}", palette.dim("  No result :("));
        if verbose.details.metrics.depth_cutoffs > 0 {
            println!(
                "\n  {} {}",
                palette.paint("Depth limit reached", ansi::YELLOW),
                palette.dim(format!("(--max-depth {})", verbose.details.max_depth))
            );
        }
    }

    println!("\n{}", palette.paint("━━━ Search ━━━", ansi::GRAY));
    print_metrics(&verbose.details, &palette);

    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!("  Total: {}", palette.paint(format!("{:?}", verbose.details.metrics.elapsed), ansi::GREEN));
    println!();
}

fn print_chain(result: &GuessResult, palette: &ansi::Palette) {
    for (idx, step) in result.chain.iter().enumerate() {
        let row = step.origin.row.map(|r| format!(" row {r}")).unwrap_or_default();
        println!(
            "  {} {} {} {}  {}",
            palette.paint(format!("[{}]", idx), ansi::GRAY),
            palette.paint(&step.from, ansi::YELLOW),
            palette.dim("→"),
            palette.paint(&step.to, ansi::YELLOW),
            palette.dim(format!("{} 〜{} → 〜{}", step.rule, step.source_suffix, step.target_suffix)),
        );
        println!(
            "      {} {}  {} {}",
            palette.dim("role:"),
            palette.paint(&step.target_role, ansi::BLUE),
            palette.dim("│ line:"),
            palette.paint(format!("{}{}", step.origin.line_no, row), ansi::CYAN)
        );
    }
    if let Some(entry) = &result.entry {
        println!("  {}", palette.bold(palette.paint(entry.to_string(), ansi::GREEN)));
    }
}

fn print_metrics(details: &GuessDetails, palette: &ansi::Palette) {
    let m = &details.metrics;
    println!(
        "  Rules: {} {}",
        palette.paint(details.rule_count.to_string(), ansi::BLUE),
        palette.dim(format!("({} from sound-table expansion)", details.expanded_rules))
    );
    println!(
        "  Nodes: {}  │  Lookups: {}  │  Deepest: {}",
        palette.paint(m.nodes_visited.to_string(), ansi::BLUE),
        palette.paint(m.lookups.to_string(), ansi::BLUE),
        palette.paint(m.max_depth_reached.to_string(), ansi::BLUE),
    );
    println!(
        "  Rules tested: {}  │  applied: {}",
        palette.paint(m.rules_tested.to_string(), ansi::YELLOW),
        palette.paint(m.rules_applied.to_string(), ansi::YELLOW),
    );
    if m.cycles_pruned > 0 || m.depth_cutoffs > 0 {
        println!(
            "  Cycles pruned: {}  │  Depth cutoffs: {}",
            palette.paint(m.cycles_pruned.to_string(), ansi::YELLOW),
            palette.paint(m.depth_cutoffs.to_string(), ansi::YELLOW),
        );
    }
}
